use std::fmt::Debug;
use std::marker::PhantomData;

use rayon::prelude::*;
use tracing::debug;
use tracing::trace;

use crate::config::merkle_tree_parallelization_cutoff;
use crate::error::MerkleTreeError;
use crate::math::digest::Digest;
use crate::util_types::merkle_hasher::MerkleHasher;
use crate::util_types::merkle_proof::MerkleProof;
use crate::util_types::merkle_tree_maker::MerkleTreeMaker;

type Result<T> = std::result::Result<T, MerkleTreeError>;

/// A binary Merkle tree over an arbitrary, non-zero number of leaves.
///
/// The tree is stored as its sequence of layers, starting with the leaf layer
/// and ending with the single-node root layer. Layers are stored as computed:
/// if a layer has an odd number of nodes, its last node is paired with itself
/// when computing the next layer, but the duplicate is never stored.
///
/// ```markdown
///               root
///             /      \
///        H(0,1)       H(2,2)
///        /    \       /
///       0      1     2
/// ```
///
/// A tree is immutable. Adding a leaf requires building a new tree.
pub struct MerkleTree<H>
where
    H: MerkleHasher,
{
    layers: Vec<Vec<Digest>>,
    _hasher: PhantomData<H>,
}

impl<H: MerkleHasher> Clone for MerkleTree<H> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
            _hasher: PhantomData,
        }
    }
}

impl<H: MerkleHasher> Debug for MerkleTree<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerkleTree")
            .field("layers", &self.layers)
            .finish()
    }
}

impl<H: MerkleHasher> PartialEq for MerkleTree<H> {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers
    }
}

impl<H: MerkleHasher> Eq for MerkleTree<H> {}

/// # Design
/// Proof generation needs the tree, proof verification does not. The verifier
/// usually holds only a root and a [`MerkleProof`] and uses the free-standing
/// [`verify`]. [`MerkleTree::verify`] is the same check against the tree's own
/// root.
impl<H> MerkleTree<H>
where
    H: MerkleHasher,
{
    /// Build a Merkle tree sequentially. See [`CpuParallel`] for a parallel
    /// alternative that produces the same tree.
    pub fn new(leaves: &[Digest]) -> Result<Self> {
        <Sequential as MerkleTreeMaker<H>>::from_digests(leaves)
    }

    /// Build the tree by repeatedly folding the topmost layer with
    /// `parent_layer` until a single node remains.
    fn from_leaves_with<F>(leaves: &[Digest], parent_layer: F) -> Result<Self>
    where
        F: Fn(&[Digest]) -> Vec<Digest>,
    {
        if leaves.is_empty() {
            return Err(MerkleTreeError::EmptyInput);
        }

        let mut layers = vec![leaves.to_vec()];
        loop {
            let top_layer = &layers[layers.len() - 1];
            if top_layer.len() == 1 {
                break;
            }
            let next_layer = parent_layer(top_layer);
            layers.push(next_layer);
        }

        Ok(Self {
            layers,
            _hasher: PhantomData,
        })
    }

    pub fn root(&self) -> Digest {
        self.layers[self.depth()][0]
    }

    /// The leaves in their original order, without any padding.
    pub fn leaves(&self) -> &[Digest] {
        &self.layers[0]
    }

    pub fn num_leaves(&self) -> usize {
        self.layers[0].len()
    }

    pub fn leaf(&self, index: usize) -> Option<Digest> {
        self.layers[0].get(index).copied()
    }

    /// The number of pair-hashing rounds between the leaves and the root.
    /// A tree with a single leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// The nodes at `level`, where level 0 is the leaf layer and level
    /// [`depth`](Self::depth) is the root.
    pub fn layer(&self, level: usize) -> Option<&[Digest]> {
        self.layers.get(level).map(Vec::as_slice)
    }

    /// Generate an inclusion proof for the leaf at `leaf_index`.
    ///
    /// ```markdown
    ///              root
    ///             /    \
    ///        H(a,b)     H(c,d)
    ///        /    \     /    \
    ///       a      b   c      d
    /// ```
    ///
    /// The proof for `c` (index 2) has siblings `[d, H(a,b)]`, a criss-cross of
    /// siblings upwards.
    pub fn proof(&self, leaf_index: usize) -> Result<MerkleProof> {
        let num_leaves = self.num_leaves();
        if leaf_index >= num_leaves {
            return Err(MerkleTreeError::IndexOutOfRange {
                index: leaf_index,
                num_leaves,
            });
        }

        let depth = self.depth();
        let mut siblings = Vec::with_capacity(depth);
        let mut sibling_is_right = Vec::with_capacity(depth);

        let mut node_index = leaf_index;
        for layer in &self.layers[..depth] {
            // We get the sibling node by XOR'ing with 1.
            let sibling_index = node_index ^ 1;
            let (sibling, is_right) = match layer.get(sibling_index) {
                Some(&sibling) => (sibling, node_index % 2 == 0),

                // The last node of an odd layer was paired with itself.
                None => (layer[node_index], true),
            };
            siblings.push(sibling);
            sibling_is_right.push(is_right);
            node_index /= 2;
        }

        trace!(leaf_index, depth, "generated inclusion proof");
        Ok(MerkleProof {
            leaf: self.layers[0][leaf_index],
            siblings,
            sibling_is_right,
            leaf_index,
        })
    }

    /// Inclusion proofs for all leaves, in leaf order.
    pub fn proofs(&self) -> impl Iterator<Item = MerkleProof> + '_ {
        (0..self.num_leaves()).filter_map(|leaf_index| self.proof(leaf_index).ok())
    }

    /// Verify `proof` against this tree's root.
    pub fn verify(&self, proof: &MerkleProof) -> bool {
        verify::<H>(self.root(), proof)
    }
}

/// Verify an inclusion proof against a root, without access to the tree.
pub fn verify<H: MerkleHasher>(root: Digest, proof: &MerkleProof) -> bool {
    proof.verify::<H>(root)
}

/// Compute the Merkle root of `leaves` without retaining any of the tree's
/// internal layers. The result is identical to [`MerkleTree::root`] of the
/// tree built from the same leaves.
pub fn compute_root<H: MerkleHasher>(leaves: &[Digest]) -> Result<Digest> {
    if leaves.is_empty() {
        return Err(MerkleTreeError::EmptyInput);
    }

    // Parent `i` only reads nodes `2i` and `2i + 1`, both of which are at or
    // beyond `i`, so every layer can be folded in place.
    let mut nodes = leaves.to_vec();
    while nodes.len() > 1 {
        let num_parents = nodes.len().div_ceil(2);
        for parent_index in 0..num_parents {
            let left_child = nodes[2 * parent_index];
            let right_child = nodes
                .get(2 * parent_index + 1)
                .copied()
                .unwrap_or(left_child);
            nodes[parent_index] = H::hash_pair(left_child, right_child);
        }
        nodes.truncate(num_parents);
    }

    Ok(nodes[0])
}

/// Hash one chunk of a layer into its parent. The last chunk of an odd layer
/// has a single node, which is paired with itself.
fn hash_siblings<H: MerkleHasher>(siblings: &[Digest]) -> Digest {
    let left = siblings[0];
    let right = siblings.get(1).copied().unwrap_or(left);
    H::hash_pair(left, right)
}

fn sequential_parent_layer<H: MerkleHasher>(layer: &[Digest]) -> Vec<Digest> {
    layer.chunks(2).map(hash_siblings::<H>).collect()
}

/// Builds Merkle trees on the current thread.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Sequential;

impl<H: MerkleHasher> MerkleTreeMaker<H> for Sequential {
    fn from_digests(digests: &[Digest]) -> Result<MerkleTree<H>> {
        let tree = MerkleTree::<H>::from_leaves_with(digests, sequential_parent_layer::<H>)?;
        debug!(
            num_leaves = tree.num_leaves(),
            depth = tree.depth(),
            maker = "sequential",
            "built Merkle tree"
        );

        Ok(tree)
    }
}

/// Builds Merkle trees using `rayon`'s thread pool for all layers with at
/// least as many nodes as the
/// [parallelization cutoff](crate::config::set_merkle_tree_parallelization_cutoff).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CpuParallel;

impl<H: MerkleHasher> MerkleTreeMaker<H> for CpuParallel {
    fn from_digests(digests: &[Digest]) -> Result<MerkleTree<H>> {
        let cutoff = merkle_tree_parallelization_cutoff();
        let parent_layer = |layer: &[Digest]| {
            if layer.len() < cutoff {
                return sequential_parent_layer::<H>(layer);
            }
            layer.par_chunks(2).map(hash_siblings::<H>).collect()
        };

        let tree = MerkleTree::<H>::from_leaves_with(digests, parent_layer)?;
        debug!(
            num_leaves = tree.num_leaves(),
            depth = tree.depth(),
            maker = "cpu_parallel",
            cutoff,
            "built Merkle tree"
        );

        Ok(tree)
    }
}
