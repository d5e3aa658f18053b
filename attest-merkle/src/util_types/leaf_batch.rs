use std::marker::PhantomData;

use crate::error::MerkleTreeError;
use crate::math::digest::Digest;
use crate::util_types::merkle_hasher::MerkleHasher;
use crate::util_types::merkle_tree;
use crate::util_types::merkle_tree::MerkleTree;

/// Collects the leaves of one batch of attestations before committing to
/// them with a single [`MerkleTree`] or root computation.
///
/// Payloads are turned into leaves with [`MerkleHasher::hash_leaf`] as they
/// are pushed. Leaf indices are assigned in push order and are the indices
/// to request proofs for once the batch is committed.
pub struct LeafBatch<H: MerkleHasher> {
    leaves: Vec<Digest>,
    _hasher: PhantomData<H>,
}

impl<H: MerkleHasher> LeafBatch<H> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            leaves: Vec::with_capacity(capacity),
            _hasher: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn leaves(&self) -> &[Digest] {
        &self.leaves
    }

    /// Hash `payload` into a leaf and append it. Returns the leaf's index.
    pub fn push_payload(&mut self, payload: impl AsRef<[u8]>) -> usize {
        self.push_leaf(H::hash_leaf(payload.as_ref()))
    }

    /// Append an already hashed leaf. Returns the leaf's index.
    pub fn push_leaf(&mut self, leaf: Digest) -> usize {
        self.leaves.push(leaf);
        self.leaves.len() - 1
    }

    /// The root of the batch, without building the full tree.
    pub fn root(&self) -> Result<Digest, MerkleTreeError> {
        merkle_tree::compute_root::<H>(&self.leaves)
    }

    /// Commit to the batch.
    pub fn into_tree(self) -> Result<MerkleTree<H>, MerkleTreeError> {
        MerkleTree::new(&self.leaves)
    }
}

impl<H: MerkleHasher> Default for LeafBatch<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: MerkleHasher> Clone for LeafBatch<H> {
    fn clone(&self) -> Self {
        Self {
            leaves: self.leaves.clone(),
            _hasher: PhantomData,
        }
    }
}

impl<H: MerkleHasher> std::fmt::Debug for LeafBatch<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeafBatch")
            .field("leaves", &self.leaves)
            .finish()
    }
}

impl<H: MerkleHasher> Extend<Digest> for LeafBatch<H> {
    fn extend<I: IntoIterator<Item = Digest>>(&mut self, leaves: I) {
        self.leaves.extend(leaves);
    }
}

impl<H: MerkleHasher> FromIterator<Digest> for LeafBatch<H> {
    fn from_iter<I: IntoIterator<Item = Digest>>(leaves: I) -> Self {
        Self {
            leaves: leaves.into_iter().collect(),
            _hasher: PhantomData,
        }
    }
}
