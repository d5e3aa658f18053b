use arbitrary::Arbitrary;
use get_size2::GetSize;
use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;
use tracing::trace;

use crate::math::digest::Digest;
use crate::util_types::merkle_hasher::MerkleHasher;

/// An inclusion proof for a single leaf of a [`MerkleTree`].
///
/// The proof lists the siblings of the path from the leaf up to the root, and
/// for each sibling whether it sits to the right of the accumulated digest.
///
/// ```markdown
///            root
///           /    \
///      H(a,b)     H(c,c)
///      /    \      /
///     a      b    c
/// ```
///
/// The proof for `c` (index 2) has siblings `[c, H(a,b)]` and flags
/// `[true, false]`: the missing right neighbour of `c` is `c` itself.
///
/// Since [`MerkleHasher::hash_pair`] sorts its operands, the flags are not
/// needed to recompute the root. They are kept to describe the shape of the
/// path.
///
/// A proof carries no reference to the tree it came from. Verifying it only
/// requires the root.
///
/// [`MerkleTree`]: crate::util_types::merkle_tree::MerkleTree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, GetSize, Arbitrary)]
pub struct MerkleProof {
    /// The digest of the leaf whose inclusion is being proven.
    pub leaf: Digest,

    /// Sibling digests, ordered from the leaf layer towards the root.
    pub siblings: Vec<Digest>,

    /// `sibling_is_right[i]` tells whether `siblings[i]` is the right operand.
    pub sibling_is_right: Vec<bool>,

    /// The leaf's index in the original, unpadded leaf sequence.
    pub leaf_index: usize,
}

impl MerkleProof {
    /// The number of layers this proof climbs, which is the depth of the tree
    /// it was generated from.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Recompute the root this proof commits to.
    ///
    /// Returns `None` if the proof is malformed, _i.e._, if the number of
    /// siblings and position flags differ.
    pub fn root<H: MerkleHasher>(&self) -> Option<Digest> {
        if self.siblings.len() != self.sibling_is_right.len() {
            return None;
        }

        let root = self
            .siblings
            .iter()
            .zip_eq(&self.sibling_is_right)
            .fold(self.leaf, |acc, (&sibling, &sibling_is_right)| {
                if sibling_is_right {
                    H::hash_pair(acc, sibling)
                } else {
                    H::hash_pair(sibling, acc)
                }
            });

        Some(root)
    }

    /// Verify the proof against `expected_root`. Never panics; a malformed
    /// or mismatched proof is simply rejected.
    pub fn verify<H: MerkleHasher>(&self, expected_root: Digest) -> bool {
        let Some(root) = self.root::<H>() else {
            trace!(
                num_siblings = self.siblings.len(),
                num_flags = self.sibling_is_right.len(),
                "rejecting malformed inclusion proof"
            );
            return false;
        };

        let verdict = root == expected_root;
        if !verdict {
            trace!(leaf_index = self.leaf_index, "inclusion proof does not match root");
        }

        verdict
    }
}
