use crate::error::MerkleTreeError;
use crate::math::digest::Digest;
use crate::util_types::merkle_hasher::MerkleHasher;
use crate::util_types::merkle_tree::MerkleTree;

/// A strategy for building a [`MerkleTree`]. All makers must produce the
/// same tree for the same leaves.
pub trait MerkleTreeMaker<H: MerkleHasher> {
    fn from_digests(digests: &[Digest]) -> Result<MerkleTree<H>, MerkleTreeError>;
}
