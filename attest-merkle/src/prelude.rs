pub use sha3::Keccak256;
pub use sha3::Sha3_256;

pub use crate::error::MerkleTreeError;
pub use crate::math::digest::Digest;
pub use crate::util_types::leaf_batch::LeafBatch;
pub use crate::util_types::merkle_hasher::MerkleHasher;
pub use crate::util_types::merkle_proof::MerkleProof;
pub use crate::util_types::merkle_tree;
pub use crate::util_types::merkle_tree::CpuParallel;
pub use crate::util_types::merkle_tree::MerkleTree;
pub use crate::util_types::merkle_tree::Sequential;
pub use crate::util_types::merkle_tree_maker::MerkleTreeMaker;
