#![deny(clippy::shadow_unrelated)]
//! Merkle commitments over batches of 32-byte leaves.
//!
//! Build a [`MerkleTree`](util_types::merkle_tree::MerkleTree) from already
//! hashed leaves, commit to its root, and hand out
//! [`MerkleProof`](util_types::merkle_proof::MerkleProof)s that anyone holding
//! the root can verify. The hash primitive is a type parameter; Keccak-256 is
//! the usual choice.
//!
//! ```
//! use attest_merkle::prelude::*;
//!
//! let leaves = [b"a", b"b", b"c"].map(|payload| Keccak256::hash_leaf(payload));
//! let tree = MerkleTree::<Keccak256>::new(&leaves).unwrap();
//! assert_eq!(2, tree.depth());
//!
//! let proof = tree.proof(2).unwrap();
//! assert!(merkle_tree::verify::<Keccak256>(tree.root(), &proof));
//! ```

pub mod config;
pub mod error;
pub mod math;
pub mod prelude;
pub mod util_types;
