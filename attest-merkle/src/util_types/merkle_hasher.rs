use sha3::Digest as Sha3Digest;
use sha3::Keccak256;
use sha3::Sha3_256;

use crate::math::digest::Digest;

/// The hash primitive underneath a Merkle tree.
///
/// Implementors only provide [`hash`](MerkleHasher::hash); the pairwise
/// combinator and the leaf hash are derived from it. One deployment must use
/// one hasher for building, proving, and verifying, which is why trees and
/// the free-standing verification functions are generic over `H`.
pub trait MerkleHasher: Send + Sync {
    /// Hash an arbitrary byte string into a [`Digest`].
    fn hash(input: &[u8]) -> Digest;

    /// Combine two child digests into their parent.
    ///
    /// The smaller operand (byte-wise) is concatenated first, so
    /// `hash_pair(a, b) == hash_pair(b, a)` for all `a` and `b`.
    fn hash_pair(left: Digest, right: Digest) -> Digest {
        let (low, high) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };

        let mut preimage = [0u8; 2 * Digest::LEN];
        preimage[..Digest::LEN].copy_from_slice(low.as_bytes());
        preimage[Digest::LEN..].copy_from_slice(high.as_bytes());
        Self::hash(&preimage)
    }

    /// The digest of a leaf's payload: `hash(hash(payload))`.
    ///
    /// Hashing twice keeps leaf digests out of the preimage space of
    /// [`hash_pair`](MerkleHasher::hash_pair), so a 64-byte payload cannot
    /// pass for an internal node.
    fn hash_leaf(payload: &[u8]) -> Digest {
        let inner = Self::hash(payload);
        Self::hash(inner.as_bytes())
    }
}

fn from_sha3_output(output: &[u8]) -> Digest {
    let mut bytes = [0u8; Digest::LEN];
    bytes.copy_from_slice(output);
    Digest::new(bytes)
}

/// The original Keccak-256, as used by Ethereum. Not to be confused with the
/// standardized SHA3-256, which uses different padding.
impl MerkleHasher for Keccak256 {
    fn hash(input: &[u8]) -> Digest {
        from_sha3_output(&<Keccak256 as Sha3Digest>::digest(input))
    }
}

impl MerkleHasher for Sha3_256 {
    fn hash(input: &[u8]) -> Digest {
        from_sha3_output(&<Sha3_256 as Sha3Digest>::digest(input))
    }
}

#[cfg(test)]
pub(crate) mod merkle_hasher_tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    impl MerkleHasher for blake3::Hasher {
        fn hash(input: &[u8]) -> Digest {
            Digest::new(*blake3::hash(input).as_bytes())
        }
    }

    fn digest_from_hex(hex: &str) -> Digest {
        Digest::try_from_hex(hex).unwrap()
    }

    #[test]
    fn keccak_256_known_answers() {
        let empty =
            digest_from_hex("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
        assert_eq!(empty, Keccak256::hash(b""));

        let abc =
            digest_from_hex("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45");
        assert_eq!(abc, Keccak256::hash(b"abc"));
    }

    #[test]
    fn sha3_256_known_answer() {
        let abc =
            digest_from_hex("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532");
        assert_eq!(abc, Sha3_256::hash(b"abc"));
    }

    #[test]
    fn keccak_and_sha3_disagree() {
        assert_ne!(Keccak256::hash(b"abc"), Sha3_256::hash(b"abc"));
    }

    #[proptest]
    fn hash_pair_is_commutative(left: Digest, right: Digest) {
        prop_assert_eq!(
            Keccak256::hash_pair(left, right),
            Keccak256::hash_pair(right, left)
        );
        prop_assert_eq!(
            blake3::Hasher::hash_pair(left, right),
            blake3::Hasher::hash_pair(right, left)
        );
    }

    #[proptest]
    fn hash_pair_hashes_sorted_concatenation(left: Digest, right: Digest) {
        let (low, high) = if left < right {
            (left, right)
        } else {
            (right, left)
        };
        let preimage = [low.values(), high.values()].concat();
        prop_assert_eq!(Keccak256::hash(&preimage), Keccak256::hash_pair(left, right));
    }

    #[test]
    fn hash_pair_of_equal_operands_is_well_defined() {
        let digest = Keccak256::hash(b"duplicate");
        let preimage = [digest.values(), digest.values()].concat();
        assert_eq!(Keccak256::hash(&preimage), Keccak256::hash_pair(digest, digest));
    }

    #[proptest]
    fn hash_leaf_is_hash_of_hash(payload: Vec<u8>) {
        let expected = Keccak256::hash(Keccak256::hash(&payload).as_bytes());
        prop_assert_eq!(expected, Keccak256::hash_leaf(&payload));
        prop_assert_eq!(Keccak256::hash_leaf(&payload), Keccak256::hash_leaf(&payload));
    }

    #[proptest]
    fn leaf_hash_differs_from_single_hash(payload: Vec<u8>) {
        prop_assert_ne!(Keccak256::hash(&payload), Keccak256::hash_leaf(&payload));
    }

    #[test]
    fn internal_node_preimage_does_not_collide_with_leaf() {
        let left = Keccak256::hash_leaf(b"a");
        let right = Keccak256::hash_leaf(b"b");
        let node = Keccak256::hash_pair(left, right);

        let (low, high) = if left < right {
            (left, right)
        } else {
            (right, left)
        };
        let crafted_payload = [low.values(), high.values()].concat();
        assert_ne!(node, Keccak256::hash_leaf(&crafted_payload));
    }
}
