use thiserror::Error;

use crate::math::digest::Digest;

const DIGEST_BYTES: usize = Digest::LEN;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum MerkleTreeError {
    #[error("cannot commit to an empty sequence of leaves")]
    EmptyInput,

    #[error("leaf index {index} is out of range for a tree with {num_leaves} leaves")]
    IndexOutOfRange { index: usize, num_leaves: usize },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum TryFromDigestError {
    #[error("expected {DIGEST_BYTES} bytes for digest, but got {0}")]
    InvalidLength(usize),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TryFromHexDigestError {
    #[error("hex decoding error")]
    HexDecode(#[from] hex::FromHexError),

    #[error("digest error")]
    Digest(#[from] TryFromDigestError),
}
