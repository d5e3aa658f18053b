use core::fmt;
use std::str::FromStr;

use arbitrary::Arbitrary;
use get_size2::GetSize;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::StandardUniform;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::TryFromDigestError;
use crate::error::TryFromHexDigestError;

/// The 32-byte output of a [`MerkleHasher`], used for leaves, internal nodes,
/// and roots alike. Sometimes called a “hash”.
///
/// Ordering is byte-wise lexicographic, which is the order in which
/// [`MerkleHasher::hash_pair`] concatenates its operands.
///
/// [`MerkleHasher`]: crate::util_types::merkle_hasher::MerkleHasher
/// [`MerkleHasher::hash_pair`]: crate::util_types::merkle_hasher::MerkleHasher::hash_pair
// note: Serialize and Deserialize have custom implementations below
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Arbitrary)]
pub struct Digest(pub [u8; Digest::LEN]);

impl GetSize for Digest {
    fn get_stack_size() -> usize {
        std::mem::size_of::<Self>()
    }

    fn get_heap_size(&self) -> usize {
        0
    }
}

impl Digest {
    /// The number of bytes in a digest.
    pub const LEN: usize = 32;

    pub const fn new(digest: [u8; Self::LEN]) -> Self {
        Self(digest)
    }

    pub const fn values(self) -> [u8; Self::LEN] {
        self.0
    }

    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Encode digest as lowercase hex, without a `0x` prefix.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// Decode a hex string to a Digest. A leading `0x` is accepted.
    pub fn try_from_hex(data: impl AsRef<[u8]>) -> Result<Self, TryFromHexDigestError> {
        let data = data.as_ref();
        let data = data.strip_prefix(b"0x").unwrap_or(data);
        let bytes = hex::decode(data)?;
        Ok(Self::try_from(bytes.as_slice())?)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = TryFromHexDigestError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::try_from_hex(string)
    }
}

impl Distribution<Digest> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Digest {
        Digest::new(rng.random())
    }
}

impl From<[u8; Digest::LEN]> for Digest {
    fn from(bytes: [u8; Digest::LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; Digest::LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = TryFromDigestError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        <[u8; Self::LEN]>::try_from(slice)
            .map(Self)
            .map_err(|_| TryFromDigestError::InvalidLength(slice.len()))
    }
}

impl TryFrom<Vec<u8>> for Digest {
    type Error = TryFromDigestError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Digest::try_from(value.as_slice())
    }
}

// we implement Serialize so that we can serialize as hex for human readable
// formats like JSON but use default serializer for other formats likes bincode
impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            self.to_string().serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

// we impl Deserialize so that we can deserialize as hex for human readable
// formats like JSON but use default deserializer for other formats like bincode
impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let hex_string = String::deserialize(deserializer)?;
            Self::try_from_hex(hex_string).map_err(serde::de::Error::custom)
        } else {
            Ok(Self::new(<[u8; Self::LEN]>::deserialize(deserializer)?))
        }
    }
}
