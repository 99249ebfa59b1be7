//! BLAKE3 content digests for source files and archive entries.
//!
//! Only relative equality between the source-side and archive-side digest of
//! the same entry is load-bearing; the absolute value is never persisted
//! beyond a single run.

use crate::Result;
use serde::Deserialize;
use serde::Serialize;
use serde::de::Error as _;
use std::fmt;
use std::io::Read;

/// Chunk size for streaming digest computation.
const CHUNK_SIZE: usize = 64 * 1024;

/// A BLAKE3 digest of a byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest {
    bytes: [u8; 32],
}

impl Digest {
    /// Creates a digest from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Returns the raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Computes the digest of an in-memory byte slice.
    #[must_use]
    pub fn from_data(data: &[u8]) -> Self {
        Self::from_bytes(*blake3::hash(data).as_bytes())
    }

    /// Computes the digest of a readable byte stream.
    ///
    /// Reads in bounded chunks so arbitrarily large inputs never load into
    /// memory at once. An empty stream yields the hash of empty input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the stream fails.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
        Ok(Self::from_bytes(*hasher.finalize().as_bytes()))
    }

    /// Renders the digest as a lowercase hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decoded = hex::decode(&s).map_err(D::Error::custom)?;
        let bytes: [u8; 32] = decoded
            .try_into()
            .map_err(|_| D::Error::custom("digest must be 32 bytes"))?;
        Ok(Self::from_bytes(bytes))
    }
}

/// A digest recorded for one archive entry.
///
/// Produced once from the source file while it streams into the archive,
/// then compared against a second digest computed from the written entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRecord {
    /// Entry name inside the archive (forward-slash separated).
    pub archive_path: String,

    /// Digest of the entry's content.
    pub digest: Digest,
}
