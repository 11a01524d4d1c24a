//! SHA-256 digest value with encoding support

use crate::sha256::DIGEST_LEN;
use crate::{HashError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;

/// A 32-byte SHA-256 digest
///
/// Equality is constant-time. Serializes as a lowercase hex string.
#[derive(Clone, Copy)]
pub struct Sha256Digest([u8; DIGEST_LEN]);

impl Sha256Digest {
    /// Wrap raw digest bytes
    #[must_use]
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a digest from 64 hex characters (either case)
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidDigest` for wrong length or non-hex input.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| HashError::InvalidDigest(format!("{e} in {:?}", truncate(s))))?;
        Ok(Self(bytes))
    }

    /// Build a digest from a byte slice of exactly 32 bytes
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidDigest` if the slice has any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        <[u8; DIGEST_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| {
                HashError::InvalidDigest(format!(
                    "expected {DIGEST_LEN} bytes, got {}",
                    bytes.len()
                ))
            })
    }

    /// Get the raw bytes of the digest
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Convert to a Vec<u8>
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Get the digest as a lowercase hexadecimal string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get the digest as a base64 string
    #[must_use]
    pub fn to_base64(&self) -> String {
        use base64::{Engine as _, engine::general_purpose};
        general_purpose::STANDARD.encode(self.0)
    }

    /// Get the digest as a base64url string (URL-safe)
    #[must_use]
    pub fn to_base64url(&self) -> String {
        base64_url::encode(&self.0)
    }

    /// Compare against an expected digest in constant time
    ///
    /// Slices of the wrong length never match.
    #[must_use]
    pub fn verify(&self, expected: &[u8]) -> bool {
        self.0[..].ct_eq(expected).into()
    }
}

fn truncate(s: &str) -> &str {
    s.get(..80).unwrap_or(s)
}

impl From<[u8; DIGEST_LEN]> for Sha256Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Sha256Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Sha256Digest) -> Self {
        digest.0
    }
}

impl From<Sha256Digest> for Vec<u8> {
    fn from(digest: Sha256Digest) -> Self {
        digest.0.to_vec()
    }
}

impl AsRef<[u8]> for Sha256Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for Sha256Digest {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Sha256Digest {}

impl std::str::FromStr for Sha256Digest {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sha256Digest({})", self.to_hex())
    }
}

impl Serialize for Sha256Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sha256Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
