//! Per-message parameters: nonce, associated data and authentication tag

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::error::{error_codes, GcmError, GcmResult};
use crate::security::constant_time::ct_tag_eq;

/// Canonical nonce length in bytes; other lengths take the hashed J0 path
pub const CANONICAL_NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// GCM nonce of any non-empty length
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Nonce(Vec<u8>);

impl Nonce {
    /// Create a nonce from bytes
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the nonce is empty
    pub fn new(nonce: &[u8]) -> GcmResult<Self> {
        if nonce.is_empty() {
            return Err(GcmError::invalid_parameter(
                "nonce",
                "at least 1 byte",
                "0 bytes",
                error_codes::AES_INVALID_NONCE_SIZE,
            ));
        }
        Ok(Self(nonce.to_vec()))
    }

    /// Generate a random 12-byte nonce
    ///
    /// A nonce must never repeat under the same key. Random 96-bit nonces
    /// are safe for roughly 2^32 messages per key.
    pub fn generate() -> GcmResult<Self> {
        let mut nonce = vec![0u8; CANONICAL_NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|e| GcmError::RandomGenerationError {
                cause: e.to_string(),
                error_code: error_codes::INSUFFICIENT_ENTROPY,
            })?;
        Ok(Self(nonce))
    }

    /// Nonce bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Nonce length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; empty nonces are rejected at construction
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this nonce takes the direct (non-hashed) J0 path
    pub fn is_canonical(&self) -> bool {
        self.0.len() == CANONICAL_NONCE_SIZE
    }
}

impl TryFrom<Vec<u8>> for Nonce {
    type Error = GcmError;

    fn try_from(nonce: Vec<u8>) -> GcmResult<Self> {
        Self::new(&nonce)
    }
}

impl From<Nonce> for Vec<u8> {
    fn from(nonce: Nonce) -> Self {
        nonce.0
    }
}

impl std::fmt::Debug for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nonce({})", hex::encode(&self.0))
    }
}

/// 16-byte GCM authentication tag
///
/// Equality is constant time; there is no `PartialEq` so `==` cannot be
/// used on tags by accident.
#[derive(Clone, Copy, Serialize, Deserialize, Zeroize)]
pub struct AuthTag([u8; TAG_SIZE]);

impl AuthTag {
    /// Create a tag from exactly 16 bytes
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for any other length. Truncated tags are
    /// not supported.
    pub fn from_slice(tag: &[u8]) -> GcmResult<Self> {
        if tag.len() != TAG_SIZE {
            return Err(GcmError::invalid_parameter(
                "tag",
                &format!("{} bytes", TAG_SIZE),
                &format!("{} bytes", tag.len()),
                error_codes::GCM_INVALID_TAG_SIZE,
            ));
        }
        let mut bytes = [0u8; TAG_SIZE];
        bytes.copy_from_slice(tag);
        Ok(Self(bytes))
    }

    /// Parse a tag from 32 hex characters
    pub fn from_hex(tag: &str) -> GcmResult<Self> {
        let bytes = hex::decode(tag).map_err(|e| {
            GcmError::invalid_parameter(
                "tag",
                "hex string",
                &e.to_string(),
                error_codes::GCM_INVALID_TAG_SIZE,
            )
        })?;
        Self::from_slice(&bytes)
    }

    /// Tag bytes
    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }

    /// Lower-case hex encoding of the tag
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn from_bytes(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; TAG_SIZE]> for AuthTag {
    fn from(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AuthTag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl ConstantTimeEq for AuthTag {
    fn ct_eq(&self, other: &Self) -> Choice {
        ct_tag_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for AuthTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthTag({})", self.to_hex())
    }
}

/// Everything that varies per message, supplied in one piece when a
/// message starts
///
/// # Examples
///
/// ```
/// use qasa_gcm::gcm::{MessageParams, Nonce};
///
/// let nonce = Nonce::new(&[0x24; 12]).unwrap();
/// let params = MessageParams::new(nonce).with_aad(b"header");
/// assert_eq!(params.aad(), b"header");
/// ```
#[derive(Clone, Debug)]
pub struct MessageParams {
    nonce: Nonce,
    aad: Vec<u8>,
}

impl MessageParams {
    /// Parameters with the given nonce and no associated data
    pub fn new(nonce: Nonce) -> Self {
        Self {
            nonce,
            aad: Vec::new(),
        }
    }

    /// Validate raw nonce bytes and build parameters in one step
    pub fn from_parts(nonce: &[u8], aad: &[u8]) -> GcmResult<Self> {
        Ok(Self::new(Nonce::new(nonce)?).with_aad(aad))
    }

    /// Attach associated data
    pub fn with_aad(mut self, aad: &[u8]) -> Self {
        self.aad = aad.to_vec();
        self
    }

    /// The message nonce
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// The associated data, empty if none was attached
    pub fn aad(&self) -> &[u8] {
        &self.aad
    }
}
