use ::aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use ::aes::{Aes128, Aes192, Aes256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GcmError, GcmResult};

/// Size of a cipher block in bytes
pub const BLOCK_SIZE: usize = 16;

/// A 16-byte cipher block
pub type Block = [u8; BLOCK_SIZE];

/// Forward direction of a 128-bit block cipher.
///
/// GCM never runs the cipher backwards, so this is the only operation the
/// engine needs. Implementations must be pure: the same input block always
/// maps to the same output block under the installed key.
pub trait BlockCipher {
    /// Encrypt a single block in place
    fn encrypt_block(&self, block: &mut Block);
}

/// Supported AES key sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Map a key length in bytes to a key size
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyLength` for anything other than 16, 24 or 32 bytes
    pub fn from_len(len: usize) -> GcmResult<Self> {
        match len {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            other => Err(GcmError::invalid_key_length(other)),
        }
    }

    /// Key length in bytes
    pub fn len(self) -> usize {
        match self {
            KeySize::Aes128 => 16,
            KeySize::Aes192 => 24,
            KeySize::Aes256 => 32,
        }
    }

    /// Key length in bits
    pub fn bits(self) -> usize {
        self.len() * 8
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.bits())
    }
}

/// AES encryption schedule for any of the three key sizes
///
/// The round keys are wiped when the value is dropped (the `aes` crate's
/// `zeroize` feature).
#[derive(Clone)]
pub enum AesBlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesBlockCipher {
    /// Build the encryption schedule for a 16, 24 or 32-byte key
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyLength` if the key is not one of the supported sizes
    pub fn new(key: &[u8]) -> GcmResult<Self> {
        let cipher = match KeySize::from_len(key.len())? {
            KeySize::Aes128 => AesBlockCipher::Aes128(Aes128::new(GenericArray::from_slice(key))),
            KeySize::Aes192 => AesBlockCipher::Aes192(Aes192::new(GenericArray::from_slice(key))),
            KeySize::Aes256 => AesBlockCipher::Aes256(Aes256::new(GenericArray::from_slice(key))),
        };
        Ok(cipher)
    }

    /// AES-128 from a fixed-size key
    pub fn new_128(key: &[u8; 16]) -> Self {
        AesBlockCipher::Aes128(Aes128::new(GenericArray::from_slice(&key[..])))
    }

    /// AES-192 from a fixed-size key
    pub fn new_192(key: &[u8; 24]) -> Self {
        AesBlockCipher::Aes192(Aes192::new(GenericArray::from_slice(&key[..])))
    }

    /// AES-256 from a fixed-size key
    pub fn new_256(key: &[u8; 32]) -> Self {
        AesBlockCipher::Aes256(Aes256::new(GenericArray::from_slice(&key[..])))
    }

    /// The key size this schedule was built from
    pub fn key_size(&self) -> KeySize {
        match self {
            AesBlockCipher::Aes128(_) => KeySize::Aes128,
            AesBlockCipher::Aes192(_) => KeySize::Aes192,
            AesBlockCipher::Aes256(_) => KeySize::Aes256,
        }
    }
}

impl BlockCipher for AesBlockCipher {
    fn encrypt_block(&self, block: &mut Block) {
        let block = GenericArray::from_mut_slice(&mut block[..]);
        match self {
            AesBlockCipher::Aes128(cipher) => cipher.encrypt_block(block),
            AesBlockCipher::Aes192(cipher) => cipher.encrypt_block(block),
            AesBlockCipher::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }
}

impl fmt::Debug for AesBlockCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesBlockCipher")
            .field("key_size", &self.key_size())
            .field("schedule", &"[REDACTED]")
            .finish()
    }
}
