//! Key context and typed message handles
//!
//! A [`Gcm`] is built once per key. Each message is started with
//! [`Gcm::begin_encrypt`] or [`Gcm::begin_decrypt`], which hand back an
//! [`Encryptor`] or [`Decryptor`] owning that message's counter, keystream
//! cursor and GHASH state. Data can only be fed to a started message, and
//! taking the tag consumes the handle, so a finished message cannot be
//! extended.

use zeroize::Zeroize;

use crate::aes::{AesBlockCipher, BlockCipher, KeySize, BLOCK_SIZE};
use crate::error::{error_codes, GcmError, GcmResult};
use crate::ghash::GHashAccumulator;
use crate::security::constant_time::{ct_tag_eq_probed, ComparisonProbe};

use super::message::{Direction, MessageState};
use super::params::{AuthTag, MessageParams, TAG_SIZE};

/// GCM key context: block cipher schedule plus a GHASH core keyed with
/// H = E(0^128)
///
/// # Examples
///
/// ```
/// use qasa_gcm::gcm::{Gcm, MessageParams, Nonce};
///
/// let gcm = Gcm::new(&[0x42; 32]).unwrap();
/// let params = MessageParams::new(Nonce::generate().unwrap()).with_aad(b"header");
///
/// let mut encryptor = gcm.begin_encrypt(&params);
/// let mut ciphertext = encryptor.update(b"Secret ");
/// ciphertext.extend(encryptor.update(b"message"));
/// let tag = encryptor.authtag();
///
/// let mut decryptor = gcm.begin_decrypt(&params);
/// let plaintext = decryptor.update(&ciphertext);
/// assert!(decryptor.verify(&tag));
/// assert_eq!(plaintext, b"Secret message");
/// ```
pub struct Gcm<C: BlockCipher = AesBlockCipher> {
    cipher: C,
    /// Keyed once here; every message starts from a clone
    hash: GHashAccumulator,
}

impl Gcm<AesBlockCipher> {
    /// Set up AES-GCM for a 16, 24 or 32-byte key
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyLength` if the key is not one of the supported sizes
    pub fn new(key: &[u8]) -> GcmResult<Self> {
        let cipher = AesBlockCipher::new(key)?;
        log::debug!("Installed {} key schedule", cipher.key_size());
        Ok(Self::with_cipher(cipher))
    }

    /// AES-128-GCM from a fixed-size key
    pub fn new128(key: &[u8; 16]) -> Self {
        Self::with_cipher(AesBlockCipher::new_128(key))
    }

    /// AES-192-GCM from a fixed-size key
    pub fn new192(key: &[u8; 24]) -> Self {
        Self::with_cipher(AesBlockCipher::new_192(key))
    }

    /// AES-256-GCM from a fixed-size key
    pub fn new256(key: &[u8; 32]) -> Self {
        Self::with_cipher(AesBlockCipher::new_256(key))
    }

    /// AES key size this context was built with
    pub fn key_size(&self) -> KeySize {
        self.cipher.key_size()
    }
}

impl<C: BlockCipher> Gcm<C> {
    /// Wrap an already keyed block cipher and derive the hash subkey
    pub fn with_cipher(cipher: C) -> Self {
        let mut hash_key = [0u8; BLOCK_SIZE];
        cipher.encrypt_block(&mut hash_key);
        let hash = GHashAccumulator::new(&hash_key);
        hash_key.zeroize();
        Self { cipher, hash }
    }

    /// Start encrypting a message
    pub fn begin_encrypt(&self, params: &MessageParams) -> Encryptor<'_, C> {
        Encryptor {
            gcm: self,
            state: MessageState::start(&self.cipher, &self.hash, params, Direction::Encrypt),
        }
    }

    /// Start decrypting a message
    ///
    /// Plaintext returned by [`Decryptor::update`] is unauthenticated until
    /// [`Decryptor::verify`] returns `true`. Callers that cannot hold it
    /// back should use [`Gcm::open`], which buffers the whole message.
    pub fn begin_decrypt(&self, params: &MessageParams) -> Decryptor<'_, C> {
        Decryptor {
            gcm: self,
            state: MessageState::start(&self.cipher, &self.hash, params, Direction::Decrypt),
        }
    }

    /// Encrypt a whole message, returning `ciphertext ‖ tag`
    pub fn seal(&self, params: &MessageParams, plaintext: &[u8]) -> Vec<u8> {
        let mut sealed = Vec::with_capacity(plaintext.len() + TAG_SIZE);
        sealed.extend_from_slice(plaintext);

        let mut encryptor = self.begin_encrypt(params);
        encryptor.update_in_place(&mut sealed);
        let tag = encryptor.authtag();

        sealed.extend_from_slice(tag.as_bytes());
        sealed
    }

    /// Decrypt and verify `ciphertext ‖ tag`, releasing the plaintext only
    /// if the tag matches
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if the input is shorter than a tag
    /// * `AuthenticationFailed` if the tag does not match
    pub fn open(&self, params: &MessageParams, sealed: &[u8]) -> GcmResult<Vec<u8>> {
        if sealed.len() < TAG_SIZE {
            return Err(GcmError::invalid_parameter(
                "ciphertext",
                &format!("at least {} bytes", TAG_SIZE),
                &format!("{} bytes", sealed.len()),
                error_codes::GCM_INVALID_CIPHERTEXT,
            ));
        }

        let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_SIZE);
        let expected = AuthTag::from_slice(tag)?;

        let mut plaintext = ciphertext.to_vec();
        let mut decryptor = self.begin_decrypt(params);
        decryptor.update_in_place(&mut plaintext);

        if decryptor.verify(&expected) {
            Ok(plaintext)
        } else {
            log::debug!(
                "GCM tag mismatch, discarding {} bytes of plaintext",
                plaintext.len()
            );
            plaintext.zeroize();
            Err(GcmError::authentication_failed(
                "open",
                "GCM authentication tag mismatch",
            ))
        }
    }

    pub(crate) fn cipher(&self) -> &C {
        &self.cipher
    }

    pub(crate) fn hash(&self) -> &GHashAccumulator {
        &self.hash
    }
}

impl<C: BlockCipher> std::fmt::Debug for Gcm<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gcm")
            .field("hash_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Encryption phase of one message
pub struct Encryptor<'a, C: BlockCipher = AesBlockCipher> {
    gcm: &'a Gcm<C>,
    state: MessageState,
}

impl<'a, C: BlockCipher> Encryptor<'a, C> {
    /// Encrypt the next chunk of plaintext
    pub fn update(&mut self, plaintext: &[u8]) -> Vec<u8> {
        let mut out = plaintext.to_vec();
        self.update_in_place(&mut out);
        out
    }

    /// Encrypt the next chunk of plaintext in place
    pub fn update_in_place(&mut self, data: &mut [u8]) {
        self.state.process(&self.gcm.cipher, data);
    }

    /// Finish the message and return its tag
    pub fn authtag(self) -> AuthTag {
        self.state.tag()
    }
}

impl<'a, C: BlockCipher> std::fmt::Debug for Encryptor<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encryptor").finish_non_exhaustive()
    }
}

/// Decryption phase of one message
pub struct Decryptor<'a, C: BlockCipher = AesBlockCipher> {
    gcm: &'a Gcm<C>,
    state: MessageState,
}

impl<'a, C: BlockCipher> Decryptor<'a, C> {
    /// Decrypt the next chunk of ciphertext
    ///
    /// The output is not authenticated yet; see [`Decryptor::verify`].
    pub fn update(&mut self, ciphertext: &[u8]) -> Vec<u8> {
        let mut out = ciphertext.to_vec();
        self.update_in_place(&mut out);
        out
    }

    /// Decrypt the next chunk of ciphertext in place
    pub fn update_in_place(&mut self, data: &mut [u8]) {
        self.state.process(&self.gcm.cipher, data);
    }

    /// Finish the message and return the tag computed over what was received
    pub fn authtag(self) -> AuthTag {
        self.state.tag()
    }

    /// Finish the message and compare its tag with `expected` in constant time
    pub fn verify(self, expected: &AuthTag) -> bool {
        self.verify_with(expected, &mut ())
    }

    /// [`Decryptor::verify`] with every comparison step reported to `probe`
    #[cfg(any(test, feature = "constant-time-testing"))]
    pub fn verify_probed<P: ComparisonProbe>(self, expected: &AuthTag, probe: &mut P) -> bool {
        self.verify_with(expected, probe)
    }

    fn verify_with<P: ComparisonProbe>(self, expected: &AuthTag, probe: &mut P) -> bool {
        debug_assert_eq!(self.state.direction(), Direction::Decrypt);
        let tag = self.state.tag();
        ct_tag_eq_probed(tag.as_bytes(), expected.as_bytes(), probe).into()
    }
}

impl<'a, C: BlockCipher> std::fmt::Debug for Decryptor<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decryptor").finish_non_exhaustive()
    }
}

/// Encrypt and authenticate data with AES-GCM
///
/// # Arguments
///
/// * `plaintext` - Data to encrypt
/// * `aad` - Additional authenticated data (optional)
/// * `key` - 16, 24 or 32-byte AES key
/// * `nonce` - Non-empty nonce, 12 bytes recommended
///
/// # Returns
///
/// Ciphertext with the 16-byte authentication tag appended
pub fn encrypt(
    plaintext: &[u8],
    aad: Option<&[u8]>,
    key: &[u8],
    nonce: &[u8],
) -> GcmResult<Vec<u8>> {
    let gcm = Gcm::new(key)?;
    let params = MessageParams::from_parts(nonce, aad.unwrap_or(&[]))?;
    Ok(gcm.seal(&params, plaintext))
}

/// Decrypt and verify data with AES-GCM
///
/// # Arguments
///
/// * `ciphertext` - Ciphertext with the authentication tag appended
/// * `aad` - Additional authenticated data (optional)
/// * `key` - 16, 24 or 32-byte AES key
/// * `nonce` - The nonce used for encryption
///
/// # Returns
///
/// Decrypted plaintext if authentication succeeds
pub fn decrypt(
    ciphertext: &[u8],
    aad: Option<&[u8]>,
    key: &[u8],
    nonce: &[u8],
) -> GcmResult<Vec<u8>> {
    let gcm = Gcm::new(key)?;
    let params = MessageParams::from_parts(nonce, aad.unwrap_or(&[]))?;
    gcm.open(&params, ciphertext)
}
