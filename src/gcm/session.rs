//! Runtime-checked GCM session
//!
//! [`GcmSession`] accepts the classic call sequence
//! `set_key → [add_authdata] → set_nonce → encrypt|decrypt → update* → authtag|good`
//! and checks it at run time. Calls made out of order fail with
//! [`GcmError::InvalidState`] instead of producing output.

use std::fmt;

use crate::aes::{AesBlockCipher, BlockCipher};
use crate::error::{error_codes, GcmError, GcmResult};
use crate::security::constant_time::{ct_tag_eq_probed, ComparisonProbe};

use super::engine::Gcm;
use super::message::{Direction, MessageState};
use super::params::{AuthTag, MessageParams, Nonce};

/// Lifecycle state of a [`GcmSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No message in progress
    Init,
    /// Encrypting a message
    Encrypting,
    /// Decrypting a message
    Decrypting,
    /// Tag computed; only `authtag`, `good`, `clear` and setup calls remain
    Finalized,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Init => "INIT",
            SessionState::Encrypting => "ENCRYPTING",
            SessionState::Decrypting => "DECRYPTING",
            SessionState::Finalized => "FINALIZED",
        };
        f.write_str(name)
    }
}

enum Phase {
    Init,
    Active(MessageState),
    Finalized(AuthTag),
}

fn reject(operation: &str, state: SessionState, error_code: u32) -> GcmError {
    log::warn!("Rejected GCM {} while session is {}", operation, state);
    GcmError::invalid_state_with_code(operation, state, error_code)
}

/// GCM session with a run-time checked call order
///
/// # Examples
///
/// ```
/// use qasa_gcm::gcm::GcmSession;
///
/// let key = [0x11u8; 16];
/// let nonce = [0x22u8; 12];
///
/// let mut sender = GcmSession::with_key(&key).unwrap();
/// sender.add_authdata(b"header").unwrap();
/// sender.set_nonce(&nonce).unwrap().encrypt().unwrap();
/// let ciphertext = sender.update(b"attack at dawn").unwrap();
/// let tag = sender.authtag().unwrap();
///
/// let mut receiver = GcmSession::with_key(&key).unwrap();
/// receiver.add_authdata(b"header").unwrap();
/// receiver.set_nonce(&nonce).unwrap();
/// receiver.set_authtag(tag.as_bytes()).unwrap();
/// receiver.decrypt().unwrap();
/// let plaintext = receiver.update(&ciphertext).unwrap();
/// assert!(receiver.good().unwrap());
/// assert_eq!(plaintext, b"attack at dawn");
/// ```
pub struct GcmSession<C: BlockCipher = AesBlockCipher> {
    gcm: Option<Gcm<C>>,
    nonce: Option<Nonce>,
    aad: Vec<u8>,
    expected_tag: Option<AuthTag>,
    phase: Phase,
}

impl GcmSession<AesBlockCipher> {
    /// A session with no key installed
    pub fn new() -> Self {
        Self {
            gcm: None,
            nonce: None,
            aad: Vec::new(),
            expected_tag: None,
            phase: Phase::Init,
        }
    }

    /// A session with an AES key already installed
    pub fn with_key(key: &[u8]) -> GcmResult<Self> {
        let mut session = Self::new();
        session.set_key(key)?;
        Ok(session)
    }

    /// Install a 16, 24 or 32-byte AES key
    ///
    /// Any message in progress is abandoned. Nonce and associated data
    /// already recorded are kept for the next message.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyLength` for any other key length; the session is
    /// left unchanged.
    pub fn set_key(&mut self, key: &[u8]) -> GcmResult<&mut Self> {
        let gcm = Gcm::new(key)?;
        Ok(self.install(gcm))
    }

    /// Install an AES-128 key; cannot fail
    pub fn set_key128(&mut self, key: &[u8; 16]) -> &mut Self {
        self.install(Gcm::new128(key))
    }

    /// Install an AES-192 key; cannot fail
    pub fn set_key192(&mut self, key: &[u8; 24]) -> &mut Self {
        self.install(Gcm::new192(key))
    }

    /// Install an AES-256 key; cannot fail
    pub fn set_key256(&mut self, key: &[u8; 32]) -> &mut Self {
        self.install(Gcm::new256(key))
    }
}

impl Default for GcmSession<AesBlockCipher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BlockCipher> GcmSession<C> {
    /// A session around an already keyed block cipher
    pub fn with_cipher(cipher: C) -> Self {
        Self {
            gcm: Some(Gcm::with_cipher(cipher)),
            nonce: None,
            aad: Vec::new(),
            expected_tag: None,
            phase: Phase::Init,
        }
    }

    fn install(&mut self, gcm: Gcm<C>) -> &mut Self {
        self.gcm = Some(gcm);
        self.phase = Phase::Init;
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        match &self.phase {
            Phase::Init => SessionState::Init,
            Phase::Active(message) => match message.direction() {
                Direction::Encrypt => SessionState::Encrypting,
                Direction::Decrypt => SessionState::Decrypting,
            },
            Phase::Finalized(_) => SessionState::Finalized,
        }
    }

    fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    /// Record associated data for the next message, replacing any earlier value
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` while a message is being processed
    pub fn add_authdata(&mut self, aad: &[u8]) -> GcmResult<&mut Self> {
        if self.is_active() {
            return Err(reject("add_authdata", self.state(), error_codes::PROTOCOL_STATE_INVALID));
        }
        self.aad = aad.to_vec();
        Ok(self)
    }

    /// Record the nonce for the next message
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if the nonce is empty
    /// * `InvalidState` while a message is being processed
    pub fn set_nonce(&mut self, nonce: &[u8]) -> GcmResult<&mut Self> {
        if self.is_active() {
            return Err(reject("set_nonce", self.state(), error_codes::PROTOCOL_STATE_INVALID));
        }
        self.nonce = Some(Nonce::new(nonce)?);
        Ok(self)
    }

    /// Record the tag [`GcmSession::good`] compares against
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless the tag is exactly 16 bytes
    pub fn set_authtag(&mut self, tag: &[u8]) -> GcmResult<&mut Self> {
        self.expected_tag = Some(AuthTag::from_slice(tag)?);
        Ok(self)
    }

    /// Start encrypting a message with the recorded nonce and associated data
    pub fn encrypt(&mut self) -> GcmResult<&mut Self> {
        self.begin("encrypt", Direction::Encrypt)?;
        Ok(self)
    }

    /// Start decrypting a message with the recorded nonce and associated data
    pub fn decrypt(&mut self) -> GcmResult<&mut Self> {
        self.begin("decrypt", Direction::Decrypt)?;
        Ok(self)
    }

    fn begin(&mut self, operation: &str, direction: Direction) -> GcmResult<()> {
        let state = self.state();
        let gcm = match &self.gcm {
            Some(gcm) => gcm,
            None => return Err(reject(operation, state, error_codes::GCM_KEY_NOT_SET)),
        };
        let nonce = match &self.nonce {
            Some(nonce) => nonce.clone(),
            None => return Err(reject(operation, state, error_codes::GCM_NONCE_NOT_SET)),
        };

        let params = MessageParams::new(nonce).with_aad(&self.aad);
        let message = MessageState::start(gcm.cipher(), gcm.hash(), &params, direction);
        self.phase = Phase::Active(message);
        Ok(())
    }

    /// Transform the next chunk and return the output
    ///
    /// During decryption the output is unauthenticated until
    /// [`GcmSession::good`] returns `true`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the session is encrypting or decrypting
    pub fn update(&mut self, input: &[u8]) -> GcmResult<Vec<u8>> {
        let mut out = input.to_vec();
        self.update_in_place(&mut out)?;
        Ok(out)
    }

    /// Transform the next chunk in place
    pub fn update_in_place(&mut self, data: &mut [u8]) -> GcmResult<()> {
        let state = self.state();
        match (&self.gcm, &mut self.phase) {
            (Some(gcm), Phase::Active(message)) => {
                message.process(gcm.cipher(), data);
                Ok(())
            }
            _ => Err(reject("update", state, error_codes::PROTOCOL_STATE_INVALID)),
        }
    }

    /// Finish the message and return its tag
    ///
    /// Repeated calls return the same tag.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no message has been started
    pub fn authtag(&mut self) -> GcmResult<AuthTag> {
        let tag = match &self.phase {
            Phase::Init => {
                return Err(reject(
                    "authtag",
                    SessionState::Init,
                    error_codes::PROTOCOL_STATE_INVALID,
                ))
            }
            Phase::Active(message) => message.tag(),
            Phase::Finalized(tag) => return Ok(*tag),
        };
        self.phase = Phase::Finalized(tag);
        Ok(tag)
    }

    /// Finish the message and compare its tag with the one recorded by
    /// [`GcmSession::set_authtag`]
    ///
    /// A mismatch, or no recorded tag, yields `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no message has been started
    pub fn good(&mut self) -> GcmResult<bool> {
        self.good_with(&mut ())
    }

    /// [`GcmSession::good`] with every comparison step reported to `probe`
    #[cfg(any(test, feature = "constant-time-testing"))]
    pub fn good_probed<P: ComparisonProbe>(&mut self, probe: &mut P) -> GcmResult<bool> {
        self.good_with(probe)
    }

    fn good_with<P: ComparisonProbe>(&mut self, probe: &mut P) -> GcmResult<bool> {
        let tag = self.authtag()?;
        match &self.expected_tag {
            Some(expected) => {
                Ok(ct_tag_eq_probed(tag.as_bytes(), expected.as_bytes(), probe).into())
            }
            None => {
                log::warn!("GCM tag check requested without an expected tag");
                Ok(false)
            }
        }
    }

    /// Return to INIT, forgetting nonce, associated data, expected tag and
    /// any message state. The key stays installed.
    pub fn clear(&mut self) -> &mut Self {
        self.phase = Phase::Init;
        self.nonce = None;
        self.aad.clear();
        self.expected_tag = None;
        self
    }
}

impl<C: BlockCipher> fmt::Debug for GcmSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcmSession")
            .field("state", &self.state())
            .field("key_installed", &self.gcm.is_some())
            .field("nonce", &self.nonce)
            .field("aad_len", &self.aad.len())
            .finish_non_exhaustive()
    }
}
