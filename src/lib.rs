/*!
 * QaSa GCM Engine
 *
 * Galois/Counter Mode authenticated encryption over AES-128, AES-192 and
 * AES-256, with streaming input, nonces of any non-empty length and
 * constant-time tag verification.
 *
 * The crate is organised in layers:
 *
 * - [`aes`]: the AES block cipher behind the [`aes::BlockCipher`] seam
 * - [`ghash`]: the streaming GHASH accumulator
 * - [`gcm`]: counter derivation, keystream, tag computation and the two
 *   front ends ([`gcm::Gcm`] with typed handles, [`gcm::GcmSession`] with
 *   run-time call-order checks)
 * - [`security`]: constant-time tag comparison
 *
 * # Unauthenticated plaintext
 *
 * Streaming decryption hands back plaintext before the tag has been checked.
 * That output must not be acted on until `verify()` / `good()` returns
 * `true`. [`gcm::Gcm::open`] and [`gcm::decrypt`] buffer the whole message
 * and only release it after a successful check.
 *
 * # Example
 *
 * ```
 * use qasa_gcm::prelude::*;
 *
 * fn main() -> Result<(), GcmError> {
 *     let key = [0x42u8; 32];
 *     let nonce = Nonce::generate()?;
 *     let params = MessageParams::new(nonce).with_aad(b"metadata");
 *
 *     let gcm = Gcm::new(&key)?;
 *     let sealed = gcm.seal(&params, b"attack at dawn");
 *     let opened = gcm.open(&params, &sealed)?;
 *
 *     assert_eq!(opened, b"attack at dawn");
 *     Ok(())
 * }
 * ```
 */

/// AES block cipher layer
pub mod aes;

/// Common error types for the GCM engine
pub mod error;

/// Galois/Counter Mode engine
pub mod gcm;

/// GHASH accumulator
pub mod ghash;

/// Side-channel hardening helpers
pub mod security;

// Re-export main types for convenience
pub use crate::aes::{AesBlockCipher, BlockCipher, KeySize};
pub use crate::error::{GcmError, GcmResult};
pub use crate::gcm::{AuthTag, Gcm, GcmSession, MessageParams, Nonce, SessionState};

/// The types needed for everyday encryption and decryption
pub mod prelude {
    pub use crate::gcm::decrypt;
    pub use crate::gcm::encrypt;
    pub use crate::gcm::AuthTag;
    pub use crate::gcm::Decryptor;
    pub use crate::gcm::Encryptor;
    pub use crate::gcm::Gcm;
    pub use crate::gcm::GcmSession;
    pub use crate::gcm::MessageParams;
    pub use crate::gcm::Nonce;
    pub use crate::gcm::SessionState;
    pub use crate::gcm::TAG_SIZE;
    pub use crate::GcmError;
    pub use crate::GcmResult;
    pub use crate::KeySize;
}
