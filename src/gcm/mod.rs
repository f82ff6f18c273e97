/*!
 * Galois/Counter Mode
 *
 * Authenticated encryption built from a 128-bit block cipher and the GHASH
 * accumulator. Two front ends share one per-message core:
 *
 * - [`Gcm`] with the typed [`Encryptor`] / [`Decryptor`] handles and the
 *   one-shot [`Gcm::seal`] / [`Gcm::open`], where call order is enforced by
 *   the type system.
 * - [`GcmSession`], which accepts the classic setter-driven call sequence
 *   and checks it at run time.
 *
 * The counter is incremented across all 128 bits and wraps modulo 2^128.
 * For 12-byte nonces this matches NIST SP 800-38D until the low 32 bits
 * overflow, i.e. for any message shorter than 64 GiB. Hashed (non-12-byte)
 * nonces whose J0 has a low word near 0xffffffff diverge from the 32-bit
 * increment after that wrap.
 *
 * # Security
 *
 * - Never reuse a nonce under the same key.
 * - Message length is not checked against the SP 800-38D limit of
 *   2^32 - 2 blocks. Past that point a 12-byte nonce's counter carries into
 *   the nonce bytes and the keystream overlaps the one for the next nonce
 *   value. Callers must split longer data into separate messages.
 * - Plaintext produced by streaming decryption is unauthenticated until the
 *   tag has been checked. Use [`Gcm::open`] or [`decrypt`] when the whole
 *   message can be buffered.
 */

mod counter;
mod engine;
mod message;
mod params;
mod session;

pub use counter::CounterBlock;
pub use engine::{decrypt, encrypt, Decryptor, Encryptor, Gcm};
pub use params::{AuthTag, MessageParams, Nonce, CANONICAL_NONCE_SIZE, TAG_SIZE};
pub use session::{GcmSession, SessionState};
