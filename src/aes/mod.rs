/*!
 * AES block cipher layer
 *
 * Wraps the `aes` crate's fixed-key encryption schedules behind the
 * [`BlockCipher`] seam consumed by the GCM engine. Only the forward
 * direction is exposed; counter mode never decrypts a block.
 */

mod block;

pub use block::*;

#[cfg(test)]
mod tests;
