//! Streaming GHASH accumulator
//!
//! The `ghash` crate only absorbs whole 16-byte blocks. GCM feeds the hash
//! in arbitrary slices (AAD once, then ciphertext chunk by chunk), pads the
//! AAD and the ciphertext separately, and closes with a length block. This
//! type owns that bookkeeping.

use ::ghash::universal_hash::{KeyInit, UniversalHash};
use ::ghash::GHash;
use zeroize::Zeroize;

use crate::aes::{Block, BLOCK_SIZE};

/// Size of the GHASH subkey H in bytes
pub const GHASH_KEY_SIZE: usize = 16;

/// Size of a GHASH digest in bytes
pub const GHASH_DIGEST_SIZE: usize = 16;

/// Running GHASH over `AAD ‖ pad ‖ C ‖ pad ‖ [len(A)]₆₄ ‖ [len(C)]₆₄`
#[derive(Clone)]
pub struct GHashAccumulator {
    /// Freshly keyed core; resets clone it instead of re-keying
    initial: GHash,
    /// Multiply-accumulate core
    hash: GHash,
    /// Buffer for a partial data block
    buffer: Block,
    /// Number of bytes in the buffer
    buffer_size: usize,
    /// Associated data length in bytes
    aad_len: u64,
    /// Data (ciphertext or nonce) length in bytes
    data_len: u64,
}

impl GHashAccumulator {
    /// Create an accumulator keyed with the subkey H
    pub fn new(key: &Block) -> Self {
        let initial = GHash::new(::ghash::Key::from_slice(key));
        Self {
            hash: initial.clone(),
            initial,
            buffer: [0u8; BLOCK_SIZE],
            buffer_size: 0,
            aad_len: 0,
            data_len: 0,
        }
    }

    /// Install a new subkey and reset all state
    pub fn set_key(&mut self, key: &Block) {
        self.initial = GHash::new(::ghash::Key::from_slice(key));
        self.set_authdata(&[]);
    }

    /// Reset the running digest and seed it with associated data
    pub fn set_authdata(&mut self, aad: &[u8]) -> &mut Self {
        self.hash = self.initial.clone();
        self.buffer.zeroize();
        self.buffer_size = 0;
        self.data_len = 0;

        // AAD is padded on its own, independently of the data that follows
        self.hash.update_padded(aad);
        self.aad_len = aad.len() as u64;
        self
    }

    /// Fold more data into the digest
    pub fn add(&mut self, data: &[u8]) -> &mut Self {
        let mut offset = 0;

        // Top up a partially filled block first
        if self.buffer_size > 0 {
            let needed = BLOCK_SIZE - self.buffer_size;
            let to_copy = needed.min(data.len());
            self.buffer[self.buffer_size..self.buffer_size + to_copy]
                .copy_from_slice(&data[..to_copy]);
            self.buffer_size += to_copy;
            offset += to_copy;

            if self.buffer_size == BLOCK_SIZE {
                self.hash.update(&[::ghash::Block::clone_from_slice(&self.buffer)]);
                self.buffer_size = 0;
            }
        }

        // Full blocks
        let remaining = &data[offset..];
        let full = remaining.len() - remaining.len() % BLOCK_SIZE;
        for chunk in remaining[..full].chunks_exact(BLOCK_SIZE) {
            self.hash.update(&[::ghash::Block::clone_from_slice(chunk)]);
        }

        // Keep the tail for the next call
        let tail = &remaining[full..];
        if !tail.is_empty() {
            self.buffer[..tail.len()].copy_from_slice(tail);
            self.buffer_size = tail.len();
        }

        self.data_len += data.len() as u64;
        self
    }

    /// Digest of everything folded so far, closed with the length block
    ///
    /// Does not consume the running state: more data may still be added
    /// and the digest taken again.
    pub fn digest(&self) -> [u8; GHASH_DIGEST_SIZE] {
        let mut hash = self.hash.clone();

        if self.buffer_size > 0 {
            let mut last = [0u8; BLOCK_SIZE];
            last[..self.buffer_size].copy_from_slice(&self.buffer[..self.buffer_size]);
            hash.update(&[::ghash::Block::clone_from_slice(&last)]);
            last.zeroize();
        }

        let mut length_block = [0u8; BLOCK_SIZE];
        length_block[..8].copy_from_slice(&(self.aad_len * 8).to_be_bytes());
        length_block[8..].copy_from_slice(&(self.data_len * 8).to_be_bytes());
        hash.update(&[::ghash::Block::clone_from_slice(&length_block)]);

        let mut digest = [0u8; GHASH_DIGEST_SIZE];
        digest.copy_from_slice(&hash.finalize());
        digest
    }

    /// Number of associated-data bytes in the current digest
    pub fn aad_len(&self) -> u64 {
        self.aad_len
    }

    /// Number of data bytes folded since the last reset
    pub fn data_len(&self) -> u64 {
        self.data_len
    }
}

impl Drop for GHashAccumulator {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}

impl std::fmt::Debug for GHashAccumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GHashAccumulator")
            .field("aad_len", &self.aad_len)
            .field("data_len", &self.data_len)
            .finish_non_exhaustive()
    }
}
