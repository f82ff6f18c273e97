//! Counter blocks and initial counter (J0) derivation

use zeroize::Zeroize;

use crate::aes::{Block, BLOCK_SIZE};
use crate::ghash::GHashAccumulator;

use super::params::{Nonce, CANONICAL_NONCE_SIZE};

/// 128-bit big-endian counter block
#[derive(Clone, Copy, PartialEq, Eq, Zeroize)]
pub struct CounterBlock(Block);

impl CounterBlock {
    /// Wrap raw counter bytes
    pub fn from_bytes(bytes: Block) -> Self {
        Self(bytes)
    }

    /// Raw counter bytes
    pub fn as_bytes(&self) -> &Block {
        &self.0
    }

    /// Derive the initial counter block J0 for a nonce.
    ///
    /// A 12-byte nonce is extended with a 32-bit big-endian one. Any other
    /// length is hashed: the accumulator is reset with empty associated data,
    /// the nonce folded in as data, and the digest taken. The accumulator is
    /// left dirty; callers reseed it before authenticating a message.
    pub fn derive_j0(nonce: &Nonce, hash: &mut GHashAccumulator) -> Self {
        let nonce = nonce.as_bytes();
        let mut j0 = [0u8; BLOCK_SIZE];

        if nonce.len() == CANONICAL_NONCE_SIZE {
            j0[..CANONICAL_NONCE_SIZE].copy_from_slice(nonce);
            j0[BLOCK_SIZE - 1] = 1;
            log::trace!("J0 taken directly from 12-byte nonce");
        } else {
            j0 = hash.set_authdata(&[]).add(nonce).digest();
            log::trace!("J0 derived by hashing {}-byte nonce", nonce.len());
        }

        Self(j0)
    }

    /// Add one modulo 2^128.
    ///
    /// Every byte is visited and the carry is propagated arithmetically, so
    /// the work done does not depend on the counter value.
    pub fn increment(&mut self) {
        let mut carry: u16 = 1;
        for byte in self.0.iter_mut().rev() {
            let sum = u16::from(*byte) + carry;
            *byte = sum as u8;
            carry = sum >> 8;
        }
    }
}

impl std::fmt::Debug for CounterBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CounterBlock({})", hex::encode(self.0))
    }
}
