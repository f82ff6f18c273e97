//! Mutable state of one in-flight message

use zeroize::Zeroize;

use crate::aes::{Block, BlockCipher, BLOCK_SIZE};
use crate::ghash::GHashAccumulator;

use super::counter::CounterBlock;
use super::params::{AuthTag, MessageParams};

/// Which way data flows through the keystream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Encrypt,
    Decrypt,
}

/// Counter, keystream cursor, tag mask and running GHASH for one message.
///
/// Holds no reference to the cipher; every call that needs the block
/// cipher takes it as an argument so the same state can live inside a
/// borrowing handle or inside an owning session.
pub(crate) struct MessageState {
    direction: Direction,
    /// Counter of the current keystream block (J0+1 for the first block)
    counter: CounterBlock,
    /// E(counter)
    keystream: Block,
    /// Next unused byte of `keystream`
    pos: usize,
    /// E(J0), only ever used on the tag
    mask: Block,
    hash: GHashAccumulator,
}

impl MessageState {
    /// Derive J0, reserve E(J0) for the tag, position the counter at J0+1
    /// and seed the accumulator with the message's associated data.
    pub(crate) fn start<C: BlockCipher>(
        cipher: &C,
        hash: &GHashAccumulator,
        params: &MessageParams,
        direction: Direction,
    ) -> Self {
        let mut hash = hash.clone();
        let j0 = CounterBlock::derive_j0(params.nonce(), &mut hash);

        let mut mask = *j0.as_bytes();
        cipher.encrypt_block(&mut mask);

        let mut counter = j0;
        counter.increment();
        let mut keystream = *counter.as_bytes();
        cipher.encrypt_block(&mut keystream);

        // Drop anything the nonce hashing left behind
        hash.set_authdata(params.aad());

        Self {
            direction,
            counter,
            keystream,
            pos: 0,
            mask,
            hash,
        }
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Transform `data` in place and fold the ciphertext side into GHASH
    pub(crate) fn process<C: BlockCipher>(&mut self, cipher: &C, data: &mut [u8]) {
        if data.is_empty() {
            return;
        }

        match self.direction {
            Direction::Decrypt => {
                self.hash.add(data);
                self.apply_keystream(cipher, data);
            }
            Direction::Encrypt => {
                self.apply_keystream(cipher, data);
                self.hash.add(data);
            }
        }
    }

    fn apply_keystream<C: BlockCipher>(&mut self, cipher: &C, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.keystream[self.pos];
            self.pos += 1;
            if self.pos == BLOCK_SIZE {
                self.counter.increment();
                self.keystream = *self.counter.as_bytes();
                cipher.encrypt_block(&mut self.keystream);
                self.pos = 0;
            }
        }
    }

    /// GHASH digest masked with E(J0)
    pub(crate) fn tag(&self) -> AuthTag {
        let mut tag = self.hash.digest();
        for (t, m) in tag.iter_mut().zip(self.mask.iter()) {
            *t ^= m;
        }
        AuthTag::from_bytes(tag)
    }
}

impl Drop for MessageState {
    fn drop(&mut self) {
        self.counter.zeroize();
        self.keystream.zeroize();
        self.mask.zeroize();
    }
}
