use zeroize::ZeroizeOnDrop;

use crate::cyclist::{Xoodyak, ABSORB_CD_INIT, ABSORB_CD_MAIN, HASH_RATE};

/// The size of a Xoodyak hash in bytes.
pub const HASH_SIZE: usize = 32;

/// The absorb block size of the hash in bytes.
pub const BLOCK_SIZE: usize = HASH_RATE;

/// Returns the 32-byte Xoodyak hash of the given message.
pub fn hash(msg: &[u8]) -> [u8; HASH_SIZE] {
    let mut duplex = Xoodyak::new();
    duplex.absorb(msg);
    let mut out = [0u8; HASH_SIZE];
    duplex.squeeze_mut(&mut out);
    out
}

/// Returns an `n`-byte Xoodyak hash of the given message. The first 32 bytes
/// are identical to [`hash`].
pub fn hash_len(msg: &[u8], n: usize) -> Vec<u8> {
    let mut duplex = Xoodyak::new();
    duplex.absorb(msg);
    duplex.squeeze(n)
}

/// An incremental Xoodyak hash.
///
/// Input is buffered into 16-byte blocks and each full block is absorbed as
/// it completes, so arbitrarily split writes produce the same digest as the
/// one-shot [`hash`] function.
#[derive(Clone, Debug, ZeroizeOnDrop)]
pub struct XoodyakHash {
    duplex: Xoodyak,
    buf: [u8; BLOCK_SIZE],
    #[zeroize(skip)]
    filled: usize,
    #[zeroize(skip)]
    cd: u8,
}

impl XoodyakHash {
    /// Returns a new, empty hash.
    pub fn new() -> XoodyakHash {
        XoodyakHash {
            duplex: Xoodyak::new(),
            buf: [0u8; BLOCK_SIZE],
            filled: 0,
            cd: ABSORB_CD_INIT,
        }
    }

    /// Absorbs more input.
    pub fn update(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            let n = (BLOCK_SIZE - self.filled).min(input.len());
            self.buf[self.filled..self.filled + n].copy_from_slice(&input[..n]);
            self.filled += n;
            input = &input[n..];
            if self.filled == BLOCK_SIZE {
                self.duplex.absorb_block(&self.buf, self.cd);
                self.cd = ABSORB_CD_MAIN;
                self.filled = 0;
            }
        }
    }

    /// Consumes the hash and returns the digest.
    pub fn finalize(mut self) -> [u8; HASH_SIZE] {
        // flush pending bytes; an input that never produced a block (the
        // empty message included) still absorbs one padding-only block
        if self.filled > 0 || self.cd == ABSORB_CD_INIT {
            let filled = self.filled;
            self.duplex.absorb_block(&self.buf[..filled], self.cd);
        }
        let mut out = [0u8; HASH_SIZE];
        self.duplex.squeeze_mut(&mut out);
        out
    }

    /// Restores the hash to its initial, empty state.
    pub fn reset(&mut self) {
        *self = XoodyakHash::new();
    }
}

impl Default for XoodyakHash {
    fn default() -> Self {
        XoodyakHash::new()
    }
}
