use zeroize::ZeroizeOnDrop;

use crate::xoodoo::{Xoodoo, STATE_SIZE};
use crate::Error;

pub(crate) const HASH_RATE: usize = 16;
pub(crate) const KEYED_ABSORB_RATE: usize = 44;
pub(crate) const KEYED_SQUEEZE_RATE: usize = 24;
const RATCHET_SIZE: usize = 16;

pub(crate) const ABSORB_CD_INIT: u8 = 0x03;
pub(crate) const ABSORB_CD_MAIN: u8 = 0x00;
const ABSORB_KEY_CD: u8 = 0x02;
const SQUEEZE_CU_INIT: u8 = 0x40;
const SQUEEZE_KEY_CU: u8 = 0x20;
const CRYPT_CU_INIT: u8 = 0x80;
const CRYPT_CU_MAIN: u8 = 0x00;
const CRYPT_CD: u8 = 0x00;
const RATCHET_CU: u8 = 0x10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Hash,
    Keyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Up,
    Down,
}

/// A Xoodyak duplex object: the Cyclist operating mode instantiated with the
/// Xoodoo permutation.
///
/// A duplex starts in hash mode via [`Xoodyak::new`] and supports absorbing
/// and squeezing; [`Xoodyak::keyed`] produces a keyed instance that
/// additionally supports encryption, decryption, key squeezing, and
/// ratcheting. The two modes differ only in their block rates, the masking of
/// the domain byte on Down, and the injection of the domain byte on Up.
#[derive(Clone, Debug, ZeroizeOnDrop)]
pub struct Xoodyak {
    xoodoo: Xoodoo,
    #[zeroize(skip)]
    mode: Mode,
    #[zeroize(skip)]
    phase: Phase,
    #[zeroize(skip)]
    absorb_rate: usize,
    #[zeroize(skip)]
    squeeze_rate: usize,
}

impl Xoodyak {
    /// Returns a new duplex in hash mode.
    pub fn new() -> Xoodyak {
        Xoodyak {
            xoodoo: Xoodoo::default(),
            mode: Mode::Hash,
            phase: Phase::Up,
            absorb_rate: HASH_RATE,
            squeeze_rate: HASH_RATE,
        }
    }

    /// Returns a new duplex in keyed mode, initialized with the given key,
    /// optional key id, and optional counter (pass empty slices to omit).
    ///
    /// The key and id must fit a single absorb block together with the
    /// one-byte id-length suffix, so `key.len() + id.len()` must stay below
    /// 44 bytes.
    pub fn keyed(key: &[u8], id: &[u8], counter: &[u8]) -> Result<Xoodyak, Error> {
        let mut duplex = Xoodyak::new();
        duplex.absorb_key(key, id, counter)?;
        Ok(duplex)
    }

    fn up(&mut self, cu: u8) {
        self.phase = Phase::Up;
        if self.mode == Mode::Keyed {
            self.xoodoo.xor_byte(cu, STATE_SIZE - 1);
        }
        self.xoodoo.permute();
    }

    fn up_into(&mut self, out: &mut [u8], cu: u8) {
        debug_assert!(out.len() <= self.squeeze_rate);
        self.up(cu);
        out.copy_from_slice(&self.xoodoo.to_bytes()[..out.len()]);
    }

    fn down(&mut self, block: &[u8], cd: u8) {
        debug_assert!(block.len() <= self.absorb_rate);
        self.phase = Phase::Down;
        let mut buf = [0u8; STATE_SIZE];
        buf[..block.len()].copy_from_slice(block);
        buf[block.len()] = 0x01;
        buf[STATE_SIZE - 1] ^= if self.mode == Mode::Hash { cd & 0x01 } else { cd };
        self.xoodoo.xor_state_bytes(&buf);
    }

    /// Mixes a single block into the state, permuting first if the previous
    /// operation was also a Down.
    pub(crate) fn absorb_block(&mut self, block: &[u8], cd: u8) {
        if self.phase != Phase::Up {
            self.up(0x00);
        }
        self.down(block, cd);
    }

    fn absorb_any(&mut self, data: &[u8], rate: usize, cd: u8) {
        let mut chunks = data.chunks(rate);
        // an empty input still absorbs one padding-only block
        self.absorb_block(chunks.next().unwrap_or(&[]), cd);
        for chunk in chunks {
            self.absorb_block(chunk, ABSORB_CD_MAIN);
        }
    }

    fn squeeze_any(&mut self, out: &mut [u8], cu: u8) {
        if out.is_empty() {
            return;
        }
        let mut chunks = out.chunks_mut(self.squeeze_rate);
        self.up_into(chunks.next().unwrap(), cu);
        for chunk in chunks {
            self.down(&[], ABSORB_CD_MAIN);
            self.up_into(chunk, 0x00);
        }
    }

    fn absorb_key(&mut self, key: &[u8], id: &[u8], counter: &[u8]) -> Result<(), Error> {
        if key.len() + id.len() >= KEYED_ABSORB_RATE {
            return Err(Error::KeyTooLarge(key.len() + id.len()));
        }
        self.mode = Mode::Keyed;
        self.absorb_rate = KEYED_ABSORB_RATE;
        self.squeeze_rate = KEYED_SQUEEZE_RATE;

        let mut buf = Vec::with_capacity(key.len() + id.len() + 1);
        buf.extend_from_slice(key);
        buf.extend_from_slice(id);
        buf.push(id.len() as u8);
        self.absorb_any(&buf, KEYED_ABSORB_RATE, ABSORB_KEY_CD);

        if !counter.is_empty() {
            self.absorb_any(counter, 1, ABSORB_CD_MAIN);
        }
        Ok(())
    }

    fn crypt(&mut self, input: &[u8], decrypt: bool) -> Result<Vec<u8>, Error> {
        if self.mode != Mode::Keyed {
            return Err(Error::ModeViolation);
        }
        let mut out = Vec::with_capacity(input.len());
        let mut chunks = input.chunks(KEYED_SQUEEZE_RATE);
        let mut chunk = chunks.next().unwrap_or(&[]);
        let mut cu = CRYPT_CU_INIT;
        loop {
            self.up(cu);
            cu = CRYPT_CU_MAIN;
            let output = self.xoodoo.xor_extract_bytes(chunk);
            // both directions absorb the plaintext stream
            self.down(if decrypt { output.as_slice() } else { chunk }, CRYPT_CD);
            out.extend_from_slice(&output);
            match chunks.next() {
                Some(next) => chunk = next,
                None => break,
            }
        }
        Ok(out)
    }

    /// Absorbs the given data into the state.
    pub fn absorb(&mut self, data: &[u8]) {
        self.absorb_any(data, self.absorb_rate, ABSORB_CD_INIT);
    }

    /// Fills the given slice with squeezed output.
    pub fn squeeze_mut(&mut self, out: &mut [u8]) {
        self.squeeze_any(out, SQUEEZE_CU_INIT);
    }

    /// Returns `n` bytes of squeezed output.
    pub fn squeeze(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.squeeze_mut(&mut out);
        out
    }

    /// Fills the given slice with squeezed key material. Only available on
    /// keyed instances.
    pub fn squeeze_key_mut(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if self.mode != Mode::Keyed {
            return Err(Error::ModeViolation);
        }
        self.squeeze_any(out, SQUEEZE_KEY_CU);
        Ok(())
    }

    /// Returns `n` bytes of squeezed key material. Only available on keyed
    /// instances.
    pub fn squeeze_key(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        let mut out = vec![0u8; n];
        self.squeeze_key_mut(&mut out)?;
        Ok(out)
    }

    /// Encrypts the given plaintext, returning the ciphertext. Only available
    /// on keyed instances.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        self.crypt(plaintext, false)
    }

    /// Decrypts the given ciphertext, returning the plaintext. Only available
    /// on keyed instances.
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        self.crypt(ciphertext, true)
    }

    /// Ratchets the state, providing forward secrecy: key material squeezed
    /// from the state is absorbed back, making earlier states unrecoverable.
    /// Only available on keyed instances.
    pub fn ratchet(&mut self) -> Result<(), Error> {
        if self.mode != Mode::Keyed {
            return Err(Error::ModeViolation);
        }
        let mut rolled = [0u8; RATCHET_SIZE];
        self.squeeze_any(&mut rolled, RATCHET_CU);
        self.absorb_any(&rolled, self.absorb_rate, ABSORB_CD_MAIN);
        Ok(())
    }
}

impl Default for Xoodyak {
    fn default() -> Self {
        Xoodyak::new()
    }
}
