use byteorder::{ByteOrder, LittleEndian};
use zeroize::Zeroize;

use crate::Error;

/// The number of rounds in the full Xoodoo permutation.
pub const MAX_ROUNDS: usize = 12;

/// The size of the Xoodoo state in bytes.
pub const STATE_SIZE: usize = 48;

const LANES: usize = 12;

const ROUND_CONSTANTS: [u32; MAX_ROUNDS] = [
    0x058, 0x038, 0x3c0, 0x0d0, 0x120, 0x014, 0x060, 0x02c, 0x380, 0x0f0, 0x1a0, 0x012,
];

/// The 384-bit Xoodoo state: twelve 32-bit lanes arranged as three planes of
/// four lanes each, with plane `y` occupying lanes `4y..4y+3`. Serialization
/// is little-endian per lane, concatenated in lane order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Zeroize)]
pub struct Xoodoo([u32; LANES]);

impl Xoodoo {
    /// Deserializes a 48-byte buffer into a state.
    pub fn from_bytes(data: &[u8]) -> Result<Xoodoo, Error> {
        if data.len() != STATE_SIZE {
            return Err(Error::InvalidStateLength(data.len()));
        }
        let mut lanes = [0u32; LANES];
        LittleEndian::read_u32_into(data, &mut lanes);
        Ok(Xoodoo(lanes))
    }

    /// Serializes the state into 48 bytes.
    pub fn to_bytes(&self) -> [u8; STATE_SIZE] {
        let mut data = [0u8; STATE_SIZE];
        LittleEndian::write_u32_into(&self.0, &mut data);
        data
    }

    /// XORs 48 bytes into the state in little-endian lane order.
    pub fn xor_state_bytes(&mut self, data: &[u8; STATE_SIZE]) {
        for (lane, chunk) in self.0.iter_mut().zip(data.chunks_exact(4)) {
            *lane ^= u32::from_le_bytes(chunk.try_into().unwrap());
        }
    }

    /// XORs a single byte into the state at the given byte offset.
    pub fn xor_byte(&mut self, byte: u8, offset: usize) {
        debug_assert!(offset < STATE_SIZE);
        self.0[offset / 4] ^= u32::from(byte) << ((offset % 4) * 8);
    }

    /// Returns `input` XORed with the leading state bytes, leaving the state
    /// untouched. The input must not be longer than the state.
    pub fn xor_extract_bytes(&self, input: &[u8]) -> Vec<u8> {
        debug_assert!(input.len() <= STATE_SIZE);
        let bytes = self.to_bytes();
        input.iter().zip(&bytes).map(|(&i, &s)| i ^ s).collect()
    }

    /// Applies the full twelve-round Xoodoo permutation.
    pub fn permute(&mut self) {
        for &rc in &ROUND_CONSTANTS {
            round(&mut self.0, rc);
        }
    }

    /// Applies `rounds` Xoodoo rounds, consuming the last `rounds` entries of
    /// the round-constant table. Zero rounds is a no-op; more than twelve is
    /// an error.
    pub fn permute_rounds(&mut self, rounds: usize) -> Result<(), Error> {
        if rounds > MAX_ROUNDS {
            return Err(Error::InvalidRounds(rounds));
        }
        for &rc in &ROUND_CONSTANTS[MAX_ROUNDS - rounds..] {
            round(&mut self.0, rc);
        }
        Ok(())
    }
}

#[inline(always)]
fn round(st: &mut [u32; LANES], round_constant: u32) {
    // theta
    let mut p = [0u32; 4];
    for x in 0..4 {
        p[x] = st[x] ^ st[4 + x] ^ st[8 + x];
    }
    for x in 0..4 {
        let parity = p[(x + 3) & 3];
        let e = parity.rotate_left(5) ^ parity.rotate_left(14);
        st[x] ^= e;
        st[4 + x] ^= e;
        st[8 + x] ^= e;
    }

    // rho-west
    let plane = [st[4], st[5], st[6], st[7]];
    for x in 0..4 {
        st[4 + x] = plane[(x + 3) & 3];
    }
    for x in 0..4 {
        st[8 + x] = st[8 + x].rotate_left(11);
    }

    // iota
    st[0] ^= round_constant;

    // chi
    for x in 0..4 {
        let (a0, a1, a2) = (st[x], st[4 + x], st[8 + x]);
        st[x] = a0 ^ (!a1 & a2);
        st[4 + x] = a1 ^ (!a2 & a0);
        st[8 + x] = a2 ^ (!a0 & a1);
    }

    // rho-east
    for x in 0..4 {
        st[4 + x] = st[4 + x].rotate_left(1);
    }
    let plane = [st[8], st[9], st[10], st[11]];
    for x in 0..4 {
        st[8 + x] = plane[(x + 2) & 3].rotate_left(8);
    }
}
