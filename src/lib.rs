//! Xoodyak, the Cyclist operating mode instantiated with the Xoodoo
//! permutation.
//!
//! Xoodyak is a versatile cryptographic scheme: a single 384-bit duplex
//! object composes into hashing, message authentication, authenticated
//! encryption, and forward-secure key ratcheting. The hash and AEAD
//! primitives here are byte-compatible with the Xoodyak entry in the NIST
//! Lightweight Cryptography competition.
//!
//! Hashing:
//!
//! ```
//! let digest = xoodyak::hash(b"hello xoodoo");
//! assert_eq!(
//!     hex::encode(digest),
//!     "5c9a95363d79b2157cbdfff49dddaf1f20562dc64644f2d28211478537e6b29a"
//! );
//! ```
//!
//! Authenticated encryption:
//!
//! ```
//! use xoodyak::XoodyakAead;
//!
//! let aead = XoodyakAead::new(&[0x42; 16])?;
//! let nonce = [0x17; 16]; // must be unique per message for a given key
//! let sealed = aead.seal(&nonce, b"attack at dawn", b"message 1");
//! assert_eq!(aead.open(&nonce, &sealed, b"message 1")?, b"attack at dawn");
//! assert!(aead.open(&nonce, &sealed, b"message 2").is_err());
//! # Ok::<(), xoodyak::Error>(())
//! ```

pub mod aead;
mod cyclist;
mod hash;
mod xoodoo;

#[cfg(test)]
mod fuzzing;

pub use crate::aead::{XoodyakAead, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use crate::cyclist::Xoodyak;
pub use crate::hash::{hash, hash_len, XoodyakHash, BLOCK_SIZE, HASH_SIZE};
pub use crate::xoodoo::{Xoodoo, MAX_ROUNDS, STATE_SIZE};

/// The error type for Xoodyak operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The permutation was asked for more rounds than the schedule defines.
    #[error("invalid number of rounds: {0}")]
    InvalidRounds(usize),

    /// A state was deserialized from a buffer of the wrong length.
    #[error("input data ({0} bytes) != xoodoo state size (48 bytes)")]
    InvalidStateLength(usize),

    /// An AEAD key of the wrong length was supplied.
    #[error("given key length ({0} bytes) incorrect (16 bytes)")]
    InvalidKeyLength(usize),

    /// An AEAD nonce of the wrong length was supplied.
    #[error("given nonce length ({0} bytes) incorrect (16 bytes)")]
    InvalidNonceLength(usize),

    /// A sealed ciphertext was too short to contain an authentication tag.
    #[error("given ciphertext length ({0} bytes) too short to hold a tag (16 bytes)")]
    InvalidCiphertextLength(usize),

    /// A key and id were too long to absorb in a single block.
    #[error("combined key and id length ({0} bytes) must be less than 44 bytes")]
    KeyTooLarge(usize),

    /// A keyed-only operation was invoked on a hash-mode duplex.
    #[error("operation requires a keyed instance")]
    ModeViolation,

    /// An authentication tag did not match; the plaintext was discarded.
    #[error("message authentication failed")]
    AuthenticationFailed,
}
