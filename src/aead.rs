//! Xoodyak authenticated encryption with associated data, compatible with the
//! NIST lightweight-cryptography Xoodyak AEAD vectors.

use subtle::ConstantTimeEq;
use zeroize::ZeroizeOnDrop;

use crate::cyclist::Xoodyak;
use crate::Error;

/// The size of an AEAD key in bytes.
pub const KEY_SIZE: usize = 16;

/// The size of an AEAD nonce in bytes.
pub const NONCE_SIZE: usize = 16;

/// The size of an authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// An authentication tag.
pub type Tag = [u8; TAG_SIZE];

fn keyed_duplex(key: &[u8], nonce: &[u8], ad: &[u8]) -> Result<Xoodyak, Error> {
    if key.len() != KEY_SIZE {
        return Err(Error::InvalidKeyLength(key.len()));
    }
    if nonce.len() != NONCE_SIZE {
        return Err(Error::InvalidNonceLength(nonce.len()));
    }
    let mut duplex = Xoodyak::keyed(key, nonce, &[])?;
    duplex.absorb(ad);
    Ok(duplex)
}

/// Encrypts and authenticates the given plaintext, also authenticating the
/// associated data, and returns the ciphertext and tag.
pub fn encrypt(
    plaintext: &[u8],
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
) -> Result<(Vec<u8>, Tag), Error> {
    let mut duplex = keyed_duplex(key, nonce, ad)?;
    let ciphertext = duplex.encrypt(plaintext)?;
    let mut tag = [0u8; TAG_SIZE];
    duplex.squeeze_mut(&mut tag);
    Ok((ciphertext, tag))
}

/// Decrypts the given ciphertext and verifies its tag against the key, nonce,
/// and associated data. Returns the plaintext and `true` on success; on tag
/// mismatch the recovered bytes are discarded and the plaintext is empty.
///
/// The tag comparison is constant-time.
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    tag: &[u8],
) -> Result<(Vec<u8>, bool), Error> {
    let mut duplex = keyed_duplex(key, nonce, ad)?;
    let plaintext = duplex.decrypt(ciphertext)?;
    let mut expected = [0u8; TAG_SIZE];
    duplex.squeeze_mut(&mut expected);
    if bool::from(expected.as_slice().ct_eq(tag)) {
        Ok((plaintext, true))
    } else {
        Ok((Vec::new(), false))
    }
}

/// A Xoodyak AEAD cipher bound to a single 16-byte key.
#[derive(Clone, Debug, ZeroizeOnDrop)]
pub struct XoodyakAead {
    key: [u8; KEY_SIZE],
}

impl XoodyakAead {
    /// Returns a new cipher for the given 16-byte key.
    pub fn new(key: &[u8]) -> Result<XoodyakAead, Error> {
        let key: [u8; KEY_SIZE] = key
            .try_into()
            .map_err(|_| Error::InvalidKeyLength(key.len()))?;
        Ok(XoodyakAead { key })
    }

    /// The required nonce length in bytes.
    pub const fn nonce_size(&self) -> usize {
        NONCE_SIZE
    }

    /// The difference between plaintext and ciphertext lengths in bytes.
    pub const fn overhead(&self) -> usize {
        TAG_SIZE
    }

    /// Encrypts and authenticates the plaintext and associated data,
    /// returning the ciphertext with the tag appended.
    ///
    /// # Panics
    ///
    /// Panics if the nonce is not 16 bytes. The nonce must be unique for all
    /// time for a given key.
    pub fn seal(&self, nonce: &[u8], plaintext: &[u8], ad: &[u8]) -> Vec<u8> {
        let (mut ciphertext, tag) =
            encrypt(plaintext, &self.key, nonce, ad).unwrap_or_else(|e| panic!("{e}"));
        ciphertext.extend_from_slice(&tag);
        ciphertext
    }

    /// Verifies and decrypts a ciphertext produced by [`XoodyakAead::seal`],
    /// returning the plaintext. Fails with [`Error::AuthenticationFailed`] if
    /// the ciphertext, tag, or associated data have been altered.
    pub fn open(&self, nonce: &[u8], ciphertext: &[u8], ad: &[u8]) -> Result<Vec<u8>, Error> {
        if ciphertext.len() < TAG_SIZE {
            return Err(Error::InvalidCiphertextLength(ciphertext.len()));
        }
        let (ciphertext, tag) = ciphertext.split_at(ciphertext.len() - TAG_SIZE);
        let (plaintext, valid) = decrypt(ciphertext, &self.key, nonce, ad, tag)?;
        if valid {
            Ok(plaintext)
        } else {
            Err(Error::AuthenticationFailed)
        }
    }
}
