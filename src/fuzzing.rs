#![cfg(test)]

use std::iter;

use proptest::collection::vec;
use proptest::prelude::*;

use crate::{aead, hash, Xoodyak, XoodyakHash};

/// An input operation for a hash-mode duplex.
#[derive(Clone, Debug, PartialEq)]
enum HashOp {
    Absorb(Vec<u8>),
    Squeeze(usize),
}

/// An input operation for a keyed duplex.
#[derive(Clone, Debug, PartialEq)]
enum KeyedOp {
    Absorb(Vec<u8>),
    Squeeze(usize),
    SqueezeKey(usize),
    Encrypt(Vec<u8>),
    Decrypt(Vec<u8>),
    Ratchet,
}

/// An output from a duplex transcript.
#[derive(Clone, Debug, PartialEq)]
enum Output {
    Squeezed(Vec<u8>),
    SqueezedKey(Vec<u8>),
    Encrypted(Vec<u8>),
    Decrypted(Vec<u8>),
}

/// A transcript of operations for a keyed duplex, plus the shared key, id,
/// and counter.
#[derive(Clone, Debug, PartialEq)]
struct KeyedTranscript {
    key: Vec<u8>,
    id: Vec<u8>,
    counter: Vec<u8>,
    ops: Vec<KeyedOp>,
}

/// Applies the transcript's operations to a hash-mode duplex, plus a final
/// `Squeeze(16)` to pin down the duplex's final state, and returns the
/// outputs.
fn apply_hash_transcript(ops: &[HashOp]) -> Vec<Output> {
    let mut duplex = Xoodyak::new();
    ops.iter()
        .chain(iter::once(&HashOp::Squeeze(16)))
        .filter_map(|op| match op {
            HashOp::Absorb(data) => {
                duplex.absorb(data);
                None
            }
            HashOp::Squeeze(n) => Some(Output::Squeezed(duplex.squeeze(*n))),
        })
        .collect()
}

/// Applies the transcript's operations to a keyed duplex, plus a final
/// `Squeeze(16)`, and returns the outputs.
fn apply_keyed_transcript(t: &KeyedTranscript) -> Vec<Output> {
    let mut duplex = Xoodyak::keyed(&t.key, &t.id, &t.counter).unwrap();
    t.ops
        .iter()
        .chain(iter::once(&KeyedOp::Squeeze(16)))
        .filter_map(|op| match op {
            KeyedOp::Absorb(data) => {
                duplex.absorb(data);
                None
            }
            KeyedOp::Squeeze(n) => Some(Output::Squeezed(duplex.squeeze(*n))),
            KeyedOp::SqueezeKey(n) => Some(Output::SqueezedKey(duplex.squeeze_key(*n).unwrap())),
            KeyedOp::Encrypt(data) => Some(Output::Encrypted(duplex.encrypt(data).unwrap())),
            KeyedOp::Decrypt(data) => Some(Output::Decrypted(duplex.decrypt(data).unwrap())),
            KeyedOp::Ratchet => {
                duplex.ratchet().unwrap();
                None
            }
        })
        .collect()
}

/// Applies the transcript's operations to two duplexes, checking that both
/// sides can decrypt each other's outputs and stay synchronized.
fn check_keyed_transcript_symmetry(t: &KeyedTranscript) {
    let mut outbound = Xoodyak::keyed(&t.key, &t.id, &t.counter).unwrap();
    let mut inbound = Xoodyak::keyed(&t.key, &t.id, &t.counter).unwrap();

    for op in &t.ops {
        match op {
            KeyedOp::Absorb(data) => {
                outbound.absorb(data);
                inbound.absorb(data);
            }
            KeyedOp::Squeeze(n) => {
                assert_eq!(outbound.squeeze(*n), inbound.squeeze(*n));
            }
            KeyedOp::SqueezeKey(n) => {
                assert_eq!(
                    outbound.squeeze_key(*n).unwrap(),
                    inbound.squeeze_key(*n).unwrap()
                );
            }
            KeyedOp::Encrypt(plaintext) => {
                let ciphertext = outbound.encrypt(plaintext).unwrap();
                assert_eq!(plaintext, &inbound.decrypt(&ciphertext).unwrap());
            }
            KeyedOp::Decrypt(ciphertext) => {
                let plaintext = outbound.decrypt(ciphertext).unwrap();
                assert_eq!(ciphertext, &inbound.encrypt(&plaintext).unwrap());
            }
            KeyedOp::Ratchet => {
                outbound.ratchet().unwrap();
                inbound.ratchet().unwrap();
            }
        }
    }

    assert_eq!(outbound.squeeze(16), inbound.squeeze(16));
}

fn arb_data() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 0..100)
}

fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 1..16)
}

fn arb_id() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 0..16)
}

fn arb_counter() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 0..16)
}

fn arb_hash_op() -> impl Strategy<Value = HashOp> {
    prop_oneof![
        arb_data().prop_map(HashOp::Absorb),
        (1usize..128).prop_map(HashOp::Squeeze),
    ]
}

fn arb_keyed_op() -> impl Strategy<Value = KeyedOp> {
    prop_oneof![
        arb_data().prop_map(KeyedOp::Absorb),
        (1usize..128).prop_map(KeyedOp::Squeeze),
        (1usize..128).prop_map(KeyedOp::SqueezeKey),
        arb_data().prop_map(KeyedOp::Encrypt),
        arb_data().prop_map(KeyedOp::Decrypt),
        Just(KeyedOp::Ratchet),
    ]
}

prop_compose! {
    fn arb_keyed_transcript()(
        key in arb_key(),
        id in arb_id(),
        counter in arb_counter(),
        ops in vec(arb_keyed_op(), 0..32),
    ) -> KeyedTranscript {
        KeyedTranscript { key, id, counter, ops }
    }
}

proptest! {
    #[test]
    fn hash_transcript_consistency(
        t0 in vec(arb_hash_op(), 0..32),
        t1 in vec(arb_hash_op(), 0..32),
    ) {
        let out0 = apply_hash_transcript(&t0);
        let out1 = apply_hash_transcript(&t1);

        if t0 == t1 {
            assert_eq!(out0, out1);
        } else {
            assert_ne!(out0, out1);
        }
    }

    #[test]
    fn keyed_transcript_consistency(
        t0 in arb_keyed_transcript(),
        t1 in arb_keyed_transcript(),
    ) {
        let out0 = apply_keyed_transcript(&t0);
        let out1 = apply_keyed_transcript(&t1);

        if t0 == t1 {
            assert_eq!(out0, out1);
        } else {
            assert_ne!(out0, out1);
        }
    }

    #[test]
    fn keyed_transcript_symmetry(t in arb_keyed_transcript()) {
        check_keyed_transcript_symmetry(&t);
    }

    #[test]
    fn streaming_hash_matches_one_shot(
        data in arb_data(),
        splits in vec(any::<prop::sample::Index>(), 0..4),
    ) {
        let mut boundaries: Vec<usize> = splits.iter().map(|i| i.index(data.len() + 1)).collect();
        boundaries.sort_unstable();

        let mut streaming = XoodyakHash::new();
        let mut start = 0;
        for end in boundaries {
            streaming.update(&data[start..end]);
            start = end;
        }
        streaming.update(&data[start..]);

        prop_assert_eq!(streaming.finalize(), hash(&data));
    }

    #[test]
    fn aead_round_trip(
        key in vec(any::<u8>(), 16),
        nonce in vec(any::<u8>(), 16),
        ad in arb_data(),
        pt in arb_data(),
    ) {
        let (ct, tag) = aead::encrypt(&pt, &key, &nonce, &ad).unwrap();
        prop_assert_eq!(ct.len(), pt.len());

        let (recovered, valid) = aead::decrypt(&ct, &key, &nonce, &ad, &tag).unwrap();
        prop_assert!(valid);
        prop_assert_eq!(recovered, pt);
    }

    #[test]
    fn aead_rejects_bit_flips(
        key in vec(any::<u8>(), 16),
        nonce in vec(any::<u8>(), 16),
        ad in arb_data(),
        pt in arb_data(),
        flip in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let aead = crate::XoodyakAead::new(&key).unwrap();
        let mut sealed = aead.seal(&nonce, &pt, &ad);

        let i = flip.index(sealed.len());
        sealed[i] ^= 1 << bit;

        prop_assert_eq!(
            aead.open(&nonce, &sealed, &ad),
            Err(crate::Error::AuthenticationFailed)
        );
    }
}
