//! BLAKE2b-based primitives: the variable-length hash H' and the seed H₀.

use blake2::digest::{Digest, Update, VariableOutput};
use blake2::{Blake2b512, Blake2bVar};

use crate::types::{Algorithm, VERSION};

/// Seed buffer length: a BLAKE2b-512 digest extended by a 4-byte column
/// counter and a 4-byte lane index.
pub(crate) const SEED_BYTES: usize = 64 + 8;

// =============================================================================
// VARIABLE-LENGTH HASH H'
// =============================================================================

/// Variable-length BLAKE2b: fills `out` from the concatenation of `inputs`.
///
/// For up to 64 bytes this is a single BLAKE2b with the requested digest
/// length, fed the little-endian output length followed by the input.
/// Longer outputs chain BLAKE2b-512, emitting the first 32 bytes of each
/// link and finishing with a digest sized to the remainder.
///
/// `out` must be non-empty and at most `u32::MAX` bytes; both are
/// guaranteed by the callers.
pub(crate) fn blake2b_long(inputs: &[&[u8]], out: &mut [u8]) {
    debug_assert!(!out.is_empty());
    debug_assert!(out.len() <= u32::MAX as usize);
    let len_bytes = (out.len() as u32).to_le_bytes();

    if out.len() <= 64 {
        let mut digest =
            Blake2bVar::new(out.len()).expect("output length is in 1..=64");
        Update::update(&mut digest, &len_bytes);
        for input in inputs {
            Update::update(&mut digest, input);
        }
        digest
            .finalize_variable(out)
            .expect("buffer length matches digest length");
        return;
    }

    let mut digest = Blake2b512::new();
    Digest::update(&mut digest, len_bytes);
    for input in inputs {
        Digest::update(&mut digest, input);
    }
    let mut chain = digest.finalize();

    out[..32].copy_from_slice(&chain[..32]);
    let mut written = 32;
    while out.len() - written > 64 {
        chain = Blake2b512::digest(&chain);
        out[written..written + 32].copy_from_slice(&chain[..32]);
        written += 32;
    }

    // 33..=64 bytes remain; the final link uses a digest of exactly that size.
    let mut last = Blake2bVar::new(out.len() - written)
        .expect("remainder length is in 33..=64");
    Update::update(&mut last, &chain);
    last.finalize_variable(&mut out[written..])
        .expect("buffer length matches digest length");
}

// =============================================================================
// SEED DERIVATION
// =============================================================================

/// Computes the extended seed `H₀ || 0⁸`.
///
/// The first 64 bytes are the BLAKE2b-512 digest of the parameter preamble
/// followed by the four length-prefixed input fields. `memory` is the
/// caller-requested value, not the rounded block count, which keeps outputs
/// compatible with callers that only know the requested size. The trailing
/// 8 bytes are the column counter and lane index slots rewritten during
/// matrix initialization.
#[allow(clippy::too_many_arguments)]
pub(crate) fn initial_hash(
    password: &[u8],
    salt: &[u8],
    secret: &[u8],
    data: &[u8],
    time: u32,
    memory: u32,
    threads: u32,
    key_len: u32,
    mode: Algorithm,
) -> [u8; SEED_BYTES] {
    let mut b2 = Blake2b512::new();
    Digest::update(&mut b2, threads.to_le_bytes());
    Digest::update(&mut b2, key_len.to_le_bytes());
    Digest::update(&mut b2, memory.to_le_bytes());
    Digest::update(&mut b2, time.to_le_bytes());
    Digest::update(&mut b2, VERSION.to_le_bytes());
    Digest::update(&mut b2, mode.to_u32().to_le_bytes());
    for field in [password, salt, secret, data] {
        Digest::update(&mut b2, (field.len() as u32).to_le_bytes());
        Digest::update(&mut b2, field);
    }

    let mut seed = [0u8; SEED_BYTES];
    seed[..64].copy_from_slice(&b2.finalize());
    seed
}

// =============================================================================
// TESTS
// =============================================================================
