//! Public API Layer
//!
//! One-shot derivations that allocate a fresh matrix per call. Repeated
//! derivations with fixed cost parameters should go through
//! [`IdKeyPool`](crate::IdKeyPool) instead.

use crate::engine::{fill_memory, FillParams};
use crate::hash::{blake2b_long, initial_hash, SEED_BYTES};
use crate::kernels::constants::{BLOCK_BYTES, SYNC_POINTS};
use crate::memory::Block;
use crate::types::Algorithm;

// =============================================================================
// ONE-SHOT DERIVATIONS
// =============================================================================

/// Derives a key from the password and salt using Argon2i.
///
/// `time` is the number of passes over memory and `memory` the working-set
/// size in KiB; `memory = 32 * 1024` costs ~32 MB. The RFC recommends
/// `time = 3` and as much memory as the deployment can afford; raise `time`
/// to compensate when memory is constrained. `threads` can match the
/// available CPUs.
///
/// # Panics
/// If `time < 1`, `threads < 1` or `key_len < 1`. These are programmer
/// errors, not runtime conditions.
///
/// # Example
/// ```rust
/// let key = basalt::key(b"some password", b"somesalt", 3, 64, 4, 32);
/// assert_eq!(key.len(), 32);
/// ```
#[must_use]
pub fn key(
    password: &[u8],
    salt: &[u8],
    time: u32,
    memory: u32,
    threads: u8,
    key_len: u32,
) -> Vec<u8> {
    derive_key(
        Algorithm::Argon2i,
        password,
        salt,
        &[],
        &[],
        time,
        memory,
        threads,
        key_len,
    )
}

/// Derives a key from the password and salt using Argon2id.
///
/// Argon2id is the hybrid recommended for most uses: data-independent
/// addressing for the first half of the first pass, data-dependent for the
/// rest. The RFC recommends `time = 1` and `memory = 64 * 1024` (~64 MB)
/// for non-interactive operations.
///
/// # Panics
/// If `time < 1`, `threads < 1` or `key_len < 1`.
///
/// # Example
/// ```rust
/// let key = basalt::id_key(b"some password", b"somesalt", 1, 64, 4, 32);
/// assert_eq!(key.len(), 32);
/// ```
#[must_use]
pub fn id_key(
    password: &[u8],
    salt: &[u8],
    time: u32,
    memory: u32,
    threads: u8,
    key_len: u32,
) -> Vec<u8> {
    derive_key(
        Algorithm::Argon2id,
        password,
        salt,
        &[],
        &[],
        time,
        memory,
        threads,
        key_len,
    )
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Full derivation pipeline on a freshly allocated matrix.
#[allow(clippy::too_many_arguments)]
pub(crate) fn derive_key(
    mode: Algorithm,
    password: &[u8],
    salt: &[u8],
    secret: &[u8],
    data: &[u8],
    time: u32,
    memory: u32,
    threads: u8,
    key_len: u32,
) -> Vec<u8> {
    validate(time, threads, key_len);

    // The seed always sees the requested memory, even when execution uses
    // the rounded value.
    let mut seed = initial_hash(
        password,
        salt,
        secret,
        data,
        time,
        memory,
        u32::from(threads),
        key_len,
        mode,
    );

    let memory = rounded_memory(memory, u32::from(threads));
    let mut blocks = vec![Block::ZERO; memory as usize];
    run_pipeline(&mut seed, &mut blocks, time, memory, threads, key_len, mode)
}

/// Seed columns, passes and extraction over an already-allocated matrix.
pub(crate) fn run_pipeline(
    seed: &mut [u8; SEED_BYTES],
    blocks: &mut [Block],
    time: u32,
    memory: u32,
    threads: u8,
    key_len: u32,
    mode: Algorithm,
) -> Vec<u8> {
    init_blocks(seed, blocks, u32::from(threads));
    fill_memory(blocks, FillParams::new(time, memory, u32::from(threads), mode));
    extract_key(blocks, memory, u32::from(threads), key_len)
}

pub(crate) fn validate(time: u32, threads: u8, key_len: u32) {
    assert!(time >= 1, "number of rounds too small");
    assert!(threads >= 1, "parallelism degree too low");
    assert!(key_len >= 1, "output length too short");
}

/// Rounds the requested KiB count down to a multiple of `4 * threads`
/// blocks, with a floor of two full slices per lane.
pub(crate) fn rounded_memory(memory: u32, threads: u32) -> u32 {
    let group = SYNC_POINTS * threads;
    (memory / group * group).max(2 * group)
}

/// Fills the first two columns of each lane from the extended seed.
fn init_blocks(seed: &mut [u8; SEED_BYTES], blocks: &mut [Block], threads: u32) {
    let lane_length = blocks.len() as u32 / threads;
    let mut bytes = [0u8; BLOCK_BYTES];

    for lane in 0..threads {
        let base = (lane * lane_length) as usize;
        seed[68..72].copy_from_slice(&lane.to_le_bytes());
        for column in 0..2u32 {
            seed[64..68].copy_from_slice(&column.to_le_bytes());
            blake2b_long(&[seed.as_slice()], &mut bytes);
            blocks[base + column as usize].load(&bytes);
        }
    }
}

/// XOR-folds the last column of every lane and hashes it down to the key.
fn extract_key(blocks: &mut [Block], memory: u32, threads: u32, key_len: u32) -> Vec<u8> {
    let lane_length = memory / threads;
    let last = (memory - 1) as usize;
    for lane in 0..threads - 1 {
        let fold = blocks[(lane * lane_length + lane_length - 1) as usize];
        blocks[last] ^= &fold;
    }

    let mut bytes = [0u8; BLOCK_BYTES];
    blocks[last].store(&mut bytes);

    let mut key = vec![0u8; key_len as usize];
    blake2b_long(&[&bytes], &mut key);
    key
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_rounds_down_with_a_two_slice_floor() {
        assert_eq!(rounded_memory(2, 4), 32);
        assert_eq!(rounded_memory(31, 4), 32);
        assert_eq!(rounded_memory(32, 4), 32);
        assert_eq!(rounded_memory(33, 4), 32);
        assert_eq!(rounded_memory(64, 4), 64);
        assert_eq!(rounded_memory(65, 4), 64);
        assert_eq!(rounded_memory(7, 1), 8);
        assert_eq!(rounded_memory(65536, 1), 65536);
    }

    // RFC 9106 §5: password 32×0x01, salt 16×0x02, secret 8×0x03,
    // associated data 12×0x04, time 3, memory 32 KiB, 4 lanes, 32-byte tag.
    fn rfc9106_inputs() -> ([u8; 32], [u8; 16], [u8; 8], [u8; 12]) {
        ([0x01; 32], [0x02; 16], [0x03; 8], [0x04; 12])
    }

    #[test]
    fn rfc9106_argon2i_vector() {
        let (password, salt, secret, data) = rfc9106_inputs();
        let tag = derive_key(
            Algorithm::Argon2i,
            &password,
            &salt,
            &secret,
            &data,
            3,
            32,
            4,
            32,
        );
        let expected = [
            0xc8, 0x14, 0xd9, 0xd1, 0xdc, 0x7f, 0x37, 0xaa, 0x13, 0xf0, 0xd7, 0x7f, 0x24, 0x94,
            0xbd, 0xa1, 0xc8, 0xde, 0x6b, 0x01, 0x6d, 0xd3, 0x88, 0xd2, 0x99, 0x52, 0xa4, 0xc4,
            0x67, 0x2b, 0x6c, 0xe8,
        ];
        assert_eq!(tag, expected);
    }

    #[test]
    fn rfc9106_argon2d_vector() {
        let (password, salt, secret, data) = rfc9106_inputs();
        let tag = derive_key(
            Algorithm::Argon2d,
            &password,
            &salt,
            &secret,
            &data,
            3,
            32,
            4,
            32,
        );
        let expected = [
            0x51, 0x2b, 0x39, 0x1b, 0x6f, 0x11, 0x62, 0x97, 0x53, 0x71, 0xd3, 0x09, 0x19, 0x73,
            0x42, 0x94, 0xf8, 0x68, 0xe3, 0xbe, 0x39, 0x84, 0xf3, 0xc1, 0xa1, 0x3a, 0x4d, 0xb9,
            0xfa, 0xbe, 0x4a, 0xcb,
        ];
        assert_eq!(tag, expected);
    }

    #[test]
    fn rfc9106_argon2id_vector() {
        let (password, salt, secret, data) = rfc9106_inputs();
        let tag = derive_key(
            Algorithm::Argon2id,
            &password,
            &salt,
            &secret,
            &data,
            3,
            32,
            4,
            32,
        );
        let expected = [
            0x0d, 0x64, 0x0d, 0xf5, 0x8d, 0x78, 0x76, 0x6c, 0x08, 0xc0, 0x37, 0xa3, 0x4a, 0x8b,
            0x53, 0xc9, 0xd0, 0x1e, 0xf0, 0x45, 0x2d, 0x75, 0xb6, 0x5e, 0xb5, 0x25, 0x20, 0xe9,
            0x6b, 0x01, 0xe6, 0x59,
        ];
        assert_eq!(tag, expected);
    }

    #[test]
    #[should_panic(expected = "number of rounds too small")]
    fn zero_passes_is_a_programmer_error() {
        let _ = key(b"password", b"somesalt", 0, 64, 1, 32);
    }

    #[test]
    #[should_panic(expected = "parallelism degree too low")]
    fn zero_threads_is_a_programmer_error() {
        let _ = key(b"password", b"somesalt", 1, 64, 0, 32);
    }

    #[test]
    #[should_panic(expected = "output length too short")]
    fn zero_length_output_is_a_programmer_error() {
        let _ = id_key(b"password", b"somesalt", 1, 64, 1, 0);
    }
}
