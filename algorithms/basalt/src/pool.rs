//! Reusable-matrix Argon2id derivation.
//!
//! Allocating the multi-megabyte block matrix dominates the fixed cost of a
//! derivation under frequent calls. A pool fixes the cost parameters once
//! and keeps finished matrices on a free list for the next call.

use std::sync::{Mutex, PoisonError};

use zeroize::Zeroize;

use crate::hash::initial_hash;
use crate::memory::Block;
use crate::oneshot::{rounded_memory, run_pipeline, validate};
use crate::types::Algorithm;

// =============================================================================
// POOL
// =============================================================================

/// Argon2id derivation pool with reusable block matrices.
///
/// The cost triple `(time, memory, threads)` is fixed at construction;
/// every [`derive`](Self::derive) leases a matrix from the free list (or
/// allocates one), runs the full pipeline, zeroizes the matrix and returns
/// it. Unlike [`id_key`](crate::id_key), `derive` also accepts a secret
/// and associated data.
///
/// Two concurrent derivations never share a matrix, and a derivation's
/// output is byte-identical to `id_key` with the same parameters when
/// secret and data are empty.
///
/// # Example
/// ```rust
/// let pool = basalt::IdKeyPool::new(1, 64, 4);
/// let key = pool.derive(b"some password", b"somesalt", b"pepper", &[], 32);
/// assert_eq!(key.len(), 32);
/// ```
pub struct IdKeyPool {
    time: u32,
    /// Caller-requested KiB count; this is what the seed preamble records.
    requested_memory: u32,
    /// Rounded block count actually allocated per matrix.
    memory: u32,
    threads: u8,
    free: Mutex<Vec<Vec<Block>>>,
}

impl IdKeyPool {
    /// Creates a pool for the given cost parameters.
    ///
    /// # Panics
    /// If `time < 1` or `threads < 1`.
    #[must_use]
    pub fn new(time: u32, memory: u32, threads: u8) -> Self {
        assert!(time >= 1, "number of rounds too small");
        assert!(threads >= 1, "parallelism degree too low");

        Self {
            time,
            requested_memory: memory,
            memory: rounded_memory(memory, u32::from(threads)),
            threads,
            free: Mutex::new(Vec::new()),
        }
    }

    /// Derives `key_len` bytes on a pooled matrix.
    ///
    /// # Panics
    /// If `key_len < 1`.
    #[must_use]
    pub fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
        secret: &[u8],
        data: &[u8],
        key_len: u32,
    ) -> Vec<u8> {
        validate(self.time, self.threads, key_len);

        let mut blocks = self
            .lease()
            .unwrap_or_else(|| vec![Block::ZERO; self.memory as usize]);

        let mut seed = initial_hash(
            password,
            salt,
            secret,
            data,
            self.time,
            self.requested_memory,
            u32::from(self.threads),
            key_len,
            Algorithm::Argon2id,
        );

        let key = run_pipeline(
            &mut seed,
            &mut blocks,
            self.time,
            self.memory,
            self.threads,
            key_len,
            Algorithm::Argon2id,
        );

        seed.zeroize();
        blocks.as_mut_slice().zeroize();
        self.release(blocks);
        key
    }

    fn lease(&self) -> Option<Vec<Block>> {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }

    fn release(&self, blocks: Vec<Block>) {
        // A panicked derivation never reaches this point, so every matrix on
        // the free list is zeroized and full-sized.
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(blocks);
    }
}

// =============================================================================
// TESTS
// =============================================================================
