//! # Basalt
//!
//! Memory-hard password-based key derivation implementing Argon2, the
//! winner of the Password Hashing Competition, at protocol version 0x13.
//!
//! Two variants are exposed. Argon2i ([`key`]) uses data-independent memory
//! access throughout and needs more passes to resist trade-off attacks;
//! the recommended non-interactive parameters are `time = 3` with as much
//! memory as possible. Argon2id ([`id_key`], [`IdKeyPool`]) is the hybrid
//! recommended for most uses: side-channel resistant during the critical
//! first half of the first pass and data-dependent afterwards, with
//! recommended parameters `time = 1` and `memory = 64 * 1024`. When unsure,
//! use Argon2id.
//!
//! # Usage
//! ```rust
//! // 1. One-shot derivation (allocates its matrix per call)
//! let key = basalt::id_key(b"some password", b"somesalt", 1, 64, 4, 32);
//! assert_eq!(key.len(), 32);
//!
//! // 2. Repeated derivations with fixed cost parameters
//! let pool = basalt::IdKeyPool::new(1, 64, 4);
//! let pooled = pool.derive(b"some password", b"somesalt", &[], &[], 32);
//! assert_eq!(pooled, key);
//! ```
//!
//! Outputs match the Argon2 reference implementation byte for byte. The
//! derived key is raw bytes; producing or parsing `$argon2id$…` encoded
//! strings is out of scope.

// =============================================================================
// MODULES
// =============================================================================

mod engine;
mod hash;
mod kernels;
mod memory;
mod oneshot;
mod pool;
mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use oneshot::{id_key, key};
pub use pool::IdKeyPool;
pub use types::VERSION;
