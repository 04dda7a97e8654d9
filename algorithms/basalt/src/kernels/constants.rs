//! Block geometry and fill-schedule constants.

/// 64-bit words per memory block.
pub(crate) const BLOCK_WORDS: usize = 128;

/// Bytes per memory block.
pub(crate) const BLOCK_BYTES: usize = 1024;

/// Synchronization points per pass: each lane is split into this many slices,
/// and all lanes join between consecutive slices.
pub(crate) const SYNC_POINTS: u32 = 4;

/// Pseudorandom 64-bit indices carried by one address block.
pub(crate) const ADDRESSES_PER_BLOCK: u32 = 128;
