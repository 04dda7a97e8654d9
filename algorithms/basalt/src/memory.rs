//! The 1024-byte memory block and its little-endian byte views.

use std::ops::{BitXor, BitXorAssign};

use zeroize::DefaultIsZeroes;

use crate::kernels::constants::{BLOCK_BYTES, BLOCK_WORDS};

// =============================================================================
// BLOCK
// =============================================================================

/// One matrix cell: 1024 bytes viewed as 128 little-endian 64-bit words.
///
/// Blocks are plain values; their only identity is their offset in the
/// matrix. Alignment matches a cache line so the compression function's
/// strided column access stays within predictable line boundaries.
#[derive(Clone, Copy, Debug)]
#[repr(align(64))]
pub(crate) struct Block(pub(crate) [u64; BLOCK_WORDS]);

impl Block {
    pub(crate) const ZERO: Self = Self([0u64; BLOCK_WORDS]);

    /// Overwrite the block with 1024 little-endian bytes.
    #[inline]
    pub(crate) fn load(&mut self, bytes: &[u8; BLOCK_BYTES]) {
        for (word, chunk) in self.0.iter_mut().zip(bytes.chunks_exact(8)) {
            *word = u64::from_le_bytes(chunk.try_into().expect("chunk must be 8 bytes"));
        }
    }

    /// Serialize the block as 1024 little-endian bytes.
    #[inline]
    pub(crate) fn store(&self, bytes: &mut [u8; BLOCK_BYTES]) {
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::ZERO
    }
}

impl DefaultIsZeroes for Block {}

impl BitXor<&Block> for Block {
    type Output = Block;

    #[inline]
    fn bitxor(mut self, rhs: &Block) -> Block {
        self ^= rhs;
        self
    }
}

impl BitXorAssign<&Block> for Block {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &Block) {
        for (dst, src) in self.0.iter_mut().zip(rhs.0.iter()) {
            *dst ^= src;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip_is_little_endian() {
        let mut bytes = [0u8; BLOCK_BYTES];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }

        let mut block = Block::ZERO;
        block.load(&bytes);
        assert_eq!(block.0[0], u64::from_le_bytes(bytes[..8].try_into().unwrap()));

        let mut out = [0u8; BLOCK_BYTES];
        block.store(&mut out);
        assert_eq!(out, bytes);
    }

    #[test]
    fn xor_assign_is_involutive() {
        let mut a = Block::ZERO;
        let mut b = Block::ZERO;
        for i in 0..BLOCK_WORDS {
            a.0[i] = i as u64;
            b.0[i] = (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        }

        let original = a;
        a ^= &b;
        a ^= &b;
        assert_eq!(a.0, original.0);
    }
}
