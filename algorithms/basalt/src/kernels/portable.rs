//! Portable scalar implementation of the compression function G.
//!
//! G views `X ⊕ Y` as a 16×16 matrix of 64-bit words and applies the
//! BLAKE2b round permutation to its 8 rows and then to its 8 column pairs.
//! Unlike plain BLAKE2b, the additions inside the quarter-round carry an
//! extra `2·lo32(a)·lo32(b)` term.

use std::num::Wrapping;

use crate::memory::Block;

const TRUNC: u64 = u32::MAX as u64;

#[rustfmt::skip]
macro_rules! permute_step {
    ($a:expr, $b:expr, $c:expr, $d:expr) => {
        $a = (Wrapping($a) + Wrapping($b) + (Wrapping(2) * Wrapping(($a & TRUNC) * ($b & TRUNC)))).0;
        $d = ($d ^ $a).rotate_right(32);
        $c = (Wrapping($c) + Wrapping($d) + (Wrapping(2) * Wrapping(($c & TRUNC) * ($d & TRUNC)))).0;
        $b = ($b ^ $c).rotate_right(24);

        $a = (Wrapping($a) + Wrapping($b) + (Wrapping(2) * Wrapping(($a & TRUNC) * ($b & TRUNC)))).0;
        $d = ($d ^ $a).rotate_right(16);
        $c = (Wrapping($c) + Wrapping($d) + (Wrapping(2) * Wrapping(($c & TRUNC) * ($d & TRUNC)))).0;
        $b = ($b ^ $c).rotate_right(63);
    };
}

macro_rules! permute {
    (
        $v0:expr, $v1:expr, $v2:expr, $v3:expr,
        $v4:expr, $v5:expr, $v6:expr, $v7:expr,
        $v8:expr, $v9:expr, $v10:expr, $v11:expr,
        $v12:expr, $v13:expr, $v14:expr, $v15:expr,
    ) => {
        permute_step!($v0, $v4, $v8, $v12);
        permute_step!($v1, $v5, $v9, $v13);
        permute_step!($v2, $v6, $v10, $v14);
        permute_step!($v3, $v7, $v11, $v15);
        permute_step!($v0, $v5, $v10, $v15);
        permute_step!($v1, $v6, $v11, $v12);
        permute_step!($v2, $v7, $v8, $v13);
        permute_step!($v3, $v4, $v9, $v14);
    };
}

/// `P(X ⊕ Y) ⊕ X ⊕ Y`, the shared core of both fill variants.
#[inline(always)]
fn compress(rhs: &Block, lhs: &Block) -> Block {
    let r = *rhs ^ lhs;
    let mut q = r;

    // Row rounds: 8 groups of 16 consecutive words.
    for chunk in q.0.chunks_exact_mut(16) {
        #[rustfmt::skip]
        permute!(
            chunk[0], chunk[1], chunk[2], chunk[3],
            chunk[4], chunk[5], chunk[6], chunk[7],
            chunk[8], chunk[9], chunk[10], chunk[11],
            chunk[12], chunk[13], chunk[14], chunk[15],
        );
    }

    // Column rounds: 8 groups of word pairs at stride 16.
    for idx in 0..8 {
        let base = idx * 2;
        #[rustfmt::skip]
        permute!(
            q.0[base], q.0[base + 1],
            q.0[base + 16], q.0[base + 17],
            q.0[base + 32], q.0[base + 33],
            q.0[base + 48], q.0[base + 49],
            q.0[base + 64], q.0[base + 65],
            q.0[base + 80], q.0[base + 81],
            q.0[base + 96], q.0[base + 97],
            q.0[base + 112], q.0[base + 113],
        );
    }

    q ^= &r;
    q
}

/// Overwriting variant: `dst = G(x, y)`.
///
/// Used for the initial fill of each position and for address-block
/// generation, where the previous contents of `dst` carry no information.
#[inline]
pub(crate) fn fill_block(x: &Block, y: &Block, dst: &mut Block) {
    *dst = compress(x, y);
}

/// XORing variant: `dst ⊕= G(x, y)`.
///
/// Used on every pass after the first so the new value mixes into the block
/// produced by the previous pass.
#[inline]
pub(crate) fn fill_block_xor(x: &Block, y: &Block, dst: &mut Block) {
    *dst ^= &compress(x, y);
}

// =============================================================================
// TESTS
// =============================================================================
