//! Reference-block selection.
//!
//! Maps a pseudorandom 64-bit word and the current fill position onto the
//! offset of an already-filled block. The low half of the word picks a
//! position inside the visible window (biased toward recent blocks), the
//! high half picks the lane.

use crate::kernels::constants::SYNC_POINTS;
use crate::kernels::fill_block;
use crate::memory::Block;
use crate::types::Algorithm;

// =============================================================================
// INDEX MAPPING
// =============================================================================

/// Resolves `rand` into an absolute block offset for position
/// `(pass, slice, lane, index)`.
///
/// The visible window covers every block filled in prior slices of the
/// sliding window plus, within the current segment, the blocks before the
/// current position when referencing the own lane. The immediate
/// predecessor is always excluded.
#[allow(clippy::too_many_arguments)]
pub(crate) fn index_alpha(
    rand: u64,
    lane_length: u32,
    segment_length: u32,
    threads: u32,
    pass: u32,
    slice: u32,
    lane: u32,
    index: u32,
) -> u32 {
    let mut ref_lane = ((rand >> 32) % u64::from(threads)) as u32;
    if pass == 0 && slice == 0 {
        // Nothing outside the own lane is filled yet.
        ref_lane = lane;
    }

    let mut window = 3 * segment_length;
    let mut start = ((slice + 1) % SYNC_POINTS) * segment_length;
    if lane == ref_lane {
        window += index;
    }
    if pass == 0 {
        window = slice * segment_length;
        start = 0;
        if slice == 0 || lane == ref_lane {
            window += index;
        }
    }
    if index == 0 || lane == ref_lane {
        window -= 1;
    }

    phi(rand, u64::from(window), u64::from(start), ref_lane, lane_length)
}

/// Nonlinear distribution over the window: squaring the low 32 bits biases
/// the pick toward the most recently written blocks.
fn phi(rand: u64, window: u64, start: u64, ref_lane: u32, lane_length: u32) -> u32 {
    let mut p = rand & 0xFFFF_FFFF;
    p = (p * p) >> 32;
    p = (p * window) >> 32;
    let column = (start + window - (p + 1)) % u64::from(lane_length);
    ref_lane * lane_length + column as u32
}

// =============================================================================
// ADDRESS STREAM (data-independent positions)
// =============================================================================

/// Generator for the pseudorandom word stream of one data-independent
/// segment.
///
/// The stream is produced 128 words at a time by compressing a counter
/// block twice through a zero block. The counter word is incremented
/// before every refresh.
pub(crate) struct AddressBlocks {
    input: Block,
    addresses: Block,
}

impl AddressBlocks {
    pub(crate) fn new(
        pass: u32,
        lane: u32,
        slice: u32,
        memory: u32,
        time: u32,
        mode: Algorithm,
    ) -> Self {
        let mut input = Block::ZERO;
        input.0[0] = u64::from(pass);
        input.0[1] = u64::from(lane);
        input.0[2] = u64::from(slice);
        input.0[3] = u64::from(memory);
        input.0[4] = u64::from(time);
        input.0[5] = u64::from(mode.to_u32());
        Self {
            input,
            addresses: Block::ZERO,
        }
    }

    /// Produce the next 128 words of the stream.
    pub(crate) fn refresh(&mut self) {
        self.input.0[6] += 1;
        let mut once = Block::ZERO;
        fill_block(&self.input, &Block::ZERO, &mut once);
        fill_block(&once, &Block::ZERO, &mut self.addresses);
    }

    /// Word for intra-segment position `index` from the current 128-word
    /// window.
    #[inline]
    pub(crate) fn word(&self, index: u32) -> u64 {
        self.addresses.0[(index % 128) as usize]
    }
}

// =============================================================================
// TESTS
// =============================================================================
