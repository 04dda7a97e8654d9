//! Memory-filling engine.
//!
//! Drives `time` passes over the matrix as 4 slices of `threads` lane
//! segments each. Lane segments within a slice are independent: every
//! worker writes only its own segment and reads blocks finished in earlier
//! slices, so they run in parallel and join at the slice boundary.

mod addressing;

use crate::engine::addressing::{index_alpha, AddressBlocks};
use crate::kernels::constants::{ADDRESSES_PER_BLOCK, SYNC_POINTS};
use crate::kernels::{fill_block, fill_block_xor};
use crate::memory::Block;
use crate::types::Algorithm;

// =============================================================================
// FILL PARAMETERS
// =============================================================================

/// Geometry and cost parameters shared by every segment of one derivation.
#[derive(Clone, Copy)]
pub(crate) struct FillParams {
    pub time: u32,
    /// Rounded block count; always `threads * lane_length`.
    pub memory: u32,
    pub threads: u32,
    pub lane_length: u32,
    pub segment_length: u32,
    pub mode: Algorithm,
}

impl FillParams {
    pub(crate) fn new(time: u32, memory: u32, threads: u32, mode: Algorithm) -> Self {
        let lane_length = memory / threads;
        Self {
            time,
            memory,
            threads,
            lane_length,
            segment_length: lane_length / SYNC_POINTS,
            mode,
        }
    }
}

// =============================================================================
// SHARED MATRIX VIEW
// =============================================================================

/// Raw view of the block matrix handed to the lane workers of one slice.
///
/// Within a slice, each worker writes only its own `(lane, slice)` segment
/// and reads blocks completed in earlier slices or earlier in its own
/// segment, so no block is ever referenced mutably twice. Index arithmetic
/// is still guarded by debug asserts.
struct SharedBlocks {
    base: *mut Block,
    len: usize,
}

unsafe impl Sync for SharedBlocks {}

impl SharedBlocks {
    fn new(blocks: &mut [Block]) -> Self {
        Self {
            base: blocks.as_mut_ptr(),
            len: blocks.len(),
        }
    }

    /// # Safety
    /// `idx` must be in bounds and no `&mut` to the same block may be alive.
    #[inline(always)]
    unsafe fn block(&self, idx: usize) -> &Block {
        debug_assert!(idx < self.len);
        &*self.base.add(idx)
    }

    /// # Safety
    /// `idx` must be in bounds and no other reference to the same block may
    /// be alive.
    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    unsafe fn block_mut(&self, idx: usize) -> &mut Block {
        debug_assert!(idx < self.len);
        &mut *self.base.add(idx)
    }
}

// =============================================================================
// PASS DRIVER
// =============================================================================

/// Runs all passes over an initialized matrix.
///
/// The first two columns of each lane must already hold their seed-derived
/// values. Every slice joins before the next one starts; the output is
/// independent of how the lane workers are scheduled within a slice.
pub(crate) fn fill_memory(blocks: &mut [Block], params: FillParams) {
    debug_assert_eq!(blocks.len(), params.memory as usize);

    for pass in 0..params.time {
        for slice in 0..SYNC_POINTS {
            fill_slice(blocks, params, pass, slice);
        }
    }
}

/// Fills one slice across all lanes and joins the workers.
fn fill_slice(blocks: &mut [Block], params: FillParams, pass: u32, slice: u32) {
    let shared = SharedBlocks::new(blocks);

    #[cfg(feature = "multithread")]
    if params.threads > 1 {
        rayon::scope(|scope| {
            for lane in 0..params.threads {
                let shared = &shared;
                scope.spawn(move |_| fill_segment(shared, params, pass, slice, lane));
            }
        });
        return;
    }

    for lane in 0..params.threads {
        fill_segment(&shared, params, pass, slice, lane);
    }
}

// =============================================================================
// SEGMENT PROCESSOR
// =============================================================================

/// Fills the `(pass, slice, lane)` segment.
fn fill_segment(blocks: &SharedBlocks, params: FillParams, pass: u32, slice: u32, lane: u32) {
    let mut addresses = params
        .mode
        .data_independent(pass, slice)
        .then(|| AddressBlocks::new(pass, lane, slice, params.memory, params.time, params.mode));

    let mut index = 0u32;
    if pass == 0 && slice == 0 {
        // The first two columns were produced during initialization; warm up
        // the address stream so its words line up with the skipped positions.
        index = 2;
        if let Some(stream) = addresses.as_mut() {
            stream.refresh();
        }
    }

    let mut offset = (lane * params.lane_length + slice * params.segment_length + index) as usize;
    while index < params.segment_length {
        let prev = if index == 0 && slice == 0 {
            // The first column's predecessor wraps to the lane's last column.
            offset + params.lane_length as usize - 1
        } else {
            offset - 1
        };

        let rand = match addresses.as_mut() {
            Some(stream) => {
                if index % ADDRESSES_PER_BLOCK == 0 {
                    stream.refresh();
                }
                stream.word(index)
            }
            // SAFETY: `prev` was written earlier in this segment or in a
            // prior slice; no worker holds it mutably.
            None => unsafe { blocks.block(prev).0[0] },
        };

        let reference = index_alpha(
            rand,
            params.lane_length,
            params.segment_length,
            params.threads,
            pass,
            slice,
            lane,
            index,
        ) as usize;

        // SAFETY: `offset` lies in this worker's own segment while `prev`
        // and `reference` resolve to blocks finished before it (the window
        // in `index_alpha` never includes the current position), so the
        // mutable borrow is disjoint from both shared ones.
        unsafe {
            let dst = blocks.block_mut(offset);
            let prev = blocks.block(prev);
            let reference = blocks.block(reference);
            if pass == 0 {
                fill_block(prev, reference, dst);
            } else {
                fill_block_xor(prev, reference, dst);
            }
        }

        index += 1;
        offset += 1;
    }
}
