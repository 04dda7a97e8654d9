//! Compression kernels.
//!
//! Single dispatch point for the block compression function G. Only the
//! portable scalar kernel is provided; both fill variants are separate
//! statically-dispatched functions so the hot loop never branches on a
//! mode flag.

pub(crate) mod constants;
mod portable;

pub(crate) use portable::{fill_block, fill_block_xor};
