#![forbid(unsafe_code)]
#![expect(
    clippy::cast_precision_loss,
    reason = "test utility crate: bitrates are far below f64 precision limits"
)]

//! Shared test utilities for the elastic-abr workspace.

pub mod fixtures;
pub mod playback;
pub mod trace;

pub use fixtures::*;
pub use playback::PlaybackModel;
pub use trace::{BandwidthTrace, SplitMix64};
