//! Per-cycle measurements handed to the selectors.

use crate::{config::ElasticOptions, viewport::PlayerSize};

/// Buffered media interval in seconds of presentation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Seconds buffered past `current_time` in the range containing the playhead.
///
/// Zero when the playhead sits outside every buffered range.
pub fn buffered_ahead(ranges: &[TimeRange], current_time: f64) -> f64 {
    ranges
        .iter()
        .filter(|r| r.contains(current_time))
        .map(|r| r.end)
        .fold(None, |max: Option<f64>, end| Some(max.map_or(end, |m| m.max(end))))
        .map_or(0.0, |end| end - current_time)
}

/// Seconds of playback left before the last buffered range runs out.
pub fn time_until_rebuffer(ranges: &[TimeRange], current_time: f64, playback_rate: f64) -> f64 {
    let buffered_end = ranges.last().map_or(0.0, |r| r.end);
    let rate = if playback_rate > 0.0 { playback_rate } else { 1.0 };
    (buffered_end - current_time) / rate
}

/// Host-side playback measurements.
#[cfg_attr(test, unimock::unimock(api = MeasurementsMock))]
pub trait Measurements {
    /// Current system bandwidth estimate, bits per second.
    fn bandwidth_estimate(&self) -> f64;

    /// Player element size in CSS pixels, `None` when unknown.
    fn player_size(&self) -> Option<PlayerSize>;

    fn device_pixel_ratio(&self) -> f64;

    fn buffered_ranges(&self) -> Vec<TimeRange>;

    /// Playhead position in seconds.
    fn current_time(&self) -> f64;
}

/// Inputs of one primary-strategy decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionContext {
    pub bandwidth_bps: f64,
    /// Player size to refine against; `None` disables viewport limiting.
    pub player: Option<PlayerSize>,
    /// Buffered-but-unplayed media, seconds.
    pub buffered_secs: f64,
}

impl SelectionContext {
    pub fn new(bandwidth_bps: f64, buffered_secs: f64) -> Self {
        Self {
            bandwidth_bps,
            player: None,
            buffered_secs,
        }
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerSize) -> Self {
        self.player = Some(player);
        self
    }

    /// Reads one cycle of measurements, applying pixel ratio and viewport options.
    pub fn from_measurements<M>(measurements: &M, options: &ElasticOptions) -> Self
    where
        M: Measurements + ?Sized,
    {
        let player = if options.limit_rendition_by_player_dimensions {
            let ratio = if options.use_device_pixel_ratio {
                measurements.device_pixel_ratio()
            } else {
                1.0
            };
            measurements.player_size().map(|size| size.scaled(ratio))
        } else {
            None
        };

        Self {
            bandwidth_bps: measurements.bandwidth_estimate(),
            player,
            buffered_secs: buffered_ahead(
                &measurements.buffered_ranges(),
                measurements.current_time(),
            ),
        }
    }
}
