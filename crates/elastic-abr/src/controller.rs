use std::cmp::Ordering;

use tracing::debug;
use web_time::Instant;

use crate::{
    clock::{Clock, SystemClock},
    compare::compare_bandwidth,
    config::{ElasticOptions, Watermarks},
    error::AbrResult,
    estimator::HarmonicFilter,
    ladder::{BitrateLadder, RateTarget, Saturation},
    types::{Rendition, RenditionId},
};

/// Denominator forced while the buffer is still filling after startup.
const COLD_START_DENOMINATOR: f64 = 1.2;

/// Buffer fullness relative to the watermarks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BufferZone {
    /// Below the low watermark.
    #[default]
    Below,
    /// Between the watermarks, inclusive.
    DeadZone,
    /// Above the high watermark.
    Above,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ElasticReason {
    /// Buffer inside the dead-zone: previous level reused.
    DeadZoneHold,
    /// Quantized target was eligible and taken.
    Tracking,
    /// Quantized target was not eligible; stepped down to the nearest eligible level.
    SteppedDown,
    /// Buffer above the high watermark: downgrade refused.
    Hysteresis,
    /// No rendition could be produced.
    NoLevel,
}

/// Outcome of one controller cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct ElasticDecision {
    pub level: Option<RenditionId>,
    pub zone: BufferZone,
    /// Buffer error in seconds, zero inside the dead-zone.
    pub error: f64,
    pub filtered_bps: f64,
    /// Rate target, absent when the dead-zone skipped recomputation.
    pub target: Option<RateTarget>,
    /// Cold start forced the denominator this cycle.
    pub cold_start: bool,
    pub reason: ElasticReason,
}

#[derive(Clone, Debug)]
struct Level {
    id: RenditionId,
    bandwidth: u64,
}

impl Level {
    fn of(rendition: &Rendition) -> Self {
        Self {
            id: rendition.id.clone(),
            bandwidth: rendition.ranked_bandwidth(),
        }
    }
}

/// State carried between cycles of one playback session.
#[derive(Clone, Debug)]
pub struct ControllerState {
    filter: HarmonicFilter,
    integral_error: f64,
    last_tick: Option<Instant>,
    cold_start: bool,
    last_level: Option<Level>,
    zone: BufferZone,
}

impl ControllerState {
    fn new(horizon: usize) -> Self {
        Self {
            filter: HarmonicFilter::new(horizon),
            integral_error: 0.0,
            last_tick: None,
            cold_start: true,
            last_level: None,
            zone: BufferZone::Below,
        }
    }

    pub fn integral_error(&self) -> f64 {
        self.integral_error
    }

    pub fn is_cold_start(&self) -> bool {
        self.cold_start
    }

    pub fn last_level(&self) -> Option<&RenditionId> {
        self.last_level.as_ref().map(|l| &l.id)
    }

    /// Zone observed on the previous cycle.
    pub fn zone(&self) -> BufferZone {
        self.zone
    }

    pub fn filtered_bps(&self) -> f64 {
        self.filter.estimate_bps()
    }
}

/// Buffer-watermark feedback controller.
///
/// Converts a harmonic-filtered bandwidth estimate into a target bitrate by
/// dividing it by `1 - k1·e - k2·∫e`, where `e` is the distance of the buffer
/// from the nearest watermark. Holds its state for one playback session;
/// callers must serialize calls.
pub struct ElasticController<C: Clock = SystemClock> {
    clock: C,
    watermarks: Watermarks,
    proportional_gain: f64,
    integral_gain: f64,
    cold_start_level: f64,
    cap_factor: f64,
    horizon: usize,
    state: ControllerState,
}

impl ElasticController<SystemClock> {
    pub fn new(options: &ElasticOptions) -> AbrResult<Self> {
        Self::with_clock(options, SystemClock)
    }
}

impl<C: Clock> ElasticController<C> {
    pub fn with_clock(options: &ElasticOptions, clock: C) -> AbrResult<Self> {
        let watermarks = options.validate()?;
        Ok(Self {
            clock,
            watermarks,
            proportional_gain: options.proportional_gain,
            integral_gain: options.integral_gain,
            cold_start_level: watermarks.low() * options.cold_start_fraction,
            cap_factor: options.bandwidth_cap_factor,
            horizon: options.bandwidth_horizon,
            state: ControllerState::new(options.bandwidth_horizon),
        })
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn watermarks(&self) -> Watermarks {
        self.watermarks
    }

    /// Forgets everything learned in the session.
    pub fn reset(&mut self) {
        self.state = ControllerState::new(self.horizon);
    }

    /// Classifies the buffer and returns `(zone, error, zero_integral)`.
    fn classify(&self, queue_time: f64) -> (BufferZone, f64, bool) {
        let prev = self.state.zone;
        if queue_time > self.watermarks.high() {
            (
                BufferZone::Above,
                queue_time - self.watermarks.high(),
                prev == BufferZone::Below,
            )
        } else if queue_time < self.watermarks.low() {
            (
                BufferZone::Below,
                queue_time - self.watermarks.low(),
                prev == BufferZone::Above,
            )
        } else {
            (BufferZone::DeadZone, 0.0, true)
        }
    }

    /// Runs one decision cycle.
    ///
    /// `ladder` is the full rendition ladder used for quantization, `eligible`
    /// the bandwidth-ordered renditions playback may switch to.
    #[expect(clippy::cast_precision_loss)] // bitrate precision loss is negligible for ABR
    pub fn step(
        &mut self,
        ladder: &BitrateLadder<'_>,
        eligible: &[&Rendition],
        queue_time_secs: f64,
        bitrate_sample_bps: f64,
    ) -> ElasticDecision {
        let (Some(min_bw), Some(max_bw)) = (ladder.min_bandwidth(), ladder.max_bandwidth()) else {
            debug!("elastic step: ladder advertises no bandwidth");
            return self.no_level(BufferZone::Below, 0.0, None, false);
        };
        let (min_bw, max_bw) = (min_bw as f64, max_bw as f64);

        self.state
            .filter
            .push(bitrate_sample_bps, max_bw * self.cap_factor);
        let filtered_bps = self.state.filter.estimate_bps();

        let queue_time = if queue_time_secs.is_finite() {
            queue_time_secs.abs()
        } else {
            0.0
        };
        let (zone, error, zero_integral) = self.classify(queue_time);
        self.state.zone = zone;

        let now = self.clock.now();
        let delta_secs = match self.state.last_tick {
            None => {
                self.state.integral_error = error;
                0.0
            }
            Some(last) => {
                if zero_integral {
                    self.state.integral_error = 0.0;
                }
                let delta = now.saturating_duration_since(last).as_secs_f64();
                self.state.integral_error += delta * error;
                delta
            }
        };
        self.state.last_tick = Some(now);

        let mut denominator = 1.0
            - self.proportional_gain * error
            - self.integral_gain * self.state.integral_error;

        if zone == BufferZone::DeadZone {
            let level = self.state.last_level.as_ref().map(|l| l.id.clone());
            debug!(
                queue_time,
                filtered_bps,
                level = ?level,
                "elastic step: dead-zone hold"
            );
            return ElasticDecision {
                level,
                zone,
                error,
                filtered_bps,
                target: None,
                cold_start: false,
                reason: ElasticReason::DeadZoneHold,
            };
        }

        let windup = delta_secs * error;
        let mut cold_start = false;
        if self.state.cold_start && queue_time < self.cold_start_level {
            denominator = COLD_START_DENOMINATOR;
            self.state.integral_error -= windup;
            cold_start = true;
        } else if self.state.cold_start {
            self.state.cold_start = false;
        }

        let rate = filtered_bps / denominator;
        let target = if denominator <= 0.0 || rate >= max_bw {
            self.state.integral_error -= windup;
            RateTarget::Saturated(Saturation::High)
        } else if rate <= min_bw {
            self.state.integral_error -= windup;
            RateTarget::Saturated(Saturation::Low)
        } else {
            RateTarget::Normal(rate)
        };

        debug!(
            queue_time,
            ?zone,
            error,
            integral = self.state.integral_error,
            denominator,
            filtered_bps,
            ?target,
            cold_start,
            "elastic step: evaluating"
        );

        let Some(quantized) = ladder.quantize(target) else {
            return self.no_level(zone, error, Some(target), cold_start);
        };

        let (chosen, mut reason) = if eligible.iter().any(|r| r.id == quantized.id) {
            (quantized, ElasticReason::Tracking)
        } else {
            let below = eligible
                .iter()
                .rev()
                .find(|r| compare_bandwidth(r, quantized) != Ordering::Greater)
                .or_else(|| eligible.first());
            match below {
                Some(r) => (*r, ElasticReason::SteppedDown),
                None => return self.no_level(zone, error, Some(target), cold_start),
            }
        };

        let mut level = Level::of(chosen);
        let hold = zone == BufferZone::Above
            && self.state.last_level.as_ref().is_some_and(|last| {
                level.bandwidth < last.bandwidth && eligible.iter().any(|r| r.id == last.id)
            });
        if hold {
            if let Some(last) = &self.state.last_level {
                level = last.clone();
                reason = ElasticReason::Hysteresis;
            }
        } else {
            self.state.last_level = Some(level.clone());
        }

        debug!(
            quantized = %quantized.id,
            level = %level.id,
            ?reason,
            "elastic step: level selected"
        );

        ElasticDecision {
            level: Some(level.id),
            zone,
            error,
            filtered_bps,
            target: Some(target),
            cold_start,
            reason,
        }
    }

    fn no_level(
        &self,
        zone: BufferZone,
        error: f64,
        target: Option<RateTarget>,
        cold_start: bool,
    ) -> ElasticDecision {
        ElasticDecision {
            level: None,
            zone,
            error,
            filtered_bps: self.state.filter.estimate_bps(),
            target,
            cold_start,
            reason: ElasticReason::NoLevel,
        }
    }
}
