use std::collections::VecDeque;

use crate::error::{AbrError, AbrResult};

/// Sliding-window harmonic mean of recent bandwidth samples.
///
/// Rates average harmonically: a short burst at twice the rate must not
/// outweigh a sustained lower rate.
#[derive(Clone, Debug)]
pub struct HarmonicFilter {
    horizon: usize,
    samples: VecDeque<f64>,
}

impl HarmonicFilter {
    pub fn new(horizon: usize) -> Self {
        let horizon = horizon.max(1);
        Self {
            horizon,
            samples: VecDeque::with_capacity(horizon),
        }
    }

    /// Pushes a sample clamped to `cap_bps`, evicting the oldest past the horizon.
    ///
    /// A zero sample is a stalled transfer and is kept. NaN, negative and
    /// unbounded samples are ignored.
    pub fn push(&mut self, sample_bps: f64, cap_bps: f64) {
        if sample_bps.is_nan() || sample_bps < 0.0 {
            return;
        }
        let sample_bps = sample_bps.min(cap_bps);
        if !sample_bps.is_finite() {
            return;
        }
        if self.samples.len() == self.horizon {
            self.samples.pop_front();
        }
        self.samples.push_back(sample_bps);
    }

    /// Harmonic mean of the window; `0.0` while empty or while it holds a stall.
    #[expect(clippy::cast_precision_loss)] // window length is tiny
    pub fn estimate_bps(&self) -> f64 {
        if self.samples.is_empty() || self.samples.iter().any(|&s| s <= 0.0) {
            return 0.0;
        }
        let inverse_sum: f64 = self.samples.iter().map(|s| 1.0 / s).sum();
        self.samples.len() as f64 / inverse_sum
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Exponentially weighted moving average of the system bandwidth.
///
/// Higher `decay` makes older estimates lose significance faster.
#[derive(Clone, Debug)]
pub struct MovingAverageBandwidth {
    decay: f64,
    average: Option<f64>,
    last_system_bps: f64,
}

impl MovingAverageBandwidth {
    pub fn new(decay: f64) -> AbrResult<Self> {
        if !(0.0..=1.0).contains(&decay) {
            return Err(AbrError::InvalidDecay(decay));
        }
        Ok(Self {
            decay,
            average: None,
            last_system_bps: -1.0,
        })
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Folds in the latest system bandwidth and returns the smoothed value.
    ///
    /// The first call seeds the average. Afterwards the average only moves when
    /// the system bandwidth is positive and has changed: a constant reading
    /// polled repeatedly must not decay the average, and a zero reading from a
    /// cancelled request must not drag it down.
    #[expect(clippy::float_cmp)] // exact repeat of the previous reading
    pub fn update(&mut self, system_bps: f64) -> f64 {
        let Some(average) = self.average else {
            self.average = Some(system_bps);
            self.last_system_bps = system_bps;
            return system_bps;
        };

        let average = if system_bps > 0.0 && system_bps != self.last_system_bps {
            self.last_system_bps = system_bps;
            self.decay * system_bps + (1.0 - self.decay) * average
        } else {
            average
        };
        self.average = Some(average);
        average
    }

    pub fn average(&self) -> Option<f64> {
        self.average
    }
}
