//! Configuration for the elastic selector.

use derivative::Derivative;
use derive_setters::Setters;

use crate::error::{AbrError, AbrResult};

/// Buffer-fullness thresholds bounding the controller's dead-zone, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Watermarks {
    low: f64,
    high: f64,
}

impl Watermarks {
    /// Requires finite `0 <= low < high`.
    pub fn new(low: f64, high: f64) -> AbrResult<Self> {
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low >= high {
            return Err(AbrError::InvalidWatermarks { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

/// How the bandwidth fed to the controller is pre-smoothed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BandwidthSmoothing {
    /// Use the latest system bandwidth estimate as-is.
    #[default]
    Last,
    /// Exponential moving average with the given decay in `[0, 1]`.
    MovingAverage { decay: f64 },
}

/// Elastic selector configuration.
#[derive(Clone, Debug, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct ElasticOptions {
    /// Lower buffer watermark in seconds. Default: 10.
    #[derivative(Default(value = "10.0"))]
    pub buffer_watermark_low: f64,
    /// Upper buffer watermark in seconds. Default: 30.
    #[derivative(Default(value = "30.0"))]
    pub buffer_watermark_high: f64,
    /// Gain on the instantaneous buffer error. Default: 0.01.
    #[derivative(Default(value = "0.01"))]
    pub proportional_gain: f64,
    /// Gain on the integrated buffer error. Default: 0.001.
    #[derivative(Default(value = "0.001"))]
    pub integral_gain: f64,
    /// Share of the low watermark below which cold start forces a cautious rate. Default: 0.8.
    #[derivative(Default(value = "0.8"))]
    pub cold_start_fraction: f64,
    /// Number of bandwidth samples in the harmonic filter. Default: 3.
    #[derivative(Default(value = "3"))]
    pub bandwidth_horizon: usize,
    /// Samples are capped at this multiple of the top rendition bandwidth. Default: 2.
    #[derivative(Default(value = "2.0"))]
    pub bandwidth_cap_factor: f64,
    /// Scale the player size by the device pixel ratio.
    pub use_device_pixel_ratio: bool,
    /// Refine the controller pick against the player size. Default: true.
    #[derivative(Default(value = "true"))]
    pub limit_rendition_by_player_dimensions: bool,
    pub bandwidth_smoothing: BandwidthSmoothing,
}

impl ElasticOptions {
    /// Checks every constraint, returning the validated watermarks.
    pub fn validate(&self) -> AbrResult<Watermarks> {
        let watermarks = Watermarks::new(self.buffer_watermark_low, self.buffer_watermark_high)?;

        for (name, value) in [
            ("proportional_gain", self.proportional_gain),
            ("integral_gain", self.integral_gain),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AbrError::InvalidParameter { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.cold_start_fraction) {
            return Err(AbrError::InvalidParameter {
                name: "cold_start_fraction",
                value: self.cold_start_fraction,
            });
        }
        if self.bandwidth_horizon == 0 {
            return Err(AbrError::InvalidParameter {
                name: "bandwidth_horizon",
                value: 0.0,
            });
        }
        if !self.bandwidth_cap_factor.is_finite() || self.bandwidth_cap_factor < 1.0 {
            return Err(AbrError::InvalidParameter {
                name: "bandwidth_cap_factor",
                value: self.bandwidth_cap_factor,
            });
        }
        match self.bandwidth_smoothing {
            BandwidthSmoothing::MovingAverage { decay } if !(0.0..=1.0).contains(&decay) => {
                return Err(AbrError::InvalidDecay(decay));
            }
            _ => {}
        }

        Ok(watermarks)
    }
}
