//! Bitrate ladder and rate quantization.

use crate::{
    compare::{compare_bandwidth, stable_sort},
    types::{Rendition, RenditionId},
};

/// Which side of the ladder the controller output was clamped to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Saturation {
    /// Requested rate reaches the top rendition.
    High,
    /// Requested rate falls to the cheapest rendition.
    Low,
}

/// Controller output consumed by quantization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RateTarget {
    /// Unclamped target rate in bits per second.
    Normal(f64),
    Saturated(Saturation),
}

/// Renditions ordered by ascending advertised bandwidth.
///
/// Ties keep manifest order. Renditions without a bandwidth sit at the top
/// of the ordering but are never produced by quantization.
#[derive(Clone, Debug)]
pub struct BitrateLadder<'a> {
    levels: Vec<&'a Rendition>,
}

impl<'a> BitrateLadder<'a> {
    pub fn new<I>(renditions: I) -> Self
    where
        I: IntoIterator<Item = &'a Rendition>,
    {
        let mut levels: Vec<&Rendition> = renditions.into_iter().collect();
        stable_sort(&mut levels, |a, b| compare_bandwidth(a, b));
        Self { levels }
    }

    pub fn levels(&self) -> &[&'a Rendition] {
        &self.levels
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn priced(&self) -> impl DoubleEndedIterator<Item = (&'a Rendition, u64)> + '_ {
        self.levels
            .iter()
            .filter_map(|r| r.bandwidth.map(|bw| (*r, bw)))
    }

    /// Cheapest advertised bandwidth.
    pub fn min_bandwidth(&self) -> Option<u64> {
        self.priced().next().map(|(_, bw)| bw)
    }

    /// Most expensive advertised bandwidth.
    pub fn max_bandwidth(&self) -> Option<u64> {
        self.priced().next_back().map(|(_, bw)| bw)
    }

    pub fn contains(&self, id: &RenditionId) -> bool {
        self.levels.iter().any(|r| &r.id == id)
    }

    /// Floor selection: the highest rendition whose bandwidth does not exceed `rate_bps`.
    ///
    /// Equal bandwidths resolve to the later one in manifest order.
    #[expect(clippy::cast_precision_loss)] // bitrate precision loss is negligible for ABR
    pub fn floor(&self, rate_bps: f64) -> Option<&'a Rendition> {
        self.priced()
            .take_while(|(_, bw)| *bw as f64 <= rate_bps)
            .last()
            .map(|(r, _)| r)
    }

    /// Maps a controller target to a rendition, `None` when the target is below the ladder.
    #[expect(clippy::cast_precision_loss)] // bitrate precision loss is negligible for ABR
    pub fn quantize(&self, target: RateTarget) -> Option<&'a Rendition> {
        match target {
            RateTarget::Normal(rate) => self.floor(rate),
            RateTarget::Saturated(Saturation::High) => self.priced().next_back().map(|(r, _)| r),
            RateTarget::Saturated(Saturation::Low) => {
                self.min_bandwidth().and_then(|min| self.floor(min as f64))
            }
        }
    }
}
