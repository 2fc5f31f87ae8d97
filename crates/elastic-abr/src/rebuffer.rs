//! Rebuffer-risk selector: the best rendition a switch can reach without stalling.

use tracing::debug;

use crate::{
    compare::{compare_bandwidth, stable_sort},
    eligibility::Eligibility,
    filter::Candidates,
    types::{Manifest, Rendition},
};

/// Known mapping between a rendition's timeline and playback time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyncPoint {
    pub time: f64,
    pub segment_index: usize,
}

#[cfg_attr(test, unimock::unimock(api = SyncPointsMock))]
pub trait SyncPoints {
    fn sync_point(
        &self,
        rendition: &Rendition,
        duration: f64,
        timeline: u64,
        current_time: f64,
    ) -> Option<SyncPoint>;
}

#[cfg_attr(test, unimock::unimock(api = RequestTimeEstimatorMock))]
pub trait RequestTimeEstimator {
    /// Seconds needed to fetch one segment of `rendition` at `bandwidth_bps`.
    fn estimate_segment_request_time(
        &self,
        segment_duration: f64,
        bandwidth_bps: f64,
        rendition: &Rendition,
    ) -> f64;
}

/// Request time proportional to the segment's encoded size.
///
/// Infinite when the rendition advertises no bandwidth or the link has none.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProportionalRequestTime;

impl RequestTimeEstimator for ProportionalRequestTime {
    #[expect(clippy::cast_precision_loss)] // bitrate precision loss is negligible for ABR
    fn estimate_segment_request_time(
        &self,
        segment_duration: f64,
        bandwidth_bps: f64,
        rendition: &Rendition,
    ) -> f64 {
        match rendition.bandwidth {
            Some(bw) if bandwidth_bps > 0.0 => segment_duration * bw as f64 / bandwidth_bps,
            _ => f64::INFINITY,
        }
    }
}

/// Inputs of one rebuffer-risk decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RebufferSettings {
    pub current_time: f64,
    pub bandwidth_bps: f64,
    /// Media duration in seconds.
    pub duration: f64,
    pub segment_duration: f64,
    pub time_until_rebuffer: f64,
    pub current_timeline: u64,
}

/// A candidate together with its predicted stall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RebufferEstimate<'a> {
    pub rendition: &'a Rendition,
    /// Predicted seconds of stall; non-positive means no rebuffering.
    pub rebuffering_impact: f64,
}

/// Highest-bandwidth rendition predicted not to rebuffer, else the one that
/// rebuffers least.
///
/// Candidates come from the filter chain in manifest order and must advertise
/// a bandwidth. A rendition without a known sync point needs an extra request
/// before playback, doubling its request time. Ties resolve by manifest order.
pub fn min_rebuffer_max_bandwidth<'a, E, R, S>(
    manifest: &'a Manifest,
    settings: &RebufferSettings,
    eligibility: &E,
    request_time: &R,
    sync_points: &S,
) -> Option<RebufferEstimate<'a>>
where
    E: Eligibility + ?Sized,
    R: RequestTimeEstimator + ?Sized,
    S: SyncPoints + ?Sized,
{
    let candidates = Candidates::in_manifest_order(&manifest.renditions, eligibility);

    let mut estimates: Vec<RebufferEstimate<'a>> = candidates
        .eligible()
        .iter()
        .filter(|r| r.bandwidth.is_some())
        .map(|&rendition| {
            let requests = match sync_points.sync_point(
                rendition,
                settings.duration,
                settings.current_timeline,
                settings.current_time,
            ) {
                Some(_) => 1.0,
                None => 2.0,
            };
            let request_secs = request_time.estimate_segment_request_time(
                settings.segment_duration,
                settings.bandwidth_bps,
                rendition,
            );
            RebufferEstimate {
                rendition,
                rebuffering_impact: request_secs * requests - settings.time_until_rebuffer,
            }
        })
        .collect();

    let mut safe: Vec<RebufferEstimate<'a>> = estimates
        .iter()
        .copied()
        .filter(|e| e.rebuffering_impact <= 0.0)
        .collect();
    stable_sort(&mut safe, |a, b| compare_bandwidth(b.rendition, a.rendition));

    if let Some(best) = safe.first().copied() {
        debug!(
            rendition = %best.rendition.id,
            impact = best.rebuffering_impact,
            safe = safe.len(),
            "min-rebuffer: switch without stall"
        );
        return Some(best);
    }

    stable_sort(&mut estimates, |a, b| {
        a.rebuffering_impact.total_cmp(&b.rebuffering_impact)
    });
    let least = estimates.first().copied();
    debug!(
        rendition = ?least.map(|e| &e.rendition.id),
        impact = ?least.map(|e| e.rebuffering_impact),
        "min-rebuffer: every switch stalls"
    );
    least
}
