//! In-memory host collaborators.

use std::collections::HashSet;

use elastic_abr::{
    Measurements, PlayerSize, Rendition, RenditionId, SyncPoint, SyncPoints, TimeRange,
};

/// Host measurements captured for one cycle.
#[derive(Clone, Debug)]
pub struct HostSnapshot {
    pub bandwidth_bps: f64,
    pub player: Option<PlayerSize>,
    pub pixel_ratio: f64,
    pub buffered: Vec<TimeRange>,
    pub current_time: f64,
}

impl HostSnapshot {
    pub fn new(bandwidth_bps: f64) -> Self {
        Self {
            bandwidth_bps,
            player: None,
            pixel_ratio: 1.0,
            buffered: Vec::new(),
            current_time: 0.0,
        }
    }
}

impl Measurements for HostSnapshot {
    fn bandwidth_estimate(&self) -> f64 {
        self.bandwidth_bps
    }

    fn player_size(&self) -> Option<PlayerSize> {
        self.player
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn buffered_ranges(&self) -> Vec<TimeRange> {
        self.buffered.clone()
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }
}

/// Sync points known for a fixed set of renditions.
#[derive(Clone, Debug, Default)]
pub struct KnownSyncPoints(pub HashSet<RenditionId>);

impl KnownSyncPoints {
    pub fn all<'a>(renditions: impl IntoIterator<Item = &'a Rendition>) -> Self {
        Self(renditions.into_iter().map(|r| r.id.clone()).collect())
    }
}

impl SyncPoints for KnownSyncPoints {
    fn sync_point(
        &self,
        rendition: &Rendition,
        _duration: f64,
        _timeline: u64,
        current_time: f64,
    ) -> Option<SyncPoint> {
        self.0.contains(&rendition.id).then_some(SyncPoint {
            time: current_time,
            segment_index: 0,
        })
    }
}
