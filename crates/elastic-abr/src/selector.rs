//! Primary strategy: buffer-feedback controller refined against the viewport.

use std::fmt;

use tracing::debug;

use crate::{
    clock::{Clock, SystemClock},
    config::{BandwidthSmoothing, ElasticOptions},
    controller::{ElasticController, ElasticDecision},
    eligibility::Eligibility,
    error::AbrResult,
    estimator::MovingAverageBandwidth,
    filter::Candidates,
    inspect::MediaInspector,
    ladder::BitrateLadder,
    measurement::{Measurements, SelectionContext},
    types::{Manifest, Rendition},
    viewport::refine_for_viewport,
};

/// Stage of the fallback chain that produced a pick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectionSource {
    /// Controller pick refined against the player size.
    ElasticViewport,
    /// Controller pick used as-is.
    Elastic,
    /// Lowest-bandwidth eligible rendition.
    FirstEnabled,
    /// Lowest-bandwidth compatible rendition, eligibility ignored.
    FirstCandidate,
}

impl SelectionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ElasticViewport => "elastic_viewport",
            Self::Elastic => "elastic",
            Self::FirstEnabled => "first_enabled",
            Self::FirstCandidate => "first_candidate",
        }
    }
}

impl fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selection<'a> {
    pub rendition: &'a Rendition,
    pub source: SelectionSource,
    /// Controller diagnostics for this cycle.
    pub decision: ElasticDecision,
}

/// Elastic rendition selector for one playback session.
///
/// Owns the controller state; call [`select`](Self::select) once per decision
/// cycle from a single thread.
pub struct ElasticSelector<C: Clock = SystemClock> {
    controller: ElasticController<C>,
    smoothing: Option<MovingAverageBandwidth>,
    limit_by_player: bool,
}

impl ElasticSelector<SystemClock> {
    pub fn new(options: &ElasticOptions) -> AbrResult<Self> {
        Self::with_clock(options, SystemClock)
    }
}

impl<C: Clock> ElasticSelector<C> {
    pub fn with_clock(options: &ElasticOptions, clock: C) -> AbrResult<Self> {
        let controller = ElasticController::with_clock(options, clock)?;
        Self::with_controller(options, controller)
    }

    /// Wraps an already constructed controller.
    pub fn with_controller(
        options: &ElasticOptions,
        controller: ElasticController<C>,
    ) -> AbrResult<Self> {
        options.validate()?;
        let smoothing = match options.bandwidth_smoothing {
            BandwidthSmoothing::Last => None,
            BandwidthSmoothing::MovingAverage { decay } => {
                Some(MovingAverageBandwidth::new(decay)?)
            }
        };
        Ok(Self {
            controller,
            smoothing,
            limit_by_player: options.limit_rendition_by_player_dimensions,
        })
    }

    pub fn controller(&self) -> &ElasticController<C> {
        &self.controller
    }

    /// Smoothed bandwidth, when moving-average smoothing is configured and seeded.
    pub fn smoothed_bps(&self) -> Option<f64> {
        self.smoothing.as_ref().and_then(MovingAverageBandwidth::average)
    }

    /// Restarts the session: controller state and smoothing are dropped.
    pub fn reset(&mut self) {
        self.controller.reset();
        if let Some(smoothing) = &mut self.smoothing {
            match MovingAverageBandwidth::new(smoothing.decay()) {
                Ok(fresh) => *smoothing = fresh,
                Err(_) => self.smoothing = None,
            }
        }
    }

    /// Runs one decision cycle.
    ///
    /// Audio-only manifests select among their audio tracks. `None` means no
    /// compatible rendition exists; the host keeps playing what it has.
    pub fn select<'a, E, I>(
        &mut self,
        manifest: &'a Manifest,
        ctx: &SelectionContext,
        eligibility: &E,
        inspector: &I,
    ) -> Option<Selection<'a>>
    where
        E: Eligibility + ?Sized,
        I: MediaInspector + ?Sized,
    {
        let pool = if !manifest.audio_tracks.is_empty() && inspector.is_audio_only(manifest) {
            &manifest.audio_tracks
        } else {
            &manifest.renditions
        };
        let candidates = Candidates::from_renditions(pool, eligibility);
        let ladder = BitrateLadder::new(pool);

        let bandwidth_bps = match &mut self.smoothing {
            Some(smoothing) => smoothing.update(ctx.bandwidth_bps),
            None => ctx.bandwidth_bps,
        };
        let decision = self.controller.step(
            &ladder,
            candidates.eligible(),
            ctx.buffered_secs,
            bandwidth_bps,
        );

        let elastic = decision
            .level
            .as_ref()
            .and_then(|id| pool.iter().find(|r| &r.id == id));
        let refined = match (elastic, ctx.player) {
            (Some(target), Some(player)) if self.limit_by_player => {
                refine_for_viewport(target, candidates.eligible(), player)
            }
            _ => None,
        };

        let (rendition, source) = if let Some(r) = refined {
            (r, SelectionSource::ElasticViewport)
        } else if let Some(r) = elastic {
            (r, SelectionSource::Elastic)
        } else if let Some(&r) = candidates.eligible().first() {
            (r, SelectionSource::FirstEnabled)
        } else if let Some(&r) = candidates.compatible().first() {
            (r, SelectionSource::FirstCandidate)
        } else {
            debug!(pool = pool.len(), "elastic select: no compatible rendition");
            return None;
        };

        debug!(
            rendition = %rendition.id,
            source = %source,
            bandwidth_bps,
            buffered_secs = ctx.buffered_secs,
            fallback = candidates.is_fallback(),
            "elastic select"
        );

        Some(Selection {
            rendition,
            source,
            decision,
        })
    }

    /// Reads a [`SelectionContext`] from the host and runs one cycle.
    pub fn select_with_measurements<'a, M, E, I>(
        &mut self,
        manifest: &'a Manifest,
        measurements: &M,
        options: &ElasticOptions,
        eligibility: &E,
        inspector: &I,
    ) -> Option<Selection<'a>>
    where
        M: Measurements + ?Sized,
        E: Eligibility + ?Sized,
        I: MediaInspector + ?Sized,
    {
        let ctx = SelectionContext::from_measurements(measurements, options);
        self.select(manifest, &ctx, eligibility, inspector)
    }
}
