//! Viewport-aware refinement of the controller's pick.

use tracing::trace;

use crate::{compare::stable_sort, types::Rendition};

/// Player element size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSize {
    pub width: f64,
    pub height: f64,
}

impl PlayerSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scales CSS pixels to device pixels. Non-positive ratios count as 1.
    #[must_use]
    pub fn scaled(self, pixel_ratio: f64) -> Self {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            width: self.width * ratio,
            height: self.height * ratio,
        }
    }

    /// Inclusive-or fit: ladders commonly constrain a single dimension.
    ///
    /// Renditions without a resolution never fit.
    pub fn fits(&self, rendition: &Rendition) -> bool {
        rendition.resolution.is_some_and(|r| {
            f64::from(r.width) <= self.width || f64::from(r.height) <= self.height
        })
    }
}

/// Picks the candidate closest in bandwidth to `target` that fits the player.
///
/// Only candidates not more expensive than `target` are considered; equal
/// distances keep candidate order.
pub fn refine_for_viewport<'a>(
    target: &Rendition,
    candidates: &[&'a Rendition],
    player: PlayerSize,
) -> Option<&'a Rendition> {
    let target_bw = target.ranked_bandwidth();
    let mut fitting: Vec<&Rendition> = candidates
        .iter()
        .copied()
        .filter(|r| r.ranked_bandwidth() <= target_bw && player.fits(r))
        .collect();

    stable_sort(&mut fitting, |a, b| {
        a.ranked_bandwidth()
            .abs_diff(target_bw)
            .cmp(&b.ranked_bandwidth().abs_diff(target_bw))
    });

    let pick = fitting.first().copied();
    trace!(
        target = %target.id,
        fitting = fitting.len(),
        pick = ?pick.map(|r| &r.id),
        "viewport refinement"
    );
    pick
}
