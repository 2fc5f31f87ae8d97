//! Rendition filter chain: compatibility, then eligibility with a user-choice fallback.

use tracing::trace;

use crate::{
    compare::{compare_bandwidth, stable_sort},
    eligibility::Eligibility,
    types::Rendition,
};

/// Result of running the filter chain over a rendition set.
#[derive(Clone, Debug, Default)]
pub struct Candidates<'a> {
    compatible: Vec<&'a Rendition>,
    enabled: Vec<&'a Rendition>,
    not_disabled: Vec<&'a Rendition>,
}

impl<'a> Candidates<'a> {
    /// Runs the chain and orders every list by ascending bandwidth (stable).
    pub fn from_renditions<E>(renditions: &'a [Rendition], eligibility: &E) -> Self
    where
        E: Eligibility + ?Sized,
    {
        let mut sorted: Vec<&Rendition> = renditions.iter().collect();
        stable_sort(&mut sorted, |a, b| compare_bandwidth(a, b));
        Self::build(sorted, eligibility)
    }

    /// Runs the chain keeping manifest order.
    pub fn in_manifest_order<E>(renditions: &'a [Rendition], eligibility: &E) -> Self
    where
        E: Eligibility + ?Sized,
    {
        Self::build(renditions.iter().collect(), eligibility)
    }

    fn build<E>(all: Vec<&'a Rendition>, eligibility: &E) -> Self
    where
        E: Eligibility + ?Sized,
    {
        let compatible: Vec<&Rendition> = all
            .into_iter()
            .filter(|r| !eligibility.is_incompatible(r))
            .collect();
        let enabled: Vec<&Rendition> = compatible
            .iter()
            .copied()
            .filter(|r| eligibility.is_enabled(r))
            .collect();
        let not_disabled: Vec<&Rendition> = compatible
            .iter()
            .copied()
            .filter(|r| !eligibility.is_disabled(r))
            .collect();

        trace!(
            compatible = compatible.len(),
            enabled = enabled.len(),
            not_disabled = not_disabled.len(),
            "filtered renditions"
        );

        Self {
            compatible,
            enabled,
            not_disabled,
        }
    }

    /// Every rendition that is not incompatible.
    pub fn compatible(&self) -> &[&'a Rendition] {
        &self.compatible
    }

    /// Compatible renditions that are neither disabled nor excluded.
    pub fn enabled(&self) -> &[&'a Rendition] {
        &self.enabled
    }

    /// Compatible renditions the user has not disabled, exclusions ignored.
    pub fn not_disabled(&self) -> &[&'a Rendition] {
        &self.not_disabled
    }

    /// The set selection works from.
    ///
    /// Temporary exclusions never leave the user without a playable option:
    /// when nothing is enabled, everything the user has not disabled is eligible.
    pub fn eligible(&self) -> &[&'a Rendition] {
        if self.enabled.is_empty() {
            &self.not_disabled
        } else {
            &self.enabled
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.enabled.is_empty() && !self.not_disabled.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.compatible.is_empty()
    }
}
