//! Externally-owned rendition eligibility.
//!
//! The selection core never mutates eligibility; it only asks the host through
//! [`Eligibility`]. [`EligibilityMap`] is a ready-made host side store keyed by
//! rendition id.

use std::collections::HashMap;

use crate::types::{Rendition, RenditionId};

/// Predicates over host-maintained eligibility state.
#[cfg_attr(test, unimock::unimock(api = EligibilityMock))]
pub trait Eligibility {
    /// Permanently unusable (e.g. unsupported codec configuration).
    fn is_incompatible(&self, rendition: &Rendition) -> bool;

    /// Neither disabled by the user nor temporarily excluded.
    fn is_enabled(&self, rendition: &Rendition) -> bool;

    /// Explicitly disabled by the user.
    fn is_disabled(&self, rendition: &Rendition) -> bool;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Flags {
    incompatible: bool,
    user_disabled: bool,
    temporarily_excluded: bool,
}

/// Id-keyed eligibility flags. Renditions without an entry are enabled and compatible.
#[derive(Clone, Debug, Default)]
pub struct EligibilityMap {
    flags: HashMap<RenditionId, Flags>,
}

impl EligibilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, id: &RenditionId) -> &mut Flags {
        self.flags.entry(id.clone()).or_default()
    }

    fn get(&self, id: &RenditionId) -> Flags {
        self.flags.get(id).copied().unwrap_or_default()
    }

    /// User disables a rendition (representations API).
    pub fn disable(&mut self, id: &RenditionId) {
        self.entry(id).user_disabled = true;
    }

    pub fn enable(&mut self, id: &RenditionId) {
        self.entry(id).user_disabled = false;
    }

    /// Temporary exclusion after a playback error.
    pub fn exclude(&mut self, id: &RenditionId) {
        self.entry(id).temporarily_excluded = true;
    }

    pub fn clear_exclusion(&mut self, id: &RenditionId) {
        self.entry(id).temporarily_excluded = false;
    }

    pub fn mark_incompatible(&mut self, id: &RenditionId) {
        self.entry(id).incompatible = true;
    }

    /// Drops every temporary exclusion, keeping user and compatibility flags.
    pub fn clear_all_exclusions(&mut self) {
        for flags in self.flags.values_mut() {
            flags.temporarily_excluded = false;
        }
    }
}

impl Eligibility for EligibilityMap {
    fn is_incompatible(&self, rendition: &Rendition) -> bool {
        self.get(&rendition.id).incompatible
    }

    fn is_enabled(&self, rendition: &Rendition) -> bool {
        let flags = self.get(&rendition.id);
        !flags.user_disabled && !flags.temporarily_excluded
    }

    fn is_disabled(&self, rendition: &Rendition) -> bool {
        self.get(&rendition.id).user_disabled
    }
}
