//! Lowest-bitrate video fallback.

use tracing::debug;

use crate::{
    eligibility::Eligibility,
    filter::Candidates,
    inspect::MediaInspector,
    types::{Manifest, Rendition},
};

/// Cheapest enabled rendition that carries video.
///
/// Exclusions are honoured here without the user-choice fallback; `None`
/// leaves audio-only playback to the caller.
pub fn lowest_bitrate_compatible_variant<'a, E, I>(
    manifest: &'a Manifest,
    eligibility: &E,
    inspector: &I,
) -> Option<&'a Rendition>
where
    E: Eligibility + ?Sized,
    I: MediaInspector + ?Sized,
{
    let candidates = Candidates::from_renditions(&manifest.renditions, eligibility);
    let pick = candidates
        .enabled()
        .iter()
        .copied()
        .find(|r| inspector.codecs_for(manifest, r).has_video());

    debug!(
        enabled = candidates.enabled().len(),
        rendition = ?pick.map(|r| &r.id),
        "lowest compatible variant"
    );
    pick
}
