//! Rendition ladders and manifests.

use elastic_abr::{Manifest, Rendition, Resolution};
use rstest::fixture;

pub const VIDEO_CODECS: &str = "avc1.64001f,mp4a.40.2";
pub const AUDIO_CODECS: &str = "mp4a.40.2";

/// Video rendition with bandwidth, resolution and H.264/AAC codecs.
pub fn video(id: &str, bandwidth: u64, width: u32, height: u32) -> Rendition {
    Rendition::new(id)
        .with_bandwidth(bandwidth)
        .with_resolution(Resolution::new(width, height))
        .with_codecs(VIDEO_CODECS)
}

pub fn audio(id: &str, bandwidth: u64) -> Rendition {
    Rendition::new(id)
        .with_bandwidth(bandwidth)
        .with_codecs(AUDIO_CODECS)
}

/// Five-step 16:9 ladder, 240p to 1080p, in ascending bandwidth.
pub fn ladder_renditions() -> Vec<Rendition> {
    vec![
        video("240p", 400_000, 426, 240),
        video("360p", 800_000, 640, 360),
        video("480p", 1_400_000, 854, 480),
        video("720p", 2_800_000, 1280, 720),
        video("1080p", 5_000_000, 1920, 1080),
    ]
}

#[fixture]
pub fn ladder() -> Vec<Rendition> {
    ladder_renditions()
}

/// The ladder in shuffled manifest order.
#[fixture]
pub fn shuffled_manifest() -> Manifest {
    let mut renditions = ladder_renditions();
    renditions.swap(0, 3);
    renditions.swap(1, 4);
    Manifest::new(renditions)
}

#[fixture]
pub fn video_manifest() -> Manifest {
    Manifest::new(ladder_renditions())
}

/// Audio-only variants plus their alternate audio tracks.
#[fixture]
pub fn audio_only_manifest() -> Manifest {
    Manifest::new(vec![audio("main", 128_000)]).with_audio_tracks(vec![
        audio("aac-48", 48_000),
        audio("aac-96", 96_000),
        audio("aac-192", 192_000),
    ])
}
