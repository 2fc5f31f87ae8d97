#![forbid(unsafe_code)]

use elastic_abr::{
    AttributeInspector, EligibilityMap, Manifest, ProportionalRequestTime, RebufferSettings,
    Rendition, Resolution, lowest_bitrate_compatible_variant, min_rebuffer_max_bandwidth,
};
use elastic_test_utils::{audio_only_manifest, video_manifest};
use rstest::rstest;

use crate::common::KnownSyncPoints;

fn settings(bandwidth_bps: f64, time_until_rebuffer: f64) -> RebufferSettings {
    RebufferSettings {
        current_time: 12.0,
        bandwidth_bps,
        duration: 120.0,
        segment_duration: 2.0,
        time_until_rebuffer,
        current_timeline: 0,
    }
}

#[test]
fn min_rebuffer_takes_highest_safe_rendition() {
    let manifest = Manifest::new(
        [100, 500, 1_000]
            .into_iter()
            .map(|bw| Rendition::new(bw.to_string()).with_bandwidth(bw))
            .collect(),
    );
    let sync = KnownSyncPoints::all(&manifest.renditions);

    let pick = min_rebuffer_max_bandwidth(
        &manifest,
        &settings(1_000.0, 10.0),
        &EligibilityMap::new(),
        &ProportionalRequestTime,
        &sync,
    )
    .unwrap();
    assert_eq!(pick.rendition.id.as_str(), "1000");
    assert!(pick.rebuffering_impact <= 0.0);
}

#[rstest]
#[case(0.5, "240p")]
#[case(3.0, "480p")]
#[case(12.0, "1080p")]
fn min_rebuffer_over_video_ladder(
    video_manifest: Manifest,
    #[case] until_rebuffer: f64,
    #[case] expected: &str,
) {
    let sync = KnownSyncPoints::all(&video_manifest.renditions);
    // 2s segments over 1 Mbps: 0.8s, 1.6s, 2.8s, 5.6s, 10s
    let pick = min_rebuffer_max_bandwidth(
        &video_manifest,
        &settings(1_000_000.0, until_rebuffer),
        &EligibilityMap::new(),
        &ProportionalRequestTime,
        &sync,
    )
    .unwrap();
    assert_eq!(pick.rendition.id.as_str(), expected);
}

#[rstest]
fn unknown_sync_points_cost_an_extra_request(video_manifest: Manifest) {
    let only_low = KnownSyncPoints::all(video_manifest.renditions.iter().take(2));
    // 720p needs 5.6s; 480p without a sync point needs 2 x 2.8s
    let pick = min_rebuffer_max_bandwidth(
        &video_manifest,
        &settings(1_000_000.0, 5.0),
        &EligibilityMap::new(),
        &ProportionalRequestTime,
        &only_low,
    )
    .unwrap();
    assert_eq!(pick.rendition.id.as_str(), "360p");
}

#[test]
fn lowest_variant_prefers_video_over_cheaper_audio() {
    let manifest = Manifest::new(vec![
        Rendition::new("a").with_bandwidth(100).with_codecs("mp4a.40.2"),
        Rendition::new("b")
            .with_bandwidth(200)
            .with_codecs("avc1.4d401f,mp4a.40.2"),
        Rendition::new("c")
            .with_bandwidth(50)
            .with_resolution(Resolution::new(320, 180)),
    ]);
    let pick =
        lowest_bitrate_compatible_variant(&manifest, &EligibilityMap::new(), &AttributeInspector)
            .unwrap();
    assert_eq!(pick.id.as_str(), "c");
}

#[rstest]
fn lowest_variant_respects_user_choice(video_manifest: Manifest) {
    let mut eligibility = EligibilityMap::new();
    eligibility.disable(&"240p".into());
    let pick =
        lowest_bitrate_compatible_variant(&video_manifest, &eligibility, &AttributeInspector)
            .unwrap();
    assert_eq!(pick.id.as_str(), "360p");
}

#[rstest]
fn lowest_variant_leaves_audio_only_to_the_caller(audio_only_manifest: Manifest) {
    let pick = lowest_bitrate_compatible_variant(
        &audio_only_manifest,
        &EligibilityMap::new(),
        &AttributeInspector,
    );
    assert!(pick.is_none());
}
