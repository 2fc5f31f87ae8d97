#![forbid(unsafe_code)]

use elastic_abr::{
    AttributeInspector, BandwidthSmoothing, ElasticOptions, ElasticSelector, EligibilityMap,
    Manifest, ManualClock, PlayerSize, SelectionContext, SelectionSource, TimeRange,
    buffered_ahead, time_until_rebuffer,
};
use elastic_test_utils::video_manifest;
use rstest::rstest;

use crate::common::HostSnapshot;

fn host(bandwidth_bps: f64) -> HostSnapshot {
    HostSnapshot {
        player: Some(PlayerSize::new(640.0, 360.0)),
        buffered: vec![TimeRange::new(0.0, 6.0), TimeRange::new(20.0, 50.0)],
        current_time: 24.0,
        ..HostSnapshot::new(bandwidth_bps)
    }
}

#[test]
fn buffer_math_uses_range_under_playhead() {
    let ranges = [TimeRange::new(0.0, 6.0), TimeRange::new(20.0, 50.0)];
    assert_eq!(buffered_ahead(&ranges, 24.0), 26.0);
    assert_eq!(buffered_ahead(&ranges, 10.0), 0.0);
    assert_eq!(time_until_rebuffer(&ranges, 24.0, 2.0), 13.0);
    assert_eq!(time_until_rebuffer(&ranges, 24.0, 0.0), 26.0);
}

#[rstest]
#[case(false, 1.0, Some(PlayerSize::new(640.0, 360.0)))]
#[case(true, 1.0, Some(PlayerSize::new(640.0, 360.0)))]
#[case(true, 2.0, Some(PlayerSize::new(1280.0, 720.0)))]
#[case(false, 3.0, Some(PlayerSize::new(640.0, 360.0)))]
fn context_applies_pixel_ratio_option(
    #[case] use_ratio: bool,
    #[case] ratio: f64,
    #[case] expected: Option<PlayerSize>,
) {
    let options = ElasticOptions::default().with_use_device_pixel_ratio(use_ratio);
    let snapshot = HostSnapshot {
        pixel_ratio: ratio,
        ..host(1_000_000.0)
    };
    let ctx = SelectionContext::from_measurements(&snapshot, &options);
    assert_eq!(ctx.player, expected);
    assert_eq!(ctx.buffered_secs, 26.0);
    assert_eq!(ctx.bandwidth_bps, 1_000_000.0);
}

#[test]
fn context_ignores_player_when_limiting_is_off() {
    let options = ElasticOptions::default().with_limit_rendition_by_player_dimensions(false);
    let ctx = SelectionContext::from_measurements(&host(1_000_000.0), &options);
    assert_eq!(ctx.player, None);
}

#[rstest]
fn host_measurements_drive_selection(video_manifest: Manifest) {
    let options = ElasticOptions::default().with_use_device_pixel_ratio(true);
    let mut selector = ElasticSelector::with_clock(&options, ManualClock::new()).unwrap();

    let snapshot = HostSnapshot {
        pixel_ratio: 2.0,
        buffered: vec![TimeRange::new(0.0, 2.0)],
        current_time: 0.0,
        ..host(20_000_000.0)
    };
    let sel = selector
        .select_with_measurements(
            &video_manifest,
            &snapshot,
            &options,
            &EligibilityMap::new(),
            &AttributeInspector,
        )
        .unwrap();

    // saturated at 1080p, refined to the 1280x720 device viewport
    assert_eq!(sel.decision.level.unwrap().as_str(), "1080p");
    assert_eq!(sel.rendition.id.as_str(), "720p");
    assert_eq!(sel.source, SelectionSource::ElasticViewport);
}

#[rstest]
fn moving_average_damps_a_single_spike(video_manifest: Manifest) {
    let options = ElasticOptions::default()
        .with_limit_rendition_by_player_dimensions(false)
        .with_bandwidth_smoothing(BandwidthSmoothing::MovingAverage { decay: 0.25 });
    let clock = ManualClock::new();
    let mut selector = ElasticSelector::with_clock(&options, clock.clone()).unwrap();
    let eligibility = EligibilityMap::new();

    for bps in [1_000_000.0, 1_000_000.0, 9_000_000.0] {
        selector
            .select(
                &video_manifest,
                &SelectionContext::new(bps, 2.0),
                &eligibility,
                &AttributeInspector,
            )
            .unwrap();
        clock.advance_secs(1.0);
    }
    assert_eq!(selector.smoothed_bps(), Some(3_000_000.0));
}
