#![forbid(unsafe_code)]

use elastic_abr::{
    BitrateLadder, BufferZone, ElasticController, ElasticOptions, ElasticReason, HarmonicFilter,
    ManualClock, RateTarget, Rendition, Saturation,
};
use elastic_test_utils::{BandwidthTrace, SplitMix64, ladder};
use rstest::rstest;

fn controller(clock: &ManualClock) -> ElasticController<ManualClock> {
    ElasticController::with_clock(&ElasticOptions::default(), clock.clone()).unwrap()
}

fn level_bandwidth(ladder: &[Rendition], id: &str) -> u64 {
    ladder
        .iter()
        .find(|r| r.id.as_str() == id)
        .map(Rendition::ranked_bandwidth)
        .unwrap()
}

#[rstest]
#[case(524_288.0)]
#[case(2_097_152.0)]
#[case(8_388_608.0)]
fn harmonic_filter_of_constant_samples_is_exact(#[case] k: f64) {
    let mut filter = HarmonicFilter::new(3);
    for _ in 0..3 {
        filter.push(k, f64::INFINITY);
    }
    assert_eq!(filter.estimate_bps(), k);
}

#[rstest]
#[case(10.0)]
#[case(17.5)]
#[case(30.0)]
fn dead_zone_holds_level_under_any_bandwidth(ladder: Vec<Rendition>, #[case] queue: f64) {
    let clock = ManualClock::new();
    let mut c = controller(&clock);
    let levels = BitrateLadder::new(&ladder);
    let eligible = levels.levels().to_vec();

    let first = c.step(&levels, &eligible, 2.0, 2_000_000.0);
    let held = first.level.clone().unwrap();

    let mut rng = SplitMix64::new(11);
    for _ in 0..50 {
        clock.advance_secs(1.0 + 4.0 * rng.unit());
        let bps = 50_000.0 + 80_000_000.0 * rng.unit();
        let d = c.step(&levels, &eligible, queue, bps);
        assert_eq!(d.zone, BufferZone::DeadZone);
        assert_eq!(d.reason, ElasticReason::DeadZoneHold);
        assert_eq!(d.level.as_ref(), Some(&held));
    }
}

#[rstest]
fn above_high_watermark_never_downgrades(ladder: Vec<Rendition>) {
    let clock = ManualClock::new();
    let mut c = controller(&clock);
    let levels = BitrateLadder::new(&ladder);
    let eligible = levels.levels().to_vec();

    let mut previous = level_bandwidth(
        &ladder,
        c.step(&levels, &eligible, 2.0, 1_200_000.0)
            .level
            .unwrap()
            .as_str(),
    );

    let mut bps = 1_200_000.0;
    for _ in 0..40 {
        clock.advance_secs(4.0);
        bps *= 0.8;
        let d = c.step(&levels, &eligible, 45.0, bps);
        assert_eq!(d.zone, BufferZone::Above);
        let current = level_bandwidth(&ladder, d.level.unwrap().as_str());
        assert!(current >= previous);
        previous = current;
    }

    // below the low watermark the controller may step down again
    clock.advance_secs(4.0);
    let d = c.step(&levels, &eligible, 5.0, 300_000.0);
    assert_eq!(d.zone, BufferZone::Below);
    assert_eq!(d.level.unwrap().as_str(), "240p");
}

#[rstest]
#[case(0.0)]
#[case(5.0)]
#[case(9.9)]
#[case(30.5)]
#[case(120.0)]
fn saturation_clamps_to_ladder_ends(ladder: Vec<Rendition>, #[case] queue: f64) {
    let levels = BitrateLadder::new(&ladder);
    let eligible = levels.levels().to_vec();

    let clock = ManualClock::new();
    let mut c = controller(&clock);
    let d = c.step(&levels, &eligible, queue, 1e12);
    assert_eq!(d.target, Some(RateTarget::Saturated(Saturation::High)));
    assert_eq!(d.level.unwrap().as_str(), "1080p");

    let clock = ManualClock::new();
    let mut c = controller(&clock);
    let d = c.step(&levels, &eligible, queue, 1.0);
    assert_eq!(d.target, Some(RateTarget::Saturated(Saturation::Low)));
    assert_eq!(d.level.unwrap().as_str(), "240p");
}

#[rstest]
fn noisy_session_stays_within_ladder(ladder: Vec<Rendition>) {
    let clock = ManualClock::new();
    let mut c = controller(&clock);
    let levels = BitrateLadder::new(&ladder);
    let eligible = levels.levels().to_vec();

    let trace = BandwidthTrace::new(3, 0.9)
        .phase(100_000.0, 30)
        .phase(40_000_000.0, 30)
        .samples();
    let mut rng = SplitMix64::new(21);
    for bps in trace {
        clock.advance_secs(4.0);
        let queue = 60.0 * rng.unit();
        let d = c.step(&levels, &eligible, queue, bps);
        if let Some(id) = d.level {
            assert!(levels.contains(&id));
        }
    }
}

#[rstest]
fn reset_restarts_cold(ladder: Vec<Rendition>) {
    let clock = ManualClock::new();
    let mut c = controller(&clock);
    let levels = BitrateLadder::new(&ladder);
    let eligible = levels.levels().to_vec();

    c.step(&levels, &eligible, 2.0, 2_000_000.0);
    clock.advance_secs(4.0);
    c.step(&levels, &eligible, 9.0, 2_000_000.0);
    assert!(!c.state().is_cold_start());

    c.reset();
    assert!(c.state().is_cold_start());
    assert!(c.state().last_level().is_none());
    assert_eq!(c.state().filtered_bps(), 0.0);
}
