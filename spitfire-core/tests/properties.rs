//! Property tests for input filtering, flow mapping and mode handling.
//!
//! Host only: these pull in proptest and std.

use proptest::prelude::*;
use spitfire_core::config::{ControlCurve, PumpConfig};
use spitfire_core::flow::FlowMapper;
use spitfire_core::input::{Debouncer, Edge, MomentarySwitch, Requests, SwitchReader};
use spitfire_core::state::{spit_duration_ms, Mode, ModeController, ModeInputs};

const HOLD_MS: u32 = 30;

fn curve() -> impl Strategy<Value = ControlCurve> {
    prop_oneof![Just(ControlCurve::Linear), Just(ControlCurve::Exponential)]
}

// ── Debounce ─────────────────────────────────────────────────

proptest! {
    /// Chatter where no level is held for the hold time never produces an
    /// edge, whatever the sampling pattern inside each bounce.
    #[test]
    fn bounce_shorter_than_hold_is_ignored(
        bounces in proptest::collection::vec((1u32..HOLD_MS, 1u32..4), 1..40),
        start in any::<u32>(),
    ) {
        let mut db = Debouncer::new(false, HOLD_MS);
        let mut now = start;
        let mut level = true;

        for (duration, samples) in bounces {
            // Sample spread over [now, now + duration)
            for i in 0..samples {
                let t = now.wrapping_add(i * (duration - 1) / samples.max(1));
                prop_assert_eq!(db.update(level, t), None);
            }
            now = now.wrapping_add(duration);
            level = !level;
        }

        // Settle back on the original level
        prop_assert_eq!(db.update(false, now), None);
        prop_assert!(!db.level());
    }

    /// A momentary switch never toggles under chatter shorter than the hold.
    #[test]
    fn momentary_latch_survives_bounce(
        durations in proptest::collection::vec(1u32..HOLD_MS, 1..40),
    ) {
        let mut sw = MomentarySwitch::new(HOLD_MS);
        let mut now = 0u32;
        let mut level = true;

        for duration in durations {
            let state = sw.update(level, now);
            prop_assert!(!state.active);
            prop_assert_eq!(state.request_edge(), None);
            now += duration;
            level = !level;
        }
        sw.update(false, now);
        prop_assert!(!sw.is_active());
    }

    /// A level held past the hold time always produces exactly one edge.
    #[test]
    fn held_level_produces_one_edge(hold in 0u32..200, extra in 0u32..500) {
        let mut db = Debouncer::new(false, hold);
        let mut edges = 0;

        for t in 0..=(hold + extra) {
            if let Some(edge) = db.update(true, t) {
                prop_assert_eq!(edge, Edge::Rising);
                edges += 1;
            }
        }
        prop_assert_eq!(edges, 1);
    }
}

// ── Flow mapping ─────────────────────────────────────────────

proptest! {
    /// Every mapped interval lies within the configured bounds, and the
    /// motor is disabled exactly below the minimum flow fraction.
    #[test]
    fn interval_within_bounds(
        pct in 0.0f32..=1.0,
        curve in curve(),
        min_ml in 1u16..100,
        span in 1u16..400,
        min_interval in 20u32..2000,
    ) {
        let config = PumpConfig {
            control_curve: curve,
            min_ml_per_hour: min_ml,
            max_ml_per_hour: min_ml + span,
            min_flow_interval_us: min_interval,
            ..Default::default()
        };
        let mapper = FlowMapper::new(&config);

        match mapper.interval(pct) {
            Some(interval) => {
                prop_assert!(pct >= config.min_flow_fraction());
                prop_assert!(interval >= mapper.min_interval());
                prop_assert!(interval <= mapper.max_interval());
            }
            None => prop_assert!(pct < config.min_flow_fraction()),
        }
    }

    /// Turning the knob up never lengthens the interval.
    #[test]
    fn interval_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0, curve in curve()) {
        let mapper = FlowMapper::new(&PumpConfig {
            control_curve: curve,
            ..Default::default()
        });
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        if let (Some(slow), Some(fast)) = (mapper.interval(lo), mapper.interval(hi)) {
            prop_assert!(fast <= slow);
        }
    }

    /// Full demand always runs at the shortest mist interval.
    #[test]
    fn full_demand_hits_min_interval(curve in curve(), min_interval in 20u32..2000) {
        let mapper = FlowMapper::new(&PumpConfig {
            control_curve: curve,
            min_flow_interval_us: min_interval,
            ..Default::default()
        });
        prop_assert_eq!(mapper.interval(1.0), Some(min_interval));
    }
}

// ── Spit timing ──────────────────────────────────────────────

proptest! {
    /// The spit duration stays within its bounds for any reading.
    #[test]
    fn spit_duration_within_bounds(
        pct in any::<f32>(),
        min in 0u32..100_000,
        span in 0u32..100_000,
    ) {
        let max = min + span;
        let duration = spit_duration_ms(pct, min, max);
        prop_assert!(duration >= min);
        prop_assert!(duration <= max);
    }
}

// ── Mode handling ────────────────────────────────────────────

fn cycle(fast: bool, mist_edge: Option<Edge>) -> ModeInputs {
    ModeInputs {
        requests: Requests {
            fast,
            mist: false,
            mist_edge,
            air: false,
        },
        mist_flowing: true,
        spit_percent: 0.5,
    }
}

proptest! {
    /// Holding and releasing Fast returns to the mode it interrupted.
    #[test]
    fn fast_round_trip(toggles in 0usize..6, held in 1u32..50, idle in 0u32..20) {
        let mut mc = ModeController::new(&PumpConfig {
            spit_on_mist_start: false,
            ..Default::default()
        });
        let mut now = 0u32;

        // Reach Off or Mist through mist edges
        for i in 0..toggles {
            let edge = if i % 2 == 0 { Edge::Rising } else { Edge::Falling };
            mc.update(&cycle(false, Some(edge)), now);
            now += 10;
        }
        for _ in 0..idle {
            mc.update(&cycle(false, None), now);
            now += 10;
        }

        let before = mc.mode();
        prop_assert!(before == Mode::Off || before == Mode::Mist);

        for _ in 0..held {
            mc.update(&cycle(true, None), now);
            prop_assert_eq!(mc.mode(), Mode::Fast);
            now += 10;
        }

        mc.update(&cycle(false, None), now);
        prop_assert_eq!(mc.mode(), before);
    }
}
