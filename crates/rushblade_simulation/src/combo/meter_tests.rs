//! Tests for the combo meter.

#[cfg(test)]
mod tests {
    use super::super::bonuses::ComboBonuses;
    use super::super::meter::{ComboConfig, ComboEvent, ComboMeter};
    use super::super::rank::Rank;
    use proptest::prelude::*;

    const GAP: f32 = 0.1;

    fn meter() -> ComboMeter {
        ComboMeter::new(ComboConfig {
            timeout: 1.2,
            hits_per_rank: 5,
            base_increment: 0.25,
        })
    }

    /// Register `count` hits spaced by `GAP`, starting at `start`. Returns the time of the last hit.
    fn land_hits(meter: &mut ComboMeter, start: f32, count: u32) -> f32 {
        let mut now = start;
        for i in 0..count {
            now = start + i as f32 * GAP;
            meter.register_hit(now);
        }
        now
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_fresh_meter() {
        let meter = meter();
        assert_eq!(meter.combo_level(), 0);
        assert_eq!(meter.total_hits(), 0);
        assert_eq!(meter.rank(), Rank::None);
        assert_eq!(meter.bonuses(), ComboBonuses::IDENTITY);
        assert_eq!(meter.current_max_bonus(), 0.25);
        assert_eq!(meter.hits_to_next_rank(), 5);
    }

    #[test]
    fn test_rank_d_scenario() {
        let mut meter = meter();
        let last = land_hits(&mut meter, 0.0, 5);

        assert_eq!(meter.rank(), Rank::D);
        assert_eq!(meter.total_hits(), 5);
        assert!(approx(meter.current_max_bonus(), 0.5));

        // Snapshot taken with combo = 5 against the old 0.25 ceiling.
        let saved = meter.saved_multipliers();
        assert!(approx(saved.attack_speed, 1.25));
        assert!(approx(saved.move_speed, 1.2));
        assert!(approx(saved.damage, 1.25));

        // Fresh tier: bonuses equal the new baseline.
        assert_eq!(meter.combo_level(), 0);
        assert_eq!(meter.bonuses(), saved);

        meter.register_hit(last + GAP);
        assert_eq!(meter.combo_level(), 1);
        assert_eq!(meter.total_hits(), 6);

        // bonus = 0.5 * 1/5 = 0.1 on top of the saved baseline
        let bonuses = meter.bonuses();
        assert!(approx(bonuses.attack_speed, 1.25 * 1.1));
        assert!(approx(bonuses.move_speed, 1.2 * 1.08));
        assert!(approx(bonuses.damage, 1.25 * 1.1));
    }

    #[test]
    fn test_bonuses_compound_across_ranks() {
        let mut meter = meter();
        land_hits(&mut meter, 0.0, 10);

        assert_eq!(meter.rank(), Rank::C);
        // D baseline 1.25, then a full tier at 0.5 ceiling: 1.25 * 1.5
        assert!(approx(meter.saved_multipliers().damage, 1.25 * 1.5));
        assert!(approx(meter.current_max_bonus(), 0.75));
    }

    #[test]
    fn test_rank_achieved_event_precedes_change() {
        let mut meter = meter();
        land_hits(&mut meter, 0.0, 4);
        meter.take_events();

        meter.register_hit(0.5);
        let events = meter.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ComboEvent::RankAchieved(Rank::D));
        assert!(matches!(events[1], ComboEvent::Changed { combo: 0, rank: Rank::D, .. }));
    }

    #[test]
    fn test_timeout_tick_keeps_rank_and_total() {
        let mut meter = meter();
        let last = land_hits(&mut meter, 0.0, 7);
        assert_eq!(meter.combo_level(), 2);

        meter.tick(last + 0.5);
        assert_eq!(meter.combo_level(), 2);

        meter.tick(last + 1.25);
        assert_eq!(meter.combo_level(), 0);
        assert_eq!(meter.total_hits(), 7);
        assert_eq!(meter.rank(), Rank::D);
        assert_eq!(meter.bonuses(), meter.saved_multipliers());
    }

    #[test]
    fn test_register_hit_catches_up_on_missed_timeout() {
        let mut meter = meter();
        let last = land_hits(&mut meter, 0.0, 3);

        // No tick in between: the late hit starts a new combo.
        meter.register_hit(last + 5.0);
        assert_eq!(meter.combo_level(), 1);
        assert_eq!(meter.total_hits(), 4);
    }

    #[test]
    fn test_interrupt_resets_everything() {
        let mut meter = meter();
        land_hits(&mut meter, 0.0, 17);
        assert_eq!(meter.rank(), Rank::B);

        meter.interrupt();
        assert_eq!(meter.combo_level(), 0);
        assert_eq!(meter.total_hits(), 0);
        assert_eq!(meter.rank(), Rank::None);
        assert_eq!(meter.bonuses(), ComboBonuses::IDENTITY);
        assert_eq!(meter.saved_multipliers(), ComboBonuses::IDENTITY);
        assert_eq!(meter.current_max_bonus(), 0.25);
    }

    #[test]
    fn test_terminal_rank_keeps_ceiling() {
        let mut meter = meter();
        let last = land_hits(&mut meter, 0.0, 25);
        assert_eq!(meter.rank(), Rank::S);
        let ceiling = meter.current_max_bonus();
        let baseline = meter.saved_multipliers();

        land_hits(&mut meter, last + GAP, 8);
        assert_eq!(meter.rank(), Rank::S);
        assert_eq!(meter.current_max_bonus(), ceiling);
        assert_eq!(meter.saved_multipliers(), baseline);
        assert_eq!(meter.combo_level(), 8);
        // Progress clamps at one full tier.
        assert!(approx(meter.bonuses().damage, baseline.damage * (1.0 + ceiling)));
        assert_eq!(meter.hits_to_next_rank(), 0);
        assert_eq!(meter.progress_to_next_rank(), 1.0);
    }

    #[test]
    fn test_progress_queries() {
        let mut meter = meter();
        land_hits(&mut meter, 0.0, 7);
        assert_eq!(meter.hits_to_next_rank(), 3);
        assert!(approx(meter.progress_to_next_rank(), 0.4));
    }

    #[test]
    fn test_load_from_hits_matches_uninterrupted_play() {
        let mut played = meter();
        land_hits(&mut played, 0.0, 15);

        let mut restored = meter();
        restored.load_from_hits(15);

        assert_eq!(restored.rank(), Rank::B);
        assert_eq!(restored.total_hits(), 15);
        assert_eq!(restored.combo_level(), 0);
        assert!(approx(restored.current_max_bonus(), played.current_max_bonus()));
        assert!(approx(
            restored.saved_multipliers().damage,
            played.saved_multipliers().damage
        ));
        assert!(approx(
            restored.saved_multipliers().move_speed,
            played.saved_multipliers().move_speed
        ));
    }

    #[test]
    fn test_load_from_negative_hits_clamps() {
        let mut meter = meter();
        meter.load_from_hits(-12);
        assert_eq!(meter.total_hits(), 0);
        assert_eq!(meter.rank(), Rank::None);
        assert_eq!(meter.bonuses(), ComboBonuses::IDENTITY);
    }

    proptest! {
        /// N hits inside the timeout window: total == N, rank follows thresholds.
        #[test]
        fn prop_total_and_rank_follow_hit_count(count in 0u32..60) {
            let mut meter = meter();
            land_hits(&mut meter, 0.0, count);
            prop_assert_eq!(meter.total_hits(), count);
            prop_assert_eq!(meter.rank(), Rank::from_total_hits(count, 5));
        }

        /// Rank never decreases under hits and timeouts.
        #[test]
        fn prop_rank_is_monotonic(gaps in proptest::collection::vec(0.0f32..3.0, 1..80)) {
            let mut meter = meter();
            let mut now = 0.0;
            let mut previous = meter.rank();
            for gap in gaps {
                now += gap;
                meter.tick(now);
                prop_assert!(meter.rank() >= previous);
                meter.register_hit(now);
                prop_assert!(meter.rank() >= previous);
                previous = meter.rank();
            }
        }

        /// Progress bonus is never negative.
        #[test]
        fn prop_damage_never_below_baseline(gaps in proptest::collection::vec(0.0f32..2.0, 1..60)) {
            let mut meter = meter();
            let mut now = 0.0;
            for gap in gaps {
                now += gap;
                meter.tick(now);
                meter.register_hit(now);
                prop_assert!(meter.bonuses().damage >= meter.saved_multipliers().damage);
                prop_assert!(meter.bonuses().move_speed >= meter.saved_multipliers().move_speed);
            }
        }

        /// Interrupt always lands on the identity state.
        #[test]
        fn prop_interrupt_is_total(count in 0u32..40) {
            let mut meter = meter();
            land_hits(&mut meter, 0.0, count);
            meter.interrupt();
            prop_assert_eq!(meter.combo_level(), 0);
            prop_assert_eq!(meter.total_hits(), 0);
            prop_assert_eq!(meter.rank(), Rank::None);
            prop_assert_eq!(meter.bonuses(), ComboBonuses::IDENTITY);
        }
    }
}
