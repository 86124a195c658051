//! Lane strength scoring and lane selection.
//!
//! All functions are pure - they take alignment snapshots as input and
//! return scores, so matchup math is unit-testable without a full engine.

use rand::Rng;

use crate::models::formation::{DefenseAlignment, Lane, OffenseAlignment};
use crate::models::play::PlayStyle;

/// Offensive strength minus defensive point-of-attack pressure in a lane,
/// clamped to [-cap, +cap].
pub fn lane_modifier(
    off: &OffenseAlignment,
    def: &DefenseAlignment,
    lane: Lane,
    cap: i32,
) -> i32 {
    let raw = off.lane_strength(lane) as i32 - def.lane_pressure(lane) as i32;
    raw.clamp(-cap, cap)
}

/// Target lane for a play call.
///
/// Inside runs always hit the middle. Outside runs and deep passes attack
/// the heavier outside lane, with a coin flip on ties. Short passes and
/// screens go where the immediate targets are, biased to the middle on ties.
pub fn lane_for_call(style: PlayStyle, off: &OffenseAlignment, rng: &mut impl Rng) -> Lane {
    match style {
        PlayStyle::InsideRun | PlayStyle::PlayAction => Lane::Middle,
        PlayStyle::OutsideRun | PlayStyle::DeepPass => {
            let left = off.immediate_targets(Lane::Left);
            let right = off.immediate_targets(Lane::Right);
            if left > right {
                Lane::Left
            } else if right > left {
                Lane::Right
            } else if rng.gen_bool(0.5) {
                Lane::Left
            } else {
                Lane::Right
            }
        }
        PlayStyle::ShortPass | PlayStyle::Screen => {
            busiest_lane(off)
        }
    }
}

/// Lane with the most immediate targets; the middle wins ties.
fn busiest_lane(off: &OffenseAlignment) -> Lane {
    let mut best = Lane::Middle;
    let mut best_heat = off.immediate_targets(Lane::Middle);
    for lane in [Lane::Left, Lane::Right] {
        let heat = off.immediate_targets(lane);
        if heat > best_heat {
            best = lane;
            best_heat = heat;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::formation::{DefensiveDepth, OffensiveDepth};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn balanced_front() -> (OffenseAlignment, DefenseAlignment) {
        let off = OffenseAlignment::new()
            .with(Lane::Middle, OffensiveDepth::Line, 3)
            .with(Lane::Middle, OffensiveDepth::Backfield, 1);
        let def = DefenseAlignment::new()
            .with(Lane::Middle, DefensiveDepth::Line, 2)
            .with(Lane::Middle, DefensiveDepth::Box, 2);
        (off, def)
    }

    #[test]
    fn test_balanced_front_is_neutral() {
        let (off, def) = balanced_front();
        assert_eq!(lane_modifier(&off, &def, Lane::Middle, 3), 0);
    }

    #[test]
    fn test_modifier_clamps_to_cap() {
        let off = OffenseAlignment::new().with(Lane::Left, OffensiveDepth::Line, 9);
        let def = DefenseAlignment::new().with(Lane::Right, DefensiveDepth::Box, 9);
        assert_eq!(lane_modifier(&off, &def, Lane::Left, 3), 3);
        assert_eq!(lane_modifier(&off, &def, Lane::Right, 3), -3);
    }

    #[test]
    fn test_deep_defenders_do_not_contest_the_lane() {
        let off = OffenseAlignment::new().with(Lane::Middle, OffensiveDepth::Line, 2);
        let def = DefenseAlignment::new().with(Lane::Middle, DefensiveDepth::Deep, 4);
        assert_eq!(lane_modifier(&off, &def, Lane::Middle, 3), 2);
    }

    #[test]
    fn test_inside_run_fixes_middle() {
        let (off, _) = balanced_front();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(lane_for_call(PlayStyle::InsideRun, &off, &mut rng), Lane::Middle);
        }
    }

    #[test]
    fn test_outside_run_attacks_heavy_side() {
        let off = OffenseAlignment::new()
            .with(Lane::Left, OffensiveDepth::Wide, 2)
            .with(Lane::Right, OffensiveDepth::Wide, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(lane_for_call(PlayStyle::OutsideRun, &off, &mut rng), Lane::Left);
    }

    #[test]
    fn test_outside_run_tie_break_is_outside() {
        let off = OffenseAlignment::new()
            .with(Lane::Left, OffensiveDepth::Wide, 1)
            .with(Lane::Right, OffensiveDepth::Wide, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..20 {
            let lane = lane_for_call(PlayStyle::DeepPass, &off, &mut rng);
            assert_ne!(lane, Lane::Middle, "deep pass tie-break must stay outside");
        }
    }

    #[test]
    fn test_short_pass_prefers_middle_on_ties() {
        let off = OffenseAlignment::new()
            .with(Lane::Left, OffensiveDepth::Wide, 2)
            .with(Lane::Middle, OffensiveDepth::Backfield, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(lane_for_call(PlayStyle::ShortPass, &off, &mut rng), Lane::Middle);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the lane modifier never escapes [-cap, +cap].
            #[test]
            fn prop_lane_modifier_bounded(
                strength in 0u8..12,
                pressure in 0u8..12,
                cap in 1i32..5
            ) {
                let off = OffenseAlignment::new()
                    .with(Lane::Middle, OffensiveDepth::Line, strength);
                let def = DefenseAlignment::new()
                    .with(Lane::Middle, DefensiveDepth::Box, pressure);
                let modifier = lane_modifier(&off, &def, Lane::Middle, cap);
                prop_assert!(modifier >= -cap && modifier <= cap);
            }
        }
    }
}
