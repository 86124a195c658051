//! Resolution configuration tables.
//!
//! All tuning constants live here instead of being scattered through the
//! resolution path. The config is built once, never mutated, and reused
//! across many resolutions. Presets: `realistic()` (default) and `arcade()`
//! (bigger plays, easier explosives).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::play::PlayCategory;
use crate::models::situation::SituationBucket;

/// Discrete category of a resolved play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayOutcome {
    ExplosiveSuccess,
    BigSuccess,
    Success,
    ModerateGain,
    NoGain,
    Loss,
    BigLoss,
    Turnover,
}

impl PlayOutcome {
    /// Outcomes from best to worst - the order the threshold scan walks.
    pub const SCAN_ORDER: [PlayOutcome; 8] = [
        PlayOutcome::ExplosiveSuccess,
        PlayOutcome::BigSuccess,
        PlayOutcome::Success,
        PlayOutcome::ModerateGain,
        PlayOutcome::NoGain,
        PlayOutcome::Loss,
        PlayOutcome::BigLoss,
        PlayOutcome::Turnover,
    ];

    pub fn is_turnover(self) -> bool {
        self == PlayOutcome::Turnover
    }

    pub fn is_gain(self) -> bool {
        matches!(
            self,
            PlayOutcome::ExplosiveSuccess
                | PlayOutcome::BigSuccess
                | PlayOutcome::Success
                | PlayOutcome::ModerateGain
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayOutcome::ExplosiveSuccess => "explosive success",
            PlayOutcome::BigSuccess => "big success",
            PlayOutcome::Success => "success",
            PlayOutcome::ModerateGain => "moderate gain",
            PlayOutcome::NoGain => "no gain",
            PlayOutcome::Loss => "loss",
            PlayOutcome::BigLoss => "big loss",
            PlayOutcome::Turnover => "turnover",
        }
    }
}

/// Dice expression per coarse play category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDice {
    pub run: String,
    pub pass: String,
    pub special: String,
}

impl Default for CategoryDice {
    fn default() -> Self {
        Self { run: "2d6".to_string(), pass: "2d8".to_string(), special: "1d12".to_string() }
    }
}

impl CategoryDice {
    pub fn for_category(&self, category: PlayCategory) -> &str {
        match category {
            PlayCategory::Run => &self.run,
            PlayCategory::Pass => &self.pass,
            PlayCategory::Special => &self.special,
        }
    }
}

/// Immutable resolution tuning tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Base dice per play category.
    pub dice: CategoryDice,
    /// Minimum effective total per outcome kind.
    pub thresholds: BTreeMap<PlayOutcome, i32>,
    /// Yardage [min, max] per outcome kind.
    pub yardage: BTreeMap<PlayOutcome, (i32, i32)>,
    /// Roll bonus per formation-advantage tier value (+3, +1, 0, -1, -3).
    pub formation_bonuses: BTreeMap<i32, i32>,
    /// Roll modifier per situation bucket.
    pub situation_modifiers: BTreeMap<SituationBucket, i32>,
    /// The effective total is clamped to this band before outcome lookup.
    pub total_band: (i32, i32),
    /// Lane strength differential clamp.
    pub lane_cap: i32,
    /// Tactical net impact is clamped to +/- this before it becomes a modifier.
    pub tactical_cap: i32,
    /// Net tactical impact at or above this earns one advantage die.
    pub tactical_die_threshold: i32,
    /// Net tactical impact at or above this earns two advantage dice.
    pub tactical_die_major_threshold: i32,
    /// A single factor at or above this magnitude earns one bonus die,
    /// never more than one per category.
    pub high_impact_threshold: i32,
    /// Ceiling on extra dice per side. Practical reference value is 2.
    pub max_extra_dice: u32,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        use PlayOutcome::*;

        let thresholds = BTreeMap::from([
            (ExplosiveSuccess, 18),
            (BigSuccess, 14),
            (Success, 10),
            (ModerateGain, 7),
            (NoGain, 5),
            (Loss, 3),
            (BigLoss, 2),
            (Turnover, 1),
        ]);

        let yardage = BTreeMap::from([
            (ExplosiveSuccess, (12, 25)),
            (BigSuccess, (6, 11)),
            (Success, (3, 5)),
            (ModerateGain, (1, 2)),
            (NoGain, (0, 0)),
            (Loss, (-2, -1)),
            (BigLoss, (-5, -3)),
            (Turnover, (0, 0)),
        ]);

        let formation_bonuses =
            BTreeMap::from([(3, 3), (1, 1), (0, 0), (-1, -1), (-3, -3)]);

        let situation_modifiers = BTreeMap::from([
            (SituationBucket::FirstDown, 0),
            (SituationBucket::SecondShort, 1),
            (SituationBucket::SecondMedium, 0),
            (SituationBucket::SecondLong, -1),
            (SituationBucket::ThirdShort, 2),
            (SituationBucket::ThirdMedium, 0),
            (SituationBucket::ThirdLong, -2),
            (SituationBucket::FourthDown, -3),
            (SituationBucket::RedZone, 1),
            (SituationBucket::GoalLine, 2),
        ]);

        Self {
            dice: CategoryDice::default(),
            thresholds,
            yardage,
            formation_bonuses,
            situation_modifiers,
            total_band: (1, 24),
            lane_cap: 3,
            tactical_cap: 3,
            tactical_die_threshold: 3,
            tactical_die_major_threshold: 6,
            high_impact_threshold: 3,
            max_extra_dice: 2,
        }
    }
}

impl ResolutionConfig {
    /// Conservative tuning: average rolls produce modest gains.
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Bigger plays: explosives come easier and pay more.
    pub fn arcade() -> Self {
        let mut config = Self::default();
        config.thresholds.insert(PlayOutcome::ExplosiveSuccess, 16);
        config.thresholds.insert(PlayOutcome::BigSuccess, 13);
        config.yardage.insert(PlayOutcome::ExplosiveSuccess, (15, 35));
        config.yardage.insert(PlayOutcome::BigSuccess, (8, 14));
        config
    }

    pub fn threshold(&self, outcome: PlayOutcome) -> Option<i32> {
        self.thresholds.get(&outcome).copied()
    }

    pub fn yardage_range(&self, outcome: PlayOutcome) -> Option<(i32, i32)> {
        self.yardage.get(&outcome).copied()
    }

    /// Missing tiers fall back to no bonus.
    pub fn formation_bonus(&self, tier_value: i32) -> i32 {
        self.formation_bonuses.get(&tier_value).copied().unwrap_or(0)
    }

    /// Missing buckets fall back to no modifier.
    pub fn situation_modifier(&self, bucket: SituationBucket) -> i32 {
        self.situation_modifiers.get(&bucket).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_cover_every_outcome() {
        let config = ResolutionConfig::default();
        for outcome in PlayOutcome::SCAN_ORDER {
            assert!(config.threshold(outcome).is_some(), "missing threshold for {:?}", outcome);
            assert!(config.yardage_range(outcome).is_some(), "missing yardage for {:?}", outcome);
        }
    }

    #[test]
    fn test_thresholds_descend_in_scan_order() {
        let config = ResolutionConfig::default();
        let values: Vec<i32> =
            PlayOutcome::SCAN_ORDER.iter().map(|o| config.threshold(*o).unwrap()).collect();
        for pair in values.windows(2) {
            assert!(pair[0] > pair[1], "thresholds must strictly descend: {:?}", values);
        }
    }

    #[test]
    fn test_average_run_roll_is_a_modest_gain() {
        // 2d6 averages 7; with zero modifiers that lands in ModerateGain.
        let config = ResolutionConfig::default();
        assert_eq!(config.threshold(PlayOutcome::ModerateGain), Some(7));
    }

    #[test]
    fn test_arcade_lowers_the_explosive_bar() {
        let realistic = ResolutionConfig::realistic();
        let arcade = ResolutionConfig::arcade();
        assert!(
            arcade.threshold(PlayOutcome::ExplosiveSuccess)
                < realistic.threshold(PlayOutcome::ExplosiveSuccess)
        );
        let (_, arcade_max) = arcade.yardage_range(PlayOutcome::ExplosiveSuccess).unwrap();
        let (_, realistic_max) = realistic.yardage_range(PlayOutcome::ExplosiveSuccess).unwrap();
        assert!(arcade_max > realistic_max);
    }

    #[test]
    fn test_missing_rows_degrade_to_zero() {
        let config = ResolutionConfig::default();
        assert_eq!(config.formation_bonus(2), 0, "unknown tier value has no bonus");
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ResolutionConfig::arcade();
        let json = serde_json::to_string(&config).unwrap();
        let back: ResolutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
