//! Formation-vs-formation matchup assessment.
//!
//! Each formation carries a 1-5 strength profile. Comparing an offensive
//! profile against a defensive one yields a run tier, a pass tier, and an
//! overall tier, plus key-factor labels used in narratives. Unknown
//! formation names are not an error - callers substitute a neutral
//! assessment so a single unrecognized formation never aborts a batch.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::models::play::PlayStyle;

/// Strategic advantage tier from comparing two formation profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchupTier {
    MajorAdvantage,
    MinorAdvantage,
    Neutral,
    MinorDisadvantage,
    MajorDisadvantage,
}

impl MatchupTier {
    /// Signed magnitude used for bonus lookups: +3, +1, 0, -1, -3.
    pub fn value(self) -> i32 {
        match self {
            MatchupTier::MajorAdvantage => 3,
            MatchupTier::MinorAdvantage => 1,
            MatchupTier::Neutral => 0,
            MatchupTier::MinorDisadvantage => -1,
            MatchupTier::MajorDisadvantage => -3,
        }
    }

    pub fn is_major(self) -> bool {
        matches!(self, MatchupTier::MajorAdvantage | MatchupTier::MajorDisadvantage)
    }

    fn from_differential(diff: f32) -> Self {
        if diff >= 2.0 {
            MatchupTier::MajorAdvantage
        } else if diff >= 0.5 {
            MatchupTier::MinorAdvantage
        } else if diff <= -2.0 {
            MatchupTier::MajorDisadvantage
        } else if diff <= -0.5 {
            MatchupTier::MinorDisadvantage
        } else {
            MatchupTier::Neutral
        }
    }
}

/// What an offensive formation is good at, 1-5 scale.
#[derive(Debug, Clone)]
pub struct OffenseProfile {
    pub run_blocking: u8,
    pub pass_protection: u8,
    pub route_diversity: u8,
    pub misdirection: u8,
    pub optimal_styles: &'static [PlayStyle],
}

/// What a defensive formation excels at stopping, 1-5 scale.
#[derive(Debug, Clone)]
pub struct DefenseProfile {
    pub run_defense: u8,
    pub pass_rush: u8,
    pub pass_coverage: u8,
    pub gap_control: u8,
    pub counters_styles: &'static [PlayStyle],
}

/// Result of assessing an offensive vs defensive formation pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchupAssessment {
    pub offense_formation: String,
    pub defense_formation: String,
    pub run: MatchupTier,
    pub pass: MatchupTier,
    pub overall: MatchupTier,
    pub key_factors: Vec<String>,
    pub recommended_styles: Vec<PlayStyle>,
}

impl MatchupAssessment {
    /// All-neutral assessment used when a formation name is unknown.
    pub fn neutral(offense: &str, defense: &str) -> Self {
        Self {
            offense_formation: offense.to_string(),
            defense_formation: defense.to_string(),
            run: MatchupTier::Neutral,
            pass: MatchupTier::Neutral,
            overall: MatchupTier::Neutral,
            key_factors: Vec::new(),
            recommended_styles: Vec::new(),
        }
    }
}

/// Static book of formation strength profiles.
#[derive(Debug, Clone)]
pub struct FormationBook {
    offense: HashMap<&'static str, OffenseProfile>,
    defense: HashMap<&'static str, DefenseProfile>,
}

impl Default for FormationBook {
    fn default() -> Self {
        use PlayStyle::*;

        let mut offense = HashMap::new();
        offense.insert(
            "empty_backfield",
            OffenseProfile {
                run_blocking: 1,
                pass_protection: 2,
                route_diversity: 5,
                misdirection: 3,
                optimal_styles: &[ShortPass, DeepPass, Screen],
            },
        );
        offense.insert(
            "spread_10",
            OffenseProfile {
                run_blocking: 3,
                pass_protection: 3,
                route_diversity: 4,
                misdirection: 4,
                optimal_styles: &[OutsideRun, ShortPass, Screen],
            },
        );
        offense.insert(
            "i_form",
            OffenseProfile {
                run_blocking: 5,
                pass_protection: 4,
                route_diversity: 2,
                misdirection: 3,
                optimal_styles: &[InsideRun, PlayAction],
            },
        );
        offense.insert(
            "strong_i",
            OffenseProfile {
                run_blocking: 5,
                pass_protection: 5,
                route_diversity: 1,
                misdirection: 2,
                optimal_styles: &[InsideRun, OutsideRun],
            },
        );
        offense.insert(
            "pistol_11",
            OffenseProfile {
                run_blocking: 4,
                pass_protection: 3,
                route_diversity: 3,
                misdirection: 4,
                optimal_styles: &[InsideRun, OutsideRun, PlayAction],
            },
        );
        offense.insert(
            "shotgun_11",
            OffenseProfile {
                run_blocking: 2,
                pass_protection: 4,
                route_diversity: 4,
                misdirection: 3,
                optimal_styles: &[ShortPass, DeepPass, Screen],
            },
        );
        offense.insert(
            "singleback_11",
            OffenseProfile {
                run_blocking: 4,
                pass_protection: 4,
                route_diversity: 3,
                misdirection: 3,
                optimal_styles: &[InsideRun, ShortPass, PlayAction],
            },
        );

        let mut defense = HashMap::new();
        defense.insert(
            "34_defense",
            DefenseProfile {
                run_defense: 4,
                pass_rush: 3,
                pass_coverage: 3,
                gap_control: 4,
                counters_styles: &[InsideRun, PlayAction],
            },
        );
        defense.insert(
            "dime",
            DefenseProfile {
                run_defense: 2,
                pass_rush: 4,
                pass_coverage: 5,
                gap_control: 2,
                counters_styles: &[ShortPass, DeepPass],
            },
        );
        defense.insert(
            "prevent_defense",
            DefenseProfile {
                run_defense: 1,
                pass_rush: 2,
                pass_coverage: 5,
                gap_control: 1,
                counters_styles: &[DeepPass],
            },
        );
        defense.insert(
            "goalline_defense",
            DefenseProfile {
                run_defense: 5,
                pass_rush: 5,
                pass_coverage: 1,
                gap_control: 5,
                counters_styles: &[InsideRun],
            },
        );
        defense.insert(
            "base43",
            DefenseProfile {
                run_defense: 4,
                pass_rush: 4,
                pass_coverage: 3,
                gap_control: 4,
                counters_styles: &[InsideRun, OutsideRun, ShortPass],
            },
        );
        defense.insert(
            "nickel",
            DefenseProfile {
                run_defense: 3,
                pass_rush: 4,
                pass_coverage: 4,
                gap_control: 3,
                counters_styles: &[ShortPass, Screen],
            },
        );
        defense.insert(
            "bear46",
            DefenseProfile {
                run_defense: 5,
                pass_rush: 5,
                pass_coverage: 2,
                gap_control: 5,
                counters_styles: &[InsideRun, OutsideRun],
            },
        );

        Self { offense, defense }
    }
}

impl FormationBook {
    /// Shared built-in book.
    pub fn builtin() -> &'static FormationBook {
        static BOOK: Lazy<FormationBook> = Lazy::new(FormationBook::default);
        &BOOK
    }

    pub fn offense_profile(&self, name: &str) -> Option<&OffenseProfile> {
        self.offense.get(name)
    }

    pub fn defense_profile(&self, name: &str) -> Option<&DefenseProfile> {
        self.defense.get(name)
    }

    /// Assess a pairing. Returns None when either formation is unknown.
    pub fn assess(&self, offense_name: &str, defense_name: &str) -> Option<MatchupAssessment> {
        let offense = self.offense.get(offense_name)?;
        let defense = self.defense.get(defense_name)?;

        let run_diff = offense.run_blocking as f32 - defense.run_defense as f32;
        let pass_diff = (offense.pass_protection + offense.route_diversity) as f32 / 2.0
            - (defense.pass_rush + defense.pass_coverage) as f32 / 2.0;
        let overall_diff = (run_diff + pass_diff) / 2.0;

        let run = MatchupTier::from_differential(run_diff);
        let pass = MatchupTier::from_differential(pass_diff);

        Some(MatchupAssessment {
            offense_formation: offense_name.to_string(),
            defense_formation: defense_name.to_string(),
            run,
            pass,
            overall: MatchupTier::from_differential(overall_diff),
            key_factors: key_factors(offense_name, defense_name, offense, defense, run_diff, pass_diff),
            recommended_styles: recommend_styles(offense, defense, run, pass),
        })
    }
}

fn key_factors(
    offense_name: &str,
    defense_name: &str,
    offense: &OffenseProfile,
    defense: &DefenseProfile,
    run_diff: f32,
    pass_diff: f32,
) -> Vec<String> {
    let mut factors = Vec::new();

    if run_diff >= 1.0 {
        factors.push(format!(
            "strong run blocking edge ({} vs {})",
            offense.run_blocking, defense.run_defense
        ));
    } else if run_diff <= -1.0 {
        factors.push(format!(
            "defense controls the run game ({} vs {})",
            defense.run_defense, offense.run_blocking
        ));
    }

    if pass_diff >= 1.0 {
        factors.push("passing game edge".to_string());
    } else if pass_diff <= -1.0 {
        factors.push("defense controls the passing game".to_string());
    }

    if offense.misdirection >= 4 {
        factors.push(format!("high misdirection potential from {}", offense_name));
    }
    if defense.gap_control >= 4 {
        factors.push(format!("excellent gap control from {}", defense_name));
    }

    factors
}

fn recommend_styles(
    offense: &OffenseProfile,
    defense: &DefenseProfile,
    run: MatchupTier,
    pass: MatchupTier,
) -> Vec<PlayStyle> {
    let mut recommended = Vec::new();

    if run.value() > 0 {
        recommended.extend([PlayStyle::InsideRun, PlayStyle::OutsideRun]);
    }
    if pass.value() > 0 {
        recommended.extend([PlayStyle::ShortPass, PlayStyle::DeepPass]);
    }

    // Favor what the formation is built for, unless the defense counters it.
    for style in offense.optimal_styles {
        if !recommended.contains(style) && !defense.counters_styles.contains(style) {
            recommended.push(*style);
        }
    }

    // Without a major edge, drop countered calls that did not earn their spot.
    if run != MatchupTier::MajorAdvantage {
        recommended.retain(|style| {
            !defense.counters_styles.contains(style)
                || matches!(style, PlayStyle::InsideRun | PlayStyle::OutsideRun)
        });
    }
    if pass != MatchupTier::MajorAdvantage {
        recommended.retain(|style| {
            !defense.counters_styles.contains(style)
                || matches!(style, PlayStyle::ShortPass | PlayStyle::DeepPass)
        });
    }

    recommended.truncate(4);
    recommended
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_offense_vs_light_defense_favors_run() {
        let book = FormationBook::builtin();
        let assessment = book.assess("i_form", "dime").expect("known pairing");
        // run_blocking 5 vs run_defense 2 -> major run advantage
        assert_eq!(assessment.run, MatchupTier::MajorAdvantage);
    }

    #[test]
    fn test_spread_vs_goalline_favors_pass() {
        let book = FormationBook::builtin();
        let assessment = book.assess("empty_backfield", "goalline_defense").expect("known pairing");
        // (2+5)/2 vs (5+1)/2 -> +0.5 -> minor pass advantage
        assert_eq!(assessment.pass, MatchupTier::MinorAdvantage);
        assert_eq!(assessment.run, MatchupTier::MajorDisadvantage);
    }

    #[test]
    fn test_unknown_formation_is_not_assessed() {
        let book = FormationBook::builtin();
        assert!(book.assess("wishbone", "base43").is_none());
        assert!(book.assess("i_form", "college_prevent").is_none());
    }

    #[test]
    fn test_neutral_assessment_has_no_edges() {
        let neutral = MatchupAssessment::neutral("wishbone", "base43");
        assert_eq!(neutral.run.value(), 0);
        assert_eq!(neutral.pass.value(), 0);
        assert!(neutral.key_factors.is_empty());
    }

    #[test]
    fn test_tier_values() {
        assert_eq!(MatchupTier::MajorAdvantage.value(), 3);
        assert_eq!(MatchupTier::MinorDisadvantage.value(), -1);
        assert!(MatchupTier::MajorDisadvantage.is_major());
        assert!(!MatchupTier::MinorAdvantage.is_major());
    }

    #[test]
    fn test_recommendations_avoid_countered_styles() {
        let book = FormationBook::builtin();
        let assessment = book.assess("shotgun_11", "bear46").expect("known pairing");
        // bear46 counters runs; a pass-first set should not be told to run inside.
        assert!(!assessment.recommended_styles.contains(&PlayStyle::InsideRun));
    }
}
