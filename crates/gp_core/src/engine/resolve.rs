//! Play resolution.
//!
//! Composes the formation matchup, lane scoring, tactical analysis, and
//! situational context into one advantage-aware dice roll and an outcome
//! lookup. Missing domain data (unknown formation pairing, absent table
//! rows) never aborts a resolution - it degrades to a documented default
//! and logs. Only a malformed dice expression is fatal.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::analyzer::{self, PlayAnalysis};
use crate::engine::config::{PlayOutcome, ResolutionConfig};
use crate::engine::dice::DiceExpression;
use crate::engine::lanes;
use crate::engine::matchup::{FormationBook, MatchupAssessment, MatchupTier};
use crate::error::Result;
use crate::models::formation::{DefenseAlignment, Lane, OffenseAlignment};
use crate::models::play::{DefensiveCall, PlayCall, PlayCategory};
use crate::models::situation::Situation;

/// Yardage used when the config is missing the chosen outcome's row.
const FALLBACK_YARDAGE: (i32, i32) = (1, 2);

/// Named modifiers applied to the dice roll, kept separate so callers can
/// reconstruct how the total was computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierBreakdown {
    /// Formation-advantage tier bonus.
    pub formation: i32,
    /// Down/distance/field-position bucket modifier.
    pub situation: i32,
    /// Pre-snap complexity: offensive motion and shifts, minus defensive
    /// counter-shifts.
    pub complexity: i32,
    /// Tactical net impact, clamped to the configured cap.
    pub tactical: i32,
    /// Lane strength vs point-of-attack pressure.
    pub lane: i32,
}

impl ModifierBreakdown {
    pub fn total(&self) -> i32 {
        self.formation + self.situation + self.complexity + self.tactical + self.lane
    }
}

/// Result of resolving one play. Created fresh per call, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayResult {
    pub outcome: PlayOutcome,
    pub yards_gained: i32,
    /// Raw (advantage-aware) dice roll before modifiers.
    pub dice_roll: i32,
    pub total_modifier: i32,
    /// Roll plus modifiers, clamped to the configured band.
    pub final_total: i32,
    pub breakdown: ModifierBreakdown,
    pub advantage_dice: u32,
    pub disadvantage_dice: u32,
    pub lane: Lane,
    pub matchup: MatchupAssessment,
    pub analysis: PlayAnalysis,
    pub description: String,
}

/// Resolves plays against an immutable config and formation book.
#[derive(Debug, Clone)]
pub struct PlayResolutionEngine {
    config: ResolutionConfig,
    book: FormationBook,
}

impl Default for PlayResolutionEngine {
    fn default() -> Self {
        Self::new(ResolutionConfig::default())
    }
}

impl PlayResolutionEngine {
    pub fn new(config: ResolutionConfig) -> Self {
        Self { config, book: FormationBook::default() }
    }

    pub fn with_book(config: ResolutionConfig, book: FormationBook) -> Self {
        Self { config, book }
    }

    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    /// Resolve one play. Pure in (inputs, RNG stream): the same seed and
    /// call sequence reproduces the same result.
    pub fn resolve_play(
        &self,
        offense: &PlayCall,
        defense: &DefensiveCall,
        off_alignment: &OffenseAlignment,
        def_alignment: &DefenseAlignment,
        situation: &Situation,
        rng: &mut impl Rng,
    ) -> Result<PlayResult> {
        let category = offense.category();

        // 1. Formation matchup; unknown pairings degrade to neutral.
        let matchup = self.book.assess(&offense.formation, &defense.formation).unwrap_or_else(|| {
            log::debug!(
                "unknown formation pairing {} vs {}, using neutral matchup",
                offense.formation,
                defense.formation
            );
            MatchupAssessment::neutral(&offense.formation, &defense.formation)
        });
        let tier = match category {
            PlayCategory::Run => matchup.run,
            PlayCategory::Pass => matchup.pass,
            PlayCategory::Special => matchup.overall,
        };

        // 2. Assignment-level analysis.
        let analysis = analyzer::analyze(offense, defense);

        // 3. Lane selection and named modifiers.
        let lane = lanes::lane_for_call(offense.style, off_alignment, rng);
        let breakdown = ModifierBreakdown {
            formation: self.config.formation_bonus(tier.value()),
            situation: self.config.situation_modifier(situation.bucket()),
            complexity: complexity_modifier(offense, defense),
            tactical: analysis
                .net_impact
                .clamp(-self.config.tactical_cap, self.config.tactical_cap),
            lane: lanes::lane_modifier(off_alignment, def_alignment, lane, self.config.lane_cap),
        };

        // 4-5. Advantage-aware roll.
        let (advantage, disadvantage) = self.dice_advantage(tier, &analysis);
        let expr: DiceExpression = self.config.dice.for_category(category).parse()?;
        let dice_roll = expr.roll_with_advantage(rng, advantage, disadvantage);

        // 6. Clamp the effective total.
        let total_modifier = breakdown.total();
        let (band_min, band_max) = self.config.total_band;
        let final_total = (dice_roll + total_modifier).clamp(band_min, band_max);

        // 7-8. Outcome and yardage.
        let outcome = self.outcome_for_total(final_total);
        let yards_gained = self.draw_yardage(outcome, rng);

        // 9. Narrative.
        let description = describe(offense, defense, outcome, yards_gained, &matchup, &analysis);

        Ok(PlayResult {
            outcome,
            yards_gained,
            dice_roll,
            total_modifier,
            final_total,
            breakdown,
            advantage_dice: advantage,
            disadvantage_dice: disadvantage,
            lane,
            matchup,
            analysis,
            description,
        })
    }

    /// Extra dice from the formation tier and the tactical read. Each side
    /// is clamped to the configured ceiling.
    fn dice_advantage(&self, tier: MatchupTier, analysis: &PlayAnalysis) -> (u32, u32) {
        let mut advantage = 0u32;
        let mut disadvantage = 0u32;

        let tier_value = tier.value();
        if tier_value > 0 {
            advantage += 1;
        } else if tier_value < 0 {
            disadvantage += 1;
        }
        if tier.is_major() {
            if tier_value > 0 {
                advantage += 1;
            } else {
                disadvantage += 1;
            }
        }

        let net = analysis.net_impact;
        if net >= self.config.tactical_die_major_threshold {
            advantage += 2;
        } else if net >= self.config.tactical_die_threshold {
            advantage += 1;
        } else if net <= -self.config.tactical_die_major_threshold {
            disadvantage += 2;
        } else if net <= -self.config.tactical_die_threshold {
            disadvantage += 1;
        }

        // One standout factor earns one bonus die - never more than one per
        // category, so a stack of outliers cannot double count.
        if analysis.advantages.iter().any(|f| f.impact >= self.config.high_impact_threshold) {
            advantage += 1;
        }
        if analysis.disadvantages.iter().any(|f| f.impact <= -self.config.high_impact_threshold) {
            disadvantage += 1;
        }

        (advantage.min(self.config.max_extra_dice), disadvantage.min(self.config.max_extra_dice))
    }

    /// Scan outcomes best to worst; the first threshold at or under the
    /// total wins. Nothing qualifying is the worst case: a turnover.
    fn outcome_for_total(&self, final_total: i32) -> PlayOutcome {
        for outcome in PlayOutcome::SCAN_ORDER {
            match self.config.threshold(outcome) {
                Some(threshold) if threshold <= final_total => return outcome,
                Some(_) => {}
                None => {
                    log::warn!("no threshold configured for {:?}, skipping", outcome);
                }
            }
        }
        PlayOutcome::Turnover
    }

    /// Uniform draw in the outcome's configured range. A missing row
    /// degrades to a modest gain rather than failing.
    fn draw_yardage(&self, outcome: PlayOutcome, rng: &mut impl Rng) -> i32 {
        let (min, max) = self.config.yardage_range(outcome).unwrap_or_else(|| {
            log::warn!("no yardage range configured for {:?}, using fallback", outcome);
            FALLBACK_YARDAGE
        });
        if min == max {
            min
        } else {
            rng.gen_range(min..=max)
        }
    }
}

/// Pre-snap complexity: offensive movement stresses the defense; a defense
/// that counter-shifts more than once has already adjusted.
fn complexity_modifier(offense: &PlayCall, defense: &DefensiveCall) -> i32 {
    let mut complexity = 0;
    if offense.motion.is_some() {
        complexity += 1;
    }
    complexity += offense.pre_snap_shifts.len() as i32;
    if defense.pre_snap_shifts.len() > 1 {
        complexity -= 1;
    }
    complexity
}

fn describe(
    offense: &PlayCall,
    defense: &DefensiveCall,
    outcome: PlayOutcome,
    yards: i32,
    matchup: &MatchupAssessment,
    analysis: &PlayAnalysis,
) -> String {
    let mut description = match outcome {
        PlayOutcome::ExplosiveSuccess => {
            format!("{} breaks loose for {} yards", offense.label, yards)
        }
        PlayOutcome::BigSuccess => format!("{} powers ahead for {} yards", offense.label, yards),
        PlayOutcome::Success => format!("{} executes for {} yards", offense.label, yards),
        PlayOutcome::ModerateGain => format!("{} grinds out {} yards", offense.label, yards),
        PlayOutcome::NoGain => format!("{} holds the line, no gain", defense.label),
        PlayOutcome::Loss => format!("{} wins the snap for a {}-yard loss", defense.label, -yards),
        PlayOutcome::BigLoss => {
            format!("{} blows up the play for a {}-yard loss", defense.label, -yards)
        }
        PlayOutcome::Turnover => format!("{} forces a turnover", defense.label),
    };

    // Append the one or two loudest reads.
    let mut factors: Vec<&str> = Vec::new();
    if let Some(top) = analysis.top_advantage() {
        if top.impact >= 2 {
            factors.push(&top.description);
        }
    }
    if let Some(worst) = analysis.top_disadvantage() {
        if worst.impact <= -2 {
            factors.push(&worst.description);
        }
    }
    if factors.len() < 2 {
        if let Some(key) = matchup.key_factors.first() {
            factors.push(key);
        }
    }
    if !factors.is_empty() {
        description.push_str(&format!(" ({})", factors.join("; ")));
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::formation::{DefensiveDepth, OffensiveDepth};
    use crate::models::play::{
        AssignmentDuty, BlockScheme, PlayAssignment, PlayStyle, ProtectionScheme,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn neutral_inputs() -> (PlayCall, DefensiveCall, OffenseAlignment, DefenseAlignment) {
        // Unknown formations on both sides -> neutral matchup, no factors,
        // balanced front -> zero lane modifier.
        let offense = PlayCall::new("Inside Zone", PlayStyle::InsideRun, "unknown_formation");
        let defense = DefensiveCall::new("Vanilla", "unknown_front");
        let off_alignment = OffenseAlignment::new()
            .with(Lane::Middle, OffensiveDepth::Line, 4)
            .with(Lane::Middle, OffensiveDepth::Backfield, 0);
        let def_alignment = DefenseAlignment::new()
            .with(Lane::Middle, DefensiveDepth::Line, 2)
            .with(Lane::Middle, DefensiveDepth::Box, 2);
        (offense, defense, off_alignment, def_alignment)
    }

    fn engine() -> PlayResolutionEngine {
        PlayResolutionEngine::default()
    }

    #[test]
    fn test_unknown_formations_resolve_neutrally_instead_of_failing() {
        let (offense, defense, off_alignment, def_alignment) = neutral_inputs();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let result = engine()
            .resolve_play(
                &offense,
                &defense,
                &off_alignment,
                &def_alignment,
                &Situation::default(),
                &mut rng,
            )
            .expect("unknown formations must not abort resolution");
        assert_eq!(result.matchup.run, MatchupTier::Neutral);
        assert_eq!(result.breakdown.formation, 0);
    }

    #[test]
    fn test_neutral_midfield_snap_has_zero_modifiers() {
        let (offense, defense, off_alignment, def_alignment) = neutral_inputs();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = engine()
            .resolve_play(
                &offense,
                &defense,
                &off_alignment,
                &def_alignment,
                &Situation::default(),
                &mut rng,
            )
            .unwrap();
        assert_eq!(result.total_modifier, 0, "breakdown: {:?}", result.breakdown);
        assert_eq!(result.advantage_dice, 0);
        assert_eq!(result.disadvantage_dice, 0);
        assert_eq!(result.final_total, result.dice_roll);
    }

    #[test]
    fn test_effective_total_of_seven_is_a_modest_gain() {
        // 2d6 averaging out to 7 with zero modifiers must land in the small
        // gain bucket, and the drawn yardage must respect that bucket.
        let engine = engine();
        let outcome = engine.outcome_for_total(7);
        assert_eq!(outcome, PlayOutcome::ModerateGain);
        assert!(outcome.is_gain());

        let (min, max) = engine.config().yardage_range(outcome).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..50 {
            let yards = engine.draw_yardage(outcome, &mut rng);
            assert!(yards >= min && yards <= max, "yardage {} outside [{}, {}]", yards, min, max);
        }
    }

    #[test]
    fn test_same_seed_reproduces_identical_results() {
        let (offense, defense, off_alignment, def_alignment) = neutral_inputs();
        let engine = engine();
        let situation = Situation::default();

        let mut first_rng = ChaCha8Rng::seed_from_u64(424242);
        let mut second_rng = ChaCha8Rng::seed_from_u64(424242);
        for _ in 0..25 {
            let first = engine
                .resolve_play(
                    &offense,
                    &defense,
                    &off_alignment,
                    &def_alignment,
                    &situation,
                    &mut first_rng,
                )
                .unwrap();
            let second = engine
                .resolve_play(
                    &offense,
                    &defense,
                    &off_alignment,
                    &def_alignment,
                    &situation,
                    &mut second_rng,
                )
                .unwrap();
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap(),
                "same seed must reproduce the same result"
            );
        }
    }

    #[test]
    fn test_yardage_always_within_selected_outcome_range() {
        let (offense, defense, off_alignment, def_alignment) = neutral_inputs();
        let engine = engine();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let result = engine
                .resolve_play(
                    &offense,
                    &defense,
                    &off_alignment,
                    &def_alignment,
                    &Situation::default(),
                    &mut rng,
                )
                .unwrap();
            let (min, max) = engine.config().yardage_range(result.outcome).unwrap();
            assert!(
                result.yards_gained >= min && result.yards_gained <= max,
                "{:?} gave {} outside [{}, {}]",
                result.outcome,
                result.yards_gained,
                min,
                max
            );
        }
    }

    #[test]
    fn test_final_total_respects_the_band() {
        let (offense, defense, off_alignment, def_alignment) = neutral_inputs();
        let engine = engine();
        let (band_min, band_max) = engine.config().total_band;
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        // Third-and-long deep in their own end piles on negative modifiers.
        let situation = Situation { down: 3, distance: 15, field_position: 95, ..Default::default() };
        for _ in 0..100 {
            let result = engine
                .resolve_play(
                    &offense,
                    &defense,
                    &off_alignment,
                    &def_alignment,
                    &situation,
                    &mut rng,
                )
                .unwrap();
            assert!(result.final_total >= band_min && result.final_total <= band_max);
        }
    }

    #[test]
    fn test_malformed_dice_expression_is_fatal() {
        let mut config = ResolutionConfig::default();
        config.dice.run = "two-dee-six".to_string();
        let engine = PlayResolutionEngine::new(config);
        let (offense, defense, off_alignment, def_alignment) = neutral_inputs();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = engine.resolve_play(
            &offense,
            &defense,
            &off_alignment,
            &def_alignment,
            &Situation::default(),
            &mut rng,
        );
        assert!(result.is_err(), "a malformed dice expression must propagate");
    }

    #[test]
    fn test_dice_advantage_from_tiers_and_impact() {
        let engine = engine();
        let quiet = PlayAnalysis {
            advantages: Vec::new(),
            disadvantages: Vec::new(),
            net_impact: 0,
            key_matchups: Vec::new(),
            confidence: 0.4,
        };

        assert_eq!(engine.dice_advantage(MatchupTier::Neutral, &quiet), (0, 0));
        assert_eq!(engine.dice_advantage(MatchupTier::MinorAdvantage, &quiet), (1, 0));
        assert_eq!(engine.dice_advantage(MatchupTier::MajorAdvantage, &quiet), (2, 0));
        assert_eq!(engine.dice_advantage(MatchupTier::MajorDisadvantage, &quiet), (0, 2));

        let strong = PlayAnalysis { net_impact: 4, ..quiet.clone() };
        assert_eq!(engine.dice_advantage(MatchupTier::Neutral, &strong), (1, 0));

        let dominant = PlayAnalysis { net_impact: 7, ..quiet.clone() };
        assert_eq!(engine.dice_advantage(MatchupTier::Neutral, &dominant), (2, 0));

        // Ceiling: major tier + dominant read still stops at the cap.
        assert_eq!(
            engine.dice_advantage(MatchupTier::MajorAdvantage, &dominant),
            (engine.config().max_extra_dice, 0)
        );
    }

    #[test]
    fn test_extra_blockers_produce_positive_modifiers() {
        // A real pairing with real assignments end to end.
        let offense = PlayCall::new("Six-Man Protect", PlayStyle::ShortPass, "shotgun_11")
            .with_assignment(PlayAssignment::new(
                "LT",
                AssignmentDuty::PassBlock { scheme: ProtectionScheme::Slide },
            ))
            .with_assignment(PlayAssignment::new(
                "LG",
                AssignmentDuty::PassBlock { scheme: ProtectionScheme::Slide },
            ))
            .with_assignment(PlayAssignment::new(
                "RB1",
                AssignmentDuty::Route { depth: 4 },
            ));
        let defense = DefensiveCall::new("Three-Man Rush", "dime").with_assignment(
            PlayAssignment::new("DE1", AssignmentDuty::Rush { technique: None }),
        );
        let off_alignment = OffenseAlignment::new().with(Lane::Middle, OffensiveDepth::Line, 2);
        let def_alignment = DefenseAlignment::new().with(Lane::Middle, DefensiveDepth::Line, 1);

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let result = engine()
            .resolve_play(
                &offense,
                &defense,
                &off_alignment,
                &def_alignment,
                &Situation::default(),
                &mut rng,
            )
            .unwrap();
        assert!(result.breakdown.tactical > 0, "breakdown: {:?}", result.breakdown);
        assert_eq!(
            result.total_modifier,
            result.breakdown.total(),
            "reported modifier must match the breakdown"
        );
    }

    #[test]
    fn test_run_block_in_pass_call_does_not_add_pull_bonus() {
        // Regression guard for category gating inside the analyzer.
        let offense = PlayCall::new("Screen Left", PlayStyle::Screen, "spread_10")
            .with_assignment(PlayAssignment::new(
                "LG",
                AssignmentDuty::RunBlock {
                    scheme: BlockScheme::Pull,
                    technique: None,
                    partner: None,
                    direction: None,
                },
            ));
        // One rusher balances the one blocker, so only the pull could score.
        let defense = DefensiveCall::new("Base", "base43").with_assignment(PlayAssignment::new(
            "DE1",
            AssignmentDuty::Rush { technique: None },
        ));
        let analysis = analyzer::analyze(&offense, &defense);
        assert_eq!(analysis.net_impact, 0);
    }
}
