//! Player-rating refinement.
//!
//! A second probabilistic pass over a resolved play: individual ratings
//! turn the base result into completions, yards after contact, missed
//! tackles, and turnovers. It refines the base result, never replaces it -
//! except for the turnover short-circuits, which are a legitimate terminal
//! branch of the model, not an error.
//!
//! All rolls draw from the single caller-supplied RNG stream.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::config::PlayOutcome;
use crate::engine::resolve::PlayResult;
use crate::models::player::{PlayerProfile, PlayerTrait, Skill};
use crate::models::situation::Situation;

/// Final outcome of an executed play, including refinement turnovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    /// The base outcome stood.
    Resolved(PlayOutcome),
    Incomplete,
    Interception,
    Fumble,
}

impl ExecutionOutcome {
    pub fn is_turnover(self) -> bool {
        matches!(self, ExecutionOutcome::Interception | ExecutionOutcome::Fumble)
            || matches!(self, ExecutionOutcome::Resolved(outcome) if outcome.is_turnover())
    }
}

/// Refined result of one play execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayExecutionResult {
    pub outcome: ExecutionOutcome,
    pub yards_gained: i32,
    /// False on incompletions and turnovers.
    pub completed: bool,
    /// Yards at the catch point or handoff, credited to the scheme.
    pub initial_gain: i32,
    /// Yards added after first contact.
    pub yards_after_contact: i32,
    pub missed_tackles: u32,
    /// Players who decided the play, ball side first.
    pub key_players: Vec<String>,
    // Carried through from the base resolution for reconstruction.
    pub dice_roll: i32,
    pub total_modifier: i32,
    pub final_total: i32,
}

impl PlayExecutionResult {
    fn from_base(base: &PlayResult) -> Self {
        Self {
            outcome: ExecutionOutcome::Resolved(base.outcome),
            yards_gained: 0,
            completed: false,
            initial_gain: 0,
            yards_after_contact: 0,
            missed_tackles: 0,
            key_players: Vec::new(),
            dice_roll: base.dice_roll,
            total_modifier: base.total_modifier,
            final_total: base.final_total,
        }
    }

    pub fn description(&self) -> String {
        match self.outcome {
            ExecutionOutcome::Incomplete => "incomplete pass".to_string(),
            ExecutionOutcome::Interception => "pass intercepted".to_string(),
            ExecutionOutcome::Fumble => "fumble, ball comes loose".to_string(),
            ExecutionOutcome::Resolved(_) => {
                let mut text = format!("{} yard gain", self.yards_gained);
                if self.missed_tackles > 0 {
                    text.push_str(&format!(
                        " ({} missed tackle{})",
                        self.missed_tackles,
                        if self.missed_tackles > 1 { "s" } else { "" }
                    ));
                }
                if self.yards_after_contact > 0 {
                    text.push_str(&format!(" with {} after contact", self.yards_after_contact));
                }
                text
            }
        }
    }
}

/// Refine a pass play with QB, receiver, and primary defender ratings.
pub fn refine_pass(
    qb: &PlayerProfile,
    receiver: &PlayerProfile,
    defender: &PlayerProfile,
    base: &PlayResult,
    situation: &Situation,
    rng: &mut impl Rng,
) -> PlayExecutionResult {
    // A base-level turnover already ended the play; nothing to refine.
    if base.outcome.is_turnover() {
        return PlayExecutionResult {
            key_players: vec![defender.name.clone()],
            ..PlayExecutionResult::from_base(base)
        };
    }

    let air_yards = base.yards_gained.max(0);
    let pressure = situation.pass_rush_pressure;

    let chance = completion_chance(qb, receiver, defender, air_yards, pressure);
    let completed = rng.gen_range(1..=100) <= chance;

    if !completed {
        let pick_chance =
            interception_on_incompletion(qb, defender, air_yards, pressure);
        if rng.gen_range(1..=100) <= pick_chance {
            return PlayExecutionResult {
                outcome: ExecutionOutcome::Interception,
                key_players: vec![defender.name.clone(), qb.name.clone()],
                ..PlayExecutionResult::from_base(base)
            };
        }
        return PlayExecutionResult {
            outcome: ExecutionOutcome::Incomplete,
            key_players: vec![defender.name.clone()],
            ..PlayExecutionResult::from_base(base)
        };
    }

    // Tipped balls can still go the other way after the catch attempt.
    let tipped_chance = interception_on_completion(receiver, defender, air_yards, pressure);
    if rng.gen_range(1..=100) <= tipped_chance {
        return PlayExecutionResult {
            outcome: ExecutionOutcome::Interception,
            key_players: vec![defender.name.clone(), receiver.name.clone()],
            ..PlayExecutionResult::from_base(base)
        };
    }

    let yac = yards_after_catch(receiver, defender, air_yards, rng);
    let missed_tackles = catch_missed_tackles(receiver, defender, yac, rng);

    PlayExecutionResult {
        outcome: ExecutionOutcome::Resolved(base.outcome),
        yards_gained: air_yards + yac,
        completed: true,
        initial_gain: air_yards,
        yards_after_contact: yac,
        missed_tackles,
        key_players: vec![qb.name.clone(), receiver.name.clone()],
        ..PlayExecutionResult::from_base(base)
    }
}

/// Refine a run play with runner and defender ratings.
pub fn refine_run(
    runner: &PlayerProfile,
    defenders: &[PlayerProfile],
    base: &PlayResult,
    rng: &mut impl Rng,
) -> PlayExecutionResult {
    if base.outcome.is_turnover() {
        return PlayExecutionResult {
            key_players: vec![runner.name.clone()],
            ..PlayExecutionResult::from_base(base)
        };
    }

    // Roughly half the yardage belongs to the scheme; the rest is earned
    // through contact.
    let initial_gain = (base.yards_gained / 2).max(0);
    let yac = run_yards_after_contact(runner, defenders, base.yards_gained - initial_gain);
    let missed_tackles = run_missed_tackles(runner, defenders, yac, rng);
    let total_yards = initial_gain + yac;

    let risk = fumble_risk(runner, defenders, total_yards);
    if rng.gen_range(1..=100) <= risk {
        let mut key_players = vec![runner.name.clone()];
        key_players.extend(defenders.first().map(|d| d.name.clone()));
        return PlayExecutionResult {
            outcome: ExecutionOutcome::Fumble,
            key_players,
            ..PlayExecutionResult::from_base(base)
        };
    }

    PlayExecutionResult {
        outcome: ExecutionOutcome::Resolved(base.outcome),
        yards_gained: total_yards,
        completed: true,
        initial_gain,
        yards_after_contact: yac,
        missed_tackles,
        key_players: vec![runner.name.clone()],
        ..PlayExecutionResult::from_base(base)
    }
}

// ============================================================================
// Pass math
// ============================================================================

/// Completion percentage, clamped to [5, 95].
///
/// Route depth sets the base rate; QB accuracy, receiver hands and routes,
/// defender coverage, and pressure shift it.
pub fn completion_chance(
    qb: &PlayerProfile,
    receiver: &PlayerProfile,
    defender: &PlayerProfile,
    air_yards: i32,
    pressure: bool,
) -> i32 {
    let base = if air_yards <= 5 {
        80
    } else if air_yards <= 15 {
        65
    } else {
        45
    };

    let qb_modifier = (qb.overall as i32 - 75) / 2;

    let hands = receiver.skill(Skill::Hands) as i32;
    let routes = receiver.skill(Skill::RouteRunning) as i32;
    let receiver_modifier = ((hands + routes) / 2 - 75) / 2;

    let coverage = defender.skill(Skill::Coverage) as i32;
    let defender_modifier = -(coverage - 75) / 2;

    let pressure_modifier = if pressure { -15 } else { 0 };

    (base + qb_modifier + receiver_modifier + defender_modifier + pressure_modifier).clamp(5, 95)
}

/// Interception chance on an incompletion, clamped to [0, 25].
pub fn interception_on_incompletion(
    qb: &PlayerProfile,
    defender: &PlayerProfile,
    air_yards: i32,
    pressure: bool,
) -> i32 {
    let mut risk = 8;

    let awareness = qb.skill(Skill::Awareness);
    if awareness >= 90 {
        risk -= 3;
    } else if awareness >= 80 {
        risk -= 1;
    } else if awareness < 70 {
        risk += 2;
    }

    if qb.has_trait(PlayerTrait::InterceptionProne) {
        risk += 3;
    } else if qb.has_trait(PlayerTrait::Clutch) {
        risk -= 1;
    }

    let ball_skills =
        (defender.skill(Skill::Coverage) as i32 + defender.skill(Skill::Hands) as i32) / 2;
    if ball_skills >= 85 {
        risk += 2;
    } else if ball_skills >= 75 {
        risk += 1;
    } else if ball_skills < 65 {
        risk -= 2;
    }

    if pressure {
        risk += 3;
    }

    // Tight deep windows get picked; quick throws rarely do.
    if air_yards > 15 {
        risk += 2;
    } else if air_yards <= 5 {
        risk -= 1;
    }

    risk.clamp(0, 25)
}

/// Interception chance on a completed catch attempt (tips and bobbles),
/// clamped to [0, 5].
pub fn interception_on_completion(
    receiver: &PlayerProfile,
    defender: &PlayerProfile,
    air_yards: i32,
    pressure: bool,
) -> i32 {
    let mut risk = 1;

    if receiver.skill(Skill::Hands) < 70 {
        risk += 1;
    }
    if pressure {
        risk += 1;
    }
    if defender.skill(Skill::Coverage) >= 85 {
        risk += 1;
    }
    // Short throws arrive in traffic.
    if air_yards <= 5 {
        risk += 1;
    }

    risk.clamp(0, 5)
}

fn yards_after_catch(
    receiver: &PlayerProfile,
    defender: &PlayerProfile,
    air_yards: i32,
    rng: &mut impl Rng,
) -> i32 {
    // Short catches run; deep catches mostly end where they land.
    let base = if air_yards <= 5 {
        3
    } else if air_yards <= 15 {
        2
    } else {
        1
    };

    let speed = receiver.skill(Skill::Speed) as i32;
    let agility = receiver.skill(Skill::Agility) as i32;
    let receiver_factor = ((speed + agility) / 2 - 70) / 10;

    let tackle = defender.skill(Skill::Tackle) as i32;
    let defender_factor = -(tackle - 70) / 10;

    let roll = rng.gen_range(0..=base + 2);
    (roll + receiver_factor + defender_factor).max(0)
}

fn catch_missed_tackles(
    receiver: &PlayerProfile,
    defender: &PlayerProfile,
    yards_after: i32,
    rng: &mut impl Rng,
) -> u32 {
    if yards_after <= 1 {
        return 0;
    }

    let mut chance = (yards_after * 10).min(40);
    chance += (receiver.skill(Skill::Agility) as i32 - 70) / 10 * 5;
    chance -= (defender.skill(Skill::Tackle) as i32 - 70) / 10 * 5;

    let mut missed = 0;
    for _ in 0..(yards_after / 2).min(3) {
        if rng.gen_range(1..=100) <= chance {
            missed += 1;
            chance -= 15; // each escape makes the next one harder
        }
    }
    missed
}

// ============================================================================
// Run math
// ============================================================================

fn average_defender_skill(defenders: &[PlayerProfile], skill: Skill) -> i32 {
    if defenders.is_empty() {
        return 70;
    }
    defenders.iter().map(|d| d.skill(skill) as i32).sum::<i32>() / defenders.len() as i32
}

fn run_yards_after_contact(
    runner: &PlayerProfile,
    defenders: &[PlayerProfile],
    base_yac: i32,
) -> i32 {
    if defenders.is_empty() {
        return base_yac.max(0);
    }

    let avg_tackle = average_defender_skill(defenders, Skill::Tackle);
    let power_factor = (runner.skill(Skill::Strength) as i32 - avg_tackle) / 10;
    let agility_factor = (runner.skill(Skill::Agility) as i32 - avg_tackle) / 10;

    // Run through them or around them, whichever the runner does better.
    (base_yac + power_factor.max(agility_factor)).max(0)
}

fn run_missed_tackles(
    runner: &PlayerProfile,
    defenders: &[PlayerProfile],
    yac: i32,
    rng: &mut impl Rng,
) -> u32 {
    if yac <= 0 || defenders.is_empty() {
        return 0;
    }

    let elusiveness = (runner.skill(Skill::Agility) as i32 - 70) / 10;
    let mut missed = 0;
    for defender in defenders.iter().take(2) {
        let tackle = (defender.skill(Skill::Tackle) as i32 - 70) / 10;
        let chance = (yac * 8).min(30) + elusiveness * 5 - tackle * 5;
        if rng.gen_range(1..=100) <= chance {
            missed += 1;
        }
    }
    missed
}

/// Fumble risk percentage, floored at 0.
///
/// Base 1%, +1 past ten total yards (fatigue, more contact), trait
/// adjustments, +1 against a heavy-hitting front.
pub fn fumble_risk(runner: &PlayerProfile, defenders: &[PlayerProfile], total_yards: i32) -> i32 {
    let mut risk = 1;

    if total_yards > 10 {
        risk += 1;
    }

    if runner.has_trait(PlayerTrait::SecureHands) {
        risk -= 1;
    } else if runner.has_trait(PlayerTrait::FumbleProne) {
        risk += 2;
    }

    if !defenders.is_empty() && average_defender_skill(defenders, Skill::Strength) > 85 {
        risk += 1;
    }

    risk.max(0)
}
