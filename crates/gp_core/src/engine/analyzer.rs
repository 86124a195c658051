//! Tactical play analysis.
//!
//! Inspects per-player assignments on both sides of the ball and produces
//! signed, named factors: pulling guards, traps, double teams, stunts,
//! blitz overloads, motion. The factor sum feeds the resolution engine's
//! tactical modifier and its advantage-dice math.
//!
//! All functions are pure and operate on assignment slices, so every factor
//! is independently testable.

use serde::{Deserialize, Serialize};

use crate::models::play::{
    AssignmentDuty, BlockScheme, BlockTechnique, DefensiveCall, HandoffTechnique, MotionType,
    PlayAssignment, PlayCall, PlayCategory, ProtectionScheme, RushTechnique,
};

/// A single named, signed contribution derived from specific assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactorKind {
    // Blocking
    ExtraBlocker,
    FreeRusher,
    PullingGuard,
    TrapBlock,
    DoubleTeam,
    CrackBlock,
    StuntsVsProtection,
    // Coverage
    OverloadBlitz,
    BlitzPressure,
    CoverageMismatch,
    // Pre-snap movement
    MotionConfusion,
    ShiftAdvantage,
    // Run concepts
    PowerConcept,
    TrapConcept,
    CounterAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalFactor {
    pub kind: FactorKind,
    /// Signed impact on play success.
    pub impact: i32,
    pub description: String,
    /// How certain the read is, 0.0-1.0.
    pub weight: f32,
}

impl TacticalFactor {
    fn new(kind: FactorKind, impact: i32, description: String) -> Self {
        Self { kind, impact, description, weight: 1.0 }
    }

    fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

/// Complete analysis of one play pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayAnalysis {
    pub advantages: Vec<TacticalFactor>,
    pub disadvantages: Vec<TacticalFactor>,
    /// Exact sum of every factor impact. Uncapped here - the resolution
    /// engine clamps it before it touches the dice.
    pub net_impact: i32,
    pub key_matchups: Vec<String>,
    /// 0.4-1.0, grows with the number of factors found.
    pub confidence: f32,
}

impl PlayAnalysis {
    /// Highest-impact advantage, if any.
    pub fn top_advantage(&self) -> Option<&TacticalFactor> {
        self.advantages.iter().max_by_key(|f| f.impact)
    }

    /// Lowest-impact (most damaging) disadvantage, if any.
    pub fn top_disadvantage(&self) -> Option<&TacticalFactor> {
        self.disadvantages.iter().min_by_key(|f| f.impact)
    }
}

/// Analyze an offensive call against a defensive call.
pub fn analyze(offense: &PlayCall, defense: &DefensiveCall) -> PlayAnalysis {
    let mut advantages = Vec::new();
    let mut disadvantages = Vec::new();
    let mut key_matchups = Vec::new();

    analyze_blocking(offense, defense, &mut advantages, &mut disadvantages, &mut key_matchups);
    if offense.category() == PlayCategory::Pass {
        analyze_coverage(offense, defense, &mut advantages, &mut disadvantages, &mut key_matchups);
    }
    if offense.category() == PlayCategory::Run {
        analyze_run_concepts(offense, &mut advantages);
    }
    analyze_pre_snap(offense, &mut advantages);

    let net_impact = advantages.iter().map(|f| f.impact).sum::<i32>()
        + disadvantages.iter().map(|f| f.impact).sum::<i32>();
    let factor_count = advantages.len() + disadvantages.len();
    let confidence = (0.4 + 0.2 * factor_count as f32).min(1.0);

    PlayAnalysis { advantages, disadvantages, net_impact, key_matchups, confidence }
}

// ============================================================================
// Blocking vs front
// ============================================================================

fn analyze_blocking(
    offense: &PlayCall,
    defense: &DefensiveCall,
    advantages: &mut Vec<TacticalFactor>,
    disadvantages: &mut Vec<TacticalFactor>,
    key_matchups: &mut Vec<String>,
) {
    let blockers = offense.assignments.iter().filter(|a| a.is_blocker()).count() as i32;
    let rushers = defense.assignments.iter().filter(|a| a.is_rusher()).count() as i32;

    // Numbers game. Extra blockers are no guarantee; a free rusher is bad
    // but not automatically fatal.
    if blockers > rushers {
        advantages.push(TacticalFactor::new(
            FactorKind::ExtraBlocker,
            (blockers - rushers).min(1),
            format!("{} extra blocker(s) in protection", blockers - rushers),
        ));
    } else if rushers > blockers {
        disadvantages.push(TacticalFactor::new(
            FactorKind::FreeRusher,
            -(rushers - blockers).min(2),
            format!("{} unblocked rusher(s)", rushers - blockers),
        ));
    }
    if blockers > 0 && rushers > 0 {
        key_matchups.push(format!("{}-man protection vs {}-man rush", blockers, rushers));
    }

    // Pulling linemen only pay off on runs; on a dropback a puller is just
    // a vacated gap.
    let pullers = pulling_blockers(&offense.assignments);
    if !pullers.is_empty() && offense.category() == PlayCategory::Run {
        advantages.push(TacticalFactor::new(
            FactorKind::PullingGuard,
            1,
            format!("{} pulling to lead through the gap", pullers.join(", ")),
        ));
    }

    // A trap needs both halves: someone inviting penetration and someone
    // kicking the penetrator out. A lone puller is not a trap.
    let trappers = trap_blockers(&offense.assignments);
    if has_invite_penetration(&offense.assignments) && !trappers.is_empty() {
        advantages.push(TacticalFactor::new(
            FactorKind::TrapBlock,
            1,
            format!("trap block by {} on the invited rusher", trappers.join(", ")),
        ));
    }

    let pairs = double_team_pairs(&offense.assignments);
    if pairs.len() >= 2 {
        advantages.push(TacticalFactor::new(
            FactorKind::DoubleTeam,
            ((pairs.len() / 2) as i32).min(2),
            format!("{} double teams create push at the point of attack", pairs.len()),
        ));
        key_matchups.extend(pairs);
    }

    let crackers = crack_blockers(&offense.assignments);
    if !crackers.is_empty() {
        advantages.push(TacticalFactor::new(
            FactorKind::CrackBlock,
            1,
            format!("crack block by {} on the box defender", crackers.join(", ")),
        ));
    }

    let stunters = stunting_rushers(&defense.assignments);
    if !stunters.is_empty() && protection_is_mostly_basic(&offense.assignments) {
        disadvantages.push(
            TacticalFactor::new(
                FactorKind::StuntsVsProtection,
                -1,
                format!("line stunt ({}) against basic protection", stunters.join(", ")),
            )
            .with_weight(0.8),
        );
    }
}

// ============================================================================
// Coverage vs routes (pass plays only)
// ============================================================================

fn analyze_coverage(
    offense: &PlayCall,
    defense: &DefensiveCall,
    advantages: &mut Vec<TacticalFactor>,
    disadvantages: &mut Vec<TacticalFactor>,
    key_matchups: &mut Vec<String>,
) {
    let blitzers = defense
        .assignments
        .iter()
        .filter(|a| matches!(a.duty, AssignmentDuty::Blitz { .. }))
        .count() as i32;

    if blitzers > 0 {
        // Sending extra rushers thins the coverage behind them, but the
        // pressure itself is a separate problem. Both factors stand.
        if blitzers >= 2 {
            advantages.push(TacticalFactor::new(
                FactorKind::OverloadBlitz,
                2,
                format!("heavy blitz ({} rushers) leaves coverage holes", blitzers),
            ));
        }
        disadvantages.push(TacticalFactor::new(
            FactorKind::BlitzPressure,
            -1,
            "blitz brings extra pass-rush pressure".to_string(),
        ));
        key_matchups.push(format!("{} blitzer(s) vs the protection", blitzers));
    }

    // A back releasing on a route usually draws a linebacker.
    let releasing_backs: Vec<&str> = offense
        .assignments
        .iter()
        .filter(|a| a.is_back_role() && matches!(a.duty, AssignmentDuty::Route { .. }))
        .map(|a| a.role.as_str())
        .collect();
    if !releasing_backs.is_empty() {
        advantages.push(TacticalFactor::new(
            FactorKind::CoverageMismatch,
            1,
            format!("{} matched on a linebacker in coverage", releasing_backs.join(", ")),
        ));
    }
}

// ============================================================================
// Run concepts (run plays only)
// ============================================================================

fn analyze_run_concepts(offense: &PlayCall, advantages: &mut Vec<TacticalFactor>) {
    if is_power_concept(&offense.assignments) {
        advantages.push(TacticalFactor::new(
            FactorKind::PowerConcept,
            1,
            "power concept with a lead blocker at the point of attack".to_string(),
        ));
    }
    if is_trap_concept(&offense.assignments) {
        advantages.push(TacticalFactor::new(
            FactorKind::TrapConcept,
            1,
            "trap concept baits the front into penetrating".to_string(),
        ));
    }
    if is_counter_concept(&offense.assignments) {
        advantages.push(TacticalFactor::new(
            FactorKind::CounterAction,
            1,
            "counter action sends the pursuit the wrong way".to_string(),
        ));
    }
}

// ============================================================================
// Pre-snap movement
// ============================================================================

fn analyze_pre_snap(offense: &PlayCall, advantages: &mut Vec<TacticalFactor>) {
    if let Some(motion) = &offense.motion {
        if matches!(motion.motion, MotionType::Jet | MotionType::Orbit) {
            advantages.push(
                TacticalFactor::new(
                    FactorKind::MotionConfusion,
                    1,
                    format!("pre-snap motion by {} forces coverage adjustments", motion.role),
                )
                .with_weight(0.8),
            );
        }
    }

    if offense.pre_snap_shifts.len() >= 2 {
        advantages.push(
            TacticalFactor::new(
                FactorKind::ShiftAdvantage,
                1,
                format!("{} pre-snap shifts muddy the defensive picture", offense.pre_snap_shifts.len()),
            )
            .with_weight(0.8),
        );
    }
}

// ============================================================================
// Assignment scans
// ============================================================================

fn pulling_blockers(assignments: &[PlayAssignment]) -> Vec<&str> {
    assignments
        .iter()
        .filter(|a| {
            matches!(a.duty, AssignmentDuty::RunBlock { scheme: BlockScheme::Pull, .. })
        })
        .map(|a| a.role.as_str())
        .collect()
}

fn trap_blockers(assignments: &[PlayAssignment]) -> Vec<&str> {
    assignments
        .iter()
        .filter(|a| {
            matches!(
                a.duty,
                AssignmentDuty::RunBlock { technique: Some(BlockTechnique::TrapBlock), .. }
            )
        })
        .map(|a| a.role.as_str())
        .collect()
}

fn has_invite_penetration(assignments: &[PlayAssignment]) -> bool {
    assignments.iter().any(|a| {
        matches!(
            a.duty,
            AssignmentDuty::RunBlock { technique: Some(BlockTechnique::InvitePenetration), .. }
        )
    })
}

fn double_team_pairs(assignments: &[PlayAssignment]) -> Vec<String> {
    assignments
        .iter()
        .filter_map(|a| match &a.duty {
            AssignmentDuty::RunBlock { scheme: BlockScheme::DoubleTeam, partner, .. } => {
                Some(match partner {
                    Some(partner) => format!("{}+{}", a.role, partner),
                    None => a.role.clone(),
                })
            }
            _ => None,
        })
        .collect()
}

fn crack_blockers(assignments: &[PlayAssignment]) -> Vec<&str> {
    assignments
        .iter()
        .filter(|a| {
            a.is_receiver_role()
                && matches!(
                    a.duty,
                    AssignmentDuty::RunBlock { technique: Some(BlockTechnique::Crack), .. }
                )
        })
        .map(|a| a.role.as_str())
        .collect()
}

fn stunting_rushers(assignments: &[PlayAssignment]) -> Vec<&str> {
    assignments
        .iter()
        .filter(|a| {
            matches!(a.duty, AssignmentDuty::Rush { technique: Some(RushTechnique::Stunt) })
        })
        .map(|a| a.role.as_str())
        .collect()
}

/// True when more than half of the pass-protection schemes are the basic
/// family a stunt is designed to beat.
fn protection_is_mostly_basic(assignments: &[PlayAssignment]) -> bool {
    let schemes: Vec<ProtectionScheme> = assignments
        .iter()
        .filter_map(|a| match a.duty {
            AssignmentDuty::PassBlock { scheme } => Some(scheme),
            _ => None,
        })
        .collect();
    if schemes.is_empty() {
        return false;
    }
    let basic = schemes.iter().filter(|s| s.is_stunt_vulnerable()).count();
    basic * 2 > schemes.len()
}

/// Power: a lead blocker plus either stacked double teams or a puller.
fn is_power_concept(assignments: &[PlayAssignment]) -> bool {
    let has_lead = assignments.iter().any(|a| matches!(a.duty, AssignmentDuty::LeadBlock));
    has_lead
        && (double_team_pairs(assignments).len() >= 2 || !pulling_blockers(assignments).is_empty())
}

/// Trap: at least two independent trap indicators. A lone puller or a lone
/// soft set never qualifies.
fn is_trap_concept(assignments: &[PlayAssignment]) -> bool {
    let mut indicators = 0;
    for assignment in assignments {
        if let AssignmentDuty::RunBlock { scheme, technique, .. } = &assignment.duty {
            if matches!(technique, Some(BlockTechnique::TrapBlock)) {
                indicators += 1;
            } else if matches!(technique, Some(BlockTechnique::InvitePenetration)) {
                indicators += 1;
            } else if matches!(scheme, BlockScheme::TrapSet) {
                indicators += 1;
            }
        }
    }
    indicators >= 2
}

/// Counter: a handoff sold the other way.
fn is_counter_concept(assignments: &[PlayAssignment]) -> bool {
    assignments.iter().any(|a| match &a.duty {
        AssignmentDuty::Handoff { fake_direction, technique } => {
            fake_direction.is_some() || matches!(technique, Some(HandoffTechnique::CounterStep))
        }
        _ => false,
    })
}
