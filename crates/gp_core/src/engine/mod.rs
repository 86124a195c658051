//! The probabilistic resolution pipeline.
//!
//! Leaf to root: dice and lane scoring are pure utilities, the analyzer
//! reads assignments, the resolution engine composes everything into one
//! advantage-aware roll, and the refinement layer turns the base result
//! into player-level sub-outcomes.

pub mod analyzer;
pub mod config;
pub mod dice;
pub mod lanes;
pub mod matchup;
pub mod refine;
pub mod resolve;

pub use analyzer::{analyze, FactorKind, PlayAnalysis, TacticalFactor};
pub use config::{CategoryDice, PlayOutcome, ResolutionConfig};
pub use dice::DiceExpression;
pub use lanes::{lane_for_call, lane_modifier};
pub use matchup::{FormationBook, MatchupAssessment, MatchupTier};
pub use refine::{
    completion_chance, fumble_risk, refine_pass, refine_run, ExecutionOutcome,
    PlayExecutionResult,
};
pub use resolve::{ModifierBreakdown, PlayResolutionEngine, PlayResult};
