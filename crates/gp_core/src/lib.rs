//! # gp_core - Deterministic Gridiron Play Resolution Engine
//!
//! Resolves a single simulated football play into a discrete outcome
//! (yards gained, outcome kind, narrative) from an offensive call, a
//! defensive call, formation alignments, situational context, and
//! optionally individual player ratings.
//!
//! ## Features
//! - 100% deterministic resolution (same seed = same result)
//! - Advantage/disadvantage dice with a lane-based formation model
//! - Assignment-level tactical analysis (pulls, traps, blitzes, motion)
//! - Player-rating refinement: completions, YAC, missed tackles, turnovers
//! - JSON API for easy host integration

// Game engine APIs often require many parameters for context and state
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod sim;

// Re-export the main API surface
pub use api::{resolve_play_json, PlayRequest, PlayResponse, RefinementCast};
pub use engine::{
    analyze, completion_chance, fumble_risk, refine_pass, refine_run, DiceExpression,
    ExecutionOutcome, FactorKind, FormationBook, MatchupAssessment, MatchupTier,
    ModifierBreakdown, PlayAnalysis, PlayExecutionResult, PlayOutcome, PlayResolutionEngine,
    PlayResult, ResolutionConfig, TacticalFactor,
};
pub use error::{EngineError, Result};
pub use models::{
    DefenseAlignment, DefensiveCall, Lane, OffenseAlignment, PlayCall, PlayCategory, PlayStyle,
    PlayerProfile, PlayerTrait, Situation, Skill,
};
pub use sim::{run_trials, BatchSummary};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
