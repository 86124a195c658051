//! Data records exchanged with out-of-scope collaborators (loaders, CLIs,
//! batch simulators).

pub mod formation;
pub mod play;
pub mod player;
pub mod situation;

pub use formation::{DefenseAlignment, DefensiveDepth, Lane, OffenseAlignment, OffensiveDepth};
pub use play::{
    AssignmentDuty, BlockScheme, BlockTechnique, DefensiveCall, Direction, Gap, HandoffTechnique,
    MotionType, PlayAssignment, PlayCall, PlayCategory, PlayStyle, PlayerMotion, PreSnapShift,
    ProtectionScheme, RushTechnique, ShiftAction,
};
pub use player::{PlayerProfile, PlayerTrait, RatingTier, Skill};
pub use situation::{Situation, SituationBucket};
