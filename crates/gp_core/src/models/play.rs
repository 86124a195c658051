//! Play calls and per-player assignments.
//!
//! An assignment pairs a role (QB, RB1, LG, WR2, ...) with a duty. Duties
//! carry a closed set of structured details instead of a free-form tag map,
//! so the analyzer can match on them exhaustively. An optional `extra` map is
//! retained per assignment for forward compatibility with loader-side tags
//! the engine does not interpret.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::formation::Lane;

/// Coarse play category used for dice selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayCategory {
    Run,
    Pass,
    Special,
}

/// What the call is trying to do. Drives lane selection and the formation
/// matchup axis (run vs pass).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayStyle {
    InsideRun,
    OutsideRun,
    ShortPass,
    DeepPass,
    PlayAction,
    Screen,
}

impl PlayStyle {
    pub fn category(self) -> PlayCategory {
        match self {
            PlayStyle::InsideRun | PlayStyle::OutsideRun => PlayCategory::Run,
            PlayStyle::ShortPass | PlayStyle::DeepPass | PlayStyle::PlayAction
            | PlayStyle::Screen => PlayCategory::Pass,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Run-blocking scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockScheme {
    /// Straight-ahead drive block.
    Drive,
    /// Lineman pulls to lead through a gap.
    Pull,
    /// Two blockers combo onto one defender.
    DoubleTeam,
    /// Intentionally soft set to invite penetration for a trap.
    TrapSet,
    /// Lateral zone step.
    Zone,
}

/// Run-blocking technique refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockTechnique {
    /// Receiver cracking down on a box defender.
    Crack,
    /// Kick-out block on the invited penetrator.
    TrapBlock,
    /// Let the defender through on purpose.
    InvitePenetration,
    /// Seal the backside pursuit.
    Seal,
    /// Down block to the inside.
    Down,
}

/// Pass-protection scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtectionScheme {
    Basic,
    BigOnBig,
    VerticalSet,
    Slide,
    Max,
}

impl ProtectionScheme {
    /// Schemes that a well-timed line stunt exploits.
    pub fn is_stunt_vulnerable(self) -> bool {
        matches!(
            self,
            ProtectionScheme::Basic | ProtectionScheme::BigOnBig | ProtectionScheme::VerticalSet
        )
    }
}

/// Pass-rush technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RushTechnique {
    Speed,
    Power,
    Stunt,
}

/// Ball-handling technique on a handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandoffTechnique {
    CounterStep,
    Draw,
}

/// Defensive front gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gap {
    A,
    B,
    C,
    D,
}

/// What a player is asked to do on this snap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssignmentDuty {
    // Offense
    RunBlock {
        scheme: BlockScheme,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        technique: Option<BlockTechnique>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        partner: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<Direction>,
    },
    PassBlock {
        scheme: ProtectionScheme,
    },
    Route {
        depth: u8,
    },
    Handoff {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fake_direction: Option<Direction>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        technique: Option<HandoffTechnique>,
    },
    LeadBlock,
    Fake,
    // Defense
    Rush {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        technique: Option<RushTechnique>,
    },
    Blitz {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lane: Option<Lane>,
    },
    Coverage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        man_target: Option<String>,
    },
    RunFit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gap: Option<Gap>,
    },
    Spy {
        target: String,
    },
}

/// One player's assignment for the snap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayAssignment {
    /// Role identifier: QB, RB1, FB, LT, LG, C, RG, RT, TE1, WR1..., or
    /// DE1, DT1, LB1, CB1, S1... on defense.
    pub role: String,
    pub duty: AssignmentDuty,
    /// Loader-side tags the engine does not interpret.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl PlayAssignment {
    pub fn new(role: impl Into<String>, duty: AssignmentDuty) -> Self {
        Self { role: role.into(), duty, extra: BTreeMap::new() }
    }

    pub fn is_blocker(&self) -> bool {
        matches!(self.duty, AssignmentDuty::RunBlock { .. } | AssignmentDuty::PassBlock { .. })
    }

    pub fn is_rusher(&self) -> bool {
        matches!(self.duty, AssignmentDuty::Rush { .. } | AssignmentDuty::Blitz { .. })
    }

    pub fn is_receiver_role(&self) -> bool {
        self.role.starts_with("WR")
    }

    pub fn is_back_role(&self) -> bool {
        self.role.starts_with("RB") || self.role.starts_with("FB")
    }
}

/// Pre-snap motion type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionType {
    /// Full-speed sweep across the formation.
    Jet,
    /// Loop behind the backfield.
    Orbit,
    /// Short back-and-forth.
    Shuttle,
    /// Back out of the formation.
    Fade,
    /// Simple positional change.
    Shift,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMotion {
    pub role: String,
    pub motion: MotionType,
}

/// Pre-snap alignment change for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftAction {
    SlideLeft,
    SlideRight,
    MoveUp,
    MoveBack,
    MoveWide,
    MoveTight,
    Stack,
    Bunch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreSnapShift {
    pub role: String,
    pub action: ShiftAction,
    /// Order of execution, 1 = first.
    #[serde(default)]
    pub timing: u8,
}

/// An offensive play call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayCall {
    pub label: String,
    pub style: PlayStyle,
    /// Base formation name, looked up in the formation book.
    pub formation: String,
    pub assignments: Vec<PlayAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<PlayerMotion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_snap_shifts: Vec<PreSnapShift>,
}

impl PlayCall {
    pub fn new(
        label: impl Into<String>,
        style: PlayStyle,
        formation: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            style,
            formation: formation.into(),
            assignments: Vec::new(),
            motion: None,
            pre_snap_shifts: Vec::new(),
        }
    }

    pub fn with_assignment(mut self, assignment: PlayAssignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    pub fn with_motion(mut self, motion: PlayerMotion) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn with_shift(mut self, shift: PreSnapShift) -> Self {
        self.pre_snap_shifts.push(shift);
        self
    }

    pub fn category(&self) -> PlayCategory {
        self.style.category()
    }
}

/// A defensive play call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefensiveCall {
    pub label: String,
    /// Base formation name, looked up in the formation book.
    pub formation: String,
    pub assignments: Vec<PlayAssignment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_snap_shifts: Vec<PreSnapShift>,
}

impl DefensiveCall {
    pub fn new(label: impl Into<String>, formation: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            formation: formation.into(),
            assignments: Vec::new(),
            pre_snap_shifts: Vec::new(),
        }
    }

    pub fn with_assignment(mut self, assignment: PlayAssignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    pub fn with_shift(mut self, shift: PreSnapShift) -> Self {
        self.pre_snap_shifts.push(shift);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_category() {
        assert_eq!(PlayStyle::InsideRun.category(), PlayCategory::Run);
        assert_eq!(PlayStyle::PlayAction.category(), PlayCategory::Pass);
        assert_eq!(PlayStyle::Screen.category(), PlayCategory::Pass);
    }

    #[test]
    fn test_assignment_predicates() {
        let block = PlayAssignment::new(
            "LG",
            AssignmentDuty::RunBlock {
                scheme: BlockScheme::Drive,
                technique: None,
                partner: None,
                direction: None,
            },
        );
        let blitz = PlayAssignment::new("LB1", AssignmentDuty::Blitz { lane: None });
        assert!(block.is_blocker());
        assert!(!block.is_rusher());
        assert!(blitz.is_rusher());
    }

    #[test]
    fn test_play_call_round_trips_through_json() {
        let call = PlayCall::new("Power Right", PlayStyle::InsideRun, "i_form")
            .with_assignment(PlayAssignment::new(
                "LG",
                AssignmentDuty::RunBlock {
                    scheme: BlockScheme::Pull,
                    technique: None,
                    partner: None,
                    direction: Some(Direction::Right),
                },
            ))
            .with_motion(PlayerMotion { role: "WR1".to_string(), motion: MotionType::Jet });

        let json = serde_json::to_string(&call).unwrap();
        let back: PlayCall = serde_json::from_str(&json).unwrap();
        assert_eq!(call, back);
    }
}
