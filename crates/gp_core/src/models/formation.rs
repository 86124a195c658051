//! Formation alignment counts.
//!
//! Alignments are coarse head-count snapshots of where bodies are before the
//! snap: three lanes across the field, three depth zones front to back.
//! Snapshots are immutable - adjustments build a new value instead of moving
//! defenders around in place, so matchup scoring stays side-effect free.

use serde::{Deserialize, Serialize};

/// Horizontal third of the formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Middle,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Middle, Lane::Right];

    pub(crate) fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Middle => 1,
            Lane::Right => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lane::Left => "left",
            Lane::Middle => "middle",
            Lane::Right => "right",
        }
    }
}

/// Offensive depth zone (front to back).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffensiveDepth {
    Line,
    Backfield,
    Wide,
}

impl OffensiveDepth {
    pub const ALL: [OffensiveDepth; 3] =
        [OffensiveDepth::Line, OffensiveDepth::Backfield, OffensiveDepth::Wide];

    fn index(self) -> usize {
        match self {
            OffensiveDepth::Line => 0,
            OffensiveDepth::Backfield => 1,
            OffensiveDepth::Wide => 2,
        }
    }
}

/// Defensive depth zone (front to back).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefensiveDepth {
    Line,
    Box,
    Deep,
}

impl DefensiveDepth {
    pub const ALL: [DefensiveDepth; 3] =
        [DefensiveDepth::Line, DefensiveDepth::Box, DefensiveDepth::Deep];

    fn index(self) -> usize {
        match self {
            DefensiveDepth::Line => 0,
            DefensiveDepth::Box => 1,
            DefensiveDepth::Deep => 2,
        }
    }
}

/// Offensive alignment counts, indexed by (lane, depth).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffenseAlignment {
    counts: [[u8; 3]; 3],
}

impl OffenseAlignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new snapshot with `count` bodies at (lane, depth).
    pub fn with(mut self, lane: Lane, depth: OffensiveDepth, count: u8) -> Self {
        self.counts[lane.index()][depth.index()] = count;
        self
    }

    pub fn count(&self, lane: Lane, depth: OffensiveDepth) -> u8 {
        self.counts[lane.index()][depth.index()]
    }

    /// Total offensive bodies in a lane, across every depth zone.
    pub fn lane_strength(&self, lane: Lane) -> u32 {
        OffensiveDepth::ALL.iter().map(|d| self.count(lane, *d) as u32).sum()
    }

    /// Quick-target heat for lane selection: wide plus backfield bodies.
    pub fn immediate_targets(&self, lane: Lane) -> u32 {
        self.count(lane, OffensiveDepth::Wide) as u32
            + self.count(lane, OffensiveDepth::Backfield) as u32
    }
}

/// Defensive alignment counts, indexed by (lane, depth).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseAlignment {
    counts: [[u8; 3]; 3],
}

impl DefenseAlignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new snapshot with `count` bodies at (lane, depth).
    pub fn with(mut self, lane: Lane, depth: DefensiveDepth, count: u8) -> Self {
        self.counts[lane.index()][depth.index()] = count;
        self
    }

    pub fn count(&self, lane: Lane, depth: DefensiveDepth) -> u8 {
        self.counts[lane.index()][depth.index()]
    }

    /// Bodies that contest the point of attack in a lane: line plus box.
    /// Deep defenders are excluded - they arrive after the play develops.
    pub fn lane_pressure(&self, lane: Lane) -> u32 {
        self.count(lane, DefensiveDepth::Line) as u32
            + self.count(lane, DefensiveDepth::Box) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_strength_sums_all_depths() {
        let off = OffenseAlignment::new()
            .with(Lane::Middle, OffensiveDepth::Line, 3)
            .with(Lane::Middle, OffensiveDepth::Backfield, 2)
            .with(Lane::Middle, OffensiveDepth::Wide, 1);
        assert_eq!(off.lane_strength(Lane::Middle), 6);
        assert_eq!(off.lane_strength(Lane::Left), 0);
    }

    #[test]
    fn test_lane_pressure_excludes_deep() {
        let def = DefenseAlignment::new()
            .with(Lane::Right, DefensiveDepth::Line, 2)
            .with(Lane::Right, DefensiveDepth::Box, 2)
            .with(Lane::Right, DefensiveDepth::Deep, 3);
        assert_eq!(def.lane_pressure(Lane::Right), 4, "deep defenders must not count");
    }

    #[test]
    fn test_with_returns_new_snapshot() {
        let base = OffenseAlignment::new();
        let adjusted = base.clone().with(Lane::Left, OffensiveDepth::Wide, 2);
        assert_eq!(base.count(Lane::Left, OffensiveDepth::Wide), 0);
        assert_eq!(adjusted.count(Lane::Left, OffensiveDepth::Wide), 2);
    }
}
