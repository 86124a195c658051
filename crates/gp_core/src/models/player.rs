//! Individual player ratings for the refinement layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Specific skill ratings, 0-99 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    // Ball carriers and receivers
    Speed,
    Acceleration,
    Agility,
    Strength,
    Hands,
    RouteRunning,
    Awareness,
    // Blocking
    PassBlocking,
    RunBlocking,
    // Defense
    Tackle,
    Coverage,
    PassRush,
    RunDefense,
}

/// Position-agnostic trait tags that tilt turnover math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerTrait {
    SecureHands,
    FumbleProne,
    InterceptionProne,
    Clutch,
}

/// Overall rating tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingTier {
    Elite,
    Good,
    Average,
    BelowAverage,
    Poor,
}

impl RatingTier {
    pub fn from_overall(overall: u8) -> Self {
        match overall {
            90.. => RatingTier::Elite,
            80..=89 => RatingTier::Good,
            70..=79 => RatingTier::Average,
            60..=69 => RatingTier::BelowAverage,
            _ => RatingTier::Poor,
        }
    }
}

/// One player's ratings and traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub position: String,
    /// 0-99 scale.
    pub overall: u8,
    /// Missing skills fall back to the overall rating.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skills: BTreeMap<Skill, u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traits: Vec<PlayerTrait>,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, position: impl Into<String>, overall: u8) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            overall,
            skills: BTreeMap::new(),
            traits: Vec::new(),
        }
    }

    pub fn with_skill(mut self, skill: Skill, rating: u8) -> Self {
        self.skills.insert(skill, rating);
        self
    }

    pub fn with_trait(mut self, tag: PlayerTrait) -> Self {
        self.traits.push(tag);
        self
    }

    /// Specific skill rating, defaulting to overall when not rated.
    pub fn skill(&self, skill: Skill) -> u8 {
        self.skills.get(&skill).copied().unwrap_or(self.overall)
    }

    pub fn has_trait(&self, tag: PlayerTrait) -> bool {
        self.traits.contains(&tag)
    }

    pub fn tier(&self) -> RatingTier {
        RatingTier::from_overall(self.overall)
    }
}
