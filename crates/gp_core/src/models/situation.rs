//! Game-situation context for a single snap.

use serde::{Deserialize, Serialize};

/// Down, distance, and field context supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    /// Current down, 1-4.
    pub down: u8,
    /// Yards to go for a first down.
    pub distance: u8,
    /// Yards from the opponent's goal line (5 = goal-to-go territory).
    pub field_position: u8,
    /// Seconds remaining in the half.
    #[serde(default)]
    pub time_remaining: u16,
    /// Offense score minus defense score.
    #[serde(default)]
    pub score_differential: i16,
    /// Whether the pocket is collapsing on this snap.
    #[serde(default)]
    pub pass_rush_pressure: bool,
}

impl Default for Situation {
    fn default() -> Self {
        Self {
            down: 1,
            distance: 10,
            field_position: 50,
            time_remaining: 900,
            score_differential: 0,
            pass_rush_pressure: false,
        }
    }
}

/// Coarse situation bucket used for modifier lookup. Field position wins
/// over down and distance - a goal-line snap is a goal-line snap on any down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SituationBucket {
    FirstDown,
    SecondShort,
    SecondMedium,
    SecondLong,
    ThirdShort,
    ThirdMedium,
    ThirdLong,
    FourthDown,
    RedZone,
    GoalLine,
}

impl Situation {
    pub fn bucket(&self) -> SituationBucket {
        if self.field_position <= 5 {
            return SituationBucket::GoalLine;
        }
        if self.field_position <= 20 {
            return SituationBucket::RedZone;
        }
        match self.down {
            4 => SituationBucket::FourthDown,
            2 => match self.distance {
                0..=3 => SituationBucket::SecondShort,
                4..=7 => SituationBucket::SecondMedium,
                _ => SituationBucket::SecondLong,
            },
            3 => match self.distance {
                0..=3 => SituationBucket::ThirdShort,
                4..=7 => SituationBucket::ThirdMedium,
                _ => SituationBucket::ThirdLong,
            },
            _ => SituationBucket::FirstDown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_and_ten_at_midfield() {
        let situation = Situation::default();
        assert_eq!(situation.bucket(), SituationBucket::FirstDown);
    }

    #[test]
    fn test_field_position_wins_over_down() {
        let situation = Situation { down: 3, distance: 8, field_position: 4, ..Default::default() };
        assert_eq!(situation.bucket(), SituationBucket::GoalLine);
    }

    #[test]
    fn test_distance_buckets() {
        let short = Situation { down: 3, distance: 2, ..Default::default() };
        let medium = Situation { down: 3, distance: 6, ..Default::default() };
        let long = Situation { down: 3, distance: 11, ..Default::default() };
        assert_eq!(short.bucket(), SituationBucket::ThirdShort);
        assert_eq!(medium.bucket(), SituationBucket::ThirdMedium);
        assert_eq!(long.bucket(), SituationBucket::ThirdLong);
    }
}
