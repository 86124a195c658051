//! Dice expressions and rolls.
//!
//! Expressions use the tabletop grammar `NdF`, `NdF+M`, `NdF-M` with no
//! embedded spaces. A malformed expression is a structural error and
//! propagates to the caller; rolling itself never fails.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A parsed dice expression: `count` dice with `faces` faces plus a flat
/// modifier. Invariant: count >= 1 and faces >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    pub count: u32,
    pub faces: u32,
    pub modifier: i32,
}

fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for DiceExpression {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let fail = || EngineError::InvalidDiceExpression(s.to_string());

        let (count_str, rest) = s.split_once('d').ok_or_else(fail)?;
        let (faces_str, modifier) = if let Some((faces, m)) = rest.split_once('+') {
            (faces, digits(m).ok_or_else(fail)? as i32)
        } else if let Some((faces, m)) = rest.split_once('-') {
            (faces, -(digits(m).ok_or_else(fail)? as i32))
        } else {
            (rest, 0)
        };

        let count = digits(count_str).ok_or_else(fail)?;
        let faces = digits(faces_str).ok_or_else(fail)?;
        if count == 0 || faces == 0 {
            return Err(fail());
        }

        Ok(Self { count, faces, modifier })
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.count, self.faces),
            m if m > 0 => write!(f, "{}d{}+{}", self.count, self.faces, m),
            m => write!(f, "{}d{}{}", self.count, self.faces, m),
        }
    }
}

impl DiceExpression {
    /// Sum of `count` independent draws in [1, faces], plus the modifier.
    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        let mut total = self.modifier;
        for _ in 0..self.count {
            total += rng.gen_range(1..=self.faces) as i32;
        }
        total
    }

    /// Roll with offsetting advantage/disadvantage.
    ///
    /// net = advantage - disadvantage. Draws `count + |net|` dice, keeping
    /// the best `count` when net > 0 and the worst `count` when net < 0.
    /// net == 0 draws exactly `count` dice, identical to [`roll`](Self::roll).
    pub fn roll_with_advantage(
        &self,
        rng: &mut impl Rng,
        advantage: u32,
        disadvantage: u32,
    ) -> i32 {
        let net = advantage as i64 - disadvantage as i64;
        if net == 0 {
            return self.roll(rng);
        }

        let extra = net.unsigned_abs() as u32;
        let mut pool: Vec<u32> =
            (0..self.count + extra).map(|_| rng.gen_range(1..=self.faces)).collect();
        if net > 0 {
            pool.sort_unstable_by(|a, b| b.cmp(a)); // keep best
        } else {
            pool.sort_unstable(); // keep worst
        }
        pool.truncate(self.count as usize);

        pool.iter().map(|&d| d as i32).sum::<i32>() + self.modifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_parse_valid_expressions() {
        assert_eq!(
            "2d6".parse::<DiceExpression>().unwrap(),
            DiceExpression { count: 2, faces: 6, modifier: 0 }
        );
        assert_eq!(
            "1d10+1".parse::<DiceExpression>().unwrap(),
            DiceExpression { count: 1, faces: 10, modifier: 1 }
        );
        assert_eq!(
            "3d8-2".parse::<DiceExpression>().unwrap(),
            DiceExpression { count: 3, faces: 8, modifier: -2 }
        );
    }

    #[test]
    fn test_parse_rejects_malformed_expressions() {
        for expr in ["", "d6", "2d", "0d6", "2d0", "2 d6", "2d 6", "+2d6", "2d6+", "2d6+-1", "abc"]
        {
            assert!(
                expr.parse::<DiceExpression>().is_err(),
                "expression {:?} should not parse",
                expr
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for expr in ["2d6", "2d8+3", "1d12-4"] {
            let parsed: DiceExpression = expr.parse().unwrap();
            assert_eq!(parsed.to_string(), expr);
        }
    }

    #[test]
    fn test_roll_stays_in_range() {
        let expr: DiceExpression = "3d6+2".parse().unwrap();
        let mut r = rng(7);
        for _ in 0..200 {
            let total = expr.roll(&mut r);
            assert!((5..=20).contains(&total), "3d6+2 out of range: {}", total);
        }
    }

    #[test]
    fn test_offsetting_advantage_matches_plain_roll() {
        // Equal advantage and disadvantage must draw exactly `count` dice,
        // leaving the RNG stream in the same state as a plain roll.
        let expr: DiceExpression = "2d6".parse().unwrap();
        let mut a = rng(99);
        let mut b = rng(99);

        let with_offset = expr.roll_with_advantage(&mut a, 3, 3);
        let plain = expr.roll(&mut b);

        assert_eq!(with_offset, plain);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>(), "RNG streams should stay in lockstep");
    }

    #[test]
    fn test_single_advantage_keeps_best_of_two() {
        let expr: DiceExpression = "1d6".parse().unwrap();
        for seed in 0..50 {
            let mut a = rng(seed);
            let mut b = rng(seed);

            let kept = expr.roll_with_advantage(&mut a, 1, 0);
            let first = b.gen_range(1..=6u32) as i32;
            let second = b.gen_range(1..=6u32) as i32;

            assert_eq!(kept, first.max(second), "seed {}", seed);
        }
    }

    #[test]
    fn test_single_disadvantage_keeps_worst_of_two() {
        let expr: DiceExpression = "1d6".parse().unwrap();
        for seed in 0..50 {
            let mut a = rng(seed);
            let mut b = rng(seed);

            let kept = expr.roll_with_advantage(&mut a, 0, 1);
            let first = b.gen_range(1..=6u32) as i32;
            let second = b.gen_range(1..=6u32) as i32;

            assert_eq!(kept, first.min(second), "seed {}", seed);
        }
    }

    #[test]
    fn test_advantage_never_leaves_expression_range() {
        let expr: DiceExpression = "2d8+1".parse().unwrap();
        let mut r = rng(4242);
        for _ in 0..200 {
            let total = expr.roll_with_advantage(&mut r, 2, 0);
            assert!((3..=17).contains(&total), "kept dice out of range: {}", total);
        }
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any valid NdF+M roll lands in [N+M, N*F+M].
            #[test]
            fn prop_roll_in_bounds(
                count in 1u32..6,
                faces in 1u32..20,
                modifier in -5i32..5,
                seed in 0u64..1000
            ) {
                let expr = DiceExpression { count, faces, modifier };
                let total = expr.roll(&mut ChaCha8Rng::seed_from_u64(seed));
                prop_assert!(total >= count as i32 + modifier);
                prop_assert!(total <= (count * faces) as i32 + modifier);
            }

            /// Property: advantage dice never escape the expression's range.
            #[test]
            fn prop_advantage_roll_in_bounds(
                count in 1u32..6,
                faces in 1u32..20,
                advantage in 0u32..3,
                disadvantage in 0u32..3,
                seed in 0u64..1000
            ) {
                let expr = DiceExpression { count, faces, modifier: 0 };
                let total = expr.roll_with_advantage(
                    &mut ChaCha8Rng::seed_from_u64(seed),
                    advantage,
                    disadvantage,
                );
                prop_assert!(total >= count as i32);
                prop_assert!(total <= (count * faces) as i32);
            }
        }
    }
}
