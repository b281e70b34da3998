//! Deterministic random helpers.
//!
//! Every random decision in the engine (variant glyphs, wandering steps,
//! dice) draws from one [`Rng`] owned by the world, so a seed fully
//! determines a session.

use std::str::FromStr;

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64 bits of state, 32 bits of output per step.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        // Scramble the seed once so nearby seeds don't start on nearby states.
        Self {
            state: Self::pcg_step(seed ^ 0x9e3779b97f4a7c15),
        }
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }

    /// Uniform integer in `0..size`. Returns 0 when `size` is 0.
    pub fn int(&mut self, size: u32) -> u32 {
        if size == 0 {
            return 0;
        }
        self.next_u32() % size
    }

    /// Uniformly picks one element, `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.int(items.len() as u32) as usize;
        items.get(index)
    }

    /// Picks an index with probability proportional to its weight.
    ///
    /// Returns `None` when every weight is zero.
    pub fn weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().copied().map(u64::from).sum();
        if total == 0 {
            return None;
        }

        let mut roll = match u32::try_from(total) {
            Ok(total) => u64::from(self.int(total)),
            Err(_) => self.next_u64() % total,
        };
        for (index, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if roll < weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    pub fn roll(&mut self, dice: Dice) -> u32 {
        (0..dice.count).map(|_| 1 + self.int(dice.sides)).sum()
    }

    /// Rolls dice written in `NdS` notation, e.g. `2d6`.
    pub fn dice(&mut self, code: &str) -> Result<u32, DiceError> {
        let dice = code.parse::<Dice>()?;
        Ok(self.roll(dice))
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::seeded(0)
    }
}

/// A pool of identical dice (`count` dice with `sides` faces each).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
}

impl Dice {
    pub const fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("dice code \"{0}\" is not in NdS form")]
    Malformed(String),

    #[error("dice code \"{0}\" has zero sides")]
    NoSides(String),
}

impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let malformed = || DiceError::Malformed(code.to_string());
        let (count, sides) = code.trim().split_once('d').ok_or_else(malformed)?;
        let count = count.parse::<u32>().map_err(|_| malformed())?;
        let sides = sides.parse::<u32>().map_err(|_| malformed())?;
        if sides == 0 {
            return Err(DiceError::NoSides(code.to_string()));
        }
        Ok(Self { count, sides })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::seeded(42);
        let mut b = Rng::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn int_stays_in_range() {
        let mut rng = Rng::seeded(7);
        for _ in 0..1000 {
            assert!(rng.int(5) < 5);
        }
        assert_eq!(rng.int(0), 0);
    }

    #[test]
    fn weighted_skips_zero_weights() {
        let mut rng = Rng::seeded(3);
        for _ in 0..200 {
            assert_eq!(rng.weighted(&[0, 4, 0]), Some(1));
        }
        assert_eq!(rng.weighted(&[0, 0]), None);
    }

    #[test]
    fn weighted_handles_totals_past_u32() {
        let mut rng = Rng::seeded(5);
        let weights = [u32::MAX, u32::MAX, 0];
        for _ in 0..200 {
            let index = rng.weighted(&weights).unwrap();
            assert!(index < 2);
        }
    }

    #[test]
    fn dice_totals_within_bounds() {
        let mut rng = Rng::seeded(11);
        for _ in 0..500 {
            let total = rng.dice("3d6").unwrap();
            assert!((3..=18).contains(&total));
        }
    }

    #[test]
    fn malformed_dice_codes_are_rejected() {
        assert!(matches!("d6".parse::<Dice>(), Err(DiceError::Malformed(_))));
        assert!(matches!("2x6".parse::<Dice>(), Err(DiceError::Malformed(_))));
        assert!(matches!("2d0".parse::<Dice>(), Err(DiceError::NoSides(_))));
        assert_eq!("2d10".parse::<Dice>(), Ok(Dice::new(2, 10)));
    }

    #[test]
    fn pick_handles_empty() {
        let mut rng = Rng::seeded(1);
        let empty: [u8; 0] = [];
        assert_eq!(rng.pick(&empty), None);
        assert!(rng.pick(&[1, 2, 3]).is_some());
    }
}
