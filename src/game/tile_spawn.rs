use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Probability table for the value of a newly spawned tile.
///
/// Entries are `(tile value, probability)`. Values must be powers of two
/// (1 counts as 2^0) and probabilities must sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    entries: Vec<(u32, f64)>,
}

impl SpawnTable {
    pub fn new(entries: Vec<(u32, f64)>) -> Result<Self> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    /// Bot variant: every new tile is a 2.
    pub fn bot() -> Self {
        Self {
            entries: vec![(2, 1.0)],
        }
    }

    /// Human variant: 1 (75%), 2 (20%), 4 (5%).
    pub fn classic() -> Self {
        Self {
            entries: vec![(1, 0.75), (2, 0.20), (4, 0.05)],
        }
    }

    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(GameError::InvalidConfig("spawn table is empty".into()));
        }
        for &(value, probability) in &self.entries {
            if !value.is_power_of_two() {
                return Err(GameError::InvalidConfig(format!(
                    "spawn value {} is not a power of two",
                    value
                )));
            }
            if !(probability > 0.0 && probability <= 1.0) {
                return Err(GameError::InvalidConfig(format!(
                    "spawn probability {} for tile {} is outside (0, 1]",
                    probability, value
                )));
            }
        }
        let total: f64 = self.entries.iter().map(|&(_, p)| p).sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(GameError::InvalidConfig(format!(
                "spawn probabilities sum to {}, expected 1",
                total
            )));
        }
        Ok(())
    }

    /// Draw a tile value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let last = self.entries[self.entries.len() - 1].0;
        if self.entries.len() == 1 {
            return last;
        }
        let roll: f64 = rng.random();
        let mut cumulative = 0.0;
        for &(value, probability) in &self.entries {
            cumulative += probability;
            if roll < cumulative {
                return value;
            }
        }
        // rounding slack
        last
    }
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self::bot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_presets_are_valid() {
        assert!(SpawnTable::bot().validate().is_ok());
        assert!(SpawnTable::classic().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert_matches!(SpawnTable::new(vec![]), Err(GameError::InvalidConfig(_)));
        assert_matches!(SpawnTable::new(vec![(3, 1.0)]), Err(GameError::InvalidConfig(_)));
        assert_matches!(SpawnTable::new(vec![(2, 0.5)]), Err(GameError::InvalidConfig(_)));
        assert_matches!(
            SpawnTable::new(vec![(2, 1.5), (4, -0.5)]),
            Err(GameError::InvalidConfig(_))
        );
    }

    #[test]
    fn test_bot_table_always_spawns_two() {
        let mut rng = StdRng::seed_from_u64(11);
        let table = SpawnTable::bot();
        assert!((0..100).all(|_| table.sample(&mut rng) == 2));
    }

    #[test]
    fn test_classic_table_frequencies() {
        let mut rng = StdRng::seed_from_u64(42);
        let table = SpawnTable::classic();
        let mut counts = [0usize; 3];
        let trials = 20_000;
        for _ in 0..trials {
            match table.sample(&mut rng) {
                1 => counts[0] += 1,
                2 => counts[1] += 1,
                4 => counts[2] += 1,
                other => panic!("unexpected tile {}", other),
            }
        }
        let ones = counts[0] as f64 / trials as f64;
        let twos = counts[1] as f64 / trials as f64;
        let fours = counts[2] as f64 / trials as f64;
        assert!((ones - 0.75).abs() < 0.02, "ones = {}", ones);
        assert!((twos - 0.20).abs() < 0.02, "twos = {}", twos);
        assert!((fours - 0.05).abs() < 0.01, "fours = {}", fours);
    }
}
