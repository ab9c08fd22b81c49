//! Growth tiers
//!
//! Maps accumulated growth currency to a display radius. Growth is stepped,
//! not interpolated: a hole keeps its tier radius until the next threshold.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HOLE_RADIUS;

/// One progression bracket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Growth needed to reach this tier
    pub min_growth: f32,
    /// Radius of a hole in this tier
    pub radius: f32,
    pub name: String,
}

impl Tier {
    pub fn new(min_growth: f32, radius: f32, name: impl Into<String>) -> Self {
        Self {
            min_growth,
            radius,
            name: name.into(),
        }
    }
}

/// What comes after the current tier (for the progress bar)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextTier<'a> {
    Tier(&'a Tier),
    /// Already in the last tier; `min_growth` is a nominal target for the bar
    Max { min_growth: f32 },
}

/// Why a tier table was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TierTableError {
    #[error("tier table is empty")]
    Empty,
    #[error("first tier must start at zero growth, found {0}")]
    FirstThreshold(f32),
    #[error("tier {index} threshold {threshold} does not exceed the previous one")]
    NotAscending { index: usize, threshold: f32 },
    #[error("tier {index} radius {radius} is smaller than the previous tier or not positive")]
    RadiusShrinks { index: usize, radius: f32 },
}

/// Ordered tier table, ascending by threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                Tier::new(0.0, 30.0, "TIER 1"),
                Tier::new(50.0, 40.0, "TIER 2"),
                Tier::new(150.0, 55.0, "TIER 3"),
                Tier::new(400.0, 75.0, "TIER 4"),
                Tier::new(900.0, 105.0, "TIER 5"),
                Tier::new(1800.0, 145.0, "TIER 6"),
                Tier::new(3500.0, 200.0, "TIER 7"),
                Tier::new(6000.0, 280.0, "TIER 8"),
                Tier::new(10000.0, MAX_HOLE_RADIUS, "VOID LORD"),
            ],
        }
    }
}

impl TierTable {
    /// Build a table, rejecting anything that could shrink a growing hole
    pub fn new(tiers: Vec<Tier>) -> Result<Self, TierTableError> {
        let table = Self { tiers };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), TierTableError> {
        let first = self.tiers.first().ok_or(TierTableError::Empty)?;
        if first.min_growth != 0.0 {
            return Err(TierTableError::FirstThreshold(first.min_growth));
        }
        if first.radius <= 0.0 {
            return Err(TierTableError::RadiusShrinks {
                index: 0,
                radius: first.radius,
            });
        }
        for (index, pair) in self.tiers.windows(2).enumerate() {
            let (prev, tier) = (&pair[0], &pair[1]);
            if tier.min_growth <= prev.min_growth {
                return Err(TierTableError::NotAscending {
                    index: index + 1,
                    threshold: tier.min_growth,
                });
            }
            if tier.radius < prev.radius {
                return Err(TierTableError::RadiusShrinks {
                    index: index + 1,
                    radius: tier.radius,
                });
            }
        }
        Ok(())
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Radius every hole starts with
    pub fn base_radius(&self) -> f32 {
        self.tiers.first().map_or(0.0, |t| t.radius)
    }

    /// Index of the highest tier reached with `growth`
    fn index_for(&self, growth: f32) -> usize {
        // Thresholds ascend, so the reached tiers form a prefix
        self.tiers
            .partition_point(|t| growth >= t.min_growth)
            .saturating_sub(1)
    }

    /// Highest tier whose threshold `growth` meets
    pub fn current(&self, growth: f32) -> Option<&Tier> {
        self.tiers.get(self.index_for(growth))
    }

    pub fn radius_for(&self, growth: f32) -> f32 {
        self.current(growth).map_or(0.0, |t| t.radius)
    }

    pub fn next(&self, growth: f32) -> NextTier<'_> {
        let index = self.index_for(growth);
        match self.tiers.get(index + 1) {
            Some(tier) => NextTier::Tier(tier),
            None => NextTier::Max {
                min_growth: self.tiers.get(index).map_or(0.0, |t| t.min_growth * 2.0),
            },
        }
    }

    /// Progress through the current tier in `[0, 1]`; always 1 in the last tier
    pub fn progress(&self, growth: f32) -> f32 {
        let Some(current) = self.current(growth) else {
            return 0.0;
        };
        match self.next(growth) {
            NextTier::Tier(next) => {
                let span = next.min_growth - current.min_growth;
                ((growth - current.min_growth) / span).clamp(0.0, 1.0)
            }
            NextTier::Max { .. } => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_table_is_valid() {
        assert!(TierTable::default().validate().is_ok());
        assert_eq!(TierTable::default().base_radius(), 30.0);
    }

    #[test]
    fn test_threshold_exact_hit_is_stepped() {
        let table = TierTable::default();
        assert_eq!(table.radius_for(49.9), 30.0);
        assert_eq!(table.radius_for(50.0), 40.0);
        assert_eq!(table.current(50.0).unwrap().name, "TIER 2");
        assert_eq!(table.radius_for(1_000_000.0), MAX_HOLE_RADIUS);
    }

    #[test]
    fn test_next_tier_and_max_sentinel() {
        let table = TierTable::default();
        match table.next(0.0) {
            NextTier::Tier(t) => assert_eq!(t.name, "TIER 2"),
            NextTier::Max { .. } => panic!("expected a next tier"),
        }
        assert_eq!(table.next(10_000.0), NextTier::Max { min_growth: 20_000.0 });
        assert_eq!(table.progress(10_000.0), 1.0);
        assert!((table.progress(25.0) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert_eq!(TierTable::new(Vec::new()), Err(TierTableError::Empty));
        assert!(matches!(
            TierTable::new(vec![Tier::new(10.0, 30.0, "A")]),
            Err(TierTableError::FirstThreshold(_))
        ));
        assert!(matches!(
            TierTable::new(vec![Tier::new(0.0, 30.0, "A"), Tier::new(0.0, 40.0, "B")]),
            Err(TierTableError::NotAscending { index: 1, .. })
        ));
        assert!(matches!(
            TierTable::new(vec![Tier::new(0.0, 30.0, "A"), Tier::new(10.0, 20.0, "B")]),
            Err(TierTableError::RadiusShrinks { index: 1, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_radius_never_decreases(a in 0.0f32..20_000.0, b in 0.0f32..20_000.0) {
            let table = TierTable::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(table.radius_for(lo) <= table.radius_for(hi));
        }
    }
}
