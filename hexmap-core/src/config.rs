//! Configuration for map generation

use crate::tile::MAX_GOLD;

/// Tunables for the three tile placers
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Danger placement attempts before giving up on hazards
    pub danger_attempts: u32,
    /// Lower bound of the per-attempt danger probability
    pub danger_min_probability: f64,
    /// Upper bound (exclusive) of the per-attempt danger probability
    pub danger_max_probability: f64,
    /// Weighted gold total to reach (increment x orbit size)
    pub gold_quota: u32,
    /// Maximum gold per cell
    pub gold_cap: u8,
    /// Largest single increment for the origin orbit
    pub gold_single_step: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            danger_attempts: 10,
            danger_min_probability: 0.2,
            danger_max_probability: 0.8,
            gold_quota: 300,
            gold_cap: MAX_GOLD,
            gold_single_step: 3,
        }
    }
}

impl GeneratorConfig {
    /// Set the gold quota
    pub fn with_gold_quota(mut self, quota: u32) -> Self {
        self.gold_quota = quota;
        self
    }

    /// Set the number of danger attempts
    pub fn with_danger_attempts(mut self, attempts: u32) -> Self {
        self.danger_attempts = attempts;
        self
    }

    /// Fix the danger probability range
    pub fn with_danger_probability(mut self, min: f64, max: f64) -> Self {
        self.danger_min_probability = min;
        self.danger_max_probability = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.danger_attempts, 10);
        assert_eq!(config.gold_quota, 300);
        assert_eq!(config.gold_cap, 6);
        assert_eq!(config.gold_single_step, 3);
    }

    #[test]
    fn test_builders() {
        let config = GeneratorConfig::default()
            .with_gold_quota(12)
            .with_danger_attempts(3)
            .with_danger_probability(0.5, 0.6);
        assert_eq!(config.gold_quota, 12);
        assert_eq!(config.danger_attempts, 3);
        assert!(config.danger_min_probability > 0.4 && config.danger_max_probability < 0.7);
    }
}
