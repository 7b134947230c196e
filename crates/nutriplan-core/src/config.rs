//! Engine tuning parameters.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading an engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Inclusive percentage range, e.g. 15.0..=40.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PercentRange {
    pub min: f64,
    pub max: f64,
}

impl PercentRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Acceptable share of each macro-nutrient in a balanced meal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MacroBalance {
    pub protein: PercentRange,
    pub carbs: PercentRange,
    pub fat: PercentRange,
}

impl Default for MacroBalance {
    fn default() -> Self {
        Self {
            protein: PercentRange::new(15.0, 40.0),
            carbs: PercentRange::new(35.0, 70.0),
            fat: PercentRange::new(10.0, 40.0),
        }
    }
}

/// Fraction of the daily calorie target given to each plan slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlotSplit {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
}

impl Default for SlotSplit {
    fn default() -> Self {
        Self {
            breakfast: 0.25,
            lunch: 0.40,
            dinner: 0.35,
        }
    }
}

/// How recipe steps are rewritten after an ingredient substitution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepRewrite {
    /// Every case-insensitive occurrence, including inside longer words.
    #[default]
    Blunt,
    /// Only occurrences bounded by word boundaries.
    WholeWord,
}

/// Tunable engine parameters. Every field has a default, so a config file
/// only needs to list what it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Relative calorie tolerance of the strict pass
    pub strict_tolerance: f64,

    /// Relative calorie tolerance of the relaxed pass
    pub relaxed_tolerance: f64,

    pub macro_balance: MacroBalance,
    pub slot_split: SlotSplit,

    /// Alternatives returned when the caller does not ask for a count
    pub alternatives_count: usize,

    /// Longest plan `build_plan` will assemble
    pub max_plan_days: u32,

    pub step_rewrite: StepRewrite,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_tolerance: 0.15,
            relaxed_tolerance: 0.25,
            macro_balance: MacroBalance::default(),
            slot_split: SlotSplit::default(),
            alternatives_count: 3,
            max_plan_days: 31,
            step_rewrite: StepRewrite::Blunt,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check the parameters are usable together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, tolerance) in [
            ("strict_tolerance", self.strict_tolerance),
            ("relaxed_tolerance", self.relaxed_tolerance),
        ] {
            if !(0.0..1.0).contains(&tolerance) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be in [0, 1), got {}",
                    name, tolerance
                )));
            }
        }

        if self.relaxed_tolerance < self.strict_tolerance {
            return Err(ConfigError::Invalid(format!(
                "relaxed_tolerance ({}) is tighter than strict_tolerance ({})",
                self.relaxed_tolerance, self.strict_tolerance
            )));
        }

        for (name, range) in [
            ("protein", self.macro_balance.protein),
            ("carbs", self.macro_balance.carbs),
            ("fat", self.macro_balance.fat),
        ] {
            if range.min < 0.0 || range.max > 100.0 || range.min > range.max {
                return Err(ConfigError::Invalid(format!(
                    "macro_balance.{} range {}..{} is not within 0..100",
                    name, range.min, range.max
                )));
            }
        }

        let split = self.slot_split;
        if [split.breakfast, split.lunch, split.dinner].iter().any(|s| *s < 0.0) {
            return Err(ConfigError::Invalid(
                "slot_split fractions must not be negative".to_string(),
            ));
        }
        let total = split.breakfast + split.lunch + split.dinner;
        if (total - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Invalid(format!(
                "slot_split must sum to 1.0, got {}",
                total
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.strict_tolerance, 0.15);
        assert_eq!(config.relaxed_tolerance, 0.25);
        assert_eq!(config.alternatives_count, 3);
        assert_eq!(config.max_plan_days, 31);
        assert_eq!(config.step_rewrite, StepRewrite::Blunt);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml(
            r#"
strict_tolerance: 0.10
step_rewrite: whole_word
macro_balance:
  fat:
    min: 5
    max: 45
"#,
        )
        .unwrap();

        assert_eq!(config.strict_tolerance, 0.10);
        assert_eq!(config.relaxed_tolerance, 0.25);
        assert_eq!(config.step_rewrite, StepRewrite::WholeWord);
        assert_eq!(config.macro_balance.fat, PercentRange::new(5.0, 45.0));
        assert_eq!(config.macro_balance.protein, PercentRange::new(15.0, 40.0));
    }

    #[test]
    fn test_relaxed_tighter_than_strict_rejected() {
        let result = EngineConfig::from_yaml("strict_tolerance: 0.3\nrelaxed_tolerance: 0.2\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_tolerance_out_of_range_rejected() {
        let result = EngineConfig::from_yaml("relaxed_tolerance: 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_split_must_sum_to_one() {
        let result = EngineConfig::from_yaml("slot_split:\n  breakfast: 0.5\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = EngineConfig::from_yaml("macro_balance:\n  carbs:\n    min: 70\n    max: 35\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_rewrite_mode_is_yaml_error() {
        let result = EngineConfig::from_yaml("step_rewrite: fuzzy\n");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }
}
