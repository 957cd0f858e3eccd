//! Configuration for metric weights, risk thresholds, and discovery
//! ignore patterns, loadable from `.poisonmap.toml`.

pub mod loader;

pub use loader::load_config;

use serde::{Deserialize, Serialize};

/// Weights of the composite poisoning index.
///
/// The four components must sum to 1.0 so the index stays in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    /// Weight for single-implementation risk (0.0-1.0)
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Weight for the unused share of the codebase, 1 - usage rate (0.0-1.0)
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Weight for unused-method rate (0.0-1.0)
    #[serde(default = "default_gamma")]
    pub gamma: f64,

    /// Weight for normalized hierarchy depth (0.0-1.0)
    #[serde(default = "default_delta")]
    pub delta: f64,
}

fn default_alpha() -> f64 {
    0.25
}

fn default_beta() -> f64 {
    0.15
}

fn default_gamma() -> f64 {
    0.25
}

fn default_delta() -> f64 {
    0.35
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            beta: default_beta(),
            gamma: default_gamma(),
            delta: default_delta(),
        }
    }
}

impl MetricWeights {
    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    /// Validate that all weights are in range and sum to 1.0 (with small
    /// tolerance for floating point).
    pub fn validate(&self) -> Result<(), String> {
        for (weight, name) in [
            (self.alpha, "alpha"),
            (self.beta, "beta"),
            (self.gamma, "gamma"),
            (self.delta, "delta"),
        ] {
            Self::validate_weight(weight, name)?;
        }

        let sum = self.alpha + self.beta + self.gamma + self.delta;
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "metric weights must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }
        Ok(())
    }
}

/// Boundaries of the three risk bands. Both boundaries are inclusive
/// toward the middle band: a score equal to `medium` or `high` is MEDIUM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Scores at or above this are at least MEDIUM risk
    #[serde(default = "default_medium_threshold")]
    pub medium: f64,

    /// Scores strictly above this are HIGH risk
    #[serde(default = "default_high_threshold")]
    pub high: f64,
}

fn default_medium_threshold() -> f64 {
    0.4
}

fn default_high_threshold() -> f64 {
    0.7
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: default_medium_threshold(),
            high: default_high_threshold(),
        }
    }
}

impl RiskThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.medium) || !(0.0..=1.0).contains(&self.high) {
            return Err("risk thresholds must be between 0.0 and 1.0".to_string());
        }
        if self.medium > self.high {
            return Err(format!(
                "medium threshold {:.3} must not exceed high threshold {:.3}",
                self.medium, self.high
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoisonmapConfig {
    #[serde(default)]
    pub weights: MetricWeights,

    #[serde(default)]
    pub thresholds: RiskThresholds,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!(MetricWeights::default().validate().is_ok());
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let weights = MetricWeights {
            alpha: 0.5,
            beta: 0.5,
            gamma: 0.5,
            delta: 0.5,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_weight() {
        let weights = MetricWeights {
            alpha: 1.25,
            beta: -0.6,
            gamma: 0.2,
            delta: 0.15,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let thresholds = RiskThresholds {
            medium: 0.8,
            high: 0.4,
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn parses_partial_config_with_defaults() {
        let config: PoisonmapConfig = toml::from_str(
            r#"
            [weights]
            alpha = 0.4
            beta = 0.0
            gamma = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.weights.alpha, 0.4);
        assert_eq!(config.weights.delta, 0.35);
        assert_eq!(config.thresholds.high, 0.7);
    }
}
