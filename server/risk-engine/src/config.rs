//! Scoring configuration with sane defaults.

use crate::types::RiskFlag;

/// Tunable constants for the impact score, hotspots and explanations.
#[derive(Debug, Clone)]
pub struct Config {
  /// Ceiling of the churn sub-score.
  pub churn_max_points: f64,
  /// Churn (additions + deletions) at which the churn sub-score saturates.
  pub churn_saturation_lines: u64,
  /// Ceiling of the summed risk weights.
  pub risk_max_points: u8,
  /// Per-flag weights: deps, migration, auth, config, secrets, payment.
  pub risk_weights: [u8; 6],
  /// Absolute bound on the change-type modifier.
  pub modifier_max_points: i32,
  /// Max hotspot files returned.
  pub max_hotspots: usize,
  /// Churn at or above which a magnitude explanation is emitted.
  pub large_churn_lines: u64,
}

impl Config {
  pub fn risk_weight(&self, flag: RiskFlag) -> u8 {
    self.risk_weights[flag as usize]
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      churn_max_points: 60.0,
      churn_saturation_lines: 10_000,
      risk_max_points: 35,
      // auth/payment/secrets weigh more than deps/config/migration.
      risk_weights: [8, 10, 15, 8, 18, 15],
      modifier_max_points: 5,
      max_hotspots: 10,
      large_churn_lines: 500,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn weights_follow_flag_order() {
    let config = Config::default();
    assert_eq!(config.risk_weight(RiskFlag::Deps), 8);
    assert_eq!(config.risk_weight(RiskFlag::Secrets), 18);
    for high in [RiskFlag::Auth, RiskFlag::Payment, RiskFlag::Secrets] {
      for low in [RiskFlag::Deps, RiskFlag::Config, RiskFlag::Migration] {
        assert!(config.risk_weight(high) > config.risk_weight(low));
      }
    }
  }

  #[test]
  fn defaults_within_contract_bounds() {
    let config = Config::default();
    assert!(config.churn_max_points <= 60.0);
    assert!(config.risk_max_points <= 35);
    assert!(config.modifier_max_points <= 5);
    assert!(config.max_hotspots <= 10);
  }
}
