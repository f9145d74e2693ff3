//! # Audit Configuration
//!
//! Controls how stock changes are written to the `inventory_logs` trail.
//!
//! ## Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Strict (default)                  BestEffort                          │
//! │  ────────────────                  ──────────                          │
//! │  BEGIN                             BEGIN                               │
//! │    UPDATE menu_items ...             UPDATE menu_items ...             │
//! │    INSERT inventory_logs ...       COMMIT                              │
//! │  COMMIT                            INSERT inventory_logs ...           │
//! │                                      └── failure: warn!, not returned  │
//! │  audit failure → ROLLBACK,                                             │
//! │  error returned                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Environment
//! | Variable                         | Values                  | Default  |
//! |----------------------------------|-------------------------|----------|
//! | `BISTRO_AUDIT_POLICY`            | `strict`, `best_effort` | `strict` |
//! | `BISTRO_AUDIT_ORDER_DECREMENTS`  | `true/false/1/0`        | `true`   |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Environment variable selecting the [`AuditPolicy`].
pub const ENV_AUDIT_POLICY: &str = "BISTRO_AUDIT_POLICY";

/// Environment variable toggling sale records for order decrements.
pub const ENV_AUDIT_ORDER_DECREMENTS: &str = "BISTRO_AUDIT_ORDER_DECREMENTS";

// =============================================================================
// Audit Policy
// =============================================================================

/// What happens when an audit record cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditPolicy {
    /// Audit write shares the stock change's transaction; failure rolls both back.
    #[default]
    Strict,
    /// Stock change commits first; audit failure is logged and swallowed.
    BestEffort,
}

impl AuditPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuditPolicy::Strict => "strict",
            AuditPolicy::BestEffort => "best_effort",
        }
    }
}

impl fmt::Display for AuditPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an audit setting.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {key}: '{value}'")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
}

impl FromStr for AuditPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(AuditPolicy::Strict),
            "best_effort" | "best-effort" | "besteffort" => Ok(AuditPolicy::BestEffort),
            _ => Err(ConfigError {
                key: ENV_AUDIT_POLICY.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

// =============================================================================
// Audit Config
// =============================================================================

/// Audit trail settings carried by [`crate::DbConfig`] into the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    pub policy: AuditPolicy,

    /// Write one `sale` adjustment per order line on commit.
    pub record_order_decrements: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            policy: AuditPolicy::Strict,
            record_order_decrements: true,
        }
    }
}

impl AuditConfig {
    /// Loads settings from the process environment.
    ///
    /// Unset variables keep their defaults. Unparsable values are logged at
    /// `warn` and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AuditConfig::from_env`] with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AuditConfig::default();

        if let Some(raw) = lookup(ENV_AUDIT_POLICY) {
            match raw.parse::<AuditPolicy>() {
                Ok(policy) => config.policy = policy,
                Err(e) => warn!(error = %e, "Ignoring audit policy setting"),
            }
        }

        if let Some(raw) = lookup(ENV_AUDIT_ORDER_DECREMENTS) {
            match parse_flag(ENV_AUDIT_ORDER_DECREMENTS, &raw) {
                Ok(flag) => config.record_order_decrements = flag,
                Err(e) => warn!(error = %e, "Ignoring audit order-decrement setting"),
            }
        }

        config
    }

    pub fn policy(mut self, policy: AuditPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn record_order_decrements(mut self, record: bool) -> Self {
        self.record_order_decrements = record;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuditConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AuditConfig::default());
        assert_eq!(config.policy, AuditPolicy::Strict);
        assert!(config.record_order_decrements);
    }

    #[test]
    fn test_reads_settings() {
        let config = AuditConfig::from_lookup(lookup(&[
            (ENV_AUDIT_POLICY, "best_effort"),
            (ENV_AUDIT_ORDER_DECREMENTS, "0"),
        ]));
        assert_eq!(config.policy, AuditPolicy::BestEffort);
        assert!(!config.record_order_decrements);
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let config = AuditConfig::from_lookup(lookup(&[
            (ENV_AUDIT_POLICY, "sometimes"),
            (ENV_AUDIT_ORDER_DECREMENTS, "maybe"),
        ]));
        assert_eq!(config, AuditConfig::default());
    }

    #[test]
    fn test_policy_round_trips_through_display() {
        for policy in [AuditPolicy::Strict, AuditPolicy::BestEffort] {
            assert_eq!(policy.to_string().parse::<AuditPolicy>().unwrap(), policy);
        }
    }
}
