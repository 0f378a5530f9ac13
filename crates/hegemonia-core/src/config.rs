//! Configuration loading and typed config structures for the simulation.
//!
//! The canonical configuration lives in `hegemonia-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader. System parameter sections
//! are the param structs from `hegemonia-systems`, embedded directly so
//! a test override and a YAML override are the same thing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use hegemonia_systems::{ConsciousnessParams, EconomyParams, MetabolismParams, TopologyParams};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `hegemonia-config.yaml`. All fields have
/// defaults, so an absent file or empty document is a valid
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, run length, genesis economy).
    #[serde(default)]
    pub world: WorldConfig,

    /// Subsistence, extraction, and policy parameters.
    #[serde(default)]
    pub economy: EconomyParams,

    /// Consciousness drift and solidarity parameters.
    #[serde(default)]
    pub consciousness: ConsciousnessParams,

    /// Territorial metabolism parameters.
    #[serde(default)]
    pub metabolism: MetabolismParams,

    /// Percolation monitor parameters.
    #[serde(default)]
    pub topology: TopologyParams,

    /// Contradiction detection and lifecycle parameters.
    #[serde(default)]
    pub contradiction: ContradictionParams,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Number of ticks the engine binary runs before stopping.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Genesis level of the imperial rent pool.
    #[serde(default = "default_initial_rent_pool")]
    pub initial_rent_pool: f64,

    /// Genesis super-wage rate per labor-aristocrat head.
    #[serde(default = "default_super_wage_rate")]
    pub super_wage_rate: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            max_ticks: default_max_ticks(),
            initial_rent_pool: default_initial_rent_pool(),
            super_wage_rate: default_super_wage_rate(),
        }
    }
}

/// Contradiction detection thresholds and lifecycle bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionParams {
    /// Mean exploitation tension above which the capital-labor
    /// contradiction is detected.
    #[serde(default = "default_detect_exploitation_tension")]
    pub detect_exploitation_tension: f64,

    /// Pool ratio below which the core-periphery drain contradiction is
    /// detected.
    #[serde(default = "default_detect_drain_pool_ratio")]
    pub detect_drain_pool_ratio: f64,

    /// Intensity value at which a latent contradiction becomes active.
    #[serde(default = "default_activation_intensity")]
    pub activation_intensity: f64,

    /// Intensity value at which an active contradiction escalates.
    #[serde(default = "default_escalation_intensity")]
    pub escalation_intensity: f64,

    /// Intensity value at which an escalating contradiction ruptures and
    /// the advisor is consulted for a resolution method.
    #[serde(default = "default_rupture_intensity")]
    pub rupture_intensity: f64,
}

impl Default for ContradictionParams {
    fn default() -> Self {
        Self {
            detect_exploitation_tension: default_detect_exploitation_tension(),
            detect_drain_pool_ratio: default_detect_drain_pool_ratio(),
            activation_intensity: default_activation_intensity(),
            escalation_intensity: default_escalation_intensity(),
            rupture_intensity: default_rupture_intensity(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Tracing filter directive (e.g. `info`, `hegemonia_core=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log a tick summary every this many ticks.
    #[serde(default = "default_summary_interval")]
    pub summary_interval: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            summary_interval: default_summary_interval(),
        }
    }
}

fn default_world_name() -> String {
    "imperial-circuit".to_owned()
}

fn default_max_ticks() -> u64 {
    1000
}

fn default_initial_rent_pool() -> f64 {
    500.0
}

fn default_super_wage_rate() -> f64 {
    2.0
}

fn default_detect_exploitation_tension() -> f64 {
    0.2
}

fn default_detect_drain_pool_ratio() -> f64 {
    0.5
}

fn default_activation_intensity() -> f64 {
    0.25
}

fn default_escalation_intensity() -> f64 {
    0.5
}

fn default_rupture_intensity() -> f64 {
    0.75
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_summary_interval() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = SimulationConfig::parse("{}");
        assert_eq!(config.ok(), Some(SimulationConfig::default()));
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let config = SimulationConfig::parse(
            "world:\n  max_ticks: 50\neconomy:\n  alpha: 0.6\n",
        )
        .ok();
        let config = config.unwrap_or_default();
        assert_eq!(config.world.max_ticks, 50);
        assert!((config.economy.alpha - 0.6).abs() < 1e-12);
        // Untouched sections keep their defaults.
        assert!((config.economy.base_subsistence_cost - 1.0).abs() < 1e-12);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(SimulationConfig::parse("world: [unclosed").is_err());
    }
}
