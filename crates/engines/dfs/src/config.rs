//! Engine settings loaded from TOML.
//!
//! ```toml
//! sel_depth = 5
//! max_nodes = 200000
//! report_interval_ms = 500
//! evaluators = ["material", "space"]
//! ```

use std::{path::Path, sync::Arc, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    eval::{Evaluator, Material, Space},
    limits::SearchLimits,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Built-in evaluators selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    Material,
    Space,
}

impl EvaluatorKind {
    pub fn build(self) -> Arc<dyn Evaluator> {
        match self {
            EvaluatorKind::Material => Arc::new(Material),
            EvaluatorKind::Space => Arc::new(Space),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Lines longer than this many plies are scored but not expanded
    pub sel_depth: usize,
    pub max_nodes: Option<u64>,
    pub move_time_ms: Option<u64>,
    pub report_interval_ms: u64,
    pub evaluators: Vec<EvaluatorKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sel_depth: 4,
            max_nodes: None,
            move_time_ms: None,
            report_interval_ms: 1000,
            evaluators: vec![EvaluatorKind::Material],
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sel_depth == 0 {
            return Err(ConfigError::Zero("sel_depth"));
        }
        if self.report_interval_ms == 0 {
            return Err(ConfigError::Zero("report_interval_ms"));
        }
        Ok(())
    }

    /// Default budgets for a `go` without explicit limits.
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_nodes: self.max_nodes,
            move_time: self.move_time_ms.map(Duration::from_millis),
        }
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
