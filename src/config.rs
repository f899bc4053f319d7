//! Translator configuration.
//!
//! Loaded from YAML; every field has a default, so an empty file (or no file)
//! gives the standard step budgets and preview lengths.
//!
//! ```yaml
//! symbolic:
//!   floor: 5000
//!   per_input_char: 10
//! text:
//!   floor: 2000
//!   per_input_char: 2
//! previews:
//!   fragment_chars: 20
//!   untranslated_chars: 150
//!   stuck_chars: 100
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::translate::bounded::step_budget;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read translator config from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translator config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Step budget for {0} has zero floor and zero per-char multiplier")]
    ZeroBudget(&'static str),
}

/// Step budget: `max(floor, input_chars * per_input_char)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepBudget {
    pub floor: usize,
    pub per_input_char: usize,
}

impl StepBudget {
    pub fn for_input(&self, input_chars: usize) -> usize {
        step_budget(self.floor, self.per_input_char, input_chars)
    }
}

/// Maximum chars quoted inside annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewLimits {
    /// `[Unrecognized Fragment/Symbol: ...]`
    pub fragment_chars: usize,
    /// `[# NL: ...]`
    pub untranslated_chars: usize,
    /// `[# !! PARSER BUG !! ...]`
    pub stuck_chars: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            fragment_chars: 20,
            untranslated_chars: 150,
            stuck_chars: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct TranslatorConfig {
    /// SS→NL budget
    pub symbolic: StepBudget,
    /// NL→SS budget
    pub text: StepBudget,
    pub previews: PreviewLimits,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            symbolic: StepBudget {
                floor: 5000,
                per_input_char: 10,
            },
            text: StepBudget {
                floor: 2000,
                per_input_char: 2,
            },
            previews: PreviewLimits::default(),
        }
    }
}

/// On-disk shape: every budget field is optional and falls back to the
/// default for its own direction.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    symbolic: BudgetOverrides,
    text: BudgetOverrides,
    previews: PreviewLimits,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BudgetOverrides {
    floor: Option<usize>,
    per_input_char: Option<usize>,
}

impl BudgetOverrides {
    fn apply(self, base: StepBudget) -> StepBudget {
        StepBudget {
            floor: self.floor.unwrap_or(base.floor),
            per_input_char: self.per_input_char.unwrap_or(base.per_input_char),
        }
    }
}

impl From<ConfigFile> for TranslatorConfig {
    fn from(file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            symbolic: file.symbolic.apply(defaults.symbolic),
            text: file.text.apply(defaults.text),
            previews: file.previews,
        }
    }
}

impl TranslatorConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null, not as an empty map
        let config: Self = if source.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(source)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading translator config");
        Self::from_yaml_str(&content)
    }

    /// Load from `path` if given, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// A budget of zero for every input would halt every non-empty scan.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbolic.floor == 0 && self.symbolic.per_input_char == 0 {
            return Err(ConfigError::ZeroBudget("symbolic"));
        }
        if self.text.floor == 0 && self.text.per_input_char == 0 {
            return Err(ConfigError::ZeroBudget("text"));
        }
        Ok(())
    }
}
