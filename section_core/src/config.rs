//! # Configuration
//!
//! Where the data files live and how ambiguous matches are resolved.
//!
//! Values come from, in increasing precedence:
//! 1. built-in defaults
//! 2. a JSON file named by `SECTION_CONFIG`
//! 3. the `SECTION_DATA_DIR`, `SECTION_UC_FILE`, `SECTION_UB_FILE` and
//!    `SECTION_MATCH_POLICY` environment variables
//!
//! ## Example
//!
//! ```rust
//! use section_core::config::LookupConfig;
//! use section_core::matcher::MatchPolicy;
//!
//! let config: LookupConfig = serde_json::from_str(r#"{ "data_dir": "data" }"#).unwrap();
//! assert_eq!(config.match_policy, MatchPolicy::FirstMatch);
//! assert!(config.uc_path().starts_with("data"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{SectionError, SectionResult};
use crate::loader::{UB_FILE_NAME, UC_FILE_NAME};
use crate::matcher::MatchPolicy;

pub const ENV_CONFIG_FILE: &str = "SECTION_CONFIG";
pub const ENV_DATA_DIR: &str = "SECTION_DATA_DIR";
pub const ENV_UC_FILE: &str = "SECTION_UC_FILE";
pub const ENV_UB_FILE: &str = "SECTION_UB_FILE";
pub const ENV_MATCH_POLICY: &str = "SECTION_MATCH_POLICY";

/// Lookup settings shared by the CLI and the API server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Directory holding the UC and UB data files
    pub data_dir: PathBuf,

    /// UC file name, relative to `data_dir` unless absolute
    pub uc_file: PathBuf,

    /// UB file name, relative to `data_dir` unless absolute
    pub ub_file: PathBuf,

    /// Tie-break between rows sharing a depth x width
    pub match_policy: MatchPolicy,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            uc_file: PathBuf::from(UC_FILE_NAME),
            ub_file: PathBuf::from(UB_FILE_NAME),
            match_policy: MatchPolicy::default(),
        }
    }
}

impl LookupConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> SectionResult<Self> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SectionError::invalid_config(ENV_CONFIG_FILE, &display, e.to_string()))?;
        serde_json::from_str(&text)
            .map_err(|e| SectionError::invalid_config(ENV_CONFIG_FILE, &display, e.to_string()))
    }

    /// Build from the process environment
    pub fn from_env() -> SectionResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source (the environment, or a map in tests)
    pub fn from_lookup<F>(var: F) -> SectionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match var(ENV_CONFIG_FILE).filter(|v| !v.trim().is_empty()) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(dir) = var(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = var(ENV_UC_FILE) {
            config.uc_file = PathBuf::from(file);
        }
        if let Some(file) = var(ENV_UB_FILE) {
            config.ub_file = PathBuf::from(file);
        }
        if let Some(policy) = var(ENV_MATCH_POLICY) {
            config.match_policy = MatchPolicy::from_name(&policy).ok_or_else(|| {
                SectionError::invalid_config(ENV_MATCH_POLICY, &policy, "expected 'first_match' or 'prefer_mass'")
            })?;
        }

        Ok(config)
    }

    /// Full path of the UC data file
    pub fn uc_path(&self) -> PathBuf {
        self.data_dir.join(&self.uc_file)
    }

    /// Full path of the UB data file
    pub fn ub_path(&self) -> PathBuf {
        self.data_dir.join(&self.ub_file)
    }
}
