//! Runtime configuration.
//!
//! [`Config`] is loaded once from TOML and passed by value/reference into every component that
//! needs it. Every field has a default, so a partial file (or no file at all) is valid.
//!
//! ```toml
//! [directories]
//! backup = "./backup"
//! target = "./chatReader"
//!
//! [analysis]
//! min_text_length = 100
//! max_terms = 10
//! stemmer = "russian"
//!
//! [stop_words]
//! common = ["this", "that"]
//! technical = ["string", "array"]
//! ```

pub mod formatters;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analyzers::stopwords::{BUILTIN_COMMON, BUILTIN_TECHNICAL};
use crate::utils::{MAX_CONFIG_SIZE_BYTES, validate_file_size};

pub use formatters::{Formatters, format_date, slugify};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub directories: DirectoriesConfig,
    pub files: FilesConfig,
    pub store: StoreConfig,
    pub analysis: AnalysisConfig,
    pub stop_words: StopWordsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoriesConfig {
    pub backup: PathBuf,
    pub target: PathBuf,
}

impl Default for DirectoriesConfig {
    fn default() -> Self {
        Self { backup: PathBuf::from("./backup"), target: PathBuf::from("./chatReader") }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Case-insensitive regex matched against backup file names
    pub backup_pattern: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self { backup_pattern: "vscdb.*backup".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Substrings a store key must contain (any of them) to be read
    pub key_patterns: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_patterns: ["chat", "conversation", "history"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmerLanguage {
    #[default]
    Russian,
    English,
    /// Russian for Cyrillic tokens, English for everything else
    Bilingual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Conversations with less text than this are not rendered
    pub min_text_length: usize,
    pub max_terms: usize,
    pub stemmer: StemmerLanguage,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { min_text_length: 100, max_terms: 10, stemmer: StemmerLanguage::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopWordsConfig {
    pub common: Vec<String>,
    pub technical: Vec<String>,
}

impl Default for StopWordsConfig {
    fn default() -> Self {
        Self {
            common: BUILTIN_COMMON.iter().map(|s| s.to_string()).collect(),
            technical: BUILTIN_TECHNICAL.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StopWordsConfig {
    /// Generic and technical lists merged
    pub fn merged(&self) -> impl Iterator<Item = &str> {
        self.common.iter().chain(self.technical.iter()).map(String::as_str)
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        validate_file_size(path, MAX_CONFIG_SIZE_BYTES)?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load from `path` if given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let config = Self::load(path)?;
                tracing::info!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
