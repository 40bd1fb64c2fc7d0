//! Quiz configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::distractor::DEFAULT_DISTRACTOR_COUNT;
use crate::model::Direction;
use crate::parser::TableFormat;
use crate::session::DEFAULT_WORD_COUNT;

/// Display names of the two languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    #[serde(default = "default_source_language")]
    pub source: String,
    #[serde(default = "default_target_language")]
    pub target: String,
}

fn default_source_language() -> String {
    "Romanian".to_string()
}
fn default_target_language() -> String {
    "Turkish".to_string()
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            source: default_source_language(),
            target: default_target_language(),
        }
    }
}

impl LanguagePair {
    /// `(prompt language, answer language)` for a direction.
    pub fn for_direction(&self, direction: Direction) -> (&str, &str) {
        match direction {
            Direction::SourceToTarget => (&self.source, &self.target),
            Direction::TargetToSource => (&self.target, &self.source),
        }
    }
}

/// Top-level lexiquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Word list to load when none is given on the command line.
    #[serde(default)]
    pub word_list: Option<PathBuf>,
    /// Rounds per session.
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    /// Wrong options per round.
    #[serde(default = "default_distractor_count")]
    pub distractor_count: usize,
    /// Direction of the first session.
    #[serde(default)]
    pub direction: Direction,
    /// Fixed RNG seed for reproducible sessions.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Pause after an answer before the next round, in milliseconds.
    #[serde(default = "default_reveal_delay")]
    pub reveal_delay_ms: u64,
    /// Dictionary lookup URL; `{slug}` is replaced with the word.
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,
    #[serde(default)]
    pub languages: LanguagePair,
    #[serde(default)]
    pub table: TableFormat,
}

fn default_word_count() -> usize {
    DEFAULT_WORD_COUNT
}
fn default_distractor_count() -> usize {
    DEFAULT_DISTRACTOR_COUNT
}
fn default_reveal_delay() -> u64 {
    1000
}
fn default_dictionary_url() -> String {
    "https://dexonline.ro/definitie/{slug}".to_string()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            word_list: None,
            word_count: default_word_count(),
            distractor_count: default_distractor_count(),
            direction: Direction::default(),
            seed: None,
            reveal_delay_ms: default_reveal_delay(),
            dictionary_url: default_dictionary_url(),
            languages: LanguagePair::default(),
            table: TableFormat::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lexiquiz.toml` in the current directory
/// 2. `~/.config/lexiquiz/config.toml`
///
/// Environment variable overrides: `LEXIQUIZ_WORD_LIST`, `LEXIQUIZ_WORD_COUNT`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lexiquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML config string and resolve `${VAR}` references in paths.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    let mut config: QuizConfig = toml::from_str(content)?;
    config.word_list = config
        .word_list
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));
    Ok(config)
}

fn apply_env_overrides(config: &mut QuizConfig) -> Result<()> {
    if let Ok(path) = std::env::var("LEXIQUIZ_WORD_LIST") {
        config.word_list = Some(PathBuf::from(path));
    }
    if let Ok(count) = std::env::var("LEXIQUIZ_WORD_COUNT") {
        config.word_count = count
            .trim()
            .parse()
            .with_context(|| format!("invalid LEXIQUIZ_WORD_COUNT: '{count}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lexiquiz"))
}
