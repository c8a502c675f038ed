use crate::errors::{GardenError, Result};
use crate::language::Language;
use crate::resolver::SearchPathList;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".depgarden.toml";

/// Configuration loaded from `.depgarden.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Worker threads for scanning; rayon's default when absent
    pub jobs: Option<usize>,
    /// Glob patterns of files never handed to a solver
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub c: CConfig,
    #[serde(default)]
    pub ruby: RubyConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CConfig {
    #[serde(default)]
    pub include_paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RubyConfig {
    #[serde(default)]
    pub load_path: Vec<String>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|_| {
            GardenError::Config(format!("Could not read config file: {}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| GardenError::Config(format!("Invalid config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load `.depgarden.toml` by walking up from the given directory.
    ///
    /// Returns the config together with the directory it was found in.
    pub fn find_and_load(start: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                tracing::debug!(path = %config_path.display(), "loading config");
                return Ok(Some((Self::load(&config_path)?, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    fn validate(&self) -> Result<()> {
        if self.jobs == Some(0) {
            return Err(GardenError::Config("jobs must be at least 1".to_string()));
        }
        for lang in Language::ALL {
            for entry in self.raw_search_paths(lang) {
                if entry.trim().is_empty() {
                    return Err(GardenError::Config(format!(
                        "empty search path for {lang}"
                    )));
                }
                if entry.contains('\0') {
                    return Err(GardenError::Config(format!(
                        "search path for {lang} contains a NUL byte: {entry:?}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn raw_search_paths(&self, lang: Language) -> Vec<&str> {
        match lang {
            Language::C => self.c.include_paths.iter().map(String::as_str).collect(),
            Language::Ruby if self.ruby.load_path.is_empty() => vec!["lib"],
            Language::Ruby => self.ruby.load_path.iter().map(String::as_str).collect(),
        }
    }

    /// Search paths for `lang`, with relative entries anchored at `base_dir`.
    ///
    /// Ruby falls back to `lib` when no load path is configured.
    pub fn search_paths(&self, lang: Language, base_dir: &Path) -> Result<SearchPathList> {
        self.validate()?;
        Ok(self
            .raw_search_paths(lang)
            .into_iter()
            .map(|entry| {
                let dir = base_dir.join(entry.trim());
                if !dir.is_dir() {
                    tracing::warn!(lang = %lang, path = %dir.display(), "search path is not a directory");
                }
                dir
            })
            .collect())
    }
}
