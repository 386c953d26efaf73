//! Where the fitted artifacts live.
//!
//! Each path resolves independently: command-line flag, then environment
//! variable, then the TOML config file, then the built-in default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MODEL_ENV: &str = "CHURNWATCH_MODEL";
pub const PREPROCESSOR_ENV: &str = "CHURNWATCH_PREPROCESSOR";
pub const DEFAULT_CONFIG_FILE: &str = "churnwatch.toml";
pub const DEFAULT_MODEL_PATH: &str = "artifacts/churn_model.json";
pub const DEFAULT_PREPROCESSOR_PATH: &str = "artifacts/preprocessor.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessor: Option<PathBuf>,
}

/// Contents of `churnwatch.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub artifacts: ArtifactPaths,
}

impl ConfigFile {
    /// Read a config file. Relative artifact paths are taken relative to the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg: ConfigFile = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            let anchor = |p: Option<PathBuf>| {
                p.map(|p| if p.is_relative() { base.join(p) } else { p })
            };
            cfg.artifacts.model = anchor(cfg.artifacts.model.take());
            cfg.artifacts.preprocessor = anchor(cfg.artifacts.preprocessor.take());
        }
        Ok(cfg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub model_path: PathBuf,
    pub preprocessor_path: PathBuf,
}

impl ServiceConfig {
    pub fn new(model_path: impl Into<PathBuf>, preprocessor_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            preprocessor_path: preprocessor_path.into(),
        }
    }

    /// Resolve against the process environment. An explicit `config_path`
    /// must exist; otherwise `churnwatch.toml` is used only if present.
    pub fn resolve(
        overrides: &ArtifactPaths,
        config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(p) => Some(ConfigFile::load(p)?),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Some(ConfigFile::load(default)?)
                } else {
                    None
                }
            }
        };
        Ok(Self::resolve_with(overrides, file.as_ref(), |name| {
            std::env::var(name).ok()
        }))
    }

    /// Resolution with an injectable environment lookup.
    pub fn resolve_with<F>(overrides: &ArtifactPaths, file: Option<&ConfigFile>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: &Option<PathBuf>,
                    var: &str,
                    from_file: Option<&PathBuf>,
                    default: &str|
         -> PathBuf {
            flag.clone()
                .or_else(|| env(var).filter(|v| !v.is_empty()).map(PathBuf::from))
                .or_else(|| from_file.cloned())
                .unwrap_or_else(|| PathBuf::from(default))
        };
        let file_paths = file.map(|f| &f.artifacts);
        Self {
            model_path: pick(
                &overrides.model,
                MODEL_ENV,
                file_paths.and_then(|a| a.model.as_ref()),
                DEFAULT_MODEL_PATH,
            ),
            preprocessor_path: pick(
                &overrides.preprocessor,
                PREPROCESSOR_ENV,
                file_paths.and_then(|a| a.preprocessor.as_ref()),
                DEFAULT_PREPROCESSOR_PATH,
            ),
        }
    }
}
