use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{CompileError, Result};
use crate::syntax::is_identifier;
use crate::syntax::scanner::Markers;

pub const CONFIG_FILE: &str = "ftdc.toml";

/// Compiler settings from ftdc.toml.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// File name prefix of sources and of the generated evaluator.
    pub prefix: String,
    /// Artifact directory; relative paths are taken from the config file.
    pub out_dir: Option<PathBuf>,
    pub markers: Markers,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: "ftd".to_string(),
            out_dir: None,
            markers: Markers::default(),
        }
    }
}

impl Config {
    /// Load settings from an ftdc.toml file.
    pub fn load(toml_path: &Path) -> Result<Config> {
        let content =
            std::fs::read_to_string(toml_path).map_err(|e| CompileError::io(toml_path, e))?;

        let root_dir = toml_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();

        // Minimal TOML parsing: flat `key = "value"` pairs only
        let mut config = Config::default();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.is_empty() || trimmed.starts_with('[') {
                continue;
            }
            if let Some((key, value)) = trimmed.split_once('=') {
                let key = key.trim().trim_matches('"');
                let value = value.trim().trim_matches('"');
                match key {
                    "prefix" => config.prefix = value.to_string(),
                    "out_dir" => config.out_dir = Some(root_dir.join(value)),
                    "inputs_marker" => config.markers.inputs = value.to_string(),
                    "outputs_marker" => config.markers.outputs = value.to_string(),
                    _ => warn!(key, path = %toml_path.display(), "unknown configuration key"),
                }
            }
        }

        let invalid = |reason: &str| CompileError::InvalidConfig {
            path: toml_path.to_path_buf(),
            reason: reason.to_string(),
        };
        if !is_identifier(&config.prefix) {
            return Err(invalid("'prefix' must be a valid identifier"));
        }
        if config.markers.inputs.is_empty() || config.markers.outputs.is_empty() {
            return Err(invalid("region markers must not be empty"));
        }

        Ok(config)
    }

    /// Try to find an ftdc.toml in the given directory or its ancestors.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.exists() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Settings for sources in `start_dir`, or the defaults when no config
    /// file is found.
    pub fn discover(start_dir: &Path) -> Result<Config> {
        match Config::find(start_dir) {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                Config::load(&path)
            }
            None => Ok(Config::default()),
        }
    }
}
