//! Tool configuration.
//!
//! Values come from `~/.config/fetch-events/config.toml` (optional), then
//! `FETCH_EVENTS_*` environment variables. Command-line flags are applied on
//! top by the binary.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{FetchError, FetchResult};

static DEFAULT_TOOL: &str = "gog";
const DEFAULT_MAX_RESULTS: u32 = 50;

fn default_tool() -> String {
    DEFAULT_TOOL.to_string()
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    /// Calendar CLI to invoke, either a name looked up in PATH or a path.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Value passed to the tool's `--max` flag.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            tool: default_tool(),
            max_results: default_max_results(),
        }
    }
}

impl FetchConfig {
    pub fn config_path() -> FetchResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FetchError::Config("Could not determine config directory".into()))?
            .join("fetch-events");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the user config file and the environment.
    pub fn load() -> FetchResult<Self> {
        Self::load_from(Self::config_path()?, Environment::with_prefix("FETCH_EVENTS"))
    }

    /// Like [`FetchConfig::load`], but an unreadable config only logs a
    /// warning and falls back to the defaults.
    pub fn load_or_default() -> Self {
        Self::or_default(Self::load())
    }

    fn or_default(loaded: FetchResult<Self>) -> Self {
        loaded.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable configuration, using defaults");
            FetchConfig::default()
        })
    }

    fn load_from(path: PathBuf, env: Environment) -> FetchResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env.try_parsing(true))
            .build()
            .map_err(|e| FetchError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FetchError::Config(e.to_string()))
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, tool: Option<String>, max_results: Option<u32>) -> Self {
        if let Some(tool) = tool {
            self.tool = tool;
        }
        if let Some(max_results) = max_results {
            self.max_results = max_results;
        }
        self
    }
}
