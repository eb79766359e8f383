//! Server configuration: an optional TOML file layered under `MENTOR_*`
//! environment variables.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use mentor_llm::LlmConfig;
use serde::Deserialize;

/// Runtime server configuration.
///
/// Every field has a default, so an empty (or absent) file is valid.
/// Nested keys use `__` in the environment, e.g. `MENTOR_LLM__API_KEY`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub llm:        LlmConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_owned(),
      port:       8000,
      store_path: PathBuf::from("state/context_store.sqlite"),
      llm:        LlmConfig::default(),
    }
  }
}

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::load_with(path, Environment::with_prefix("MENTOR"))
  }

  fn load_with(path: &Path, env: Environment) -> Result<Self, ConfigError> {
    Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(env.prefix_separator("_").separator("__"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
