//! Runtime configuration, layered from `config.toml` and `CAMARA_*`
//! environment variables.

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use camara_sync::SyncConfig;
use camara_upstream::{DEFAULT_BASE_URL, UpstreamConfig};
use serde::Deserialize;

const ENV_PREFIX: &str = "CAMARA";

/// Every key is optional; missing keys take the [`Default`] value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                     String,
  pub port:                     u16,
  pub store_path:               PathBuf,
  pub upstream_base_url:        String,
  pub upstream_timeout_secs:    u64,
  pub user_agent:               String,
  pub page_size:                u32,
  pub sync_years:               Vec<i32>,
  pub legislator_page_delay_ms: u64,
  pub legislator_delay_ms:      u64,
  pub project_page_delay_ms:    u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let sync = SyncConfig::default();
    Self {
      host:                     "0.0.0.0".to_string(),
      port:                     8080,
      store_path:               PathBuf::from("./transparencia.db"),
      upstream_base_url:        DEFAULT_BASE_URL.to_string(),
      upstream_timeout_secs:    30,
      user_agent:               concat!("camara-server/", env!("CARGO_PKG_VERSION")).to_string(),
      page_size:                sync.page_size,
      sync_years:               sync.years,
      legislator_page_delay_ms: 200,
      legislator_delay_ms:      100,
      project_page_delay_ms:    200,
    }
  }
}

impl ServerConfig {
  /// Read `path` if it exists, then overlay the environment.
  pub fn load(path: PathBuf) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(environment())
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn upstream(&self) -> UpstreamConfig {
    UpstreamConfig {
      base_url:   self.upstream_base_url.clone(),
      timeout:    Duration::from_secs(self.upstream_timeout_secs),
      user_agent: self.user_agent.clone(),
    }
  }

  pub fn sync(&self) -> SyncConfig {
    SyncConfig {
      page_size:             self.page_size,
      years:                 self.sync_years.clone(),
      legislator_page_delay: Duration::from_millis(self.legislator_page_delay_ms),
      legislator_delay:      Duration::from_millis(self.legislator_delay_ms),
      project_page_delay:    Duration::from_millis(self.project_page_delay_ms),
    }
  }
}

/// `CAMARA_SYNC_YEARS=2023,2024` is read as a list.
fn environment() -> config::Environment {
  config::Environment::with_prefix(ENV_PREFIX)
    .try_parsing(true)
    .list_separator(",")
    .with_list_parse_key("sync_years")
}
