use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{MowerError, MowerResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSection,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSection {
    /// Package identifier of the target application, e.g. `com.hypergryph.arknights`.
    pub app_id: String,
}

/// Applied uniformly to the top-level task loop and every navigator sub-loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retry_time")]
    pub max_retry_time: u32,
    #[serde(default = "default_retry_pause_ms")]
    pub retry_pause_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retry_time: default_max_retry_time(),
            retry_pause_ms: default_retry_pause_ms(),
        }
    }
}

impl RetryConfig {
    pub fn retry_pause(&self) -> Duration {
        Duration::from_millis(self.retry_pause_ms)
    }
}

fn default_max_retry_time() -> u32 {
    3
}

fn default_retry_pause_ms() -> u64 {
    3000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Wait after launching the app before the first interaction.
    #[serde(default = "default_launch_warmup_ms")]
    pub launch_warmup_ms: u64,
    #[serde(default = "default_loading_wait_ms")]
    pub loading_wait_ms: u64,
    /// Wait while an operation (auto-deploy) is still running.
    #[serde(default = "default_operation_wait_ms")]
    pub operation_wait_ms: u64,
    #[serde(default = "default_login_start_settle_ms")]
    pub login_start_settle_ms: u64,
    #[serde(default = "default_settle_ms")]
    pub default_settle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            launch_warmup_ms: default_launch_warmup_ms(),
            loading_wait_ms: default_loading_wait_ms(),
            operation_wait_ms: default_operation_wait_ms(),
            login_start_settle_ms: default_login_start_settle_ms(),
            default_settle_ms: default_settle_ms(),
        }
    }
}

fn default_launch_warmup_ms() -> u64 {
    10_000
}

fn default_loading_wait_ms() -> u64 {
    3000
}

fn default_operation_wait_ms() -> u64 {
    10_000
}

fn default_login_start_settle_ms() -> u64 {
    3000
}

fn default_settle_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_adb_path")]
    pub adb_path: String,
    /// Device serial passed as `adb -s`; `None` lets adb pick the only device.
    #[serde(default)]
    pub serial: Option<String>,
    /// Deadline for a single adb invocation; an offline device otherwise
    /// blocks in "waiting for device".
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            adb_path: default_adb_path(),
            serial: None,
            command_timeout_ms: default_command_timeout_ms(),
        }
    }
}

impl DeviceConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

fn default_adb_path() -> String {
    "adb".to_string()
}

fn default_command_timeout_ms() -> u64 {
    20_000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsConfig {
    /// Fills missing values from `MOWER_USERNAME` / `MOWER_PASSWORD`.
    pub fn with_env_fallback(mut self) -> Self {
        if self.username.is_none() {
            self.username = std::env::var("MOWER_USERNAME").ok();
        }
        if self.password.is_none() {
            self.password = std::env::var("MOWER_PASSWORD").ok();
        }
        self
    }
}

impl AppConfig {
    /// Config with defaults everywhere except the target application.
    pub fn for_app(app_id: impl Into<String>) -> Self {
        Self {
            app: AppSection {
                app_id: app_id.into(),
            },
            retry: RetryConfig::default(),
            timing: TimingConfig::default(),
            device: DeviceConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> MowerResult<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        if config.app.app_id.trim().is_empty() {
            return Err(MowerError::Config("app.app_id must not be empty".into()));
        }
        if config.retry.max_retry_time == 0 {
            return Err(MowerError::Config(
                "retry.max_retry_time must be at least 1".into(),
            ));
        }
        if config.device.command_timeout_ms == 0 {
            return Err(MowerError::Config(
                "device.command_timeout_ms must be positive".into(),
            ));
        }
        config.credentials = config.credentials.with_env_fallback();
        Ok(config)
    }
}

fn resolve_config_path() -> MowerResult<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join("config.toml");
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Ok(candidate);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    let candidate = cwd.join("config.toml");
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in working directory");
        return Ok(candidate);
    }

    if let Some(dir) = dirs::config_dir() {
        let candidate = dir.join("mower").join("config.toml");
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found in user config dir");
            return Ok(candidate);
        }
    }

    Err(MowerError::Config(
        "config.toml not found next to executable, in working directory or user config dir"
            .into(),
    ))
}

pub fn load_config() -> MowerResult<AppConfig> {
    let path = resolve_config_path()?;
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> MowerResult<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = AppConfig::from_toml_str(&content)?;
    tracing::info!(
        path = %path.display(),
        app_id = %config.app.app_id,
        max_retry_time = config.retry.max_retry_time,
        "config loaded"
    );
    Ok(config)
}
