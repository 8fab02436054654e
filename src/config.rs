//! Runtime Configuration
//!
//! Settings start from built-in defaults (matching a local Inngest dev server),
//! are overlaid by an optional TOML file and finally by environment variables.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "rag_console.toml";
pub const DEFAULT_RUNS_API_BASE: &str = "http://127.0.0.1:8288/v1";
pub const DEFAULT_EVENT_API_BASE: &str = "http://127.0.0.1:8288";
pub const DEV_EVENT_KEY: &str = "NO_EVENT_KEY_SET";

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub upload_dir: PathBuf,
    /// Base of the run-status API (`{base}/events/{id}/runs`).
    pub runs_api_base: String,
    /// Base of the event ingestion API (`{base}/e/{key}`).
    pub event_api_base: String,
    pub event_key: Option<String>,
    pub is_production: bool,
    pub poll_timeout_secs: f64,
    pub poll_interval_secs: f64,
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8501".into(),
            upload_dir: PathBuf::from("uploads"),
            runs_api_base: DEFAULT_RUNS_API_BASE.into(),
            event_api_base: DEFAULT_EVENT_API_BASE.into(),
            event_key: None,
            is_production: false,
            poll_timeout_secs: 120.0,
            poll_interval_secs: 0.5,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Shape of the optional TOML file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    bind_addr: Option<String>,
    upload_dir: Option<PathBuf>,
    runs_api_base: Option<String>,
    event_api_base: Option<String>,
    event_key: Option<String>,
    is_production: Option<bool>,
    poll_timeout_secs: Option<f64>,
    poll_interval_secs: Option<f64>,
    max_upload_bytes: Option<usize>,
}

impl Settings {
    /// Poll ceiling; falls back to the default when the value is not a valid duration.
    pub fn poll_timeout(&self) -> Duration {
        to_duration(self.poll_timeout_secs)
            .unwrap_or_else(|| Duration::from_secs_f64(Settings::default().poll_timeout_secs))
    }

    pub fn poll_interval(&self) -> Duration {
        to_duration(self.poll_interval_secs)
            .unwrap_or_else(|| Duration::from_secs_f64(Settings::default().poll_interval_secs))
    }

    /// Event key sent with every event. Dev servers accept any key.
    pub fn effective_event_key(&self) -> &str {
        self.event_key.as_deref().unwrap_or(DEV_EVENT_KEY)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if to_duration(self.poll_timeout_secs).is_none() {
            bail!(
                "poll timeout must be a positive number of seconds, got {}",
                self.poll_timeout_secs
            );
        }
        if to_duration(self.poll_interval_secs).is_none() {
            bail!(
                "poll interval must be a positive number of seconds, got {}",
                self.poll_interval_secs
            );
        }
        if self.is_production && self.event_key.is_none() {
            bail!("INNGEST_EVENT_KEY is required in production mode");
        }
        Ok(())
    }

    /// Builds settings from optional TOML text and an environment lookup.
    pub fn from_sources<F>(file_contents: Option<&str>, env: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(raw) = file_contents {
            let file_cfg: FileSettings =
                toml::from_str(raw).context("failed to parse configuration file")?;
            settings.apply_file(file_cfg);
        }

        settings.apply_env(env);
        settings.runs_api_base = trim_base(&settings.runs_api_base);
        settings.event_api_base = trim_base(&settings.event_api_base);
        Ok(settings)
    }

    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.bind_addr {
            self.bind_addr = v;
        }
        if let Some(v) = file_cfg.upload_dir {
            self.upload_dir = v;
        }
        if let Some(v) = file_cfg.runs_api_base {
            self.runs_api_base = v;
        }
        if let Some(v) = file_cfg.event_api_base {
            self.event_api_base = v;
        }
        if let Some(v) = file_cfg.event_key {
            self.event_key = Some(v);
        }
        if let Some(v) = file_cfg.is_production {
            self.is_production = v;
        }
        if let Some(v) = file_cfg.poll_timeout_secs {
            self.poll_timeout_secs = v;
        }
        if let Some(v) = file_cfg.poll_interval_secs {
            self.poll_interval_secs = v;
        }
        if let Some(v) = file_cfg.max_upload_bytes {
            self.max_upload_bytes = v;
        }
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env("RAG_UI_BIND") {
            self.bind_addr = v;
        }
        if let Some(v) = env("RAG_UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(v);
        }
        if let Some(v) = env("INNGEST_API_BASE") {
            self.runs_api_base = v;
        }
        if let Some(v) = env("INNGEST_EVENT_API_BASE_URL") {
            self.event_api_base = v;
        }
        if let Some(v) = env("INNGEST_EVENT_KEY").filter(|v| !v.trim().is_empty()) {
            self.event_key = Some(v);
        }
        if let Some(v) = env("INNGEST_DEV") {
            self.is_production = matches!(v.trim(), "0" | "false");
        }
        if let Some(v) = parse_env(&env, "RAG_POLL_TIMEOUT_SECS") {
            self.poll_timeout_secs = v;
        }
        if let Some(v) = parse_env(&env, "RAG_POLL_INTERVAL_SECS") {
            self.poll_interval_secs = v;
        }
        if let Some(v) = parse_env(&env, "RAG_MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = v;
        }
    }
}

fn parse_env<F, T>(env: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = env(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

/// Non-zero duration for `secs`, or `None` if it is negative, NaN, infinite or overflows.
fn to_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
}

fn trim_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// Loads settings from `RAG_CONFIG` (or `rag_console.toml`) and the process environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let path = std::env::var("RAG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let raw = read_optional(Path::new(&path))?;
    let settings = Settings::from_sources(raw.as_deref(), |key| std::env::var(key).ok())?;
    settings.validate()?;
    Ok(settings)
}

fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            tracing::info!("Loaded configuration from {}", path.display());
            Ok(Some(raw))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => {
            Err(e).with_context(|| format!("failed to read configuration '{}'", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_target_local_dev_server() {
        let settings = Settings::from_sources(None, env_from(&[])).unwrap();

        assert_eq!(settings.runs_api_base, "http://127.0.0.1:8288/v1");
        assert_eq!(settings.upload_dir, PathBuf::from("uploads"));
        assert_eq!(settings.poll_timeout(), Duration::from_secs(120));
        assert_eq!(settings.poll_interval(), Duration::from_millis(500));
        assert_eq!(settings.effective_event_key(), DEV_EVENT_KEY);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = r#"
            runs_api_base = "http://file-host/v1/"
            poll_timeout_secs = 30.0
            upload_dir = "/srv/pdfs"
        "#;
        let env = env_from(&[("INNGEST_API_BASE", "http://env-host:9000/v1/")]);

        let settings = Settings::from_sources(Some(file), env).unwrap();

        assert_eq!(settings.runs_api_base, "http://env-host:9000/v1");
        assert_eq!(settings.poll_timeout_secs, 30.0);
        assert_eq!(settings.upload_dir, PathBuf::from("/srv/pdfs"));
    }

    #[test]
    fn test_invalid_numeric_env_is_ignored() {
        let env = env_from(&[("RAG_POLL_INTERVAL_SECS", "fast")]);
        let settings = Settings::from_sources(None, env).unwrap();

        assert_eq!(settings.poll_interval_secs, 0.5);
    }

    #[test]
    fn test_unknown_file_key_is_rejected() {
        let result = Settings::from_sources(Some("bogus = 1"), env_from(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_production_requires_event_key() {
        let env = env_from(&[("INNGEST_DEV", "0")]);
        let settings = Settings::from_sources(None, env).unwrap();
        assert!(settings.is_production);
        assert!(settings.validate().is_err());

        let env = env_from(&[("INNGEST_DEV", "0"), ("INNGEST_EVENT_KEY", "secret")]);
        let settings = Settings::from_sources(None, env).unwrap();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.effective_event_key(), "secret");
    }

    #[test]
    fn test_non_positive_interval_fails_validation() {
        // ARRANGE
        let env = env_from(&[("RAG_POLL_INTERVAL_SECS", "0")]);

        // ACT
        let settings = Settings::from_sources(None, env).unwrap();

        // ASSERT
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_oversized_timeout_fails_validation_without_panicking() {
        // ARRANGE
        let env = env_from(&[("RAG_POLL_TIMEOUT_SECS", "1e30")]);

        // ACT
        let settings = Settings::from_sources(None, env).unwrap();
        let result = std::panic::catch_unwind(|| settings.poll_timeout());

        // ASSERT: rejected at startup, and the accessor itself never panics
        assert!(settings.validate().is_err());
        assert!(result.is_ok());
    }

    #[test]
    fn test_infinite_interval_fails_validation() {
        let env = env_from(&[("RAG_POLL_INTERVAL_SECS", "inf")]);
        let settings = Settings::from_sources(None, env).unwrap();

        assert!(settings.validate().is_err());
    }
}
