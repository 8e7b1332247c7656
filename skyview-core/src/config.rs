use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{gateway::openweather::DEFAULT_BASE_URL, location::DEFAULT_IP_ENDPOINT};

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "SKYVIEW_API_KEY";

pub const DEFAULT_CITY: &str = "London";

/// How `here` lookups find the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    #[default]
    Ip,
    Fixed,
    Off,
}

impl LocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationMode::Ip => "ip",
            LocationMode::Fixed => "fixed",
            LocationMode::Off => "off",
        }
    }

    pub const fn all() -> &'static [LocationMode] {
        &[LocationMode::Ip, LocationMode::Fixed, LocationMode::Off]
    }
}

impl std::fmt::Display for LocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[location]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub mode: LocationMode,
    /// Used by `mode = "fixed"`.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endpoint: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            mode: LocationMode::default(),
            latitude: None,
            longitude: None,
            endpoint: DEFAULT_IP_ENDPOINT.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "London"
///
/// [location]
/// mode = "ip"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub default_city: String,
    pub base_url: String,
    pub location: LocationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: DEFAULT_CITY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if cfg.set_default_city(&cfg.default_city.clone()).is_err() {
            tracing::warn!(
                path = %path.display(),
                "blank default_city in config file, using {DEFAULT_CITY}"
            );
            cfg.default_city = DEFAULT_CITY.to_string();
        }

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyview", "skyview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the config file.
    pub fn api_key(&self) -> Result<String> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        self.resolve_api_key(from_env)
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .into_iter()
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeatherMap API key configured.\n\
                     Hint: run `skyview configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_default_city(&mut self, city: &str) -> Result<()> {
        let city = city.trim();
        if city.is_empty() {
            return Err(anyhow!("Default city must not be empty"));
        }
        self.default_city = city.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_openweather_and_london() {
        let cfg = Config::default();
        assert_eq!(cfg.default_city, "London");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.location.mode, LocationMode::Ip);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn api_key_errors_when_missing() {
        let cfg = Config::default();
        let err = cfg.resolve_api_key(None).unwrap_err();
        assert!(err.to_string().contains("No OpenWeatherMap API key configured"));
        assert!(err.to_string().contains("Hint: run `skyview configure`"));
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        assert_eq!(cfg.resolve_api_key(None).unwrap(), "FILE_KEY");
        assert_eq!(cfg.resolve_api_key(Some("ENV_KEY".into())).unwrap(), "ENV_KEY");
        assert_eq!(cfg.resolve_api_key(Some("   ".into())).unwrap(), "FILE_KEY");
    }

    #[test]
    fn default_city_rejects_blank() {
        let mut cfg = Config::default();
        assert!(cfg.set_default_city("   ").is_err());
        cfg.set_default_city("  Paris ").unwrap();
        assert_eq!(cfg.default_city, "Paris");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_city, DEFAULT_CITY);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_default_city("Oslo").unwrap();
        cfg.location = LocationConfig {
            mode: LocationMode::Fixed,
            latitude: Some(59.91),
            longitude: Some(10.75),
            ..LocationConfig::default()
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("KEY"));
        assert_eq!(loaded.default_city, "Oslo");
        assert_eq!(loaded.location.mode, LocationMode::Fixed);
        assert_eq!(loaded.location.latitude, Some(59.91));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"abc\"\n[location]\nmode = \"off\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.default_city, DEFAULT_CITY);
        assert_eq!(cfg.location.mode, LocationMode::Off);
        assert_eq!(cfg.location.endpoint, DEFAULT_IP_ENDPOINT);
    }

    #[test]
    fn blank_default_city_in_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = \"   \"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.default_city, DEFAULT_CITY);
    }

    #[test]
    fn default_city_from_file_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = \" Oslo \"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.default_city, "Oslo");
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
