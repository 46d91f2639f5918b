use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, VmError};

pub const DEFAULT_API_URL: &str = "https://localhost:7140/api/Projects";
pub const API_URL_ENV: &str = "VMAN_API_URL";

#[derive(Deserialize, Serialize, Default, Debug, PartialEq)]
pub struct Config {
    pub api_url: Option<String>,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| VmError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| VmError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "vman")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(VmError::NoConfigDir)
    }

    /// Resolve the projects endpoint: explicit flag, then env var, then config file.
    pub fn api_url(&self, explicit: Option<&str>) -> Result<Url> {
        let env = std::env::var(API_URL_ENV).ok();
        Self::resolve_api_url(explicit, env.as_deref(), self.api_url.as_deref())
    }

    fn resolve_api_url(
        explicit: Option<&str>,
        env: Option<&str>,
        file: Option<&str>,
    ) -> Result<Url> {
        let raw = [explicit, env, file]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL);

        let url = Url::parse(raw).map_err(|_| VmError::InvalidUrl(raw.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(VmError::InvalidUrl(raw.to_string()));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let url = Config::resolve_api_url(None, None, None).unwrap();
        assert_eq!(url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_precedence() {
        let url = Config::resolve_api_url(
            Some("http://flag:1/api/Projects"),
            Some("http://env:2/api/Projects"),
            Some("http://file:3/api/Projects"),
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("flag"));

        let url = Config::resolve_api_url(
            None,
            Some("http://env:2/api/Projects"),
            Some("http://file:3/api/Projects"),
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("env"));

        let url = Config::resolve_api_url(None, Some("  "), Some("http://file:3/api/Projects"))
            .unwrap();
        assert_eq!(url.host_str(), Some("file"));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            Config::resolve_api_url(Some("not a url"), None, None),
            Err(VmError::InvalidUrl(_))
        ));
        assert!(matches!(
            Config::resolve_api_url(Some("mailto:dev@example.com"), None, None),
            Err(VmError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_config_file() {
        let config: Config = toml::from_str(
            "api_url = \"https://build.local/api/Projects\"\naccept_invalid_certs = true\n",
        )
        .unwrap();
        assert_eq!(
            config.api_url.as_deref(),
            Some("https://build.local/api/Projects")
        );
        assert!(config.accept_invalid_certs);

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());
    }
}
