use std::collections::BTreeMap;
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;
#[cfg(not(target_arch = "wasm32"))]
use directories_next::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::router::Route;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const ICON_DIR: &str = "assets/outposts";
#[cfg(not(target_arch = "wasm32"))]
pub const BACKEND_URL_ENV: &str = "OUTPOST_BACKEND_URL";

/// Startup settings. On desktop read from `config.yaml` in the platform config dir,
/// in the browser built from defaults and the page url.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub backend_url: String,
    /// where `/` and unknown paths lead
    pub root_redirect: Route,
    /// directory with one marker image per spawn point name
    pub icon_dir: Option<PathBuf>,
    /// where the files of the bundled icon manifest are served from
    pub icon_base_url: Option<String>,
    /// spawn point name -> image uri, wins over images found in `icon_dir`
    pub icons: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: String::from(DEFAULT_BACKEND_URL),
            root_redirect: Route::Introduction,
            icon_dir: Some(PathBuf::from(ICON_DIR)),
            icon_base_url: None,
            icons: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        Ok(config.normalized())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path:?}"))?;
        Self::from_yaml_str(&text).with_context(|| format!("Failed to parse config file {path:?}"))
    }

    /// Never fails, a broken config file is reported and replaced by the defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut config = match config_file() {
            Some(path) if path.is_file() => Self::from_file(&path).unwrap_or_else(|err| {
                warn!("Using default config: {err:?}");
                Self::default()
            }),
            _ => Self::default(),
        };
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            debug!("{BACKEND_URL_ENV} overrides the backend url");
            config.backend_url = url;
        }
        config.normalized()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut config = Self::default();
        // no file system to scan, the bundled manifest names the files served next to the page
        config.icon_dir = None;
        config.icon_base_url = crate::wasm_utils::icon_base_url_param().or_else(|| {
            crate::wasm_utils::origin().map(|origin| format!("{origin}/{ICON_DIR}"))
        });
        if let Some(url) = crate::wasm_utils::backend_url_param() {
            debug!("?backend= overrides the backend url");
            config.backend_url = url;
        }
        config.normalized()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.backend_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            warn!("Empty backend url, falling back to {DEFAULT_BACKEND_URL}");
            self.backend_url = String::from(DEFAULT_BACKEND_URL);
        } else {
            self.backend_url = trimmed.to_owned();
        }
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "TradingOutpost").map(|dir| dir.config_dir().join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend_url, "http://localhost:8000");
    }

    #[test]
    fn yaml_fields_are_read_and_url_is_trimmed() {
        let config = Config::from_yaml_str(
            "backend_url: https://outposts.example.org/api/\n\
             root_redirect: landing\n\
             icons:\n  Arab Souk: https://example.org/souk.png\n",
        )
        .unwrap();
        assert_eq!(config.backend_url, "https://outposts.example.org/api");
        assert_eq!(config.root_redirect, Route::Landing);
        assert_eq!(
            config.icons.get("Arab Souk").map(String::as_str),
            Some("https://example.org/souk.png")
        );
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = Config::from_yaml_str("backend_url: '  '").unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_yaml_str("backend: http://x").is_err());
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "backend_url: http://10.0.0.2:9000\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.backend_url, "http://10.0.0.2:9000");

        let err = Config::from_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(format!("{err:?}").contains("Failed to read config file"));
    }
}
