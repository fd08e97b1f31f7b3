use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// File suffixes eligible for serving when the config names none.
const DEFAULT_EXTENSIONS: &[&str] = &["png", "pdf", "html"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to, also used to build absolute URLs
    /// in redirects and listing links.
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory that anchors all servable paths.
    pub document_root: PathBuf,
    /// Extension allow-list; files outside it are never served.
    pub allowed_extensions: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            document_root: PathBuf::from("public"),
            allowed_extensions: DEFAULT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            static_files: StaticConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the YAML file named by `ALCOVE_CONFIG`
    /// (when set), then applies `LISTEN` and `DOCUMENT_ROOT` environment
    /// overrides on top.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("ALCOVE_CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?;
                serde_yaml::from_str(&raw)
                    .with_context(|| format!("invalid config file {path}"))?
            }
            Err(_) => Config::default(),
        };

        if let Ok(listen) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen;
        }

        if let Ok(root) = std::env::var("DOCUMENT_ROOT") {
            cfg.static_files.document_root = PathBuf::from(root);
        }

        Ok(cfg)
    }
}
