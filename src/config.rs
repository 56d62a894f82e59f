use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/chatify.json";
pub const RELAY_URL_ENV: &str = "CHATIFY_RELAY_URL";

const DEFAULT_RELAY_URL: &str = "wss://chatify-go.onrender.com/ws";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
        }
    }
}

fn default_relay_url() -> String {
    DEFAULT_RELAY_URL.to_string()
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolve the relay endpoint: CLI flag, then environment, then config file.
pub fn resolve_relay_url(flag: Option<String>, config: &AppConfig) -> String {
    flag.or_else(|| std::env::var(RELAY_URL_ENV).ok())
        .unwrap_or_else(|| config.relay_url.clone())
}
