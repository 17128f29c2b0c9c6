use log::debug;
use serde::{Deserialize, Serialize};
use tauri::{App, AppHandle};
use tauri_plugin_store::StoreExt;

pub const SETTINGS_STORE_PATH: &str = "settings_store.json";

// Environment variable name for overriding the configured backend base URL
const BACKEND_URL_ENV: &str = "EASYSUMMARIZE_BACKEND_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, specta::Type)]
#[serde(rename_all = "lowercase")]
pub enum LogLevelSetting {
    Off,
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

impl LogLevelSetting {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelSetting::Off => log::LevelFilter::Off,
            LogLevelSetting::Error => log::LevelFilter::Error,
            LogLevelSetting::Warn => log::LevelFilter::Warn,
            LogLevelSetting::Info => log::LevelFilter::Info,
            LogLevelSetting::Debug => log::LevelFilter::Debug,
            LogLevelSetting::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, specta::Type)]
pub struct AppSettings {
    #[serde(default = "default_backend_base_url")]
    pub backend_base_url: String,
    #[serde(default)]
    pub log_level: LogLevelSetting,
}

fn default_backend_base_url() -> String {
    "https://summarizer-backend-hazel.vercel.app/api".to_string()
}

pub fn get_default_settings() -> AppSettings {
    AppSettings {
        backend_base_url: default_backend_base_url(),
        log_level: LogLevelSetting::default(),
    }
}

/// Resolve the backend base URL, preferring the environment variable override.
/// Checked fresh on each call so runtime changes are picked up.
pub fn resolve_backend_base_url(configured: &str) -> String {
    if let Ok(env_url) = std::env::var(BACKEND_URL_ENV) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            debug!(
                "Using backend base URL from environment variable {}: {}",
                BACKEND_URL_ENV, trimmed
            );
            return trimmed.trim_end_matches('/').to_string();
        }
    }
    configured.trim_end_matches('/').to_string()
}

pub fn effective_backend_base_url(app: &AppHandle) -> String {
    resolve_backend_base_url(&get_settings(app).backend_base_url)
}

pub fn load_or_create_app_settings(app: &App) -> AppSettings {
    let store = app
        .store(SETTINGS_STORE_PATH)
        .expect("Failed to initialize store");

    if let Some(settings_value) = store.get("settings") {
        match serde_json::from_value::<AppSettings>(settings_value) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse stored settings: {}. Falling back to defaults", e);
                let default_settings = get_default_settings();
                store.set("settings", serde_json::to_value(&default_settings).unwrap());
                default_settings
            }
        }
    } else {
        let default_settings = get_default_settings();
        store.set("settings", serde_json::to_value(&default_settings).unwrap());
        default_settings
    }
}

pub fn get_settings(app: &AppHandle) -> AppSettings {
    let store = app
        .store(SETTINGS_STORE_PATH)
        .expect("Failed to initialize store");

    if let Some(settings_value) = store.get("settings") {
        serde_json::from_value::<AppSettings>(settings_value)
            .unwrap_or_else(|_| get_default_settings())
    } else {
        get_default_settings()
    }
}

pub fn write_settings(app: &AppHandle, settings: AppSettings) {
    let store = app
        .store(SETTINGS_STORE_PATH)
        .expect("Failed to initialize store");

    store.set("settings", serde_json::to_value(&settings).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that mutate the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_resolve_backend_base_url_prefers_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var(BACKEND_URL_ENV, "https://staging.example.com/api/");

        let result = resolve_backend_base_url("https://summarizer-backend-hazel.vercel.app/api");
        assert_eq!(result, "https://staging.example.com/api");

        std::env::remove_var(BACKEND_URL_ENV);
    }

    #[test]
    fn test_resolve_backend_base_url_ignores_blank_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var(BACKEND_URL_ENV, "   ");

        let result = resolve_backend_base_url("https://summarizer-backend-hazel.vercel.app/api/");
        assert_eq!(result, "https://summarizer-backend-hazel.vercel.app/api");

        std::env::remove_var(BACKEND_URL_ENV);
    }

    #[test]
    fn test_resolve_backend_base_url_without_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var(BACKEND_URL_ENV);

        let result = resolve_backend_base_url("https://summarizer-backend-hazel.vercel.app/api");
        assert_eq!(result, "https://summarizer-backend-hazel.vercel.app/api");
    }

    #[test]
    fn test_default_settings_roundtrip() {
        let defaults = get_default_settings();
        let value = serde_json::to_value(&defaults).unwrap();
        let parsed: AppSettings = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.backend_base_url, defaults.backend_base_url);
        assert_eq!(parsed.log_level, defaults.log_level);
    }

    #[test]
    fn test_settings_parse_with_missing_fields() {
        let parsed: AppSettings = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(parsed.backend_base_url, default_backend_base_url());
        assert_eq!(parsed.log_level, LogLevelSetting::Debug);
    }
}
