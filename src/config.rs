//! Process configuration, read from environment variables at start-up.

use camino::Utf8PathBuf;

/// Runtime configuration for the `clipgate` server.
///
/// Every field has a default, so the server starts without any environment
/// variables set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP address to bind (`CLIPGATE_BIND`, default `127.0.0.1:8080`).
    pub bind_address: String,

    /// `tracing` filter used when `RUST_LOG` is unset (`CLIPGATE_LOG`,
    /// default `info`).
    pub log_level: String,

    /// Emit newline-delimited JSON log records (`CLIPGATE_LOG_JSON`).
    pub log_json: bool,

    /// Settings document location (`CLIPGATE_SETTINGS`, default
    /// `clipgate/settings.json`).
    pub settings_path: Utf8PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND.to_owned(),
            log_level: DEFAULT_LOG.to_owned(),
            log_json: false,
            settings_path: Utf8PathBuf::from(DEFAULT_SETTINGS),
        }
    }
}

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_LOG: &str = "info";
const DEFAULT_SETTINGS: &str = "clipgate/settings.json";

impl ServerConfig {
    /// Builds [`ServerConfig`] from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds [`ServerConfig`] from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        Self {
            bind_address: env_or("CLIPGATE_BIND", DEFAULT_BIND),
            log_level: env_or("CLIPGATE_LOG", DEFAULT_LOG),
            log_json: lookup("CLIPGATE_LOG_JSON").is_some_and(|value| is_truthy(&value)),
            settings_path: Utf8PathBuf::from(env_or("CLIPGATE_SETTINGS", DEFAULT_SETTINGS)),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
