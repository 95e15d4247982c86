//! Console configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Development backend used when nothing else is configured.
const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_session_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".console"),
        |home| PathBuf::from(home).join(".config").join("console"),
    )
}

/// Settings shared by every command: where the backend lives, where the
/// session file goes, and how long a request may take.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONSOLE")]
pub struct ConsoleSettings {
    /// Backend base URL.
    pub base_url: Option<String>,
    /// Directory holding the persisted session file.
    pub session_dir: Option<PathBuf>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ConsoleSettings {
    /// Configured base URL, falling back to the development default.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Configured session directory, falling back to `~/.config/console`.
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(default_session_dir)
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> ConsoleSettings {
        ConsoleSettings::load_from_iter([OsString::from("console")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("CONSOLE_BASE_URL", None::<String>),
            ("CONSOLE_SESSION_DIR", None::<String>),
            ("CONSOLE_TIMEOUT_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "CONSOLE_BASE_URL",
                Some("https://tienda.example.com".to_owned()),
            ),
            ("CONSOLE_SESSION_DIR", Some("/tmp/console".to_owned())),
            ("CONSOLE_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.base_url(), "https://tienda.example.com");
        assert_eq!(settings.session_dir(), PathBuf::from("/tmp/console"));
        assert_eq!(settings.timeout(), Duration::from_secs(5));
    }
}
