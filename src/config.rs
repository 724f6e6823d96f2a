//! Environment configuration.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Chat backend base URL; `None` keeps the transport default.
    pub api_base_url: Option<String>,
    /// Request timeout override in seconds.
    pub request_timeout: Option<Duration>,
    /// Emit verbose widget diagnostics.
    pub chat_debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env_string_opt("RESUME_CHAT_API_URL"),
            request_timeout: env_seconds_opt("RESUME_CHAT_TIMEOUT_SECS"),
            chat_debug: env_flag("RESUME_CHAT_DEBUG"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_seconds_opt(key: &str) -> Option<Duration> {
    env_string_opt(key)?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use std::env;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_unset() {
        let _lock = env_lock();
        let _g1 = set_env_guard("RESUME_CHAT_API_URL", None);
        let _g2 = set_env_guard("RESUME_CHAT_TIMEOUT_SECS", None);
        let _g3 = set_env_guard("RESUME_CHAT_DEBUG", None);

        let config = EnvConfig::from_env();
        assert!(config.api_base_url.is_none());
        assert!(config.request_timeout.is_none());
        assert!(!config.chat_debug);
    }

    #[test]
    fn env_overrides_are_read() {
        let _lock = env_lock();
        let _g1 = set_env_guard("RESUME_CHAT_API_URL", Some("https://api.example.com"));
        let _g2 = set_env_guard("RESUME_CHAT_TIMEOUT_SECS", Some("5"));
        let _g3 = set_env_guard("RESUME_CHAT_DEBUG", Some("1"));

        let config = EnvConfig::from_env();
        assert_eq!(config.api_base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert!(config.chat_debug);
    }

    #[test]
    fn empty_url_and_bad_timeout_are_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("RESUME_CHAT_API_URL", Some("  "));
        let _g2 = set_env_guard("RESUME_CHAT_TIMEOUT_SECS", Some("soon"));

        let config = EnvConfig::from_env();
        assert!(config.api_base_url.is_none());
        assert!(config.request_timeout.is_none());
    }
}
