use std::env::vars;
use std::time::Duration;

use log::info;
use serde::Deserialize;
use slotboard_states::State;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";
const DEFAULT_TICKET_BASE_URL: &str =
    "https://srpnet.service-now.com/now/nav/ui/classic/params/target";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Backend root; every endpoint path is appended to it.
    pub api_base_url: String,
    /// Address passed to the device notify endpoint.
    pub user_email: String,
    /// Ticketing system root used for ticket deep links.
    pub ticket_base_url: String,
    pub poll_interval: Duration,
}

/// Environment overrides, all optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    slotboard_api_base_url: Option<String>,
    slotboard_user_email: Option<String>,
    slotboard_ticket_base_url: Option<String>,
    slotboard_poll_interval_secs: Option<u64>,
}

impl BusinessConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_user_email(mut self, user_email: impl Into<String>) -> Self {
        self.user_email = user_email.into();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Defaults overridden by `SLOTBOARD_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");
        let raw: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let poll_interval = match raw.slotboard_poll_interval_secs {
            Some(0) => anyhow::bail!("SLOTBOARD_POLL_INTERVAL_SECS must be at least 1"),
            Some(secs) => Duration::from_secs(secs),
            None => defaults.poll_interval,
        };
        let config = Self {
            api_base_url: raw
                .slotboard_api_base_url
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.api_base_url),
            user_email: raw.slotboard_user_email.unwrap_or(defaults.user_email),
            ticket_base_url: raw
                .slotboard_ticket_base_url
                .unwrap_or(defaults.ticket_base_url),
            poll_interval,
        };
        info!(
            "Using backend {} polling every {:?}",
            config.api_base_url, config.poll_interval
        );
        Ok(config)
    }

    /// Absolute URL of a backend path such as `/get-data`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            user_email: String::new(),
            ticket_base_url: DEFAULT_TICKET_BASE_URL.to_owned(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl State for BusinessConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_env::from_iter;

    #[test]
    fn defaults_point_at_the_local_backend() {
        let raw: RawConfig = from_iter(Vec::<(&str, &str)>::new()).expect("empty env decodes");
        let config = BusinessConfig::from_raw(raw).expect("defaults build");

        assert_eq!(config, BusinessConfig::default());
        assert_eq!(config.endpoint("/get-data"), "http://localhost:5001/get-data");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn environment_overrides_defaults() {
        let raw: RawConfig = from_iter(vec![
            ("SLOTBOARD_API_BASE_URL", "https://desk.example/"),
            ("SLOTBOARD_USER_EMAIL", "tech@example.com"),
            ("SLOTBOARD_POLL_INTERVAL_SECS", "12"),
        ])
        .expect("RawConfig should deserialize");
        let config = BusinessConfig::from_raw(raw).expect("config builds");

        assert_eq!(config.api_base_url, "https://desk.example");
        assert_eq!(config.user_email, "tech@example.com");
        assert_eq!(config.poll_interval, Duration::from_secs(12));
        assert_eq!(
            config.endpoint("notify-loaner-return"),
            "https://desk.example/notify-loaner-return"
        );
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let raw: RawConfig = from_iter(vec![("SLOTBOARD_POLL_INTERVAL_SECS", "0")])
            .expect("RawConfig should deserialize");
        let err = BusinessConfig::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("SLOTBOARD_POLL_INTERVAL_SECS"));
    }
}
