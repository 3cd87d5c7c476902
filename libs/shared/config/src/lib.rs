use std::env;
use std::time::Duration;
use tracing::warn;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub doctors_api_url: String,
    pub host: String,
    pub port: u16,
    pub fetch_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            doctors_api_url: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            doctors_api_url: env::var("DOCTORS_API_URL")
                .unwrap_or_else(|_| {
                    warn!("DOCTORS_API_URL not set, using empty value");
                    String::new()
                }),
            host: env::var("APP_HOST")
                .unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("APP_PORT")
                .ok()
                .and_then(|raw| parse_or_warn("APP_PORT", &raw))
                .unwrap_or(DEFAULT_PORT),
            fetch_timeout_secs: env::var("DOCTORS_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| parse_or_warn("DOCTORS_FETCH_TIMEOUT_SECS", &raw))
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - doctor listings will be unavailable");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.doctors_api_url.trim().is_empty()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn parse_or_warn<T: std::str::FromStr>(name: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{} has invalid value '{}', using default", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_not_configured() {
        let config = AppConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_is_configured_ignores_blank_url() {
        let blank = AppConfig {
            doctors_api_url: "   ".to_string(),
            ..AppConfig::default()
        };
        assert!(!blank.is_configured());

        let config = AppConfig {
            doctors_api_url: "http://localhost:9999/doctors.json".to_string(),
            ..AppConfig::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn test_parse_or_warn_rejects_garbage() {
        assert_eq!(parse_or_warn::<u16>("APP_PORT", "8080"), Some(8080));
        assert_eq!(parse_or_warn::<u16>("APP_PORT", "eighty"), None);
    }
}
