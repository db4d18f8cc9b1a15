use std::time::Duration;

// ============================================================================
// Configuration
// ============================================================================
//
// Read once at startup from the environment:
//
// - ORDER_SERVICE_URL      (default http://localhost:3333)
// - PAYMENT_SERVICE_URL    (default http://localhost:3334)
// - APP_PORT               (default 3335)
// - GATEWAY_TIMEOUT_SECS   (unset = no client-side deadline)
// - GATEWAY_RETRY_ATTEMPTS (default 1 = no retries)
//
// ============================================================================

pub const DEFAULT_ORDER_SERVICE_URL: &str = "http://localhost:3333";
pub const DEFAULT_PAYMENT_SERVICE_URL: &str = "http://localhost:3334";
pub const DEFAULT_APP_PORT: u16 = 3335;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} is not a valid number: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub order_service_url: String,
    pub payment_service_url: String,
    pub timeout: Option<Duration>,
    pub retry_attempts: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            order_service_url: DEFAULT_ORDER_SERVICE_URL.to_string(),
            payment_service_url: DEFAULT_PAYMENT_SERVICE_URL.to_string(),
            timeout: None,
            retry_attempts: 1,
        }
    }
}

impl GatewayConfig {
    /// Point both remote services at explicit base URLs.
    #[cfg(test)]
    pub fn with_urls(order_service_url: &str, payment_service_url: &str) -> Self {
        Self {
            order_service_url: order_service_url.trim_end_matches('/').to_string(),
            payment_service_url: payment_service_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub app_port: u16,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let order_service_url = url_var(&lookup, "ORDER_SERVICE_URL", DEFAULT_ORDER_SERVICE_URL)?;
        let payment_service_url =
            url_var(&lookup, "PAYMENT_SERVICE_URL", DEFAULT_PAYMENT_SERVICE_URL)?;

        let app_port = number_var(&lookup, "APP_PORT")?.unwrap_or(DEFAULT_APP_PORT);
        let timeout = number_var::<u64>(&lookup, "GATEWAY_TIMEOUT_SECS")?.map(Duration::from_secs);
        let retry_attempts = number_var(&lookup, "GATEWAY_RETRY_ATTEMPTS")?
            .unwrap_or(1u32)
            .max(1);

        Ok(Self {
            app_port,
            gateway: GatewayConfig {
                order_service_url,
                payment_service_url,
                timeout,
                retry_attempts,
            },
        })
    }
}

fn url_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    let value = match lookup(var) {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => return Ok(default.to_string()),
    };

    reqwest::Url::parse(&value).map_err(|_| ConfigError::InvalidUrl {
        var,
        value: value.clone(),
    })?;

    Ok(value.trim_end_matches('/').to_string())
}

fn number_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        Some(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value: v }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.app_port, 3335);
        assert_eq!(config.gateway, GatewayConfig::default());
        assert_eq!(config.gateway.order_service_url, "http://localhost:3333");
        assert_eq!(config.gateway.payment_service_url, "http://localhost:3334");
    }

    #[test]
    fn test_configured_urls_are_used() {
        let config = config_from(&[
            ("ORDER_SERVICE_URL", "http://order:3333/"),
            ("PAYMENT_SERVICE_URL", "http://payment:3334"),
            ("APP_PORT", "8080"),
            ("GATEWAY_TIMEOUT_SECS", "5"),
            ("GATEWAY_RETRY_ATTEMPTS", "3"),
        ])
        .unwrap();

        assert_eq!(config.gateway.order_service_url, "http://order:3333");
        assert_eq!(config.gateway.payment_service_url, "http://payment:3334");
        assert_eq!(config.app_port, 8080);
        assert_eq!(config.gateway.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.gateway.retry_attempts, 3);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = config_from(&[("ORDER_SERVICE_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: "ORDER_SERVICE_URL", .. }));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("APP_PORT", "abc")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber { var: "APP_PORT", value: "abc".to_string() }
        );
    }

    #[test]
    fn test_zero_retry_attempts_means_single_attempt() {
        let config = config_from(&[("GATEWAY_RETRY_ATTEMPTS", "0")]).unwrap();
        assert_eq!(config.gateway.retry_attempts, 1);
    }
}
