use std::env;
use std::time::Duration;

use anyhow::Context;

/// Where the stock and product APIs live.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Environment variables:
    /// - STOREFRONT_API_URL: Base URL of the storefront API (default: "http://localhost:3333")
    /// - STOREFRONT_API_TIMEOUT_SECS: Per-request timeout in seconds (default: 10)
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env::var("STOREFRONT_API_URL")
            .unwrap_or_else(|_| "http://localhost:3333".to_string());
        let timeout = parse_timeout(env::var("STOREFRONT_API_TIMEOUT_SECS").ok().as_deref())?;

        Ok(Self { base_url, timeout })
    }
}

fn parse_timeout(raw: Option<&str>) -> anyhow::Result<Duration> {
    match raw {
        None => Ok(Duration::from_secs(10)),
        Some(value) => {
            let secs: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("STOREFRONT_API_TIMEOUT_SECS is not a number: {}", value))?;
            Ok(Duration::from_secs(secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_timeout_to_ten_seconds() {
        assert_eq!(parse_timeout(None).unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn should_parse_timeout_in_seconds() {
        assert_eq!(parse_timeout(Some(" 3 ")).unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn should_reject_non_numeric_timeout() {
        assert!(parse_timeout(Some("soon")).is_err());
    }
}
