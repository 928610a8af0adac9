// src/config.rs
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub product_api_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub request_timeout: Duration,
    pub focus_delay: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`; unset variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let product_api_url = lookup("PRODUCT_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "http://127.0.0.1:8000".to_string());

        Ok(Self {
            product_api_url,
            host: parse(&lookup, "HOST", IpAddr::V4(Ipv4Addr::LOCALHOST))?,
            port: parse(&lookup, "PORT", 3000)?,
            request_timeout: Duration::from_secs(parse(&lookup, "REQUEST_TIMEOUT_SECS", 10)?),
            focus_delay: Duration::from_millis(parse(&lookup, "FOCUS_DELAY_MS", 100)?),
        })
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: value.clone() }),
        _ => Ok(default),
    }
}
