use std::env;

use crate::config::dto::AppConfig;
use crate::core::error::AppError;

const DEFAULT_DNS_TIMEOUT_MS: u64 = 2000;

pub fn load_config() -> Result<AppConfig, AppError> {
    dotenvy::dotenv().ok();

    let port = env::var("VERIFIER_PORT")
        .or_else(|_| env::var("PORT"))
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .map_err(|err| AppError::configuration(format!("invalid port: {err}")))?;

    let dns_timeout_ms = parse_u64_env("DNS_TIMEOUT_MS", DEFAULT_DNS_TIMEOUT_MS);
    if dns_timeout_ms == 0 {
        return Err(AppError::configuration(
            "DNS_TIMEOUT_MS must be greater than zero",
        ));
    }

    Ok(AppConfig {
        port,
        dns_timeout_ms,
    })
}

fn parse_u64_env(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}
