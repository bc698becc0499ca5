//! Environment variable parsing helpers shared by pool and service config

use std::str::FromStr;

/// Parse an environment variable, falling back to `default` when it is
/// missing or does not parse
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    parse_env_optional(key).unwrap_or(default)
}

/// Parse an environment variable, `None` if missing or invalid
pub fn parse_env_optional<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse a mandatory environment variable
pub fn parse_env_required<T: FromStr>(key: &str) -> Result<T, String> {
    std::env::var(key)
        .map_err(|_| format!("{} environment variable not set", key))?
        .trim()
        .parse()
        .map_err(|_| format!("Failed to parse environment variable {}", key))
}

/// Read a boolean flag. Accepts `1/0`, `true/false`, `yes/no`, `on/off`.
pub fn parse_env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
