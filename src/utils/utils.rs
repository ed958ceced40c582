use std::env;

/// Reads `key` from the environment; unset or non-UTF-8 values become
/// `fallback` (or an empty string).
pub fn get_env(key: &str, fallback: Option<&str>) -> String {
    match env::var(key) {
        Ok(value) => value,
        Err(_) => fallback.map(str::to_owned).unwrap_or_default(),
    }
}

/// Parses `raw`, keeping `default` when it is empty or malformed.
pub fn parse_or<T: std::str::FromStr>(raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or(default)
}
