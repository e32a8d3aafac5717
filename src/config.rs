use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::{config_error, Error};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Master switch for every remote source.
    pub use_backend: bool,
    pub estimate_url: Option<String>,
    pub geocode_url: Option<String>,
    /// Fail with an unresolved location instead of guessing coordinates.
    pub strict_geocoding: bool,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            use_backend: false,
            estimate_url: None,
            geocode_url: None,
            strict_geocoding: false,
            seed: None,
        }
    }
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen_addr = parse(
            "RERIDES_LISTEN_ADDR",
            get("RERIDES_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into()),
        )?;

        let use_backend = get("RERIDES_USE_BACKEND")
            .map(|value| parse_bool("RERIDES_USE_BACKEND", &value))
            .transpose()?
            .unwrap_or(false);

        let strict_geocoding = get("RERIDES_STRICT_GEOCODING")
            .map(|value| parse_bool("RERIDES_STRICT_GEOCODING", &value))
            .transpose()?
            .unwrap_or(false);

        let seed = get("RERIDES_SEED")
            .map(|value| parse("RERIDES_SEED", value))
            .transpose()?;

        Ok(Self {
            listen_addr,
            use_backend,
            estimate_url: get("RERIDES_ESTIMATE_URL"),
            geocode_url: get("RERIDES_GEOCODE_URL"),
            strict_geocoding,
            seed,
        })
    }

    pub fn remote_estimates_enabled(&self) -> bool {
        self.use_backend && self.estimate_url.is_some()
    }

    pub fn remote_geocoding_enabled(&self) -> bool {
        self.use_backend && self.geocode_url.is_some()
    }
}

fn parse<T: FromStr>(key: &str, value: String) -> Result<T, Error> {
    value.trim().parse().map_err(|_| config_error(key))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(config_error(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.remote_estimates_enabled());
    }

    #[test]
    fn backend_requires_switch_and_url() {
        let config = Config::from_lookup(lookup(&[(
            "RERIDES_ESTIMATE_URL",
            "http://localhost:8000/api/estimate",
        )]))
        .unwrap();
        assert!(!config.remote_estimates_enabled());

        let config = Config::from_lookup(lookup(&[
            ("RERIDES_USE_BACKEND", "true"),
            ("RERIDES_ESTIMATE_URL", "http://localhost:8000/api/estimate"),
            ("RERIDES_SEED", "42"),
        ]))
        .unwrap();
        assert!(config.remote_estimates_enabled());
        assert!(!config.remote_geocoding_enabled());
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_unparseable_values() {
        let err = Config::from_lookup(lookup(&[("RERIDES_SEED", "abc")])).unwrap_err();
        assert_eq!(err.code, 7);

        let err = Config::from_lookup(lookup(&[("RERIDES_USE_BACKEND", "maybe")])).unwrap_err();
        assert_eq!(err.code, 7);
    }
}
