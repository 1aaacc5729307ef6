//! Server settings, read from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::warn;

/// Where and how the server runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// Mount `/auth/fake`, which signs in as whoever the request names.
    pub fake_auth: bool,
    /// Path to a saved connection spec, or the directory holding one.
    pub connection: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            pool_size: 8,
            fake_auth: false,
            connection: PathBuf::from(".forum/connection.json"),
        }
    }
}

impl Config {
    /// Read `FORUM_HOST`, `FORUM_PORT`, `FORUM_POOL_SIZE`,
    /// `FORUM_FAKE_AUTH` and `FORUM_CONNECTION`, keeping the default for
    /// anything unset or unparsable.
    pub fn from_env() -> Config {
        let defaults = Config::default();
        Config {
            host: env::var("FORUM_HOST").unwrap_or(defaults.host),
            port: parse_var("FORUM_PORT", defaults.port),
            pool_size: parse_var("FORUM_POOL_SIZE", defaults.pool_size),
            fake_auth: parse_var("FORUM_FAKE_AUTH", defaults.fake_auth),
            connection: env::var_os("FORUM_CONNECTION")
                .map(PathBuf::from)
                .unwrap_or(defaults.connection),
        }
    }

    /// `host:port`, suitable for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr + ToString>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(
                "{name}={raw} is not valid, using {}",
                default.to_string()
            );
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_falls_back_on_garbage() {
        env::set_var("FORUM_TEST_PARSE_PORT", "not-a-port");
        assert_eq!(parse_var("FORUM_TEST_PARSE_PORT", 3000u16), 3000);
        env::set_var("FORUM_TEST_PARSE_PORT", "8080");
        assert_eq!(parse_var("FORUM_TEST_PARSE_PORT", 3000u16), 8080);
        assert!(!parse_var("FORUM_TEST_PARSE_UNSET", false));
    }

    #[test]
    fn addr_joins_host_and_port() {
        assert_eq!(Config::default().addr(), "127.0.0.1:3000");
    }
}
