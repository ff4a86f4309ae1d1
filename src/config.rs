use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_STORE_PATH: &str = "data/store.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Schedule book (`APP_DATA_PATH`).
    pub data_path: PathBuf,
    /// Key-value store holding the recent teams (`APP_STORE_PATH`).
    pub store_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let store_path = lookup("APP_STORE_PATH").unwrap_or_else(|| DEFAULT_STORE_PATH.to_string());

        Self {
            port,
            data_path: PathBuf::from(data_path),
            store_path: PathBuf::from(store_path),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/state.json"));
        assert_eq!(config.store_path, PathBuf::from("data/store.json"));
    }

    #[test]
    fn unparsable_port_falls_back() {
        let config = Config::from_lookup(|key| match key {
            "PORT" => Some("http".to_string()),
            "APP_STORE_PATH" => Some("/tmp/teams.json".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_path, PathBuf::from("/tmp/teams.json"));
    }
}
