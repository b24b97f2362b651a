use dotenvy::dotenv;
use std::net::{Ipv4Addr, SocketAddrV4};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("Please set env: {0}")]
    Missing(&'static str),
    #[error("Invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ServerConfig {
    pub(crate) port: u16,
    pub(crate) database_url: String,
    pub(crate) pool_size: u32,
}

impl ServerConfig {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_or(&lookup, "WEB_PORT", DEFAULT_PORT)?,
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            pool_size: parse_or(&lookup, "DB_POOL_SIZE", DEFAULT_POOL_SIZE)?,
        })
    }

    pub(crate) fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(Ipv4Addr::new(0, 0, 0, 0), self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
