use std::env;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DOMAIN: &str = "localhost";

/// Runtime settings read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Session signing secret; a random key is generated when unset.
    pub secret_key: Option<String>,
    /// Cookie domain shared with the auth provider.
    pub domain: String,
}

impl ServerConfig {
    /// Load settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT value `{value}`");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            address: lookup("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.into()),
            port,
            secret_key: lookup("SECRET_KEY").filter(|value| !value.is_empty()),
            domain: lookup("DOMAIN").unwrap_or_else(|| DEFAULT_DOMAIN.into()),
        }
    }
}
