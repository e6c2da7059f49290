//! Connection settings read from `MYSQL_*` environment variables.

use crate::error::SmokeError;
use figment::{
    Figment,
    providers::{Env, Serialized},
    value::{Dict, Value},
};
use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;
use std::fmt;

pub const ENV_PREFIX: &str = "MYSQL_";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_USERNAME: &str = "root";

pub const PASSWORD_VAR: &str = "MYSQL_PASSWORD";
pub const DATABASE_VAR: &str = "MYSQL_DB";

/// Keys accepted after the prefix is stripped.
const KEYS: [&str; 5] = ["host", "port", "username", "password", "db"];

/// Shape of the environment as figment sees it; required fields are optional
/// here so that every missing one can be reported at once. Every value is the
/// raw variable text.
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default, rename = "db")]
    database: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl MySqlConfig {
    /// Read settings from the process environment (`MYSQL_HOST`, `MYSQL_PORT`,
    /// `MYSQL_USERNAME`, `MYSQL_PASSWORD`, `MYSQL_DB`).
    pub fn from_env() -> Result<Self, SmokeError> {
        Self::load(Env::prefixed(ENV_PREFIX))
    }

    /// The `Env` provider would parse `007` as a number, so its raw pairs are
    /// taken as plain strings instead.
    pub fn load(env: Env) -> Result<Self, SmokeError> {
        let raw: Dict = env
            .only(&KEYS)
            .iter()
            .map(|(key, value)| (key.as_str().to_lowercase(), Value::from(value)))
            .collect();
        let figment = Figment::new().merge(Serialized::defaults(raw));
        Self::from_figment(&figment)
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, SmokeError> {
        let raw: RawSettings = figment.extract()?;

        let mut missing = Vec::new();
        if raw.password.is_none() {
            missing.push(PASSWORD_VAR);
        }
        if raw.database.is_none() {
            missing.push(DATABASE_VAR);
        }
        let (Some(password), Some(database)) = (raw.password, raw.database) else {
            return Err(SmokeError::MissingEnv(missing));
        };

        let port: u16 = match raw.port {
            Some(value) => value
                .parse()
                .map_err(|source| SmokeError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: raw.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            username: raw.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password,
            database,
        })
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
    }
}

impl fmt::Debug for MySqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}
