use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub health_timeout: Duration,
    pub request_timeout: Duration,
    pub static_index: PathBuf,
    pub cors_allowed_origin: Option<String>,
    pub run_migrations: bool,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_source(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let server_address: SocketAddr = match vars.get("SERVER_ADDRESS") {
            Some(raw) => parse_value("SERVER_ADDRESS", &raw)?,
            None => {
                let port: u16 = vars.parse_or("PORT", 3000)?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let database_url = match vars.get("DATABASE_URL") {
            Some(url) => url,
            None => compose_database_url(&vars)?,
        };

        Ok(Self {
            server_address,
            database_url,
            db_max_connections: vars.parse_or("DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout: Duration::from_secs(vars.parse_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            health_timeout: Duration::from_secs(vars.parse_or("HEALTH_TIMEOUT_SECS", 2)?),
            request_timeout: Duration::from_secs(vars.parse_or("REQUEST_TIMEOUT_SECS", 30)?),
            static_index: vars
                .get("STATIC_INDEX")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/index.html")),
            cors_allowed_origin: vars.get("CORS_ALLOWED_ORIGIN"),
            run_migrations: vars.parse_or("RUN_MIGRATIONS", true)?,
            log_format: vars.parse_or("LOG_FORMAT", LogFormat::Pretty)?,
        })
    }

    /// Fails when the document served at `/` is missing.
    pub fn check_static_index(&self) -> Result<()> {
        if self.static_index.is_file() {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "STATIC_INDEX does not point to a file: {}",
                self.static_index.display()
            )))
        }
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn get_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(raw) => parse_value(name, &raw),
            None => Ok(default),
        }
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn compose_database_url<F>(vars: &Vars<F>) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let host = vars.get_or("DB_HOST", "localhost");
    let port: u16 = vars.parse_or("DB_PORT", 5432)?;
    let user = vars.get_or("DB_USER", "postgres");
    let password = vars.get("DB_PASSWORD").unwrap_or_default();
    let name = vars.get_or("DB_NAME", "userdb");

    if password.is_empty() {
        Ok(format!("postgres://{}@{}:{}/{}", user, host, port, name))
    } else {
        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, name
        ))
    }
}
