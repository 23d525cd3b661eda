//! Command-line and environment configuration.
//!
//! # Responsibility
//! - Parse listener, store, mode and logging settings from flags or env.
//! - Reject invalid values before any component starts.
//!
//! # Invariants
//! - Every store setting has a default, so a bare start targets a local
//!   `postgres` database named `mydb`.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use usersvc_core::logging::normalize_level;
use usersvc_core::{default_log_level, StoreConfig};

/// HTTP service exposing CRUD over the `users` table.
#[derive(Parser, Debug, Clone)]
#[command(name = "usersvc", version = usersvc_core::core_version())]
pub struct Config {
    /// Address to listen on.
    #[arg(long = "bind", env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    #[arg(long, env = "DB_NAME", default_value = "mydb")]
    pub db_name: String,

    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub db_password: String,

    /// Upper bound on pooled store connections.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,

    /// Seconds to wait for a pooled connection before failing the request.
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub db_acquire_timeout_secs: u64,

    /// Serve the fixed sample data set; no store connection is attempted.
    #[arg(long, env = "MOCK_DB", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub mock: bool,

    /// Reject `:id` path segments that are not plain integers with 400.
    #[arg(long, env = "STRICT_IDS", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub strict_ids: bool,

    /// trace|debug|info|warn|error
    #[arg(long, env = "LOG_LEVEL", default_value = default_log_level(), value_parser = parse_log_level)]
    pub log_level: String,

    /// Absolute directory for rotating log files; logs go to stderr when unset.
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            database: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout_secs),
        }
    }
}

fn parse_log_level(value: &str) -> Result<String, String> {
    normalize_level(value)
        .map(str::to_string)
        .map_err(|err| err.to_string())
}
