//! Application configuration constants
//!
//! Central location for limits and defaults used throughout the application,
//! plus the runtime configuration resolved from CLI arguments and environment.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

// ===== Query Limits =====

/// Maximum number of notes returned by the recent activity feed
pub const RECENT_ACTIVITY_LIMIT: i64 = 50;

// ===== Server Defaults =====

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 2022;

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default database file name, created in the working directory
pub const DEFAULT_DB_FILE: &str = "friendzone.db";

// ===== Database Pool =====

/// Connections in the application pool
pub const DB_MAX_CONNECTIONS: u32 = 5;

/// How long SQLite waits on a locked database before failing
pub const DB_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ===== Client =====

/// Default server URL the terminal UI talks to
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:2022";

/// Timeout for a single API call from the terminal UI
pub const CLIENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// FriendZone API server.
///
/// Configuration can be set via CLI arguments or environment variables.
/// CLI arguments take precedence over environment variables.
#[derive(Parser, Debug, Default)]
#[command(name = "friendzone", version, about)]
pub struct ServerCli {
    /// HTTP bind address [env: FRIENDZONE_BIND] [default: 127.0.0.1:$SERVER_PORT or 127.0.0.1:2022]
    #[arg(long, short = 'b')]
    pub bind: Option<String>,

    /// SQLite database path [env: FRIENDZONE_DB] [default: ./friendzone.db]
    #[arg(long, short = 'd')]
    pub database: Option<PathBuf>,
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_cli_and_env(cli: ServerCli) -> Self {
        let bind_addr = cli
            .bind
            .or_else(|| std::env::var("FRIENDZONE_BIND").ok())
            .unwrap_or_else(|| {
                let port = std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse::<u16>().ok())
                    .unwrap_or(DEFAULT_PORT);
                format!("{}:{}", DEFAULT_HOST, port)
            });

        let db_path = cli
            .database
            .or_else(|| std::env::var("FRIENDZONE_DB").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));

        Self { bind_addr, db_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = ServerCli {
            bind: Some("0.0.0.0:9000".to_string()),
            database: Some(PathBuf::from("/tmp/friends.db")),
        };

        let config = Config::from_cli_and_env(cli);

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.db_path, PathBuf::from("/tmp/friends.db"));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = ServerCli::parse_from(["friendzone", "-b", "127.0.0.1:4000", "-d", "x.db"]);

        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:4000"));
        assert_eq!(cli.database, Some(PathBuf::from("x.db")));
    }
}
