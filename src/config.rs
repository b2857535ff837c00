use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DB_PATH: &str = "./database/students.db";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Process configuration: bind address and database path from the command
/// line, admin password from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub admin_password: String,
    pub default_password_in_use: bool,
}

impl Config {
    /// Parses `--bind <addr:port>` and `--db <path>` plus the
    /// `ADMIN_PASSWORD` environment variable. Unknown arguments are ignored.
    pub fn from_env_args(args: &[String]) -> anyhow::Result<Config> {
        let mut bind: SocketAddr = DEFAULT_BIND.parse()?;
        let mut db_path = PathBuf::from(DEFAULT_DB_PATH);

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| anyhow::anyhow!("--bind requires <addr:port>"))?;
                    bind = value.parse()?;
                    i += 2;
                }
                "--db" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| anyhow::anyhow!("--db requires <path>"))?;
                    db_path = PathBuf::from(value);
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }

        let (admin_password, default_password_in_use) = match std::env::var("ADMIN_PASSWORD") {
            Ok(v) if !v.is_empty() => (v, false),
            _ => (DEFAULT_ADMIN_PASSWORD.to_string(), true),
        };

        Ok(Config {
            bind,
            db_path,
            admin_password,
            default_password_in_use,
        })
    }
}
