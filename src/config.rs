use std::env;
use std::str::FromStr;

/// Signing key used when `SECRET_KEY` is not set. Only suitable for local development.
pub const DEFAULT_SECRET_KEY: &str = "hard_to_guess_string";
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/taskbook";
/// Work factors bcrypt accepts.
const PASSWORD_COSTS: std::ops::RangeInclusive<u32> = 4..=31;

/// Runtime configuration, read from the environment (and `.env` via `dotenv`).
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub secret_key: String,
    pub server_port: u16,
    pub server_host: String,
    /// bcrypt work factor used when hashing new passwords.
    pub password_cost: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            database_max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 5),
            secret_key: env_or("SECRET_KEY", DEFAULT_SECRET_KEY),
            server_port: env_parse("SERVER_PORT", 8080),
            server_host: env_or("SERVER_HOST", "127.0.0.1"),
            password_cost: password_cost(),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn password_cost() -> u32 {
    let cost = env_parse("BCRYPT_COST", bcrypt::DEFAULT_COST);
    if PASSWORD_COSTS.contains(&cost) {
        cost
    } else {
        log::warn!(
            "BCRYPT_COST {} is outside {:?}, using the default",
            cost,
            PASSWORD_COSTS
        );
        bcrypt::DEFAULT_COST
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("{} has an invalid value {:?}, using the default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
