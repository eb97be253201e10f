use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ADMIN_TOKEN: &str = "dev-token";

pub struct Config {
    pub port: u16,
    /// Bearer token accepted on the admin routes.
    pub admin_token: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", DEFAULT_PORT),
            admin_token: try_load("ADMIN_TOKEN", DEFAULT_ADMIN_TOKEN.to_string()),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
