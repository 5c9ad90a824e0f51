use std::env;

use argon2::{Algorithm, Argon2, Params, Version};
use chrono::Duration;

/// Tunable argon2 work factor, read from the environment with the crate
/// defaults as fallback.
#[derive(Debug, Clone, Copy)]
pub struct HashingSettings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub frontend_origin: String,
    pub port: u16,
    pub token_ttl: Duration,
    pub hashing: HashingSettings,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let frontend_origin = env::var("FRONTEND_ORIGIN").expect("FRONTEND_ORIGIN must be set");

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);

        let ttl_seconds = env::var("JWT_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(86_400);

        let defaults = HashingSettings::default();
        let hashing = HashingSettings {
            memory_kib: env_u32("ARGON2_MEMORY_KIB", defaults.memory_kib),
            iterations: env_u32("ARGON2_ITERATIONS", defaults.iterations),
            parallelism: env_u32("ARGON2_PARALLELISM", defaults.parallelism),
        };

        Config {
            database_url,
            frontend_origin,
            port,
            token_ttl: Duration::seconds(ttl_seconds),
            hashing,
        }
    }

    /// Builds the hasher used for signup. Invalid work-factor values are a
    /// startup failure, not a request-time one.
    pub fn argon2(&self) -> Argon2<'static> {
        let params = Params::new(
            self.hashing.memory_kib,
            self.hashing.iterations,
            self.hashing.parallelism,
            None,
        )
        .expect("invalid argon2 work factor configuration");
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hashing_settings_build_a_hasher() {
        let config = Config {
            database_url: String::new(),
            frontend_origin: "http://localhost".into(),
            port: 3000,
            token_ttl: Duration::hours(1),
            hashing: HashingSettings::default(),
        };

        // Params::new accepts the crate defaults, so this must not panic.
        let _ = config.argon2();
    }
}
