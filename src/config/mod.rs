use std::env;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::security_headers;

pub struct Config {
    pub database_url: String,
    pub port: u16,
}

const DEFAULT_PORT: u16 = 3001;

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/verdelab".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}
