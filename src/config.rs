// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;

use crate::sanitizer::{
    AllowListConfig, DEFAULT_ATTRIBUTES, DEFAULT_MAX_INPUT_BYTES, DEFAULT_MAX_NESTING_DEPTH,
    DEFAULT_MAX_TAGS, DEFAULT_TAGS, Limits,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub log_dir: String,
    pub cors_origins: Vec<String>,
    pub max_input_bytes: usize,
    pub max_tags: usize,
    pub max_nesting_depth: usize,
    pub allowed_tags: Vec<String>,
    pub allowed_attributes: Vec<String>,
}

impl Config {
    /// Reads configuration from the environment (and `.env` if present).
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        dotenv().ok();

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let max_input_bytes = positive_var("SANITIZER_MAX_INPUT_BYTES", DEFAULT_MAX_INPUT_BYTES);
        let max_tags = positive_var("SANITIZER_MAX_TAGS", DEFAULT_MAX_TAGS);
        let max_nesting_depth =
            positive_var("SANITIZER_MAX_NESTING_DEPTH", DEFAULT_MAX_NESTING_DEPTH);

        let allowed_tags = env::var("SANITIZER_ALLOWED_TAGS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|_| to_owned_list(DEFAULT_TAGS));

        let allowed_attributes = env::var("SANITIZER_ALLOWED_ATTRIBUTES")
            .map(|v| split_list(&v))
            .unwrap_or_else(|_| to_owned_list(DEFAULT_ATTRIBUTES));

        Self {
            bind_addr,
            rust_log,
            log_dir,
            cors_origins,
            max_input_bytes,
            max_tags,
            max_nesting_depth,
            allowed_tags,
            allowed_attributes,
        }
    }

    pub fn allow_list(&self) -> AllowListConfig {
        AllowListConfig::new(&self.allowed_tags, &self.allowed_attributes)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_input_bytes: self.max_input_bytes,
            max_tags: self.max_tags,
            max_nesting_depth: self.max_nesting_depth,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            cors_origins: Vec::new(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_tags: DEFAULT_MAX_TAGS,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            allowed_tags: to_owned_list(DEFAULT_TAGS),
            allowed_attributes: to_owned_list(DEFAULT_ATTRIBUTES),
        }
    }
}

fn positive_var(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|n: &usize| *n > 0)
        .unwrap_or(default)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
