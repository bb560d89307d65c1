//! Server configuration from environment variables
//!
//!   TASKS_FILE               seed task list (default: data/seasonal_tasks.json)
//!   PORT                     listen port (default: 3000)
//!   TASK_CACHE_TTL_SECS      task cache lifetime (default: 3600)
//!   RESPONSE_CACHE_TTL_SECS  HTTP response cache lifetime (default: 300)
//!   RESPONSE_CACHE_CAPACITY  HTTP response cache entries (default: 10000)

use crate::cache::DEFAULT_CACHE_DURATION_SECS;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub tasks_file: PathBuf,
    pub port: u16,
    pub task_cache_ttl_secs: i64,
    pub response_cache_ttl_secs: u64,
    pub response_cache_capacity: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from("data/seasonal_tasks.json"),
            port: 3000,
            task_cache_ttl_secs: DEFAULT_CACHE_DURATION_SECS,
            response_cache_ttl_secs: 300,
            response_cache_capacity: 10_000,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparseable values keep defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            tasks_file: lookup("TASKS_FILE").map(PathBuf::from).unwrap_or(defaults.tasks_file),
            port: parse_or(&lookup, "PORT", defaults.port),
            task_cache_ttl_secs: parse_or(
                &lookup,
                "TASK_CACHE_TTL_SECS",
                defaults.task_cache_ttl_secs,
            ),
            response_cache_ttl_secs: parse_or(
                &lookup,
                "RESPONSE_CACHE_TTL_SECS",
                defaults.response_cache_ttl_secs,
            ),
            response_cache_capacity: parse_or(
                &lookup,
                "RESPONSE_CACHE_CAPACITY",
                defaults.response_cache_capacity,
            ),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
    }
}
