use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::ledger::EmployeeId;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_api_per_min: u32,

    /// Employees seeded with a fresh balance at startup
    pub seed_employee_ids: Vec<EmployeeId>,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_addr: var("SERVER_ADDR", "127.0.0.1:8080"),
            api_prefix: var("API_PREFIX", "/api"),
            rate_api_per_min: parse("RATE_API_PER_MIN", &var("RATE_API_PER_MIN", "1000"))?,
            seed_employee_ids: var("SEED_EMPLOYEE_IDS", "1,2")
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| parse("SEED_EMPLOYEE_IDS", id))
                .collect::<Result<_>>()?,
            log_dir: var("LOG_DIR", "logs"),
        })
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {value:?}"))
}
