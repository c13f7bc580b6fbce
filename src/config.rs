use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub betting: BettingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BettingConfig {
    #[serde(default = "default_confirmation_delay")]
    pub confirmation_delay_ms: u64,
}

fn default_log_level() -> String { "info".to_string() }
fn default_request_timeout() -> u64 { 10 }
fn default_confirmation_delay() -> u64 { 1500 }

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { request_timeout_secs: default_request_timeout() }
    }
}

impl Default for BettingConfig {
    fn default() -> Self {
        Self { confirmation_delay_ms: default_confirmation_delay() }
    }
}

/// Backend credentials, read from the environment or `.env`.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

impl EnvConfig {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            supabase_url: env_var("SUPABASE_URL").context("SUPABASE_URL not set")?,
            supabase_anon_key: env_var("SUPABASE_ANON_KEY")
                .context("SUPABASE_ANON_KEY not set")?,
        })
    }
}

/// `NAME`, falling back to the bundler-style `VITE_NAME`.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .or_else(|_| std::env::var(format!("VITE_{}", name)))
        .ok()
        .filter(|v| !v.is_empty())
}
