use crate::error::{Error, Result};
use crate::models::question::{Difficulty, MathTopic};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_name: String,
    pub api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub generation_timeout_secs: u64,
    pub cors_allowed_origin: String,
    pub practice_topic: MathTopic,
    pub practice_difficulty: Difficulty,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8000"),
            database_name: get_env("DB_NAME")?,
            api_key: get_env("API_KEY")?,
            gemini_model: get_env_or("GEMINI_MODEL", "gemini-pro"),
            gemini_base_url: get_env_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com",
            ),
            generation_timeout_secs: get_env_parse_or("GENERATION_TIMEOUT_SECS", 60)?,
            cors_allowed_origin: get_env_or("CORS_ALLOWED_ORIGIN", "http://localhost:5173"),
            practice_topic: get_env_parse_or("PRACTICE_TOPIC", MathTopic::Algebra)?,
            practice_difficulty: get_env_parse_or("PRACTICE_DIFFICULTY", Difficulty::Intermediate)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("Missing environment variable: {}", name))),
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
