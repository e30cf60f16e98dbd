use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::consolidate::{ConsolidatorConfig, DuplicatePolicy};

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pipeline: ConsolidatorConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let registry_csv = env::var("APP_REGISTRY_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("find-cnpj/resultados_cnpj.csv"));
        let instagram_csv = env::var("APP_INSTAGRAM_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("find-instagram/resultados_instagram.csv"));
        let output_csv = env::var("APP_OUTPUT_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("resultados_consolidados.csv"));

        let duplicates = match env::var("APP_ON_DUPLICATE") {
            Ok(value) => parse_duplicate_policy(&value)
                .ok_or(ConfigError::InvalidDuplicatePolicy { value })?,
            Err(_) => DuplicatePolicy::Overwrite,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            pipeline: ConsolidatorConfig {
                registry_csv,
                instagram_csv,
                output_csv,
                duplicates,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_duplicate_policy(value: &str) -> Option<DuplicatePolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "overwrite" | "last-wins" | "last_wins" => Some(DuplicatePolicy::Overwrite),
        "reject" | "error" => Some(DuplicatePolicy::Reject),
        _ => None,
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDuplicatePolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDuplicatePolicy { value } => {
                write!(f, "APP_ON_DUPLICATE must be `overwrite` or `reject`, got `{value}`")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
