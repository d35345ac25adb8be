use chrono::FixedOffset;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Required table-source keys, in the order they are reported when missing.
pub const SOURCE_KEYS: [&str; 4] = ["STORE", "STORE_INFO", "AR", "OUTPUT"];

const DEFAULT_UTC_OFFSET: &str = "+09:00";

/// Top-level configuration for the export job.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub sources: SourceConfig,
    pub tables: TableNames,
    pub window: ReportWindowConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = AppEnvironment::from_str(
            &lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
        );

        let source = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let missing: Vec<&'static str> = SOURCE_KEYS
            .into_iter()
            .filter(|key| source(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingSources(missing));
        }

        let sources = SourceConfig {
            store: source("STORE").unwrap_or_default(),
            store_info: source("STORE_INFO").unwrap_or_default(),
            applications: source("AR").unwrap_or_default(),
            output: source("OUTPUT").unwrap_or_default(),
        };

        let table = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let tables = TableNames {
            store: table("STORE_TABLE", "stores"),
            store_info: table("STORE_INFO_TABLE", "store_info"),
            applications: table("AR_TABLE", "applications"),
            output: table("OUTPUT_TABLE", "output"),
        };

        let raw_offset =
            lookup("RECRUIT_UTC_OFFSET").unwrap_or_else(|| DEFAULT_UTC_OFFSET.to_string());
        let utc_offset =
            parse_utc_offset(&raw_offset).ok_or(ConfigError::InvalidUtcOffset(raw_offset))?;

        let lookback_months = match lookup("RECRUIT_LOOKBACK_MONTHS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|months| *months > 0)
                .ok_or(ConfigError::InvalidLookback(raw))?,
            None => 1,
        };

        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            environment,
            sources,
            tables,
            window: ReportWindowConfig {
                utc_offset,
                lookback_months,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Opaque identifiers addressing each external table source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub store: String,
    pub store_info: String,
    pub applications: String,
    pub output: String,
}

/// Table names inside each source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub store: String,
    pub store_info: String,
    pub applications: String,
    pub output: String,
}

/// Civil calendar and recency window settings shared by the aggregator and formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindowConfig {
    pub utc_offset: FixedOffset,
    pub lookback_months: u32,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Parses a signed `+HH:MM` / `-HHMM` offset.
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    raw.trim().parse::<FixedOffset>().ok()
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSources(Vec<&'static str>),
    InvalidUtcOffset(String),
    InvalidLookback(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingSources(keys) => {
                write!(f, "missing required table sources: {}", keys.join(", "))
            }
            ConfigError::InvalidUtcOffset(value) => write!(
                f,
                "RECRUIT_UTC_OFFSET must look like +09:00 (got '{}')",
                value
            ),
            ConfigError::InvalidLookback(value) => write!(
                f,
                "RECRUIT_LOOKBACK_MONTHS must be a positive integer (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
