use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub payroll: PayrollConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

/// Payroll constants, kept in config so tests and deployments can run with
/// alternate rates instead of hard-coded literals
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PayrollConfig {
    /// Multiplier applied to overtime hours
    pub overtime_multiplier: f64,
    /// Flat social-charge rate applied to gross pay
    pub social_charge_rate: f64,
    /// Fallback hourly rate when neither employee nor mandate has one
    pub default_hourly_rate: f64,
    /// Weekly overtime threshold in hours; monthly threshold derives from it
    pub weekly_overtime_threshold: f64,
    /// Rows per import transaction chunk
    pub import_batch_size: usize,
    /// Hard cap: import_batch_size * import_max_batches rows per request
    pub import_max_batches: usize,
    /// Hours per employee above which a row is flagged for review
    pub review_hours_threshold: f64,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            overtime_multiplier: 1.25,
            social_charge_rate: 0.22,
            default_hourly_rate: 25.0,
            weekly_overtime_threshold: 40.0,
            import_batch_size: 500,
            import_max_batches: 20,
            review_hours_threshold: 200.0,
        }
    }
}

impl PayrollConfig {
    /// Maximum rows accepted by a single import request
    pub fn max_import_rows(&self) -> usize {
        self.import_batch_size * self.import_max_batches
    }
}

static PAYROLL_CONFIG: OnceCell<PayrollConfig> = OnceCell::new();

/// Store payroll constants for the lifetime of the process
pub fn init_payroll_config(config: PayrollConfig) {
    let _ = PAYROLL_CONFIG.set(config);
}

/// Payroll constants; defaults apply when init was never called (tests)
pub fn payroll_config() -> &'static PayrollConfig {
    PAYROLL_CONFIG.get_or_init(PayrollConfig::default)
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[payroll]
overtime_multiplier = 1.25
social_charge_rate = 0.22
default_hourly_rate = 25.0
weekly_overtime_threshold = 40.0
import_batch_size = 500
import_max_batches = 20
review_hours_threshold = 200.0
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    // If absolute path, use as is
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    // If relative path, resolve it relative to the executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(db_path);
            return Ok(resolved_path);
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.payroll.import_batch_size, 500);
        assert_eq!(config.payroll.max_import_rows(), 10_000);
    }

    #[test]
    fn test_payroll_section_optional() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.payroll.overtime_multiplier, 1.25);
        assert_eq!(config.payroll.social_charge_rate, 0.22);
        assert_eq!(config.payroll.default_hourly_rate, 25.0);
    }
}
