//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Currency symbol printed on receipts when none is configured.
pub const DEFAULT_CURRENCY: &str = "₱";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Symbol printed before fees and rates.
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("carpark.db"),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (CARPARK_*)
        figment = figment.merge(Env::prefixed("CARPARK_"));

        figment.extract()
    }

    /// Formats an amount with the configured currency symbol.
    pub fn money(&self, amount: i64) -> String {
        format!("{}{amount}", self.currency)
    }
}

/// Returns the platform-specific config directory for carpark.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("carpark"))
}

/// Returns the platform-specific data directory for carpark.
///
/// On Linux: `~/.local/share/carpark`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("carpark"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_carpark() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "carpark");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("carpark.db"));
        assert_eq!(config.currency, "₱");
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "database_path = \"/tmp/lot.db\"\ncurrency = \"$\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/lot.db"));
        assert_eq!(config.money(150), "$150");
    }
}
