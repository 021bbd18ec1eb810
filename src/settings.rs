use crate::db;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub pool_size: u32,
    /// CSV imported at startup when the question table is empty.
    pub seed_csv: Option<PathBuf>,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Defaults, then `trivia.toml` if present, then `TRIVIA_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 5000)?
            .set_default(
                "database_path",
                db::default_db_path().to_string_lossy().to_string(),
            )?
            .set_default("pool_size", 8)?
            .set_default("log_filter", "info")
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.bind_addr(), ("127.0.0.1", 5000));
        assert_eq!(settings.pool_size, 8);
        assert_eq!(settings.log_filter, "info");
        assert!(settings.seed_csv.is_none());
        assert!(settings.log_file.is_none());
        assert!(settings.database_path.ends_with("trivia.db"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .add_source(File::from_str(
                "port = 8080\nseed_csv = \"data/questions.csv\"\nlog_filter = \"debug\"",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.seed_csv, Some(PathBuf::from("data/questions.csv")));
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.host, "127.0.0.1");
    }
}
