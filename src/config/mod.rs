use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Fallback filter when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// `~/.e2spy`, or `./.e2spy` when no home directory is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".e2spy")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("e2spy.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("e2spy.sqlite")
    }

    /// Where a `--db` value points: absolute paths as given, relative ones
    /// inside the config directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Self::config_dir().join(path)
        }
    }

    /// Load the configuration file, or defaults if there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        // An empty file deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> AppResult<()> {
        if self.database.trim().is_empty() {
            return Err(AppError::Config("'database' must not be empty".to_string()));
        }
        Ok(())
    }

    /// Create the config directory, the config file and an empty database file.
    /// Returns the database path that was set up.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = custom_db
            .map(Self::resolve_db_path)
            .unwrap_or_else(Self::database_file);

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(config.to_yaml()?.as_bytes())?;
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = Config::from_yaml("database: /srv/e2spy/app.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/srv/e2spy/app.sqlite");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            Config::from_yaml("database: ''\n"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml("database: [1, 2]\n"),
            Err(AppError::ConfigLoad(_))
        ));
    }

    #[test]
    fn yaml_round_trip() {
        let cfg = Config {
            database: "/tmp/x.sqlite".to_string(),
            log_level: "debug".to_string(),
        };
        assert_eq!(Config::from_yaml(&cfg.to_yaml().unwrap()).unwrap(), cfg);
    }

    #[test]
    fn relative_db_path_lands_in_config_dir() {
        assert_eq!(
            Config::resolve_db_path("rel.sqlite"),
            Config::config_dir().join("rel.sqlite")
        );
        let abs = std::env::temp_dir().join("abs.sqlite");
        assert_eq!(Config::resolve_db_path(&abs.to_string_lossy()), abs);
    }

    #[test]
    fn load_from_missing_path_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("none.conf")).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
