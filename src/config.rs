use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::game::{Deck, DEFAULT_SYMBOLS};
use crate::scores::{DEFAULT_PLAYER_NAME, DEFAULT_SCORES_KEY, LEADERBOARD_CAPACITY};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub leaderboard: LeaderboardConfig,
    pub logging: LoggingConfig,
}

/// Where a loaded [`AppConfig`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file was missing; built-in defaults were used.
    Defaults,
}

/// Board and pacing settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Face values; each becomes one pair on the board.
    pub symbols: Vec<String>,
    /// How long a mismatched pair stays face up.
    pub mismatch_delay_ms: u64,
    /// Period of the session timer.
    pub tick_interval_ms: u64,
    /// Tiles per row in the terminal grid.
    pub columns: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            mismatch_delay_ms: 1000,
            tick_interval_ms: 1000,
            columns: 4,
        }
    }
}

impl GameConfig {
    pub fn deck(&self) -> Result<Deck, ConfigError> {
        Ok(Deck::new(self.symbols.iter().cloned())?)
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub path: PathBuf,
    pub key: String,
    pub capacity: usize,
    pub default_player_name: String,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        LeaderboardConfig {
            path: PathBuf::from("memory_scores.json"),
            key: DEFAULT_SCORES_KEY.to_string(),
            capacity: LEADERBOARD_CAPACITY,
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file; the terminal is owned by the UI.
    pub file: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: PathBuf::from("memory_match.log"),
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let (config, source) = Self::load_with_source(path)?;
        if source == ConfigSource::Defaults {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
        }
        Ok(config)
    }

    /// Like [`AppConfig::load_or_default`] but reports where the values came
    /// from instead of logging, for callers that install logging from the
    /// loaded config.
    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            Ok((Self::load(path)?, ConfigSource::File))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.deck()?;

        if self.game.mismatch_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "game.mismatch_delay_ms must be > 0".into(),
            ));
        }
        if self.game.tick_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "game.tick_interval_ms must be > 0".into(),
            ));
        }
        if self.game.columns == 0 {
            return Err(ConfigError::Validation("game.columns must be > 0".into()));
        }

        if self.leaderboard.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "leaderboard.key must not be empty".into(),
            ));
        }
        if self.leaderboard.capacity == 0 {
            return Err(ConfigError::Validation(
                "leaderboard.capacity must be > 0".into(),
            ));
        }
        if self.leaderboard.default_player_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "leaderboard.default_player_name must not be blank".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values, for seeding a new
    /// config file.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.deck().unwrap().pairs(), 6);
        assert_eq!(config.game.mismatch_delay(), Duration::from_secs(1));
        assert_eq!(config.leaderboard.capacity, 10);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
symbols = ["A", "B"]
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.symbols, vec!["A", "B"]);
        assert_eq!(config.game.tick_interval_ms, 1000);
        assert_eq!(config.leaderboard.key, "highScores");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.game.symbols, default.game.symbols);
        assert_eq!(config.leaderboard.path, default.leaderboard.path);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_validation_rejects_duplicate_symbols() {
        let mut config = AppConfig::default();
        config.game.symbols = vec!["A".into(), "A".into()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Deck(BoardError::DuplicateSymbol(_)))
        ));
    }

    #[test]
    fn test_validation_rejects_empty_deck() {
        let mut config = AppConfig::default();
        config.game.symbols.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_delay() {
        let mut config = AppConfig::default();
        config.game.mismatch_delay_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_tick() {
        let mut config = AppConfig::default();
        config.game.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_columns() {
        let mut config = AppConfig::default();
        config.game.columns = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let mut config = AppConfig::default();
        config.leaderboard.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_default_name() {
        let mut config = AppConfig::default();
        config.leaderboard.default_player_name = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_key() {
        let mut config = AppConfig::default();
        config.leaderboard.key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.columns, 4);
    }

    #[test]
    fn test_load_with_source_reports_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let (config, source) = AppConfig::load_with_source(&missing).unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.leaderboard.capacity, 10);

        let present = dir.path().join("memory.toml");
        std::fs::write(&present, "[game]\ncolumns = 3\n").unwrap();
        let (config, source) = AppConfig::load_with_source(&present).unwrap();
        assert_eq!(source, ConfigSource::File);
        assert_eq!(config.game.columns, 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[leaderboard]
capacity = 5
default_player_name = "Anon"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.leaderboard.capacity, 5);
        assert_eq!(config.leaderboard.default_player_name, "Anon");
        assert_eq!(config.game.mismatch_delay_ms, 1000);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.toml");
        std::fs::write(&path, "[game]\ncolumns = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
