//! TOML-based configuration for the client.
//!
//! Example configuration:
//! ```toml
//! [render]
//! terminate_statements = true  # append ';' to every statement
//!
//! [logging]
//! log_statements = false       # debug-log SQL before it is executed
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SNOWFLAKE_SDK_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "snowflake-sdk.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Statement output.
    pub render: RenderSettings,

    /// Statement logging.
    pub logging: LoggingSettings,
}

/// Statement output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Terminate each emitted statement with `;`.
    pub terminate_statements: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log each statement at debug level before execution.
    pub log_statements: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_statements: true,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SNOWFLAKE_SDK_CONFIG`
    /// 2. `./snowflake-sdk.toml`
    ///
    /// Falls back to defaults when neither exists.
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        Ok(Settings::default())
    }

    /// Apply the output settings to a rendered statement.
    pub fn finish_statement(&self, mut sql: String) -> String {
        if self.render.terminate_statements && !sql.ends_with(';') {
            sql.push(';');
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[render]
terminate_statements = true

[logging]
log_statements = false
"#;

        let settings = Settings::from_toml_str(toml).unwrap();

        assert!(settings.render.terminate_statements);
        assert!(!settings.logging.log_statements);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = Settings::from_toml_str("[render]\nterminate_statements = true\n").unwrap();
        assert!(settings.render.terminate_statements);
        assert!(settings.logging.log_statements);
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert!(!settings.render.terminate_statements);
        assert!(settings.logging.log_statements);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Settings::from_toml_str("[render]\nterminate_statements = \"yes\"\n");
        assert!(matches!(result, Err(SettingsError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Settings::from_file("/nonexistent/snowflake-sdk.toml");
        assert!(matches!(result, Err(SettingsError::FileNotFound(_))));
    }

    #[test]
    fn test_finish_statement() {
        let mut settings = Settings::default();
        assert_eq!(settings.finish_statement("DROP ROLE \"R\"".into()), "DROP ROLE \"R\"");

        settings.render.terminate_statements = true;
        assert_eq!(settings.finish_statement("DROP ROLE \"R\"".into()), "DROP ROLE \"R\";");
        assert_eq!(settings.finish_statement("DROP ROLE \"R\";".into()), "DROP ROLE \"R\";");
    }
}
