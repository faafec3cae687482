//! User Configuration (~/.nunit-task/config.toml)
//!
//! Machine-wide defaults, typically where nunit-console is installed.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration from ~/.nunit-task/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    /// Tool location defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<UserToolConfig>,
}

/// Tool location defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct UserToolConfig {
    /// Directory containing nunit-console
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_path: Option<PathBuf>,

    /// Prefer the 32 bit console
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_32bit: Option<bool>,
}

impl UserConfig {
    /// Load user configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the user configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(path) = self.tool_path() {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "tool.tool-path".to_string(),
                    reason: "path cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Default location of the user configuration file
    pub fn user_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".nunit-task").join("config.toml"))
    }

    pub fn tool_path(&self) -> Option<&Path> {
        self.tool.as_ref().and_then(|t| t.tool_path.as_deref())
    }

    pub fn force_32bit(&self) -> Option<bool> {
        self.tool.as_ref().and_then(|t| t.force_32bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_config() {
        let toml = r#"
[tool]
tool-path = "/opt/nunit/bin"
force-32bit = true
"#;
        let config: UserConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.tool_path(), Some(Path::new("/opt/nunit/bin")));
        assert_eq!(config.force_32bit(), Some(true));
    }

    #[test]
    fn test_empty_user_config() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert_eq!(config, UserConfig::default());
        assert_eq!(config.tool_path(), None);
        assert_eq!(config.force_32bit(), None);
    }

    #[test]
    fn test_empty_tool_path_rejected() {
        let toml = r#"
[tool]
tool-path = ""
"#;
        let config: UserConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let toml = r#"
[lsp]
hover = true
"#;
        assert!(toml::from_str::<UserConfig>(toml).is_err());
    }
}
