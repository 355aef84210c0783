//! Engine configuration
//!
//! Read from `tessera.toml`. Every section is optional and falls back to its
//! defaults, so an empty file is a valid configuration.

use crate::buffer::RenderMode;
use crate::screen::PlaySettings;
use crate::style::{Color, Style};
use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "tessera.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "TESSERA_CONFIG";

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Frame rendering
    #[serde(default)]
    pub render: RenderConfig,
    /// Key input
    #[serde(default)]
    pub input: InputConfig,
    /// Screen sizing
    #[serde(default)]
    pub screen: ScreenConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TuiConfig {
    /// Load the first configuration found.
    ///
    /// Looks at `./tessera.toml`, then `~/.tessera/tessera.toml`, then the
    /// file named by `TESSERA_CONFIG`. With none present the defaults are
    /// used; a file that exists but does not parse is an error.
    pub fn load() -> Result<Self> {
        match Self::discover() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Candidate paths in search order, keeping only existing files
    fn discover() -> Option<PathBuf> {
        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(base_dirs) = BaseDirs::new() {
            candidates.push(base_dirs.home_dir().join(".tessera").join(CONFIG_FILE_NAME));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            candidates.push(PathBuf::from(path));
        }
        candidates.into_iter().find(|path| path.is_file())
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }
        if self.render.default_char.is_control() {
            return Err(anyhow::anyhow!(
                "Default character must be printable, got {:?}",
                self.render.default_char
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to the configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("TESSERA_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Ok(mode) = std::env::var("TESSERA_RENDER_MODE") {
            match mode.to_lowercase().as_str() {
                "plain" => self.render.mode = RenderMode::Plain,
                "styled" => self.render.mode = RenderMode::Styled,
                _ => {}
            }
        }
    }

    /// Screen default style from the configured colors; empty when none are set
    pub fn default_style(&self) -> Style {
        Style {
            fg: self.render.fg,
            bg: self.render.bg,
            ..Style::new()
        }
    }

    /// Play loop settings derived from this configuration
    pub fn play_settings(&self) -> PlaySettings {
        PlaySettings {
            wait_for_input: self.input.wait_for_input,
            render_mode: self.render.mode,
            default_char: self.render.default_char,
        }
    }
}

/// Frame rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// "styled" emits escape sequences per style run, "plain" emits text only
    #[serde(default)]
    pub mode: RenderMode,
    /// Character drawn in cells that hold none
    #[serde(default = "default_char")]
    pub default_char: char,
    /// Foreground for cells left unstyled, e.g. "white" or "#d0d0d0"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    /// Background for cells left unstyled, e.g. "dark_blue" or "17"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
}

fn default_char() -> char {
    ' '
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Styled,
            default_char: default_char(),
            fg: None,
            bg: None,
        }
    }
}

/// Key input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Block on key reads; when false the play loop busy-polls
    #[serde(default = "default_wait_for_input")]
    pub wait_for_input: bool,
}

fn default_wait_for_input() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wait_for_input: default_wait_for_input(),
        }
    }
}

/// Screen sizing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScreenConfig {
    /// Follow the terminal size before each frame
    #[serde(default)]
    pub auto_resize: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file; stderr when unset
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TuiConfig::from_toml("").unwrap();
        assert_eq!(config, TuiConfig::default());
        assert_eq!(config.render.mode, RenderMode::Styled);
        assert_eq!(config.render.default_char, ' ');
        assert!(config.input.wait_for_input);
        assert!(!config.screen.auto_resize);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config = TuiConfig::from_toml(
            r#"
            [render]
            mode = "plain"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.render.mode, RenderMode::Plain);
        assert_eq!(config.render.default_char, ' ');
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err = TuiConfig::from_toml("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_unknown_render_mode_rejected() {
        assert!(TuiConfig::from_toml("[render]\nmode = \"fancy\"").is_err());
    }

    #[test]
    fn test_play_settings() {
        let config = TuiConfig::from_toml(
            r#"
            [render]
            default_char = "."
            [input]
            wait_for_input = false
            "#,
        )
        .unwrap();
        let settings = config.play_settings();
        assert!(!settings.wait_for_input);
        assert_eq!(settings.default_char, '.');
        assert_eq!(settings.render_mode, RenderMode::Styled);
    }

    #[test]
    fn test_render_colors() {
        let config = TuiConfig::from_toml(
            r##"
            [render]
            fg = "#d0d0d0"
            bg = "dark_blue"
            "##,
        )
        .unwrap();
        assert_eq!(config.render.fg, Some(Color::Rgb(0xd0, 0xd0, 0xd0)));
        assert_eq!(
            config.default_style(),
            Style::new().fg(Color::Rgb(0xd0, 0xd0, 0xd0)).bg(Color::DarkBlue)
        );
        assert!(TuiConfig::default().default_style().is_empty());

        let err = TuiConfig::from_toml("[render]\nbg = \"chartreuse\"").unwrap_err();
        assert!(format!("{err:#}").contains("chartreuse"));
    }

    #[test]
    fn test_config_serializes_back() {
        let mut config = TuiConfig::default();
        config.render.bg = Some(Color::Indexed(17));
        let text = toml::to_string(&config).unwrap();
        assert_eq!(TuiConfig::from_toml(&text).unwrap(), config);
    }
}
