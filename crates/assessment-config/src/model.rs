use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

use crate::ConfigError;

const EXPORT_DIR_NAME: &str = "Assessments";

/// User preferences for the assessment shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_recipient_value")]
    pub default_recipient: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Where document exports are written. Defaults to `~/Documents/Assessments`.
    pub export_dir: Option<PathBuf>,

    #[serde(default = "Config::default_pdf_scale")]
    pub pdf_scale: f32,

    #[serde(default = "Config::default_lines_per_page")]
    pub lines_per_page: usize,

    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_recipient: Self::default_recipient_value(),
            export_dir: None,
            pdf_scale: Self::default_pdf_scale(),
            lines_per_page: Self::default_lines_per_page(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_recipient_value() -> String {
        "area.report@example.com".into()
    }

    pub fn default_pdf_scale() -> f32 {
        2.0
    }

    pub fn default_lines_per_page() -> usize {
        60
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_export_dir(&self) -> PathBuf {
        if let Some(path) = &self.export_dir {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(EXPORT_DIR_NAME)
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::Recipient => self.default_recipient.clone(),
            ConfigKey::ExportDir => self.resolve_export_dir().display().to_string(),
            ConfigKey::Scale => self.pdf_scale.to_string(),
            ConfigKey::LinesPerPage => self.lines_per_page.to_string(),
            ConfigKey::Color => self.ui_color_enabled.to_string(),
        }
    }

    /// Parses `value` for `key` and stores it. The config is left untouched
    /// when the value does not parse.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.key(),
            value: value.to_string(),
            reason: reason.to_string(),
        };
        match key {
            ConfigKey::Recipient => {
                if !value.contains('@') {
                    return Err(invalid("expected an email address"));
                }
                self.default_recipient = value.to_string();
            }
            ConfigKey::ExportDir => {
                self.export_dir = match value {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            ConfigKey::Scale => {
                let scale: f32 = value.parse().map_err(|_| invalid("expected a number"))?;
                if !(scale > 0.0 && scale <= 8.0) {
                    return Err(invalid("scale must be within (0, 8]"));
                }
                self.pdf_scale = scale;
            }
            ConfigKey::LinesPerPage => {
                let lines: usize = value
                    .parse()
                    .map_err(|_| invalid("expected a positive integer"))?;
                if lines == 0 {
                    return Err(invalid("expected a positive integer"));
                }
                self.lines_per_page = lines;
            }
            ConfigKey::Color => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" | "1" => true,
                    "off" | "false" | "no" | "0" => false,
                    _ => return Err(invalid("expected on or off")),
                };
            }
        }
        Ok(())
    }
}

/// Keys addressable from the `config` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Recipient,
    ExportDir,
    Scale,
    LinesPerPage,
    Color,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::Recipient,
        ConfigKey::ExportDir,
        ConfigKey::Scale,
        ConfigKey::LinesPerPage,
        ConfigKey::Color,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ConfigKey::Recipient => "recipient",
            ConfigKey::ExportDir => "export_dir",
            ConfigKey::Scale => "scale",
            ConfigKey::LinesPerPage => "lines_per_page",
            ConfigKey::Color => "color",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace('-', "_");
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.key() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(value.trim().to_string()))
    }
}
