//! Panel configuration management.
//!
//! The configuration is a human-edited JSON document whose property names
//! match the ones server owners already know from the plugin's published
//! config (`"Button width"`, `"List of buttons"`, ...). Loading never fails the
//! caller: a broken document is reported and replaced by the built-in default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::types::Anchor;

fn default_background_color() -> String {
    "0 0 0 0.8".to_string()
}

fn default_anchor() -> Anchor {
    Anchor::new(0.01, 0.88)
}

fn default_horizontal_margin() -> f64 {
    0.002
}

fn default_vertical_margin() -> f64 {
    0.004
}

fn default_button_width() -> f64 {
    0.085
}

fn default_button_height() -> f64 {
    0.035
}

fn default_buttons() -> Vec<ButtonSpec> {
    vec![ButtonSpec::default()]
}

/// Layout and content of the button panel.
///
/// All sizes are fractions of the screen. Buttons are stacked top to bottom
/// in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Panel background as `"r g b a"`
    #[serde(rename = "Background Color", default = "default_background_color")]
    pub background_color: String,
    /// Top-left corner of the panel
    #[serde(rename = "GUI Left Top Position", default = "default_anchor")]
    pub anchor: Anchor,
    /// Gap left and right of the button column
    #[serde(
        rename = "Distance between buttons(horizontal)",
        default = "default_horizontal_margin"
    )]
    pub horizontal_margin: f64,
    /// Gap above, between and below buttons
    #[serde(
        rename = "Distance between buttons(vertical)",
        default = "default_vertical_margin"
    )]
    pub vertical_margin: f64,
    #[serde(rename = "Button width", default = "default_button_width")]
    pub button_width: f64,
    #[serde(rename = "Button height", default = "default_button_height")]
    pub button_height: f64,
    #[serde(rename = "List of buttons", default = "default_buttons")]
    pub buttons: Vec<ButtonSpec>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            anchor: default_anchor(),
            horizontal_margin: default_horizontal_margin(),
            vertical_margin: default_vertical_margin(),
            button_width: default_button_width(),
            button_height: default_button_height(),
            buttons: default_buttons(),
        }
    }
}

/// One entry of the button list.
///
/// Properties left out of an entry keep their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonSpec {
    /// Button fill as `"r g b a"`
    #[serde(rename = "Button color")]
    pub fill_color: String,
    /// Rich-text color, hex (`#ffffff`) or a color name
    #[serde(rename = "Text color")]
    pub text_color: String,
    #[serde(rename = "Text size")]
    pub text_size: u16,
    #[serde(rename = "Button text")]
    pub text: String,
    #[serde(rename = "Execute chat (true) or console (false) command")]
    pub is_chat_command: bool,
    #[serde(rename = "Executing command")]
    pub command: String,
    /// Empty means the button is shown to everyone
    #[serde(rename = "Permission")]
    pub permission: String,
}

impl Default for ButtonSpec {
    fn default() -> Self {
        Self {
            fill_color: "0.0 0.0 0.0 1.0".to_string(),
            text_color: "#ffffff".to_string(),
            text_size: 12,
            text: "Accept TP".to_string(),
            is_chat_command: true,
            command: "/tpa".to_string(),
            permission: String::new(),
        }
    }
}

impl ButtonSpec {
    /// Permission required to see and use this button, if any.
    pub fn required_permission(&self) -> Option<&str> {
        let perm = self.permission.trim();
        (!perm.is_empty()).then_some(perm)
    }
}

/// Checks a `"r g b a"` color string: four numbers, each in `[0, 1]`.
pub fn is_valid_rgba(color: &str) -> bool {
    let components: Vec<f64> = match color
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<_, _>>()
    {
        Ok(components) => components,
        Err(_) => return false,
    };
    components.len() == 4 && components.iter().all(|c| (0.0..=1.0).contains(c))
}

impl PanelConfig {
    /// Loads the configuration from a JSON file.
    ///
    /// A missing file is created with the default configuration. A file that
    /// cannot be read, parsed or validated is left alone and the default
    /// configuration is used instead, with a warning.
    pub async fn load_from_file(path: &Path) -> Self {
        if !path.exists() {
            let default_config = Self::default();
            match default_config.save_to_file(path).await {
                Ok(()) => info!("Created default configuration file: {}", path.display()),
                Err(e) => warn!("Could not write default configuration: {}", e),
            }
            return default_config;
        }

        match Self::try_load(path).await {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Your configuration file contains an error. \
                     Using default configuration values. ({})",
                    e
                );
                Self::default()
            }
        }
    }

    /// Reads, parses and validates the file without any fallback.
    pub async fn try_load(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
        let config: PanelConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Deserialization(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub async fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialization)?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| ConfigError::FileWrite(path.to_path_buf(), e))
    }

    /// Validates sizes, anchor, colors and button entries.
    pub fn validate(&self) -> ConfigResult<()> {
        let sizes = [
            ("Distance between buttons(horizontal)", self.horizontal_margin),
            ("Distance between buttons(vertical)", self.vertical_margin),
            ("Button width", self.button_width),
            ("Button height", self.button_height),
        ];
        for (field, value) in sizes {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !self.anchor.is_on_screen() {
            return Err(ConfigError::AnchorOffScreen(self.anchor.to_string()));
        }

        if !is_valid_rgba(&self.background_color) {
            return Err(ConfigError::InvalidColor {
                field: "Background Color".to_string(),
                value: self.background_color.clone(),
            });
        }

        for (index, button) in self.buttons.iter().enumerate() {
            if !is_valid_rgba(&button.fill_color) {
                return Err(ConfigError::InvalidColor {
                    field: format!("Button {index} color"),
                    value: button.fill_color.clone(),
                });
            }
            if button.text_size == 0 {
                return Err(ConfigError::ZeroTextSize(index));
            }
            if button.command.trim().is_empty() {
                return Err(ConfigError::EmptyCommand(index));
            }
        }

        Ok(())
    }

    /// Distinct non-empty permissions referenced by the button list, in list order.
    pub fn permissions(&self) -> Vec<&str> {
        let mut perms: Vec<&str> = Vec::new();
        for perm in self.buttons.iter().filter_map(ButtonSpec::required_permission) {
            if !perms.contains(&perm) {
                perms.push(perm);
            }
        }
        perms
    }
}
