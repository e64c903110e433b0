//! UI element tree sent to the game client.
//!
//! The client understands a JSON list of named elements, each attached to a
//! parent and carrying a list of typed components. The panel is one image
//! element on the `Hud` layer; every button is a child of the panel with its
//! label as a grandchild text element.

use serde::{Deserialize, Serialize};

use crate::config::{ButtonSpec, PanelConfig};
use crate::dispatch::{button_command, CommandKind};
use crate::error::RenderError;
use crate::layout::compute_layout;
use crate::types::{Rect, Viewer};

/// Name of the panel element; destroying it removes all buttons too.
pub const PANEL_NAME: &str = "GameMenuCUI";

/// Client layer the panel is attached to.
pub const PANEL_PARENT: &str = "Hud";

const BUTTON_PREFIX: &str = "GameMenuCUIButton";

/// Client-side UI component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiComponent {
    #[serde(rename = "UnityEngine.UI.Image")]
    Image { color: String },
    #[serde(rename = "UnityEngine.UI.Button")]
    Button { command: String, color: String },
    #[serde(rename = "UnityEngine.UI.Text")]
    Text {
        text: String,
        #[serde(rename = "fontSize")]
        font_size: u16,
        align: TextAnchor,
    },
    #[serde(rename = "RectTransform")]
    RectTransform {
        #[serde(rename = "anchormin")]
        anchor_min: String,
        #[serde(rename = "anchormax")]
        anchor_max: String,
    },
}

impl UiComponent {
    pub fn rect(rect: &Rect) -> Self {
        Self::RectTransform {
            anchor_min: rect.anchor_min(),
            anchor_max: rect.anchor_max(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    MiddleCenter,
}

/// A named element of the client UI tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiElement {
    pub name: String,
    pub parent: String,
    pub components: Vec<UiComponent>,
}

/// Client-side UI operations provided by the host.
pub trait UiRenderer: Send + Sync {
    /// Adds `elements` to `viewer`'s screen.
    fn add_ui(&self, viewer: &Viewer, elements: &[UiElement]) -> Result<(), RenderError>;

    /// Removes the element called `name` (and its children) from `viewer`'s screen.
    fn destroy_ui(&self, viewer: &Viewer, name: &str) -> Result<(), RenderError>;
}

fn button_name(index: usize) -> String {
    format!("{BUTTON_PREFIX}.{index}")
}

/// Rich-text label for a button.
pub fn button_label(button: &ButtonSpec) -> String {
    format!("<color={}>{}</color>", button.text_color, button.text)
}

/// Builds the element tree for the given visible buttons.
///
/// Returns `None` when `visible` is empty: no background is rendered without
/// buttons.
pub fn build_panel(config: &PanelConfig, visible: &[&ButtonSpec]) -> Option<Vec<UiElement>> {
    let layout = compute_layout(config, visible.len())?;

    let mut elements = Vec::with_capacity(1 + visible.len() * 2);
    elements.push(UiElement {
        name: PANEL_NAME.to_string(),
        parent: PANEL_PARENT.to_string(),
        components: vec![
            UiComponent::Image {
                color: config.background_color.clone(),
            },
            UiComponent::rect(&layout.background),
        ],
    });

    for (index, (button, rect)) in visible.iter().zip(&layout.buttons).enumerate() {
        let name = button_name(index);
        let kind = CommandKind::from_chat_flag(button.is_chat_command);

        elements.push(UiElement {
            name: name.clone(),
            parent: PANEL_NAME.to_string(),
            components: vec![
                UiComponent::Button {
                    command: button_command(kind, &button.command),
                    color: button.fill_color.clone(),
                },
                UiComponent::rect(rect),
            ],
        });
        elements.push(UiElement {
            name: format!("{name}.text"),
            parent: name,
            components: vec![
                UiComponent::Text {
                    text: button_label(button),
                    font_size: button.text_size,
                    align: TextAnchor::MiddleCenter,
                },
                UiComponent::rect(&Rect {
                    left: 0.0,
                    bottom: 0.0,
                    right: 1.0,
                    top: 1.0,
                }),
            ],
        });
    }

    Some(elements)
}

/// Serializes elements to the JSON the client expects.
pub fn to_json(elements: &[UiElement]) -> Result<String, RenderError> {
    Ok(serde_json::to_string(elements)?)
}
