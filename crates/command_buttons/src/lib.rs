//! # Command Buttons
//!
//! A HUD panel of configurable buttons for game servers. Each button runs a
//! preconfigured chat or console command on the clicking player's client and
//! may be restricted to players holding a permission.
//!
//! ## Architecture
//!
//! - [`config`] - JSON configuration with fallback to built-in defaults
//! - [`permissions`] - Per-viewer button visibility
//! - [`layout`] - Panel and button geometry in normalized screen space
//! - [`ui`] - Client UI element tree built from a layout
//! - [`dispatch`] - `commandbuttons.exec` parsing, escaping and sending
//! - [`lang`] - Default localized messages
//! - [`plugin`] - Lifecycle hooks tying everything to the host
//!
//! The host's permission store, network transport, UI renderer and message
//! catalogue are reached through the [`PermissionChecker`],
//! [`CommandTransport`], [`UiRenderer`] and [`Localizer`] traits.
//!
//! ## Quick Start
//!
//! ```rust
//! use command_buttons::{compute_layout, PanelConfig};
//!
//! let config = PanelConfig::default();
//! let layout = compute_layout(&config, 3).expect("three buttons");
//! assert_eq!(layout.buttons.len(), 3);
//! assert!(compute_layout(&config, 0).is_none());
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod lang;
pub mod layout;
pub mod permissions;
pub mod plugin;
pub mod types;
pub mod ui;

pub use config::{ButtonSpec, PanelConfig};
pub use dispatch::{
    dispatch, dispatch_args, encode_command, quote_safe, unquote, CommandKind, CommandPacket,
    CommandTransport, DispatchOutcome, ExecArgs, MessageType, EXEC_COMMAND,
};
pub use error::{ConfigError, DispatchError, RenderError, TransportError};
pub use lang::Localizer;
pub use layout::{compute_layout, PanelLayout};
pub use permissions::{visible_buttons, PermissionChecker};
pub use plugin::{CommandButtonsPlugin, DisplayedPanel, ExecInvocation, HostServices};
pub use types::{Anchor, ConnectionId, PlayerId, Rect, Viewer};
pub use ui::{build_panel, UiComponent, UiElement, UiRenderer};
