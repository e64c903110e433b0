//! Stand-in host for previewing the panel from the command line.
//!
//! Rendered UI and sent packets are printed to stdout as JSON.

use command_buttons::error::{RenderError, TransportError};
use command_buttons::{
    CommandPacket, CommandTransport, ConnectionId, HostServices, Localizer, PermissionChecker,
    PlayerId, UiElement, UiRenderer, Viewer,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::debug;

const DEFAULT_LOCALE: &str = "en";

pub struct PreviewHost {
    grants: HashSet<String>,
    messages: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl PreviewHost {
    pub fn new(grants: impl IntoIterator<Item = String>) -> Arc<Self> {
        Arc::new(Self {
            grants: grants.into_iter().collect(),
            messages: Mutex::new(HashMap::new()),
        })
    }

    pub fn services(self: &Arc<Self>) -> HostServices {
        HostServices {
            permissions: self.clone(),
            transport: self.clone(),
            renderer: self.clone(),
            localizer: self.clone(),
        }
    }
}

impl PermissionChecker for PreviewHost {
    fn has_permission(&self, _player: PlayerId, permission: &str) -> bool {
        self.grants.contains(permission)
    }

    fn register_permission(&self, permission: &str) {
        debug!("Registered permission {}", permission);
    }
}

impl CommandTransport for PreviewHost {
    fn is_connected(&self) -> bool {
        true
    }

    fn send(&self, connection: ConnectionId, packet: &CommandPacket) -> Result<(), TransportError> {
        let json = serde_json::to_string(packet).map_err(|e| TransportError::Write(e.to_string()))?;
        println!("{connection} <- {json}");
        Ok(())
    }

    fn reply(&self, connection: Option<ConnectionId>, message: &str) {
        match connection {
            Some(connection) => println!("{connection} reply: {message}"),
            None => println!("console reply: {message}"),
        }
    }
}

impl UiRenderer for PreviewHost {
    fn add_ui(&self, viewer: &Viewer, elements: &[UiElement]) -> Result<(), RenderError> {
        println!("{} ui:", viewer.connection);
        println!("{}", serde_json::to_string_pretty(elements)?);
        Ok(())
    }

    fn destroy_ui(&self, viewer: &Viewer, name: &str) -> Result<(), RenderError> {
        debug!("Destroy {} for {}", name, viewer.connection);
        Ok(())
    }
}

impl Localizer for PreviewHost {
    fn register_messages(&self, locale: &str, messages: HashMap<String, String>) {
        if let Ok(mut catalogue) = self.messages.lock() {
            catalogue.insert(locale.to_string(), messages);
        }
    }

    fn get_message(&self, key: &str, _player: Option<PlayerId>) -> String {
        self.messages
            .lock()
            .ok()
            .and_then(|catalogue| catalogue.get(DEFAULT_LOCALE)?.get(key).cloned())
            .unwrap_or_else(|| key.to_string())
    }
}
