//! Plugin lifecycle: wires configuration, visibility, layout and dispatch to
//! the host's hooks.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::PanelConfig;
use crate::dispatch::{dispatch, CommandKind, CommandTransport, DispatchOutcome, ExecArgs};
use crate::lang::{self, Localizer, NO_PERMISSION, ONLY_PLAYER};
use crate::permissions::{is_visible, visible_buttons, PermissionChecker};
use crate::types::{PlayerId, Viewer};
use crate::ui::{build_panel, UiElement, UiRenderer, PANEL_NAME};

/// Host capabilities the plugin depends on.
#[derive(Clone)]
pub struct HostServices {
    pub permissions: Arc<dyn PermissionChecker>,
    pub transport: Arc<dyn CommandTransport>,
    pub renderer: Arc<dyn UiRenderer>,
    pub localizer: Arc<dyn Localizer>,
}

/// A raw `commandbuttons.exec` invocation as delivered by the host.
#[derive(Debug, Clone)]
pub struct ExecInvocation {
    /// Invoking player, `None` when run from the server console
    pub caller: Option<Viewer>,
    pub args: Vec<String>,
}

/// Panel currently on a viewer's screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedPanel {
    pub viewer: Viewer,
    pub button_count: usize,
}

/// The command button panel plugin.
///
/// Every hook is cheap and non-blocking. Panel mutations for one viewer run
/// under that viewer's map entry, so a destroy/add pair is never interleaved
/// with another update for the same viewer. Renderer implementations must not
/// call back into the plugin.
pub struct CommandButtonsPlugin {
    name: String,
    config: PanelConfig,
    host: HostServices,
    displayed: Arc<DashMap<PlayerId, DisplayedPanel>>,
}

impl CommandButtonsPlugin {
    pub fn new(host: HostServices) -> Self {
        Self::with_config(host, PanelConfig::default())
    }

    pub fn with_config(host: HostServices, config: PanelConfig) -> Self {
        Self {
            name: "command_buttons".to_string(),
            config,
            host,
            displayed: Arc::new(DashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Loads the configuration, registers permissions and messages, and shows
    /// the panel to everyone already online.
    pub async fn on_init(&mut self, config_path: &Path, active_viewers: &[Viewer]) {
        self.config = PanelConfig::load_from_file(config_path).await;
        self.start(active_viewers);
    }

    /// Same as [`on_init`](Self::on_init) with an already loaded configuration.
    pub fn start(&self, active_viewers: &[Viewer]) {
        for perm in self.config.permissions() {
            self.host.permissions.register_permission(perm);
        }
        lang::register_defaults(self.host.localizer.as_ref());

        let shown = active_viewers
            .iter()
            .filter(|viewer| self.show_ui(viewer))
            .count();
        info!(
            "🔘 {} v{} started with {} button(s); panel shown to {}/{} player(s)",
            self.name,
            self.version(),
            self.config.buttons.len(),
            shown,
            active_viewers.len()
        );
    }

    /// Removes the panel from every active viewer and anyone still tracked.
    pub fn on_unload(&self, active_viewers: &[Viewer]) {
        for viewer in active_viewers {
            self.destroy_ui(viewer);
        }

        // Collected first: destroying takes the entry lock
        let leftovers: Vec<Viewer> = self
            .displayed
            .iter()
            .map(|entry| entry.value().viewer)
            .collect();
        for viewer in &leftovers {
            self.destroy_ui(viewer);
        }
        info!("🔘 {} unloaded", self.name);
    }

    /// Player finished loading in or respawned.
    pub fn on_player_sleep_ended(&self, viewer: &Viewer) {
        self.show_ui(viewer);
    }

    pub fn on_player_death(&self, viewer: &Viewer) {
        self.destroy_ui(viewer);
    }

    /// Replaces `viewer`'s panel with a freshly computed one.
    ///
    /// Any previous panel is destroyed before the new one is added. Returns
    /// whether a panel is on screen afterwards; a viewer with no visible
    /// buttons gets nothing.
    pub fn show_ui(&self, viewer: &Viewer) -> bool {
        let visible =
            visible_buttons(viewer, &self.config.buttons, self.host.permissions.as_ref());
        let elements = build_panel(&self.config, &visible);
        let panel = DisplayedPanel {
            viewer: *viewer,
            button_count: visible.len(),
        };

        match self.displayed.entry(viewer.id) {
            Entry::Occupied(mut entry) => {
                if self.swap_panel(viewer, elements.as_deref()) {
                    *entry.get_mut() = panel;
                    true
                } else {
                    entry.remove();
                    false
                }
            }
            Entry::Vacant(entry) => {
                if self.swap_panel(viewer, elements.as_deref()) {
                    entry.insert(panel);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Removes `viewer`'s panel, if any.
    pub fn destroy_ui(&self, viewer: &Viewer) {
        let entry = self.displayed.entry(viewer.id);
        self.destroy_panel(viewer);
        if let Entry::Occupied(entry) = entry {
            entry.remove();
        }
    }

    /// Panel currently tracked for `player`.
    pub fn displayed_panel(&self, player: PlayerId) -> Option<DisplayedPanel> {
        self.displayed.get(&player).map(|entry| *entry.value())
    }

    /// Entry point for `commandbuttons.exec <chat|console> <command...>`.
    ///
    /// Always returns `false` so the host keeps processing the command.
    pub fn handle_exec(&self, invocation: &ExecInvocation) -> bool {
        let exec = match ExecArgs::parse(invocation.args.as_slice()) {
            Ok(exec) => exec,
            Err(e) => {
                debug!("Ignoring exec invocation: {}", e);
                return false;
            }
        };

        let Some(caller) = invocation.caller else {
            let message = self.host.localizer.get_message(ONLY_PLAYER, None);
            self.host.transport.reply(None, &message);
            return false;
        };

        let command = exec.command();
        if !self.may_run(&caller, exec.kind, &command) {
            let message = self.host.localizer.get_message(NO_PERMISSION, Some(caller.id));
            self.host.transport.reply(Some(caller.connection), &message);
            debug!("Player {} denied {} command {:?}", caller.id, exec.kind, command);
            return false;
        }

        if let DispatchOutcome::Dropped = dispatch(
            self.host.transport.as_ref(),
            caller.connection,
            exec.kind,
            &command,
        ) {
            debug!("Command for player {} was not sent", caller.id);
        }
        false
    }

    /// A command bound to configured buttons may only be run by a viewer who
    /// can see at least one of them. Commands no button carries pass through.
    fn may_run(&self, viewer: &Viewer, kind: CommandKind, command: &str) -> bool {
        let mut bound = self
            .config
            .buttons
            .iter()
            .filter(|button| {
                CommandKind::from_chat_flag(button.is_chat_command) == kind
                    && button.command.split_whitespace().eq(command.split_whitespace())
            })
            .peekable();

        if bound.peek().is_none() {
            return true;
        }
        bound.any(|button| is_visible(viewer, button, self.host.permissions.as_ref()))
    }

    fn swap_panel(&self, viewer: &Viewer, elements: Option<&[UiElement]>) -> bool {
        self.destroy_panel(viewer);

        let Some(elements) = elements else {
            debug!("No visible buttons for player {}, panel suppressed", viewer.id);
            return false;
        };

        match self.host.renderer.add_ui(viewer, elements) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to show panel to player {}: {}", viewer.id, e);
                false
            }
        }
    }

    fn destroy_panel(&self, viewer: &Viewer) {
        if let Err(e) = self.host.renderer.destroy_ui(viewer, PANEL_NAME) {
            warn!("Failed to remove panel from player {}: {}", viewer.id, e);
        }
    }
}
