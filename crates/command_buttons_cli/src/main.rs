//! Command Buttons preview tool
//!
//! Loads a panel configuration the same way the plugin does, renders the
//! panel for one simulated player and optionally simulates a button click.

mod cli;
mod host;
mod logging;

use command_buttons::{CommandButtonsPlugin, ConnectionId, ExecInvocation, PlayerId, Viewer};
use tracing::info;

use cli::CliArgs;
use host::PreviewHost;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let level = args.log_level.as_deref().unwrap_or("info");
    logging::setup_logging(level, args.json_logs)?;

    let host = PreviewHost::new(args.grants.clone());
    let viewer = if args.admin {
        Viewer::admin(PlayerId::new(), ConnectionId(1))
    } else {
        Viewer::new(PlayerId::new(), ConnectionId(1))
    };
    info!(
        "👤 Simulated player {} (admin: {}, grants: {:?})",
        viewer.id, viewer.is_admin, args.grants
    );

    let mut plugin = CommandButtonsPlugin::new(host.services());
    plugin.on_init(&args.config_path, &[viewer]).await;

    if plugin.displayed_panel(viewer.id).is_none() {
        info!("No buttons are visible to this player; nothing rendered");
    }

    if let Some(exec) = args.exec {
        plugin.handle_exec(&ExecInvocation {
            caller: Some(viewer),
            args: exec,
        });
    }

    plugin.on_unload(&[viewer]);
    Ok(())
}
