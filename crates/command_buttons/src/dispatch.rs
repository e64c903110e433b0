//! # Command Dispatcher
//!
//! Turns a button click back into a command on the clicking player's client.
//!
//! Each rendered button carries a click command of the form
//! `commandbuttons.exec <chat|console> <command...>`. The host tokenizes that
//! string and hands the tokens to the exec entry point, which rebuilds the
//! button's command and writes it to the player's connection as a single
//! console-command packet:
//!
//! - **chat**: `chat.say "<escaped command>"`, so `/tpa` style chat commands work
//! - **console**: the command verbatim
//!
//! Dispatch is fire-and-forget. A disconnected transport drops the command.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::error::{DispatchError, DispatchResult, TransportError};
use crate::types::ConnectionId;

/// Console command name the host routes button clicks to.
pub const EXEC_COMMAND: &str = "commandbuttons.exec";

/// Client command that says a line in chat.
pub const CHAT_DIRECTIVE: &str = "chat.say";

/// How a button's command is executed on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Chat,
    Console,
}

impl CommandKind {
    pub fn from_chat_flag(is_chat: bool) -> Self {
        if is_chat {
            Self::Chat
        } else {
            Self::Console
        }
    }

    /// Only the literal `chat` selects chat; anything else is a console command.
    pub fn from_token(token: &str) -> Self {
        Self::from_chat_flag(token == "chat")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Console => "console",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wraps `text` in double quotes so it survives the client's tokenizer as a
/// single argument.
///
/// Embedded quotes are backslash-escaped and trailing backslashes are dropped,
/// since a final `\` would escape the closing quote.
pub fn quote_safe(text: &str) -> String {
    let escaped = text.replace('"', "\\\"");
    format!("\"{}\"", escaped.trim_end_matches('\\'))
}

/// Reverses [`quote_safe`] for display. Text that is not quoted is returned as is.
pub fn unquote(text: &str) -> String {
    match text
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\""),
        None => text.to_string(),
    }
}

/// Builds the client command for an already reassembled command string.
pub fn encode_command(kind: CommandKind, command: &str) -> String {
    match kind {
        CommandKind::Chat => format!("{} {}", CHAT_DIRECTIVE, quote_safe(command)),
        CommandKind::Console => command.to_string(),
    }
}

/// Click command bound to a rendered button.
pub fn button_command(kind: CommandKind, command: &str) -> String {
    format!("{} {} {}", EXEC_COMMAND, kind, command)
}

/// Parsed arguments of an exec invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecArgs {
    pub kind: CommandKind,
    pub tokens: Vec<String>,
}

impl ExecArgs {
    /// Parses `[kind, token, token...]`. At least one command token is required.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> DispatchResult<Self> {
        match args {
            [kind, tokens @ ..] if !tokens.is_empty() => Ok(Self {
                kind: CommandKind::from_token(kind.as_ref()),
                tokens: tokens.iter().map(|t| t.as_ref().to_string()).collect(),
            }),
            _ => Err(DispatchError::TooFewArguments(args.len())),
        }
    }

    /// The button's command, tokens joined by single spaces.
    pub fn command(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Network message types the dispatcher writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    ConsoleCommand,
}

/// A command packet addressed to one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPacket {
    pub message_type: MessageType,
    pub command: String,
}

impl CommandPacket {
    pub fn console_command(command: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::ConsoleCommand,
            command: command.into(),
        }
    }
}

/// Write access to the host's network layer.
pub trait CommandTransport: Send + Sync {
    /// Whether the server network is up.
    fn is_connected(&self) -> bool;

    /// Writes one packet to `connection`.
    fn send(
        &self,
        connection: ConnectionId,
        packet: &CommandPacket,
    ) -> Result<(), TransportError>;

    /// Replies to the invoker of a console command. `None` is the server console.
    fn reply(&self, _connection: Option<ConnectionId>, _message: &str) {}
}

/// Result of a dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent(CommandPacket),
    Dropped,
}

/// Encodes an already reassembled `command` and sends it to `connection`.
pub fn dispatch(
    transport: &dyn CommandTransport,
    connection: ConnectionId,
    kind: CommandKind,
    command: &str,
) -> DispatchOutcome {
    if !transport.is_connected() {
        debug!("Network is down, dropping {} command for {}", kind, connection);
        return DispatchOutcome::Dropped;
    }

    let packet = CommandPacket::console_command(encode_command(kind, command));

    match transport.send(connection, &packet) {
        Ok(()) => {
            debug!("Sent {} command {:?} to {}", kind, packet.command, connection);
            DispatchOutcome::Sent(packet)
        }
        Err(e) => {
            warn!("Failed to send {} command to {}: {}", kind, connection, e);
            DispatchOutcome::Dropped
        }
    }
}

/// Parses raw exec arguments and dispatches them.
pub fn dispatch_args<S: AsRef<str>>(
    transport: &dyn CommandTransport,
    connection: ConnectionId,
    args: &[S],
) -> DispatchResult<DispatchOutcome> {
    let exec = ExecArgs::parse(args)?;
    Ok(dispatch(transport, connection, exec.kind, &exec.command()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    struct RecordingTransport {
        connected: AtomicBool,
        fail_writes: bool,
        sent: Mutex<Vec<(ConnectionId, CommandPacket)>>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                connected: AtomicBool::new(true),
                fail_writes: false,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<(ConnectionId, CommandPacket)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl CommandTransport for RecordingTransport {
        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::SeqCst)
        }

        fn send(
            &self,
            connection: ConnectionId,
            packet: &CommandPacket,
        ) -> Result<(), TransportError> {
            if self.fail_writes {
                return Err(TransportError::ConnectionClosed(connection));
            }
            self.sent.lock().unwrap().push((connection, packet.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_chat_dispatch_is_escaped_and_prefixed() {
        let transport = RecordingTransport::new();
        let args = ["chat", "say", "hello", "world"];
        let outcome = dispatch_args(&transport, ConnectionId(7), &args).unwrap();

        let expected = CommandPacket::console_command("chat.say \"say hello world\"");
        assert_eq!(outcome, DispatchOutcome::Sent(expected.clone()));
        assert_eq!(transport.sent(), vec![(ConnectionId(7), expected)]);
    }

    #[test]
    fn test_console_dispatch_is_verbatim() {
        let transport = RecordingTransport::new();
        dispatch_args(&transport, ConnectionId(1), &["console", "kit.claim", "starter"]).unwrap();
        assert_eq!(transport.sent()[0].1.command, "kit.claim starter");
    }

    #[test]
    fn test_dispatch_sends_command_as_given() {
        let transport = RecordingTransport::new();
        let exec = ExecArgs::parse(&["chat", "/home", "base"]).unwrap();
        let command = exec.command();

        let outcome = dispatch(&transport, ConnectionId(2), exec.kind, &command);
        let expected = CommandPacket::console_command("chat.say \"/home base\"");
        assert_eq!(outcome, DispatchOutcome::Sent(expected.clone()));
        assert_eq!(transport.sent(), vec![(ConnectionId(2), expected)]);
    }

    #[test]
    fn test_unknown_kind_is_console() {
        assert_eq!(CommandKind::from_token("CHAT"), CommandKind::Console);
        assert_eq!(CommandKind::from_token("anything"), CommandKind::Console);
        assert_eq!(CommandKind::from_token("chat"), CommandKind::Chat);
    }

    #[test]
    fn test_too_few_arguments_sends_nothing() {
        let transport = RecordingTransport::new();
        assert_eq!(
            dispatch_args(&transport, ConnectionId(1), &["chat"]),
            Err(DispatchError::TooFewArguments(1))
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            dispatch_args(&transport, ConnectionId(1), &empty),
            Err(DispatchError::TooFewArguments(0))
        );
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_disconnected_transport_drops_silently() {
        let transport = RecordingTransport::new();
        transport.connected.store(false, Ordering::SeqCst);
        let outcome = dispatch(&transport, ConnectionId(1), CommandKind::Chat, "/tpa");
        assert_eq!(outcome, DispatchOutcome::Dropped);
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let transport = RecordingTransport {
            fail_writes: true,
            ..RecordingTransport::new()
        };
        let outcome = dispatch(&transport, ConnectionId(3), CommandKind::Console, "quit");
        assert_eq!(outcome, DispatchOutcome::Dropped);
    }

    #[test]
    fn test_quote_safe_escapes_quotes_and_trailing_backslashes() {
        assert_eq!(quote_safe("hello"), "\"hello\"");
        assert_eq!(quote_safe("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_safe("path\\"), "\"path\"");
    }

    #[test]
    fn test_chat_encoding_round_trips_for_display() {
        for text in ["/tpa", "say hello world", "he said \"go\" now", ""] {
            let encoded = encode_command(CommandKind::Chat, text);
            let quoted = encoded.strip_prefix("chat.say ").unwrap();
            assert_eq!(unquote(quoted), text);
        }
    }

    #[test]
    fn test_exec_args_rebuilds_command() {
        let exec = ExecArgs::parse(&["console", "inventory.give", "wood", "1000"]).unwrap();
        assert_eq!(exec.kind, CommandKind::Console);
        assert_eq!(exec.command(), "inventory.give wood 1000");
    }

    #[test]
    fn test_button_command_format() {
        assert_eq!(
            button_command(CommandKind::Chat, "/tpa"),
            "commandbuttons.exec chat /tpa"
        );
        assert_eq!(
            button_command(CommandKind::Console, "kit.claim starter"),
            "commandbuttons.exec console kit.claim starter"
        );
    }
}
