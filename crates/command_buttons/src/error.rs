//! Error types for the command button panel

use std::{io::Error as IoError, path::PathBuf};
use thiserror::Error;

use crate::types::ConnectionId;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(PathBuf, IoError),

    #[error("Failed to write config file {0}: {1}")]
    FileWrite(PathBuf, IoError),

    #[error("Failed to parse config file {0}: {1}")]
    Deserialization(PathBuf, serde_json::Error),

    #[error("Failed to serialize config: {0}")]
    Serialization(serde_json::Error),

    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("GUI anchor {0} lies outside the [0, 1] screen range")]
    AnchorOffScreen(String),

    #[error("{field} is not a valid \"r g b a\" color: {value:?}")]
    InvalidColor { field: String, value: String },

    #[error("Button {0} has text size zero")]
    ZeroTextSize(usize),

    #[error("Button {0} has an empty command")]
    EmptyCommand(usize),
}

/// Exec entry point failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("commandbuttons.exec needs a kind and a command (got {0} argument(s))")]
    TooFewArguments(usize),
}

/// Errors raised by the host's network transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Connection {0} is closed")]
    ConnectionClosed(ConnectionId),

    #[error("Failed to write packet: {0}")]
    Write(String),
}

/// Errors raised by the host's UI renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to encode UI elements: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Renderer rejected UI update: {0}")]
    Rejected(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DispatchResult<T> = Result<T, DispatchError>;
