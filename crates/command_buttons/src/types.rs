//! # Core Types
//!
//! Identifier and geometry types shared by the layout engine, the UI builder
//! and the command dispatcher.
//!
//! - [`PlayerId`] - Unique identifier for a player session
//! - [`ConnectionId`] - Opaque handle for the host's network connection
//! - [`Viewer`] - A connected player eligible to see the panel
//! - [`Anchor`] / [`Rect`] - Normalized screen-space geometry (origin bottom-left)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a player.
///
/// Wrapper around a UUID so player IDs cannot be confused with connection
/// handles or other numeric identifiers handed over by the host.
///
/// # Examples
///
/// ```rust
/// use command_buttons::PlayerId;
///
/// let player_id = PlayerId::new();
/// let parsed: PlayerId = player_id.to_string().parse().unwrap();
/// assert_eq!(player_id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Creates a new random player ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-assigned handle of a player's network connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// A connected player session that may be shown the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewer {
    pub id: PlayerId,
    pub connection: ConnectionId,
    /// Elevated identities see every button regardless of permissions.
    pub is_admin: bool,
}

impl Viewer {
    pub fn new(id: PlayerId, connection: ConnectionId) -> Self {
        Self {
            id,
            connection,
            is_admin: false,
        }
    }

    pub fn admin(id: PlayerId, connection: ConnectionId) -> Self {
        Self {
            id,
            connection,
            is_admin: true,
        }
    }
}

/// Top-left corner of the panel in normalized screen coordinates.
///
/// Persisted as the space-separated string `"x y"`, the same form the game
/// client uses for anchor values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

impl Anchor {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates lie inside the visible screen.
    pub fn is_on_screen(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

impl std::str::FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("expected \"x y\", got {s:?}"));
        };
        let x = x.parse::<f64>().map_err(|e| format!("bad x coordinate {x:?}: {e}"))?;
        let y = y.parse::<f64>().map_err(|e| format!("bad y coordinate {y:?}: {e}"))?;
        Ok(Self { x, y })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl Serialize for Anchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Axis-aligned rectangle in normalized coordinates, y growing upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Lower-left corner in the host's `"x y"` anchor notation.
    pub fn anchor_min(&self) -> String {
        format!("{} {}", self.left, self.bottom)
    }

    /// Upper-right corner in the host's `"x y"` anchor notation.
    pub fn anchor_max(&self) -> String {
        format!("{} {}", self.right, self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_parse_and_display() {
        let anchor: Anchor = "0.01 0.88".parse().unwrap();
        assert_eq!(anchor, Anchor::new(0.01, 0.88));
        assert_eq!(anchor.to_string(), "0.01 0.88");
        assert!(anchor.is_on_screen());
    }

    #[test]
    fn test_anchor_rejects_malformed() {
        assert!("0.5".parse::<Anchor>().is_err());
        assert!("0.5 0.5 0.5".parse::<Anchor>().is_err());
        assert!("left top".parse::<Anchor>().is_err());
        assert!(!Anchor::new(1.5, 0.2).is_on_screen());
    }

    #[test]
    fn test_anchor_serde_as_string() {
        let json = serde_json::to_string(&Anchor::new(0.25, 0.75)).unwrap();
        assert_eq!(json, "\"0.25 0.75\"");
        let back: Anchor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Anchor::new(0.25, 0.75));
    }

    #[test]
    fn test_rect_anchor_strings() {
        let rect = Rect {
            left: 0.1,
            bottom: 0.2,
            right: 0.3,
            top: 0.4,
        };
        assert_eq!(rect.anchor_min(), "0.1 0.2");
        assert_eq!(rect.anchor_max(), "0.3 0.4");
    }

    #[test]
    fn test_player_id_round_trips_through_string() {
        let id = PlayerId::new();
        let parsed: PlayerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
