//! Localized player-facing messages.
//!
//! The plugin only ships the default strings; storage and per-player locale
//! selection belong to the host.

use std::collections::HashMap;

use crate::types::PlayerId;

pub const NO_PERMISSION: &str = "No Permission";
pub const ONLY_PLAYER: &str = "Only Player";

/// Host message catalogue.
pub trait Localizer: Send + Sync {
    /// Registers default `messages` for `locale`.
    fn register_messages(&self, locale: &str, messages: HashMap<String, String>);

    /// Message for `key` in `player`'s language, or the server default for `None`.
    fn get_message(&self, key: &str, player: Option<PlayerId>) -> String;
}

/// Default catalogues as `(locale, messages)` pairs.
pub fn default_messages() -> Vec<(&'static str, HashMap<String, String>)> {
    let table = |entries: [(&str, &str); 2]| {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    };

    vec![
        (
            "en",
            table([
                (NO_PERMISSION, "You don't have enough permission to run this command!"),
                (ONLY_PLAYER, "This command can be used only by players!"),
            ]),
        ),
        (
            "zh-CN",
            table([
                (NO_PERMISSION, "你没有权限使用这个指令!"),
                (ONLY_PLAYER, "这个指令只能由玩家使用!"),
            ]),
        ),
    ]
}

/// Pushes every default catalogue to the host.
pub fn register_defaults(localizer: &dyn Localizer) {
    for (locale, messages) in default_messages() {
        localizer.register_messages(locale, messages);
    }
}
