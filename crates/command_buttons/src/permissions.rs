//! Per-viewer button visibility.

use crate::config::ButtonSpec;
use crate::types::{PlayerId, Viewer};

/// Read access to the host's permission store.
pub trait PermissionChecker: Send + Sync {
    /// Whether `player` currently holds `permission`.
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool;

    /// Announces a permission the plugin uses so the host can list and grant it.
    fn register_permission(&self, _permission: &str) {}
}

/// Visibility predicate for a single button.
///
/// Admins see everything; a button without a permission is public.
pub fn is_visible(viewer: &Viewer, button: &ButtonSpec, checker: &dyn PermissionChecker) -> bool {
    if viewer.is_admin {
        return true;
    }
    match button.required_permission() {
        None => true,
        Some(perm) => checker.has_permission(viewer.id, perm),
    }
}

/// Filters `buttons` down to those `viewer` may see, preserving order.
///
/// Evaluated fresh on every call so permission changes apply on the next
/// redisplay.
pub fn visible_buttons<'a>(
    viewer: &Viewer,
    buttons: &'a [ButtonSpec],
    checker: &dyn PermissionChecker,
) -> Vec<&'a ButtonSpec> {
    buttons
        .iter()
        .filter(|button| is_visible(viewer, button, checker))
        .collect()
}
