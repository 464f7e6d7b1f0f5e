//! Host navigation port.

use crate::domain::models::DesiredRoute;

/// Imperative navigation surface provided by the host shell.
///
/// `navigate` only issues the jump. The host reports the resulting live
/// route back through the runtime once the screen has changed.
pub trait Navigator: Send + Sync {
    /// Jump to `route`.
    fn navigate(&self, route: &DesiredRoute);
}
