//! Push-notification intent source.

use tokio::sync::watch;

use crate::domain::models::{DesiredRoute, NotificationPayload};
use crate::services::route_slot::RouteSlot;

/// Turns notification taps into `NewsView` requests.
pub struct NotificationRouter {
    routes: RouteSlot,
    last_received: watch::Sender<Option<NotificationPayload>>,
}

impl NotificationRouter {
    /// Router writing into `routes`.
    pub fn new(routes: RouteSlot) -> Self {
        let (last_received, _rx) = watch::channel(None);
        Self {
            routes,
            last_received,
        }
    }

    /// A notification arrived while the app was in the foreground.
    /// Informational only; never routes.
    pub fn on_received(&self, payload: NotificationPayload) {
        tracing::debug!(title = ?payload.title, "notification received in foreground");
        self.last_received.send_replace(Some(payload));
    }

    /// Last notification received in the foreground.
    pub fn last_received(&self) -> Option<NotificationPayload> {
        self.last_received.borrow().clone()
    }

    /// The user tapped a delivered notification.
    pub fn on_response(&self, payload: &NotificationPayload) -> Option<u64> {
        let Some(id) = payload.summary_id() else {
            tracing::debug!("notification tap without a summary id");
            return None;
        };
        tracing::info!(summary_id = %id, "notification tapped");
        Some(self.routes.request(DesiredRoute::news_by_id(id.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_with_id_requests_news_view() {
        let slot = RouteSlot::new();
        let router = NotificationRouter::new(slot.clone());

        router.on_response(&NotificationPayload::with_summary_id(77));
        assert_eq!(slot.pending().unwrap().route, DesiredRoute::news_by_id(77));
    }

    #[test]
    fn test_received_and_idless_taps_do_not_route() {
        let slot = RouteSlot::new();
        let router = NotificationRouter::new(slot.clone());

        router.on_received(NotificationPayload::with_summary_id(5));
        assert!(router.last_received().is_some());
        assert!(router.on_response(&NotificationPayload::default()).is_none());
        assert!(!slot.is_pending());
    }
}
