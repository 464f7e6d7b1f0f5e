//! Intent sources: independent producers of desired routes.
//!
//! None of them reads the pending route or knows about the others; each
//! only calls `RouteSlot::request`. Share intents live in
//! `services::share_ingestion`.

pub mod deep_link;
pub mod default_router;
pub mod notifications;

pub use deep_link::DeepLinkSource;
pub use default_router::{BootConditions, DefaultRouter};
pub use notifications::NotificationRouter;
