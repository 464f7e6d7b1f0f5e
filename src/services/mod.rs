//! Stateful services of the client core.

pub mod intents;
pub mod loading_flag;
pub mod navigation_resolver;
pub mod route_slot;
pub mod session_store;
pub mod share_ingestion;

pub use intents::{BootConditions, DeepLinkSource, DefaultRouter, NotificationRouter};
pub use loading_flag::LoadingFlag;
pub use navigation_resolver::{NavigationResolver, Reconciliation, ResolverPhase};
pub use route_slot::{RouteRequest, RouteSlot, RouteSlotWatch};
pub use session_store::SessionStore;
pub use share_ingestion::{
    AnnotationContext, IngestionOutcome, PendingShareGuard, ShareIngestionService,
};
