//! Inspect - deferred navigation core for the Inspect news-annotation client
//!
//! Several independent sources (deep links, notification taps, share-sheet
//! deliveries and the post-auth default router) decide where the app should
//! go, often before the navigation container is mounted. Each of them only
//! writes a desired route into a single slot; the navigation resolver
//! applies it once navigation is ready and clears it when the live route
//! matches.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): routes, session and news records, port traits
//! - **Service Layer** (`services`): route slot, intent sources, share
//!   ingestion, session store, navigation resolver
//! - **Application Layer** (`application`): the client runtime wiring them together
//! - **Adapters** (`adapters`): HTTP API client, storage, in-process host surfaces
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use inspect::cli::AppContext;
//!
//! let ctx = AppContext::build(config)?;
//! ctx.start();
//! ctx.runtime.open_url("https://inspect.datagotchi.net/facts/abc123");
//! ctx.mount();
//! ctx.settle(std::time::Duration::from_secs(5)).await;
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{ClientRuntime, RuntimeError, RuntimePorts};
pub use domain::models::{Config, DesiredRoute, NavigationState, Screen, SessionUser, ShareObject};
pub use domain::ports::{
    AlertPresenter, AuthApi, Navigator, NewsApi, PageTitleFetcher, SessionStorage, ShareInbox,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{NavigationResolver, RouteSlot, SessionStore, ShareIngestionService};
