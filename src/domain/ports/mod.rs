//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that adapters and the host shell
//! implement:
//! - NewsApi / AuthApi: remote API contract
//! - UnauthorizedHandler: 401 hook called by the transport
//! - PageTitleFetcher: best-effort title lookup
//! - SessionStorage: persisted key/value session state
//! - Navigator, ShareInbox, AlertPresenter: host shell surfaces

pub mod auth_api;
pub mod host;
pub mod navigator;
pub mod news_api;
pub mod page_title;
pub mod session_storage;

pub use auth_api::{AuthApi, UnauthorizedHandler};
pub use host::{AlertPresenter, ShareInbox};
pub use navigator::Navigator;
pub use news_api::NewsApi;
pub use page_title::PageTitleFetcher;
pub use session_storage::SessionStorage;
