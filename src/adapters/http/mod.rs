//! REST adapters for the remote Inspect API and article pages.

pub mod client;
pub mod page_title;

pub use client::ApiClient;
pub use page_title::HttpPageTitleFetcher;
