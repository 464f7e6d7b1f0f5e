//! Infrastructure adapters for external systems.

pub mod host;
pub mod http;
pub mod navigation;
pub mod storage;

pub use host::{AlertLog, ShareQueue};
pub use http::{ApiClient, HttpPageTitleFetcher};
pub use navigation::SimulatedNavigator;
pub use storage::{FileSessionStorage, MemorySessionStorage};
