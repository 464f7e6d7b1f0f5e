//! Value types shared by services and adapters.

pub mod auth;
pub mod config;
pub mod link;
pub mod news;
pub mod notification;
pub mod route;
pub mod session;
pub mod share;

pub use auth::{Credentials, Registration, RegistrationRequest};
pub use config::{ApiConfig, Config, DeepLinkConfig, ShareConfig, StorageConfig};
pub use link::{base_host, clean_url, extract_embedded_url, DeepLinkMatcher};
pub use news::{NewSummary, Source, Summary, SummaryPatch};
pub use notification::NotificationPayload;
pub use route::{DesiredRoute, NavigationState, Screen};
pub use session::{SessionUser, ACCESS_TOKEN_KEY, USER_KEY};
pub use share::{ShareObject, SharePlan};
