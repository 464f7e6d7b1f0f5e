//! Navigation targets and the live navigation state reported by the host.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Screens registered with the host navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Bootstrap screen shown until the default router picks a destination.
    Loading,
    /// Sign-in form.
    Login,
    /// Account creation form.
    Register,
    /// Feed of summaries.
    Home,
    /// A single summary.
    NewsView,
    /// Summaries by one user.
    AuthorView,
    /// The signed-in user's profile.
    #[serde(rename = "My Profile")]
    MyProfile,
    /// About the app.
    About,
}

impl Screen {
    /// Name the host navigator registers the screen under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Home => "Home",
            Self::NewsView => "NewsView",
            Self::AuthorView => "AuthorView",
            Self::MyProfile => "My Profile",
            Self::About => "About",
        }
    }

    /// Look up a screen by its registered route name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Loading" => Some(Self::Loading),
            "Login" => Some(Self::Login),
            "Register" => Some(Self::Register),
            "Home" => Some(Self::Home),
            "NewsView" => Some(Self::NewsView),
            "AuthorView" => Some(Self::AuthorView),
            "My Profile" => Some(Self::MyProfile),
            "About" => Some(Self::About),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A navigation target: a screen plus an opaque argument record.
///
/// Routes compare by value. Missing args and an empty object are the same
/// route, since the navigator is always handed `{}` when no args are given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesiredRoute {
    /// Target screen.
    pub path: Screen,
    /// Screen arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

impl DesiredRoute {
    /// Route to `path` without arguments.
    pub fn new(path: Screen) -> Self {
        Self { path, args: None }
    }

    /// Route to `path` with `args`.
    pub fn with_args(path: Screen, args: Value) -> Self {
        Self {
            path,
            args: Some(args),
        }
    }

    /// The feed.
    pub fn home() -> Self {
        Self::new(Screen::Home)
    }

    /// The sign-in form.
    pub fn login() -> Self {
        Self::new(Screen::Login)
    }

    /// `NewsView` addressed by the public uid carried in a deep link.
    pub fn news_by_uid(uid: impl Into<String>) -> Self {
        let uid: String = uid.into();
        Self::with_args(Screen::NewsView, json!({ "data": { "uid": uid } }))
    }

    /// `NewsView` addressed by summary id (notification taps, snippet updates).
    pub fn news_by_id(id: impl Into<Value>) -> Self {
        let id: Value = id.into();
        Self::with_args(Screen::NewsView, json!({ "data": { "id": id } }))
    }

    /// `NewsView` carrying a full summary record.
    pub fn news_with_summary(summary: Value) -> Self {
        Self::with_args(Screen::NewsView, json!({ "data": summary }))
    }

    /// Arguments as handed to the navigator: `{}` when none were given.
    pub fn effective_args(&self) -> Value {
        match &self.args {
            Some(args) => args.clone(),
            None => Value::Object(Map::new()),
        }
    }

    fn args_eq(&self, other: &Self) -> bool {
        match (&self.args, &other.args) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            (Some(v), None) | (None, Some(v)) => v.as_object().is_some_and(Map::is_empty),
        }
    }
}

impl PartialEq for DesiredRoute {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.args_eq(other)
    }
}

impl Eq for DesiredRoute {}

impl fmt::Display for DesiredRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.args {
            Some(args) => write!(f, "{} {}", self.path, args),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Live navigation state as reported by the host's navigation surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// True once the navigation surface has mounted and can report its route.
    pub ready: bool,
    /// Route currently on screen; `None` until ready.
    pub current: Option<DesiredRoute>,
}

impl NavigationState {
    /// State reported right after the navigator mounts on the bootstrap screen.
    pub fn ready_at(route: DesiredRoute) -> Self {
        Self {
            ready: true,
            current: Some(route),
        }
    }

    /// Screen currently shown.
    pub fn current_path(&self) -> Option<Screen> {
        self.current.as_ref().map(|route| route.path)
    }

    /// Whether the live route equals `route` in both path and args.
    pub fn shows(&self, route: &DesiredRoute) -> bool {
        self.current.as_ref() == Some(route)
    }
}
