//! Authenticated user session as persisted on the device.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Storage key holding the serialized session blob.
pub const USER_KEY: &str = "@user";

/// Storage key holding the API access token.
pub const ACCESS_TOKEN_KEY: &str = "@access_token";

/// The signed-in user.
///
/// Fields the client does not interpret are kept in `extra` so that a
/// load/persist cycle never drops server data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Server id.
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Account email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Push token registered with the notification provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expo_token: Option<String>,

    /// Feed filter preference.
    #[serde(default)]
    pub show_favorites: bool,

    /// Access token returned by login/registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    /// User `id` with every other field empty.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            username: None,
            email: None,
            expo_token: None,
            show_favorites: false,
            token: None,
            extra: Map::new(),
        }
    }

    /// Whether a push token is already on record.
    pub fn has_push_token(&self) -> bool {
        self.expo_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let blob = json!({
            "id": 12,
            "username": "ada",
            "show_favorites": true,
            "following": [3, 4],
        });
        let user: SessionUser = serde_json::from_value(blob.clone()).unwrap();
        assert_eq!(user.id, 12);
        assert!(user.show_favorites);
        assert_eq!(user.extra.get("following"), Some(&json!([3, 4])));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back, blob);
    }

    #[test]
    fn test_has_push_token() {
        let mut user = SessionUser::new(1);
        assert!(!user.has_push_token());
        user.expo_token = Some(String::new());
        assert!(!user.has_push_token());
        user.expo_token = Some("ExponentPushToken[x]".to_string());
        assert!(user.has_push_token());
    }
}
