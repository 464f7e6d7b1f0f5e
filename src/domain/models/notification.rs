//! Push notification content delivered by the notification provider.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content of a delivered push notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Notification title.
    #[serde(default)]
    pub title: Option<String>,
    /// Notification body.
    #[serde(default)]
    pub body: Option<String>,
    /// Custom data attached by the server
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl NotificationPayload {
    /// Payload pointing at summary `id`.
    pub fn with_summary_id(id: impl Into<Value>) -> Self {
        let mut data = Map::new();
        data.insert("id".to_string(), id.into());
        Self {
            data: Some(data),
            ..Default::default()
        }
    }

    /// Summary the notification points at, from `data.id`.
    ///
    /// Null, `false`, zero and empty strings count as absent.
    pub fn summary_id(&self) -> Option<&Value> {
        let id = self.data.as_ref()?.get("id")?;
        let present = match id {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        present.then_some(id)
    }
}
