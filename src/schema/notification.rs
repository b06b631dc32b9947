use crate::schema::metadata::Metadata;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationType {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Info => "info",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
        }
    }
}

impl From<&str> for NotificationType {
    fn from(s: &str) -> Self {
        match s {
            "success" => NotificationType::Success,
            "warning" => NotificationType::Warning,
            "error" => NotificationType::Error,
            _ => NotificationType::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationType,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub metadata: Metadata,
}

impl Notification {
    pub fn new(id: &str, title: &str, message: &str) -> Self {
        Notification {
            id: id.into(),
            title: title.into(),
            message: message.into(),
            kind: NotificationType::Info,
            is_read: false,
            created_at: Utc::now(),
            metadata: Metadata::default(),
        }
    }

    pub fn id(&self) -> String {
        self.id.clone()
    }

    /// `metadata.type` when present, otherwise the top-level category tag.
    pub fn effective_type(&self) -> &str {
        self.metadata
            .kind
            .as_deref()
            .unwrap_or_else(|| self.kind.as_str())
    }

    pub fn update_read(&mut self, is_read: bool) {
        self.is_read = is_read;
    }

    pub fn with_kind(mut self, kind: NotificationType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNotification {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    is_read: bool,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

impl From<RawNotification> for Notification {
    fn from(raw: RawNotification) -> Self {
        Notification {
            id: raw.id,
            title: raw.title,
            message: raw.message,
            kind: raw
                .kind
                .as_deref()
                .map(NotificationType::from)
                .unwrap_or_default(),
            is_read: raw.is_read,
            created_at: raw.created_at,
            metadata: Metadata::from_raw(raw.metadata.as_ref()),
        }
    }
}

impl From<Notification> for RawNotification {
    fn from(n: Notification) -> Self {
        RawNotification {
            metadata: (!n.metadata.is_empty()).then(|| n.metadata.to_value()),
            id: n.id,
            title: n.title,
            message: n.message,
            kind: Some(n.kind.as_str().to_string()),
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

impl<'de> Deserialize<'de> for Notification {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawNotification::deserialize(deserializer).map(Notification::from)
    }
}

impl Serialize for Notification {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RawNotification::from(self.clone()).serialize(serializer)
    }
}

/// Body of `GET /notifications`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSnapshot {
    #[serde(rename = "data", alias = "items", default, deserialize_with = "null_as_empty")]
    pub notifications: Vec<Notification>,
    #[serde(rename = "unread", alias = "unreadCount", default)]
    pub unread_count: usize,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Notification>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Notification>>::deserialize(deserializer)?.unwrap_or_default())
}
