//! Notification center
//!
//! Each notification carries one read flag and moves freely between the
//! two states:
//!
//! ```text
//!   Unread <──── mark_as_unread ────┐
//!     │                             │
//!     └── mark_as_read / open ──> Read
//!
//!   (any) ── delete ──> removed (terminal)
//! ```
//!
//! `mark_all_as_read` flips every unread notification in a single pass, and
//! `open` marks a notification read before handing it to the caller.

use pitwatch_core::filter::is_recent_label;
use pitwatch_core::{filter_records_by, FieldFilters, Record, SearchQuery};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, Result};
use crate::store::{Entity, EntityStore, InMemoryStore};

/// Fields searched by the notifications view.
pub const NOTIFICATION_SEARCH_FIELDS: &[&str] = &["title", "message"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Button style for a notification action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionVariant {
    #[default]
    Default,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    pub variant: ActionVariant,
}

impl NotificationAction {
    pub fn primary(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ActionVariant::Default,
        }
    }

    pub fn outline(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ActionVariant::Outline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u32,
    /// Free-form category tag, used for tab filtering
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    /// Relative time label such as "15 minutes ago"
    pub timestamp: String,
    pub read: bool,
    /// Icon key, resolved by [`crate::presentation::NotificationIcon::from_key`]
    pub icon: String,
    /// Palette key, resolved by [`crate::presentation::Palette::from_key`]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    pub fn is_today(&self) -> bool {
        is_recent_label(&self.timestamp)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub timestamp: Option<String>,
    pub read: Option<bool>,
    pub details: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

impl Entity for Notification {
    type Id = u32;
    type Patch = NotificationPatch;
    const KIND: &'static str = "notification";

    fn id(&self) -> &u32 {
        &self.id
    }

    fn apply_patch(&mut self, patch: NotificationPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(timestamp) = patch.timestamp {
            self.timestamp = timestamp;
        }
        if let Some(read) = patch.read {
            self.read = read;
        }
        if patch.details.is_some() {
            self.details = patch.details;
        }
        if patch.priority.is_some() {
            self.priority = patch.priority;
        }
        if patch.category.is_some() {
            self.category = patch.category;
        }
    }
}

impl Record for Notification {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "type" => Some(Cow::Borrowed(&self.kind)),
            "title" => Some(Cow::Borrowed(&self.title)),
            "message" => Some(Cow::Borrowed(&self.message)),
            "timestamp" => Some(Cow::Borrowed(&self.timestamp)),
            "priority" => self.priority.map(|p| Cow::Borrowed(p.as_str())),
            "category" => self.category.as_deref().map(Cow::Borrowed),
            "user" => self.user.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

/// Category tab of the notifications view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotificationTab {
    #[default]
    All,
    Unread,
    /// Relative-time heuristic, see [`pitwatch_core::filter::RECENCY_MARKERS`]
    Today,
    /// Exact match on the notification type
    Type(String),
}

impl NotificationTab {
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            NotificationTab::All => true,
            NotificationTab::Unread => !notification.read,
            NotificationTab::Today => notification.is_today(),
            NotificationTab::Type(kind) => notification.kind == *kind,
        }
    }
}

impl FromStr for NotificationTab {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "" | "all" => NotificationTab::All,
            "unread" => NotificationTab::Unread,
            "today" => NotificationTab::Today,
            other => NotificationTab::Type(other.to_string()),
        })
    }
}

impl fmt::Display for NotificationTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationTab::All => f.write_str("all"),
            NotificationTab::Unread => f.write_str("unread"),
            NotificationTab::Today => f.write_str("today"),
            NotificationTab::Type(kind) => f.write_str(kind),
        }
    }
}

/// Notification collection and its read/unread lifecycle
#[derive(Debug, Clone)]
pub struct NotificationCenter<S = InMemoryStore<Notification>> {
    store: S,
}

impl NotificationCenter<InMemoryStore<Notification>> {
    pub fn with_notifications(notifications: Vec<Notification>) -> Self {
        Self::new(InMemoryStore::with_records(notifications))
    }
}

impl<S: EntityStore<Notification>> NotificationCenter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn all(&self) -> &[Notification] {
        self.store.all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Notification> {
        self.store.find(&id)
    }

    /// Detail lookup. Marks the notification read first, then returns it.
    pub fn open(&mut self, id: u32) -> Result<&Notification> {
        self.mark_as_read(id);
        self.store
            .find(&id)
            .ok_or_else(|| DomainError::not_found(Notification::KIND, id))
    }

    pub fn update(&mut self, id: u32, patch: NotificationPatch) -> bool {
        self.store.update(&id, patch)
    }

    pub fn mark_as_read(&mut self, id: u32) -> bool {
        self.set_read(id, true)
    }

    pub fn mark_as_unread(&mut self, id: u32) -> bool {
        self.set_read(id, false)
    }

    fn set_read(&mut self, id: u32, read: bool) -> bool {
        let found = self.store.modify(&id, |n| n.read = read);
        if found {
            tracing::debug!(notification_id = id, read, "read state set");
        }
        found
    }

    /// Mark every notification read. Returns how many changed; a second
    /// call returns 0.
    pub fn mark_all_as_read(&mut self) -> usize {
        let mut changed = 0;
        self.store.modify_all(|n| {
            if !n.read {
                n.read = true;
                changed += 1;
            }
        });
        tracing::info!(changed, "marked all notifications read");
        changed
    }

    /// Permanently remove a notification. Idempotent.
    pub fn delete(&mut self, id: u32) -> bool {
        let removed = self.store.remove(&id);
        if removed {
            tracing::info!(notification_id = id, "notification deleted");
        }
        removed
    }

    pub fn unread_count(&self) -> usize {
        self.store.all().iter().filter(|n| !n.read).count()
    }

    pub fn today_count(&self) -> usize {
        self.store.all().iter().filter(|n| n.is_today()).count()
    }

    /// Visible subset for the search box and the selected tab
    pub fn visible(&self, search: &str, tab: &NotificationTab) -> Vec<&Notification> {
        let query = SearchQuery::new(search, NOTIFICATION_SEARCH_FIELDS);
        filter_records_by(self.store.all(), &query, &FieldFilters::new(), |n| {
            tab.matches(n)
        })
    }
}
