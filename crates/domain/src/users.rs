//! User accounts directory

use pitwatch_core::error::validation;
use pitwatch_core::{filter_records, FieldFilters, Record, SearchQuery};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::error::Result;
use crate::store::{Entity, EntityStore, InMemoryStore};

/// Fields searched by the users view.
pub const USER_SEARCH_FIELDS: &[&str] = &["name", "email", "role"];

/// Avatar assigned to accounts created from the dashboard.
pub const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=32&width=32";

/// Access role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }

    /// Next role in the Admin → Editor → Viewer → Admin cycle
    pub fn next(&self) -> Role {
        match self {
            Role::Admin => Role::Editor,
            Role::Editor => Role::Viewer,
            Role::Viewer => Role::Admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A team member account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub avatar: String,
    /// Free-text relative time, e.g. "2 hours ago"
    pub last_active: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
    pub avatar: Option<String>,
    pub last_active: Option<String>,
}

impl Entity for User {
    type Id = u32;
    type Patch = UserPatch;
    const KIND: &'static str = "user";

    fn id(&self) -> &u32 {
        &self.id
    }

    fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(last_active) = patch.last_active {
            self.last_active = last_active;
        }
    }
}

impl Record for User {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => Some(Cow::Borrowed(&self.email)),
            "role" => Some(Cow::Borrowed(self.role.as_str())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "lastActive" => Some(Cow::Borrowed(&self.last_active)),
            _ => None,
        }
    }
}

/// Add/edit form contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
}

impl UserDraft {
    /// Draft with the form defaults (Viewer, Active)
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: Role::Viewer,
            status: AccountStatus::Active,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    /// Name and email are required and must be non-blank after trimming
    pub fn validate(&self) -> Result<()> {
        validation::require_non_empty(&self.name, "name")?;
        validation::require_non_empty(&self.email, "email")?;
        Ok(())
    }
}

/// User directory over an entity store
#[derive(Debug, Clone)]
pub struct UserDirectory<S = InMemoryStore<User>> {
    store: S,
}

impl UserDirectory<InMemoryStore<User>> {
    pub fn with_users(users: Vec<User>) -> Self {
        Self::new(InMemoryStore::with_records(users))
    }
}

impl<S: EntityStore<User>> UserDirectory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn all(&self) -> &[User] {
        self.store.all()
    }

    pub fn get(&self, id: u32) -> Option<&User> {
        self.store.find(&id)
    }

    /// Id for the next account: `max(existing ids) + 1`, or 1 when empty.
    ///
    /// Not a monotonic counter: deleting the highest id frees it for reuse.
    pub fn next_id(&self) -> u32 {
        self.store
            .all()
            .iter()
            .map(|user| user.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Create an account from a validated draft
    pub fn add(&mut self, draft: UserDraft) -> Result<User> {
        draft.validate()?;

        let user = User {
            id: self.next_id(),
            name: draft.name,
            email: draft.email,
            role: draft.role,
            status: draft.status,
            avatar: PLACEHOLDER_AVATAR.to_string(),
            last_active: "Just now".to_string(),
        };

        tracing::info!(user_id = user.id, "user added");
        self.store.add(user.clone());
        Ok(user)
    }

    /// Replace name, email, role and status. Validation failures leave the
    /// account untouched; an unknown id is a silent no-op (`Ok(false)`).
    pub fn edit(&mut self, id: u32, draft: UserDraft) -> Result<bool> {
        draft.validate()?;
        let patch = UserPatch {
            name: Some(draft.name),
            email: Some(draft.email),
            role: Some(draft.role),
            status: Some(draft.status),
            ..UserPatch::default()
        };
        Ok(self.store.update(&id, patch))
    }

    /// Merge a partial update
    pub fn update(&mut self, id: u32, patch: UserPatch) -> bool {
        self.store.update(&id, patch)
    }

    pub fn change_role(&mut self, id: u32, role: Role) -> bool {
        let changed = self.store.modify(&id, |user| user.role = role);
        if changed {
            tracing::info!(user_id = id, role = %role, "role changed");
        }
        changed
    }

    /// Advance the role one step around the cycle; returns the new role
    pub fn cycle_role(&mut self, id: u32) -> Option<Role> {
        let next = self.get(id)?.role.next();
        self.change_role(id, next);
        Some(next)
    }

    /// Delete an account. Idempotent.
    pub fn delete(&mut self, id: u32) -> bool {
        let removed = self.store.remove(&id);
        if removed {
            tracing::info!(user_id = id, "user deleted");
        }
        removed
    }

    pub fn visible(&self, search: &str) -> Vec<&User> {
        let query = SearchQuery::new(search, USER_SEARCH_FIELDS);
        filter_records(self.store.all(), &query, &FieldFilters::new())
    }
}
