//! Session store
//!
//! Holds at most one signed-in identity, mirrored to a [`SessionStorage`]
//! on every change and read back once when the store is opened. Stored data
//! that cannot be parsed is discarded and the store starts signed out.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::storage::SessionStorage;

/// Entry point users are sent to when signed out.
pub const SIGN_IN_ROUTE: &str = "/auth/signin";

/// Routes under this prefix are reachable without a session.
pub const PUBLIC_ROUTE_PREFIX: &str = "/auth";

pub const SESSION_AVATAR: &str = "/placeholder.svg?height=32&width=32";

const MIN_PASSWORD_LEN: usize = 6;

/// The signed-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Partial identity update; unset fields are kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

/// Where the caller must navigate after signing out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignOutRedirect {
    pub location: &'static str,
}

/// Display name from an email: the local part with `.` and `_` turned into
/// spaces and the first letter of every word upper-cased.
///
/// `"jane.doe@example.com"` becomes `"Jane Doe"`.
pub fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();

    let mut name = String::with_capacity(local.len());
    let mut prev_is_word = false;
    for c in local.chars() {
        let c = if c == '.' || c == '_' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !prev_is_word {
            name.push(c.to_ascii_uppercase());
        } else {
            name.push(c);
        }
        prev_is_word = is_word;
    }
    name
}

/// Demo credential policy: any email containing `@` and a password of at
/// least six characters. Not a real credential check.
pub fn accepts_credentials(email: &str, password: &str) -> bool {
    email.contains('@') && password.chars().count() >= MIN_PASSWORD_LEN
}

/// True for routes reachable without signing in
pub fn is_public_route(path: &str) -> bool {
    path == PUBLIC_ROUTE_PREFIX
        || path
            .strip_prefix(PUBLIC_ROUTE_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    user: Option<SessionUser>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Open the store, restoring any identity held by `storage`.
    pub fn open(mut storage: S) -> Self {
        let user = restore(&mut storage);
        if let Some(user) = &user {
            info!(email = %user.email, "session restored");
        }
        Self { storage, user }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Sign in under the demo policy. On success the identity replaces any
    /// current one and is persisted; on failure nothing changes.
    pub fn sign_in(&mut self, email: &str, password: &str) -> bool {
        if !accepts_credentials(email, password) {
            info!("sign-in rejected");
            return false;
        }

        let user = SessionUser {
            id: "1".to_string(),
            name: display_name(email),
            email: email.to_string(),
            avatar: Some(SESSION_AVATAR.to_string()),
        };
        info!(email = %user.email, name = %user.name, "signed in");
        self.persist(&user);
        self.user = Some(user);
        true
    }

    pub fn sign_out(&mut self) -> SignOutRedirect {
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "signed out");
        }
        if let Err(e) = self.storage.clear() {
            error!(error = %e, "failed to clear stored session");
        }
        SignOutRedirect {
            location: SIGN_IN_ROUTE,
        }
    }

    /// Merge `patch` into the current identity. No-op when signed out.
    pub fn update_user(&mut self, patch: UserPatch) -> bool {
        let Some(mut user) = self.user.clone() else {
            debug!("update ignored, no session");
            return false;
        };

        if let Some(id) = patch.id {
            user.id = id;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if patch.avatar.is_some() {
            user.avatar = patch.avatar;
        }

        self.persist(&user);
        self.user = Some(user);
        true
    }

    /// Redirect target when `path` needs a session the store does not have
    pub fn redirect_for(&self, path: &str) -> Option<&'static str> {
        if is_public_route(path) || self.is_authenticated() {
            None
        } else {
            Some(SIGN_IN_ROUTE)
        }
    }

    /// Hand back the storage backend
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self, user: &SessionUser) {
        let result = serde_json::to_string(user)
            .map_err(Into::into)
            .and_then(|raw| self.storage.store(&raw));
        if let Err(e) = result {
            error!(error = %e, "failed to persist session");
        }
    }
}

fn restore<S: SessionStorage>(storage: &mut S) -> Option<SessionUser> {
    let raw = match storage.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "stored session unreadable, discarding");
            discard(storage);
            return None;
        }
    };

    match serde_json::from_str::<SessionUser>(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "failed to parse stored user, discarding");
            discard(storage);
            None
        }
    }
}

fn discard<S: SessionStorage>(storage: &mut S) {
    if let Err(e) = storage.clear() {
        warn!(error = %e, "failed to remove corrupt session");
    }
}
