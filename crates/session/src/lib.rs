//! Session management for the PitWatch dashboard
//!
//! A single optional signed-in identity, persisted through a pluggable
//! storage backend so it survives restarts.

pub mod error;
pub mod storage;
pub mod store;

pub use error::{Result, SessionError};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, SESSION_KEY};
pub use store::{
    display_name, is_public_route, SessionStore, SessionUser, SignOutRedirect, UserPatch,
    SIGN_IN_ROUTE,
};
