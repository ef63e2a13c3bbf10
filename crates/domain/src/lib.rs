//! Domain module for the PitWatch dashboard
//!
//! This crate contains pure domain logic with no I/O dependencies:
//! - Entity store abstraction and its in-memory implementation
//! - Machine, user, notification and project models
//! - Notification read/unread lifecycle
//! - Seed data and rendering descriptors

pub mod error;
pub mod machines;
pub mod notifications;
pub mod presentation;
pub mod projects;
pub mod seed;
pub mod store;
pub mod users;

pub use error::{DomainError, Result};
pub use machines::{
    FleetSummary, HealthStatus, Machine, MachineFilters, MachinePatch, MachineRegistry,
    MachineStatus, MachineType, PerformanceReport,
};
pub use notifications::{
    ActionVariant, Notification, NotificationAction, NotificationCenter, NotificationPatch,
    NotificationTab, Priority,
};
pub use presentation::{BadgeVariant, ColorDescriptor, NotificationIcon, Palette};
pub use projects::{Project, ProjectCatalog, ProjectStatus};
pub use store::{Entity, EntityStore, InMemoryStore};
pub use users::{AccountStatus, Role, User, UserDirectory, UserDraft, UserPatch};
