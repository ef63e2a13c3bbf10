//! Read-only project portfolio

use pitwatch_core::{filter_records, FieldFilters, Record, SearchQuery};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::presentation::BadgeVariant;

pub const PROJECT_SEARCH_FIELDS: &[&str] = &["name", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Active,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Planning,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Planning => "Planning",
        }
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            ProjectStatus::Active => BadgeVariant::Default,
            ProjectStatus::InProgress => BadgeVariant::Outline,
            ProjectStatus::Completed | ProjectStatus::Planning => BadgeVariant::Secondary,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Percent complete, 0..=100
    pub progress: u8,
    pub last_updated: String,
    pub team: Vec<String>,
}

impl Record for Project {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "name" => Some(Cow::Borrowed(&self.name)),
            "description" => Some(Cow::Borrowed(&self.description)),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }
}

/// Project listing. No mutations are exposed.
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn visible(&self, search: &str) -> Vec<&Project> {
        let query = SearchQuery::new(search, PROJECT_SEARCH_FIELDS);
        filter_records(&self.projects, &query, &FieldFilters::new())
    }
}
