//! Filter/search engine
//!
//! Derives the visible subset of a collection from a free-text query and a
//! set of exact-match field filters. Filtering is pure: the same inputs always
//! give the same output, in the original collection order.
//!
//! Composition: a record is visible when it matches the text query (empty
//! query matches everything, otherwise ANY configured field must contain the
//! query case-insensitively) AND every active field filter.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Substrings that mark a relative timestamp as "today".
///
/// Known limitation: this is a string heuristic over relative-time labels,
/// not elapsed-time arithmetic. "1 day ago" is not today, "2 hours ago" is.
pub const RECENCY_MARKERS: [&str; 3] = ["minutes ago", "hour", "hours ago"];

/// A record whose fields can be looked up by name for searching and filtering.
pub trait Record {
    /// Value of the named field rendered as text, `None` when the record has
    /// no such field (or the optional field is unset).
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Free-text query over a configured set of searchable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    fields: Vec<String>,
}

impl SearchQuery {
    /// Create a query searching the given fields.
    pub fn new(text: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            text: text.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// The raw query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fields this query searches.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Replace the query text, keeping the field set.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// True when the query imposes no constraint.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Case-insensitive substring match against any configured field.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        if self.text.is_empty() {
            return true;
        }

        let needle = self.text.to_lowercase();
        self.fields.iter().any(|name| {
            record
                .field(name)
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
    }
}

/// Exact-match constraints keyed by field name.
///
/// An unset or empty value is the wildcard "all" and matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilters {
    filters: BTreeMap<String, String>,
}

impl FieldFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FieldFilters::set`].
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Set or clear one filter. `None` and `""` both clear it.
    pub fn set(&mut self, field: &str, value: Option<String>) {
        match value {
            Some(value) if !value.is_empty() => {
                self.filters.insert(field.to_string(), value);
            }
            _ => {
                self.filters.remove(field);
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.filters.get(field).map(String::as_str)
    }

    /// Clear every filter.
    pub fn reset(&mut self) {
        self.filters.clear();
    }

    /// Number of active (non-wildcard) filters.
    pub fn active_count(&self) -> usize {
        self.filters.len()
    }

    /// Conjunction of all active filters.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.filters.iter().all(|(name, expected)| {
            record
                .field(name)
                .map(|value| value.as_ref() == expected.as_str())
                .unwrap_or(false)
        })
    }
}

/// Visible subset of `records` for a query and field filters.
pub fn filter_records<'a, R: Record>(
    records: &'a [R],
    query: &SearchQuery,
    filters: &FieldFilters,
) -> Vec<&'a R> {
    filter_records_by(records, query, filters, |_| true)
}

/// Like [`filter_records`] with one extra predicate ANDed in, used for
/// category filters that are not plain field equality.
pub fn filter_records_by<'a, R, P>(
    records: &'a [R],
    query: &SearchQuery,
    filters: &FieldFilters,
    extra: P,
) -> Vec<&'a R>
where
    R: Record,
    P: Fn(&R) -> bool,
{
    records
        .iter()
        .filter(|record| query.matches(*record) && filters.matches(*record) && extra(*record))
        .collect()
}

/// Heuristic "today" check over a relative timestamp label.
pub fn is_recent_label(timestamp: &str) -> bool {
    RECENCY_MARKERS
        .iter()
        .any(|marker| timestamp.contains(marker))
}
