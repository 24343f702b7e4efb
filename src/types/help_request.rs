//! Help requests
//!
//! A help request records who asked, what they asked for, when, and how
//! urgent it is. Requests are created through the API and afterwards only
//! change by priority reassignment and comment append.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::constants::{NORMAL_PRIORITY, PRIORITIES};
use crate::core::{Error, Result};
use super::{require_non_empty, Entity, SortValue};

/// Ordered priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Resolved, no further action
    Closed = 0,
    /// Low urgency
    Low = 1,
    /// Default urgency
    Normal = 2,
    /// Needs attention first
    High = 3,
}

impl Priority {
    /// All levels, lowest first
    pub const ALL: [Priority; 4] = [Priority::Closed, Priority::Low, Priority::Normal, Priority::High];

    /// Level stored at `index`, if any
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Index of this level as stored on a request
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Display name of the level
    pub fn as_str(&self) -> &'static str {
        PRIORITIES[self.index()]
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

fn default_priority() -> usize {
    NORMAL_PRIORITY
}

/// A request for help
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelpRequest {
    /// Who is asking
    pub from: String,

    /// Short summary
    pub title: String,

    /// Details of the request
    pub description: String,

    /// Index into the priority levels
    #[serde(default = "default_priority")]
    pub priority: usize,

    /// Creation time, ISO-8601 without offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Follow-up comments, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,

    /// Fields not modelled above, kept as loaded
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HelpRequest {
    /// Create a request stamped with the current local time at normal priority
    pub fn new(from: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            title: title.into(),
            description: description.into(),
            priority: Priority::default().index(),
            time: Some(timestamp_now()),
            comments: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Priority level of the request, if the stored index is valid
    pub fn priority_level(&self) -> Option<Priority> {
        Priority::from_index(self.priority)
    }

    /// Apply a priority change and optional comment
    ///
    /// The update is checked before anything changes. A comment is appended
    /// exactly as sent, but only when it has non-whitespace content.
    pub fn apply_update(&mut self, update: &UpdateHelpRequest) -> Result<()> {
        let priority = match update.priority {
            Some(index) => priority_at(index)?,
            None => Priority::default(),
        };

        self.priority = priority.index();
        if let Some(comment) = update.comment.as_deref() {
            if !comment.trim().is_empty() {
                self.comments.push(comment.to_string());
            }
        }
        Ok(())
    }
}

/// Current local time in the stored timestamp format
fn timestamp_now() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

impl Entity for HelpRequest {
    const KIND: &'static str = "Help request";
    const SORT_KEYS: &'static [&'static str] = &["time", "priority", "title", "from"];
    const DEFAULT_SORT_KEY: &'static str = "time";

    fn searchable_text(&self) -> (&str, &str) {
        (&self.title, &self.description)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        match key {
            "time" => self.time.as_deref().map(SortValue::Text),
            "priority" => Some(SortValue::Integer(self.priority as i64)),
            "title" => Some(SortValue::Text(&self.title)),
            "from" => Some(SortValue::Text(&self.from)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("from", &self.from)?;
        require_non_empty("title", &self.title)?;
        priority_at(self.priority).map(|_| ())
    }
}

fn priority_at(index: usize) -> Result<Priority> {
    Priority::from_index(index).ok_or_else(|| {
        Error::invalid(format!(
            "'priority' must be between 0 and {}",
            PRIORITIES.len() - 1
        ))
    })
}

/// Fields accepted when creating a help request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewHelpRequest {
    /// Who is asking
    pub from: Option<String>,
    /// Short summary
    pub title: Option<String>,
    /// Details of the request
    pub description: Option<String>,
}

impl NewHelpRequest {
    /// Check required fields and build the request
    pub fn into_request(self) -> Result<HelpRequest> {
        let from = required("from", self.from)?;
        let title = required("title", self.title)?;
        let description = required("description", self.description)?;
        Ok(HelpRequest::new(from, title, description))
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    let value = value.unwrap_or_default();
    require_non_empty(field, &value)?;
    Ok(value)
}

/// Fields accepted when updating a help request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHelpRequest {
    /// New priority index; absent means `normal`
    pub priority: Option<usize>,
    /// Comment to append
    pub comment: Option<String>,
}
