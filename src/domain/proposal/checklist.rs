//! Named completion checklists for payment and communication channels.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Which of a proposal's two checklists an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistKind {
    Payments,
    Communication,
}

impl ChecklistKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistKind::Payments => "payments",
            ChecklistKind::Communication => "communication",
        }
    }
}

impl fmt::Display for ChecklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single channel and whether it has been completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistEntry {
    pub name: String,
    pub completed: bool,
}

/// Result of completing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Completion {
    Completed,
    AlreadyCompleted,
}

/// No entry with the requested name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no entry named '{0}'")]
pub struct UnknownEntry(pub String);

/// Ordered list of uniquely named entries.
///
/// Entries are only ever flipped from incomplete to complete. Deserializing a
/// list with duplicate names fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChecklistEntry>", into = "Vec<ChecklistEntry>")]
pub struct Checklist {
    entries: Vec<ChecklistEntry>,
}

impl Checklist {
    /// Builds an all-incomplete checklist from channel names.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for a blank name
    /// - `Duplicate` for a repeated name
    pub fn from_names<I, S>(kind: ChecklistKind, names: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = names
            .into_iter()
            .map(|name| ChecklistEntry {
                name: name.into().trim().to_string(),
                completed: false,
            })
            .collect();
        Self::from_entries(kind.as_str(), entries)
    }

    fn from_entries(field: &str, entries: Vec<ChecklistEntry>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.is_empty() {
                return Err(ValidationError::empty_field(format!("{}.name", field)));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ValidationError::duplicate(field, entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ChecklistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ChecklistEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Names of entries not yet completed, in list order.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| !e.completed)
            .map(|e| e.name.as_str())
    }

    /// Marks the named entry complete.
    ///
    /// Completing an already completed entry is not an error; it leaves the
    /// list unchanged and reports `AlreadyCompleted`.
    pub fn complete(&mut self, name: &str) -> Result<Completion, UnknownEntry> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| UnknownEntry(name.to_string()))?;

        if entry.completed {
            return Ok(Completion::AlreadyCompleted);
        }
        entry.completed = true;
        Ok(Completion::Completed)
    }

    /// True when every entry is complete. An empty list is trivially complete.
    pub fn all_completed(&self) -> bool {
        self.entries.iter().all(|e| e.completed)
    }
}

impl TryFrom<Vec<ChecklistEntry>> for Checklist {
    type Error = ValidationError;

    fn try_from(entries: Vec<ChecklistEntry>) -> Result<Self, Self::Error> {
        Self::from_entries("checklist", entries)
    }
}

impl From<Checklist> for Vec<ChecklistEntry> {
    fn from(checklist: Checklist) -> Self {
        checklist.entries
    }
}
