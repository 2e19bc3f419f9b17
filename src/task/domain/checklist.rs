//! Ordered checklist of textual steps attached to a task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Ordered sequence of checklist steps.
///
/// Item order is the display order and is preserved through completion
/// snapshots. The list may be empty; individual items may not be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist(Vec<String>);

impl Checklist {
    /// Creates a validated checklist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyChecklistItem`] when any item is
    /// blank after trimming.
    pub fn new(items: impl IntoIterator<Item = String>) -> Result<Self, TaskDomainError> {
        let mut validated = Vec::new();
        for item in items {
            let trimmed = item.trim();
            if trimmed.is_empty() {
                return Err(TaskDomainError::EmptyChecklistItem);
            }
            validated.push(trimmed.to_owned());
        }
        Ok(Self(validated))
    }

    /// Creates an empty checklist.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the items in display order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the checklist has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether the given step is on the checklist.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.0.iter().any(|candidate| candidate == item)
    }

    /// Returns the subset of items appearing in `checked`, in checklist
    /// order.
    #[must_use]
    pub fn ordered_subset(&self, checked: &[String]) -> Vec<String> {
        self.0
            .iter()
            .filter(|item| checked.contains(item))
            .cloned()
            .collect()
    }
}
