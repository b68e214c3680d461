//! Knowledge-base entry
//!
//! A question/answer record as stored by the service. Entries are never
//! partially present: they arrive whole from a list reload or not at all.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A stored question/answer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Client-assigned identifier (opaque to the service)
    pub id: String,

    pub question: String,

    pub answer: String,

    /// Optional grouping label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Entry {
    /// Create an entry with a freshly generated id
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            question: question.into(),
            answer: answer.into(),
            category: None,
        }
    }

    /// Builder: set category (empty labels are dropped)
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }

    /// Category label, if one is set and non-empty
    pub fn category_label(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// Generate a client-side entry id
///
/// ULIDs sort by creation time and stay unique under rapid submission.
pub fn generate_id() -> String {
    Ulid::new().to_string()
}
