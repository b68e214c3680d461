//! Draft entry builder
//!
//! Scratch fields for an entry that has not been submitted yet.

use super::entry::Entry;

/// Editable draft field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Question,
    Answer,
    Category,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Question, DraftField::Answer, DraftField::Category];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Question => "Question",
            DraftField::Answer => "Answer",
            DraftField::Category => "Category (optional)",
        }
    }
}

/// In-progress entry under operator edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl DraftEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one field
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Question => self.question = value,
            DraftField::Answer => self.answer = value,
            DraftField::Category => self.category = value,
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Question => &self.question,
            DraftField::Answer => &self.answer,
            DraftField::Category => &self.category,
        }
    }

    /// Question and answer are both present
    pub fn is_submittable(&self) -> bool {
        !self.question.is_empty() && !self.answer.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.question.is_empty() && self.answer.is_empty() && self.category.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build the full entry payload under the given id
    pub fn to_entry(&self, id: String) -> Entry {
        Entry {
            id,
            question: self.question.clone(),
            answer: self.answer.clone(),
            category: None,
        }
        .with_category(self.category.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submittable_requires_question_and_answer() {
        let mut draft = DraftEntry::new();
        assert!(!draft.is_submittable());

        draft.set(DraftField::Question, "Q");
        assert!(!draft.is_submittable());

        draft.set(DraftField::Answer, "A");
        assert!(draft.is_submittable());

        draft.set(DraftField::Question, "");
        assert!(!draft.is_submittable());
    }

    #[test]
    fn test_category_is_optional() {
        let mut draft = DraftEntry::new();
        draft.set(DraftField::Question, "Q");
        draft.set(DraftField::Answer, "A");
        let entry = draft.to_entry("id-1".into());
        assert_eq!(entry.id, "id-1");
        assert_eq!(entry.category, None);

        draft.set(DraftField::Category, "billing");
        let entry = draft.to_entry("id-2".into());
        assert_eq!(entry.category.as_deref(), Some("billing"));
    }

    #[test]
    fn test_clear() {
        let mut draft = DraftEntry::new();
        draft.set(DraftField::Category, "x");
        assert!(!draft.is_empty());
        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft, DraftEntry::default());
    }
}
