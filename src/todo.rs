use chrono::{DateTime, SubsecRound, Utc};

/// A single task. The identifier is not part of the entity; it is the key
/// under which the todo is stored in a `TodoTable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub description: String,
    pub completed: bool,
    /// Whole seconds; the file format has no sub-second part.
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// New, not yet completed todo created now.
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_created_at(description, Utc::now())
    }

    pub fn with_created_at(description: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            description: description.into(),
            completed: false,
            created_at: created_at.trunc_subsecs(0),
        }
    }
}
