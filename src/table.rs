//! In-memory todo table: id -> Todo.
//!
//! Invariants:
//! - ids are unique and >= 1;
//! - `next_identifier()` is strictly greater than every id present.
//!
//! The next id is derived from the current contents (max + 1) instead of
//! being stored, so a table loaded from disk needs no extra bookkeeping.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{Result, TodoError};
use crate::todo::Todo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The todo was open and is now completed.
    Completed,
    /// The todo was already completed; nothing changed.
    AlreadyCompleted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoTable {
    todos: HashMap<u64, Todo>,
}

impl TodoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.get(&id)
    }

    /// One more than the largest id present, or 1 for an empty table.
    ///
    /// Fails with `IdSpaceExhausted` once `u64::MAX` is taken.
    pub fn next_identifier(&self) -> Result<u64> {
        match self.todos.keys().max() {
            None => Ok(1),
            Some(&max) => max.checked_add(1).ok_or(TodoError::IdSpaceExhausted(max)),
        }
    }

    /// Insert under an explicit id. Used when loading; never overwrites.
    pub fn insert(&mut self, id: u64, todo: Todo) -> Result<()> {
        if id == 0 {
            return Err(TodoError::parse("id", "0", "id must be positive"));
        }
        if self.todos.contains_key(&id) {
            return Err(TodoError::DuplicateId(id));
        }
        self.todos.insert(id, todo);
        Ok(())
    }

    /// Add an open todo created now; returns its id.
    pub fn add(&mut self, description: impl Into<String>) -> Result<u64> {
        self.push(Todo::new(description))
    }

    pub fn add_with_time(
        &mut self,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<u64> {
        self.push(Todo::with_created_at(description, created_at))
    }

    fn push(&mut self, todo: Todo) -> Result<u64> {
        let id = self.next_identifier()?;
        self.todos.insert(id, todo);
        Ok(id)
    }

    /// Mark `id` completed. Checking an already completed todo is not an error.
    pub fn check(&mut self, id: u64) -> Result<CheckOutcome> {
        let todo = self.todos.get_mut(&id).ok_or(TodoError::NotFound(id))?;
        if todo.completed {
            return Ok(CheckOutcome::AlreadyCompleted);
        }
        todo.completed = true;
        Ok(CheckOutcome::Completed)
    }

    /// Lazy view over all entries; order is unspecified.
    pub fn list(&self) -> impl Iterator<Item = (u64, &Todo)> + '_ {
        self.todos.iter().map(|(id, t)| (*id, t))
    }

    /// Entries ascending by id.
    pub fn sorted(&self) -> Vec<(u64, &Todo)> {
        let mut v: Vec<(u64, &Todo)> = self.list().collect();
        v.sort_unstable_by_key(|(id, _)| *id);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn table_with_ids(ids: &[u64]) -> TodoTable {
        let mut t = TodoTable::new();
        for id in ids {
            t.insert(*id, Todo::with_created_at(format!("task {id}"), ts(100)))
                .unwrap();
        }
        t
    }

    #[test]
    fn empty_table_starts_at_one() {
        let t = TodoTable::new();
        assert!(t.is_empty());
        assert_eq!(t.next_identifier().unwrap(), 1);
    }

    #[test]
    fn next_identifier_skips_gaps() {
        let t = table_with_ids(&[1, 2, 5]);
        assert_eq!(t.next_identifier().unwrap(), 6);
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let mut t = table_with_ids(&[3]);
        let before = t.next_identifier().unwrap();
        let id = t.add("Task").unwrap();
        assert_eq!(id, 4);
        assert!(t.next_identifier().unwrap() > before);

        let id2 = t.add("Another").unwrap();
        assert_eq!(id2, 5);
        assert_eq!(t.len(), 3);

        let added = t.get(4).unwrap();
        assert_eq!(added.description, "Task");
        assert!(!added.completed);
    }

    #[test]
    fn add_after_max_id_fails_without_mutation() {
        let mut t = table_with_ids(&[1, u64::MAX]);
        let snapshot = t.clone();

        let err = t.next_identifier().unwrap_err();
        assert!(matches!(err, TodoError::IdSpaceExhausted(u64::MAX)), "got {err:?}");

        let err = t.add("next").unwrap_err();
        assert!(matches!(err, TodoError::IdSpaceExhausted(u64::MAX)), "got {err:?}");
        assert_eq!(t, snapshot);
        assert!(t.get(0).is_none());
    }

    #[test]
    fn add_with_time_truncates_subseconds() {
        let mut t = TodoTable::new();
        let when = DateTime::from_timestamp(1_700_000_000, 999_000_000).unwrap();
        let id = t.add_with_time("x", when).unwrap();
        assert_eq!(t.get(id).unwrap().created_at, ts(1_700_000_000));
    }

    #[test]
    fn insert_rejects_duplicate_and_keeps_original() {
        let mut t = table_with_ids(&[1]);
        let err = t
            .insert(1, Todo::with_created_at("other", ts(5)))
            .unwrap_err();
        assert!(matches!(err, TodoError::DuplicateId(1)));
        assert_eq!(t.get(1).unwrap().description, "task 1");
    }

    #[test]
    fn check_marks_completed_once() {
        let mut t = table_with_ids(&[1, 2]);
        assert_eq!(t.check(2).unwrap(), CheckOutcome::Completed);
        assert!(t.get(2).unwrap().completed);

        let snapshot = t.clone();
        for _ in 0..3 {
            assert_eq!(t.check(2).unwrap(), CheckOutcome::AlreadyCompleted);
            assert_eq!(t, snapshot);
        }
    }

    #[test]
    fn check_unknown_id_is_not_found_and_leaves_table() {
        let mut t = table_with_ids(&[1]);
        let snapshot = t.clone();
        let err = t.check(9).unwrap_err();
        assert!(matches!(err, TodoError::NotFound(9)));
        assert_eq!(t, snapshot);
    }

    #[test]
    fn list_and_sorted_cover_all_entries() {
        let t = table_with_ids(&[5, 1, 3]);
        let mut ids: Vec<u64> = t.list().map(|(id, _)| id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 3, 5]);

        let sorted: Vec<u64> = t.sorted().into_iter().map(|(id, _)| id).collect();
        assert_eq!(sorted, vec![1, 3, 5]);
    }
}
