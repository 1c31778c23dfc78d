//! The working row set: the grid's locally mutable copy of the data.
//!
//! Every row gets an opaque [`RowId`] when it enters the set. Selection and
//! edits refer to rows by id, so re-sorting or filtering never silently
//! remaps them to different rows.

use crate::value::{Record, Value};
use std::collections::HashSet;
use std::fmt;

/// Stable identity of a row within one grid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Rows plus their identities, kept index-aligned.
#[derive(Debug, Clone)]
pub struct WorkingSet<R> {
    rows: Vec<R>,
    ids: Vec<RowId>,
    next_id: u64,
}

impl<R> Default for WorkingSet<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            ids: Vec::new(),
            next_id: 0,
        }
    }
}

impl<R: Record> WorkingSet<R> {
    /// Creates a set holding `rows`.
    pub fn new(rows: Vec<R>) -> Self {
        let mut set = Self::default();
        set.replace(rows);
        set
    }

    /// Replaces the contents wholesale. Old ids are never reused.
    pub fn replace(&mut self, rows: Vec<R>) {
        let mut ids = Vec::with_capacity(rows.len());
        for _ in 0..rows.len() {
            ids.push(self.issue_id());
        }
        self.ids = ids;
        self.rows = rows;
    }

    fn issue_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The rows in working order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Id of the row at `position`.
    pub fn id_at(&self, position: usize) -> Option<RowId> {
        self.ids.get(position).copied()
    }

    /// Current position of `id`.
    pub fn position_of(&self, id: RowId) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    /// The row with `id`.
    pub fn get(&self, id: RowId) -> Option<&R> {
        self.position_of(id).map(|p| &self.rows[p])
    }

    /// Whether `id` is still present.
    pub fn contains(&self, id: RowId) -> bool {
        self.ids.contains(&id)
    }

    /// Writes `value` into the row `id` under `key`. Returns the row's position.
    pub fn set_value(&mut self, id: RowId, key: &str, value: Value) -> Option<usize> {
        let position = self.position_of(id)?;
        self.rows[position].set_value(key, value);
        Some(position)
    }

    /// Removes every row whose id is in `ids`. Returns how many were removed.
    pub fn remove(&mut self, ids: &HashSet<RowId>) -> usize {
        let before = self.rows.len();
        let mut keep = self.ids.iter().map(|id| !ids.contains(id));
        self.rows.retain(|_| keep.next().unwrap_or(true));
        self.ids.retain(|id| !ids.contains(id));
        before - self.rows.len()
    }
}
