//! Inline cell editing: at most one draft at a time.
//!
//! The controller moves between idle and editing. A draft starts from the
//! cell's current text, is changed by key presses, and is either committed
//! (written back to the row by the grid) or cancelled without a trace.

use crate::error::GridError;
use crate::rows::RowId;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use log::debug;
use unicode_segmentation::UnicodeSegmentation;

/// What happens to an open draft when an edit starts on another cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSwitchPolicy {
    /// Drop the open draft without writing it.
    #[default]
    Discard,
    /// Commit the open draft, then start the new edit.
    Commit,
    /// Refuse to start a new edit until the open one is resolved.
    Block,
}

/// The uncommitted value of the cell being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// Row being edited.
    pub row: RowId,
    /// Column being edited.
    pub key: String,
    value: String,
    /// Cursor position in graphemes.
    cursor: usize,
}

impl EditDraft {
    fn new(row: RowId, key: String, value: String) -> Self {
        let cursor = value.graphemes(true).count();
        Self {
            row,
            key,
            value,
            cursor,
        }
    }

    /// Current draft text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in graphemes.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the draft text and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn byte_offset(&self, grapheme: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        // A combining mark merges into the previous grapheme.
        self.cursor = self.cursor.min(self.len());
    }

    fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
    }

    fn delete_forward(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.value.replace_range(start..end, "");
    }

    /// Applies a text-editing key. Returns false for keys it does not handle.
    pub fn handle_key(&mut self, msg: &KeyMsg) -> bool {
        let ctrl = msg.modifiers.contains(KeyModifiers::CONTROL);
        match msg.key {
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.len(),
            KeyCode::Char('u') if ctrl => {
                let at = self.byte_offset(self.cursor);
                self.value.replace_range(..at, "");
                self.cursor = 0;
            }
            KeyCode::Char('k') if ctrl => {
                let at = self.byte_offset(self.cursor);
                self.value.truncate(at);
            }
            KeyCode::Char(c) if !ctrl => self.insert(c),
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => return false,
        }
        true
    }
}

/// Holds the single in-progress edit.
#[derive(Debug, Clone, Default)]
pub struct EditController {
    draft: Option<EditDraft>,
    policy: EditSwitchPolicy,
}

impl EditController {
    /// Idle controller with the given switch policy.
    pub fn new(policy: EditSwitchPolicy) -> Self {
        Self {
            draft: None,
            policy,
        }
    }

    /// The switch policy.
    pub fn policy(&self) -> EditSwitchPolicy {
        self.policy
    }

    /// Changes the switch policy.
    pub fn set_policy(&mut self, policy: EditSwitchPolicy) {
        self.policy = policy;
    }

    /// The open draft, if editing.
    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Mutable access to the open draft.
    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    /// Whether a draft is open.
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Whether the open draft targets this cell.
    pub fn is_editing_cell(&self, row: RowId, key: &str) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|d| d.row == row && d.key == key)
    }

    /// Opens a draft for `(row, key)` seeded with `initial`.
    ///
    /// Under [`EditSwitchPolicy::Commit`] the previously open draft is
    /// returned so the caller can write it back; under
    /// [`EditSwitchPolicy::Block`] an open draft on another cell is an error.
    pub fn start(
        &mut self,
        row: RowId,
        key: &str,
        initial: String,
    ) -> Result<Option<EditDraft>, GridError> {
        if self.is_editing_cell(row, key) {
            return Ok(None);
        }
        let previous = match (self.draft.take(), self.policy) {
            (None, _) => None,
            (Some(open), EditSwitchPolicy::Discard) => {
                debug!("discarding draft for {} `{}`", open.row, open.key);
                None
            }
            (Some(open), EditSwitchPolicy::Commit) => Some(open),
            (Some(open), EditSwitchPolicy::Block) => {
                let err = GridError::EditInProgress(open.key.clone());
                self.draft = Some(open);
                return Err(err);
            }
        };
        debug!("editing {row} `{key}`");
        self.draft = Some(EditDraft::new(row, key.to_string(), initial));
        Ok(previous)
    }

    /// Closes the draft and hands it over for writing.
    pub fn commit(&mut self) -> Option<EditDraft> {
        self.draft.take()
    }

    /// Closes the draft without writing it.
    pub fn cancel(&mut self) -> Option<EditDraft> {
        let dropped = self.draft.take();
        if let Some(d) = &dropped {
            debug!("edit of {} `{}` cancelled", d.row, d.key);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::WorkingSet;
    use crate::value::{record, Value};
    use std::collections::BTreeMap;

    fn two_ids() -> (RowId, RowId) {
        let set: WorkingSet<BTreeMap<String, Value>> = WorkingSet::new(vec![
            record([("name", Value::from("Bob"))]),
            record([("name", Value::from("Ann"))]),
        ]);
        (set.id_at(0).unwrap(), set.id_at(1).unwrap())
    }

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_draft_typing() {
        let (a, _) = two_ids();
        let mut ctl = EditController::default();
        ctl.start(a, "name", "Bob".into()).unwrap();

        let draft = ctl.draft_mut().unwrap();
        assert!(draft.handle_key(&key(KeyCode::Char('b'))));
        assert!(draft.handle_key(&key(KeyCode::Char('y'))));
        assert_eq!(draft.value(), "Bobby");

        draft.handle_key(&key(KeyCode::Home));
        draft.handle_key(&key(KeyCode::Delete));
        draft.handle_key(&key(KeyCode::Char('R')));
        assert_eq!(draft.value(), "Robby");

        draft.handle_key(&key(KeyCode::End));
        draft.handle_key(&key(KeyCode::Backspace));
        assert_eq!(draft.value(), "Robb");
        assert!(!draft.handle_key(&key(KeyCode::Tab)));
    }

    #[test]
    fn test_grapheme_backspace() {
        let (a, _) = two_ids();
        let mut ctl = EditController::default();
        ctl.start(a, "name", "cafe\u{301}".into()).unwrap();
        let draft = ctl.draft_mut().unwrap();
        assert_eq!(draft.cursor(), 4);
        draft.handle_key(&key(KeyCode::Backspace));
        assert_eq!(draft.value(), "caf");
    }

    #[test]
    fn test_commit_and_cancel() {
        let (a, _) = two_ids();
        let mut ctl = EditController::default();
        ctl.start(a, "name", "Bob".into()).unwrap();
        ctl.draft_mut().unwrap().set_value("Bobby");
        let draft = ctl.commit().unwrap();
        assert_eq!(draft.value(), "Bobby");
        assert!(!ctl.is_editing());

        ctl.start(a, "name", "Bob".into()).unwrap();
        assert!(ctl.cancel().is_some());
        assert!(ctl.commit().is_none());
    }

    #[test]
    fn test_switch_policies() {
        let (a, b) = two_ids();

        let mut discard = EditController::new(EditSwitchPolicy::Discard);
        discard.start(a, "name", "x".into()).unwrap();
        assert_eq!(discard.start(b, "name", "y".into()), Ok(None));
        assert!(discard.is_editing_cell(b, "name"));

        let mut commit = EditController::new(EditSwitchPolicy::Commit);
        commit.start(a, "name", "x".into()).unwrap();
        let previous = commit.start(b, "name", "y".into()).unwrap().unwrap();
        assert_eq!(previous.row, a);
        assert!(commit.is_editing_cell(b, "name"));

        let mut block = EditController::new(EditSwitchPolicy::Block);
        block.start(a, "name", "x".into()).unwrap();
        assert_eq!(
            block.start(b, "name", "y".into()),
            Err(GridError::EditInProgress("name".into()))
        );
        assert!(block.is_editing_cell(a, "name"));
    }

    #[test]
    fn test_restarting_same_cell_keeps_draft() {
        let (a, _) = two_ids();
        let mut ctl = EditController::default();
        ctl.start(a, "name", "Bob".into()).unwrap();
        ctl.draft_mut().unwrap().set_value("Bo");
        ctl.start(a, "name", "Bob".into()).unwrap();
        assert_eq!(ctl.draft().unwrap().value(), "Bo");
    }
}
