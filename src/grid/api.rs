//! Grid operations: sorting, searching, filtering, pagination, selection,
//! editing and column layout.
//!
//! Every operation updates state synchronously and queues the events the
//! host should hear about. Operations that name a column or row return
//! `Err` when the name is unknown; operations the grid is configured not to
//! support (sorting when not sortable, resizing when not resizable) are
//! silent no-ops.

use super::events::GridEvent;
use super::model::{Focus, Model, PaginationMode};
use crate::edit::EditDraft;
use crate::error::GridError;
use crate::pipeline::{FilterMap, SortDirective};
use crate::rows::RowId;
use crate::selection::CheckState;
use crate::value::{Record, Value};
use log::{debug, info, warn};

impl<R: Record> Model<R> {
    /// Activates the header of `key`: ascending first, then flipping
    /// between descending and ascending.
    ///
    /// Does nothing when the grid or the column is not sortable.
    pub fn toggle_sort(&mut self, key: &str) -> Result<(), GridError> {
        let column = self.columns.require(key)?;
        if !self.sortable || !column.sortable {
            return Ok(());
        }
        let directive = SortDirective::next_for(self.sort.as_ref(), key);
        debug!("sort by `{}` {}", directive.key, directive.direction);
        self.emit(GridEvent::SortChanged {
            key: directive.key.clone(),
            direction: directive.direction,
        });
        self.sort = Some(directive);
        self.sync_pagination();
        Ok(())
    }

    /// Removes the active sort, restoring insertion order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.sync_pagination();
    }

    /// Replaces the search term. Applied only when the grid is searchable.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.search {
            return;
        }
        debug!("search `{term}`");
        self.search = term.clone();
        self.emit(GridEvent::SearchChanged { term });
        self.sync_and_clamp();
    }

    /// Changes one filter value. A blank value turns the filter off.
    ///
    /// With host-owned filters only [`GridEvent::FilterChanged`] is queued.
    pub fn set_filter(&mut self, key: &str, value: impl Into<Value>) -> Result<(), GridError> {
        self.columns.require(key)?;
        let value = value.into();
        debug!("filter `{key}` = `{value}`");
        self.emit(GridEvent::FilterChanged {
            key: key.to_string(),
            value: value.clone(),
        });
        if !self.controlled_filters {
            self.filters.insert(key.to_string(), value);
            self.sync_and_clamp();
        }
        Ok(())
    }

    /// Replaces the whole filter map. Hosts owning the filters call this to
    /// apply changes.
    pub fn set_filters(&mut self, filters: FilterMap) {
        self.filters = filters;
        self.sync_and_clamp();
    }

    /// Jumps to one-based `page`. Pages past the end show nothing.
    pub fn set_page(&mut self, page: usize) {
        let before = self.page();
        self.paginator.go_to(page);
        self.after_pagination(before, self.page_size());
    }

    /// Goes to the next page, if any.
    pub fn next_page(&mut self) {
        let before = self.page();
        self.paginator.next_page();
        self.after_pagination(before, self.page_size());
    }

    /// Goes to the previous page, if any.
    pub fn prev_page(&mut self) {
        let before = self.page();
        self.paginator.prev_page();
        self.after_pagination(before, self.page_size());
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), GridError> {
        let before = (self.page(), self.page_size());
        self.paginator.set_page_size(size)?;
        self.after_pagination(before.0, before.1);
        Ok(())
    }

    /// Moves to the next allowed page size and returns to page 1.
    pub fn cycle_page_size(&mut self) {
        let before = (self.page(), self.page_size());
        self.paginator.cycle_page_size();
        self.after_pagination(before.0, before.1);
    }

    fn after_pagination(&mut self, page: usize, page_size: usize) {
        if (page, page_size) == (self.page(), self.page_size()) {
            return;
        }
        self.emit(GridEvent::PaginationChanged {
            page: self.page(),
            page_size: self.page_size(),
        });
        self.cursor_row = 0;
        self.clamp_cursor();
    }

    /// Updates the host's total in remote mode, or switches to remote mode.
    pub fn set_total(&mut self, total: usize) {
        self.mode = PaginationMode::Remote { total };
        self.sync_pagination();
    }

    /// Switches back to local derivation.
    pub fn set_local(&mut self) {
        self.mode = PaginationMode::Local;
        self.sync_and_clamp();
    }

    /// Shows or hides the loading placeholder.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replaces the rows wholesale. Selection, the open edit and any resize
    /// in progress are dropped, and the rows get fresh identities.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        info!("rows replaced ({} rows)", rows.len());
        self.rows.replace(rows);
        self.selection.clear();
        self.edit.cancel();
        self.layout.end_resize();
        self.sync_and_clamp();
    }

    /// Whether row `id` is selected.
    pub fn is_selected(&self, id: RowId) -> bool {
        self.selection.is_selected(id)
    }

    /// Flips the selection of row `id`.
    pub fn toggle_row(&mut self, id: RowId) -> Result<(), GridError> {
        if !self.rows.contains(id) {
            return Err(GridError::UnknownRow(id));
        }
        self.selection.toggle(id);
        Ok(())
    }

    /// Flips the selection of the row at `position` on the current page.
    pub fn toggle_row_at(&mut self, position: usize) -> Result<(), GridError> {
        let id = self.id_on_page(position)?;
        self.toggle_row(id)
    }

    /// State of the select-all checkbox, over every filtered row.
    pub fn header_check_state(&self) -> CheckState {
        self.selection.check_state(&self.filtered_ids())
    }

    /// Selects every filtered row, or clears the selection when all of
    /// them are already selected.
    pub fn toggle_all(&mut self) {
        let scope = self.filtered_ids();
        self.selection.toggle_all(&scope);
        debug!("{} rows selected", self.selection.len());
    }

    /// Removes the selected rows from the working rows and clears the
    /// selection. Returns how many rows were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let removed = self.rows.remove(self.selection.ids());
        self.selection.clear();
        if let Some(draft) = self.edit.draft() {
            if !self.rows.contains(draft.row) {
                self.edit.cancel();
            }
        }
        info!("deleted {removed} selected rows");
        self.emit(GridEvent::RowsDeleted { count: removed });
        self.sync_and_clamp();
        removed
    }

    /// Opens an edit on row `id`, column `key`, seeded with the cell text.
    ///
    /// Under the commit switch policy an edit open on another cell is
    /// written back first.
    pub fn start_edit(&mut self, id: RowId, key: &str) -> Result<(), GridError> {
        let column = self.columns.require(key)?;
        if !column.is_editable() {
            return Err(GridError::NotEditable(key.to_string()));
        }
        let initial = self
            .rows
            .get(id)
            .ok_or(GridError::UnknownRow(id))?
            .value(key)
            .as_text();
        if let Some(previous) = self.edit.start(id, key, initial)? {
            self.write_back(previous);
        }
        Ok(())
    }

    /// Opens an edit on the row at `position` on the current page.
    pub fn start_edit_at(&mut self, position: usize, key: &str) -> Result<(), GridError> {
        let id = self.id_on_page(position)?;
        self.start_edit(id, key)
    }

    /// Replaces the draft text of the open edit.
    pub fn set_edit_value(&mut self, value: impl Into<String>) {
        if let Some(draft) = self.edit.draft_mut() {
            draft.set_value(value);
        }
    }

    /// Writes the draft into the working rows and queues
    /// [`GridEvent::CellEdited`]. Returns false when no edit was open.
    pub fn commit_edit(&mut self) -> bool {
        match self.edit.commit() {
            Some(draft) => {
                self.write_back(draft);
                true
            }
            None => false,
        }
    }

    /// Drops the draft without writing it. Returns false when no edit was open.
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.cancel().is_some()
    }

    fn write_back(&mut self, draft: EditDraft) {
        let value = Value::Text(draft.value().to_string());
        match self.rows.set_value(draft.row, &draft.key, value.clone()) {
            Some(row_index) => {
                debug!("committed `{}` at row {row_index}", draft.key);
                self.emit(GridEvent::CellEdited {
                    row_index,
                    key: draft.key,
                    value,
                });
                self.sync_pagination();
            }
            None => warn!("edit of {} dropped: row no longer present", draft.row),
        }
    }

    /// Hides a visible column or shows a hidden one in its original slot.
    pub fn toggle_column(&mut self, key: &str) -> Result<(), GridError> {
        self.layout.toggle_visibility(&self.columns, key)?;
        self.columns_changed();
        Ok(())
    }

    /// Replaces the visible-column list. Keys end up in descriptor order.
    pub fn set_visible_columns(&mut self, keys: &[String]) -> Result<(), GridError> {
        self.layout.set_visible(&self.columns, keys)?;
        self.columns_changed();
        Ok(())
    }

    fn columns_changed(&mut self) {
        let visible = self.layout.visible().to_vec();
        self.emit(GridEvent::ColumnsChanged { visible });
        self.clamp_cursor();
    }

    /// Sets a column width in pixels, floored at the minimum.
    pub fn set_column_width(&mut self, key: &str, width: u16) -> Result<(), GridError> {
        self.layout.set_width(key, width)
    }

    /// Starts resizing `key` with the pointer at `x` pixels.
    ///
    /// Does nothing when the grid is not resizable.
    pub fn begin_resize(&mut self, key: &str, x: i32) -> Result<(), GridError> {
        if !self.resizable {
            return Ok(());
        }
        self.layout.begin_resize(key, x)
    }

    /// Follows the pointer to `x` pixels while a resize is in progress.
    pub fn drag_resize(&mut self, x: i32) {
        self.layout.drag_resize(x);
    }

    /// Finishes the resize in progress, keeping the width reached.
    pub fn end_resize(&mut self) {
        if let Some(gesture) = self.layout.end_resize() {
            let width = self.layout.width(&gesture.key).unwrap_or(gesture.start_width);
            self.emit(GridEvent::ColumnResized {
                key: gesture.key,
                width,
            });
        }
    }

    /// Moves key input to the search box. Ignored when not searchable.
    pub fn focus_search(&mut self) {
        if self.searchable {
            self.commit_edit();
            self.focus = Focus::Search;
        }
    }

    /// Moves key input to the filter of the n-th filterable column.
    pub fn focus_filter(&mut self, index: usize) {
        if index < self.columns.filterable().count() && !self.filters.is_empty() {
            self.commit_edit();
            self.focus = Focus::Filter(index);
        }
    }

    /// Moves key input back to the table.
    pub fn focus_table(&mut self) {
        self.focus = Focus::Table;
    }

    fn id_on_page(&self, position: usize) -> Result<RowId, GridError> {
        self.page_ids()
            .get(position)
            .copied()
            .ok_or(GridError::RowNotFound(position))
    }
}
