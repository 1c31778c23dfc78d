//! The grid `Model`: construction, configuration and read access.

use super::events::GridEvent;
use super::keys::GridKeyMap;
use super::style::GridStyles;
use crate::column::{Column, ColumnSet};
use crate::edit::{EditController, EditDraft, EditSwitchPolicy};
use crate::error::GridError;
use crate::layout::Layout;
use crate::paginator;
use crate::pipeline::{self, Derived, FilterMap, Query, SortDirective};
use crate::rows::{RowId, WorkingSet};
use crate::selection::Selection;
use crate::value::{Record, Value};
use std::time::Instant;

/// Pixels per terminal cell when converting column widths.
pub const DEFAULT_CELL_PX: u16 = 8;

/// Largest accepted pixels-per-cell ratio.
pub const MAX_CELL_PX: u16 = 64;

/// Message shown when no rows survive search and filters.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Where the total row count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// The grid searches, filters, sorts and slices its own rows, and the
    /// pipeline's filtered count is the total.
    #[default]
    Local,
    /// The host supplies each page already prepared plus the total. The grid
    /// shows the rows as given and only reports sort, filter, search and
    /// pagination changes.
    Remote {
        /// Total rows on the host side.
        total: usize,
    },
}

/// Which part of the grid receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The table body.
    #[default]
    Table,
    /// The search input.
    Search,
    /// The filter input of the n-th filterable column.
    Filter(usize),
}

/// A click remembered for double-click detection.
#[derive(Debug, Clone, Copy)]
pub(super) struct Click {
    pub(super) at: Instant,
    pub(super) row: usize,
    pub(super) col: usize,
}

/// An interactive data grid over rows of type `R`.
///
/// The grid keeps a working copy of the rows it was given, derives the page
/// to show through search, filters, sort and pagination, and tracks
/// selection, column layout and the inline edit. State changes the host may
/// care about are reported as [`GridEvent`]s.
///
/// ```rust
/// use bubbletea_datagrid::column::Column;
/// use bubbletea_datagrid::grid::Model;
/// use bubbletea_datagrid::value::{record, Record, Value};
///
/// let mut grid = Model::new(vec![Column::new("name", "Name"), Column::new("age", "Age")])
///     .unwrap()
///     .sortable(true)
///     .with_rows(vec![
///         record([("name", Value::from("Bob")), ("age", Value::from(30))]),
///         record([("name", Value::from("Ann")), ("age", Value::from(25))]),
///     ]);
///
/// grid.toggle_sort("name").unwrap();
/// let names: Vec<String> = grid.page_rows().iter().map(|r| r.1.value("name").as_text()).collect();
/// assert_eq!(names, ["Ann", "Bob"]);
/// ```
#[derive(Debug, Clone)]
pub struct Model<R: Record> {
    pub(super) columns: ColumnSet,
    pub(super) rows: WorkingSet<R>,
    pub(super) selection: Selection,
    pub(super) layout: Layout,
    pub(super) edit: EditController,
    pub(super) paginator: paginator::Model,
    pub(super) search: String,
    pub(super) filters: FilterMap,
    pub(super) controlled_filters: bool,
    pub(super) sort: Option<SortDirective>,
    pub(super) mode: PaginationMode,
    pub(super) searchable: bool,
    pub(super) sortable: bool,
    pub(super) resizable: bool,
    pub(super) sticky_header: bool,
    pub(super) loading: bool,
    pub(super) empty_message: String,
    pub(super) cell_px: u16,
    pub(super) origin: (u16, u16),
    pub(super) cursor_row: usize,
    pub(super) cursor_col: usize,
    pub(super) focus: Focus,
    pub(super) focused: bool,
    pub(super) last_click: Option<Click>,
    pub(super) pending: Vec<GridEvent>,
    /// Styles used by `view`.
    pub styles: GridStyles,
    /// Key bindings used by `update`.
    pub keymap: GridKeyMap,
}

impl<R: Record> Model<R> {
    /// Creates an empty, focused grid over `columns`.
    ///
    /// Fails when two columns share a key.
    pub fn new(columns: Vec<Column>) -> Result<Self, GridError> {
        Ok(Self::from_column_set(ColumnSet::new(columns)?))
    }

    /// Creates an empty, focused grid over an already validated column set.
    pub fn from_column_set(columns: ColumnSet) -> Self {
        let layout = Layout::new(&columns);
        let filters = columns
            .filterable()
            .map(|c| (c.key.clone(), Value::Null))
            .collect();
        Self {
            columns,
            rows: WorkingSet::default(),
            selection: Selection::new(),
            layout,
            edit: EditController::default(),
            paginator: paginator::Model::new(),
            search: String::new(),
            filters,
            controlled_filters: false,
            sort: None,
            mode: PaginationMode::Local,
            searchable: false,
            sortable: false,
            resizable: false,
            sticky_header: false,
            loading: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            cell_px: DEFAULT_CELL_PX,
            origin: (0, 0),
            cursor_row: 0,
            cursor_col: 0,
            focus: Focus::Table,
            focused: true,
            last_click: None,
            pending: Vec::new(),
            styles: GridStyles::default(),
            keymap: GridKeyMap::default(),
        }
    }

    /// Sets the rows (builder pattern).
    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.rows.replace(rows);
        self.sync_pagination();
        self
    }

    /// Enables the search input (builder pattern).
    pub fn searchable(mut self, on: bool) -> Self {
        self.searchable = on;
        self
    }

    /// Enables sorting from the header (builder pattern).
    pub fn sortable(mut self, on: bool) -> Self {
        self.sortable = on;
        self
    }

    /// Enables column resizing (builder pattern).
    pub fn resizable(mut self, on: bool) -> Self {
        self.resizable = on;
        self
    }

    /// Draws the header with the sticky style (builder pattern).
    pub fn sticky_header(mut self, on: bool) -> Self {
        self.sticky_header = on;
        self
    }

    /// Hands filter state to the host (builder pattern).
    ///
    /// Filter inputs then only report [`GridEvent::FilterChanged`]; the
    /// host applies changes by calling `set_filters`.
    pub fn with_filters(mut self, filters: FilterMap) -> Self {
        self.filters = filters;
        self.controlled_filters = true;
        self.sync_pagination();
        self
    }

    /// Switches to [`PaginationMode::Remote`] with the host's total (builder pattern).
    pub fn with_total(mut self, total: usize) -> Self {
        self.mode = PaginationMode::Remote { total };
        self.sync_pagination();
        self
    }

    /// Replaces the allowed page sizes (builder pattern).
    pub fn with_page_sizes(mut self, sizes: &[usize]) -> Self {
        self.paginator = self.paginator.with_page_sizes(sizes);
        self
    }

    /// Sets the initial page size (builder pattern). Sizes that are not
    /// allowed are ignored.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.paginator = self.paginator.with_page_size(size);
        self
    }

    /// Sets the empty-state message (builder pattern).
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Starts in the loading state (builder pattern).
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Sets what happens to an open edit when another starts (builder pattern).
    pub fn with_edit_switch_policy(mut self, policy: EditSwitchPolicy) -> Self {
        self.edit.set_policy(policy);
        self
    }

    /// Sets how many pixels one terminal cell stands for (builder pattern).
    /// Clamped to `1..=MAX_CELL_PX`.
    pub fn with_cell_px(mut self, px: u16) -> Self {
        self.cell_px = px.clamp(1, MAX_CELL_PX);
        self
    }

    /// Sets the styles (builder pattern).
    pub fn with_styles(mut self, styles: GridStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the key bindings (builder pattern).
    pub fn with_keymap(mut self, keymap: GridKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Sets the screen position of the grid's top-left corner, used to map
    /// mouse events (builder pattern).
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin = (x, y);
        self
    }

    /// Moves the grid's top-left corner.
    pub fn set_origin(&mut self, x: u16, y: u16) {
        self.origin = (x, y);
    }

    /// The column set.
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// The working rows, unfiltered and in working order.
    pub fn rows(&self) -> &[R] {
        self.rows.rows()
    }

    /// The working row set with identities.
    pub fn working_set(&self) -> &WorkingSet<R> {
        &self.rows
    }

    /// The selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Column widths and visibility.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The open edit, if any.
    pub fn edit_draft(&self) -> Option<&EditDraft> {
        self.edit.draft()
    }

    /// Current search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current filter map.
    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    /// Whether the host owns the filter map.
    pub fn filters_controlled(&self) -> bool {
        self.controlled_filters
    }

    /// Active sort.
    pub fn sort(&self) -> Option<&SortDirective> {
        self.sort.as_ref()
    }

    /// One-based current page.
    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    /// The pagination component.
    pub fn paginator(&self) -> &paginator::Model {
        &self.paginator
    }

    /// Where the total comes from.
    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Whether the loading placeholder is shown.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Cursor as (row on the page, visible column index).
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Which input receives key presses.
    pub fn focus_target(&self) -> Focus {
        self.focus
    }

    /// Everything derivation depends on.
    pub fn query(&self) -> Query {
        Query {
            search: if self.searchable {
                self.search.clone()
            } else {
                String::new()
            },
            filters: self.filters.clone(),
            sort: self.sort.clone(),
            page: self.paginator.page(),
            page_size: self.paginator.page_size(),
        }
    }

    /// Runs the derivation pipeline over the working rows.
    ///
    /// In remote mode the rows are taken as the host prepared them.
    pub fn derived(&self) -> Derived {
        match self.mode {
            PaginationMode::Local => pipeline::derive(self.rows.rows(), &self.columns, &self.query()),
            PaginationMode::Remote { .. } => Derived {
                filtered: (0..self.rows.len()).collect(),
                page: 0..self.rows.len(),
            },
        }
    }

    /// Total shown in the pagination bar.
    pub fn total(&self) -> usize {
        match self.mode {
            PaginationMode::Local => self.derived().total(),
            PaginationMode::Remote { total } => total,
        }
    }

    /// Rows on the current page with their identities.
    pub fn page_rows(&self) -> Vec<(RowId, &R)> {
        let derived = self.derived();
        derived
            .page_rows()
            .iter()
            .filter_map(|&p| Some((self.rows.id_at(p)?, self.rows.rows().get(p)?)))
            .collect()
    }

    /// Ids of every row surviving search and filters.
    pub fn filtered_ids(&self) -> Vec<RowId> {
        self.derived()
            .filtered
            .iter()
            .filter_map(|&p| self.rows.id_at(p))
            .collect()
    }

    /// Ids of the rows on the current page.
    pub(super) fn page_ids(&self) -> Vec<RowId> {
        let derived = self.derived();
        derived
            .page_rows()
            .iter()
            .filter_map(|&p| self.rows.id_at(p))
            .collect()
    }

    /// Key of the visible column under the cursor.
    pub(super) fn cursor_key(&self) -> Option<String> {
        self.layout.visible().get(self.cursor_col).cloned()
    }

    /// Hands over the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.pending)
    }

    pub(super) fn emit(&mut self, event: GridEvent) {
        self.pending.push(event);
    }

    /// Brings the paginator's total and the cursor in line with the rows.
    pub(super) fn sync_pagination(&mut self) {
        let total = self.total();
        self.paginator.set_total_items(total);
        self.clamp_cursor();
    }

    /// Like `sync_pagination`, and pulls the page back inside the data in local mode.
    pub(super) fn sync_and_clamp(&mut self) {
        self.sync_pagination();
        if self.mode == PaginationMode::Local {
            self.paginator.clamp_page();
            self.clamp_cursor();
        }
    }

    pub(super) fn clamp_cursor(&mut self) {
        let rows = self.page_ids().len();
        self.cursor_row = self.cursor_row.min(rows.saturating_sub(1));
        self.cursor_col = self
            .cursor_col
            .min(self.layout.visible().len().saturating_sub(1));
    }
}
