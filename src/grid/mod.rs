//! The data grid component.
//!
//! `Model<R>` renders rows of any [`Record`](crate::value::Record) type as a
//! table with search, per-column filters, sorting, pagination, row
//! selection with bulk delete, inline cell editing, column visibility and
//! column resizing.
//!
//! ## Data flow
//!
//! Every view is derived from the working rows by the pipeline in
//! [`crate::pipeline`]: search, then filters, then sort, then the page
//! slice. Nothing is cached between derivations, so every state change is
//! reflected on the next `view()`.
//!
//! Interaction reaches the grid in two ways:
//! - as messages through `update`: `KeyMsg` presses and forwarded
//!   `crossterm::event::MouseEvent`s
//! - as direct method calls (`toggle_sort`, `set_filter`, `start_edit`, ...)
//!
//! Either way, changes the host should know about are queued as
//! [`GridEvent`]s. `update` returns them as a command resolving to a
//! [`GridEventsMsg`]; direct callers drain them with `take_events`.
//!
//! ## Row identity
//!
//! Rows receive a [`RowId`](crate::rows::RowId) when they enter the grid.
//! Selection and edits follow the row, not its position, so re-sorting or
//! filtering never moves a selection onto another row. Replacing the rows
//! with `set_rows` issues new identities and clears selection and edits.
//!
//! ## Pagination modes
//!
//! In [`PaginationMode::Local`] the grid does all the work and the filtered
//! count is the total. In [`PaginationMode::Remote`] the host hands over each
//! page ready to show plus the total, and reacts to the events the grid
//! reports.
//!
//! ```rust
//! use bubbletea_datagrid::column::{Column, ColumnOption, ColumnType};
//! use bubbletea_datagrid::grid::{GridEvent, Model};
//! use bubbletea_datagrid::value::{record, Value};
//!
//! let columns = vec![
//!     Column::new("name", "Name"),
//!     Column::new("status", "Status")
//!         .with_type(ColumnType::Text)
//!         .with_options(vec![
//!             ColumnOption::new("Active", "Active"),
//!             ColumnOption::new("Expired", "Expired"),
//!         ])
//!         .filterable(),
//! ];
//! let rows = vec![
//!     record([("name", Value::from("Bob")), ("status", Value::from("Active"))]),
//!     record([("name", Value::from("Ann")), ("status", Value::from("Expired"))]),
//! ];
//! let mut grid = Model::new(columns).unwrap().with_rows(rows).searchable(true);
//!
//! grid.set_filter("status", "Active").unwrap();
//! assert_eq!(grid.total(), 1);
//! assert!(matches!(grid.take_events()[..], [GridEvent::FilterChanged { .. }]));
//! ```

mod api;
pub mod events;
pub mod keys;
mod model;
mod rendering;
pub mod style;
mod update;

#[cfg(test)]
mod tests;

pub use events::{GridEvent, GridEventsMsg};
pub use keys::GridKeyMap;
pub use model::{
    Focus, Model, PaginationMode, DEFAULT_CELL_PX, DEFAULT_EMPTY_MESSAGE, MAX_CELL_PX,
};
pub use style::GridStyles;

use crate::column::ColumnSet;
use crate::key::{self, KeyMap};
use crate::value::Record;
use crate::Component;
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};

impl<R: Record> KeyMap for Model<R> {
    /// Bindings for the current state: edit keys while editing, the leave
    /// key while typing in search or a filter, table keys otherwise.
    fn short_help(&self) -> Vec<&key::Binding> {
        if self.edit.is_editing() {
            return vec![&self.keymap.commit, &self.keymap.cancel];
        }
        match self.focus {
            Focus::Search | Focus::Filter(_) => vec![&self.keymap.cancel],
            Focus::Table => {
                let mut bindings = self.keymap.short_help();
                if !self.selection.is_empty() {
                    bindings.push(&self.keymap.delete_selected);
                }
                bindings
            }
        }
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        self.keymap.full_help()
    }
}

impl<R: Record> Component for Model<R> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    /// Losing focus commits the open edit and drops any resize in progress.
    fn blur(&mut self) {
        self.commit_edit();
        self.layout.end_resize();
        self.last_click = None;
        self.focus = Focus::Table;
        self.focused = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

impl<R: Record + Send + 'static> BubbleTeaModel for Model<R> {
    /// A grid with no columns and no rows.
    fn init() -> (Self, Option<Cmd>) {
        (Self::from_column_set(ColumnSet::default()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
