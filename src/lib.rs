#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-datagrid/")]

//! # bubbletea-datagrid
//!
//! An interactive data grid for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: search, per-column filters, sorting, pagination, row
//! selection with bulk delete, inline cell editing, column visibility and
//! column resizing over rows of any record type.
//!
//! ## Overview
//!
//! The grid follows the Elm Architecture like every bubbletea component:
//! configure a [`grid::Model`] with builder methods, feed it messages through
//! `update()`, and draw it with `view()`. Everything it shows is derived
//! from the working rows by a fixed pipeline (search, filter, sort,
//! paginate), and every change the host may care about comes back as a
//! [`grid::GridEvent`].
//!
//! The building blocks are usable on their own:
//!
//! - [`pipeline`]: the pure derivation functions
//! - [`selection`]: row selection keyed by row identity
//! - [`layout`]: column widths, visibility and the resize gesture
//! - [`edit`]: the single-draft edit controller
//! - [`paginator`]: page state and the collapsing page-button strip
//! - [`column`]: column descriptors and per-column cell rendering
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_datagrid::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//! use std::collections::BTreeMap;
//!
//! struct App {
//!     grid: DataGrid<BTreeMap<String, Value>>,
//!     edits: usize,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let grid = DataGrid::new(vec![
//!             Column::new("name", "Name"),
//!             Column::new("age", "Age").with_type(ColumnType::Number),
//!         ])
//!         .unwrap()
//!         .searchable(true)
//!         .sortable(true)
//!         .with_rows(vec![record([("name", Value::from("Bob")), ("age", Value::from(30))])]);
//!         (Self { grid, edits: 0 }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(GridEventsMsg(events)) = msg.downcast_ref::<GridEventsMsg>() {
//!             for event in events {
//!                 if let GridEvent::CellEdited { .. } = event {
//!                     self.edits += 1;
//!                 }
//!             }
//!             return None;
//!         }
//!         self.grid.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.grid.view()
//!     }
//! }
//! ```
//!
//! ## Focus Management
//!
//! The grid implements [`Component`]. A blurred grid ignores input; blurring
//! commits the open edit.
//!
//! ```rust
//! use bubbletea_datagrid::prelude::*;
//! use std::collections::BTreeMap;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     component.blur();
//!     assert!(!component.focused());
//!     let _ = component.focus();
//!     assert!(component.focused());
//! }
//!
//! let mut grid: DataGrid<BTreeMap<String, Value>> =
//!     DataGrid::new(vec![Column::new("name", "Name")]).unwrap();
//! handle_focus(&mut grid);
//! ```
//!
//! ## Logging
//!
//! State transitions are logged through the [`log`](https://docs.rs/log)
//! facade. The crate never installs a logger.

pub mod column;
pub mod edit;
pub mod error;
pub mod grid;
pub mod key;
pub mod layout;
pub mod paginator;
pub mod pipeline;
pub mod rows;
pub mod selection;
pub mod value;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// - `focus()` sets the focused state and may return a command
/// - `blur()` unsets it and cleans up focus-related state
/// - `focused()` reports the current state
pub trait Component {
    /// Sets the component to focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use column::{
    BadgeTone, CellContent, CellKind, Column, ColumnOption, ColumnSet, ColumnType, DEFAULT_WIDTH,
    MIN_WIDTH,
};
pub use edit::{EditController, EditDraft, EditSwitchPolicy};
pub use error::GridError;
pub use grid::{
    Focus, GridEvent, GridEventsMsg, GridKeyMap, GridStyles, Model as DataGrid, PaginationMode,
};
pub use key::{
    matches, new_binding, with_disabled, with_help, with_keys, with_keys_str, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use layout::{Layout, ResizeGesture};
pub use paginator::{Model as Paginator, PageItem};
pub use pipeline::{Derived, FilterMap, Query, SortDirection, SortDirective};
pub use rows::{RowId, WorkingSet};
pub use selection::{CheckState, Selection};
pub use value::{record, Record, Value};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_datagrid::prelude::*;
///
/// let sizes = Paginator::new().page_sizes().to_vec();
/// assert_eq!(sizes, [10, 25, 50, 100]);
/// ```
pub mod prelude {
    pub use crate::column::{Column, ColumnOption, ColumnType};
    pub use crate::edit::EditSwitchPolicy;
    pub use crate::error::GridError;
    pub use crate::grid::{
        GridEvent, GridEventsMsg, GridKeyMap, GridStyles, Model as DataGrid, PaginationMode,
    };
    pub use crate::key::{Binding, KeyMap};
    pub use crate::paginator::Model as Paginator;
    pub use crate::pipeline::{FilterMap, SortDirection};
    pub use crate::rows::RowId;
    pub use crate::selection::CheckState;
    pub use crate::value::{record, Record, Value};
    pub use crate::Component;
}
