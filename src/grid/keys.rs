//! Key bindings for the data grid.
//!
//! ## Table keys
//!
//! - **Cursor**: `↑/k`, `↓/j`, `←/h`, `→/l`
//! - **Pages**: `pgdn/]` next, `pgup/[` previous, `z` cycles the page size
//! - **Sorting**: `s` sorts by the column under the cursor
//! - **Selection**: `space/x` toggles the row, `a` toggles all, `D` deletes the selection
//! - **Editing**: `enter/e` edits the cell, `enter` commits, `esc` cancels
//! - **Search and filters**: `/` focuses search, `f` cycles through the filters
//! - **Columns**: `1`-`9` toggle the visibility of a column, `>`/`<` widen or narrow
//!
//! ```rust
//! use bubbletea_datagrid::grid::GridKeyMap;
//! use bubbletea_datagrid::key::KeyMap;
//!
//! let keymap = GridKeyMap::default();
//! assert!(!keymap.short_help().is_empty());
//! ```

use crate::key;
use crossterm::event::KeyCode;

/// Key bindings for every grid action.
#[derive(Debug, Clone)]
pub struct GridKeyMap {
    /// Move the cursor up one row.
    pub cursor_up: key::Binding,
    /// Move the cursor down one row.
    pub cursor_down: key::Binding,
    /// Move the cursor to the previous visible column.
    pub cursor_left: key::Binding,
    /// Move the cursor to the next visible column.
    pub cursor_right: key::Binding,
    /// Next page.
    pub next_page: key::Binding,
    /// Previous page.
    pub prev_page: key::Binding,
    /// Cycle the page size.
    pub next_page_size: key::Binding,
    /// Sort by the cursor column.
    pub sort: key::Binding,
    /// Toggle selection of the cursor row.
    pub toggle_row: key::Binding,
    /// Toggle selection of every filtered row.
    pub toggle_all: key::Binding,
    /// Delete the selected rows.
    pub delete_selected: key::Binding,
    /// Start editing the cursor cell.
    pub start_edit: key::Binding,
    /// Commit the open edit.
    pub commit: key::Binding,
    /// Cancel the open edit, or leave the search and filter inputs.
    pub cancel: key::Binding,
    /// Focus the search input.
    pub focus_search: key::Binding,
    /// Focus the next filter input.
    pub focus_filter: key::Binding,
    /// Toggle visibility of column N, counting all columns from 1.
    pub toggle_column: key::Binding,
    /// Widen the cursor column.
    pub widen_column: key::Binding,
    /// Narrow the cursor column.
    pub narrow_column: key::Binding,
}

impl Default for GridKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            cursor_left: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "left"),
            cursor_right: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "right"),
            next_page: key::Binding::new(vec![KeyCode::PageDown, KeyCode::Char(']')])
                .with_help("pgdn/]", "next page"),
            prev_page: key::Binding::new(vec![KeyCode::PageUp, KeyCode::Char('[')])
                .with_help("pgup/[", "prev page"),
            next_page_size: key::Binding::new(vec![KeyCode::Char('z')]).with_help("z", "page size"),
            sort: key::Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            toggle_row: key::new_binding(vec![
                key::with_keys_str(&["space", "x"]),
                key::with_help("space", "select"),
            ]),
            toggle_all: key::Binding::new(vec![KeyCode::Char('a')]).with_help("a", "select all"),
            delete_selected: key::Binding::new(vec![KeyCode::Char('D')])
                .with_help("D", "delete selected"),
            start_edit: key::Binding::new(vec![KeyCode::Enter, KeyCode::Char('e')])
                .with_help("enter", "edit"),
            commit: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "save"),
            cancel: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
            focus_search: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            focus_filter: key::Binding::new(vec![KeyCode::Char('f')]).with_help("f", "filter"),
            toggle_column: key::new_binding(vec![
                key::with_keys_str(&["1", "2", "3", "4", "5", "6", "7", "8", "9"]),
                key::with_help("1-9", "show/hide column"),
            ]),
            widen_column: key::Binding::new(vec![KeyCode::Char('>')]).with_help(">", "widen"),
            narrow_column: key::Binding::new(vec![KeyCode::Char('<')]).with_help("<", "narrow"),
        }
    }
}

impl key::KeyMap for GridKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.sort,
            &self.toggle_row,
            &self.start_edit,
            &self.focus_search,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.cursor_left,
                &self.cursor_right,
                &self.next_page,
                &self.prev_page,
                &self.next_page_size,
            ],
            vec![
                &self.sort,
                &self.toggle_row,
                &self.toggle_all,
                &self.delete_selected,
            ],
            vec![
                &self.start_edit,
                &self.commit,
                &self.cancel,
                &self.focus_search,
                &self.focus_filter,
            ],
            vec![&self.toggle_column, &self.widen_column, &self.narrow_column],
        ]
    }
}
