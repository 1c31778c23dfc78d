//! Events the grid reports to its host.
//!
//! Operations queue events as they change state; `update` hands the queue
//! back as a command resolving to a [`GridEventsMsg`]. Hosts that drive the
//! grid through its methods directly can drain the queue with
//! `Model::take_events`.

use crate::pipeline::SortDirection;
use crate::value::Value;

/// Something the host may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// The active sort changed.
    SortChanged {
        /// Sorted column.
        key: String,
        /// New direction.
        direction: SortDirection,
    },
    /// A filter value was changed from the filter bar or `set_filter`.
    FilterChanged {
        /// Filtered column.
        key: String,
        /// New filter value. Blank means the filter is off.
        value: Value,
    },
    /// The search term changed.
    SearchChanged {
        /// New term.
        term: String,
    },
    /// An edit was committed and written to the working rows.
    CellEdited {
        /// Position of the row in the working rows.
        row_index: usize,
        /// Edited column.
        key: String,
        /// Committed value.
        value: Value,
    },
    /// A pagination control changed the page or the page size.
    PaginationChanged {
        /// New one-based page.
        page: usize,
        /// New page size.
        page_size: usize,
    },
    /// The visible-column list was replaced. Keys are in descriptor order.
    ColumnsChanged {
        /// Visible keys.
        visible: Vec<String>,
    },
    /// A column resize finished.
    ColumnResized {
        /// Resized column.
        key: String,
        /// Final width in pixels.
        width: u16,
    },
    /// Selected rows were deleted from the working rows.
    RowsDeleted {
        /// How many rows were removed.
        count: usize,
    },
}

/// Batch of events produced by one `update` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEventsMsg(pub Vec<GridEvent>);
