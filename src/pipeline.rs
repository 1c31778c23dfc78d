//! The derivation pipeline: working rows to the page on screen.
//!
//! Derivation runs four steps in a fixed order: search, filter, sort,
//! paginate. Every step works on positions into the working row set, so the
//! rows themselves are never reordered or cloned and each derived row can
//! still be traced back to its identity.
//!
//! ```rust
//! use bubbletea_datagrid::column::{Column, ColumnSet};
//! use bubbletea_datagrid::pipeline::{derive, Query, SortDirection, SortDirective};
//! use bubbletea_datagrid::value::{record, Value};
//!
//! let columns = ColumnSet::new(vec![Column::new("name", "Name"), Column::new("age", "Age")]).unwrap();
//! let rows = vec![
//!     record([("name", Value::from("Bob")), ("age", Value::from(30))]),
//!     record([("name", Value::from("Ann")), ("age", Value::from(25))]),
//! ];
//!
//! let query = Query::new().sorted(SortDirective::new("name", SortDirection::Ascending));
//! let derived = derive(&rows, &columns, &query);
//! assert_eq!(derived.filtered, vec![1, 0]);
//! assert_eq!(derived.total(), 2);
//! ```

use crate::column::ColumnSet;
use crate::value::{contains_ignore_case, locale_cmp, Record, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow for this direction.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        })
    }
}

/// The single active sort: a column key and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    /// Column being sorted.
    pub key: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Creates a directive.
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// The directive that follows this one when the header of `key` is
    /// activated: a new column starts ascending, the same column flips.
    pub fn next_for(current: Option<&SortDirective>, key: &str) -> SortDirective {
        let direction = match current {
            Some(c) if c.key == key && c.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        SortDirective::new(key, direction)
    }
}

/// Per-column filter values. Blank entries are inactive.
pub type FilterMap = BTreeMap<String, Value>;

/// Everything derivation depends on besides the rows and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Search term applied across all columns.
    pub search: String,
    /// Column filters.
    pub filters: FilterMap,
    /// Active sort.
    pub sort: Option<SortDirective>,
    /// One-based page number.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: FilterMap::new(),
            sort: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl Query {
    /// First page of ten, no search, filter or sort.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term.
    pub fn searching(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Adds a filter entry.
    pub fn filtered(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Sets the sort.
    pub fn sorted(mut self, sort: SortDirective) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets page and page size.
    pub fn paged(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }
}

/// Output of [`derive`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Derived {
    /// Positions in the working set surviving search and filter, in sorted order.
    pub filtered: Vec<usize>,
    /// Slice of `filtered` on the current page.
    pub page: Range<usize>,
}

impl Derived {
    /// Rows surviving search and filter, before pagination.
    pub fn total(&self) -> usize {
        self.filtered.len()
    }

    /// Working-set positions of the rows on the current page.
    pub fn page_rows(&self) -> &[usize] {
        &self.filtered[self.page.clone()]
    }
}

/// Keeps rows where any column's text contains `term`, ignoring case.
///
/// An empty term keeps everything.
pub fn search<R: Record>(
    rows: &[R],
    positions: Vec<usize>,
    columns: &ColumnSet,
    term: &str,
) -> Vec<usize> {
    if term.is_empty() {
        return positions;
    }
    let needle = term.to_lowercase();
    positions
        .into_iter()
        .filter(|&i| {
            columns
                .keys()
                .any(|key| contains_ignore_case(&rows[i].value(key).as_text(), &needle))
        })
        .collect()
}

/// Keeps rows satisfying every active filter entry by case-insensitive
/// substring match, enumerated columns included.
pub fn filter<R: Record>(rows: &[R], positions: Vec<usize>, filters: &FilterMap) -> Vec<usize> {
    let active: Vec<(&str, String)> = filters
        .iter()
        .filter(|(_, v)| !v.is_blank())
        .map(|(k, v)| (k.as_str(), v.as_text().to_lowercase()))
        .collect();
    if active.is_empty() {
        return positions;
    }
    positions
        .into_iter()
        .filter(|&i| {
            active
                .iter()
                .all(|(key, needle)| contains_ignore_case(&rows[i].value(key).as_text(), needle))
        })
        .collect()
}

/// Compares two cell values for `direction`. Nulls go last either way.
///
/// Numbers compare numerically with `f64::total_cmp`, so NaN sorts after
/// every other number. Every other value compares by its text. In a column
/// mixing both, numbers come before text.
pub fn compare_values(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = match (a, b) {
                (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
                (Value::Number(_), _) => Ordering::Less,
                (_, Value::Number(_)) => Ordering::Greater,
                _ => locale_cmp(&a.as_text(), &b.as_text()),
            };
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

/// Stable sort of `positions` by the directive's column.
pub fn sort<R: Record>(rows: &[R], mut positions: Vec<usize>, sort: &SortDirective) -> Vec<usize> {
    let keyed: Vec<Value> = rows.iter().map(|r| r.value(&sort.key)).collect();
    positions.sort_by(|&a, &b| compare_values(&keyed[a], &keyed[b], sort.direction));
    positions
}

/// Bounds of one-based `page` over `len` items. Pages past the end are empty.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Slices one page out of `items`.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    &items[page_bounds(items.len(), page, page_size)]
}

/// Runs search, filter, sort and paginate in that order.
pub fn derive<R: Record>(rows: &[R], columns: &ColumnSet, query: &Query) -> Derived {
    let positions: Vec<usize> = (0..rows.len()).collect();
    let positions = search(rows, positions, columns, &query.search);
    let positions = filter(rows, positions, &query.filters);
    let filtered = match &query.sort {
        Some(directive) => sort(rows, positions, directive),
        None => positions,
    };
    let page = page_bounds(filtered.len(), query.page, query.page_size);
    Derived { filtered, page }
}
