//! Column descriptors and the validated column set.
//!
//! A [`Column`] describes how one field is displayed, filtered, sorted and
//! rendered. Columns are gathered into a [`ColumnSet`], which checks key
//! uniqueness and resolves each column's [`CellKind`] once, so rendering
//! never re-branches on type and renderer per cell.

use crate::error::GridError;
use crate::value::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Width used when a column does not configure one.
pub const DEFAULT_WIDTH: u16 = 120;

/// Smallest width a column can be resized to.
pub const MIN_WIDTH: u16 = 60;

/// The data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Free text. Editable.
    Text,
    /// Numbers. Sorted numerically.
    Number,
    /// ISO dates stored as text. Editable.
    Date,
    /// Booleans, rendered as Yes / No.
    Boolean,
    /// URLs.
    Link,
}

/// One choice of an enumerated column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOption {
    /// Text shown for the option.
    pub label: String,
    /// The stored value the option stands for.
    pub value: Value,
}

impl ColumnOption {
    /// Creates an option.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Custom cell renderer: receives the cell value and the row's position in
/// the current page and returns the (possibly styled) cell text.
pub type CellRenderer = Arc<dyn Fn(&Value, usize) -> String + Send + Sync>;

/// Describes one column of the grid.
#[derive(Clone)]
pub struct Column {
    /// Key the column reads from each row. Unique within a column set.
    pub key: String,
    /// Header title.
    pub title: String,
    /// Configured width in pixels.
    pub width: Option<u16>,
    /// Column data type.
    pub column_type: Option<ColumnType>,
    /// Whether the filter bar offers a filter for this column.
    pub filterable: bool,
    /// Whether the column takes part in header sorting.
    pub sortable: bool,
    /// Enumerated choices, if any.
    pub options: Option<Vec<ColumnOption>>,
    /// Custom renderer, if any.
    pub render: Option<CellRenderer>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("column_type", &self.column_type)
            .field("filterable", &self.filterable)
            .field("sortable", &self.sortable)
            .field("options", &self.options)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Column {
    /// Creates a sortable, unfiltered column with no type.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width: None,
            column_type: None,
            filterable: false,
            sortable: true,
            options: None,
            render: None,
        }
    }

    /// Sets the initial width in pixels.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the column type.
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    /// Offers a filter for this column in the filter bar.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Excludes the column from header sorting.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Sets the enumerated options.
    pub fn with_options(mut self, options: Vec<ColumnOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets a custom renderer.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, usize) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Whether cells in this column can be edited inline: no custom
    /// renderer, and a type that is absent, text or date.
    pub fn is_editable(&self) -> bool {
        self.render.is_none()
            && matches!(
                self.column_type,
                None | Some(ColumnType::Text) | Some(ColumnType::Date)
            )
    }

    /// Width the layout starts from.
    pub fn initial_width(&self) -> u16 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    fn resolve_kind(&self) -> CellKind {
        if let Some(render) = &self.render {
            return CellKind::Custom(Arc::clone(render));
        }
        match (self.column_type, &self.options) {
            (Some(ColumnType::Boolean), _) => CellKind::Boolean,
            (Some(ColumnType::Text), Some(options)) => CellKind::Enumerated(options.clone()),
            _ => CellKind::Plain,
        }
    }
}

/// Rendering strategy of a column, fixed when the column set is built.
#[derive(Clone)]
pub enum CellKind {
    /// Delegates to the column's renderer.
    Custom(CellRenderer),
    /// `Yes`, `No`, or empty for null.
    Boolean,
    /// Badge showing the matching option's label.
    Enumerated(Vec<ColumnOption>),
    /// Stringified value.
    Plain,
}

impl fmt::Debug for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Custom(_) => f.write_str("Custom"),
            CellKind::Boolean => f.write_str("Boolean"),
            CellKind::Enumerated(o) => f.debug_tuple("Enumerated").field(o).finish(),
            CellKind::Plain => f.write_str("Plain"),
        }
    }
}

/// Badge tone for enumerated cells, picked from the value text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    /// Contains "active".
    Positive,
    /// Contains "expired".
    Warning,
    /// Contains "terminated".
    Negative,
    /// Anything else.
    Neutral,
}

impl BadgeTone {
    /// Picks the tone for a value. Only text values are classified.
    pub fn for_value(value: &Value) -> Self {
        let Value::Text(text) = value else {
            return BadgeTone::Neutral;
        };
        let lower = text.to_lowercase();
        if lower.contains("active") {
            BadgeTone::Positive
        } else if lower.contains("expired") {
            BadgeTone::Warning
        } else if lower.contains("terminated") {
            BadgeTone::Negative
        } else {
            BadgeTone::Neutral
        }
    }
}

/// What a cell displays, before styling.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Plain or renderer-produced text.
    Text(String),
    /// An enumerated badge.
    Badge {
        /// Badge text.
        label: String,
        /// Badge colour family.
        tone: BadgeTone,
    },
}

impl CellKind {
    /// Resolves the display content of one cell.
    pub fn content(&self, value: &Value, row_position: usize) -> CellContent {
        match self {
            CellKind::Custom(render) => CellContent::Text(render(value, row_position)),
            CellKind::Boolean => CellContent::Text(
                match value {
                    Value::Bool(true) => "Yes",
                    Value::Bool(false) => "No",
                    _ => "",
                }
                .to_string(),
            ),
            CellKind::Enumerated(options) => {
                let label = options
                    .iter()
                    .find(|o| &o.value == value)
                    .map(|o| o.label.clone())
                    .unwrap_or_else(|| value.as_text());
                CellContent::Badge {
                    label,
                    tone: BadgeTone::for_value(value),
                }
            }
            CellKind::Plain => CellContent::Text(value.as_text()),
        }
    }
}

/// The immutable, validated set of columns of one grid.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: Vec<Column>,
    kinds: Vec<CellKind>,
}

impl ColumnSet {
    /// Validates and wraps the columns.
    ///
    /// Fails with [`GridError::DuplicateColumn`] when two columns share a key.
    pub fn new(columns: Vec<Column>) -> Result<Self, GridError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(GridError::DuplicateColumn(column.key.clone()));
            }
        }
        let kinds = columns.iter().map(Column::resolve_kind).collect();
        Ok(Self { columns, kinds })
    }

    /// All columns in descriptor order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Descriptor index of `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// The column with `key`.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.index_of(key).map(|i| &self.columns[i])
    }

    /// The column with `key`, or [`GridError::UnknownColumn`].
    pub fn require(&self, key: &str) -> Result<&Column, GridError> {
        self.get(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))
    }

    /// The resolved rendering strategy of `key`.
    pub fn kind(&self, key: &str) -> Option<&CellKind> {
        self.index_of(key).map(|i| &self.kinds[i])
    }

    /// All column keys in descriptor order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    /// Columns offered in the filter bar.
    pub fn filterable(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.filterable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = ColumnSet::new(vec![Column::new("a", "A"), Column::new("a", "Again")])
            .unwrap_err();
        assert_eq!(err, GridError::DuplicateColumn("a".into()));
    }

    #[test]
    fn test_editability() {
        assert!(Column::new("n", "Name").is_editable());
        assert!(Column::new("n", "Name").with_type(ColumnType::Text).is_editable());
        assert!(Column::new("d", "Date").with_type(ColumnType::Date).is_editable());
        assert!(!Column::new("a", "Age").with_type(ColumnType::Number).is_editable());
        assert!(!Column::new("b", "Active").with_type(ColumnType::Boolean).is_editable());
        assert!(!Column::new("e", "Email")
            .with_type(ColumnType::Text)
            .with_render(|v, _| v.as_text())
            .is_editable());
    }

    #[test]
    fn test_kind_resolution() {
        let set = ColumnSet::new(vec![
            Column::new("flag", "Flag").with_type(ColumnType::Boolean),
            Column::new("status", "Status")
                .with_type(ColumnType::Text)
                .with_options(vec![ColumnOption::new("Active", "Active")]),
            Column::new("untyped", "Untyped")
                .with_options(vec![ColumnOption::new("X", "x")]),
            Column::new("custom", "Custom").with_render(|v, _| format!("<{v}>")),
        ])
        .unwrap();

        assert!(matches!(set.kind("flag"), Some(CellKind::Boolean)));
        assert!(matches!(set.kind("status"), Some(CellKind::Enumerated(_))));
        // Options only turn into badges on text columns.
        assert!(matches!(set.kind("untyped"), Some(CellKind::Plain)));
        assert!(matches!(set.kind("custom"), Some(CellKind::Custom(_))));
    }

    #[test]
    fn test_cell_content() {
        assert_eq!(
            CellKind::Boolean.content(&Value::from(true), 0),
            CellContent::Text("Yes".into())
        );
        assert_eq!(
            CellKind::Boolean.content(&Value::Null, 0),
            CellContent::Text(String::new())
        );

        let kind = CellKind::Enumerated(vec![ColumnOption::new("Is Expired", "Expired")]);
        assert_eq!(
            kind.content(&Value::from("Expired"), 0),
            CellContent::Badge {
                label: "Is Expired".into(),
                tone: BadgeTone::Warning
            }
        );
        assert_eq!(
            kind.content(&Value::from("Inactive"), 0),
            CellContent::Badge {
                label: "Inactive".into(),
                tone: BadgeTone::Positive
            }
        );
    }
}
