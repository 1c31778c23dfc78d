//! Cell values and the record abstraction rows are read through.
//!
//! The grid never looks inside a row beyond asking it for the value stored
//! under a column key. Anything implementing [`Record`] can be displayed;
//! maps from column key to [`Value`] implement it out of the box.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing value. Sorts last and stringifies to `""`.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Compared numerically when both sides are numbers.
    Number(f64),
    /// Text, dates included.
    Text(String),
}

impl Value {
    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True when the value carries no filter criterion: null or empty text.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The text used for searching, filtering and plain rendering.
    ///
    /// Null becomes the empty string; whole numbers print without a
    /// fractional part.
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Case-insensitive substring test on stringified values.
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Locale-style text ordering: letters compare case-insensitively first,
/// and on a tie lowercase sorts before uppercase.
pub(crate) fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if folded != Ordering::Equal {
        return folded;
    }
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            return match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => ca.cmp(&cb),
            };
        }
    }
    a.len().cmp(&b.len())
}

/// A row the grid can read and edit by column key.
pub trait Record: Clone {
    /// The value under `key`, or [`Value::Null`] when absent.
    fn value(&self, key: &str) -> Value;

    /// Stores `value` under `key`. Used when an edit is committed.
    fn set_value(&mut self, key: &str, value: Value);
}

impl Record for HashMap<String, Value> {
    fn value(&self, key: &str) -> Value {
        HashMap::get(self, key).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}

impl Record for BTreeMap<String, Value> {
    fn value(&self, key: &str) -> Value {
        BTreeMap::get(self, key).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}

/// Builds a map record from `(key, value)` pairs.
///
/// ```rust
/// use bubbletea_datagrid::value::{record, Record, Value};
///
/// let row = record([("name", Value::from("Bob")), ("age", Value::from(30))]);
/// assert_eq!(row.value("age").as_text(), "30");
/// assert!(row.value("missing").is_null());
/// ```
pub fn record<K, I>(pairs: I) -> BTreeMap<String, Value>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
