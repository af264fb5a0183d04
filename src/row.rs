//! Rows, row keys, and column sets.
//!
//! A [`Row`] is either an ordered mapping from column name to scalar value
//! (named columns) or a plain sequence of scalar values (positional
//! columns). Named rows are backed by [`IndexMap`] so that column order is
//! deterministic and survives a round-trip.
//!
//! A [`ColumnSet`] is fixed by the first row a handle sees and governs the
//! shape of every row after it. Both the read engine and the write
//! strategies validate against it here, so the two sides can never drift
//! apart on what "matching shape" means.
//!
//! ## Examples
//!
//! ```rust
//! use fixie::{row, ColumnSet, Row};
//!
//! let first = row!({"name": "H", "n": 1});
//! let columns = ColumnSet::of_row(&first);
//! assert_eq!(columns, ColumnSet::Named(vec!["name".into(), "n".into()]));
//!
//! let second = row!({"name": "He", "n": 2});
//! assert!(columns.matches(&second));
//!
//! let short = row!({"name": "Li"});
//! assert!(!columns.matches(&short));
//! ```

use crate::error::Cause;
use crate::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The document key of a row: a zero-based sequence number, or the row's
/// label when the document labels its rows.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Index(u64),
    Label(String),
}

impl Key {
    /// If the key is a sequence number, returns it.
    #[inline]
    #[must_use]
    pub const fn as_index(&self) -> Option<u64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Label(_) => None,
        }
    }

    /// If the key is a label, returns it.
    #[inline]
    #[must_use]
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Label(label) => Some(label),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Label(label) => write!(f, "{}", label),
        }
    }
}

impl From<u64> for Key {
    fn from(value: u64) -> Self {
        Key::Index(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Label(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Label(value)
    }
}

/// A single data row: named cells in column order, or positional cells.
///
/// # Examples
///
/// ```rust
/// use fixie::{row, Row, Value};
///
/// let named = row!({"name": "H", "n": 1});
/// assert_eq!(named.len(), 2);
/// assert_eq!(named.get("name"), Some(&Value::from("H")));
///
/// let positional = row!(["a", "b"]);
/// assert!(!positional.is_named());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Row {
    Named(IndexMap<String, Value>),
    Positional(Vec<Value>),
}

impl Row {
    /// Builds a named row from `(name, value)` pairs, preserving order.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Row::Named(pairs.into_iter().collect())
    }

    /// Builds a positional row from values.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Row::Positional(values.into_iter().collect())
    }

    /// Returns `true` if the row has named columns.
    #[inline]
    #[must_use]
    pub const fn is_named(&self) -> bool {
        matches!(self, Row::Named(_))
    }

    /// The number of cells in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Row::Named(map) => map.len(),
            Row::Positional(values) => values.len(),
        }
    }

    /// Returns `true` if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a cell by column name. Positional rows have no names.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Row::Named(map) => map.get(name),
            Row::Positional(_) => None,
        }
    }

    /// Iterates the cell values in column order.
    pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Row::Named(map) => Box::new(map.values()),
            Row::Positional(values) => Box::new(values.iter()),
        }
    }
}

/// The fixed, ordered column shape of one document or handle.
///
/// Created from the first row read or written; immutable afterwards. Named
/// columns carry the declared name order; positional columns carry only
/// their arity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSet {
    Named(Vec<String>),
    Positional(usize),
}

impl ColumnSet {
    /// Derives the column set from a first row.
    #[must_use]
    pub fn of_row(row: &Row) -> Self {
        match row {
            Row::Named(map) => ColumnSet::Named(map.keys().cloned().collect()),
            Row::Positional(values) => ColumnSet::Positional(values.len()),
        }
    }

    /// The number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnSet::Named(names) => names.len(),
            ColumnSet::Positional(arity) => *arity,
        }
    }

    /// Returns `true` if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the columns are named.
    #[inline]
    #[must_use]
    pub const fn is_named(&self) -> bool {
        matches!(self, ColumnSet::Named(_))
    }

    /// The shape-compatibility predicate shared by the read and write
    /// paths: a row matches when its kind, arity, and (for named columns)
    /// key identity and order agree with this column set.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        match (self, row) {
            (ColumnSet::Named(names), Row::Named(map)) => {
                map.len() == names.len() && map.keys().zip(names).all(|(key, name)| key == name)
            }
            (ColumnSet::Positional(arity), Row::Positional(values)) => values.len() == *arity,
            _ => false,
        }
    }

    /// Assembles parsed cell values into a row shaped by this column set,
    /// or `None` when the arity does not match.
    pub(crate) fn assemble(&self, values: Vec<Value>) -> Option<Row> {
        if values.len() != self.len() {
            return None;
        }
        match self {
            ColumnSet::Named(names) => Some(Row::Named(
                names.iter().cloned().zip(values).collect(),
            )),
            ColumnSet::Positional(_) => Some(Row::Positional(values)),
        }
    }

    /// Projects a row onto this column set for writing.
    ///
    /// Named cells are looked up by name, so the row's own key order never
    /// matters; a row with a missing or extra column, or a positional row
    /// of the wrong arity, is rejected.
    pub(crate) fn project<'a>(&self, row: &'a Row) -> Result<Vec<&'a Value>, Cause> {
        match (self, row) {
            (ColumnSet::Named(names), Row::Named(map)) => {
                if map.len() != names.len() {
                    return Err(Cause::Structure(format!(
                        "row has {} columns where {} were fixed",
                        map.len(),
                        names.len()
                    )));
                }
                names
                    .iter()
                    .map(|name| {
                        map.get(name).ok_or_else(|| {
                            Cause::Structure(format!("row is missing column '{}'", name))
                        })
                    })
                    .collect()
            }
            (ColumnSet::Positional(arity), Row::Positional(values)) => {
                if values.len() != *arity {
                    return Err(Cause::Structure(format!(
                        "row has {} values where {} were fixed",
                        values.len(),
                        arity
                    )));
                }
                Ok(values.iter().collect())
            }
            (ColumnSet::Named(_), Row::Positional(_)) => Err(Cause::Structure(
                "positional row given to a handle with named columns".to_string(),
            )),
            (ColumnSet::Positional(_), Row::Named(_)) => Err(Cause::Structure(
                "named row given to a handle with positional columns".to_string(),
            )),
        }
    }
}
