//! # fixie
//!
//! A streaming reader and writer for the Fixie fixture format: a
//! restricted, line-oriented subset of YAML for tabular test data.
//!
//! ## What is a fixture?
//!
//! Rows of named or positional scalar values (strings, numbers, booleans,
//! nulls), stored in one of two dialects. The compact dialect puts one
//! bracketed row per line; the expanded dialect gives each row its own
//! YAML-style block. Either dialect can label its rows. Documents remain
//! valid YAML, but read and write in a single pass with constant memory.
//!
//! ## Key Features
//!
//! - **Streaming reads**: [`ReadHandle`] produces one row at a time and
//!   can rewind to the first data row without re-reading the header
//! - **Four write strategies**: compact and expanded, each plain or
//!   aligned, behind one [`WriteHandle`] trait
//! - **Adaptive writing**: [`SwitchingWriter`] buffers small documents for
//!   aligned, human-friendly output and switches to streaming compact
//!   output past a size threshold
//! - **Strict row shapes**: the column set is fixed by the first row;
//!   mismatched rows fail fast on both the read and write side
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! fixie = "0.1"
//! ```
//!
//! ### Writing and reading a document
//!
//! ```rust
//! use fixie::{read_str, row, write_str, OutputStyle};
//!
//! let rows = vec![
//!     row!({"name": "Hydrogen", "symbol": "H"}),
//!     row!({"name": "Helium", "symbol": "He"}),
//! ];
//!
//! let text = write_str(&rows, OutputStyle::Compact).unwrap();
//! assert_eq!(
//!     text,
//!     "columns: [name, symbol]\ndata: [\n[Hydrogen, H],\n[Helium, He],\n]\n"
//! );
//!
//! let back: Vec<_> = read_str(&text).unwrap();
//! assert_eq!(back.len(), 2);
//! assert_eq!(back[0].1, rows[0]);
//! ```
//!
//! ### Streaming row by row
//!
//! ```rust
//! use fixie::ReadHandle;
//! use std::io::Cursor;
//!
//! let doc = "- name: Hydrogen\n  symbol: H\n\n- name: Helium\n  symbol: He\n";
//! let mut handle = ReadHandle::from_stream(Cursor::new(doc));
//! while let Some((key, row)) = handle.next_row().unwrap() {
//!     println!("{}: {:?}", key, row);
//! }
//! handle.close().unwrap();
//! ```
//!
//! ## Row keys
//!
//! Reading yields `(Key, Row)` pairs. Unlabelled rows get zero-based
//! sequence numbers; labelled rows use their label verbatim:
//!
//! ```rust
//! use fixie::{read_str, Key};
//!
//! let doc = "data: {\nhydrogen: [Hydrogen, H],\nhelium: [Helium, He],\n}\n";
//! let rows = read_str(doc).unwrap();
//! assert_eq!(rows[0].0, Key::from("hydrogen"));
//! ```
//!
//! ## Format Specification
//!
//! See the [`format`] module for the full wire grammar.
//!
//! ## Examples
//!
//! Runnable programs live under `demos/`:
//!
//! - **`elements.rs`** - write and read back a small periodic table
//! - **`styles.rs`** - the same rows through every output style
//! - **`switching.rs`** - watching the adaptive writer switch strategies
//!
//! Run any of them with: `cargo run --example <name>`

pub mod error;
pub mod format;
mod handle;
pub mod macros;
pub mod reader;
pub mod row;
pub mod scalar;
pub mod value;
pub mod writer;

pub use error::{Cause, Error, Result, ScalarError};
pub use reader::ReadHandle;
pub use row::{ColumnSet, Key, Row};
pub use value::{Number, Value};
pub use writer::{
    AlignedCompactWriter, AlignedExpandedWriter, CompactWriter, ExpandedWriter, FixtureWriter,
    OutputStyle, SwitchingWriter, WriteHandle, DEFAULT_SWITCH_THRESHOLD,
};

use std::io::Cursor;
use std::path::Path;

/// Reads every row of a fixture document held in a string.
///
/// # Examples
///
/// ```rust
/// use fixie::{read_str, Key, Value};
///
/// let doc = "columns: [name, n]\ndata: [\n[H, 1],\n[He, 2],\n]\n";
/// let rows = read_str(doc).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].0, Key::Index(0));
/// assert_eq!(rows[1].1.get("name"), Some(&Value::from("He")));
/// ```
///
/// # Errors
///
/// Returns an error if the document is structurally invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_str(input: &str) -> Result<Vec<(Key, Row)>> {
    let mut handle = ReadHandle::from_stream(Cursor::new(input.as_bytes()));
    let rows = handle.read_all()?;
    handle.close()?;
    Ok(rows)
}

/// Reads every row of the fixture file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the document is
/// structurally invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_path(path: impl AsRef<Path>) -> Result<Vec<(Key, Row)>> {
    let mut handle = ReadHandle::open(path.as_ref());
    let rows = handle.read_all()?;
    handle.close()?;
    Ok(rows)
}

/// Writes rows to a string in the given output style.
///
/// # Examples
///
/// ```rust
/// use fixie::{row, write_str, OutputStyle};
///
/// let rows = vec![row!(["a", "b"]), row!(["c", "d"])];
/// let text = write_str(&rows, OutputStyle::Compact).unwrap();
/// assert_eq!(text, "data: [\n[a, b],\n[c, d],\n]\n");
/// ```
///
/// # Errors
///
/// Returns an error if a row cannot be projected onto the column set
/// fixed by the first row.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_str(rows: &[Row], style: OutputStyle) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer: Box<dyn WriteHandle + '_> = match style {
            OutputStyle::Compact => Box::new(CompactWriter::from_stream(&mut buffer)),
            OutputStyle::AlignedCompact => Box::new(AlignedCompactWriter::from_stream(&mut buffer)),
            OutputStyle::Expanded => Box::new(ExpandedWriter::from_stream(&mut buffer)),
            OutputStyle::AlignedExpanded => {
                Box::new(AlignedExpandedWriter::from_stream(&mut buffer))
            }
            OutputStyle::Switching => Box::new(SwitchingWriter::from_stream(&mut buffer)),
        };
        writer.write_all(rows)?;
        writer.close()?;
    }
    String::from_utf8(buffer)
        .map_err(|_| Error::write_structure(None, "rendered fixture text was not valid UTF-8"))
}

/// Writes rows to the file at `path` in the given output style.
///
/// # Errors
///
/// Returns an error if the file cannot be created, a write fails, or a
/// row cannot be projected onto the fixed column set.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_path(path: impl AsRef<Path>, rows: &[Row], style: OutputStyle) -> Result<()> {
    let mut handle = FixtureWriter::new(style).open_path(path.as_ref());
    handle.write_all(rows)?;
    handle.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_rows() -> Vec<Row> {
        vec![
            row!({"name": "H", "n": 1}),
            row!({"name": "He", "n": 2}),
        ]
    }

    #[test]
    fn round_trip_through_every_style() {
        let rows = element_rows();
        for style in [
            OutputStyle::Compact,
            OutputStyle::AlignedCompact,
            OutputStyle::Expanded,
            OutputStyle::AlignedExpanded,
            OutputStyle::Switching,
        ] {
            let text = write_str(&rows, style).unwrap();
            let back = read_str(&text).unwrap();
            assert_eq!(back.len(), rows.len(), "style {:?}", style);
            for (i, (key, row)) in back.iter().enumerate() {
                assert_eq!(*key, Key::Index(i as u64), "style {:?}", style);
                assert_eq!(*row, rows[i], "style {:?}", style);
            }
        }
    }

    #[test]
    fn aligned_compact_output_for_element_rows() {
        let text = write_str(&element_rows(), OutputStyle::AlignedCompact).unwrap();
        assert_eq!(
            text,
            "columns:\n [name, n]\ndata: [\n [H,    1],\n [He,   2],\n]\n"
        );
        let back = read_str(&text).unwrap();
        assert_eq!(back[0].1, element_rows()[0]);
        assert_eq!(back[1].1, element_rows()[1]);
    }

    #[test]
    fn positional_rows_write_without_a_columns_line() {
        let rows = vec![row!(["a", "b"]), row!(["c", "d"])];
        let text = write_str(&rows, OutputStyle::Compact).unwrap();
        assert_eq!(text, "data: [\n[a, b],\n[c, d],\n]\n");
        let back = read_str(&text).unwrap();
        assert_eq!(back[0].1, rows[0]);
        assert_eq!(back[1].1, rows[1]);
    }

    #[test]
    fn labelled_expanded_documents_read_back_with_labels() {
        let doc = "- x:\n    bar: 1\n    baz: 2\n\n- y:\n    bar: 3\n    baz: 4\n";
        let rows = read_str(doc).unwrap();
        assert_eq!(rows[0].0, Key::from("x"));
        assert_eq!(rows[1].0, Key::from("y"));
    }

    #[test]
    fn extra_value_in_a_compact_row_is_a_read_error() {
        let doc = "columns: [name, n]\ndata: [\n[H, 1],\n[He, 2, 3],\n]\n";
        assert!(matches!(read_str(doc), Err(Error::Read { .. })));
    }

    #[test]
    fn rewound_reads_are_idempotent() {
        let text = write_str(&element_rows(), OutputStyle::Switching).unwrap();
        let mut handle = ReadHandle::from_stream(Cursor::new(text.as_bytes()));
        let first = handle.read_all().unwrap();
        let second = handle.read_all().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn write_str_rejects_mismatched_rows() {
        let rows = vec![row!({"a": 1}), row!({"b": 2})];
        assert!(matches!(
            write_str(&rows, OutputStyle::Compact),
            Err(Error::Write { .. })
        ));
    }
}
