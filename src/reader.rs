//! Streaming fixture reading.
//!
//! [`ReadHandle`] pulls lines from its stream, detects the document's
//! dialect from the first significant line, fixes the column set, and then
//! produces one `(Key, Row)` pair at a time. It never buffers more than a
//! single row, so arbitrarily large documents read in constant memory.
//!
//! ## Dialect detection
//!
//! The first non-blank, non-comment line decides everything:
//!
//! - `columns:` starts a column declaration (possibly spanning lines) that
//!   must be followed by a `data: [` or `data: {` block opener
//! - a line that is `-` or begins `- ` starts an expanded document
//! - a bare `data: [` / `data: {` opener starts a compact document whose
//!   columns are inferred from the first data row
//! - anything else is a hard parse error
//!
//! ## Examples
//!
//! ```rust
//! use fixie::{Key, ReadHandle, Value};
//! use std::io::Cursor;
//!
//! let doc = "columns: [name, n]\ndata: [\n[H, 1],\n[He, 2],\n]\n";
//! let mut handle = ReadHandle::from_stream(Cursor::new(doc));
//!
//! let (key, row) = handle.next_row().unwrap().unwrap();
//! assert_eq!(key, Key::Index(0));
//! assert_eq!(row.get("name"), Some(&Value::from("H")));
//!
//! handle.rewind().unwrap();
//! let all = handle.read_all().unwrap();
//! assert_eq!(all.len(), 2);
//! handle.close().unwrap();
//! ```

use crate::error::{Error, Result, ScalarError};
use crate::handle::{Handle, Mode};
use crate::row::{ColumnSet, Key, Row};
use crate::scalar::{self, RowFragment};
use crate::Value;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::{Path, PathBuf};

const COLUMNS_PREFIX: &str = "columns:";
const DATA_OPEN_SEQ: &str = "data: [";
const DATA_OPEN_MAP: &str = "data: {";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dialect {
    Compact,
    Expanded,
}

/// A parsed row before key assignment: the optional label plus the row.
type RawRow = Option<(Option<String>, Row)>;

/// A readable fixture handle.
///
/// Produces rows in document order via [`next_row`](ReadHandle::next_row)
/// or the [`Iterator`] implementation; [`rewind`](ReadHandle::rewind)
/// restarts at the first data row without re-reading the header.
pub struct ReadHandle<S> {
    handle: Handle<S>,
    columns: Option<ColumnSet>,
    dialect: Option<Dialect>,
    rewind_offset: u64,
    /// Expanded parsing is one line ahead: the next block's opening line.
    pending_line: Option<String>,
    exhausted: bool,
    sequence: u64,
}

impl ReadHandle<BufReader<File>> {
    /// Creates a handle that lazily opens the file at `path` on first read.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_handle(Handle::from_path(path.into(), Mode::Read))
    }

    /// Creates a handle from an optional stream and an optional path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHandle`] when given neither.
    pub fn new(stream: Option<BufReader<File>>, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::with_handle(Handle::from_parts(
            stream,
            path,
            Mode::Read,
        )?))
    }
}

impl<S: BufRead + Seek> ReadHandle<S> {
    /// Creates a handle over a live stream with no associated path.
    #[must_use]
    pub fn from_stream(stream: S) -> Self {
        Self::with_handle(Handle::from_stream(stream, None, Mode::Read))
    }

    /// Creates a handle over a live stream, recording the path it came
    /// from for error messages.
    #[must_use]
    pub fn from_stream_with_path(stream: S, path: impl Into<PathBuf>) -> Self {
        Self::with_handle(Handle::from_stream(stream, Some(path.into()), Mode::Read))
    }

    fn with_handle(handle: Handle<S>) -> Self {
        ReadHandle {
            handle,
            columns: None,
            dialect: None,
            rewind_offset: 0,
            pending_line: None,
            exhausted: false,
            sequence: 0,
        }
    }

    /// The filesystem path associated with this handle, if known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.handle.path()
    }

    /// Returns `true` if this handle has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }

    /// The column set fixed by the header or first row, once one has been
    /// read.
    #[must_use]
    pub fn columns(&self) -> Option<&ColumnSet> {
        self.columns.as_ref()
    }

    /// Closes this handle. A second close fails with
    /// [`Error::ClosedHandle`].
    pub fn close(&mut self) -> Result<()> {
        self.handle.close()
    }

    /// Reads the next data row, or `None` at the end of the document.
    ///
    /// Keys are zero-based sequence numbers unless the row carries a
    /// label, in which case the label is used verbatim.
    ///
    /// # Errors
    ///
    /// Any structural violation or I/O failure is an [`Error::Read`]; the
    /// document is considered corrupt from that point.
    pub fn next_row(&mut self) -> Result<Option<(Key, Row)>> {
        if self.exhausted {
            return Ok(None);
        }
        let parsed = if self.columns.is_none() {
            self.parse_first_row()?
        } else {
            self.parse_next_row()?
        };
        match parsed {
            None => {
                self.exhausted = true;
                Ok(None)
            }
            Some((label, row)) => {
                let key = match label {
                    Some(label) => Key::Label(label),
                    None => {
                        let key = Key::Index(self.sequence);
                        self.sequence += 1;
                        key
                    }
                };
                Ok(Some((key, row)))
            }
        }
    }

    /// Rewinds this handle to the first data row.
    ///
    /// The header, if any, is not re-read; the column set survives.
    pub fn rewind(&mut self) -> Result<()> {
        self.handle.seek_to(self.rewind_offset)?;
        self.exhausted = false;
        self.sequence = 0;
        self.pending_line = None;
        // expanded parsing keeps one line of lookahead, so prime it
        if self.dialect == Some(Dialect::Expanded) {
            self.pending_line = self.handle.read_line()?;
        }
        Ok(())
    }

    /// Rewinds, then reads every remaining row into a vector.
    pub fn read_all(&mut self) -> Result<Vec<(Key, Row)>> {
        self.rewind()?;
        let mut rows = Vec::new();
        while let Some(entry) = self.next_row()? {
            rows.push(entry);
        }
        Ok(rows)
    }

    fn parse_first_row(&mut self) -> Result<RawRow> {
        let Some(line) = self.read_significant_line()? else {
            return Ok(None);
        };
        self.rewind_offset = self.handle.position()? - line.len() as u64;

        if line.starts_with(COLUMNS_PREFIX) {
            self.parse_header(line)?;
            self.rewind_offset = self.handle.position()?;
            return self.parse_next_compact_row();
        }

        if is_expanded_start(&line) {
            self.dialect = Some(Dialect::Expanded);
            self.pending_line = Some(line);
            let block = self
                .read_expanded_block()?
                .expect("a pending line was just set");
            let (label, row) = self.parse_expanded_block(&block)?;
            self.columns = Some(ColumnSet::of_row(&row));
            return Ok(Some((label, row)));
        }

        let trimmed = line.trim();
        if trimmed == DATA_OPEN_SEQ || trimmed == DATA_OPEN_MAP {
            self.dialect = Some(Dialect::Compact);
            self.rewind_offset = self.handle.position()?;
            let Some(row_line) = self.read_significant_line()? else {
                return Err(self.structure_error("unexpected end of stream inside the data block"));
            };
            let row_trimmed = row_line.trim();
            if row_trimmed == "]" || row_trimmed == "}" {
                self.columns = Some(ColumnSet::Positional(0));
                return Ok(None);
            }
            let (label, values) = self.parse_compact_row_line(&row_line)?;
            self.columns = Some(ColumnSet::Positional(values.len()));
            return Ok(Some((label, Row::Positional(values))));
        }

        Err(self.structure_error("unrecognized fixture header"))
    }

    /// Accumulates the column declaration lines up to the data-block
    /// opener and fixes the named column set from them.
    fn parse_header(&mut self, first_line: String) -> Result<()> {
        self.dialect = Some(Dialect::Compact);
        let mut header = first_line;
        loop {
            let Some(line) = self.read_significant_line()? else {
                return Err(
                    self.structure_error("missing data block after the column declaration")
                );
            };
            match line.trim() {
                DATA_OPEN_SEQ | DATA_OPEN_MAP => break,
                _ => header.push_str(&line),
            }
        }
        let names = scalar::parse_columns_header(&header).map_err(|e| self.parse_error(e))?;
        self.columns = Some(ColumnSet::Named(names));
        Ok(())
    }

    fn parse_next_row(&mut self) -> Result<RawRow> {
        match self.dialect {
            Some(Dialect::Expanded) => self.parse_next_expanded_row(),
            _ => self.parse_next_compact_row(),
        }
    }

    fn parse_next_compact_row(&mut self) -> Result<RawRow> {
        let Some(line) = self.read_significant_line()? else {
            return Err(self.structure_error("unexpected end of stream inside the data block"));
        };
        let trimmed = line.trim();
        if trimmed == "]" || trimmed == "}" {
            return Ok(None);
        }
        let (label, values) = self.parse_compact_row_line(&line)?;
        let columns = self
            .columns
            .as_ref()
            .expect("the column set is fixed before subsequent rows");
        let row = columns.assemble(values).ok_or_else(|| {
            Error::read_structure(
                self.handle.path(),
                "row does not match the declared column count",
            )
        })?;
        Ok(Some((label, row)))
    }

    fn parse_compact_row_line(&self, line: &str) -> Result<(Option<String>, Vec<Value>)> {
        let body = line.trim_end();
        let Some(fragment) = body.strip_suffix(',') else {
            return Err(self.structure_error("compact row is not terminated by ','"));
        };
        match scalar::parse_row_fragment(fragment).map_err(|e| self.parse_error(e))? {
            RowFragment::Sequence(values) => Ok((None, values)),
            RowFragment::Labelled(label, values) => Ok((Some(label), values)),
        }
    }

    fn parse_next_expanded_row(&mut self) -> Result<RawRow> {
        let Some(block) = self.read_expanded_block()? else {
            return Ok(None);
        };
        let (label, row) = self.parse_expanded_block(&block)?;
        let columns = self
            .columns
            .as_ref()
            .expect("the column set is fixed before subsequent rows");
        if !columns.matches(&row) {
            return Err(self.structure_error("row shape does not match the fixed column set"));
        }
        Ok(Some((label, row)))
    }

    /// Reads all raw lines of one expanded block, leaving the next block's
    /// opening line in `pending_line`.
    fn read_expanded_block(&mut self) -> Result<Option<Vec<String>>> {
        let Some(first) = self.pending_line.take() else {
            return Ok(None);
        };
        let mut lines = vec![first];
        loop {
            match self.handle.read_line()? {
                None => break,
                Some(line) if is_expanded_start(&line) => {
                    self.pending_line = Some(line);
                    break;
                }
                Some(line) => lines.push(line),
            }
        }
        Ok(Some(lines))
    }

    /// Parses one expanded block into its optional label and row.
    ///
    /// A block whose single top-level entry holds a nested mapping or
    /// sequence is a labelled row; the entry key becomes the label and the
    /// nested content becomes the row.
    fn parse_expanded_block(&self, lines: &[String]) -> Result<(Option<String>, Row)> {
        let mut items: Vec<(usize, &str)> = Vec::new();
        for line in lines {
            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            let indent = line.len() - line.trim_start().len();
            items.push((indent, content));
        }
        let Some(&(_, first)) = items.first() else {
            return Err(self.structure_error("empty expanded row block"));
        };

        if first == "-" {
            let mut values = Vec::new();
            for &(_, content) in &items[1..] {
                values.push(self.parse_seq_item(content)?);
            }
            return Ok((None, Row::Positional(values)));
        }

        let Some(rest) = first.strip_prefix("- ") else {
            return Err(self.structure_error("expanded row must begin with '-'"));
        };

        enum PairValue {
            Inline(String),
            Nested(Vec<(usize, String)>),
        }

        let (key, value) = self.split_entry(rest)?;
        let mut pairs: Vec<(String, PairValue)> = vec![(key, PairValue::Inline(value))];

        // entries of the row align two columns in, under the first key;
        // anything deeper belongs to the previous (value-less) entry
        for &(indent, content) in &items[1..] {
            if indent == 2 {
                let (key, value) = self.split_entry(content)?;
                pairs.push((key, PairValue::Inline(value)));
            } else if indent > 2 {
                let last = &mut pairs
                    .last_mut()
                    .expect("at least one entry precedes any nested line")
                    .1;
                if matches!(last, PairValue::Inline(value) if value.is_empty()) {
                    *last = PairValue::Nested(Vec::new());
                }
                match last {
                    PairValue::Nested(nested) => nested.push((indent, content.to_string())),
                    PairValue::Inline(_) => {
                        return Err(
                            self.structure_error("nested values are not supported in rows")
                        );
                    }
                }
            } else {
                return Err(self.structure_error("misaligned line in expanded row"));
            }
        }

        if pairs.len() == 1 && matches!(pairs[0].1, PairValue::Nested(_)) {
            let (label, value) = pairs.pop().expect("exactly one entry");
            let PairValue::Nested(nested) = value else {
                unreachable!("checked above");
            };
            let row = self.parse_nested_content(&nested)?;
            return Ok((Some(label), row));
        }

        let mut map = IndexMap::new();
        for (key, value) in pairs {
            match value {
                PairValue::Inline(text) => {
                    map.insert(key, self.parse_value(&text)?);
                }
                PairValue::Nested(_) => {
                    return Err(self.structure_error("nested values are not supported in rows"));
                }
            }
        }
        Ok((None, Row::Named(map)))
    }

    /// Parses the nested content of a labelled row: either a sequence of
    /// `- value` items or a mapping of `name: value` entries, all at one
    /// indent level.
    fn parse_nested_content(&self, nested: &[(usize, String)]) -> Result<Row> {
        let base = nested[0].0;
        let first = nested[0].1.as_str();
        if first == "-" || first.starts_with("- ") {
            let mut values = Vec::new();
            for (indent, content) in nested {
                if *indent != base {
                    return Err(self.structure_error("misaligned line in expanded row"));
                }
                values.push(self.parse_seq_item(content)?);
            }
            Ok(Row::Positional(values))
        } else {
            let mut map = IndexMap::new();
            for (indent, content) in nested {
                if *indent != base {
                    return Err(self.structure_error("misaligned line in expanded row"));
                }
                let (key, value) = self.split_entry(content)?;
                map.insert(key, self.parse_value(&value)?);
            }
            Ok(Row::Named(map))
        }
    }

    fn parse_seq_item(&self, content: &str) -> Result<Value> {
        if content == "-" {
            return Ok(Value::Null);
        }
        let Some(text) = content.strip_prefix("- ") else {
            return Err(self.structure_error("expected a '- ' sequence item in expanded row"));
        };
        self.parse_value(text)
    }

    fn parse_value(&self, text: &str) -> Result<Value> {
        scalar::parse(text).map_err(|e| self.parse_error(e))
    }

    fn split_entry(&self, text: &str) -> Result<(String, String)> {
        scalar::split_entry(text).map_err(|e| self.parse_error(e))
    }

    /// Reads the next line that is neither blank nor a comment.
    fn read_significant_line(&mut self) -> Result<Option<String>> {
        loop {
            let Some(line) = self.handle.read_line()? else {
                return Ok(None);
            };
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                return Ok(Some(line));
            }
        }
    }

    fn structure_error(&self, message: &str) -> Error {
        Error::read_structure(self.handle.path(), message)
    }

    fn parse_error(&self, cause: ScalarError) -> Error {
        Error::read(self.handle.path(), cause)
    }
}

impl<S: BufRead + Seek> Iterator for ReadHandle<S> {
    type Item = Result<(Key, Row)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

/// Returns `true` if a raw line opens an expanded row block.
fn is_expanded_start(line: &str) -> bool {
    line.trim_end() == "-" || line.starts_with("- ")
}
