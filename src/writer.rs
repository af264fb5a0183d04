//! Fixture writing strategies.
//!
//! Four strategies emit rows behind the one [`WriteHandle`] contract:
//!
//! - [`CompactWriter`]: bracketed rows, one per line, fully streaming
//! - [`AlignedCompactWriter`]: buffers everything, pads values into
//!   vertical columns on close
//! - [`ExpandedWriter`]: one block per row, streaming
//! - [`AlignedExpandedWriter`]: expanded blocks with the value column
//!   aligned to the longest column name
//!
//! [`SwitchingWriter`] wraps the buffered aligned strategy and the
//! unbuffered compact strategy: small documents come out human-friendly
//! and aligned, and once the buffered data grows past a byte threshold it
//! switches — once, irreversibly — to streaming compact output.
//!
//! Every strategy fixes its column set from the first row it is given and
//! projects later rows onto it by name; a row whose key set differs is a
//! [`Error::Write`].
//!
//! ## Examples
//!
//! ```rust
//! use fixie::{row, CompactWriter, WriteHandle};
//!
//! let mut buffer = Vec::new();
//! let mut writer = CompactWriter::from_stream(&mut buffer);
//! writer.write(&row!({"name": "H", "n": 1})).unwrap();
//! writer.write(&row!({"name": "He", "n": 2})).unwrap();
//! writer.close().unwrap();
//!
//! let output = String::from_utf8(buffer).unwrap();
//! assert_eq!(output, "columns: [name, n]\ndata: [\n[H, 1],\n[He, 2],\n]\n");
//! ```

use crate::error::{Error, Result};
use crate::handle::{Handle, Mode};
use crate::row::{ColumnSet, Row};
use crate::scalar;
use crate::Value;
use std::fs::File;
use std::io::Write;
use std::mem;
use std::path::{Path, PathBuf};

/// The byte size at which a [`SwitchingWriter`] abandons buffered aligned
/// output for streaming compact output.
pub const DEFAULT_SWITCH_THRESHOLD: usize = 10 * 1024 * 1024;

/// The shared write contract: `write` rows one at a time, then `close`.
///
/// Closing is explicit and checked: a second `close()` fails with
/// [`Error::ClosedHandle`] rather than silently succeeding.
pub trait WriteHandle {
    /// Writes a single data row.
    fn write(&mut self, row: &Row) -> Result<()>;

    /// Writes a sequence of data rows, in order.
    fn write_all(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            self.write(row)?;
        }
        Ok(())
    }

    /// Closes this handle, emitting any pending footer or buffered data.
    fn close(&mut self) -> Result<()>;

    /// The filesystem path associated with this handle, if known.
    fn path(&self) -> Option<&Path>;

    /// Returns `true` if this handle has been closed.
    fn is_closed(&self) -> bool;
}

fn write_error(path: Option<&Path>, cause: crate::error::Cause) -> Error {
    Error::write(path, cause)
}

fn render_names(names: &[String]) -> Vec<String> {
    names.iter().map(|name| scalar::render_string(name)).collect()
}

fn code_points(s: &str) -> usize {
    s.chars().count()
}

// ---------------------------------------------------------------------------
// Compact
// ---------------------------------------------------------------------------

/// Writes rows in the compact style with minimal whitespace.
///
/// Excellent for any data size; fully streaming, nothing is buffered. The
/// header is emitted on the first write and the closing `]` on `close()`.
pub struct CompactWriter<S> {
    handle: Handle<S>,
    columns: Option<ColumnSet>,
}

impl CompactWriter<File> {
    /// Creates a writer that lazily creates the file at `path` on the
    /// first write.
    #[must_use]
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_path(path.into(), Mode::Write))
    }

    /// Creates a writer from an optional stream and an optional path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHandle`] when given neither.
    pub fn new(stream: Option<File>, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::from_handle(Handle::from_parts(
            stream,
            path,
            Mode::Write,
        )?))
    }
}

impl<S: Write> CompactWriter<S> {
    /// Creates a writer over a live stream with no associated path.
    #[must_use]
    pub fn from_stream(stream: S) -> Self {
        Self::from_handle(Handle::from_stream(stream, None, Mode::Write))
    }

    /// Creates a writer over a live stream, recording the path it came
    /// from for error messages.
    #[must_use]
    pub fn from_stream_with_path(stream: S, path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_stream(stream, Some(path.into()), Mode::Write))
    }

    pub(crate) fn from_handle(handle: Handle<S>) -> Self {
        CompactWriter {
            handle,
            columns: None,
        }
    }
}

impl<S: Write> WriteHandle for CompactWriter<S> {
    fn write(&mut self, row: &Row) -> Result<()> {
        if self.columns.is_none() {
            let columns = ColumnSet::of_row(row);
            if let ColumnSet::Named(names) = &columns {
                let header = format!("columns: [{}]\n", render_names(names).join(", "));
                self.handle.write_str(&header)?;
            }
            self.handle.write_str("data: [\n")?;
            self.columns = Some(columns);
        }
        let columns = self.columns.as_ref().expect("fixed on first write");
        let values = columns
            .project(row)
            .map_err(|cause| write_error(self.handle.path(), cause))?;
        let line = format!("{},\n", scalar::render_sequence(values));
        self.handle.write_str(&line)
    }

    fn close(&mut self) -> Result<()> {
        if !self.handle.is_closed() && self.columns.is_some() {
            self.handle.write_str("]\n")?;
            self.handle.flush()?;
        }
        self.handle.close()
    }

    fn path(&self) -> Option<&Path> {
        self.handle.path()
    }

    fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }
}

// ---------------------------------------------------------------------------
// Aligned compact
// ---------------------------------------------------------------------------

/// Writes rows in the compact style with header and values vertically
/// aligned.
///
/// Very readable, but the whole document is buffered in memory until
/// `close()`, so it suits data whose maximum size is known. For unbounded
/// data use [`SwitchingWriter`] instead.
pub struct AlignedCompactWriter<S> {
    handle: Handle<S>,
    columns: Option<ColumnSet>,
    rendered_names: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl AlignedCompactWriter<File> {
    /// Creates a writer that lazily creates the file at `path`.
    #[must_use]
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_path(path.into(), Mode::Write))
    }

    /// Creates a writer from an optional stream and an optional path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHandle`] when given neither.
    pub fn new(stream: Option<File>, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::from_handle(Handle::from_parts(
            stream,
            path,
            Mode::Write,
        )?))
    }
}

impl<S: Write> AlignedCompactWriter<S> {
    /// Creates a writer over a live stream with no associated path.
    #[must_use]
    pub fn from_stream(stream: S) -> Self {
        Self::from_handle(Handle::from_stream(stream, None, Mode::Write))
    }

    /// Creates a writer over a live stream, recording the path it came
    /// from for error messages.
    #[must_use]
    pub fn from_stream_with_path(stream: S, path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_stream(stream, Some(path.into()), Mode::Write))
    }

    pub(crate) fn from_handle(handle: Handle<S>) -> Self {
        AlignedCompactWriter {
            handle,
            columns: None,
            rendered_names: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Renders the buffered document with aligned columns. Emits nothing
    /// at all when no rows were written.
    fn write_aligned(&mut self) -> Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let named = matches!(self.columns, Some(ColumnSet::Named(_)));
        let arity = self.columns.as_ref().map_or(0, ColumnSet::len);
        let mut widths = vec![0usize; arity];
        if named {
            widen(&mut widths, &self.rendered_names);
        }
        for row in &self.rows {
            widen(&mut widths, row);
        }

        if named {
            let header = format!("columns:\n {}\n", aligned_row(&widths, &self.rendered_names));
            self.handle.write_str(&header)?;
        }
        self.handle.write_str("data: [\n")?;
        let indent = if named { " " } else { "" };
        for row in &self.rows {
            let line = format!("{}{},\n", indent, aligned_row(&widths, row));
            self.handle.write_str(&line)?;
        }
        self.handle.write_str("]\n")
    }
}

impl<S: Write> WriteHandle for AlignedCompactWriter<S> {
    fn write(&mut self, row: &Row) -> Result<()> {
        if self.columns.is_none() {
            let columns = ColumnSet::of_row(row);
            if let ColumnSet::Named(names) = &columns {
                self.rendered_names = render_names(names);
            }
            self.columns = Some(columns);
        }
        let columns = self.columns.as_ref().expect("fixed on first write");
        let values = columns
            .project(row)
            .map_err(|cause| write_error(self.handle.path(), cause))?;
        self.rows
            .push(values.into_iter().map(scalar::render).collect());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.handle.is_closed() {
            self.write_aligned()?;
            self.handle.flush()?;
        }
        self.handle.close()
    }

    fn path(&self) -> Option<&Path> {
        self.handle.path()
    }

    fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }
}

/// Grows per-column widths to cover the rendered cells of one row.
/// Widths are measured in Unicode code points, not bytes.
fn widen(widths: &mut [usize], cells: &[String]) {
    for (i, cell) in cells.iter().enumerate() {
        if let Some(width) = widths.get_mut(i) {
            let len = code_points(cell);
            if len > *width {
                *width = len;
            }
        }
    }
}

fn aligned_row(widths: &[usize], cells: &[String]) -> String {
    let last = cells.len().saturating_sub(1);
    let mut columns = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let len = code_points(cell);
        let width = widths.get(i).copied().unwrap_or(len);
        let separator = if i < last { "," } else { "" };
        columns.push(format!("{}{}{}", cell, separator, " ".repeat(width - len)));
    }
    format!("[{}]", columns.join(" "))
}

// ---------------------------------------------------------------------------
// Expanded
// ---------------------------------------------------------------------------

/// Writes rows in the expanded style, one block per row, without aligning
/// values.
///
/// Streams row by row; useful when the output should resemble what a
/// typical YAML renderer produces.
pub struct ExpandedWriter<S> {
    handle: Handle<S>,
    columns: Option<ColumnSet>,
    rendered_names: Vec<String>,
    first_row: bool,
}

impl ExpandedWriter<File> {
    /// Creates a writer that lazily creates the file at `path`.
    #[must_use]
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_path(path.into(), Mode::Write))
    }

    /// Creates a writer from an optional stream and an optional path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHandle`] when given neither.
    pub fn new(stream: Option<File>, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::from_handle(Handle::from_parts(
            stream,
            path,
            Mode::Write,
        )?))
    }
}

impl<S: Write> ExpandedWriter<S> {
    /// Creates a writer over a live stream with no associated path.
    #[must_use]
    pub fn from_stream(stream: S) -> Self {
        Self::from_handle(Handle::from_stream(stream, None, Mode::Write))
    }

    /// Creates a writer over a live stream, recording the path it came
    /// from for error messages.
    #[must_use]
    pub fn from_stream_with_path(stream: S, path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_stream(stream, Some(path.into()), Mode::Write))
    }

    fn from_handle(handle: Handle<S>) -> Self {
        ExpandedWriter {
            handle,
            columns: None,
            rendered_names: Vec::new(),
            first_row: true,
        }
    }
}

impl<S: Write> WriteHandle for ExpandedWriter<S> {
    fn write(&mut self, row: &Row) -> Result<()> {
        if self.columns.is_none() {
            let columns = ColumnSet::of_row(row);
            if let ColumnSet::Named(names) = &columns {
                self.rendered_names = render_names(names);
            }
            self.columns = Some(columns);
        }
        let columns = self.columns.as_ref().expect("fixed on first write");
        let values = columns
            .project(row)
            .map_err(|cause| write_error(self.handle.path(), cause))?;

        let mut lines = Vec::with_capacity(values.len() + 1);
        match columns {
            ColumnSet::Positional(_) => {
                lines.push("-".to_string());
                for value in &values {
                    lines.push(format!("  - {}", scalar::render(value)));
                }
            }
            ColumnSet::Named(_) => {
                for (i, name) in self.rendered_names.iter().enumerate() {
                    let prefix = if i == 0 { '-' } else { ' ' };
                    lines.push(format!("{} {}: {}", prefix, name, scalar::render(values[i])));
                }
            }
        }

        let separator = if self.first_row { "" } else { "\n" };
        let block = format!("{}{}\n", separator, lines.join("\n"));
        self.handle.write_str(&block)?;
        self.first_row = false;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.handle.flush()?;
        self.handle.close()
    }

    fn path(&self) -> Option<&Path> {
        self.handle.path()
    }

    fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }
}

// ---------------------------------------------------------------------------
// Aligned expanded
// ---------------------------------------------------------------------------

/// Writes rows in the expanded style with all values starting in the same
/// character column.
///
/// Streams row by row like [`ExpandedWriter`]; the alignment width is the
/// longest rendered column name, fixed at the first row.
pub struct AlignedExpandedWriter<S> {
    handle: Handle<S>,
    columns: Option<ColumnSet>,
    rendered_names: Vec<String>,
    name_width: usize,
    first_row: bool,
}

impl AlignedExpandedWriter<File> {
    /// Creates a writer that lazily creates the file at `path`.
    #[must_use]
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_path(path.into(), Mode::Write))
    }

    /// Creates a writer from an optional stream and an optional path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHandle`] when given neither.
    pub fn new(stream: Option<File>, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::from_handle(Handle::from_parts(
            stream,
            path,
            Mode::Write,
        )?))
    }
}

impl<S: Write> AlignedExpandedWriter<S> {
    /// Creates a writer over a live stream with no associated path.
    #[must_use]
    pub fn from_stream(stream: S) -> Self {
        Self::from_handle(Handle::from_stream(stream, None, Mode::Write))
    }

    /// Creates a writer over a live stream, recording the path it came
    /// from for error messages.
    #[must_use]
    pub fn from_stream_with_path(stream: S, path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_stream(stream, Some(path.into()), Mode::Write))
    }

    fn from_handle(handle: Handle<S>) -> Self {
        AlignedExpandedWriter {
            handle,
            columns: None,
            rendered_names: Vec::new(),
            name_width: 0,
            first_row: true,
        }
    }
}

impl<S: Write> WriteHandle for AlignedExpandedWriter<S> {
    fn write(&mut self, row: &Row) -> Result<()> {
        if self.columns.is_none() {
            let columns = ColumnSet::of_row(row);
            if let ColumnSet::Named(names) = &columns {
                self.rendered_names = render_names(names);
                self.name_width = self
                    .rendered_names
                    .iter()
                    .map(|name| code_points(name))
                    .max()
                    .unwrap_or(0);
            }
            self.columns = Some(columns);
        }
        let columns = self.columns.as_ref().expect("fixed on first write");
        let values = columns
            .project(row)
            .map_err(|cause| write_error(self.handle.path(), cause))?;

        let mut lines = Vec::with_capacity(values.len() + 1);
        match columns {
            ColumnSet::Positional(_) => {
                lines.push("-".to_string());
                for value in &values {
                    lines.push(format!("  - {}", scalar::render(value)));
                }
            }
            ColumnSet::Named(_) => {
                for (i, name) in self.rendered_names.iter().enumerate() {
                    let prefix = if i == 0 { '-' } else { ' ' };
                    let padding = " ".repeat(self.name_width - code_points(name));
                    lines.push(format!(
                        "{} {}:{} {}",
                        prefix,
                        name,
                        padding,
                        scalar::render(values[i])
                    ));
                }
            }
        }

        let separator = if self.first_row { "" } else { "\n" };
        let block = format!("{}{}\n", separator, lines.join("\n"));
        self.handle.write_str(&block)?;
        self.first_row = false;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.handle.flush()?;
        self.handle.close()
    }

    fn path(&self) -> Option<&Path> {
        self.handle.path()
    }

    fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }
}

// ---------------------------------------------------------------------------
// Switching
// ---------------------------------------------------------------------------

enum State<S> {
    Buffering {
        handle: Handle<S>,
        rows: Vec<Row>,
        approx_size: usize,
    },
    Streaming(CompactWriter<S>),
    Closed {
        path: Option<PathBuf>,
    },
}

/// Buffers rows up to a byte threshold, then switches to streaming
/// compact output.
///
/// Documents that stay under the threshold come out through
/// [`AlignedCompactWriter`] on close, giving human-friendly aligned text;
/// once the accumulated (approximate) size strictly exceeds the
/// threshold, all buffered rows are flushed through a [`CompactWriter`]
/// and every later row streams straight through. The transition is
/// one-way.
///
/// # Examples
///
/// ```rust
/// use fixie::{row, SwitchingWriter, WriteHandle};
///
/// let mut buffer = Vec::new();
/// let mut writer = SwitchingWriter::from_stream(&mut buffer).with_threshold(64);
/// writer.write(&row!({"name": "H"})).unwrap();
/// writer.close().unwrap();
///
/// // small document: aligned output
/// let output = String::from_utf8(buffer).unwrap();
/// assert!(output.starts_with("columns:\n"));
/// ```
pub struct SwitchingWriter<S> {
    state: State<S>,
    threshold: usize,
    data_written: bool,
}

impl SwitchingWriter<File> {
    /// Creates a writer that lazily creates the file at `path`.
    #[must_use]
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_path(path.into(), Mode::Write))
    }

    /// Creates a writer from an optional stream and an optional path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHandle`] when given neither.
    pub fn new(stream: Option<File>, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::from_handle(Handle::from_parts(
            stream,
            path,
            Mode::Write,
        )?))
    }
}

impl<S: Write> SwitchingWriter<S> {
    /// Creates a writer over a live stream with no associated path.
    #[must_use]
    pub fn from_stream(stream: S) -> Self {
        Self::from_handle(Handle::from_stream(stream, None, Mode::Write))
    }

    /// Creates a writer over a live stream, recording the path it came
    /// from for error messages.
    #[must_use]
    pub fn from_stream_with_path(stream: S, path: impl Into<PathBuf>) -> Self {
        Self::from_handle(Handle::from_stream(stream, Some(path.into()), Mode::Write))
    }

    fn from_handle(handle: Handle<S>) -> Self {
        SwitchingWriter {
            state: State::Buffering {
                handle,
                rows: Vec::new(),
                approx_size: 0,
            },
            threshold: DEFAULT_SWITCH_THRESHOLD,
            data_written: false,
        }
    }

    /// Sets the byte size at which output switches from aligned to
    /// compact. Defaults to [`DEFAULT_SWITCH_THRESHOLD`].
    #[must_use]
    pub fn with_threshold(mut self, bytes: usize) -> Self {
        self.threshold = bytes;
        self
    }

    /// The configured switching threshold in bytes.
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    fn switch_to_streaming(&mut self) -> Result<()> {
        let path = self.path().map(Path::to_path_buf);
        let state = mem::replace(&mut self.state, State::Closed { path });
        let State::Buffering { handle, rows, .. } = state else {
            unreachable!("the switch only ever happens while buffering");
        };
        let mut inner = CompactWriter::from_handle(handle);
        let result = inner.write_all(&rows);
        self.state = State::Streaming(inner);
        result
    }
}

impl<S: Write> WriteHandle for SwitchingWriter<S> {
    fn write(&mut self, row: &Row) -> Result<()> {
        match &mut self.state {
            State::Streaming(inner) => {
                self.data_written = true;
                return inner.write(row);
            }
            State::Closed { path } => return Err(Error::closed(path.as_deref())),
            State::Buffering {
                rows, approx_size, ..
            } => {
                self.data_written = true;
                *approx_size += approx_row_size(row);
                rows.push(row.clone());
                if *approx_size <= self.threshold {
                    return Ok(());
                }
            }
        }
        self.switch_to_streaming()
    }

    fn close(&mut self) -> Result<()> {
        let path = self.path().map(Path::to_path_buf);
        match mem::replace(&mut self.state, State::Closed { path }) {
            State::Closed { path } => Err(Error::closed(path.as_deref())),
            State::Streaming(mut inner) => inner.close(),
            State::Buffering { handle, rows, .. } => {
                if self.data_written {
                    let mut inner = AlignedCompactWriter::from_handle(handle);
                    inner.write_all(&rows)?;
                    inner.close()
                } else {
                    let mut handle = handle;
                    handle.close()
                }
            }
        }
    }

    fn path(&self) -> Option<&Path> {
        match &self.state {
            State::Buffering { handle, .. } => handle.path(),
            State::Streaming(inner) => inner.path(),
            State::Closed { path } => path.as_deref(),
        }
    }

    fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed { .. })
    }
}

/// Cheap approximation of a row's serialized size: the length of the raw
/// values joined as `[v1, v2, …]`, without rendering or quoting. Kept
/// deliberately approximate; the switch threshold does not need exact
/// byte counts.
fn approx_row_size(row: &Row) -> usize {
    let mut size = 2;
    for (i, value) in row.values().enumerate() {
        if i > 0 {
            size += 2;
        }
        size += approx_value_size(value);
    }
    size
}

fn approx_value_size(value: &Value) -> usize {
    match value {
        Value::Null => 0,
        Value::Bool(true) => 1,
        Value::Bool(false) => 0,
        Value::Number(n) => n.to_string().len(),
        Value::String(s) => s.len(),
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Which write strategy a [`FixtureWriter`] hands out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputStyle {
    Compact,
    AlignedCompact,
    Expanded,
    AlignedExpanded,
    #[default]
    Switching,
}

/// Creates write handles of a configured style.
///
/// # Examples
///
/// ```rust
/// use fixie::{FixtureWriter, OutputStyle};
///
/// let writer = FixtureWriter::new(OutputStyle::Compact);
/// assert_eq!(writer.style(), OutputStyle::Compact);
/// ```
#[derive(Clone, Debug)]
pub struct FixtureWriter {
    style: OutputStyle,
    threshold: usize,
}

impl FixtureWriter {
    /// Creates a factory for the given output style.
    #[must_use]
    pub fn new(style: OutputStyle) -> Self {
        FixtureWriter {
            style,
            threshold: DEFAULT_SWITCH_THRESHOLD,
        }
    }

    /// Sets the switching threshold used by [`OutputStyle::Switching`]
    /// handles.
    #[must_use]
    pub fn with_threshold(mut self, bytes: usize) -> Self {
        self.threshold = bytes;
        self
    }

    /// The configured output style.
    #[must_use]
    pub const fn style(&self) -> OutputStyle {
        self.style
    }

    /// Creates a write handle that lazily creates the file at `path`.
    #[must_use]
    pub fn open_path(&self, path: impl Into<PathBuf>) -> Box<dyn WriteHandle> {
        let path = path.into();
        match self.style {
            OutputStyle::Compact => Box::new(CompactWriter::create(path)),
            OutputStyle::AlignedCompact => Box::new(AlignedCompactWriter::create(path)),
            OutputStyle::Expanded => Box::new(ExpandedWriter::create(path)),
            OutputStyle::AlignedExpanded => Box::new(AlignedExpandedWriter::create(path)),
            OutputStyle::Switching => {
                Box::new(SwitchingWriter::create(path).with_threshold(self.threshold))
            }
        }
    }

    /// Creates a write handle over a live stream.
    #[must_use]
    pub fn from_stream<W: Write + 'static>(&self, stream: W) -> Box<dyn WriteHandle> {
        match self.style {
            OutputStyle::Compact => Box::new(CompactWriter::from_stream(stream)),
            OutputStyle::AlignedCompact => Box::new(AlignedCompactWriter::from_stream(stream)),
            OutputStyle::Expanded => Box::new(ExpandedWriter::from_stream(stream)),
            OutputStyle::AlignedExpanded => Box::new(AlignedExpandedWriter::from_stream(stream)),
            OutputStyle::Switching => {
                Box::new(SwitchingWriter::from_stream(stream).with_threshold(self.threshold))
            }
        }
    }
}

impl Default for FixtureWriter {
    fn default() -> Self {
        Self::new(OutputStyle::default())
    }
}
