//! The Fixie Fixture Format
//!
//! This module documents the line-oriented text format read and written by
//! this library.
//!
//! # Overview
//!
//! A fixture document stores tabular test data: rows of named or
//! positional scalar values. The grammar is a small, restricted subset of
//! YAML, chosen so documents stay valid YAML while remaining parseable
//! one line at a time with constant memory.
//!
//! Two dialects exist, each optionally row-labelled. A reader detects the
//! dialect from the first significant line; a writer is constructed for
//! one dialect.
//!
//! # Compact dialect
//!
//! One bracketed row per line inside a `data:` block:
//!
//! ```text
//! columns:
//!  [name,     symbol, number, weight,   metallic]
//! data: [
//!  [Hydrogen, H,      1,      1.00794,  false],
//!  [Helium,   He,     2,      4.002602, false],
//! ]
//! ```
//!
//! **Rules**:
//! - The optional `columns:` declaration names the columns; it may span
//!   several physical lines and is followed by the block opener
//! - `data: [` opens an unlabelled block, `data: {` a labelled one
//! - Every row line ends in `,`; the block closes with a bare `]` or `}`
//! - Without a `columns:` declaration the rows are positional
//!
//! Labelled rows pair a label with the row sequence:
//!
//! ```text
//! data: {
//! hydrogen: [Hydrogen, H],
//! helium:   [Helium,   He],
//! }
//! ```
//!
//! # Expanded dialect
//!
//! One YAML-style block per row; a new row begins at each line starting
//! with `-`:
//!
//! ```text
//! - name: Hydrogen
//!   symbol: H
//!
//! - name: Helium
//!   symbol: He
//! ```
//!
//! Positional rows use sequence items instead of mapping entries:
//!
//! ```text
//! -
//!   - Hydrogen
//!   - H
//! ```
//!
//! Labelled rows nest the row content under a single label key:
//!
//! ```text
//! - hydrogen:
//!     name: Hydrogen
//!     symbol: H
//! ```
//!
//! # Scalars
//!
//! | Kind | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null`, `~`, empty | `group: null` |
//! | Boolean | `true` or `false` | `metallic: false` |
//! | Integer | decimal digits, optional sign | `number: 42` |
//! | Float | decimal with `.`, or `.inf` / `-.inf` / `.nan` | `weight: 1.00794` |
//! | String | unquoted, `'single'`, or `"double"` | `group: 'Noble gas'` |
//!
//! Strings render unquoted when unambiguous, single-quoted (with `''` for
//! a literal quote) when they contain structural characters or would
//! reparse as another scalar, and double-quoted (with backslash escapes)
//! when they contain control characters. Floats always carry a decimal
//! point so they never reparse as integers.
//!
//! # Comments and whitespace
//!
//! A line whose trimmed content starts with `#` is a comment; a line that
//! trims to nothing is blank. Both are insignificant anywhere between
//! structural tokens.
//!
//! # Row shape
//!
//! Column count — and, for named columns, column identity and order — is
//! fixed by the header or first row and must be identical across every
//! row of a document. A mismatch is a hard parse error; there is no
//! recovery or skip-and-continue.
//!
//! # Limitations
//!
//! - Cell values are scalars only: no nested sequences or mappings
//! - No YAML anchors, aliases, tags, or multi-document streams
//! - One fixture document per stream

// This module contains only documentation; no implementation code
