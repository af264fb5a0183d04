//! Stream ownership and lifecycle for read and write handles.
//!
//! A [`Handle`] owns exactly one stream for its lifetime and moves through
//! a linear `Pending -> Open -> Closed` lifecycle. Handles constructed from
//! a path stay `Pending` until the first operation touches the stream;
//! handles constructed from a live stream start `Open`. `close()` is
//! explicit, and a second `close()` is an error rather than a silent no-op.
//!
//! All stream I/O performed by the engine goes through the helpers here so
//! that every failure is wrapped with the handle's direction and path.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// How a stream type is produced from a filesystem path when a handle
/// opens lazily. Read streams open the file; write streams create or
/// truncate it.
pub(crate) trait PathOpen: Sized {
    fn open_path(path: &Path) -> io::Result<Self>;
}

impl PathOpen for BufReader<File> {
    fn open_path(path: &Path) -> io::Result<Self> {
        File::open(path).map(BufReader::new)
    }
}

impl PathOpen for File {
    fn open_path(path: &Path) -> io::Result<Self> {
        File::create(path)
    }
}

/// The direction a handle moves data in, used to pick the error variant
/// that wraps an I/O failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Read,
    Write,
}

enum StreamState<S> {
    /// Not yet opened; holds the opener for the stream type.
    Pending(fn(&Path) -> io::Result<S>),
    Open(S),
    Closed,
}

pub(crate) struct Handle<S> {
    state: StreamState<S>,
    path: Option<PathBuf>,
    mode: Mode,
}

impl<S> Handle<S> {
    pub(crate) fn from_stream(stream: S, path: Option<PathBuf>, mode: Mode) -> Self {
        Handle {
            state: StreamState::Open(stream),
            path,
            mode,
        }
    }

    pub(crate) fn from_path(path: PathBuf, mode: Mode) -> Self
    where
        S: PathOpen,
    {
        Handle {
            state: StreamState::Pending(S::open_path),
            path: Some(path),
            mode,
        }
    }

    /// Builds a handle from an optional stream and an optional path,
    /// failing with `EmptyHandle` when given neither.
    pub(crate) fn from_parts(stream: Option<S>, path: Option<PathBuf>, mode: Mode) -> Result<Self>
    where
        S: PathOpen,
    {
        match (stream, path) {
            (Some(stream), path) => Ok(Handle::from_stream(stream, path, mode)),
            (None, Some(path)) => Ok(Handle::from_path(path, mode)),
            (None, None) => Err(Error::EmptyHandle),
        }
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn is_closed(&self) -> bool {
        matches!(self.state, StreamState::Closed)
    }

    /// Closes the handle, dropping the stream. Fails with `ClosedHandle`
    /// if the handle is already closed.
    pub(crate) fn close(&mut self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::closed(self.path()));
        }
        self.state = StreamState::Closed;
        Ok(())
    }

    /// The live stream, opening it from the stored path on first use.
    pub(crate) fn stream(&mut self) -> Result<&mut S> {
        match self.state {
            StreamState::Closed => Err(Error::closed(self.path.as_deref())),
            StreamState::Open(ref mut stream) => Ok(stream),
            StreamState::Pending(open) => {
                let path = self
                    .path
                    .as_deref()
                    .expect("a pending handle always has a path");
                match open(path) {
                    Ok(stream) => {
                        self.state = StreamState::Open(stream);
                        match self.state {
                            StreamState::Open(ref mut stream) => Ok(stream),
                            _ => unreachable!(),
                        }
                    }
                    Err(e) => Err(self.io_error(e)),
                }
            }
        }
    }

    fn io_error(&self, e: io::Error) -> Error {
        match self.mode {
            Mode::Read => Error::read(self.path.as_deref(), e),
            Mode::Write => Error::write(self.path.as_deref(), e),
        }
    }
}

impl<S: BufRead> Handle<S> {
    /// Reads one line including its terminator; `None` at end of stream.
    pub(crate) fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.stream()?.read_line(&mut line);
        match read {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line)),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

impl<S: Seek> Handle<S> {
    pub(crate) fn position(&mut self) -> Result<u64> {
        let position = self.stream()?.stream_position();
        position.map_err(|e| self.io_error(e))
    }

    pub(crate) fn seek_to(&mut self, offset: u64) -> Result<()> {
        let seeked = self.stream()?.seek(SeekFrom::Start(offset));
        seeked.map(|_| ()).map_err(|e| self.io_error(e))
    }
}

impl<S: Write> Handle<S> {
    pub(crate) fn write_str(&mut self, data: &str) -> Result<()> {
        let written = self.stream()?.write_all(data.as_bytes());
        written.map_err(|e| self.io_error(e))
    }

    /// Flushes an open stream; a handle that never opened has nothing to
    /// flush.
    pub(crate) fn flush(&mut self) -> Result<()> {
        if let StreamState::Open(ref mut stream) = self.state {
            if let Err(e) = stream.flush() {
                return Err(self.io_error(e));
            }
        }
        Ok(())
    }
}
