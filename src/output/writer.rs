//! Line-delimited JSON sink
//!
//! Writes each record as one independently serialized line. A record that
//! fails to serialize aborts the write; lines already written stay on disk.

use crate::config::output_file_name;
use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, IntoInnerError, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a successful persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistSummary {
    /// Destination file
    pub path: PathBuf,
    /// Lines written
    pub lines: usize,
}

/// Byte sink that can be flushed and released once writing is done
pub trait LineTarget: Write {
    /// Flush everything buffered and release the underlying handle
    fn release(self) -> io::Result<()>;
}

impl LineTarget for BufWriter<File> {
    fn release(self) -> io::Result<()> {
        let file = self.into_inner().map_err(IntoInnerError::into_error)?;
        file.sync_all()
    }
}

/// Line writer over a freshly created file
pub struct JsonLinesWriter<W: LineTarget = BufWriter<File>> {
    /// Buffered target
    writer: W,
    /// Destination path
    path: PathBuf,
    /// Number of lines written
    lines_written: usize,
    /// Echo every line to stdout
    echo: bool,
}

impl JsonLinesWriter {
    /// Create (or truncate) the destination file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| Error::storage(&path, e))?;

        Ok(Self::from_target(BufWriter::new(file), path))
    }
}

impl<W: LineTarget> JsonLinesWriter<W> {
    /// Wrap an already opened target; `path` is only used in errors and logs
    pub fn from_target(writer: W, path: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            path: path.into(),
            lines_written: 0,
            echo: false,
        }
    }

    /// Echo every written line to stdout
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Serialize `record` and append it as one line
    ///
    /// `index` is the record's position, reported on serialization failure.
    pub fn write<R: Serialize>(&mut self, index: usize, record: &R) -> Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|source| Error::Serialization { index, source })?;

        if self.echo {
            println!("{line}");
        }

        writeln!(self.writer, "{line}").map_err(|e| Error::storage(&self.path, e))?;
        self.lines_written += 1;
        Ok(())
    }

    /// Get the number of lines written so far
    #[must_use]
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered lines, sync and release the target
    pub fn close(self) -> Result<usize> {
        let lines = self.lines_written;
        let path = self.path;

        self.writer.release().map_err(|e| Error::storage(&path, e))?;

        Ok(lines)
    }
}

/// Persists accumulated records to `<dir>/<account>-all-records.json`
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    /// Output directory
    dir: PathBuf,
    /// Echo every line to stdout
    echo: bool,
}

impl Default for JsonLinesSink {
    fn default() -> Self {
        Self::new(".")
    }
}

impl JsonLinesSink {
    /// Create a sink writing into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            echo: false,
        }
    }

    /// Echo every line to stdout while persisting
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Destination file for an account
    pub fn destination(&self, account: &str) -> PathBuf {
        self.dir.join(output_file_name(account))
    }

    /// Write `records` for `account`, one per line, in order
    ///
    /// The file is released on every path. When writing already failed, a
    /// failure to release it is logged and the write error is returned;
    /// otherwise the release failure itself is returned.
    pub fn persist<R: Serialize>(&self, account: &str, records: &[R]) -> Result<PersistSummary> {
        let path = self.destination(account);
        debug!("Writing {} records to {}", records.len(), path.display());

        let writer = JsonLinesWriter::create(&path)?.with_echo(self.echo);
        write_and_close(writer, records)
    }
}

/// Write every record, then release the target on every path
pub(crate) fn write_and_close<W, R>(
    mut writer: JsonLinesWriter<W>,
    records: &[R],
) -> Result<PersistSummary>
where
    W: LineTarget,
    R: Serialize,
{
    let path = writer.path().to_path_buf();
    let written = records
        .iter()
        .enumerate()
        .try_for_each(|(index, record)| writer.write(index, record));
    let closed = writer.close();

    match (written, closed) {
        (Err(e), Err(close_err)) => {
            warn!("Failed to release {}: {close_err}", path.display());
            Err(e)
        }
        (Err(e), Ok(_)) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(lines)) => {
            info!("Wrote {lines} records to {}", path.display());
            Ok(PersistSummary { path, lines })
        }
    }
}
