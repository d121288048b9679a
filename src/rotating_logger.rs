use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::Error;
use crate::filename_format::FilenameFormat;
use crate::time_source::{self, TimeSource};

/// Core implementation of the rotating write path.
///
/// This module provides the Logger struct: an append-only writer whose target
/// file is re-derived from the clock on every call, so rotation happens
/// implicitly when the time window changes.

/// A rotating log writer bound to one directory.
///
/// Every write derives the current file name from the configured
/// [`FilenameFormat`] and time source, opens that file in create-if-missing
/// append mode, writes the payload and closes the file again. A new physical
/// file comes into existence the first time a write falls into a time window
/// for which no file exists yet; files for past windows are never touched
/// again. The filesystem itself is the source of truth for which windows
/// already have a file.
///
/// # Thread Safety
///
/// All methods take `&self`; a single mutex serializes the whole
/// derive-name/open/write/close sequence, so a `Logger` can be shared across
/// threads (e.g. in an `Arc`) and concurrent writes never interleave their
/// bytes. Configuration setters go through the same lock, so reconfiguring
/// while other threads write is safe: each write sees either the old or the
/// new naming scheme, never a partially-updated one. The time source is
/// invoked while the lock is held, so concurrent writes agree on the target
/// window even at a rotation boundary.
///
/// Two independently constructed Loggers pointed at the same directory do
/// NOT coordinate; that usage is out of contract.
///
/// # File Handling
///
/// The file handle is opened and closed per call rather than cached across
/// calls. A cached handle would have to be invalidated on every rotation and
/// on every naming-parameter change; re-opening keeps the write path free of
/// stale-handle states.
///
/// # Examples
///
/// ```
/// use logwheel::Logger;
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::open(dir.path()).unwrap();
///
/// logger.set_prefix("app");
/// logger.set_separator("_");
///
/// // Lands in e.g. app_2026-08-05T14.log, created on first use.
/// logger.append_str("service started\n").unwrap();
/// ```
pub struct Logger {
    directory: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    format: FilenameFormat,
    now: TimeSource,
}

impl Inner {
    fn current_file_name(&self) -> String {
        self.format.file_name_at((self.now)())
    }
}

impl Logger {
    /// Opens a rotating logger against an existing, writable directory.
    ///
    /// Writability is verified once, by creating and immediately deleting a
    /// temporary probe file, so a permissions or missing-directory problem
    /// surfaces here instead of on the first real write. No directory is
    /// created, and the probe is never re-run on later writes.
    ///
    /// # Errors
    ///
    /// [`Error::DirectoryUnwritable`] if the probe write fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use logwheel::Logger;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// assert!(Logger::open(dir.path()).is_ok());
    /// assert!(Logger::open(dir.path().join("noexist")).is_err());
    /// ```
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, Error> {
        let directory = directory.into();
        probe_writable(&directory)?;

        Ok(Self {
            directory,
            inner: Mutex::new(Inner {
                format: FilenameFormat::new(),
                now: time_source::system_utc(),
            }),
        })
    }

    /// The directory this logger writes into.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Sets the filename prefix.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.lock().format.set_prefix(prefix);
    }

    /// Sets the filename suffix.
    pub fn set_suffix(&self, suffix: impl Into<String>) {
        self.inner.lock().format.set_suffix(suffix);
    }

    /// Sets the separator placed between prefix/suffix and the timestamp.
    pub fn set_separator(&self, separator: impl Into<String>) {
        self.inner.lock().format.set_separator(separator);
    }

    /// Sets the filename extension. An empty extension drops the dot too.
    pub fn set_extension(&self, extension: impl Into<String>) {
        self.inner.lock().format.set_extension(extension);
    }

    /// Sets the strftime layout used to format timestamps.
    ///
    /// The smallest unit in the layout determines how often files rotate:
    /// the default `%Y-%m-%dT%H` rotates hourly, adding `%M` rotates every
    /// minute.
    pub fn set_layout(&self, layout: impl Into<String>) {
        self.inner.lock().format.set_layout(layout);
    }

    /// Replaces the time source consulted on every write.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::DateTime;
    /// use logwheel::Logger;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let logger = Logger::open(dir.path()).unwrap();
    ///
    /// logger.set_time_source(|| DateTime::from_timestamp(0, 0).unwrap().fixed_offset());
    /// assert_eq!(logger.file_name(), "1970-01-01T00.log");
    /// ```
    pub fn set_time_source<F>(&self, source: F)
    where
        F: Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
    {
        self.inner.lock().now = Box::new(source);
    }

    /// The file name a write issued right now would target.
    pub fn file_name(&self) -> String {
        self.inner.lock().current_file_name()
    }

    /// Appends `data` to the current window's file, creating it if absent.
    ///
    /// The lock is held across the entire derive-name/open/write/close
    /// sequence, so the window decision and the append are atomic together.
    /// A single underlying write is issued; there is no retry.
    ///
    /// # Errors
    ///
    /// * [`Error::Open`]: the file could not be created or opened. The
    ///   logger is not poisoned; the next call starts from scratch.
    /// * [`Error::Io`]: the underlying write failed.
    /// * [`Error::ShortWrite`]: the underlying write succeeded but accepted
    ///   fewer than `data.len()` bytes; the error carries the written count.
    pub fn append(&self, data: &[u8]) -> Result<usize, Error> {
        let inner = self.inner.lock();
        let path = self.directory.join(inner.current_file_name());

        let mut file = open_append(&path)?;
        let written = file.write(data).map_err(Error::Io)?;

        if written < data.len() {
            return Err(Error::ShortWrite {
                path,
                written,
                expected: data.len(),
            });
        }

        Ok(written)
    }

    /// Appends the UTF-8 bytes of `text`, discarding the byte count.
    pub fn append_str(&self, text: &str) -> Result<(), Error> {
        self.append(text.as_bytes()).map(|_| ())
    }
}

/// Manual `Debug` that omits the non-`Debug` boxed time source.
impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Logger")
            .field("directory", &self.directory)
            .field("format", &inner.format)
            .finish_non_exhaustive()
    }
}

/// Dumps the full configuration and the file name a write would target right
/// now. Diagnostics only; rotation never consults this.
impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        writeln!(f, "logwheel::Logger")?;
        writeln!(f, "  directory: {}", self.directory.display())?;
        writeln!(f, "  prefix: {:?}", inner.format.prefix())?;
        writeln!(f, "  suffix: {:?}", inner.format.suffix())?;
        writeln!(f, "  separator: {:?}", inner.format.separator())?;
        writeln!(f, "  extension: {:?}", inner.format.extension())?;
        writeln!(f, "  layout: {}", inner.format.layout())?;
        writeln!(f, "  template: {}", inner.format.template())?;
        write!(f, "  current file: {}", inner.current_file_name())
    }
}

/// `io::Write` by shared reference, so an `Arc<Logger>` (or the `MakeWriter`
/// impl below) can hand out writers without exclusive access.
///
/// A short write surfaces as `Ok(written)` here, per the `io::Write`
/// contract; callers that need the explicit error use [`Logger::append`].
impl io::Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match (*self).append(buf) {
            Ok(written) => Ok(written),
            Err(Error::ShortWrite { written, .. }) => Ok(written),
            Err(err) => Err(err.into()),
        }
    }

    // Every append opens, writes and closes the file; nothing is buffered.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Lets the logger act as the output sink of a `tracing-subscriber`
/// formatter, the same way a rolling file appender would.
impl<'a> MakeWriter<'a> for Logger {
    type Writer = &'a Logger;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

// Create-then-delete probe; failure means the directory is missing or not
// writable for this process.
fn probe_writable(directory: &Path) -> Result<(), Error> {
    tempfile::Builder::new()
        .prefix(".logwheel.probe.")
        .tempfile_in(directory)
        .map(drop)
        .map_err(|source| Error::DirectoryUnwritable {
            path: directory.to_path_buf(),
            source,
        })
}

// Append-only, never truncates, no OS-level exclusive lock. Mode 0644 on
// unix so the owner can read and write.
fn open_append(path: &Path) -> Result<File, Error> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options.open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })
}
