use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the rotating writer.
///
/// All errors are returned synchronously to the caller; nothing is logged
/// internally (this crate is itself a log sink) and nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The directory failed the writability probe at construction time.
    #[error("directory {} is not writable: {source}", .path.display())]
    DirectoryUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The current window's file could not be created or opened for append.
    /// Surfaced per call; the next write attempts again from scratch.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The underlying write reported success but accepted fewer bytes than
    /// requested. Reported explicitly so partial writes are never silent.
    /// Only raised when the underlying call itself returned no error.
    #[error("short write to {}: wrote {written} of {expected} bytes", .path.display())]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },

    /// An underlying write failure, propagated unchanged.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        let kind = match &err {
            Error::Io(e) => e.kind(),
            Error::DirectoryUnwritable { source, .. } | Error::Open { source, .. } => {
                source.kind()
            }
            Error::ShortWrite { .. } => io::ErrorKind::WriteZero,
        };

        match err {
            Error::Io(e) => e,
            other => io::Error::new(kind, other),
        }
    }
}
