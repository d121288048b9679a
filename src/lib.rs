//! # Logwheel
//!
//! A time-windowed rotating file writer: every write lands in the file whose
//! name encodes the current time bucket, and a new file simply comes into
//! existence when the bucket changes.
//!
//! * **Lazy rotation**: no background timers and no pre-created files; a
//!   window's file is created on the first write that falls into it
//! * **Append-only, indefinite retention**: past windows are never deleted,
//!   renamed or truncated by this crate
//! * **Precompiled naming**: prefix, suffix, separator and extension are
//!   compiled into a template once, so per-write name generation is a single
//!   substitution
//! * **Pluggable clock**: the time source is a plain function value, so
//!   alternate zones, shifted clocks and fixed test clocks drop in
//! * **Serialized writes**: one lock per logger covers the whole
//!   derive-name/open/write/close sequence, so concurrent writers never
//!   interleave their bytes
//!
//! ## Main Components
//!
//! * `Logger`: the rotating, append-only write path
//! * `FilenameFormat`: naming parameters and the compiled filename template
//! * `time_source`: the swappable clock consulted on every write
//!
//! ## Quick Start
//!
//! ```
//! use logwheel::Logger;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::open(dir.path()).unwrap();
//!
//! logger.set_prefix("app");
//! logger.set_separator("_");
//!
//! // Appends to e.g. app_2026-08-05T14.log, creating it on first use.
//! logger.append_str("service started\n").unwrap();
//! ```

pub mod error;
pub mod filename_format;
pub mod rotating_logger;
pub mod time_source;

pub use error::Error;
pub use filename_format::FilenameFormat;
pub use rotating_logger::Logger;
pub use time_source::{fixed, system_utc, TimeSource};
