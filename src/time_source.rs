use chrono::{DateTime, FixedOffset, Utc};

/// Pluggable clock for filename derivation.
///
/// A time source is a plain function value: zero arguments, returns the
/// current instant with an explicit offset. Swapping it changes which
/// rotation window subsequent writes land in, which is how alternate zones,
/// shifted clocks and fixed test clocks are supported.
pub type TimeSource = Box<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// The default time source: the system clock, in UTC.
pub fn system_utc() -> TimeSource {
    Box::new(|| Utc::now().fixed_offset())
}

/// A clock frozen at `at`. Every call returns the same instant, so every
/// call resolves to the same file name.
pub fn fixed(at: DateTime<FixedOffset>) -> TimeSource {
    Box::new(move || at)
}
