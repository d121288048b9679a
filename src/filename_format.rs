use chrono::{DateTime, FixedOffset};

/// Filename derivation for time-windowed log files.
///
/// This module compiles the static naming parameters (prefix, suffix,
/// separator, extension) into a template string once, so that producing the
/// file name for "now" is a single substitution instead of repeated string
/// assembly on every write.

/// Substitution slot for the formatted timestamp inside a compiled template.
const TIME_SLOT: &str = "{time}";

/// Default time layout: year-month-day-hour, i.e. hourly rotation windows.
pub const DEFAULT_LAYOUT: &str = "%Y-%m-%dT%H";

/// Default filename extension.
pub const DEFAULT_EXTENSION: &str = "log";

/// Naming parameters plus the derived filename template.
///
/// The rotation period is determined solely by the finest-grained component
/// present in `layout`: the default `%Y-%m-%dT%H` rotates hourly, while a
/// layout that includes `%M` rotates every minute.
///
/// The template is rebuilt whenever prefix, suffix, separator or extension
/// change. Changing the layout does NOT rebuild it: the template carries a
/// generic slot for the formatted timestamp, independent of the layout's
/// content.
///
/// No character-legality validation is performed on any parameter: callers
/// may pass path-breaking characters (or an invalid strftime layout) and own
/// the consequences.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use logwheel::FilenameFormat;
///
/// let mut format = FilenameFormat::new();
/// format.set_prefix("app");
/// format.set_separator("_");
///
/// let epoch = DateTime::from_timestamp(0, 0).unwrap().fixed_offset();
/// assert_eq!(format.file_name_at(epoch), "app_1970-01-01T00.log");
/// ```
#[derive(Debug, Clone)]
pub struct FilenameFormat {
    prefix: String,
    suffix: String,
    separator: String,
    extension: String,
    layout: String,
    template: String,
}

impl Default for FilenameFormat {
    fn default() -> Self {
        let mut format = Self {
            prefix: String::new(),
            suffix: String::new(),
            separator: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            layout: DEFAULT_LAYOUT.to_string(),
            template: String::new(),
        };
        format.rebuild_template();
        format
    }
}

impl FilenameFormat {
    /// Creates a format with the default values: no prefix/suffix/separator,
    /// `log` extension, hourly layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filename prefix and recompiles the template.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
        self.rebuild_template();
    }

    /// Sets the filename suffix and recompiles the template.
    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix = suffix.into();
        self.rebuild_template();
    }

    /// Sets the separator placed between prefix/suffix and the timestamp,
    /// and recompiles the template.
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
        self.rebuild_template();
    }

    /// Sets the filename extension and recompiles the template.
    ///
    /// An empty extension omits the trailing dot entirely.
    pub fn set_extension(&mut self, extension: impl Into<String>) {
        self.extension = extension.into();
        self.rebuild_template();
    }

    /// Sets the chrono strftime layout used to format the timestamp.
    ///
    /// This controls how often files rotate: the rotation window is the
    /// smallest time unit represented in the layout. The template is not
    /// touched; only timestamp expansion reads the layout, at call time.
    pub fn set_layout(&mut self, layout: impl Into<String>) {
        self.layout = layout.into();
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// The compiled template, with `{time}` marking the substitution slot.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Renders the file name for the given instant.
    ///
    /// Pure function of the current parameters and `when`: formats the
    /// timestamp with `layout` and substitutes it into the template. No I/O.
    pub fn file_name_at(&self, when: DateTime<FixedOffset>) -> String {
        let stamp = when.format(&self.layout).to_string();
        self.template.replacen(TIME_SLOT, &stamp, 1)
    }

    // Exactly one of four shapes applies, keyed on which of prefix/suffix
    // are non-empty. The separator only appears next to a non-empty part.
    fn rebuild_template(&mut self) {
        let mut template = String::new();

        if !self.prefix.is_empty() {
            template.push_str(&self.prefix);
            template.push_str(&self.separator);
        }

        template.push_str(TIME_SLOT);

        if !self.suffix.is_empty() {
            template.push_str(&self.separator);
            template.push_str(&self.suffix);
        }

        if !self.extension.is_empty() {
            template.push('.');
            template.push_str(&self.extension);
        }

        self.template = template;
    }
}
