/// Defaults shared by the history, watcher and persistence layers
///
/// These values are used when the configuration file does not override them
/// and by the tests that exercise the documented behavior.

/// Maximum number of entries kept in the history
pub const DEFAULT_MAX_ITEMS: usize = 1000;

/// Number of characters shown by an entry summary before truncation
pub const DEFAULT_SUMMARY_LENGTH: usize = 100;

/// Marker appended to truncated summaries
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Clipboard polling cadence in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Key under which the whole history blob is stored
pub const HISTORY_KEY: &str = "clipboardItems";
