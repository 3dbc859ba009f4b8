// =============================================================================
// Request Limits
// =============================================================================

/// Default maximum number of filters in one request
pub const DEFAULT_MAX_FILTERS: usize = 50;

/// Default maximum length of a single raw filter value (bytes)
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 1024;

/// Default maximum size of a JSON-encoded filter request (64KB)
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 64 * 1024;
