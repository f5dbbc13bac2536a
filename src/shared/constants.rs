/// Prefix carried by every tracking identifier
pub const TRACKING_ID_PREFIX: &str = "SR";

/// Number of random base-36 characters appended after the time component
pub const TRACKING_ID_RANDOM_LEN: usize = 8;

/// Maximum length of a report description, after trimming
pub const MAX_DESCRIPTION_LENGTH: u64 = 5000;

/// Maximum length of free-text location and assignee fields
pub const MAX_SHORT_TEXT_LENGTH: u64 = 255;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can review reports and change their status, priority and assignment
pub const ROLE_ADMIN: &str = "admin";
