/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// REPORTS
// =============================================================================

/// Maximum number of images attached to one report submission
pub const MAX_REPORT_IMAGES: usize = 5;

/// Maximum size of a single report image in bytes (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Prefix of every tracking number, e.g. `CR-2026-000042`
pub const TRACKING_NUMBER_PREFIX: &str = "CR";

// =============================================================================
// LEADERBOARD
// =============================================================================

/// Number of profiles shown on the leaderboard
pub const LEADERBOARD_SIZE: i64 = 50;
