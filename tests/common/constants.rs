//! Shared constants for integration tests

// ============================================================================
// Test Users
// ============================================================================

/// User whose library is populated by the synthetic fixtures
pub const TEST_USER: &str = "testuser";

/// User with an empty library
pub const EMPTY_USER: &str = "emptyuser";

/// Access token handed to the fake client factory
pub const TEST_TOKEN: &str = "test-access-token";

// ============================================================================
// Synthetic Library
// ============================================================================

/// Track count of the end-to-end library (two clusters)
pub const SYNTHETIC_TRACK_COUNT: usize = 35;

/// Release years are spread evenly over this range
pub const FIRST_RELEASE_YEAR: i32 = 2000;
pub const LAST_RELEASE_YEAR: i32 = 2020;

/// Niche tags assigned to artists in rotation, one per macro-genre
pub const ROTATING_GENRE_TAGS: [&str; 3] = ["hard bop jazz", "garage rock", "minimal techno"];

/// Macro-genre labels the rotating tags normalize to
pub const ROTATING_MACRO_GENRES: [&str; 3] = ["Jazz", "Rock", "Electronic"];
