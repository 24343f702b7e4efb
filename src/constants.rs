//! Global constants used throughout the helpboard codebase

/// Character set for generated identifiers: lowercase letters and digits
pub const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated identifier in characters
///
/// 36^6 possible values, so collisions are rare but not impossible.
pub const ID_LENGTH: usize = 6;

/// Default number of identifier draws before an insert gives up
pub const DEFAULT_ID_ATTEMPTS: u32 = 8;

/// Business categories, in declaration order
pub const CATEGORIES: [&str; 3] = ["shopping", "restaurant", "nightlife"];

/// Help request priority levels, lowest to highest
///
/// A request stores its priority as an index into this array.
pub const PRIORITIES: [&str; 4] = ["closed", "low", "normal", "high"];

/// Index of the `normal` priority, assigned to new requests
pub const NORMAL_PRIORITY: usize = 2;

/// Suffix that selects the JSON representation of an item
pub const JSON_SUFFIX: &str = ".json";
