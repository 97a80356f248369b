pub const PROGRAM_NAME: &str = "filetab";
pub const PROGRAM_LOG_LEVEL: &str = "FILETAB_LOG_LEVEL";

/// Upper bound on how deep a trailing `%%` pattern component descends.
pub const MAX_RECURSIVE_GLOB_DEPTH: usize = 64;

/// Single-component wildcard in LIKE-style path patterns.
pub const LIKE_WILDCARD: char = '%';

/// Recursive wildcard; only valid as the final pattern component.
pub const LIKE_RECURSIVE_WILDCARD: &str = "%%";
