mod config;
pub mod logging;

pub use config::{
    LIKE_RECURSIVE_WILDCARD, LIKE_WILDCARD, MAX_RECURSIVE_GLOB_DEPTH, PROGRAM_LOG_LEVEL,
    PROGRAM_NAME,
};

pub use logging::init;
