mod capabilities;
mod constraints;
mod enumerate;
mod extract;
mod glob;
mod permissions;
mod record;
mod resolver;

pub use capabilities::StatCapabilities;
pub use constraints::{Column, ConstraintSource, Operator, QueryConstraints};
pub use enumerate::{DirListing, SkipReason, generate, generate_with, list_directory};
pub use extract::{append_file_info, extract_file_info};
pub use glob::{GlobError, GlobFlags, resolve_file_pattern};
pub use permissions::format_mode;
pub use record::{EntryType, FileRecord};
pub use resolver::{ResolvedTargets, resolve_targets};
