use std::{
    fs::{self, read_dir},
    io,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    capabilities::StatCapabilities, constraints::ConstraintSource, extract::append_file_info,
    record::FileRecord, resolver::resolve_targets,
};

/// Why a directory contributed no rows.
#[derive(Debug)]
pub enum SkipReason {
    /// The directory could not be stat'ed or opened for listing.
    Unreadable(io::Error),
    NotADirectory,
}

/// Outcome of listing one directory.
#[derive(Debug)]
pub enum DirListing {
    Entries(Vec<PathBuf>),
    /// Listing failed part way through; `entries` holds what was read before.
    Interrupted {
        entries: Vec<PathBuf>,
        error: io::Error,
    },
    Skipped(SkipReason),
}

/// Immediate children of `dir`, in the order the OS reports them.
pub fn list_directory(dir: &Path) -> DirListing {
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => return DirListing::Skipped(SkipReason::NotADirectory),
        Ok(_) => {}
        Err(e) => return DirListing::Skipped(SkipReason::Unreadable(e)),
    }

    match read_dir(dir) {
        Ok(rd) => collect_entries(rd.map(|entry_res| entry_res.map(|entry| entry.path()))),
        Err(e) => DirListing::Skipped(SkipReason::Unreadable(e)),
    }
}

/// Gather entries until the first error.
fn collect_entries<I>(entries: I) -> DirListing
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut collected = Vec::new();
    for entry_res in entries {
        match entry_res {
            Ok(path) => collected.push(path),
            Err(error) => {
                return DirListing::Interrupted {
                    entries: collected,
                    error,
                };
            }
        }
    }

    DirListing::Entries(collected)
}

/// Build the file table for `source` using the host's stat capabilities.
pub fn generate<S: ConstraintSource>(source: &S) -> Vec<FileRecord> {
    generate_with(source, StatCapabilities::current())
}

/// Build the file table: direct paths first, then the children of each directory.
///
/// Nothing here fails; unreadable inputs simply contribute no rows.
pub fn generate_with<S: ConstraintSource>(source: &S, caps: StatCapabilities) -> Vec<FileRecord> {
    let targets = resolve_targets(source);
    let mut results = Vec::new();

    for path_string in &targets.paths {
        let path = Path::new(path_string);
        let parent = path.parent().unwrap_or(Path::new(""));
        append_file_info(path, parent, caps, &mut results);
    }

    for directory_string in &targets.directories {
        let directory = Path::new(directory_string);
        let children = match list_directory(directory) {
            DirListing::Entries(children) => children,
            DirListing::Interrupted { entries, error } => {
                debug!(
                    "[enumerate] listing {:?} stopped after {} entries: {error}",
                    directory,
                    entries.len()
                );
                entries
            }
            DirListing::Skipped(reason) => {
                debug!("[enumerate] skipping {:?}: {:?}", directory, reason);
                continue;
            }
        };

        for child in children {
            append_file_info(&child, directory, caps, &mut results);
        }
    }

    debug!("[enumerate] produced {} record(s)", results.len());
    results
}

#[cfg(test)]
#[path = "enumerate_tests.rs"]
mod tests;
