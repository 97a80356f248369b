use std::collections::BTreeSet;

use log::debug;

use crate::{
    constraints::{Column, ConstraintSource, Operator},
    glob::{GlobFlags, resolve_file_pattern},
};

/// Paths selected by the query's `path` and `directory` predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTargets {
    /// Entries to inspect directly.
    pub paths: BTreeSet<String>,
    /// Directories whose immediate children are inspected.
    pub directories: BTreeSet<String>,
}

impl ResolvedTargets {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.directories.is_empty()
    }
}

/// Merge exact values and expanded LIKE patterns for both columns.
pub fn resolve_targets<S: ConstraintSource>(source: &S) -> ResolvedTargets {
    let paths = resolve_column(source, Column::Path, GlobFlags::ALL | GlobFlags::NO_CANON);
    let directories = resolve_column(
        source,
        Column::Directory,
        GlobFlags::FOLDERS | GlobFlags::NO_CANON,
    );

    debug!(
        "[resolve] {} path(s), {} directorie(s)",
        paths.len(),
        directories.len()
    );

    ResolvedTargets { paths, directories }
}

fn resolve_column<S: ConstraintSource>(
    source: &S,
    column: Column,
    flags: GlobFlags,
) -> BTreeSet<String> {
    let mut targets = source.get_all(column, Operator::Equals);
    source.expand_constraints(column, Operator::Like, &mut targets, |pattern| {
        resolve_file_pattern(pattern, flags)
    });
    targets
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
