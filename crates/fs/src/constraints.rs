use std::collections::BTreeSet;

use log::debug;

use crate::glob::GlobError;

/// Logical columns whose predicates select what gets inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Path,
    Directory,
}

impl Column {
    pub const fn name(self) -> &'static str {
        match self {
            Column::Path => "path",
            Column::Directory => "directory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    Like,
}

/// Supplies predicate values per column and operator.
pub trait ConstraintSource {
    /// All values bound to `column` with `op`.
    fn get_all(&self, column: Column, op: Operator) -> BTreeSet<String>;

    /// Run `expander` on every value bound with `op` and merge what it returns into `out`.
    ///
    /// A failing expansion contributes nothing and does not stop the remaining values.
    fn expand_constraints<F>(
        &self,
        column: Column,
        op: Operator,
        out: &mut BTreeSet<String>,
        mut expander: F,
    ) where
        F: FnMut(&str) -> Result<Vec<String>, GlobError>,
    {
        for pattern in self.get_all(column, op) {
            match expander(&pattern) {
                Ok(resolved) => out.extend(resolved),
                Err(e) => {
                    debug!(
                        "[constraints] {} pattern {:?} not expanded: {e}",
                        column.name(),
                        pattern
                    );
                }
            }
        }
    }
}

/// In-memory constraint set.
#[derive(Debug, Clone, Default)]
pub struct QueryConstraints {
    bindings: Vec<(Column, Operator, String)>,
}

impl QueryConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, column: Column, op: Operator, value: impl Into<String>) -> &mut Self {
        self.bindings.push((column, op, value.into()));
        self
    }

    pub fn with(mut self, column: Column, op: Operator, value: impl Into<String>) -> Self {
        self.add(column, op, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl ConstraintSource for QueryConstraints {
    fn get_all(&self, column: Column, op: Operator) -> BTreeSet<String> {
        self.bindings
            .iter()
            .filter(|(c, o, _)| *c == column && *o == op)
            .map(|(_, _, v)| v.clone())
            .collect()
    }
}

impl FromIterator<(Column, Operator, String)> for QueryConstraints {
    fn from_iter<I: IntoIterator<Item = (Column, Operator, String)>>(iter: I) -> Self {
        QueryConstraints {
            bindings: iter.into_iter().collect(),
        }
    }
}
