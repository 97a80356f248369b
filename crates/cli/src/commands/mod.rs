pub mod glob;
pub mod query;

use clap::{Parser, Subcommand};
pub use glob::GlobArgs;
pub use query::QueryArgs;

/// Common error type for command handlers
pub type CommandResult<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[command(
    name = "filetab",
    version,
    about = "filetab - file metadata for paths and directory listings",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one metadata row per matching path or directory child.
    ///
    /// Example:
    ///   filetab query --path /etc/hosts
    ///   filetab query --path-like '/var/log/%.log' --directory /tmp
    Query(QueryArgs),

    /// Expand a LIKE-style path pattern and print the matches.
    ///
    /// Example:
    ///   filetab glob '/home/%/.ssh/%'
    ///   filetab glob --folders '/srv/%%'
    Glob(GlobArgs),
}
