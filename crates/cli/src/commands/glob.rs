use std::process::ExitCode;

use clap::Args;
use filetab_fs::{GlobFlags, resolve_file_pattern};
use log::error;

#[derive(Debug, Args)]
pub struct GlobArgs {
    /// LIKE-style pattern to expand
    pub pattern: String,

    /// Only report directories
    #[arg(long, conflicts_with = "files")]
    pub folders: bool,

    /// Only report non-directories
    #[arg(long)]
    pub files: bool,

    /// Canonicalize matches instead of printing them as built from the pattern
    #[arg(long)]
    pub canonical: bool,
}

impl GlobArgs {
    pub fn flags(&self) -> GlobFlags {
        let mut flags = if self.folders {
            GlobFlags::FOLDERS
        } else if self.files {
            GlobFlags::FILES
        } else {
            GlobFlags::ALL
        };

        if !self.canonical {
            flags |= GlobFlags::NO_CANON;
        }
        flags
    }
}

pub fn run(args: GlobArgs) -> ExitCode {
    match resolve_file_pattern(&args.pattern, args.flags()) {
        Ok(paths) => {
            for path in paths {
                println!("{path}");
            }
            ExitCode::from(0)
        }
        Err(e) => {
            error!("[glob] {:?}: {e}", args.pattern);
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}
