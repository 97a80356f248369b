use std::io::{Stderr, Stdout};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::Args;
use filetab_fs::{Column, FileRecord, Operator, QueryConstraints, generate};
use log::debug;

use crate::commands::CommandResult;
use crate::printer::{
    ColorChoice, HumanPrinter, JsonPrinter, OutputFormat, PrintContext, PrinterConfig,
    RecordPrinter,
};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output records as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    /// Create a printer based on the output options.
    pub fn make_printer(&self) -> Box<dyn RecordPrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        let cfg = PrinterConfig {
            format,
            color,
            show_summary: !self.quiet,
        };

        match cfg.format {
            OutputFormat::Human => Box::new(HumanPrinter::<Stdout, Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout, Stderr>::stdout(cfg)),
        }
    }
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Exact path to inspect (repeatable)
    #[arg(long, value_name = "PATH")]
    pub path: Vec<String>,

    /// Path pattern; `%` matches within a component, a final `%%` matches recursively
    #[arg(long, value_name = "PATTERN")]
    pub path_like: Vec<String>,

    /// Directory whose immediate children are inspected (repeatable)
    #[arg(long, value_name = "DIR")]
    pub directory: Vec<String>,

    /// Directory pattern, expanded to directories only
    #[arg(long, value_name = "PATTERN")]
    pub directory_like: Vec<String>,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

impl QueryArgs {
    pub fn constraints(&self) -> QueryConstraints {
        let bound = [
            (Column::Path, Operator::Equals, &self.path),
            (Column::Path, Operator::Like, &self.path_like),
            (Column::Directory, Operator::Equals, &self.directory),
            (Column::Directory, Operator::Like, &self.directory_like),
        ];

        bound
            .into_iter()
            .flat_map(|(column, op, values)| values.iter().map(move |v| (column, op, v.clone())))
            .collect()
    }
}

pub fn run(args: QueryArgs) -> ExitCode {
    match execute(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: &QueryArgs) -> CommandResult<ExitCode> {
    let constraints = args.constraints();
    if constraints.is_empty() {
        bail!("no predicates given; use --path, --path-like, --directory or --directory-like");
    }

    let started = Instant::now();
    let records = generate(&constraints);
    let elapsed = started.elapsed();
    debug!("[query] {} record(s) in {:?}", records.len(), elapsed);

    let mut printer = args.output.make_printer();
    print_records(printer.as_mut(), &records, elapsed)
        .context("failed to write results")?;

    Ok(ExitCode::from(0))
}

fn print_records(
    printer: &mut dyn RecordPrinter,
    records: &[FileRecord],
    elapsed: std::time::Duration,
) -> std::io::Result<()> {
    let ctx = PrintContext {
        kind: "query",
        total: records.len(),
        elapsed: Some(elapsed),
    };

    printer.begin(&ctx)?;
    for record in records {
        printer.print_record(record, &ctx)?;
    }
    printer.finish(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use filetab_fs::ConstraintSource;

    use crate::commands::{Cli, Command};

    fn parse(argv: &[&str]) -> QueryArgs {
        match Cli::parse_from(argv).command {
            Command::Query(args) => args,
            other => panic!("expected query command, got {other:?}"),
        }
    }

    #[test]
    fn constraints_bind_each_flag_to_its_column_and_operator() {
        let args = parse(&[
            "filetab",
            "query",
            "--path",
            "/a",
            "--path",
            "/b",
            "--path-like",
            "/c/%",
            "--directory",
            "/d",
            "--directory-like",
            "/e/%",
        ]);
        let qc = args.constraints();

        assert_eq!(qc.get_all(Column::Path, Operator::Equals).len(), 2);
        assert!(qc.get_all(Column::Path, Operator::Like).contains("/c/%"));

        let directories = qc.get_all(Column::Directory, Operator::Equals);
        let directory_patterns = qc.get_all(Column::Directory, Operator::Like);
        assert!(directories.contains("/d"));
        assert!(directory_patterns.contains("/e/%"));
    }

    #[test]
    fn execute_without_predicates_is_an_error() {
        let args = parse(&["filetab", "query"]);
        assert!(execute(&args).is_err());
    }
}
