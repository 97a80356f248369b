use std::io::{self, Write};
use std::time::Duration;

use chrono::DateTime;
use filetab_fs::{EntryType, FileRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned columns with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Enable colors when stdout is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Whether to write a count/timing summary to stderr.
    pub show_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            show_summary: true,
        }
    }
}

/// Static context about a print run.
#[derive(Debug)]
pub struct PrintContext<'a> {
    /// Label for this run
    pub kind: &'a str,
    /// Number of records produced
    pub total: usize,
    /// Time spent producing them
    pub elapsed: Option<Duration>,
}

/// Receives the record stream and renders it.
pub trait RecordPrinter {
    /// Called once before any records are printed.
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()>;

    fn print_record(&mut self, record: &FileRecord, ctx: &PrintContext) -> io::Result<()>;

    /// Called once after all records; writes the summary.
    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()>;
}

pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// Generic writers cannot be checked for a TTY, so `Auto` means no color here.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let auto_color = cfg.color == ColorChoice::Auto && io::stdout().is_terminal();

        let mut printer = HumanPrinter::new(io::stdout(), io::stderr(), cfg);
        printer.use_color |= auto_color;
        printer
    }

    fn format_path(&self, record: &FileRecord) -> String {
        let code = match record.entry_type {
            _ if record.is_symlink => Some("36"),
            EntryType::Directory => Some("34"),
            EntryType::Error | EntryType::Unknown => Some("31"),
            _ => None,
        };

        match code {
            Some(code) if self.use_color => format!("\x1b[{code}m{}\x1b[0m", record.path),
            _ => record.path.clone(),
        }
    }
}

fn format_time(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_owned())
}

impl<W: Write, E: Write> RecordPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if ctx.total > 0 {
            writeln!(
                self.out,
                "{:<9} {:<4} {:>12} {:<16} PATH",
                "TYPE", "MODE", "SIZE", "MTIME"
            )?;
        }
        Ok(())
    }

    fn print_record(&mut self, record: &FileRecord, _ctx: &PrintContext) -> io::Result<()> {
        let marker = if record.is_symlink { "@" } else { "" };
        writeln!(
            self.out,
            "{:<9} {:<4} {:>12} {:<16} {}{}",
            record.entry_type.as_str(),
            record.mode,
            record.size,
            format_time(record.mtime),
            self.format_path(record),
            marker,
        )
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            let ms = ctx.elapsed.unwrap_or_default().as_secs_f64() * 1000.0;
            writeln!(
                self.err,
                "\n[{}] {} records in {:.2}ms",
                ctx.kind, ctx.total, ms
            )?;
        }
        Ok(())
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    /// Create a printer that writes to stdout and stderr.
    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter::new(io::stdout(), io::stderr(), cfg)
    }
}

impl<W: Write, E: Write> RecordPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &PrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_record(&mut self, record: &FileRecord, _ctx: &PrintContext) -> io::Result<()> {
        let line = serde_json::to_string(record).map_err(io::Error::other)?;
        writeln!(self.out, "{line}")
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            let obj = serde_json::json!({
                "type": "summary",
                "kind": ctx.kind,
                "total": ctx.total,
                "elapsed_ms": ctx.elapsed.unwrap_or_default().as_secs_f64() * 1000.0,
            });
            writeln!(self.err, "{obj}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
