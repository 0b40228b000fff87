//! Shared output formatting for feedback.

use anyhow::Result;
use indexmap::IndexMap;
use longline_core::{
    display_path, Collector, Counter, FeedbackDiagnostic, FeedbackEvent, ScanSummary,
};
use miette::GraphicalReportHandler;
use serde::Serialize;
use std::path::PathBuf;

use crate::OutputFormat;

/// Print feedback in the specified format.
pub fn print(
    counter: &Counter,
    collector: &Collector,
    summary: &ScanSummary,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(counter, collector, summary)),
        OutputFormat::Json => println!("{}", render_json(counter, collector, summary)?),
        OutputFormat::Compact => print_compact(collector),
        OutputFormat::Pretty => print!("{}", render_pretty(collector)?),
    }
    Ok(())
}

fn render_text(counter: &Counter, collector: &Collector, summary: &ScanSummary) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    for (path, events) in collector.display_groups() {
        let _ = writeln!(out, "\x1b[1m{path}\x1b[0m");
        for event in events {
            let _ = writeln!(out, "{}", event.format());
        }
    }

    if !counter.violation_count_per_file().is_empty() {
        let _ = writeln!(out, "Feedback per file:");
        for (path, count) in counter.violation_count_per_file() {
            let _ = writeln!(out, "  {}: {count}", display_path(path));
        }
        let _ = writeln!(out);
    }

    let color = if counter.total_violation_count() > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    let _ = writeln!(
        out,
        "{color}Found {} feedback item(s) on {} long line(s) in {} file(s)\x1b[0m",
        counter.total_violation_count(),
        summary.lines_flagged,
        summary.files_checked,
    );
    if summary.files_skipped > 0 {
        let _ = writeln!(out, "Skipped {} unparseable file(s)", summary.files_skipped);
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a ScanSummary,
    total: usize,
    per_file: &'a IndexMap<PathBuf, usize>,
    feedback: &'a [FeedbackEvent],
}

fn render_json(counter: &Counter, collector: &Collector, summary: &ScanSummary) -> Result<String> {
    let report = JsonReport {
        summary,
        total: counter.total_violation_count(),
        per_file: counter.violation_count_per_file(),
        feedback: collector.feedback(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn print_compact(collector: &Collector) {
    for event in collector.feedback() {
        println!("{event}");
    }
}

fn render_pretty(collector: &Collector) -> Result<String> {
    let handler = GraphicalReportHandler::new();
    let mut out = String::new();
    for event in collector.feedback() {
        let diagnostic = FeedbackDiagnostic::from(event);
        handler.render_report(&mut out, &diagnostic)?;
        out.push('\n');
    }
    Ok(out)
}
