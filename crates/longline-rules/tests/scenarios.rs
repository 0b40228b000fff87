//! End-to-end runs over Python files on disk.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use longline_core::{CodeAnalyzer, Collector, Counter, FeedbackBus, ScanSummary, Violation};
use longline_python::PythonParser;
use longline_rules::all_classifiers;
use tempfile::tempdir;

fn analyzer(root: &Path) -> CodeAnalyzer {
    let mut builder = CodeAnalyzer::builder()
        .root(root)
        .parser(Arc::new(PythonParser::new()));
    for classifier in all_classifiers() {
        builder = builder.classifier_box(classifier);
    }
    builder.build().unwrap()
}

fn run(root: &Path) -> (Counter, Collector, ScanSummary) {
    let mut counter = Counter::new();
    let mut collector = Collector::new();
    let summary = {
        let mut bus = FeedbackBus::new();
        bus.register(&mut counter);
        bus.register(&mut collector);
        analyzer(root).analyze(&mut bus).unwrap()
    };
    (counter, collector, summary)
}

/// Shared buffer the test subscriber writes log lines into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs the analyzer and returns the warnings it logged.
fn run_logging_warnings(root: &Path) -> (ScanSummary, Vec<String>) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_target(false)
        .with_writer(move || writer.clone())
        .finish();

    let (_, _, summary) = tracing::subscriber::with_default(subscriber, || run(root));

    let bytes = buffer.0.lock().unwrap().clone();
    let warnings = String::from_utf8(bytes)
        .unwrap()
        .lines()
        .filter(|l| l.contains("WARN"))
        .map(str::to_string)
        .collect();
    (summary, warnings)
}

fn kinds(collector: &Collector) -> Vec<Violation> {
    collector.feedback().iter().map(|e| e.kind()).collect()
}

#[test]
fn long_comment_line() {
    let dir = tempdir().unwrap();
    let comment = format!("# {}\n", "explain the reasoning ".repeat(6));
    fs::write(dir.path().join("notes.py"), format!("x = 1\n{comment}y = 2\n")).unwrap();

    let (counter, collector, _) = run(dir.path());

    assert_eq!(counter.total_violation_count(), 1);
    let event = &collector.feedback()[0];
    assert_eq!(event.kind(), Violation::Comment);
    assert_eq!(event.line_number(), 2);
    assert!(event.text().contains("splitting your comment"));
}

#[test]
fn arithmetic_with_trailing_comment() {
    let dir = tempdir().unwrap();
    let line = format!("x = 1 + 2 + 3 + 4 + 5  # {}\n", "c".repeat(80));
    fs::write(dir.path().join("sums.py"), line).unwrap();

    let (_, collector, _) = run(dir.path());

    assert_eq!(
        kinds(&collector),
        vec![Violation::CommentAfterStatement, Violation::ExtractVariable]
    );
}

#[test]
fn long_function_name() {
    let dir = tempdir().unwrap();
    let src = format!(
        "def a_very_long_function_name_that_exceeds_fifty_characters_definitely(x, y):  # {}\n    return x + y\n",
        "n".repeat(30)
    );
    fs::write(dir.path().join("names.py"), src).unwrap();

    let (_, collector, _) = run(dir.path());

    assert_eq!(kinds(&collector), vec![Violation::LongFunctionName]);
}

#[test]
fn tuple_assignment() {
    let dir = tempdir().unwrap();
    let src = format!(
        "first_{0}, second_{0} = compute_first_value(), compute_second_value()\n",
        "w".repeat(30)
    );
    fs::write(dir.path().join("pairs.py"), src).unwrap();

    let (_, collector, _) = run(dir.path());

    assert_eq!(kinds(&collector), vec![Violation::MultiAssignment]);
}

#[test]
fn parameter_count_boundary() {
    let dir = tempdir().unwrap();
    let four = "def four(alpha_parameter_one, beta_parameter_two, gamma_parameter_3, delta_parameter_4):  # padding the line well past the limit\n    pass\n";
    let five = "def five(alpha_parameter_one, beta_parameter_two, gamma_parameter_3, delta_parameter_4, e):  # padding the line well past the limit\n    pass\n";
    fs::write(dir.path().join("a_four.py"), four).unwrap();
    fs::write(dir.path().join("b_five.py"), five).unwrap();

    let (counter, collector, summary) = run(dir.path());

    assert_eq!(summary.lines_flagged, 2);
    assert_eq!(counter.total_violation_count(), 1);
    assert_eq!(kinds(&collector), vec![Violation::ManyFunctionArguments(5)]);
    assert!(collector.feedback()[0].path().ends_with("b_five.py"));
}

#[test]
fn unparseable_file_is_skipped() {
    let dir = tempdir().unwrap();
    let comment = format!("# {}\n", "x".repeat(120));
    fs::write(
        dir.path().join("a_broken.py"),
        format!("{comment}def broken(:\n"),
    )
    .unwrap();
    fs::write(dir.path().join("b_fine.py"), &comment).unwrap();

    let (counter, collector, summary) = run(dir.path());

    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.files_checked, 1);
    assert_eq!(counter.total_violation_count(), 1);
    assert!(collector.feedback()[0].path().ends_with("b_fine.py"));
}

#[test]
fn unparseable_file_logs_one_warning() {
    let dir = tempdir().unwrap();
    let comment = format!("# {}\n", "x".repeat(120));
    fs::write(dir.path().join("a_broken.py"), format!("{comment}def broken(:\n")).unwrap();
    fs::write(dir.path().join("b_fine.py"), &comment).unwrap();

    let (summary, warnings) = run_logging_warnings(dir.path());

    assert_eq!(summary.files_skipped, 1);
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("Failed to parse"));
    assert!(warnings[0].contains("a_broken.py"));
}

#[test]
fn unresolved_line_logs_file_and_line() {
    let dir = tempdir().unwrap();
    let src = format!("\"\"\"Module docs.\n{}\n\"\"\"\n", "d".repeat(120));
    fs::write(dir.path().join("docs.py"), src).unwrap();

    let (summary, warnings) = run_logging_warnings(dir.path());

    assert_eq!(summary.lines_unresolved, 1);
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("docs.py:2"));
}

#[test]
fn no_long_lines() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("short.py"), "x = 1\n# fine\n").unwrap();

    let (counter, collector, summary) = run(dir.path());

    assert_eq!(counter.total_violation_count(), 0);
    assert!(collector.is_empty());
    assert_eq!(summary.files_checked, 1);
}

#[test]
fn lines_inside_docstrings_are_skipped() {
    let dir = tempdir().unwrap();
    let src = format!("\"\"\"Module docs.\n{}\n\"\"\"\n", "d".repeat(120));
    fs::write(dir.path().join("docs.py"), src).unwrap();

    let (counter, _, summary) = run(dir.path());

    assert_eq!(summary.lines_unresolved, 1);
    assert_eq!(counter.total_violation_count(), 0);
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempdir().unwrap();
    let src = format!(
        "# {}\nx = 1 + 2 + 3 + 4 + 5  # {}\na, b = {}, 2\n",
        "c".repeat(110),
        "t".repeat(80),
        "9".repeat(100)
    );
    fs::write(dir.path().join("mixed.py"), src).unwrap();

    let (first_counter, first, _) = run(dir.path());
    let (second_counter, second, _) = run(dir.path());

    assert_eq!(first.feedback(), second.feedback());
    assert_eq!(
        first_counter.total_violation_count(),
        second_counter.total_violation_count()
    );
    assert_eq!(first.feedback().len(), 4);
}
