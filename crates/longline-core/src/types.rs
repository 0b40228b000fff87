//! Core types for violations and feedback.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use std::path::{Component, Path};

use crate::context::SourceLocation;

/// A classified reason why a line is long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// The whole line is a comment.
    Comment,
    /// A comment trails executable code.
    CommentAfterStatement,
    /// Too many operands are combined in one expression.
    ExtractVariable,
    /// A tuple assignment binds several names at once.
    MultiAssignment,
    /// A function's name is very long.
    LongFunctionName,
    /// A function takes this many parameters.
    ManyFunctionArguments(usize),
    /// This many parameters of a function have long names.
    LongFunctionArguments(usize),
}

impl Violation {
    /// Stable snake_case identifier of the violation kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::CommentAfterStatement => "comment_after_statement",
            Self::ExtractVariable => "extract_variable",
            Self::MultiAssignment => "multi_assignment",
            Self::LongFunctionName => "fundef_long_name",
            Self::ManyFunctionArguments(_) => "fundef_many_arguments",
            Self::LongFunctionArguments(_) => "fundef_long_arguments",
        }
    }

    /// Renders the guidance text shown to the user.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Comment => "Try splitting your comment into multiple lines so that it doesn't \
                              exceed the line length limit."
                .to_string(),
            Self::CommentAfterStatement => "Try placing your comment above the relevant line to \
                                            prevent exceeding the line length limit."
                .to_string(),
            Self::ExtractVariable => "This line contains a lot of expressions. Storing the \
                                      results in a variable with a descriptive name will \
                                      increase the readability."
                .to_string(),
            Self::MultiAssignment => "This line contains multiple assignments that can be split \
                                      up into their own lines to reduce the line length."
                .to_string(),
            Self::LongFunctionName => "This function has a very long name, which can probably \
                                       be shortened without losing any expressiveness."
                .to_string(),
            Self::ManyFunctionArguments(count) => format!(
                "This function has {count} arguments. Try splitting this function up into \
                 multiple functions with less arguments"
            ),
            Self::LongFunctionArguments(count) => format!(
                "This function has {count} arguments with a long name. These can probably be \
                 shortened without losing any expressiveness."
            ),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A violation paired with its rendered guidance and location.
///
/// Events are created once and only ever shared by reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackEvent {
    kind: Violation,
    text: String,
    location: SourceLocation,
    #[serde(rename = "code_snippet")]
    code: String,
}

impl FeedbackEvent {
    /// Creates an event, rendering the violation's text.
    #[must_use]
    pub fn new(kind: Violation, location: SourceLocation) -> Self {
        Self {
            kind,
            text: kind.render(),
            code: location.code().to_string(),
            location,
        }
    }

    /// The violation kind.
    #[must_use]
    pub fn kind(&self) -> Violation {
        self.kind
    }

    /// Rendered guidance text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the over-length line is.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The offending line, without its terminator.
    #[must_use]
    pub fn code_snippet(&self) -> &str {
        &self.code
    }

    /// Line number of the offending line.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.location.line_number
    }

    /// Path of the file the line belongs to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.location.path
    }

    /// Formats the event for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} at {}:{}\n",
            self.kind.code(),
            display_path(self.path()),
            self.line_number(),
        );
        let _ = writeln!(output, "  | {}", self.code);
        let _ = writeln!(output, "  = help: {}", self.text);
        output
    }
}

impl std::fmt::Display for FeedbackEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.location.path.display(),
            self.location.line_number,
            self.kind.code(),
            self.text
        )
    }
}

/// Shortens a path for display: more than three components become `...`
/// followed by the last three.
///
/// ```
/// use std::path::Path;
/// use longline_core::display_path;
///
/// assert_eq!(display_path(Path::new("/home/ann/course/week1/box.py")), ".../course/week1/box.py");
/// assert_eq!(display_path(Path::new("week1/box.py")), "week1/box.py");
/// ```
#[must_use]
pub fn display_path(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.len() > 3 {
        format!(".../{}", parts[parts.len() - 3..].join("/"))
    } else {
        path.display().to_string()
    }
}

/// A feedback event as a miette diagnostic for graphical display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct FeedbackDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&FeedbackEvent> for FeedbackDiagnostic {
    fn from(event: &FeedbackEvent) -> Self {
        let name = format!("{}:{}", display_path(event.path()), event.line_number());
        let snippet = event.code_snippet().to_string();
        let length = snippet.len();
        Self {
            message: format!(
                "[{}] line {} is {} characters long",
                event.kind().code(),
                event.line_number(),
                event.location().length()
            ),
            help: Some(event.text().to_string()),
            source_code: NamedSource::new(name, snippet),
            span: SourceSpan::from((0, length)),
            label_message: event.kind().code().to_string(),
        }
    }
}
