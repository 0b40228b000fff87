//! # longline-rules
//!
//! Built-in classifiers for longline.
//!
//! Each classifier looks at one over-length line and explains what makes it
//! long.
//!
//! ## Available Classifiers
//!
//! | Code | Name | Feedback |
//! |------|------|----------|
//! | LL001 | `long-comment` | `comment`, `comment_after_statement` |
//! | LL002 | `extract-variable` | `extract_variable` |
//! | LL003 | `multi-assignment` | `multi_assignment` |
//! | LL004 | `function-signature` | `fundef_long_name`, `fundef_many_arguments`, `fundef_long_arguments` |
//!
//! ## Usage
//!
//! ```ignore
//! use longline_core::CodeAnalyzer;
//! use longline_rules::{ExtractVariable, LongComment};
//!
//! let analyzer = CodeAnalyzer::builder()
//!     .root("./course")
//!     .parser(Arc::new(PythonParser::new()))
//!     .classifier(LongComment::new())
//!     .classifier(ExtractVariable::new().max_operands(6))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extract_variable;
mod function_signature;
mod long_comment;
mod multi_assignment;
mod presets;

pub use extract_variable::ExtractVariable;
pub use function_signature::{FunctionSignatureCheck, FunctionSignatureConfig};
pub use long_comment::LongComment;
pub use multi_assignment::MultiAssignment;
pub use presets::{all_classifiers, classifiers_from_config, Preset};

/// Re-export core types for convenience.
pub use longline_core::{Classifier, ClassifierBox, Violation};
