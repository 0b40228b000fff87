//! # longline-python
//!
//! Tree-sitter powered Python support for longline.
//!
//! [`PythonParser`] implements [`longline_core::SourceParser`]: it parses a
//! file with `tree-sitter-python` and lowers the concrete syntax tree onto
//! the core's language-neutral node arena, recording assignment shapes and
//! function signatures along the way.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
mod parser;

pub use parser::PythonParser;
