//! Python parser using Tree-sitter.

use std::time::{Duration, Instant};

use longline_core::syntax::SyntaxTree;
use longline_core::{ParseError, SourceParser};
use tracing::debug;
use tree_sitter::{Language, ParseOptions, ParseState, Parser, Point, Tree};

use crate::lower::Lowering;

/// Parses Python source and lowers it into a [`SyntaxTree`].
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    /// Creates a new Python parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn parser(&self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Setup(e.to_string()))?;
        Ok(parser)
    }

    fn lower(source: &str, tree: &Tree) -> Result<SyntaxTree, ParseError> {
        let root = tree.root_node();
        let lowering = Lowering::new(source);

        if root.has_error() {
            let (line, column) = lowering.first_error(root);
            return Err(ParseError::Syntax { line, column });
        }

        let syntax = lowering.lower(root);
        debug!("Lowered {} nodes", syntax.len());
        Ok(syntax)
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for PythonParser {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let tree = self
            .parser()?
            .parse(source, None)
            .ok_or(ParseError::Aborted)?;
        Self::lower(source, &tree)
    }

    /// Stops tree-sitter from its progress callback once `budget` is spent.
    fn parse_within(&self, source: &str, budget: Duration) -> Result<SyntaxTree, ParseError> {
        let deadline = Instant::now() + budget;
        let bytes = source.as_bytes();
        let mut read = |offset: usize, _: Point| bytes.get(offset..).unwrap_or_default();
        let mut expired = |_: &ParseState| Instant::now() >= deadline;

        let tree = self
            .parser()?
            .parse_with_options(
                &mut read,
                None,
                Some(ParseOptions::new().progress_callback(&mut expired)),
            )
            .ok_or(ParseError::TimedOut(budget))?;
        Self::lower(source, &tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use longline_core::syntax::NodeKind;

    fn parse(src: &str) -> SyntaxTree {
        PythonParser::new().parse(src).unwrap()
    }

    #[test]
    fn lone_comment_is_the_only_node_on_its_line() {
        let tree = parse("# just a comment\nx = 1\n");
        let anchor = tree.locate(1).unwrap();
        assert!(anchor.is(NodeKind::Comment));
        assert_eq!(tree.same_line_nodes(anchor.id()).len(), 1);
    }

    #[test]
    fn trailing_comment_ends_the_line() {
        let tree = parse("total = price * qty  # gross\n");
        let anchor = tree.locate(1).unwrap();
        assert!(anchor.is(NodeKind::Assignment));
        let nodes = tree.same_line_nodes(anchor.id());
        assert!(nodes.last().unwrap().is(NodeKind::Comment));
        assert!(nodes.iter().any(|n| n.is(NodeKind::BinaryOperator)));
    }

    #[test]
    fn tuple_assignment_shape() {
        let tree = parse("a, b = 1, 2\nc = 1, 2\n(d, e) = f()\n");
        let first = tree.locate(1).unwrap().assignment().copied().unwrap();
        assert_eq!((first.targets, first.values), (2, 2));
        let second = tree.locate(2).unwrap().assignment().copied().unwrap();
        assert_eq!((second.targets, second.values), (1, 2));
        let third = tree.locate(3).unwrap().assignment().copied().unwrap();
        assert_eq!((third.targets, third.values), (2, 1));
    }

    #[test]
    fn annotated_assignment_without_value() {
        let tree = parse("x: int\n");
        let shape = tree.locate(1).unwrap().assignment().copied().unwrap();
        assert_eq!((shape.targets, shape.values), (1, 0));
    }

    #[test]
    fn function_signature_is_recorded() {
        let tree = parse(
            "def area(width: int, height=2, *args, key, **kwargs):\n    return width\n",
        );
        let def = tree.locate(1).unwrap();
        assert!(def.is(NodeKind::FunctionDefinition));
        let sig = def.signature().unwrap();
        assert_eq!(sig.name, "area");
        let names: Vec<_> = sig.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["width", "height", "args", "key", "kwargs"]);
        assert_eq!(
            sig.parameter_list_width,
            "(width: int, height=2, *args, key, **kwargs)".len()
        );
    }

    #[test]
    fn separators_are_not_parameters() {
        let tree = parse("def f(a, /, b, *, c):\n    pass\n");
        let sig = tree.locate(1).unwrap().signature().unwrap().clone();
        assert_eq!(sig.parameters.len(), 3);
    }

    #[test]
    fn wrapped_parameter_list_width_collapses_whitespace() {
        let tree = parse("def f(\n    a,\n    b,\n):\n    pass\n");
        let sig = tree.locate(1).unwrap().signature().unwrap().clone();
        assert_eq!(sig.parameter_list_width, "( a, b, )".len());
    }

    #[test]
    fn body_statements_anchor_their_own_lines() {
        let tree = parse("def f():\n    # body comment\n    return 1\n");
        let anchor = tree.locate(2).unwrap();
        assert!(anchor.is(NodeKind::Comment));
        assert_eq!(tree.same_line_nodes(anchor.id()).len(), 1);
    }

    #[test]
    fn decorator_line_is_not_the_function() {
        let tree = parse("@cache\ndef f():\n    pass\n");
        assert!(!tree.locate(1).unwrap().is(NodeKind::FunctionDefinition));
        assert!(tree.locate(2).unwrap().is(NodeKind::FunctionDefinition));
    }

    #[test]
    fn lines_inside_multi_line_strings_do_not_resolve() {
        let tree = parse("text = \"\"\"first\nsecond\nthird\"\"\"\ny = 2\n");
        assert!(tree.locate(1).is_ok());
        assert_eq!(tree.locate(2).unwrap_err().line, 2);
        assert!(tree.locate(3).is_err());
        assert!(tree.locate(4).is_ok());
    }

    #[test]
    fn binary_operators_nest_left() {
        let tree = parse("r = 1 + 2 + 3\n");
        let count = tree
            .iter()
            .filter(|n| n.is(NodeKind::BinaryOperator))
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = PythonParser::new()
            .parse("x = 1\ndef broken(:\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn spent_budget_abandons_the_parse() {
        let source = "total = price * quantity + shipping\n".repeat(20_000);
        let err = PythonParser::new()
            .parse_within(&source, Duration::ZERO)
            .unwrap_err();
        assert_eq!(err, ParseError::TimedOut(Duration::ZERO));
    }

    #[test]
    fn budget_parse_matches_plain_parse() {
        let source = "a, b = 1, 2\n# note\ndef f(x):\n    return x\n";
        let parser = PythonParser::new();
        let within = parser.parse_within(source, Duration::from_secs(5)).unwrap();
        let plain = parser.parse(source).unwrap();
        assert_eq!(within.len(), plain.len());
        assert!(within.locate(2).unwrap().is(NodeKind::Comment));
    }

    #[test]
    fn empty_file_has_only_a_root() {
        let tree = parse("");
        assert_eq!(tree.len(), 1);
        assert!(tree.locate(1).is_err());
    }
}
