//! Classifier for function definitions whose signature makes a line long.
//!
//! # Detected Patterns
//!
//! - Function names longer than half the line length limit
//! - Wide parameter lists with many parameters
//! - Wide parameter lists where several parameter names are long
//!
//! # Configuration
//!
//! - `line_length_limit`: Limit the name and width thresholds derive from
//!   (default: the analyzer's `max_line_length`, 100)
//! - `max_parameters`: Parameters allowed in a wide list (default: 4)
//! - `long_parameter_name`: Characters above which a parameter name counts as
//!   long (default: 25)

use longline_core::syntax::NodeKind;
use longline_core::{
    Classifier, ClassifyError, Config, LineContext, Violation, DEFAULT_MAX_LINE_LENGTH,
};

/// Classifier code for function-signature.
pub const CODE: &str = "LL004";

/// Classifier name for function-signature.
pub const NAME: &str = "function-signature";

/// Configuration for signature limits.
#[derive(Debug, Clone)]
pub struct FunctionSignatureConfig {
    /// Line length limit; names and parameter lists may use half of it.
    pub line_length_limit: usize,
    /// Maximum parameters in a wide parameter list.
    pub max_parameters: usize,
    /// Parameter names longer than this are long.
    pub long_parameter_name: usize,
}

impl Default for FunctionSignatureConfig {
    fn default() -> Self {
        Self {
            line_length_limit: DEFAULT_MAX_LINE_LENGTH,
            max_parameters: 4,
            long_parameter_name: 25,
        }
    }
}

/// Inspects function names and parameter lists.
#[derive(Debug, Clone, Default)]
pub struct FunctionSignatureCheck {
    config: FunctionSignatureConfig,
}

impl FunctionSignatureCheck {
    /// Creates a new classifier with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier from the `[classifiers.function-signature]` table.
    ///
    /// The line length limit falls back to `[analyzer] max_line_length`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let defaults = FunctionSignatureConfig::default();
        let line_length = config.analyzer.max_line_length;
        let Some(options) = config.classifier(NAME) else {
            return Self::new().line_length_limit(line_length);
        };

        Self {
            config: FunctionSignatureConfig {
                line_length_limit: options.get_usize("line_length_limit", line_length),
                max_parameters: options.get_usize("max_parameters", defaults.max_parameters),
                long_parameter_name: options
                    .get_usize("long_parameter_name", defaults.long_parameter_name),
            },
        }
    }

    /// Sets the line length limit.
    #[must_use]
    pub fn line_length_limit(mut self, limit: usize) -> Self {
        self.config.line_length_limit = limit;
        self
    }

    /// Sets the maximum parameter count.
    #[must_use]
    pub fn max_parameters(mut self, max: usize) -> Self {
        self.config.max_parameters = max;
        self
    }

    /// Sets the long parameter name threshold.
    #[must_use]
    pub fn long_parameter_name(mut self, chars: usize) -> Self {
        self.config.long_parameter_name = chars;
        self
    }
}

impl Classifier for FunctionSignatureCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags long function names and crowded parameter lists"
    }

    fn classify(&self, ctx: &LineContext<'_>) -> Result<Vec<Violation>, ClassifyError> {
        let anchor = ctx.anchor;
        if !anchor.is(NodeKind::FunctionDefinition) {
            return Ok(Vec::new());
        }

        let signature = anchor.signature().ok_or(ClassifyError::MissingDetail {
            classifier: NAME,
            kind: anchor.kind(),
            line: ctx.line_number(),
            expected: "function signature",
        })?;

        let half = self.config.line_length_limit / 2;
        let mut violations = Vec::new();

        if signature.name.chars().count() > half {
            violations.push(Violation::LongFunctionName);
        }

        if signature.parameter_list_width > half {
            let count = signature.parameters.len();
            if count > self.config.max_parameters {
                violations.push(Violation::ManyFunctionArguments(count));
            }

            let long_names = signature
                .parameters
                .iter()
                .filter(|p| p.name.chars().count() > self.config.long_parameter_name)
                .count();
            if long_names > 1 {
                violations.push(Violation::LongFunctionArguments(long_names));
            }
        }

        Ok(violations)
    }
}
