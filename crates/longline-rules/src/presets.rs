//! Classifier presets for common configurations.

use crate::{ExtractVariable, FunctionSignatureCheck, LongComment, MultiAssignment};
use longline_core::{ClassifierBox, Config};
use tracing::warn;

/// Preset configurations for longline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every classifier with default limits.
    Recommended,
    /// Only comment feedback, for gradual adoption.
    CommentsOnly,
}

impl Preset {
    /// Looks a preset up by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "comments-only" => Some(Self::CommentsOnly),
            _ => None,
        }
    }

    /// Returns the classifiers for this preset with default limits.
    #[must_use]
    pub fn classifiers(self) -> Vec<ClassifierBox> {
        self.configured(&Config::default())
    }

    /// Returns the classifiers for this preset, reading limits from `config`.
    #[must_use]
    pub fn configured(self, config: &Config) -> Vec<ClassifierBox> {
        match self {
            Self::Recommended => vec![
                Box::new(LongComment::new()),
                Box::new(ExtractVariable::from_config(config)),
                Box::new(MultiAssignment::new()),
                Box::new(FunctionSignatureCheck::from_config(config)),
            ],
            Self::CommentsOnly => vec![Box::new(LongComment::new())],
        }
    }
}

/// Returns every classifier with default limits, in publication order.
///
/// Includes:
/// - `long-comment` (LL001)
/// - `extract-variable` (LL002)
/// - `multi-assignment` (LL003)
/// - `function-signature` (LL004)
#[must_use]
pub fn all_classifiers() -> Vec<ClassifierBox> {
    Preset::Recommended.classifiers()
}

/// Builds the classifiers of the configured preset (default: recommended).
///
/// Disabled classifiers are still returned; the analyzer drops them.
#[must_use]
pub fn classifiers_from_config(config: &Config) -> Vec<ClassifierBox> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            warn!("Unknown preset '{name}', using recommended");
            Preset::Recommended
        }),
    };
    preset.configured(config)
}
