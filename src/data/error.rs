use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Fatal extraction errors
// ---------------------------------------------------------------------------

/// Reasons a DEVSMap document cannot be turned into a [`ConfigExtractor`].
///
/// [`ConfigExtractor`]: super::extractor::ConfigExtractor
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document is not valid JSON")]
    Decode(#[from] serde_json::Error),

    #[error("document top level is a {found}, expected a JSON object")]
    NotAnObject { found: &'static str },

    #[error("{}", ambiguous_message(.candidates))]
    AmbiguousModelName { candidates: Vec<String> },

    #[error("model '{model_name}' has no include_sets key")]
    MissingIncludeSets { model_name: String },
}

fn ambiguous_message(candidates: &[String]) -> String {
    if candidates.is_empty() {
        "missing model name: every top-level key is reserved".to_string()
    } else {
        format!(
            "ambiguous model name: {} candidate keys ({})",
            candidates.len(),
            candidates.join(", ")
        )
    }
}

impl ExtractError {
    /// Process exit status for this failure. Each violated invariant gets its
    /// own code; decode failures share one.
    pub fn exit_code(&self) -> u8 {
        match self {
            ExtractError::Decode(_) | ExtractError::NotAnObject { .. } => 2,
            ExtractError::AmbiguousModelName { .. } => 3,
            ExtractError::MissingIncludeSets { .. } => 4,
        }
    }

    /// True for failures raised before any key was classified.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            ExtractError::Decode(_) | ExtractError::NotAnObject { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Non-fatal warnings
// ---------------------------------------------------------------------------

/// Conditions worth reporting that do not stop extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractWarning {
    MissingParameters { model_name: String },
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractWarning::MissingParameters { model_name } => {
                write!(f, "model '{model_name}' has no parameters")
            }
        }
    }
}
