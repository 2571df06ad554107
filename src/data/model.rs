use std::fmt;
use std::path::{Path, PathBuf};

use super::body::ModelBody;
use super::error::ExtractWarning;
use super::extractor::{ConfigExtractor, Extraction};

// ---------------------------------------------------------------------------
// ModelKind – what a DEVSMap file describes, read from its name
// ---------------------------------------------------------------------------

/// DEVSMap files are named `<name>_<kind>.json`, e.g. `counter_atomic.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    Atomic,
    Coupled,
    /// Suffix that is neither `atomic` nor `coupled`, kept verbatim.
    Unknown(String),
}

impl ModelKind {
    /// Classify from the last `_`-separated segment of the file name, up to
    /// its first `.` (`m.v2_atomic.json` has base name `m`).
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let base = file_name.split('.').next().unwrap_or(file_name);
        let suffix = base.rsplit('_').next().unwrap_or(base);
        Self::from_suffix(suffix)
    }

    fn from_suffix(suffix: &str) -> Self {
        match suffix.to_ascii_lowercase().as_str() {
            "atomic" => ModelKind::Atomic,
            "coupled" => ModelKind::Coupled,
            _ => ModelKind::Unknown(suffix.to_string()),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Atomic => write!(f, "atomic"),
            ModelKind::Coupled => write!(f, "coupled"),
            ModelKind::Unknown(s) if s.is_empty() => write!(f, "<unknown>"),
            ModelKind::Unknown(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// LoadedModel – one document read from disk
// ---------------------------------------------------------------------------

/// A successfully extracted document together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub path: PathBuf,
    pub kind: ModelKind,
    pub extractor: ConfigExtractor,
    pub body: ModelBody,
    /// Non-fatal findings from extraction (already logged).
    pub warnings: Vec<ExtractWarning>,
}

impl LoadedModel {
    /// Bundle an extraction with its source path, classifying kind and body.
    pub fn from_extraction(path: PathBuf, extraction: Extraction) -> Self {
        let kind = ModelKind::from_path(&path);
        let body = ModelBody::from_value(extraction.extractor.model_name(), &extraction.body);
        LoadedModel {
            path,
            kind,
            extractor: extraction.extractor,
            body,
            warnings: extraction.warnings,
        }
    }
}
