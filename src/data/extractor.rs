use std::io::Read;

use serde_json::{Map, Value as JsonValue};

use super::error::{ExtractError, ExtractWarning};

/// Top-level keys with a fixed meaning. Every other key names the model.
pub const RESERVED_KEYS: [&str; 2] = ["include_sets", "parameters"];

const PARAMETERS_KEY: &str = "parameters";
const INCLUDE_SETS_KEY: &str = "include_sets";

// ---------------------------------------------------------------------------
// ConfigExtractor
// ---------------------------------------------------------------------------

/// The three values pulled out of a DEVSMap document.
///
/// Expected document layout:
///
/// ```json
/// {
///   "counter": { "s": { ... }, "x": { ... }, ... },
///   "parameters": { "period": "double" },
///   "include_sets": ["iestream"]
/// }
/// ```
///
/// The body under the model-name key is not interpreted. Everything is
/// computed once at construction and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigExtractor {
    model_name: String,
    /// `None` when the document has no `parameters` key at all.
    params: Option<JsonValue>,
    sets: JsonValue,
}

/// Everything one decode of a document yields.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub extractor: ConfigExtractor,
    pub warnings: Vec<ExtractWarning>,
    /// The uninterpreted model body (value under the model-name key).
    pub body: JsonValue,
}

impl ConfigExtractor {
    /// Decode `reader` and classify its top-level keys.
    ///
    /// Warnings are emitted through `log` and otherwise dropped; use
    /// [`ConfigExtractor::from_reader_with_warnings`] to inspect them.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExtractError> {
        let (extractor, warnings) = Self::from_reader_with_warnings(reader)?;
        for warning in &warnings {
            log::warn!("{warning}");
        }
        Ok(extractor)
    }

    /// Same as [`ConfigExtractor::from_reader`] but hands the warnings back
    /// instead of logging them.
    pub fn from_reader_with_warnings<R: Read>(
        reader: R,
    ) -> Result<(Self, Vec<ExtractWarning>), ExtractError> {
        let extraction = Self::from_reader_with_body(reader)?;
        Ok((extraction.extractor, extraction.warnings))
    }

    /// Like [`ConfigExtractor::from_reader_with_warnings`], and also keeps the
    /// value stored under the model-name key instead of dropping it.
    pub fn from_reader_with_body<R: Read>(reader: R) -> Result<Extraction, ExtractError> {
        let root: JsonValue = serde_json::from_reader(reader)?;
        let document = match root {
            JsonValue::Object(map) => map,
            other => {
                return Err(ExtractError::NotAnObject {
                    found: json_kind(&other),
                })
            }
        };
        Self::from_document(document)
    }

    fn from_document(mut document: Map<String, JsonValue>) -> Result<Extraction, ExtractError> {
        let mut warnings = Vec::new();

        let mut candidates: Vec<String> = document
            .keys()
            .filter(|key| !RESERVED_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        if candidates.len() != 1 {
            return Err(ExtractError::AmbiguousModelName { candidates });
        }
        let model_name = candidates.remove(0);

        let params = document.remove(PARAMETERS_KEY);
        if params.is_none() {
            warnings.push(ExtractWarning::MissingParameters {
                model_name: model_name.clone(),
            });
        }

        let sets = document
            .remove(INCLUDE_SETS_KEY)
            .ok_or_else(|| ExtractError::MissingIncludeSets {
                model_name: model_name.clone(),
            })?;

        log::debug!(
            "classified model '{model_name}' (parameters: {})",
            if params.is_some() { "present" } else { "absent" }
        );

        let body = document.remove(&model_name).unwrap_or(JsonValue::Null);

        Ok(Extraction {
            extractor: ConfigExtractor {
                model_name,
                params,
                sets,
            },
            warnings,
            body,
        })
    }

    /// The single non-reserved top-level key.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Value stored under `parameters`, or `None` if the key was absent.
    pub fn params(&self) -> Option<&JsonValue> {
        self.params.as_ref()
    }

    /// Value stored under `include_sets`.
    pub fn sets(&self) -> &JsonValue {
        &self.sets
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
