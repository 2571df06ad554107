use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::model::LoadedModel;

// ---------------------------------------------------------------------------
// ModelSummary – one printable row per loaded document
// ---------------------------------------------------------------------------

/// Flattened view of a [`LoadedModel`] for printing.
///
/// Body entries are rendered as `name:type` (variables, ports, components),
/// `function(conditions)` (transitions) and `comp.port->comp.port`
/// (couplings).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub file: String,
    pub kind: String,
    pub model_name: String,
    pub has_parameters: bool,
    /// Keys of `parameters` when it is an object, otherwise empty.
    pub parameter_names: Vec<String>,
    pub include_sets: Vec<String>,
    pub state_variables: Vec<String>,
    pub input_ports: Vec<String>,
    pub output_ports: Vec<String>,
    pub transitions: Vec<String>,
    pub components: Vec<String>,
    pub ic: Vec<String>,
    pub eic: Vec<String>,
    pub eoc: Vec<String>,
}

impl ModelSummary {
    pub fn from_loaded(model: &LoadedModel) -> Self {
        let ex = &model.extractor;
        let body = &model.body;
        let parameter_names = match ex.params() {
            Some(JsonValue::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        };
        let include_sets = match ex.sets() {
            JsonValue::Array(items) => items.iter().map(render_entry).collect(),
            other => vec![render_entry(other)],
        };

        ModelSummary {
            file: model.path.display().to_string(),
            kind: model.kind.to_string(),
            model_name: ex.model_name().to_string(),
            has_parameters: ex.params().is_some(),
            parameter_names,
            include_sets,
            state_variables: strings(&body.state),
            input_ports: strings(&body.inputs),
            output_ports: strings(&body.outputs),
            transitions: body
                .transitions
                .iter()
                .map(|(name, conditions)| format!("{name}({conditions})"))
                .collect(),
            components: strings(&body.components),
            ic: strings(&body.ic),
            eic: strings(&body.eic),
            eoc: strings(&body.eoc),
        }
    }
}

fn strings<T: Display>(items: &[T]) -> Vec<String> {
    items.iter().map(|i| i.to_string()).collect()
}

/// Strings print bare; everything else as compact JSON.
fn render_entry(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

pub fn write_json<W: Write>(out: W, summaries: &[ModelSummary]) -> Result<()> {
    serde_json::to_writer_pretty(out, summaries).context("writing JSON report")
}

const CSV_HEADER: [&str; 14] = [
    "file",
    "kind",
    "model_name",
    "has_parameters",
    "parameter_names",
    "include_sets",
    "state_variables",
    "input_ports",
    "output_ports",
    "transitions",
    "components",
    "ic",
    "eic",
    "eoc",
];

/// One row per model; list columns are semicolon-separated.
pub fn write_csv<W: Write>(out: W, summaries: &[ModelSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(CSV_HEADER)
        .context("writing CSV header")?;

    for s in summaries {
        let row: [String; 14] = [
            s.file.clone(),
            s.kind.clone(),
            s.model_name.clone(),
            s.has_parameters.to_string(),
            s.parameter_names.join(";"),
            s.include_sets.join(";"),
            s.state_variables.join(";"),
            s.input_ports.join(";"),
            s.output_ports.join(";"),
            s.transitions.join(";"),
            s.components.join(";"),
            s.ic.join(";"),
            s.eic.join(";"),
            s.eoc.join(";"),
        ];
        writer
            .write_record(&row)
            .with_context(|| format!("writing CSV row for {}", s.file))?;
    }
    writer.flush().context("flushing CSV report")?;
    Ok(())
}

/// Human-readable listing. Body sections that are empty are left out.
pub fn write_text<W: Write>(mut out: W, summaries: &[ModelSummary]) -> Result<()> {
    for s in summaries {
        writeln!(out, "{} ({}, {})", s.model_name, s.kind, s.file)?;
        if s.has_parameters {
            list_line(&mut out, "parameters:", &s.parameter_names)?;
        } else {
            writeln!(out, "  {:<14}<none>", "parameters:")?;
        }
        list_line(&mut out, "include_sets:", &s.include_sets)?;

        let body = [
            ("state:", &s.state_variables),
            ("x:", &s.input_ports),
            ("y:", &s.output_ports),
            ("transitions:", &s.transitions),
            ("components:", &s.components),
            ("ic:", &s.ic),
            ("eic:", &s.eic),
            ("eoc:", &s.eoc),
        ];
        for (label, items) in body {
            if !items.is_empty() {
                list_line(&mut out, label, items)?;
            }
        }
    }
    Ok(())
}

fn list_line<W: Write>(out: &mut W, label: &str, items: &[String]) -> Result<()> {
    writeln!(out, "  {label:<14}[{}]", items.join(", "))?;
    Ok(())
}
