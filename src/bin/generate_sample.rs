use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{json, Value as JsonValue};

/// Atomic model with parameters: counts up on every input event.
///
/// Transition functions are keyed by condition, each holding the new state
/// (`otherwise` is the fallback branch).
fn counter_atomic() -> JsonValue {
    json!({
        "counter": {
            "s": { "count": "int", "sigma": "double" },
            "x": { "in": "int" },
            "y": { "out": "int" },
            "delta_int": {
                "otherwise": { "count": "count + step", "sigma": "period" }
            },
            "delta_ext": {
                "in.bagSize() > 0": { "sigma": "sigma - e" },
                "otherwise": { "sigma": "sigma - e" }
            },
            "delta_con": {
                "otherwise": { "count": "count + step", "sigma": "period" }
            },
            "lambda": {
                "otherwise": { "out": "count" }
            },
            "ta": {
                "otherwise": "sigma"
            }
        },
        "parameters": { "step": "int", "period": "double" },
        "include_sets": ["iestream"]
    })
}

/// Atomic model without a `parameters` key.
fn generator_atomic() -> JsonValue {
    json!({
        "generator": {
            "s": { "sigma": "double" },
            "x": { "start": "bool" },
            "y": { "out": "int" },
            "delta_int": {
                "otherwise": { "sigma": "1.0" }
            },
            "delta_ext": {
                "start.bagSize() > 0": { "sigma": "0.0" }
            },
            "lambda": {
                "otherwise": { "out": "1" }
            },
            "ta": {
                "otherwise": "sigma"
            }
        },
        "include_sets": ["iestream"]
    })
}

/// Coupled model wiring the two atomics together.
fn top_coupled() -> JsonValue {
    json!({
        "top": {
            "x": { "start": "bool" },
            "y": { "out": "int" },
            "components": { "gen": "generator", "cnt": "counter" },
            "ic": [
                { "component_from": "gen", "port_from": "out", "component_to": "cnt", "port_to": "in" }
            ],
            "eic": [
                { "port_from": "start", "component_to": "gen", "port_to": "start" }
            ],
            "eoc": [
                { "component_from": "cnt", "port_from": "out", "port_to": "out" }
            ]
        },
        "parameters": {},
        "include_sets": ["counter", "generator"]
    })
}

fn samples() -> [(&'static str, JsonValue); 3] {
    [
        ("counter_atomic.json", counter_atomic()),
        ("generator_atomic.json", generator_atomic()),
        ("top_coupled.json", top_coupled()),
    ]
}

fn write_document(dir: &Path, name: &str, doc: &JsonValue) -> Result<PathBuf> {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(doc).context("serializing sample")?;
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("samples"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    for (name, doc) in &samples() {
        let path = write_document(&out_dir, name, doc)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
