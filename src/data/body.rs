use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// A named, typed slot: a state variable or a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub datatype: String,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.datatype)
    }
}

/// A sub-model instance inside a coupled model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub model: String,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.model)
    }
}

/// `component.port`. External endpoints carry the coupled model's own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub component: String,
    pub port: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coupling {
    pub from: Endpoint,
    pub to: Endpoint,
}

impl fmt::Display for Coupling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}->{}.{}",
            self.from.component, self.from.port, self.to.component, self.to.port
        )
    }
}

/// Transition functions an atomic model may define, in report order.
pub const TRANSITION_KEYS: [&str; 5] = ["delta_int", "delta_ext", "delta_con", "lambda", "ta"];

// ---------------------------------------------------------------------------
// ModelBody – read-only inventory of the value under the model-name key
// ---------------------------------------------------------------------------

/// What a model body declares.
///
/// Atomic bodies contribute `s`, `x`, `y` and the transition keys; coupled
/// bodies contribute `x`, `y`, `components`, `ic`, `eic` and `eoc`. Anything
/// of an unexpected shape is skipped, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelBody {
    pub state: Vec<Variable>,
    pub inputs: Vec<Variable>,
    pub outputs: Vec<Variable>,
    /// `(function, number of top-level conditions)` for each one present.
    pub transitions: Vec<(String, usize)>,
    pub components: Vec<Component>,
    pub ic: Vec<Coupling>,
    pub eic: Vec<Coupling>,
    pub eoc: Vec<Coupling>,
}

impl ModelBody {
    pub fn from_value(model_name: &str, body: &JsonValue) -> Self {
        let Some(body) = body.as_object() else {
            return ModelBody::default();
        };

        let transitions = TRANSITION_KEYS
            .iter()
            .filter_map(|key| {
                body.get(*key).map(|v| {
                    let conditions = match v {
                        JsonValue::Object(map) => map.len(),
                        _ => 1,
                    };
                    (key.to_string(), conditions)
                })
            })
            .collect();

        let components = match body.get("components") {
            Some(JsonValue::Object(map)) => map
                .iter()
                .map(|(name, model)| Component {
                    name: name.clone(),
                    model: render(model),
                })
                .collect(),
            _ => Vec::new(),
        };

        ModelBody {
            state: variables(body, "s"),
            inputs: variables(body, "x"),
            outputs: variables(body, "y"),
            transitions,
            components,
            ic: couplings(body, "ic", |c| (field(c, "component_from"), field(c, "component_to"))),
            eic: couplings(body, "eic", |c| (model_name.to_string(), field(c, "component_to"))),
            eoc: couplings(body, "eoc", |c| (field(c, "component_from"), model_name.to_string())),
        }
    }
}

fn variables(body: &Map<String, JsonValue>, key: &str) -> Vec<Variable> {
    match body.get(key) {
        Some(JsonValue::Object(map)) => map
            .iter()
            .map(|(name, datatype)| Variable {
                name: name.clone(),
                datatype: render(datatype),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Coupling entries are objects with `port_from`/`port_to`; the component
/// side depends on the coupling kind and is supplied by `components`.
fn couplings<F>(body: &Map<String, JsonValue>, key: &str, components: F) -> Vec<Coupling>
where
    F: Fn(&Map<String, JsonValue>) -> (String, String),
{
    let Some(JsonValue::Array(entries)) = body.get(key) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.as_object())
        .map(|entry| {
            let (from_component, to_component) = components(entry);
            Coupling {
                from: Endpoint {
                    component: from_component,
                    port: field(entry, "port_from"),
                },
                to: Endpoint {
                    component: to_component,
                    port: field(entry, "port_to"),
                },
            }
        })
        .collect()
}

fn field(entry: &Map<String, JsonValue>, key: &str) -> String {
    entry.get(key).map(render).unwrap_or_default()
}

fn render(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
