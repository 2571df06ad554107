use std::fs::File;
use std::path::{Path, PathBuf};

use devsmap_extract::data::error::{ExtractError, ExtractWarning};
use devsmap_extract::data::extractor::{ConfigExtractor, RESERVED_KEYS};
use devsmap_extract::data::filter::filter_by_kind;
use devsmap_extract::data::loader::{load_dir, load_file};
use devsmap_extract::data::model::{LoadedModel, ModelKind};
use devsmap_extract::data::report::ModelSummary;
use serde_json::json;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn reserved_keys() {
    assert_eq!(RESERVED_KEYS, ["include_sets", "parameters"]);
}

#[test]
fn extracts_from_open_file() {
    let file = File::open(fixtures().join("counter_atomic.json")).unwrap();
    let ex = ConfigExtractor::from_reader(file).unwrap();
    assert_eq!(ex.model_name(), "counter");
    assert_eq!(ex.params(), Some(&json!({"step": "int", "period": "double"})));
    assert_eq!(ex.sets(), &json!(["iestream"]));
}

#[test]
fn generator_has_no_parameters() {
    let file = File::open(fixtures().join("generator_atomic.json")).unwrap();
    let (ex, warnings) = ConfigExtractor::from_reader_with_warnings(file).unwrap();
    assert_eq!(ex.params(), None);
    assert_eq!(
        warnings,
        vec![ExtractWarning::MissingParameters {
            model_name: "generator".into()
        }]
    );
}

#[test]
fn fixture_directory_scan() {
    let outcomes = load_dir(&fixtures()).unwrap();
    let models: Vec<LoadedModel> = outcomes
        .into_iter()
        .map(|o| o.result.unwrap())
        .collect();

    let names: Vec<&str> = models.iter().map(|m| m.extractor.model_name()).collect();
    assert_eq!(names, vec!["counter", "generator", "top"]);

    let coupled = filter_by_kind(&models, Some(&ModelKind::Coupled));
    assert_eq!(coupled.len(), 1);
    let summary = ModelSummary::from_loaded(coupled[0]);
    assert_eq!(summary.model_name, "top");
    assert!(summary.has_parameters);
    assert!(summary.parameter_names.is_empty());
    assert_eq!(summary.include_sets, vec!["counter", "generator"]);
    assert_eq!(summary.components, vec!["cnt:counter", "gen:generator"]);
    assert_eq!(summary.ic, vec!["gen.out->cnt.in"]);
    assert_eq!(summary.eic, vec!["top.start->gen.start"]);
    assert_eq!(summary.eoc, vec!["cnt.out->top.out"]);

    let counter = ModelSummary::from_loaded(&models[0]);
    assert_eq!(counter.state_variables, vec!["count:int", "sigma:double"]);
    assert_eq!(counter.input_ports, vec!["in:int"]);
    assert_eq!(
        counter.transitions,
        vec!["delta_int(1)", "delta_ext(2)", "delta_con(1)", "lambda(1)", "ta(1)"]
    );
}

#[test]
fn typed_errors_reach_the_caller() {
    let cases = [
        ("not valid json", 2),
        (r#"{"modelA": {}, "modelB": {}, "include_sets": []}"#, 3),
        (r#"{"myModel": {}}"#, 4),
    ];
    for (doc, code) in cases {
        let err = ConfigExtractor::from_reader(doc.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), code, "document: {doc}");
    }
}

#[test]
fn load_file_keeps_typed_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("pair_atomic.json");
    std::fs::write(&path, r#"{"a": {}, "b": {}, "include_sets": []}"#).unwrap();

    let err = load_file(&path).unwrap_err();
    match err.downcast_ref::<ExtractError>() {
        Some(ExtractError::AmbiguousModelName { candidates }) => {
            assert_eq!(candidates, &vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
