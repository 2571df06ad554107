use super::model::{LoadedModel, ModelKind};

/// Return the models of the requested kind, in their original order.
///
/// `None` means no constraint: every model passes.
pub fn filter_by_kind<'a>(
    models: impl IntoIterator<Item = &'a LoadedModel>,
    kind: Option<&ModelKind>,
) -> Vec<&'a LoadedModel> {
    models
        .into_iter()
        .filter(|m| kind.map_or(true, |k| &m.kind == k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::extractor::ConfigExtractor;
    use std::path::PathBuf;

    fn model(file: &str) -> LoadedModel {
        let path = PathBuf::from(file);
        let stem = path.file_stem().unwrap().to_str().unwrap().to_string();
        let doc = format!(r#"{{"{stem}": {{}}, "include_sets": []}}"#);
        let extraction = ConfigExtractor::from_reader_with_body(doc.as_bytes()).unwrap();
        LoadedModel::from_extraction(path, extraction)
    }

    #[test]
    fn keeps_matching_kind_in_order() {
        let models = vec![
            model("a_atomic.json"),
            model("top_coupled.json"),
            model("b_atomic.json"),
        ];
        let atomic = filter_by_kind(&models, Some(&ModelKind::Atomic));
        let names: Vec<&str> = atomic.iter().map(|m| m.extractor.model_name()).collect();
        assert_eq!(names, vec!["a_atomic", "b_atomic"]);
    }

    #[test]
    fn no_kind_keeps_everything() {
        let models = vec![model("a_atomic.json"), model("x.json")];
        assert_eq!(filter_by_kind(&models, None).len(), 2);
    }
}
