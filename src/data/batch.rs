use std::io::Write;
use std::path::PathBuf;

use super::error::ExtractError;
use super::loader::{load_dir, load_file, LoadOutcome};
use super::model::LoadedModel;

/// Exit status used for failures that are not extraction errors (I/O,
/// unsupported extension, unreadable directory).
pub const GENERIC_FAILURE: u8 = 1;

/// Load every path in order: directories are scanned, anything else is
/// loaded as a single file. Failures are kept as outcomes.
pub fn load_paths(paths: &[PathBuf]) -> Vec<LoadOutcome> {
    let mut outcomes = Vec::new();
    for path in paths {
        if path.is_dir() {
            match load_dir(path) {
                Ok(found) => outcomes.extend(found),
                Err(err) => outcomes.push(LoadOutcome {
                    path: path.clone(),
                    result: Err(err),
                }),
            }
        } else {
            outcomes.push(LoadOutcome {
                path: path.clone(),
                result: load_file(path),
            });
        }
    }
    outcomes
}

/// Exit status for a failed document: the extraction kind if there is one.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ExtractError>()
        .map_or(GENERIC_FAILURE, ExtractError::exit_code)
}

/// Split outcomes into the models to report and the exit status of the
/// first failure, writing one diagnostic line per failure to `diagnostics`.
///
/// Without `keep_going` the first failure stops processing and nothing is
/// reported, so the returned model list is empty whenever a status is.
pub fn collect_outcomes<W: Write>(
    outcomes: Vec<LoadOutcome>,
    keep_going: bool,
    mut diagnostics: W,
) -> (Vec<LoadedModel>, Option<u8>) {
    let mut loaded = Vec::new();
    let mut first_failure = None;

    for outcome in outcomes {
        match outcome.result {
            Ok(model) => loaded.push(model),
            Err(err) => {
                // stderr going away is not worth failing the run over
                let _ = writeln!(diagnostics, "error: {err:#}");
                first_failure.get_or_insert(exit_status(&err));
                if !keep_going {
                    return (Vec::new(), first_failure);
                }
            }
        }
    }

    (loaded, first_failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Files sort as: a (ambiguous, 3), b (missing include_sets, 4),
    /// c (bad JSON, 2), d (valid).
    fn mixed_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let files = [
            ("a_atomic.json", r#"{"m1": {}, "m2": {}, "include_sets": []}"#),
            ("b_atomic.json", r#"{"m": {}}"#),
            ("c_atomic.json", "not valid json"),
            ("d_atomic.json", r#"{"ok": {}, "parameters": {}, "include_sets": []}"#),
        ];
        for (name, contents) in files {
            fs::write(tmp.path().join(name), contents).unwrap();
        }
        tmp
    }

    fn single(dir: &Path, name: &str) -> (Vec<LoadedModel>, Option<u8>) {
        let outcomes = load_paths(&[dir.join(name)]);
        collect_outcomes(outcomes, false, Vec::new())
    }

    #[test]
    fn each_failure_maps_to_its_exit_status() {
        let tmp = mixed_dir();
        assert_eq!(single(tmp.path(), "a_atomic.json").1, Some(3));
        assert_eq!(single(tmp.path(), "b_atomic.json").1, Some(4));
        assert_eq!(single(tmp.path(), "c_atomic.json").1, Some(2));
        assert_eq!(single(tmp.path(), "missing.json").1, Some(GENERIC_FAILURE));

        let (models, status) = single(tmp.path(), "d_atomic.json");
        assert_eq!(status, None);
        assert_eq!(models.len(), 1);
    }

    #[test]
    fn keep_going_reports_valid_models_with_first_failure_status() {
        let tmp = mixed_dir();
        let mut diagnostics = Vec::new();
        let (models, status) =
            collect_outcomes(load_paths(&[tmp.path().to_path_buf()]), true, &mut diagnostics);

        assert_eq!(status, Some(3));
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].extractor.model_name(), "ok");

        let text = String::from_utf8(diagnostics).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().all(|l| l.starts_with("error: ")));
    }

    #[test]
    fn without_keep_going_first_failure_stops_and_suppresses_report() {
        let tmp = mixed_dir();
        let mut diagnostics = Vec::new();
        let (models, status) =
            collect_outcomes(load_paths(&[tmp.path().to_path_buf()]), false, &mut diagnostics);

        assert_eq!(status, Some(3));
        assert!(models.is_empty());
        let text = String::from_utf8(diagnostics).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("a_atomic.json"));
    }

    #[test]
    fn files_and_directories_mix_in_order() {
        let tmp = mixed_dir();
        let extra = TempDir::new().unwrap();
        let file = extra.path().join("solo_coupled.json");
        fs::write(&file, r#"{"solo": {}, "include_sets": []}"#).unwrap();

        let outcomes = load_paths(&[file.clone(), tmp.path().to_path_buf()]);
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[0].path, file);

        let (models, status) = collect_outcomes(outcomes, true, std::io::sink());
        let names: Vec<&str> = models.iter().map(|m| m.extractor.model_name()).collect();
        assert_eq!(names, vec!["solo", "ok"]);
        assert_eq!(status, Some(3));
    }

    #[test]
    fn unreadable_directory_is_a_generic_failure() {
        let tmp = TempDir::new().unwrap();
        let err = load_dir(&tmp.path().join("gone")).unwrap_err();
        assert_eq!(exit_status(&err), GENERIC_FAILURE);
    }
}
