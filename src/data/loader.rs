use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::extractor::ConfigExtractor;
use super::model::LoadedModel;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and classify a single DEVSMap document.  Dispatch by extension.
///
/// Only `.json` is supported. Extraction errors keep their
/// [`ExtractError`](super::error::ExtractError) type underneath the path
/// context, so callers can `downcast_ref` to it.
pub fn load_file(path: &Path) -> Result<LoadedModel> {
    if !path.exists() {
        bail!("{} does not exist", path.display());
    }
    let ext = extension_of(path);

    match ext.as_str() {
        "json" => load_json(path),
        other => bail!("Unsupported file extension for {}: .{other}", path.display()),
    }
}

/// Result of loading one entry of a directory scan.
#[derive(Debug)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub result: Result<LoadedModel>,
}

/// Load every `.json` file in `dir` (non-recursive), sorted by path.
///
/// A bad document does not abort the scan; its error is kept in the
/// matching [`LoadOutcome`]. Only failing to read the directory itself is
/// an error here.
pub fn load_dir(dir: &Path) -> Result<Vec<LoadOutcome>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if extension_of(&path) != "json" {
            log::warn!("skipping non-JSON file in directory: {}", path.display());
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let outcomes: Vec<LoadOutcome> = paths
        .into_iter()
        .map(|path| {
            let result = load_json(&path);
            LoadOutcome { path, result }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    log::info!(
        "scanned {}: {} documents, {} failed",
        dir.display(),
        outcomes.len(),
        failed
    );

    Ok(outcomes)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<LoadedModel> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let extraction = ConfigExtractor::from_reader_with_body(BufReader::new(file))
        .with_context(|| format!("extracting {}", path.display()))?;

    for warning in &extraction.warnings {
        log::warn!("{}: {warning}", path.display());
    }

    Ok(LoadedModel::from_extraction(path.to_path_buf(), extraction))
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}
