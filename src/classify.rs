//! Mode-aware selection of input documents.
//!
//! Classification looks only at file names and extensions. Contents are read
//! later, during context assembly, so no file is opened twice. Folder entries
//! are visited in the filesystem's native order; no sorting is imposed.

use crate::schema::GenerationMode;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SWAGGER_MARKER: &str = "swagger";
const SCHEMA_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "docx"];

/// A folder entry selected for the active mode.
#[derive(Debug, Clone)]
pub struct DocumentCandidate {
    pub path: PathBuf,
    /// Lowercased file name, used for provenance headers.
    pub display_name: String,
}

/// Select relevant documents from `folder`.
///
/// A missing or unreadable folder is fatal; individual entries that cannot
/// be inspected are skipped with a warning.
pub fn classify(folder: &Path, mode: GenerationMode) -> Result<Vec<DocumentCandidate>> {
    let entries = fs::read_dir(folder)
        .with_context(|| format!("read documents folder {}", folder.display()))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable folder entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let name = file_name.to_lowercase();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if is_relevant(mode, &name, &extension) {
            candidates.push(DocumentCandidate {
                path,
                display_name: name,
            });
        }
    }

    tracing::debug!(
        mode = mode.label(),
        candidates = candidates.len(),
        "classified documents folder"
    );
    Ok(candidates)
}

/// Pure relevance rule, keyed on mode, lowercased name, and extension.
///
/// The UI rule excludes every schema-shaped extension, not just files named
/// like swagger documents.
fn is_relevant(mode: GenerationMode, name: &str, extension: &str) -> bool {
    match mode {
        GenerationMode::Api => {
            SCHEMA_EXTENSIONS.contains(&extension) && name.contains(SWAGGER_MARKER)
        }
        GenerationMode::Ui => {
            !name.contains(SWAGGER_MARKER) && !SCHEMA_EXTENSIONS.contains(&extension)
        }
        GenerationMode::Functional => TEXT_EXTENSIONS.contains(&extension),
    }
}
