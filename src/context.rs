//! Context assembly: classified documents joined into one tagged blob.
//!
//! Each document is read exactly once, wrapped with a provenance header, and
//! appended in candidate order. No deduplication, sorting, or ranking. The
//! full context is always computed here; the prompt builder applies its own
//! size budget later.

use crate::classify::DocumentCandidate;
use crate::flatten;
use crate::schema::GenerationMode;
use std::fs;

/// Assembled context plus advisory size metadata.
#[derive(Debug)]
pub struct Context {
    pub text: String,
    pub documents: usize,
    pub characters: usize,
}

/// Read every candidate, flattening schema documents in API mode, and join
/// the provenance-tagged blocks. Unreadable files are skipped, never fatal.
pub fn assemble(candidates: &[DocumentCandidate], mode: GenerationMode) -> Context {
    let mut blocks = Vec::new();
    for candidate in candidates {
        let content = match fs::read_to_string(&candidate.path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    path = %candidate.path.display(),
                    error = %err,
                    "skipping unreadable document"
                );
                continue;
            }
        };
        let content = if mode == GenerationMode::Api {
            flatten::flatten(&content)
        } else {
            content
        };
        blocks.push(format!(
            "\n# {}: {}\n{content}\n",
            mode.doc_category(),
            candidate.display_name
        ));
    }

    let documents = blocks.len();
    let text = blocks.join("\n");
    let characters = text.chars().count();
    tracing::info!(documents, characters, "context assembled");
    Context {
        text,
        documents,
        characters,
    }
}
