//! Prompt assembly from mode templates and assembled context.
//!
//! The three instruction templates live in `prompts/` and are embedded at
//! compile time. Each template declares the required output field list via a
//! `{columns}` placeholder filled from the active schema.

use crate::schema::GenerationMode;

/// Maximum number of context characters embedded in a prompt.
///
/// The cut is a plain character prefix. A document may be severed
/// mid-sentence; the budget is enforced, semantic boundaries are not.
pub const MAX_CONTEXT_CHARS: usize = 15_000;

const PREAMBLE: &str = "You are a senior QA automation engineer.";

// Instruction templates loaded at compile time
const API_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/api.md"));
const UI_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/ui.md"));
const FUNCTIONAL_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/functional.md"
));

/// Build the request prompt for one generation run.
///
/// The caller keeps the full context; only the embedded copy is truncated.
pub fn build(context: &str, mode: GenerationMode) -> String {
    let columns = mode.columns().join(", ");
    let instructions = template(mode).replace("{columns}", &columns);
    format!(
        "{PREAMBLE}\n{instructions}\nContext:\n{}\n",
        truncate_chars(context, MAX_CONTEXT_CHARS)
    )
}

fn template(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Api => API_TEMPLATE,
        GenerationMode::Ui => UI_TEMPLATE,
        GenerationMode::Functional => FUNCTIONAL_TEMPLATE,
    }
}

/// Prefix cut after at most `max` characters.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
