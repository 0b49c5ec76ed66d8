//! CLI argument parsing for the generation pipeline.
//!
//! The CLI is intentionally thin: no flag affects the extraction algorithm,
//! so the same core logic can be exercised offline in tests.

use crate::schema::GenerationMode;
use clap::Parser;
use std::path::PathBuf;

/// Default folder scanned for requirement documents.
pub const DEFAULT_DOCS_DIR: &str = "requirements_docs";

/// Default generation model identifier.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Root CLI entrypoint for the test-case generation run.
#[derive(Parser, Debug)]
#[command(
    name = "tcgen",
    version,
    about = "Generate test cases from project documentation via a text-generation service",
    after_help = "Examples:\n  tcgen --mode api --query \"cover the login endpoints\"\n  tcgen --mode ui --query \"registration form\" --docs ./docs\n  tcgen --mode functional --query \"checkout flow\" --model llama-3.1-8b-instant"
)]
pub struct Args {
    /// Test generation mode: api / ui / functional
    #[arg(long, value_enum)]
    pub mode: GenerationMode,

    /// Free-text instruction for the run (recorded, not interpreted)
    #[arg(long, value_name = "TEXT")]
    pub query: String,

    /// Folder containing requirement documents
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DOCS_DIR)]
    pub docs: PathBuf,

    /// Model identifier passed to the generation service
    #[arg(long, value_name = "ID", default_value = DEFAULT_MODEL)]
    pub model: String,
}
