//! CSV output for extracted records.
//!
//! Structured extractions are written with strict column mapping: a header
//! row from the schema, then one row per record with every field quoted.
//! Fallback extractions are written through verbatim, so their column count
//! and order are only as good as the reply text they came from.

use crate::extract::{Extraction, Record};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory that receives generated tables.
pub const OUTPUT_DIR: &str = "outputs";

/// Output path for one run: `outputs/<mode>_testcases.csv`.
pub fn output_path(mode_label: &str) -> PathBuf {
    Path::new(OUTPUT_DIR).join(format!("{mode_label}_testcases.csv"))
}

/// Write the extraction to `path`, overwriting any previous run.
pub fn write(path: &Path, extraction: &Extraction, columns: &[&str]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let contents = match extraction {
        Extraction::Records(records) => render_table(records, columns),
        Extraction::RawTable(text) => text.clone(),
    };
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

/// Render a header row plus one quoted row per record.
fn render_table(records: &[Record], columns: &[&str]) -> String {
    let mut table = String::new();
    push_row(&mut table, columns.iter().copied());
    for record in records {
        push_row(&mut table, record.iter().map(String::as_str));
    }
    table
}

fn push_row<'a>(table: &mut String, fields: impl Iterator<Item = &'a str>) {
    let row = fields.map(quote_field).collect::<Vec<_>>().join(",");
    table.push_str(&row);
    table.push('\n');
}

/// Quote a field unconditionally, doubling embedded quotes.
fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
