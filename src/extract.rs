//! Layered recovery of tabular records from a free-form model reply.
//!
//! Replies are not guaranteed to be well-formed: the service may return a
//! JSON array, a fenced CSV block, or either wrapped in prose. The chain
//! tries the most machine-checkable format first and degrades to string
//! surgery, so a run never ends with nothing to write:
//!
//! 1. **Structured JSON** - the widest `[...]` span parsed as an array of
//!    objects, each projected strictly onto the schema columns.
//! 2. **Delimited text** - the reply suffix starting at the first line that
//!    begins with the literal header prefix (`Test Case ID,`), or the whole
//!    reply if no such line exists.
//! 3. **Cleanup** - code-fence markers and the "Here ... CSV format:"
//!    preamble stripped from the stage-2 body, which is then passed through
//!    as raw table text without re-parsing.
//!
//! Each stage is an ordered attempt with its own entry condition rather than
//! nested error handling, so entry and exit are independently testable.

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// One output row, field values in schema column order.
pub type Record = Vec<String>;

/// Result of the extraction chain.
#[derive(Debug, PartialEq, Eq)]
pub enum Extraction {
    /// Strict column-mapped records from the structured stage.
    Records(Vec<Record>),
    /// Cleaned reply text treated as a literal delimited table.
    RawTable(String),
}

/// Recover records from `reply`.
///
/// Total: structured parse failures are logged and degrade to the
/// delimited-text fallback, never to an error.
pub fn extract(reply: &str, columns: &[&str]) -> Extraction {
    if looks_structured(reply) {
        match parse_structured(reply, columns) {
            Ok(records) => return Extraction::Records(records),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "structured parse failed, falling back to delimited text"
                );
            }
        }
    }
    Extraction::RawTable(clean_table_text(delimited_body(reply, columns)))
}

/// Stage-1 entry condition: the reply must contain `[`, `]`, and `{`.
fn looks_structured(reply: &str) -> bool {
    reply.contains('[') && reply.contains(']') && reply.contains('{')
}

/// Parse the widest bracketed span as a JSON array of objects and project
/// each object onto the schema columns.
fn parse_structured(reply: &str, columns: &[&str]) -> Result<Vec<Record>> {
    let span = bracketed_span(reply).ok_or_else(|| anyhow!("no bracketed span in reply"))?;
    let objects: Vec<Map<String, Value>> =
        serde_json::from_str(span).context("parse bracketed span as array of objects")?;
    Ok(objects
        .iter()
        .map(|object| project(object, columns))
        .collect())
}

/// Widest `[...]` span: first opening bracket through last closing bracket.
fn bracketed_span(reply: &str) -> Option<&str> {
    let start = reply.find('[')?;
    let end = reply.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&reply[start..=end])
}

/// Project one reply object onto the schema: every column present, missing
/// values empty, keys outside the schema dropped.
fn project(object: &Map<String, Value>, columns: &[&str]) -> Record {
    columns
        .iter()
        .map(|column| field_text(object.get(*column)))
        .collect()
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Stage-2 candidate body: the suffix starting at the first line beginning
/// with `<first column>,`, or the whole reply if no such line exists.
fn delimited_body<'a>(reply: &'a str, columns: &[&str]) -> &'a str {
    let Some(first_column) = columns.first() else {
        return reply;
    };
    let prefix = format!("{first_column},");
    let mut offset = 0;
    for line in reply.split_inclusive('\n') {
        if line.starts_with(&prefix) {
            return &reply[offset..];
        }
        offset += line.len();
    }
    reply
}

/// Strip code-fence markers and the "Here ... CSV format:" preamble, then
/// trim. Stable under repeated application.
fn clean_table_text(body: &str) -> String {
    let without_fences = fence_marker_regex().replace_all(body, "");
    let without_preamble = preamble_regex().replace_all(&without_fences, "");
    without_preamble.trim().to_string()
}

fn fence_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(?:csv|CSV)?").unwrap())
}

fn preamble_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Here.*?CSV format:?").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::UI_COLUMNS;

    const COLUMNS: &[&str] = &["Test Case ID", "Steps", "Remarks"];

    #[test]
    fn structured_reply_projects_onto_schema() {
        let reply = r#"Sure, here you go:
[
  {"Test Case ID": "TC-1", "Steps": "Open page", "Remarks": "ok", "Extra": "dropped"},
  {"Test Case ID": "TC-2", "Steps": "Submit form", "Remarks": "ok"}
]"#;

        let Extraction::Records(records) = extract(reply, COLUMNS) else {
            panic!("expected structured records");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["TC-1", "Open page", "ok"]);
        assert_eq!(records[1], vec!["TC-2", "Submit form", "ok"]);
    }

    #[test]
    fn missing_columns_become_empty_strings() {
        let reply = r#"[{"Test Case ID": "TC-1"}, {"Steps": "Click"}]"#;

        let Extraction::Records(records) = extract(reply, COLUMNS) else {
            panic!("expected structured records");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["TC-1", "", ""]);
        assert_eq!(records[1], vec!["", "Click", ""]);
    }

    #[test]
    fn null_and_non_string_values_are_normalized() {
        let reply = r#"[{"Test Case ID": 7, "Steps": null, "Remarks": {"note": "x"}}]"#;

        let Extraction::Records(records) = extract(reply, COLUMNS) else {
            panic!("expected structured records");
        };
        assert_eq!(records[0], vec!["7", "", r#"{"note":"x"}"#]);
    }

    #[test]
    fn reply_without_brackets_skips_the_structured_stage() {
        let reply = "Test Case ID,Steps,Remarks\nTC-1,Open page,ok\n";
        assert_eq!(extract(reply, COLUMNS), Extraction::RawTable(reply.trim().to_string()));
    }

    #[test]
    fn delimited_body_starts_at_the_header_line() {
        let reply = "Some chatter first.\nMore chatter.\nTest Case ID,Steps,Remarks\nTC-1,Go,ok";
        let Extraction::RawTable(table) = extract(reply, COLUMNS) else {
            panic!("expected raw table");
        };
        assert!(table.starts_with("Test Case ID,"));
        assert!(!table.contains("chatter"));
    }

    #[test]
    fn header_substring_mid_line_does_not_anchor_the_body() {
        let reply = "prefix Test Case ID, mid-line mention\nno header here";
        let Extraction::RawTable(table) = extract(reply, COLUMNS) else {
            panic!("expected raw table");
        };
        assert_eq!(table, reply);
    }

    #[test]
    fn malformed_json_with_header_falls_back_to_the_header_line() {
        let reply = "[{not json}]\nTest Case ID,Steps,Remarks\nTC-1,Go,ok\n";
        let Extraction::RawTable(table) = extract(reply, COLUMNS) else {
            panic!("expected raw table");
        };
        assert!(table.starts_with("Test Case ID,"));
    }

    #[test]
    fn fences_and_preamble_are_stripped() {
        let reply = "Here are the test cases in CSV format:\n```csv\nTest Case ID,Steps,Remarks\nTC-1,Go,ok\n```";
        let Extraction::RawTable(table) = extract(reply, COLUMNS) else {
            panic!("expected raw table");
        };
        assert_eq!(table, "Test Case ID,Steps,Remarks\nTC-1,Go,ok");
    }

    #[test]
    fn cleanup_is_idempotent() {
        let bodies = [
            "Here is the output in CSV format:\n```csv\nTest Case ID,Steps\nTC-1,Go\n```",
            "Test Case ID,Steps\nTC-1,Go",
            "```\nplain fenced\n```",
        ];
        for body in bodies {
            let once = clean_table_text(body);
            let twice = clean_table_text(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn bracket_order_mismatch_degrades_to_fallback() {
        let reply = "] stray { bracket [ never closed";
        assert!(matches!(extract(reply, COLUMNS), Extraction::RawTable(_)));
    }

    #[test]
    fn real_schema_columns_round_trip() {
        let reply = r#"[{"Test Case ID": "TC-1", "Test Case Description": "Login", "Preconditions": "User exists", "Steps": "Open, type, submit", "Expected Result": "Dashboard", "Remarks": ""}]"#;

        let Extraction::Records(records) = extract(reply, UI_COLUMNS) else {
            panic!("expected structured records");
        };
        assert_eq!(records[0].len(), UI_COLUMNS.len());
        assert_eq!(records[0][3], "Open, type, submit");
    }
}
