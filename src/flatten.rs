//! Flattening of REST schema documents into prompt-friendly text.
//!
//! Swagger-style JSON buries the signal (endpoints, parameter sets, response
//! shapes) in structural nesting that wastes prompt budget. Flattening
//! restates the document as linear blocks: one per named definition, then one
//! per endpoint path with its methods.
//!
//! An unparseable document never blocks the pipeline. If the text is not
//! JSON, not an object, or carries neither a `definitions` nor a `paths`
//! object, the raw text is returned unchanged.

use serde_json::{Map, Value};

/// Flatten a schema document, or return `raw` unchanged if it is not in the
/// expected definitions/paths shape.
pub fn flatten(raw: &str) -> String {
    match try_flatten(raw) {
        Some(flat) => flat,
        None => {
            tracing::warn!("schema document not in expected shape, using raw text");
            raw.to_string()
        }
    }
}

/// Document-order walk over `definitions` and `paths`. Any shape violation
/// yields `None` so the caller can fall back to the raw text.
fn try_flatten(raw: &str) -> Option<String> {
    let document: Value = serde_json::from_str(raw).ok()?;
    let document = document.as_object()?;

    let definitions = match document.get("definitions") {
        Some(value) => Some(value.as_object()?),
        None => None,
    };
    let paths = match document.get("paths") {
        Some(value) => Some(value.as_object()?),
        None => None,
    };
    if definitions.is_none() && paths.is_none() {
        return None;
    }

    let mut blocks = Vec::new();
    if let Some(definitions) = definitions {
        for (name, definition) in definitions {
            blocks.push(format!("### Definition: {name}\n{}\n", pretty(definition)));
        }
    }
    if let Some(paths) = paths {
        for (path, methods) in paths {
            blocks.push(format!("\nEndpoint: {path}"));
            let methods = methods.as_object()?;
            for (method, meta) in methods {
                let meta = meta.as_object()?;
                let summary = meta.get("summary").and_then(Value::as_str).unwrap_or("");
                let params = meta
                    .get("parameters")
                    .cloned()
                    .unwrap_or_else(|| Value::Array(Vec::new()));
                let responses = meta
                    .get("responses")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new()));
                blocks.push(format!(
                    "Method: {}\nSummary: {summary}\nParams: {}\nResponses: {}\n",
                    method.to_uppercase(),
                    pretty(&params),
                    pretty(&responses),
                ));
            }
        }
    }

    Some(blocks.join("\n"))
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "definitions": {"User": {"type": "object"}},
        "paths": {"/users": {"get": {"summary": "List users", "parameters": [], "responses": {"200": {}}}}}
    }"#;

    #[test]
    fn flattens_definitions_and_paths() {
        let flat = flatten(SAMPLE);
        assert!(flat.contains("### Definition: User"));
        assert!(flat.contains("\"type\": \"object\""));
        assert!(flat.contains("Endpoint: /users"));
        assert!(flat.contains("Method: GET"));
        assert!(flat.contains("Summary: List users"));
    }

    #[test]
    fn definitions_come_before_paths() {
        let flat = flatten(SAMPLE);
        let definition = flat.find("### Definition: User").expect("definition block");
        let endpoint = flat.find("Endpoint: /users").expect("endpoint block");
        assert!(definition < endpoint);
    }

    #[test]
    fn preserves_document_order_of_paths() {
        let raw = r#"{"paths": {"/z": {"get": {}}, "/a": {"get": {}}}}"#;
        let flat = flatten(raw);
        let z = flat.find("Endpoint: /z").expect("/z block");
        let a = flat.find("Endpoint: /a").expect("/a block");
        assert!(z < a);
    }

    #[test]
    fn malformed_json_passes_through_unchanged() {
        let raw = "swagger: '2.0'\npaths:\n  /users: {}\n";
        assert_eq!(flatten(raw), raw);
    }

    #[test]
    fn object_without_definitions_or_paths_passes_through() {
        let raw = r#"{"openapi": "3.0.0"}"#;
        assert_eq!(flatten(raw), raw);
    }

    #[test]
    fn non_object_method_entry_passes_through() {
        let raw = r#"{"paths": {"/users": ["not", "an", "object"]}}"#;
        assert_eq!(flatten(raw), raw);
    }

    #[test]
    fn missing_summary_renders_empty() {
        let raw = r#"{"paths": {"/ping": {"get": {}}}}"#;
        let flat = flatten(raw);
        assert!(flat.contains("Summary: \n"));
        assert!(flat.contains("Params: []"));
        assert!(flat.contains("Responses: {}"));
    }
}
