//! JSON schema builders for MCP tools.

use serde_json::{Map, Value};

/// Build the schema describing the `search_documents` tool input.
pub(crate) fn search_documents_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "searchTerm".into(),
        string_schema("The search term to use (searches across title, content, and other fields)"),
    );
    properties.insert(
        "dateFrom".into(),
        string_schema("Filter documents created on or after this date (YYYY-MM-DD)"),
    );
    properties.insert(
        "dateTo".into(),
        string_schema("Filter documents created on or before this date (YYYY-MM-DD)"),
    );

    finalize_object_schema(properties, &["searchTerm"])
}

/// Build the schema shared by the `get_document` and `download_document` tools.
pub(crate) fn document_id_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    let mut id_schema = Map::new();
    id_schema.insert("type".into(), Value::String("integer".into()));
    id_schema.insert(
        "description".into(),
        Value::String("The ID of the document to get".into()),
    );
    properties.insert("documentId".into(), Value::Object(id_schema));

    finalize_object_schema(properties, &["documentId"])
}

fn string_schema(description: &str) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("string".into()));
    schema.insert("description".into(), Value::String(description.into()));
    Value::Object(schema)
}

fn finalize_object_schema(properties: Map<String, Value>, required: &[&str]) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert(
            "required".into(),
            Value::Array(
                required
                    .iter()
                    .map(|&key| Value::String(key.into()))
                    .collect(),
            ),
        );
    }
    schema.insert("additionalProperties".into(), Value::Bool(false));
    schema
}
