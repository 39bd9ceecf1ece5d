use anyhow::{anyhow, Result};
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde_json::Value;

static GRAPH_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema_content = include_str!("../schemas/graph_schema.json");
    let schema: Value = serde_json::from_str(schema_content).expect("Invalid graph schema");
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Failed to compile graph schema")
});

static REPORT_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema_content = include_str!("../schemas/report_schema.json");
    let schema: Value = serde_json::from_str(schema_content).expect("Invalid report schema");
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Failed to compile report schema")
});

/// Validate a graph input document against the graph schema
pub fn validate_graph_document(graph: &Value) -> Result<()> {
    validate_with(&GRAPH_SCHEMA, graph, "Graph document")
}

/// Validate an SCC report against the report schema
pub fn validate_report_document(report: &Value) -> Result<()> {
    validate_with(&REPORT_SCHEMA, report, "SCC report")
}

fn validate_with(schema: &JSONSchema, doc: &Value, what: &str) -> Result<()> {
    match schema.validate(doc) {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_list: Vec<String> = errors.map(|e| e.to_string()).collect();
            Err(anyhow!(
                "{what} validation failed:\n{}",
                error_list.join("\n")
            ))
        }
    }
}
