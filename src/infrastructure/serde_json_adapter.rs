use crate::infrastructure::schema_validator::{validate_graph_document, validate_report_document};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GraphFileDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<i64>,

    #[serde(default)]
    pub edges: Vec<EdgeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EdgeDto {
    Indexed([i64; 2]),
    Named { from: String, to: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SccReportDto {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    pub components: Vec<Vec<usize>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Vec<String>>>,

    pub cyclic: Vec<bool>,
}

pub fn parse_graph_document(raw: &str) -> Result<GraphFileDto> {
    let value: Value = serde_json::from_str(raw).context("graph document is not valid JSON")?;
    validate_graph_document(&value)?;
    let dto: GraphFileDto = serde_json::from_value(value)?;
    Ok(dto)
}

pub async fn read_graph_file(path: &str) -> Result<GraphFileDto> {
    let raw = fs::read_to_string(path).await?;
    parse_graph_document(&raw)
}

pub async fn write_report_file(path: &str, dto: &SccReportDto) -> Result<()> {
    let value = serde_json::to_value(dto)?;
    validate_report_document(&value)?;
    let pretty = serde_json::to_string_pretty(&value)?;
    fs::write(path, pretty).await?;
    Ok(())
}
