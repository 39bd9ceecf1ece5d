use crate::domain::error::GraphError;
use crate::domain::graph::{Graph, Vertex};
use crate::domain::model::VertexLabels;
use crate::infrastructure::serde_json_adapter::{EdgeDto, GraphFileDto};
use anyhow::{anyhow, Result};

/// Largest vertex count a graph document may declare. Matches `maximum` in
/// `schemas/graph_schema.json`.
pub const MAX_VERTICES: i64 = 1 << 24;

/// A graph built from a document, plus vertex names when the document used
/// named edges.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub labels: Option<VertexLabels>,
}

pub fn build_graph(dto: &GraphFileDto) -> Result<LoadedGraph> {
    let named = dto
        .edges
        .iter()
        .filter(|e| matches!(e, EdgeDto::Named { .. }))
        .count();

    if named == 0 {
        let vertices = match dto.vertices {
            Some(n) => n,
            None if dto.edges.is_empty() => 0,
            None => return Err(GraphError::MissingVertexCount.into()),
        };
        if vertices > MAX_VERTICES {
            return Err(anyhow!(
                "vertex count {vertices} exceeds the supported maximum of {MAX_VERTICES}"
            ));
        }
        let graph = build_indexed(vertices, &dto.edges)?;
        return Ok(LoadedGraph {
            graph,
            labels: None,
        });
    }

    if named != dto.edges.len() || dto.vertices.is_some() {
        return Err(GraphError::MixedEdgeForms.into());
    }
    let loaded = build_named(&dto.edges)?;
    Ok(loaded)
}

fn build_indexed(vertices: i64, edges: &[EdgeDto]) -> Result<Graph, GraphError> {
    let mut g = Graph::new(vertices)?;
    for edge in edges {
        if let EdgeDto::Indexed([u, v]) = *edge {
            let u = to_vertex(u, g.vertex_count())?;
            let v = to_vertex(v, g.vertex_count())?;
            g.add_edge(u, v)?;
        }
    }
    Ok(g)
}

fn build_named(edges: &[EdgeDto]) -> Result<LoadedGraph, GraphError> {
    let mut labels = VertexLabels::new();
    let mut pairs: Vec<(Vertex, Vertex)> = Vec::with_capacity(edges.len());

    for edge in edges {
        if let EdgeDto::Named { from, to } = edge {
            let u = labels.intern(from);
            let v = labels.intern(to);
            pairs.push((u, v));
        }
    }

    let mut graph = Graph::with_vertex_count(labels.count());
    for (u, v) in pairs {
        graph.add_edge(u, v)?;
    }

    Ok(LoadedGraph {
        graph,
        labels: Some(labels),
    })
}

fn to_vertex(raw: i64, vertex_count: usize) -> Result<Vertex, GraphError> {
    usize::try_from(raw).map_err(|_| GraphError::VertexOutOfRange {
        vertex: raw,
        vertex_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_error(dto: &GraphFileDto) -> GraphError {
        build_graph(dto)
            .unwrap_err()
            .downcast::<GraphError>()
            .expect("graph error")
    }

    fn named(from: &str, to: &str) -> EdgeDto {
        EdgeDto::Named {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn indexed_document_builds_graph() {
        let dto = GraphFileDto {
            vertices: Some(3),
            edges: vec![EdgeDto::Indexed([1, 2]), EdgeDto::Indexed([2, 3])],
        };
        let loaded = build_graph(&dto).expect("build");
        assert!(loaded.labels.is_none());
        assert_eq!(loaded.graph.vertex_count(), 3);
        assert_eq!(loaded.graph.successors(2), &[3]);
    }

    #[test]
    fn negative_values_are_rejected() {
        let dto = GraphFileDto {
            vertices: Some(-2),
            edges: vec![],
        };
        assert_eq!(graph_error(&dto), GraphError::InvalidVertexCount(-2));

        let dto = GraphFileDto {
            vertices: Some(2),
            edges: vec![EdgeDto::Indexed([-1, 2])],
        };
        assert_eq!(
            graph_error(&dto),
            GraphError::VertexOutOfRange {
                vertex: -1,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn indexed_edges_need_a_vertex_count() {
        let dto = GraphFileDto {
            vertices: None,
            edges: vec![EdgeDto::Indexed([1, 1])],
        };
        assert_eq!(graph_error(&dto), GraphError::MissingVertexCount);

        let empty = build_graph(&GraphFileDto::default()).expect("empty");
        assert_eq!(empty.graph.vertex_count(), 0);
    }

    #[test]
    fn named_document_interns_in_first_seen_order() {
        let dto = GraphFileDto {
            vertices: None,
            edges: vec![named("b.com", "a.com"), named("a.com", "b.com")],
        };
        let loaded = build_graph(&dto).expect("build");
        let labels = loaded.labels.expect("labels");

        assert_eq!(loaded.graph.vertex_count(), 2);
        assert_eq!(labels.name(1), Some("b.com"));
        assert_eq!(loaded.graph.successors(1), &[2]);
        assert_eq!(loaded.graph.successors(2), &[1]);
    }

    #[test]
    fn mixed_forms_are_rejected() {
        let dto = GraphFileDto {
            vertices: None,
            edges: vec![named("a", "b"), EdgeDto::Indexed([1, 2])],
        };
        assert_eq!(graph_error(&dto), GraphError::MixedEdgeForms);

        let dto = GraphFileDto {
            vertices: Some(2),
            edges: vec![named("a", "b")],
        };
        assert_eq!(graph_error(&dto), GraphError::MixedEdgeForms);
    }

    #[test]
    fn oversized_vertex_count_is_an_error_not_a_panic() {
        let dto = GraphFileDto {
            vertices: Some(i64::MAX),
            edges: vec![],
        };
        let err = build_graph(&dto).unwrap_err().to_string();
        assert!(err.contains("exceeds the supported maximum"));

        let dto = GraphFileDto {
            vertices: Some(MAX_VERTICES + 1),
            edges: vec![EdgeDto::Indexed([1, 2])],
        };
        assert!(build_graph(&dto).is_err());
    }
}
