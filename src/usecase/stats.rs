use crate::domain::graph::{Graph, SccResult};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SccStats {
    pub vertices: usize,
    pub edges: usize,
    pub components: usize,
    pub cyclic_components: usize,
    pub singleton_components: usize,
    pub largest_component: usize,
}

impl SccStats {
    pub fn from_result(graph: &Graph, scc: &SccResult) -> Self {
        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            components: scc.component_count(),
            cyclic_components: scc.cyclic_count(),
            singleton_components: scc.components.iter().filter(|c| c.len() == 1).count(),
            largest_component: scc.components.iter().map(Vec::len).max().unwrap_or(0),
        }
    }
}
