use crate::domain::error::GraphError;
use std::fmt;
use std::ops::RangeInclusive;

/// Vertex identity. Vertices are numbered `1..=vertex_count`.
pub type Vertex = usize;

/// Directed multigraph over a fixed vertex set.
///
/// Both orientations are kept: `forward[u]` lists successors of `u` in
/// edge-add order and `reverse[v]` lists predecessors of `v`. Every insertion
/// updates both, so they are always exact transposes of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    forward: Vec<Vec<Vertex>>,
    reverse: Vec<Vec<Vertex>>,
    edge_count: usize,
}

impl Graph {
    /// Builds an edgeless graph, rejecting a negative vertex count.
    pub fn new(vertex_count: i64) -> Result<Self, GraphError> {
        let n = usize::try_from(vertex_count)
            .map_err(|_| GraphError::InvalidVertexCount(vertex_count))?;
        Ok(Self::with_vertex_count(n))
    }

    pub fn with_vertex_count(vertex_count: usize) -> Self {
        Self {
            forward: vec![Vec::new(); vertex_count],
            reverse: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Adds the directed edge `u -> v`.
    ///
    /// Both endpoints are checked before anything is written, so a rejected
    /// edge leaves the graph unchanged. Self-loops and duplicates are kept.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        self.forward[u - 1].push(v);
        self.reverse[v - 1].push(u);
        self.edge_count += 1;
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.forward.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, v: Vertex) -> bool {
        v >= 1 && v <= self.vertex_count()
    }

    /// All vertices in ascending order.
    pub fn vertices(&self) -> RangeInclusive<Vertex> {
        1..=self.vertex_count()
    }

    /// Successors of `v` in edge-add order.
    ///
    /// # Panics
    /// If `v` is not a vertex of this graph.
    pub fn successors(&self, v: Vertex) -> &[Vertex] {
        &self.forward[v - 1]
    }

    /// Predecessors of `v` in edge-add order.
    ///
    /// # Panics
    /// If `v` is not a vertex of this graph.
    pub fn predecessors(&self, v: Vertex) -> &[Vertex] {
        &self.reverse[v - 1]
    }

    /// Edges grouped by source vertex, each group in edge-add order.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .flat_map(|(i, outs)| outs.iter().map(move |&v| (i + 1, v)))
    }

    pub fn has_self_loop(&self, v: Vertex) -> bool {
        self.successors(v).contains(&v)
    }

    fn check_vertex(&self, v: Vertex) -> Result<(), GraphError> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: i64::try_from(v).unwrap_or(i64::MAX),
                vertex_count: self.vertex_count(),
            })
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for u in self.vertices() {
            write!(f, "{u} ->")?;
            for v in self.successors(u) {
                write!(f, " {v}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Output of an SCC detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccResult {
    /// `component_of[v - 1]` is the index into `components` holding `v`.
    pub component_of: Vec<usize>,
    /// Components in discovery order; vertices in first-visit order.
    pub components: Vec<Vec<Vertex>>,
    /// A component is cyclic if it has more than one vertex or a self-loop.
    pub cyclic_component: Vec<bool>,
}

impl SccResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn component_index(&self, v: Vertex) -> Option<usize> {
        v.checked_sub(1)
            .and_then(|i| self.component_of.get(i))
            .copied()
    }

    pub fn same_component(&self, a: Vertex, b: Vertex) -> bool {
        match (self.component_index(a), self.component_index(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    pub fn cyclic_count(&self) -> usize {
        self.cyclic_component.iter().filter(|&&b| b).count()
    }
}
