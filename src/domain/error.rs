use thiserror::Error;

/// Input validation failures raised while a graph is being built.
///
/// Every variant is detected at construction or edge insertion; traversal
/// over a well-formed [`Graph`](crate::domain::graph::Graph) never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The requested vertex count was negative.
    #[error("invalid vertex count: {0} (must be non-negative)")]
    InvalidVertexCount(i64),

    /// An edge endpoint lies outside `[1, vertex_count]`.
    #[error("vertex {vertex} out of range [1, {vertex_count}]")]
    VertexOutOfRange { vertex: i64, vertex_count: usize },

    /// Indexed edges were given without a vertex count.
    #[error("indexed edges require a vertex count")]
    MissingVertexCount,

    /// A graph document mixed indexed edges (or an explicit vertex count)
    /// with named edges.
    #[error("graph document mixes indexed and named edges")]
    MixedEdgeForms,
}
