use crate::domain::graph::{Graph, SccResult, Vertex};
use crate::infrastructure::serde_json_adapter::GraphFileDto;
use crate::usecase::load::{build_graph, LoadedGraph};
use anyhow::{anyhow, Result};

/// Range checks for a graph document that already passed the schema on
/// read (see `serde_json_adapter::parse_graph_document`).
pub fn validate_graph(dto: &GraphFileDto) -> Result<LoadedGraph> {
    build_graph(dto)
}

/// Checks that `scc` is exactly the strongly connected decomposition of
/// `graph`: a partition of the vertex set, mutually reachable inside each
/// component and not mutually reachable across components.
///
/// Runs in `O(V + E)`. Each component must be reachable from its first
/// vertex both forwards and backwards without leaving the component, and the
/// condensation (components as nodes) must be acyclic.
pub fn verify_scc_result(graph: &Graph, scc: &SccResult) -> Result<()> {
    let n = graph.vertex_count();

    // Partition.
    let mut owner = vec![usize::MAX; n];
    for (cid, comp) in scc.components.iter().enumerate() {
        if comp.is_empty() {
            return Err(anyhow!("component {cid} is empty"));
        }
        for &v in comp {
            if !graph.contains(v) {
                return Err(anyhow!("component {cid} holds unknown vertex {v}"));
            }
            if owner[v - 1] != usize::MAX {
                return Err(anyhow!(
                    "vertex {v} appears in components {} and {cid}",
                    owner[v - 1]
                ));
            }
            owner[v - 1] = cid;
        }
    }
    if let Some(i) = owner.iter().position(|&c| c == usize::MAX) {
        return Err(anyhow!("vertex {} is missing from every component", i + 1));
    }
    if scc.component_of != owner {
        return Err(anyhow!("component_of disagrees with components"));
    }

    // Components are disjoint, so one marker set per direction serves all.
    let mut fwd_seen = vec![false; n + 1];
    let mut rev_seen = vec![false; n + 1];
    for (cid, comp) in scc.components.iter().enumerate() {
        let root = comp[0];
        mark_within(root, cid, &owner, &mut fwd_seen, move |v| graph.successors(v));
        mark_within(root, cid, &owner, &mut rev_seen, move |v| graph.predecessors(v));

        if let Some(&v) = comp.iter().find(|&&v| !fwd_seen[v] || !rev_seen[v]) {
            return Err(anyhow!(
                "vertices {root} and {v} share a component but are not mutually reachable"
            ));
        }
    }

    if let Some((a, b)) = condensation_cycle(graph, &owner, scc.component_count()) {
        return Err(anyhow!(
            "component graph is cyclic at edge {a} -> {b}: mutually reachable vertices are split across components"
        ));
    }

    for (cid, comp) in scc.components.iter().enumerate() {
        let expected = comp.len() > 1 || graph.has_self_loop(comp[0]);
        if scc.cyclic_component.get(cid) != Some(&expected) {
            return Err(anyhow!("cyclic flag of component {cid} is wrong"));
        }
    }

    Ok(())
}

/// Marks every vertex reachable from `start` through `next` without leaving
/// component `cid`.
fn mark_within<'g>(
    start: Vertex,
    cid: usize,
    owner: &[usize],
    seen: &mut [bool],
    next: impl Fn(Vertex) -> &'g [Vertex],
) {
    let mut stack = vec![start];
    seen[start] = true;

    while let Some(v) = stack.pop() {
        for &to in next(v) {
            if owner[to - 1] == cid && !seen[to] {
                seen[to] = true;
                stack.push(to);
            }
        }
    }
}

/// Kahn's algorithm over the component graph. If it cannot order every
/// component, returns an edge `(a, b)` between two unordered components,
/// which lies on a cycle or is reachable from one.
fn condensation_cycle(graph: &Graph, owner: &[usize], count: usize) -> Option<(Vertex, Vertex)> {
    let mut indegree = vec![0usize; count];
    let mut members: Vec<Vec<Vertex>> = vec![Vec::new(); count];
    for v in graph.vertices() {
        members[owner[v - 1]].push(v);
    }
    for (u, v) in graph.edges() {
        if owner[u - 1] != owner[v - 1] {
            indegree[owner[v - 1]] += 1;
        }
    }

    let mut ready: Vec<usize> = (0..count).filter(|&c| indegree[c] == 0).collect();
    while let Some(c) = ready.pop() {
        for &u in &members[c] {
            for &v in graph.successors(u) {
                let d = owner[v - 1];
                if d != c {
                    indegree[d] -= 1;
                    if indegree[d] == 0 {
                        ready.push(d);
                    }
                }
            }
        }
    }

    // Components never made ready keep a positive indegree, and each has an
    // incoming edge from another such component.
    graph
        .edges()
        .find(|&(u, v)| {
            let (cu, cv) = (owner[u - 1], owner[v - 1]);
            cu != cv && indegree[cu] > 0 && indegree[cv] > 0
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::serde_json_adapter::EdgeDto;

    fn cycle_pair() -> Graph {
        let mut g = Graph::new(3).expect("graph");
        g.add_edge(1, 2).expect("edge");
        g.add_edge(2, 1).expect("edge");
        g.add_edge(2, 3).expect("edge");
        g
    }

    #[test]
    fn validate_graph_reports_range_errors() {
        let dto = GraphFileDto {
            vertices: Some(1),
            edges: vec![EdgeDto::Indexed([1, 2])],
        };
        let err = validate_graph(&dto).unwrap_err().to_string();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn validate_graph_accepts_a_parsed_named_document() {
        let dto = GraphFileDto {
            vertices: None,
            edges: vec![EdgeDto::Named {
                from: "a".to_string(),
                to: "b".to_string(),
            }],
        };
        let loaded = validate_graph(&dto).expect("valid");
        assert_eq!(loaded.graph.vertex_count(), 2);
        assert!(loaded.labels.is_some());
    }

    #[test]
    fn verify_accepts_correct_decomposition() {
        let g = cycle_pair();
        let scc = SccResult {
            component_of: vec![0, 0, 1],
            components: vec![vec![1, 2], vec![3]],
            cyclic_component: vec![true, false],
        };
        verify_scc_result(&g, &scc).expect("valid");
    }

    #[test]
    fn verify_rejects_split_component() {
        let g = cycle_pair();
        let scc = SccResult {
            component_of: vec![0, 1, 2],
            components: vec![vec![1], vec![2], vec![3]],
            cyclic_component: vec![false, false, false],
        };
        let err = verify_scc_result(&g, &scc).unwrap_err().to_string();
        assert!(err.contains("split across components"));
    }

    #[test]
    fn verify_rejects_merged_component() {
        let g = cycle_pair();
        let scc = SccResult {
            component_of: vec![0, 0, 0],
            components: vec![vec![1, 2, 3]],
            cyclic_component: vec![true],
        };
        let err = verify_scc_result(&g, &scc).unwrap_err().to_string();
        assert!(err.contains("not mutually reachable"));
    }

    #[test]
    fn verify_rejects_missing_and_duplicate_vertices() {
        let g = cycle_pair();
        let missing = SccResult {
            component_of: vec![0, 0, usize::MAX],
            components: vec![vec![1, 2]],
            cyclic_component: vec![true],
        };
        assert!(verify_scc_result(&g, &missing)
            .unwrap_err()
            .to_string()
            .contains("missing"));

        let duplicate = SccResult {
            component_of: vec![0, 0, 1],
            components: vec![vec![1, 2], vec![3, 1]],
            cyclic_component: vec![true, true],
        };
        assert!(verify_scc_result(&g, &duplicate)
            .unwrap_err()
            .to_string()
            .contains("appears in components"));
    }

    #[test]
    fn verify_rejects_components_split_behind_a_tail() {
        // 1 -> 2 <-> 3; splitting 2 and 3 leaves a cycle in the component graph.
        let mut g = Graph::new(3).expect("graph");
        g.add_edge(1, 2).expect("edge");
        g.add_edge(2, 3).expect("edge");
        g.add_edge(3, 2).expect("edge");

        let scc = SccResult {
            component_of: vec![0, 1, 2],
            components: vec![vec![1], vec![2], vec![3]],
            cyclic_component: vec![false, false, false],
        };
        let err = verify_scc_result(&g, &scc).unwrap_err().to_string();
        assert!(err.contains("split across components"));
    }

    #[test]
    fn verify_scales_linearly_on_large_graphs() {
        // A 200k-vertex chain of singletons followed by one big cycle: a
        // quadratic check would need tens of gigabytes here.
        let n = 200_000;
        let mut g = Graph::with_vertex_count(n);
        for v in 1..n {
            g.add_edge(v, v + 1).expect("edge");
        }

        let singletons = SccResult {
            component_of: (0..n).collect(),
            components: (1..=n).map(|v| vec![v]).collect(),
            cyclic_component: vec![false; n],
        };
        verify_scc_result(&g, &singletons).expect("chain of singletons");

        g.add_edge(n, 1).expect("closing edge");
        let one = SccResult {
            component_of: vec![0; n],
            components: vec![(1..=n).collect()],
            cyclic_component: vec![true],
        };
        verify_scc_result(&g, &one).expect("one cycle");
    }
}
