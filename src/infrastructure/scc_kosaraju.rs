use crate::domain::graph::{Graph, SccResult, Vertex};
use crate::domain::traits::SccDetector;

pub struct KosarajuSccDetector;

impl SccDetector for KosarajuSccDetector {
    fn compute_scc(&self, graph: &Graph) -> SccResult {
        kosaraju_scc(graph)
    }
}

fn kosaraju_scc(graph: &Graph) -> SccResult {
    let order = finish_order(graph);
    extract_components(graph, order)
}

/// First pass: vertices in ascending DFS finish time over forward edges.
///
/// Roots are tried in ascending vertex order. The last element is the last
/// vertex to finish, i.e. the top of the finish stack.
fn finish_order(graph: &Graph) -> Vec<Vertex> {
    let n = graph.vertex_count();
    let mut order: Vec<Vertex> = Vec::with_capacity(n);
    let mut seen = vec![false; n + 1];

    for start in graph.vertices() {
        if seen[start] {
            continue;
        }
        iterative_finish_order(start, graph, &mut seen, &mut order);
    }

    order
}

/// Explicit-stack DFS from `start` over successors.
///
/// Each frame is `(vertex, index of the next successor to look at)`. A vertex
/// is marked when its frame is pushed and emitted when its frame is popped,
/// which matches the recursive pre-order mark / post-order push exactly.
fn iterative_finish_order(
    start: Vertex,
    graph: &Graph,
    seen: &mut [bool],
    order: &mut Vec<Vertex>,
) {
    let mut stack: Vec<(Vertex, usize)> = vec![(start, 0)];
    seen[start] = true;

    while let Some(frame) = stack.last_mut() {
        let (v, next_i) = *frame;
        let outs = graph.successors(v);

        if next_i < outs.len() {
            frame.1 += 1;
            let to = outs[next_i];
            if !seen[to] {
                seen[to] = true;
                stack.push((to, 0));
            }
            continue;
        }

        stack.pop();
        order.push(v);
    }
}

/// Second pass: pop the finish stack, growing one component per unvisited
/// vertex over predecessors.
fn extract_components(graph: &Graph, mut order: Vec<Vertex>) -> SccResult {
    let n = graph.vertex_count();
    let mut component_of = vec![usize::MAX; n];
    let mut components: Vec<Vec<Vertex>> = Vec::new();
    let mut stack: Vec<(Vertex, usize)> = Vec::new();

    while let Some(root) = order.pop() {
        if component_of[root - 1] != usize::MAX {
            continue;
        }

        let cid = components.len();
        let mut comp = vec![root];
        component_of[root - 1] = cid;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (v, next_i) = *frame;
            let ins = graph.predecessors(v);

            if next_i < ins.len() {
                frame.1 += 1;
                let p = ins[next_i];
                if component_of[p - 1] == usize::MAX {
                    component_of[p - 1] = cid;
                    comp.push(p);
                    stack.push((p, 0));
                }
                continue;
            }

            stack.pop();
        }

        components.push(comp);
    }

    let cyclic_component = components
        .iter()
        .map(|comp| comp.len() > 1 || graph.has_self_loop(comp[0]))
        .collect();

    SccResult {
        component_of,
        components,
        cyclic_component,
    }
}
