use crate::graph::{canonical_edge, Edge, GraphState};

/// Why a proposed swap could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    /// The two edges share an endpoint.
    SharedEndpoint,
    /// One of the original edges is missing from the graph.
    MissingEdge,
    /// A replacement edge already exists (would create a multi-edge).
    DuplicateEdge,
}

/// A reversible edit on a [`GraphState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphOperation {
    /// Delete one edge.
    Remove(Edge),
    /// Degree-preserving swap: `(u,v),(x,y)` become `(u,y),(v,x)`.
    Swap { removed: [Edge; 2], added: [Edge; 2] },
}

impl GraphOperation {
    /// Build the swap `(u,v),(x,y) -> (u,y),(v,x)`, checking it against `graph`.
    ///
    /// Endpoint orientation matters: passing `(y, x)` instead of `(x, y)`
    /// gives the other rewiring `(u,x),(v,y)`.
    pub fn degree_preserving_swap(
        graph: &GraphState,
        (u, v): (usize, usize),
        (x, y): (usize, usize),
    ) -> Result<Self, SwapRejection> {
        if u == x || u == y || v == x || v == y || u == v || x == y {
            return Err(SwapRejection::SharedEndpoint);
        }
        if !graph.has_edge(u, v) || !graph.has_edge(x, y) {
            return Err(SwapRejection::MissingEdge);
        }
        if graph.has_edge(u, y) || graph.has_edge(v, x) {
            return Err(SwapRejection::DuplicateEdge);
        }
        Ok(GraphOperation::Swap {
            removed: [canonical_edge(u, v), canonical_edge(x, y)],
            added: [canonical_edge(u, y), canonical_edge(v, x)],
        })
    }

    pub fn apply(&self, graph: &mut GraphState) {
        match *self {
            GraphOperation::Remove((u, v)) => {
                graph.remove_edge(u, v);
            }
            GraphOperation::Swap { removed, added } => {
                for (u, v) in removed {
                    graph.remove_edge(u, v);
                }
                for (u, v) in added {
                    graph.add_edge(u, v);
                }
            }
        }
    }

    /// Undo a previous [`GraphOperation::apply`] on the same graph.
    pub fn revert(&self, graph: &mut GraphState) {
        match *self {
            GraphOperation::Remove((u, v)) => {
                graph.add_edge(u, v);
            }
            GraphOperation::Swap { removed, added } => {
                for (u, v) in added {
                    graph.remove_edge(u, v);
                }
                for (u, v) in removed {
                    graph.add_edge(u, v);
                }
            }
        }
    }
}
