use thiserror::Error;

/// Hard failures of the Rs engine.
///
/// Soft outcomes (too few edges to rewire, no candidate left to remove) are
/// reported in the search results instead, see [`crate::targeting::SearchStop`]
/// and [`crate::engine::RegoStatus`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Resistance is only defined when every node can reach every other node.
    #[error("graph must be connected to compute effective resistance")]
    DisconnectedGraph,

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("node {0} out of bounds (graph has {1} nodes)")]
    NodeOutOfBounds(usize, usize),

    #[error("expected a {expected}x{expected} matrix, found {found_rows}x{found_cols}")]
    DimensionMismatch {
        expected: usize,
        found_rows: usize,
        found_cols: usize,
    },

    /// Invalid singular-value cutoff, or the SVD pseudoinverse itself failed.
    #[error("pseudoinverse failed: {0}")]
    Pseudoinverse(String),
}
