//! Structurally-weighted resistance entropy (Rs).
//!
//! Rs(G) = Σ_{(u,v) ∈ E} p_uv · ln(1/p_uv) · w_uv
//!
//! where p_uv is the share of the edge's effective resistance in the total
//! over all edges, and w_uv penalises edges whose endpoints deviate from the
//! mean degree.

use indexmap::IndexMap;
use nalgebra::DMatrix;

use crate::errors::GraphError;
use crate::graph::{Edge, GraphState};

/// Singular values below `rcond * σ_max` are treated as zero.
///
/// The smallest non-zero Laplacian eigenvalue of a connected graph is at
/// least 4 / n², which stays well above this for graphs of a few thousand nodes.
pub const DEFAULT_PINV_RCOND: f64 = 1e-10;

/// Both parts of the Rs sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsComponents {
    /// Shannon entropy of the resistance distribution, Σ p·ln(1/p). Never negative.
    pub entropy: f64,
    /// The structurally weighted sum, i.e. Rs itself.
    pub weighted: f64,
}

fn ensure_connected(graph: &GraphState) -> Result<(), GraphError> {
    if graph.num_nodes() == 0 {
        return Err(GraphError::EmptyGraph);
    }
    if !graph.is_connected() {
        return Err(GraphError::DisconnectedGraph);
    }
    Ok(())
}

/// Combinatorial Laplacian `L = D - A`.
pub fn laplacian_matrix(graph: &GraphState) -> DMatrix<f64> {
    let n = graph.num_nodes();
    let mut laplacian = DMatrix::<f64>::zeros(n, n);
    for u in 0..n {
        laplacian[(u, u)] = graph.degree(u) as f64;
        for &v in graph.neighbors(u) {
            laplacian[(u, v)] = -1.0;
        }
    }
    laplacian
}

/// Moore–Penrose pseudoinverse of the Laplacian of a connected graph.
pub fn laplacian_pseudoinverse(graph: &GraphState) -> Result<DMatrix<f64>, GraphError> {
    laplacian_pseudoinverse_with_rcond(graph, DEFAULT_PINV_RCOND)
}

/// Like [`laplacian_pseudoinverse`] with an explicit relative singular-value cutoff.
///
/// `rcond` must be a non-negative number, otherwise [`GraphError::Pseudoinverse`].
pub fn laplacian_pseudoinverse_with_rcond(
    graph: &GraphState,
    rcond: f64,
) -> Result<DMatrix<f64>, GraphError> {
    ensure_connected(graph)?;
    if rcond.is_nan() || rcond < 0.0 {
        return Err(GraphError::Pseudoinverse(format!(
            "relative cutoff must be non-negative, got {rcond}"
        )));
    }

    let svd = laplacian_matrix(graph).svd(true, true);
    let cutoff = rcond * svd.singular_values.max();
    svd.pseudo_inverse(cutoff)
        .map_err(|e| GraphError::Pseudoinverse(e.to_string()))
}

/// Effective resistance `Ω_uv = L⁺_uu + L⁺_vv - 2·L⁺_uv` for every edge.
///
/// A precomputed pseudoinverse can be passed in; it must be `n x n`.
/// Values are clamped at zero.
pub fn effective_resistance(
    graph: &GraphState,
    l_plus: Option<&DMatrix<f64>>,
) -> Result<IndexMap<Edge, f64>, GraphError> {
    ensure_connected(graph)?;

    let n = graph.num_nodes();
    let computed;
    let l_plus = match l_plus {
        Some(matrix) => {
            if matrix.nrows() != n || matrix.ncols() != n {
                return Err(GraphError::DimensionMismatch {
                    expected: n,
                    found_rows: matrix.nrows(),
                    found_cols: matrix.ncols(),
                });
            }
            matrix
        }
        None => {
            computed = laplacian_pseudoinverse(graph)?;
            &computed
        }
    };

    Ok(graph
        .edge_list()
        .into_iter()
        .map(|(u, v)| {
            let omega = l_plus[(u, u)] + l_plus[(v, v)] - 2.0 * l_plus[(u, v)];
            ((u, v), omega.max(0.0))
        })
        .collect())
}

/// Degree-heterogeneity weight per edge:
/// `w_uv = 1 - (|d_u - d̄| + |d_v - d̄|) / (2·N·d̄)`.
///
/// Since `|d - d̄| <= |E|` and `2·N·d̄ = 4·|E|`, every weight lies in `[0.5, 1]`.
pub fn structural_penalty_weights(graph: &GraphState) -> IndexMap<Edge, f64> {
    let n = graph.num_nodes();
    let edges = graph.edge_list();
    if n == 0 || edges.is_empty() {
        return IndexMap::new();
    }

    let degrees = graph.degree_sequence();
    let mean_degree = degrees.iter().sum::<usize>() as f64 / n as f64;
    let denominator = 2.0 * n as f64 * mean_degree;
    if mean_degree == 0.0 || denominator == 0.0 {
        return edges.into_iter().map(|e| (e, 1.0)).collect();
    }

    edges
        .into_iter()
        .map(|(u, v)| {
            let deviation = (degrees[u] as f64 - mean_degree).abs()
                + (degrees[v] as f64 - mean_degree).abs();
            ((u, v), 1.0 - deviation / denominator)
        })
        .collect()
}

/// Entropy and weighted entropy of the edge resistance distribution.
pub fn rs_components(graph: &GraphState) -> Result<RsComponents, GraphError> {
    ensure_connected(graph)?;

    let zero = RsComponents {
        entropy: 0.0,
        weighted: 0.0,
    };
    if graph.num_edges() == 0 {
        return Ok(zero);
    }

    let resistances = effective_resistance(graph, None)?;
    let total: f64 = resistances.values().sum();
    if total == 0.0 {
        return Ok(zero);
    }

    let weights = structural_penalty_weights(graph);
    let mut components = zero;
    for (edge, omega) in &resistances {
        let p = omega / total;
        if p <= 0.0 {
            continue;
        }
        let term = p * (1.0 / p).ln();
        components.entropy += term;
        if let Some(w) = weights.get(edge) {
            components.weighted += term * w;
        }
    }
    Ok(components)
}

/// Structurally-weighted resistance entropy of a connected graph.
pub fn rs(graph: &GraphState) -> Result<f64, GraphError> {
    rs_components(graph).map(|c| c.weighted)
}

/// Rs of the largest connected component; 0.0 if that component has no edges.
pub fn rs_of_largest_component(graph: &GraphState) -> Result<f64, GraphError> {
    if graph.num_nodes() > 0 && graph.is_connected() {
        return rs(graph);
    }
    let (component, _) = graph.largest_connected_component();
    if component.num_edges() == 0 {
        return Ok(0.0);
    }
    rs(&component)
}
