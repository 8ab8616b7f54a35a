use rs_refiner::{Edge, GraphState};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdjacencyError {
    #[error("adjacency matrix is empty")]
    Empty,

    #[error("row {row} has {found} entries, expected {expected} (matrix must be square)")]
    NotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("matrix is not symmetric at ({row}, {col})")]
    Asymmetric { row: usize, col: usize },

    #[error("self-loop on node {0} (non-zero diagonal entry)")]
    SelfLoop(usize),

    #[error("line {line}: cannot parse entry {token:?}")]
    InvalidEntry { line: usize, token: String },
}

/// Parse a dense matrix: one row per line, entries separated by commas or
/// whitespace. Blank lines and lines starting with `#` are skipped.
pub fn parse_matrix(text: &str) -> Result<Vec<Vec<f64>>, AdjacencyError> {
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<f64>().map_err(|_| AdjacencyError::InvalidEntry {
                    line: line_no + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// The analysed network: the largest connected component of the input,
/// relabelled densely, plus the matrix index of each node.
#[derive(Debug, Clone)]
pub struct VascularNetwork {
    pub graph: GraphState,
    pub node_ids: Vec<usize>,
    /// Nodes of the input outside the largest component.
    pub dropped_nodes: usize,
}

impl VascularNetwork {
    /// Map an edge of `graph` back to matrix indices.
    pub fn original_edge(&self, (u, v): Edge) -> Edge {
        (self.node_ids[u], self.node_ids[v])
    }

    pub fn original_edges(&self, graph: &GraphState) -> Vec<Edge> {
        graph
            .edge_list()
            .into_iter()
            .map(|edge| self.original_edge(edge))
            .collect()
    }
}

/// Build a graph from a symmetric 0/1 (or weighted) adjacency matrix.
/// Any non-zero entry is an edge; weights are ignored.
///
/// If the result is disconnected only the largest component is kept.
pub fn reconstruct_network(matrix: &[Vec<f64>]) -> Result<VascularNetwork, AdjacencyError> {
    let rows = matrix.len();
    if rows == 0 {
        return Err(AdjacencyError::Empty);
    }
    for (row, entries) in matrix.iter().enumerate() {
        if entries.len() != rows {
            return Err(AdjacencyError::NotSquare {
                row,
                found: entries.len(),
                expected: rows,
            });
        }
    }

    let mut graph = GraphState::new(rows);
    for i in 0..rows {
        if matrix[i][i] != 0.0 {
            return Err(AdjacencyError::SelfLoop(i));
        }
        for j in (i + 1)..rows {
            if matrix[i][j] != matrix[j][i] {
                return Err(AdjacencyError::Asymmetric { row: i, col: j });
            }
            if matrix[i][j] != 0.0 {
                graph.add_edge(i, j);
            }
        }
    }

    if graph.is_connected() {
        return Ok(VascularNetwork {
            graph,
            node_ids: (0..rows).collect(),
            dropped_nodes: 0,
        });
    }

    let (component, node_ids) = graph.largest_connected_component();
    let dropped_nodes = rows - node_ids.len();
    warn!(
        kept = node_ids.len(),
        dropped = dropped_nodes,
        "adjacency matrix is disconnected, using the largest connected component"
    );
    Ok(VascularNetwork {
        graph: component,
        node_ids,
        dropped_nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let text = "# ring\n0, 1 0 1\n1 0 1 0\n\n0,1,0,1\n1 0 1 0\n";
        let matrix = parse_matrix(text).unwrap();
        assert_eq!(matrix.len(), 4);
        assert_eq!(matrix[0], vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_parse_bad_token() {
        let result = parse_matrix("0 1\n1 x\n");
        assert_eq!(
            result,
            Err(AdjacencyError::InvalidEntry {
                line: 2,
                token: "x".to_string()
            })
        );
    }

    #[test]
    fn test_reconstruct_connected() {
        let matrix = parse_matrix("0 1 0 1\n1 0 1 0\n0 1 0 1\n1 0 1 0").unwrap();
        let network = reconstruct_network(&matrix).unwrap();
        assert_eq!(network.graph.num_edges(), 4);
        assert_eq!(network.dropped_nodes, 0);
        assert_eq!(network.node_ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reconstruct_keeps_largest_component() {
        // 0-3 isolated pair, 1-2-4 path
        let matrix = parse_matrix(
            "0 0 0 1 0\n\
             0 0 1 0 0\n\
             0 1 0 0 1\n\
             1 0 0 0 0\n\
             0 0 1 0 0",
        )
        .unwrap();
        let network = reconstruct_network(&matrix).unwrap();
        assert_eq!(network.node_ids, vec![1, 2, 4]);
        assert_eq!(network.dropped_nodes, 2);
        assert!(network.graph.is_connected());
        assert_eq!(network.original_edges(&network.graph), vec![(1, 2), (2, 4)]);
    }

    #[test]
    fn test_reconstruct_validation() {
        assert_eq!(reconstruct_network(&[]).unwrap_err(), AdjacencyError::Empty);

        let ragged = vec![vec![0.0, 1.0], vec![1.0]];
        assert!(matches!(
            reconstruct_network(&ragged),
            Err(AdjacencyError::NotSquare { row: 1, .. })
        ));

        let asymmetric = vec![vec![0.0, 1.0], vec![0.0, 0.0]];
        assert_eq!(
            reconstruct_network(&asymmetric).unwrap_err(),
            AdjacencyError::Asymmetric { row: 0, col: 1 }
        );

        let looped = vec![vec![0.0, 1.0], vec![1.0, 1.0]];
        assert_eq!(reconstruct_network(&looped).unwrap_err(), AdjacencyError::SelfLoop(1));
    }
}
