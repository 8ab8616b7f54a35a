//! Greedy selection of edges to remove ("targets").
//!
//! Each step tries every remaining edge, scores the graph without it via
//! [`rs_of_largest_component`], and commits the removal with the largest
//! ΔRs. Removals that split the graph are allowed; the largest surviving
//! component is what gets scored.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::GraphError;
use crate::graph::{Edge, GraphState};
use crate::operations::GraphOperation;
use crate::resistance::{rs, rs_of_largest_component};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    pub num_targets: usize,
    /// Removal budget at unit cost per edge; caps the number of targets at `floor(budget)`.
    pub budget: Option<f64>,
    /// Score each step's candidate removals on the rayon pool. Results are
    /// identical either way; off by default.
    pub parallel: bool,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        TargetingConfig {
            num_targets: 1,
            budget: None,
            parallel: false,
        }
    }
}

impl TargetingConfig {
    pub fn iterations(&self) -> usize {
        match self.budget {
            // NaN and negative budgets allow nothing
            Some(budget) => self.num_targets.min(budget.max(0.0).floor() as usize),
            None => self.num_targets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStop {
    /// All requested iterations ran.
    Completed,
    /// No edge left to evaluate before the iteration count was reached.
    NoCandidates,
}

#[derive(Debug, Clone)]
pub struct TargetingOutcome {
    /// Removed edges in selection order.
    pub targets: Vec<Edge>,
    /// ΔRs of each selection, parallel to `targets`.
    pub delta_history: Vec<f64>,
    pub final_graph: GraphState,
    pub initial_rs: f64,
    pub final_rs: f64,
    pub stop: SearchStop,
}

/// Rs of the largest component left after removing `edge`, `None` if it cannot be scored.
fn score_removal(graph: &GraphState, edge: Edge) -> Option<f64> {
    let mut trial = graph.clone();
    GraphOperation::Remove(edge).apply(&mut trial);
    rs_of_largest_component(&trial).ok()
}

/// Run the greedy search on a copy of `graph`.
///
/// Fails with [`GraphError::DisconnectedGraph`] if `graph` is not connected.
pub fn find_targets(
    graph: &GraphState,
    config: &TargetingConfig,
) -> Result<TargetingOutcome, GraphError> {
    let initial_rs = rs(graph)?;
    let iterations = config.iterations();
    let mut working = graph.clone();
    let mut baseline = initial_rs;
    let mut targets = Vec::with_capacity(iterations);
    let mut delta_history = Vec::with_capacity(iterations);
    let mut stop = SearchStop::Completed;

    debug!(iterations, initial_rs, "starting greedy target search");

    for step in 0..iterations {
        let candidates = working.edge_list();

        let scored: Vec<Option<f64>> = if config.parallel {
            candidates
                .par_iter()
                .map(|&edge| score_removal(&working, edge))
                .collect()
        } else {
            candidates
                .iter()
                .map(|&edge| score_removal(&working, edge))
                .collect()
        };

        // Sequential scan keeps first-encountered tie breaking.
        let mut best: Option<(Edge, f64, f64)> = None;
        for (&edge, score) in candidates.iter().zip(&scored) {
            let Some(rs_after) = *score else { continue };
            let delta = rs_after - baseline;
            if !delta.is_finite() {
                continue;
            }
            if best.map_or(true, |(_, best_delta, _)| delta > best_delta) {
                best = Some((edge, delta, rs_after));
            }
        }

        let Some((edge, delta, rs_after)) = best else {
            debug!(step, "no removable edge left, stopping");
            stop = SearchStop::NoCandidates;
            break;
        };

        GraphOperation::Remove(edge).apply(&mut working);
        baseline = rs_after;
        targets.push(edge);
        delta_history.push(delta);

        info!(
            "Step {}/{}: targeted edge {:?}, new Rs {:.4} (ΔRs {:+.4})",
            step + 1,
            iterations,
            edge,
            baseline,
            delta
        );
    }

    Ok(TargetingOutcome {
        targets,
        delta_history,
        final_graph: working,
        initial_rs,
        final_rs: baseline,
        stop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterations_budget() {
        let config = |num_targets, budget| TargetingConfig {
            num_targets,
            budget,
            ..TargetingConfig::default()
        };
        assert_eq!(config(5, None).iterations(), 5);
        assert_eq!(config(5, Some(2.9)).iterations(), 2);
        assert_eq!(config(2, Some(10.0)).iterations(), 2);
        assert_eq!(config(3, Some(-1.0)).iterations(), 0);
        assert_eq!(config(3, Some(f64::NAN)).iterations(), 0);
    }
}
