//! REGO: resistance entropy gradient optimisation.
//!
//! Hill-climbing over degree-preserving edge swaps. A swap is kept only if
//! the graph stays connected and Rs strictly increases.

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::GraphError;
use crate::graph::{Edge, GraphState};
use crate::operations::{GraphOperation, SwapRejection};
use crate::resistance::rs;

/// Draws allowed per iteration when looking for two edges with four distinct endpoints.
pub const DEFAULT_MAX_PAIR_DRAWS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegoConfig {
    /// Number of swap attempts.
    pub iterations: usize,
    pub max_pair_draws: usize,
}

impl Default for RegoConfig {
    fn default() -> Self {
        RegoConfig {
            iterations: 1000,
            max_pair_draws: DEFAULT_MAX_PAIR_DRAWS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegoStatus {
    Optimized,
    /// Fewer than two edges; the input was returned untouched.
    InsufficientEdges,
}

/// How each attempt ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegoStats {
    pub attempts: usize,
    pub accepted: usize,
    pub no_disjoint_pair: usize,
    pub duplicate_edge: usize,
    pub disconnected: usize,
    pub evaluation_failed: usize,
    pub not_improving: usize,
}

#[derive(Debug, Clone)]
pub struct RegoOutcome {
    pub graph: GraphState,
    /// Initial Rs followed by the Rs after every accepted swap.
    pub rs_history: Vec<f64>,
    pub status: RegoStatus,
    pub stats: RegoStats,
}

impl RegoOutcome {
    pub fn final_rs(&self) -> f64 {
        self.rs_history.last().copied().unwrap_or(0.0)
    }
}

pub struct RewireOptimizer {
    config: RegoConfig,
}

impl RewireOptimizer {
    pub fn new(config: RegoConfig) -> Self {
        RewireOptimizer { config }
    }

    pub fn config(&self) -> &RegoConfig {
        &self.config
    }

    /// [`RewireOptimizer::optimize`] driven by a ChaCha8 stream seeded with `seed`.
    pub fn optimize_seeded(
        &self,
        graph: &GraphState,
        seed: u64,
    ) -> Result<RegoOutcome, GraphError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.optimize(graph, &mut rng)
    }

    /// Rewire a copy of `graph`, drawing all randomness from `rng`.
    ///
    /// Fails with [`GraphError::DisconnectedGraph`] if `graph` is not connected.
    pub fn optimize<R: Rng + ?Sized>(
        &self,
        graph: &GraphState,
        rng: &mut R,
    ) -> Result<RegoOutcome, GraphError> {
        let mut current_rs = rs(graph)?;
        let mut working = graph.clone();
        let mut rs_history = vec![current_rs];
        let mut stats = RegoStats::default();

        let mut edges = working.edge_list();
        if edges.len() < 2 {
            warn!(
                edges = edges.len(),
                "REGO needs at least 2 edges, returning input graph"
            );
            return Ok(RegoOutcome {
                graph: working,
                rs_history,
                status: RegoStatus::InsufficientEdges,
                stats,
            });
        }

        debug!(
            iterations = self.config.iterations,
            initial_rs = current_rs,
            "starting REGO optimisation"
        );

        for iteration in 0..self.config.iterations {
            stats.attempts += 1;

            let Some((first, second)) = self.draw_disjoint_pair(&edges, rng) else {
                stats.no_disjoint_pair += 1;
                continue;
            };

            let swap = match GraphOperation::degree_preserving_swap(&working, first, second) {
                Ok(swap) => swap,
                Err(SwapRejection::DuplicateEdge) => {
                    stats.duplicate_edge += 1;
                    continue;
                }
                Err(rejection) => {
                    debug!(?rejection, ?first, ?second, "invalid swap proposal");
                    stats.no_disjoint_pair += 1;
                    continue;
                }
            };

            swap.apply(&mut working);
            if !working.is_connected() {
                swap.revert(&mut working);
                stats.disconnected += 1;
                continue;
            }

            let new_rs = match rs(&working) {
                Ok(value) => value,
                Err(err) => {
                    debug!(%err, "Rs evaluation failed, reverting swap");
                    swap.revert(&mut working);
                    stats.evaluation_failed += 1;
                    continue;
                }
            };

            if new_rs > current_rs {
                current_rs = new_rs;
                rs_history.push(current_rs);
                edges = working.edge_list();
                stats.accepted += 1;
                if stats.accepted % 10 == 0 {
                    info!(
                        "Iter {}/{} | Accepted: {} | Rs: {:.4}",
                        iteration + 1,
                        self.config.iterations,
                        stats.accepted,
                        current_rs
                    );
                }
            } else {
                swap.revert(&mut working);
                stats.not_improving += 1;
            }
        }

        info!(
            attempts = stats.attempts,
            accepted = stats.accepted,
            final_rs = current_rs,
            "REGO finished"
        );

        Ok(RegoOutcome {
            graph: working,
            rs_history,
            status: RegoStatus::Optimized,
            stats,
        })
    }

    /// Two distinct edges with four distinct endpoints, or `None` once the
    /// draw limit is used up. The second edge comes back in random
    /// orientation so both rewirings of the pair can be proposed.
    fn draw_disjoint_pair<R: Rng + ?Sized>(
        &self,
        edges: &[Edge],
        rng: &mut R,
    ) -> Option<(Edge, Edge)> {
        for _ in 0..self.config.max_pair_draws {
            let picked = index::sample(rng, edges.len(), 2);
            let (u, v) = edges[picked.index(0)];
            let (x, y) = edges[picked.index(1)];
            if u == x || u == y || v == x || v == y {
                continue;
            }
            let second = if rng.gen_bool(0.5) { (y, x) } else { (x, y) };
            return Some(((u, v), second));
        }
        None
    }
}
