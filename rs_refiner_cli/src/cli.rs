use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rs_refiner::{
    find_targets, rs_components, Edge, RegoStats, RegoStatus, RewireOptimizer, SearchStop,
};
use serde::Serialize;
use tracing::info;

use crate::adjacency::{parse_matrix, reconstruct_network, VascularNetwork};
use crate::config::AnalysisConfig;

#[derive(Parser, Debug)]
#[command(name = "rs-refiner", version, about = "Resistance entropy analysis of vascular networks")]
pub struct Cli {
    /// TOML file with [targeting] and [rego] settings
    #[arg(long, global = true, env = "RS_REFINER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute Rs of the network
    Score {
        /// Adjacency matrix file (rows of 0/1, comma or space separated)
        matrix: PathBuf,
    },
    /// Greedily pick vessel segments to remove
    Target {
        matrix: PathBuf,
        #[arg(long)]
        num_targets: Option<usize>,
        /// Unit-cost removal budget
        #[arg(long)]
        budget: Option<f64>,
        /// Score candidate removals in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Rewire with degree-preserving swaps to maximise Rs (REGO)
    Rewire {
        matrix: PathBuf,
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long)]
        max_pair_draws: Option<usize>,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Serialize)]
struct NetworkSummary {
    nodes: usize,
    edges: usize,
    dropped_nodes: usize,
}

#[derive(Serialize)]
struct ScoreReport {
    network: NetworkSummary,
    rs: f64,
    entropy: f64,
}

#[derive(Serialize)]
struct TargetReport {
    network: NetworkSummary,
    initial_rs: f64,
    final_rs: f64,
    targets: Vec<Edge>,
    delta_history: Vec<f64>,
    stop: SearchStop,
    remaining_edges: usize,
}

#[derive(Serialize)]
struct RewireReport {
    network: NetworkSummary,
    seed: Option<u64>,
    iterations: usize,
    max_pair_draws: usize,
    status: RegoStatus,
    initial_rs: f64,
    final_rs: f64,
    rs_history: Vec<f64>,
    stats: RegoStats,
    edges: Vec<Edge>,
}

fn load_network(path: &Path) -> Result<(VascularNetwork, NetworkSummary)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read adjacency matrix {}", path.display()))?;
    let matrix = parse_matrix(&text).with_context(|| format!("in {}", path.display()))?;
    let network = reconstruct_network(&matrix).with_context(|| format!("in {}", path.display()))?;
    let summary = NetworkSummary {
        nodes: network.graph.num_nodes(),
        edges: network.graph.num_edges(),
        dropped_nodes: network.dropped_nodes,
    };
    info!(
        nodes = summary.nodes,
        edges = summary.edges,
        "loaded network from {}",
        path.display()
    );
    Ok((network, summary))
}

fn emit<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    let config = AnalysisConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Score { matrix } => {
            let (network, summary) = load_network(&matrix)?;
            let components = rs_components(&network.graph)?;
            emit(&ScoreReport {
                network: summary,
                rs: components.weighted,
                entropy: components.entropy,
            })
        }
        Commands::Target {
            matrix,
            num_targets,
            budget,
            parallel,
        } => {
            let config = config.with_targeting_overrides(num_targets, budget, parallel);
            let (network, summary) = load_network(&matrix)?;
            let outcome = find_targets(&network.graph, &config.targeting)?;
            emit(&TargetReport {
                network: summary,
                initial_rs: outcome.initial_rs,
                final_rs: outcome.final_rs,
                targets: outcome
                    .targets
                    .iter()
                    .map(|&edge| network.original_edge(edge))
                    .collect(),
                delta_history: outcome.delta_history,
                stop: outcome.stop,
                remaining_edges: outcome.final_graph.num_edges(),
            })
        }
        Commands::Rewire {
            matrix,
            iterations,
            max_pair_draws,
            seed,
        } => {
            let config = config.with_rego_overrides(iterations, max_pair_draws, seed);
            let (network, summary) = load_network(&matrix)?;
            let optimizer = RewireOptimizer::new(config.rego.clone());
            let outcome = match config.seed {
                Some(seed) => optimizer.optimize_seeded(&network.graph, seed)?,
                None => optimizer.optimize(&network.graph, &mut rand::thread_rng())?,
            };
            emit(&RewireReport {
                network: summary,
                seed: config.seed,
                iterations: optimizer.config().iterations,
                max_pair_draws: optimizer.config().max_pair_draws,
                status: outcome.status,
                initial_rs: outcome.rs_history.first().copied().unwrap_or(0.0),
                final_rs: outcome.final_rs(),
                edges: network.original_edges(&outcome.graph),
                rs_history: outcome.rs_history,
                stats: outcome.stats,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rewire_args() {
        let cli = Cli::try_parse_from([
            "rs-refiner",
            "rewire",
            "net.txt",
            "--iterations",
            "25",
            "--seed",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Rewire {
                matrix,
                iterations,
                seed,
                max_pair_draws,
            } => {
                assert_eq!(matrix, PathBuf::from("net.txt"));
                assert_eq!(iterations, Some(25));
                assert_eq!(seed, Some(3));
                assert_eq!(max_pair_draws, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_target_args() {
        let cli =
            Cli::try_parse_from(["rs-refiner", "target", "m.csv", "--budget", "2.5", "--parallel"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Target { budget: Some(b), num_targets: None, parallel: true, .. } if b == 2.5
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
