//! Structurally-weighted resistance entropy (Rs) for vascular networks.
//!
//! - [`resistance`]: Laplacian pseudoinverse, effective resistance, structural
//!   weights and the Rs score itself.
//! - [`targeting`]: greedy choice of edges whose removal raises Rs the most.
//! - [`engine`]: REGO, degree-preserving rewiring that climbs Rs.

pub mod engine;
pub mod errors;
pub mod graph;
pub mod operations;
pub mod resistance;
pub mod targeting;

pub use engine::{RegoConfig, RegoOutcome, RegoStats, RegoStatus, RewireOptimizer};
pub use errors::GraphError;
pub use graph::{canonical_edge, Edge, GraphState};
pub use resistance::{rs, rs_components, rs_of_largest_component, RsComponents};
pub use targeting::{find_targets, SearchStop, TargetingConfig, TargetingOutcome};
