// Application layer: model construction and frontier enumeration

pub mod model_builder;
pub mod pareto;

pub use model_builder::ModelBuilder;
pub use pareto::{compute_pareto_frontier, ParetoEnumerator};
