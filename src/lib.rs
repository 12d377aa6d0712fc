// Domain layer: instance data, model session, solver contract
pub mod domain;

// Application layer: model construction and frontier enumeration
pub mod application;

// Infrastructure layer: external concerns (file loading, result output)
pub mod infrastructure;

// Solver adapters: concrete implementations of SolverService
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintHandle, ConstraintType, DecisionModel, FlpInstance, InstanceError,
    LinearExpr, ObjectiveId, ParetoFrontier, ParetoPoint, ParetoStrategy, SolveOutcome,
    SolveStatus, SolverBackend, SolverError, SolverService,
};

pub use application::{compute_pareto_frontier, ModelBuilder, ParetoEnumerator};

pub use infrastructure::{load_instance, parse_instance, print_frontier, render_frontier, LoadError};

pub use solver::SolverFactory;

#[cfg(feature = "coin-cbc")]
pub use solver::CoinCbcSolver;
#[cfg(feature = "highs")]
pub use solver::HighsSolver;
