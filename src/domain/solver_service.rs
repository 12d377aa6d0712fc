// Domain service interface for the exact MILP solving engine.
// The enumerator never inspects solver internals; it only reads optimal
// values and feasibility status through this contract.

use super::models::{DecisionModel, SolveOutcome};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Solver not available: {0}")]
    BackendUnavailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Contract for an exact mixed-integer solver backend.
///
/// Every solve is to global optimality; the epsilon-constraint method is only
/// an exact Pareto-enumeration technique under that guarantee. Infeasibility
/// is reported through `SolveOutcome`, not as an error: it is the designed
/// termination signal of the enumeration loop.
pub trait SolverService: Send + Sync {
    /// Solve the model session's active objective subject to its live
    /// constraints.
    fn solve(&self, model: &DecisionModel) -> Result<SolveOutcome>;

    /// Validate a model session without solving it.
    fn validate(&self, model: &DecisionModel) -> Result<()> {
        let num_vars = model.num_variables();
        let mut errors = Vec::new();

        if model.active_objective().is_none() {
            errors.push("no active objective".to_string());
        }

        for (idx, constraint) in model.constraints().enumerate() {
            if !constraint.bound.is_finite() {
                errors.push(format!(
                    "constraint {} '{}' has non-finite bound",
                    idx, constraint.name
                ));
            }
            for &(var, _) in constraint.expr.terms() {
                if var.0 >= num_vars {
                    errors.push(format!(
                        "constraint {} '{}' references variable {} but model has {}",
                        idx, constraint.name, var.0, num_vars
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidModel(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Check if this solver supports mixed-integer programming
    fn supports_mip(&self) -> bool;
}
