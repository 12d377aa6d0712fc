// COIN-OR CBC solver adapter, via good_lp.
// Like the HiGHS adapter, rebuilds the backend problem from the session
// state on every solve.

use crate::domain::{
    models::{DecisionModel, SolveOutcome},
    solver_service::{Result, SolverError, SolverService},
    value_objects::ConstraintType,
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, model: &DecisionModel) -> Result<SolveOutcome> {
        self.validate(model)?;

        let mut vars = variables!();
        let lp_variables: Vec<GoodLpVariable> = (0..model.num_variables())
            .map(|_| vars.add(variable().integer().min(0.0).max(1.0)))
            .collect();

        let mut obj_expr: Expression = 0.into();
        if let Some(expr) = model.active_objective_expr() {
            for &(var, coeff) in expr.terms() {
                obj_expr += coeff * lp_variables[var.0];
            }
        }

        let mut lp_model = vars.minimise(obj_expr).using(coin_cbc::coin_cbc);

        for constraint in model.constraints() {
            let mut lhs: Expression = 0.into();
            for &(var, coeff) in constraint.expr.terms() {
                lhs += coeff * lp_variables[var.0];
            }

            lp_model = match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => lp_model.with(lhs.leq(constraint.bound)),
                ConstraintType::Equal => lp_model.with(lhs.eq(constraint.bound)),
                ConstraintType::GreaterThanOrEqual => lp_model.with(lhs.geq(constraint.bound)),
            };
        }

        match lp_model.solve() {
            Ok(sol) => {
                let variable_values: Vec<f64> =
                    lp_variables.iter().map(|&v| sol.value(v)).collect();

                let value = model
                    .active_objective_expr()
                    .map(|e| e.evaluate(&variable_values))
                    .unwrap_or(0.0);

                Ok(SolveOutcome::optimal(value, variable_values))
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::infeasible()),
            Err(ResolutionError::Unbounded) => Ok(SolveOutcome::unbounded()),
            Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
