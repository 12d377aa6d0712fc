// HiGHS solver adapter.
// Translates the model session to the HiGHS row-problem API. HiGHS models
// are build-once, so each solve rebuilds the problem from the session state.

use crate::domain::{
    models::{DecisionModel, SolveOutcome},
    solver_service::{Result, SolverError, SolverService},
    value_objects::ConstraintType,
};
use highs::{Col, HighsModelStatus, RowProblem, Sense};

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, model: &DecisionModel) -> Result<SolveOutcome> {
        self.validate(model)?;

        let num_vars = model.num_variables();

        // Dense objective coefficients from the active expression
        let mut obj_coeffs = vec![0.0; num_vars];
        if let Some(expr) = model.active_objective_expr() {
            for &(var, coeff) in expr.terms() {
                obj_coeffs[var.0] += coeff;
            }
        }

        // All decision variables are binary
        let mut pb = RowProblem::default();
        let cols: Vec<Col> = obj_coeffs
            .iter()
            .map(|&c| pb.add_integer_column(c, 0.0..=1.0))
            .collect();

        for constraint in model.constraints() {
            let terms: Vec<(Col, f64)> = constraint
                .expr
                .terms()
                .iter()
                .map(|&(var, coeff)| (cols[var.0], coeff))
                .collect();

            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => {
                    pb.add_row(..=constraint.bound, &terms);
                }
                ConstraintType::Equal => {
                    pb.add_row(constraint.bound..=constraint.bound, &terms);
                }
                ConstraintType::GreaterThanOrEqual => {
                    pb.add_row(constraint.bound.., &terms);
                }
            }
        }

        let solved = pb.optimise(Sense::Minimise).solve();

        match solved.status() {
            HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => {
                let variable_values = solved.get_solution().columns().to_vec();

                // Recompute the objective from the expression: keeps the
                // reported value consistent with how the enumerator
                // evaluates f1/f2 from variable values.
                let value = model
                    .active_objective_expr()
                    .map(|e| e.evaluate(&variable_values))
                    .unwrap_or(0.0);

                Ok(SolveOutcome::optimal(value, variable_values))
            }
            HighsModelStatus::Infeasible => Ok(SolveOutcome::infeasible()),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(SolveOutcome::unbounded())
            }
            status => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Constraint, LinearExpr, VarId};
    use crate::domain::value_objects::ObjectiveId;

    // Minimize y0 + y1 subject to y0 + y1 >= 1: optimum is 1.
    #[test]
    fn test_solve_tiny_covering_model() {
        let mut cost = LinearExpr::new();
        cost.add_term(VarId(0), 1.0);
        cost.add_term(VarId(1), 1.0);

        let mut model = DecisionModel::new(0, 2, cost.clone(), LinearExpr::new());
        model.set_objective(ObjectiveId::Cost);
        model.add_constraint(Constraint::new(
            ConstraintType::GreaterThanOrEqual,
            cost,
            1.0,
        ));

        let outcome = HighsSolver::new().solve(&model).unwrap();
        assert!(outcome.is_optimal());
        assert_eq!(outcome.objective_value.unwrap().round() as i64, 1);
    }

    // y0 <= 0 and y0 >= 1 cannot both hold.
    #[test]
    fn test_infeasible_reported_as_outcome_not_error() {
        let mut expr = LinearExpr::new();
        expr.add_term(VarId(0), 1.0);

        let mut model = DecisionModel::new(0, 1, expr.clone(), LinearExpr::new());
        model.set_objective(ObjectiveId::Cost);
        model.add_constraint(Constraint::new(
            ConstraintType::LessThanOrEqual,
            expr.clone(),
            0.0,
        ));
        model.add_constraint(Constraint::new(
            ConstraintType::GreaterThanOrEqual,
            expr,
            1.0,
        ));

        let outcome = HighsSolver::new().solve(&model).unwrap();
        assert_eq!(outcome.status, crate::domain::SolveStatus::Infeasible);
        assert!(outcome.objective_value.is_none());
    }
}
