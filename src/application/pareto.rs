//! Epsilon-constraint enumeration of the cost/distance Pareto frontier.
//!
//! The enumerator drives the solver through repeated re-solves of one model
//! session, tightening an upper bound on the distance objective after each
//! discovered point. Two strategies are available:
//!
//! - [`ParetoStrategy::Lexicographic`]: two solves per point. After
//!   minimizing cost, distance is re-minimized among the cost-optimal
//!   solutions, so ties on cost can never produce a weakly dominated point.
//! - [`ParetoStrategy::Direct`]: one solve per point. Records whatever
//!   distance the cost-optimal solution happens to carry; callers needing a
//!   guaranteed minimal frontier must use the lexicographic strategy.

use crate::domain::models::{Constraint, DecisionModel, FlpInstance, LinearExpr, SolveOutcome};
use crate::domain::solver_service::SolverService;
use crate::domain::value_objects::{
    ConstraintType, ObjectiveId, ParetoFrontier, ParetoPoint, ParetoStrategy,
};

use super::model_builder::ModelBuilder;

/// Minimum gap enforced between successive distance bounds. Both objectives
/// are integer-valued by construction (integer instance data over binary
/// variables), so a gap of 1 guarantees progress without skipping any
/// achievable distance value. A fractional-distance variant would have to
/// derive this from the data's granularity instead.
const OMEGA: i64 = 1;

/// Drives the solver over a mutable model session to trace the frontier.
/// The session is exclusively borrowed for the duration of the run; its
/// base constraints are left untouched and every enumeration-scoped bound
/// is released on all exit paths.
pub struct ParetoEnumerator<'a> {
    model: &'a mut DecisionModel,
    solver: &'a dyn SolverService,
}

impl<'a> ParetoEnumerator<'a> {
    pub fn new(model: &'a mut DecisionModel, solver: &'a dyn SolverService) -> Self {
        Self { model, solver }
    }

    /// Enumerate the frontier with the given strategy. `initial_epsilon`
    /// must be at least the distance of some feasible solution for the
    /// frontier to be non-empty; `FlpInstance::distance_upper_bound` gives
    /// a safe value. Each iteration lowers the bound by at least [`OMEGA`],
    /// so the loop runs at most `initial_epsilon / OMEGA + 1` times.
    pub fn run(&mut self, strategy: ParetoStrategy, initial_epsilon: i64) -> ParetoFrontier {
        match strategy {
            ParetoStrategy::Lexicographic => self.lexicographic(initial_epsilon),
            ParetoStrategy::Direct => self.direct(initial_epsilon),
        }
    }

    fn lexicographic(&mut self, initial_epsilon: i64) -> ParetoFrontier {
        let mut frontier = ParetoFrontier::new();
        let epsilon = self.add_distance_bound(initial_epsilon);

        loop {
            // Best cost under the current distance bound
            self.model.set_objective(ObjectiveId::Cost);
            let first = self.solve();
            if !first.is_optimal() {
                break;
            }
            let z1 = self.model.evaluate(ObjectiveId::Cost, &first.variable_values);

            // Fix cost at its optimum (≤ suffices: z1 is already minimal)
            // and re-minimize distance among the tied solutions.
            let mut cost_level = LinearExpr::new();
            for &(var, coeff) in self.model.objective_expr(ObjectiveId::Cost).terms() {
                cost_level.add_term(var, coeff);
            }
            let cost_bound = self.model.add_constraint(
                Constraint::new(ConstraintType::LessThanOrEqual, cost_level, z1 as f64)
                    .with_name("cost_level"),
            );
            self.model.set_objective(ObjectiveId::Distance);
            let second = self.solve();

            // The refinement solve can come back infeasible if the solver
            // fails; treat it as termination, releasing the cost bound.
            if !second.is_optimal() {
                self.model.remove_constraint(cost_bound);
                break;
            }
            let z2 = self
                .model
                .evaluate(ObjectiveId::Distance, &second.variable_values);

            frontier.push(ParetoPoint::new(z1, z2));

            self.model.remove_constraint(cost_bound);
            self.model.set_upper_bound(epsilon, (z2 - OMEGA) as f64);
            self.model.clear_objective();
        }

        self.model.remove_constraint(epsilon);
        self.model.clear_objective();
        frontier
    }

    fn direct(&mut self, initial_epsilon: i64) -> ParetoFrontier {
        let mut frontier = ParetoFrontier::new();
        let epsilon = self.add_distance_bound(initial_epsilon);

        // Cost stays the active objective for the whole loop
        self.model.set_objective(ObjectiveId::Cost);

        loop {
            let outcome = self.solve();
            if !outcome.is_optimal() {
                break;
            }
            let f1 = self.model.evaluate(ObjectiveId::Cost, &outcome.variable_values);
            let f2 = self
                .model
                .evaluate(ObjectiveId::Distance, &outcome.variable_values);

            frontier.push(ParetoPoint::new(f1, f2));
            self.model.set_upper_bound(epsilon, (f2 - OMEGA) as f64);
        }

        self.model.remove_constraint(epsilon);
        self.model.clear_objective();
        frontier
    }

    fn add_distance_bound(&mut self, epsilon: i64) -> crate::domain::models::ConstraintHandle {
        let mut expr = LinearExpr::new();
        for &(var, coeff) in self.model.objective_expr(ObjectiveId::Distance).terms() {
            expr.add_term(var, coeff);
        }
        self.model.add_constraint(
            Constraint::new(ConstraintType::LessThanOrEqual, expr, epsilon as f64)
                .with_name("epsilon_dist"),
        )
    }

    /// A backend failure is logged here and mapped to a no-solution outcome;
    /// the loops above then terminate on it like any other non-optimal solve.
    fn solve(&self) -> SolveOutcome {
        match self.solver.solve(self.model) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("solver failure: {}", e);
                SolveOutcome::failed(e.to_string())
            }
        }
    }
}

/// Build the model session for `instance` and enumerate its Pareto frontier
/// with the requested strategy.
pub fn compute_pareto_frontier(
    instance: &FlpInstance,
    strategy: ParetoStrategy,
    solver: &dyn SolverService,
) -> ParetoFrontier {
    let mut model = ModelBuilder::build(instance);
    let epsilon = instance.distance_upper_bound();
    ParetoEnumerator::new(&mut model, solver).run(strategy, epsilon)
}
