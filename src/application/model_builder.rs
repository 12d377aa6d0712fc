//! Builds the decision-model session from an instance: all variables, the
//! three base constraint families, and both objective expressions. No
//! objective is attached; the enumerator activates them dynamically.

use crate::domain::models::{Constraint, DecisionModel, FlpInstance, LinearExpr};
use crate::domain::value_objects::ConstraintType;

pub struct ModelBuilder;

impl ModelBuilder {
    /// Construct the session for an instance. The instance constructor has
    /// already enforced the dimensional invariants, so this cannot fail.
    pub fn build(instance: &FlpInstance) -> DecisionModel {
        let n = instance.customers();
        let h = instance.facilities();

        // f1: total opening cost
        let probe = DecisionModel::new(n, h, LinearExpr::new(), LinearExpr::new());
        let mut cost = LinearExpr::new();
        for j in 0..h {
            cost.add_term(probe.open_var(j), instance.opening_cost(j) as f64);
        }

        // f2: total assignment distance
        let mut distance = LinearExpr::new();
        for i in 0..n {
            for j in 0..h {
                distance.add_term(probe.assign_var(i, j), instance.distance(i, j) as f64);
            }
        }

        let mut model = DecisionModel::new(n, h, cost, distance);

        // Each customer is assigned to exactly one facility
        for i in 0..n {
            let mut expr = LinearExpr::new();
            for j in 0..h {
                expr.add_term(model.assign_var(i, j), 1.0);
            }
            model.add_constraint(
                Constraint::new(ConstraintType::Equal, expr, 1.0)
                    .with_name(format!("assign_{}", i)),
            );
        }

        // Assigned demand must fit the facility capacity
        for j in 0..h {
            let mut expr = LinearExpr::new();
            for i in 0..n {
                expr.add_term(model.assign_var(i, j), instance.demand(i) as f64);
            }
            model.add_constraint(
                Constraint::new(ConstraintType::LessThanOrEqual, expr, instance.capacity(j) as f64)
                    .with_name(format!("capacity_{}", j)),
            );
        }

        // A customer can only be assigned to an open facility:
        // x[i][j] - y[j] <= 0
        for i in 0..n {
            for j in 0..h {
                let mut expr = LinearExpr::new();
                expr.add_term(model.assign_var(i, j), 1.0);
                expr.add_term(model.open_var(j), -1.0);
                model.add_constraint(
                    Constraint::new(ConstraintType::LessThanOrEqual, expr, 0.0)
                        .with_name(format!("link_{}_{}", i, j)),
                );
            }
        }

        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ObjectiveId;

    fn setup() -> (FlpInstance, DecisionModel) {
        let instance = FlpInstance::new(
            2,
            2,
            vec![1, 1],
            vec![5, 5],
            vec![2, 2],
            vec![vec![1, 10], vec![10, 1]],
            1,
        )
        .unwrap();
        let model = ModelBuilder::build(&instance);
        (instance, model)
    }

    #[test]
    fn test_constraint_and_variable_counts() {
        let (_, model) = setup();
        // 2 open + 4 assignment variables
        assert_eq!(model.num_variables(), 6);
        // 2 assignment + 2 capacity + 4 linking constraints
        assert_eq!(model.num_constraints(), 8);
        // No objective attached by the builder
        assert!(model.active_objective().is_none());
    }

    #[test]
    fn test_objective_expressions() {
        let (_, model) = setup();
        // Open both facilities, assign each customer to its nearer one
        let values = [1.0, 1.0, 1.0, 0.0, 0.0, 1.0];
        assert_eq!(model.evaluate(ObjectiveId::Cost, &values), 10);
        assert_eq!(model.evaluate(ObjectiveId::Distance, &values), 2);
    }

    #[test]
    fn test_feasible_assignment_satisfies_constraints() {
        let (_, model) = setup();
        // Single open facility serving both customers (capacity 2 suffices)
        let values = [1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        assert!(model.satisfies_constraints(&values));
        assert_eq!(model.open_facilities(&values), vec![0]);
        assert_eq!(model.assignments(&values), vec![Some(0), Some(0)]);
    }

    #[test]
    fn test_assignment_to_closed_facility_is_infeasible() {
        let (_, model) = setup();
        // Customer 1 assigned to facility 1, which is closed
        let values = [1.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        assert!(!model.satisfies_constraints(&values));
    }

    #[test]
    fn test_capacity_violation_is_detected() {
        let instance = FlpInstance::new(
            2,
            1,
            vec![2, 2],
            vec![5],
            vec![3],
            vec![vec![1], vec![1]],
            0,
        )
        .unwrap();
        let model = ModelBuilder::build(&instance);
        // Both customers on the single facility: demand 4 > capacity 3
        let values = [1.0, 1.0, 1.0];
        assert!(!model.satisfies_constraints(&values));
    }

    #[test]
    fn test_unassigned_customer_is_infeasible() {
        let (_, model) = setup();
        let values = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
        assert!(!model.satisfies_constraints(&values));
    }
}
