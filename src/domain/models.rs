use super::value_objects::{ConstraintType, ObjectiveId, SolveStatus};
use std::fmt;

/// Structural defects in instance data. These are precondition violations:
/// the caller gets a hard error before any modeling begins.
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("{field} has length {actual}, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("distance row {row} has length {actual}, expected {expected}")]
    RaggedDistanceRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{field}[{index}] is negative ({value})")]
    NegativeValue {
        field: &'static str,
        index: usize,
        value: i64,
    },
}

/// A capacitated facility location instance. Immutable once constructed;
/// `Clone` performs a full deep copy of the data (solver session state is a
/// separate object and never part of the instance).
#[derive(Debug, Clone)]
pub struct FlpInstance {
    customers: usize,
    facilities: usize,
    demands: Vec<i64>,
    opening_costs: Vec<i64>,
    capacities: Vec<i64>,
    distances: Vec<Vec<i64>>,
    delta: i64,
}

impl FlpInstance {
    /// Build an instance, enforcing the dimensional invariants: demands has
    /// length N, costs and capacities length H, distances is rectangular
    /// N×H, and every value is non-negative.
    pub fn new(
        customers: usize,
        facilities: usize,
        demands: Vec<i64>,
        opening_costs: Vec<i64>,
        capacities: Vec<i64>,
        distances: Vec<Vec<i64>>,
        delta: i64,
    ) -> Result<Self, InstanceError> {
        check_len("demands", &demands, customers)?;
        check_len("opening costs", &opening_costs, facilities)?;
        check_len("capacities", &capacities, facilities)?;
        if distances.len() != customers {
            return Err(InstanceError::LengthMismatch {
                field: "distance matrix",
                expected: customers,
                actual: distances.len(),
            });
        }
        for (i, row) in distances.iter().enumerate() {
            if row.len() != facilities {
                return Err(InstanceError::RaggedDistanceRow {
                    row: i,
                    expected: facilities,
                    actual: row.len(),
                });
            }
            check_non_negative("distance", row)?;
        }
        check_non_negative("demand", &demands)?;
        check_non_negative("opening cost", &opening_costs)?;
        check_non_negative("capacity", &capacities)?;

        Ok(Self {
            customers,
            facilities,
            demands,
            opening_costs,
            capacities,
            distances,
            delta,
        })
    }

    pub fn customers(&self) -> usize {
        self.customers
    }

    pub fn facilities(&self) -> usize {
        self.facilities
    }

    pub fn demand(&self, i: usize) -> i64 {
        self.demands[i]
    }

    pub fn opening_cost(&self, j: usize) -> i64 {
        self.opening_costs[j]
    }

    pub fn capacity(&self, j: usize) -> i64 {
        self.capacities[j]
    }

    pub fn distance(&self, i: usize, j: usize) -> i64 {
        self.distances[i][j]
    }

    /// Reserved for future epsilon-step control.
    pub fn delta(&self) -> i64 {
        self.delta
    }

    /// An upper bound on the total assignment distance of any feasible
    /// solution: each customer contributes at most its largest distance.
    /// Used as the initial epsilon bound of the enumeration.
    pub fn distance_upper_bound(&self) -> i64 {
        self.distances
            .iter()
            .map(|row| row.iter().copied().max().unwrap_or(0))
            .sum()
    }
}

impl fmt::Display for FlpInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Facility location instance with {} facilities, {} customers, delta = {}",
            self.facilities, self.customers, self.delta
        )
    }
}

fn check_len(field: &'static str, values: &[i64], expected: usize) -> Result<(), InstanceError> {
    if values.len() != expected {
        return Err(InstanceError::LengthMismatch {
            field,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, values: &[i64]) -> Result<(), InstanceError> {
    for (index, &value) in values.iter().enumerate() {
        if value < 0 {
            return Err(InstanceError::NegativeValue {
                field,
                index,
                value,
            });
        }
    }
    Ok(())
}

/// Index of a decision variable in the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

/// Sparse linear expression over decision variables
#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        if coefficient != 0.0 {
            self.terms.push((var, coefficient));
        }
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(VarId(v), c)| c * values[v])
            .sum()
    }
}

/// Linear constraint on decision variables
#[derive(Debug, Clone)]
pub struct Constraint {
    pub constraint_type: ConstraintType,
    pub expr: LinearExpr,
    pub bound: f64,
    pub name: String,
}

impl Constraint {
    pub fn new(constraint_type: ConstraintType, expr: LinearExpr, bound: f64) -> Self {
        Self {
            constraint_type,
            expr,
            bound,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether `values` satisfies this constraint, up to MILP tolerance.
    pub fn is_satisfied(&self, values: &[f64]) -> bool {
        const TOL: f64 = 1e-6;
        let lhs = self.expr.evaluate(values);
        match self.constraint_type {
            ConstraintType::LessThanOrEqual => lhs <= self.bound + TOL,
            ConstraintType::Equal => (lhs - self.bound).abs() <= TOL,
            ConstraintType::GreaterThanOrEqual => lhs >= self.bound - TOL,
        }
    }
}

/// Handle to a constraint living in a `DecisionModel` slab. Valid until the
/// constraint is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintHandle(usize);

/// The long-lived, incrementally edited model session: H binary "facility
/// open" variables, N×H binary "assignment" variables, a constraint slab
/// mutated in place across enumeration iterations, and the two objective
/// expressions of which at most one is active at a time.
///
/// There is exactly one mutator (the enumerator holds `&mut`), so constraint
/// edits need no synchronization. A session is not cloneable; rebuild one
/// from the instance via `ModelBuilder::build`.
#[derive(Debug)]
pub struct DecisionModel {
    customers: usize,
    facilities: usize,
    constraints: Vec<Option<Constraint>>,
    cost_objective: LinearExpr,
    distance_objective: LinearExpr,
    active_objective: Option<ObjectiveId>,
}

impl DecisionModel {
    pub(crate) fn new(
        customers: usize,
        facilities: usize,
        cost_objective: LinearExpr,
        distance_objective: LinearExpr,
    ) -> Self {
        Self {
            customers,
            facilities,
            constraints: Vec::new(),
            cost_objective,
            distance_objective,
            active_objective: None,
        }
    }

    pub fn customers(&self) -> usize {
        self.customers
    }

    pub fn facilities(&self) -> usize {
        self.facilities
    }

    /// Total variable count: H open indicators followed by N×H assignment
    /// indicators. All variables are binary.
    pub fn num_variables(&self) -> usize {
        self.facilities + self.customers * self.facilities
    }

    /// y[j]: is facility j open?
    pub fn open_var(&self, j: usize) -> VarId {
        debug_assert!(j < self.facilities);
        VarId(j)
    }

    /// x[i][j]: is customer i assigned to facility j?
    pub fn assign_var(&self, i: usize, j: usize) -> VarId {
        debug_assert!(i < self.customers && j < self.facilities);
        VarId(self.facilities + i * self.facilities + j)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> ConstraintHandle {
        self.constraints.push(Some(constraint));
        ConstraintHandle(self.constraints.len() - 1)
    }

    pub fn remove_constraint(&mut self, handle: ConstraintHandle) {
        debug_assert!(self.constraints[handle.0].is_some(), "double remove");
        self.constraints[handle.0] = None;
    }

    /// Tighten the right-hand side of a ≤ constraint in place.
    pub fn set_upper_bound(&mut self, handle: ConstraintHandle, bound: f64) {
        let constraint = self.constraints[handle.0]
            .as_mut()
            .expect("constraint was removed");
        debug_assert_eq!(constraint.constraint_type, ConstraintType::LessThanOrEqual);
        constraint.bound = bound;
    }

    /// Live constraints, in insertion order.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().filter_map(|c| c.as_ref())
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.iter().filter(|c| c.is_some()).count()
    }

    pub fn set_objective(&mut self, objective: ObjectiveId) {
        self.active_objective = Some(objective);
    }

    pub fn clear_objective(&mut self) {
        self.active_objective = None;
    }

    pub fn active_objective(&self) -> Option<ObjectiveId> {
        self.active_objective
    }

    pub fn objective_expr(&self, objective: ObjectiveId) -> &LinearExpr {
        match objective {
            ObjectiveId::Cost => &self.cost_objective,
            ObjectiveId::Distance => &self.distance_objective,
        }
    }

    pub fn active_objective_expr(&self) -> Option<&LinearExpr> {
        self.active_objective.map(|o| self.objective_expr(o))
    }

    /// Evaluate an objective against a variable assignment. Both objectives
    /// are integer-valued by construction, so rounding only strips MILP
    /// tolerance noise.
    pub fn evaluate(&self, objective: ObjectiveId, values: &[f64]) -> i64 {
        self.objective_expr(objective).evaluate(values).round() as i64
    }

    /// Whether a variable assignment satisfies every live constraint.
    pub fn satisfies_constraints(&self, values: &[f64]) -> bool {
        self.constraints().all(|c| c.is_satisfied(values))
    }

    /// Facilities opened in a solved assignment.
    pub fn open_facilities(&self, values: &[f64]) -> Vec<usize> {
        (0..self.facilities)
            .filter(|&j| values[self.open_var(j).0] > 0.5)
            .collect()
    }

    /// Facility each customer is assigned to in a solved assignment.
    pub fn assignments(&self, values: &[f64]) -> Vec<Option<usize>> {
        (0..self.customers)
            .map(|i| (0..self.facilities).find(|&j| values[self.assign_var(i, j).0] > 0.5))
            .collect()
    }
}

/// Result of one solve of the model session
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    pub variable_values: Vec<f64>,
    pub message: String,
}

impl SolveOutcome {
    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective_value: Some(value),
            variable_values,
            message: "Optimal solution found".to_string(),
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            objective_value: None,
            variable_values: Vec::new(),
            message: "No solution satisfies all constraints".to_string(),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            status: SolveStatus::Unbounded,
            objective_value: None,
            variable_values: Vec::new(),
            message: "Objective can be improved infinitely".to_string(),
        }
    }

    /// Sentinel outcome for a backend failure: carries no objective value,
    /// so it can never be mistaken for a legitimate optimum (those are ≥ 0).
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: SolveStatus::Error,
            objective_value: None,
            variable_values: Vec::new(),
            message: message.into(),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_instance() -> FlpInstance {
        FlpInstance::new(
            2,
            2,
            vec![1, 1],
            vec![5, 5],
            vec![2, 2],
            vec![vec![1, 10], vec![10, 1]],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_instance_accessors() {
        let inst = small_instance();
        assert_eq!(inst.customers(), 2);
        assert_eq!(inst.facilities(), 2);
        assert_eq!(inst.demand(0), 1);
        assert_eq!(inst.opening_cost(1), 5);
        assert_eq!(inst.capacity(0), 2);
        assert_eq!(inst.distance(0, 1), 10);
        assert_eq!(inst.delta(), 1);
    }

    #[test]
    fn test_instance_dimension_mismatch() {
        let err = FlpInstance::new(2, 2, vec![1], vec![5, 5], vec![2, 2], vec![], 0).unwrap_err();
        assert!(matches!(
            err,
            InstanceError::LengthMismatch {
                field: "demands",
                expected: 2,
                actual: 1,
            }
        ));
    }

    #[test]
    fn test_instance_ragged_distances() {
        let err = FlpInstance::new(
            2,
            2,
            vec![1, 1],
            vec![5, 5],
            vec![2, 2],
            vec![vec![1, 10], vec![10]],
            0,
        )
        .unwrap_err();
        assert!(matches!(err, InstanceError::RaggedDistanceRow { row: 1, .. }));
    }

    #[test]
    fn test_instance_rejects_negative_values() {
        let err = FlpInstance::new(
            1,
            1,
            vec![-3],
            vec![5],
            vec![2],
            vec![vec![1]],
            0,
        )
        .unwrap_err();
        assert!(matches!(err, InstanceError::NegativeValue { field: "demand", .. }));
    }

    #[test]
    fn test_distance_upper_bound() {
        assert_eq!(small_instance().distance_upper_bound(), 20);
    }

    #[test]
    fn test_linear_expr_evaluate() {
        let mut expr = LinearExpr::new();
        expr.add_term(VarId(0), 5.0);
        expr.add_term(VarId(2), 3.0);
        expr.add_term(VarId(1), 0.0); // dropped
        assert_eq!(expr.terms().len(), 2);
        assert_eq!(expr.evaluate(&[1.0, 9.0, 2.0]), 11.0);
    }

    #[test]
    fn test_constraint_satisfaction() {
        let mut expr = LinearExpr::new();
        expr.add_term(VarId(0), 1.0);
        expr.add_term(VarId(1), 1.0);
        let le = Constraint::new(ConstraintType::LessThanOrEqual, expr.clone(), 1.0);
        assert!(le.is_satisfied(&[1.0, 0.0]));
        assert!(!le.is_satisfied(&[1.0, 1.0]));

        let eq = Constraint::new(ConstraintType::Equal, expr, 1.0);
        assert!(eq.is_satisfied(&[0.0, 1.0]));
        assert!(!eq.is_satisfied(&[0.0, 0.0]));
    }

    #[test]
    fn test_model_constraint_slab() {
        let mut model = DecisionModel::new(1, 1, LinearExpr::new(), LinearExpr::new());
        let mut expr = LinearExpr::new();
        expr.add_term(model.open_var(0), 1.0);
        let h = model.add_constraint(Constraint::new(
            ConstraintType::LessThanOrEqual,
            expr,
            4.0,
        ));
        assert_eq!(model.num_constraints(), 1);

        model.set_upper_bound(h, 2.0);
        assert_eq!(model.constraints().next().unwrap().bound, 2.0);

        model.remove_constraint(h);
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn test_variable_indexing() {
        let model = DecisionModel::new(3, 2, LinearExpr::new(), LinearExpr::new());
        assert_eq!(model.num_variables(), 2 + 3 * 2);
        assert_eq!(model.open_var(1), VarId(1));
        assert_eq!(model.assign_var(0, 0), VarId(2));
        assert_eq!(model.assign_var(2, 1), VarId(7));
    }

    #[test]
    fn test_objective_switching() {
        let mut cost = LinearExpr::new();
        cost.add_term(VarId(0), 5.0);
        let mut model = DecisionModel::new(1, 1, cost, LinearExpr::new());
        assert!(model.active_objective().is_none());

        model.set_objective(ObjectiveId::Cost);
        assert_eq!(model.active_objective(), Some(ObjectiveId::Cost));
        assert_eq!(model.active_objective_expr().unwrap().terms().len(), 1);

        model.clear_objective();
        assert!(model.active_objective_expr().is_none());
    }
}
