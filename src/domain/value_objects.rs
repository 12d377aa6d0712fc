// Domain value objects for the bi-objective facility location problem

use std::fmt;
use std::str::FromStr;

/// Type of constraint comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

/// Status of a single solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Found a globally optimal solution
    Optimal,
    /// No solution satisfies all constraints
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Backend failure; no usable solution
    Error,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::Error => write!(f, "Error"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverBackend {
    /// Automatically select an available backend
    Auto,
    /// HiGHS solver
    Highs,
    /// COIN-OR CBC solver
    CoinCbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(SolverBackend::Auto),
            "highs" => Ok(SolverBackend::Highs),
            "cbc" => Ok(SolverBackend::CoinCbc),
            other => Err(format!("unknown backend '{}' (use auto|highs|cbc)", other)),
        }
    }
}

/// The two competing linear objectives of the problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveId {
    /// f1: total facility opening cost
    Cost,
    /// f2: total customer-assignment distance
    Distance,
}

impl fmt::Display for ObjectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveId::Cost => write!(f, "min cost"),
            ObjectiveId::Distance => write!(f, "min dist"),
        }
    }
}

/// Epsilon-constraint enumeration strategy.
///
/// Callers pick one explicitly; the two have different cost/correctness
/// trade-offs and neither is a silent default of the library API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParetoStrategy {
    /// Two solves per point: minimize cost, then minimize distance among the
    /// cost-optimal solutions. Never records a weakly dominated point.
    Lexicographic,
    /// One solve per point: record whatever distance the cost-optimal
    /// solution happens to have. Cheaper, but the recorded point may be
    /// weakly dominated when the cost-optimal solution is not unique.
    Direct,
}

impl FromStr for ParetoStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lex" | "lexicographic" => Ok(ParetoStrategy::Lexicographic),
            "direct" => Ok(ParetoStrategy::Direct),
            other => Err(format!("unknown strategy '{}' (use lex|direct)", other)),
        }
    }
}

impl fmt::Display for ParetoStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParetoStrategy::Lexicographic => write!(f, "lexicographic"),
            ParetoStrategy::Direct => write!(f, "direct"),
        }
    }
}

/// One discovered trade-off point: (total opening cost, total distance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParetoPoint {
    pub cost: i64,
    pub dist: i64,
}

impl ParetoPoint {
    pub fn new(cost: i64, dist: i64) -> Self {
        Self { cost, dist }
    }

    /// Weak dominance: at least as good in both objectives, strictly better
    /// in one (both objectives minimized).
    pub fn dominates(&self, other: &ParetoPoint) -> bool {
        self.cost <= other.cost
            && self.dist <= other.dist
            && (self.cost < other.cost || self.dist < other.dist)
    }
}

impl fmt::Display for ParetoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.cost, self.dist)
    }
}

/// Trade-off points in discovery order: decreasing distance,
/// non-decreasing cost.
#[derive(Debug, Clone, Default)]
pub struct ParetoFrontier {
    points: Vec<ParetoPoint>,
}

impl ParetoFrontier {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn push(&mut self, point: ParetoPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[ParetoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when no point weakly dominates another.
    pub fn is_non_dominated(&self) -> bool {
        for (i, a) in self.points.iter().enumerate() {
            for b in &self.points[i + 1..] {
                if a.dominates(b) || b.dominates(a) {
                    return false;
                }
            }
        }
        true
    }
}

impl<'a> IntoIterator for &'a ParetoFrontier {
    type Item = &'a ParetoPoint;
    type IntoIter = std::slice::Iter<'a, ParetoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
