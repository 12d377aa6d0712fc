use crate::domain::{
    solver_service::{Result, SolverService},
    value_objects::SolverBackend,
};
use std::sync::Arc;

#[cfg(not(all(feature = "highs", feature = "coin-cbc")))]
use crate::domain::solver_service::SolverError;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend. Fails with
    /// `BackendUnavailable` when the backend's feature is compiled out.
    pub fn create(backend: SolverBackend) -> Result<Arc<dyn SolverService>> {
        match backend {
            SolverBackend::Highs => Self::highs(),
            SolverBackend::CoinCbc => Self::coin_cbc(),
            SolverBackend::Auto => Self::highs().or_else(|_| Self::coin_cbc()),
        }
    }

    /// Get the default solver (HiGHS when available)
    pub fn default_solver() -> Result<Arc<dyn SolverService>> {
        Self::create(SolverBackend::Auto)
    }

    #[cfg(feature = "highs")]
    fn highs() -> Result<Arc<dyn SolverService>> {
        Ok(Arc::new(crate::solver::HighsSolver::new()))
    }

    #[cfg(not(feature = "highs"))]
    fn highs() -> Result<Arc<dyn SolverService>> {
        Err(SolverError::BackendUnavailable(
            "HiGHS support was not compiled in (enable the `highs` feature)".to_string(),
        ))
    }

    #[cfg(feature = "coin-cbc")]
    fn coin_cbc() -> Result<Arc<dyn SolverService>> {
        Ok(Arc::new(crate::solver::CoinCbcSolver::new()))
    }

    #[cfg(not(feature = "coin-cbc"))]
    fn coin_cbc() -> Result<Arc<dyn SolverService>> {
        Err(SolverError::BackendUnavailable(
            "COIN-OR CBC support was not compiled in (enable the `coin-cbc` feature)".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "highs")]
    #[test]
    fn test_auto_prefers_highs() {
        let solver = SolverFactory::create(SolverBackend::Auto).unwrap();
        assert_eq!(solver.name(), "HiGHS");
        assert!(solver.supports_mip());
    }

    #[cfg(not(feature = "coin-cbc"))]
    #[test]
    fn test_missing_backend_is_reported() {
        assert!(SolverFactory::create(SolverBackend::CoinCbc).is_err());
    }
}
