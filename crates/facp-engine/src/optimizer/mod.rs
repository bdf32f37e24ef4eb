//! Category-coverage optimization.
//!
//! Selects catalog modules satisfying per-category minimum quantities at
//! minimum price. The primary path formulates the covering problem with
//! good_lp and the clarabel backend (feature `solver-clarabel`, on by
//! default); integer quantities come from rounding the relaxation and
//! repairing any coverage the rounding broke. The greedy selector is not a
//! convenience approximation but a hard contract: it is always compiled,
//! deterministic, and takes over whenever the solver path is absent or
//! fails, so the engine has no runtime dependency cliff.

mod greedy;
#[cfg(feature = "solver-clarabel")]
mod lp;

use thiserror::Error;

use facp_core::{Catalog, CategoryDemand, ModuleSelection, SolverStatus};

pub use greedy::solve_greedy;
#[cfg(feature = "solver-clarabel")]
pub use lp::solve_lp;

/// LP-backend failures.
///
/// Recoverable by construction: [`solve_coverage`] answers every one of
/// these with the greedy selector, so they never escape the engine. An
/// over-constrained demand is not among them — that is a normal
/// [`SolverStatus::Infeasible`] outcome, not a backend fault.
#[derive(Debug, Error)]
pub enum CoverageError {
    /// The backend rejected the model or died mid-solve
    #[error("coverage LP failed: {0}")]
    Backend(String),
}

/// Per-module purchase ceiling; a safety bound, not a real constraint.
pub const MAX_UNITS_PER_MODULE: u32 = 20;

/// Solver configuration.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum solve time in seconds. Advisory: passed to backends that
    /// accept a budget, ignored by the rest.
    pub max_time_seconds: f64,
    /// Whether to enable verbose solver output
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_time_seconds: 10.0,
            verbose: false,
        }
    }
}

/// Category-coverage solution prior to the plan merge.
#[derive(Debug, Clone)]
pub struct CoverageSolution {
    pub selection: ModuleSelection,
    pub estimated_cost: f64,
    pub status: SolverStatus,
}

/// Solve the coverage problem, falling back to the greedy selector when no
/// LP backend is compiled in or the backend errors out.
pub fn solve_coverage(
    catalog: &Catalog,
    demand: &CategoryDemand,
    config: &SolverConfig,
) -> CoverageSolution {
    #[cfg(feature = "solver-clarabel")]
    {
        match lp::solve_lp(catalog, demand, config) {
            Ok(solution) => return solution,
            Err(err) => {
                tracing::warn!(error = %err, "LP backend unavailable, using greedy selection");
            }
        }
    }
    let _ = config;
    greedy::solve_greedy(catalog, demand)
}

/// Objective weight for one module: scale price (or footprint when price is
/// unknown) to integer coefficients. Prefers known-priced modules and
/// breaks ties by space.
pub(crate) fn objective_weight(price: f64, block_count: f64) -> f64 {
    let unit_cost = if price > 0.0 {
        price
    } else if block_count > 0.0 {
        block_count
    } else {
        1.0
    };
    (unit_cost * 100.0).round().max(1.0)
}
