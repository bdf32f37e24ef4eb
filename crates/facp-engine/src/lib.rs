//! # facp-engine: Requirements Derivation and Module Optimization
//!
//! The computational core of the panel configurator:
//!
//! - [`requirements`] - reduce `(answers, BOQ)` to [`facp_core::PanelRequirements`]
//!   and per-category minimum quantities
//! - [`optimizer`] - category-coverage minimization (LP relaxation via
//!   good_lp/clarabel behind the `solver-clarabel` feature, deterministic
//!   greedy fallback always compiled)
//! - [`plan`] - the deterministic specific-module plan and its max-merge
//! - [`enclosure`] - footprint summary, bay math, and largest-first
//!   cabinet/door packing
//! - [`project`] - multi-panel BOQ partitioning and remote-annunciator
//!   synthesis
//! - [`engine`] - the [`Engine`] orchestrator gluing the pipeline together
//!
//! The solver backend is an injected capability, not a dependency: with the
//! feature off (or the backend erroring at runtime) every path degrades to
//! the greedy selector and the engine keeps serving.

pub mod enclosure;
pub mod engine;
pub mod optimizer;
pub mod plan;
pub mod project;
pub mod requirements;

pub use enclosure::{apply_enclosures, derive_enclosure_modules, summarise_space};
pub use engine::{Engine, PanelOutcome};
pub use optimizer::{
    solve_coverage, CoverageError, CoverageSolution, SolverConfig, MAX_UNITS_PER_MODULE,
};
pub use plan::{alias_model, derive_specific_plan, merge_with_plan, ModuleAlias, MODULE_ALIASES};
pub use project::{
    export_project_json, plan_project, remote_annunciator_count, split_boq, PartitionStrategy,
};
pub use requirements::{build_requirements, derive_category_demand};
