//! # facp-core: Panel Configurator Domain Core
//!
//! Fundamental data structures for the fire-alarm control panel
//! configurator: the module catalog, placement-rule corpus, project input
//! records, derived requirements, and optimization result types.
//!
//! ## Design Philosophy
//!
//! The catalog is **loaded once, then immutable**: duplicate sheet rows are
//! folded through [`CatalogBuilder`] (a semantic union keyed by model
//! number), synthetic enclosure SKUs are injected, and the result freezes
//! into a [`Catalog`] with model and category indices. Everything
//! downstream — demand derivation, optimization, enclosure packing — reads
//! from the frozen form, so repeated panel optimizations share state
//! without synchronization.
//!
//! Questionnaire answers are an explicit, totally enumerated record
//! ([`ProjectAnswers`]): unknown flags default at parse time, not at use.
//!
//! ## Modules
//!
//! - [`catalog`] - Module catalog, merge/freeze builder, pricing cascade
//! - [`placement`] - Placement-rule corpus and the keyword gate
//! - [`space`] - Footprint derivation from free-text size hints
//! - [`project`] - Input records, requirements, and result types
//! - [`diagnostics`] - Non-fatal import issue collection
//! - [`error`] - Unified [`ConfigError`] boundary type

pub mod catalog;
pub mod diagnostics;
pub mod error;
pub mod placement;
pub mod project;
pub mod space;

pub use catalog::{
    enclosure_sizes, Catalog, CatalogBuilder, CatalogModule, EnclosureDefinition, EnclosureFamily,
    ModuleRecord, MountKind, PricingTables, DEFAULT_CATEGORY_PRICES, ENCLOSURE_DEFINITIONS,
};
pub use diagnostics::{Diagnostics, ImportIssue, Severity};
pub use error::{ConfigError, ConfigResult};
pub use placement::{PlacementRule, PlacementRuleIndex, REQUIRED_GUIDANCE_KEYWORDS};
pub use project::{
    AudioType, BayAllocation, CategoryDemand, DeviceBoq, DoorHolderVoltage, GraphicsSoftware,
    ModuleSelection, NetworkType, OptimizationResult, PanelConfiguration, PanelRequirements,
    PanelSeries, ProjectAnswers, Protocol, SolverStatus, SpaceUsage,
};
pub use space::{derive_space, DOOR_SLOTS_PER_BAY, INTERNAL_BLOCKS_PER_BAY};
