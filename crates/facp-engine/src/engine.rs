//! The configurator engine.
//!
//! Glue over the pipeline: requirements → category demand → coverage
//! optimization → specific-module plan merge → enclosure planning → cost.
//! The engine owns the frozen catalog and the placement-rule corpus;
//! construction fails when the corpus is missing critical guidance, so a
//! served engine is always backed by complete input.

use tracing::{debug, info};

use facp_core::{
    Catalog, ConfigResult, DeviceBoq, OptimizationResult, PanelConfiguration, PlacementRuleIndex,
    ProjectAnswers, REQUIRED_GUIDANCE_KEYWORDS,
};

use crate::enclosure::{apply_enclosures, summarise_space};
use crate::optimizer::{solve_coverage, SolverConfig};
use crate::plan::{derive_specific_plan, merge_with_plan};
use crate::project::{plan_project, remote_annunciator_answers};
use crate::requirements::{build_requirements, derive_category_demand};

/// One optimised panel of a project.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PanelOutcome {
    pub configuration: PanelConfiguration,
    pub result: OptimizationResult,
}

/// High-level orchestrator for panel optimization.
///
/// Single-threaded and cooperative-batch: [`Engine::optimise_panel`] is a
/// pure function modulo the immutable catalog, so repeated invocations
/// share no mutable state.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    rules: PlacementRuleIndex,
    config: SolverConfig,
}

impl Engine {
    /// Construct the engine, verifying the placement corpus first.
    pub fn new(catalog: Catalog, rules: PlacementRuleIndex) -> ConfigResult<Self> {
        rules.ensure_keywords(REQUIRED_GUIDANCE_KEYWORDS)?;
        info!(
            modules = catalog.len(),
            rules = rules.len(),
            "engine constructed"
        );
        Ok(Self {
            catalog,
            rules,
            config: SolverConfig::default(),
        })
    }

    /// Replace the solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &PlacementRuleIndex {
        &self.rules
    }

    /// Optimise a single panel.
    ///
    /// Never returns an empty selection for well-formed input: even when
    /// coverage comes back infeasible, the specific-module plan is total
    /// and the `+PLAN` suffix records the overlay.
    pub fn optimise_panel(&self, answers: &ProjectAnswers, boq: &DeviceBoq) -> OptimizationResult {
        let requirements = build_requirements(answers, boq);
        let demand = derive_category_demand(&requirements);
        let coverage = solve_coverage(&self.catalog, &demand, &self.config);
        debug!(
            status = %coverage.status,
            categories = demand.len(),
            "coverage solved"
        );

        let plan = derive_specific_plan(&requirements);
        let mut selection = merge_with_plan(&coverage.selection, &plan);
        apply_enclosures(&mut selection, &self.catalog);

        let estimated_cost = selection
            .iter()
            .map(|(model, &quantity)| self.catalog.estimate_cost(model, quantity))
            .sum();
        let (space_usage, bay_allocation) = summarise_space(&selection, &self.catalog);

        OptimizationResult {
            category_demand: demand,
            module_selection: selection,
            estimated_cost,
            solver_status: format!("{}+PLAN", coverage.status),
            space_usage,
            bay_allocation,
        }
    }

    /// Fan the project out into per-panel configurations.
    pub fn plan_project(
        &self,
        answers: &ProjectAnswers,
        boq: &DeviceBoq,
    ) -> Vec<PanelConfiguration> {
        plan_project(answers, boq)
    }

    /// Optimise every panel of the project, sequentially.
    ///
    /// Panels are independent; remote annunciators are optimised under
    /// their synthesized questionnaire view.
    pub fn optimise_project(
        &self,
        answers: &ProjectAnswers,
        boq: &DeviceBoq,
    ) -> Vec<PanelOutcome> {
        let remote_answers = remote_annunciator_answers(answers);
        self.plan_project(answers, boq)
            .into_iter()
            .map(|configuration| {
                let panel_answers = if configuration.is_remote_annunciator {
                    &remote_answers
                } else {
                    answers
                };
                let result = self.optimise_panel(panel_answers, &configuration.boq);
                debug!(
                    panel = %configuration.panel_id,
                    cost = result.estimated_cost,
                    status = %result.solver_status,
                    "panel optimised"
                );
                PanelOutcome {
                    configuration,
                    result,
                }
            })
            .collect()
    }
}
