//! LP-relaxation coverage backend.
//!
//! Formulates the covering problem with one bounded non-negative variable
//! per catalog module and a `>=` constraint per demanded category, solved
//! with clarabel through good_lp. Integer quantities come from rounding the
//! relaxed solution; any coverage broken by rounding down is repaired by
//! bumping the cheapest member of the short category.

use good_lp::solvers::clarabel::clarabel;
use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel};
use std::collections::HashMap;

use facp_core::{Catalog, CategoryDemand, ModuleSelection, SolverStatus};

use super::greedy::cheapest;
use super::{objective_weight, CoverageError, CoverageSolution, SolverConfig, MAX_UNITS_PER_MODULE};

/// Solve the relaxed covering LP and extract an integer selection.
///
/// `Err` means the backend itself failed (caller falls back to greedy); an
/// over-constrained demand is not an error and comes back as
/// [`SolverStatus::Infeasible`] with an empty selection.
pub fn solve_lp(
    catalog: &Catalog,
    demand: &CategoryDemand,
    _config: &SolverConfig,
) -> Result<CoverageSolution, CoverageError> {
    let mut vars = variables!();
    let mut module_vars = Vec::with_capacity(catalog.len());
    let mut objective = Expression::from(0.0);

    for module in catalog.modules() {
        let var = vars.add(variable().min(0.0).max(MAX_UNITS_PER_MODULE as f64));
        objective += objective_weight(module.price, module.block_count()) * var;
        module_vars.push(var);
    }

    let index_of: HashMap<&str, usize> = catalog
        .modules()
        .iter()
        .enumerate()
        .map(|(idx, module)| (module.model_number.as_str(), idx))
        .collect();

    let mut model = vars.minimise(objective).using(clarabel);

    for (category, &quantity) in demand {
        let members = catalog.category_modules(category);
        if members.is_empty() {
            // Unknown categories in the demand table are harmless.
            continue;
        }
        let mut coverage = Expression::from(0.0);
        for member in &members {
            coverage += module_vars[index_of[member.model_number.as_str()]];
        }
        model = model.with(constraint!(coverage >= quantity as f64));
    }

    let solution = match model.solve() {
        Ok(solution) => solution,
        Err(ResolutionError::Infeasible) => {
            return Ok(CoverageSolution {
                selection: ModuleSelection::new(),
                estimated_cost: 0.0,
                status: SolverStatus::Infeasible,
            });
        }
        Err(err) => return Err(CoverageError::Backend(err.to_string())),
    };

    let mut quantities: Vec<u32> = module_vars
        .iter()
        .map(|var| {
            let value = solution.value(*var).max(0.0);
            (value.round() as u32).min(MAX_UNITS_PER_MODULE)
        })
        .collect();

    // Rounding can land below a `>=` bound; top the short categories up.
    for (category, &needed) in demand {
        let members = catalog.category_modules(category);
        if members.is_empty() {
            continue;
        }
        let mut covered: u32 = members
            .iter()
            .map(|member| quantities[index_of[member.model_number.as_str()]])
            .sum();
        while covered < needed {
            let open: Vec<_> = members
                .iter()
                .copied()
                .filter(|member| {
                    quantities[index_of[member.model_number.as_str()]] < MAX_UNITS_PER_MODULE
                })
                .collect();
            let Some(bump) = cheapest(&open) else {
                break;
            };
            quantities[index_of[bump.model_number.as_str()]] += 1;
            covered += 1;
        }
    }

    let mut selection = ModuleSelection::new();
    let mut estimated_cost = 0.0;
    for (module, &quantity) in catalog.modules().iter().zip(&quantities) {
        if quantity > 0 {
            selection.insert(module.model_number.clone(), quantity);
            estimated_cost += module.price * quantity as f64;
        }
    }

    Ok(CoverageSolution {
        selection,
        estimated_cost,
        status: SolverStatus::Optimal,
    })
}
