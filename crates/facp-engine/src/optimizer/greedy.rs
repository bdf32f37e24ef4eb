//! Deterministic greedy coverage selector.
//!
//! For each demanded category, picks the member minimizing
//! `(price if known else +inf, block count, model number)` and assigns it
//! the full demanded quantity. A strict upper bound on the optimizer cost.

use std::cmp::Ordering;

use facp_core::{Catalog, CatalogModule, CategoryDemand, ModuleSelection, SolverStatus};

use super::CoverageSolution;

fn price_key(module: &CatalogModule) -> f64 {
    if module.price > 0.0 {
        module.price
    } else {
        f64::INFINITY
    }
}

pub(crate) fn cheapest<'a>(members: &[&'a CatalogModule]) -> Option<&'a CatalogModule> {
    members
        .iter()
        .min_by(|a, b| {
            price_key(a)
                .partial_cmp(&price_key(b))
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    a.block_count()
                        .partial_cmp(&b.block_count())
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.model_number.cmp(&b.model_number))
        })
        .copied()
}

/// Greedy per-category selection.
///
/// A module that is cheapest in several categories is assigned the largest
/// of their demands; one stock of it covers each category simultaneously.
pub fn solve_greedy(catalog: &Catalog, demand: &CategoryDemand) -> CoverageSolution {
    let mut selection = ModuleSelection::new();
    let mut estimated_cost = 0.0;

    for (category, &quantity) in demand {
        let members = catalog.category_modules(category);
        let Some(chosen) = cheapest(&members) else {
            continue;
        };
        let entry = selection.entry(chosen.model_number.clone()).or_insert(0);
        if quantity > *entry {
            let added = quantity - *entry;
            let unit_cost = if chosen.price > 0.0 {
                chosen.price
            } else {
                catalog.category_price(category).unwrap_or(1.0)
            };
            estimated_cost += unit_cost * added as f64;
            *entry = quantity;
        }
    }

    CoverageSolution {
        selection,
        estimated_cost,
        status: SolverStatus::Greedy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facp_core::{CatalogBuilder, ModuleRecord, PricingTables};
    use std::collections::HashMap;

    fn catalog_with(records: Vec<ModuleRecord>, prices: HashMap<String, f64>) -> Catalog {
        let mut builder = CatalogBuilder::new(PricingTables {
            module_prices: prices,
            category_prices: HashMap::new(),
        });
        for record in records {
            builder.add_record(record);
        }
        builder.freeze()
    }

    fn record(model: &str, category: &str) -> ModuleRecord {
        ModuleRecord {
            model_number: model.to_string(),
            specification_categories: vec![category.to_string()],
            ..ModuleRecord::default()
        }
    }

    #[test]
    fn picks_cheapest_member() {
        let catalog = catalog_with(
            vec![record("4100-0002", "Power Supplies"), record("4100-0001", "Power Supplies")],
            HashMap::from([
                ("4100-0001".to_string(), 1500.0),
                ("4100-0002".to_string(), 1100.0),
            ]),
        );
        let demand = CategoryDemand::from([("Power Supplies".to_string(), 2)]);

        let solution = solve_greedy(&catalog, &demand);
        assert_eq!(solution.selection["4100-0002"], 2);
        assert_eq!(solution.estimated_cost, 2200.0);
        assert_eq!(solution.status, SolverStatus::Greedy);
    }

    #[test]
    fn unknown_price_loses_to_known_price() {
        let catalog = catalog_with(
            vec![record("4100-0001", "Relay Modules"), record("4100-0002", "Relay Modules")],
            HashMap::from([("4100-0002".to_string(), 9999.0)]),
        );
        let demand = CategoryDemand::from([("Relay Modules".to_string(), 1)]);

        let solution = solve_greedy(&catalog, &demand);
        assert!(solution.selection.contains_key("4100-0002"));
    }

    #[test]
    fn ties_break_by_model_number() {
        let catalog = catalog_with(
            vec![record("4100-0009", "Relay Modules"), record("4100-0001", "Relay Modules")],
            HashMap::new(),
        );
        let demand = CategoryDemand::from([("Relay Modules".to_string(), 1)]);

        let solution = solve_greedy(&catalog, &demand);
        assert!(solution.selection.contains_key("4100-0001"));
    }

    #[test]
    fn shared_cheapest_module_takes_largest_demand() {
        let mut record_both = record("4100-0001", "Power Supplies");
        record_both
            .specification_categories
            .push("EPS & Accessories".to_string());
        let catalog = catalog_with(
            vec![record_both],
            HashMap::from([("4100-0001".to_string(), 100.0)]),
        );
        let demand = CategoryDemand::from([
            ("Power Supplies".to_string(), 3),
            ("EPS & Accessories".to_string(), 2),
        ]);

        let solution = solve_greedy(&catalog, &demand);
        assert_eq!(solution.selection["4100-0001"], 3);
        assert_eq!(solution.estimated_cost, 300.0);
    }

    #[test]
    fn unknown_category_is_skipped() {
        let catalog = catalog_with(vec![], HashMap::new());
        let demand = CategoryDemand::from([("No Such Category".to_string(), 4)]);

        let solution = solve_greedy(&catalog, &demand);
        assert!(solution.selection.is_empty());
        assert_eq!(solution.estimated_cost, 0.0);
    }

    #[test]
    fn deterministic_across_runs() {
        let catalog = catalog_with(
            vec![record("4100-0002", "Relay Modules"), record("4100-0001", "Relay Modules")],
            HashMap::new(),
        );
        let demand = CategoryDemand::from([("Relay Modules".to_string(), 2)]);

        let first = solve_greedy(&catalog, &demand);
        let second = solve_greedy(&catalog, &demand);
        assert_eq!(first.selection, second.selection);
        assert_eq!(first.estimated_cost, second.estimated_cost);
    }
}
