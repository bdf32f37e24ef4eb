//! Module-sheet importer.
//!
//! Maps the domain column names of the module workbook onto
//! [`ModuleRecord`]s and feeds them through the merge builder. Malformed
//! numeric cells are tolerated: the value is treated as absent and a parse
//! warning is recorded.

use tracing::debug;

use facp_core::{Catalog, CatalogBuilder, Diagnostics, ModuleRecord, PricingTables};

use crate::sheet::{SheetData, SheetRecord};

const COL_MODEL: &str = "Module Model Number";
const COL_DESCRIPTION: &str = "Description";
const COL_PANELS: &str = "compatible with Panel";
const COL_PROTOCOLS: &str = "compatible with Protocol";
const COL_TOTAL_POINTS: &str = "Total Point Capacity Possible";
const COL_CIRCUIT_CAPACITY: &str = "Point Capacity / Circuit Capacity";
const COL_SUPERVISORY_CURRENT: &str = "Supervisory Current";
const COL_ALARM_CURRENT: &str = "Alarm Current";
const COL_SPEAKERS: &str = "Supports which Speakers";
const COL_CIRCUITS: &str = "Circuits/Points";
const COL_COMPULSORY: &str = "Possible Compulsory Main Modules";
const COL_ROLE: &str = "Is it Main module or sub-module mounted on main";
const COL_SIZE: &str = "Physical Size";
const COL_MOUNT: &str = "Mounted ON";
const COL_DEPENDENCIES: &str = "Another Module needed to function";
const COL_CATEGORIES: &str = "Specification Descriptions";
const COL_KEYWORDS: &str = "Keywords associated with the module";

/// Split a CSV-valued cell into trimmed, non-empty entries.
fn csv_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lenient numeric parse keeping digits, dot, and minus.
///
/// Returns `None` for empty cells; a non-empty cell that still fails to
/// parse is reported through `diag` and treated as absent.
fn lenient_float(value: &str, column: &str, model: &str, diag: &mut Diagnostics) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            diag.warn_model(
                "parse",
                format!("{column} value {value:?} is not numeric"),
                model,
            );
            None
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn record_from_row(row: &SheetRecord, model: &str, diag: &mut Diagnostics) -> ModuleRecord {
    ModuleRecord {
        model_number: model.to_string(),
        description: row.get(COL_DESCRIPTION).trim().to_string(),
        compatible_panels: csv_list(row.get(COL_PANELS)),
        compatible_protocols: csv_list(row.get(COL_PROTOCOLS)),
        total_point_capacity: non_empty(row.get(COL_TOTAL_POINTS)),
        circuit_capacity: non_empty(row.get(COL_CIRCUIT_CAPACITY)),
        supervisory_current: lenient_float(
            row.get(COL_SUPERVISORY_CURRENT),
            COL_SUPERVISORY_CURRENT,
            model,
            diag,
        ),
        alarm_current: lenient_float(row.get(COL_ALARM_CURRENT), COL_ALARM_CURRENT, model, diag),
        supported_speakers: non_empty(row.get(COL_SPEAKERS)),
        circuits: non_empty(row.get(COL_CIRCUITS)),
        compulsory_main_modules: csv_list(row.get(COL_COMPULSORY)),
        module_role: row.get(COL_ROLE).trim().to_string(),
        physical_size: row.get(COL_SIZE).trim().to_string(),
        mounted_on: row.get(COL_MOUNT).trim().to_string(),
        dependencies: csv_list(row.get(COL_DEPENDENCIES)),
        specification_categories: csv_list(row.get(COL_CATEGORIES)),
        keywords: csv_list(row.get(COL_KEYWORDS)),
    }
}

/// Load the module catalog from a sheet.
///
/// Rows without a model number are skipped. Duplicate model numbers merge
/// per the builder's union policy; synthetic enclosures are injected at
/// freeze.
pub fn load_catalog(sheet: &SheetData, pricing: PricingTables) -> (Catalog, Diagnostics) {
    let mut diag = Diagnostics::new();
    let mut builder = CatalogBuilder::new(pricing);
    let mut skipped = 0usize;

    for row in sheet.records() {
        let model = row.get(COL_MODEL).trim().to_string();
        if model.is_empty() {
            skipped += 1;
            continue;
        }
        let record = record_from_row(&row, &model, &mut diag);
        builder.add_record(record);
    }

    if skipped > 0 {
        diag.warn(
            "structure",
            format!("{skipped} rows had no model number and were skipped"),
        );
    }

    let catalog = builder.freeze();
    debug!(
        modules = catalog.len(),
        issues = diag.len(),
        sheet = %sheet.name,
        "catalog loaded"
    );
    (catalog, diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facp_core::MountKind;

    fn sheet(rows: &[&[&str]]) -> SheetData {
        SheetData::new(
            "modules",
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    const HEADER: &[&str] = &[
        COL_MODEL,
        COL_DESCRIPTION,
        COL_PANELS,
        COL_PROTOCOLS,
        COL_SUPERVISORY_CURRENT,
        COL_ALARM_CURRENT,
        COL_ROLE,
        COL_SIZE,
        COL_MOUNT,
        COL_CATEGORIES,
        COL_KEYWORDS,
    ];

    #[test]
    fn loads_and_indexes_modules() {
        let sheet = sheet(&[
            HEADER,
            &[
                "4100-3109",
                "Dual loop IDNet card",
                "4100ES",
                "IDNet2, MX",
                "0.110 A",
                "0.140 A",
                "Sub",
                "1 block",
                "internal",
                "IDNet Modules",
                "loop, idnet",
            ],
        ]);
        let (catalog, diag) = load_catalog(&sheet, PricingTables::with_defaults());
        assert!(!diag.has_errors());

        let module = catalog.get_module("4100-3109").unwrap();
        assert_eq!(module.compatible_protocols, vec!["IDNet2", "MX"]);
        assert_eq!(module.supervisory_current, Some(0.110));
        assert_eq!(module.mount, MountKind::Internal);
        assert_eq!(module.internal_space, 1.0);
        assert_eq!(catalog.category_modules("IDNet Modules").len(), 1);
    }

    #[test]
    fn rows_without_model_number_are_skipped_with_warning() {
        let sheet = sheet(&[HEADER, &["", "orphan row"], &["4100-9701", "Controller"]]);
        let (catalog, diag) = load_catalog(&sheet, PricingTables::with_defaults());
        assert!(catalog.get_module("4100-9701").is_some());
        assert!(diag.warnings().any(|i| i.message.contains("no model number")));
    }

    #[test]
    fn malformed_numeric_is_tolerated_with_warning() {
        let sheet = sheet(&[
            HEADER,
            &[
                "4100-9701",
                "Controller",
                "",
                "",
                "n/a",
                "",
                "Main",
                "",
                "",
                "Master Controller",
                "",
            ],
        ]);
        let (catalog, diag) = load_catalog(&sheet, PricingTables::with_defaults());
        let module = catalog.get_module("4100-9701").unwrap();
        assert_eq!(module.supervisory_current, None);
        assert!(diag.warnings().any(|i| i.message.contains("not numeric")));
    }

    #[test]
    fn category_price_attached_at_load() {
        let sheet = sheet(&[
            HEADER,
            &[
                "4100-9701",
                "Controller",
                "",
                "",
                "",
                "",
                "Main",
                "",
                "",
                "Master Controller",
                "",
            ],
        ]);
        let (catalog, _) = load_catalog(&sheet, PricingTables::with_defaults());
        assert_eq!(catalog.get_module("4100-9701").unwrap().price, 4500.0);
    }
}
