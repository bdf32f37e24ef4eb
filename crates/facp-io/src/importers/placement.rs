//! Placement-rule sheet importer.
//!
//! The guidance workbook is a left-indented hierarchy: the column of the
//! first non-empty cell in a row is that row's depth, and the cell text is
//! the rule at that depth. Ancestor labels are the most recent non-empty
//! cells of the columns to its left; entering a shallower column resets
//! everything deeper.

use facp_core::{PlacementRule, PlacementRuleIndex};

use crate::sheet::SheetData;

/// Walk the hierarchical sheet and emit the flat rule list.
pub fn load_placement_rules(sheet: &SheetData) -> PlacementRuleIndex {
    let width = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut hierarchy: Vec<String> = vec![String::new(); width];
    let mut rules = Vec::new();

    for row in &sheet.rows {
        for (idx, cell) in row.iter().enumerate() {
            let value = cell.trim();
            if value.is_empty() {
                continue;
            }
            hierarchy[idx] = value.to_string();
            for deeper in hierarchy.iter_mut().skip(idx + 1) {
                deeper.clear();
            }
            let path: Vec<String> = hierarchy[..idx]
                .iter()
                .filter(|label| !label.is_empty())
                .cloned()
                .collect();
            if !path.is_empty() {
                rules.push(PlacementRule {
                    path,
                    text: value.to_string(),
                });
            }
            break;
        }
    }

    PlacementRuleIndex::new(rules)
}
