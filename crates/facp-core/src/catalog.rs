//! Catalog of panel modules and enclosure hardware.
//!
//! The catalog is loaded once from a tabular source, merged row by row
//! through [`CatalogBuilder`], augmented with the synthetic enclosure SKUs,
//! then frozen into an immutable [`Catalog`] with model and category
//! indices. All downstream selection and costing reads from the frozen
//! form.
//!
//! ## Merge policy
//!
//! The source sheet routinely lists the same model number more than once
//! (one row per compatible protocol, say). Duplicate rows are folded into a
//! single module: scalar fields keep the first non-empty occurrence, list
//! fields take a case-insensitive set union preserving first-seen casing,
//! and footprints take the elementwise maximum.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::space::derive_space;

/// Where a module physically mounts inside a bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountKind {
    /// Internal mounting rail (blocks A-H)
    Internal,
    /// Front door (slots 1-8)
    Door,
    /// Occupies both an internal block and a door slot
    Both,
    /// Not bay-mounted (or unknown)
    #[default]
    None,
}

impl MountKind {
    /// Forgiving parse; anything unrecognised is treated as not mounted.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "internal" => MountKind::Internal,
            "door" => MountKind::Door,
            "both" => MountKind::Both,
            _ => MountKind::None,
        }
    }
}

/// A single catalog entry, immutable once the catalog is frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogModule {
    /// Unique model number, e.g. "4100-3109"
    pub model_number: String,
    pub description: String,
    /// Panel families this module installs into
    pub compatible_panels: Vec<String>,
    /// Addressable protocols this module speaks
    pub compatible_protocols: Vec<String>,
    pub total_point_capacity: Option<String>,
    pub circuit_capacity: Option<String>,
    /// Supervisory current draw in amps
    pub supervisory_current: Option<f64>,
    /// Alarm current draw in amps
    pub alarm_current: Option<f64>,
    pub supported_speakers: Option<String>,
    pub circuits: Option<String>,
    /// Main modules that must be present for this module to be fitted
    pub compulsory_main_modules: Vec<String>,
    /// "Main" or "Sub" role text from the sheet
    pub module_role: String,
    /// Free-text size hint, e.g. "2 blocks"
    pub physical_size: String,
    pub mount: MountKind,
    /// Other modules needed for this one to function
    pub dependencies: Vec<String>,
    /// Specification categories used for coverage constraints
    pub specification_categories: Vec<String>,
    pub keywords: Vec<String>,
    /// Unit price; 0 means unknown
    pub price: f64,
    /// Internal-block footprint per unit
    pub internal_space: f64,
    /// Door-slot footprint per unit
    pub door_space: f64,
}

impl CatalogModule {
    /// Total footprint used for tie-breaking when price is unknown.
    ///
    /// Falls back to a numeric scrape of the size text when no footprint was
    /// derived.
    pub fn block_count(&self) -> f64 {
        if self.internal_space > 0.0 || self.door_space > 0.0 {
            return self.internal_space + self.door_space;
        }
        if self.physical_size.is_empty() {
            return 0.0;
        }
        let digits: String = self
            .physical_size
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        digits.parse().unwrap_or(0.0)
    }

    /// Case-insensitive keyword probe over description, categories, and keywords.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.description.to_lowercase().contains(&needle)
            || self
                .specification_categories
                .iter()
                .any(|c| c.to_lowercase().contains(&needle))
            || self.keywords.iter().any(|k| k.to_lowercase().contains(&needle))
    }
}

/// Enclosure family for the synthetic cabinet/door SKUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosureFamily {
    Cabinet,
    DoorSolid,
    DoorGlass,
}

/// One synthetic enclosure SKU definition.
#[derive(Debug, Clone)]
pub struct EnclosureDefinition {
    pub model_number: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub keywords: &'static [&'static str],
    pub price: f64,
    /// Bay count this enclosure provides
    pub size: u32,
    pub family: EnclosureFamily,
}

/// Cabinet backboxes and doors are not rows in the module sheet; they are
/// injected here so enclosure planning can price and select them like any
/// other SKU.
pub static ENCLOSURE_DEFINITIONS: Lazy<Vec<EnclosureDefinition>> = Lazy::new(|| {
    vec![
        EnclosureDefinition {
            model_number: "4100-9401",
            description: "4100ES 1-bay cabinet backbox",
            category: "Cabinet Assemblies",
            keywords: &["cabinet", "backbox", "1-bay"],
            price: 950.0,
            size: 1,
            family: EnclosureFamily::Cabinet,
        },
        EnclosureDefinition {
            model_number: "4100-9402",
            description: "4100ES 2-bay cabinet backbox",
            category: "Cabinet Assemblies",
            keywords: &["cabinet", "backbox", "2-bay"],
            price: 1200.0,
            size: 2,
            family: EnclosureFamily::Cabinet,
        },
        EnclosureDefinition {
            model_number: "4100-9403",
            description: "4100ES 3-bay cabinet backbox",
            category: "Cabinet Assemblies",
            keywords: &["cabinet", "backbox", "3-bay"],
            price: 1450.0,
            size: 3,
            family: EnclosureFamily::Cabinet,
        },
        EnclosureDefinition {
            model_number: "4100-9404",
            description: "4100ES 1-bay solid door",
            category: "Cabinet Doors",
            keywords: &["door", "solid", "1-bay"],
            price: 420.0,
            size: 1,
            family: EnclosureFamily::DoorSolid,
        },
        EnclosureDefinition {
            model_number: "4100-9405",
            description: "4100ES 2-bay solid door",
            category: "Cabinet Doors",
            keywords: &["door", "solid", "2-bay"],
            price: 520.0,
            size: 2,
            family: EnclosureFamily::DoorSolid,
        },
        EnclosureDefinition {
            model_number: "4100-9406",
            description: "4100ES 3-bay solid door",
            category: "Cabinet Doors",
            keywords: &["door", "solid", "3-bay"],
            price: 620.0,
            size: 3,
            family: EnclosureFamily::DoorSolid,
        },
        EnclosureDefinition {
            model_number: "4100-9407",
            description: "4100ES 1-bay glass door",
            category: "Cabinet Doors",
            keywords: &["door", "glass", "1-bay"],
            price: 560.0,
            size: 1,
            family: EnclosureFamily::DoorGlass,
        },
        EnclosureDefinition {
            model_number: "4100-9408",
            description: "4100ES 2-bay glass door",
            category: "Cabinet Doors",
            keywords: &["door", "glass", "2-bay"],
            price: 690.0,
            size: 2,
            family: EnclosureFamily::DoorGlass,
        },
        EnclosureDefinition {
            model_number: "4100-9409",
            description: "4100ES 3-bay glass door",
            category: "Cabinet Doors",
            keywords: &["door", "glass", "3-bay"],
            price: 820.0,
            size: 3,
            family: EnclosureFamily::DoorGlass,
        },
    ]
});

/// Size → model map for one enclosure family, largest sizes first wanted by
/// the packer, so a BTreeMap keyed by size is returned.
pub fn enclosure_sizes(family: EnclosureFamily) -> BTreeMap<u32, &'static str> {
    ENCLOSURE_DEFINITIONS
        .iter()
        .filter(|e| e.family == family)
        .map(|e| (e.size, e.model_number))
        .collect()
}

impl EnclosureDefinition {
    fn to_module(&self) -> CatalogModule {
        CatalogModule {
            model_number: self.model_number.to_string(),
            description: self.description.to_string(),
            compatible_panels: vec!["4100ES".to_string()],
            compatible_protocols: vec!["IDNet2".to_string(), "MX".to_string()],
            total_point_capacity: None,
            circuit_capacity: None,
            supervisory_current: None,
            alarm_current: None,
            supported_speakers: None,
            circuits: None,
            compulsory_main_modules: Vec::new(),
            module_role: "Cabinet".to_string(),
            physical_size: String::new(),
            mount: MountKind::None,
            dependencies: Vec::new(),
            specification_categories: vec![self.category.to_string()],
            keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
            price: self.price,
            internal_space: 0.0,
            door_space: 0.0,
        }
    }
}

/// Conservative category defaults used when no pricing override document is
/// supplied. These keep the objective biased toward minimal selections.
pub static DEFAULT_CATEGORY_PRICES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("Master Controller", 4500.0),
        ("Power Supplies", 1200.0),
        ("EPS & Accessories", 1600.0),
        ("IDNet Modules", 950.0),
        ("Notification Modules", 900.0),
        ("Audio Options (S4100-0104)", 1800.0),
        ("Telephone (S4100-0104)", 750.0),
        ("LED-Switch (4100-0032)", 650.0),
        ("Relay Modules", 500.0),
        ("VCC Interfaces (S4100-0104)", 900.0),
    ])
});

/// Unknown-SKU guardrail applied by [`Catalog::estimate_cost`] when no price
/// source resolves. Biases minimization toward known SKUs.
const FALLBACK_UNIT_COST: f64 = 1000.0;

/// Pricing tables resolved before catalog load.
#[derive(Debug, Clone, Default)]
pub struct PricingTables {
    /// Explicit per-model price overrides
    pub module_prices: HashMap<String, f64>,
    /// Per-category default prices
    pub category_prices: HashMap<String, f64>,
}

impl PricingTables {
    /// Tables with no overrides and the built-in category defaults.
    pub fn with_defaults() -> Self {
        Self {
            module_prices: HashMap::new(),
            category_prices: DEFAULT_CATEGORY_PRICES
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    fn resolve(&self, model_number: &str, categories: &[String]) -> f64 {
        if let Some(price) = self.module_prices.get(model_number) {
            return *price;
        }
        if let Some(first) = categories.first() {
            if let Some(price) = self.category_prices.get(first) {
                return *price;
            }
        }
        0.0
    }
}

/// Case-insensitive set union preserving first-seen casing and order.
fn merge_unique(values: &mut Vec<String>, additions: Vec<String>) {
    let mut seen: std::collections::HashSet<String> =
        values.iter().map(|v| v.to_lowercase()).collect();
    for value in additions {
        if value.is_empty() {
            continue;
        }
        let key = value.to_lowercase();
        if seen.insert(key) {
            values.push(value);
        }
    }
}

fn keep_first_nonempty(slot: &mut String, incoming: String) {
    if slot.is_empty() && !incoming.is_empty() {
        *slot = incoming;
    }
}

fn keep_first_some<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if slot.is_none() {
        *slot = incoming;
    }
}

/// One parsed row of the module sheet, before merging.
///
/// Built by the importer; footprint and price are attached by the builder.
#[derive(Debug, Clone, Default)]
pub struct ModuleRecord {
    pub model_number: String,
    pub description: String,
    pub compatible_panels: Vec<String>,
    pub compatible_protocols: Vec<String>,
    pub total_point_capacity: Option<String>,
    pub circuit_capacity: Option<String>,
    pub supervisory_current: Option<f64>,
    pub alarm_current: Option<f64>,
    pub supported_speakers: Option<String>,
    pub circuits: Option<String>,
    pub compulsory_main_modules: Vec<String>,
    pub module_role: String,
    pub physical_size: String,
    pub mounted_on: String,
    pub dependencies: Vec<String>,
    pub specification_categories: Vec<String>,
    pub keywords: Vec<String>,
}

/// Accumulator keyed by model number. Records are merged as they arrive;
/// [`CatalogBuilder::freeze`] injects the synthetic enclosures and builds
/// the indices.
#[derive(Debug)]
pub struct CatalogBuilder {
    pricing: PricingTables,
    order: Vec<String>,
    modules: HashMap<String, CatalogModule>,
}

impl CatalogBuilder {
    pub fn new(pricing: PricingTables) -> Self {
        Self {
            pricing,
            order: Vec::new(),
            modules: HashMap::new(),
        }
    }

    /// Merge one sheet row into the accumulator.
    pub fn add_record(&mut self, record: ModuleRecord) {
        let mount = MountKind::parse(&record.mounted_on);
        let (internal_space, door_space) =
            derive_space(&record.model_number, &record.physical_size, mount);
        let price = self
            .pricing
            .resolve(&record.model_number, &record.specification_categories);

        if let Some(module) = self.modules.get_mut(&record.model_number) {
            keep_first_nonempty(&mut module.description, record.description);
            merge_unique(&mut module.compatible_panels, record.compatible_panels);
            merge_unique(&mut module.compatible_protocols, record.compatible_protocols);
            keep_first_some(&mut module.total_point_capacity, record.total_point_capacity);
            keep_first_some(&mut module.circuit_capacity, record.circuit_capacity);
            keep_first_some(&mut module.supervisory_current, record.supervisory_current);
            keep_first_some(&mut module.alarm_current, record.alarm_current);
            keep_first_some(&mut module.supported_speakers, record.supported_speakers);
            keep_first_some(&mut module.circuits, record.circuits);
            merge_unique(
                &mut module.compulsory_main_modules,
                record.compulsory_main_modules,
            );
            merge_unique(&mut module.dependencies, record.dependencies);
            merge_unique(
                &mut module.specification_categories,
                record.specification_categories,
            );
            merge_unique(&mut module.keywords, record.keywords);
            keep_first_nonempty(&mut module.module_role, record.module_role);
            keep_first_nonempty(&mut module.physical_size, record.physical_size);
            if module.mount == MountKind::None {
                module.mount = mount;
            }
            if module.price <= 0.0 && price > 0.0 {
                module.price = price;
            }
            module.internal_space = module.internal_space.max(internal_space);
            module.door_space = module.door_space.max(door_space);
            return;
        }

        let model_number = record.model_number.clone();
        self.order.push(model_number.clone());
        self.modules.insert(
            model_number.clone(),
            CatalogModule {
                model_number,
                description: record.description,
                compatible_panels: record.compatible_panels,
                compatible_protocols: record.compatible_protocols,
                total_point_capacity: record.total_point_capacity,
                circuit_capacity: record.circuit_capacity,
                supervisory_current: record.supervisory_current,
                alarm_current: record.alarm_current,
                supported_speakers: record.supported_speakers,
                circuits: record.circuits,
                compulsory_main_modules: record.compulsory_main_modules,
                module_role: record.module_role,
                physical_size: record.physical_size,
                mount,
                dependencies: record.dependencies,
                specification_categories: record.specification_categories,
                keywords: record.keywords,
                price,
                internal_space,
                door_space,
            },
        );
    }

    /// Inject synthetic enclosures, build indices, and freeze.
    pub fn freeze(mut self) -> Catalog {
        for definition in ENCLOSURE_DEFINITIONS.iter() {
            let synthetic = definition.to_module();
            if let Some(existing) = self.modules.get_mut(&synthetic.model_number) {
                if existing.price <= 0.0 && synthetic.price > 0.0 {
                    existing.price = synthetic.price;
                }
                merge_unique(
                    &mut existing.specification_categories,
                    synthetic.specification_categories,
                );
                merge_unique(&mut existing.keywords, synthetic.keywords);
            } else {
                self.order.push(synthetic.model_number.clone());
                self.modules.insert(synthetic.model_number.clone(), synthetic);
            }
        }

        let modules: Vec<CatalogModule> = self
            .order
            .iter()
            .map(|model| self.modules.remove(model).expect("ordered model present"))
            .collect();

        let mut by_model = HashMap::new();
        let mut by_category: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, module) in modules.iter().enumerate() {
            by_model.insert(module.model_number.clone(), idx);
            for category in &module.specification_categories {
                by_category.entry(category.clone()).or_default().push(idx);
            }
        }

        Catalog {
            modules,
            by_model,
            by_category,
            pricing: self.pricing,
        }
    }
}

/// Frozen module catalog with model and category indices.
#[derive(Debug)]
pub struct Catalog {
    modules: Vec<CatalogModule>,
    by_model: HashMap<String, usize>,
    by_category: HashMap<String, Vec<usize>>,
    pricing: PricingTables,
}

impl Catalog {
    /// All modules in load order.
    pub fn modules(&self) -> &[CatalogModule] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get_module(&self, model_number: &str) -> Option<&CatalogModule> {
        self.by_model.get(model_number).map(|&idx| &self.modules[idx])
    }

    /// Modules in a category, in load order; empty for unknown categories.
    pub fn category_modules(&self, category: &str) -> Vec<&CatalogModule> {
        self.by_category
            .get(category)
            .map(|indices| indices.iter().map(|&idx| &self.modules[idx]).collect())
            .unwrap_or_default()
    }

    /// Categories present in the catalog, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_category.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Cost estimate for `quantity` units of a model.
    ///
    /// Resolution cascade: module price → explicit override → first-category
    /// default → guardrail of 1000 per unit. Never errors on unknown models.
    pub fn estimate_cost(&self, model_number: &str, quantity: u32) -> f64 {
        let qty = quantity as f64;
        if let Some(module) = self.get_module(model_number) {
            if module.price > 0.0 {
                return module.price * qty;
            }
        }
        if let Some(price) = self.pricing.module_prices.get(model_number) {
            return price * qty;
        }
        if let Some(module) = self.get_module(model_number) {
            if let Some(first) = module.specification_categories.first() {
                if let Some(price) = self.pricing.category_prices.get(first) {
                    return price * qty;
                }
            }
        }
        FALLBACK_UNIT_COST * qty
    }

    /// Category default price, if known.
    pub fn category_price(&self, category: &str) -> Option<f64> {
        self.pricing.category_prices.get(category).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model: &str) -> ModuleRecord {
        ModuleRecord {
            model_number: model.to_string(),
            ..ModuleRecord::default()
        }
    }

    #[test]
    fn duplicate_rows_merge_lists_case_insensitively() {
        let mut builder = CatalogBuilder::new(PricingTables::with_defaults());
        let mut first = record("4100-3109");
        first.compatible_protocols = vec!["IDNet2".into()];
        first.specification_categories = vec!["IDNet Modules".into()];
        builder.add_record(first);

        let mut second = record("4100-3109");
        second.compatible_protocols = vec!["idnet2".into(), "MX".into()];
        second.description = "Dual loop card".into();
        builder.add_record(second);

        let catalog = builder.freeze();
        let module = catalog.get_module("4100-3109").unwrap();
        // First-seen casing preserved, duplicate dropped.
        assert_eq!(module.compatible_protocols, vec!["IDNet2", "MX"]);
        assert_eq!(module.description, "Dual loop card");
    }

    #[test]
    fn first_nonempty_scalar_wins() {
        let mut builder = CatalogBuilder::new(PricingTables::with_defaults());
        let mut first = record("4100-5311");
        first.description = "Main power supply".into();
        builder.add_record(first);

        let mut second = record("4100-5311");
        second.description = "Some other description".into();
        builder.add_record(second);

        let catalog = builder.freeze();
        assert_eq!(
            catalog.get_module("4100-5311").unwrap().description,
            "Main power supply"
        );
    }

    #[test]
    fn footprints_take_elementwise_max() {
        let mut builder = CatalogBuilder::new(PricingTables::with_defaults());
        let mut first = record("4100-0001");
        first.physical_size = "1 block".into();
        first.mounted_on = "internal".into();
        builder.add_record(first);

        let mut second = record("4100-0001");
        second.physical_size = "3 blocks".into();
        second.mounted_on = "internal".into();
        builder.add_record(second);

        let catalog = builder.freeze();
        assert_eq!(catalog.get_module("4100-0001").unwrap().internal_space, 3.0);
    }

    #[test]
    fn synthetic_enclosures_present_after_freeze() {
        let catalog = CatalogBuilder::new(PricingTables::with_defaults()).freeze();
        let cabinet = catalog.get_module("4100-9401").unwrap();
        assert_eq!(cabinet.price, 950.0);
        assert_eq!(catalog.category_modules("Cabinet Assemblies").len(), 3);
        assert_eq!(catalog.category_modules("Cabinet Doors").len(), 6);
    }

    #[test]
    fn imported_enclosure_row_keeps_its_price() {
        let mut builder = CatalogBuilder::new(PricingTables {
            module_prices: HashMap::from([("4100-9401".to_string(), 875.0)]),
            category_prices: HashMap::new(),
        });
        let mut row = record("4100-9401");
        row.description = "1-bay backbox (imported)".into();
        builder.add_record(row);

        let catalog = builder.freeze();
        let cabinet = catalog.get_module("4100-9401").unwrap();
        assert_eq!(cabinet.price, 875.0);
        // Synthetic categories were still unioned in.
        assert!(cabinet
            .specification_categories
            .iter()
            .any(|c| c == "Cabinet Assemblies"));
    }

    #[test]
    fn price_cascade_category_default() {
        let mut builder = CatalogBuilder::new(PricingTables::with_defaults());
        let mut row = record("4100-5311");
        row.specification_categories = vec!["Power Supplies".into()];
        builder.add_record(row);

        let catalog = builder.freeze();
        assert_eq!(catalog.get_module("4100-5311").unwrap().price, 1200.0);
    }

    #[test]
    fn estimate_cost_guardrail_for_unknown_model() {
        let catalog = CatalogBuilder::new(PricingTables::with_defaults()).freeze();
        assert_eq!(catalog.estimate_cost("0000-0000", 3), 3000.0);
    }

    #[test]
    fn block_count_scrapes_size_text() {
        let module = CatalogModule {
            model_number: "x".into(),
            description: String::new(),
            compatible_panels: vec![],
            compatible_protocols: vec![],
            total_point_capacity: None,
            circuit_capacity: None,
            supervisory_current: None,
            alarm_current: None,
            supported_speakers: None,
            circuits: None,
            compulsory_main_modules: vec![],
            module_role: String::new(),
            physical_size: "2 units wide".into(),
            mount: MountKind::None,
            dependencies: vec![],
            specification_categories: vec![],
            keywords: vec![],
            price: 0.0,
            internal_space: 0.0,
            door_space: 0.0,
        };
        assert_eq!(module.block_count(), 2.0);
    }

    #[test]
    fn enclosure_size_maps_cover_three_sizes() {
        let cabinets = enclosure_sizes(EnclosureFamily::Cabinet);
        assert_eq!(cabinets.len(), 3);
        assert_eq!(cabinets[&3], "4100-9403");
    }
}
