//! Enclosure planning.
//!
//! Sums the selected modules' footprints into internal-block and door-slot
//! totals, converts those to a bay count, then packs the bays into concrete
//! cabinet and door SKUs largest-size-first. Every bay gets a door: glass
//! when anything occupies door slots, solid otherwise.

use std::collections::BTreeMap;

use facp_core::{
    enclosure_sizes, BayAllocation, Catalog, EnclosureFamily, ModuleSelection, SpaceUsage,
    DOOR_SLOTS_PER_BAY, INTERNAL_BLOCKS_PER_BAY,
};

fn ceil_bays(used: f64, per_bay: f64) -> u32 {
    if used > 0.0 {
        (used / per_bay).ceil() as u32
    } else {
        0
    }
}

/// Sum footprints over a selection and derive the bay counts.
///
/// Models missing from the catalog contribute nothing; cost estimation is
/// where unknown models are penalized, not here.
pub fn summarise_space(selection: &ModuleSelection, catalog: &Catalog) -> (SpaceUsage, BayAllocation) {
    let mut internal = 0.0;
    let mut door = 0.0;
    for (model, &quantity) in selection {
        if let Some(module) = catalog.get_module(model) {
            internal += module.internal_space * quantity as f64;
            door += module.door_space * quantity as f64;
        }
    }

    let usage = SpaceUsage {
        internal_blocks: internal,
        door_slots: door,
    };
    let internal_bays = ceil_bays(internal, INTERNAL_BLOCKS_PER_BAY);
    let door_bays = ceil_bays(door, DOOR_SLOTS_PER_BAY);
    let allocation = BayAllocation {
        internal_bays,
        door_bays,
        recommended_bays: internal_bays.max(door_bays).max(1),
    };
    (usage, allocation)
}

/// Pack `required_bays` into SKUs, largest size first.
///
/// Repeatedly takes `remaining / size` of the largest size that fits; if
/// the smallest size still leaves a remainder, one more of it is added.
fn allocate_enclosure_sizes(
    required_bays: u32,
    size_to_model: &BTreeMap<u32, &'static str>,
) -> ModuleSelection {
    let mut plan = ModuleSelection::new();
    if required_bays == 0 || size_to_model.is_empty() {
        return plan;
    }

    let sizes: Vec<u32> = size_to_model.keys().rev().copied().collect();
    let mut remaining = required_bays as i64;
    for (idx, &size) in sizes.iter().enumerate() {
        if remaining <= 0 {
            break;
        }
        let mut count = remaining / size as i64;
        if count == 0 && idx == sizes.len() - 1 {
            count = 1;
        }
        if count <= 0 {
            continue;
        }
        let model = size_to_model[&size];
        *plan.entry(model.to_string()).or_insert(0) += count as u32;
        remaining -= size as i64 * count;
    }
    if remaining > 0 {
        let smallest = sizes[sizes.len() - 1];
        let model = size_to_model[&smallest];
        *plan.entry(model.to_string()).or_insert(0) += 1;
    }
    plan
}

/// Cabinets and doors for the selection's recommended bay count.
///
/// Cabinet and door plans are added together; both are present in a built
/// panel.
pub fn derive_enclosure_modules(selection: &ModuleSelection, catalog: &Catalog) -> ModuleSelection {
    let (usage, allocation) = summarise_space(selection, catalog);
    let required_bays = allocation.recommended_bays.max(1);

    let mut plan = ModuleSelection::new();
    let mut merge = |source: ModuleSelection| {
        for (model, quantity) in source {
            if quantity > 0 {
                *plan.entry(model).or_insert(0) += quantity;
            }
        }
    };

    merge(allocate_enclosure_sizes(
        required_bays,
        &enclosure_sizes(EnclosureFamily::Cabinet),
    ));
    let door_family = if usage.door_slots > 0.0 {
        EnclosureFamily::DoorGlass
    } else {
        EnclosureFamily::DoorSolid
    };
    merge(allocate_enclosure_sizes(
        required_bays,
        &enclosure_sizes(door_family),
    ));
    plan
}

/// Add the enclosure plan into the module selection in place.
pub fn apply_enclosures(selection: &mut ModuleSelection, catalog: &Catalog) {
    for (model, quantity) in derive_enclosure_modules(selection, catalog) {
        *selection.entry(model).or_insert(0) += quantity;
    }
}
