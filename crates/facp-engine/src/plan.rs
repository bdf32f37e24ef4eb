//! Deterministic specific-module plan.
//!
//! Category coverage alone can be satisfied by substitutes; this plan pins
//! the well-known SKUs that must be present when particular requirements
//! fire — the master controller, the dual-loop card, the main power supply,
//! the amplifier chain, and so on. The plan merges into the optimizer's
//! selection by elementwise maximum, so it never shrinks a solver decision.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use facp_core::{ModuleSelection, PanelRequirements};

/// Stable logical names for the well-known SKUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleAlias {
    MasterController,
    IdnetDualLoop,
    PowerSupplyMain,
    PowerSupplyExpansion,
    IdnacModule,
    ConventionalNac,
    NacClassA,
    NacSupervision,
    AudioBase,
    AudioOperator,
    AudioAmplifier,
    AudioClassA,
    FirePhone,
    LedController,
    Printer,
    Rs232,
    NetworkInterface,
    RelayModule,
    RelayZone,
}

/// Alias → catalog model number.
pub static MODULE_ALIASES: Lazy<HashMap<ModuleAlias, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (ModuleAlias::MasterController, "4100-9701"),
        (ModuleAlias::IdnetDualLoop, "4100-3109"),
        (ModuleAlias::PowerSupplyMain, "4100-5311"),
        (ModuleAlias::PowerSupplyExpansion, "4100-5325"),
        (ModuleAlias::IdnacModule, "4100-5451"),
        (ModuleAlias::ConventionalNac, "4100-5450"),
        (ModuleAlias::NacClassA, "4100-1246"),
        (ModuleAlias::NacSupervision, "4100-1266"),
        (ModuleAlias::AudioBase, "4100-9620"),
        (ModuleAlias::AudioOperator, "4100-1254"),
        (ModuleAlias::AudioAmplifier, "4100-1248"),
        (ModuleAlias::AudioClassA, "4100-1249"),
        (ModuleAlias::FirePhone, "4100-1270"),
        (ModuleAlias::LedController, "4100-1288"),
        (ModuleAlias::Printer, "4100-1293"),
        (ModuleAlias::Rs232, "4100-6038"),
        (ModuleAlias::NetworkInterface, "4100-6080"),
        (ModuleAlias::RelayModule, "4100-6033"),
        (ModuleAlias::RelayZone, "4100-5013"),
    ])
});

/// Model number for an alias.
pub fn alias_model(alias: ModuleAlias) -> &'static str {
    MODULE_ALIASES[&alias]
}

/// Build the per-SKU plan for the given requirements.
pub fn derive_specific_plan(requirements: &PanelRequirements) -> ModuleSelection {
    let mut plan = ModuleSelection::new();

    let mut add = |alias: ModuleAlias, quantity: u32| {
        if quantity == 0 {
            return;
        }
        let entry = plan.entry(alias_model(alias).to_string()).or_insert(0);
        *entry = (*entry).max(quantity);
    };

    add(ModuleAlias::MasterController, 1);
    add(ModuleAlias::PowerSupplyMain, 1);
    add(ModuleAlias::IdnetDualLoop, requirements.idnet_modules_required);

    if requirements.idnet_modules_required > 1 {
        add(
            ModuleAlias::PowerSupplyExpansion,
            requirements.idnet_modules_required - 1,
        );
    }

    let nac_circuits = requirements.nac_circuits_required;
    if nac_circuits > 0 {
        if requirements.prefer_addressable_nac {
            add(ModuleAlias::IdnacModule, nac_circuits.div_ceil(2));
        } else {
            add(ModuleAlias::ConventionalNac, nac_circuits.div_ceil(3));
        }
    }
    if requirements.nac_class_a {
        add(ModuleAlias::NacClassA, nac_circuits.div_ceil(3).max(1));
    }
    if requirements.constant_supervision {
        add(ModuleAlias::NacSupervision, nac_circuits.div_ceil(4).max(1));
    }

    if requirements.voice_evacuation {
        add(ModuleAlias::AudioBase, 1);
        add(ModuleAlias::AudioOperator, 1);
        let mut amplifiers = requirements.speaker_wattage.div_ceil(100).max(1);
        if requirements.backup_amp_one_to_one || requirements.dual_amplifier_per_zone {
            amplifiers *= 2;
        } else if requirements.backup_amp_one_for_all {
            amplifiers += 1;
        }
        add(ModuleAlias::AudioAmplifier, amplifiers);
        if requirements.speaker_class_a {
            add(
                ModuleAlias::AudioClassA,
                requirements.speaker_count.div_ceil(2).max(1),
            );
        }
    }

    if requirements.has_fire_phone {
        add(
            ModuleAlias::FirePhone,
            requirements.fire_phone_circuits.max(1).div_ceil(3).max(1),
        );
    }

    if requirements.requires_led_packages {
        add(ModuleAlias::LedController, 1);
    }

    if requirements.requires_printer {
        add(ModuleAlias::Printer, 1);
        add(ModuleAlias::Rs232, 1);
    }

    if requirements.requires_network_cards {
        add(ModuleAlias::NetworkInterface, requirements.network_links.max(1));
    }

    let mut total_relays = requirements.relay_count;
    if requirements.has_door_holder_220vac {
        total_relays = total_relays.max(requirements.relay_count + 1);
    }
    if requirements.fire_damper_control {
        // Damper feedback rides on zone relays, a full 8-point card per 8
        // relays.
        add(ModuleAlias::RelayZone, total_relays.max(8).div_ceil(8).max(1));
    } else if total_relays > 0 {
        add(ModuleAlias::RelayModule, total_relays.div_ceil(3).max(1));
    }

    plan
}

/// Overlay the plan onto the optimizer selection, elementwise maximum.
pub fn merge_with_plan(optimizer: &ModuleSelection, plan: &ModuleSelection) -> ModuleSelection {
    let mut merged = optimizer.clone();
    for (model, &quantity) in plan {
        let entry = merged.entry(model.clone()).or_insert(0);
        *entry = (*entry).max(quantity);
    }
    merged
}
