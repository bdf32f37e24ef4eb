//! Requirements derivation.
//!
//! Reduces `(answers, BOQ)` to a typed [`PanelRequirements`] record and
//! then to the per-category minimum quantities the optimizer covers.
//!
//! All capacity arithmetic uses integer ceilings; the empirical bounds
//! (500 loop devices per dual-loop card, 14 appliances per NAC circuit,
//! 10 jacks per phone circuit, 15 W per unspecified speaker) come from the
//! product application guidance.

use facp_core::{
    CategoryDemand, DeviceBoq, DoorHolderVoltage, GraphicsSoftware, NetworkType,
    PanelRequirements, ProjectAnswers,
};

/// Loop devices served per dual-loop addressable card.
const LOOP_DEVICES_PER_CARD: u32 = 500;
/// Notification appliances per NAC circuit.
const NAC_DEVICES_PER_CIRCUIT: u32 = 14;
/// Fire-phone jacks per telephone circuit.
const PHONE_JACKS_PER_CIRCUIT: u32 = 10;
/// Conservative wattage estimate per speaker when none was specified.
const WATTS_PER_SPEAKER: u32 = 15;

pub const CAT_MASTER_CONTROLLER: &str = "Master Controller";
pub const CAT_POWER_SUPPLIES: &str = "Power Supplies";
pub const CAT_EPS_ACCESSORIES: &str = "EPS & Accessories";
pub const CAT_IDNET_MODULES: &str = "IDNet Modules";
pub const CAT_NOTIFICATION_MODULES: &str = "Notification Modules";
pub const CAT_AUDIO_OPTIONS: &str = "Audio Options (S4100-0104)";
pub const CAT_VCC_INTERFACES: &str = "VCC Interfaces (S4100-0104)";
pub const CAT_TELEPHONE: &str = "Telephone (S4100-0104)";
pub const CAT_LED_SWITCH: &str = "LED-Switch (4100-0032)";
pub const CAT_RELAY_MODULES: &str = "Relay Modules";

/// Derive per-panel requirements from the questionnaire and the BOQ.
///
/// Pure: same inputs, same record. Derived booleans are monotone; nothing
/// downstream unsets them.
pub fn build_requirements(answers: &ProjectAnswers, boq: &DeviceBoq) -> PanelRequirements {
    let loop_devices = boq.loop_devices();
    let idnet_modules_required = loop_devices.div_ceil(LOOP_DEVICES_PER_CARD).max(1);
    let slc_loops_required = idnet_modules_required * 2;

    let nac_devices = boq.nac_devices();
    let nac_circuits_required = nac_devices.div_ceil(NAC_DEVICES_PER_CIRCUIT);

    let speaker_count = boq.speaker + boq.speaker_strobe;
    let mut relay_count = boq.control_relay + answers.smoke_management_relay_count;
    let fire_damper_control = answers.fire_damper_feedback || answers.fire_damper_led_indication;
    if fire_damper_control {
        relay_count = relay_count.max(8);
    }
    let has_door_holder_220vac = answers.door_holder_voltage == DoorHolderVoltage::Vac220;
    if has_door_holder_220vac {
        relay_count += 1;
    }

    let speaker_wattage = if answers.speaker_wattage == 0 && speaker_count > 0 {
        speaker_count * WATTS_PER_SPEAKER
    } else {
        answers.speaker_wattage
    };

    let fire_phone_circuits = boq.fire_phone_jack.div_ceil(PHONE_JACKS_PER_CIRCUIT);

    let requires_network_cards = answers.has_graphics_command_center
        || matches!(
            answers.graphics_software_type,
            GraphicsSoftware::ViewOnly | GraphicsSoftware::FullControl
        )
        || answers.network_type != NetworkType::None;
    let mut network_links = 0;
    if requires_network_cards {
        network_links = 1;
    }
    if answers.network_type.is_fiber() {
        network_links = network_links.max(2);
    }
    if answers.graphics_software_type == GraphicsSoftware::FullControl {
        network_links = network_links.max(2);
    }

    let requires_led_packages = answers.audio_control_led_switches
        || answers.monitor_modules_with_leds
        || answers.fire_damper_led_indication;

    PanelRequirements {
        protocol: answers.protocol,
        voice_evacuation: answers.voice_evacuation(),
        prefer_addressable_nac: answers.use_addressable_nac,
        has_fire_phone: answers.has_fire_phone || fire_phone_circuits > 0,
        has_led_switches: answers.audio_control_led_switches || answers.monitor_modules_with_leds,
        has_smoke_management: answers.has_smoke_management,
        has_door_holder_220vac,
        monitor_leds: answers.monitor_modules_with_leds,
        graphics_control: answers.graphics_software_type == GraphicsSoftware::FullControl,
        speaker_wattage,
        speaker_count,
        fire_phone_circuits,
        nac_circuits_required,
        slc_loops_required,
        relay_count,
        loop_device_count: loop_devices,
        nac_device_count: nac_devices,
        idnet_modules_required,
        requires_printer: answers.has_panel_printer,
        requires_network_cards,
        network_links,
        nac_class_a: answers.nac_class_a_wiring,
        speaker_class_a: answers.speaker_class_a_wiring,
        constant_supervision: answers.constant_supervision_speaker,
        requires_led_packages,
        fire_damper_control,
        dual_amplifier_per_zone: answers.dual_amplifier_per_zone,
        backup_amp_one_to_one: answers.backup_amplifier_one_to_one,
        backup_amp_one_for_all: answers.backup_amplifier_one_for_all,
    }
}

/// Map requirements to minimum quantities per specification category.
///
/// Rules combine by maximum, never by sum, so redundant rules cannot
/// inflate the demand. Zero entries are excluded by construction.
pub fn derive_category_demand(requirements: &PanelRequirements) -> CategoryDemand {
    let mut demand = CategoryDemand::new();

    let mut ensure = |category: &str, quantity: u32| {
        if quantity == 0 {
            return;
        }
        let entry = demand.entry(category.to_string()).or_insert(0);
        *entry = (*entry).max(quantity);
    };

    ensure(CAT_MASTER_CONTROLLER, 1);
    ensure(
        CAT_POWER_SUPPLIES,
        requirements.nac_circuits_required.max(1).div_ceil(3).max(1),
    );
    let nac_power_padding = requirements.nac_device_count.div_ceil(56);
    ensure(
        CAT_EPS_ACCESSORIES,
        (requirements.speaker_wattage.div_ceil(400) + nac_power_padding).max(1),
    );
    ensure(CAT_IDNET_MODULES, requirements.idnet_modules_required);

    if requirements.nac_circuits_required > 0 {
        if requirements.prefer_addressable_nac {
            ensure(
                CAT_NOTIFICATION_MODULES,
                requirements.nac_circuits_required.div_ceil(2).max(1),
            );
        } else {
            ensure(
                CAT_NOTIFICATION_MODULES,
                requirements.nac_circuits_required.div_ceil(3).max(1),
            );
        }
    }

    if requirements.voice_evacuation {
        ensure(
            CAT_AUDIO_OPTIONS,
            requirements.speaker_wattage.div_ceil(100).max(1),
        );
        ensure(CAT_VCC_INTERFACES, 1);
    }

    if requirements.has_fire_phone {
        ensure(CAT_TELEPHONE, requirements.fire_phone_circuits.max(1));
    }

    if requirements.requires_led_packages {
        ensure(CAT_LED_SWITCH, 1);
    }

    if requirements.has_smoke_management || requirements.relay_count > 0 {
        ensure(
            CAT_RELAY_MODULES,
            requirements.relay_count.max(1).div_ceil(3).max(1),
        );
    }

    if requirements.graphics_control {
        // Additional CPU loading is accounted by this duplicate requirement;
        // the max combiner makes it a no-op.
        ensure(CAT_MASTER_CONTROLLER, 1);
    }

    if requirements.has_door_holder_220vac {
        let current = demand.get(CAT_RELAY_MODULES).copied().unwrap_or(0);
        demand.insert(CAT_RELAY_MODULES.to_string(), current + 1);
    }

    demand.retain(|_, quantity| *quantity > 0);
    demand
}
