//! Project input records and engine output types.
//!
//! Questionnaire answers and the device bill-of-quantities are explicit,
//! totally enumerated records: unknown flags default to `false`/`0` at
//! parse time via `#[serde(default)]`, never at use sites.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Addressable protocol family of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    #[default]
    Idnet2,
    Mx,
}

impl Protocol {
    /// Catalog-facing protocol code.
    pub fn code(&self) -> &'static str {
        match self {
            Protocol::Idnet2 => "IDNet2",
            Protocol::Mx => "MX",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Audio evacuation configuration requested for the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioType {
    #[default]
    NoAudio,
    SingleChannel,
    DualChannel,
}

/// Door holder supply voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorHolderVoltage {
    #[default]
    None,
    Vdc24,
    Vac220,
}

/// Graphics workstation software tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphicsSoftware {
    #[default]
    None,
    ViewOnly,
    FullControl,
}

/// Panel-to-panel network media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    #[default]
    None,
    Wired,
    SingleModeFiber,
    MultiModeFiber,
}

impl NetworkType {
    pub fn is_fiber(&self) -> bool {
        matches!(self, NetworkType::SingleModeFiber | NetworkType::MultiModeFiber)
    }
}

/// Project questionnaire answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectAnswers {
    pub protocol: Protocol,
    pub audio_type: AudioType,
    pub use_addressable_nac: bool,
    pub has_fire_phone: bool,
    pub audio_control_led_switches: bool,
    pub monitor_modules_with_leds: bool,
    pub has_smoke_management: bool,
    pub smoke_management_relay_count: u32,
    pub fire_damper_feedback: bool,
    pub fire_damper_led_indication: bool,
    pub door_holder_voltage: DoorHolderVoltage,
    /// Total speaker wattage; 0 means "estimate from speaker count"
    pub speaker_wattage: u32,
    pub has_graphics_command_center: bool,
    pub graphics_software_type: GraphicsSoftware,
    pub network_type: NetworkType,
    pub has_panel_printer: bool,
    pub nac_class_a_wiring: bool,
    pub speaker_class_a_wiring: bool,
    pub constant_supervision_speaker: bool,
    pub dual_amplifier_per_zone: bool,
    pub backup_amplifier_one_to_one: bool,
    pub backup_amplifier_one_for_all: bool,
    pub remote_annunciator_with_audio_control: bool,
    /// Number of main panels the project BOQ is split across
    pub panel_count: u32,
}

impl ProjectAnswers {
    pub fn voice_evacuation(&self) -> bool {
        self.audio_type != AudioType::NoAudio
    }

    /// Main panel count, never below 1.
    pub fn effective_panel_count(&self) -> u32 {
        self.panel_count.max(1)
    }
}

/// Field-device bill of quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceBoq {
    pub smoke_detector: u32,
    pub heat_detector: u32,
    pub duct_detector: u32,
    pub beam_detector: u32,
    pub manual_station: u32,
    pub monitor_module: u32,
    pub control_relay: u32,
    pub horn_strobe: u32,
    pub strobe_only: u32,
    pub horn_only: u32,
    pub addressable_horn_strobe: u32,
    pub addressable_strobe: u32,
    pub speaker: u32,
    pub speaker_strobe: u32,
    pub fire_phone_jack: u32,
    pub remote_annunciator: u32,
}

impl DeviceBoq {
    /// Devices that live on the addressable detection loop.
    pub fn loop_devices(&self) -> u32 {
        self.smoke_detector
            + self.heat_detector
            + self.duct_detector
            + self.beam_detector
            + self.manual_station
            + self.monitor_module
            + self.control_relay
    }

    /// Devices driven by notification appliance circuits.
    pub fn nac_devices(&self) -> u32 {
        self.horn_strobe
            + self.strobe_only
            + self.horn_only
            + self.addressable_horn_strobe
            + self.addressable_strobe
            + self.speaker_strobe
    }

    /// All named fields with their counts, in declaration order.
    pub fn field_counts(&self) -> [(&'static str, u32); 16] {
        [
            ("smoke_detector", self.smoke_detector),
            ("heat_detector", self.heat_detector),
            ("duct_detector", self.duct_detector),
            ("beam_detector", self.beam_detector),
            ("manual_station", self.manual_station),
            ("monitor_module", self.monitor_module),
            ("control_relay", self.control_relay),
            ("horn_strobe", self.horn_strobe),
            ("strobe_only", self.strobe_only),
            ("horn_only", self.horn_only),
            ("addressable_horn_strobe", self.addressable_horn_strobe),
            ("addressable_strobe", self.addressable_strobe),
            ("speaker", self.speaker),
            ("speaker_strobe", self.speaker_strobe),
            ("fire_phone_jack", self.fire_phone_jack),
            ("remote_annunciator", self.remote_annunciator),
        ]
    }

    pub fn total_devices(&self) -> u32 {
        self.field_counts().iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_devices() == 0
    }

    /// Equal ceiling split across `panels` panels.
    ///
    /// Each field becomes `ceil(q / panels)`, so the combined capacity of
    /// the split is never below the original at the cost of up to
    /// `panels - 1` device slots of headroom per field.
    pub fn split(&self, panels: u32) -> Vec<DeviceBoq> {
        let n = panels.max(1);
        let per_panel = DeviceBoq {
            smoke_detector: self.smoke_detector.div_ceil(n),
            heat_detector: self.heat_detector.div_ceil(n),
            duct_detector: self.duct_detector.div_ceil(n),
            beam_detector: self.beam_detector.div_ceil(n),
            manual_station: self.manual_station.div_ceil(n),
            monitor_module: self.monitor_module.div_ceil(n),
            control_relay: self.control_relay.div_ceil(n),
            horn_strobe: self.horn_strobe.div_ceil(n),
            strobe_only: self.strobe_only.div_ceil(n),
            horn_only: self.horn_only.div_ceil(n),
            addressable_horn_strobe: self.addressable_horn_strobe.div_ceil(n),
            addressable_strobe: self.addressable_strobe.div_ceil(n),
            speaker: self.speaker.div_ceil(n),
            speaker_strobe: self.speaker_strobe.div_ceil(n),
            fire_phone_jack: self.fire_phone_jack.div_ceil(n),
            remote_annunciator: self.remote_annunciator.div_ceil(n),
        };
        vec![per_panel; n as usize]
    }
}

/// Summarised per-panel requirements derived from answers and BOQ.
///
/// Produced once per `(answers, boq)` pair and consumed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRequirements {
    pub protocol: Protocol,
    pub voice_evacuation: bool,
    pub prefer_addressable_nac: bool,
    pub has_fire_phone: bool,
    pub has_led_switches: bool,
    pub has_smoke_management: bool,
    pub has_door_holder_220vac: bool,
    pub monitor_leds: bool,
    pub graphics_control: bool,
    pub speaker_wattage: u32,
    pub speaker_count: u32,
    pub fire_phone_circuits: u32,
    pub nac_circuits_required: u32,
    pub slc_loops_required: u32,
    pub relay_count: u32,
    pub loop_device_count: u32,
    pub nac_device_count: u32,
    pub idnet_modules_required: u32,
    pub requires_printer: bool,
    pub requires_network_cards: bool,
    pub network_links: u32,
    pub nac_class_a: bool,
    pub speaker_class_a: bool,
    pub constant_supervision: bool,
    pub requires_led_packages: bool,
    pub fire_damper_control: bool,
    pub dual_amplifier_per_zone: bool,
    pub backup_amp_one_to_one: bool,
    pub backup_amp_one_for_all: bool,
}

impl PanelRequirements {
    /// Flatten the record into the constraints bag exported with each panel
    /// configuration.
    pub fn constraints_bag(&self) -> BTreeMap<String, serde_json::Value> {
        // serde round-trip keeps the bag in lockstep with the field set.
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
            _ => BTreeMap::new(),
        }
    }
}

/// Minimum quantity per specification category; zero entries excluded by
/// construction.
pub type CategoryDemand = BTreeMap<String, u32>;

/// Selected quantity per model number; every key resolves in the catalog.
pub type ModuleSelection = BTreeMap<String, u32>;

/// Aggregate footprint of a module selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceUsage {
    pub internal_blocks: f64,
    pub door_slots: f64,
}

/// Bay counts derived from a space summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BayAllocation {
    pub internal_bays: u32,
    pub door_bays: u32,
    pub recommended_bays: u32,
}

/// Terminal state of the module-coverage optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    Greedy,
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SolverStatus::Optimal => "OPTIMAL",
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::Greedy => "GREEDY",
        };
        f.write_str(name)
    }
}

/// Result returned for a single panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Category demand the selection was solved against
    pub category_demand: CategoryDemand,
    /// Final module selection (solver merged with the deterministic plan
    /// and enclosures)
    pub module_selection: ModuleSelection,
    pub estimated_cost: f64,
    /// Solver status, optionally suffixed "+PLAN" after the merge
    pub solver_status: String,
    pub space_usage: SpaceUsage,
    pub bay_allocation: BayAllocation,
}

/// Panel hardware series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PanelSeries {
    #[default]
    #[serde(rename = "4100ES")]
    Es4100,
    #[serde(rename = "4010ES")]
    Es4010,
}

impl std::fmt::Display for PanelSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelSeries::Es4100 => f.write_str("4100ES"),
            PanelSeries::Es4010 => f.write_str("4010ES"),
        }
    }
}

/// One panel of a multi-panel project, ready to hand to the optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfiguration {
    pub panel_id: String,
    pub panel_series: PanelSeries,
    pub is_main_panel: bool,
    pub is_remote_annunciator: bool,
    pub boq: DeviceBoq,
    /// Requirement bag exported alongside the BOQ
    pub constraints: BTreeMap<String, serde_json::Value>,
}
