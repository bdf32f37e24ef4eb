//! End-to-end configurator scenarios.
//!
//! Each test drives the full pipeline (requirements → demand → coverage →
//! plan merge → enclosures) over a fixture catalog that carries the
//! well-known alias SKUs with realistic footprints.

use std::io::Write;

use facp_core::{
    AudioType, CatalogBuilder, DeviceBoq, DoorHolderVoltage, ModuleRecord, PlacementRule,
    PlacementRuleIndex, PricingTables, ProjectAnswers,
};
use facp_engine::{build_requirements, derive_category_demand, derive_specific_plan, Engine};
use facp_io::{load_catalog, load_placement_rules, read_csv_sheet, SheetData};

fn rules() -> PlacementRuleIndex {
    PlacementRuleIndex::new(vec![PlacementRule {
        path: vec!["Panel".to_string()],
        text: "Power supply, audio controller, amplifier, display and annunciator \
               placement guidance"
            .to_string(),
    }])
}

fn module(model: &str, category: &str, size: &str, mount: &str) -> ModuleRecord {
    ModuleRecord {
        model_number: model.to_string(),
        specification_categories: vec![category.to_string()],
        physical_size: size.to_string(),
        mounted_on: mount.to_string(),
        ..ModuleRecord::default()
    }
}

fn fixture_catalog() -> facp_core::Catalog {
    let mut builder = CatalogBuilder::new(PricingTables::with_defaults());
    for record in [
        module("4100-9701", "Master Controller", "2 blocks", "internal"),
        module("4100-5311", "Power Supplies", "2 blocks", "internal"),
        module("4100-5325", "Power Supplies", "2 blocks", "internal"),
        module("4100-3109", "IDNet Modules", "1 block", "internal"),
        module("4100-5450", "Notification Modules", "1 block", "internal"),
        module("4100-5451", "Notification Modules", "1 block", "internal"),
        module("4100-0110", "EPS & Accessories", "1 block", "internal"),
        module("4100-1248", "Audio Options (S4100-0104)", "1 block", "internal"),
        module("4100-1253", "VCC Interfaces (S4100-0104)", "", "both"),
        module("4100-1270", "Telephone (S4100-0104)", "", "both"),
        module("4100-1288", "LED-Switch (4100-0032)", "1 slot", "door"),
        module("4100-6033", "Relay Modules", "1 block", "internal"),
        module("4100-5013", "Relay Modules", "1 block", "internal"),
    ] {
        builder.add_record(record);
    }
    builder.freeze()
}

fn engine() -> Engine {
    Engine::new(fixture_catalog(), rules()).unwrap()
}

/// S1 — minimal IDNet2 panel.
#[test]
fn minimal_idnet2_panel() {
    let answers = ProjectAnswers::default();
    let boq = DeviceBoq {
        smoke_detector: 100,
        ..DeviceBoq::default()
    };

    let requirements = build_requirements(&answers, &boq);
    assert_eq!(requirements.idnet_modules_required, 1);

    let demand = derive_category_demand(&requirements);
    assert_eq!(demand["Master Controller"], 1);
    assert_eq!(demand["Power Supplies"], 1);
    assert_eq!(demand["IDNet Modules"], 1);

    let plan = derive_specific_plan(&requirements);
    for model in ["4100-9701", "4100-5311", "4100-3109"] {
        assert!(plan.contains_key(model), "plan missing {model}");
    }

    let result = engine().optimise_panel(&answers, &boq);
    assert_eq!(result.bay_allocation.recommended_bays, 1);
    assert_eq!(result.module_selection["4100-9401"], 1);
    assert_eq!(result.module_selection["4100-9404"], 1);
}

/// S2 — voice evac threshold.
#[test]
fn voice_evacuation_threshold() {
    let mut answers = ProjectAnswers::default();
    answers.audio_type = AudioType::SingleChannel;
    answers.speaker_wattage = 250;

    let requirements = build_requirements(&answers, &DeviceBoq::default());
    let demand = derive_category_demand(&requirements);
    assert!(demand["Audio Options (S4100-0104)"] >= 3);
    assert_eq!(demand["VCC Interfaces (S4100-0104)"], 1);

    let plan = derive_specific_plan(&requirements);
    assert!(plan["4100-1248"] >= 3);
}

/// S3 — dual + backup amp: doubled once, never stacked.
#[test]
fn dual_and_backup_amplifiers() {
    let mut answers = ProjectAnswers::default();
    answers.audio_type = AudioType::SingleChannel;
    answers.speaker_wattage = 250;
    answers.dual_amplifier_per_zone = true;
    answers.backup_amplifier_one_to_one = true;

    let requirements = build_requirements(&answers, &DeviceBoq::default());
    let plan = derive_specific_plan(&requirements);
    assert_eq!(plan["4100-1248"], 6);
}

/// S4 — large loop.
#[test]
fn large_loop_expansion() {
    let boq = DeviceBoq {
        smoke_detector: 1500,
        heat_detector: 500,
        ..DeviceBoq::default()
    };
    let requirements = build_requirements(&ProjectAnswers::default(), &boq);
    assert_eq!(requirements.idnet_modules_required, 4);
    assert_eq!(requirements.slc_loops_required, 8);

    let plan = derive_specific_plan(&requirements);
    assert_eq!(plan["4100-5325"], 3);
}

/// S5 — fire damper + door holder 220 VAC.
#[test]
fn fire_damper_with_door_holder() {
    let mut answers = ProjectAnswers::default();
    answers.fire_damper_feedback = true;
    answers.door_holder_voltage = DoorHolderVoltage::Vac220;

    let requirements = build_requirements(&answers, &DeviceBoq::default());
    assert!(requirements.relay_count >= 9);

    let plan = derive_specific_plan(&requirements);
    assert!(plan["4100-5013"] >= 2);
    assert!(!plan.contains_key("4100-6033"));
}

/// S6 — 3-panel partition.
#[test]
fn three_panel_partition() {
    let boq = DeviceBoq {
        smoke_detector: 500,
        ..DeviceBoq::default()
    };
    let parts = boq.split(3);
    assert_eq!(parts.len(), 3);
    assert!(parts.iter().all(|p| p.smoke_detector == 167));
    assert_eq!(parts.iter().map(|p| p.smoke_detector).sum::<u32>(), 501);
}

/// Invariant: the merged selection never drops below optimizer or plan.
#[test]
fn merge_monotonicity_holds_end_to_end() {
    let mut answers = ProjectAnswers::default();
    answers.audio_type = AudioType::SingleChannel;
    answers.speaker_wattage = 400;
    let boq = DeviceBoq {
        smoke_detector: 600,
        horn_strobe: 30,
        speaker: 40,
        ..DeviceBoq::default()
    };

    let requirements = build_requirements(&answers, &boq);
    let plan = derive_specific_plan(&requirements);
    let result = engine().optimise_panel(&answers, &boq);

    for (model, quantity) in &plan {
        assert!(
            result.module_selection.get(model).copied().unwrap_or(0) >= *quantity,
            "selection dropped below plan for {model}"
        );
    }
    assert!(result.bay_allocation.recommended_bays >= 1);
}

/// Invariant: enclosure packing conserves bays.
#[test]
fn enclosure_packing_conserves_bays() {
    let boq = DeviceBoq {
        smoke_detector: 2000,
        horn_strobe: 100,
        ..DeviceBoq::default()
    };
    let result = engine().optimise_panel(&ProjectAnswers::default(), &boq);

    let cabinet_sizes = [("4100-9401", 1u32), ("4100-9402", 2), ("4100-9403", 3)];
    let provided: u32 = cabinet_sizes
        .iter()
        .map(|(model, size)| size * result.module_selection.get(*model).copied().unwrap_or(0))
        .sum();
    assert!(provided >= result.bay_allocation.recommended_bays);
}

/// The CSV-backed path produces the same engine behavior as the in-memory
/// fixture.
#[test]
fn csv_catalog_roundtrip_drives_engine() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Module Model Number,Description,Specification Descriptions,Physical Size,Mounted ON"
    )
    .unwrap();
    writeln!(file, "4100-9701,Master controller,Master Controller,2 blocks,internal").unwrap();
    writeln!(file, "4100-5311,Main power supply,Power Supplies,2 blocks,internal").unwrap();
    writeln!(file, "4100-3109,Dual loop card,IDNet Modules,1 block,internal").unwrap();
    writeln!(file, "4100-0110,EPS brick,EPS & Accessories,1 block,internal").unwrap();
    file.flush().unwrap();

    let sheet = read_csv_sheet(file.path()).unwrap();
    let (catalog, diag) = load_catalog(&sheet, PricingTables::with_defaults());
    assert!(!diag.has_errors());

    let placement = load_placement_rules(&SheetData::new(
        "placement",
        vec![
            vec!["Panel".to_string(), String::new()],
            vec![
                String::new(),
                "Power supply, audio controller, amplifier, display, annunciator".to_string(),
            ],
        ],
    ));

    let engine = Engine::new(catalog, placement).unwrap();
    let result = engine.optimise_panel(
        &ProjectAnswers::default(),
        &DeviceBoq {
            smoke_detector: 100,
            ..DeviceBoq::default()
        },
    );
    assert!(result.module_selection["4100-9701"] >= 1);
    assert_eq!(result.bay_allocation.recommended_bays, 1);
    assert!(result.solver_status.ends_with("+PLAN"));
}
