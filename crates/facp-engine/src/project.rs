//! Multi-panel project fan-out.
//!
//! Splits the project BOQ across the requested number of main panels and
//! synthesizes one configuration per requested remote annunciator. Each
//! configuration carries its own constraints bag so a downstream consumer
//! can re-run the optimizer without the original questionnaire.

use serde::{Deserialize, Serialize};
use serde_json::json;

use facp_core::{
    AudioType, ConfigResult, DeviceBoq, NetworkType, PanelConfiguration, PanelSeries,
    ProjectAnswers,
};

use crate::requirements::build_requirements;

/// How to divide the project BOQ across main panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// Every panel receives the per-field ceiling `ceil(q / n)`.
    #[default]
    Equal,
    /// Reserved for load-aware splitting; currently identical to `Equal`.
    Balanced,
}

/// Split the BOQ across `panels` panels under the given strategy.
pub fn split_boq(boq: &DeviceBoq, panels: u32, strategy: PartitionStrategy) -> Vec<DeviceBoq> {
    match strategy {
        PartitionStrategy::Equal | PartitionStrategy::Balanced => boq.split(panels),
    }
}

/// Questionnaire view of a synthesized remote annunciator panel.
///
/// Protocol is inherited, networking is always on, and the audio-control
/// surface is carried only when the project asked for it on the remote.
pub fn remote_annunciator_answers(answers: &ProjectAnswers) -> ProjectAnswers {
    ProjectAnswers {
        protocol: answers.protocol,
        audio_type: if answers.remote_annunciator_with_audio_control {
            AudioType::SingleChannel
        } else {
            AudioType::NoAudio
        },
        audio_control_led_switches: answers.remote_annunciator_with_audio_control
            && answers.audio_control_led_switches,
        network_type: if answers.network_type == NetworkType::None {
            NetworkType::Wired
        } else {
            answers.network_type
        },
        panel_count: 1,
        ..ProjectAnswers::default()
    }
}

/// Number of remote annunciator panels to synthesize.
///
/// An explicit BOQ count wins; the audio-control flag implies one when the
/// BOQ is silent.
pub fn remote_annunciator_count(answers: &ProjectAnswers, boq: &DeviceBoq) -> u32 {
    if boq.remote_annunciator > 0 {
        boq.remote_annunciator
    } else if answers.remote_annunciator_with_audio_control {
        1
    } else {
        0
    }
}

/// Fan the project out into per-panel configuration requests.
///
/// Main panels share the split BOQ (with remote annunciators withheld);
/// each remote annunciator becomes its own near-empty configuration.
pub fn plan_project(answers: &ProjectAnswers, boq: &DeviceBoq) -> Vec<PanelConfiguration> {
    let panel_count = answers.effective_panel_count();

    let mut main_boq = *boq;
    main_boq.remote_annunciator = 0;
    let parts = split_boq(&main_boq, panel_count, PartitionStrategy::Equal);

    let mut configurations = Vec::with_capacity(parts.len());
    for (idx, part) in parts.into_iter().enumerate() {
        let requirements = build_requirements(answers, &part);
        configurations.push(PanelConfiguration {
            panel_id: format!("panel-{}", idx + 1),
            panel_series: PanelSeries::Es4100,
            is_main_panel: true,
            is_remote_annunciator: false,
            boq: part,
            constraints: requirements.constraints_bag(),
        });
    }

    let remote_answers = remote_annunciator_answers(answers);
    for idx in 0..remote_annunciator_count(answers, boq) {
        let remote_boq = DeviceBoq {
            remote_annunciator: 1,
            ..DeviceBoq::default()
        };
        let requirements = build_requirements(&remote_answers, &remote_boq);
        let mut constraints = requirements.constraints_bag();
        constraints.insert(
            "remote_audio_control".to_string(),
            json!(answers.remote_annunciator_with_audio_control),
        );
        constraints.insert(
            "remote_microphone".to_string(),
            json!(answers.remote_annunciator_with_audio_control),
        );
        configurations.push(PanelConfiguration {
            panel_id: format!("annunciator-{}", idx + 1),
            panel_series: PanelSeries::Es4010,
            is_main_panel: false,
            is_remote_annunciator: true,
            boq: remote_boq,
            constraints,
        });
    }

    configurations
}

/// Serialize the project fan-out as the exported JSON array.
pub fn export_project_json(configurations: &[PanelConfiguration]) -> ConfigResult<String> {
    Ok(serde_json::to_string_pretty(configurations)?)
}
