use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use facp_core::{Catalog, DeviceBoq, PricingTables, ProjectAnswers};
use facp_engine::{export_project_json, Engine, SolverConfig};
use facp_io::{load_catalog, load_placement_rules, load_pricing_overrides, read_csv_sheet};

mod cli;
use cli::{Cli, Commands};

/// Project input document: questionnaire answers plus the device BOQ.
#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    answers: ProjectAnswers,
    #[serde(default)]
    boq: DeviceBoq,
}

fn read_project(path: &Path) -> anyhow::Result<ProjectFile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading project file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing project file {}", path.display()))
}

fn pricing_tables(pricing: Option<&PathBuf>) -> anyhow::Result<PricingTables> {
    match pricing {
        Some(path) => {
            let overrides = load_pricing_overrides(path)
                .with_context(|| format!("loading pricing overrides {}", path.display()))?;
            Ok(overrides.into_tables())
        }
        None => Ok(PricingTables::with_defaults()),
    }
}

fn load_catalog_from(path: &Path, pricing: Option<&PathBuf>) -> anyhow::Result<Catalog> {
    let sheet = read_csv_sheet(path)?;
    let (catalog, diag) = load_catalog(&sheet, pricing_tables(pricing)?);
    if !diag.is_empty() {
        eprintln!("{diag}");
    }
    Ok(catalog)
}

fn run_configure(
    catalog: &Path,
    placement: &Path,
    pricing: Option<&PathBuf>,
    project: &Path,
    out: Option<&PathBuf>,
    max_time: f64,
) -> anyhow::Result<()> {
    let catalog = load_catalog_from(catalog, pricing)?;
    let rules = load_placement_rules(&read_csv_sheet(placement)?);
    let engine = Engine::new(catalog, rules)?.with_config(SolverConfig {
        max_time_seconds: max_time,
        verbose: false,
    });

    let project = read_project(project)?;
    let outcomes = engine.optimise_project(&project.answers, &project.boq);

    if let Some(out) = out {
        let rendered = serde_json::to_string_pretty(&outcomes)?;
        fs::write(out, rendered).with_context(|| format!("writing {}", out.display()))?;
        info!(panels = outcomes.len(), out = %out.display(), "results written");
        return Ok(());
    }

    for outcome in &outcomes {
        let config = &outcome.configuration;
        let result = &outcome.result;
        println!(
            "{} [{}{}]: {} modules, {} bays, cost {:.2}, status {}",
            config.panel_id,
            config.panel_series,
            if config.is_remote_annunciator {
                ", remote annunciator"
            } else {
                ""
            },
            result.module_selection.values().sum::<u32>(),
            result.bay_allocation.recommended_bays,
            result.estimated_cost,
            result.solver_status,
        );
        for (model, quantity) in &result.module_selection {
            println!("  {quantity:>3} x {model}");
        }
    }
    Ok(())
}

fn run_inspect(catalog: &Path, pricing: Option<&PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog_from(catalog, pricing)?;
    println!("{} modules", catalog.len());
    for category in catalog.categories() {
        println!(
            "  {:>3} x {category}",
            catalog.category_modules(category).len()
        );
    }
    Ok(())
}

fn run_plan(project: &Path, out: Option<&PathBuf>) -> anyhow::Result<()> {
    let project = read_project(project)?;
    let configurations = facp_engine::plan_project(&project.answers, &project.boq);
    let rendered = export_project_json(&configurations)?;
    match out {
        Some(out) => {
            fs::write(out, rendered).with_context(|| format!("writing {}", out.display()))?
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting tracing subscriber")?;

    match &cli.command {
        Commands::Configure {
            catalog,
            placement,
            pricing,
            project,
            out,
            max_time,
        } => run_configure(
            catalog,
            placement,
            pricing.as_ref(),
            project,
            out.as_ref(),
            *max_time,
        ),
        Commands::InspectCatalog { catalog, pricing } => run_inspect(catalog, pricing.as_ref()),
        Commands::Plan { project, out } => run_plan(project, out.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_file_tolerates_missing_sections() {
        let project: ProjectFile = serde_json::from_str(r#"{"boq": {"smoke_detector": 5}}"#).unwrap();
        assert_eq!(project.boq.smoke_detector, 5);
        assert_eq!(project.answers.effective_panel_count(), 1);
    }

    #[test]
    fn project_file_parses_answers() {
        let project: ProjectFile = serde_json::from_str(
            r#"{"answers": {"audio_type": "single_channel", "speaker_wattage": 250}}"#,
        )
        .unwrap();
        assert!(project.answers.voice_evacuation());
        assert_eq!(project.answers.speaker_wattage, 250);
    }
}
