//! HabLayout Headless Validation Harness
//!
//! Validates the layout engine without a UI.
//! Runs entirely in-process, with no rendering or networking.
//!
//! Usage:
//!   cargo run -p hablayout-simtest
//!   cargo run -p hablayout-simtest -- --verbose
//!   cargo run -p hablayout-simtest -- --layout my_habitat.json --export out.json

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use hablayout_logic::constants::{zone_names, RULES};
use hablayout_logic::export::ExportDocument;
use hablayout_logic::layout::{validate_layout, HabitatLayout};
use hablayout_logic::rules::{evaluate, MissionContext, Zone};
use hablayout_logic::shape::{compute_geometry, ShapeDescriptor, ShapeKind};
use hablayout_logic::LayoutError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hablayout-simtest")]
#[command(about = "Headless validation harness for the HabLayout engine", long_about = None)]
struct Cli {
    /// Print every check, not only failures
    #[arg(short, long)]
    verbose: bool,

    /// Layout file (JSON) to evaluate after the sweep
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Write the export document for the evaluated layout to this path
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Number of random layouts in the determinism sweep
    #[arg(long, default_value_t = 200)]
    sweep: u32,

    /// Seed for the determinism sweep
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    println!("=== HabLayout Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Geometry reference values
    results.extend(validate_geometry());

    // 2. Rule evaluation
    results.extend(validate_rules());

    // 3. Contract violations
    results.extend(validate_errors());

    // 4. Determinism over random layouts
    results.extend(validate_determinism(cli.sweep, cli.seed));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || cli.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    // ── User layout ──
    if cli.layout.is_some() || cli.export.is_some() {
        let layout = match &cli.layout {
            Some(path) => load_layout(path)?,
            None => HabitatLayout::default(),
        };
        print_report(&layout)?;
        if let Some(path) = &cli.export {
            write_export(&layout, path)?;
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.01
}

// ── 1. Geometry ─────────────────────────────────────────────────────────

fn validate_geometry() -> Vec<TestResult> {
    println!("--- Geometry ---");
    let mut results = Vec::new();

    let reference = [
        ("cylinder", 6.0, 8.0, 28.27, 226.19),
        ("box", 4.0, 6.0, 24.0, 60.0),
        ("sphere", 8.0, 8.0, 50.27, 268.08),
        ("ellipsoid", 8.0, 12.0, 75.40, 402.12),
    ];
    for (tag, p, s, floor, volume) in reference {
        let name = format!("geometry_{tag}");
        match ShapeDescriptor::from_tag(tag, p, s).and_then(|shape| compute_geometry(&shape)) {
            Ok(g) => results.push(check(
                &name,
                approx(g.floor_area, floor) && approx(g.volume, volume),
                format!(
                    "{p}×{s}: floor {:.2} m² (expected {floor}), volume {:.2} m³ (expected {volume})",
                    g.floor_area, g.volume
                ),
            )),
            Err(e) => results.push(check(&name, false, e.to_string())),
        }
    }

    let all_positive = ShapeKind::all().iter().all(|k| {
        compute_geometry(&k.preset())
            .map(|g| g.volume > 0.0 && g.floor_area > 0.0)
            .unwrap_or(false)
    });
    results.push(check(
        "geometry_presets_positive",
        all_positive,
        format!("{} presets", ShapeKind::all().len()),
    ));

    results
}

// ── 2. Rules ────────────────────────────────────────────────────────────

fn validate_rules() -> Vec<TestResult> {
    println!("--- Rules ---");
    let mut results = Vec::new();
    let index = |zone: &str| RULES.iter().position(|r| r.zone == zone);

    let mission = MissionContext {
        crew_size: 4,
        mission_days: 180,
    };
    let zones = vec![Zone::new(1, "Sleep", 6.0), Zone::new(2, "ECLSS", 4.0)];
    let checks = match evaluate(&zones, &mission, 28.27) {
        Ok(c) => c,
        Err(e) => {
            results.push(check("rules_evaluate", false, e.to_string()));
            return results;
        }
    };

    results.push(check(
        "rules_result_count",
        checks.len() == RULES.len() + 1,
        format!("{} results for {} rules", checks.len(), RULES.len()),
    ));

    if let Some(sleep) = index(zone_names::SLEEP).and_then(|i| checks.get(i)) {
        results.push(check(
            "rules_sleep_per_crew",
            !sleep.ok && sleep.message.contains("16.0"),
            sleep.message.clone(),
        ));
    }
    if let Some(eclss) = index(zone_names::ECLSS).and_then(|i| checks.get(i)) {
        results.push(check(
            "rules_eclss_fixed_minimum",
            eclss.ok,
            eclss.message.clone(),
        ));
    }

    let missing = checks
        .iter()
        .filter(|c| c.message.starts_with("Missing zone:"))
        .count();
    results.push(check(
        "rules_missing_zones",
        missing == RULES.len() - 2,
        format!("{missing} missing zones reported"),
    ));

    let overfull = vec![
        Zone::new(1, "Sleep", 16.0),
        Zone::new(2, "ECLSS", 4.0),
        Zone::new(3, "Lab", 10.0),
    ];
    match evaluate(&overfull, &mission, 28.27) {
        Ok(c) => {
            let last = c.last();
            results.push(check(
                "rules_aggregate_overfull",
                last.is_some_and(|r| !r.ok),
                last.map(|r| r.message.clone()).unwrap_or_default(),
            ));
        }
        Err(e) => results.push(check("rules_aggregate_overfull", false, e.to_string())),
    }

    results
}

// ── 3. Contract violations ──────────────────────────────────────────────

fn validate_errors() -> Vec<TestResult> {
    println!("--- Contract violations ---");
    let mut results = Vec::new();

    let torus = ShapeDescriptor::from_tag("torus", 6.0, 8.0);
    results.push(check(
        "error_torus",
        matches!(torus, Err(LayoutError::InvalidShapeKind(_))),
        format!("{torus:?}"),
    ));

    let flat = ShapeDescriptor::from_tag("box", 4.0, 0.0);
    results.push(check(
        "error_zero_dimension",
        matches!(flat, Err(LayoutError::InvalidDimension { .. })),
        format!("{flat:?}"),
    ));

    let no_crew = MissionContext {
        crew_size: 0,
        mission_days: 180,
    };
    let outcome = evaluate(&[], &no_crew, 28.27);
    results.push(check(
        "error_zero_crew",
        matches!(outcome, Err(LayoutError::InvalidMissionContext { .. })),
        match outcome {
            Ok(_) => "evaluation unexpectedly succeeded".into(),
            Err(e) => e.to_string(),
        },
    ));

    results
}

// ── 4. Determinism ──────────────────────────────────────────────────────

fn random_layout(rng: &mut StdRng) -> hablayout_logic::Result<HabitatLayout> {
    let kinds = ShapeKind::all();
    let kind = kinds[rng.gen_range(0..kinds.len())];
    let mut layout = HabitatLayout {
        shape: ShapeDescriptor {
            kind,
            primary_dimension: rng.gen_range(1.0..20.0),
            secondary_dimension: rng.gen_range(1.0..30.0),
        },
        mission: MissionContext {
            crew_size: rng.gen_range(1..=12),
            mission_days: rng.gen_range(1..=1000),
        },
        zones: Vec::new(),
        next_zone_id: 1,
    };

    let zone_count = rng.gen_range(0..=10);
    for _ in 0..zone_count {
        // Mostly rule zones, with duplicates and unmatched names mixed in.
        let name = if rng.gen_bool(0.8) {
            RULES[rng.gen_range(0..RULES.len())].zone.to_string()
        } else {
            format!("Extra {}", rng.gen_range(0..3))
        };
        let area = (rng.gen_range(0.0..30.0_f64) * 10.0).round() / 10.0;
        layout.add_zone(name, area)?;
    }
    Ok(layout)
}

fn validate_determinism(count: u32, seed: u64) -> Vec<TestResult> {
    println!("--- Determinism sweep ({count} layouts, seed {seed}) ---");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mismatches = 0;
    let mut malformed = 0;
    let mut errors = 0;

    for _ in 0..count {
        let layout = match random_layout(&mut rng) {
            Ok(layout) => layout,
            Err(e) => {
                log::warn!("Random layout rejected: {}", e);
                errors += 1;
                continue;
            }
        };
        match (layout.evaluate(), layout.evaluate()) {
            (Ok(a), Ok(b)) => {
                if a != b || a.geometry.volume.to_bits() != b.geometry.volume.to_bits() {
                    mismatches += 1;
                }
                let well_formed = a.checks.len() == RULES.len() + 1
                    && a.checks
                        .last()
                        .is_some_and(|c| c.message.starts_with("Total zone area"));
                if !well_formed {
                    malformed += 1;
                }
            }
            _ => errors += 1,
        }
    }

    vec![
        check(
            "determinism_identical_reports",
            mismatches == 0,
            format!("{mismatches}/{count} layouts produced differing reports"),
        ),
        check(
            "determinism_report_shape",
            malformed == 0,
            format!("{malformed}/{count} reports malformed"),
        ),
        check(
            "determinism_no_errors",
            errors == 0,
            format!("{errors}/{count} layouts failed to build or evaluate"),
        ),
    ]
}

// ── User layout ─────────────────────────────────────────────────────────

fn load_layout(path: &Path) -> Result<HabitatLayout> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout {}", path.display()))?;
    let layout: HabitatLayout = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse layout {}", path.display()))?;

    let problems = validate_layout(&layout);
    if !problems.is_empty() {
        for p in &problems {
            log::warn!("{}: {}", path.display(), p);
        }
        bail!(
            "layout {} has {} problem(s)",
            path.display(),
            problems.len()
        );
    }
    log::info!(
        "Loaded layout {} ({} zones)",
        path.display(),
        layout.zones.len()
    );
    Ok(layout)
}

fn print_report(layout: &HabitatLayout) -> Result<()> {
    let report = layout.evaluate()?;
    let (primary, secondary) = layout.shape.kind.dimension_labels();

    println!("\n--- Layout ---");
    println!(
        "  {}: {} {} m, {} {} m",
        layout.shape.kind.label(),
        primary,
        layout.shape.primary_dimension,
        secondary,
        layout.shape.secondary_dimension
    );
    println!(
        "  crew {}, {} days",
        layout.mission.crew_size, layout.mission.mission_days
    );
    println!(
        "  volume {:.1} m³, floor area {:.1} m²",
        report.geometry.volume, report.geometry.floor_area
    );
    for c in &report.checks {
        let icon = if c.ok { "✓" } else { "✗" };
        println!("  {} {}", icon, c.message);
    }
    println!(
        "  {} passed, {} failed",
        report.summary.passed, report.summary.failed
    );
    Ok(())
}

fn write_export(layout: &HabitatLayout, path: &Path) -> Result<()> {
    let json = ExportDocument::from_layout(layout)?.to_json_pretty()?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("Wrote export to {}", path.display());
    Ok(())
}
