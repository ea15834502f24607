use anyhow::{Context, Result};

use fibre_forge::{
    BeadType, CrosslinkConfig, GenerationConfig, NetworkType, PlacementConfig, Stage, load_config,
};

use crate::cli::{DirectedArgs, OutputOptions, RandomArgs, RunArgs};
use crate::config::{build_directed_config, build_random_config};
use crate::display::{Context as DisplayContext, Progress, print_bond_types, print_network_summary};
use crate::io::{read_config, write_network};

const PLACE_STEP: &str = "Placing strands";
const PIN_STEP: &str = "Pinning boundary beads";
const LINK_STEP: &str = "Distributing crosslinks";
const WRITE_STEP: &str = "Writing output";

pub fn run_random(args: RandomArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_random_config(&args);
    generate_and_write(&config, &args.output, ctx)
}

pub fn run_directed(args: DirectedArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_directed_config(&args);
    generate_and_write(&config, &args.output, ctx)
}

pub fn run_config(args: RunArgs, ctx: DisplayContext) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => load_config(None).context("Built-in configuration is invalid")?,
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    generate_and_write(&config, &args.output, ctx)
}

fn generate_and_write(
    config: &GenerationConfig,
    output: &OutputOptions,
    ctx: DisplayContext,
) -> Result<()> {
    let crosslinking = config.crosslink != CrosslinkConfig::None;
    let total_steps = if crosslinking { 4 } else { 3 };

    let network_type =
        NetworkType::from_config(config).context("Invalid generation parameters")?;

    let mut progress = Progress::new(ctx.interactive, total_steps);
    progress.step(PLACE_STEP);

    let place_substeps = build_place_substeps(config);
    let link_substeps = build_link_substeps(&config.crosslink);

    let mut network = network_type
        .generate_with(|stage, net| match stage {
            Stage::StrandsBuilt => {
                let substeps: Vec<&str> = place_substeps.iter().map(String::as_str).collect();
                progress.complete_step(PLACE_STEP, &substeps);
                progress.step(PIN_STEP);
            }
            Stage::BoundariesFixed => {
                let pinned = net.count_beads_of_type(&BeadType::Boundary);
                let summary = format!("{} of {} beads pinned", pinned, net.bead_count());
                progress.complete_step(PIN_STEP, &[summary.as_str()]);
                if crosslinking {
                    progress.step(LINK_STEP);
                }
            }
            Stage::Crosslinked => {
                let substeps: Vec<&str> = link_substeps.iter().map(String::as_str).collect();
                progress.complete_step(LINK_STEP, &substeps);
            }
            Stage::Complete => {}
        })
        .context("Network generation failed")?;

    if let Some(degrees) = output.rotate {
        network.rotate(degrees.to_radians());
    }

    if ctx.interactive {
        print_network_summary(&network);
        print_bond_types(&network);
    }

    progress.step(WRITE_STEP);
    write_network(&network, output.output.as_deref())?;
    let target = describe_target(output);
    progress.complete_step(WRITE_STEP, &[target.as_str()]);

    progress.finish();

    Ok(())
}

fn build_place_substeps(config: &GenerationConfig) -> Vec<String> {
    let strands = &config.strands;
    let placement = match &config.placement {
        PlacementConfig::Uniform => "Uniform anchors, isotropic angles".to_string(),
        PlacementConfig::Directional {
            mean_angle,
            concentration,
        } => format!(
            "Von Mises angles (mean {:.1}°, κ = {})",
            mean_angle.to_degrees(),
            concentration
        ),
        PlacementConfig::Deterministic { .. } => "Fixed anchors and angles".to_string(),
    };
    let seed = match config.seed {
        Some(seed) => format!("Seed {}", seed),
        None => "Seed from OS entropy".to_string(),
    };

    vec![
        format!(
            "{} strands × {} beads (contour {})",
            strands.strand_count, strands.beads_per_strand, strands.contour_length
        ),
        placement,
        seed,
    ]
}

fn build_link_substeps(crosslink: &CrosslinkConfig) -> Vec<String> {
    match crosslink {
        CrosslinkConfig::None => Vec::new(),
        CrosslinkConfig::Density {
            max_radius,
            max_candidates,
            bin_size,
            ..
        } => vec![
            format!("Pairs within r ≤ {} on different strands", max_radius),
            format!("At most {} candidates, bin width {:.3}", max_candidates, bin_size),
        ],
        CrosslinkConfig::TipToTail { bond_type } => {
            vec![format!("Strands joined end to end ('{}')", bond_type)]
        }
    }
}

pub fn describe_target(output: &OutputOptions) -> String {
    let path = output
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    match output.rotate {
        Some(degrees) => format!("JSON → {} (rotated {}°)", path, degrees),
        None => format!("JSON → {}", path),
    }
}
