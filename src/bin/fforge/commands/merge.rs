use anyhow::{Context, Result};

use fibre_forge::{ConflictPolicy, Network};

use crate::cli::MergeArgs;
use crate::commands::generate::describe_target;
use crate::display::{Context as DisplayContext, Progress, print_bond_types, print_network_summary};
use crate::io::{read_network, write_network};

const TOTAL_STEPS: u8 = 3;

pub fn run_merge(args: MergeArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading networks");
    let first = read_network(&args.first)?;
    let second = read_network(&args.second)?;
    let read_substeps = [
        format!("{}: {} beads", args.first.display(), first.bead_count()),
        format!("{}: {} beads", args.second.display(), second.bead_count()),
    ];
    let read_substeps_ref: Vec<&str> = read_substeps.iter().map(String::as_str).collect();
    progress.complete_step("Reading networks", &read_substeps_ref);

    progress.step("Merging");
    let policy = if args.legacy_conflict_check {
        ConflictPolicy::BothMismatch
    } else {
        ConflictPolicy::AnyMismatch
    };
    let mut merged =
        Network::merge_with(&first, &second, policy).context("Networks cannot be merged")?;
    let policy_step = match policy {
        ConflictPolicy::AnyMismatch => "Shared types must agree exactly",
        ConflictPolicy::BothMismatch => "Shared types may differ in one constant",
    };
    progress.complete_step("Merging", &[policy_step]);

    if let Some(degrees) = args.output.rotate {
        merged.rotate(degrees.to_radians());
    }

    if ctx.interactive {
        print_network_summary(&merged);
        print_bond_types(&merged);
    }

    progress.step("Writing output");
    write_network(&merged, args.output.output.as_deref())?;
    let target = describe_target(&args.output);
    progress.complete_step("Writing output", &[target.as_str()]);

    progress.finish();

    Ok(())
}
