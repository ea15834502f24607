use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fforge",
    about = "Fibrous network topology generation",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate an isotropic network (uniform placement, density crosslinks)
    #[command(visible_alias = "r")]
    Random(RandomArgs),

    /// Generate an aligned network (von Mises placement, density crosslinks)
    #[command(visible_alias = "d")]
    Directed(DirectedArgs),

    /// Generate a network from a TOML configuration file (or the built-in reference run)
    Run(RunArgs),

    /// Merge two networks written as JSON
    #[command(visible_alias = "m")]
    Merge(MergeArgs),
}

impl Command {
    pub fn output(&self) -> &OutputOptions {
        match self {
            Command::Random(args) => &args.output,
            Command::Directed(args) => &args.output,
            Command::Run(args) => &args.output,
            Command::Merge(args) => &args.output,
        }
    }
}

/// Output options shared by all commands.
#[derive(Args)]
pub struct OutputOptions {
    /// Output JSON file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Rotate the final network about the domain center (counter-clockwise)
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub rotate: Option<f64>,
}

/// Domain size and boundary pinning.
#[derive(Args)]
#[command(next_help_heading = "Domain")]
pub struct DomainOptions {
    /// Domain width
    #[arg(long = "size-x", value_name = "L", default_value = "200.0")]
    pub size_x: f64,

    /// Domain height
    #[arg(long = "size-y", value_name = "L", default_value = "200.0")]
    pub size_y: f64,

    /// Pin beads leaving the domain on any side
    #[arg(long)]
    pub fix_boundary: bool,

    /// Pin beads beyond the top edge
    #[arg(long)]
    pub fix_north: bool,

    /// Pin beads beyond the bottom edge
    #[arg(long)]
    pub fix_south: bool,

    /// Pin beads beyond the right edge
    #[arg(long)]
    pub fix_east: bool,

    /// Pin beads beyond the left edge
    #[arg(long)]
    pub fix_west: bool,
}

/// Strand count and geometry.
#[derive(Args)]
#[command(next_help_heading = "Strands")]
pub struct StrandOptions {
    /// Number of strands
    #[arg(short = 'n', long = "strands", value_name = "N", default_value = "100")]
    pub strand_count: usize,

    /// Beads per strand (at least 2)
    #[arg(short = 'b', long = "beads", value_name = "N", default_value = "9")]
    pub beads_per_strand: usize,

    /// End-to-end length of a strand
    #[arg(long = "contour-length", value_name = "L", default_value = "50.0")]
    pub contour_length: f64,

    /// Random seed (OS entropy if omitted)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

/// Radius-based crosslinking.
#[derive(Args)]
#[command(next_help_heading = "Crosslinks")]
pub struct CrosslinkOptions {
    /// Largest bead separation that can be crosslinked
    #[arg(long = "max-radius", value_name = "R", default_value = "1.0")]
    pub max_radius: f64,

    /// Upper bound on proposed crosslinks
    #[arg(long = "max-crosslinks", value_name = "N", default_value = "50")]
    pub max_candidates: usize,

    /// Width of the distance bins defining crosslink types
    #[arg(long = "bin-size", value_name = "W", default_value = "0.3333333333333333")]
    pub bin_size: f64,

    /// Spring constant of every crosslink type
    #[arg(long = "spring-constant", value_name = "K", default_value = "1.0")]
    pub spring_constant: f64,

    /// Skip crosslinking entirely
    #[arg(long)]
    pub no_crosslinks: bool,
}

#[derive(Args)]
pub struct RandomArgs {
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub domain: DomainOptions,

    #[command(flatten)]
    pub strands: StrandOptions,

    #[command(flatten)]
    pub crosslink: CrosslinkOptions,
}

#[derive(Args)]
pub struct DirectedArgs {
    #[command(flatten)]
    pub output: OutputOptions,

    /// Preferred strand orientation
    #[arg(
        long = "mean-angle",
        value_name = "DEG",
        default_value = "0.0",
        allow_hyphen_values = true
    )]
    pub mean_angle: f64,

    /// Von Mises concentration (0 gives isotropic orientations)
    #[arg(long, value_name = "KAPPA", default_value = "1.0")]
    pub concentration: f64,

    #[command(flatten)]
    pub domain: DomainOptions,

    #[command(flatten)]
    pub strands: StrandOptions,

    #[command(flatten)]
    pub crosslink: CrosslinkOptions,
}

#[derive(Args)]
pub struct RunArgs {
    /// TOML configuration file (built-in reference configuration if omitted)
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured seed
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Args)]
pub struct MergeArgs {
    /// First network (its domain is kept)
    #[arg(value_name = "FIRST")]
    pub first: PathBuf,

    /// Second network (bead ids are shifted)
    #[arg(value_name = "SECOND")]
    pub second: PathBuf,

    /// Only reject shared types whose spring constant and rest length both differ
    #[arg(long)]
    pub legacy_conflict_check: bool,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn parse() -> Cli {
    Cli::parse()
}
