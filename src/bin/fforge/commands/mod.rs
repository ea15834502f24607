mod generate;
mod merge;

use generate::{run_config, run_directed, run_random};
use merge::run_merge;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Random(args) => run_random(args, ctx),
        Command::Directed(args) => run_directed(args, ctx),
        Command::Run(args) => run_config(args, ctx),
        Command::Merge(args) => run_merge(args, ctx),
    }
}
