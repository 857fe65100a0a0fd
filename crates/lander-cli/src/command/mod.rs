use clap::{Parser, Subcommand};

use self::{topology::TopologyArg, train::TrainArg};

mod topology;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve autopilots against the built-in stand-in lander
    Train(#[clap(flatten)] TrainArg),
    /// Show the gene layout of a network topology
    Topology(#[clap(flatten)] TopologyArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Topology(arg) => topology::run(&arg)?,
    }
    Ok(())
}
