mod dump;
mod mux;
mod nvm;
mod probe;
mod raw;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    color: colorchoice_clap::Color,

    #[command(subcommand)]
    command: Commands,

    /// Output plain JSON without color and interactivity
    #[arg(short, long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    Probe(probe::ProbeCommand),
    Dump(dump::DumpCommand),
    Read(raw::ReadCommand),
    Write(raw::WriteCommand),
    SetPtt(mux::SetPttCommand),
    SwapPtt(mux::SwapPttCommand),
    SetButtons(mux::SetButtonsCommand),
    SetUsbId(raw::SetUsbIdCommand),
    Defaults(nvm::DefaultsCommand),
    Recall(nvm::RecallCommand),
    Store(nvm::StoreCommand),
}

pub fn execute() -> Result<()> {
    let cli = Cli::parse();

    cli.color.write_global();

    match &cli.command {
        Commands::Probe(cmd) => cmd.execute(&cli),
        Commands::Dump(cmd) => cmd.execute(&cli),
        Commands::Read(cmd) => cmd.execute(&cli),
        Commands::Write(cmd) => cmd.execute(&cli),
        Commands::SetPtt(cmd) => cmd.execute(&cli),
        Commands::SwapPtt(cmd) => cmd.execute(&cli),
        Commands::SetButtons(cmd) => cmd.execute(&cli),
        Commands::SetUsbId(cmd) => cmd.execute(&cli),
        Commands::Defaults(cmd) => cmd.execute(&cli),
        Commands::Recall(cmd) => cmd.execute(&cli),
        Commands::Store(cmd) => cmd.execute(&cli),
    }
}
