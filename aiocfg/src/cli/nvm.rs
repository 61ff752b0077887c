use std::io::{BufWriter, Write};

use aioc::frame::Command;
use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use super::Cli;
use crate::hid::open_identified;

/// Reinitialize the register file with the factory defaults.
#[derive(Args)]
pub struct DefaultsCommand {}

impl DefaultsCommand {
    pub fn execute(&self, _root: &Cli) -> Result<()> {
        send(Command::DEFAULTS, "Factory defaults loaded.")
    }
}

/// Reload the register file from the non-volatile store.
#[derive(Args)]
pub struct RecallCommand {}

impl RecallCommand {
    pub fn execute(&self, _root: &Cli) -> Result<()> {
        send(Command::RECALL, "Stored configuration recalled.")
    }
}

/// Persist the current register file to the non-volatile store.
#[derive(Args)]
pub struct StoreCommand {}

impl StoreCommand {
    pub fn execute(&self, _root: &Cli) -> Result<()> {
        send(Command::STORE, "Configuration stored to flash.")
    }
}

fn send(command: Command, done: &str) -> Result<()> {
    let mut stdout = BufWriter::new(anstream::stdout());

    let (_, session) = open_identified()?;
    session.send_command(command)?;

    // The device acts on the command asynchronously and reports no
    // completion, so this only confirms that the report went out.
    writeln!(stdout, "{}", done.green()).unwrap();
    stdout.flush().unwrap();

    Ok(())
}
