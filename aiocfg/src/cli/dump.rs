use std::io::{BufWriter, Write};

use anyhow::Result;
use clap::Args;
use itertools::Itertools;
use owo_colors::OwoColorize;
use serde_json::json;

use super::Cli;
use crate::hid::open_identified;

/// Dump every known register, primarily for diagnostics.
#[derive(Args)]
pub struct DumpCommand {}

impl DumpCommand {
    pub fn execute(&self, root: &Cli) -> Result<()> {
        let mut stdout = BufWriter::new(anstream::stdout());

        let (_, session) = open_identified()?;
        let dump = session.dump_all()?;

        if root.json {
            let rows: Vec<_> = dump
                .iter()
                .map(|(register, value)| {
                    json!({
                        "address": u8::from(*register),
                        "name": register.name(),
                        "group": register.group(),
                        "value": value,
                    })
                })
                .collect();
            writeln!(stdout, "{}", json!(rows)).unwrap();
            return Ok(());
        }

        let lines = dump
            .iter()
            .map(|(register, value)| {
                format!(
                    "{} {:<13} {}",
                    format!("{:#04x}", u8::from(*register)).bright_black(),
                    register.name(),
                    format!("{value:#010x}").blue(),
                )
            })
            .join("\n");
        writeln!(stdout, "{lines}").unwrap();

        stdout.flush().unwrap();

        Ok(())
    }
}
