use std::io::{BufWriter, Write};

use aioc::register::{Register, lookup};
use anyhow::{Context, Result, anyhow};
use clap::Args;
use owo_colors::OwoColorize;
use serde_json::json;

use super::Cli;
use crate::hid::open_identified;

/// Read a single register.
#[derive(Args)]
pub struct ReadCommand {
    /// Hexadecimal register address, e.g. 0x24
    address: String,
}

impl ReadCommand {
    pub fn execute(&self, root: &Cli) -> Result<()> {
        let mut stdout = BufWriter::new(anstream::stdout());

        let register = parse_register(&self.address)?;
        let (_, session) = open_identified()?;
        let value = session.read_register(register)?;

        if root.json {
            writeln!(
                stdout,
                "{}",
                json!({
                    "address": u8::from(register),
                    "name": register.name(),
                    "value": value,
                })
            )
            .unwrap();
            return Ok(());
        }

        write_register_line(&mut stdout, register, value);
        stdout.flush().unwrap();

        Ok(())
    }
}

/// Write a single register and read the result back.
#[derive(Args)]
pub struct WriteCommand {
    /// Hexadecimal register address, e.g. 0x24
    address: String,

    /// Hexadecimal 32-bit value, e.g. 0x200
    value: String,
}

impl WriteCommand {
    pub fn execute(&self, _root: &Cli) -> Result<()> {
        let mut stdout = BufWriter::new(anstream::stdout());

        let register = parse_register(&self.address)?;
        let value = parse_hex(&self.value)?;

        let (_, session) = open_identified()?;
        session.write_register(register, value)?;

        // The write strobe gives no confirmation of its own.
        let now = session.read_register(register)?;
        write_register_line(&mut stdout, register, now);
        stdout.flush().unwrap();

        Ok(())
    }
}

/// Override the USB identity the adapter enumerates with.
///
/// Use with caution: after the next replug the adapter no longer matches
/// the IDs this tool searches for.
#[derive(Args)]
pub struct SetUsbIdCommand {
    /// Hexadecimal vendor ID, e.g. 0x1209
    vid: String,

    /// Hexadecimal product ID, e.g. 0x7388
    pid: String,
}

impl SetUsbIdCommand {
    pub fn execute(&self, _root: &Cli) -> Result<()> {
        let mut stdout = BufWriter::new(anstream::stdout());

        let vid = parse_hex_u16(&self.vid)?;
        let pid = parse_hex_u16(&self.pid)?;
        let value = u32::from(vid) | u32::from(pid) << 16;

        let (_, session) = open_identified()?;
        session.write_register(Register::UsbId, value)?;

        let now = session.read_register(Register::UsbId)?;
        write_register_line(&mut stdout, Register::UsbId, now);
        stdout.flush().unwrap();

        Ok(())
    }
}

fn write_register_line(
    stdout: &mut BufWriter<anstream::AutoStream<std::io::Stdout>>,
    register: Register,
    value: u32,
) {
    writeln!(
        stdout,
        "{} {}: {}",
        format!("{:#04x}", u8::from(register)).bright_black(),
        register.name(),
        format!("{value:#010x}").blue(),
    )
    .unwrap();
}

fn parse_hex(s: &str) -> Result<u32> {
    let digits = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).with_context(|| format!("invalid hexadecimal value: {s}"))
}

fn parse_hex_u16(s: &str) -> Result<u16> {
    u16::try_from(parse_hex(s)?).map_err(|_| anyhow!("value does not fit into 16 bits: {s}"))
}

fn parse_register(s: &str) -> Result<Register> {
    let address = u8::try_from(parse_hex(s)?)
        .map_err(|_| anyhow!("register addresses are one byte: {s}"))?;

    lookup(address)
        .map(|known| known.register)
        .ok_or_else(|| anyhow!("address {address:#04x} is not in the register catalog"))
}
