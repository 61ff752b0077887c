use std::io::{BufWriter, Write};

use aioc::{
    mux::{ButtonSource, PttSource},
    register::{Button, PttLine},
};
use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

use super::Cli;
use crate::hid::{DeviceStrings, open_identified};

/// View general information about the connected adapter and its current
/// signal routing.
#[derive(Args)]
pub struct ProbeCommand {}

impl ProbeCommand {
    pub fn execute(&self, root: &Cli) -> Result<()> {
        let mut stdout = BufWriter::new(anstream::stdout());

        let adapter = probe_adapter()?;

        if root.json {
            writeln!(stdout, "{}", json!(adapter)).unwrap();
            return Ok(());
        }

        writeln!(
            stdout,
            "{}: {}",
            "Manufacturer".bright_black(),
            adapter.strings.manufacturer.as_deref().unwrap_or("<unknown>")
        )
        .unwrap();
        writeln!(
            stdout,
            "{}: {}",
            "Product".bright_black(),
            adapter.strings.product.as_deref().unwrap_or("<unknown>")
        )
        .unwrap();
        writeln!(
            stdout,
            "{}: {}",
            "Serial No".bright_black(),
            adapter.strings.serial.as_deref().unwrap_or("<unknown>")
        )
        .unwrap();
        writeln!(stdout, "{}: {}", "Magic".bright_black(), adapter.magic.green()).unwrap();

        writeln!(stdout).unwrap();
        writeln!(stdout, "PTT outputs").unwrap();
        write_source_line(&mut stdout, " ├─", "PTT1", adapter.ptt1.to_string());
        write_source_line(&mut stdout, " ╰─", "PTT2", adapter.ptt2.to_string());

        writeln!(stdout).unwrap();
        writeln!(stdout, "CM108 buttons").unwrap();
        write_source_line(&mut stdout, " ├─", "VolumeUp", adapter.volume_up.to_string());
        write_source_line(&mut stdout, " ├─", "VolumeDown", adapter.volume_down.to_string());
        write_source_line(&mut stdout, " ├─", "PlaybackMute", adapter.playback_mute.to_string());
        write_source_line(&mut stdout, " ╰─", "RecordMute", adapter.record_mute.to_string());

        stdout.flush().unwrap();

        Ok(())
    }
}

fn write_source_line(
    stdout: &mut BufWriter<anstream::AutoStream<std::io::Stdout>>,
    glyph: &str,
    label: &str,
    rendered: String,
) {
    writeln!(
        stdout,
        "{} {}: {}",
        glyph,
        label.bright_blue(),
        if rendered == "NONE" {
            rendered.bright_black().italic().to_string()
        } else {
            rendered.green().to_string()
        }
    )
    .unwrap();
}

fn probe_adapter() -> Result<ProbedAdapter> {
    let (strings, session) = open_identified()?;

    Ok(ProbedAdapter {
        strings,
        magic: String::from_utf8_lossy(&aioc::session::MAGIC).into_owned(),
        ptt1: session.ptt_source(PttLine::Ptt1)?,
        ptt2: session.ptt_source(PttLine::Ptt2)?,
        volume_up: session.button_source(Button::VolumeUp)?,
        volume_down: session.button_source(Button::VolumeDown)?,
        playback_mute: session.button_source(Button::PlaybackMute)?,
        record_mute: session.button_source(Button::RecordMute)?,
    })
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
struct ProbedAdapter {
    #[serde(flatten)]
    strings: DeviceStrings,
    magic: String,
    ptt1: PttSource,
    ptt2: PttSource,
    volume_up: ButtonSource,
    volume_down: ButtonSource,
    playback_mute: ButtonSource,
    record_mute: ButtonSource,
}
