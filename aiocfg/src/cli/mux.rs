use std::io::{BufWriter, Write};

use aioc::{
    mux::{ButtonSource, PttSource},
    register::{Button, PttLine},
};
use anyhow::{Result, bail};
use clap::Args;
use owo_colors::OwoColorize;

use super::Cli;
use crate::hid::open_identified;

/// Route source sets to the PTT outputs.
#[derive(Args)]
pub struct SetPttCommand {
    /// Sources for PTT1, e.g. "SERIAL_RTS | CM108_GPIO3", or NONE
    #[arg(long)]
    ptt1: Option<PttSource>,

    /// Sources for PTT2
    #[arg(long)]
    ptt2: Option<PttSource>,
}

impl SetPttCommand {
    pub fn execute(&self, _root: &Cli) -> Result<()> {
        if self.ptt1.is_none() && self.ptt2.is_none() {
            bail!("nothing to do, pass --ptt1 and/or --ptt2");
        }

        let mut stdout = BufWriter::new(anstream::stdout());
        let (_, session) = open_identified()?;

        let lines = [(PttLine::Ptt1, self.ptt1), (PttLine::Ptt2, self.ptt2)];
        for (line, sources) in lines {
            let Some(sources) = sources else {
                continue;
            };
            session.set_ptt_source(line, sources)?;
        }

        write_ptt_state(&mut stdout, &session)?;
        stdout.flush().unwrap();

        Ok(())
    }
}

/// Exchange the routing of the two PTT outputs.
#[derive(Args)]
pub struct SwapPttCommand {}

impl SwapPttCommand {
    pub fn execute(&self, _root: &Cli) -> Result<()> {
        let mut stdout = BufWriter::new(anstream::stdout());
        let (_, session) = open_identified()?;

        let ptt1 = session.ptt_source(PttLine::Ptt1)?;
        let ptt2 = session.ptt_source(PttLine::Ptt2)?;
        session.set_ptt_source(PttLine::Ptt1, ptt2)?;
        session.set_ptt_source(PttLine::Ptt2, ptt1)?;

        write_ptt_state(&mut stdout, &session)?;
        stdout.flush().unwrap();

        Ok(())
    }
}

/// Route source sets to the emulated CM108 buttons.
#[derive(Args)]
pub struct SetButtonsCommand {
    /// Sources for button 1, e.g. "IN2 | VCOS", or NONE
    #[arg(long)]
    volume_up: Option<ButtonSource>,

    /// Sources for button 2
    #[arg(long)]
    volume_down: Option<ButtonSource>,

    /// Sources for button 3
    #[arg(long)]
    playback_mute: Option<ButtonSource>,

    /// Sources for button 4
    #[arg(long)]
    record_mute: Option<ButtonSource>,
}

impl SetButtonsCommand {
    pub fn execute(&self, _root: &Cli) -> Result<()> {
        let buttons = [
            (Button::VolumeUp, "VolumeUp", self.volume_up),
            (Button::VolumeDown, "VolumeDown", self.volume_down),
            (Button::PlaybackMute, "PlaybackMute", self.playback_mute),
            (Button::RecordMute, "RecordMute", self.record_mute),
        ];

        if buttons.iter().all(|(_, _, sources)| sources.is_none()) {
            bail!("nothing to do, pass at least one of the --* source options");
        }

        let mut stdout = BufWriter::new(anstream::stdout());
        let (_, session) = open_identified()?;

        for (button, _, sources) in buttons {
            let Some(sources) = sources else {
                continue;
            };
            session.set_button_source(button, sources)?;
        }

        for (button, label, _) in buttons {
            let now = session.button_source(button)?;
            writeln!(stdout, "Now {}: {}", label.bright_blue(), now.green()).unwrap();
        }
        stdout.flush().unwrap();

        Ok(())
    }
}

fn write_ptt_state(
    stdout: &mut BufWriter<anstream::AutoStream<std::io::Stdout>>,
    session: &aioc::session::Session<crate::hid::AiocDevice>,
) -> Result<()> {
    let ptt1 = session.ptt_source(PttLine::Ptt1)?;
    let ptt2 = session.ptt_source(PttLine::Ptt2)?;
    writeln!(stdout, "Now {}: {}", "PTT1".bright_blue(), ptt1.green()).unwrap();
    writeln!(stdout, "Now {}: {}", "PTT2".bright_blue(), ptt2.green()).unwrap();
    Ok(())
}
