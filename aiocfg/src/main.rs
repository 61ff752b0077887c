use anyhow::Result;

mod cli;
mod hid;

fn main() -> Result<()> {
    cli::execute()
}
