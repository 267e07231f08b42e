// quackrun/src/commands/presets.rs
//
// USE CASE: List available presets.

use std::io::{self, Write};

use quackrun_core::QuackError;
use quackrun_core::infrastructure::config::Settings;

pub fn execute(settings: &Settings) -> Result<(), QuackError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_presets(settings, &mut out)?;
    Ok(())
}

fn write_presets(settings: &Settings, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "📚 Available presets:")?;
    for preset in settings.presets.iter() {
        let origin = if preset.builtin { "built-in" } else { "config" };
        writeln!(
            out,
            "   {:<16} {} ({}, {} step{})",
            preset.name,
            preset.description,
            origin,
            preset.steps.len(),
            if preset.steps.len() == 1 { "" } else { "s" }
        )?;
    }
    Ok(())
}
