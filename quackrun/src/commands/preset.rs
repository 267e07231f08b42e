// quackrun/src/commands/preset.rs
//
// USE CASE: Run a named preset (list-contents, top-customers, counts, user presets).

use std::io;

use quackrun_core::QuackError;
use quackrun_core::application::run_preset;
use quackrun_core::infrastructure::config::Settings;

pub fn execute(settings: &Settings, name: &str) -> Result<(), QuackError> {
    let preset = settings.presets.get(name)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_preset(&settings.runner, preset, &mut out)?;
    Ok(())
}
