//! Protect the Base entry point
//!
//! Usage: `protect-the-base [settings.txt] [frames_dir] [tuning.json]`
//!
//! A missing tuning file means stock values; a missing calibration is fatal.

use anyhow::{Context, Result};

use std::path::Path;

use protect_the_base::calibration::SETTINGS_FILE;
use protect_the_base::effects::{LightingNotifier, LoggingBridge};
use protect_the_base::platform::{self, ImageSequenceSource};
use protect_the_base::sim::GameSession;

const TUNING_FILE: &str = "tuning.json";

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Protect the Base starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| SETTINGS_FILE.to_string());
    let frames_dir = args.next().unwrap_or_else(|| "frames".to_string());
    let tuning_path = args.next().unwrap_or_else(|| TUNING_FILE.to_string());

    let (range, settings) = platform::load_config(Path::new(&settings_path), Path::new(&tuning_path))
        .context("cannot start without a valid configuration")?;

    let lights = LightingNotifier::spawn(LoggingBridge::default(), settings.light_group);
    lights.set_lights_on(true);

    let mut session = GameSession::new(range, settings, Box::new(lights));
    let mut source = ImageSequenceSource::open(&frames_dir).context("no video source found")?;

    let summary = platform::run(&mut session, &mut source).context("video source lost")?;
    println!(
        "GAME OVER after {} ticks: {} boxes destroyed, {} lives left",
        summary.ticks, summary.boxes_destroyed, summary.lives
    );
    Ok(())
}
