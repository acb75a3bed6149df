//! Platform layer
//!
//! Frame acquisition and the blocking driver loop.

pub mod frames;

pub use frames::{FrameSource, ImageSequenceSource, MemoryFrameSource};

use std::path::Path;

use crate::calibration::ColorRangeConfig;
use crate::error::{FrameSourceError, GameError};
use crate::settings::GameSettings;
use crate::sim::GameSession;

/// How a finished run went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub lives: u32,
    pub boxes_destroyed: u32,
}

/// Load the mandatory calibration and the tuning file, if there is one
pub fn load_config(calibration: &Path, tuning: &Path) -> Result<(ColorRangeConfig, GameSettings), GameError> {
    let range = ColorRangeConfig::load(calibration)?;
    let settings = GameSettings::load_or_default(tuning)?;
    Ok((range, settings))
}

/// Pull frames and tick until the game ends
///
/// A frame source failure ends the loop immediately with the error.
pub fn run(session: &mut GameSession, source: &mut dyn FrameSource) -> Result<RunSummary, FrameSourceError> {
    while session.is_running() {
        let frame = source.next_frame().inspect_err(|e| log::error!("{e}"))?;
        session.tick(&frame);
    }

    let state = session.state();
    Ok(RunSummary {
        ticks: session.ticks(),
        lives: state.lives,
        boxes_destroyed: state.boxes_destroyed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, SettingsError};
    use image::{Rgb, RgbImage};

    fn session() -> GameSession {
        let range = ColorRangeConfig::new([0, 200, 200], [5, 255, 255]).unwrap();
        let settings = GameSettings {
            field_width: 64,
            field_height: 48,
            ..GameSettings::default()
        };
        GameSession::headless(range, settings)
    }

    #[test]
    fn test_exhausted_source_is_fatal() {
        let mut session = session();
        let frames = (0..3).map(|_| RgbImage::from_pixel(64, 48, Rgb([0, 0, 0])));
        let mut source = MemoryFrameSource::new(frames);

        let err = run(&mut session, &mut source).unwrap_err();
        assert!(matches!(err, FrameSourceError::Unavailable { .. }));
        assert_eq!(session.ticks(), 3);
    }

    #[test]
    fn test_stopped_session_reads_nothing() {
        let mut session = session();
        session.quit();
        let mut source = MemoryFrameSource::default();
        let summary = run(&mut session, &mut source).unwrap();
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.lives, 10);
    }

    #[test]
    fn test_missing_calibration_stops_startup() {
        let path = std::env::temp_dir().join("protect_the_base_missing_calibration.txt");
        let tuning = std::env::temp_dir().join("protect_the_base_no_such_tuning.json");
        let err = load_config(&path, &tuning).unwrap_err();
        assert!(matches!(err, GameError::Config(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_config_with_default_tuning() {
        let path = std::env::temp_dir().join(format!(
            "protect_the_base_calibration_{}.txt",
            std::process::id()
        ));
        let range = ColorRangeConfig::new([1, 2, 3], [4, 5, 6]).unwrap();
        range.save(&path).unwrap();

        let tuning = std::env::temp_dir().join("protect_the_base_no_such_tuning.json");
        let (loaded, settings) = load_config(&path, &tuning).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, range);
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn test_invalid_tuning_stops_startup() {
        let dir = std::env::temp_dir();
        let calibration = dir.join(format!("protect_the_base_cal_{}.txt", std::process::id()));
        let tuning = dir.join(format!("protect_the_base_tuning_{}.json", std::process::id()));
        ColorRangeConfig::new([1, 2, 3], [4, 5, 6])
            .unwrap()
            .save(&calibration)
            .unwrap();
        std::fs::write(&tuning, r#"{ "box_speed": -1.0 }"#).unwrap();

        let err = load_config(&calibration, &tuning).unwrap_err();
        let _ = std::fs::remove_file(&calibration);
        let _ = std::fs::remove_file(&tuning);
        assert!(matches!(err, GameError::Settings(SettingsError::Invalid { .. })));
    }
}
