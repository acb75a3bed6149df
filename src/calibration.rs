//! Color range calibration
//!
//! Persisted by the calibration tool as plain `key => value` lines:
//!
//! ```text
//! v1_min => 29
//! v2_min => 86
//! v3_min => 6
//! v1_max => 64
//! v2_max => 255
//! v3_max => 255
//! ```
//!
//! The game refuses to start without a valid range; there are no defaults.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Default file name shared by the calibration tool and the game
pub const SETTINGS_FILE: &str = "settings.txt";

const SEPARATOR: &str = " => ";
const MIN_KEYS: [&str; 3] = ["v1_min", "v2_min", "v3_min"];
const MAX_KEYS: [&str; 3] = ["v1_max", "v2_max", "v3_max"];

/// Inclusive per-channel HSV threshold band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRangeConfig {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRangeConfig {
    /// Build a range, rejecting any channel where `lower > upper`
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Result<Self, ConfigError> {
        for i in 0..3 {
            if lower[i] > upper[i] {
                return Err(ConfigError::Malformed {
                    key: MIN_KEYS[i],
                    reason: format!("lower bound {} exceeds upper bound {}", lower[i], upper[i]),
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Load the range from a settings file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        log::info!(
            "Loaded color range {:?}..={:?} from {}",
            config.lower,
            config.upper,
            path.display()
        );
        Ok(config)
    }

    /// Parse the six `vN_min` / `vN_max` lines. A key seen twice keeps its last value.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut lower: [Option<u8>; 3] = [None; 3];
        let mut upper: [Option<u8>; 3] = [None; 3];

        for line in text.lines() {
            for (i, key) in MIN_KEYS.iter().enumerate() {
                if let Some(raw) = value_for(line, key) {
                    lower[i] = Some(parse_channel(key, raw)?);
                }
            }
            for (i, key) in MAX_KEYS.iter().enumerate() {
                if let Some(raw) = value_for(line, key) {
                    upper[i] = Some(parse_channel(key, raw)?);
                }
            }
        }

        Self::new(require(lower, &MIN_KEYS)?, require(upper, &MAX_KEYS)?)
    }

    /// Render the range in the exact on-disk schema
    pub fn to_settings_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in MIN_KEYS.iter().zip(self.lower) {
            out.push_str(&format!("{key}{SEPARATOR}{value}\n"));
        }
        for (key, value) in MAX_KEYS.iter().zip(self.upper) {
            out.push_str(&format!("{key}{SEPARATOR}{value}\n"));
        }
        out
    }

    /// Write the range back to disk (what the calibration tool does on save)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path.as_ref(), self.to_settings_string())?;
        log::info!("Color range saved to {}", path.as_ref().display());
        Ok(())
    }

    /// True if every channel lies inside its band
    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }
}

fn value_for<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)?.strip_prefix(SEPARATOR)
}

fn parse_channel(key: &'static str, raw: &str) -> Result<u8, ConfigError> {
    let raw = raw.trim();
    let value: i64 = raw.parse().map_err(|_| ConfigError::Malformed {
        key,
        reason: format!("`{raw}` is not an integer"),
    })?;
    u8::try_from(value).map_err(|_| ConfigError::Malformed {
        key,
        reason: format!("{value} is outside 0..=255"),
    })
}

fn require(values: [Option<u8>; 3], keys: &[&'static str; 3]) -> Result<[u8; 3], ConfigError> {
    let mut out = [0u8; 3];
    for i in 0..3 {
        out[i] = values[i].ok_or_else(|| ConfigError::Malformed {
            key: keys[i],
            reason: "missing".to_string(),
        })?;
    }
    Ok(out)
}
