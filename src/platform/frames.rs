//! Frame sources
//!
//! A source blocks until the next frame is ready. Failure is fatal: the loop
//! does not retry.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::FrameSourceError;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "ppm"];

/// Sequential color frames
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<RgbImage, FrameSourceError>;
}

/// Still images from a directory, played back in file-name order
#[derive(Debug)]
pub struct ImageSequenceSource {
    pending: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, FrameSourceError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| FrameSourceError::Unavailable {
            reason: format!("{}: {e}", dir.display()),
        })?;

        let mut frames: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_image(path))
            .collect();
        frames.sort();

        if frames.is_empty() {
            return Err(FrameSourceError::Unavailable {
                reason: format!("no frames in {}", dir.display()),
            });
        }
        log::info!("Playing {} frames from {}", frames.len(), dir.display());

        Ok(Self {
            pending: frames.into(),
        })
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<RgbImage, FrameSourceError> {
        let path = self
            .pending
            .pop_front()
            .ok_or_else(|| FrameSourceError::Unavailable {
                reason: "frame sequence exhausted".to_string(),
            })?;
        let frame = image::open(&path).map_err(|e| FrameSourceError::Unavailable {
            reason: format!("{}: {e}", path.display()),
        })?;
        Ok(frame.to_rgb8())
    }
}

/// Frames held in memory
#[derive(Debug, Default)]
pub struct MemoryFrameSource {
    frames: VecDeque<RgbImage>,
}

impl MemoryFrameSource {
    pub fn new(frames: impl IntoIterator<Item = RgbImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FrameSource for MemoryFrameSource {
    fn next_frame(&mut self) -> Result<RgbImage, FrameSourceError> {
        self.frames
            .pop_front()
            .ok_or_else(|| FrameSourceError::Unavailable {
                reason: "no more frames".to_string(),
            })
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
