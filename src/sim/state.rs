//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable box identifier, never reused within a session
pub type BoxId = u32;

/// A falling box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingBox {
    pub id: BoxId,
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Cosmetic sprite rotation, degrees in [0, 360)
    pub rotation: u16,
    pub color: [u8; 3],
    /// Sprite edge length
    pub size: f32,
    /// Transparent sprite margin excluded from collisions
    pub padding: f32,
}

impl FallingBox {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn collision_radius(&self) -> f32 {
        (self.size - self.padding) / 2.0
    }

    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % 360;
    }
}

/// The base the player defends. Never moves, only spins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeBase {
    pub pos: Vec2,
    pub rotation: u16,
    pub color: [u8; 3],
    pub padding: f32,
}

impl HomeBase {
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % 360;
    }
}

/// Outcome of collision resolution, applied by the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball struck a box
    BoxHit { box_id: BoxId, impact_point: Vec2 },
    /// Box got through to the home base
    BoxReachedBase { box_id: BoxId },
}

impl GameEvent {
    pub fn box_id(&self) -> BoxId {
        match *self {
            GameEvent::BoxHit { box_id, .. } | GameEvent::BoxReachedBase { box_id } => box_id,
        }
    }
}

/// Lives and run flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub lives: u32,
    pub running: bool,
    /// Boxes the player knocked out
    pub boxes_destroyed: u32,
}

impl GameState {
    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            running: lives > 0,
            boxes_destroyed: 0,
        }
    }

    /// Apply one event. Losing the last life ends the run.
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BoxHit { .. } => {
                self.boxes_destroyed += 1;
            }
            GameEvent::BoxReachedBase { .. } => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 && self.running {
                    self.running = false;
                    log::info!("GAME OVER ({} boxes destroyed)", self.boxes_destroyed);
                }
            }
        }
    }

    /// External quit signal
    pub fn quit(&mut self) {
        self.running = false;
    }
}
