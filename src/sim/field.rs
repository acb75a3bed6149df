//! Box field: spawning, spinning and homing of the falling boxes
//!
//! Boxes live in an ordered map keyed by id so iteration order is stable and
//! removals never shift other boxes. The field itself never removes a box;
//! that only happens when the session applies a collision event.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;

use super::state::{BoxId, FallingBox, HomeBase};
use crate::consts::{SPAWN_BAND, SPAWN_WIDTH_MAX, SPAWN_WIDTH_MIN};
use crate::settings::GameSettings;

/// Field tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub max_boxes: usize,
    pub box_speed: f32,
    pub target: Vec2,
    pub spawn_padding: f32,
    pub box_size: f32,
    pub box_padding: f32,
    pub home_padding: f32,
    pub home_size: f32,
}

impl From<&GameSettings> for FieldParams {
    fn from(s: &GameSettings) -> Self {
        Self {
            max_boxes: s.max_boxes,
            box_speed: s.box_speed,
            target: s.target,
            spawn_padding: s.spawn_padding,
            box_size: s.box_size,
            box_padding: s.box_padding,
            home_padding: s.home_padding,
            home_size: s.home_size,
        }
    }
}

/// Owner of every live box and the home base
#[derive(Debug, Clone)]
pub struct BoxField {
    params: FieldParams,
    boxes: BTreeMap<BoxId, FallingBox>,
    home: Option<HomeBase>,
    next_id: BoxId,
}

impl BoxField {
    pub fn new(params: FieldParams) -> Self {
        Self {
            params,
            boxes: BTreeMap::new(),
            home: None,
            next_id: 1,
        }
    }

    /// Live boxes in id order
    pub fn boxes(&self) -> impl Iterator<Item = &FallingBox> {
        self.boxes.values()
    }

    pub fn get(&self, id: BoxId) -> Option<&FallingBox> {
        self.boxes.get(&id)
    }

    pub fn home(&self) -> Option<&HomeBase> {
        self.home.as_ref()
    }

    /// Remove a box; an id that is already gone is a no-op
    pub fn remove(&mut self, id: BoxId) -> Option<FallingBox> {
        self.boxes.remove(&id)
    }

    /// Place a box at an explicit position (scripted waves, tests)
    pub fn insert_box(&mut self, pos: Vec2, color: [u8; 3]) -> BoxId {
        let id = self.next_id;
        self.next_id += 1;
        self.boxes.insert(
            id,
            FallingBox {
                id,
                pos,
                rotation: 0,
                color,
                size: self.params.box_size,
                padding: self.params.box_padding,
            },
        );
        id
    }

    /// One tick: top up boxes, spin the base, spin and home every box
    pub fn advance<R: Rng>(&mut self, field_width: f32, field_height: f32, rng: &mut R) {
        if self.boxes.len() < self.params.max_boxes {
            let id = self.spawn_box(field_width, rng);
            log::debug!("Spawned box {id}");
        }

        match self.home.as_mut() {
            Some(home) => home.rotate(),
            None => self.home = Some(self.build_home(field_width, field_height)),
        }

        let FieldParams {
            target, box_speed, ..
        } = self.params;
        for b in self.boxes.values_mut() {
            b.rotate();
            b.pos = homing_step(b.pos, target, box_speed);
        }
    }

    /// Spawn one box near the top edge with a random color and column
    pub fn spawn_box<R: Rng>(&mut self, field_width: f32, rng: &mut R) -> BoxId {
        let pad = self.params.spawn_padding as i32;
        let spawn_width = rng.random_range(SPAWN_WIDTH_MIN..=SPAWN_WIDTH_MAX);
        let x_max = (field_width as i32 - spawn_width).max(-pad);
        let x = rng.random_range(-pad..=x_max);
        let y = rng.random_range(-pad..=SPAWN_BAND + pad);

        let rgb: u32 = rng.random_range(0..=0xFF_FFFF);
        let color = [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8];

        self.insert_box(Vec2::new(x as f32, y as f32), color)
    }

    fn build_home(&self, field_width: f32, field_height: f32) -> HomeBase {
        let p = &self.params;
        HomeBase {
            pos: Vec2::new(
                field_width / 2.0 - p.home_padding,
                field_height / 2.0 + p.home_size / 2.0 - p.home_padding,
            ),
            rotation: 0,
            color: [255, 255, 255],
            padding: p.home_padding,
        }
    }
}

/// Move 1/speed of the way toward `target`, never below zero on either axis
///
/// The vertical difference is taken as `pos - target` and subtracted, so a
/// target below the box yields increasing screen y (falling).
pub fn homing_step(pos: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let step = Vec2::new(target.x - pos.x, pos.y - target.y) / speed;
    Vec2::new(pos.x + step.x, pos.y - step.y).max(Vec2::ZERO)
}
