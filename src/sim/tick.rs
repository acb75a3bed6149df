//! One game tick: track → advance → resolve → apply
//!
//! All mutable per-game state lives in [`GameSession`] and is threaded through
//! here explicitly. Ticks never overlap and never block.

use glam::Vec2;
use image::RgbImage;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{BaseZone, resolve};
use super::field::{BoxField, FieldParams};
use super::state::{GameEvent, GameState};
use super::trail::CentroidTrail;
use crate::calibration::ColorRangeConfig;
use crate::effects::{EffectsNotifier, NoopEffects};
use crate::settings::GameSettings;
use crate::vision::{TrackedObject, TrackerParams, TrackerState, track};

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tracked: TrackedObject,
    /// Events that removed a box this tick, in application order
    pub events: Vec<GameEvent>,
    pub lives: u32,
    pub running: bool,
}

/// Everything one game needs between ticks
pub struct GameSession {
    range: ColorRangeConfig,
    settings: GameSettings,
    tracker_params: TrackerParams,
    tracker: TrackerState,
    base: BaseZone,
    field: BoxField,
    state: GameState,
    trail: CentroidTrail,
    rng: Pcg32,
    effects: Box<dyn EffectsNotifier>,
    /// Size of the frames being tracked; starts at the configured size
    field_size: Vec2,
    ticks: u64,
}

impl GameSession {
    pub fn new(
        range: ColorRangeConfig,
        settings: GameSettings,
        effects: Box<dyn EffectsNotifier>,
    ) -> Self {
        Self {
            range,
            tracker_params: TrackerParams::from(&settings),
            tracker: TrackerState::default(),
            base: BaseZone::from_settings(&settings),
            field: BoxField::new(FieldParams::from(&settings)),
            state: GameState::new(settings.starting_lives),
            trail: CentroidTrail::new(settings.trail_capacity),
            rng: Pcg32::seed_from_u64(settings.seed),
            effects,
            field_size: settings.field_size(),
            ticks: 0,
            settings,
        }
    }

    /// Session with no side effects
    pub fn headless(range: ColorRangeConfig, settings: GameSettings) -> Self {
        Self::new(range, settings, Box::new(NoopEffects))
    }

    /// Run a full tick on a camera frame
    ///
    /// The play field always matches the frame, so boxes spawn and home
    /// in the same coordinates the ball is tracked in.
    pub fn tick(&mut self, frame: &RgbImage) -> TickReport {
        if !self.state.running {
            return self.idle_report(TrackedObject::not_detected());
        }
        self.fit_field(frame.width(), frame.height());
        let (tracked, tracker) = track(frame, &self.range, self.tracker, &self.tracker_params);
        self.tracker = tracker;
        self.step(tracked)
    }

    /// Run the post-tracking half of a tick with an already-tracked object
    pub fn step(&mut self, tracked: TrackedObject) -> TickReport {
        if !self.state.running {
            return self.idle_report(tracked);
        }
        self.ticks += 1;
        self.trail.record(tracked.detected.then_some(tracked.centroid));

        let size = self.field_size;
        self.field.advance(size.x, size.y, &mut self.rng);

        let events = resolve(&tracked, &self.field, &self.base);
        let applied = self.apply(events);

        TickReport {
            tracked,
            events: applied,
            lives: self.state.lives,
            running: self.state.running,
        }
    }

    /// Remove boxes and update lives. Events for boxes already gone are skipped.
    fn apply(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        let mut applied = Vec::with_capacity(events.len());
        for event in events {
            if self.field.remove(event.box_id()).is_none() {
                continue;
            }
            self.state.apply(&event);
            match event {
                GameEvent::BoxHit { box_id, impact_point } => {
                    log::info!("Box {box_id} hit at ({:.0}, {:.0})", impact_point.x, impact_point.y);
                    self.effects.notify_hit();
                }
                GameEvent::BoxReachedBase { box_id } => {
                    log::info!("Box {box_id} reached the base, {} lives left", self.state.lives);
                    self.effects.notify_miss();
                }
            }
            applied.push(event);
        }
        applied
    }

    fn fit_field(&mut self, width: u32, height: u32) {
        let size = Vec2::new(width as f32, height as f32);
        if size != self.field_size {
            log::info!("Play field resized to {width}x{height}");
            self.field_size = size;
            self.base = BaseZone::for_field(&self.settings, size);
        }
    }

    fn idle_report(&self, tracked: TrackedObject) -> TickReport {
        TickReport {
            tracked,
            events: Vec::new(),
            lives: self.state.lives,
            running: false,
        }
    }

    /// External quit (window closed, escape pressed)
    pub fn quit(&mut self) {
        self.state.quit();
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn field(&self) -> &BoxField {
        &self.field
    }

    /// Mutable field access for scripted setups
    pub fn field_mut(&mut self) -> &mut BoxField {
        &mut self.field
    }

    pub fn trail(&self) -> &CentroidTrail {
        &self.trail
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
