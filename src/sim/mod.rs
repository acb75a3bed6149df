//! Deterministic game simulation
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Stable iteration order (by box ID)
//! - Collision resolution returns events; only the session mutates state
//! - No rendering or device dependencies

pub mod collision;
pub mod field;
pub mod state;
pub mod tick;
pub mod trail;

pub use collision::{BaseZone, circles_overlap, resolve};
pub use field::{BoxField, FieldParams, homing_step};
pub use state::{BoxId, FallingBox, GameEvent, GameState, HomeBase};
pub use tick::{GameSession, TickReport};
pub use trail::CentroidTrail;
