//! Deterministic simulation module
//!
//! All starfield and combat logic lives here. This module must stay pure:
//! - Timers are clock deadlines, never host callbacks
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod combat;
pub mod entity;
pub mod event;
pub mod mode;
pub mod star;
pub mod state;
pub mod tick;

pub use clock::{Schedule, SimClock, TaskKind};
pub use combat::{Enemy, Hit, Laser, resolve_collisions};
pub use entity::{Simulate, StepEnv};
pub use event::SimEvent;
pub use mode::ModeState;
pub use star::{ShootingStar, Star};
pub use state::SimState;
pub use tick::{FrameInput, tick};
