//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (used for ball respawn exclusively)
//! - No rendering or platform dependencies
//!
//! The host reads state only between completed ticks.

pub mod collision;
pub mod cut;
pub mod image;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{ball_paddle_collides, ball_score_zone, ball_wall_collision, score_zones};
pub use cut::{apply_cut, laser_rect};
pub use image::PixelBuffer;
pub use rect::Rect;
pub use state::{Ball, BallType, GameEvent, GamePhase, GameState, Key, KeyState, Laser, Paddle, SpriteSet};
pub use tick::{TickInput, tick};
