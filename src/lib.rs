//! Laser Pong - two paddles, one ball, and lasers that carve the paddles apart
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fixed-tick driver, pixel-accurate
//!   collision, paddle cutting, round/score state machine)
//! - `view`: Read-only presentation adapter (draw commands for a host renderer)
//!
//! Windowing, texture upload, image decoding and input pumping are the host's
//! job; the simulation only consumes a per-tick key snapshot and exposes state.

pub mod sim;
pub mod view;

pub use sim::{GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (100 Hz)
    pub const TICK_MS: u32 = 10;

    /// Playfield dimensions (logical pixels)
    pub const SCREEN_WIDTH: i32 = 640;
    pub const SCREEN_HEIGHT: i32 = 480;
    /// HUD strip along the bottom edge; balls and paddles never enter it
    pub const HUD_HEIGHT: i32 = 32;
    /// Height of the playable area
    pub const PLAY_HEIGHT: i32 = SCREEN_HEIGHT - HUD_HEIGHT;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Clamp |vy| to this on top/bottom bounces, so repeated vertical
    /// bounces can't build up speed
    pub const BALL_CHOP_VY: f32 = 2.0;
    /// Ball slot capacity; the slot list never grows past this
    pub const MAX_BALLS: usize = 32;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 16;
    pub const PADDLE_MAX_H: i32 = 150;
    /// Per-tick velocity change while a movement key is held (and the
    /// deceleration rate when none is)
    pub const PADDLE_V_STEP: f32 = 0.1;
    /// Fraction of paddle vy transferred to a bouncing ball
    pub const PADDLE_TO_BALL_FRICTION: f32 = 1.0;
    /// Paddle anchor x positions, left and right side
    pub const PADDLE_X: [i32; 2] = [16, SCREEN_WIDTH - 32];

    /// Laser defaults
    pub const LASER_INITIAL_MAGNITUDE: f32 = 8.0;
    /// Magnitude lost per tick until the beam dies at zero
    pub const LASER_MAGNITUDE_DECAY: f32 = 0.4;
    /// Destructive cuts happen at most once per this many ticks
    pub const LASER_CUT_INTERVAL: u32 = 3;
    /// Ticks after firing before the laser can fire again
    pub const LASER_RECHARGE_TICKS: u32 = 50;

    /// Scoring
    pub const SCORE_ZONE_WIDTH: i32 = 8;
    /// Ticks between a score and the round restore
    pub const ROUND_RESET_TICKS: u32 = 100;

    /// Respawned ball velocity ranges (per-axis magnitude, sign randomized)
    pub const BALL_RESPAWN_VX: std::ops::Range<f32> = 0.8..1.6;
    pub const BALL_RESPAWN_VY: std::ops::Range<f32> = 0.2..1.0;
}

/// Round-half-up float-to-int conversion, used for all rect derivation
#[inline]
pub fn round_half_up(x: f32) -> i32 {
    (x + 0.5).floor() as i32
}
