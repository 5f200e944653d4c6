//! Game state and core simulation types
//!
//! Everything needed to resume or replay a game deterministically lives in
//! [`GameState`]; sprite assets and the event queue are transient.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::image::{PixelBuffer, rgba};
use super::rect::Rect;
use crate::consts::*;
use crate::round_half_up;

/// Logical input keys, two paddles' worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    P1Up,
    P1Down,
    P1Fire,
    P2Up,
    P2Down,
    P2Fire,
}

pub const KEY_COUNT: usize = 6;

impl Key {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Key::P1Up => 0,
            Key::P1Down => 1,
            Key::P1Fire => 2,
            Key::P2Up => 3,
            Key::P2Down => 4,
            Key::P2Fire => 5,
        }
    }
}

/// Per-tick snapshot of held keys, sampled once by the host before each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    held: [bool; KEY_COUNT],
}

impl KeyState {
    #[inline]
    pub const fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    pub const fn set_held(&mut self, key: Key, held: bool) {
        self.held[key.index()] = held;
    }

    pub const fn with_held(mut self, key: Key) -> Self {
        self.held[key.index()] = true;
        self
    }
}

/// Ball color/ownership tag. Inactive balls keep their slot in the ball
/// list but are skipped by movement, collision and drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallType {
    Inactive,
    NoPlayer,
    Blue,
    Red,
}

/// A ball entity. Radius is the global [`BALL_RADIUS`] constant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: BallType,
}

impl Ball {
    pub const fn inactive() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            kind: BallType::Inactive,
        }
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        !matches!(self.kind, BallType::Inactive)
    }

    pub fn left(&self) -> f32 {
        self.pos.x - BALL_RADIUS
    }

    pub fn right(&self) -> f32 {
        self.pos.x + BALL_RADIUS
    }

    pub fn top(&self) -> f32 {
        self.pos.y - BALL_RADIUS
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + BALL_RADIUS
    }

    /// Bounding square, round-half-up on every edge
    pub fn rect(&self) -> Rect {
        let side = round_half_up(BALL_RADIUS * 2.0);
        Rect::new(round_half_up(self.left()), round_half_up(self.top()), side, side)
    }

    /// Clamp |vy| to the chop threshold; applied on top/bottom wall bounces
    /// so the ball can't build up vertical speed indefinitely
    pub fn chop_vy(&mut self) {
        self.vel.y = self.vel.y.clamp(-BALL_CHOP_VY, BALL_CHOP_VY);
    }
}

/// A paddle's three key bindings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaddleKeys {
    pub up: Key,
    pub down: Key,
    pub fire: Key,
}

/// A paddle entity, owning its (laser-erodible) pixel buffer and the
/// pristine template used to restore it on heal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge; fixed per side
    pub x: i32,
    /// Top edge, the only mutable position component
    pub y: f32,
    pub vy: f32,
    /// +1.0 or -1.0; a ball is "approaching" when `vel.x * bounce_dir < 0`
    pub bounce_dir: f32,
    /// Color assigned to any ball this paddle strikes
    pub ball_type: BallType,
    /// Top of the surviving solid region, offset from `y`. Inclusive.
    pub cut_top: i32,
    /// Bottom of the surviving solid region, offset from `y`. Exclusive:
    /// one past the last solid row.
    pub cut_bottom: i32,
    /// Ticks until the laser may fire again
    pub laser_recharge: u32,
    pub keys: PaddleKeys,
    pub image: PixelBuffer,
    pub template: PixelBuffer,
}

impl Paddle {
    /// Build the side's paddle: left (index 0) bounces balls rightward and
    /// tags them blue, right (index 1) the reverse.
    pub fn new(side: usize) -> Self {
        assert!(side < 2, "paddle side out of range");
        let (bounce_dir, ball_type, color, keys) = match side {
            0 => (
                1.0,
                BallType::Blue,
                rgba(0x00, 0x00, 0xff, 0xff),
                PaddleKeys { up: Key::P1Up, down: Key::P1Down, fire: Key::P1Fire },
            ),
            _ => (
                -1.0,
                BallType::Red,
                rgba(0xff, 0x00, 0x00, 0xff),
                PaddleKeys { up: Key::P2Up, down: Key::P2Down, fire: Key::P2Fire },
            ),
        };
        let template = PixelBuffer::filled(PADDLE_WIDTH, PADDLE_MAX_H, color);
        Self {
            x: PADDLE_X[side],
            y: Self::center_y(),
            vy: 0.0,
            bounce_dir,
            ball_type,
            cut_top: 0,
            cut_bottom: PADDLE_MAX_H,
            laser_recharge: 0,
            keys,
            image: template.clone(),
            template,
        }
    }

    /// Vertical anchor that centers a full-height paddle in the play area
    pub fn center_y() -> f32 {
        (PLAY_HEIGHT - PADDLE_MAX_H) as f32 / 2.0
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x + PADDLE_WIDTH
    }

    /// Full bounding rect; destroyed regions stay inside it and are
    /// filtered out by the per-pixel narrow phase
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, round_half_up(self.y), PADDLE_WIDTH, PADDLE_MAX_H)
    }

    /// Fully eroded: no row of the buffer is fully opaque
    pub const fn is_dead(&self) -> bool {
        self.cut_top >= self.cut_bottom
    }

    /// Screen-space midpoint of the surviving solid span; lasers fire from here
    pub fn surviving_midpoint(&self) -> f32 {
        (self.cut_bottom - self.cut_top) as f32 / 2.0 + self.cut_top as f32 + self.y
    }

    /// Restore the full solid range and the pristine pixel content
    pub fn heal(&mut self) {
        self.cut_top = 0;
        self.cut_bottom = PADDLE_MAX_H;
        self.image.copy_from(&self.template);
    }
}

/// A laser beam, one per paddle. `magnitude` is the half-height of the
/// beam rect; zero means not firing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Laser {
    /// Beam center on the y axis
    pub cy: f32,
    pub magnitude: f32,
    /// Ticks until the next destructive cut is applied; throttles cut
    /// frequency to once per [`LASER_CUT_INTERVAL`]
    pub ticks_until_cut: u32,
}

impl Laser {
    #[inline]
    pub fn is_firing(&self) -> bool {
        self.magnitude > 0.0
    }
}

/// Round/score state, derived from the reset countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play, no pending reset
    Playing,
    /// A ball has scored; counting down to the round restore
    RoundEnding,
}

/// Things that happened during a tick, drained by the host for HUD/audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LaserFired { paddle: usize },
    PaddleCut { paddle: usize },
    PaddleDestroyed { paddle: usize },
    PaddleHealed { paddle: usize },
    PaddleBounce { paddle: usize },
    Score { scorer: usize },
    Restarted,
}

/// Ball sprites keyed by ball type. The host may swap in decoded artwork;
/// the procedural default is a solid disc per color.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub ball_no_player: PixelBuffer,
    pub ball_blue: PixelBuffer,
    pub ball_red: PixelBuffer,
}

impl Default for SpriteSet {
    fn default() -> Self {
        Self {
            ball_no_player: PixelBuffer::disc(BALL_RADIUS, rgba(0xff, 0xff, 0xff, 0xff)),
            ball_blue: PixelBuffer::disc(BALL_RADIUS, rgba(0x00, 0x00, 0xff, 0xff)),
            ball_red: PixelBuffer::disc(BALL_RADIUS, rgba(0xff, 0x00, 0x00, 0xff)),
        }
    }
}

impl SpriteSet {
    /// Sprite for a ball type; inactive balls have none
    pub fn ball(&self, kind: BallType) -> Option<&PixelBuffer> {
        match kind {
            BallType::Inactive => None,
            BallType::NoPlayer => Some(&self.ball_no_player),
            BallType::Blue => Some(&self.ball_blue),
            BallType::Red => Some(&self.ball_red),
        }
    }
}

/// Complete game state (deterministic, serializable). Mutated only by the
/// tick driver; the view layer reads it between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG, used only for ball respawn
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Per-side scores, index 0 = left/blue
    pub scores: [u32; 2],
    /// Ticks until the round restore; 0 means no pending reset
    pub round_reset_ticks: u32,
    pub paddles: [Paddle; 2],
    pub lasers: [Laser; 2],
    /// Ball slots; inactive balls keep their index
    pub balls: Vec<Ball>,
    #[serde(skip)]
    pub sprites: SpriteSet,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Cut pixels get a faint tint instead of full erasure; collision
    /// treats them as destroyed either way
    #[serde(default)]
    pub debug_cut_highlight: bool,
}

impl GameState {
    /// Fresh game: zero scores, pristine paddles, one neutral ball
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            scores: [0, 0],
            round_reset_ticks: 0,
            paddles: [Paddle::new(0), Paddle::new(1)],
            lasers: [Laser::default(), Laser::default()],
            balls: Vec::with_capacity(MAX_BALLS),
            sprites: SpriteSet::default(),
            events: Vec::new(),
            debug_cut_highlight: false,
        };
        state.restart();
        state
    }

    /// Current round phase
    pub const fn phase(&self) -> GamePhase {
        if self.round_reset_ticks == 0 {
            GamePhase::Playing
        } else {
            GamePhase::RoundEnding
        }
    }

    /// Full (re)initialization: zero scores, unconditionally heal and
    /// re-center both paddles, kill lasers, fire a single fresh ball.
    /// Invoked at startup and by the debug restart input.
    pub fn restart(&mut self) {
        self.scores = [0, 0];
        self.round_reset_ticks = 0;
        for paddle in &mut self.paddles {
            paddle.y = Paddle::center_y();
            paddle.vy = 0.0;
            paddle.laser_recharge = 0;
            paddle.heal();
        }
        self.lasers = [Laser::default(), Laser::default()];
        self.balls.clear();
        self.spawn_ball();
        self.events.push(GameEvent::Restarted);
        log::info!("game restarted (seed {})", self.seed);
    }

    /// Append a fresh ball slot and give it a random serve
    pub fn spawn_ball(&mut self) {
        assert!(self.balls.len() < MAX_BALLS, "ball slots exhausted");
        self.balls.push(Ball::inactive());
        let slot = self.balls.len() - 1;
        self.respawn_ball(slot);
    }

    /// Reinitialize a slot with a neutral ball: random mid-field position,
    /// uniformly random per-axis speed with random sign
    pub fn respawn_ball(&mut self, slot: usize) {
        let x = self.rng.random_range(SCREEN_WIDTH as f32 * 0.35..SCREEN_WIDTH as f32 * 0.65);
        let y = self.rng.random_range(BALL_RADIUS..PLAY_HEIGHT as f32 - BALL_RADIUS);
        let vx = self.rng.random_range(BALL_RESPAWN_VX) * self.random_sign();
        let vy = self.rng.random_range(BALL_RESPAWN_VY) * self.random_sign();
        self.balls[slot] = Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            kind: BallType::NoPlayer,
        };
    }

    fn random_sign(&mut self) -> f32 {
        if self.rng.random::<bool>() { 1.0 } else { -1.0 }
    }

    /// Hand the accumulated events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
