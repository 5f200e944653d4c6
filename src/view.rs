//! Read-only presentation adapter
//!
//! Turns a completed-tick [`GameState`] into an ordered list of draw
//! commands plus HUD data, so a host renderer can draw a frame without
//! re-deriving any simulation logic. Nothing here mutates state; the
//! actual blitting, texture upload and text rendering belong to the host.

use crate::consts::*;
use crate::sim::image::rgba;
use crate::sim::rect::Rect;
use crate::sim::state::GameState;

/// Which pixel buffer a blit command refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteRef {
    /// `GameState::sprites.ball(kind)` for the ball in this slot
    Ball { slot: usize },
    /// `GameState::paddles[index].image`
    Paddle { index: usize },
}

/// One draw command, in back-to-front order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCmd {
    FillRect { rect: Rect, color: u32 },
    Blit { sprite: SpriteRef, dst: Rect },
}

/// A frame's worth of draw commands plus the HUD numbers
#[derive(Debug, Clone)]
pub struct Scene {
    pub cmds: Vec<DrawCmd>,
    pub scores: [u32; 2],
}

const BACKGROUND: u32 = rgba(0xaa, 0xaa, 0xaa, 0xff);
const HUD_BACKGROUND: u32 = rgba(0x55, 0x55, 0x55, 0xff);
const LASER_COLOR: u32 = rgba(0xff, 0xff, 0x00, 0xff);

impl Scene {
    /// Build the frame: background, HUD strip, paddles, lasers, then balls
    pub fn from_state(state: &GameState) -> Self {
        let mut cmds = Vec::with_capacity(4 + state.balls.len() + 4);

        cmds.push(DrawCmd::FillRect {
            rect: Rect::new(0, 0, SCREEN_WIDTH, PLAY_HEIGHT),
            color: BACKGROUND,
        });
        cmds.push(DrawCmd::FillRect {
            rect: Rect::new(0, PLAY_HEIGHT, SCREEN_WIDTH, HUD_HEIGHT),
            color: HUD_BACKGROUND,
        });

        for (index, paddle) in state.paddles.iter().enumerate() {
            cmds.push(DrawCmd::Blit {
                sprite: SpriteRef::Paddle { index },
                dst: paddle.rect(),
            });
        }

        for (owner, laser) in state.lasers.iter().enumerate() {
            if let Some(rect) = crate::sim::cut::laser_rect(laser, owner, &state.paddles) {
                cmds.push(DrawCmd::FillRect { rect, color: LASER_COLOR });
            }
        }

        for (slot, ball) in state.balls.iter().enumerate() {
            if ball.is_active() {
                cmds.push(DrawCmd::Blit {
                    sprite: SpriteRef::Ball { slot },
                    dst: ball.rect(),
                });
            }
        }

        Scene { cmds, scores: state.scores }
    }
}
