//! Laser geometry and the paddle-cut algorithm
//!
//! A firing laser spans from its owner paddle's outer edge to the far screen
//! edge. When its rect overlaps the opposing paddle, the overlapped pixels
//! are erased and the paddle's solid bounds are rescanned inward from the
//! cut region. `cut_top` is the first fully opaque row (inclusive);
//! `cut_bottom` is one past the last fully opaque row (exclusive). The
//! exclusive convention on `cut_bottom` feeds the wall-clamp and heal
//! boundaries and must not change.

use super::image::{PixelBuffer, rgba};
use super::rect::Rect;
use super::state::{Laser, Paddle};
use crate::consts::*;
use crate::round_half_up;

/// Screen-space rect of a firing laser, None while the beam is dead.
/// The beam leaves the owner's outer edge and runs to the far screen edge;
/// its height is 2x the current magnitude.
pub fn laser_rect(laser: &Laser, owner: usize, paddles: &[Paddle; 2]) -> Option<Rect> {
    if !laser.is_firing() {
        return None;
    }
    let (x, w) = match owner {
        0 => (paddles[0].right(), SCREEN_WIDTH - paddles[0].right()),
        1 => (0, paddles[1].left()),
        _ => panic!("laser owner out of range"),
    };
    Some(Rect::new(
        x,
        round_half_up(laser.cy - laser.magnitude),
        w,
        round_half_up(laser.magnitude * 2.0),
    ))
}

/// Erase the laser overlap from a paddle and recompute its solid bounds.
/// Returns true if the beam touched the paddle. With `debug_highlight`
/// the pixels get a faint tint instead of full erasure; either way they
/// drop below full opacity and stop being solid.
pub fn apply_cut(paddle: &mut Paddle, laser: Rect, debug_highlight: bool) -> bool {
    let paddle_rect = paddle.rect();
    let Some(overlap) = laser.intersect(&paddle_rect) else {
        return false;
    };
    // Work in paddle-local pixel coordinates from here on
    let local = overlap.offset(-paddle_rect.x, -paddle_rect.y);

    let pixel = if debug_highlight { rgba(0x00, 0x00, 0x00, 0x34) } else { 0 };
    paddle.image.fill_rect(local, pixel);

    // Rescan an edge only when the cut span covers it. Scans move inward
    // from the cut boundary; scanning outward would find stale rows.
    if local.y <= paddle.cut_top && local.bottom() >= paddle.cut_top {
        paddle.cut_top = calc_edge(&paddle.image, local.bottom(), PADDLE_MAX_H - 1, 1);
    }
    if local.y <= paddle.cut_bottom && local.bottom() >= paddle.cut_bottom {
        // +1 keeps cut_bottom exclusive: one past the first opaque row
        // found scanning upward
        paddle.cut_bottom = 1 + calc_edge(&paddle.image, local.y, 0, -1);
    }
    true
}

/// First row in [ystart, yend] (stepping by ystep) holding any fully opaque
/// pixel; `yend + ystep` when every row is eroded. An empty range (ystart
/// already past yend) returns ystart untouched.
fn calc_edge(image: &PixelBuffer, ystart: i32, yend: i32, ystep: i32) -> i32 {
    let mut y = ystart;
    while y != yend + ystep {
        for x in 0..PADDLE_WIDTH {
            if image.alpha(x, y) == 0xff {
                return y;
            }
        }
        y += ystep;
    }
    y
}
