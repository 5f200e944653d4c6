//! Collision detection: ball vs paddle, walls and score zones
//!
//! Ball/paddle collision is pixel-accurate: a cheap bounding-rect broad
//! phase, then a per-pixel alpha test over the overlap. Paddle pixels count
//! as solid only at full opacity, so laser-eroded regions (erased or
//! debug-tinted) stop blocking even though they stay inside the bounding
//! rect. Any non-zero ball pixel blocks.

use super::image::PixelBuffer;
use super::rect::Rect;
use super::state::{Ball, Paddle};
use crate::consts::*;

/// Pixel-exact ball/paddle overlap test
pub fn ball_paddle_collides(ball: &Ball, ball_image: &PixelBuffer, paddle: &Paddle) -> bool {
    let ball_rect = ball.rect();
    let paddle_rect = paddle.rect();
    let Some(overlap) = ball_rect.intersect(&paddle_rect) else {
        return false;
    };

    for y in overlap.y..overlap.bottom() {
        for x in overlap.x..overlap.right() {
            let ball_alpha = ball_image.alpha(x - ball_rect.x, y - ball_rect.y);
            let paddle_alpha = paddle.image.alpha(x - paddle_rect.x, y - paddle_rect.y);
            if ball_alpha != 0 && paddle_alpha == 0xff {
                return true;
            }
        }
    }
    false
}

/// Which wall a ball bounced off, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Bottom,
    Top,
    Right,
    Left,
}

/// Clamp-and-reflect against the playfield edges. At most one wall applies
/// per tick (first match wins, checked bottom, top, right, left); vertical
/// bounces also chop |vy|.
pub fn ball_wall_collision(ball: &mut Ball) -> Option<Wall> {
    let floor = PLAY_HEIGHT as f32;
    if ball.bottom() > floor {
        ball.pos.y = floor - BALL_RADIUS;
        ball.vel.y = -ball.vel.y;
        ball.chop_vy();
        Some(Wall::Bottom)
    } else if ball.top() < 0.0 {
        ball.pos.y = BALL_RADIUS;
        ball.vel.y = -ball.vel.y;
        ball.chop_vy();
        Some(Wall::Top)
    } else if ball.right() > SCREEN_WIDTH as f32 {
        ball.pos.x = SCREEN_WIDTH as f32 - BALL_RADIUS;
        ball.vel.x = -ball.vel.x;
        Some(Wall::Right)
    } else if ball.left() < 0.0 {
        ball.pos.x = BALL_RADIUS;
        ball.vel.x = -ball.vel.x;
        Some(Wall::Left)
    } else {
        None
    }
}

/// The two scoring strips hugging the left and right screen edges,
/// spanning the full play height
pub fn score_zones() -> [Rect; 2] {
    [
        Rect::new(0, 0, SCORE_ZONE_WIDTH, PLAY_HEIGHT),
        Rect::new(SCREEN_WIDTH - SCORE_ZONE_WIDTH, 0, SCORE_ZONE_WIDTH, PLAY_HEIGHT),
    ]
}

/// If the ball overlaps a score zone, the index of the side that scores
/// (the zone's opposite paddle). Zone 0 is the left edge, so entering it
/// scores for paddle 1.
pub fn ball_score_zone(ball: &Ball) -> Option<usize> {
    let rect = ball.rect();
    let zones = score_zones();
    for (zone_index, zone) in zones.iter().enumerate() {
        if rect.intersect(zone).is_some() {
            return Some(1 - zone_index);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BallType;
    use glam::Vec2;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            kind: BallType::NoPlayer,
        }
    }

    fn disc() -> PixelBuffer {
        PixelBuffer::disc(BALL_RADIUS, crate::sim::image::rgba(0xff, 0xff, 0xff, 0xff))
    }

    #[test]
    fn test_ball_paddle_broad_phase_miss() {
        let paddle = Paddle::new(0);
        let ball = ball_at(400.0, 100.0, 0.0, 0.0);
        assert!(!ball_paddle_collides(&ball, &disc(), &paddle));
    }

    #[test]
    fn test_ball_paddle_pixel_hit() {
        let paddle = Paddle::new(0);
        // Dead center of the solid paddle
        let ball = ball_at(
            paddle.x as f32 + PADDLE_WIDTH as f32 / 2.0,
            paddle.y + PADDLE_MAX_H as f32 / 2.0,
            0.0,
            0.0,
        );
        assert!(ball_paddle_collides(&ball, &disc(), &paddle));
    }

    #[test]
    fn test_erased_region_does_not_collide() {
        let mut paddle = Paddle::new(0);
        // Erase the whole buffer: rects still overlap, pixels never match
        paddle.image.fill_rect(Rect::new(0, 0, PADDLE_WIDTH, PADDLE_MAX_H), 0);
        let ball = ball_at(
            paddle.x as f32 + PADDLE_WIDTH as f32 / 2.0,
            paddle.y + PADDLE_MAX_H as f32 / 2.0,
            0.0,
            0.0,
        );
        assert!(!ball_paddle_collides(&ball, &disc(), &paddle));
    }

    #[test]
    fn test_translucent_paddle_pixels_not_solid() {
        let mut paddle = Paddle::new(0);
        // Debug-tinted remnants (alpha 0x34) must not count as solid
        paddle
            .image
            .fill_rect(Rect::new(0, 0, PADDLE_WIDTH, PADDLE_MAX_H), crate::sim::image::rgba(0, 0, 0, 0x34));
        let ball = ball_at(
            paddle.x as f32 + PADDLE_WIDTH as f32 / 2.0,
            paddle.y + PADDLE_MAX_H as f32 / 2.0,
            0.0,
            0.0,
        );
        assert!(!ball_paddle_collides(&ball, &disc(), &paddle));
    }

    #[test]
    fn test_wall_bottom_clamps_and_chops() {
        let mut ball = ball_at(320.0, PLAY_HEIGHT as f32 + 2.0, 0.0, 5.0);
        assert_eq!(ball_wall_collision(&mut ball), Some(Wall::Bottom));
        assert_eq!(ball.bottom(), PLAY_HEIGHT as f32);
        assert_eq!(ball.vel.y, -BALL_CHOP_VY);
    }

    #[test]
    fn test_wall_top_clamps_and_chops() {
        let mut ball = ball_at(320.0, -3.0, 0.0, -5.0);
        assert_eq!(ball_wall_collision(&mut ball), Some(Wall::Top));
        assert_eq!(ball.top(), 0.0);
        assert_eq!(ball.vel.y, BALL_CHOP_VY);
    }

    #[test]
    fn test_wall_sides_no_chop() {
        let mut ball = ball_at(SCREEN_WIDTH as f32 + 1.0, 200.0, 3.0, 1.0);
        assert_eq!(ball_wall_collision(&mut ball), Some(Wall::Right));
        assert_eq!(ball.right(), SCREEN_WIDTH as f32);
        assert_eq!(ball.vel, Vec2::new(-3.0, 1.0));

        let mut ball = ball_at(-1.0, 200.0, -3.0, 1.0);
        assert_eq!(ball_wall_collision(&mut ball), Some(Wall::Left));
        assert_eq!(ball.left(), 0.0);
        assert_eq!(ball.vel.x, 3.0);
    }

    #[test]
    fn test_wall_first_match_wins() {
        // In a corner: bottom is checked before right, and only one
        // correction applies this tick
        let mut ball = ball_at(SCREEN_WIDTH as f32, PLAY_HEIGHT as f32, 3.0, 3.0);
        assert_eq!(ball_wall_collision(&mut ball), Some(Wall::Bottom));
        assert!(ball.right() > SCREEN_WIDTH as f32);
    }

    #[test]
    fn test_no_wall_in_open_field() {
        let mut ball = ball_at(320.0, 200.0, 1.0, 1.0);
        assert_eq!(ball_wall_collision(&mut ball), None);
    }

    #[test]
    fn test_score_zone_sides() {
        // Leftmost zone scores for the right paddle
        assert_eq!(ball_score_zone(&ball_at(3.0, 200.0, 0.0, 0.0)), Some(1));
        assert_eq!(
            ball_score_zone(&ball_at(SCREEN_WIDTH as f32 - 3.0, 200.0, 0.0, 0.0)),
            Some(0)
        );
        assert_eq!(ball_score_zone(&ball_at(320.0, 200.0, 0.0, 0.0)), None);
    }
}
