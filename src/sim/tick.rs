//! Fixed timestep simulation driver
//!
//! One call to [`tick`] advances the game by exactly one simulated step
//! (nominally 10 ms). The host runs zero or more ticks per frame to keep
//! pace with wall-clock time; drawing happens independently afterwards.
//!
//! Phase order inside a tick is load-bearing: ball collision in the final
//! phase must see paddle edges produced by the same tick's laser cuts.

use super::collision::{ball_paddle_collides, ball_score_zone, ball_wall_collision};
use super::cut::{apply_cut, laser_rect};
use super::state::{BallType, GameEvent, GameState, KeyState};
use crate::consts::*;

/// Input for a single tick: the held-key snapshot, sampled once, plus the
/// debug restart request
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub keys: KeyState,
    /// Full game reinitialization (debug restart key)
    pub restart: bool,
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
        return;
    }

    state.time_ticks += 1;

    // (a) Round-reset countdown; restore fires on the transition to zero
    if state.round_reset_ticks > 0 {
        state.round_reset_ticks -= 1;
        if state.round_reset_ticks == 0 {
            round_restore(state);
        }
    }

    // (b) Laser magnitude decay
    for laser in &mut state.lasers {
        if laser.is_firing() {
            laser.magnitude = (laser.magnitude - LASER_MAGNITUDE_DECAY).max(0.0);
        }
    }

    // (c) Paddle movement, wall clamping, laser firing
    for i in 0..state.paddles.len() {
        let paddle = &mut state.paddles[i];

        // Down wins when both movement keys are held; with neither held,
        // decelerate toward zero without overshooting
        if input.keys.is_held(paddle.keys.down) {
            paddle.vy += PADDLE_V_STEP;
        } else if input.keys.is_held(paddle.keys.up) {
            paddle.vy -= PADDLE_V_STEP;
        } else if paddle.vy < 0.0 {
            paddle.vy = (paddle.vy + PADDLE_V_STEP).min(0.0);
        } else if paddle.vy > 0.0 {
            paddle.vy = (paddle.vy - PADDLE_V_STEP).max(0.0);
        }

        // Integrate and stop at walls. Only the surviving solid span
        // (cut_top..cut_bottom) collides with the walls.
        paddle.y += paddle.vy;
        if paddle.y + (paddle.cut_top + 1) as f32 <= 0.0 {
            paddle.y = -((paddle.cut_top + 1) as f32);
            paddle.vy = 0.0;
        } else if paddle.y + paddle.cut_bottom as f32 >= PLAY_HEIGHT as f32 {
            paddle.y = (PLAY_HEIGHT - paddle.cut_bottom) as f32;
            paddle.vy = 0.0;
        }

        if paddle.laser_recharge > 0 {
            paddle.laser_recharge -= 1;
        }

        let laser = &mut state.lasers[i];
        if !laser.is_firing() && paddle.laser_recharge == 0 && input.keys.is_held(paddle.keys.fire)
        {
            laser.magnitude = LASER_INITIAL_MAGNITUDE;
            laser.cy = paddle.surviving_midpoint();
            laser.ticks_until_cut = 0;
            paddle.laser_recharge = LASER_RECHARGE_TICKS;
            state.events.push(GameEvent::LaserFired { paddle: i });
            log::debug!("paddle {i} fired laser at y {:.1}", laser.cy);
        }
    }

    // (d) Throttled laser cuts against the opposing paddle
    for i in 0..state.lasers.len() {
        if state.lasers[i].ticks_until_cut > 0 {
            state.lasers[i].ticks_until_cut -= 1;
        }
        if state.lasers[i].ticks_until_cut == 0 {
            if let Some(beam) = laser_rect(&state.lasers[i], i, &state.paddles) {
                for j in 0..state.paddles.len() {
                    if j == i {
                        continue;
                    }
                    let was_dead = state.paddles[j].is_dead();
                    if apply_cut(&mut state.paddles[j], beam, state.debug_cut_highlight) {
                        state.events.push(GameEvent::PaddleCut { paddle: j });
                        if !was_dead && state.paddles[j].is_dead() {
                            state.events.push(GameEvent::PaddleDestroyed { paddle: j });
                            log::info!("paddle {j} destroyed");
                        }
                    }
                }
            }
            state.lasers[i].ticks_until_cut = LASER_CUT_INTERVAL;
        }
    }

    // (e) Ball motion, wall bounce, paddle bounce arbitration, scoring
    for slot in 0..state.balls.len() {
        if !state.balls[slot].is_active() {
            continue;
        }

        {
            let ball = &mut state.balls[slot];
            ball.pos += ball.vel;
            let _ = ball_wall_collision(ball);
        }

        for j in 0..state.paddles.len() {
            let ball = state.balls[slot];
            let Some(sprite) = state.sprites.ball(ball.kind) else {
                continue;
            };
            if ball_paddle_collides(&ball, sprite, &state.paddles[j]) {
                // Bounce only while approaching the paddle; the flip sends
                // vx away, so the same overlap can't bounce twice
                let paddle = &state.paddles[j];
                if ball.vel.x * paddle.bounce_dir < 0.0 {
                    let ball = &mut state.balls[slot];
                    ball.vel.x = -ball.vel.x;
                    ball.vel.y += paddle.vy * PADDLE_TO_BALL_FRICTION;
                    ball.kind = paddle.ball_type;
                    state.events.push(GameEvent::PaddleBounce { paddle: j });
                }
            }
        }

        if let Some(scorer) = ball_score_zone(&state.balls[slot]) {
            state.scores[scorer] += 1;
            state.balls[slot].kind = BallType::Inactive;
            state.round_reset_ticks = ROUND_RESET_TICKS;
            state.events.push(GameEvent::Score { scorer });
            log::info!(
                "paddle {scorer} scores, {} - {}",
                state.scores[0],
                state.scores[1]
            );
        }
    }
}

/// Mid-round partial reset, run when the round countdown expires: scores,
/// paddle position/velocity and laser state all survive; only dead paddles
/// heal and only inactive ball slots respawn.
fn round_restore(state: &mut GameState) {
    for i in 0..state.paddles.len() {
        if state.paddles[i].is_dead() {
            state.paddles[i].heal();
            state.events.push(GameEvent::PaddleHealed { paddle: i });
            log::info!("paddle {i} healed");
        }
    }
    for slot in 0..state.balls.len() {
        if !state.balls[slot].is_active() {
            state.respawn_ball(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Key;
    use glam::Vec2;

    fn held(key: Key) -> TickInput {
        TickInput {
            keys: KeyState::default().with_held(key),
            restart: false,
        }
    }

    /// Park the ball far from paddles, walls and score zones
    fn park_ball(state: &mut GameState) {
        state.balls[0].pos = Vec2::new(320.0, 200.0);
        state.balls[0].vel = Vec2::ZERO;
    }

    #[test]
    fn test_paddle_accelerates_and_decelerates() {
        let mut state = GameState::new(1);
        park_ball(&mut state);

        tick(&mut state, &held(Key::P1Down));
        assert!((state.paddles[0].vy - PADDLE_V_STEP).abs() < 1e-6);
        tick(&mut state, &held(Key::P1Down));
        assert!((state.paddles[0].vy - 2.0 * PADDLE_V_STEP).abs() < 1e-6);

        // Released: decays to zero without overshoot
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.paddles[0].vy, 0.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.paddles[0].vy, 0.0);
    }

    #[test]
    fn test_paddle_clamps_at_bottom_wall() {
        let mut state = GameState::new(1);
        park_ball(&mut state);
        state.paddles[0].y = (PLAY_HEIGHT - PADDLE_MAX_H) as f32 - 0.5;
        state.paddles[0].vy = 3.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.paddles[0].y, (PLAY_HEIGHT - PADDLE_MAX_H) as f32);
        assert_eq!(state.paddles[0].vy, 0.0);
    }

    #[test]
    fn test_laser_fire_and_recharge() {
        let mut state = GameState::new(1);
        park_ball(&mut state);
        state.paddles[0].y = 100.0;

        tick(&mut state, &held(Key::P1Fire));
        // Decay phase runs before firing, so magnitude is still full here
        assert_eq!(state.lasers[0].magnitude, LASER_INITIAL_MAGNITUDE);
        assert_eq!(state.paddles[0].laser_recharge, LASER_RECHARGE_TICKS);
        assert!(
            (state.lasers[0].cy - (100.0 + PADDLE_MAX_H as f32 / 2.0)).abs() < 1e-5,
            "laser fires from the surviving midpoint"
        );
        assert!(state.events.contains(&GameEvent::LaserFired { paddle: 0 }));

        // Holding fire while recharging must not relaunch
        let burn_down =
            (LASER_INITIAL_MAGNITUDE / LASER_MAGNITUDE_DECAY).ceil() as u32;
        for _ in 0..burn_down {
            tick(&mut state, &held(Key::P1Fire));
        }
        assert!(!state.lasers[0].is_firing());
        assert!(state.paddles[0].laser_recharge > 0);
        state.drain_events();
        tick(&mut state, &held(Key::P1Fire));
        assert!(!state.events.contains(&GameEvent::LaserFired { paddle: 0 }));

        // After the recharge runs out it fires again
        for _ in 0..LASER_RECHARGE_TICKS {
            tick(&mut state, &TickInput::default());
        }
        tick(&mut state, &held(Key::P1Fire));
        assert!(state.lasers[0].is_firing());
    }

    #[test]
    fn test_cut_throttle_gates_structural_change() {
        let mut state = GameState::new(1);
        park_ball(&mut state);
        // Align both paddles and aim paddle 0's laser at paddle 1's top edge
        state.paddles[1].y = 100.0;
        state.lasers[0].magnitude = LASER_INITIAL_MAGNITUDE;
        state.lasers[0].cy = 100.0;
        state.lasers[0].ticks_until_cut = 0;

        tick(&mut state, &TickInput::default());
        let cut_top_after_first = state.paddles[1].cut_top;
        assert!(cut_top_after_first > 0, "first tick applies a cut");
        assert_eq!(state.lasers[0].ticks_until_cut, LASER_CUT_INTERVAL);

        // Freeze beam geometry; the next tick is inside the throttle
        // window and must not erode further
        state.lasers[0].magnitude = LASER_INITIAL_MAGNITUDE;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.paddles[1].cut_top, cut_top_after_first);
    }

    #[test]
    fn test_laser_never_cuts_own_paddle() {
        let mut state = GameState::new(1);
        park_ball(&mut state);
        state.paddles[0].y = 100.0;
        state.paddles[1].y = 300.0; // out of the beam's path
        state.lasers[0].magnitude = LASER_INITIAL_MAGNITUDE;
        state.lasers[0].cy = 100.0;
        state.lasers[0].ticks_until_cut = 0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.paddles[0].cut_top, 0);
        assert_eq!(state.paddles[0].cut_bottom, PADDLE_MAX_H);
    }

    #[test]
    fn test_score_arms_countdown_and_restores() {
        let mut state = GameState::new(1);
        state.balls[0].pos = Vec2::new(30.0, 200.0);
        state.balls[0].vel = Vec2::new(-4.0, 0.0);
        state.paddles[0].y = 400.0; // keep the ball's path clear
        state.scores = [2, 5];

        // Drive the ball into the left score zone
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
            if state.round_reset_ticks > 0 {
                break;
            }
        }
        assert_eq!(state.scores, [2, 6], "left zone scores for the right side");
        assert_eq!(state.balls[0].kind, BallType::Inactive);
        assert_eq!(state.round_reset_ticks, ROUND_RESET_TICKS);
        assert_eq!(state.phase(), crate::sim::GamePhase::RoundEnding);

        // Kill paddle 0 during the countdown; paddle 1 stays alive
        state.paddles[0].cut_top = PADDLE_MAX_H;
        state.paddles[0].cut_bottom = 0;
        let paddle1_y = state.paddles[1].y;

        for _ in 0..ROUND_RESET_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase(), crate::sim::GamePhase::Playing);
        assert_eq!(state.scores, [2, 6], "scores survive the restore");
        assert!(!state.paddles[0].is_dead(), "dead paddle healed");
        assert_eq!(state.paddles[1].y, paddle1_y, "live paddle untouched");
        assert_eq!(state.balls[0].kind, BallType::NoPlayer);
        assert!(state.balls[0].vel.length() > 0.0);
    }

    #[test]
    fn test_restart_input_reinitializes() {
        let mut state = GameState::new(1);
        state.scores = [3, 3];
        state.paddles[0].cut_top = 40;
        let ticks_before = state.time_ticks;
        tick(&mut state, &TickInput { restart: true, ..Default::default() });
        assert_eq!(state.scores, [0, 0]);
        assert_eq!(state.paddles[0].cut_top, 0);
        assert_eq!(state.time_ticks, ticks_before, "restart tick does not advance time");
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(424242);
        let mut b = GameState::new(424242);
        let script = [
            held(Key::P1Down),
            held(Key::P1Fire),
            held(Key::P2Up),
            TickInput::default(),
            held(Key::P2Fire),
        ];
        for _ in 0..200 {
            for input in &script {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.balls[0].pos, b.balls[0].pos);
        assert_eq!(a.balls[0].vel, b.balls[0].vel);
        assert_eq!(a.paddles[0].y, b.paddles[0].y);
        assert_eq!(a.paddles[1].cut_top, b.paddles[1].cut_top);
        assert_eq!(a.paddles[1].cut_bottom, b.paddles[1].cut_bottom);
    }
}
