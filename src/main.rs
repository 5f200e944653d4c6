//! Headless driver
//!
//! Runs a scripted, deterministic session of the simulation at the fixed
//! tick rate and logs the interesting events. Useful for soak-testing
//! balance changes and for producing reproducible state snapshots without
//! a window. A real frontend wraps the same `tick` call in a catch-up
//! loop against wall-clock time and draws the `Scene` in between.
//!
//! Usage: laser-pong [SEED] [TICKS] [--dump]

use laser_pong::sim::{GameEvent, GameState, Key, KeyState, TickInput, tick};

fn main() {
    env_logger::init();

    let mut dump = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--dump" {
            dump = true;
        } else {
            positional.push(arg);
        }
    }
    if positional.len() > 2 {
        usage(&positional[2]);
    }
    let mut seed = 0u64;
    let mut ticks = 60_000u64; // ten minutes of simulated time
    if let Some(s) = positional.first() {
        seed = s.parse().unwrap_or_else(|_| usage(s));
    }
    if let Some(s) = positional.get(1) {
        ticks = s.parse().unwrap_or_else(|_| usage(s));
    }

    log::info!("running {ticks} ticks with seed {seed}");
    let mut state = GameState::new(seed);

    for n in 0..ticks {
        // Crude two-player script: both paddles sweep and fire; enough to
        // exercise bounces, cuts, deaths and scoring
        let mut keys = KeyState::default();
        match (n / 120) % 4 {
            0 => {
                keys.set_held(Key::P1Down, true);
                keys.set_held(Key::P2Up, true);
            }
            1 => keys.set_held(Key::P1Fire, true),
            2 => {
                keys.set_held(Key::P1Up, true);
                keys.set_held(Key::P2Down, true);
            }
            _ => keys.set_held(Key::P2Fire, true),
        }

        tick(&mut state, &TickInput { keys, restart: false });

        for event in state.drain_events() {
            match event {
                GameEvent::Score { scorer } => {
                    log::info!(
                        "tick {n}: paddle {scorer} scores ({} - {})",
                        state.scores[0],
                        state.scores[1]
                    );
                }
                GameEvent::PaddleDestroyed { paddle } => {
                    log::info!("tick {n}: paddle {paddle} destroyed");
                }
                other => log::debug!("tick {n}: {other:?}"),
            }
        }
    }

    println!(
        "final score after {ticks} ticks: {} - {}",
        state.scores[0], state.scores[1]
    );

    if dump {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                log::error!("state dump failed: {err}");
                std::process::exit(1);
            }
        }
    }
}

fn usage(arg: &str) -> ! {
    eprintln!("unexpected argument: {arg}");
    eprintln!("usage: laser-pong [SEED] [TICKS] [--dump]");
    std::process::exit(2);
}
