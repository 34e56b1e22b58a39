//! Headless demo shell
//!
//! Runs the simulation with a scripted player for a few hundred frames and
//! logs what happened. A real frontend would drive the same loop from its
//! window event pump and feed `FrameDraw` to a renderer.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use brickfall::Config;
use brickfall::audio::{NullAudio, dispatch_events};
use brickfall::consts::SIM_DT;
use brickfall::level::{LevelError, load_levels};
use brickfall::render::draw_list;
use brickfall::resources::Resources;
use brickfall::sim::{FrameClock, GameEvent, GameState, TickInput, tick};

const DEFAULT_CONFIG: &str = include_str!("../assets/config.json");
const DEFAULT_LEVELS: &str = include_str!("../assets/levels.json");

const DEMO_FRAMES: u32 = 600;
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("fatal: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_json(&std::fs::read_to_string(path)?)?,
        None => Config::from_json(DEFAULT_CONFIG)?,
    };
    let width = config.video.width;
    let height = config.video.height;
    log::info!("playfield {width}x{height}");

    let resources = Resources::with_defaults();
    // Bricks fill the top half of the playfield
    let mut levels = load_levels(&resources, DEFAULT_LEVELS, width, height * 0.5)?;
    let first = levels.drain(..).next().ok_or(LevelError::Empty)?;
    log::info!("playing {:?}", first.name);

    let seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64;
    let mut state = GameState::new(width, height, first, seed, &resources);
    let mut audio = NullAudio;
    let mut clock = FrameClock::new();

    let started = Instant::now();
    let mut bricks_destroyed = 0u32;

    for frame in 0..DEMO_FRAMES {
        let input = TickInput {
            launch: frame == 0,
            // Sweep the paddle back and forth once a second
            move_left: (frame / 60) % 2 == 0,
            move_right: (frame / 60) % 2 == 1,
        };

        for _ in 0..clock.advance(FRAME_DT) {
            let events = tick(&mut state, input, SIM_DT);
            for event in &events {
                log::debug!("tick {}: {event:?}", state.time_ticks);
                if *event == GameEvent::BrickDestroyed {
                    bricks_destroyed += 1;
                }
            }
            dispatch_events(&events, &resources, &mut audio);
        }

        let frame_draw = draw_list(&state, clock.alpha());
        log::trace!(
            "frame {frame}: {} commands, shake={}",
            frame_draw.commands.len(),
            frame_draw.shake
        );
    }

    log::info!(
        "ran {} ticks in {:.1?}: {bricks_destroyed} bricks destroyed, level cleared: {}",
        state.time_ticks,
        started.elapsed(),
        state.level.completed
    );
    Ok(())
}
