#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that walks a scripted route across the Quiztasy map.

mod layout;
mod route;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::IVec2;
use quiztasy_core::{Command, Event};
use quiztasy_system_camera::Camera;
use quiztasy_system_game_modes::{BattleOutcome, GameModes, Hero, Screen, ScreenCommand};
use quiztasy_world::{self as world, query, SeededRoll, World};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::route::{parse_viewport, RouteStep};

/// Walks a route across the world map, logging movement, completions and ambushes.
#[derive(Debug, Parser)]
#[command(name = "quiztasy", version, about)]
struct Args {
    /// TOML file describing levels, pathways and ambush points.
    #[arg(long, default_value = "assets/map_layout.toml")]
    layout: PathBuf,
    /// Seed for the ambush random source.
    #[arg(long, default_value_t = 0x51a7_e5ee)]
    seed: u64,
    /// Comma separated hops such as `level:1,level:2,pathway:quadrangle`.
    #[arg(long, value_delimiter = ',', default_value = "level:1,level:2,level:3")]
    route: Vec<RouteStep>,
    /// Hero chosen on the selection screen.
    #[arg(long, value_enum, default_value_t = HeroArg::Boy)]
    hero: HeroArg,
    /// Viewport size used to keep the camera on the player, as WIDTHxHEIGHT.
    #[arg(long, default_value = "1280x720", value_parser = parse_viewport)]
    viewport: IVec2,
    /// Frames after which a move still in flight is cancelled.
    #[arg(long, default_value_t = 10_000)]
    max_frames: u32,
    /// Log level applied when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeroArg {
    Boy,
    Girl,
}

impl From<HeroArg> for Hero {
    fn from(value: HeroArg) -> Self {
        match value {
            HeroArg::Boy => Hero::Boy,
            HeroArg::Girl => Hero::Girl,
        }
    }
}

/// Entry point for the Quiztasy command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let layout = layout::load(&args.layout)?;
    let mut world = World::new(&layout, SeededRoll::new(args.seed))
        .with_context(|| format!("map layout at {} is inconsistent", args.layout.display()))?;
    let mut camera = Camera::new(args.viewport, layout::map_extent(&layout));
    let mut modes = GameModes::default();

    let mut transitions = Vec::new();
    modes.handle_commands(
        &[
            ScreenCommand::OpenHeroSelection,
            ScreenCommand::SelectHero(args.hero.into()),
        ],
        &mut transitions,
    );

    for step in &args.route {
        let mut events = Vec::new();
        world::apply(&mut world, step.command(), &mut events);

        let mut frames = 0;
        while query::is_moving(&world) {
            if frames == args.max_frames {
                warn!(?step, frames, "move did not finish in time, cancelling");
                world::apply(&mut world, Command::CancelMove, &mut events);
                break;
            }
            world::apply(&mut world, Command::Tick, &mut events);
            follow_player(&mut camera, &world, args.viewport);
            frames += 1;
        }

        log_events(&events);
        modes.handle_events(&events, &mut transitions);
        if modes.screen() == Screen::Battle {
            modes.handle_commands(
                &[ScreenCommand::FinishBattle(BattleOutcome::Victory)],
                &mut transitions,
            );
        }
    }

    for transition in &transitions {
        debug!(?transition, "screen transition");
    }

    let completed = query::completed_levels(&world)
        .iter()
        .map(|level| level.get().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let sprung = query::ambushes(&world)
        .iter()
        .filter(|ambush| ambush.triggered)
        .count();
    println!("Standing at {}", query::anchor(&world));
    println!("Completed levels: [{completed}]");
    println!("Ambushes sprung: {sprung}");
    println!("Camera offset: {}", camera.offset());

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quiztasy={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn follow_player(camera: &mut Camera, world: &World, viewport: IVec2) {
    let player = camera.to_screen_space(query::player_position(world));
    camera.pan_by(viewport / 2 - player);
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::PlayerStepped { .. } => {}
            Event::MoveRejected { request, reason } => {
                warn!(?request, %reason, "move rejected");
            }
            Event::AmbushTriggered { ambush, position } => {
                info!(ambush = ambush.get(), %position, "ambushed on the road");
            }
            other => info!(event = ?other, "navigation"),
        }
    }
}
