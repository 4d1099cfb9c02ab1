//! Aberred Core headless runner.
//!
//! Builds a small demo stage and steps the simulation at the configured
//! fixed delta with scripted input, then reports where the player ended up.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --steps 240 --jump-at 30 --hold 10 --json
//! ```

use std::path::PathBuf;

use aberredcore::game::Game;
use aberredcore::resources::gameconfig::GameConfig;
use aberredcore::resources::input::InputSnapshot;
use clap::Parser;

/// Aberred Core 2D platformer simulation
#[derive(Parser)]
#[command(version, about = "Headless runner for the Aberred Core platformer simulation")]
struct Cli {
    /// INI file with [physics], [player] and [simulation] sections.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of fixed steps to simulate.
    #[arg(long, default_value_t = 600)]
    steps: u64,

    /// Frames on which the jump button goes down. Repeatable.
    #[arg(long = "jump-at", value_name = "FRAME")]
    jump_at: Vec<u64>,

    /// How many frames each jump press is held.
    #[arg(long, default_value_t = 1)]
    hold: u64,

    /// Hold right for the whole run.
    #[arg(long)]
    walk_right: bool,

    /// Print the final snapshot as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Write the effective configuration back to the config path and exit.
    #[arg(long)]
    save_config: bool,
}

fn jump_held(frame: u64, jump_at: &[u64], hold: u64) -> bool {
    jump_at
        .iter()
        .any(|&start| frame >= start && frame < start + hold.max(1))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }

    if cli.save_config {
        match config.save_to_file() {
            Ok(()) => log::info!("Saved config to {}", cli.config.display()),
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut game = Game::new(config);
    game.setup_demo_stage();

    for frame in 0..cli.steps {
        let input = InputSnapshot {
            right: cli.walk_right,
            jump: jump_held(frame, &cli.jump_at, cli.hold),
            ..InputSnapshot::default()
        };
        game.step_fixed(input);

        if frame % 60 == 0 {
            if let Some(player) = game.snapshot().player {
                log::debug!(
                    "frame {}: pos=({:.2}, {:.2}) vel=({:.2}, {:.2}) {:?}",
                    frame,
                    player.position.x,
                    player.position.y,
                    player.velocity.x,
                    player.velocity.y,
                    player.mode
                );
            }
        }
    }

    let snapshot = game.snapshot();
    if cli.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    } else {
        match &snapshot.player {
            Some(player) => log::info!(
                "after {} steps ({:.2}s): player at ({:.2}, {:.2}), {:?}",
                snapshot.frame,
                snapshot.elapsed,
                player.position.x,
                player.position.y,
                player.mode
            ),
            None => log::info!("after {} steps: no player", snapshot.frame),
        }
    }
}
