use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::event_loop::EventLoop;

use arena::app::{spawn_console_reader, ArenaApp};
use arena::logging;
use arena::settings::{Settings, DEFAULT_SETTINGS_FILE};

/// First-person laser range: shoot the roaming capsules before the clock runs out.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Settings file, created on the first change.
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Seed for enemy placement and behaviour.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the stored enemy count for this run.
    #[arg(long)]
    enemies: Option<u32>,

    /// Do not read console commands from stdin.
    #[arg(long)]
    no_console: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut settings = Settings::load(&args.settings);
    if let Some(enemies) = args.enemies {
        settings.enemy_count = enemies;
    }

    let rng = match args.seed {
        Some(seed) => {
            info!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let console = (!args.no_console).then(spawn_console_reader);
    if console.is_some() {
        println!("{}", arena::console::help_text());
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = ArenaApp::new(settings, args.settings, rng, console);
    event_loop.run_app(&mut app).context("event loop terminated with an error")?;
    Ok(())
}
