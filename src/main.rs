use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use snake_game::app::{App, Sink};
use snake_game::assets::{AssetKey, Assets};
use snake_game::audio::{Silent, TerminalBell};
use snake_game::game::Game;
use snake_game::term::TermManager;

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Terminal snake: eat, grow, don't hit anything")]
struct Args {
    /// Directory holding food-sprite.txt, eat-sound.txt and wall-sound.txt
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Never ring the terminal bell
    #[arg(long)]
    mute: bool,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the screen belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let assets = Assets::load(&args.assets);
    let audio: Sink = if args.mute { Box::new(Silent) } else { Box::new(TerminalBell::new(stdout(), &assets)) };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game = Game::new(audio, assets.sprite_handle(AssetKey::FoodSprite), rng);

    let mut term = TermManager::new().context("Failed to open terminal")?;
    let mut app = App::new(game, assets);

    // The terminal is restored even when the game loop fails.
    let result = term
        .setup()
        .context("Failed to set up terminal")
        .and_then(|()| app.run(&mut term));
    let restored = term.restore().context("Failed to restore terminal");

    result?;
    restored
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else { return Ok(()) };

    let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to install log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_subscriber_install_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(init_tracing(None).is_ok());
        assert!(init_tracing(Some(&dir.path().join("first.log"))).is_ok());

        let err = init_tracing(Some(&dir.path().join("second.log"))).unwrap_err();
        assert!(err.to_string().contains("log subscriber"));
    }
}
