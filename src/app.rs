use std::thread::sleep;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::assets::Assets;
use crate::audio::AudioSink;
use crate::config::{frame_duration, tick_interval};
use crate::draw::{Draw, DrawCommand};
use crate::game::Game;
use crate::input::CommandQueue;
use crate::term::TermManager;
use crate::tick::TickDriver;

pub type Sink = Box<dyn AudioSink>;

/// The frame loop: input every frame, a simulation step whenever the tick
/// driver says one is due, then a redraw.
pub struct App {
    game: Game<Sink>,
    assets: Assets,
    commands: CommandQueue,
    ticker: TickDriver,
}

impl App {
    pub fn new(game: Game<Sink>, assets: Assets) -> Self {
        App { game, assets, commands: CommandQueue::new(), ticker: TickDriver::new(Instant::now()) }
    }

    pub fn run(&mut self, term: &mut TermManager) -> Result<()> {
        let frame = frame_duration();
        let mut draw_list: Vec<DrawCommand> = Vec::new();

        info!("game started");

        while !term.should_close() {
            let started = Instant::now();

            term.poll_input(&mut self.commands).context("Failed to read input")?;

            if self.ticker.due(started, tick_interval(self.game.score())) {
                self.game.tick(&mut self.commands);
            }

            draw_list.clear();
            self.game.draw(&mut draw_list);
            term.render(&draw_list, &self.assets).context("Failed to draw frame")?;

            sleep(frame.saturating_sub(started.elapsed()));
        }

        info!(score = self.game.score(), "quit requested");
        Ok(())
    }
}
