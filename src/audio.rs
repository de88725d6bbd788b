use std::io::Write;

use tracing::debug;

use crate::assets::{AssetKey, Assets, Sound};

const BELL: u8 = 0x07;

/// Receives the game's sound cues. The simulation only reports what
/// happened; what (if anything) gets played is up to the sink.
pub trait AudioSink {
    fn on_food_eaten(&mut self);
    fn on_game_over(&mut self);
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn on_food_eaten(&mut self) {
        (**self).on_food_eaten();
    }

    fn on_game_over(&mut self) {
        (**self).on_game_over();
    }
}

pub struct Silent;

impl AudioSink for Silent {
    fn on_food_eaten(&mut self) {}
    fn on_game_over(&mut self) {}
}

/// Plays sounds as bursts of the terminal bell.
pub struct TerminalBell<W: Write> {
    out: W,
    eat: Option<Sound>,
    wall: Option<Sound>,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, assets: &Assets) -> Self {
        TerminalBell {
            out,
            eat: assets.sound(AssetKey::EatSound),
            wall: assets.sound(AssetKey::WallSound),
        }
    }

    fn play(&mut self, sound: Option<Sound>) {
        let Some(sound) = sound else { return };

        let burst = vec![BELL; sound.pulses as usize];
        let res = self.out.write_all(&burst).and_then(|_| self.out.flush());
        if let Err(err) = res {
            debug!("bell failed: {err}");
        }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn on_food_eaten(&mut self) {
        self.play(self.eat);
    }

    fn on_game_over(&mut self) {
        self.play(self.wall);
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub eaten: usize,
    pub game_overs: usize,
}

#[cfg(test)]
impl AudioSink for Recorder {
    fn on_food_eaten(&mut self) {
        self.eaten += 1;
    }

    fn on_game_over(&mut self) {
        self.game_overs += 1;
    }
}
