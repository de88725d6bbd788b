//! Classic snake on a fixed 25x25 board, played in the terminal.
//!
//! The simulation (`snake`, `food`, `game`) knows nothing about screens,
//! keyboards or speakers. It emits draw commands and sound cues, and takes
//! player commands from a queue; `term`, `audio` and `assets` supply those
//! collaborators, and `app` runs the frame loop.

pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod draw;
pub mod food;
pub mod game;
pub mod input;
pub mod snake;
pub mod term;
pub mod tick;
