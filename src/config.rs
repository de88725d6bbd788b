use std::time::Duration;

use crate::snake::{Cell, Direction};

/// Side of one grid cell, in pixels.
pub const CELL_SIZE: i32 = 30;
/// Cells per side of the square board.
pub const CELL_COUNT: i32 = 25;
/// Distance between the window edge and the board, in pixels.
pub const OFFSET: i32 = 75;

pub const TARGET_FPS: u32 = 60;

pub const BASE_TICK_INTERVAL: f64 = 0.2;
pub const MIN_TICK_INTERVAL: f64 = 0.1;
pub const SPEEDUP_PER_POINT: f64 = 0.01;

pub const INITIAL_BODY: [Cell; 3] = [Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)];
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Random draws tried before food placement falls back to scanning the board.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Commands the input side may have in flight between two ticks.
pub const COMMAND_QUEUE_CAPACITY: usize = 4;

pub fn frame_duration() -> Duration {
    Duration::from_secs_f64(1.0 / TARGET_FPS as f64)
}

/// Time between simulation steps for a given score. Speeds up by one
/// hundredth of a second per point, never faster than `MIN_TICK_INTERVAL`.
pub fn tick_interval(score: u32) -> Duration {
    let secs = BASE_TICK_INTERVAL - score as f64 * SPEEDUP_PER_POINT;
    Duration::from_secs_f64(secs.max(MIN_TICK_INTERVAL))
}
