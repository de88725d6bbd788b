//! Renderer-agnostic drawing commands.
//!
//! The simulation never talks to a screen. `Draw` implementations push
//! commands in pixel space, where a grid cell maps to
//! `OFFSET + cell * CELL_SIZE`, and a renderer decides what pixels mean.

use crate::assets::SpriteHandle;
use crate::config::{CELL_SIZE, OFFSET};
use crate::snake::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

pub const GREEN: Rgba = Rgba(173, 204, 96, 255);
pub const DARK_GREEN: Rgba = Rgba(43, 51, 24, 255);
pub const FOOD_RED: Rgba = Rgba(178, 34, 34, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        PixelRect { x, y, width, height }
    }

    /// The square a grid cell occupies on screen.
    pub fn for_cell(cell: Cell) -> Self {
        let (x, y) = cell_to_pixel(cell);
        PixelRect::new(x, y, CELL_SIZE, CELL_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Rect { rect: PixelRect, roundness: f32, color: Rgba },
    Outline { rect: PixelRect, thickness: i32, color: Rgba },
    Sprite { sprite: SpriteHandle, x: i32, y: i32 },
    Text { text: String, x: i32, y: i32, size: i32, color: Rgba },
}

pub trait Draw {
    fn draw(&self, out: &mut Vec<DrawCommand>);
}

pub fn cell_to_pixel(cell: Cell) -> (i32, i32) {
    (OFFSET + cell.x * CELL_SIZE, OFFSET + cell.y * CELL_SIZE)
}
