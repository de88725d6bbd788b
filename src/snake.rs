use std::collections::VecDeque;

use crate::config::{INITIAL_BODY, INITIAL_DIRECTION};
use crate::draw::{Draw, DrawCommand, PixelRect, DARK_GREEN};
use Direction::*;

/// One square of the board. Valid cells lie in `[0, CELL_COUNT)` on both
/// axes, but a freshly advanced head may briefly sit outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self, cell_count: i32) -> bool {
        (0..cell_count).contains(&self.x) && (0..cell_count).contains(&self.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    grow_next_move: bool,
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            body: INITIAL_BODY.into_iter().collect(),
            direction: INITIAL_DIRECTION,
            grow_next_move: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(body: &[Cell], direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body: body.iter().copied().collect(), direction, grow_next_move: false }
    }

    /// Body cells, head first.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: it starts at three cells and `advance`
        // pushes before it pops.
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a snake built through the public API.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turns the snake unless that would reverse it onto its own neck.
    /// Returns whether the turn was taken.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if self.direction.is_opposite(new_direction) {
            return false;
        }
        self.direction = new_direction;
        true
    }

    /// Keep the tail in place on the next `advance`.
    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }

    pub fn is_growing(&self) -> bool {
        self.grow_next_move
    }

    pub fn advance(&mut self) {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);

        if self.grow_next_move {
            self.grow_next_move = false;
        } else {
            self.body.pop_back();
        }
    }

    pub fn reset(&mut self) {
        self.body.clear();
        self.body.extend(INITIAL_BODY);
        self.direction = INITIAL_DIRECTION;
        self.grow_next_move = false;
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether the head overlaps any other segment.
    pub fn hits_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Draw for Snake {
    fn draw(&self, out: &mut Vec<DrawCommand>) {
        for &cell in &self.body {
            out.push(DrawCommand::Rect {
                rect: PixelRect::for_cell(cell),
                roundness: 0.5,
                color: DARK_GREEN,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(snake: &Snake) -> Vec<Cell> {
        snake.body().iter().copied().collect()
    }

    #[test]
    fn test_new_snake_layout() {
        let snake = Snake::new();
        assert_eq!(cells(&snake), vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)]);
        assert_eq!(snake.direction(), Right);
        assert!(!snake.is_growing());
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_advance_moves_without_growing() {
        let mut snake = Snake::new();
        snake.advance();
        assert_eq!(cells(&snake), vec![Cell::new(7, 9), Cell::new(6, 9), Cell::new(5, 9)]);
    }

    #[test]
    fn test_advance_keeps_tail_when_growing() {
        let mut snake = Snake::new();
        snake.grow();
        snake.advance();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body().back(), Some(&Cell::new(4, 9)));
        assert!(!snake.is_growing());

        snake.advance();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut snake = Snake::new();
        assert!(!snake.set_direction(Left));
        assert_eq!(snake.direction(), Right);

        assert!(snake.set_direction(Up));
        assert!(!snake.set_direction(Down));
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut snake = Snake::new();
        snake.set_direction(Down);
        snake.grow();
        snake.advance();
        snake.advance();
        snake.grow();

        snake.reset();
        assert_eq!(snake, Snake::new());
    }

    #[test]
    fn test_contains_and_self_hit() {
        let snake = Snake::new();
        assert!(snake.contains(Cell::new(5, 9)));
        assert!(!snake.contains(Cell::new(7, 9)));
        assert!(!snake.hits_itself());

        let looped = Snake::from_parts(
            &[Cell::new(5, 5), Cell::new(5, 6), Cell::new(5, 5)],
            Up,
        );
        assert!(looped.hits_itself());
    }

    #[test]
    fn test_opposites() {
        assert!(Up.is_opposite(Down));
        assert!(Left.is_opposite(Right));
        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }

    #[test]
    fn test_draw_emits_one_rect_per_segment() {
        let mut out = Vec::new();
        Snake::new().draw(&mut out);
        assert_eq!(out.len(), 3);
        assert!(matches!(
            out[0],
            DrawCommand::Rect { rect, color: DARK_GREEN, .. } if rect == PixelRect::for_cell(Cell::new(6, 9))
        ));
    }
}
