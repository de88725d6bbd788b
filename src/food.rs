use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::assets::SpriteHandle;
use crate::config::{CELL_COUNT, MAX_PLACEMENT_ATTEMPTS};
use crate::draw::{cell_to_pixel, Draw, DrawCommand, PixelRect, FOOD_RED};
use crate::snake::{Cell, Snake};

#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub position: Cell,
    sprite: Option<SpriteHandle>,
}

impl Food {
    pub fn new<R: Rng>(snake: &Snake, sprite: Option<SpriteHandle>, rng: &mut R) -> Self {
        // A fresh snake covers three cells, so there is always room.
        let position = Self::generate_random_position(snake, rng).unwrap_or(Cell::new(0, 0));
        Food { position, sprite }
    }

    /// Picks a uniformly random cell not covered by `snake`.
    ///
    /// Tries a bounded number of blind draws first, then falls back to
    /// choosing among the free cells of a full board scan. `None` means the
    /// snake fills the whole board.
    pub fn generate_random_position<R: Rng>(snake: &Snake, rng: &mut R) -> Option<Cell> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let cell = Cell::new(rng.gen_range(0..CELL_COUNT), rng.gen_range(0..CELL_COUNT));
            if !snake.contains(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = (0..CELL_COUNT)
            .flat_map(|y| (0..CELL_COUNT).map(move |x| Cell::new(x, y)))
            .filter(|&cell| !snake.contains(cell))
            .collect();
        warn!(free = free.len(), "food placement fell back to a board scan");

        free.choose(rng).copied()
    }

    /// Moves the food somewhere off the snake. Returns false, leaving the
    /// food where it was, when there is nowhere to go.
    pub fn relocate<R: Rng>(&mut self, snake: &Snake, rng: &mut R) -> bool {
        match Self::generate_random_position(snake, rng) {
            Some(cell) => {
                debug!(x = cell.x, y = cell.y, "food placed");
                self.position = cell;
                true
            }
            None => false,
        }
    }
}

impl Draw for Food {
    fn draw(&self, out: &mut Vec<DrawCommand>) {
        match self.sprite {
            Some(sprite) => {
                let (x, y) = cell_to_pixel(self.position);
                out.push(DrawCommand::Sprite { sprite, x, y });
            }
            None => out.push(DrawCommand::Rect {
                rect: PixelRect::for_cell(self.position),
                roundness: 0.0,
                color: FOOD_RED,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKey, Assets};
    use crate::snake::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board_except(holes: &[Cell]) -> Vec<Cell> {
        (0..CELL_COUNT)
            .flat_map(|y| (0..CELL_COUNT).map(move |x| Cell::new(x, y)))
            .filter(|cell| !holes.contains(cell))
            .collect()
    }

    #[test]
    fn test_position_never_on_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::new();
        for _ in 0..500 {
            let cell = Food::generate_random_position(&snake, &mut rng).unwrap();
            assert!(!snake.contains(cell));
            assert!(cell.in_bounds(CELL_COUNT));
        }
    }

    #[test]
    fn test_crowded_board_finds_the_last_hole() {
        let mut rng = StdRng::seed_from_u64(1);
        let hole = Cell::new(13, 21);
        let snake = Snake::from_parts(&board_except(&[hole]), Direction::Right);

        assert_eq!(Food::generate_random_position(&snake, &mut rng), Some(hole));
    }

    #[test]
    fn test_full_board_has_no_position() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = Snake::from_parts(&board_except(&[]), Direction::Right);
        assert_eq!(Food::generate_random_position(&snake, &mut rng), None);

        let mut food = Food { position: Cell::new(3, 3), sprite: None };
        assert!(!food.relocate(&snake, &mut rng));
        assert_eq!(food.position, Cell::new(3, 3));
    }

    #[test]
    fn test_draw_without_sprite_falls_back_to_rect() {
        let food = Food { position: Cell::new(2, 3), sprite: None };
        let mut out = Vec::new();
        food.draw(&mut out);
        assert_eq!(
            out,
            vec![DrawCommand::Rect {
                rect: PixelRect::for_cell(Cell::new(2, 3)),
                roundness: 0.0,
                color: FOOD_RED,
            }]
        );
    }

    #[test]
    fn test_draw_with_sprite() {
        let mut assets = Assets::default();
        let sprite = assets.insert_sprite(AssetKey::FoodSprite, "()".to_string());
        let food = Food { position: Cell::new(0, 1), sprite: Some(sprite) };
        let mut out = Vec::new();
        food.draw(&mut out);
        assert_eq!(out, vec![DrawCommand::Sprite { sprite, x: 75, y: 105 }]);
    }
}
