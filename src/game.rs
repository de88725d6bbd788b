use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::assets::SpriteHandle;
use crate::audio::AudioSink;
use crate::config::{CELL_COUNT, CELL_SIZE, OFFSET};
use crate::draw::{Draw, DrawCommand, PixelRect, DARK_GREEN, GREEN};
use crate::food::Food;
use crate::input::{Command, CommandQueue};
use crate::snake::Snake;

const TITLE: &str = "Snake Game";
const RESUME_HINT: &str = "Press a direction key or Space to play";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Tail,
    /// The snake covers every cell, so food has nowhere to go.
    BoardFull,
}

pub struct Game<A: AudioSink> {
    snake: Snake,
    food: Food,
    running: bool,
    score: u32,
    rng: StdRng,
    audio: A,
}

impl<A: AudioSink> Game<A> {
    pub fn new(audio: A, food_sprite: Option<SpriteHandle>, mut rng: StdRng) -> Self {
        let snake = Snake::new();
        let food = Food::new(&snake, food_sprite, &mut rng);
        Game { snake, food, running: true, score: 0, rng, audio }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Drains player commands ahead of a tick.
    ///
    /// A stopped game wakes on `Confirm` or on a turn the snake accepts;
    /// reversals are dropped without waking it. At most one turn is taken
    /// per tick: the drain stops at the first turn that changes direction,
    /// leaving the rest for later ticks.
    pub fn apply_commands(&mut self, queue: &mut CommandQueue) {
        while let Some(command) = queue.pop() {
            match command {
                Command::Confirm => self.resume(),
                Command::Turn(direction) => {
                    let changes = direction != self.snake.direction();
                    if !self.snake.set_direction(direction) {
                        continue;
                    }
                    self.resume();
                    if changes {
                        break;
                    }
                }
            }
        }
    }

    /// One full tick: queued commands, then a simulation step. Input still
    /// queued when the round ends belongs to the dead round and is dropped.
    pub fn tick(&mut self, queue: &mut CommandQueue) {
        self.apply_commands(queue);

        let was_running = self.running;
        self.update();
        if was_running && !self.running {
            queue.clear();
        }
    }

    fn resume(&mut self) {
        if !self.running {
            info!("game resumed");
            self.running = true;
        }
    }

    /// Runs one simulation step. Does nothing while stopped.
    pub fn update(&mut self) {
        if !self.running {
            return;
        }

        self.snake.advance();
        self.check_food_collision();
        self.check_edge_collision();
        self.check_tail_collision();
    }

    fn check_food_collision(&mut self) {
        if self.snake.head() != self.food.position {
            return;
        }

        self.snake.grow();
        self.score += 1;
        debug!(score = self.score, "food eaten");
        self.audio.on_food_eaten();

        if !self.food.relocate(&self.snake, &mut self.rng) {
            self.game_over(Collision::BoardFull);
        }
    }

    fn check_edge_collision(&mut self) {
        if !self.snake.head().in_bounds(CELL_COUNT) {
            self.game_over(Collision::Wall);
        }
    }

    fn check_tail_collision(&mut self) {
        if self.snake.hits_itself() {
            self.game_over(Collision::Tail);
        }
    }

    fn game_over(&mut self, cause: Collision) {
        info!(?cause, score = self.score, length = self.snake.len(), "game over");

        self.snake.reset();
        // The reset snake covers three cells, so this cannot fail.
        self.food.relocate(&self.snake, &mut self.rng);
        self.audio.on_game_over();
        self.running = false;
        self.score = 0;
    }
}

impl<A: AudioSink> Draw for Game<A> {
    fn draw(&self, out: &mut Vec<DrawCommand>) {
        let board = CELL_SIZE * CELL_COUNT;

        out.push(DrawCommand::Clear(GREEN));
        out.push(DrawCommand::Outline {
            rect: PixelRect::new(OFFSET - 5, OFFSET - 5, board + 10, board + 10),
            thickness: 5,
            color: DARK_GREEN,
        });
        out.push(DrawCommand::Text { text: TITLE.to_string(), x: OFFSET - 5, y: 20, size: 40, color: DARK_GREEN });
        out.push(DrawCommand::Text {
            text: self.score.to_string(),
            x: OFFSET - 5,
            y: OFFSET + board + CELL_SIZE,
            size: 40,
            color: DARK_GREEN,
        });

        self.food.draw(out);
        self.snake.draw(out);

        if !self.running {
            out.push(DrawCommand::Text {
                text: RESUME_HINT.to_string(),
                x: OFFSET + CELL_SIZE,
                y: OFFSET + board / 2,
                size: 20,
                color: DARK_GREEN,
            });
        }
    }
}
