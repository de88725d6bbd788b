use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::COMMAND_QUEUE_CAPACITY;
use crate::snake::Direction::{self, *};

/// Something the player asked the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    /// Resume after a game over without turning.
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        InputHandler
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        if is_ctrl_c(&key) {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => KeyAction::Game(Command::Turn(Up)),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => KeyAction::Game(Command::Turn(Left)),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => KeyAction::Game(Command::Turn(Down)),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => KeyAction::Game(Command::Turn(Right)),
            KeyCode::Char(' ') => KeyAction::Game(Command::Confirm),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.modifiers.contains(KeyModifiers::CONTROL) && ev.code == KeyCode::Char('c')
}

/// Commands gathered between two ticks, oldest first. When full the oldest
/// command is dropped so the queue never lags far behind the keyboard.
#[derive(Debug)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
    capacity: usize,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::with_capacity(COMMAND_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CommandQueue { pending: VecDeque::with_capacity(capacity), capacity: capacity.max(1) }
    }

    pub fn push(&mut self, command: Command) {
        if self.pending.len() == self.capacity {
            self.pending.pop_front();
        }
        self.pending.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_and_wasd_keys() {
        let handler = InputHandler::new();
        let cases = [
            (KeyCode::Up, Up),
            (KeyCode::Char('w'), Up),
            (KeyCode::Left, Left),
            (KeyCode::Char('a'), Left),
            (KeyCode::Down, Down),
            (KeyCode::Char('S'), Down),
            (KeyCode::Right, Right),
            (KeyCode::Char('d'), Right),
        ];

        for (code, dir) in cases {
            assert_eq!(handler.handle_key_event(press(code)), KeyAction::Game(Command::Turn(dir)));
        }
    }

    #[test]
    fn test_space_confirms() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(press(KeyCode::Char(' '))), KeyAction::Game(Command::Confirm));
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_releases_and_unknown_keys_are_ignored() {
        let handler = InputHandler::new();
        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;

        assert_eq!(handler.handle_key_event(release), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
    }

    #[test]
    fn test_queue_drops_oldest_when_full() {
        let mut queue = CommandQueue::with_capacity(2);
        queue.push(Command::Turn(Up));
        queue.push(Command::Turn(Left));
        queue.push(Command::Confirm);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(Command::Turn(Left)));
        assert_eq!(queue.pop(), Some(Command::Confirm));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_empties_the_queue() {
        let mut queue = CommandQueue::new();
        queue.push(Command::Turn(Up));
        queue.push(Command::Confirm);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
