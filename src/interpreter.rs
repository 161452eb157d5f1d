//! Turning key presses into moves.

use crate::grid::{Grid, Position};
use crate::surface::{Glyph, Key, Keyboard, Screen};

/// An action and the board position to perform it on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    pub action: Action,
    pub pos: Position,
}

impl Turn {
    /// Create a new Turn.
    pub fn new(action: Action, pos: Position) -> Turn {
        Turn { action, pos }
    }
}

/// Actions that end the player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Step,
    Flag,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Places the cursor can jump straight to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Jump {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    TopEdge,
    BottomEdge,
    LeftEdge,
    RightEdge,
    Middle,
}

/// What a key asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Jump(Jump),
    Peek,
    Redraw,
    Act(Action),
}

impl Command {
    /// Decode a key.
    ///
    /// | Key                         | Command                   |
    /// | --------------------------- | ------------------------- |
    /// | `h` `j` `k` `l`, arrows     | move one cell             |
    /// | `q` `p` `z` `/`             | jump to a corner          |
    /// | `H` `L` `0` `$`             | jump to an edge           |
    /// | `M`                         | jump to the middle        |
    /// | `?`                         | peek                      |
    /// | `Ctrl-L`                    | redraw                    |
    /// | `s` `*` `End`               | step                      |
    /// | `f` `+`                     | flag                      |
    /// | `Q`                         | quit                      |
    pub fn from_key(key: Key) -> Option<Command> {
        let command = match key {
            Key::Char('h') | Key::Left => Command::Move(Direction::Left),
            Key::Char('j') | Key::Down => Command::Move(Direction::Down),
            Key::Char('k') | Key::Up => Command::Move(Direction::Up),
            Key::Char('l') | Key::Right => Command::Move(Direction::Right),
            Key::Char('q') => Command::Jump(Jump::UpperLeft),
            Key::Char('p') => Command::Jump(Jump::UpperRight),
            Key::Char('z') => Command::Jump(Jump::LowerLeft),
            Key::Char('/') => Command::Jump(Jump::LowerRight),
            Key::Char('H') => Command::Jump(Jump::TopEdge),
            Key::Char('L') => Command::Jump(Jump::BottomEdge),
            Key::Char('0') => Command::Jump(Jump::LeftEdge),
            Key::Char('$') => Command::Jump(Jump::RightEdge),
            Key::Char('M') => Command::Jump(Jump::Middle),
            Key::Char('?') => Command::Peek,
            Key::Ctrl('l') => Command::Redraw,
            Key::Char('s' | '*') | Key::End => Command::Act(Action::Step),
            Key::Char('f' | '+') => Command::Act(Action::Flag),
            Key::Char('Q') => Command::Act(Action::Quit),
            _ => return None,
        };
        Some(command)
    }
}

/// Tracks the cursor while the player picks a cell.
#[derive(Clone, Debug)]
pub struct Interpreter {
    width: u8,
    height: u8,
    cursor: Position,
    peeking: bool,
}

impl Interpreter {
    /// Create an interpreter for a `width` by `height` board, with the cursor in the middle.
    pub fn new(width: u8, height: u8) -> Interpreter {
        Interpreter {
            width,
            height,
            cursor: middle(width, height),
            peeking: false,
        }
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Clamp any coordinates onto the board.
    pub fn clamp(&self, x: i32, y: i32) -> Position {
        let x = x.clamp(1, i32::from(self.width)) as u8;
        let y = y.clamp(1, i32::from(self.height)) as u8;
        Position(x, y)
    }

    /// Handle one key.
    ///
    /// Returns a turn once the player steps, flags or quits; everything else only moves
    /// the cursor or changes the display. Unknown keys are ignored.
    pub fn feed<S>(&mut self, key: Key, grid: &Grid, screen: &mut S) -> Option<Turn>
    where
        S: Screen + ?Sized,
    {
        let command = Command::from_key(key)?;
        let from = self.cursor;
        let Position(x, y) = from;
        let (x, y) = (i32::from(x), i32::from(y));

        self.cursor = match command {
            Command::Act(action) => {
                self.unpeek(grid, screen);
                return Some(Turn::new(action, self.cursor));
            }
            Command::Peek => {
                if self.peeking {
                    self.unpeek(grid, screen);
                } else {
                    self.peeking = true;
                    screen.draw_cell(from, Glyph::WhereAmI, false);
                }
                return None;
            }
            Command::Redraw => {
                screen.full_redraw();
                return None;
            }
            Command::Move(direction) => match direction {
                Direction::Up => self.clamp(x, y - 1),
                Direction::Down => self.clamp(x, y + 1),
                Direction::Left => self.clamp(x - 1, y),
                Direction::Right => self.clamp(x + 1, y),
            },
            Command::Jump(jump) => {
                let (width, height) = (i32::from(self.width), i32::from(self.height));
                match jump {
                    Jump::UpperLeft => self.clamp(1, 1),
                    Jump::UpperRight => self.clamp(width, 1),
                    Jump::LowerLeft => self.clamp(1, height),
                    Jump::LowerRight => self.clamp(width, height),
                    Jump::TopEdge => self.clamp(x, 1),
                    Jump::BottomEdge => self.clamp(x, height),
                    Jump::LeftEdge => self.clamp(1, y),
                    Jump::RightEdge => self.clamp(width, y),
                    Jump::Middle => middle(self.width, self.height),
                }
            }
        };

        if self.cursor != from {
            self.peeking = false;
            screen.draw_cell(from, grid.glyph(from), false);
            screen.draw_cell(self.cursor, grid.glyph(self.cursor), true);
        }
        None
    }

    /// Read keys until the player steps, flags or quits.
    ///
    /// Returns `None` if the player interrupts instead.
    pub fn next_move<S>(&mut self, grid: &Grid, surface: &mut S) -> Option<Turn>
    where
        S: Screen + Keyboard + ?Sized,
    {
        loop {
            let key = surface.read_key();
            if key == Key::Interrupt {
                return None;
            }
            if let Some(turn) = self.feed(key, grid, surface) {
                return Some(turn);
            }
        }
    }

    /// Take the "where am I" marker off the cursor cell, if it is there.
    fn unpeek<S>(&mut self, grid: &Grid, screen: &mut S)
    where
        S: Screen + ?Sized,
    {
        if self.peeking {
            self.peeking = false;
            screen.draw_cell(self.cursor, grid.glyph(self.cursor), true);
        }
    }
}

fn middle(width: u8, height: u8) -> Position {
    Position(width / 2 + 1, height / 2 + 1)
}
