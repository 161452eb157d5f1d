//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::grid::Position;
use crate::surface::{Canvas, Glyph, Key, Keyboard, Screen};
use std::collections::VecDeque;

/// A surface that plays back a fixed list of keys and remembers everything drawn on it.
///
/// Once the keys run out it reports an interrupt.
#[derive(Debug, Default)]
pub struct Scripted {
    pub canvas: Canvas,
    pub keys: VecDeque<Key>,
    pub draws: Vec<(Position, Glyph, bool)>,
}

impl Scripted {
    pub fn new(keys: &str) -> Scripted {
        Scripted {
            keys: keys.chars().map(Key::from).collect(),
            ..Scripted::default()
        }
    }

    pub fn with_keys(keys: &[Key]) -> Scripted {
        Scripted {
            keys: keys.iter().copied().collect(),
            ..Scripted::default()
        }
    }

    /// Forget the draws recorded so far.
    pub fn clear(&mut self) {
        self.draws.clear();
    }
}

impl Screen for Scripted {
    fn draw_cell(&mut self, pos: Position, glyph: Glyph, highlighted: bool) {
        self.draws.push((pos, glyph, highlighted));
        self.canvas.draw_cell(pos, glyph, highlighted);
    }

    fn draw_border(&mut self, width: u8, height: u8) {
        self.canvas.draw_border(width, height);
    }

    fn set_status(&mut self, remaining: i32, total: u16) {
        self.canvas.set_status(remaining, total);
    }

    fn announce(&mut self, message: &str) {
        self.canvas.announce(message);
    }

    fn full_redraw(&mut self) {
        self.canvas.full_redraw();
    }
}

impl Keyboard for Scripted {
    fn read_key(&mut self) -> Key {
        self.keys.pop_front().unwrap_or(Key::Interrupt)
    }
}
