//! The contract between the game and whatever draws it.

use crate::grid::Position;
use std::fmt::{self, Display};

/// Something the board can be painted on.
pub trait Screen {
    /// Paint one cell.
    fn draw_cell(&mut self, pos: Position, glyph: Glyph, highlighted: bool);

    /// Paint the frame around a `width` by `height` board.
    fn draw_border(&mut self, width: u8, height: u8);

    /// Update the mines-left readout.
    fn set_status(&mut self, remaining: i32, total: u16);

    /// Show an end-of-game message next to the status.
    fn announce(&mut self, message: &str);

    /// Repaint everything.
    fn full_redraw(&mut self);
}

/// A blocking source of key events.
pub trait Keyboard {
    fn read_key(&mut self) -> Key;
}

/// A key event, already decoded from whatever the terminal sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    End,
    /// The player asked to leave immediately (interrupt, end of input).
    Interrupt,
}

impl From<char> for Key {
    fn from(c: char) -> Key {
        match c {
            // Control characters arrive raw on a cooked terminal
            '\u{1}'..='\u{1a}' => Key::Ctrl((b'a' + c as u8 - 1) as char),
            c => Key::Char(c),
        }
    }
}

/// What a single cell looks like on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Cover,
    Flag,
    Blank,
    Count(u8),
    Kaboom,
    Mine,
    GoodGuess,
    BadGuess,
    WhereAmI,
}

impl Glyph {
    /// Get the character this glyph is drawn with.
    pub fn symbol(self) -> char {
        match self {
            Glyph::Cover => '.',
            Glyph::Flag | Glyph::GoodGuess => '#',
            Glyph::Blank => ' ',
            Glyph::Count(n) => char::from_digit(n.into(), 10).unwrap_or('?'),
            Glyph::Kaboom => '!',
            Glyph::Mine => '*',
            Glyph::BadGuess => 'X',
            Glyph::WhereAmI => '?',
        }
    }
}

impl Display for Glyph {
    /// Display a glyph.
    ///
    /// | Glyph                     | Char |
    /// | ------------------------- | ---- |
    /// | `Cover`                   | `.`  |
    /// | `Flag`, `GoodGuess`       | `#`  |
    /// | `Blank`                   | ` `  |
    /// | `Count(n)`                | `n`  |
    /// | `Kaboom`                  | `!`  |
    /// | `Mine`                    | `*`  |
    /// | `BadGuess`                | `X`  |
    /// | `WhereAmI`                | `?`  |
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// In-memory screen buffer.
///
/// Front ends let the game paint here and then copy the buffer to the terminal in
/// whatever way suits them.
#[derive(Clone, Debug, Default)]
pub struct Canvas {
    width: u8,
    height: u8,
    glyphs: Vec<Glyph>,
    highlight: Option<Position>,
    remaining: i32,
    total: u16,
    message: Option<String>,
    redraw: bool,
}

impl Canvas {
    /// Create an empty canvas; the first `draw_border` sizes it.
    pub fn new() -> Canvas {
        Canvas::default()
    }

    /// Get the board dimensions as `(width, height)`.
    pub fn size(&self) -> (u8, u8) {
        (self.width, self.height)
    }

    /// Get the glyph last painted at a position.
    pub fn glyph(&self, pos: Position) -> Option<Glyph> {
        self.index(pos).map(|i| self.glyphs[i])
    }

    /// Get the cell painted under the cursor, if any.
    pub fn highlighted(&self) -> Option<Position> {
        self.highlight
    }

    /// Get the text of the status line.
    pub fn status_line(&self) -> String {
        match &self.message {
            Some(message) => format!("{}/{} {}", self.remaining, self.total, message),
            None => format!("{}/{}", self.remaining, self.total),
        }
    }

    /// Check, and clear, a pending full redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    fn index(&self, Position(x, y): Position) -> Option<usize> {
        let inside = (1..=self.width).contains(&x) && (1..=self.height).contains(&y);
        inside.then(|| (y as usize - 1) * self.width as usize + (x as usize - 1))
    }
}

impl Screen for Canvas {
    fn draw_cell(&mut self, pos: Position, glyph: Glyph, highlighted: bool) {
        let Some(i) = self.index(pos) else {
            return;
        };
        self.glyphs[i] = glyph;
        if highlighted {
            self.highlight = Some(pos);
        } else if self.highlight == Some(pos) {
            self.highlight = None;
        }
    }

    fn draw_border(&mut self, width: u8, height: u8) {
        self.width = width;
        self.height = height;
        self.glyphs = vec![Glyph::Cover; width as usize * height as usize];
        self.highlight = None;
        self.message = None;
    }

    fn set_status(&mut self, remaining: i32, total: u16) {
        self.remaining = remaining;
        self.total = total;
    }

    fn announce(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }

    fn full_redraw(&mut self) {
        self.redraw = true;
    }
}

impl Display for Canvas {
    /// Display the frame, the board and the status line.
    ///
    /// Each cell takes two columns; the highlighted cell is marked with `>`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rule = "-".repeat(2 * self.width as usize + 1);

        writeln!(f, "+{}+", rule)?;
        for y in 1..=self.height {
            write!(f, "|")?;
            for x in 1..=self.width {
                let pos = Position(x, y);
                let mark = if self.highlight == Some(pos) { '>' } else { ' ' };
                let glyph = self.glyph(pos).unwrap_or(Glyph::Cover);
                write!(f, "{}{}", mark, glyph)?;
            }
            writeln!(f, " |")?;
        }
        writeln!(f, "+{}+", rule)?;
        write!(f, "{}", self.status_line())
    }
}
