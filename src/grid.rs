//! The minefield: what is really there, and what the player has seen of it.

use crate::error::{Error, Result};
use crate::rng::PairSource;
use crate::surface::Glyph;

/// Smallest allowed width or height.
pub const MIN_SIZE: u8 = 2;

/// Largest allowed width or height.
pub const MAX_SIZE: u8 = u8::MAX;

/// A position on the board, as `(x, y)`.
///
/// Positions are 1-based: the upper-left cell is `Position(1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position(pub u8, pub u8);

/// What a cell really holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// A safe cell with this many (1 to 8) mined neighbours.
    Count(u8),
    Mine,
}

impl Cell {
    /// Number of mined neighbours of a safe cell.
    pub fn count(self) -> Option<u8> {
        match self {
            Cell::Empty => Some(0),
            Cell::Count(n) => Some(n),
            Cell::Mine => None,
        }
    }
}

/// What the player sees of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Covered,
    Flagged,
    /// An uncovered safe cell showing its neighbour count (zero when empty).
    Revealed(u8),
    Exploded,
}

/// Board on which the game is played.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
    tiles: Vec<Tile>,
    mines: u16,
    flags: u16,
    correct_flags: u16,
    over: bool,
}

// Construction
impl Grid {
    /// Create a board with no mines and every cell covered.
    fn blank(width: u8, height: u8) -> Result<Grid> {
        if width < MIN_SIZE || height < MIN_SIZE {
            return Err(Error::Configuration(format!(
                "a {}x{} board is too small, the minimum is {}x{}",
                width, height, MIN_SIZE, MIN_SIZE
            )));
        }
        let area = width as usize * height as usize;

        Ok(Grid {
            width,
            height,
            cells: vec![Cell::Empty; area],
            tiles: vec![Tile::Covered; area],
            mines: 0,
            flags: 0,
            correct_flags: 0,
            over: false,
        })
    }

    /// Create a board with `mines` mines at positions drawn from `source`.
    ///
    /// Gives up with [`Error::Placement`] after `10 * width * height` draws.
    pub fn generate<S: PairSource>(
        width: u8,
        height: u8,
        mines: u16,
        source: &mut S,
    ) -> Result<Grid> {
        let mut grid = Grid::blank(width, height)?;
        let limit = 10 * width as u32 * height as u32;
        let mut attempts = 0;

        while grid.mines < mines {
            if attempts >= limit {
                log::debug!("gave up placing mines after {} attempts", attempts);
                return Err(Error::Placement {
                    attempts,
                    placed: grid.mines,
                    target: mines,
                    width,
                    height,
                });
            }
            attempts += 1;

            let (x, y) = source.next_pair(1..=width, 1..=height);
            let i = grid.index(Position(x, y));
            if grid.cells[i] != Cell::Mine {
                grid.cells[i] = Cell::Mine;
                grid.mines += 1;
            }
        }
        log::debug!("placed {} mines in {} attempts", mines, attempts);

        grid.count_neighbors();
        Ok(grid)
    }

    /// Create a board with mines at exactly the given positions.
    pub fn with_mines(width: u8, height: u8, mines: &[Position]) -> Result<Grid> {
        let mut grid = Grid::blank(width, height)?;

        for &pos in mines {
            if !grid.contains(pos) {
                return Err(Error::Configuration(format!(
                    "mine at ({}, {}) is off the {}x{} board",
                    pos.0, pos.1, width, height
                )));
            }
            let i = grid.index(pos);
            if grid.cells[i] != Cell::Mine {
                grid.cells[i] = Cell::Mine;
                grid.mines += 1;
            }
        }

        grid.count_neighbors();
        Ok(grid)
    }

    /// Fill in the neighbour count of every safe cell.
    fn count_neighbors(&mut self) {
        for pos in self.positions() {
            let i = self.index(pos);
            if self.cells[i] == Cell::Mine {
                continue;
            }
            let count = self
                .neighbors(pos)
                .filter(|&adj| self.cell(adj) == Cell::Mine)
                .count() as u8;
            if count > 0 {
                self.cells[i] = Cell::Count(count);
            }
        }
    }
}

// Accessors
impl Grid {
    /// Get the board width.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get the board height.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get the number of mines on the board.
    pub fn mines(&self) -> u16 {
        self.mines
    }

    /// Get the number of flags placed.
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Get the number of flags that sit on mines.
    pub fn correct_flags(&self) -> u16 {
        self.correct_flags
    }

    /// Get the mines left to flag, as shown to the player.
    pub fn remaining(&self) -> i32 {
        i32::from(self.mines) - i32::from(self.flags)
    }

    /// Check if the end-of-game reveal has happened.
    pub fn over(&self) -> bool {
        self.over
    }

    /// Check if a position is on the board.
    pub fn contains(&self, Position(x, y): Position) -> bool {
        (1..=self.width).contains(&x) && (1..=self.height).contains(&y)
    }

    /// Get what a cell really holds.
    ///
    /// # Panics
    ///
    /// Will panic if `pos` is off the board.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Get what the player sees of a cell.
    ///
    /// # Panics
    ///
    /// Will panic if `pos` is off the board.
    pub fn tile(&self, pos: Position) -> Tile {
        self.tiles[self.index(pos)]
    }

    /// Get the glyph to display for a cell.
    ///
    /// Once the game is over, covered mines and flags show what was underneath.
    pub fn glyph(&self, pos: Position) -> Glyph {
        match (self.tile(pos), self.cell(pos)) {
            (Tile::Covered, Cell::Mine) if self.over => Glyph::Mine,
            (Tile::Covered, _) => Glyph::Cover,
            (Tile::Flagged, Cell::Mine) if self.over => Glyph::GoodGuess,
            (Tile::Flagged, _) if self.over => Glyph::BadGuess,
            (Tile::Flagged, _) => Glyph::Flag,
            (Tile::Revealed(0), _) => Glyph::Blank,
            (Tile::Revealed(n), _) => Glyph::Count(n),
            (Tile::Exploded, _) => Glyph::Kaboom,
        }
    }

    /// Iterate over every position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);
        (1..=height).flat_map(move |y| (1..=width).map(move |x| Position(x, y)))
    }

    /// Iterate over the up to 8 positions around `pos`.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        const AROUND: [(i16, i16); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        self.offset(pos, &AROUND)
    }

    /// Iterate over the up to 4 positions directly above, below, left and right of `pos`.
    pub fn orthogonal(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        const BESIDE: [(i16, i16); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
        self.offset(pos, &BESIDE)
    }

    fn offset<'a>(
        &'a self,
        Position(x, y): Position,
        deltas: &'static [(i16, i16)],
    ) -> impl Iterator<Item = Position> + 'a {
        deltas.iter().filter_map(move |&(dx, dy)| {
            let x = u8::try_from(i16::from(x) + dx).ok()?;
            let y = u8::try_from(i16::from(y) + dy).ok()?;
            let pos = Position(x, y);
            self.contains(pos).then_some(pos)
        })
    }

    fn index(&self, Position(x, y): Position) -> usize {
        assert!(
            self.contains(Position(x, y)),
            "({}, {}) is off the board",
            x,
            y
        );
        (y as usize - 1) * self.width as usize + (x as usize - 1)
    }
}

// Mutators
impl Grid {
    /// Flag a covered cell, or unflag a flagged one.
    ///
    /// Any other cell is left alone. Returns the resulting tile.
    ///
    /// # Panics
    ///
    /// Will panic if `pos` is off the board.
    pub fn toggle_flag(&mut self, pos: Position) -> Tile {
        let i = self.index(pos);
        if self.over {
            return self.tiles[i];
        }
        let mined = self.cells[i] == Cell::Mine;

        match self.tiles[i] {
            Tile::Covered => {
                self.tiles[i] = Tile::Flagged;
                self.flags += 1;
                if mined {
                    self.correct_flags += 1;
                }
            }
            Tile::Flagged => {
                self.tiles[i] = Tile::Covered;
                self.flags -= 1;
                if mined {
                    self.correct_flags -= 1;
                }
            }
            _ => (),
        }

        self.tiles[i]
    }

    /// Uncover a covered cell.
    ///
    /// A mine explodes; anything else shows its neighbour count. Cells that aren't covered
    /// are left alone. Returns the resulting tile.
    ///
    /// # Panics
    ///
    /// Will panic if `pos` is off the board.
    pub fn reveal(&mut self, pos: Position) -> Tile {
        let i = self.index(pos);
        if self.tiles[i] == Tile::Covered && !self.over {
            self.tiles[i] = match self.cells[i].count() {
                Some(n) => Tile::Revealed(n),
                None => Tile::Exploded,
            };
        }
        self.tiles[i]
    }

    /// Expose the board at the end of the game.
    ///
    /// Covered mines show as mines, flags show whether they were right, everything else
    /// stays as it was. Returns every cell with the glyph it should now be drawn with.
    pub fn reveal_all_for_game_over(&mut self) -> Vec<(Position, Glyph)> {
        self.over = true;
        self.positions().map(|pos| (pos, self.glyph(pos))).collect()
    }
}
