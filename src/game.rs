//! Turn-by-turn play.

use crate::cascade::cascade;
use crate::config::Config;
use crate::error::Result;
use crate::grid::{Grid, Position, Tile};
use crate::interpreter::{Action, Interpreter, Turn};
use crate::rng::PairSource;
use crate::surface::{Canvas, Glyph, Key, Keyboard, Screen};
use std::fmt::{self, Display};

/// Where a game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
    Quit,
}

impl Status {
    /// Check if the game is over.
    pub fn over(self) -> bool {
        self != Status::Playing
    }

    /// Get the message shown when the game ends this way.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Status::Playing => None,
            Status::Won => Some("You won!"),
            Status::Lost => Some("Boom!"),
            Status::Quit => Some("Quit."),
        }
    }
}

/// Minesweeper game.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    interpreter: Interpreter,
    status: Status,
}

impl Game {
    /// Create a new game on a prepared board.
    pub fn new(grid: Grid) -> Game {
        log::info!(
            "new {}x{} game with {} mines",
            grid.width(),
            grid.height(),
            grid.mines()
        );
        let interpreter = Interpreter::new(grid.width(), grid.height());
        Game {
            grid,
            interpreter,
            status: Status::Playing,
        }
    }

    /// Create a new game with mines placed from `source`.
    pub fn generate<S: PairSource>(config: &Config, source: &mut S) -> Result<Game> {
        let grid = Grid::generate(config.width, config.height, config.mines, source)?;
        Ok(Game::new(grid))
    }

    /// Get the board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get where the game stands.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> Position {
        self.interpreter.cursor()
    }

    /// Paint the whole game.
    pub fn start<S>(&self, screen: &mut S)
    where
        S: Screen + ?Sized,
    {
        screen.draw_border(self.grid.width(), self.grid.height());
        for pos in self.grid.positions() {
            self.draw(pos, self.grid.glyph(pos), screen);
        }
        screen.set_status(self.grid.remaining(), self.grid.mines());
        if let Some(message) = self.status.message() {
            screen.announce(message);
        }
    }

    /// Play a turn of the game.
    ///
    /// Turns are ignored once the game is over, as are flags and steps off the board.
    pub fn play<S>(&mut self, turn: Turn, screen: &mut S) -> Status
    where
        S: Screen + ?Sized,
    {
        if self.status.over() {
            return self.status;
        }
        let Turn { action, pos } = turn;
        if action != Action::Quit && !self.grid.contains(pos) {
            log::warn!("ignoring {:?} off the board at ({}, {})", action, pos.0, pos.1);
            return self.status;
        }

        match action {
            Action::Flag => {
                self.grid.toggle_flag(pos);
                self.draw(pos, self.grid.glyph(pos), screen);
                if self.grid.flags() > self.grid.mines() {
                    self.finish(Status::Lost, screen);
                }
            }
            Action::Step => {
                if self.grid.tile(pos) == Tile::Covered {
                    self.step(pos, screen);
                }
            }
            Action::Quit => self.finish(Status::Quit, screen),
        }

        if self.status == Status::Playing && self.grid.correct_flags() == self.grid.mines() {
            self.finish(Status::Won, screen);
        }
        screen.set_status(self.grid.remaining(), self.grid.mines());

        self.status
    }

    /// Handle one key press.
    ///
    /// Keys are ignored once the game is over.
    pub fn feed<S>(&mut self, key: Key, screen: &mut S) -> Status
    where
        S: Screen + ?Sized,
    {
        if self.status.over() {
            return self.status;
        }
        match self.interpreter.feed(key, &self.grid, screen) {
            Some(turn) => self.play(turn, screen),
            None => self.status,
        }
    }

    /// Play the game to the end, reading keys from `surface`.
    ///
    /// Returns `None` if the player interrupts the game.
    pub fn run<S>(&mut self, surface: &mut S) -> Option<Status>
    where
        S: Screen + Keyboard + ?Sized,
    {
        self.start(surface);
        while !self.status.over() {
            let Some(turn) = self.interpreter.next_move(&self.grid, surface) else {
                log::info!("game interrupted");
                return None;
            };
            self.play(turn, surface);
        }
        Some(self.status)
    }

    /// Uncover a covered cell.
    fn step<S>(&mut self, pos: Position, screen: &mut S)
    where
        S: Screen + ?Sized,
    {
        match self.grid.reveal(pos) {
            Tile::Exploded => {
                self.draw(pos, Glyph::Kaboom, screen);
                self.finish(Status::Lost, screen);
            }
            Tile::Revealed(0) => {
                self.draw(pos, Glyph::Blank, screen);
                for other in cascade(&mut self.grid, pos) {
                    self.draw(other, self.grid.glyph(other), screen);
                }
            }
            tile => {
                log::trace!("uncovered {:?} at ({}, {})", tile, pos.0, pos.1);
                self.draw(pos, self.grid.glyph(pos), screen);
            }
        }
    }

    /// End the game and show the board.
    fn finish<S>(&mut self, status: Status, screen: &mut S)
    where
        S: Screen + ?Sized,
    {
        self.status = status;
        for (pos, glyph) in self.grid.reveal_all_for_game_over() {
            self.draw(pos, glyph, screen);
        }
        if let Some(message) = status.message() {
            screen.announce(message);
        }
        log::info!(
            "game over: {:?} with {} of {} mines flagged",
            status,
            self.grid.correct_flags(),
            self.grid.mines()
        );
    }

    /// Draw a cell, highlighted if the cursor is on it.
    fn draw<S>(&self, pos: Position, glyph: Glyph, screen: &mut S)
    where
        S: Screen + ?Sized,
    {
        screen.draw_cell(pos, glyph, pos == self.cursor());
    }
}

impl Display for Game {
    /// Display the game.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut canvas = Canvas::new();
        self.start(&mut canvas);
        write!(f, "{}", canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomPairs;
    use crate::test_support::Scripted;

    fn setup(keys: &str) -> (Game, Scripted) {
        // * . . . .
        // . . . . .
        // . . . . .
        // . . . . *
        let grid = Grid::with_mines(5, 4, &[Position(1, 1), Position(5, 4)]).unwrap();
        (Game::new(grid), Scripted::new(keys))
    }

    fn glyph(surface: &Scripted, x: u8, y: u8) -> Glyph {
        surface.canvas.glyph(Position(x, y)).unwrap()
    }

    #[test]
    fn starts_covered() {
        let (game, _) = setup("");

        let expected = "\
+-----------+
| . . . . . |
| . . . . . |
| . .>. . . |
| . . . . . |
+-----------+
2/2";
        assert_eq!(game.to_string(), expected);
    }

    #[test]
    fn flagging_every_mine_wins() {
        let (mut game, mut surface) = setup("qf/f");

        assert_eq!(game.run(&mut surface), Some(Status::Won));
        assert_eq!(game.grid().correct_flags(), 2);
        assert_eq!(glyph(&surface, 1, 1), Glyph::GoodGuess);
        assert_eq!(glyph(&surface, 5, 4), Glyph::GoodGuess);
        assert_eq!(surface.canvas.status_line(), "0/2 You won!");
    }

    #[test]
    fn stepping_on_a_mine_loses() {
        let (mut game, mut surface) = setup("/fqlfhs");

        assert_eq!(game.run(&mut surface), Some(Status::Lost));
        assert_eq!(glyph(&surface, 1, 1), Glyph::Kaboom);
        assert_eq!(glyph(&surface, 5, 4), Glyph::GoodGuess);
        assert_eq!(glyph(&surface, 2, 1), Glyph::BadGuess);
        assert_eq!(glyph(&surface, 3, 3), Glyph::Cover);
        assert_eq!(surface.canvas.status_line(), "0/2 Boom!");
    }

    #[test]
    fn end_of_game_shows_hidden_mines() {
        let grid = Grid::with_mines(3, 3, &[Position(1, 1), Position(3, 3)]).unwrap();
        let mut game = Game::new(grid);
        let mut surface = Scripted::new("qs");

        assert_eq!(game.run(&mut surface), Some(Status::Lost));
        assert_eq!(glyph(&surface, 1, 1), Glyph::Kaboom);
        assert_eq!(glyph(&surface, 3, 3), Glyph::Mine);
    }

    #[test]
    fn too_many_flags_loses() {
        let (mut game, mut surface) = setup("flflf");

        assert_eq!(game.run(&mut surface), Some(Status::Lost));
        assert_eq!(game.grid().flags(), 3);
        assert_eq!(glyph(&surface, 3, 3), Glyph::BadGuess);
        assert_eq!(glyph(&surface, 1, 1), Glyph::Mine);
        assert_eq!(surface.canvas.status_line(), "-1/2 Boom!");
    }

    #[test]
    fn quitting_shows_the_board() {
        let (mut game, mut surface) = setup("Q");

        assert_eq!(game.run(&mut surface), Some(Status::Quit));
        assert_eq!(glyph(&surface, 1, 1), Glyph::Mine);
        assert_eq!(glyph(&surface, 5, 4), Glyph::Mine);
        assert_eq!(glyph(&surface, 3, 3), Glyph::Cover);
        assert_eq!(game.cursor(), Position(3, 3));
    }

    #[test]
    fn stepping_on_empty_cascades() {
        let (mut game, mut surface) = setup("");
        game.start(&mut surface);

        assert_eq!(game.feed(Key::Char('s'), &mut surface), Status::Playing);
        assert_eq!(glyph(&surface, 3, 3), Glyph::Blank);
        assert_eq!(glyph(&surface, 2, 2), Glyph::Count(1));
        assert_eq!(glyph(&surface, 4, 3), Glyph::Count(1));
        assert_eq!(glyph(&surface, 1, 1), Glyph::Cover);
        assert_eq!(glyph(&surface, 5, 4), Glyph::Cover);
        assert_eq!(surface.canvas.highlighted(), Some(Position(3, 3)));
    }

    #[test]
    fn stepping_on_a_number_stays_put() {
        let (mut game, mut surface) = setup("");
        game.start(&mut surface);

        let status = game.play(Turn::new(Action::Step, Position(2, 1)), &mut surface);
        assert_eq!(status, Status::Playing);
        assert_eq!(game.grid().tile(Position(2, 1)), Tile::Revealed(1));
        assert_eq!(game.grid().tile(Position(3, 1)), Tile::Covered);
    }

    #[test]
    fn stepping_twice_does_nothing() {
        let (mut game, mut surface) = setup("");
        game.start(&mut surface);
        game.play(Turn::new(Action::Step, Position(2, 1)), &mut surface);
        surface.clear();

        let status = game.play(Turn::new(Action::Step, Position(2, 1)), &mut surface);
        assert_eq!(status, Status::Playing);
        assert!(surface.draws.is_empty());
    }

    #[test]
    fn flags_cannot_be_stepped_on() {
        let (mut game, mut surface) = setup("");
        game.start(&mut surface);
        game.play(Turn::new(Action::Flag, Position(1, 1)), &mut surface);

        let status = game.play(Turn::new(Action::Step, Position(1, 1)), &mut surface);
        assert_eq!(status, Status::Playing);
        assert_eq!(game.grid().tile(Position(1, 1)), Tile::Flagged);
        assert_eq!(surface.canvas.status_line(), "1/2");
    }

    #[test]
    fn unflagging_restores_counts() {
        let (mut game, mut surface) = setup("");
        game.start(&mut surface);

        game.play(Turn::new(Action::Flag, Position(1, 1)), &mut surface);
        game.play(Turn::new(Action::Flag, Position(1, 1)), &mut surface);
        assert_eq!(game.grid().flags(), 0);
        assert_eq!(game.grid().correct_flags(), 0);
        assert_eq!(glyph(&surface, 1, 1), Glyph::Cover);
    }

    #[test]
    fn nothing_happens_after_the_end() {
        let (mut game, mut surface) = setup("Q");
        game.run(&mut surface);

        let status = game.play(Turn::new(Action::Step, Position(3, 3)), &mut surface);
        assert_eq!(status, Status::Quit);
        assert_eq!(game.feed(Key::Char('s'), &mut surface), Status::Quit);
        assert_eq!(game.grid().tile(Position(3, 3)), Tile::Covered);
    }

    #[test]
    fn interrupt_leaves_the_board_alone() {
        let (mut game, mut surface) = setup("jf");

        assert_eq!(game.run(&mut surface), None);
        assert_eq!(game.status(), Status::Playing);
        assert!(!game.grid().over());
    }

    #[test]
    fn tiny_board() {
        let mut pairs = RandomPairs::from_seed(11);
        let mut game = Game::generate(&Config::new(2, 2, 1), &mut pairs).unwrap();
        let mut surface = Scripted::new("");
        game.start(&mut surface);

        let safe = game
            .grid()
            .positions()
            .find(|&pos| game.grid().cell(pos).count().is_some())
            .unwrap();
        game.play(Turn::new(Action::Step, safe), &mut surface);

        let uncovered = game
            .grid()
            .positions()
            .filter(|&pos| game.grid().tile(pos) != Tile::Covered)
            .count();
        assert_eq!(uncovered, 1);
        assert_eq!(game.grid().tile(safe), Tile::Revealed(1));
    }

    #[test]
    fn turns_off_the_board_are_ignored() {
        let (mut game, mut surface) = setup("");
        game.start(&mut surface);
        surface.clear();

        for pos in [Position(0, 0), Position(6, 1), Position(1, 5)] {
            assert_eq!(game.play(Turn::new(Action::Step, pos), &mut surface), Status::Playing);
            assert_eq!(game.play(Turn::new(Action::Flag, pos), &mut surface), Status::Playing);
        }
        assert_eq!(game.grid().flags(), 0);
        assert!(surface.draws.is_empty());
    }

    #[test]
    fn board_without_mines_is_won_on_the_first_move() {
        let grid = Grid::with_mines(2, 2, &[]).unwrap();
        let mut game = Game::new(grid);
        let mut surface = Scripted::new("s");

        assert_eq!(game.run(&mut surface), Some(Status::Won));
        assert_eq!(surface.canvas.status_line(), "0/0 You won!");
    }

    #[test]
    fn generation_failure_is_reported() {
        let mut pairs = RandomPairs::from_seed(5);
        let err = Game::generate(&Config::new(2, 2, 5), &mut pairs).unwrap_err();

        assert!(matches!(err, crate::Error::Placement { target: 5, .. }));
    }
}
