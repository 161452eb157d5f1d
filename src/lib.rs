//! # Minesweeper
//!
//! `minesweeper` is a library to handle the logic of the video game of the same name, played
//! in a terminal with vi-style keys.
//!
//! A [`Game`] owns the [`Grid`] and the cursor. Front ends paint it through the [`Screen`]
//! trait and feed it keys, either one at a time ([`Game::feed`]) or through a blocking
//! [`Keyboard`] ([`Game::run`]).

pub use cascade::cascade;
pub use config::{Args, Config, Preset, TerminalSize};
pub use error::{Error, Result};
pub use game::{Game, Status};
pub use grid::{Cell, Grid, Position, Tile};
pub use interpreter::{Action, Command, Interpreter, Turn};
pub use rng::{PairSource, RandomPairs};
pub use surface::{Canvas, Glyph, Key, Keyboard, Screen};

mod cascade;
pub mod config;
mod error;
mod game;
pub mod grid;
pub mod interpreter;
pub mod logging;
mod rng;
pub mod surface;

#[cfg(test)]
mod test_support;
