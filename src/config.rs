//! Board size and mine count, as chosen on the command line.

use crate::error::{Error, Result};
use crate::grid::{MAX_SIZE, MIN_SIZE};
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};
use simplelog::LevelFilter;
use std::path::PathBuf;
use std::process;

/// Width and height used when nothing else is asked for.
pub const DEFAULT_SIZE: u8 = 15;

/// Command-line arguments.
#[derive(Parser, Clone, Debug)]
#[command(name = "minesweeper", version, about = "Minesweeper for the terminal, with vi keys")]
#[command(group(ArgGroup::new("preset").args(["small", "medium", "large", "wide", "fill"])))]
pub struct Args {
    /// Small board (15x15)
    #[arg(short, long)]
    pub small: bool,

    /// Medium board (20x20)
    #[arg(short, long)]
    pub medium: bool,

    /// Large board (35x20)
    #[arg(short, long)]
    pub large: bool,

    /// Wide board (35x12)
    #[arg(short, long)]
    pub wide: bool,

    /// Fill the terminal
    #[arg(short, long)]
    pub fill: bool,

    /// Board width
    #[arg(short = 'x', long = "width", allow_negative_numbers = true)]
    pub width: Option<i32>,

    /// Board height
    #[arg(short = 'y', long = "height", allow_negative_numbers = true)]
    pub height: Option<i32>,

    /// Number of mines [default: a sixth of the board]
    #[arg(short = 'n', long = "mines", allow_negative_numbers = true)]
    pub mines: Option<i32>,

    /// Seed for mine placement, to replay a board
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a log to this file
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// How much to log
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

impl Args {
    /// Parse the process arguments.
    ///
    /// Prints a usage message and exits with status 1 if they don't make sense.
    pub fn parse_or_exit() -> Args {
        Args::try_parse().unwrap_or_else(|err| {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code)
        })
    }

    /// Report a configuration problem together with the usage, then exit with status 1.
    pub fn exit_with(err: &Error) -> ! {
        let _ = Args::usage_error(err).print();
        process::exit(1)
    }

    /// Wrap a configuration problem in a clap error, so it prints with the usage.
    pub fn usage_error(err: &Error) -> clap::Error {
        Args::command().error(ErrorKind::ValueValidation, err)
    }

    /// Get the preset picked, if any.
    pub fn preset(&self) -> Option<Preset> {
        [
            (self.small, Preset::Small),
            (self.medium, Preset::Medium),
            (self.large, Preset::Large),
            (self.wide, Preset::Wide),
            (self.fill, Preset::Fill),
        ]
        .into_iter()
        .find_map(|(picked, preset)| picked.then_some(preset))
    }
}

/// Fixed board shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Small,
    Medium,
    Large,
    Wide,
    /// As big as the terminal allows.
    Fill,
}

impl Preset {
    /// Get the `(width, height)` of this preset.
    pub fn size(self, terminal: TerminalSize) -> (i32, i32) {
        match self {
            Preset::Small => (15, 15),
            Preset::Medium => (20, 20),
            Preset::Large => (35, 20),
            Preset::Wide => (35, 12),
            Preset::Fill => (terminal.max_width(), terminal.max_height()),
        }
    }
}

/// Terminal dimensions, in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalSize {
    pub columns: u16,
    pub rows: u16,
}

impl TerminalSize {
    pub fn new(columns: u16, rows: u16) -> TerminalSize {
        TerminalSize { columns, rows }
    }

    /// Ask the terminal how big it is, assuming 80x24 if it won't say.
    pub fn detect() -> TerminalSize {
        match crossterm::terminal::size() {
            Ok((columns, rows)) => TerminalSize::new(columns, rows),
            Err(err) => {
                log::warn!("could not read the terminal size: {}", err);
                TerminalSize::default()
            }
        }
    }

    /// Widest board that fits, with the frame and two columns per cell.
    pub fn max_width(self) -> i32 {
        (i32::from(self.columns) - 3) / 2
    }

    /// Tallest board that fits, with the frame and the status line.
    pub fn max_height(self) -> i32 {
        i32::from(self.rows) - 3
    }
}

impl Default for TerminalSize {
    fn default() -> TerminalSize {
        TerminalSize::new(80, 24)
    }
}

/// Minesweeper configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub width: u8,
    pub height: u8,
    pub mines: u16,
}

impl Config {
    /// Create a new Config.
    pub fn new(width: u8, height: u8, mines: u16) -> Config {
        Config {
            width,
            height,
            mines,
        }
    }

    /// Work out the configuration from the arguments and the space available.
    ///
    /// Sizes are clamped to what fits, and the mine count to the number of cells.
    pub fn resolve(args: &Args, terminal: TerminalSize) -> Result<Config> {
        let default = (i32::from(DEFAULT_SIZE), i32::from(DEFAULT_SIZE));
        let (width, height) = args.preset().map_or(default, |preset| preset.size(terminal));
        let width = args.width.unwrap_or(width);
        let height = args.height.unwrap_or(height);

        let max_width = terminal.max_width().min(i32::from(MAX_SIZE));
        let max_height = terminal.max_height().min(i32::from(MAX_SIZE));
        if max_width < i32::from(MIN_SIZE) || max_height < i32::from(MIN_SIZE) {
            return Err(Error::Configuration(format!(
                "a {}x{} terminal is too small to play in",
                terminal.columns, terminal.rows
            )));
        }
        let width = clamp("width", width, max_width);
        let height = clamp("height", height, max_height);

        let area = u16::from(width) * u16::from(height);
        let mines = match args.mines {
            Some(mines) if mines < 0 => {
                return Err(Error::Configuration(format!(
                    "cannot place {} mines",
                    mines
                )));
            }
            Some(mines) => u16::try_from(mines).unwrap_or(u16::MAX),
            None => default_mines(area),
        };
        let mines = if mines > area {
            log::warn!("{} mines don't fit, using {}", mines, area);
            area
        } else {
            mines
        };

        Ok(Config::new(width, height, mines))
    }
}

impl Default for Config {
    fn default() -> Config {
        let area = u16::from(DEFAULT_SIZE) * u16::from(DEFAULT_SIZE);
        Config::new(DEFAULT_SIZE, DEFAULT_SIZE, default_mines(area))
    }
}

/// A sixth of the board, rounded up to a multiple of five once above 25.
fn default_mines(area: u16) -> u16 {
    let mines = area / 6;
    if mines > 25 {
        5 * ((mines + 4) / 5)
    } else {
        mines
    }
}

fn clamp(name: &str, value: i32, max: i32) -> u8 {
    let clamped = value.clamp(i32::from(MIN_SIZE), max);
    if clamped != value {
        log::warn!("{} {} is out of range, using {}", name, value, clamped);
    }
    clamped as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(args: &[&str]) -> Result<Config> {
        let args = Args::try_parse_from(std::iter::once("minesweeper").chain(args.iter().copied()))
            .unwrap();
        Config::resolve(&args, TerminalSize::default())
    }

    #[test]
    fn errors_come_with_the_usage() {
        let err = setup(&["-n", "-3"]).unwrap_err();
        let text = Args::usage_error(&err).to_string();

        assert!(text.contains("cannot place -3 mines"), "{}", text);
        assert!(text.contains("Usage:"), "{}", text);
    }

    #[test]
    fn smallest_board_has_no_mines() {
        assert_eq!(setup(&["-x", "1", "-y", "1"]), Ok(Config::new(2, 2, 0)));
    }

    #[test]
    fn defaults() {
        assert_eq!(setup(&[]), Ok(Config::new(15, 15, 40)));
        assert_eq!(Config::default(), Config::new(15, 15, 40));
    }

    #[test]
    fn presets() {
        assert_eq!(setup(&["-s"]), Ok(Config::new(15, 15, 40)));
        assert_eq!(setup(&["-m"]), Ok(Config::new(20, 20, 70)));
        assert_eq!(setup(&["--large"]), Ok(Config::new(35, 20, 120)));
        assert_eq!(setup(&["-w"]), Ok(Config::new(35, 12, 70)));
        assert_eq!(setup(&["-f"]), Ok(Config::new(38, 21, 135)));
    }

    #[test]
    fn presets_are_exclusive() {
        assert!(Args::try_parse_from(["minesweeper", "-s", "-m"]).is_err());
    }

    #[test]
    fn explicit_sizes_override_presets() {
        assert_eq!(setup(&["-w", "-y", "5"]), Ok(Config::new(35, 5, 30)));
        assert_eq!(setup(&["-x", "10", "-y", "8"]), Ok(Config::new(10, 8, 13)));
    }

    #[test]
    fn explicit_mines() {
        assert_eq!(setup(&["-n", "3"]), Ok(Config::new(15, 15, 3)));
        assert_eq!(setup(&["-n", "0"]), Ok(Config::new(15, 15, 0)));
    }

    #[test]
    fn clamps_sizes() {
        assert_eq!(setup(&["-x", "1", "-y", "1"]), Ok(Config::new(2, 2, 0)));
        assert_eq!(setup(&["-x", "-4", "-y", "3"]), Ok(Config::new(2, 3, 1)));
        assert_eq!(setup(&["-x", "300", "-y", "300", "-n", "9"]), Ok(Config::new(38, 21, 9)));
    }

    #[test]
    fn clamps_mines_to_area() {
        assert_eq!(setup(&["-x", "3", "-y", "3", "-n", "20"]), Ok(Config::new(3, 3, 9)));
        assert_eq!(
            setup(&["-x", "2", "-y", "2", "-n", "99999999"]),
            Ok(Config::new(2, 2, 4))
        );
    }

    #[test]
    fn rejects_negative_mines() {
        assert!(matches!(setup(&["-n", "-1"]), Err(Error::Configuration(_))));
    }

    #[test]
    fn rejects_tiny_terminals() {
        let args = Args::try_parse_from(["minesweeper"]).unwrap();

        assert!(Config::resolve(&args, TerminalSize::new(6, 24)).is_err());
        assert!(Config::resolve(&args, TerminalSize::new(80, 4)).is_err());
        assert_eq!(
            Config::resolve(&args, TerminalSize::new(7, 5)),
            Ok(Config::new(2, 2, 0))
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Args::try_parse_from(["minesweeper", "-x"]).is_err());
        assert!(Args::try_parse_from(["minesweeper", "-x", "wide"]).is_err());
        assert!(Args::try_parse_from(["minesweeper", "--bogus"]).is_err());
    }

    #[test]
    fn log_options() {
        let args =
            Args::try_parse_from(["minesweeper", "--log", "ms.log", "--log-level", "debug"])
                .unwrap();

        assert_eq!(args.log, Some(PathBuf::from("ms.log")));
        assert_eq!(args.log_level, LevelFilter::Debug);
    }
}
