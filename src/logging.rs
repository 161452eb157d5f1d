//! File logging.
//!
//! The terminal belongs to the game, so log records only ever go to a file, and only when
//! one is asked for.

use crate::config::Args;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

/// Install a logger writing to `args.log`, if set.
///
/// Returns whether a logger was installed. Failures are reported on stderr, and the game
/// goes on without a log.
pub fn init(args: &Args) -> bool {
    let Some(path) = &args.log else {
        return false;
    };

    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("warning: cannot write log to {}: {}", path.display(), err);
            return false;
        }
    };
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Err(err) = WriteLogger::init(args.log_level, config, file) {
        eprintln!("warning: cannot start logging: {}", err);
        return false;
    }

    log::info!("minesweeper {} starting", env!("CARGO_PKG_VERSION"));
    true
}
