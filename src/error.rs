use thiserror::Error;

/// Errors that can stop a game from starting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error(
        "could not place mines: {placed} of {target} placed after {attempts} attempts \
         on a {width}x{height} grid"
    )]
    Placement {
        attempts: u32,
        placed: u16,
        target: u16,
        width: u8,
        height: u8,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
