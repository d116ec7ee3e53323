use thiserror::Error;

/// Errors raised while building or (de)serialising datasets and labels.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoding error: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("Decoding error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Caller-contract violations detected by the query engines.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid stop ID")]
    InvalidStop,
    #[error("Invalid trip ID")]
    InvalidTrip,
    #[error("Invalid time value")]
    InvalidTime,
    #[error("Invalid journey")]
    InvalidJourney,
}
