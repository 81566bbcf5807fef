use std::error::Error;
use std::fmt::{Display, Formatter};

/// Possible errors that arise due to issues with the pairwise distance input.
#[derive(Debug, Clone)]
pub enum UpgmaError {
    NoLeaves,
    MalformedRecord(String),
    DuplicatePair(String),
    MissingDistance(String),
    InvalidDistance(String),
}

impl Error for UpgmaError {}

impl Display for UpgmaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            UpgmaError::NoLeaves => String::from("The input contains no leaf labels"),
            UpgmaError::MalformedRecord(msg) => format!("Malformed distance record: {msg}"),
            UpgmaError::DuplicatePair(msg) => format!("Duplicate distance entry: {msg}"),
            UpgmaError::MissingDistance(msg) => format!("Missing pairwise distance: {msg}"),
            UpgmaError::InvalidDistance(msg) => format!("Invalid distance: {msg}"),
        };
        write!(f, "{message}")
    }
}
