#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Empty time string")]
    Empty,
    #[error("Wrong time format (expected hh:mm or hh:mm:ss): '{0}'")]
    WrongFormat(String),
    #[error("Time component out of range: '{0}'")]
    OutOfRange(String),
    #[error("Unknown weekday name: '{0}'")]
    UnknownWeekday(String),
}
