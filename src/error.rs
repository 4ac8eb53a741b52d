use thiserror::Error;

/// Why a free-form time string could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("no time given")]
    Empty,

    #[error("unrecognized time format: {0:?}")]
    Unrecognized(String),

    #[error("hour out of range: {0}")]
    HourOutOfRange(u32),

    #[error("minute out of range: {0}")]
    MinuteOutOfRange(u32),
}
