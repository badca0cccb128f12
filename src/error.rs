use thiserror::Error;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid task span: start={start} is after end={end}")]
    InvalidSpan { start: i64, end: i64 },

    #[error("unknown period: {0}")]
    UnknownPeriod(String),

    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error("duplicate id: {0}")]
    DuplicateId(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
