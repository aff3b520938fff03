use thiserror::Error;

use crate::geometry::ObjectId;

#[derive(Debug, Error)]
pub enum Error {
    /// The zero vector has no direction.
    #[error("cannot normalise a zero-length vector")]
    ZeroLength,
    #[error("angle is undefined when either vector has zero length")]
    DegenerateAngle,
    #[error("sphere {0} must have a positive radius")]
    NonPositiveRadius(ObjectId),
    #[error("sphere id {0} is used more than once")]
    DuplicateId(ObjectId),
    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scene: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
