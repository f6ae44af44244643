use thiserror::Error;

/// Failures raised by the resolution core.
///
/// A query that does not match any food is not an error; see
/// [`crate::food_matcher::Resolution`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    #[error("invalid quantity {0}: quantities must be positive")]
    InvalidQuantity(i64),
    #[error("daily calorie target {0} is undefined; enter valid profile details")]
    UndefinedTarget(f64),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
