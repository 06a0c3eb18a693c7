use crate::float_types::Real;

/// All the possible validation issues we might encounter when constructing
/// solids from raw data.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// A [`PlaneError`](crate::solid::plane::PlaneError)
    #[error(transparent)]
    PlaneError(#[from] crate::solid::plane::PlaneError),
    /// `name` must not be less than `min`
    #[error("{} must not be less than {}", .name, .min)]
    FieldLessThan { name: &'static str, min: i32 },
    /// `name` must not be less than `min`
    #[error("{} must not be less than {}", .name, .min)]
    FieldLessThanFloat { name: &'static str, min: Real },
    /// A face refers to a point that does not exist
    #[error("Face index {} is out of range (points.len = {})", .index, .len)]
    IndexOutOfRange { index: usize, len: usize },
}
