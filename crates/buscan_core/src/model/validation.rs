//! Input validation for fleet write paths.
//!
//! # Responsibility
//! - Describe every caller-correctable input failure with field and value.
//! - Convert raw caller integers into stored widths.
//!
//! # Invariants
//! - Validation never touches storage; it runs before the save step.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-correctable input failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier or name is blank after trim.
    EmptyValue { field: &'static str },
    /// Identifier is already used by another record of the same kind.
    Duplicate { field: &'static str, value: String },
    /// Value must be strictly positive.
    NotPositive { field: &'static str, value: i64 },
    /// Value must be zero or greater.
    Negative { field: &'static str, value: i64 },
    /// Value does not fit the stored integer width.
    OutOfRange { field: &'static str, value: i64 },
    /// State is not a member of the configured bus state set.
    UnknownState { value: String },
    /// Route has no stops left after normalization.
    NoStops { route: String },
    /// Referenced route does not exist (strict reference policy only).
    UnknownRoute { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyValue { field }
            | Self::Duplicate { field, .. }
            | Self::NotPositive { field, .. }
            | Self::Negative { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::UnknownRoute { field, .. } => field,
            Self::UnknownState { .. } => "state",
            Self::NoStops { .. } => "stops",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue { field } => write!(f, "{field} must not be empty"),
            Self::Duplicate { field, value } => write!(f, "{field} `{value}` already exists"),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be greater than 0, got {value}")
            }
            Self::Negative { field, value } => write!(f, "{field} must be >= 0, got {value}"),
            Self::OutOfRange { field, value } => {
                write!(f, "{field} {value} exceeds the supported range")
            }
            Self::UnknownState { value } => {
                write!(f, "state `{value}` is not one of the configured bus states")
            }
            Self::NoStops { route } => write!(f, "route `{route}` must have at least one stop"),
            Self::UnknownRoute { field, value } => {
                write!(f, "{field} references unknown route `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims an identifier and rejects blank values.
pub(crate) fn require_identifier(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyValue { field });
    }
    Ok(trimmed.to_string())
}

/// Accepts `value > 0` that fits in `u32`.
pub(crate) fn positive_u32(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value })
}

/// Accepts `value >= 0` that fits in `u32`.
pub(crate) fn non_negative_u32(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value })
}

/// Normalizes an optional route reference: trimmed, blank means unassigned.
pub(crate) fn normalize_route_ref(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|route| !route.is_empty())
        .map(str::to_string)
}
