use serde::{Deserialize, Serialize};

use crate::CalendarDate;

/// Optional inclusive minimum and maximum dates.
/// When both are present the minimum is strictly before the maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DateBounds {
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
}

/// Error type for bound construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    /// Minimum is not strictly before maximum.
    #[error("min date ({min}) must be smaller than max date ({max})")]
    NotIncreasing { min: CalendarDate, max: CalendarDate },
}

impl DateBounds {
    /// Unbounded on both sides
    pub const UNBOUNDED: Self = Self { min: None, max: None };

    /// Creates bounds with validation.
    ///
    /// # Errors
    /// Returns `BoundsError::NotIncreasing` if both dates are set and min >= max.
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Result<Self, BoundsError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min >= max {
                return Err(BoundsError::NotIncreasing { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub const fn min(&self) -> Option<CalendarDate> {
        self.min
    }

    pub const fn max(&self) -> Option<CalendarDate> {
        self.max
    }

    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Returns the same bounds with a new minimum, re-validated as a whole.
    ///
    /// # Errors
    /// Returns `BoundsError::NotIncreasing` if the new minimum is not before the maximum.
    pub fn with_min(self, min: Option<CalendarDate>) -> Result<Self, BoundsError> {
        Self::new(min, self.max)
    }

    /// Returns the same bounds with a new maximum, re-validated as a whole.
    ///
    /// # Errors
    /// Returns `BoundsError::NotIncreasing` if the minimum is not before the new maximum.
    pub fn with_max(self, max: Option<CalendarDate>) -> Result<Self, BoundsError> {
        Self::new(self.min, max)
    }
}

impl<'de> Deserialize<'de> for DateBounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Unchecked {
            min: Option<CalendarDate>,
            max: Option<CalendarDate>,
        }

        let raw = Unchecked::deserialize(deserializer)?;
        Self::new(raw.min, raw.max).map_err(serde::de::Error::custom)
    }
}
