//! Incremental, masked date-input validation.
//!
//! A [`DateEditController`] reacts to one text edit at a time and returns the corrected
//! buffer: dividers inserted or removed at fixed offsets, out-of-range digits either
//! autocorrected or flagged with a [`FieldError`], and optional minimum/maximum dates
//! enforced. Rendering the buffer, the error and the helper text is left to the host
//! through [`FieldView`].

mod bounds;
mod codec;
mod config;
mod consts;
mod controller;
mod divider;
mod format;
mod prelude;
mod types;
mod validator;

#[cfg(test)]
mod test_utils;

pub use bounds::{BoundsError, DateBounds};
pub use codec::{format_masked, parse_masked};
pub use config::{ConfigError, Configuration, HelperTextStyle, RawConfig};
pub use consts::*;
pub use controller::{DateEditController, EditEvent, FieldView, HelperText, HelperTextUpdate, Phase, Reaction};
pub use divider::{apply_divider, apply_dividers};
pub use format::{DateFormat, Divider, Field, FormatModel};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};
pub use validator::{FieldError, FieldValidator, InvalidInput, Validation, caps_february_at_28};

use crate::prelude::*;
use std::str::FromStr;

/// A calendar day with no time component.
///
/// Ordering is lexicographic on (year, month, day). Only real Gregorian dates can be
/// built, so a `CalendarDate` is always safe to format back into any template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { day: u8, month: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from raw components
    ///
    /// # Errors
    /// Returns a `ParseError` if any component is out of range for the calendar.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from components that are already validated
    pub const fn from_parts(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Components as a (year, month, day) tuple
    pub const fn to_tuple(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }
}

/// Parses ISO 8601 `YYYY-MM-DD`. Masked strings go through [`parse_masked`].
impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(ISO_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{ISO_SEPARATOR}MM{ISO_SEPARATOR}DD, found {trimmed}"
            )));
        };

        let year = year
            .parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat((*year).to_owned()))?;
        let month = month
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat((*month).to_owned()))?;
        let day = day
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat((*day).to_owned()))?;

        Self::new(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
