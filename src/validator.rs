//! Per-field checks for a partially typed date.
//!
//! The validator works on the rendered buffer (dividers included) and runs a fixed
//! sequence of checks as soon as the fields they need are present. A later check may
//! overwrite what an earlier one corrected: `31` in April is first accepted as a day,
//! then rewritten to `30` once the month is known.
//!
//! With autocorrect on, each violation is repaired in place and nothing is reported.
//! With autocorrect off, the buffer is left as typed and the violation is returned as a
//! [`FieldError`] carrying the offending prefix. When several violations occur in one
//! pass, the last one wins.

use std::ops::Range;

use crate::consts::{
    CENTURY_CYCLE, CORRECTED_DAY, CORRECTED_DAY_FEBRUARY, CORRECTED_DAY_FEBRUARY_SHORT, CORRECTED_DAY_THIRTY,
    CORRECTED_MONTH, FEBRUARY_SHORT_DAYS, GREGORIAN_CYCLE,
};
use crate::codec::at_field_precision;
use crate::{
    Configuration, DateFormat, FEBRUARY, Field, FormatModel, MAX_DAY, MAX_MONTH, THIRTY_DAY_MONTHS, format_masked,
    parse_masked, prelude::*,
};

/// Condition raised by a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum InvalidInput {
    #[display(fmt = "invalid day")]
    Day,
    #[display(fmt = "invalid month")]
    Month,
    #[display(fmt = "invalid day of month")]
    DayOfMonth,
    #[display(fmt = "date exceeds maximum")]
    AboveMaximum,
    #[display(fmt = "date below minimum")]
    BelowMinimum,
    #[display(fmt = "invalid day of month for leap year")]
    DayOfMonthLeapYear,
}

/// A rejected value: the offending prefix of the buffer and what was wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{kind}: {value}")]
pub struct FieldError {
    value: String,
    kind:  InvalidInput,
}

impl FieldError {
    pub fn new(value: impl Into<String>, kind: InvalidInput) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// The substring the error is attached to
    pub fn value(&self) -> &str {
        &self.value
    }

    pub const fn kind(&self) -> InvalidInput {
        self.kind
    }

    /// Human readable message for the error display
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub value: String,
    pub error: Option<FieldError>,
}

/// Year test used by the February check: only years divisible by 400 escape it.
///
/// Not [`crate::is_leap_year`]: 2024-02-29 is capped at the 28th, 2000-02-29 is kept.
pub const fn caps_february_at_28(year: u16) -> bool {
    year % CENTURY_CYCLE != 0 || year % GREGORIAN_CYCLE != 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValidator {
    config: Configuration,
}

impl FieldValidator {
    pub const fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// Checks `buffer`, returning the possibly corrected value and the last error raised.
    pub fn validate(&self, buffer: &str) -> Validation {
        let mut pass = Pass {
            value:  buffer.to_owned(),
            error:  None,
            model:  self.config.model(),
            config: &self.config,
        };
        match self.config.format() {
            DateFormat::DdMmYyyy => pass.day_month_year(),
            DateFormat::MmYy => pass.month_year(),
        }
        Validation {
            value: pass.value,
            error: pass.error,
        }
    }
}

struct Pass<'a> {
    value:  String,
    error:  Option<FieldError>,
    model:  FormatModel,
    config: &'a Configuration,
}

impl Pass<'_> {
    fn day_month_year(&mut self) {
        if let Some(day) = self.read(Field::Day) {
            if day == 0 || day > u16::from(MAX_DAY) {
                self.violation(InvalidInput::Day, Field::Day, |pass| {
                    pass.write(Field::Day, CORRECTED_DAY);
                });
            }
        }

        if let Some(month) = self.read(Field::Month) {
            if month == 0 || month > u16::from(MAX_MONTH) {
                self.violation(InvalidInput::Month, Field::Month, |pass| {
                    pass.write(Field::Month, CORRECTED_MONTH);
                });
            }
        }

        if let (Some(day), Some(month)) = (self.read(Field::Day), self.read(Field::Month)) {
            if day == u16::from(MAX_DAY) && THIRTY_DAY_MONTHS.iter().any(|m| u16::from(*m) == month) {
                self.violation(InvalidInput::DayOfMonth, Field::Month, |pass| {
                    pass.write(Field::Day, CORRECTED_DAY_THIRTY);
                });
            } else if month == u16::from(FEBRUARY) && day == u16::from(MAX_DAY) {
                self.violation(InvalidInput::DayOfMonth, Field::Month, |pass| {
                    pass.write(Field::Day, CORRECTED_DAY_FEBRUARY);
                });
            }
        }

        if !self.is_complete() {
            return;
        }

        self.clamp_to_bounds();

        if let (Some(day), Some(month), Some(year)) =
            (self.read(Field::Day), self.read(Field::Month), self.read(Field::Year))
        {
            // 28 is left alone: rewriting it to itself is not a repair
            if caps_february_at_28(year) && month == u16::from(FEBRUARY) && day > u16::from(FEBRUARY_SHORT_DAYS) {
                self.violation(InvalidInput::DayOfMonthLeapYear, Field::Year, |pass| {
                    pass.write(Field::Day, CORRECTED_DAY_FEBRUARY_SHORT);
                });
            }
        }
    }

    fn month_year(&mut self) {
        if let Some(month) = self.read(Field::Month) {
            if month == 0 || month > u16::from(MAX_MONTH) {
                self.violation(InvalidInput::Month, Field::Month, |pass| {
                    pass.write(Field::Month, CORRECTED_MONTH);
                });
            }
        }

        if self.is_complete() {
            self.clamp_to_bounds();
        }
    }

    /// Replaces an out-of-range complete date with the bound it crossed.
    /// Values the codec can't read are left to the digit-level checks.
    /// Bounds are compared at the precision of the format, so `MM/yy` accepts the
    /// month of a mid-month bound.
    fn clamp_to_bounds(&mut self) {
        let Ok(date) = parse_masked(&self.value, &self.model) else {
            return;
        };
        let model = self.model;

        if let Some(max) = self.config.max_date() {
            if date > at_field_precision(max, &model) {
                self.violation(InvalidInput::AboveMaximum, Field::Year, |pass| {
                    pass.value = format_masked(&max, &model);
                });
            }
        }
        if let Some(min) = self.config.min_date() {
            if date < at_field_precision(min, &model) {
                self.violation(InvalidInput::BelowMinimum, Field::Year, |pass| {
                    pass.value = format_masked(&min, &model);
                });
            }
        }
    }

    /// Repairs the buffer or records an error keyed to the prefix ending with `field`.
    fn violation(&mut self, kind: InvalidInput, field: Field, repair: impl FnOnce(&mut Self)) {
        if self.config.autocorrect() {
            let before = self.value.clone();
            repair(self);
            log::debug!("{kind}: corrected {before:?} to {:?}", self.value);
        } else {
            let end = self.span(field).map_or(self.value.len(), |span| span.end);
            let offending = self.value.get(..end).unwrap_or(&self.value);
            self.error = Some(FieldError::new(offending, kind));
        }
    }

    fn span(&self, field: Field) -> Option<Range<usize>> {
        self.model.span(field)
    }

    fn is_complete(&self) -> bool {
        self.value.len() == self.model.rendered_len()
    }

    /// Numeric value of `field`, if all of its digits are present.
    fn read(&self, field: Field) -> Option<u16> {
        let digits = self.value.get(self.span(field)?)?;
        if digits.bytes().all(|b| b.is_ascii_digit()) {
            digits.parse().ok()
        } else {
            None
        }
    }

    fn write(&mut self, field: Field, digits: &str) {
        if let Some(span) = self.span(field) {
            if self.value.get(span.clone()).is_some() {
                self.value.replace_range(span, digits);
            }
        }
    }
}
