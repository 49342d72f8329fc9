//! Conversion between rendered buffers and [`CalendarDate`].
//!
//! The template of a [`FormatModel`] (e.g. `dd/MM/yyyy` or `MM-yy`) is both the parse
//! and the format pattern. Month-only formats resolve to the first day of the month;
//! two-digit years are read relative to `TWO_DIGIT_YEAR_BASE`.

use crate::{CalendarDate, DateFormat, Day, Field, FormatModel, MIN_DAY, Month, ParseError, Year};

/// Parses a complete rendered buffer using the template of `model`.
///
/// # Errors
/// Returns `ParseError::InvalidFormat` if the buffer does not match the template, and
/// the component errors if the digits don't name a real calendar day.
pub fn parse_masked(s: &str, model: &FormatModel) -> Result<CalendarDate, ParseError> {
    if s.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if s.len() != model.rendered_len() {
        return Err(ParseError::InvalidFormat(format!(
            "{s} does not match {}",
            model.template()
        )));
    }

    let divider = model.divider().as_char();
    for position in model.divider_positions() {
        if s.get(position..).and_then(|rest| rest.chars().next()) != Some(divider) {
            return Err(ParseError::InvalidFormat(format!(
                "expected '{divider}' at offset {position} in {s}"
            )));
        }
    }

    let year_digits = field_value(s, model, Field::Year)?;
    let year = if model.has_short_year() {
        Year::from_two_digits(year_digits)?
    } else {
        Year::new(year_digits)?
    };
    let month = Month::new(narrow(field_value(s, model, Field::Month)?))?;
    let day = match model.format() {
        DateFormat::DdMmYyyy => narrow(field_value(s, model, Field::Day)?),
        DateFormat::MmYy => MIN_DAY,
    };
    let day = Day::new(day, year, month)?;

    Ok(CalendarDate::from_parts(year, month, day))
}

/// Renders `date` with the template of `model`.
pub fn format_masked(date: &CalendarDate, model: &FormatModel) -> String {
    let divider = model.divider().as_char();
    match model.format() {
        DateFormat::DdMmYyyy => format!(
            "{:02}{divider}{:02}{divider}{:04}",
            date.day(),
            date.month(),
            date.year()
        ),
        DateFormat::MmYy => format!(
            "{:02}{divider}{:02}",
            date.month(),
            date.year_typed().two_digits()
        ),
    }
}

/// `date` reduced to what `model` can show: month-only formats drop the day.
pub(crate) fn at_field_precision(date: CalendarDate, model: &FormatModel) -> CalendarDate {
    match model.format() {
        DateFormat::DdMmYyyy => date,
        DateFormat::MmYy => Day::new(MIN_DAY, date.year_typed(), date.month_typed())
            .map_or(date, |day| CalendarDate::from_parts(date.year_typed(), date.month_typed(), day)),
    }
}

fn field_value(s: &str, model: &FormatModel, field: Field) -> Result<u16, ParseError> {
    let span = model
        .span(field)
        .ok_or_else(|| ParseError::InvalidFormat(format!("{} has no {field:?} field", model.template())))?;
    let digits = s
        .get(span)
        .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()))?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(digits.to_owned()));
    }
    digits
        .parse::<u16>()
        .map_err(|_| ParseError::InvalidFormat(digits.to_owned()))
}

/// Day and month fields are two digits wide, so they always fit.
fn narrow(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
