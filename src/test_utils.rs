//! Builders shared by the unit tests.

use crate::{CalendarDate, Configuration, DateFormat, Divider, FormatModel};

pub(crate) fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).expect("test date must be a real calendar day")
}

pub(crate) fn year(value: u16) -> crate::Year {
    crate::Year::new(value).expect("test year must be in range")
}

pub(crate) fn month(value: u8) -> crate::Month {
    crate::Month::new(value).expect("test month must be in range")
}

pub(crate) const fn long_slash() -> FormatModel {
    FormatModel::new(DateFormat::DdMmYyyy, Divider::Slash)
}

pub(crate) const fn short_minus() -> FormatModel {
    FormatModel::new(DateFormat::MmYy, Divider::Minus)
}

/// `dd/MM/yyyy`, no bounds
pub(crate) fn autocorrecting() -> Configuration {
    bounded(None, None, true)
}

/// `dd/MM/yyyy`, no bounds, errors instead of corrections
pub(crate) fn flagging() -> Configuration {
    bounded(None, None, false)
}

/// `dd/MM/yyyy` with bounds
pub(crate) fn bounded(min: Option<CalendarDate>, max: Option<CalendarDate>, autocorrect: bool) -> Configuration {
    Configuration::new(DateFormat::DdMmYyyy, Divider::Slash, min, max, autocorrect)
        .expect("test bounds must be increasing")
}

/// `MM-yy` with bounds
pub(crate) fn short_config(min: Option<CalendarDate>, max: Option<CalendarDate>, autocorrect: bool) -> Configuration {
    Configuration::new(DateFormat::MmYy, Divider::Minus, min, max, autocorrect)
        .expect("test bounds must be increasing")
}
