/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Maximum day number any month can hold
pub const MAX_DAY: u8 = 31;

/// First day of month, used for lower bounds and month-only dates
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Months with 30 days
pub const THIRTY_DAY_MONTHS: [u8; 4] = [4, 6, 9, 11];

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Two-digit years (`yy`) are read as years of this century
pub const TWO_DIGIT_YEAR_BASE: u16 = 2000;

// Autocorrect replacement values
pub(crate) const CORRECTED_DAY: &str = "31";
pub(crate) const CORRECTED_MONTH: &str = "12";
pub(crate) const CORRECTED_DAY_THIRTY: &str = "30";
pub(crate) const CORRECTED_DAY_FEBRUARY: &str = "29";
pub(crate) const CORRECTED_DAY_FEBRUARY_SHORT: &str = "28";
pub(crate) const FEBRUARY_SHORT_DAYS: u8 = 28;

/// ISO 8601 date component separator, used for `CalendarDate` display
pub const ISO_SEPARATOR: char = '-';
/// Slash divider literal
pub const SLASH: char = '/';
/// Minus divider literal
pub const MINUS: char = '-';

/// Default helper text highlight color (opaque blue, ARGB)
pub const DEFAULT_HIGHLIGHT_COLOR: u32 = 0xFF00_00FF;
