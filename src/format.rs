//! Masked layouts for the supported date patterns.
//!
//! Every offset used elsewhere in the crate (field spans, divider positions, the
//! rendered length and the template) is derived here from the list of digit groups
//! of a [`DateFormat`], so both patterns share one derivation path.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, MINUS, SLASH, prelude::*};

/// Supported date patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum DateFormat {
    /// Day, month and four-digit year: `dd/MM/yyyy`
    #[default]
    #[display(fmt = "ddMMyyyy")]
    DdMmYyyy,
    /// Month and two-digit year: `MM/yy`
    #[display(fmt = "MMyy")]
    MmYy,
}

impl TryFrom<u8> for DateFormat {
    type Error = ConfigError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Self::DdMmYyyy),
            1 => Ok(Self::MmYy),
            _ => Err(ConfigError::InvalidFormatSelector(selector)),
        }
    }
}

/// Character rendered between digit groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum Divider {
    #[display(fmt = "/")]
    Slash,
    #[default]
    #[display(fmt = "-")]
    Minus,
}

impl Divider {
    pub const fn as_char(self) -> char {
        match self {
            Self::Slash => SLASH,
            Self::Minus => MINUS,
        }
    }
}

impl TryFrom<u8> for Divider {
    type Error = ConfigError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Self::Slash),
            1 => Ok(Self::Minus),
            _ => Err(ConfigError::InvalidDividerSelector(selector)),
        }
    }
}

/// A date component held by one digit group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Group {
    field:   Field,
    pattern: &'static str,
}

impl Group {
    const fn width(self) -> usize {
        self.pattern.len()
    }
}

const DAY: Group = Group {
    field:   Field::Day,
    pattern: "dd",
};
const MONTH: Group = Group {
    field:   Field::Month,
    pattern: "MM",
};
const LONG_YEAR: Group = Group {
    field:   Field::Year,
    pattern: "yyyy",
};
const SHORT_YEAR: Group = Group {
    field:   Field::Year,
    pattern: "yy",
};

const DD_MM_YYYY: [Group; 3] = [DAY, MONTH, LONG_YEAR];
const MM_YY: [Group; 2] = [MONTH, SHORT_YEAR];

/// Layout of a rendered buffer for one (format, divider) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatModel {
    format:  DateFormat,
    divider: Divider,
}

impl FormatModel {
    pub const fn new(format: DateFormat, divider: Divider) -> Self {
        Self { format, divider }
    }

    pub const fn format(&self) -> DateFormat {
        self.format
    }

    pub const fn divider(&self) -> Divider {
        self.divider
    }

    const fn groups(&self) -> &'static [Group] {
        match self.format {
            DateFormat::DdMmYyyy => &DD_MM_YYYY,
            DateFormat::MmYy => &MM_YY,
        }
    }

    /// Spans of every group in the rendered buffer, in display order.
    fn spans(&self) -> impl Iterator<Item = (Field, Range<usize>)> {
        let mut start = 0;
        self.groups().iter().map(move |group| {
            let span = start..start + group.width();
            // skip the divider that follows
            start = span.end + 1;
            (group.field, span)
        })
    }

    /// Length of a complete rendered buffer (10 for `dd/MM/yyyy`, 5 for `MM/yy`).
    pub fn rendered_len(&self) -> usize {
        self.digit_len() + self.groups().len() - 1
    }

    /// Number of digits in a complete value, dividers excluded.
    pub fn digit_len(&self) -> usize {
        self.groups().iter().map(|g| g.width()).sum()
    }

    /// Offsets at which a divider is rendered, in ascending order.
    pub fn divider_positions(&self) -> Vec<usize> {
        let last = self.groups().len() - 1;
        self.spans().take(last).map(|(_, span)| span.end).collect()
    }

    /// Span of `field` in the rendered buffer, if the format carries it.
    pub fn span(&self, field: Field) -> Option<Range<usize>> {
        self.spans().find(|(f, _)| *f == field).map(|(_, span)| span)
    }

    /// Whether the year group holds only the last two digits.
    pub fn has_short_year(&self) -> bool {
        self.groups().iter().any(|g| *g == SHORT_YEAR)
    }

    /// Template such as `dd/MM/yyyy`, used as hint and as the codec pattern.
    pub fn template(&self) -> String {
        let divider = self.divider.as_char().to_string();
        self.groups().iter().map(|g| g.pattern).collect::<Vec<_>>().join(&divider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        assert_eq!(DateFormat::try_from(0), Ok(DateFormat::DdMmYyyy));
        assert_eq!(DateFormat::try_from(1), Ok(DateFormat::MmYy));
        assert_eq!(DateFormat::try_from(2), Err(ConfigError::InvalidFormatSelector(2)));

        assert_eq!(Divider::try_from(0), Ok(Divider::Slash));
        assert_eq!(Divider::try_from(1), Ok(Divider::Minus));
        assert_eq!(Divider::try_from(7), Err(ConfigError::InvalidDividerSelector(7)));
    }

    #[test]
    fn test_long_layout() {
        let model = FormatModel::new(DateFormat::DdMmYyyy, Divider::Slash);
        assert_eq!(model.rendered_len(), 10);
        assert_eq!(model.digit_len(), 8);
        assert_eq!(model.divider_positions(), vec![2, 5]);
        assert_eq!(model.span(Field::Day), Some(0..2));
        assert_eq!(model.span(Field::Month), Some(3..5));
        assert_eq!(model.span(Field::Year), Some(6..10));
        assert!(!model.has_short_year());
        assert_eq!(model.template(), "dd/MM/yyyy");
    }

    #[test]
    fn test_short_layout() {
        let model = FormatModel::new(DateFormat::MmYy, Divider::Minus);
        assert_eq!(model.rendered_len(), 5);
        assert_eq!(model.digit_len(), 4);
        assert_eq!(model.divider_positions(), vec![2]);
        assert_eq!(model.span(Field::Day), None);
        assert_eq!(model.span(Field::Month), Some(0..2));
        assert_eq!(model.span(Field::Year), Some(3..5));
        assert!(model.has_short_year());
        assert_eq!(model.template(), "MM-yy");
    }

    #[test]
    fn test_display() {
        assert_eq!(DateFormat::DdMmYyyy.to_string(), "ddMMyyyy");
        assert_eq!(DateFormat::MmYy.to_string(), "MMyy");
        assert_eq!(Divider::Slash.to_string(), "/");
        assert_eq!(Divider::default(), Divider::Minus);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&DateFormat::MmYy).expect("failed to serialize format");
        assert_eq!(json, r#""MmYy""#);
        let parsed: Divider = serde_json::from_str(r#""Slash""#).expect("failed to deserialize divider");
        assert_eq!(parsed, Divider::Slash);
    }
}
