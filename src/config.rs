//! Validated configuration for a date field.
//!
//! A [`Configuration`] can only exist in a valid state: bounds are checked as a whole
//! on every construction and update, so a half-applied min/max pair is never
//! observable. [`RawConfig`] is the selector-and-string form a host loads from its own
//! settings (JSON, attributes, ...), converted with `TryFrom`.

use serde::{Deserialize, Serialize};

use crate::{
    BoundsError, CalendarDate, DEFAULT_HIGHLIGHT_COLOR, DateBounds, DateFormat, Divider, FormatModel, ParseError,
    parse_masked,
};

/// Error type for configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid date format selector: {0} (expected 0 or 1)")]
    InvalidFormatSelector(u8),

    #[error("invalid divider selector: {0} (expected 0 or 1)")]
    InvalidDividerSelector(u8),

    /// A bound string does not match the field template.
    #[error("{name} must be entered as {template}")]
    InvalidBound {
        name:     &'static str,
        template: String,
        source:   ParseError,
    },

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// Cosmetic helper text settings, passed through to the renderer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HelperTextStyle {
    pub enabled:         bool,
    /// ARGB color of the typed prefix
    pub highlight_color: u32,
}

impl Default for HelperTextStyle {
    fn default() -> Self {
        Self {
            enabled:         false,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Configuration {
    format:      DateFormat,
    divider:     Divider,
    bounds:      DateBounds,
    autocorrect: bool,
    helper_text: HelperTextStyle,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            format:      DateFormat::default(),
            divider:     Divider::default(),
            bounds:      DateBounds::UNBOUNDED,
            autocorrect: false,
            helper_text: HelperTextStyle::default(),
        }
    }
}

impl Configuration {
    /// Creates a configuration, validating the bounds.
    ///
    /// # Errors
    /// Returns `ConfigError::Bounds` if both dates are set and min >= max.
    pub fn new(
        format: DateFormat,
        divider: Divider,
        min: Option<CalendarDate>,
        max: Option<CalendarDate>,
        autocorrect: bool,
    ) -> Result<Self, ConfigError> {
        let bounds = DateBounds::new(min, max)?;
        Ok(Self {
            format,
            divider,
            bounds,
            autocorrect,
            helper_text: HelperTextStyle::default(),
        })
    }

    #[must_use]
    pub const fn with_helper_text(mut self, helper_text: HelperTextStyle) -> Self {
        self.helper_text = helper_text;
        self
    }

    #[must_use]
    pub const fn with_autocorrect(mut self, autocorrect: bool) -> Self {
        self.autocorrect = autocorrect;
        self
    }

    /// Replaces both bounds at once.
    ///
    /// # Errors
    /// Returns `ConfigError::Bounds` if both dates are set and min >= max; `self` is
    /// left untouched.
    pub fn with_bounds(self, min: Option<CalendarDate>, max: Option<CalendarDate>) -> Result<Self, ConfigError> {
        let bounds = DateBounds::new(min, max)?;
        Ok(Self { bounds, ..self })
    }

    /// Replaces the minimum, keeping the maximum.
    ///
    /// # Errors
    /// Returns `ConfigError::Bounds` if the new minimum is not before the maximum.
    pub fn with_min_date(self, min: Option<CalendarDate>) -> Result<Self, ConfigError> {
        let bounds = self.bounds.with_min(min)?;
        Ok(Self { bounds, ..self })
    }

    /// Replaces the maximum, keeping the minimum.
    ///
    /// # Errors
    /// Returns `ConfigError::Bounds` if the minimum is not before the new maximum.
    pub fn with_max_date(self, max: Option<CalendarDate>) -> Result<Self, ConfigError> {
        let bounds = self.bounds.with_max(max)?;
        Ok(Self { bounds, ..self })
    }

    pub const fn format(&self) -> DateFormat {
        self.format
    }

    pub const fn divider(&self) -> Divider {
        self.divider
    }

    pub const fn bounds(&self) -> DateBounds {
        self.bounds
    }

    pub const fn min_date(&self) -> Option<CalendarDate> {
        self.bounds.min()
    }

    pub const fn max_date(&self) -> Option<CalendarDate> {
        self.bounds.max()
    }

    pub const fn autocorrect(&self) -> bool {
        self.autocorrect
    }

    pub const fn helper_text(&self) -> HelperTextStyle {
        self.helper_text
    }

    pub const fn model(&self) -> FormatModel {
        FormatModel::new(self.format, self.divider)
    }

    /// Template for this field, e.g. `dd/MM/yyyy`. Hosts use it as the input hint.
    pub fn hint(&self) -> String {
        self.model().template()
    }
}

/// Unvalidated configuration, as loaded from host settings.
///
/// Selectors: `date_format` 0 = `ddMMyyyy`, 1 = `MMyy`; `divider` 0 = `/`, 1 = `-`.
/// Bound strings use the same template as the field itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub date_format:                 u8,
    pub divider:                     u8,
    pub min_date:                    Option<String>,
    pub max_date:                    Option<String>,
    pub autocorrect:                 bool,
    pub helper_text_enabled:         bool,
    pub helper_text_highlight_color: u32,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            date_format:                 0,
            divider:                     0,
            min_date:                    None,
            max_date:                    None,
            autocorrect:                 true,
            helper_text_enabled:         false,
            helper_text_highlight_color: DEFAULT_HIGHLIGHT_COLOR,
        }
    }
}

impl TryFrom<RawConfig> for Configuration {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let format = DateFormat::try_from(raw.date_format)?;
        let divider = Divider::try_from(raw.divider)?;
        let model = FormatModel::new(format, divider);

        let min = raw
            .min_date
            .as_deref()
            .map(|s| parse_bound("min date", s, &model))
            .transpose()?;
        let max = raw
            .max_date
            .as_deref()
            .map(|s| parse_bound("max date", s, &model))
            .transpose()?;

        let config = Self::new(format, divider, min, max, raw.autocorrect)?.with_helper_text(HelperTextStyle {
            enabled:         raw.helper_text_enabled,
            highlight_color: raw.helper_text_highlight_color,
        });
        log::debug!(
            "configured {} field, bounds {:?}..{:?}, autocorrect {}",
            config.hint(),
            config.min_date(),
            config.max_date(),
            config.autocorrect
        );
        Ok(config)
    }
}

fn parse_bound(name: &'static str, s: &str, model: &FormatModel) -> Result<CalendarDate, ConfigError> {
    parse_masked(s.trim(), model).map_err(|source| ConfigError::InvalidBound {
        name,
        template: model.template(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    fn raw(date_format: u8, min: Option<&str>, max: Option<&str>) -> RawConfig {
        RawConfig {
            date_format,
            min_date: min.map(str::to_owned),
            max_date: max.map(str::to_owned),
            ..RawConfig::default()
        }
    }

    #[test]
    fn test_new_rejects_non_increasing_bounds() {
        let result = Configuration::new(
            DateFormat::DdMmYyyy,
            Divider::Slash,
            Some(date(2030, 1, 1)),
            Some(date(2030, 1, 1)),
            true,
        );
        assert!(matches!(result, Err(ConfigError::Bounds(BoundsError::NotIncreasing { .. }))));
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert_eq!(config.format(), DateFormat::DdMmYyyy);
        assert_eq!(config.divider(), Divider::Minus);
        assert!(!config.autocorrect());
        assert!(config.bounds().is_unbounded());
        assert_eq!(config.hint(), "dd-MM-yyyy");

        let raw = RawConfig::default();
        assert!(raw.autocorrect);
        assert_eq!(raw.helper_text_highlight_color, DEFAULT_HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_raw_conversion() {
        let config = Configuration::try_from(raw(0, Some("01/01/2020"), Some("01/01/2030")))
            .expect("failed to convert valid raw config");
        assert_eq!(config.format(), DateFormat::DdMmYyyy);
        assert_eq!(config.divider(), Divider::Slash);
        assert_eq!(config.min_date(), Some(date(2020, 1, 1)));
        assert_eq!(config.max_date(), Some(date(2030, 1, 1)));
        assert!(config.autocorrect());
    }

    #[test]
    fn test_raw_conversion_short_format() {
        let config =
            Configuration::try_from(raw(1, None, Some("12/29"))).expect("failed to convert MM/yy raw config");
        assert_eq!(config.hint(), "MM/yy");
        assert_eq!(config.max_date(), Some(date(2029, 12, 1)));
    }

    #[test]
    fn test_raw_conversion_failures() {
        struct TestCase {
            raw:         RawConfig,
            description: &'static str,
        }

        let cases = [
            TestCase {
                raw:         raw(2, None, None),
                description: "unknown format selector",
            },
            TestCase {
                raw:         RawConfig {
                    divider: 9,
                    ..RawConfig::default()
                },
                description: "unknown divider selector",
            },
            TestCase {
                raw:         raw(0, Some("2020-01-01"), None),
                description: "ISO min date",
            },
            TestCase {
                raw:         raw(0, None, Some("31/04/2030")),
                description: "max date 31 April",
            },
            TestCase {
                raw:         raw(0, None, Some("01/01/203")),
                description: "short max date",
            },
            TestCase {
                raw:         raw(1, Some("13/20"), None),
                description: "min month 13",
            },
            TestCase {
                raw:         raw(0, Some("01/01/2030"), Some("01/01/2020")),
                description: "min after max",
            },
        ];

        for case in cases {
            assert!(Configuration::try_from(case.raw).is_err(), "Expected failure for: {}", case.description);
        }
    }

    #[test]
    fn test_invalid_bound_message() {
        let err = Configuration::try_from(raw(0, None, Some("1/1/2030"))).expect_err("expected bound error");
        assert_eq!(err.to_string(), "max date must be entered as dd/MM/yyyy");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_bound_updates_are_atomic() {
        let config = Configuration::new(DateFormat::DdMmYyyy, Divider::Slash, None, Some(date(2030, 1, 1)), false)
            .expect("failed to construct max-only config");

        assert!(config.with_min_date(Some(date(2031, 1, 1))).is_err());
        assert_eq!(config.min_date(), None);

        let updated = config
            .with_min_date(Some(date(2020, 1, 1)))
            .expect("min before max should be accepted");
        assert_eq!(updated.min_date(), Some(date(2020, 1, 1)));
        assert!(updated.with_max_date(Some(date(2019, 1, 1))).is_err());
        assert!(updated.with_bounds(Some(date(2040, 1, 1)), None).is_ok());
    }

    #[test]
    fn test_raw_from_json() {
        let json = r#"{"date_format":1,"divider":1,"max_date":"12-29","autocorrect":false}"#;
        let raw: RawConfig = serde_json::from_str(json).expect("failed to deserialize raw config");
        assert!(!raw.helper_text_enabled);
        let config = Configuration::try_from(raw).expect("failed to convert JSON raw config");
        assert_eq!(config.hint(), "MM-yy");
        assert!(!config.autocorrect());
        assert_eq!(config.max_date(), Some(date(2029, 12, 1)));
    }
}
