use std::str::FromStr;

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};

/// A kind of value a parameter accepts.
///
/// Conversion is strict: anything that does not fully match
/// the expected format is rejected.
pub trait ValueType {
    type Value;

    /// Describes the expected format in error messages.
    const EXPECTED: &'static str;

    fn parse(s: &str) -> Result<Self::Value>;
}

/// Simple macro for checking if value `s` matches the regex `regex_str`.
/// Returns error if the value didn't match.
macro_rules! ensure_regex {
    ($s:ident, $regex_str:expr) => {
        lazy_static! {
            static ref RGX: regex::Regex = regex::Regex::new($regex_str).unwrap();
        }
        anyhow::ensure!(
            RGX.is_match($s),
            "Invalid value {}; must match pattern {}",
            $s,
            $regex_str
        )
    };
}

/// Any string, taken as is.
pub struct Text;

impl ValueType for Text {
    type Value = String;
    const EXPECTED: &'static str = "string";

    fn parse(s: &str) -> Result<Self::Value> {
        Ok(s.to_owned())
    }
}

/// A signed decimal integer. Surrounding whitespace is ignored.
pub struct Integer;

impl ValueType for Integer {
    type Value = i64;
    const EXPECTED: &'static str = "integer";

    fn parse(s: &str) -> Result<Self::Value> {
        let s = s.trim();
        ensure_regex!(s, r"^[+-]?[0-9]+$");
        s.parse::<i64>()
            .with_context(|| format!("Invalid integer value: {s}"))
    }
}

/// A decimal number with a decimal dot and an optional exponent.
pub struct Decimal;

impl ValueType for Decimal {
    type Value = BigDecimal;
    const EXPECTED: &'static str = "decimal";

    fn parse(s: &str) -> Result<Self::Value> {
        let s = s.trim();
        ensure_regex!(s, r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$");
        BigDecimal::from_str(s).with_context(|| format!("Invalid decimal value: {s}"))
    }
}

/// A calendar date in the `yyyy-MM-dd` format.
pub struct Date;

impl ValueType for Date {
    type Value = NaiveDate;
    const EXPECTED: &'static str = "date (yyyy-MM-dd)";

    fn parse(s: &str) -> Result<Self::Value> {
        ensure_regex!(s, r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$");
        NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date: {s}"))
    }
}

/// A date and a time of day. Seconds and their fraction are optional:
/// `yyyy-MM-dd HH:mm`, `yyyy-MM-dd HH:mm:ss` or `yyyy-MM-dd HH:mm:ss.fffff`.
pub struct DateTime;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

impl ValueType for DateTime {
    type Value = NaiveDateTime;
    const EXPECTED: &'static str = "DateTime (yyyy-MM-dd HH:mm:ss.fffff)";

    fn parse(s: &str) -> Result<Self::Value> {
        ensure_regex!(
            s,
            r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}(:[0-9]{2}(\.[0-9]{1,9})?)?$"
        );
        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .with_context(|| format!("Invalid date-time: {s}"))
    }
}

/// Converts the raw value of parameter `name`, reporting which parameter
/// failed, what it expects and what it got.
pub fn convert<T: ValueType>(name: &str, raw: &str) -> Result<T::Value> {
    T::parse(raw).with_context(|| {
        format!(
            "Error parsing argument `{name}`. Expecting {}, got value `{raw}`.",
            T::EXPECTED
        )
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{convert, Date, DateTime, Decimal, Integer, Text, ValueType};

    #[test]
    fn integer_test() {
        assert_eq!(Integer::parse("42").unwrap(), 42);
        assert_eq!(Integer::parse("-17").unwrap(), -17);
        assert_eq!(Integer::parse("+5").unwrap(), 5);
        assert_eq!(Integer::parse(" 7 ").unwrap(), 7);

        assert!(Integer::parse("").is_err());
        assert!(Integer::parse("4.2").is_err());
        assert!(Integer::parse("0x10").is_err());
        assert!(Integer::parse("1_000").is_err());
        assert!(Integer::parse("99999999999999999999").is_err());
    }

    #[test]
    fn decimal_test() {
        let d = |s: &str| BigDecimal::from_str(s).unwrap();
        assert_eq!(Decimal::parse("3.14").unwrap(), d("3.14"));
        assert_eq!(Decimal::parse("-0.5").unwrap(), d("-0.5"));
        assert_eq!(Decimal::parse(".5").unwrap(), d("0.5"));
        assert_eq!(Decimal::parse("10").unwrap(), d("10"));
        assert_eq!(Decimal::parse("1.5e3").unwrap(), d("1500"));

        assert!(Decimal::parse("3,14").is_err());
        assert!(Decimal::parse("abc").is_err());
        assert!(Decimal::parse(".").is_err());
        assert!(Decimal::parse("").is_err());
    }

    #[test]
    fn date_test() {
        assert_eq!(
            Date::parse("2020-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );

        assert!(Date::parse("2021-02-29").is_err());
        assert!(Date::parse("2020-2-9").is_err());
        assert!(Date::parse("29/02/2020").is_err());
        assert!(Date::parse("2020-02-29 10:00").is_err());
    }

    #[test]
    fn date_time_test() {
        let dt = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap();
        assert_eq!(
            DateTime::parse("2020-01-02 03:04").unwrap(),
            dt("2020-01-02 03:04:00")
        );
        assert_eq!(
            DateTime::parse("2020-01-02 03:04:05").unwrap(),
            dt("2020-01-02 03:04:05")
        );
        assert_eq!(
            DateTime::parse("2020-01-02 03:04:05.12345").unwrap(),
            dt("2020-01-02 03:04:05.12345")
        );

        assert!(DateTime::parse("2020-01-02").is_err());
        assert!(DateTime::parse("2020-01-02T03:04:05").is_err());
        assert!(DateTime::parse("2020-01-02 25:00").is_err());
    }

    #[test]
    fn text_test() {
        assert_eq!(Text::parse("").unwrap(), "");
        assert_eq!(Text::parse("Any Thing").unwrap(), "Any Thing");
    }

    #[test]
    fn conversion_error_message_test() {
        let err = convert::<Integer>("number", "twelve").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error parsing argument `number`. Expecting integer, got value `twelve`."
        );
        // The underlying reason is kept as the cause
        assert!(err.chain().count() > 1);

        let err = convert::<Date>("date", "yesterday").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error parsing argument `date`. Expecting date (yyyy-MM-dd), got value `yesterday`."
        );
    }
}
