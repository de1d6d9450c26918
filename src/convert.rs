//! # Field Converters
//!
//! Pure, stateless conversions shared by the validator and every sentence
//! decoder. None of them allocate except [`format_checksum`], and all of them
//! are safe to call from any number of threads.

use nom::{
    IResult, Parser,
    bytes::complete::{take, take_while1, take_while_m_n},
    character::complete::{digit1, satisfy},
    combinator::{map_res, peek, verify},
    number::complete::{double, float, hex_u32},
    sequence::preceded,
};

use crate::{
    nmea_content::{FixDate, UtcTime},
    parsing::{parse_field, whole_field},
};

/// Calculates the NMEA 0183 checksum of the sentence content.
///
/// The checksum is the XOR of every byte between the `$` prefix and the `*`
/// delimiter, excluding both.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::convert::checksum;
///
/// assert_eq!(checksum("GPGGA,data"), 0x6a);
/// ```
pub fn checksum(data: &str) -> u8 {
    data.bytes()
        .fold(0u8, |accumulated_xor, byte| accumulated_xor ^ byte)
}

/// Formats a checksum value as a two-digit lowercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::convert::format_checksum;
///
/// assert_eq!(format_checksum(0x75), "75");
/// assert_eq!(format_checksum(0x0a), "0a");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02x}")
}

/// Parses a declared checksum: one or two hex digits, any case.
pub(crate) fn declared_checksum(field: &str) -> Option<u8> {
    parse_field(
        take_while_m_n(1, 2, |c: char| c.is_ascii_hexdigit()).and_then(hex_u32),
        field,
    )
    .map(|value| value as u8)
}

/// Converts an NMEA `(d)ddmm.mmmm` field to decimal degrees.
///
/// `degree_digits` is the width of the integer degree prefix: 2 for latitude,
/// 3 for longitude. The rest of the field is minutes with an optional
/// fraction. The result is unsigned; the hemisphere lives in its own field.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::convert::degrees_minutes_to_decimal;
///
/// let latitude = degrees_minutes_to_decimal("6451.53390", 2).unwrap();
/// assert!((latitude - 64.858898333).abs() < 1e-9);
///
/// assert_eq!(degrees_minutes_to_decimal("64", 2), None);
/// ```
pub fn degrees_minutes_to_decimal(raw: &str, degree_digits: usize) -> Option<f64> {
    let degrees = take(degree_digits).and_then(whole_field(digits::<u16>));
    let (degrees, minutes) = parse_field((degrees, unsigned_decimal), raw)?;

    Some(f64::from(degrees) + minutes / 60.0)
}

/// Slices a `hhmmss[.ss]` field into its components.
///
/// Only the structure is checked: `259999` is returned as 25:99:99.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::convert::slice_time;
///
/// let time = slice_time("075909.00").unwrap();
/// assert_eq!((time.hour, time.minute, time.second), (7, 59, 9.0));
///
/// assert!(slice_time("7590").is_none());
/// ```
pub fn slice_time(raw: &str) -> Option<UtcTime> {
    parse_field((two_digits, two_digits, seconds), raw).map(|(hour, minute, second)| UtcTime {
        hour,
        minute,
        second,
    })
}

/// Slices a `ddmmyy` field into its components, without calendar checks.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::convert::slice_date;
///
/// let date = slice_date("161026").unwrap();
/// assert_eq!((date.day, date.month, date.year), (16, 10, 26));
/// ```
pub fn slice_date(raw: &str) -> Option<FixDate> {
    parse_field((two_digits, two_digits, two_digits), raw)
        .map(|(day, month, year)| FixDate { day, month, year })
}

/// Parses an unsigned decimal integer field.
pub(crate) fn unsigned<T: std::str::FromStr>(raw: &str) -> Option<T> {
    parse_field(digits::<T>, raw)
}

/// Parses a finite decimal field, signs and fractions allowed.
pub(crate) fn decimal(raw: &str) -> Option<f32> {
    parse_field(float, raw).filter(|value: &f32| value.is_finite())
}

fn digits<T: std::str::FromStr>(i: &str) -> IResult<&str, T> {
    map_res(digit1, str::parse::<T>).parse(i)
}

fn two_digits_text(i: &str) -> IResult<&str, &str> {
    take_while_m_n(2, 2, |c: char| c.is_ascii_digit()).parse(i)
}

fn two_digits(i: &str) -> IResult<&str, u8> {
    map_res(two_digits_text, str::parse::<u8>).parse(i)
}

/// Digits and points, starting with a digit. Signs, exponents and
/// `nan`/`inf` never get as far as [`double`].
fn decimal_text(i: &str) -> IResult<&str, &str> {
    preceded(
        peek(satisfy(|c: char| c.is_ascii_digit())),
        take_while1(|c: char| c.is_ascii_digit() || c == '.'),
    )
    .parse(i)
}

fn unsigned_decimal(i: &str) -> IResult<&str, f64> {
    decimal_text.and_then(whole_field(double)).parse(i)
}

/// `ss[.sss]`: exactly two integer digits.
fn seconds(i: &str) -> IResult<&str, f64> {
    verify(decimal_text, |text: &str| {
        text.find('.').unwrap_or(text.len()) == 2
    })
    .and_then(whole_field(double))
    .parse(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum() {
        assert_eq!(
            checksum("GPGGA,075909.00,6451.53390,N,14749.78748,W,1,04,8.23,149.4,M,5.8,M,,"),
            0x75
        );
        assert_eq!(checksum(""), 0);
        assert_eq!(format_checksum(0x5b), "5b");
        assert_eq!(format_checksum(0x05), "05");
    }

    #[test]
    fn test_declared_checksum() {
        assert_eq!(declared_checksum("5b"), Some(0x5b));
        assert_eq!(declared_checksum("5B"), Some(0x5b));
        assert_eq!(declared_checksum("5"), Some(0x05));
        assert_eq!(declared_checksum(""), None);
        assert_eq!(declared_checksum("5bb"), None);
        assert_eq!(declared_checksum("zz"), None);
        assert_eq!(declared_checksum("5\r"), None);
    }

    #[test]
    fn test_degrees_minutes() {
        let latitude = degrees_minutes_to_decimal("6451.53390", 2).unwrap();
        assert!((latitude - 64.85889833).abs() < 1e-8);

        let longitude = degrees_minutes_to_decimal("14749.78748", 3).unwrap();
        assert!((longitude - 147.82979133).abs() < 1e-8);

        let longitude = degrees_minutes_to_decimal("00833.91590", 3).unwrap();
        assert!((longitude - 8.565265).abs() < 1e-9);

        assert_eq!(degrees_minutes_to_decimal("4916", 2), Some(49.0 + 16.0 / 60.0));
        assert_eq!(degrees_minutes_to_decimal("4916.", 2), Some(49.0 + 16.0 / 60.0));
    }

    #[test]
    fn test_degrees_minutes_keeps_fraction() {
        let cases = [
            ("4807.038", 2, 48.1173),
            ("01131.000", 3, 11.516666667),
            ("4916.45", 2, 49.274166667),
            ("12311.12", 3, 123.185333333),
            ("0000.0001", 2, 0.000001667),
        ];

        for (input, degree_digits, expected) in cases {
            let value = degrees_minutes_to_decimal(input, degree_digits)
                .unwrap_or_else(|| panic!("Failed: {input:?}"));
            assert!((value - expected).abs() < 1e-9, "{input}: {value}");
        }
    }

    #[test]
    fn test_degrees_minutes_malformed() {
        let cases = [
            "", "6", "64", "64x1.5", "6451.5x", "-451.5", "64-1.5", "6451..5", "64 1.5", "64.5",
            "64+1.5", "6451e2", "64nan", "64inf",
        ];

        for input in cases {
            assert_eq!(
                degrees_minutes_to_decimal(input, 2),
                None,
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_slice_time() {
        let time = slice_time("092725.00").unwrap();
        assert_eq!((time.hour, time.minute, time.second), (9, 27, 25.0));

        let time = slice_time("123519").unwrap();
        assert_eq!((time.hour, time.minute, time.second), (12, 35, 19.0));

        let time = slice_time("251299.5").unwrap();
        assert_eq!((time.hour, time.minute, time.second), (25, 12, 99.5));

        let time = slice_time("075909.75").unwrap();
        assert_eq!((time.hour, time.minute, time.second), (7, 59, 9.75));

        let time = slice_time("075909.").unwrap();
        assert_eq!(time.second, 9.0);

        for input in [
            "",
            "12351",
            "1235190",
            "12a519",
            "123519.5.5",
            "12:35:19",
            "1235.9",
            "1235-9.5",
            "1235+9.5",
            "12351e",
        ] {
            assert!(slice_time(input).is_none(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_slice_date() {
        let date = slice_date("230394").unwrap();
        assert_eq!((date.day, date.month, date.year), (23, 3, 94));

        let date = slice_date("991399").unwrap();
        assert_eq!((date.day, date.month, date.year), (99, 13, 99));

        assert!(slice_date("23039").is_none());
        assert!(slice_date("2303944").is_none());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(unsigned::<u8>("04"), Some(4));
        assert_eq!(unsigned::<u8>("256"), None);
        assert_eq!(unsigned::<u16>("0042"), Some(42));
        assert_eq!(unsigned::<u16>("-1"), None);
        assert_eq!(decimal("-21.3"), Some(-21.3));
        assert_eq!(decimal("149.4"), Some(149.4));
        assert_eq!(decimal("149.4M"), None);
        assert_eq!(decimal("nan"), None);
        assert_eq!(decimal(""), None);
    }
}
