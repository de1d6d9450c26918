//! # NMEA Content
//!
//! Typed decoding of validated sentences.
//!
//! [`decode`] looks up the three-letter type code of a [`Sentence`] in the
//! [`SentenceType`] registry and runs the matching grammar over the field
//! list. Sentence types without a grammar decode to `Ok(None)` so that a
//! receiver emitting extra sentences (`GSV`, `TXT`, ...) does not produce
//! errors.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DecodeError, Sentence};

mod fields;
mod sentences;

pub use sentences::{
    FaaMode, FixMode, GGA, GLL, GSA, Hemisphere, Quality, RMC, SatelliteSlot, SelectionMode,
    Status, SystemId, VTG,
};

use fields::Fields;

/// Decodes a validated sentence into a typed record.
///
/// Returns `Ok(None)` for sentence types that have no grammar.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{DecodedRecord, decode, validate};
///
/// let sentence = validate(
///     "$GPGGA,075909.00,6451.53390,N,14749.78748,W,1,04,8.23,149.4,M,5.8,M,,*75",
/// )
/// .unwrap();
///
/// match decode(&sentence) {
///     Ok(Some(DecodedRecord::PositionFix(gga))) => {
///         assert_eq!(gga.satellite_count, Some(4));
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
///
/// let sentence = validate("$GPXXX,1,2,3*53").unwrap();
/// assert_eq!(decode(&sentence), Ok(None));
/// ```
pub fn decode(sentence: &Sentence) -> Result<Option<DecodedRecord>, DecodeError> {
    match SentenceType::from_code(sentence.sentence_type()) {
        Some(sentence_type) => sentence_type.decode(sentence).map(Some),
        None => Ok(None),
    }
}

/// Grammar implemented by each supported sentence type.
pub(crate) trait Decodable: Sized {
    /// Three-letter type code
    const SENTENCE_TYPE: &'static str;

    /// Minimum number of fields, counting the address field
    const MIN_FIELDS: usize;

    fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError>;

    fn from_sentence(sentence: &Sentence) -> Result<Self, DecodeError> {
        let fields = Fields::new(sentence, Self::SENTENCE_TYPE, Self::MIN_FIELDS)?;
        Self::decode(&fields)
    }
}

/// The registry of sentence types this crate can decode.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceType {
    /// Global Positioning System Fix Data
    GGA,
    /// Geographic Position - Latitude/Longitude
    GLL,
    /// GPS DOP and active satellites
    GSA,
    /// Track made good and Ground speed
    VTG,
    /// Recommended Minimum Navigation Information
    RMC,
}

impl SentenceType {
    /// Every registered sentence type.
    pub const ALL: [SentenceType; 5] = [
        SentenceType::GGA,
        SentenceType::GLL,
        SentenceType::GSA,
        SentenceType::VTG,
        SentenceType::RMC,
    ];

    /// Looks up a three-letter type code.
    ///
    /// ```rust
    /// use nmea0183_stream::SentenceType;
    ///
    /// assert_eq!(SentenceType::from_code("GSA"), Some(SentenceType::GSA));
    /// assert_eq!(SentenceType::from_code("GSV"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// The three-letter type code.
    pub fn code(self) -> &'static str {
        match self {
            SentenceType::GGA => GGA::SENTENCE_TYPE,
            SentenceType::GLL => GLL::SENTENCE_TYPE,
            SentenceType::GSA => GSA::SENTENCE_TYPE,
            SentenceType::VTG => VTG::SENTENCE_TYPE,
            SentenceType::RMC => RMC::SENTENCE_TYPE,
        }
    }

    fn decode(self, sentence: &Sentence) -> Result<DecodedRecord, DecodeError> {
        Ok(match self {
            SentenceType::GGA => DecodedRecord::PositionFix(GGA::from_sentence(sentence)?),
            SentenceType::GLL => DecodedRecord::GeoPosition(GLL::from_sentence(sentence)?),
            SentenceType::GSA => DecodedRecord::SatelliteStatus(GSA::from_sentence(sentence)?),
            SentenceType::VTG => DecodedRecord::CourseSpeed(VTG::from_sentence(sentence)?),
            SentenceType::RMC => DecodedRecord::PositionVelocity(RMC::from_sentence(sentence)?),
        })
    }
}

impl fmt::Display for SentenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A decoded sentence.
///
/// ## Supported Sentence Types
///
/// | Variant                   | Sentence | Description                                |
/// |---------------------------|----------|--------------------------------------------|
/// | PositionFix([`GGA`])      | GGA      | GPS position and fix quality               |
/// | GeoPosition([`GLL`])      | GLL      | Latitude/longitude with time               |
/// | SatelliteStatus([`GSA`])  | GSA      | Active satellites and dilution of precision |
/// | CourseSpeed([`VTG`])      | VTG      | Course and speed over ground               |
/// | PositionVelocity([`RMC`]) | RMC      | Essential navigation data                  |
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedRecord {
    /// Global Positioning System Fix Data
    PositionFix(GGA),
    /// Geographic Position - Latitude/Longitude
    GeoPosition(GLL),
    /// GPS DOP and active satellites
    SatelliteStatus(GSA),
    /// Track made good and Ground speed
    CourseSpeed(VTG),
    /// Recommended Minimum Navigation Information
    PositionVelocity(RMC),
}

impl DecodedRecord {
    /// The sentence type this record was decoded from.
    pub fn sentence_type(&self) -> SentenceType {
        match self {
            DecodedRecord::PositionFix(_) => SentenceType::GGA,
            DecodedRecord::GeoPosition(_) => SentenceType::GLL,
            DecodedRecord::SatelliteStatus(_) => SentenceType::GSA,
            DecodedRecord::CourseSpeed(_) => SentenceType::VTG,
            DecodedRecord::PositionVelocity(_) => SentenceType::RMC,
        }
    }

    /// Latitude and longitude, for records that carry a complete position.
    pub fn position(&self) -> Option<(Coordinate, Coordinate)> {
        let (latitude, longitude) = match self {
            DecodedRecord::PositionFix(gga) => (gga.latitude, gga.longitude),
            DecodedRecord::GeoPosition(gll) => (gll.latitude, gll.longitude),
            DecodedRecord::PositionVelocity(rmc) => (rmc.latitude, rmc.longitude),
            DecodedRecord::SatelliteStatus(_) | DecodedRecord::CourseSpeed(_) => return None,
        };

        latitude.zip(longitude)
    }

    /// Fix time, for records that carry one.
    pub fn utc_time(&self) -> Option<UtcTime> {
        match self {
            DecodedRecord::PositionFix(gga) => gga.fix_time,
            DecodedRecord::GeoPosition(gll) => gll.fix_time,
            DecodedRecord::PositionVelocity(rmc) => rmc.fix_time,
            DecodedRecord::SatelliteStatus(_) | DecodedRecord::CourseSpeed(_) => None,
        }
    }
}

/// A latitude or longitude.
///
/// `degrees` is signed (south and west are negative) and the hemisphere the
/// receiver reported is kept next to it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Signed decimal degrees
    pub degrees: f64,
    /// Reported hemisphere
    pub hemisphere: Hemisphere,
}

impl Coordinate {
    const SIGNIFICANT_DIGITS: i32 = 10;

    /// Builds a coordinate from an unsigned magnitude and its hemisphere.
    pub fn new(magnitude: f64, hemisphere: Hemisphere) -> Self {
        let degrees = match hemisphere {
            Hemisphere::South | Hemisphere::West => -magnitude.abs(),
            Hemisphere::North | Hemisphere::East => magnitude.abs(),
        };

        Self {
            degrees,
            hemisphere,
        }
    }

    /// Unsigned decimal degrees.
    pub fn magnitude(&self) -> f64 {
        self.degrees.abs()
    }
}

/// Prints the magnitude with ten significant digits and the hemisphere
/// letter, e.g. `64.85889833N`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.magnitude();
        let mut integer_digits = if magnitude == 0.0 {
            1
        } else {
            magnitude.log10().floor() as i32 + 1
        };

        // rounding can carry into a new integer digit, 9.99999999996 -> 10.0
        let scale = 10f64.powi(Self::SIGNIFICANT_DIGITS - integer_digits);
        if (magnitude * scale).round() / scale >= 10f64.powi(integer_digits) {
            integer_digits += 1;
        }

        let precision = (Self::SIGNIFICANT_DIGITS - integer_digits).max(0) as usize;

        write!(f, "{magnitude:.precision$}{}", self.hemisphere.as_char())
    }
}

/// Time of day as sliced from a `hhmmss.ss` field.
///
/// The components are not range checked; use [`UtcTime::to_time`] for a
/// validated clock time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub hour: u8,
    pub minute: u8,
    /// Seconds including the fractional part
    pub second: f64,
}

impl UtcTime {
    /// Converts to a [`time::Time`], or `None` if the components are not a
    /// valid time of day.
    ///
    /// ```rust
    /// use nmea0183_stream::UtcTime;
    ///
    /// let time = UtcTime { hour: 7, minute: 59, second: 9.25 };
    /// assert_eq!(
    ///     time.to_time(),
    ///     Some(time::Time::from_hms_milli(7, 59, 9, 250).unwrap())
    /// );
    ///
    /// let time = UtcTime { hour: 25, minute: 99, second: 99.0 };
    /// assert_eq!(time.to_time(), None);
    /// ```
    pub fn to_time(&self) -> Option<time::Time> {
        if !(0.0..60.0).contains(&self.second) {
            return None;
        }

        let whole = self.second.trunc();
        let milliseconds = ((self.second - whole) * 1000.0).round().min(999.0);

        time::Time::from_hms_milli(self.hour, self.minute, whole as u8, milliseconds as u16).ok()
    }
}

/// Prints `HH:MM:SS.ssUTC`.
impl fmt::Display for UtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:05.2}UTC",
            self.hour, self.minute, self.second
        )
    }
}

/// Date as sliced from a `ddmmyy` field.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixDate {
    pub day: u8,
    pub month: u8,
    /// Two-digit year
    pub year: u8,
}

impl FixDate {
    /// Converts to a [`time::Date`], or `None` if the components are not a
    /// calendar date.
    ///
    /// Years 83 to 99 are in the 1900s, the rest in the 2000s.
    ///
    /// ```rust
    /// use nmea0183_stream::FixDate;
    ///
    /// let date = FixDate { day: 23, month: 3, year: 94 };
    /// assert_eq!(
    ///     date.to_date(),
    ///     time::Date::from_calendar_date(1994, time::Month::March, 23).ok()
    /// );
    /// ```
    pub fn to_date(&self) -> Option<time::Date> {
        let year = match self.year {
            83..=99 => 1900 + i32::from(self.year),
            _ => 2000 + i32::from(self.year),
        };
        let month = time::Month::try_from(self.month).ok()?;

        time::Date::from_calendar_date(year, month, self.day).ok()
    }
}

/// A value with its unit letter, e.g. altitude `149.4,M`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub value: f32,
    /// Unit letter, `M` for meters; `None` if the receiver left it empty
    pub unit: Option<char>,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{}{unit}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;

    #[test]
    fn test_registry() {
        for sentence_type in SentenceType::ALL {
            assert_eq!(
                SentenceType::from_code(sentence_type.code()),
                Some(sentence_type)
            );
        }

        assert_eq!(SentenceType::from_code("gga"), None);
        assert_eq!(SentenceType::from_code("GG"), None);
        assert_eq!(SentenceType::from_code(""), None);
    }

    #[test]
    fn test_unsupported_types_decode_to_none() {
        let cases = [
            "$GPXXX,1,2,3*53",
            "$GPTXT,01,01,02,u-blox ag - www.u-blox.com*50",
        ];

        for input in cases {
            let sentence = validate(input).unwrap();
            assert_eq!(decode(&sentence), Ok(None), "{input}");
        }
    }

    #[test]
    fn test_record_accessors() {
        let sentence = validate("$GPGLL,4916.45,N,12311.12,W,225444,A,A*5c").unwrap();
        let record = decode(&sentence).unwrap().unwrap();

        assert_eq!(record.sentence_type(), SentenceType::GLL);

        let (latitude, longitude) = record.position().unwrap();
        assert!((latitude.degrees - 49.27416667).abs() < 1e-8);
        assert!((longitude.degrees + 123.18533333).abs() < 1e-8);
        assert_eq!(record.utc_time().map(|t| t.hour), Some(22));

        let sentence = validate("$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25").unwrap();
        let record = decode(&sentence).unwrap().unwrap();
        assert_eq!(record.position(), None);
        assert_eq!(record.utc_time(), None);
    }

    #[test]
    fn test_coordinate_display() {
        let latitude = Coordinate::new(64.0 + 51.53390 / 60.0, Hemisphere::North);
        assert_eq!(latitude.to_string(), "64.85889833N");

        let longitude = Coordinate::new(147.0 + 49.78748 / 60.0, Hemisphere::West);
        assert_eq!(longitude.to_string(), "147.8297913W");
        assert!(longitude.degrees < 0.0);

        let longitude = Coordinate::new(8.565265, Hemisphere::East);
        assert_eq!(longitude.to_string(), "8.565265000E");

        let latitude = Coordinate::new(0.0, Hemisphere::South);
        assert_eq!(latitude.to_string(), "0.000000000S");

        let latitude = Coordinate::new(9.99999999996, Hemisphere::North);
        assert_eq!(latitude.to_string(), "10.00000000N");

        let longitude = Coordinate::new(99.999999999, Hemisphere::East);
        assert_eq!(longitude.to_string(), "100.0000000E");

        let latitude = Coordinate::new(0.999999999996, Hemisphere::South);
        assert_eq!(latitude.to_string(), "1.000000000S");
    }

    #[test]
    fn test_time_display_and_conversion() {
        let time = UtcTime {
            hour: 7,
            minute: 59,
            second: 9.0,
        };
        assert_eq!(time.to_string(), "07:59:09.00UTC");
        assert_eq!(time.to_time(), time::Time::from_hms(7, 59, 9).ok());

        let time = UtcTime {
            hour: 23,
            minute: 59,
            second: 60.0,
        };
        assert_eq!(time.to_time(), None);
    }

    #[test]
    fn test_date_conversion() {
        let date = FixDate {
            day: 16,
            month: 10,
            year: 26,
        };
        assert_eq!(
            date.to_date(),
            time::Date::from_calendar_date(2026, time::Month::October, 16).ok()
        );

        let date = FixDate {
            day: 31,
            month: 2,
            year: 24,
        };
        assert_eq!(date.to_date(), None);
    }
}
