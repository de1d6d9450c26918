#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DecodeError,
    nmea_content::{
        Coordinate, Decodable, FixDate, UtcTime,
        fields::{Axis, Fields},
        sentences::{FaaMode, Status},
    },
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 11
///         |         | |       | |        |  |   |   |    |  |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh<CR><LF>
/// ```
///
/// NMEA 2.3:
/// ```text
///         1         2 3       4 5        6  7   8   9    10 1112
///         |         | |       | |        |  |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RMC {
    /// Fix time in UTC
    pub fix_time: Option<UtcTime>,
    /// Status Mode Indicator
    pub status: Status,
    /// Latitude
    pub latitude: Option<Coordinate>,
    /// Longitude
    pub longitude: Option<Coordinate>,
    /// Speed over ground in knots
    pub speed_over_ground: Option<f32>,
    /// Course over ground in degrees True
    pub course_over_ground: Option<f32>,
    /// Fix date in UTC
    pub fix_date: Option<FixDate>,
    /// Magnetic variation in degrees, west negative
    pub magnetic_variation: Option<f32>,
    /// FAA Mode Indicator
    pub faa_mode: Option<FaaMode>,
}

impl RMC {
    /// Fix date and time combined, if both are present and valid.
    pub fn fix_datetime(&self) -> Option<time::PrimitiveDateTime> {
        let date = self.fix_date?.to_date()?;
        let time = self.fix_time?.to_time()?;

        Some(time::PrimitiveDateTime::new(date, time))
    }
}

impl Decodable for RMC {
    const SENTENCE_TYPE: &'static str = "RMC";
    const MIN_FIELDS: usize = 12;

    fn decode(f: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            fix_time: f.time(1)?,
            status: f.required_indicator(2)?,
            latitude: f.coordinate(3, 4, Axis::Latitude)?,
            longitude: f.coordinate(5, 6, Axis::Longitude)?,
            speed_over_ground: f.f32(7)?,
            course_over_ground: f.f32(8)?,
            fix_date: f.date(9)?,
            magnetic_variation: f.variation(10, 11)?,
            faa_mode: f.trailing(12, Fields::indicator)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{DecodedRecord, convert::checksum, decode, nmea_content::Hemisphere, validate};

    fn rmc(input: &str) -> Result<RMC, DecodeError> {
        match decode(&validate(input).unwrap())? {
            Some(DecodedRecord::PositionVelocity(rmc)) => Ok(rmc),
            other => panic!("expected an RMC record, got {other:?}"),
        }
    }

    #[test]
    fn test_rmc_parsing() {
        let rmc =
            rmc("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A*07").unwrap();

        assert_eq!(
            rmc.fix_time,
            Some(UtcTime {
                hour: 12,
                minute: 35,
                second: 19.0
            })
        );
        assert_eq!(rmc.status, Status::Valid);

        let latitude = rmc.latitude.unwrap();
        assert!((latitude.degrees - 48.1173).abs() < 1e-9);
        assert_eq!(latitude.hemisphere, Hemisphere::North);

        let longitude = rmc.longitude.unwrap();
        assert!((longitude.degrees - 11.51666667).abs() < 1e-8);
        assert_eq!(longitude.hemisphere, Hemisphere::East);

        assert_eq!(rmc.speed_over_ground, Some(22.4));
        assert_eq!(rmc.course_over_ground, Some(84.4));
        assert_eq!(
            rmc.fix_date,
            Some(FixDate {
                day: 23,
                month: 3,
                year: 94
            })
        );
        assert_eq!(rmc.magnetic_variation, Some(-3.1));
        assert_eq!(rmc.faa_mode, Some(FaaMode::Autonomous));

        assert_eq!(
            rmc.fix_datetime(),
            Some(time::PrimitiveDateTime::new(
                time::Date::from_calendar_date(1994, time::Month::March, 23).unwrap(),
                time::Time::from_hms(12, 35, 19).unwrap(),
            ))
        );
    }

    #[test]
    fn test_rmc_before_nmea_2_3() {
        let rmc =
            rmc("$GPRMC,225446,A,4916.45,N,12311.12,W,000.5,054.7,191194,020.3,E*68").unwrap();

        assert_eq!(rmc.magnetic_variation, Some(20.3));
        assert_eq!(rmc.faa_mode, None);
        assert_eq!(rmc.fix_date.and_then(|d| d.to_date()).map(|d| d.year()), Some(1994));
    }

    #[test]
    fn test_rmc_without_variation() {
        let rmc =
            rmc("$GPRMC,075909.00,A,6451.53390,N,14749.78748,W,0.012,,161026,,,A*60").unwrap();

        assert_eq!(rmc.speed_over_ground, Some(0.012));
        assert_eq!(rmc.course_over_ground, None);
        assert_eq!(rmc.magnetic_variation, None);
        assert!((rmc.longitude.unwrap().degrees + 147.82979133).abs() < 1e-8);
    }

    #[test]
    fn test_rmc_errors() {
        let cases = [
            (
                "GPRMC,123519,X,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A",
                DecodeError::InvalidIndicator {
                    index: 2,
                    raw: "X".into(),
                },
            ),
            (
                "GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,N,A",
                DecodeError::InvalidIndicator {
                    index: 11,
                    raw: "N".into(),
                },
            ),
            (
                "GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,2303,003.1,W,A",
                DecodeError::MalformedNumeric {
                    index: 9,
                    raw: "2303".into(),
                },
            ),
            (
                "GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1",
                DecodeError::ShortFieldList {
                    sentence_type: "RMC",
                    expected: 12,
                    found: 11,
                },
            ),
        ];

        for (data, expected) in cases {
            let sentence = format!("${data}*{:02x}", checksum(data));
            assert_eq!(rmc(&sentence), Err(expected), "{data}");
        }
    }
}
