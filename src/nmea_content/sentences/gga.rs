use std::{fmt, time::Duration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DecodeError,
    nmea_content::{
        Coordinate, Decodable, Measurement, UtcTime,
        fields::{Axis, Fields},
        sentences::Quality,
    },
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// Fields 13 and 14 are often left out entirely rather than sent empty.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GGA {
    /// Fix time in UTC
    pub fix_time: Option<UtcTime>,
    /// Latitude
    pub latitude: Option<Coordinate>,
    /// Longitude
    pub longitude: Option<Coordinate>,
    /// GPS Quality Indicator
    pub fix_quality: Quality,
    /// Number of satellites in use
    pub satellite_count: Option<u8>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<f32>,
    /// Altitude above/below mean sea level (geoid)
    pub altitude: Option<Measurement>,
    /// Geoidal separation, the difference between the WGS-84 earth ellipsoid and mean sea level (geoid),
    /// negative values indicate that the geoid is below the ellipsoid
    pub geoid_height: Option<Measurement>,
    /// Age of Differential GPS data, null field when DGPS is not used
    pub age_of_dgps: Option<Duration>,
    /// Differential reference station ID
    pub ref_station_id: Option<u16>,
}

impl GGA {
    /// Whether the receiver reports a fix and both coordinates are present.
    pub fn has_fix(&self) -> bool {
        self.fix_quality != Quality::NoFix && self.latitude.is_some() && self.longitude.is_some()
    }
}

impl Decodable for GGA {
    const SENTENCE_TYPE: &'static str = "GGA";
    const MIN_FIELDS: usize = 13;

    fn decode(f: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            fix_time: f.time(1)?,
            latitude: f.coordinate(2, 3, Axis::Latitude)?,
            longitude: f.coordinate(4, 5, Axis::Longitude)?,
            fix_quality: f.required_indicator(6)?,
            satellite_count: f.u8(7)?,
            hdop: f.f32(8)?,
            altitude: f.measurement(9, 10)?,
            geoid_height: f.measurement(11, 12)?,
            age_of_dgps: f.trailing(13, |f, i| {
                f.f32(i)?
                    .map(|secs| {
                        Duration::try_from_secs_f32(secs).map_err(|_| DecodeError::MalformedNumeric {
                            index: i,
                            raw: secs.to_string(),
                        })
                    })
                    .transpose()
            })?,
            ref_station_id: f.trailing(14, Fields::u16)?,
        })
    }
}

/// `{}` prints a short summary, `{:#}` adds geoid, quality and dilution.
impl fmt::Display for GGA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Latitude:   {}", or_na(self.latitude))?;
        writeln!(f, "Longitude:  {}", or_na(self.longitude))?;
        writeln!(f, "Altitude:   {}", or_na(self.altitude))?;
        if f.alternate() {
            writeln!(f, "GEOID:      {}", or_na(self.geoid_height))?;
        }
        writeln!(f, "Satellites: {}", or_na(self.satellite_count))?;
        if f.alternate() {
            writeln!(f, "Quality:    {}", self.fix_quality.code())?;
            writeln!(f, "Dilution:   {}", or_na(self.hdop))?;
        }
        write!(f, "Time:       {}", or_na(self.fix_time))
    }
}

fn or_na<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DecodedRecord, decode,
        nmea_content::Hemisphere,
        validate,
    };

    fn gga(input: &str) -> Result<GGA, DecodeError> {
        match decode(&validate(input).unwrap())? {
            Some(DecodedRecord::PositionFix(gga)) => Ok(gga),
            other => panic!("expected a GGA record, got {other:?}"),
        }
    }

    #[test]
    fn test_gga_parsing() {
        let gga =
            gga("$GPGGA,075909.00,6451.53390,N,14749.78748,W,1,04,8.23,149.4,M,5.8,M,,*75").unwrap();

        let latitude = gga.latitude.unwrap();
        assert!((latitude.degrees - 64.8589).abs() < 1e-4);
        assert!((latitude.degrees - 64.85889833).abs() < 1e-8);
        assert_eq!(latitude.hemisphere, Hemisphere::North);

        let longitude = gga.longitude.unwrap();
        assert!((longitude.magnitude() - 147.8298).abs() < 1e-4);
        assert_eq!(longitude.hemisphere, Hemisphere::West);

        assert_eq!(
            gga.fix_time,
            Some(UtcTime {
                hour: 7,
                minute: 59,
                second: 9.0
            })
        );
        assert_eq!(gga.fix_quality, Quality::GPSFix);
        assert_eq!(gga.fix_quality.code(), 1);
        assert_eq!(gga.satellite_count, Some(4));
        assert_eq!(gga.hdop, Some(8.23));
        assert_eq!(
            gga.altitude,
            Some(Measurement {
                value: 149.4,
                unit: Some('M')
            })
        );
        assert_eq!(
            gga.geoid_height,
            Some(Measurement {
                value: 5.8,
                unit: Some('M')
            })
        );
        assert_eq!(gga.age_of_dgps, None);
        assert_eq!(gga.ref_station_id, None);
        assert!(gga.has_fix());
    }

    #[test]
    fn test_gga_dgps_fields() {
        let gga = gga(
            "$GPGGA,001043.00,4404.14036,N,12118.85961,W,2,12,0.98,1113.0,M,-21.3,M,1.5,0042*76",
        )
        .unwrap();

        assert_eq!(gga.fix_quality, Quality::DGPSFix);
        assert_eq!(gga.geoid_height.map(|g| g.value), Some(-21.3));
        assert_eq!(gga.age_of_dgps, Some(Duration::from_millis(1500)));
        assert_eq!(gga.ref_station_id, Some(42));
    }

    #[test]
    fn test_gga_without_fix() {
        let gga = gga("$GPGGA,,,,,,0,00,99.99,,,,,,*48").unwrap();

        assert_eq!(gga.fix_time, None);
        assert_eq!(gga.latitude, None);
        assert_eq!(gga.longitude, None);
        assert_eq!(gga.fix_quality, Quality::NoFix);
        assert_eq!(gga.satellite_count, Some(0));
        assert_eq!(gga.altitude, None);
        assert!(!gga.has_fix());
    }

    #[test]
    fn test_gga_time_is_not_calendar_checked() {
        let gga =
            gga("$GPGGA,251299.5,6451.53390,N,14749.78748,W,1,04,8.23,149.4,M,5.8,M,,*46").unwrap();

        let time = gga.fix_time.unwrap();
        assert_eq!((time.hour, time.minute, time.second), (25, 12, 99.5));
        assert_eq!(time.to_time(), None);
    }

    #[test]
    fn test_gga_errors() {
        assert_eq!(
            gga("$GPGGA,075909.00,6451.53390,N*0c"),
            Err(DecodeError::ShortFieldList {
                sentence_type: "GGA",
                expected: 13,
                found: 4
            })
        );
        assert_eq!(
            gga("$GPGGA,075909.00,64x1.53390,N,14749.78748,W,1,04,8.23,149.4,M,5.8,M,,*38"),
            Err(DecodeError::MalformedNumeric {
                index: 2,
                raw: "64x1.53390".into()
            })
        );
    }

    #[test]
    fn test_gga_display() {
        let gga =
            gga("$GPGGA,075909.00,6451.53390,N,14749.78748,W,1,04,8.23,149.4,M,5.8,M,,*75").unwrap();

        assert_eq!(
            gga.to_string(),
            "Latitude:   64.85889833N\n\
             Longitude:  147.8297913W\n\
             Altitude:   149.4M\n\
             Satellites: 4\n\
             Time:       07:59:09.00UTC"
        );

        assert_eq!(
            format!("{gga:#}"),
            "Latitude:   64.85889833N\n\
             Longitude:  147.8297913W\n\
             Altitude:   149.4M\n\
             GEOID:      5.8M\n\
             Satellites: 4\n\
             Quality:    1\n\
             Dilution:   8.23\n\
             Time:       07:59:09.00UTC"
        );
    }

    #[test]
    fn test_gga_field_variants() {
        // trailing DGPS fields: empty, absent, or present
        let base = "GPGGA,001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M";
        let cases = [",,", "", ",", ",42.0,", ",,69", ",42.0,69"];

        for input in cases {
            let data = format!("{base}{input}");
            let sentence = format!("${data}*{:02x}", crate::convert::checksum(&data));
            let result = gga(&sentence);
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }
    }
}
