#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DecodeError,
    nmea_content::{
        Coordinate, Decodable, UtcTime,
        fields::{Axis, Fields},
        sentences::{FaaMode, Status},
    },
};

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6 7
///         |       | |        | |         | |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a,m*hh<CR><LF>
/// ```
///
/// The mode indicator (7) was added in NMEA 2.3 and is absent before it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GLL {
    /// Latitude
    pub latitude: Option<Coordinate>,
    /// Longitude
    pub longitude: Option<Coordinate>,
    /// Fix time in UTC
    pub fix_time: Option<UtcTime>,
    /// Status Mode Indicator
    pub status: Option<Status>,
    /// FAA Mode Indicator
    pub faa_mode: Option<FaaMode>,
}

impl Decodable for GLL {
    const SENTENCE_TYPE: &'static str = "GLL";
    const MIN_FIELDS: usize = 7;

    fn decode(f: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            latitude: f.coordinate(1, 2, Axis::Latitude)?,
            longitude: f.coordinate(3, 4, Axis::Longitude)?,
            fix_time: f.time(5)?,
            status: f.indicator(6)?,
            faa_mode: f.trailing(7, Fields::indicator)?,
        })
    }
}
