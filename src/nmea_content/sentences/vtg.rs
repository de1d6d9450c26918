#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DecodeError,
    nmea_content::{Decodable, fields::Fields, sentences::FaaMode},
};

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8 9
///          |  |  |  |  |  |  |  | |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
///
/// The unit letters (2, 4, 6, 8) are fixed and not decoded.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct VTG {
    /// Course over ground, degrees True
    pub course_over_ground_true: Option<f32>,
    /// Course over ground, degrees Magnetic
    pub course_over_ground_magnetic: Option<f32>,
    /// Speed over ground, knots
    pub speed_knots: Option<f32>,
    /// Speed over ground, km/h
    pub speed_kmh: Option<f32>,
    /// FAA mode indicator (NMEA 2.3 and later)
    pub faa_mode: Option<FaaMode>,
}

impl Decodable for VTG {
    const SENTENCE_TYPE: &'static str = "VTG";
    const MIN_FIELDS: usize = 9;

    fn decode(f: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            course_over_ground_true: f.f32(1)?,
            course_over_ground_magnetic: f.f32(3)?,
            speed_knots: f.f32(5)?,
            speed_kmh: f.f32(7)?,
            faa_mode: f.trailing(9, Fields::indicator)?,
        })
    }
}
