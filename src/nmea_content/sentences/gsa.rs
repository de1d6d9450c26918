#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DecodeError,
    nmea_content::{
        Decodable,
        fields::Fields,
        sentences::{FixMode, SatelliteSlot, SelectionMode, SystemId},
    },
};

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                        15  16  17
///         | | |                        |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
///
/// NMEA 4.11:
/// ```text
///         1 2 3                        15  16  17  18
///         | | |                        |   |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x,x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSA {
    /// Selection mode
    pub selection_mode: SelectionMode,
    /// Fix mode
    pub fix_mode: FixMode,
    /// The twelve satellite slots, in transmitted order
    pub satellites: [SatelliteSlot; 12],
    /// Position Dilution of Precision
    pub pdop: Option<f32>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<f32>,
    /// Vertical Dilution of Precision
    pub vdop: Option<f32>,
    /// System ID of the GNSS system used for the fix
    pub system_id: Option<SystemId>,
}

impl GSA {
    /// Number of satellite slots
    pub const SATELLITE_SLOTS: usize = 12;

    /// Selection and fix mode as transmitted, e.g. `"A3"`.
    pub fn mode(&self) -> String {
        [self.selection_mode.as_char(), self.fix_mode.as_char()]
            .iter()
            .collect()
    }

    /// The occupied satellite slots.
    pub fn used_satellites(&self) -> impl Iterator<Item = SatelliteSlot> + '_ {
        self.satellites
            .iter()
            .copied()
            .filter(|slot| *slot != SatelliteSlot::Unused)
    }
}

impl Decodable for GSA {
    const SENTENCE_TYPE: &'static str = "GSA";
    const MIN_FIELDS: usize = 18;

    fn decode(f: &Fields<'_>) -> Result<Self, DecodeError> {
        let mut satellites = [SatelliteSlot::Unused; GSA::SATELLITE_SLOTS];
        for (slot, index) in satellites.iter_mut().zip(3..) {
            *slot = f.satellite(index)?;
        }

        Ok(Self {
            selection_mode: f.required_indicator(1)?,
            fix_mode: f.required_indicator(2)?,
            satellites,
            pdop: f.f32(15)?,
            hdop: f.f32(16)?,
            vdop: f.f32(17)?,
            system_id: f.trailing(18, Fields::indicator)?,
        })
    }
}
