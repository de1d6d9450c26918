mod gga;
mod gll;
mod gsa;
mod rmc;
mod vtg;

pub use gga::GGA;
pub use gll::GLL;
pub use gsa::GSA;
pub use rmc::RMC;
pub use vtg::VTG;

/// A single-character field with a fixed set of values.
pub(crate) trait Indicator: Sized + Copy {
    fn from_char(c: char) -> Option<Self>;

    /// Parses a field that must hold exactly one known character.
    fn parse_field(field: &str) -> Option<Self> {
        let mut chars = field.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }
}

macro_rules! indicator_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// The character this value is transmitted as.
            pub fn as_char(&self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }

        impl Indicator for $name {
            fn from_char(c: char) -> Option<Self> {
                match c {
                    $($char => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

indicator_enum! {
    /// Hemisphere of a latitude or longitude
    pub enum Hemisphere {
        /// N - North
        'N' => North,
        /// S - South
        'S' => South,
        /// E - East
        'E' => East,
        /// W - West
        'W' => West,
    }
}

indicator_enum! {
    /// Status Mode Indicator
    pub enum Status {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid
        'V' => Invalid,
    }
}

indicator_enum! {
    /// FAA Mode Indicator
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
    pub enum FaaMode {
        /// A - Autonomous mode
        'A' => Autonomous,
        /// C - Quectel Querk, "Caution"
        'C' => Caution,
        /// D - Differential Mode
        'D' => Differential,
        /// E - Estimated (dead-reckoning) mode
        'E' => Estimated,
        /// F - RTK Float mode
        'F' => FloatRtk,
        /// M - Manual Input Mode
        'M' => Manual,
        /// N - Data Not Valid
        'N' => DataNotValid,
        /// P - Precise
        'P' => Precise,
        /// R - RTK Integer mode
        'R' => FixedRtk,
        /// S - Simulated Mode
        'S' => Simulator,
        /// U - Quectel Querk, "Unsafe"
        'U' => Unsafe,
    }
}

indicator_enum! {
    /// Quality of the GPS fix
    pub enum Quality {
        /// 0 - Fix not available
        '0' => NoFix,
        /// 1 - GPS fix
        '1' => GPSFix,
        /// 2 - Differential GPS fix
        '2' => DGPSFix,
        /// 3 - PPS fix
        '3' => PPSFix,
        /// 4 - Real Time Kinematic
        '4' => RTK,
        /// 5 - Float RTK
        '5' => FloatRTK,
        /// 6 - estimated (dead reckoning)
        '6' => Estimated,
        /// 7 - Manual input mode
        '7' => Manual,
        /// 8 - Simulation mode
        '8' => Simulation,
    }
}

impl Quality {
    /// The numeric fix quality code.
    pub fn code(&self) -> u8 {
        self.as_char() as u8 - b'0'
    }
}

indicator_enum! {
    /// Selection Mode
    pub enum SelectionMode {
        /// A - Automatic, 2D/3D
        'A' => Automatic,
        /// M - Manual, forced to operate in 2D or 3D
        'M' => Manual,
    }
}

indicator_enum! {
    /// Fix Mode
    pub enum FixMode {
        /// 1 - No fix
        '1' => NoFix,
        /// 2 - 2D Fix
        '2' => Fix2D,
        /// 3 - 3D Fix
        '3' => Fix3D,
    }
}

indicator_enum! {
    /// NMEA 4.11 System ID
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_nmea_4_11_system_id_and_signal_id>
    pub enum SystemId {
        /// 1 - GPS (GP)
        '1' => Gps,
        /// 2 - GLONASS (GL)
        '2' => Glonass,
        /// 3 - Galileo (GA)
        '3' => Galileo,
        /// 4 - BeiDou (GB/BD)
        '4' => Beidou,
        /// 5 - QZSS (GQ)
        '5' => Qzss,
        /// 6 - NavIC (GI)
        '6' => Navic,
    }
}

/// One of the twelve satellite slots of a [`GSA`] sentence.
///
/// The constellation is inferred from the ID range: 1-32 GPS, 33-64 SBAS,
/// 65-96 GLONASS.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SatelliteSlot {
    /// Empty slot
    #[default]
    Unused,
    Gps(u8),
    Sbas(u8),
    Glonass(u8),
}

impl SatelliteSlot {
    /// Classifies a satellite ID, or `None` if it is 97 or above.
    pub fn classify(id: u32) -> Option<Self> {
        // id < 97 always fits
        let prn = id as u8;
        match id {
            0..33 => Some(SatelliteSlot::Gps(prn)),
            33..65 => Some(SatelliteSlot::Sbas(prn)),
            65..97 => Some(SatelliteSlot::Glonass(prn)),
            _ => None,
        }
    }

    /// The satellite ID, or `None` for an unused slot.
    pub fn id(&self) -> Option<u8> {
        match self {
            SatelliteSlot::Unused => None,
            SatelliteSlot::Gps(id) | SatelliteSlot::Sbas(id) | SatelliteSlot::Glonass(id) => {
                Some(*id)
            }
        }
    }
}
