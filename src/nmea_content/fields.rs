//! Bounds-checked, typed access to the fields of a sentence.

use crate::{
    DecodeError, Sentence,
    convert::{decimal, degrees_minutes_to_decimal, slice_date, slice_time, unsigned},
    nmea_content::{
        Coordinate, FixDate, Measurement, UtcTime,
        sentences::{Hemisphere, Indicator, SatelliteSlot},
    },
};

/// Which half of a position a coordinate field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn degree_digits(self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    fn accepts(self, hemisphere: Hemisphere) -> bool {
        match self {
            Axis::Latitude => matches!(hemisphere, Hemisphere::North | Hemisphere::South),
            Axis::Longitude => matches!(hemisphere, Hemisphere::East | Hemisphere::West),
        }
    }
}

/// The comma-separated fields of a sentence.
///
/// Index 0 is the address field (`GPGGA`), so indices match the usual
/// numbering of sentence diagrams. Empty fields read as `None`.
pub(crate) struct Fields<'a> {
    sentence_type: &'static str,
    fields: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    /// Splits the sentence and checks that at least `min_fields` are present.
    pub(crate) fn new(
        sentence: &'a Sentence,
        sentence_type: &'static str,
        min_fields: usize,
    ) -> Result<Self, DecodeError> {
        let fields = Self {
            sentence_type,
            fields: sentence.fields().collect(),
        };

        if fields.len() < min_fields {
            return Err(fields.short(min_fields));
        }

        Ok(fields)
    }

    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    /// The raw text of a field.
    pub(crate) fn raw(&self, index: usize) -> Result<&'a str, DecodeError> {
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| self.short(index + 1))
    }

    /// Reads a field that newer protocol revisions append to the sentence.
    ///
    /// A missing field is `None`; a present one is read with `get`.
    pub(crate) fn trailing<T>(
        &self,
        index: usize,
        get: impl FnOnce(&Self, usize) -> Result<Option<T>, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        if index < self.len() {
            get(self, index)
        } else {
            Ok(None)
        }
    }

    pub(crate) fn u8(&self, index: usize) -> Result<Option<u8>, DecodeError> {
        self.number(index, unsigned::<u8>)
    }

    pub(crate) fn u16(&self, index: usize) -> Result<Option<u16>, DecodeError> {
        self.number(index, unsigned::<u16>)
    }

    pub(crate) fn f32(&self, index: usize) -> Result<Option<f32>, DecodeError> {
        self.number(index, decimal)
    }

    pub(crate) fn time(&self, index: usize) -> Result<Option<UtcTime>, DecodeError> {
        self.number(index, slice_time)
    }

    pub(crate) fn date(&self, index: usize) -> Result<Option<FixDate>, DecodeError> {
        self.number(index, slice_date)
    }

    pub(crate) fn indicator<T: Indicator>(&self, index: usize) -> Result<Option<T>, DecodeError> {
        let raw = self.raw(index)?;
        if raw.is_empty() {
            return Ok(None);
        }

        T::parse_field(raw)
            .map(Some)
            .ok_or_else(|| invalid_indicator(index, raw))
    }

    /// Like [`Fields::indicator`], but an empty field is an error too.
    pub(crate) fn required_indicator<T: Indicator>(&self, index: usize) -> Result<T, DecodeError> {
        self.indicator(index)?
            .ok_or_else(|| invalid_indicator(index, ""))
    }

    /// Reads a `(d)ddmm.mm,a` pair.
    ///
    /// Both fields empty means the receiver has no position yet.
    pub(crate) fn coordinate(
        &self,
        value_index: usize,
        hemisphere_index: usize,
        axis: Axis,
    ) -> Result<Option<Coordinate>, DecodeError> {
        let value = self.raw(value_index)?;
        let hemisphere = self.raw(hemisphere_index)?;

        match (value.is_empty(), hemisphere.is_empty()) {
            (true, true) => Ok(None),
            (true, false) => Err(malformed(value_index, value)),
            (false, true) => Err(malformed(hemisphere_index, hemisphere)),
            (false, false) => {
                let hemisphere = Hemisphere::parse_field(hemisphere)
                    .filter(|h| axis.accepts(*h))
                    .ok_or_else(|| invalid_indicator(hemisphere_index, hemisphere))?;
                let magnitude = degrees_minutes_to_decimal(value, axis.degree_digits())
                    .ok_or_else(|| malformed(value_index, value))?;

                Ok(Some(Coordinate::new(magnitude, hemisphere)))
            }
        }
    }

    /// Reads a `x.x,U` value and unit pair.
    pub(crate) fn measurement(
        &self,
        value_index: usize,
        unit_index: usize,
    ) -> Result<Option<Measurement>, DecodeError> {
        let Some(value) = self.f32(value_index)? else {
            return Ok(None);
        };

        let raw_unit = self.raw(unit_index)?;
        let mut chars = raw_unit.chars();
        let unit = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(unit), None) if unit.is_ascii_alphabetic() => Some(unit),
            _ => return Err(invalid_indicator(unit_index, raw_unit)),
        };

        Ok(Some(Measurement { value, unit }))
    }

    /// Reads a magnetic variation `x.x,a` pair as signed degrees, west negative.
    pub(crate) fn variation(
        &self,
        value_index: usize,
        direction_index: usize,
    ) -> Result<Option<f32>, DecodeError> {
        let value = self.f32(value_index)?;
        let direction = self.raw(direction_index)?;

        match (value, direction.is_empty()) {
            (None, true) => Ok(None),
            (None, false) => Err(malformed(value_index, self.raw(value_index)?)),
            (Some(_), true) => Err(malformed(direction_index, direction)),
            (Some(value), false) => match Hemisphere::parse_field(direction) {
                Some(Hemisphere::East) => Ok(Some(value)),
                Some(Hemisphere::West) => Ok(Some(-value)),
                _ => Err(invalid_indicator(direction_index, direction)),
            },
        }
    }

    /// Any all-digit ID is classified, however large; an ID too wide for
    /// `u32` is reported as `u32::MAX`.
    pub(crate) fn satellite(&self, index: usize) -> Result<SatelliteSlot, DecodeError> {
        let raw = self.raw(index)?;
        if raw.is_empty() {
            return Ok(SatelliteSlot::Unused);
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(index, raw));
        }

        let id = unsigned::<u32>(raw).unwrap_or(u32::MAX);
        SatelliteSlot::classify(id).ok_or(DecodeError::InvalidSatelliteId { index, id })
    }

    fn number<T>(
        &self,
        index: usize,
        convert: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>, DecodeError> {
        let raw = self.raw(index)?;
        if raw.is_empty() {
            return Ok(None);
        }

        convert(raw).map(Some).ok_or_else(|| malformed(index, raw))
    }

    fn short(&self, expected: usize) -> DecodeError {
        DecodeError::ShortFieldList {
            sentence_type: self.sentence_type,
            expected,
            found: self.len(),
        }
    }
}

fn malformed(index: usize, raw: &str) -> DecodeError {
    DecodeError::MalformedNumeric {
        index,
        raw: raw.to_owned(),
    }
}

fn invalid_indicator(index: usize, raw: &str) -> DecodeError {
    DecodeError::InvalidIndicator {
        index,
        raw: raw.to_owned(),
    }
}
