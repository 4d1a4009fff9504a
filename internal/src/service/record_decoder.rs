use crate::domain::{
    error::DecodeError,
    frame::LineRecord,
    reading::{MeasurementKind, Reading},
};

const CONDUCTIVITY_PREFIX: &[u8] = b"EC: ";
const TEMPERATURE_PREFIX: &[u8] = b"Temp: ";
const PH_PREFIX: &[u8] = b"PH: ";

const CONDUCTIVITY_FIELDS: [&str; 4] = ["conductivity", "tds", "salinity", "specific_gravity"];

#[derive(Debug, PartialEq)]
pub enum Decoded {
    Reading(Reading),
    /// Known prefix with nothing after it: the firmware had no value this cycle.
    Empty(MeasurementKind),
    Unrecognized,
}

/// Maps a frame to a reading. Prefixes are tried in order and the first match wins.
pub fn decode(record: &LineRecord) -> Result<Decoded, DecodeError> {
    if record.is_empty() {
        return Ok(Decoded::Unrecognized);
    }
    let line = record.as_bytes();
    if let Some(value) = line.strip_prefix(CONDUCTIVITY_PREFIX) {
        decode_value(MeasurementKind::Conductivity, value, conductivity)
    } else if let Some(value) = line.strip_prefix(TEMPERATURE_PREFIX) {
        decode_value(MeasurementKind::Temperature, value, temperature)
    } else if let Some(value) = line.strip_prefix(PH_PREFIX) {
        decode_value(MeasurementKind::Ph, value, ph)
    } else {
        Ok(Decoded::Unrecognized)
    }
}

fn decode_value(
    kind: MeasurementKind, value: &[u8], parse: fn(&str) -> Result<Reading, DecodeError>,
) -> Result<Decoded, DecodeError> {
    if value.is_empty() {
        return Ok(Decoded::Empty(kind));
    }
    let text = std::str::from_utf8(value).map_err(|_| DecodeError::InvalidUtf8 {
        measurement: kind.name(),
    })?;
    parse(text).map(Decoded::Reading)
}

fn conductivity(text: &str) -> Result<Reading, DecodeError> {
    let measurement = MeasurementKind::Conductivity.name();
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != CONDUCTIVITY_FIELDS.len() {
        return Err(DecodeError::FieldCount {
            measurement,
            expected: CONDUCTIVITY_FIELDS.len(),
            found: parts.len(),
        });
    }
    let mut values = [0.0; 4];
    for ((value, field), raw) in values.iter_mut().zip(CONDUCTIVITY_FIELDS).zip(parts) {
        *value = number(measurement, field, raw)?;
    }
    let [conductivity, tds, salinity, specific_gravity] = values;
    Ok(Reading::Conductivity {
        conductivity,
        tds,
        salinity,
        specific_gravity,
    })
}

fn temperature(text: &str) -> Result<Reading, DecodeError> {
    number(MeasurementKind::Temperature.name(), "celsius", text).map(Reading::temperature)
}

fn ph(text: &str) -> Result<Reading, DecodeError> {
    number(MeasurementKind::Ph.name(), "ph", text).map(|ph| Reading::Ph { ph })
}

fn number(measurement: &'static str, field: &'static str, raw: &str) -> Result<f64, DecodeError> {
    let value: f64 = raw.trim().parse().map_err(|_| DecodeError::InvalidNumber {
        measurement,
        field,
        value: raw.to_string(),
    })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DecodeError::NonFinite {
            measurement,
            field,
            value: raw.to_string(),
        })
    }
}
