/// A decoded sensor measurement. Exactly one kind per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Conductivity {
        conductivity: f64,
        tds: f64,
        salinity: f64,
        specific_gravity: f64,
    },
    Temperature {
        celsius: f64,
        fahrenheit: f64,
    },
    Ph {
        ph: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementKind {
    Conductivity,
    Temperature,
    Ph,
}

impl MeasurementKind {
    /// Measurement name as understood by the collector.
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementKind::Conductivity => "conductivity",
            MeasurementKind::Temperature => "temp",
            MeasurementKind::Ph => "ph",
        }
    }
}

impl Reading {
    pub fn temperature(celsius: f64) -> Self {
        Reading::Temperature {
            celsius,
            fahrenheit: round_to_hundredths(celsius * 1.8 + 32.0),
        }
    }

    pub fn kind(&self) -> MeasurementKind {
        match self {
            Reading::Conductivity { .. } => MeasurementKind::Conductivity,
            Reading::Temperature { .. } => MeasurementKind::Temperature,
            Reading::Ph { .. } => MeasurementKind::Ph,
        }
    }

    pub fn measurement(&self) -> &'static str {
        self.kind().name()
    }

    /// Flattened `name -> value` pairs sent as the point fields.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Reading::Conductivity {
                conductivity,
                tds,
                salinity,
                specific_gravity,
            } => vec![
                ("conductivity", conductivity),
                ("tds", tds),
                ("salinity", salinity),
                ("specific_gravity", specific_gravity),
            ],
            Reading::Temperature { celsius, fahrenheit } => vec![("celsius", celsius), ("fahrenheit", fahrenheit)],
            Reading::Ph { ph } => vec![("ph", ph)],
        }
    }
}

/// Ties on the exact binary value go to even, like printf-style `%.2f`.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
