use std::collections::BTreeMap;

use serde::Serialize;

use super::{error::SendError, reading::Reading};

/// Wire wrapper posted to the collector, one point per request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Envelope {
    pub tags: Tags,
    pub points: Vec<Point>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Tags {
    pub tank_name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Point {
    pub measurement: &'static str,
    pub fields: BTreeMap<&'static str, f64>,
}

impl Envelope {
    pub fn new(tank_name: &str, reading: &Reading) -> Self {
        Envelope {
            tags: Tags {
                tank_name: tank_name.to_string(),
            },
            points: vec![Point {
                measurement: reading.measurement(),
                fields: reading.fields().into_iter().collect(),
            }],
        }
    }

    pub fn measurement(&self) -> &'static str {
        self.points.first().map_or("unknown", |point| point.measurement)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, SendError> {
        serde_json::to_vec(self).map_err(|e| SendError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_tag_envelope_with_tank_name() {
        let envelope = Envelope::new("reef-01", &Reading::Ph { ph: 7.2 });
        assert_eq!(envelope.tags.tank_name, "reef-01");
        assert_eq!(envelope.points.len(), 1);
        assert_eq!(envelope.measurement(), "ph");
    }

    #[test]
    fn should_serialize_to_collector_format() {
        let envelope = Envelope::new("reef-01", &Reading::temperature(25.0));
        let value: serde_json::Value = serde_json::from_slice(&envelope.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "tags": { "tank_name": "reef-01" },
                "points": [
                    { "measurement": "temp", "fields": { "celsius": 25.0, "fahrenheit": 77.0 } }
                ]
            })
        );
    }

    #[test]
    fn should_carry_all_conductivity_fields() {
        let reading = Reading::Conductivity {
            conductivity: 100.0,
            tds: 50.0,
            salinity: 0.5,
            specific_gravity: 1.02,
        };
        let envelope = Envelope::new("reef-01", &reading);
        let fields = &envelope.points[0].fields;
        assert_eq!(fields.len(), 4);
        assert_eq!(fields["specific_gravity"], 1.02);
        assert_eq!(fields["tds"], 50.0);
    }
}
