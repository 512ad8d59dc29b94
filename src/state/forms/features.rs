//! Coercion of raw form values into the typed feature record

use super::field::{FieldKind, YES_TOKEN};
use super::form_state::FormState;
use crate::error::SubmitError;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Typed value of one feature
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Flag(bool),
    Integer(i64),
    Decimal(f64),
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureValue::Text(s) => serializer.serialize_str(s),
            FeatureValue::Flag(true) => serializer.serialize_str("yes"),
            FeatureValue::Flag(false) => serializer.serialize_str("no"),
            FeatureValue::Integer(n) => serializer.serialize_i64(*n),
            FeatureValue::Decimal(x) => serializer.serialize_f64(*x),
        }
    }
}

/// Feature record passed to the predictor, in catalog order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRecord {
    entries: Vec<(&'static str, FeatureValue)>,
}

impl FeatureRecord {
    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&FeatureValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, id: &'static str, value: FeatureValue) {
        self.entries.push((id, value));
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Round to one fractional digit, half away from zero
fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Build the feature record from the current form values.
///
/// Decimal values with extra precision are rounded rather than rejected.
pub fn extract(form: &FormState) -> Result<FeatureRecord, SubmitError> {
    let mut record = FeatureRecord::default();
    for field in form.fields() {
        let id = field.id();
        let value = match field.kind() {
            FieldKind::City => {
                let city = field.value.trim().to_lowercase();
                if city.is_empty() {
                    return Err(SubmitError::Validation { field: id });
                }
                FeatureValue::Text(city)
            }
            FieldKind::Binary => {
                FeatureValue::Flag(field.value.trim().to_lowercase() == YES_TOKEN)
            }
            FieldKind::Integer => {
                let raw = field.value.trim();
                if raw.is_empty() {
                    FeatureValue::Integer(0)
                } else {
                    let n = raw.parse::<i64>().map_err(|e| SubmitError::Parse {
                        field: id,
                        value: raw.to_string(),
                        reason: e.to_string(),
                    })?;
                    FeatureValue::Integer(n)
                }
            }
            FieldKind::Decimal => {
                let raw = field.value.trim();
                if raw.is_empty() {
                    FeatureValue::Decimal(0.0)
                } else {
                    let x = raw.parse::<f64>().map_err(|e| SubmitError::Parse {
                        field: id,
                        value: raw.to_string(),
                        reason: e.to_string(),
                    })?;
                    let rounded = round_one_decimal(x);
                    if !rounded.is_finite() {
                        return Err(SubmitError::Parse {
                            field: id,
                            value: raw.to_string(),
                            reason: "value out of range".to_string(),
                        });
                    }
                    FeatureValue::Decimal(rounded)
                }
            }
        };
        record.insert(id, value);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::FIELDS;
    use crate::state::forms::form_state::Form;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_extract_deterministically() {
        let form = FormState::new();
        let record = extract(&form).unwrap();
        assert_eq!(record.len(), FIELDS.len());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "city": "gdynia",
                "buildYear": 2005,
                "squareMeters": 50.0,
                "rooms": 2,
                "floor": 1,
                "floorCount": 4,
                "hasParkingSpace": "no",
                "hasBalcony": "no",
                "hasElevator": "no",
                "hasSecurity": "no",
                "hasStorageRoom": "no",
                "poiCount": 3,
                "centreDistance": 5.0,
                "clinicDistance": 2.0,
                "restaurantDistance": 1.0,
                "collegeDistance": 4.0
            })
        );
    }

    #[test]
    fn test_serialization_keeps_catalog_order() {
        let record = extract(&FormState::new()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with(r#"{"city":"gdynia","buildYear":2005"#));
    }

    #[test]
    fn test_city_is_trimmed_and_lowercased() {
        let mut form = FormState::new();
        form.set_value("city", "  GDYNIA ");
        let record = extract(&form).unwrap();
        assert_eq!(
            record.get("city"),
            Some(&FeatureValue::Text("gdynia".to_string()))
        );
    }

    #[test]
    fn test_empty_city_is_a_validation_error() {
        let mut form = FormState::new();
        form.set_value("city", "   ");
        let err = extract(&form).unwrap_err();
        assert!(matches!(err, SubmitError::Validation { field: "city" }));
        assert_eq!(err.to_string(), "city must not be empty");
    }

    #[test]
    fn test_binary_mapping() {
        let mut form = FormState::new();
        form.set_value("hasBalcony", " Tak ");
        form.set_value("hasElevator", "yes");
        let record = extract(&form).unwrap();
        assert_eq!(record.get("hasBalcony"), Some(&FeatureValue::Flag(true)));
        assert_eq!(record.get("hasElevator"), Some(&FeatureValue::Flag(false)));
        assert_eq!(record.get("hasSecurity"), Some(&FeatureValue::Flag(false)));
    }

    #[test]
    fn test_empty_numbers_become_zero() {
        let mut form = FormState::new();
        form.set_value("rooms", "");
        form.set_value("clinicDistance", "  ");
        let record = extract(&form).unwrap();
        assert_eq!(record.get("rooms"), Some(&FeatureValue::Integer(0)));
        assert_eq!(
            record.get("clinicDistance"),
            Some(&FeatureValue::Decimal(0.0))
        );
    }

    #[test]
    fn test_extra_precision_is_rounded() {
        let mut form = FormState::new();
        form.set_value("squareMeters", "50.25");
        let record = extract(&form).unwrap();
        assert_eq!(
            record.get("squareMeters"),
            Some(&FeatureValue::Decimal(50.3))
        );
    }

    #[test]
    fn test_bare_separator_is_a_parse_error() {
        let mut form = FormState::new();
        form.set_value("centreDistance", ".");
        let err = extract(&form).unwrap_err();
        match err {
            SubmitError::Parse { field, value, .. } => {
                assert_eq!(field, "centreDistance");
                assert_eq!(value, ".");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_integer_overflow_is_a_parse_error() {
        let mut form = FormState::new();
        form.set_value("buildYear", "99999999999999999999");
        assert!(matches!(
            extract(&form),
            Err(SubmitError::Parse {
                field: "buildYear",
                ..
            })
        ));
    }

    #[test]
    fn test_overflowing_decimal_is_a_parse_error() {
        let mut form = FormState::new();
        let index = form
            .fields()
            .iter()
            .position(|f| f.id() == "squareMeters")
            .unwrap();
        form.set_active_field(index);
        form.set_value("squareMeters", "");
        for _ in 0..400 {
            assert!(form.input_char('9'));
        }
        match extract(&form) {
            Err(SubmitError::Parse { field, reason, .. }) => {
                assert_eq!(field, "squareMeters");
                assert_eq!(reason, "value out of range");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_decimal_that_overflows_when_rounded_is_a_parse_error() {
        let mut form = FormState::new();
        form.set_value("collegeDistance", "1e308");
        assert!(matches!(
            extract(&form),
            Err(SubmitError::Parse {
                field: "collegeDistance",
                ..
            })
        ));
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(1.04), 1.0);
        assert_eq!(round_one_decimal(1.06), 1.1);
        assert_eq!(round_one_decimal(0.0), 0.0);
    }
}
