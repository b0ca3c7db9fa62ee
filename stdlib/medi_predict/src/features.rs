//! Turning an untrusted request body into a positional feature vector.

use serde_json::Value as JsonValue;

use crate::domain::FeatureSchema;
use crate::error::{FeatureError, PredictError};

/// Pull `features` out of a JSON object as an ordered list of numbers.
///
/// Only JSON numbers are accepted; numeric strings, booleans and nulls are rejected
/// with the offending index. Arity is checked later against the model's schema.
pub fn extract_features(body: &JsonValue) -> Result<Vec<f64>, FeatureError> {
    let object = body.as_object().ok_or(FeatureError::NotAnObject)?;
    let raw = object.get("features").ok_or(FeatureError::MissingFeatures)?;
    let items = raw.as_array().ok_or(FeatureError::NotAList)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_f64().ok_or_else(|| FeatureError::NotANumber {
                index,
                value: item.to_string(),
            })
        })
        .collect()
}

/// Check a vector against the schema a model was fitted on.
pub fn validate_features(schema: &FeatureSchema, features: &[f64]) -> Result<(), PredictError> {
    if features.len() != schema.len() {
        return Err(PredictError::FeatureCount {
            domain: schema.domain,
            expected: schema.len(),
            found: features.len(),
        });
    }
    if let Some(index) = features.iter().position(|x| !x.is_finite()) {
        return Err(PredictError::NonFinite { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn extracts_numbers_in_order() {
        let body = json!({"features": [6, 148, 72.5, -1e-3]});
        assert_eq!(extract_features(&body).unwrap(), vec![6.0, 148.0, 72.5, -0.001]);
        assert_eq!(extract_features(&json!({"features": []})).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn rejects_malformed_bodies() {
        assert_eq!(
            extract_features(&json!({"feature": [1]})),
            Err(FeatureError::MissingFeatures)
        );
        assert_eq!(
            extract_features(&json!([1, 2])),
            Err(FeatureError::NotAnObject)
        );
        assert_eq!(
            extract_features(&json!({"features": "1,2"})),
            Err(FeatureError::NotAList)
        );
        assert_eq!(
            extract_features(&json!({"features": [1, "abc", 3]})),
            Err(FeatureError::NotANumber {
                index: 1,
                value: "\"abc\"".into()
            })
        );
        assert!(extract_features(&json!({"features": [1, null]})).is_err());
        assert!(extract_features(&json!({"features": [true]})).is_err());
    }

    #[test]
    fn validates_arity_and_finiteness() {
        let schema = FeatureSchema::new(Domain::Diabetes, vec!["a".into(), "b".into()]);
        assert!(validate_features(&schema, &[1.0, 2.0]).is_ok());
        assert_eq!(
            validate_features(&schema, &[1.0]),
            Err(PredictError::FeatureCount {
                domain: Domain::Diabetes,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            validate_features(&schema, &[1.0, f64::NAN]),
            Err(PredictError::NonFinite { index: 1 })
        );
    }
}
