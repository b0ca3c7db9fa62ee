use std::fmt;

use serde::Serialize;

/// Column order of the diabetes training table, label excluded.
pub const DIABETES_FEATURES: [&str; 8] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Diabetes,
    Heart,
}

impl Domain {
    pub fn name(self) -> &'static str {
        match self {
            Domain::Diabetes => "diabetes",
            Domain::Heart => "heart",
        }
    }

    /// Label column dropped from the training CSV.
    pub fn label_column(self) -> &'static str {
        match self {
            Domain::Diabetes => "Outcome",
            Domain::Heart => "target",
        }
    }

    /// Key of the boolean in a successful response body.
    pub fn result_key(self) -> &'static str {
        match self {
            Domain::Diabetes => "is_diabetic",
            Domain::Heart => "has_disease",
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            Domain::Diabetes => "/predict/diabetes",
            Domain::Heart => "/predict/heart",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Positional feature layout a model was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSchema {
    pub domain: Domain,
    pub feature_names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(domain: Domain, feature_names: Vec<String>) -> Self {
        Self {
            domain,
            feature_names,
        }
    }

    pub fn len(&self) -> usize {
        self.feature_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature_names.is_empty()
    }
}
