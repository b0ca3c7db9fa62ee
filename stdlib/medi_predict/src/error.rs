use medi_learn::{DatasetError, LearnError};
use thiserror::Error;

use crate::domain::Domain;

/// The request body did not carry a usable feature list.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeatureError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("missing required field `features`")]
    MissingFeatures,
    #[error("`features` must be a list of numbers")]
    NotAList,
    #[error("feature at index {index} is not a number: {value}")]
    NotANumber { index: usize, value: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictError {
    #[error(transparent)]
    Features(#[from] FeatureError),
    #[error("{domain} model expects {expected} features, got {found}")]
    FeatureCount {
        domain: Domain,
        expected: usize,
        found: usize,
    },
    #[error("feature at index {index} is not finite")]
    NonFinite { index: usize },
    #[error(transparent)]
    Learn(#[from] LearnError),
}

/// Start-up failure; the service must not serve with an unfitted model.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("{domain} dataset: {source}")]
    Dataset {
        domain: Domain,
        #[source]
        source: DatasetError,
    },
    #[error("{domain} model: {source}")]
    Learn {
        domain: Domain,
        #[source]
        source: LearnError,
    },
    #[error("{domain} dataset columns {found:?} do not match expected {expected:?}")]
    SchemaMismatch {
        domain: Domain,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("{domain} dataset has no feature columns")]
    TooFewFeatures { domain: Domain },
}

impl FitError {
    pub(crate) fn learn(domain: Domain) -> impl FnOnce(LearnError) -> Self {
        move |source| FitError::Learn { domain, source }
    }
}
