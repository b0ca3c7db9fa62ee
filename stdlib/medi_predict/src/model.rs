use serde::Serialize;

use crate::domain::{Domain, FeatureSchema};
use crate::error::PredictError;

/// Hold-out settings used when fitting at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOptions {
    /// Fraction of rows held out for the accuracy report.
    pub test_size: f64,
    /// Seed for the stratified shuffle; same data + same seed = same model.
    pub seed: u64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 2,
        }
    }
}

/// Summary of a fit, logged at start-up and exposed on `/models`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub test_accuracy: f64,
}

/// A frozen binary classifier for one domain.
pub trait Predictor: Send + Sync {
    fn domain(&self) -> Domain;

    fn schema(&self) -> &FeatureSchema;

    fn report(&self) -> &FitReport;

    /// Validate `features` against the schema and classify them.
    fn predict(&self, features: &[f64]) -> Result<bool, PredictError>;
}
