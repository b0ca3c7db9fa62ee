use medi_learn::{
    accuracy, train_test_split_stratified, Dataset, LearnError, LinearSvc, StandardScaler,
    SvcParams,
};

use crate::domain::{Domain, FeatureSchema, DIABETES_FEATURES};
use crate::error::{FitError, PredictError};
use crate::features::validate_features;
use crate::model::{FitReport, Predictor, TrainingOptions};

/// Standardise, then classify with a linear-kernel SVC.
///
/// The scaler is fitted on every row of the table before the hold-out split,
/// so inputs at serving time go through the same transform the SVC saw.
#[derive(Debug, Clone)]
pub struct DiabetesModel {
    schema: FeatureSchema,
    scaler: StandardScaler,
    classifier: LinearSvc,
    report: FitReport,
}

impl DiabetesModel {
    pub fn fit(dataset: &Dataset, opts: &TrainingOptions) -> Result<Self, FitError> {
        let domain = Domain::Diabetes;
        if dataset.feature_names != DIABETES_FEATURES {
            return Err(FitError::SchemaMismatch {
                domain,
                expected: DIABETES_FEATURES.iter().map(|s| s.to_string()).collect(),
                found: dataset.feature_names.clone(),
            });
        }

        let scaler = StandardScaler::fit(&dataset.rows).map_err(FitError::learn(domain))?;
        let scaled = Dataset {
            feature_names: dataset.feature_names.clone(),
            rows: scaler
                .transform_rows(&dataset.rows)
                .map_err(FitError::learn(domain))?,
            labels: dataset.labels.clone(),
        };

        let split = train_test_split_stratified(&scaled.labels, opts.test_size, opts.seed)
            .map_err(FitError::learn(domain))?;
        let train = scaled.select(&split.train);
        let test = scaled.select(&split.test);

        let classifier = LinearSvc::fit(&train.rows, &train.labels, &SvcParams::default())
            .map_err(FitError::learn(domain))?;
        let predicted = test
            .rows
            .iter()
            .map(|row| classifier.predict(row))
            .collect::<Result<Vec<bool>, LearnError>>()
            .map_err(FitError::learn(domain))?;

        let report = FitReport {
            train_rows: train.len(),
            test_rows: test.len(),
            test_accuracy: accuracy(&predicted, &test.labels),
        };
        log::info!(
            "fitted {domain} model: {} support vectors, {} train rows, held-out accuracy {:.3}",
            classifier.n_support,
            report.train_rows,
            report.test_accuracy
        );

        Ok(Self {
            schema: FeatureSchema::new(domain, dataset.feature_names.clone()),
            scaler,
            classifier,
            report,
        })
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &LinearSvc {
        &self.classifier
    }
}

impl Predictor for DiabetesModel {
    fn domain(&self) -> Domain {
        Domain::Diabetes
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn report(&self) -> &FitReport {
        &self.report
    }

    fn predict(&self, features: &[f64]) -> Result<bool, PredictError> {
        validate_features(&self.schema, features)?;
        let standardised = self.scaler.transform(features)?;
        Ok(self.classifier.predict(&standardised)?)
    }
}
