use medi_learn::{
    accuracy, train_test_split_stratified, Dataset, LearnError, LogisticParams,
    LogisticRegression,
};

use crate::domain::{Domain, FeatureSchema};
use crate::error::{FitError, PredictError};
use crate::features::validate_features;
use crate::model::{FitReport, Predictor, TrainingOptions};

/// L2 logistic regression on the raw, unscaled feature vector.
#[derive(Debug, Clone)]
pub struct HeartModel {
    schema: FeatureSchema,
    classifier: LogisticRegression,
    report: FitReport,
}

impl HeartModel {
    pub fn fit(dataset: &Dataset, opts: &TrainingOptions) -> Result<Self, FitError> {
        let domain = Domain::Heart;
        if dataset.n_features() == 0 {
            return Err(FitError::TooFewFeatures { domain });
        }

        let split = train_test_split_stratified(&dataset.labels, opts.test_size, opts.seed)
            .map_err(FitError::learn(domain))?;
        let train = dataset.select(&split.train);
        let test = dataset.select(&split.test);

        let classifier =
            LogisticRegression::fit(&train.rows, &train.labels, &LogisticParams::default())
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
            "fitted {domain} model: {} features, {} Newton steps, held-out accuracy {:.3}",
            dataset.n_features(),
            classifier.n_iter,
            report.test_accuracy
        );

        Ok(Self {
            schema: FeatureSchema::new(domain, dataset.feature_names.clone()),
            classifier,
            report,
        })
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }
}

impl Predictor for HeartModel {
    fn domain(&self) -> Domain {
        Domain::Heart
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn report(&self) -> &FitReport {
        &self.report
    }

    fn predict(&self, features: &[f64]) -> Result<bool, PredictError> {
        validate_features(&self.schema, features)?;
        Ok(self.classifier.predict(features)?)
    }
}
