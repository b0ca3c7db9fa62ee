use std::path::{Path, PathBuf};

use medi_learn::Dataset;

use crate::diabetes::DiabetesModel;
use crate::domain::Domain;
use crate::error::FitError;
use crate::heart::HeartModel;
use crate::model::{Predictor, TrainingOptions};

/// Locations of the bundled training tables.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPaths {
    pub diabetes: PathBuf,
    pub heart: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            diabetes: PathBuf::from("data/diabetes.csv"),
            heart: PathBuf::from("data/heart_disease_data.csv"),
        }
    }
}

/// Both fitted models, built once at start-up and only read afterwards.
#[derive(Debug, Clone)]
pub struct ModelSet {
    pub diabetes: DiabetesModel,
    pub heart: HeartModel,
}

impl ModelSet {
    pub fn fit(paths: &DatasetPaths, opts: &TrainingOptions) -> Result<Self, FitError> {
        let diabetes = DiabetesModel::fit(&load(&paths.diabetes, Domain::Diabetes)?, opts)?;
        let heart = HeartModel::fit(&load(&paths.heart, Domain::Heart)?, opts)?;
        Ok(Self { diabetes, heart })
    }

    pub fn get(&self, domain: Domain) -> &dyn Predictor {
        match domain {
            Domain::Diabetes => &self.diabetes,
            Domain::Heart => &self.heart,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Predictor> {
        [Domain::Diabetes, Domain::Heart]
            .into_iter()
            .map(move |d| self.get(d))
    }
}

fn load(path: &Path, domain: Domain) -> Result<Dataset, FitError> {
    log::info!("loading {domain} training data from {}", path.display());
    Dataset::from_csv_path(path, domain.label_column())
        .map_err(|source| FitError::Dataset { domain, source })
}
