//! Prediction services for the Medi risk endpoints.
//!
//! Two frozen binary classifiers are fitted once from bundled CSV data:
//! - diabetes: `StandardScaler` + linear-kernel `LinearSvc`, input standardised first
//! - heart disease: L2 `LogisticRegression` applied to the raw feature vector
//!
//! Both sit behind the [`Predictor`] trait so request handlers can share one
//! read-only [`ModelSet`] across threads.
//!
//! ```ignore
//! use medi_predict::{DatasetPaths, ModelSet, Predictor, TrainingOptions};
//! let models = ModelSet::fit(&DatasetPaths::default(), &TrainingOptions::default())?;
//! let diabetic = models.diabetes.predict(&[6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0])?;
//! ```
pub mod diabetes;
pub mod domain;
pub mod error;
pub mod features;
pub mod heart;
pub mod model;
pub mod model_set;

pub use diabetes::DiabetesModel;
pub use domain::{Domain, FeatureSchema, DIABETES_FEATURES};
pub use error::{FeatureError, FitError, PredictError};
pub use features::{extract_features, validate_features};
pub use heart::HeartModel;
pub use model::{FitReport, Predictor, TrainingOptions};
pub use model_set::{DatasetPaths, ModelSet};
