//! Small, dependency-light learning toolkit behind the Medi risk models.
//!
//! The crate covers exactly what the prediction services fit at start-up:
//! - `Dataset` loading from headered CSV files with a binary label column
//! - `StandardScaler` for per-feature standardisation
//! - `LinearSvc`, a linear-kernel C-SVC trained with SMO
//! - `LogisticRegression` with an L2 penalty, trained with damped Newton steps
//! - `train_test_split_stratified` for reproducible, seeded hold-out splits
//!
//! ```
//! use medi_learn::{LogisticParams, LogisticRegression, StandardScaler};
//! let rows = vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![8.0, 80.0], vec![9.0, 90.0]];
//! let labels = vec![false, false, true, true];
//! let scaler = StandardScaler::fit(&rows).unwrap();
//! let scaled = scaler.transform_rows(&rows).unwrap();
//! let model = LogisticRegression::fit(&scaled, &labels, &LogisticParams::default()).unwrap();
//! let probe = scaler.transform(&[8.5, 85.0]).unwrap();
//! assert!(model.predict(&probe).unwrap());
//! ```
pub mod dataset;
pub mod error;
pub mod linalg;
pub mod logistic;
pub mod metrics;
pub mod scaler;
pub mod split;
pub mod svm;

pub use dataset::{Dataset, DatasetError};
pub use error::LearnError;
pub use logistic::{LogisticParams, LogisticRegression};
pub use metrics::accuracy;
pub use scaler::StandardScaler;
pub use split::{train_test_split_stratified, Split};
pub use svm::{LinearSvc, SvcParams};
