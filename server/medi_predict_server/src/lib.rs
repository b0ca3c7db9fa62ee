//! HTTP surface for the Medi risk models.
//!
//! | Route | Body | Success |
//! |---|---|---|
//! | `POST /predict/diabetes` | `{"features": [8 numbers]}` | `{"is_diabetic": bool}` |
//! | `POST /predict/heart` | `{"features": [13 numbers]}` | `{"has_disease": bool}` |
//! | `GET /models` | | schema and hold-out accuracy per model |
//! | `GET /health` | | `ok` |
//!
//! Any failing prediction request answers `400 {"error": "..."}`.
pub mod config;
pub mod error;
pub mod routes;

pub use config::{Cli, ServerConfig};
pub use error::{ApiError, StartupError};
pub use routes::{app, SharedModels};
