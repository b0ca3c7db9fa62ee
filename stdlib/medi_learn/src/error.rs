use thiserror::Error;

/// Errors raised while fitting or applying a model.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LearnError {
    #[error("expected {expected} features, got {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("cannot fit on an empty input")]
    EmptyInput,
    #[error("{rows} rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },
    #[error("training labels contain a single class")]
    SingleClass,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("linear system is singular")]
    Singular,
    #[error("non-finite value at feature {index}")]
    NonFinite { index: usize },
}

/// Check that every row has `width` columns.
pub(crate) fn check_rows(rows: &[Vec<f64>], width: usize) -> Result<(), LearnError> {
    for row in rows {
        if row.len() != width {
            return Err(LearnError::ShapeMismatch {
                expected: width,
                found: row.len(),
            });
        }
    }
    Ok(())
}

/// Shared preconditions for the supervised learners.
pub(crate) fn check_training_set(rows: &[Vec<f64>], labels: &[bool]) -> Result<usize, LearnError> {
    if rows.is_empty() {
        return Err(LearnError::EmptyInput);
    }
    if rows.len() != labels.len() {
        return Err(LearnError::LengthMismatch {
            rows: rows.len(),
            labels: labels.len(),
        });
    }
    let width = rows[0].len();
    check_rows(rows, width)?;
    let positives = labels.iter().filter(|&&y| y).count();
    if positives == 0 || positives == labels.len() {
        return Err(LearnError::SingleClass);
    }
    Ok(width)
}
