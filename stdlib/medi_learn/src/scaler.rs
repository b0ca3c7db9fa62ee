use crate::error::{check_rows, LearnError};

/// Per-feature standardisation `(x - mean) / scale`, fitted once and then frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and population standard deviations.
    ///
    /// Constant columns get a scale of 1 so they map to 0 instead of NaN.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, LearnError> {
        let first = rows.first().ok_or(LearnError::EmptyInput)?;
        let width = first.len();
        check_rows(rows, width)?;

        let n = rows.len() as f64;
        let mut mean = vec![0.0; width];
        for row in rows {
            for (m, &x) in mean.iter_mut().zip(row) {
                *m += x;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut var = vec![0.0; width];
        for row in rows {
            for ((v, &x), &m) in var.iter_mut().zip(row).zip(&mean) {
                let d = x - m;
                *v += d * d;
            }
        }
        let scale = var
            .into_iter()
            .map(|v| {
                let std = (v / n).sqrt();
                if std == 0.0 {
                    1.0
                } else {
                    std
                }
            })
            .collect();

        Ok(Self { mean, scale })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, LearnError> {
        if x.len() != self.mean.len() {
            return Err(LearnError::ShapeMismatch {
                expected: self.mean.len(),
                found: x.len(),
            });
        }
        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&v, (&m, &s))| (v - m) / s)
            .collect())
    }

    pub fn inverse_transform(&self, z: &[f64]) -> Result<Vec<f64>, LearnError> {
        if z.len() != self.mean.len() {
            return Err(LearnError::ShapeMismatch {
                expected: self.mean.len(),
                found: z.len(),
            });
        }
        Ok(z.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&v, (&m, &s))| v * s + m)
            .collect())
    }

    pub fn transform_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, LearnError> {
        rows.iter().map(|r| self.transform(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fit_uses_population_std() {
        let rows = vec![vec![1.0, 5.0], vec![3.0, 5.0]];
        let s = StandardScaler::fit(&rows).unwrap();
        assert_eq!(s.mean, vec![2.0, 5.0]);
        assert_abs_diff_eq!(s.scale[0], 1.0, epsilon = 1e-12);
        // constant column
        assert_eq!(s.scale[1], 1.0);
    }

    #[test]
    fn transform_standardises_each_feature() {
        let rows = vec![vec![0.0, 10.0], vec![2.0, 20.0], vec![4.0, 30.0]];
        let s = StandardScaler::fit(&rows).unwrap();
        let z = s.transform(&[2.0, 20.0]).unwrap();
        assert_abs_diff_eq!(z[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z[1], 0.0, epsilon = 1e-12);

        let z = s.transform(&[4.0, 10.0]).unwrap();
        let std0 = (8.0f64 / 3.0).sqrt();
        assert_abs_diff_eq!(z[0], 2.0 / std0, epsilon = 1e-12);
        assert_abs_diff_eq!(z[1], -2.0 / std0, epsilon = 1e-12);

        let back = s.inverse_transform(&z).unwrap();
        assert_abs_diff_eq!(back[0], 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(back[1], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn transform_rejects_wrong_width() {
        let s = StandardScaler::fit(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(
            s.transform(&[1.0, 2.0]),
            Err(LearnError::ShapeMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn fit_rejects_empty_and_ragged() {
        assert_eq!(StandardScaler::fit(&[]), Err(LearnError::EmptyInput));
        assert!(StandardScaler::fit(&[vec![1.0], vec![1.0, 2.0]]).is_err());
    }
}
