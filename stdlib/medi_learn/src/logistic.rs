use core::cmp::Ordering;

use crate::error::{check_training_set, LearnError};
use crate::linalg::{dot, solve};

#[derive(Debug, Clone, PartialEq)]
pub struct LogisticParams {
    /// Inverse L2 regularisation strength.
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the largest gradient component falls below this.
    pub tol: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 2000,
            tol: 1e-4,
        }
    }
}

/// Binary logistic regression with an L2 penalty on the weights (not the intercept).
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub intercept: f64,
    pub n_iter: usize,
}

impl LogisticRegression {
    /// Minimise `½‖w‖² + C Σ log(1 + exp(−yᵢ(w·xᵢ + b)))` with damped Newton steps.
    pub fn fit(
        rows: &[Vec<f64>],
        labels: &[bool],
        params: &LogisticParams,
    ) -> Result<Self, LearnError> {
        if params.c.partial_cmp(&0.0) != Some(Ordering::Greater)
            || params.tol.partial_cmp(&0.0) != Some(Ordering::Greater)
        {
            return Err(LearnError::InvalidParameter(format!(
                "c and tol must be positive (c = {}, tol = {})",
                params.c, params.tol
            )));
        }
        let width = check_training_set(rows, labels)?;
        let dim = width + 1;

        // theta = [w..., b]
        let mut theta = vec![0.0; dim];
        let mut loss = objective(&theta, rows, labels, params.c);
        let mut n_iter = 0;

        while n_iter < params.max_iter {
            let (grad, hess) = gradient_and_hessian(&theta, rows, labels, params.c);
            let g_max = grad.iter().fold(0.0f64, |m, g| m.max(g.abs()));
            if g_max <= params.tol {
                break;
            }
            n_iter += 1;

            let neg_grad: Vec<f64> = grad.iter().map(|g| -g).collect();
            let step = solve(hess, neg_grad).ok_or(LearnError::Singular)?;
            let slope = dot(&grad, &step);

            let mut t = 1.0;
            loop {
                let candidate: Vec<f64> = theta
                    .iter()
                    .zip(&step)
                    .map(|(th, s)| th + t * s)
                    .collect();
                let cand_loss = objective(&candidate, rows, labels, params.c);
                if cand_loss <= loss + 1e-4 * t * slope || t < 1e-10 {
                    theta = candidate;
                    loss = cand_loss;
                    break;
                }
                t *= 0.5;
            }
        }

        if n_iter == params.max_iter {
            log::warn!(
                "logistic regression hit max_iter = {} before reaching tol {}",
                params.max_iter,
                params.tol
            );
        }
        log::debug!("logistic regression finished after {n_iter} Newton steps, loss {loss:.6}");

        let intercept = theta[width];
        theta.truncate(width);
        Ok(Self {
            weights: theta,
            intercept,
            n_iter,
        })
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    pub fn decision_function(&self, x: &[f64]) -> Result<f64, LearnError> {
        if x.len() != self.weights.len() {
            return Err(LearnError::ShapeMismatch {
                expected: self.weights.len(),
                found: x.len(),
            });
        }
        Ok(dot(&self.weights, x) + self.intercept)
    }

    pub fn predict_proba(&self, x: &[f64]) -> Result<f64, LearnError> {
        Ok(sigmoid(self.decision_function(x)?))
    }

    pub fn predict(&self, x: &[f64]) -> Result<bool, LearnError> {
        Ok(self.decision_function(x)? > 0.0)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// `log(1 + exp(-m))` without overflow.
fn log_loss(margin: f64) -> f64 {
    if margin > 0.0 {
        (-margin).exp().ln_1p()
    } else {
        -margin + margin.exp().ln_1p()
    }
}

fn linear(theta: &[f64], x: &[f64]) -> f64 {
    let width = x.len();
    dot(&theta[..width], x) + theta[width]
}

fn objective(theta: &[f64], rows: &[Vec<f64>], labels: &[bool], c: f64) -> f64 {
    let width = theta.len() - 1;
    let penalty = 0.5 * dot(&theta[..width], &theta[..width]);
    let data: f64 = rows
        .iter()
        .zip(labels)
        .map(|(x, &y)| {
            let z = linear(theta, x);
            log_loss(if y { z } else { -z })
        })
        .sum();
    penalty + c * data
}

fn gradient_and_hessian(
    theta: &[f64],
    rows: &[Vec<f64>],
    labels: &[bool],
    c: f64,
) -> (Vec<f64>, Vec<Vec<f64>>) {
    let dim = theta.len();
    let width = dim - 1;
    let mut grad = vec![0.0; dim];
    let mut hess = vec![vec![0.0; dim]; dim];

    for (x, &y) in rows.iter().zip(labels) {
        let p = sigmoid(linear(theta, x));
        let residual = p - if y { 1.0 } else { 0.0 };
        let curvature = p * (1.0 - p);
        for a in 0..dim {
            let xa = if a < width { x[a] } else { 1.0 };
            grad[a] += c * residual * xa;
            for b in a..dim {
                let xb = if b < width { x[b] } else { 1.0 };
                hess[a][b] += c * curvature * xa * xb;
            }
        }
    }

    for a in 0..width {
        grad[a] += theta[a];
        hess[a][a] += 1.0;
    }
    for a in 0..dim {
        for b in 0..a {
            hess[a][b] = hess[b][a];
        }
    }
    (grad, hess)
}
