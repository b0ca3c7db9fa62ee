//! Linear-kernel C-SVC.
//!
//! Training solves the dual problem
//!
//! ```text
//! min ½ αᵀQα − Σα   s.t.  0 ≤ αᵢ ≤ C,  Σ yᵢαᵢ = 0,   Qᵢⱼ = yᵢyⱼ xᵢ·xⱼ
//! ```
//!
//! with sequential minimal optimisation, picking the maximal violating pair at
//! every step. Inference only needs the primal weights: `f(x) = w·x − rho`.

use core::cmp::Ordering;

use crate::error::{check_training_set, LearnError};
use crate::linalg::dot;

const TAU: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct SvcParams {
    /// Box constraint on the dual coefficients.
    pub c: f64,
    /// Stopping tolerance on the KKT violation.
    pub tol: f64,
    pub max_iter: usize,
}

impl Default for SvcParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            tol: 1e-3,
            max_iter: 10_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearSvc {
    pub weights: Vec<f64>,
    pub rho: f64,
    /// Number of training rows with a non-zero dual coefficient.
    pub n_support: usize,
}

impl LinearSvc {
    pub fn fit(rows: &[Vec<f64>], labels: &[bool], params: &SvcParams) -> Result<Self, LearnError> {
        let positive_param = |v: f64| v.partial_cmp(&0.0) == Some(Ordering::Greater);
        if !positive_param(params.c) || !positive_param(params.tol) {
            return Err(LearnError::InvalidParameter(format!(
                "c and tol must be positive (c = {}, tol = {})",
                params.c, params.tol
            )));
        }
        let width = check_training_set(rows, labels)?;
        let n = rows.len();
        let c = params.c;
        let y: Vec<f64> = labels.iter().map(|&l| if l { 1.0 } else { -1.0 }).collect();
        let diag: Vec<f64> = rows.iter().map(|r| dot(r, r)).collect();

        let mut alpha = vec![0.0; n];
        // Gradient of the dual objective, Qα − e.
        let mut grad = vec![-1.0; n];
        let mut iter = 0usize;

        loop {
            let Some((i, j)) = select_working_set(&alpha, &grad, &y, c, params.tol) else {
                break;
            };
            if iter >= params.max_iter {
                log::warn!(
                    "linear SVC stopped after {iter} iterations without reaching tol {}",
                    params.tol
                );
                break;
            }
            iter += 1;

            let q_ij = y[i] * y[j] * dot(&rows[i], &rows[j]);
            let (old_i, old_j) = (alpha[i], alpha[j]);

            if y[i] != y[j] {
                let quad = positive(diag[i] + diag[j] + 2.0 * q_ij);
                let delta = (-grad[i] - grad[j]) / quad;
                let diff = alpha[i] - alpha[j];
                alpha[i] += delta;
                alpha[j] += delta;
                if diff > 0.0 {
                    if alpha[j] < 0.0 {
                        alpha[j] = 0.0;
                        alpha[i] = diff;
                    }
                } else if alpha[i] < 0.0 {
                    alpha[i] = 0.0;
                    alpha[j] = -diff;
                }
                if diff > 0.0 {
                    if alpha[i] > c {
                        alpha[i] = c;
                        alpha[j] = c - diff;
                    }
                } else if alpha[j] > c {
                    alpha[j] = c;
                    alpha[i] = c + diff;
                }
            } else {
                let quad = positive(diag[i] + diag[j] - 2.0 * q_ij);
                let delta = (grad[i] - grad[j]) / quad;
                let sum = alpha[i] + alpha[j];
                alpha[i] -= delta;
                alpha[j] += delta;
                if sum > c {
                    if alpha[i] > c {
                        alpha[i] = c;
                        alpha[j] = sum - c;
                    }
                } else if alpha[j] < 0.0 {
                    alpha[j] = 0.0;
                    alpha[i] = sum;
                }
                if sum > c {
                    if alpha[j] > c {
                        alpha[j] = c;
                        alpha[i] = sum - c;
                    }
                } else if alpha[i] < 0.0 {
                    alpha[i] = 0.0;
                    alpha[j] = sum;
                }
            }

            let d_i = alpha[i] - old_i;
            let d_j = alpha[j] - old_j;
            for t in 0..n {
                let k_ti = dot(&rows[t], &rows[i]);
                let k_tj = dot(&rows[t], &rows[j]);
                grad[t] += y[t] * (y[i] * k_ti * d_i + y[j] * k_tj * d_j);
            }
        }

        let rho = compute_rho(&alpha, &grad, &y, c);
        let mut weights = vec![0.0; width];
        let mut n_support = 0;
        for ((row, &a), &yi) in rows.iter().zip(&alpha).zip(&y) {
            if a > 0.0 {
                n_support += 1;
                for (w, &x) in weights.iter_mut().zip(row) {
                    *w += a * yi * x;
                }
            }
        }
        log::debug!("linear SVC converged in {iter} iterations with {n_support} support vectors");

        Ok(Self {
            weights,
            rho,
            n_support,
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
        Ok(dot(&self.weights, x) - self.rho)
    }

    pub fn predict(&self, x: &[f64]) -> Result<bool, LearnError> {
        Ok(self.decision_function(x)? > 0.0)
    }
}

fn positive(quad: f64) -> f64 {
    if quad <= 0.0 {
        TAU
    } else {
        quad
    }
}

fn in_up(a: f64, y: f64, c: f64) -> bool {
    (y > 0.0 && a < c) || (y < 0.0 && a > 0.0)
}

fn in_low(a: f64, y: f64, c: f64) -> bool {
    (y > 0.0 && a > 0.0) || (y < 0.0 && a < c)
}

/// Maximal violating pair, or `None` once the KKT gap is within `tol`.
fn select_working_set(
    alpha: &[f64],
    grad: &[f64],
    y: &[f64],
    c: f64,
    tol: f64,
) -> Option<(usize, usize)> {
    let mut g_max = f64::NEG_INFINITY;
    let mut g_min = f64::INFINITY;
    let mut i = None;
    let mut j = None;
    for t in 0..alpha.len() {
        let v = -y[t] * grad[t];
        if in_up(alpha[t], y[t], c) && v > g_max {
            g_max = v;
            i = Some(t);
        }
        if in_low(alpha[t], y[t], c) && v < g_min {
            g_min = v;
            j = Some(t);
        }
    }
    if g_max - g_min < tol {
        return None;
    }
    Some((i?, j?))
}

fn compute_rho(alpha: &[f64], grad: &[f64], y: &[f64], c: f64) -> f64 {
    let mut ub = f64::INFINITY;
    let mut lb = f64::NEG_INFINITY;
    let mut free = 0usize;
    let mut sum_free = 0.0;
    for t in 0..alpha.len() {
        let yg = y[t] * grad[t];
        if alpha[t] >= c {
            if y[t] < 0.0 {
                ub = ub.min(yg);
            } else {
                lb = lb.max(yg);
            }
        } else if alpha[t] <= 0.0 {
            if y[t] > 0.0 {
                ub = ub.min(yg);
            } else {
                lb = lb.max(yg);
            }
        } else {
            free += 1;
            sum_free += yg;
        }
    }
    if free > 0 {
        sum_free / free as f64
    } else {
        (ub + lb) / 2.0
    }
}
