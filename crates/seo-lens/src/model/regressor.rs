//! Ordinary least-squares linear regressor.

use super::ModelError;
use ndarray::{Array1, Array2, Axis};

/// Relative diagonal jitter keeping the solve stable on rank-deficient data.
const JITTER: f64 = 1e-10;

/// `y = intercept + coef · x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept }
    }

    /// Fit by least squares with an intercept.
    ///
    /// Data are centred first. With no more rows than features the
    /// minimum-norm solution is taken through the Gram system
    /// `(Xc Xcᵀ) α = yc`, `w = Xcᵀ α`; otherwise the normal equations
    /// `(Xcᵀ Xc) w = Xcᵀ yc` are solved directly.
    pub fn fit(rows: &[Vec<f64>], targets: &[f64]) -> Result<Self, ModelError> {
        if rows.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if rows.len() != targets.len() {
            return Err(ModelError::LengthMismatch {
                rows: rows.len(),
                targets: targets.len(),
            });
        }

        let n = rows.len();
        let p = rows[0].len();
        let mut x = Array2::<f64>::zeros((n, p));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().take(p).enumerate() {
                x[[i, j]] = v;
            }
        }
        let y = Array1::from(targets.to_vec());

        let x_mean = x.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(p));
        let y_mean = y.mean().unwrap_or(0.0);
        let xc = &x - &x_mean;
        let yc = &y - y_mean;

        let w = if p == 0 {
            Array1::zeros(0)
        } else if n <= p {
            let gram = xc.dot(&xc.t());
            let alpha = solve(gram, yc);
            xc.t().dot(&alpha)
        } else {
            let gram = xc.t().dot(&xc);
            let rhs = xc.t().dot(&yc);
            solve(gram, rhs)
        };

        let intercept = y_mean - x_mean.dot(&w);
        Ok(Self {
            coef: w.to_vec(),
            intercept,
        })
    }

    pub fn predict(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coef
                .iter()
                .zip(x)
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }

    /// Coefficient of determination on a labelled set.
    pub fn r_squared(&self, rows: &[Vec<f64>], targets: &[f64]) -> f64 {
        if targets.is_empty() {
            return 0.0;
        }
        let mean = targets.iter().sum::<f64>() / targets.len() as f64;
        let (ss_res, ss_tot) = rows.iter().zip(targets).fold((0.0, 0.0), |(res, tot), (x, &y)| {
            let err = y - self.predict(x);
            (res + err * err, tot + (y - mean) * (y - mean))
        });
        if ss_tot == 0.0 {
            if ss_res == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        }
    }

    /// Number of input features.
    pub fn dimension(&self) -> usize {
        self.coef.len()
    }

    pub fn coef(&self) -> &[f64] {
        &self.coef
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Solve the symmetric positive semi-definite system `a · x = b` by
/// Gaussian elimination with partial pivoting.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Array1<f64> {
    let n = b.len();
    let scale = (a.diag().sum() / n as f64).abs().max(1.0);
    for i in 0..n {
        a[[i, i]] += JITTER * scale;
    }

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot, col]].abs() < f64::EPSILON * scale {
            continue;
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }

        for row in (col + 1)..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let diag = a[[row, row]];
        if diag.abs() < f64::EPSILON * scale {
            continue;
        }
        let tail: f64 = ((row + 1)..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / diag;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_exact_line() {
        // y = 3 + 2a - b
        let rows = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![2.0, 3.0],
            vec![4.0, 1.0],
        ];
        let targets: Vec<f64> = rows.iter().map(|r| 3.0 + 2.0 * r[0] - r[1]).collect();
        let model = LinearRegressor::fit(&rows, &targets).unwrap();

        assert!((model.intercept() - 3.0).abs() < 1e-6);
        assert!((model.coef()[0] - 2.0).abs() < 1e-6);
        assert!((model.coef()[1] + 1.0).abs() < 1e-6);
        assert!((model.r_squared(&rows, &targets) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_underdetermined_interpolates() {
        let rows = vec![vec![1.0, 0.0, 0.0, 0.5], vec![0.0, 1.0, 0.0, 0.5]];
        let targets = vec![10.0, 20.0];
        let model = LinearRegressor::fit(&rows, &targets).unwrap();
        assert!((model.predict(&rows[0]) - 10.0).abs() < 1e-6);
        assert!((model.predict(&rows[1]) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_constant_feature_falls_back_to_mean() {
        let rows = vec![vec![1.0], vec![1.0], vec![1.0]];
        let model = LinearRegressor::fit(&rows, &[1.0, 2.0, 3.0]).unwrap();
        assert!((model.predict(&[1.0]) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        assert!(matches!(
            LinearRegressor::fit(&[], &[]),
            Err(ModelError::EmptyTrainingSet)
        ));
        assert!(matches!(
            LinearRegressor::fit(&[vec![1.0]], &[1.0, 2.0]),
            Err(ModelError::LengthMismatch { rows: 1, targets: 2 })
        ));
    }

    #[test]
    fn test_predict() {
        let model = LinearRegressor::new(vec![0.5, -1.0], 10.0);
        assert_eq!(model.predict(&[2.0, 3.0]), 8.0);
        assert_eq!(model.dimension(), 2);
    }
}
