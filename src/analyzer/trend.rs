//! Degree-2 least-squares trend fit used for the tabular chart.
//!
//! x values are centered and scaled to [-1, 1] before the normal equations
//! are solved.

use crate::error::BenchError;

/// Minimum number of distinct x values for a quadratic fit.
pub const MIN_DISTINCT_X: usize = 3;

/// Fitted curve `y = c0 + c1*x + c2*x^2`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticFit {
    /// Coefficients in the normalized variable `t = (x - shift) / scale`.
    normalized: [f64; 3],
    shift: f64,
    scale: f64,
    x_min: f64,
    x_max: f64,
}

impl QuadraticFit {
    /// Fit `points` by least squares.
    ///
    /// Fails with `IllPosedFit` when fewer than three distinct x values are present
    /// or when the normal equations are singular.
    pub fn fit(points: &[(f64, f64)]) -> Result<Self, BenchError> {
        let mut xs: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        if xs.len() < MIN_DISTINCT_X {
            return Err(BenchError::IllPosedFit { distinct: xs.len() });
        }

        let x_min = xs[0];
        let x_max = xs[xs.len() - 1];
        let shift = points.iter().map(|&(x, _)| x).sum::<f64>() / points.len() as f64;
        let scale = (x_max - shift).abs().max((x_min - shift).abs());

        // Power sums of t up to t^4 and of t^k * y up to k = 2.
        let mut s = [0.0f64; 5];
        let mut b = [0.0f64; 3];
        for &(x, y) in points {
            let t = (x - shift) / scale;
            let mut tk = 1.0;
            for k in 0..5 {
                s[k] += tk;
                if k < 3 {
                    b[k] += tk * y;
                }
                tk *= t;
            }
        }

        let matrix = [[s[0], s[1], s[2]], [s[1], s[2], s[3]], [s[2], s[3], s[4]]];
        let normalized = solve3(matrix, b).ok_or(BenchError::IllPosedFit { distinct: xs.len() })?;

        Ok(Self {
            normalized,
            shift,
            scale,
            x_min,
            x_max,
        })
    }

    /// Evaluate the curve at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let t = (x - self.shift) / self.scale;
        let [a0, a1, a2] = self.normalized;
        a0 + t * (a1 + t * a2)
    }

    /// Coefficients `[c0, c1, c2]` of `c0 + c1*x + c2*x^2` in terms of unscaled x.
    pub fn coefficients(&self) -> [f64; 3] {
        let [a0, a1, a2] = self.normalized;
        let (m, s) = (self.shift, self.scale);
        [
            a0 - a1 * m / s + a2 * m * m / (s * s),
            a1 / s - 2.0 * a2 * m / (s * s),
            a2 / (s * s),
        ]
    }

    /// `n` evenly spaced points of the curve across the fitted x range, ascending in x.
    pub fn sample(&self, n: usize) -> Vec<(f64, f64)> {
        if n < 2 {
            return vec![(self.x_min, self.evaluate(self.x_min))];
        }
        let step = (self.x_max - self.x_min) / (n - 1) as f64;
        (0..n)
            .map(|i| {
                let x = if i == n - 1 { self.x_max } else { self.x_min + step * i as f64 };
                (x, self.evaluate(x))
            })
            .collect()
    }
}

/// Gaussian elimination with partial pivoting; `None` when the system is singular.
fn solve3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Option<[f64; 3]> {
    let magnitude = a.iter().flatten().fold(0.0f64, |m, v| m.max(v.abs()));
    let epsilon = magnitude * 1e-12;

    for col in 0..3 {
        let pivot = (col..3).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() <= epsilon {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..3 {
            let factor = a[row][col] / a[col][col];
            for k in col..3 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0f64; 3];
    for row in (0..3).rev() {
        let tail: f64 = (row + 1..3).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_recovers_exact_quadratic() {
        let points: Vec<(f64, f64)> = (0..6)
            .map(|x| {
                let x = x as f64;
                (x, 2.0 * x * x - 3.0 * x + 1.0)
            })
            .collect();
        let fit = QuadraticFit::fit(&points).unwrap();
        let [c0, c1, c2] = fit.coefficients();
        assert!(close(c0, 1.0, 1e-9));
        assert!(close(c1, -3.0, 1e-9));
        assert!(close(c2, 2.0, 1e-9));
        assert!(close(fit.evaluate(10.0), 171.0, 1e-7));
    }

    #[test]
    fn test_three_points_interpolate() {
        let points = [(10.0, 0.0001), (50.0, 0.0021), (100.0, 0.0095)];
        let fit = QuadraticFit::fit(&points).unwrap();
        for (x, y) in points {
            assert!(close(fit.evaluate(x), y, 1e-12));
        }
    }

    #[test]
    fn test_least_squares_on_noisy_line() {
        // Alternating residuals around y = x.
        let points = [(0.0, 0.1), (1.0, 0.9), (2.0, 2.1), (3.0, 2.9), (4.0, 4.1), (5.0, 4.9)];
        let fit = QuadraticFit::fit(&points).unwrap();
        let [_, c1, c2] = fit.coefficients();
        assert!(c2.abs() < 0.05);
        assert!(close(c1, 1.0, 0.25));
    }

    #[test]
    fn test_too_few_distinct_x_is_ill_posed() {
        let points = [(1.0, 1.0), (2.0, 4.0)];
        assert_eq!(QuadraticFit::fit(&points), Err(BenchError::IllPosedFit { distinct: 2 }));

        let repeated = [(1.0, 1.0), (1.0, 1.1), (2.0, 4.0), (2.0, 4.2)];
        assert_eq!(QuadraticFit::fit(&repeated), Err(BenchError::IllPosedFit { distinct: 2 }));

        assert_eq!(QuadraticFit::fit(&[]), Err(BenchError::IllPosedFit { distinct: 0 }));
    }

    #[test]
    fn test_sample_spans_range() {
        let fit = QuadraticFit::fit(&[(10.0, 1.0), (20.0, 2.0), (40.0, 5.0)]).unwrap();
        let samples = fit.sample(200);
        assert_eq!(samples.len(), 200);
        assert_eq!(samples[0].0, 10.0);
        assert_eq!(samples[199].0, 40.0);
        assert!(samples.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
