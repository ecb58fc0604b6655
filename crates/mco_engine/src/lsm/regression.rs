//! Least-squares continuation-value regression.

use tracing::debug;

/// Number of basis functions: 1, S, S^2, S^3.
pub const BASIS_SIZE: usize = 4;

/// Pivots smaller than this mark the normal equations singular.
const PIVOT_TOLERANCE: f64 = 1e-10;

/// Cubic polynomial fit of continuation values against stock prices.
///
/// Fits `C(S) = b0 + b1 S + b2 S^2 + b3 S^3` by unweighted least
/// squares through the normal equations. Degenerate inputs degrade
/// instead of failing:
/// - fewer than [`BASIS_SIZE`] points: constant fit at the mean
/// - singular normal equations: all-zero coefficients, so every
///   in-the-money path looks better exercised than continued
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuationFit {
    coeffs: [f64; BASIS_SIZE],
}

impl ContinuationFit {
    /// Fits the cubic to `(prices[i], values[i])` pairs.
    pub fn fit(prices: &[f64], values: &[f64]) -> Self {
        debug_assert_eq!(prices.len(), values.len());
        let n = prices.len();

        if n == 0 {
            return Self {
                coeffs: [0.0; BASIS_SIZE],
            };
        }
        if n < BASIS_SIZE {
            let mean = values.iter().sum::<f64>() / n as f64;
            debug!(points = n, "too few regression points, constant fit");
            return Self {
                coeffs: [mean, 0.0, 0.0, 0.0],
            };
        }

        // Normal equations (X^T X) b = X^T y for the monomial basis.
        let mut xtx = [[0.0_f64; BASIS_SIZE]; BASIS_SIZE];
        let mut xty = [0.0_f64; BASIS_SIZE];

        for (&price, &value) in prices.iter().zip(values) {
            let basis = [1.0, price, price * price, price * price * price];
            for i in 0..BASIS_SIZE {
                for j in 0..BASIS_SIZE {
                    xtx[i][j] += basis[i] * basis[j];
                }
                xty[i] += basis[i] * value;
            }
        }

        match solve(&mut xtx, &mut xty) {
            Some(coeffs) => Self { coeffs },
            None => {
                debug!("singular normal equations, zero continuation");
                Self {
                    coeffs: [0.0; BASIS_SIZE],
                }
            }
        }
    }

    /// Evaluates the fitted polynomial at a stock price.
    #[inline]
    pub fn value(&self, price: f64) -> f64 {
        self.coeffs[0] + price * (self.coeffs[1] + price * (self.coeffs[2] + price * self.coeffs[3]))
    }

    /// Returns the fitted coefficients `[b0, b1, b2, b3]`.
    #[inline]
    pub fn coefficients(&self) -> [f64; BASIS_SIZE] {
        self.coeffs
    }
}

/// Gaussian elimination with partial pivoting on a 4x4 system.
///
/// Returns `None` when a pivot falls below [`PIVOT_TOLERANCE`].
fn solve(
    a: &mut [[f64; BASIS_SIZE]; BASIS_SIZE],
    b: &mut [f64; BASIS_SIZE],
) -> Option<[f64; BASIS_SIZE]> {
    for col in 0..BASIS_SIZE {
        let mut pivot_row = col;
        for row in col + 1..BASIS_SIZE {
            if a[row][col].abs() > a[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if a[pivot_row][col].abs() < PIVOT_TOLERANCE {
            return None;
        }
        if pivot_row != col {
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);
        }

        for row in col + 1..BASIS_SIZE {
            let factor = a[row][col] / a[col][col];
            for k in col..BASIS_SIZE {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; BASIS_SIZE];
    for row in (0..BASIS_SIZE).rev() {
        let mut sum = b[row];
        for k in row + 1..BASIS_SIZE {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }
    Some(x)
}
