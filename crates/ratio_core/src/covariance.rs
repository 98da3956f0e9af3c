//! Covariance matrices and Cholesky factors for correlated normal sampling.
//!
//! Given independent standard normals `Z = [Z1, ..., Zn]`, correlated normals
//! are obtained as
//!
//! ```text
//! W = L * Z,    Sigma = L * L^T
//! ```
//!
//! where `L` is the lower triangular Cholesky factor of the covariance matrix.
//! For the bivariate unit-variance case used by the experiment this is
//!
//! ```text
//! L = | 1                 0 |
//!     | rho  sqrt(1 - rho^2) |
//! ```
//!
//! ## Usage
//!
//! ```
//! use ratio_core::covariance::CovarianceMatrix;
//!
//! let sigma = CovarianceMatrix::bivariate(0.8).unwrap();
//! let chol = sigma.cholesky().unwrap();
//!
//! let mut z = [1.0, 0.0];
//! chol.transform_inplace(&mut z);
//! assert!((z[1] - 0.8).abs() < 1e-12);
//! ```

use crate::error::CovarianceError;

/// Symmetric 2x2 unit-variance covariance matrix stored in row-major order.
///
/// Immutable once constructed. [`bivariate`] rejects any correlation outside
/// the open interval (-1, 1), so every matrix has a Cholesky factor.
///
/// [`bivariate`]: CovarianceMatrix::bivariate
#[derive(Clone, Debug, PartialEq)]
pub struct CovarianceMatrix {
    data: Vec<f64>,
    dim: usize,
}

impl CovarianceMatrix {
    /// Creates the 2x2 unit-variance matrix `[[1, rho], [rho, 1]]`.
    ///
    /// # Errors
    ///
    /// [`CovarianceError::CorrelationOutOfRange`] unless `-1 < rho < 1`.
    /// `rho = ±1` is singular and NaN is rejected.
    pub fn bivariate(rho: f64) -> Result<Self, CovarianceError> {
        if !(rho > -1.0 && rho < 1.0) {
            return Err(CovarianceError::CorrelationOutOfRange(rho));
        }

        Ok(Self {
            data: vec![1.0, rho, rho, 1.0],
            dim: 2,
        })
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Computes the lower triangular factor `L` with `Sigma = L * L^T`.
    ///
    /// # Errors
    ///
    /// [`CovarianceError::NotPositiveDefinite`] if a pivot is not strictly
    /// positive.
    pub fn cholesky(&self) -> Result<CholeskyFactor, CovarianceError> {
        let n = self.dim;
        let mut lower = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;

                if j == i {
                    for k in 0..j {
                        let l_jk = lower[j * n + k];
                        sum += l_jk * l_jk;
                    }
                    let diag = self.get(j, j) - sum;
                    // Negated comparison so that NaN pivots are rejected too.
                    if !(diag > 0.0) {
                        return Err(CovarianceError::NotPositiveDefinite);
                    }
                    lower[j * n + j] = diag.sqrt();
                } else {
                    for k in 0..j {
                        sum += lower[i * n + k] * lower[j * n + k];
                    }
                    lower[i * n + j] = (self.get(i, j) - sum) / lower[j * n + j];
                }
            }
        }

        Ok(CholeskyFactor {
            data: lower,
            dim: n,
        })
    }
}

/// Lower triangular Cholesky factor of a covariance matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    data: Vec<f64>,
    dim: usize,
}

impl CholeskyFactor {
    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j); zero above the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Transforms independent standard normals into correlated normals,
    /// `W = L * Z`, in place.
    ///
    /// Rows are evaluated from the last to the first so each row only reads
    /// inputs that have not been overwritten yet; no scratch buffer is needed.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() < self.dim()`.
    pub fn transform_inplace(&self, z: &mut [f64]) {
        assert!(
            z.len() >= self.dim,
            "Input vector length {} is less than matrix dimension {}",
            z.len(),
            self.dim
        );

        for i in (0..self.dim).rev() {
            let mut sum = 0.0;
            for j in 0..=i {
                sum += self.get(i, j) * z[j];
            }
            z[i] = sum;
        }
    }

    /// Transforms independent standard normals into a new vector `W = L * Z`.
    pub fn transform(&self, z: &[f64]) -> Vec<f64> {
        let mut w = z[..self.dim.min(z.len())].to_vec();
        self.transform_inplace(&mut w);
        w
    }
}
