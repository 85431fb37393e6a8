//! The BLAS/LAPACK-style kernels. All of them route every arithmetic step
//! through the scalar primitives, so a kernel's bit pattern is fully
//! determined by its argument struct of policy bundles.

/// Log-depth pairwise summation with per-layer bundles
mod reduce;

/// General matrix multiply
mod gemul;

/// Gram-matrix product with a separate diagonal policy path
mod gramul;

/// Matrix-vector multiply with alpha/beta scaling
mod gemv;

/// Cholesky factorization and solve (reciprocal-square-root diagonal storage)
mod potrf;

/// LDL^T factorization
mod sytrf;

/// Triangular inverse
mod trtri;

pub use gemul::{qgemul, QgemulArgs};
pub use gemv::{qgemv, QgemvArgs};
pub use gramul::{qgramul, QgramulArgs};
pub use potrf::{potrf_to_standard, qpotrf, qpotrs};
pub use reduce::{qreduce, qreduce_tensor};
pub use sytrf::{qsytrf, QsytrfArgs};
pub use trtri::{qtrtri, QtrtriArgs};

use crate::error::{Error, Result};
use crate::tensor::Tensor;

/// Check that `t` is a matrix and return (rows, cols).
fn matrix_dims(t: &Tensor, op: &'static str) -> Result<(usize, usize)> {
  match t.shape() {
    [r, c] => Ok((*r, *c)),
    s => Err(Error::ShapeMismatch { op, detail: format!("expected a matrix, got shape {s:?}") }),
  }
}

/// Check that `t` is a vector and return its length.
fn vector_dim(t: &Tensor, op: &'static str) -> Result<usize> {
  match t.shape() {
    [n] => Ok(*n),
    s => Err(Error::ShapeMismatch { op, detail: format!("expected a vector, got shape {s:?}") }),
  }
}

/// Check that `t` is a square matrix and return its side.
fn square_dim(t: &Tensor, op: &'static str) -> Result<usize> {
  let (r, c) = matrix_dims(t, op)?;
  if r != c {
    return Err(Error::ShapeMismatch { op, detail: format!("expected a square matrix, got {r}x{c}") });
  }
  Ok(r)
}
