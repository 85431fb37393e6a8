//! Cholesky factorization and solve.
//!
//! **Storage convention**: `qpotrf` writes `1/sqrt(A[j][j])`, not
//! `sqrt(A[j][j])`, into each diagonal entry of the factor, so that
//! `qpotrs` replaces every division with a multiplication. A hardware solve
//! pipeline has multipliers to spare and dividers to avoid; the reciprocal
//! square root comes from the ROM emulation in [`anus`](crate::anus). Use
//! [`potrf_to_standard`] to export a factor with conventional diagonals for
//! interoperability.

use super::{square_dim, vector_dim};
use crate::anus;
use crate::error::{Error, Result};
use crate::fixed::{qmul, qsub, Bundle};
use crate::tensor::Tensor;

/// In-place Cholesky factorization of a symmetric positive-definite matrix,
/// lower factor, with the reciprocal-square-root diagonal storage described
/// in the module docs. Reads the lower triangle only.
///
/// A non-positive pivot means the matrix is not positive-definite:
/// [`Error::NotPositiveDefinite`] is returned early and `A` holds the partial
/// factor for the columns before the failing one (whose diagonal entry keeps
/// its non-positive updated value, so the sign can be inspected directly).
pub fn qpotrf(a: &mut Tensor) -> Result<()> {
  let n = square_dim(a, "qpotrf")?;
  let t = Bundle::new();
  for j in 0..n {
    for k in 0..j {
      for i in j..n {
        let update = qsub(a.get(&[i, j]), qmul(a.get(&[i, k]), a.get(&[j, k]), &t), &t);
        a.set(&[i, j], update);
      }
    }
    if a.get(&[j, j]).to_bits() <= 0 {
      return Err(Error::NotPositiveDefinite { column: j });
    }
    let rsqrt = anus::qtable(anus::rsqrt, a.get(&[j, j]));
    for i in j + 1..n {
      a.set(&[i, j], qmul(a.get(&[i, j]), rsqrt, &t));
    }
    a.set(&[j, j], rsqrt);
  }
  Ok(())
}

/// Solve `L·Lᵀ·x = b` in place on `b`, where `L` came from [`qpotrf`] and so
/// carries reciprocal diagonals: forward substitution, then backward, each
/// row finishing with a multiply by the stored reciprocal instead of a
/// division.
pub fn qpotrs(l: &Tensor, b: &mut Tensor) -> Result<()> {
  let n = square_dim(l, "qpotrs")?;
  let bn = vector_dim(b, "qpotrs")?;
  if bn != n {
    return Err(Error::ShapeMismatch {
      op: "qpotrs",
      detail: format!("L is {n}x{n}, b has {bn}"),
    });
  }
  let t = Bundle::new();
  for i in 0..n {
    for j in 0..i {
      let update = qsub(b.get(&[i]), qmul(l.get(&[i, j]), b.get(&[j]), &t), &t);
      b.set(&[i], update);
    }
    b.set(&[i], qmul(b.get(&[i]), l.get(&[i, i]), &t));
  }
  for i in (0..n).rev() {
    for j in i + 1..n {
      let update = qsub(b.get(&[i]), qmul(l.get(&[j, i]), b.get(&[j]), &t), &t);
      b.set(&[i], update);
    }
    b.set(&[i], qmul(b.get(&[i]), l.get(&[i, i]), &t));
  }
  Ok(())
}

/// Debug helper: export a [`qpotrf`] factor with standard storage, i.e. with
/// `sqrt(A[j][j])` on the diagonal instead of its reciprocal.
pub fn potrf_to_standard(l: &Tensor) -> Result<Tensor> {
  let n = square_dim(l, "potrf_to_standard")?;
  let mut out = l.clone();
  for j in 0..n {
    out.set(&[j, j], anus::qtable(anus::recip, l.get(&[j, j])));
  }
  Ok(out)
}
