//! LDLᵀ factorization. Unlike the LAPACK routine of the same name, `L` and
//! `D` are stored separately and no pivoting is performed; the value of the
//! kernel is the explicit control over the quantization of each summand and
//! of the running sum.

use super::{square_dim, vector_dim};
use crate::error::{Error, Result};
use crate::fixed::{qadd, qdiv, qmul, qsub, Bundle, Fixed, FixedFormat};
use crate::tensor::Tensor;

/// Formats for the two accumulation intermediates of [`qsytrf`]: `ld` holds
/// each summand `L[i][k] · L[j][k] · D[k]`, `sum_ld` the running sum over
/// `k`. Both default to `L`'s element format.
#[derive(Clone, Copy, Debug, Default)]
pub struct QsytrfArgs {
  pub ld: Option<FixedFormat>,
  pub sum_ld: Option<FixedFormat>,
}

/// Factor `A = L·D·Lᵀ` with unit-diagonal `L` and diagonal `D` (a vector).
/// Reads the lower triangle of `A`.
///
/// For each column `j`: `D[j] = A[j][j] − Σ_k L[j][k]²·D[k]`, then for each
/// `i > j`, `L[i][j] = (A[i][j] − Σ_k L[i][k]·L[j][k]·D[k]) / D[j]`, with
/// every summand quantized into the `ld` format and the running sum kept in
/// the `sum_ld` format.
pub fn qsytrf(l: &mut Tensor, d: &mut Tensor, a: &Tensor, args: &QsytrfArgs) -> Result<()> {
  let n = square_dim(a, "qsytrf")?;
  let ln = square_dim(l, "qsytrf")?;
  let dn = vector_dim(d, "qsytrf")?;
  if ln != n || dn != n {
    return Err(Error::ShapeMismatch {
      op: "qsytrf",
      detail: format!("A is {n}x{n}, L is {ln}x{ln}, D has {dn}"),
    });
  }

  let ld_fmt = args.ld.unwrap_or(l.fmt());
  let sum_fmt = args.sum_ld.unwrap_or(l.fmt());
  let t = Bundle::new();

  l.clear();
  for i in 0..n {
    l.set(&[i, i], Fixed::from_f64(1.0, l.fmt()));
  }

  for j in 0..n {
    let mut sum = Fixed::zero(sum_fmt);
    for k in 0..j {
      let ljk = l.get(&[j, k]);
      let term = qmul(qmul(ljk, ljk, &t), d.get(&[k]), &t).cast(ld_fmt);
      sum = qadd(sum, term, &t).cast(sum_fmt);
    }
    d.set(&[j], qsub(a.get(&[j, j]), sum, &t));

    for i in j + 1..n {
      let mut sum = Fixed::zero(sum_fmt);
      for k in 0..j {
        let term = qmul(qmul(l.get(&[i, k]), l.get(&[j, k]), &t), d.get(&[k]), &t).cast(ld_fmt);
        sum = qadd(sum, term, &t).cast(sum_fmt);
      }
      l.set(&[i, j], qdiv(qsub(a.get(&[i, j]), sum, &t), d.get(&[j]), &t));
    }
  }
  Ok(())
}
