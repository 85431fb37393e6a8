//! Dense triangular inverse. Needs a separate output matrix; the diagonal
//! reciprocals come from the ROM emulation, and the inner sums carry an
//! explicit accumulator format like [`qsytrf`](super::qsytrf).

use super::square_dim;
use crate::anus;
use crate::error::{Error, Result};
use crate::fixed::{qadd, qdiv, qmul, qneg, Bundle, Fixed, FixedFormat};
use crate::tensor::Tensor;

/// Arguments for [`qtrtri`]: which triangle the input occupies, and the
/// format of the running sum (defaulting to the output's element format).
#[derive(Clone, Copy, Debug)]
pub struct QtrtriArgs {
  pub lower: bool,
  pub sum: Option<FixedFormat>,
}

impl Default for QtrtriArgs {
  fn default() -> Self {
    QtrtriArgs { lower: true, sum: None }
  }
}

/// Invert a triangular matrix into `ainv`.
///
/// Lower case: `Ainv[i][i] = 1/A[i][i]` via the ROM reciprocal, then for
/// `j > i`, `Ainv[j][i] = −(Σ_{k=i..j-1} A[j][k]·Ainv[k][i]) / A[j][j]`.
/// The upper case runs the mirrored recurrence from the bottom-right
/// (`k ∈ j+1..=i`).
pub fn qtrtri(ainv: &mut Tensor, a: &Tensor, args: &QtrtriArgs) -> Result<()> {
  let n = square_dim(a, "qtrtri")?;
  let on = square_dim(ainv, "qtrtri")?;
  if on != n {
    return Err(Error::ShapeMismatch {
      op: "qtrtri",
      detail: format!("A is {n}x{n}, Ainv is {on}x{on}"),
    });
  }
  let sum_fmt = args.sum.unwrap_or(ainv.fmt());
  let t = Bundle::new();

  ainv.clear();
  if args.lower {
    for i in 0..n {
      ainv.set(&[i, i], anus::qtable(anus::recip, a.get(&[i, i])));
      for j in i + 1..n {
        let mut sum = Fixed::zero(sum_fmt);
        for k in i..j {
          sum = qadd(sum, qmul(a.get(&[j, k]), ainv.get(&[k, i]), &t), &t).cast(sum_fmt);
        }
        ainv.set(&[j, i], qdiv(qneg(sum), a.get(&[j, j]), &t));
      }
    }
  } else {
    for i in (0..n).rev() {
      ainv.set(&[i, i], anus::qtable(anus::recip, a.get(&[i, i])));
      for j in (0..i).rev() {
        let mut sum = Fixed::zero(sum_fmt);
        for k in j + 1..=i {
          sum = qadd(sum, qmul(a.get(&[j, k]), ainv.get(&[k, i]), &t), &t).cast(sum_fmt);
        }
        ainv.set(&[j, i], qdiv(qneg(sum), a.get(&[j, j]), &t));
      }
    }
  }
  Ok(())
}
