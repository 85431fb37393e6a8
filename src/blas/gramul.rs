//! Gram-matrix product: `C = AᵀA` (or `AAᵀ`), with a separate policy path for
//! the diagonal. Diagonal entries are bounded sums of squares, so a caller
//! can give them more integer headroom than the off-diagonal entries.

use super::{matrix_dims, qreduce, square_dim};
use crate::error::{Error, Result};
use crate::fixed::{qmul, Bundle};
use crate::tensor::Tensor;

/// Arguments for [`qgramul`]: which Gram product to form, and the mul/add
/// bundle pairs for the diagonal and off-diagonal paths.
#[derive(Clone, Debug, Default)]
pub struct QgramulArgs {
  /// `false`: `C = AᵀA` (side = A's columns). `true`: `C = AAᵀ` (side = A's
  /// rows).
  pub trans: bool,
  pub diag_mul: Bundle,
  pub diag_add: Vec<Bundle>,
  pub off_mul: Bundle,
  pub off_add: Vec<Bundle>,
}

/// `C = AᵀA` or `C = AAᵀ`, with `C` square of the matching side.
pub fn qgramul(c: &mut Tensor, a: &Tensor, args: &QgramulArgs) -> Result<()> {
  let (ar, ac) = matrix_dims(a, "qgramul")?;
  let side = square_dim(c, "qgramul")?;
  let (expect, contract) = if args.trans { (ar, ac) } else { (ac, ar) };
  if side != expect {
    return Err(Error::ShapeMismatch {
      op: "qgramul",
      detail: format!("C is {side}x{side}, expected side {expect} for a {ar}x{ac} operand"),
    });
  }

  // Element k of the contracted vector for row/column index r.
  let at = |r: usize, k: usize| if args.trans { a.get(&[r, k]) } else { a.get(&[k, r]) };

  let mut products = Vec::with_capacity(contract);
  for i in 0..side {
    for j in 0..side {
      let (mul, add) = if i == j {
        (&args.diag_mul, &args.diag_add)
      } else {
        (&args.off_mul, &args.off_add)
      };
      products.clear();
      for k in 0..contract {
        products.push(qmul(at(i, k), at(j, k), mul));
      }
      if let Some(dot) = qreduce(&products, add) {
        c.set(&[i, j], dot);
      }
    }
  }
  Ok(())
}
