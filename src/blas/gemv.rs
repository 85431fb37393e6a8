//! Matrix-vector multiply: `y = β·y + α·op(A)·x`.

use super::{matrix_dims, qreduce, vector_dim};
use crate::error::{Error, Result};
use crate::fixed::{qadd, qmul, Bundle, Fixed};
use crate::tensor::Tensor;

/// Arguments for [`qgemv`]. `alpha` and `beta` are constants in `y`'s element
/// format (defaulting to 1 and 0); the dot product uses the `mul`/`add`
/// bundles, while the outer scaling and accumulation run entirely in `y`'s
/// own format, as hardware reusing the output register width would.
#[derive(Clone, Debug, Default)]
pub struct QgemvArgs {
  pub trans_a: bool,
  pub add: Vec<Bundle>,
  pub mul: Bundle,
  pub alpha: Option<Fixed>,
  pub beta: Option<Fixed>,
}

/// `y = β·y + α·op(A)·x`.
///
/// The composition short-circuits like the reference BLAS: with `β = 0` and
/// `α = 1` the dot product is assigned directly; with `β = 0` it is only
/// scaled by `α`; otherwise the full update runs.
pub fn qgemv(y: &mut Tensor, a: &Tensor, x: &Tensor, args: &QgemvArgs) -> Result<()> {
  let (ar, ac) = matrix_dims(a, "qgemv")?;
  let xn = vector_dim(x, "qgemv")?;
  let yn = vector_dim(y, "qgemv")?;
  let (m, k) = if args.trans_a { (ac, ar) } else { (ar, ac) };
  if k != xn || m != yn {
    return Err(Error::ShapeMismatch {
      op: "qgemv",
      detail: format!("op(A) is {m}x{k}, x has {xn}, y has {yn}"),
    });
  }

  let yb = Bundle::of(y.fmt());
  let one = Fixed::from_f64(1.0, y.fmt());
  let alpha = args.alpha.unwrap_or(one);
  let beta = args.beta.unwrap_or(Fixed::zero(y.fmt()));
  let at = |i: usize, j: usize| if args.trans_a { a.get(&[j, i]) } else { a.get(&[i, j]) };

  let mut products = Vec::with_capacity(k);
  for i in 0..m {
    products.clear();
    for j in 0..k {
      products.push(qmul(at(i, j), x.get(&[j]), &args.mul));
    }
    let Some(dot) = qreduce(&products, &args.add) else { continue };

    let scaled = if alpha == one { dot } else { qmul(alpha, dot, &yb) };
    if beta.to_bits() == 0 {
      y.set(&[i], scaled);
    } else {
      y.set(&[i], qadd(qmul(beta, y.get(&[i]), &yb), scaled, &yb));
    }
  }
  Ok(())
}
