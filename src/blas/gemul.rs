//! General matrix multiply: `C = op(A) · op(B)`.

use super::{matrix_dims, qreduce};
use crate::error::{Error, Result};
use crate::fixed::{qmul, Bundle};
use crate::tensor::Tensor;

/// Arguments for [`qgemul`]: optional transposition of either operand, the
/// bundle for each product, and the per-layer bundle schedule for the
/// reduction tree that sums them.
#[derive(Clone, Debug, Default)]
pub struct QgemulArgs {
  pub trans_a: bool,
  pub trans_b: bool,
  /// Reduction-tree schedule, one bundle per layer (see
  /// [`qreduce`](crate::qreduce)).
  pub add: Vec<Bundle>,
  /// Bundle for each scalar product.
  pub mul: Bundle,
}

/// `C = op(A) · op(B)` where `op` is identity or transpose.
///
/// Per output cell, the K products are computed under the `mul` bundle into
/// the merged product format, then summed by the reduction tree under the
/// `add` schedule, and the result is *assigned* (cast) into `C`'s element
/// format, not accumulated into it.
///
/// ```
/// # use fixblas::{qgemul, Bundle, FixedFormat, QgemulArgs, Tensor};
/// const Q: FixedFormat = FixedFormat::new(12, 8);
/// let a = Tensor::from_f64(&[2, 2], Q, &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// let i = Tensor::from_f64(&[2, 2], Q, &[1.0, 0.0, 0.0, 1.0]).unwrap();
/// let mut c = Tensor::new(&[2, 2], Q);
/// qgemul(&mut c, &a, &i, &QgemulArgs::default()).unwrap();
/// assert_eq!(c.to_f64_vec(), [1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn qgemul(c: &mut Tensor, a: &Tensor, b: &Tensor, args: &QgemulArgs) -> Result<()> {
  let (ar, ac) = matrix_dims(a, "qgemul")?;
  let (br, bc) = matrix_dims(b, "qgemul")?;
  let (cr, cc) = matrix_dims(c, "qgemul")?;
  let (m, ka) = if args.trans_a { (ac, ar) } else { (ar, ac) };
  let (kb, n) = if args.trans_b { (bc, br) } else { (br, bc) };
  if ka != kb || cr != m || cc != n {
    return Err(Error::ShapeMismatch {
      op: "qgemul",
      detail: format!(
        "op(A) is {m}x{ka}, op(B) is {kb}x{n}, C is {cr}x{cc}",
      ),
    });
  }

  let at = |i: usize, k: usize| if args.trans_a { a.get(&[k, i]) } else { a.get(&[i, k]) };
  let bt = |k: usize, j: usize| if args.trans_b { b.get(&[j, k]) } else { b.get(&[k, j]) };

  let mut products = Vec::with_capacity(ka);
  for i in 0..m {
    for j in 0..n {
      products.clear();
      for k in 0..ka {
        products.push(qmul(at(i, k), bt(k, j), &args.mul));
      }
      if let Some(dot) = qreduce(&products, &args.add) {
        c.set(&[i, j], dot);
      }
    }
  }
  Ok(())
}
