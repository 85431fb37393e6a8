//! Lazy element-wise expression views.
//!
//! Each adapter captures borrowed references to its operands and a policy
//! bundle; nothing is computed until an element is indexed, and composed
//! views never materialize intermediates. A [`Fixed`] scalar acts as a
//! broadcast operand (its shape is empty). Assigning a view to a tensor of
//! matching shape materializes it element-wise.
//!
//! ```
//! # use fixblas::{Bundle, Expr, FixedFormat, Tensor};
//! const Q: FixedFormat = FixedFormat::new(12, 8);
//! let a = Tensor::from_f64(&[2], Q, &[1.0, 2.0]).unwrap();
//! let b = Tensor::from_f64(&[2], Q, &[0.5, 0.25]).unwrap();
//! let c = Tensor::from_f64(&[2], Q, &[4.0, 4.0]).unwrap();
//!
//! // (a + b) * c, computed once per element on assignment.
//! let tmp = a.qadd(&b, Bundle::new());
//! let view = tmp.qmul(&c, Bundle::new());
//! let mut out = Tensor::new(&[2], Q);
//! out.assign(&view).unwrap();
//! assert_eq!(out.to_f64_vec(), [6.0, 9.0]);
//! ```

use crate::fixed::{qabs, qadd, qdiv, qmul, qneg, qsub, Bundle, Fixed};
use crate::tensor::Tensor;

#[derive(Clone, Copy, Debug)]
enum BinOp {
  Mul,
  Add,
  Sub,
  Div,
}

#[derive(Clone, Copy, Debug)]
enum UnOp {
  Neg,
  Abs,
}

/// Anything that can be indexed element-wise to a [`Fixed`]: a tensor, a
/// broadcast scalar, or a composed view. The adapter methods build lazy
/// nodes borrowing their operands.
pub trait Expr {
  /// The view's shape; empty for a broadcast scalar.
  fn shape(&self) -> &[usize];

  /// Compute the element at a row-major flat index.
  fn at(&self, flat: usize) -> Fixed;

  /// Lazy element-wise product under bundle `t`.
  fn qmul<'a, R: Expr>(&'a self, rhs: &'a R, t: Bundle) -> Bin<'a, Self, R>
  where
    Self: Sized,
  {
    Bin::new(BinOp::Mul, self, rhs, t)
  }

  /// Lazy element-wise sum under bundle `t`.
  fn qadd<'a, R: Expr>(&'a self, rhs: &'a R, t: Bundle) -> Bin<'a, Self, R>
  where
    Self: Sized,
  {
    Bin::new(BinOp::Add, self, rhs, t)
  }

  /// Lazy element-wise difference under bundle `t`.
  fn qsub<'a, R: Expr>(&'a self, rhs: &'a R, t: Bundle) -> Bin<'a, Self, R>
  where
    Self: Sized,
  {
    Bin::new(BinOp::Sub, self, rhs, t)
  }

  /// Lazy element-wise quotient under bundle `t`.
  fn qdiv<'a, R: Expr>(&'a self, rhs: &'a R, t: Bundle) -> Bin<'a, Self, R>
  where
    Self: Sized,
  {
    Bin::new(BinOp::Div, self, rhs, t)
  }

  /// Lazy element-wise negation.
  fn qneg(&self) -> Un<'_, Self>
  where
    Self: Sized,
  {
    Un { op: UnOp::Neg, a: self }
  }

  /// Lazy element-wise absolute value.
  fn qabs(&self) -> Un<'_, Self>
  where
    Self: Sized,
  {
    Un { op: UnOp::Abs, a: self }
  }
}

impl Expr for Tensor {
  fn shape(&self) -> &[usize] {
    Tensor::shape(self)
  }

  fn at(&self, flat: usize) -> Fixed {
    self.get_flat(flat)
  }
}

/// A scalar broadcasts: its shape is empty and every index yields the value.
impl Expr for Fixed {
  fn shape(&self) -> &[usize] {
    &[]
  }

  fn at(&self, _flat: usize) -> Fixed {
    *self
  }
}

/// A lazy binary element-wise node. Borrows both operands; the shape is
/// inherited from the first shaped operand.
#[derive(Clone, Copy, Debug)]
pub struct Bin<'a, L: Expr, R: Expr> {
  op: BinOp,
  lhs: &'a L,
  rhs: &'a R,
  t: Bundle,
}

impl<'a, L: Expr, R: Expr> Bin<'a, L, R> {
  fn new(op: BinOp, lhs: &'a L, rhs: &'a R, t: Bundle) -> Self {
    let (ls, rs) = (lhs.shape(), rhs.shape());
    assert!(
      ls.is_empty() || rs.is_empty() || ls == rs,
      "element-wise operands must share a shape: {ls:?} vs {rs:?}",
    );
    Bin { op, lhs, rhs, t }
  }
}

impl<L: Expr, R: Expr> Expr for Bin<'_, L, R> {
  fn shape(&self) -> &[usize] {
    let s = self.lhs.shape();
    if s.is_empty() { self.rhs.shape() } else { s }
  }

  fn at(&self, flat: usize) -> Fixed {
    let a = self.lhs.at(flat);
    let b = self.rhs.at(flat);
    match self.op {
      BinOp::Mul => qmul(a, b, &self.t),
      BinOp::Add => qadd(a, b, &self.t),
      BinOp::Sub => qsub(a, b, &self.t),
      BinOp::Div => qdiv(a, b, &self.t),
    }
  }
}

/// A lazy unary element-wise node.
#[derive(Clone, Copy, Debug)]
pub struct Un<'a, T: Expr> {
  op: UnOp,
  a: &'a T,
}

impl<T: Expr> Expr for Un<'_, T> {
  fn shape(&self) -> &[usize] {
    self.a.shape()
  }

  fn at(&self, flat: usize) -> Fixed {
    let a = self.a.at(flat);
    match self.op {
      UnOp::Neg => qneg(a),
      UnOp::Abs => qabs(a),
    }
  }
}
