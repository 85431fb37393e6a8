//! Dense tensors of fixed-point values.
//!
//! A tensor is a contiguous row-major `i32` buffer plus one element format;
//! the shape is fixed at creation. External tools can import/export the raw
//! buffer directly ([`Tensor::raw_data`]).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::fixed::{Fixed, FixedFormat};

/// Lazy element-wise expression views over tensors
mod expr;

pub use expr::{Bin, Expr, Un};

/// A dense row-major tensor with a fixed shape and a single element format.
///
/// ```
/// # use fixblas::{FixedFormat, Tensor};
/// const Q: FixedFormat = FixedFormat::new(12, 8);
/// let m = Tensor::from_f64(&[2, 3], Q, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(m.get(&[1, 2]).to_f64(), 6.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
  data: Vec<i32>,
  fmt: FixedFormat,
  shape: Vec<usize>,
}

impl Tensor {
  /// An all-zero tensor of the given shape and element format.
  pub fn new(shape: &[usize], fmt: FixedFormat) -> Self {
    let len = shape.iter().product();
    Tensor { data: vec![0; len], fmt, shape: shape.to_vec() }
  }

  /// Build from real values, one per element in row-major order, each
  /// quantized through the element format.
  pub fn from_f64(shape: &[usize], fmt: FixedFormat, values: &[f64]) -> Result<Self> {
    let len: usize = shape.iter().product();
    if values.len() != len {
      return Err(Error::ShapeMismatch {
        op: "Tensor::from_f64",
        detail: format!("{} values for shape {:?} ({} elements)", values.len(), shape, len),
      });
    }
    let data = values.iter().map(|&x| Fixed::from_f64(x, fmt).to_bits()).collect();
    Ok(Tensor { data, fmt, shape: shape.to_vec() })
  }

  /// The shape, as fixed at creation.
  pub fn shape(&self) -> &[usize] {
    &self.shape
  }

  /// The element format.
  pub const fn fmt(&self) -> FixedFormat {
    self.fmt
  }

  /// Total number of elements.
  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// The contiguous raw buffer, for width-matched import/export.
  pub fn raw_data(&self) -> &[i32] {
    &self.data
  }

  fn flat_index(&self, index: &[usize]) -> usize {
    debug_assert_eq!(index.len(), self.shape.len());
    let mut flat = 0;
    for (i, d) in index.iter().zip(&self.shape) {
      debug_assert!(i < d);
      flat = flat * d + i;
    }
    flat
  }

  /// The element at a multi-dimensional index.
  pub fn get(&self, index: &[usize]) -> Fixed {
    self.get_flat(self.flat_index(index))
  }

  /// The element at a row-major flat index.
  pub fn get_flat(&self, flat: usize) -> Fixed {
    Fixed::from_raw(self.data[flat], self.fmt)
  }

  /// Store a value at a multi-dimensional index, re-quantizing it into the
  /// element format (like hardware writing a register of that width).
  pub fn set(&mut self, index: &[usize], value: Fixed) {
    self.set_flat(self.flat_index(index), value);
  }

  /// Store a value at a flat index, re-quantizing into the element format.
  pub fn set_flat(&mut self, flat: usize, value: Fixed) {
    self.data[flat] = value.cast(self.fmt).to_bits();
  }

  /// Zero every element.
  pub fn clear(&mut self) {
    self.data.fill(0);
  }

  /// Every element as its real view, row-major.
  pub fn to_f64_vec(&self) -> Vec<f64> {
    (0..self.len()).map(|i| self.get_flat(i).to_f64()).collect()
  }

  /// Fill with uniformly random bit patterns.
  pub fn fill_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    for slot in &mut self.data {
      *slot = Fixed::fill_uniform(self.fmt, rng).to_bits();
    }
  }

  /// Fill with standard-normal samples quantized through the element format.
  pub fn fill_normal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    for slot in &mut self.data {
      *slot = Fixed::fill_normal(self.fmt, rng).to_bits();
    }
  }

  /// Shuffle the elements in place.
  pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    self.data.shuffle(rng);
  }

  /// Materialize an expression into this tensor, element by element, casting
  /// each result into the element format.
  pub fn assign<E: Expr>(&mut self, e: &E) -> Result<()> {
    if !e.shape().is_empty() && e.shape() != self.shape.as_slice() {
      return Err(Error::ShapeMismatch {
        op: "Tensor::assign",
        detail: format!("expression shape {:?} vs tensor shape {:?}", e.shape(), self.shape),
      });
    }
    for i in 0..self.len() {
      self.data[i] = e.at(i).cast(self.fmt).to_bits();
    }
    Ok(())
  }
}
