//! This module and its submodules contain the fixed-point number model: the
//! format record, the casting algebra, the scalar value, and the bit-exact
//! primitive arithmetic.
//!
//! Some notation used in the comments:
//!
//!   - **raw value**: the `i32` integer stored in a [`Fixed`], interpreted as
//!     `raw · 2^(-frac_bits)`.
//!   - **wide value**: an `i64` carrying an intermediate result before it is
//!     quantized back into a format. The width cap `int_bits + frac_bits <= 31`
//!     guarantees every such intermediate fits with margin.
//!   - **Bit 0, bit 1, .. bit N-1**: numbered least significant to most
//!     significant, starting at 0.

/// A fixed-point value: a raw `i32` plus the [`FixedFormat`] describing how to
/// read it.
///
/// Examples:
///
/// ```
/// # use fixblas::{Fixed, FixedFormat};
/// const Q4_4: FixedFormat = FixedFormat::new(4, 4);   // 4 integer, 4 fraction bits, signed
/// let x = Fixed::from_f64(2.625, Q4_4);
/// assert_eq!(x.to_bits(), 0b10_1010);                 // 2.625 · 2^4
/// assert_eq!(x.to_f64(), 2.625);
/// ```
#[derive(Clone, Copy)]
pub struct Fixed {
  pub(crate) data: i32,
  pub(crate) fmt: FixedFormat,
}

/// Formats and quantization policy modes
mod format;

/// The casting algebra: the two pure functions every cast reduces to
pub(crate) mod cast;

/// Construction, casts, and the real-number view
mod basics;

/// Random fill helpers (explicit RNG handles)
mod fill;

/// Policy bundles and the output-format merger rules
mod merge;

/// The primitive arithmetic: mul, add, sub, div, and operator overloads
mod ops;

/// Unary primitives: negation and absolute value
mod unary;

/// Debug/Display formatting and the bit-field string
mod fmt;

pub use format::{FixedFormat, Ovf, Rnd};
pub use merge::Bundle;
pub use ops::cmp::qcmp;
pub use ops::{qadd, qdiv, qmul, qsub};
pub use unary::{qabs, qneg};
