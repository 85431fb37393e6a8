use super::*;
use crate::fixed::cast::{frac_convert, int_convert};
use crate::fixed::merge::{merge_mul, Bundle};

/// Bit-exact fixed-point multiplication.
///
/// The raw product is exact in the 64-bit accumulator at fractional width
/// `f1 + f2` (the 31-bit format cap guarantees the headroom); it is then
/// aligned to the merged output's fractional width and clamped into its
/// integer range.
///
/// ```
/// # use fixblas::{Bundle, Fixed, FixedFormat, qmul};
/// const Q: FixedFormat = FixedFormat::new(12, 8);
/// let p = qmul(Fixed::from_f64(3.0, Q), Fixed::from_f64(0.5, Q), &Bundle::new().full_prec());
/// assert_eq!(p.to_f64(), 1.5);
/// ```
pub fn qmul(a: Fixed, b: Fixed, t: &Bundle) -> Fixed {
  let out = merge_mul(&a.fmt, &b.fmt, t);
  let wide = a.data as i64 * b.data as i64;
  let aligned = frac_convert(wide, a.fmt.frac_bits + b.fmt.frac_bits, out.frac_bits, out.rnd);
  let data = int_convert(aligned, out.int_bits, out.frac_bits, out.signed, out.ovf);
  Fixed::from_raw(data, out)
}

use core::ops::{Mul, MulAssign};
super::mk_ops! {Mul, MulAssign, mul, mul_assign, qmul}
