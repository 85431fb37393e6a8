use super::*;
use crate::fixed::cast::{frac_convert, int_convert};
use crate::fixed::merge::{merge_add, Bundle};

/// Left-align both raw values to the wider fractional width and combine them
/// in the 64-bit accumulator, then quantize into the merged output format.
fn add_sub(a: Fixed, b: Fixed, t: &Bundle, subtract: bool) -> Fixed {
  let out = merge_add(&a.fmt, &b.fmt, t);
  let f = a.fmt.frac_bits.max(b.fmt.frac_bits);
  let wa = (a.data as i64) << (f - a.fmt.frac_bits);
  let wb = (b.data as i64) << (f - b.fmt.frac_bits);
  let wide = if subtract { wa - wb } else { wa + wb };
  let aligned = frac_convert(wide, f, out.frac_bits, out.rnd);
  let data = int_convert(aligned, out.int_bits, out.frac_bits, out.signed, out.ovf);
  Fixed::from_raw(data, out)
}

/// Bit-exact fixed-point addition.
///
/// ```
/// # use fixblas::{Bundle, Fixed, FixedFormat, qadd};
/// let a = Fixed::from_f64(1.5, FixedFormat::new(4, 2));
/// let b = Fixed::from_f64(0.125, FixedFormat::new(4, 4));
/// assert_eq!(qadd(a, b, &Bundle::new()).to_f64(), 1.625);
/// ```
pub fn qadd(a: Fixed, b: Fixed, t: &Bundle) -> Fixed {
  add_sub(a, b, t, false)
}

/// Bit-exact fixed-point subtraction.
pub fn qsub(a: Fixed, b: Fixed, t: &Bundle) -> Fixed {
  add_sub(a, b, t, true)
}

use core::ops::{Add, AddAssign, Sub, SubAssign};
super::mk_ops! {Add, AddAssign, add, add_assign, qadd}
super::mk_ops! {Sub, SubAssign, sub, sub_assign, qsub}
