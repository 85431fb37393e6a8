use super::*;
use crate::fixed::cast::int_convert;
use crate::fixed::merge::{merge_add, Bundle};

/// Bit-exact fixed-point division.
///
/// The output format follows the add/sub merger (max widths, one extra
/// integer bit under FullPrec). The numerator is pre-shifted by the output's
/// fractional width so the integer quotient already carries the output scale;
/// the quotient truncates toward zero, as a hardware divider does.
///
/// A zero divisor returns zero in the output format; this is the documented
/// behavior, not an error.
///
/// The pre-shift bounds the usable widths: `33 + (max(f1, f2) - f1) + f_out`
/// must not exceed 63 bits, which is asserted here. Formats near the 31-bit
/// cap on all three of those axes at once cannot be divided.
///
/// ```
/// # use fixblas::{Bundle, Fixed, FixedFormat, qdiv};
/// const Q: FixedFormat = FixedFormat::new(8, 8);
/// let x = qdiv(Fixed::from_f64(1.0, Q), Fixed::from_f64(3.0, Q), &Bundle::new());
/// assert_eq!(x.to_bits(), 85);  // floor(2^8 / 3)
/// ```
pub fn qdiv(a: Fixed, b: Fixed, t: &Bundle) -> Fixed {
  let out = merge_add(&a.fmt, &b.fmt, t);
  if b.data == 0 {
    return Fixed::zero(out);
  }
  let f = a.fmt.frac_bits.max(b.fmt.frac_bits);
  let shift_a = f - a.fmt.frac_bits;
  let shift_b = f - b.fmt.frac_bits;
  assert!(
    33 + shift_a + out.frac_bits <= 63,
    "qdiv numerator width exceeds the 64-bit accumulator for these formats",
  );
  let num = ((a.data as i64) << shift_a) << out.frac_bits;
  let den = (b.data as i64) << shift_b;
  let data = int_convert(num / den, out.int_bits, out.frac_bits, out.signed, out.ovf);
  Fixed::from_raw(data, out)
}

use core::ops::{Div, DivAssign};
super::mk_ops! {Div, DivAssign, div, div_assign, qdiv}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::FixedFormat;
  use proptest::prelude::*;

  #[test]
  fn exact_quotients() {
    const Q: FixedFormat = FixedFormat::new(8, 8);
    let a = Fixed::from_f64(3.0, Q);
    let b = Fixed::from_f64(0.5, Q);
    assert_eq!(qdiv(a, b, &Bundle::new()).to_f64(), 6.0);
    assert_eq!(qdiv(b, a, &Bundle::new()).to_bits(), 42); // floor(2^8 / 6)
  }

  #[test]
  fn zero_divisor_returns_zero() {
    const Q: FixedFormat = FixedFormat::new(8, 8);
    let x = qdiv(Fixed::from_f64(1.5, Q), Fixed::zero(Q), &Bundle::new());
    assert_eq!(x.to_bits(), 0);
    assert_eq!(x.fmt(), Q);
  }

  #[test]
  fn mixed_fractional_widths() {
    let a = Fixed::from_f64(2.5, FixedFormat::new(4, 1));
    let b = Fixed::from_f64(0.25, FixedFormat::new(4, 4));
    assert_eq!(qdiv(a, b, &Bundle::new()).to_f64(), 10.0);
  }

  #[test]
  fn quotient_truncates_toward_zero() {
    const Q: FixedFormat = FixedFormat::new(8, 2);
    let a = Fixed::from_f64(-1.0, Q);
    let b = Fixed::from_f64(3.0, Q);
    // -4/3 at two fractional bits: -16/12 = -1.33 truncates to -1 raw.
    assert_eq!(qdiv(a, b, &Bundle::new()).to_bits(), -1);
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn divide_by_one_is_identity(raw in -4096i32..4096) {
      const Q: FixedFormat = FixedFormat::new(8, 4);
      let a = Fixed::from_raw(raw, Q);
      let one = Fixed::from_f64(1.0, Q);
      prop_assert_eq!(qdiv(a, one, &Bundle::new()).to_bits(), raw);
    }

    #[test]
    fn division_matches_scaled_integer_division(
      a_raw in -4096i64..4096,
      b_raw in (16i64..256).prop_union(-256i64..-16),
    ) {
      const Q: FixedFormat = FixedFormat::new(8, 4);
      let a = Fixed::from_raw(a_raw as i32, Q);
      let b = Fixed::from_raw(b_raw as i32, Q);
      let q = qdiv(a, b, &Bundle::new());
      prop_assert_eq!(q.to_bits() as i64, (a_raw << 4) / b_raw);
    }
  }
}
