use core::cmp::Ordering;

use crate::fixed::Fixed;

/// Three-way comparison of the *values* of two fixed-point numbers, across
/// arbitrary formats: both raw values are left-aligned to the common
/// fractional width and compared as wide integers. Exact, regardless of
/// either format's policies.
///
/// ```
/// # use fixblas::{qcmp, Fixed, FixedFormat};
/// use core::cmp::Ordering;
/// let a = Fixed::from_f64(1.5, FixedFormat::new(8, 2));
/// let b = Fixed::from_f64(1.5, FixedFormat::unsigned(2, 9));
/// assert_eq!(qcmp(a, b), Ordering::Equal);
/// ```
pub fn qcmp(a: Fixed, b: Fixed) -> Ordering {
  let f = a.fmt.frac_bits.max(b.fmt.frac_bits);
  let wa = (a.data as i64) << (f - a.fmt.frac_bits);
  let wb = (b.data as i64) << (f - b.fmt.frac_bits);
  wa.cmp(&wb)
}

/// Equality is *value* equality through [`qcmp`]: two representations of the
/// same number in different formats compare equal.
impl PartialEq for Fixed {
  fn eq(&self, other: &Fixed) -> bool {
    qcmp(*self, *other) == Ordering::Equal
  }
}

impl PartialOrd for Fixed {
  fn partial_cmp(&self, other: &Fixed) -> Option<Ordering> {
    Some(qcmp(*self, *other))
  }
}
