use super::{Fixed, FixedFormat};

impl FixedFormat {
  /// The format of a negation/absolute-value result: one more integer bit
  /// (so the most-negative raw value stays representable), signed.
  ///
  /// Panics if the widened format would break the 31-bit cap; negation and
  /// absolute value require `int_bits + frac_bits <= 30`.
  const fn widened(self) -> FixedFormat {
    FixedFormat::new(self.int_bits + 1, self.frac_bits)
      .with_signed(true)
      .with_rnd(self.rnd)
      .with_ovf(self.ovf)
  }
}

/// Exact negation. The output grows one integer bit and is always signed, so
/// no requantization is needed.
///
/// ```
/// # use fixblas::{qneg, Fixed, FixedFormat};
/// let x = Fixed::from_f64(1.25, FixedFormat::unsigned(4, 4));
/// let n = qneg(x);
/// assert_eq!(n.to_f64(), -1.25);
/// assert!(n.fmt().signed);
/// assert_eq!(n.fmt().int_bits, 5);
/// ```
pub fn qneg(a: Fixed) -> Fixed {
  Fixed::from_raw(-a.data, a.fmt.widened())
}

/// Exact absolute value. Identity on unsigned inputs; otherwise the output
/// grows one integer bit, like [`qneg`].
pub fn qabs(a: Fixed) -> Fixed {
  if !a.fmt.signed {
    return a;
  }
  Fixed::from_raw(a.data.abs(), a.fmt.widened())
}

impl core::ops::Neg for Fixed {
  type Output = Fixed;

  #[inline]
  fn neg(self) -> Fixed {
    qneg(self)
  }
}

impl core::ops::Neg for &Fixed {
  type Output = Fixed;

  #[inline]
  fn neg(self) -> Fixed {
    qneg(*self)
  }
}
