use super::cast::{frac_convert, int_convert, round_real};
use super::{Fixed, FixedFormat};

impl Fixed {
  /// Zero in the given format.
  pub const fn zero(fmt: FixedFormat) -> Self {
    Fixed { data: 0, fmt }
  }

  /// Construct from a real number: scale by `2^frac_bits`, round under the
  /// format's rounding mode, clamp under its overflow mode.
  ///
  /// ```
  /// # use fixblas::{Fixed, FixedFormat, Rnd};
  /// const F: FixedFormat = FixedFormat::new(1, 1);
  /// assert_eq!(Fixed::from_f64(1.25, F.with_rnd(Rnd::NegInf)).to_f64(), 1.0);
  /// assert_eq!(Fixed::from_f64(1.25, F.with_rnd(Rnd::PosInf)).to_f64(), 1.5);
  /// ```
  pub fn from_f64(x: f64, fmt: FixedFormat) -> Self {
    let wide = round_real(x, fmt.frac_bits, fmt.rnd);
    Fixed { data: int_convert(wide, fmt.int_bits, fmt.frac_bits, fmt.signed, fmt.ovf), fmt }
  }

  /// Construct from a raw bit pattern. Only the lowest
  /// [`storage_bits`](FixedFormat::storage_bits) bits are kept; for a signed
  /// format the top bit of that field is the sign and is extended.
  ///
  /// ```
  /// # use fixblas::{Fixed, FixedFormat};
  /// let x = Fixed::from_bits(0b1_1111_0000, FixedFormat::new(4, 4));
  /// assert_eq!(x.to_f64(), -1.0);
  /// ```
  pub fn from_bits(bits: i32, fmt: FixedFormat) -> Self {
    let width = fmt.storage_bits();
    let mask = ((1u64 << width) - 1) as u32;
    let field = bits as u32 & mask;
    let data = if fmt.signed && field >> (width - 1) != 0 {
      (field | !mask) as i32
    } else {
      field as i32
    };
    Fixed { data, fmt }
  }

  /// Wrap a raw value already known to be in range for `fmt`.
  pub(crate) const fn from_raw(data: i32, fmt: FixedFormat) -> Self {
    Fixed { data, fmt }
  }

  /// The underlying raw integer.
  pub const fn to_bits(self) -> i32 {
    self.data
  }

  /// The format this value carries.
  pub const fn fmt(&self) -> FixedFormat {
    self.fmt
  }

  /// The real-number view, `raw · 2^(-frac_bits)`.
  pub fn to_f64(self) -> f64 {
    self.data as f64 / (1u64 << self.fmt.frac_bits) as f64
  }

  /// Re-quantize into another format, under the *target's* policies: align
  /// the binary point with the target's rounding mode, then clamp with its
  /// overflow mode. If the two formats share a raw layout the bits are copied
  /// unchanged.
  ///
  /// ```
  /// # use fixblas::{Fixed, FixedFormat};
  /// let x = Fixed::from_f64(2.625, FixedFormat::new(4, 4));
  /// assert_eq!(x.cast(FixedFormat::new(4, 1)).to_f64(), 2.5);
  /// ```
  pub fn cast(self, to: FixedFormat) -> Fixed {
    if self.fmt.same_layout(&to) {
      return Fixed { data: self.data, fmt: to };
    }
    let aligned = frac_convert(self.data as i64, self.fmt.frac_bits, to.frac_bits, to.rnd);
    Fixed { data: int_convert(aligned, to.int_bits, to.frac_bits, to.signed, to.ovf), fmt: to }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Ovf, Rnd};
  use proptest::prelude::*;

  #[test]
  fn scenario_rounding() {
    // One integer bit, one fractional bit: every rounding decision is visible.
    const F: FixedFormat = FixedFormat::new(1, 1);
    assert_eq!(Fixed::from_f64(1.25, F.with_rnd(Rnd::NegInf)).to_f64(), 1.0);
    assert_eq!(Fixed::from_f64(-1.25, F.with_rnd(Rnd::NegInf)).to_f64(), -1.5);
    assert_eq!(Fixed::from_f64(1.25, F.with_rnd(Rnd::PosInf)).to_f64(), 1.5);
    assert_eq!(Fixed::from_f64(-1.25, F.with_rnd(Rnd::PosInf)).to_f64(), -1.0);
    assert_eq!(Fixed::from_f64(1.25, F.with_rnd(Rnd::Conv)).to_f64(), 1.0);
    // 1.75 rounds to the even 2.0, which overflows one integer bit and
    // saturates to 1.5.
    assert_eq!(Fixed::from_f64(1.75, F.with_rnd(Rnd::Conv)).to_f64(), 1.5);
  }

  #[test]
  fn from_bits_sign_extension() {
    const F: FixedFormat = FixedFormat::new(4, 4);
    assert_eq!(Fixed::from_bits(0x0f0, F).to_bits(), 0x0f0);
    assert_eq!(Fixed::from_bits(0x1f0, F).to_bits(), -16);
    // Bits above the field are ignored.
    assert_eq!(Fixed::from_bits(0x7ead_b0f0u32 as i32, F).to_bits(), 0x0f0);
    // Unsigned: no sign bit, plain mask.
    const U: FixedFormat = FixedFormat::unsigned(4, 4);
    assert_eq!(Fixed::from_bits(0x1f0, U).to_bits(), 0xf0);
  }

  #[test]
  fn cast_same_layout_copies() {
    let a = Fixed::from_f64(-0.75, FixedFormat::new(2, 6));
    let b = a.cast(FixedFormat::new(2, 6).with_rnd(Rnd::Conv).with_ovf(Ovf::WrpTcpl));
    assert_eq!(b.to_bits(), a.to_bits());
  }

  #[test]
  fn unsigned_clamps_negative() {
    let x = Fixed::from_f64(-3.0, FixedFormat::unsigned(4, 4));
    assert_eq!(x.to_bits(), 0);
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn round_trip_within_one_lsb(
      raw in -(1i64 << 20)..(1i64 << 20),
      f in 0u32..10,
      mode in proptest::sample::select(
        &[Rnd::PosInf, Rnd::NegInf, Rnd::Zero, Rnd::Inf, Rnd::Conv, Rnd::Tcpl, Rnd::Smgn][..],
      ),
    ) {
      // Any real with <= 20 significant bits fits a (20, f) format, so only
      // fractional rounding applies and the view is within one LSB.
      let x = raw as f64 / (1u64 << f) as f64 / 1024.0;
      let fmt = FixedFormat::new(20, f).with_rnd(mode);
      let v = Fixed::from_f64(x, fmt);
      prop_assert!((v.to_f64() - x).abs() < fmt.lsb(), "{} vs {}", v.to_f64(), x);
    }

    #[test]
    fn cast_round_trip_is_identity(
      raw in -(1i64 << 11)..(1i64 << 11),
      extra_i in 0u32..4,
      extra_f in 0u32..4,
    ) {
      // Narrow -> wide -> narrow is the identity when the wide format
      // dominates in both axes.
      let narrow = FixedFormat::new(6, 5);
      let wide = FixedFormat::new(6 + extra_i, 5 + extra_f);
      let v = Fixed::from_raw(raw as i32, narrow);
      prop_assert_eq!(v.cast(wide).cast(narrow).to_bits(), v.to_bits());
    }

    #[test]
    fn exact_reals_are_exact(raw in -(1i64 << 15)..(1i64 << 15)) {
      let fmt = FixedFormat::new(8, 7);
      let x = raw as f64 / 128.0;
      prop_assert_eq!(Fixed::from_f64(x, fmt).to_f64(), x);
    }
  }
}
