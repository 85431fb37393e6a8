//! The casting algebra: two pure functions over a wide (`i64`) signed value.
//!
//! Every cast between fixed-point formats, widening or narrowing alike,
//! reduces to a composition of [`frac_convert`] (align the binary
//! point, applying a rounding mode) and [`int_convert`] (clamp or wrap into
//! the integer range, applying an overflow mode). The primitive arithmetic
//! computes an ideal wide result and then runs the same two functions, so this
//! file is the single algorithmic core the whole crate rests on.

use super::format::{Ovf, Rnd};

/// Align a wide value from fractional width `from_frac` to `to_frac`,
/// applying `mode` when bits are dropped.
///
/// Widening (`from_frac <= to_frac`) is a lossless left shift regardless of
/// mode. Narrowing picks between the two bracketing multiples of
/// `2^(from_frac - to_frac)`:
///
/// - the *rounding* modes pick the nearer one, breaking ties toward +∞
///   ([`Rnd::PosInf`]), toward −∞ ([`Rnd::NegInf`]), toward zero
///   ([`Rnd::Zero`]), away from zero ([`Rnd::Inf`]), or to even
///   ([`Rnd::Conv`]);
/// - [`Rnd::Tcpl`] is an arithmetic shift right (floor), and [`Rnd::Smgn`]
///   shifts the magnitude (truncation toward zero).
///
/// ```
/// # use fixblas::{frac_convert, Rnd};
/// assert_eq!(frac_convert(0b101, 2, 4, Rnd::Tcpl), 0b10100);  // widen: exact
/// assert_eq!(frac_convert(5, 2, 1, Rnd::NegInf), 2);          // 1.25 -> 1.0
/// assert_eq!(frac_convert(5, 2, 1, Rnd::PosInf), 3);          // 1.25 -> 1.5
/// assert_eq!(frac_convert(-5, 2, 1, Rnd::NegInf), -3);        // -1.25 -> -1.5
/// ```
pub fn frac_convert(v: i64, from_frac: u32, to_frac: u32, mode: Rnd) -> i64 {
  if from_frac <= to_frac {
    return v << (to_frac - from_frac);
  }
  let d = from_frac - to_frac;
  match mode {
    Rnd::Tcpl => v >> d,
    Rnd::Smgn => {
      if v >= 0 { v >> d } else { -((-v) >> d) }
    }
    _ => {
      // Bracket `v` between the two nearest multiples of 2^d. The bitwise
      // floor works for negative values too: clearing the low d bits of a
      // two's-complement integer always moves toward -inf.
      let floor = v & !((1i64 << d) - 1);
      if floor == v {
        return v >> d;
      }
      let ceil = floor + (1i64 << d);
      let lo = v - floor;
      let hi = ceil - v;
      // At a tie, lo == hi == 2^(d-1), so v != 0 and the sign of v decides
      // which neighbour is nearer zero.
      let pick_floor = match mode {
        Rnd::PosInf => lo < hi,
        Rnd::NegInf => lo <= hi,
        Rnd::Zero => if lo != hi { lo < hi } else { v > 0 },
        Rnd::Inf => if lo != hi { lo < hi } else { v < 0 },
        Rnd::Conv => if lo != hi { lo < hi } else { floor & (1i64 << d) == 0 },
        Rnd::Tcpl | Rnd::Smgn => unreachable!(),
      };
      (if pick_floor { floor } else { ceil }) >> d
    }
  }
}

/// Clamp a wide value, already aligned to fractional width `frac_bits`, into
/// the `(int_bits, frac_bits, signed)` raw range, applying `mode` on
/// overflow.
///
/// ```
/// # use fixblas::{int_convert, Ovf};
/// assert_eq!(int_convert(300, 4, 4, true, Ovf::SatTcpl), 255);
/// assert_eq!(int_convert(300, 4, 4, true, Ovf::SatZero), 0);
/// assert_eq!(int_convert(-256, 4, 4, true, Ovf::SatSmgn), -255);
/// assert_eq!(int_convert(256, 4, 4, false, Ovf::WrpTcpl), 0);
/// ```
pub fn int_convert(v: i64, int_bits: u32, frac_bits: u32, signed: bool, mode: Ovf) -> i32 {
  let total = int_bits + frac_bits;
  let max = (1i64 << total) - 1;
  let min = if signed { -max - 1 } else { 0 };
  match mode {
    Ovf::SatTcpl => v.clamp(min, max) as i32,
    Ovf::SatZero => {
      if v < min || v > max { 0 } else { v as i32 }
    }
    Ovf::SatSmgn => v.clamp(min + 1, max) as i32,
    Ovf::WrpTcpl => {
      if signed {
        // Keep i + f + 1 bits and sign-extend from the top one.
        let mask = (1i64 << (total + 1)) - 1;
        let field = v & mask;
        if field >> total != 0 { (field | !mask) as i32 } else { field as i32 }
      } else {
        (v & max) as i32
      }
    }
  }
}

/// Scale a real number by `2^frac_bits` and round it to a wide integer under
/// the same seven-mode table as [`frac_convert`].
///
/// This is the entry point for constructing fixed-point values from reals;
/// the result still has to pass through [`int_convert`].
pub fn round_real(x: f64, frac_bits: u32, mode: Rnd) -> i64 {
  let scaled = x * (1u64 << frac_bits) as f64;
  let floor = scaled.floor();
  if scaled == floor {
    return floor as i64;
  }
  let ceil = floor + 1.0;
  let lo = scaled - floor;
  let hi = ceil - scaled;
  let pick_floor = match mode {
    Rnd::Tcpl => true,
    Rnd::Smgn => scaled > 0.0,
    Rnd::PosInf => lo < hi,
    Rnd::NegInf => lo <= hi,
    Rnd::Zero => if lo != hi { lo < hi } else { scaled > 0.0 },
    Rnd::Inf => if lo != hi { lo < hi } else { scaled < 0.0 },
    Rnd::Conv => if lo != hi { lo < hi } else { (floor as i64) & 1 == 0 },
  };
  (if pick_floor { floor } else { ceil }) as i64
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  const ALL_RND: [Rnd; 7] =
    [Rnd::PosInf, Rnd::NegInf, Rnd::Zero, Rnd::Inf, Rnd::Conv, Rnd::Tcpl, Rnd::Smgn];

  /// An independent rendition of the narrowing table built on `div_euclid`
  /// instead of bit masking, checked against the production code.
  fn oracle_narrow(v: i64, d: u32, mode: Rnd) -> i64 {
    let step = 1i64 << d;
    let floor = v.div_euclid(step);
    let rem = v.rem_euclid(step);
    if rem == 0 {
      return floor;
    }
    let ceil = floor + 1;
    let tie = 2 * rem == step;
    let nearer_floor = 2 * rem < step;
    match mode {
      Rnd::Tcpl => floor,
      Rnd::Smgn => if v >= 0 { floor } else { ceil },
      Rnd::PosInf => if tie { ceil } else if nearer_floor { floor } else { ceil },
      Rnd::NegInf => if tie { floor } else if nearer_floor { floor } else { ceil },
      Rnd::Zero => {
        if tie { if v > 0 { floor } else { ceil } }
        else if nearer_floor { floor } else { ceil }
      }
      Rnd::Inf => {
        if tie { if v > 0 { ceil } else { floor } }
        else if nearer_floor { floor } else { ceil }
      }
      Rnd::Conv => {
        if tie { if floor % 2 == 0 { floor } else { ceil } }
        else if nearer_floor { floor } else { ceil }
      }
    }
  }

  #[test]
  fn narrow_exhaustive_small() {
    for d in 1..=6u32 {
      for v in -(1i64 << 10)..(1i64 << 10) {
        for mode in ALL_RND {
          assert_eq!(
            frac_convert(v, d, 0, mode),
            oracle_narrow(v, d, mode),
            "v={v} d={d} mode={mode:?}",
          );
        }
      }
    }
  }

  #[test]
  fn widen_is_shift() {
    for v in [-37i64, -1, 0, 1, 255, -1024] {
      for mode in ALL_RND {
        assert_eq!(frac_convert(v, 3, 8, mode), v << 5, "mode={mode:?}");
        assert_eq!(frac_convert(v, 8, 8, mode), v);
      }
    }
  }

  #[test]
  fn tie_table() {
    // 2.5 in frac width 1 (raw 5) narrowed to width 0.
    assert_eq!(frac_convert(5, 1, 0, Rnd::PosInf), 3);
    assert_eq!(frac_convert(5, 1, 0, Rnd::NegInf), 2);
    assert_eq!(frac_convert(5, 1, 0, Rnd::Zero), 2);
    assert_eq!(frac_convert(5, 1, 0, Rnd::Inf), 3);
    assert_eq!(frac_convert(5, 1, 0, Rnd::Conv), 2);
    assert_eq!(frac_convert(7, 1, 0, Rnd::Conv), 4);
    // -2.5.
    assert_eq!(frac_convert(-5, 1, 0, Rnd::PosInf), -2);
    assert_eq!(frac_convert(-5, 1, 0, Rnd::NegInf), -3);
    assert_eq!(frac_convert(-5, 1, 0, Rnd::Zero), -2);
    assert_eq!(frac_convert(-5, 1, 0, Rnd::Inf), -3);
    assert_eq!(frac_convert(-5, 1, 0, Rnd::Conv), -2);
    // Truncation modes differ only below zero.
    assert_eq!(frac_convert(-5, 1, 0, Rnd::Tcpl), -3);
    assert_eq!(frac_convert(-5, 1, 0, Rnd::Smgn), -2);
    assert_eq!(frac_convert(5, 1, 0, Rnd::Tcpl), 2);
    assert_eq!(frac_convert(5, 1, 0, Rnd::Smgn), 2);
  }

  mod malachite_oracle {
    use super::*;
    use malachite::base::num::arithmetic::traits::{PowerOf2, RoundToMultiple};
    use malachite::base::rounding_modes::RoundingMode;
    use malachite::rational::Rational;

    /// `round(v / 2^d)` computed in exact rationals.
    fn rational_round(v: i64, d: u32, mode: RoundingMode) -> Rational {
      let step = Rational::power_of_2(d as i64);
      Rational::from(v).round_to_multiple(step.clone(), mode).0 / step
    }

    proptest! {
      #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
      #[test]
      fn tcpl_is_floor(v in -(1i64 << 40)..(1i64 << 40), d in 0u32..20) {
        prop_assert_eq!(
          Rational::from(frac_convert(v, d, 0, Rnd::Tcpl)),
          rational_round(v, d, RoundingMode::Floor),
        );
      }

      #[test]
      fn conv_is_nearest(v in -(1i64 << 40)..(1i64 << 40), d in 0u32..20) {
        prop_assert_eq!(
          Rational::from(frac_convert(v, d, 0, Rnd::Conv)),
          rational_round(v, d, RoundingMode::Nearest),
        );
      }

      #[test]
      fn widening_is_exact(
        v in -(1i64 << 30)..(1i64 << 30),
        d in 0u32..20,
        mode in proptest::sample::select(&ALL_RND[..]),
      ) {
        // The widened integer denotes the same rational, for every mode.
        prop_assert_eq!(
          Rational::from(frac_convert(v, 0, d, mode)) / Rational::power_of_2(d as i64),
          Rational::from(v),
        );
      }
    }
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn narrow_matches_oracle(
      v in -(1i64 << 50)..(1i64 << 50),
      d in 1u32..30,
      mode in proptest::sample::select(&ALL_RND[..]),
    ) {
      prop_assert_eq!(frac_convert(v, d, 0, mode), oracle_narrow(v, d, mode));
    }

    #[test]
    fn narrow_off_by_at_most_one_lsb(
      v in -(1i64 << 50)..(1i64 << 50),
      d in 1u32..30,
      mode in proptest::sample::select(&ALL_RND[..]),
    ) {
      let r = frac_convert(v, d, 0, mode);
      let back = r << d;
      prop_assert!((v - back).abs() < (1i64 << d));
    }
  }

  #[test]
  fn int_convert_saturation() {
    // (2, 2) signed: raw range [-16, 15].
    assert_eq!(int_convert(20, 2, 2, true, Ovf::SatTcpl), 15);
    assert_eq!(int_convert(-20, 2, 2, true, Ovf::SatTcpl), -16);
    assert_eq!(int_convert(7, 2, 2, true, Ovf::SatTcpl), 7);
    assert_eq!(int_convert(20, 2, 2, true, Ovf::SatZero), 0);
    assert_eq!(int_convert(-16, 2, 2, true, Ovf::SatZero), -16);
    assert_eq!(int_convert(-17, 2, 2, true, Ovf::SatZero), 0);
    assert_eq!(int_convert(-20, 2, 2, true, Ovf::SatSmgn), -15);
    assert_eq!(int_convert(-16, 2, 2, true, Ovf::SatSmgn), -15);
    assert_eq!(int_convert(15, 2, 2, true, Ovf::SatSmgn), 15);
    // Unsigned floor at zero.
    assert_eq!(int_convert(-1, 2, 2, false, Ovf::SatTcpl), 0);
    assert_eq!(int_convert(16, 2, 2, false, Ovf::SatTcpl), 15);
  }

  #[test]
  fn int_convert_wrapping() {
    // Signed: keep 5 bits, sign-extend from bit 4.
    assert_eq!(int_convert(16, 2, 2, true, Ovf::WrpTcpl), -16);
    assert_eq!(int_convert(-17, 2, 2, true, Ovf::WrpTcpl), 15);
    assert_eq!(int_convert(32, 2, 2, true, Ovf::WrpTcpl), 0);
    assert_eq!(int_convert(15, 2, 2, true, Ovf::WrpTcpl), 15);
    // Unsigned: keep 4 bits.
    assert_eq!(int_convert(16, 2, 2, false, Ovf::WrpTcpl), 0);
    assert_eq!(int_convert(17, 2, 2, false, Ovf::WrpTcpl), 1);
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn saturation_is_stable(
      v in any::<i64>(),
      i in 0u32..16,
      f in 0u32..16,
      signed in any::<bool>(),
      mode in proptest::sample::select(&[Ovf::SatTcpl, Ovf::SatZero, Ovf::SatSmgn][..]),
    ) {
      // Clamping once reaches a fixed point: clamping again changes nothing.
      let once = int_convert(v, i, f, signed, mode);
      let twice = int_convert(once as i64, i, f, signed, mode);
      prop_assert_eq!(once, twice);
    }

    #[test]
    fn wrap_fixed_point_in_range(
      v in any::<i64>(),
      i in 0u32..16,
      f in 0u32..16,
      signed in any::<bool>(),
    ) {
      let once = int_convert(v, i, f, signed, Ovf::WrpTcpl) as i64;
      let max = (1i64 << (i + f)) - 1;
      let min = if signed { -max - 1 } else { 0 };
      prop_assert!(once >= min && once <= max);
      prop_assert_eq!(int_convert(once, i, f, signed, Ovf::WrpTcpl) as i64, once);
    }
  }

  #[test]
  fn round_real_mode_table() {
    // 1.25 and -1.25 at one fractional bit: the spec's scenario rows.
    assert_eq!(round_real(1.25, 1, Rnd::NegInf), 2);  // 1.0
    assert_eq!(round_real(-1.25, 1, Rnd::NegInf), -3); // -1.5
    assert_eq!(round_real(1.25, 1, Rnd::PosInf), 3);  // 1.5
    assert_eq!(round_real(-1.25, 1, Rnd::PosInf), -2); // -1.0
    assert_eq!(round_real(1.25, 1, Rnd::Conv), 2);    // tie, even
    assert_eq!(round_real(1.75, 1, Rnd::Conv), 4);    // tie, even (overflows i=1)
    assert_eq!(round_real(0.3, 3, Rnd::Tcpl), 2);
    assert_eq!(round_real(-0.3, 3, Rnd::Tcpl), -3);
    assert_eq!(round_real(-0.3, 3, Rnd::Smgn), -2);
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn round_real_agrees_with_frac_convert(
      raw in -(1i64 << 24)..(1i64 << 24),
      shift in 0u32..8,
      f in 0u32..8,
      mode in proptest::sample::select(&ALL_RND[..]),
    ) {
      // A real with `shift + f` fractional bits, rounded to `f` of them, must
      // match the pure-integer path.
      let x = raw as f64 / (1u64 << (shift + f)) as f64;
      prop_assert_eq!(
        round_real(x, f, mode),
        frac_convert(raw, shift + f, f, mode),
        "x={} shift={} f={}", x, shift, f,
      );
    }
  }
}
