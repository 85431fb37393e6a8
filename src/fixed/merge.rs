//! Policy bundles and the merger rules.
//!
//! Every primitive derives its output format deterministically from the two
//! input formats, the operation, and an optional [`Bundle`] of overrides. The
//! recipe:
//!
//!   1. Infer each axis from the inputs (widths per the operation's rule
//!      below, signedness as the OR, modes kept when the inputs agree and
//!      reset to the library defaults when they differ).
//!   2. Apply any explicit override from the bundle.
//!   3. Cap the total width at 31 bits by shaving both sides symmetrically.
//!
//! Width rules: multiply infers `max` widths, or the exact sum of widths under
//! [`FullPrec`](Bundle::full_prec); add, subtract and divide infer `max`
//! widths, plus one integer bit under FullPrec.

use super::format::{FixedFormat, Ovf, Rnd};

/// A set of per-axis overrides for the output format of one operation, plus
/// the `FullPrec` flag. Unset axes are derived by the merger rules.
///
/// ```
/// # use fixblas::{Bundle, Rnd};
/// const WIDE_ACC: Bundle = Bundle::new().int_bits(16).frac_bits(12).rnd(Rnd::Conv);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bundle {
  int_bits: Option<u32>,
  frac_bits: Option<u32>,
  signed: Option<bool>,
  rnd: Option<Rnd>,
  ovf: Option<Ovf>,
  full_prec: bool,
}

impl Bundle {
  /// The empty bundle: every axis derived.
  pub const fn new() -> Self {
    Bundle { int_bits: None, frac_bits: None, signed: None, rnd: None, ovf: None, full_prec: false }
  }

  /// Override the output integer width.
  pub const fn int_bits(mut self, n: u32) -> Self {
    self.int_bits = Some(n);
    self
  }

  /// Override the output fractional width.
  pub const fn frac_bits(mut self, n: u32) -> Self {
    self.frac_bits = Some(n);
    self
  }

  /// Override the output signedness.
  pub const fn signed(mut self, signed: bool) -> Self {
    self.signed = Some(signed);
    self
  }

  /// Override the output rounding mode.
  pub const fn rnd(mut self, rnd: Rnd) -> Self {
    self.rnd = Some(rnd);
    self
  }

  /// Override the output overflow mode.
  pub const fn ovf(mut self, ovf: Ovf) -> Self {
    self.ovf = Some(ovf);
    self
  }

  /// Request full precision: an inferred output wide enough to hold the exact
  /// ideal result (subject to the 31-bit cap). Explicit width overrides still
  /// win.
  pub const fn full_prec(mut self) -> Self {
    self.full_prec = true;
    self
  }

  /// A bundle pinning all five axes to an existing format.
  pub const fn of(fmt: FixedFormat) -> Self {
    Bundle {
      int_bits: Some(fmt.int_bits),
      frac_bits: Some(fmt.frac_bits),
      signed: Some(fmt.signed),
      rnd: Some(fmt.rnd),
      ovf: Some(fmt.ovf),
      full_prec: false,
    }
  }
}

/// Reduce an over-wide `(int, frac)` pair symmetrically until the 31-bit cap
/// holds.
fn cap(int_bits: u32, frac_bits: u32) -> (u32, u32) {
  let total = int_bits + frac_bits;
  if total <= 31 {
    return (int_bits, frac_bits);
  }
  let cut = (total - 31 + 1) / 2;
  assert!(
    int_bits >= cut && frac_bits >= cut,
    "cannot cap ({int_bits}, {frac_bits}) to 31 total bits symmetrically",
  );
  (int_bits - cut, frac_bits - cut)
}

fn merged_modes(a: &FixedFormat, b: &FixedFormat, t: &Bundle) -> (Rnd, Ovf) {
  let rnd = t.rnd.unwrap_or(if a.rnd == b.rnd { a.rnd } else { Rnd::default() });
  let ovf = t.ovf.unwrap_or(if a.ovf == b.ovf { a.ovf } else { Ovf::default() });
  (rnd, ovf)
}

fn finish(int_bits: u32, frac_bits: u32, signed: bool, rnd: Rnd, ovf: Ovf) -> FixedFormat {
  let (int_bits, frac_bits) = cap(int_bits, frac_bits);
  FixedFormat { int_bits, frac_bits, signed, rnd, ovf }
}

/// The output format of a multiplication of `a` by `b` under bundle `t`.
pub(crate) fn merge_mul(a: &FixedFormat, b: &FixedFormat, t: &Bundle) -> FixedFormat {
  let int_bits = t.int_bits.unwrap_or(if t.full_prec {
    a.int_bits + b.int_bits
  } else {
    a.int_bits.max(b.int_bits)
  });
  let frac_bits = t.frac_bits.unwrap_or(if t.full_prec {
    a.frac_bits + b.frac_bits
  } else {
    a.frac_bits.max(b.frac_bits)
  });
  let signed = t.signed.unwrap_or(a.signed || b.signed);
  let (rnd, ovf) = merged_modes(a, b, t);
  finish(int_bits, frac_bits, signed, rnd, ovf)
}

/// The output format of an addition, subtraction, or division of `a` and `b`
/// under bundle `t`.
pub(crate) fn merge_add(a: &FixedFormat, b: &FixedFormat, t: &Bundle) -> FixedFormat {
  let int_bits = t
    .int_bits
    .unwrap_or(a.int_bits.max(b.int_bits) + t.full_prec as u32);
  let frac_bits = t.frac_bits.unwrap_or(a.frac_bits.max(b.frac_bits));
  let signed = t.signed.unwrap_or(a.signed || b.signed);
  let (rnd, ovf) = merged_modes(a, b, t);
  finish(int_bits, frac_bits, signed, rnd, ovf)
}
