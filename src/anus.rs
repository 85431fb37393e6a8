//! Advanced Nonlinear Universal Subprograms: helpers modeling the nonlinear
//! blocks of a datapath. Horner polynomial evaluation, piecewise polynomial
//! approximation, and [`qtable`], which emulates an on-chip ROM lookup.

use crate::fixed::{qadd, qmul, Bundle, Fixed, Rnd};

/// Square root, for [`qtable`].
pub fn sqrt(x: f64) -> f64 {
  x.sqrt()
}

/// Reciprocal, for [`qtable`].
pub fn recip(x: f64) -> f64 {
  1.0 / x
}

/// Reciprocal square root, for [`qtable`].
pub fn rsqrt(x: f64) -> f64 {
  1.0 / x.sqrt()
}

/// Exponential, for [`qtable`].
pub fn exp(x: f64) -> f64 {
  x.exp()
}

/// Evaluate a one-argument real function on `x`'s real view and quantize the
/// result back into `x`'s format, rounding internally with [`Rnd::Zero`]
/// regardless of the format's own mode.
///
/// This models a pre-computed lookup table: evaluating the function at
/// runtime is bit-identical to indexing a ROM filled with the same
/// quantization, and the caller substitutes a true ROM at RTL time.
///
/// ```
/// # use fixblas::{anus, Fixed, FixedFormat};
/// let x = Fixed::from_f64(4.0, FixedFormat::new(8, 8));
/// assert_eq!(anus::qtable(anus::rsqrt, x).to_f64(), 0.5);
/// ```
pub fn qtable(f: fn(f64) -> f64, x: Fixed) -> Fixed {
  let interior = x.fmt().with_rnd(Rnd::Zero);
  let looked_up = Fixed::from_f64(f(x.to_f64()), interior);
  Fixed::from_bits(looked_up.to_bits(), x.fmt())
}

/// Horner-scheme polynomial evaluation
/// `((a0 · x + a1) · x + a2) · x + ... + an`.
///
/// Each coefficient carries its own format, and the intermediate at step `k`
/// is quantized into coefficient `k`'s format; the multiply-accumulate
/// registers of a polynomial datapath are sized per stage. The result has the
/// last coefficient's format.
pub fn poly(coeffs: &[Fixed], x: Fixed) -> Fixed {
  assert!(coeffs.len() >= 2, "a polynomial needs at least two coefficients");
  let mut acc = coeffs[0];
  for a in &coeffs[1..] {
    let t = Bundle::of(a.fmt());
    acc = qadd(qmul(acc, x, &t), *a, &t);
  }
  acc
}

/// Piecewise polynomial approximation: compares `x` against each breakpoint
/// (normalized against `x`'s representable raw range) and dispatches to the
/// matching polynomial; the result is cast into `x`'s format.
///
/// With `m` breakpoints there are `m + 1` polynomials; breakpoint `p[i]` is
/// the upper edge of segment `i`.
#[derive(Clone, Debug)]
pub struct Approx<'a> {
  pub breakpoints: &'a [f64],
  pub polys: &'a [&'a [Fixed]],
}

impl Approx<'_> {
  pub fn eval(&self, x: Fixed) -> Fixed {
    assert_eq!(
      self.polys.len(),
      self.breakpoints.len() + 1,
      "piecewise approximation needs one more polynomial than breakpoints",
    );
    let fmt = x.fmt();
    let lo = fmt.min_raw() as f64;
    let hi = fmt.max_raw() as f64;
    for (p, coeffs) in self.breakpoints.iter().zip(self.polys) {
      if x.to_f64() < (p - lo) / (hi - lo) {
        return poly(coeffs, x).cast(fmt);
      }
    }
    poly(self.polys[self.polys.len() - 1], x).cast(fmt)
  }
}
