//! The complex-number wrapper: a pair of [`Fixed`] scalars treated as one
//! opaque scalar. Everything here is a thin composition of the real
//! primitives; the interesting part is that every sub-operation of a complex
//! multiply exposes its own policy bundle, because each corresponds to a
//! distinct hardware multiplier or adder.

use crate::error::{Error, Result};
use crate::fixed::{qadd, qdiv, qmul, qneg, qsub, Bundle, Fixed};

/// A complex fixed-point value. The two parts may carry different formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex {
  pub re: Fixed,
  pub im: Fixed,
}

impl Complex {
  pub const fn new(re: Fixed, im: Fixed) -> Self {
    Complex { re, im }
  }

  /// Both parts as reals.
  pub fn to_f64(&self) -> (f64, f64) {
    (self.re.to_f64(), self.im.to_f64())
  }
}

/// Per-part bundles for the component-wise operations (add, sub, scaling by a
/// real).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PartBundles {
  pub re: Bundle,
  pub im: Bundle,
}

/// Bundles for the schoolbook 4-multiply expansion
/// `(a + bi)(c + di) = (ac - bd) + (ad + bc)i`: one per product, one per
/// combining operation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SchoolbookBundles {
  pub ac: Bundle,
  pub bd: Bundle,
  pub ad: Bundle,
  pub bc: Bundle,
  pub acbd: Bundle,
  pub adbc: Bundle,
}

/// Bundles for the 3-multiply/5-add form: with `A = (a + b)c`,
/// `B = (c + d)b`, `C = (b - a)d`, the product is `(A - B) + (B - C)i`.
/// Three multiplier bundles (`abc`, `cdb`, `bad`), three pre-adder bundles
/// (`ab`, `cd`, `ba`), and the two final subtractions (`re`, `im`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KaratsubaBundles {
  pub ab: Bundle,
  pub cd: Bundle,
  pub ba: Bundle,
  pub abc: Bundle,
  pub cdb: Bundle,
  pub bad: Bundle,
  pub re: Bundle,
  pub im: Bundle,
}

/// Which expansion a complex multiply uses, with its sub-operation bundles.
/// The default is the schoolbook form with everything derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CmulSpec {
  Schoolbook(SchoolbookBundles),
  Karatsuba(KaratsubaBundles),
}

impl Default for CmulSpec {
  fn default() -> Self {
    CmulSpec::Schoolbook(SchoolbookBundles::default())
  }
}

/// Complex × complex multiplication.
pub fn qmul_c(x: Complex, y: Complex, spec: &CmulSpec) -> Complex {
  let (a, b, c, d) = (x.re, x.im, y.re, y.im);
  match spec {
    CmulSpec::Schoolbook(t) => {
      let re = qsub(qmul(a, c, &t.ac), qmul(b, d, &t.bd), &t.acbd);
      let im = qadd(qmul(a, d, &t.ad), qmul(b, c, &t.bc), &t.adbc);
      Complex::new(re, im)
    }
    CmulSpec::Karatsuba(t) => {
      let big_a = qmul(qadd(a, b, &t.ab), c, &t.abc);
      let big_b = qmul(qadd(c, d, &t.cd), b, &t.bad);
      let big_c = qmul(qsub(b, a, &t.ba), d, &t.cdb);
      Complex::new(qsub(big_a, big_b, &t.re), qsub(big_b, big_c, &t.im))
    }
  }
}

/// Real × complex: distributes over the two parts.
pub fn qmul_rc(r: Fixed, c: Complex, t: &PartBundles) -> Complex {
  Complex::new(qmul(r, c.re, &t.re), qmul(r, c.im, &t.im))
}

/// Complex × real: distributes over the two parts.
pub fn qmul_cr(c: Complex, r: Fixed, t: &PartBundles) -> Complex {
  Complex::new(qmul(c.re, r, &t.re), qmul(c.im, r, &t.im))
}

/// Component-wise complex addition.
pub fn qadd_c(x: Complex, y: Complex, t: &PartBundles) -> Complex {
  Complex::new(qadd(x.re, y.re, &t.re), qadd(x.im, y.im, &t.im))
}

/// Component-wise complex subtraction.
pub fn qsub_c(x: Complex, y: Complex, t: &PartBundles) -> Complex {
  Complex::new(qsub(x.re, y.re, &t.re), qsub(x.im, y.im, &t.im))
}

/// Real + complex: touches the real part only.
pub fn qadd_rc(r: Fixed, c: Complex, t: &Bundle) -> Complex {
  Complex::new(qadd(r, c.re, t), c.im)
}

/// Complex + real.
pub fn qadd_cr(c: Complex, r: Fixed, t: &Bundle) -> Complex {
  Complex::new(qadd(c.re, r, t), c.im)
}

/// Real − complex: the imaginary part is negated through a subtraction from
/// zero in the real operand's format.
pub fn qsub_rc(r: Fixed, c: Complex, t: &Bundle) -> Complex {
  Complex::new(qsub(r, c.re, t), qsub(Fixed::zero(r.fmt()), c.im, t))
}

/// Complex − real.
pub fn qsub_cr(c: Complex, r: Fixed, t: &Bundle) -> Complex {
  Complex::new(qsub(c.re, r, t), c.im)
}

/// Component-wise complex negation.
pub fn qneg_c(c: Complex) -> Complex {
  Complex::new(qneg(c.re), qneg(c.im))
}

/// Complex ÷ complex division is declared but unsupported.
pub fn qdiv_cc(_x: Complex, _y: Complex) -> Result<Complex> {
  Err(Error::Unsupported("complex/complex division"))
}

/// Real ÷ complex division is declared but unsupported.
pub fn qdiv_rc(_r: Fixed, _c: Complex) -> Result<Complex> {
  Err(Error::Unsupported("real/complex division"))
}

/// Complex ÷ real: divides each part.
pub fn qdiv_cr(c: Complex, r: Fixed, t: &PartBundles) -> Result<Complex> {
  Ok(Complex::new(qdiv(c.re, r, &t.re), qdiv(c.im, r, &t.im)))
}
