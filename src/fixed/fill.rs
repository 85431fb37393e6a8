//! Random fill, a source of test data. Every function takes an explicit RNG
//! handle; the crate holds no process-global generator state.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::{Fixed, FixedFormat};

impl Fixed {
  /// A uniformly random bit pattern of the format: every representable raw
  /// value is equally likely.
  pub fn fill_uniform<R: Rng + ?Sized>(fmt: FixedFormat, rng: &mut R) -> Self {
    Fixed::from_bits(rng.random::<i32>(), fmt)
  }

  /// A standard-normal real sample, quantized through the ordinary
  /// construction path (so the format's rounding and overflow modes apply).
  pub fn fill_normal<R: Rng + ?Sized>(fmt: FixedFormat, rng: &mut R) -> Self {
    let x: f64 = StandardNormal.sample(rng);
    Fixed::from_f64(x, fmt)
  }
}
