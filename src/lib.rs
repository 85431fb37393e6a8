//! This crate provides a correct, clean, and *bit-exact* software simulation of
//! fixed-point arithmetic, together with the BLAS/LAPACK-style kernels used to
//! prototype ASIC/FPGA datapaths before RTL commitment.
//!
//! # Introduction
//!
//! A fixed-point value is described by four axes: integer width, fractional
//! width, signedness, and the quantization policies applied when precision is
//! lost (a rounding mode for fractional truncation and an overflow mode for
//! integer clamping). Every primitive operation (multiply, add, subtract,
//! divide, negate, absolute value, compare) and every composite kernel (matrix
//! multiply, Gram product, matrix-vector product, Cholesky factorization and
//! solve, LDLᵀ factorization, triangular inverse) reproduces the exact
//! integer-level bit pattern that hardware implementing the same word lengths
//! and policies would produce.
//!
//! # Usage
//!
//! ```
//! use fixblas::{Bundle, Fixed, FixedFormat, qmul};
//!
//! // Describe formats, then build values in them.
//! const Q12_8: FixedFormat = FixedFormat::new(12, 8);
//! let a = Fixed::from_f64(3.0, Q12_8);
//! let b = Fixed::from_f64(0.5, Q12_8);
//!
//! // Operate with the usual operators (inferred output format)...
//! assert_eq!((a * b).to_f64(), 1.5);
//!
//! // ...or spell out the quantization of each intermediate.
//! let p = qmul(a, b, &Bundle::new().full_prec());
//! assert_eq!(p.to_f64(), 1.5);
//! ```
//!
//! Kernels take a destination operand and a small argument struct naming the
//! policy of every intermediate, so heterogeneous datapaths (say, a wider
//! accumulator than the operand product) can be modeled faithfully:
//!
//! ```
//! use fixblas::{Bundle, FixedFormat, QgemulArgs, Tensor, qgemul};
//!
//! const Q: FixedFormat = FixedFormat::new(12, 8);
//! let a = Tensor::from_f64(&[2, 2], Q, &[1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = Tensor::from_f64(&[2, 2], Q, &[0.5, 0.0, 0.0, 0.5]).unwrap();
//! let mut c = Tensor::new(&[2, 2], Q);
//!
//! let args = QgemulArgs { mul: Bundle::new().full_prec(), ..QgemulArgs::default() };
//! qgemul(&mut c, &a, &b, &args).unwrap();
//! assert_eq!(c.to_f64_vec(), [0.5, 1.0, 1.5, 2.0]);
//! ```
//!
//! # Bit-exactness
//!
//! All arithmetic runs on a single verified core: a 64-bit signed accumulator
//! plus the two casting functions [`frac_convert`] and [`int_convert`]. The
//! width cap `int_bits + frac_bits <= 31` guarantees that every intermediate
//! product fits the accumulator with margin. Correctness is ensured via
//! extensive testing against an exact-arithmetic oracle.

mod bitstream;
mod blas;
mod complex;
mod error;
mod fixed;
mod tensor;

/// Nonlinear helpers modeling hardware blocks (Horner polynomial, piecewise
/// approximation, ROM lookup).
pub mod anus;

pub use bitstream::{from_bit_stream, to_bit_stream, Order};
pub use blas::{
  potrf_to_standard, qgemul, qgemv, qgramul, qpotrf, qpotrs, qreduce, qreduce_tensor, qsytrf,
  qtrtri, QgemulArgs, QgemvArgs, QgramulArgs, QsytrfArgs, QtrtriArgs,
};
pub use complex::{
  qadd_c, qadd_cr, qadd_rc, qdiv_cc, qdiv_cr, qdiv_rc, qmul_c, qmul_cr, qmul_rc, qneg_c, qsub_c,
  qsub_cr, qsub_rc, CmulSpec, Complex, KaratsubaBundles, PartBundles, SchoolbookBundles,
};
pub use error::{Error, Result};
pub use fixed::cast::{frac_convert, int_convert, round_real};
pub use fixed::{qabs, qadd, qcmp, qdiv, qmul, qneg, qsub, Bundle, Fixed, FixedFormat, Ovf, Rnd};
pub use tensor::{Bin, Expr, Tensor, Un};

/// Number of cases for randomized (proptest) test suites.
#[cfg(test)]
pub(crate) const PROPTEST_CASES: u32 = 2048;
