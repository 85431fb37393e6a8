//! The crate-wide error type.
//!
//! Everything here is deterministic and pure, so errors are configuration
//! errors (shapes or streams that cannot fit together), numeric conditions
//! the caller must act on ([`Error::NotPositiveDefinite`]), or operations the
//! library deliberately refuses ([`Error::Unsupported`]). Division by zero is
//! *not* an error: `qdiv` returns zero in the output format.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  /// Operand shapes do not satisfy a kernel's compatibility rule.
  #[error("shape mismatch in {op}: {detail}")]
  ShapeMismatch { op: &'static str, detail: String },

  /// `qpotrf` met a non-positive pivot. The partial factor up to (and
  /// excluding) `column` is left in the matrix; the offending diagonal entry
  /// still holds its updated (non-positive) value, so the sign can also be
  /// inspected directly.
  #[error("matrix is not positive definite: pivot {column} is non-positive")]
  NotPositiveDefinite { column: usize },

  /// The operation is declared but deliberately not implemented
  /// (complex/complex and real/complex division).
  #[error("{0} is not supported")]
  Unsupported(&'static str),

  /// A bit stream has the wrong length, a wrong chunking, or a non-binary
  /// character.
  #[error("bad bit stream: {reason}")]
  BadBitStream { reason: String },
}

pub type Result<T> = core::result::Result<T, Error>;
