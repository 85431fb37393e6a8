//! The bit-stream helper: converts between a tensor and a concatenated
//! binary string of per-element bit fields, the staging format of a
//! downstream cycle-accurate simulator.
//!
//! Each element contributes `int_bits + frac_bits + signed` bits, most
//! significant bit first. Two element orderings are exposed:
//!
//! - [`Order::L2r`]: element 0 first;
//! - [`Order::R2l`]: elements emitted in reverse, in chunks of `chunk`
//!   elements whose internal order is preserved (`chunk = 1` is a plain
//!   reversal).

use crate::error::{Error, Result};
use crate::fixed::{Fixed, FixedFormat};
use crate::tensor::Tensor;

/// Element ordering of the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
  /// Element 0 first.
  L2r,
  /// Elements in reverse, in chunks of `chunk`.
  R2l { chunk: usize },
}

/// The order in which flat element indices appear in the stream.
fn stream_order(len: usize, order: Order) -> Result<Vec<usize>> {
  match order {
    Order::L2r => Ok((0..len).collect()),
    Order::R2l { chunk } => {
      if chunk == 0 || len % chunk != 0 {
        return Err(Error::BadBitStream {
          reason: format!("{len} elements cannot be chunked by {chunk}"),
        });
      }
      let mut indices = Vec::with_capacity(len);
      for c in (0..len / chunk).rev() {
        indices.extend(c * chunk..(c + 1) * chunk);
      }
      Ok(indices)
    }
  }
}

/// Serialize a tensor to a bit stream.
///
/// ```
/// # use fixblas::{to_bit_stream, FixedFormat, Order, Tensor};
/// let t = Tensor::from_f64(&[2], FixedFormat::unsigned(2, 2), &[1.0, 2.5]).unwrap();
/// assert_eq!(to_bit_stream(&t, Order::L2r).unwrap(), "01001010");
/// assert_eq!(to_bit_stream(&t, Order::R2l { chunk: 1 }).unwrap(), "10100100");
/// ```
pub fn to_bit_stream(t: &Tensor, order: Order) -> Result<String> {
  let indices = stream_order(t.len(), order)?;
  let mut out = String::with_capacity(t.len() * t.fmt().storage_bits() as usize);
  for i in indices {
    out.push_str(&t.get_flat(i).bit_string());
  }
  Ok(out)
}

/// Parse a bit stream back into a tensor of the given shape and element
/// format. Exact inverse of [`to_bit_stream`] with the same order.
pub fn from_bit_stream(
  stream: &str,
  shape: &[usize],
  fmt: FixedFormat,
  order: Order,
) -> Result<Tensor> {
  let width = fmt.storage_bits() as usize;
  let len: usize = shape.iter().product();
  if stream.len() != len * width {
    return Err(Error::BadBitStream {
      reason: format!(
        "stream of {} bits does not hold {len} elements of {width} bits",
        stream.len(),
      ),
    });
  }
  let mut t = Tensor::new(shape, fmt);
  for (pos, flat) in stream_order(len, order)?.into_iter().enumerate() {
    let field = &stream[pos * width..(pos + 1) * width];
    let bits = u32::from_str_radix(field, 2).map_err(|_| Error::BadBitStream {
      reason: format!("non-binary element field {field:?}"),
    })?;
    t.set_flat(flat, Fixed::from_bits(bits as i32, fmt));
  }
  Ok(t)
}
