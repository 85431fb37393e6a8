use core::fmt::{Debug, Display, Formatter};

use super::Fixed;

impl Fixed {
  /// The value's bit field as a binary string,
  /// [`storage_bits`](crate::FixedFormat::storage_bits) wide, most
  /// significant bit first. This is the per-element unit of the bit-stream
  /// helper.
  ///
  /// ```
  /// # use fixblas::{Fixed, FixedFormat};
  /// let x = Fixed::from_f64(-1.0, FixedFormat::new(2, 2));
  /// assert_eq!(x.bit_string(), "11100");
  /// ```
  pub fn bit_string(&self) -> String {
    let width = self.fmt.storage_bits() as usize;
    let mask = ((1u64 << width) - 1) as u32;
    format!("{:0width$b}", self.data as u32 & mask)
  }
}

impl Debug for Fixed {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("Fixed")
      .field(&format_args!(
        "0b{} = {} ({}{}.{})",
        self.bit_string(),
        self.to_f64(),
        if self.fmt.signed { "s" } else { "u" },
        self.fmt.int_bits,
        self.fmt.frac_bits,
      ))
      .finish()
  }
}

impl Display for Fixed {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    Display::fmt(&self.to_f64(), f)
  }
}
