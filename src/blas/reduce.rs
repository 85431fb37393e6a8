//! The tree reducer: log-depth pairwise summation whose accumulator format is
//! chosen per tree layer. This mirrors a pipelined adder tree, where each
//! pipeline stage is a rank of adders with its own word length.

use crate::fixed::{qadd, Bundle, Fixed};
use crate::tensor::Tensor;

const EMPTY: Bundle = Bundle::new();

/// The bundle for additions at tree layer `k`: the `k`-th entry, the last
/// entry reused for deeper layers, or the empty bundle if none were given.
fn layer_bundle(layers: &[Bundle], k: usize) -> &Bundle {
  layers.get(k).or_else(|| layers.last()).unwrap_or(&EMPTY)
}

/// Sum `values` by pairwise combination arranged in a complete binary tree.
///
/// Layer 0 pair-sums the leaves, layer 1 pair-sums those results, and so on;
/// additions at layer `k` use `layers[k]` (the last bundle is reused when the
/// tree is deeper than the schedule). An odd element at any layer is carried
/// forward to the next layer unchanged. Returns `None` for an empty input.
///
/// ```
/// # use fixblas::{qreduce, Bundle, Fixed, FixedFormat};
/// const Q: FixedFormat = FixedFormat::new(12, 8);
/// let v: Vec<_> = [1.0, 2.0, 3.0, 4.0, 5.0].iter()
///   .map(|&x| Fixed::from_f64(x, Q)).collect();
/// let sum = qreduce(&v, &[Bundle::new().full_prec()]).unwrap();
/// assert_eq!(sum.to_f64(), 15.0);
/// ```
pub fn qreduce(values: &[Fixed], layers: &[Bundle]) -> Option<Fixed> {
  if values.is_empty() {
    return None;
  }
  let mut current = values.to_vec();
  let mut layer = 0;
  while current.len() > 1 {
    let t = layer_bundle(layers, layer);
    let mut next = Vec::with_capacity(current.len().div_ceil(2));
    for pair in current.chunks(2) {
      next.push(if let [a, b] = pair { qadd(*a, *b, t) } else { pair[0] });
    }
    current = next;
    layer += 1;
  }
  Some(current[0])
}

/// Reduce a whole tensor: flatten row-major and apply the same schedule.
pub fn qreduce_tensor(t: &Tensor, layers: &[Bundle]) -> Option<Fixed> {
  let values: Vec<Fixed> = (0..t.len()).map(|i| t.get_flat(i)).collect();
  qreduce(&values, layers)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::FixedFormat;
  use proptest::prelude::*;

  const Q: FixedFormat = FixedFormat::new(12, 8);

  fn vals(xs: &[f64]) -> Vec<Fixed> {
    xs.iter().map(|&x| Fixed::from_f64(x, Q)).collect()
  }

  #[test]
  fn single_element_passes_through() {
    let v = vals(&[2.5]);
    let r = qreduce(&v, &[]).unwrap();
    assert_eq!(r.to_f64(), 2.5);
    assert_eq!(r.fmt(), Q);
  }

  #[test]
  fn empty_input() {
    assert!(qreduce(&[], &[]).is_none());
  }

  #[test]
  fn layer_schedule_is_respected() {
    // Two layers: the leaf adders keep only one fractional bit, the root
    // adder is wide. The leaf truncation must happen before the root sum.
    let v = vals(&[0.75, 0.75, 0.75, 0.75]);
    let layers = [Bundle::new().int_bits(12).frac_bits(1), Bundle::new().full_prec()];
    // Layer 0: 0.75 + 0.75 = 1.5 exactly at f=1; layer 1: 1.5 + 1.5 = 3.0.
    assert_eq!(qreduce(&v, &layers).unwrap().to_f64(), 3.0);

    // Truncating leaf adders (f=0, toward -inf): 1.5 -> 1.0 per pair.
    let layers = [Bundle::new().int_bits(12).frac_bits(0), Bundle::new().full_prec()];
    assert_eq!(qreduce(&v, &layers).unwrap().to_f64(), 2.0);
  }

  #[test]
  fn last_bundle_reused_for_deeper_layers() {
    // Eight ones, one narrow bundle: it applies at every layer.
    let v = vals(&[1.0; 8]);
    let layers = [Bundle::new().int_bits(2).frac_bits(8)];
    // Saturation at 3.99609375 = (2, 8) max bites at the second layer.
    let r = qreduce(&v, &layers).unwrap();
    let max = Fixed::from_raw(FixedFormat::new(2, 8).max_raw() as i32, FixedFormat::new(2, 8));
    assert_eq!(r.to_bits(), max.to_bits());
  }

  #[test]
  fn odd_element_carried_forward_unchanged() {
    // Five elements: the fifth meets the tree only at the final layer. Give
    // it a value the layer-0 format cannot represent: 1.25 survives only if
    // the carry skips the (1, 1) adders instead of being cast through them.
    let narrow = FixedFormat::new(1, 1);
    let mut v: Vec<Fixed> = [0.5, 0.5, 0.5, 0.5].iter()
      .map(|&x| Fixed::from_f64(x, narrow)).collect();
    v.push(Fixed::from_f64(1.25, Q));
    let layers = [Bundle::of(narrow), Bundle::new().full_prec(), Bundle::new().full_prec()];
    // Layer 0: (1.0, 1.0), carry 1.25; layer 1: 2.0, carry 1.25; layer 2: 3.25.
    let r = qreduce(&v, &layers).unwrap();
    assert_eq!(r.to_f64(), 3.25);
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn full_prec_reduce_is_exact_sum(raws in proptest::collection::vec(-1024i32..1024, 1..40)) {
      // With FullPrec at every layer the tree equals the textbook sum.
      const N: FixedFormat = FixedFormat::new(8, 2);
      let v: Vec<Fixed> = raws.iter().map(|&r| Fixed::from_raw(r, N)).collect();
      let exact: i64 = raws.iter().map(|&r| r as i64).sum();
      let r = qreduce(&v, &[Bundle::new().full_prec()]).unwrap();
      prop_assert_eq!(r.to_f64(), exact as f64 / 4.0);
    }

    #[test]
    fn reduce_matches_tensor_reduce(raws in proptest::collection::vec(-512i32..512, 1..24)) {
      const N: FixedFormat = FixedFormat::new(10, 2);
      let v: Vec<Fixed> = raws.iter().map(|&r| Fixed::from_raw(r, N)).collect();
      let t = Tensor::from_f64(
        &[raws.len()],
        N,
        &v.iter().map(|x| x.to_f64()).collect::<Vec<_>>(),
      ).unwrap();
      let layers = [Bundle::new().full_prec()];
      prop_assert_eq!(
        qreduce(&v, &layers).unwrap().to_bits(),
        qreduce_tensor(&t, &layers).unwrap().to_bits(),
      );
    }
  }
}
