/*!
 * Constant-Time Tag Comparison
 *
 * Tag verification must not reveal where the first mismatching byte is.
 * Comparison is done with the `subtle` crate: every byte position is
 * compared, the per-byte results are combined with `Choice` arithmetic, and
 * the result is only turned into a `bool` once at the very end.
 *
 * The comparison can be driven through a [`ComparisonProbe`] so tests can
 * count the steps taken instead of relying on wall-clock timing.
 */

use subtle::{Choice, ConstantTimeEq};

use crate::gcm::TAG_SIZE;

/// Observer for each byte comparison step
pub trait ComparisonProbe {
    /// Called once per compared byte position
    fn on_step(&mut self, index: usize);
}

/// Probe that does nothing
impl ComparisonProbe for () {
    #[inline(always)]
    fn on_step(&mut self, _index: usize) {}
}

/// Probe that records how many steps were taken and in what order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepCounter {
    pub steps: usize,
    pub visited: Vec<usize>,
}

impl StepCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComparisonProbe for StepCounter {
    fn on_step(&mut self, index: usize) {
        self.steps += 1;
        self.visited.push(index);
    }
}

/// Compare two tags in constant time
#[inline]
pub fn ct_tag_eq(a: &[u8; TAG_SIZE], b: &[u8; TAG_SIZE]) -> Choice {
    ct_tag_eq_probed(a, b, &mut ())
}

/// Compare two tags in constant time, reporting every step to `probe`
pub fn ct_tag_eq_probed<P: ComparisonProbe>(
    a: &[u8; TAG_SIZE],
    b: &[u8; TAG_SIZE],
    probe: &mut P,
) -> Choice {
    let mut equal = Choice::from(1u8);
    for index in 0..TAG_SIZE {
        equal &= a[index].ct_eq(&b[index]);
        probe.on_step(index);
    }
    equal
}
