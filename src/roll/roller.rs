use crate::common::Int;
use rand::Rng;
use std::ops::RangeInclusive;

/// A source of uniformly distributed integers.
pub trait Roller {
    /// Draws one value from `range`, which is never empty.
    fn roll(&mut self, range: RangeInclusive<Int>) -> Int;

    /// Appends `num` draws from `range` to `out`.
    fn roll_into(&mut self, out: &mut Vec<Int>, num: usize, range: RangeInclusive<Int>) {
        out.extend((0..num).map(|_| self.roll(range.clone())));
    }
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, range: RangeInclusive<Int>) -> Int {
        self.gen_range(range)
    }

    fn roll_into(&mut self, out: &mut Vec<Int>, num: usize, range: RangeInclusive<Int>) {
        let distr = rand::distributions::Uniform::from(range);
        out.extend(Rng::sample_iter(&mut *self, distr).take(num));
    }
}

#[cfg(test)]
pub(crate) use step::{ScriptedRoller, StepRoller};
