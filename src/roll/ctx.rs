use super::{error::RollError, roller::Roller, tree::Roll, RResult};
use crate::common::*;
use crate::parse::{
    ast::{Dice, Expression},
    visit::AstVisitor,
};
use std::cmp::Ordering;
use std::ops::RangeInclusive;

pub type DefaultRoller = rand::rngs::ThreadRng;

/// Roll budget of a [RollContext::default] context.
pub const DEFAULT_MAX_ROLLS: usize = 1_000_000;

/// Evaluates expressions against a random source, optionally capping the total
/// number of dice rolled.
pub struct RollContext<R = DefaultRoller> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    /// Number of dice rolled since creation or the last [reset](Self::reset).
    pub fn rolls_made(&self) -> usize {
        self.rolls
    }

    pub fn reset(&mut self) {
        self.rolls = 0;
    }

    fn count_rolls(&mut self, n: usize) -> RResult<()> {
        self.rolls = self.rolls.saturating_add(n);
        if self.max_rolls.map_or(false, |max| self.rolls > max) {
            Err(RollError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    fn roll(&mut self, num: usize, range: RangeInclusive<Int>) -> RResult<Vec<Int>> {
        self.count_rolls(num)?;
        let mut rolls = Vec::new();
        rolls
            .try_reserve_exact(num)
            .map_err(|_| RollError::TooManyRolls)?;
        self.roller.roll_into(&mut rolls, num, range);
        log::trace!("rolled {:?}", rolls);
        Ok(rolls)
    }

    pub fn eval(&mut self, expr: &Expression) -> RResult<Roll> {
        self.visit(expr)
    }

    fn eval_dice(&mut self, dice: &Dice) -> RResult<Roll> {
        match dice {
            // Each attempt evaluates its own count and sides.
            Dice::Advantage(of) => self.choose(dice, Ordering::Greater, |ctx| ctx.eval_dice(of)),
            Dice::Disadvantage(of) => self.choose(dice, Ordering::Less, |ctx| ctx.eval_dice(of)),
            _ => {
                let count = self.eval(dice.count())?;
                let sides = dice.sides().map(|s| self.eval(s)).transpose()?;
                self.roll_dice(dice, count, sides)
            }
        }
    }

    /// Rolls `dice` using operands that have already been evaluated.
    fn roll_dice(&mut self, dice: &Dice, count: Roll, sides: Option<Roll>) -> RResult<Roll> {
        match dice {
            Dice::Basic { .. } => {
                let sides = sides.unwrap_or_else(|| Roll::constant(0));
                let num = dice_count(count.value())?;
                let rolls = if num == 0 {
                    Vec::new()
                } else if sides.value() < 1 {
                    return Err(RollError::InvalidSides(sides.value()));
                } else {
                    self.roll(num, 1..=sides.value())?
                };
                Roll::summed(dice.clone().into(), rolls, vec![count, sides])
            }
            Dice::Fate { .. } => {
                let num = dice_count(count.value())?;
                let rolls = self.roll(num, -1..=1)?;
                Roll::summed(dice.clone().into(), rolls, vec![count])
            }
            Dice::Explode(of) => {
                let max = sides.as_ref().map_or(0, Roll::value);
                let first = self.roll_dice(of, count, sides)?;

                let mut rolls = first.rolls().to_vec();
                let mut hits = count_faces(first.rolls(), max);
                let mut iterations = vec![first];

                // A one-sided die always rolls its maximum and would never stop.
                while max > 1 && hits > 0 {
                    log::trace!("exploding {} more d{}", hits, max);
                    let next = of.with_operands(Expression::Constant(hits as Int), max.into());
                    let attempt = self.eval_dice(&next)?;
                    hits = count_faces(attempt.rolls(), max);
                    rolls.extend_from_slice(attempt.rolls());
                    iterations.push(attempt);
                }

                Roll::summed(dice.clone().into(), rolls, iterations)
            }
            Dice::Advantage(of) => self.choose(dice, Ordering::Greater, |ctx| {
                ctx.roll_dice(of, count.clone(), sides.clone())
            }),
            Dice::Disadvantage(of) => self.choose(dice, Ordering::Less, |ctx| {
                ctx.roll_dice(of, count.clone(), sides.clone())
            }),
        }
    }

    /// Makes two attempts and keeps the one whose value compares as `prefer`
    /// against the other. Ties keep the first attempt.
    fn choose(
        &mut self,
        dice: &Dice,
        prefer: Ordering,
        mut attempt: impl FnMut(&mut Self) -> RResult<Roll>,
    ) -> RResult<Roll> {
        let first = attempt(self)?;
        let second = attempt(self)?;

        let chosen = if second.value().cmp(&first.value()) == prefer {
            &second
        } else {
            &first
        };
        log::trace!(
            "{}: kept {} of {} and {}",
            dice,
            chosen.value(),
            first.value(),
            second.value()
        );

        let value = chosen.value();
        let rolls = chosen.rolls().to_vec();
        Ok(Roll::new(dice.clone().into(), value, rolls, vec![first, second]))
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new_bounded(DEFAULT_MAX_ROLLS, rand::thread_rng())
    }
}

impl<R: Roller> AstVisitor for RollContext<R> {
    type Output = RResult<Roll>;

    fn visit_constant(&mut self, x: Int) -> Self::Output {
        Ok(Roll::constant(x))
    }

    fn visit_binary(
        &mut self,
        op: BinaryOperator,
        l: &Expression,
        r: &Expression,
    ) -> Self::Output {
        let left = self.eval(l)?;
        let right = self.eval(r)?;
        let value = apply(op, left.value(), right.value())?;
        Ok(Roll::new(
            Expression::binary(op, l.clone(), r.clone()),
            value,
            Vec::new(),
            vec![left, right],
        ))
    }

    fn visit_dice(&mut self, dice: &Dice) -> Self::Output {
        self.eval_dice(dice)
    }
}

fn apply(op: BinaryOperator, l: Int, r: Int) -> RResult<Int> {
    use BinaryOperator::*;
    match op {
        Add => l.checked_add(r).ok_or(RollError::Overflow),
        Sub => l.checked_sub(r).ok_or(RollError::Overflow),
        Mul => l.checked_mul(r).ok_or(RollError::Overflow),
        Div if r == 0 => Err(RollError::ZeroDivision),
        Div => l.checked_div(r).ok_or(RollError::Overflow),
        Mod if r == 0 => Err(RollError::ZeroModulo),
        Mod => l.checked_rem(r).ok_or(RollError::Overflow),
        // Goes through f64: exact up to 2^53, truncated toward zero, saturating.
        Pow => Ok((l as f64).powf(r as f64) as Int),
    }
}

fn dice_count(n: Int) -> RResult<usize> {
    usize::try_from(n).map_err(|_| RollError::InvalidCount(n))
}

fn count_faces(rolls: &[Int], face: Int) -> usize {
    rolls.iter().filter(|&&x| x == face).count()
}
