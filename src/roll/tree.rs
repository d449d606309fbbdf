use super::{error::RollError, RResult};
use crate::common::*;
use crate::parse::ast::Expression;
use std::fmt;
use std::sync::Arc;

/// The outcome of evaluating one [Expression] node.
///
/// `rolls` holds only the die faces drawn directly at this node; the rolls of
/// operands and of modifier attempts live in `children`. A `Roll` is never
/// modified once built.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Roll {
    source: Expression,
    value: Int,
    rolls: Vec<Int>,
    children: Vec<Arc<Roll>>,
    dice: Vec<Arc<Roll>>,
}

impl Roll {
    pub(crate) fn new(
        source: Expression,
        value: Int,
        rolls: Vec<Int>,
        children: Vec<Roll>,
    ) -> Self {
        let children: Vec<_> = children.into_iter().map(Arc::new).collect();

        let mut dice = Vec::new();
        for child in &children {
            if child.source.is_dice() {
                dice.push(Arc::clone(child));
            } else {
                dice.extend(child.dice.iter().cloned());
            }
        }

        Self {
            source,
            value,
            rolls,
            children,
            dice,
        }
    }

    pub(crate) fn constant(x: Int) -> Self {
        Self::new(Expression::Constant(x), x, Vec::new(), Vec::new())
    }

    /// A roll whose value is the sum of its own faces.
    pub(crate) fn summed(
        source: Expression,
        rolls: Vec<Int>,
        children: Vec<Roll>,
    ) -> RResult<Self> {
        let value = sum(&rolls)?;
        Ok(Self::new(source, value, rolls, children))
    }

    pub fn source(&self) -> &Expression {
        &self.source
    }

    pub fn value(&self) -> Int {
        self.value
    }

    pub fn rolls(&self) -> &[Int] {
        &self.rolls
    }

    pub fn children(&self) -> &[Arc<Roll>] {
        &self.children
    }

    /// The nearest descendants that come from dice, looking through any
    /// arithmetic in between.
    pub fn child_dice(&self) -> &[Arc<Roll>] {
        &self.dice
    }
}

pub(crate) fn sum(rolls: &[Int]) -> RResult<Int> {
    rolls
        .iter()
        .try_fold(0 as Int, |acc, &x| acc.checked_add(x))
        .ok_or(RollError::Overflow)
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.source, self.value)?;
        if !self.rolls.is_empty() {
            write!(f, " {:?}", self.rolls)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ast::Dice;

    fn dice_roll(count: Int, sides: Int, rolls: Vec<Int>) -> Roll {
        Roll::summed(
            Dice::basic(count, sides).into(),
            rolls,
            vec![Roll::constant(count), Roll::constant(sides)],
        )
        .unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(Roll::constant(1).to_string(), "1 = 1");
        assert_eq!(dice_roll(2, 6, vec![3, 4]).to_string(), "2d6 = 7 [3, 4]");
        assert_eq!(dice_roll(0, 6, vec![]).to_string(), "0d6 = 0");
    }

    #[test]
    fn test_child_dice_skips_arithmetic() {
        let a = dice_roll(1, 4, vec![2]);
        let b = dice_roll(2, 6, vec![1, 5]);
        let inner = Roll::new(
            Expression::mul(Dice::basic(2, 6), 2),
            12,
            vec![],
            vec![b.clone(), Roll::constant(2)],
        );
        let outer = Roll::new(
            Expression::add(Dice::basic(1, 4), Expression::mul(Dice::basic(2, 6), 2)),
            14,
            vec![],
            vec![a.clone(), inner],
        );

        let dice: Vec<_> = outer.child_dice().iter().map(|r| (**r).clone()).collect();
        assert_eq!(dice, vec![a, b]);
        assert_eq!(outer.children().len(), 2);
        assert!(Roll::constant(3).child_dice().is_empty());
    }

    #[test]
    fn test_sum_overflow() {
        assert_eq!(sum(&[Int::MAX, 1]), Err(RollError::Overflow));
        assert_eq!(sum(&[-1, 0, 1, 1]), Ok(1));
    }
}
