use crate::common::*;
use std::fmt;

/// A node of a dice expression. Trees are plain owned data and compare structurally.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expression {
    Constant(Int),
    Binary(BinaryOperator, Box<Expression>, Box<Expression>),
    Dice(Dice),
}

/// Anything that produces die rolls. Modifiers own the dice they modify, so a
/// modifier can only ever wrap another die-producing construct.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Dice {
    /// `NdS`
    Basic {
        count: Box<Expression>,
        sides: Box<Expression>,
    },
    /// `NdF`, faces -1, 0 and 1.
    Fate { count: Box<Expression> },
    /// `…!`
    Explode(Box<Dice>),
    /// `…adv`
    Advantage(Box<Dice>),
    /// `…dis`
    Disadvantage(Box<Dice>),
}

impl Expression {
    pub fn constant(value: Int) -> Self {
        Self::Constant(value)
    }

    pub fn binary(
        op: BinaryOperator,
        left: impl Into<Expression>,
        right: impl Into<Expression>,
    ) -> Self {
        Self::Binary(op, Box::new(left.into()), Box::new(right.into()))
    }

    pub fn add(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary(BinaryOperator::Add, left, right)
    }

    pub fn sub(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary(BinaryOperator::Sub, left, right)
    }

    pub fn mul(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary(BinaryOperator::Mul, left, right)
    }

    pub fn div(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary(BinaryOperator::Div, left, right)
    }

    pub fn rem(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary(BinaryOperator::Mod, left, right)
    }

    pub fn pow(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary(BinaryOperator::Pow, left, right)
    }

    pub fn is_dice(&self) -> bool {
        matches!(self, Self::Dice(_))
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(x) => fmt::Display::fmt(x, f),
            _ => write!(f, "({})", self),
        }
    }

    fn fmt_binary_side(
        &self,
        parent: BinaryOperator,
        right: bool,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let needs_parens = match self {
            Self::Binary(op, ..) => {
                op.precedence() < parent.precedence()
                    || (right && op.precedence() == parent.precedence())
            }
            _ => false,
        };
        if needs_parens {
            write!(f, "({})", self)
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}

impl Dice {
    pub fn basic(count: impl Into<Expression>, sides: impl Into<Expression>) -> Self {
        Self::Basic {
            count: Box::new(count.into()),
            sides: Box::new(sides.into()),
        }
    }

    pub fn fate(count: impl Into<Expression>) -> Self {
        Self::Fate {
            count: Box::new(count.into()),
        }
    }

    pub fn explode(self) -> Self {
        Self::Explode(Box::new(self))
    }

    pub fn advantage(self) -> Self {
        Self::Advantage(Box::new(self))
    }

    pub fn disadvantage(self) -> Self {
        Self::Disadvantage(Box::new(self))
    }

    /// The plain dice at the bottom of any stack of modifiers.
    pub fn innermost(&self) -> &Dice {
        match self {
            Self::Basic { .. } | Self::Fate { .. } => self,
            Self::Explode(of) | Self::Advantage(of) | Self::Disadvantage(of) => of.innermost(),
        }
    }

    pub fn count(&self) -> &Expression {
        match self.innermost() {
            Self::Basic { count, .. } | Self::Fate { count } => &**count,
            _ => unreachable!("innermost dice are never modifiers"),
        }
    }

    /// `None` for fate dice, whose faces are fixed.
    pub fn sides(&self) -> Option<&Expression> {
        match self.innermost() {
            Self::Basic { sides, .. } => Some(&**sides),
            _ => None,
        }
    }

    /// Rebuilds this stack of modifiers around new innermost operands.
    /// `sides` is ignored for fate dice.
    pub fn with_operands(&self, count: Expression, sides: Expression) -> Dice {
        match self {
            Self::Basic { .. } => Self::basic(count, sides),
            Self::Fate { .. } => Self::fate(count),
            Self::Explode(of) => of.with_operands(count, sides).explode(),
            Self::Advantage(of) => of.with_operands(count, sides).advantage(),
            Self::Disadvantage(of) => of.with_operands(count, sides).disadvantage(),
        }
    }
}

impl From<Int> for Expression {
    fn from(x: Int) -> Self {
        Self::Constant(x)
    }
}

impl From<Dice> for Expression {
    fn from(d: Dice) -> Self {
        Self::Dice(d)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(x) => fmt::Display::fmt(x, f),
            Self::Binary(op, l, r) => {
                l.fmt_binary_side(*op, false, f)?;
                write!(f, " {} ", op)?;
                r.fmt_binary_side(*op, true, f)
            }
            Self::Dice(d) => fmt::Display::fmt(d, f),
        }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { count, sides } => {
                count.fmt_operand(f)?;
                f.write_str("d")?;
                sides.fmt_operand(f)
            }
            Self::Fate { count } => {
                count.fmt_operand(f)?;
                f.write_str("dF")
            }
            Self::Explode(of) => write!(f, "{}!", of),
            Self::Advantage(of) => write!(f, "{}adv", of),
            Self::Disadvantage(of) => write!(f, "{}dis", of),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Expression::constant(1).to_string(), "1");
        assert_eq!(Expression::add(3, 3).to_string(), "3 + 3");
        assert_eq!(Expression::from(Dice::basic(4, 6)).to_string(), "4d6");
        assert_eq!(Expression::from(Dice::fate(4)).to_string(), "4dF");
        assert_eq!(
            Dice::basic(Dice::basic(1, 4), Dice::basic(1, 20))
                .explode()
                .to_string(),
            "(1d4)d(1d20)!"
        );
        assert_eq!(
            Dice::basic(2, 20).advantage().explode().to_string(),
            "2d20adv!"
        );
        assert_eq!(Dice::basic(1, 6).disadvantage().to_string(), "1d6dis");
        assert_eq!(
            Dice::basic(Expression::add(1, 1), 6).to_string(),
            "(1 + 1)d6"
        );
    }

    #[test]
    fn test_display_binary_parens() {
        assert_eq!(
            Expression::add(1, Expression::mul(Dice::basic(2, 6), 3)).to_string(),
            "1 + 2d6 * 3"
        );
        assert_eq!(
            Expression::mul(Expression::add(1, 2), 3).to_string(),
            "(1 + 2) * 3"
        );
        assert_eq!(
            Expression::sub(Expression::sub(1, 2), 3).to_string(),
            "1 - 2 - 3"
        );
        assert_eq!(
            Expression::sub(1, Expression::sub(2, 3)).to_string(),
            "1 - (2 - 3)"
        );
        assert_eq!(
            Expression::pow(Expression::pow(2, 3), 2).to_string(),
            "2 ^ 3 ^ 2"
        );
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Dice::basic(1, 2), Dice::basic(1, 2));
        assert_ne!(Dice::basic(1, 2), Dice::basic(2, 1));
        assert_ne!(Dice::basic(1, 2).explode(), Dice::basic(1, 2));
        assert_ne!(Dice::basic(1, 2).advantage(), Dice::basic(1, 2).disadvantage());
        assert_ne!(Expression::add(1, 2), Expression::sub(1, 2));
    }

    #[test]
    fn test_operands() {
        let d = Dice::basic(Dice::basic(1, 4), 20).advantage().explode();
        assert_eq!(d.count(), &Expression::from(Dice::basic(1, 4)));
        assert_eq!(d.sides(), Some(&Expression::constant(20)));
        assert_eq!(Dice::fate(3).explode().sides(), None);
        assert_eq!(
            d.with_operands(2.into(), 20.into()),
            Dice::basic(2, 20).advantage().explode()
        );
        assert_eq!(
            Dice::fate(3).explode().with_operands(5.into(), 9.into()),
            Dice::fate(5).explode()
        );
    }
}
