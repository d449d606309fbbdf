use super::ast::{Dice, Expression};
use crate::common::*;

pub trait AstVisitor {
    type Output;

    fn visit<T: ?Sized>(&mut self, node: &T) -> Self::Output
    where
        T: Accept<Self>,
    {
        node.accept(self)
    }

    fn visit_constant(&mut self, x: Int) -> Self::Output;

    fn visit_binary(&mut self, op: BinaryOperator, l: &Expression, r: &Expression)
        -> Self::Output;

    fn visit_dice(&mut self, dice: &Dice) -> Self::Output;
}

pub trait Accept<V: AstVisitor + ?Sized> {
    fn accept(&self, v: &mut V) -> V::Output;
}

impl<V: AstVisitor + ?Sized> Accept<V> for Expression {
    fn accept(&self, v: &mut V) -> V::Output {
        match self {
            Self::Constant(x) => v.visit_constant(*x),
            Self::Binary(op, l, r) => v.visit_binary(*op, l, r),
            Self::Dice(d) => v.visit_dice(d),
        }
    }
}

impl<V: AstVisitor + ?Sized> Accept<V> for Dice {
    fn accept(&self, v: &mut V) -> V::Output {
        v.visit_dice(self)
    }
}
