use crate::common::Int;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RollError {
    #[error("too many dice rolled")]
    TooManyRolls,
    #[error("cannot divide by zero")]
    ZeroDivision,
    #[error("cannot take modulus by zero")]
    ZeroModulo,
    #[error("dice must have at least one side, got {0}")]
    InvalidSides(Int),
    #[error("cannot roll a negative number of dice ({0})")]
    InvalidCount(Int),
    #[error("integer overflow")]
    Overflow,
}
