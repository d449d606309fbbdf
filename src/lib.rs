//! Parsing and rolling of dice expressions such as `4d6!`, `2d20adv` or `1+2d6*3`.
//!
//! ```
//! let roll = dice_expr::roll("2d6 + 3").unwrap();
//! assert!((5..=15).contains(&roll.value()));
//! ```

mod common;
mod error;
pub mod parse;
pub mod roll;

pub use common::{BinaryOperator, Int};
pub use error::Error;
pub use parse::{
    ast::{Dice, Expression},
    parse, ParseError,
};
pub use roll::{Roll, RollContext, RollError};

/// Parses and evaluates `s` in one step.
pub fn roll(s: &str) -> Result<Roll, Error> {
    let expr = parse(s)?;
    Ok(expr.evaluate()?)
}
