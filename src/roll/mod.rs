mod ctx;
mod error;
mod roller;
mod stringify;
mod tree;

use crate::parse::ast::Expression;

type RResult<T> = Result<T, RollError>;

pub use ctx::{DefaultRoller, RollContext, DEFAULT_MAX_ROLLS};
pub use error::RollError;
pub use roller::Roller;
pub use stringify::{MarkdownStringifier, SimpleStringifier, Stringify};
pub use tree::Roll;

pub fn eval<R: Roller>(expr: &Expression, roller: R, max_rolls: Option<usize>) -> RResult<Roll> {
    let mut ctx = RollContext::new(max_rolls, roller);
    ctx.eval(expr)
}

impl Expression {
    /// Evaluates this expression with the thread-local random number generator and
    /// the default roll budget.
    pub fn evaluate(&self) -> RResult<Roll> {
        RollContext::default().eval(self)
    }
}
