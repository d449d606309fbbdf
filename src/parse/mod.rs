pub mod ast;
mod error;
mod lexer;
mod parser;
pub mod visit;

pub use error::ParseError;
pub use lexer::{tokenize, Token};
pub use parser::Parser;

use crate::common::NonEmpty;

/// Parses a dice expression such as `4d6!` or `1+2d6*3`.
pub fn parse(s: &str) -> Result<ast::Expression, ParseError> {
    let tokens = tokenize(s)?;
    let tokens = NonEmpty::try_from_vec(tokens).map_err(|_| ParseError::EmptyExpression)?;
    let expr = Parser::new(tokens).parse()?;
    log::debug!("parsed {:?} as {}", s, expr);
    Ok(expr)
}
