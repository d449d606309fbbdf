use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    #[error("Cannot parse an empty expression")]
    EmptyExpression,
    #[error("Expected token before {0}, was missing")]
    MissingTokenBefore(&'static str),
    #[error("Expected token after {0}, was missing")]
    MissingTokenAfter(&'static str),
    #[error("Encountered unexpected token {0}")]
    UnexpectedToken(String),
    #[error("Encountered unexpected character {0}")]
    UnexpectedCharacter(char),
    #[error("The {0} operator can only be used following a die roll")]
    NotFollowingDice(&'static str),
    #[error("Leftover tokens were present after parsing")]
    LeftoverTokens,
    #[error("Number literal {0} is out of range")]
    InvalidNumber(String),
}
