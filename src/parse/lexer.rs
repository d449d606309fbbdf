use super::error::ParseError;
use crate::common::*;
use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
enum RawToken {
    #[regex(r"[0-9]+")]
    Integer,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,

    // Keywords are matched as a whole run of letters so that e.g. `dfx` is
    // rejected instead of being split into `df` and `x`.
    #[regex(r"\p{L}+")]
    Word,

    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    #[error]
    Error,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Token {
    Number(Int),
    LeftParen,
    RightParen,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Die,
    FateDie,
    Explode,
    Advantage,
    Disadvantage,
}

impl Token {
    pub const ADDITION_OPS: &'static [Self] = &[Self::Plus, Self::Minus];

    pub const MULTIPLICATION_OPS: &'static [Self] = &[Self::Star, Self::Slash, Self::Percent];

    pub const POSTFIX_DICE_OPS: &'static [Self] =
        &[Self::Explode, Self::Advantage, Self::Disadvantage];

    /// Canonical text of an operator or grouping token, as used in error messages.
    ///
    /// Numbers have no fixed text and yield a `<number>` placeholder; the parser
    /// only ever reports operators. Use `Display` to render a number.
    pub fn as_str(&self) -> &'static str {
        use Token::*;

        match self {
            Number(_) => "<number>",
            LeftParen => "(",
            RightParen => ")",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Caret => "^",
            Die => "d",
            FateDie => "dF",
            Explode => "!",
            Advantage => "adv",
            Disadvantage => "dis",
        }
    }

    pub fn as_binary_op(&self) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        Some(match self {
            Self::Plus => Add,
            Self::Minus => Sub,
            Self::Star => Mul,
            Self::Slash => Div,
            Self::Percent => Mod,
            Self::Caret => Pow,
            _ => return None,
        })
    }

    fn from_word(word: &str) -> Result<Self, ParseError> {
        let word = word.to_lowercase();
        Ok(match word.as_str() {
            "d" => Self::Die,
            "df" => Self::FateDie,
            "adv" => Self::Advantage,
            "dis" => Self::Disadvantage,
            _ => return Err(ParseError::UnexpectedToken(word)),
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => fmt::Display::fmt(x, f),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Splits `s` into tokens, left to right, failing on the first thing that is not
/// part of the dice language. Empty input yields an empty sequence.
pub fn tokenize(s: &str) -> Result<Vec<Token>, ParseError> {
    let mut lex = RawToken::lexer(s);
    let mut tokens = Vec::new();

    while let Some(raw) = lex.next() {
        let slice = lex.slice();
        let token = match raw {
            RawToken::Integer => slice
                .parse()
                .map(Token::Number)
                .map_err(|_| ParseError::InvalidNumber(slice.to_string()))?,
            RawToken::LeftParen => Token::LeftParen,
            RawToken::RightParen => Token::RightParen,
            RawToken::Plus => Token::Plus,
            RawToken::Minus => Token::Minus,
            RawToken::Star => Token::Star,
            RawToken::Slash => Token::Slash,
            RawToken::Percent => Token::Percent,
            RawToken::Caret => Token::Caret,
            RawToken::Bang => Token::Explode,
            RawToken::Word => Token::from_word(slice)?,
            RawToken::Error => {
                let c = s
                    .get(lex.span().start..)
                    .and_then(|rest| rest.chars().next())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ParseError::UnexpectedCharacter(c));
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}
