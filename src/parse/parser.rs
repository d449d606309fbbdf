use super::{ast::*, error::ParseError, lexer::Token};
use crate::common::*;
use std::iter::Peekable;

type PResult<T = Expression> = Result<T, ParseError>;

/// Recursive descent over an already lexed, non-empty token sequence.
///
/// Precedence, tightest first: parentheses, `d`, `dF`, the postfix die modifiers
/// (`!`, `adv`, `dis`), `^`, then `* / %`, then `+ -`. Every binary level is
/// left-associative, including `^`.
pub struct Parser {
    tokens: Peekable<std::vec::IntoIter<Token>>,
}

impl Parser {
    pub fn new(tokens: NonEmpty<Token>) -> Self {
        Self {
            tokens: tokens.into_vec().into_iter().peekable(),
        }
    }

    pub fn parse(mut self) -> PResult {
        let expr = self.parse_addition()?;
        if self.tokens.peek().is_some() {
            return Err(ParseError::LeftoverTokens);
        }
        Ok(expr)
    }

    fn advance(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    fn matches(&mut self, kind: Token) -> bool {
        self.tokens.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[Token]) -> bool {
        self.tokens
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    /// Checks that something follows the operator `op` that was just consumed.
    fn expect_operand(&mut self, op: Token) -> PResult<()> {
        match self.tokens.peek() {
            None | Some(Token::RightParen) => Err(ParseError::MissingTokenAfter(op.as_str())),
            Some(_) => Ok(()),
        }
    }

    fn parse_binary_level(
        &mut self,
        ops: &[Token],
        mut next: impl FnMut(&mut Self) -> PResult,
    ) -> PResult {
        let mut lhs = next(self)?;

        while self.matches_any(ops) {
            let token = self.advance().ok_or(ParseError::LeftoverTokens)?;
            self.expect_operand(token)?;
            let rhs = next(self)?;

            let op = token.as_binary_op().ok_or(ParseError::LeftoverTokens)?;
            lhs = Expression::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_addition(&mut self) -> PResult {
        self.parse_binary_level(Token::ADDITION_OPS, Self::parse_multiplication)
    }

    fn parse_multiplication(&mut self) -> PResult {
        self.parse_binary_level(Token::MULTIPLICATION_OPS, Self::parse_power)
    }

    fn parse_power(&mut self) -> PResult {
        self.parse_binary_level(&[Token::Caret], Self::parse_postfix)
    }

    fn parse_postfix(&mut self) -> PResult {
        let mut node = self.parse_dice()?;

        while self.matches_any(Token::POSTFIX_DICE_OPS) {
            let op = self.advance().ok_or(ParseError::LeftoverTokens)?;
            let dice = match node {
                Expression::Dice(d) => d,
                _ => return Err(ParseError::NotFollowingDice(op.as_str())),
            };

            node = Expression::Dice(match op {
                Token::Explode => dice.explode(),
                Token::Advantage => dice.advantage(),
                Token::Disadvantage => dice.disadvantage(),
                _ => unreachable!("matched against POSTFIX_DICE_OPS"),
            });
        }

        Ok(node)
    }

    fn parse_dice(&mut self) -> PResult {
        let mut lhs = self.parse_atom()?;

        while self.matches(Token::Die) {
            self.advance();
            self.expect_operand(Token::Die)?;
            let rhs = self.parse_atom()?;
            lhs = Dice::basic(lhs, rhs).into();
        }

        while self.matches(Token::FateDie) {
            self.advance();
            lhs = Dice::fate(lhs).into();
        }

        Ok(lhs)
    }

    fn parse_atom(&mut self) -> PResult {
        match self.advance() {
            Some(Token::Number(x)) => Ok(Expression::Constant(x)),
            Some(Token::LeftParen) => self.parse_group(),
            Some(Token::RightParen) => Err(ParseError::LeftoverTokens),
            Some(op) => Err(ParseError::MissingTokenBefore(op.as_str())),
            None => Err(ParseError::EmptyExpression),
        }
    }

    // An unclosed group runs to the end of input.
    fn parse_group(&mut self) -> PResult {
        if matches!(self.tokens.peek(), None | Some(Token::RightParen)) {
            return Err(ParseError::EmptyExpression);
        }

        let inner = self.parse_addition()?;
        match self.advance() {
            Some(Token::RightParen) | None => Ok(inner),
            Some(_) => Err(ParseError::LeftoverTokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn check(s: &str, expected: impl Into<Expression>) {
        assert_eq!(parse(s).unwrap(), expected.into());
    }

    fn check_err(s: &str, expected: &str) {
        assert_eq!(parse(s).unwrap_err().to_string(), expected);
    }

    #[test]
    fn test_parse_simple() {
        check("1", 1);
        check("1+2", Expression::add(1, 2));
        check("1-2", Expression::sub(1, 2));
        check("1*2", Expression::mul(1, 2));
        check("1/2", Expression::div(1, 2));
        check("1%2", Expression::rem(1, 2));
        check("1^2", Expression::pow(1, 2));
        check("1d2", Dice::basic(1, 2));
        check("1dF", Dice::fate(1));
        check("1d2!", Dice::basic(1, 2).explode());
        check("1d2adv", Dice::basic(1, 2).advantage());
        check("1d2dis", Dice::basic(1, 2).disadvantage());
    }

    #[test]
    fn test_parse_complex() {
        check(
            "1+2d6*3",
            Expression::add(1, Expression::mul(Dice::basic(2, 6), 3)),
        );
        check(
            "(1d4)d(1d20)!",
            Dice::basic(Dice::basic(1, 4), Dice::basic(1, 20)).explode(),
        );
        check(
            "4d6!!!!",
            Dice::basic(4, 6).explode().explode().explode().explode(),
        );
        check("2d20adv!", Dice::basic(2, 20).advantage().explode());
        check("(2d6)!", Dice::basic(2, 6).explode());
        check("2d6dF", Dice::fate(Dice::basic(2, 6)));
        check("4dF!", Dice::fate(4).explode());
    }

    #[test]
    fn test_parse_associativity() {
        check("1+2+3", Expression::add(Expression::add(1, 2), 3));
        check("1-2+3", Expression::add(Expression::sub(1, 2), 3));
        check("8/4*2", Expression::mul(Expression::div(8, 4), 2));
        check("2^3^2", Expression::pow(Expression::pow(2, 3), 2));
        check("2d3d4", Dice::basic(Dice::basic(2, 3), 4));
        check("2*(3+4)", Expression::mul(2, Expression::add(3, 4)));
        check("2^1d6!", Expression::pow(2, Dice::basic(1, 6).explode()));
    }

    #[test]
    fn test_parse_whitespace_and_case() {
        check(" 2 D 20 ADV ", Dice::basic(2, 20).advantage());
        check("( ( 3 ) )", 3);
        check("(1 + 2", Expression::add(1, 2));
    }

    #[test]
    fn test_parse_errors() {
        check_err("d4", "Expected token before d, was missing");
        check_err("4d", "Expected token after d, was missing");
        check_err("asdfa", "Encountered unexpected token asdfa");
        check_err("1!", "The ! operator can only be used following a die roll");
        check_err("1adv", "The adv operator can only be used following a die roll");
        check_err("1dis", "The dis operator can only be used following a die roll");
        check_err(";", "Encountered unexpected character ;");
        check_err("", "Cannot parse an empty expression");
        check_err("1 1", "Leftover tokens were present after parsing");
    }

    #[test]
    fn test_parse_edge_errors() {
        check_err("   ", "Cannot parse an empty expression");
        check_err("()", "Cannot parse an empty expression");
        check_err("1+", "Expected token after +, was missing");
        check_err("(1+)", "Expected token after +, was missing");
        check_err("-1", "Expected token before -, was missing");
        check_err("!", "Expected token before !, was missing");
        check_err("(1d6+1)!", "The ! operator can only be used following a die roll");
        check_err("1)", "Leftover tokens were present after parsing");
        check_err(")1", "Leftover tokens were present after parsing");
        check_err("(1 1)", "Leftover tokens were present after parsing");
        check_err("1dF d6", "Leftover tokens were present after parsing");
        // `dFd` is one run of letters
        check_err("1dFd6", "Encountered unexpected token dfd");
    }

    #[test]
    fn test_display_reparses() {
        for s in ["1 + 2d6 * 3", "(1d4)d(1d20)!", "(1 + 2) * 3", "1 - (2 - 3)", "4dF!", "2d20adv"] {
            let expr = parse(s).unwrap();
            assert_eq!(expr.to_string(), s);
            assert_eq!(parse(&expr.to_string()).unwrap(), expr);
        }
    }
}
