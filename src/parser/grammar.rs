//! Coordinate token parser using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::layout::Point;
use crate::parser::lexer::{lex, Token};

/// Parse a coordinate-pair token such as `(2103, 167)` into a point
///
/// Accepted forms are a parenthesized tuple, a bracketed list, or a bare
/// `x, y` pair. Either component may be signed or fractional, and a single
/// trailing comma is allowed.
pub fn parse_coordinate(input: &str) -> Result<Point, Vec<ParseError>> {
    let len = input.len();

    let mut tokens = Vec::new();
    for item in lex(input) {
        match item {
            Ok((tok, span)) => tokens.push((tok, SimpleSpan::from(span))),
            Err(span) => {
                let found = &input[span.clone()];
                return Err(vec![ParseError::Syntax {
                    message: format!("Unexpected character '{}'", found),
                    span,
                    expected: vec!["number".to_string()],
                }]);
            }
        }
    }

    // Turn the token list into a stream that chumsky can use
    let token_stream = Stream::from_iter(tokens.into_iter())
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    coordinate_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn coordinate_parser<'a, I>() -> impl Parser<'a, I, Point, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    let signed = choice((
        just(Token::Minus).to(-1.0),
        just(Token::Plus).to(1.0),
    ))
    .or_not()
    .then(number)
    .map(|(sign, n): (Option<f64>, f64)| sign.unwrap_or(1.0) * n);

    let pair = signed
        .clone()
        .then_ignore(just(Token::Comma))
        .then(signed)
        .then_ignore(just(Token::Comma).or_not());

    choice((
        pair.clone()
            .delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
        pair.clone()
            .delimited_by(just(Token::BracketOpen), just(Token::BracketClose)),
        pair,
    ))
    .map(|(x, y)| Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tuple() {
        assert_eq!(parse_coordinate("(2103, 167)").unwrap(), Point::new(2103.0, 167.0));
    }

    #[test]
    fn test_parse_list_and_bare_pair() {
        assert_eq!(parse_coordinate("[10, 20]").unwrap(), Point::new(10.0, 20.0));
        assert_eq!(parse_coordinate("10,20").unwrap(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_parse_signed_and_fractional() {
        assert_eq!(parse_coordinate("(-5, 2.5)").unwrap(), Point::new(-5.0, 2.5));
        assert_eq!(parse_coordinate("(+5, -0)").unwrap(), Point::new(5.0, 0.0));
    }

    #[test]
    fn test_parse_trailing_comma() {
        assert_eq!(parse_coordinate("(1, 2,)").unwrap(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_coordinate("").is_err());
        assert!(parse_coordinate("(1)").is_err());
        assert!(parse_coordinate("(1, 2, 3)").is_err());
        assert!(parse_coordinate("(1, 2").is_err());
        assert!(parse_coordinate("n/a").is_err());
    }

    #[test]
    fn test_invalid_character_error_span() {
        let errors = parse_coordinate("(1, y)").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span(), &(4..5));
    }
}
