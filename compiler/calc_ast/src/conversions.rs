//! Conversion of literal text into numbers, one grammar per literal format.

use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit0, digit1, hex_digit1};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::sequence::{pair, preceded, separated_pair, tuple};
use nom::IResult;

use crate::ast::LiteralKind;

/// Literal text that does not match its format
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid integer '{0}'")]
    InvalidInteger(String),
    #[error("invalid decimal '{0}'")]
    InvalidDecimal(String),
    #[error("invalid hexadecimal number '{0}'")]
    InvalidHexadecimal(String),
    #[error("invalid binary number '{0}'")]
    InvalidBinary(String),
    #[error("invalid exponential number '{0}'")]
    InvalidExponential(String),
}

impl ConversionError {
    fn new(kind: LiteralKind, text: &str) -> Self {
        let text = text.to_string();
        match kind {
            LiteralKind::Int => ConversionError::InvalidInteger(text),
            LiteralKind::Dec => ConversionError::InvalidDecimal(text),
            LiteralKind::Hex => ConversionError::InvalidHexadecimal(text),
            LiteralKind::Bin => ConversionError::InvalidBinary(text),
            LiteralKind::Exp => ConversionError::InvalidExponential(text),
        }
    }
}

fn sign(input: &str) -> IResult<&str, f64> {
    map(opt(char('-')), |minus| if minus.is_some() { -1.0 } else { 1.0 })(input)
}

fn integer(input: &str) -> IResult<&str, f64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<f64>()
    })(input)
}

fn decimal(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((opt(char('-')), digit1, char('.'), digit0))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn hexadecimal(input: &str) -> IResult<&str, f64> {
    map(
        pair(
            sign,
            map_res(preceded(tag("0x"), hex_digit1), |digits: &str| {
                u64::from_str_radix(digits, 16)
            }),
        ),
        |(sign, value)| sign * value as f64,
    )(input)
}

fn binary(input: &str) -> IResult<&str, f64> {
    map(
        pair(
            sign,
            map_res(
                preceded(tag("0b"), take_while1(|c: char| c == '0' || c == '1')),
                |digits: &str| u64::from_str_radix(digits, 2),
            ),
        ),
        |(sign, value)| sign * value as f64,
    )(input)
}

/// `base^exponent`, where the base may carry a sign and a fraction
fn exponential(input: &str) -> IResult<&str, f64> {
    let base = map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit0)),
        ))),
        |s: &str| s.parse::<f64>(),
    );
    let exponent = map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<f64>()
    });
    map(separated_pair(base, char('^'), exponent), |(base, exponent)| {
        base.powf(exponent)
    })(input)
}

/// Convert the text of a literal of the given format into its value.
///
/// The whole text must match; trailing characters are an error.
pub fn convert_literal(kind: LiteralKind, text: &str) -> Result<f64, ConversionError> {
    let parser: fn(&str) -> IResult<&str, f64> = match kind {
        LiteralKind::Int => integer,
        LiteralKind::Dec => decimal,
        LiteralKind::Hex => hexadecimal,
        LiteralKind::Bin => binary,
        LiteralKind::Exp => exponential,
    };
    all_consuming(parser)(text)
        .map(|(_, value)| value)
        .map_err(|_| ConversionError::new(kind, text))
}
