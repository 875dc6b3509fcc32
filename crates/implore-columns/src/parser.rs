//! Column selector grammar parser using nom
//!
//! Grammar:
//! ```text
//! expr      := xor_expr ('|' xor_expr)*
//! xor_expr  := and_expr ('^' and_expr)*
//! and_expr  := minus_expr ('&' minus_expr)*
//! minus_expr:= unary ('-' unary)*
//! unary     := ('-' | '!' | '~') unary | atom
//! atom      := '(' expr ')' | call | string | ident
//! call      := ident '(' (arg (',' arg)*)? ')'
//! arg       := integer | expr
//! ```
//!
//! A bare string or identifier selects that column. Functions:
//! `everything()`, `nothing()`, `last(n?)`, `column(s)`,
//! `starts_with(s, ...)`, `ends_with(s, ...)`, `contains(s, ...)`,
//! `matches(re, ...)`, `one_of(s, ...)`, `any_of(s, ...)`, `all_of(s, ...)`,
//! `int_range(a, b)`, `str_range(s, t)`, `num_range(prefix, a, b, width?)`,
//! `where(type)` and `reverse(expr)`.

use crate::ast::{IntRange, Selector};
use crate::builders;
use crate::content::ColumnType;
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{map, map_res, recognize},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded},
    IResult,
};
use std::str::FromStr;
use thiserror::Error;

/// Parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
}

/// Parse a column selector from a string
///
/// An empty input selects everything.
pub fn parse_selector(input: &str) -> Result<Selector, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Selector::Everything);
    }

    match expr(input) {
        Ok(("", raw)) => lower(raw),
        Ok((remaining, _)) => Err(ParseError::Parse(format!(
            "Unexpected characters at end: '{}'",
            remaining
        ))),
        Err(e) => Err(ParseError::Parse(format!("{:?}", e))),
    }
}

impl FromStr for Selector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector(s)
    }
}

/// Syntax tree before function names and arguments are checked
#[derive(Debug, Clone, PartialEq)]
enum Raw {
    Str(String),
    Ident(String),
    Int(usize),
    Call(String, Vec<Raw>),
    Complement(Box<Raw>),
    Binary(BinaryOp, Box<Raw>, Box<Raw>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Or,
    Xor,
    And,
    Minus,
}

/// Parse whitespace
fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn fold_binary(first: Raw, rest: Vec<Raw>, op: BinaryOp) -> Raw {
    rest.into_iter()
        .fold(first, |acc, e| Raw::Binary(op, Box::new(acc), Box::new(e)))
}

/// Parse an expression (entry point)
fn expr(input: &str) -> IResult<&str, Raw> {
    or_expr(input)
}

/// Parse OR expressions
fn or_expr(input: &str) -> IResult<&str, Raw> {
    let (input, first) = xor_expr(input)?;
    let (input, rest) = many0(preceded(ws(char('|')), xor_expr))(input)?;
    Ok((input, fold_binary(first, rest, BinaryOp::Or)))
}

/// Parse XOR expressions
fn xor_expr(input: &str) -> IResult<&str, Raw> {
    let (input, first) = and_expr(input)?;
    let (input, rest) = many0(preceded(ws(char('^')), and_expr))(input)?;
    Ok((input, fold_binary(first, rest, BinaryOp::Xor)))
}

/// Parse AND expressions
fn and_expr(input: &str) -> IResult<&str, Raw> {
    let (input, first) = minus_expr(input)?;
    let (input, rest) = many0(preceded(ws(char('&')), minus_expr))(input)?;
    Ok((input, fold_binary(first, rest, BinaryOp::And)))
}

/// Parse difference expressions
fn minus_expr(input: &str) -> IResult<&str, Raw> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(preceded(ws(char('-')), unary))(input)?;
    Ok((input, fold_binary(first, rest, BinaryOp::Minus)))
}

/// Parse complement expressions
fn unary(input: &str) -> IResult<&str, Raw> {
    alt((
        map(
            preceded(ws(alt((char('-'), char('!'), char('~')))), unary),
            |e| Raw::Complement(Box::new(e)),
        ),
        atom,
    ))(input)
}

/// Parse atomic expressions
fn atom(input: &str) -> IResult<&str, Raw> {
    ws(alt((
        // Parenthesized expression
        delimited(char('('), expr, char(')')),
        // Function call (must come before bare identifiers)
        call,
        map(string_literal, |s| Raw::Str(s.to_string())),
        map(identifier, |s| Raw::Ident(s.to_string())),
    )))(input)
}

/// Parse a function call
fn call(input: &str) -> IResult<&str, Raw> {
    let (input, name) = identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, args) = delimited(
        char('('),
        ws(separated_list0(ws(char(',')), argument)),
        char(')'),
    )(input)?;

    Ok((input, Raw::Call(name.to_string(), args)))
}

/// Parse a call argument
fn argument(input: &str) -> IResult<&str, Raw> {
    alt((ws(map(integer, Raw::Int)), expr))(input)
}

/// Parse an unsigned integer
fn integer(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

/// Parse an identifier (letter or underscore, then alphanumerics, `_` or `.`)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '.'),
    ))(input)
}

/// Parse a string literal
fn string_literal(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
    ))(input)
}

/// Turn a raw tree into a selector, checking every call
fn lower(raw: Raw) -> Result<Selector, ParseError> {
    match raw {
        Raw::Str(name) | Raw::Ident(name) => Ok(Selector::Column(name)),
        Raw::Int(n) => Err(ParseError::InvalidExpression(format!(
            "bare number {} is not a selector",
            n
        ))),
        Raw::Complement(inner) => Ok(lower(*inner)?.complement()),
        Raw::Binary(op, left, right) => {
            let left = lower(*left)?;
            let right = lower(*right)?;
            Ok(match op {
                BinaryOp::Or => left.or(right),
                BinaryOp::Xor => left.xor(right),
                BinaryOp::And => left.and(right),
                BinaryOp::Minus => left.minus(right),
            })
        }
        Raw::Call(name, args) => lower_call(&name, args),
    }
}

fn lower_call(name: &str, args: Vec<Raw>) -> Result<Selector, ParseError> {
    match name {
        "everything" => {
            expect_arity(name, &args, 0)?;
            Ok(builders::everything())
        }
        "nothing" => {
            expect_arity(name, &args, 0)?;
            Ok(builders::nothing())
        }
        "last" => match args.as_slice() {
            [] => Ok(builders::last()),
            [offset] => Ok(builders::nth_last(int_arg(name, offset)?)),
            _ => Err(arity_error(name, "0 or 1", args.len())),
        },
        "column" => {
            expect_arity(name, &args, 1)?;
            Ok(builders::column(text_arg(name, &args[0])?))
        }
        "starts_with" => Ok(builders::starts_with_any(text_args(name, &args)?)),
        "ends_with" => Ok(builders::ends_with_any(text_args(name, &args)?)),
        "contains" => Ok(builders::contains_any(text_args(name, &args)?)),
        "matches" => Ok(builders::matches_any(text_args(name, &args)?)),
        "one_of" | "any_of" => Ok(builders::one_of(text_args(name, &args)?)),
        "all_of" => Ok(builders::all_of(text_args(name, &args)?)),
        "int_range" => {
            expect_arity(name, &args, 2)?;
            Ok(builders::int_range(
                int_arg(name, &args[0])?,
                int_arg(name, &args[1])?,
            ))
        }
        "str_range" => {
            expect_arity(name, &args, 2)?;
            Ok(builders::str_range(
                text_arg(name, &args[0])?,
                text_arg(name, &args[1])?,
            ))
        }
        "num_range" => {
            let width = match args.len() {
                3 => 0,
                4 => int_arg(name, &args[3])?,
                n => return Err(arity_error(name, "3 or 4", n)),
            };
            Ok(builders::num_range(
                text_arg(name, &args[0])?,
                IntRange::new(int_arg(name, &args[1])?, int_arg(name, &args[2])?),
                width,
            ))
        }
        "where" => {
            expect_arity(name, &args, 1)?;
            let ty = text_arg(name, &args[0])?;
            if ty == "numeric" {
                return Ok(builders::where_numeric());
            }
            ColumnType::from_name(&ty)
                .map(builders::where_type)
                .ok_or_else(|| {
                    ParseError::InvalidArguments(format!("where: unknown column type '{}'", ty))
                })
        }
        "reverse" | "reversed" => {
            let mut args = args;
            if args.len() != 1 {
                return Err(arity_error(name, "1", args.len()));
            }
            Ok(lower(args.remove(0))?.reversed())
        }
        _ => Err(ParseError::UnknownFunction(name.to_string())),
    }
}

fn arity_error(name: &str, expected: &str, actual: usize) -> ParseError {
    ParseError::InvalidArguments(format!(
        "{} takes {} arguments, got {}",
        name, expected, actual
    ))
}

fn expect_arity(name: &str, args: &[Raw], expected: usize) -> Result<(), ParseError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(arity_error(name, &expected.to_string(), args.len()))
    }
}

fn int_arg(name: &str, arg: &Raw) -> Result<usize, ParseError> {
    match arg {
        Raw::Int(n) => Ok(*n),
        _ => Err(ParseError::InvalidArguments(format!(
            "{} expects an integer argument",
            name
        ))),
    }
}

fn text_arg(name: &str, arg: &Raw) -> Result<String, ParseError> {
    match arg {
        Raw::Str(s) | Raw::Ident(s) => Ok(s.clone()),
        _ => Err(ParseError::InvalidArguments(format!(
            "{} expects a name argument",
            name
        ))),
    }
}

fn text_args(name: &str, args: &[Raw]) -> Result<Vec<String>, ParseError> {
    if args.is_empty() {
        return Err(arity_error(name, "at least 1", 0));
    }
    args.iter().map(|arg| text_arg(name, arg)).collect()
}
