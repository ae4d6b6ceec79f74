use std::fmt;
use std::str::FromStr;

use combine::error::{StreamError, StringStreamError};
use combine::parser::char::digit;
use combine::stream::StreamErrorFor;
use combine::{eof, many1, satisfy, token, ParseError, Parser, Stream};

/// Run a parser over an entire line value. Trailing input is an error.
pub(crate) fn parse_all<'a, P>(parser: P, input: &'a str) -> Result<P::Output, StringStreamError>
where
    P: Parser<&'a str>,
{
    (parser, eof())
        .map(|(v, _)| v)
        .parse(input)
        .map(|(v, _)| v)
}

/// Unsigned decimal number.
///
/// Only ASCII digits are consumed, overflow of `T` is a parse error.
pub(crate) fn number<Input, T>() -> impl Parser<Input, Output = T>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    T: FromStr,
    T::Err: fmt::Display,
{
    many1::<String, _, _>(digit())
        .and_then(|s| s.parse::<T>().map_err(StreamErrorFor::<Input>::message_format))
}

/// Not SP
pub(crate) fn not_sp<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    many1(satisfy(|c| c != ' '))
}

/// Not SP and not `/`. Used for the address part of `c=`.
pub(crate) fn not_sp_slash<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    many1(satisfy(|c| c != ' ' && c != '/'))
}

/// A single SP between fields.
pub(crate) fn sp<Input>() -> impl Parser<Input, Output = char>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    token(' ')
}
