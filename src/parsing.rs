//! # Parsing Utilities
//!
//! Combinators shared by the field converters.
//!
//! By the time a field is parsed the sentence has already been split on
//! commas, so a field parser has to account for every character of its
//! field: `1.5x` is a malformed number, not `1.5` followed by noise.

use nom::{
    Err, Input, Mode, OutputMode, PResult, Parser,
    error::{ErrorKind, ParseError},
};

/// Runs `f` and fails with [`ErrorKind::Eof`] unless it consumed all input.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::parsing::whole_field;
/// use nom::{IResult, Parser, character::complete::u8};
///
/// let result: IResult<_, _> = whole_field(u8).parse("42");
/// assert_eq!(result, Ok(("", 42)));
///
/// // Trailing characters are not part of the number
/// let result: IResult<_, _> = whole_field(u8).parse("42a");
/// assert!(result.is_err());
/// ```
pub fn whole_field<I, E: ParseError<I>, F>(
    f: F,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    WholeField { f }
}

/// Parses a complete field with `f`, returning `None` on any mismatch.
///
/// This is the bridge between nom parsers and the `Option`-returning field
/// converters.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::parsing::parse_field;
/// use nom::number::complete::float;
///
/// assert_eq!(parse_field(float, "8.23"), Some(8.23));
/// assert_eq!(parse_field(float, "8.23M"), None);
/// ```
pub fn parse_field<'a, O, F>(f: F, field: &'a str) -> Option<O>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    whole_field(f).parse(field).ok().map(|(_, output)| output)
}

struct WholeField<F> {
    f: F,
}

impl<I, F> Parser<I> for WholeField<F>
where
    I: Input,
    F: Parser<I>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = <F as Parser<I>>::Error;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| {
                <F as Parser<I>>::Error::from_error_kind(i, ErrorKind::Eof)
            })));
        }

        Ok((i, o))
    }
}
