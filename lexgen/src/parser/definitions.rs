use crate::parser::{MalformedLine, ParsedDefinition, ParsedDefinitions};
use nom::branch::alt;
use nom::bytes::complete::take_till1;
use nom::character::complete::{self, space0};
use nom::combinator::{all_consuming, eof, map, rest, value, verify};
use nom::sequence::{preceded, separated_pair};
use nom::{Finish, IResult};

pub(crate) fn full_definitions(input: &str) -> ParsedDefinitions<'_> {
    let mut entries = Vec::new();
    let mut malformed = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        if all_consuming(ignored_line)(raw).finish().is_ok() {
            continue;
        }
        match all_consuming(definition_line)(raw).finish() {
            Ok((_, (name, regex))) => entries.push(ParsedDefinition { name, regex, line }),
            Err(_) => malformed.push(MalformedLine {
                line,
                text: raw.trim(),
            }),
        }
    }

    ParsedDefinitions { entries, malformed }
}

/// A line producing nothing: only whitespace, or a `#` comment
fn ignored_line(input: &str) -> IResult<&str, ()> {
    value(
        (),
        preceded(space0, alt((preceded(complete::char('#'), rest), eof))),
    )(input)
}

/// One `NAME: REGEX` entry: the name is everything before the first colon, the
/// regex everything after it, both trimmed and non-blank
fn definition_line(input: &str) -> IResult<&str, (&str, &str)> {
    map(
        separated_pair(
            verify(take_till1(|c| c == ':'), |name: &str| {
                !name.trim().is_empty()
            }),
            complete::char(':'),
            verify(rest, |regex: &str| !regex.trim().is_empty()),
        ),
        |(name, regex): (&str, &str)| (name.trim(), regex.trim()),
    )(input)
}
