//! Line parsers for the FASTA format.

use nom::bytes::complete::tag;
use nom::bytes::complete::take_while1;
use nom::character::complete::not_line_ending;
use nom::character::complete::space0;
use nom::combinator::all_consuming;
use nom::sequence::preceded;
use nom::sequence::terminated;
use nom::IResult;
use nom::Parser;

/// Parse a header line into an identifier and an optional description.
pub fn header(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, id) = preceded(tag(">"), take_while1(|c: char| !c.is_ascii_whitespace()))
        .parse(input)?;
    let (input, description) = all_consuming(not_line_ending).parse(input)?;

    let description = description.trim();
    if description.is_empty() {
        Ok((input, (id, None)))
    } else {
        Ok((input, (id, Some(description))))
    }
}

/// Parse a sequence line, allowing trailing whitespace.
pub fn sequence_line(input: &str) -> IResult<&str, &str> {
    all_consuming(terminated(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '-' || c == '*'),
        space0,
    ))
    .parse(input)
}
