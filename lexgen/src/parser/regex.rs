use crate::regex::RegexAst;
use nom::branch::alt;
use nom::character::complete::{self, anychar, one_of, satisfy};
use nom::combinator::{map, map_opt, opt};
use nom::multi::{many1, separated_list1};
use nom::sequence::{delimited, preceded, separated_pair};
use nom::{IResult, Parser};

pub(crate) fn full_regex(input: &str) -> IResult<&str, RegexAst> {
    expression(input)
}

fn expression(input: &str) -> IResult<&str, RegexAst> {
    map(
        separated_list1(complete::char('|'), term),
        fold_with(RegexAst::Alt),
    )(input)
}

fn term(input: &str) -> IResult<&str, RegexAst> {
    map(many1(factor), fold_with(RegexAst::Concat))(input)
}

fn factor(input: &str) -> IResult<&str, RegexAst> {
    map(atom.and(opt(one_of("*+?"))), apply_postfix)(input)
}

fn atom(input: &str) -> IResult<&str, RegexAst> {
    alt((parenthesized, class, escaped_char, normal_char))(input)
}

fn parenthesized(input: &str) -> IResult<&str, RegexAst> {
    delimited(complete::char('('), expression, complete::char(')'))(input)
}

/// A bracket class is desugared right here: every item expands to its characters
/// and the whole class becomes a left-folded alternation of symbols. A class whose
/// items expand to nothing (only reversed ranges) is rejected.
fn class(input: &str) -> IResult<&str, RegexAst> {
    map_opt(
        delimited(
            complete::char('['),
            many1(class_item),
            complete::char(']'),
        ),
        |items| {
            let symbols: Vec<RegexAst> = items
                .into_iter()
                .flatten()
                .map(RegexAst::Symbol)
                .collect();
            (!symbols.is_empty()).then(|| fold_with(RegexAst::Alt)(symbols))
        },
    )(input)
}

fn class_item(input: &str) -> IResult<&str, Vec<char>> {
    alt((
        map(
            separated_pair(class_char, complete::char('-'), class_char),
            |(lo, hi)| (lo..=hi).collect(),
        ),
        map(class_char, |c| vec![c]),
    ))(input)
}

fn class_char(input: &str) -> IResult<&str, char> {
    satisfy(|c| !is_reserved_char(c))(input)
}

fn escaped_char(input: &str) -> IResult<&str, RegexAst> {
    map(preceded(complete::char('\\'), anychar), RegexAst::Symbol)(input)
}

fn normal_char(input: &str) -> IResult<&str, RegexAst> {
    map(satisfy(|c| !is_reserved_char(c)), RegexAst::Symbol)(input)
}

fn apply_postfix((atom, postfix): (RegexAst, Option<char>)) -> RegexAst {
    match postfix {
        Some('*') => RegexAst::Star(Box::new(atom)),
        Some('+') => RegexAst::Plus(Box::new(atom)),
        Some('?') => RegexAst::Opt(Box::new(atom)),
        None => atom,
        _ => unreachable!("postfix is one of *, + or ? when present"),
    }
}

/// Left-folds two or more nodes with the given binary constructor; a single node is
/// passed through untouched.
fn fold_with(
    f: impl Fn(Box<RegexAst>, Box<RegexAst>) -> RegexAst,
) -> impl Fn(Vec<RegexAst>) -> RegexAst {
    move |mut items| {
        let first = items.remove(0);
        items
            .into_iter()
            .fold(first, |acc, item| f(Box::new(acc), Box::new(item)))
    }
}

fn is_reserved_char(c: char) -> bool {
    ['|', '*', '+', '?', '(', ')', '[', ']', '\\'].contains(&c)
}
