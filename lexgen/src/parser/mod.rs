//! # lexgen parser
//! Parsers for the two text formats the generator consumes: regular expressions and
//! the pattern definitions file.
//!
//! ## Regular expressions
//! The grammar, lowest precedence first:
//!
//! ```text
//! expression := term ('|' term)*
//! term       := factor+                    (concatenation by juxtaposition)
//! factor     := atom ('*' | '+' | '?')?
//! atom       := '(' expression ')' | class | '\' any | char
//! class      := '[' class_item+ ']'
//! class_item := char '-' char | char
//! ```
//!
//! The nine reserved characters `|`, `*`, `+`, `?`, `(`, `)`, `[`, `]` and `\` must
//! be escaped with a backslash to be used as symbols; any other character stands for
//! itself. A bracket class desugars to an alternation, so `[ac-e]` parses exactly
//! like `(a|c|d|e)`. All whitespace is stripped from the expression before parsing.
//!
//! ## Definitions file
//! One pattern per line, `NAME: REGEX`. Blank lines and lines starting with `#` are
//! ignored. Lines without a `:`, or with an empty name or body, are collected as
//! [MalformedLine] warnings rather than failing the parse; converting the resulting
//! [ParsedDefinitions] into a [Definitions](crate::definitions::Definitions)
//! is the step that can fail (zero valid patterns, or a regex that does not parse).

mod definitions;
mod regex;

use crate::regex::Regex;
use nom::{combinator::all_consuming, Finish};
use thiserror::Error;

/// Ways a regular expression can fail to parse. The offset is into the
/// whitespace-stripped expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexParseError {
    #[error("empty regular expression")]
    Empty,
    #[error("malformed regular expression at offset {0}, near `{1}`")]
    Malformed(usize, String),
}

/// The raw content of a definitions file: one entry per well-formed line, plus the
/// lines that were skipped. See [definitions].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDefinitions<'a> {
    pub entries: Vec<ParsedDefinition<'a>>,
    pub malformed: Vec<MalformedLine<'a>>,
}

/// A single `NAME: REGEX` line, trimmed, with its 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDefinition<'a> {
    pub name: &'a str,
    pub regex: &'a str,
    pub line: usize,
}

/// A non-blank, non-comment line that does not match `NAME: REGEX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedLine<'a> {
    pub line: usize,
    pub text: &'a str,
}

/// Parses a regular expression according to the grammar above. Whitespace is
/// stripped first, and the whole remaining input must be consumed; anything left
/// over (an unbalanced `)`, a dangling operator, an unterminated class) is reported
/// with the offset where parsing stopped.
pub fn regex(input: &str) -> Result<Regex, RegexParseError> {
    let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Err(RegexParseError::Empty);
    }
    let result = match all_consuming(regex::full_regex)(&stripped).finish() {
        Ok((_, ast)) => Ok(Regex { ast }),
        Err(error) => {
            let offset = stripped.len() - error.input.len();
            let near: String = error.input.chars().take(12).collect();
            Err(RegexParseError::Malformed(offset, near))
        }
    };
    result
}

/// Splits a definitions file into its entries. This never fails: malformed lines
/// are returned alongside the entries so the caller can warn about them. Use
/// `TryInto<`[Definitions](crate::definitions::Definitions)`>` on the result to
/// compile the entries.
pub fn definitions(input: &str) -> ParsedDefinitions<'_> {
    definitions::full_definitions(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::RegexAst;

    fn sym(c: char) -> RegexAst {
        RegexAst::Symbol(c)
    }

    #[test]
    fn class_desugars_to_left_folded_alt() {
        let parsed = regex("[ac-e]").unwrap();
        let expected = RegexAst::Alt(
            Box::new(RegexAst::Alt(
                Box::new(RegexAst::Alt(Box::new(sym('a')), Box::new(sym('c')))),
                Box::new(sym('d')),
            )),
            Box::new(sym('e')),
        );
        assert_eq!(parsed.ast, expected);
    }

    #[test]
    fn postfix_operators() {
        assert_eq!(
            regex("a*").unwrap().ast,
            RegexAst::Star(Box::new(sym('a')))
        );
        assert_eq!(
            regex("a+").unwrap().ast,
            RegexAst::Plus(Box::new(sym('a')))
        );
        assert_eq!(regex("a?").unwrap().ast, RegexAst::Opt(Box::new(sym('a'))));
    }

    #[test]
    fn escapes_make_metacharacters_ordinary() {
        assert_eq!(regex(r"\*").unwrap().ast, sym('*'));
        assert_eq!(
            regex(r"\(a\)").unwrap().ast,
            RegexAst::Concat(
                Box::new(RegexAst::Concat(Box::new(sym('(')), Box::new(sym('a')))),
                Box::new(sym(')'))
            )
        );
    }

    #[test]
    fn whitespace_is_stripped() {
        assert_eq!(regex("a | b").unwrap(), regex("a|b").unwrap());
        assert_eq!(regex(" ab ").unwrap(), regex("ab").unwrap());
    }

    #[test]
    fn failures_are_deterministic() {
        assert_eq!(regex(""), Err(RegexParseError::Empty));
        assert_eq!(regex("  "), Err(RegexParseError::Empty));
        // unbalanced parentheses
        assert!(matches!(regex("(a"), Err(RegexParseError::Malformed(0, _))));
        assert!(matches!(regex("a)"), Err(RegexParseError::Malformed(1, _))));
        // operator with no preceding atom
        assert!(matches!(regex("*a"), Err(RegexParseError::Malformed(0, _))));
        // trailing backslash
        assert!(matches!(regex("ab\\"), Err(RegexParseError::Malformed(2, _))));
        // unterminated and empty classes
        assert!(regex("[ab").is_err());
        assert!(regex("[]").is_err());
        // trailing alternation bar
        assert!(matches!(regex("a|"), Err(RegexParseError::Malformed(1, _))));
    }

    #[test]
    fn definitions_lines() {
        let file = "
# comment line
id: [a-z]+

num : [0-9]+
broken line
: nobody
empty:
num: [0-9][0-9]*
";
        let parsed = definitions(file);
        let entries: Vec<(&str, &str)> = parsed
            .entries
            .iter()
            .map(|e| (e.name, e.regex))
            .collect();
        assert_eq!(
            entries,
            [
                ("id", "[a-z]+"),
                ("num", "[0-9]+"),
                ("num", "[0-9][0-9]*")
            ]
        );
        let malformed: Vec<usize> = parsed.malformed.iter().map(|m| m.line).collect();
        assert_eq!(malformed, [6, 7, 8]);
    }
}
