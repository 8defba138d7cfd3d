//! # Pattern definitions
//! The validated form of a definitions file. [crate::parser::definitions] splits the
//! file into raw `NAME: REGEX` entries without failing; converting the result into
//! [Definitions] with `TryInto` is where the rules are enforced:
//!
//! * every regex must parse: the first one that does not is fatal;
//! * a file with zero valid patterns is fatal;
//! * a name defined twice keeps its first position (and with it its priority) but
//!   takes the regex of the *last* definition;
//! * a pattern named `pr` (case-insensitive) additionally has its body split on `|`
//!   and every word registered as a reserved lexeme. The regex itself is still
//!   compiled like any other pattern, so reserved words scan normally and are
//!   promoted by the symbol table afterwards.
//!
//! ```
//! use lexgen::definitions::Definitions;
//! use lexgen::parser;
//!
//! let source = "
//! pr: if | else
//! id: [a-z]+
//! ";
//! let defs: Definitions = parser::definitions(source).try_into().unwrap();
//! assert_eq!(defs.patterns().len(), 2);
//! assert_eq!(defs.reserved_words(), ["if", "else"]);
//! ```

use crate::parser::{self, ParsedDefinitions, RegexParseError};
use crate::regex::Regex;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DefinitionsError<'a> {
    #[error("no valid pattern definitions")]
    Empty,
    #[error("pattern '{0}': {1}")]
    Regex(&'a str, RegexParseError),
}

/// One named pattern with its compiled regular expression
#[derive(Debug, Clone)]
pub struct Definition {
    pub(crate) name: Rc<str>,
    pub(crate) regex: Regex,
}

impl Definition {
    /// The pattern's name as written in the definitions file
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern's compiled regular expression
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// A validated set of pattern definitions, in declaration (priority) order
#[derive(Debug, Clone)]
pub struct Definitions {
    patterns: Vec<Definition>,
    reserved_words: Vec<String>,
}

impl Definitions {
    /// The patterns in declaration order; the index of a pattern here is its
    /// priority, lower winning ties
    pub fn patterns(&self) -> &[Definition] {
        &self.patterns
    }

    /// The reserved lexemes extracted from the `pr` pattern, if one was defined
    pub fn reserved_words(&self) -> &[String] {
        &self.reserved_words
    }
}

impl<'a> TryFrom<ParsedDefinitions<'a>> for Definitions {
    type Error = DefinitionsError<'a>;

    fn try_from(value: ParsedDefinitions<'a>) -> Result<Self, Self::Error> {
        // Last definition of a name wins, in the first definition's position
        let mut ordered: Vec<(&'a str, &'a str)> = Vec::with_capacity(value.entries.len());
        for entry in &value.entries {
            match ordered.iter_mut().find(|(name, _)| *name == entry.name) {
                Some(slot) => slot.1 = entry.regex,
                None => ordered.push((entry.name, entry.regex)),
            }
        }
        if ordered.is_empty() {
            return Err(DefinitionsError::Empty);
        }

        let mut reserved_words: Vec<String> = Vec::new();
        let mut patterns = Vec::with_capacity(ordered.len());
        for (name, source) in ordered {
            if name.eq_ignore_ascii_case("pr") {
                for word in source.split('|') {
                    let word = word.trim();
                    if !word.is_empty() && !reserved_words.iter().any(|w| w == word) {
                        reserved_words.push(word.to_string());
                    }
                }
            }
            let regex =
                parser::regex(source).map_err(|error| DefinitionsError::Regex(name, error))?;
            patterns.push(Definition {
                name: Rc::from(name),
                regex,
            });
        }

        Ok(Definitions {
            patterns,
            reserved_words,
        })
    }
}
