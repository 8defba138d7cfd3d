//!# lexgen
//!
//! `lexgen` is a lexical-analyzer generator: it takes a file of named regular
//! expression definitions, compiles every pattern into a finite automaton, combines
//! the automata into one pattern-tagged DFA, and drives that DFA over input text as
//! a maximal-munch tokenizer with a symbol table.
//!
//! ## Usage
//!
//! ```rust
//! use lexgen::definitions::Definitions;
//! use lexgen::generator::{Construction, Lexer};
//! use lexgen::parser;
//!
//! let source = "
//! # token definitions
//! pr: if | else | while
//! id: [a-zA-Z]([a-zA-Z]|[0-9])*
//! num: [0-9]+
//! ";
//! let definitions: Definitions = parser::definitions(source).try_into().unwrap();
//! let lexer = Lexer::generate(&definitions, Construction::Followpos);
//!
//! let mut scanner = lexer.scanner();
//! let tokens: Vec<String> = scanner
//!     .scan("if x1 42")
//!     .iter()
//!     .map(|token| token.to_string())
//!     .collect();
//! assert_eq!(tokens, ["<if, PR>", "<x1, id>", "<42, num>"]);
//! ```
//!
//! ## Definitions file
//!
//! One pattern per line in the form `NAME: REGEX`; blank lines and lines starting
//! with `#` are ignored, and other malformed lines are skipped with a warning. The
//! order of the lines matters: when a lexeme is recognizable under several patterns,
//! the one declared first wins (that is how `if` above would resolve to `pr` rather
//! than `id`, before the reserved-word override promotes it to `PR`).
//!
//! A pattern named `pr` is treated specially: its body is additionally split on `|`
//! and every word is registered as a *reserved word*. Reserved words are forced to
//! the pattern `PR` by the symbol table, whatever the DFA classified them as.
//!
//! The regex grammar supports concatenation, alternation `|`, Kleene star `*` and
//! plus `+`, the optional operator `?`, grouping parentheses, bracket classes with
//! ranges (`[a-zA-Z]`), and single-character backslash escapes. See
//! [parser] for the full grammar.
//!
//! ## Pipeline
//!
//! The construction stages are all public, should you want only a part of them:
//!
//! * [parser::regex]: regex source to syntax tree
//! * [regex::Regex::to_nfa]: Thompson construction (ε-NFA per pattern)
//! * [regex::Regex::to_dfa]: followpos construction (DFA per pattern)
//! * [nfa::Nfa::union_all]: per-pattern automata to one ε-NFA
//! * [nfa::Nfa::to_dfa]: subset-construction determinization
//! * [scanner::Scanner]: maximal-munch tokenization over the final DFA
//!
//! [generator::Lexer] wires those together, and [scanner::Scanner::scan] produces
//! [scanner::Token]s that render in the `<lexeme, pattern>` output form. Scanning
//! never fails: an unrecognized character becomes a one-character token tagged
//! `erro!` and scanning resumes on the next character.

pub mod definitions;
pub mod dfa;
pub mod generator;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod scanner;
pub mod symbols;
mod table;

#[cfg(test)]
mod tests;
