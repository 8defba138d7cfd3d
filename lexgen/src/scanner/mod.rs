//! # Maximal-munch scanner
//! [Scanner] drives a pattern-tagged [Dfa] over an input text and produces the
//! token sequence. The outer loop skips whitespace and `//` line comments; the
//! inner loop walks the DFA remembering the last accepting position, so the longest
//! recognizable prefix wins. Three things escape the automaton:
//!
//! * **string literals**: a `"` switches to string mode, which consumes up to the
//!   next unescaped `"` (crossing whitespace) and tags the lexeme [STRING_PATTERN];
//! * **reserved words**: every recognized lexeme passes through the
//!   [SymbolTable], which may promote it to `PR`;
//! * **unrecognized characters**: emitted one at a time as [ERROR_PATTERN] tokens,
//!   and scanning carries on.
//!
//! The inner walk also halts at whitespace unconditionally, so no token other than
//! a string literal can span it.

use crate::dfa::{Dfa, DfaEvaluator};
use crate::symbols::SymbolTable;
use std::fmt;
use std::rc::Rc;

/// The pattern name given to string literals
pub const STRING_PATTERN: &str = "str";
/// The pattern name given to single unrecognized characters
pub const ERROR_PATTERN: &str = "erro!";

/// One scanned token: the matched lexeme and the name of the pattern it was
/// classified as. Displays in the output-file form `<lexeme, pattern>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub pattern: Rc<str>,
}

impl Token {
    /// Checks if this token reports an unrecognized character
    pub fn is_error(&self) -> bool {
        &*self.pattern == ERROR_PATTERN
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.lexeme, self.pattern)
    }
}

/// A tokenizer for one DFA. The scanner owns the symbol table, which accumulates
/// across [Scanner::scan] calls and can be inspected afterwards; the DFA itself is
/// borrowed and never mutated, so any number of scanners can share it.
pub struct Scanner<'a> {
    dfa: &'a Dfa,
    eval: DfaEvaluator<'a>,
    symbols: SymbolTable,
}

impl<'a> Scanner<'a> {
    pub fn new(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            eval: dfa.evaluator(),
            symbols: SymbolTable::new(),
        }
    }

    /// Like [Scanner::new], with `words` pre-registered as reserved lexemes
    pub fn with_reserved_words<I, S>(dfa: &'a Dfa, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scanner = Self::new(dfa);
        for word in words {
            scanner.symbols.add_reserved(word.as_ref());
        }
        scanner
    }

    /// Tokenizes `text`. Every character of the input is consumed exactly once: as
    /// part of a token's lexeme, as skipped whitespace, inside a line comment, or
    /// as a one-character error token.
    pub fn scan(&mut self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < chars.len() {
            while pos < chars.len() && chars[pos].is_whitespace() {
                pos += 1;
            }
            if pos + 1 < chars.len() && chars[pos] == '/' && chars[pos + 1] == '/' {
                while pos < chars.len() && chars[pos] != '\n' {
                    pos += 1;
                }
                continue;
            }
            if pos >= chars.len() {
                break;
            }

            match self.next_token(&chars, pos) {
                Some((lexeme, pattern, length)) => {
                    self.symbols.add_symbol(&lexeme, pattern);
                    let pattern = self
                        .symbols
                        .get_pattern(&lexeme)
                        .expect("lexeme was just inserted");
                    tokens.push(Token { lexeme, pattern });
                    pos += length;
                }
                None => {
                    tokens.push(Token {
                        lexeme: chars[pos].to_string(),
                        pattern: Rc::from(ERROR_PATTERN),
                    });
                    pos += 1;
                }
            }
        }
        tokens
    }

    /// Recognizes the longest token starting at `start`, as
    /// `(lexeme, pattern, length)`. `None` means not even a one-character prefix
    /// reached an accepting state.
    fn next_token(&mut self, text: &[char], start: usize) -> Option<(String, Rc<str>, usize)> {
        if text[start] == '"' {
            return string_token(text, start);
        }

        self.eval.reset();
        let mut best: Option<(usize, usize)> = None; // (last accepting index, pattern)
        let mut pos = start;
        while pos < text.len() && !text[pos].is_whitespace() {
            if self.eval.step(text[pos]).is_none() {
                break;
            }
            pos += 1;
            if let Some(tag) = self.eval.pattern_index() {
                best = Some((pos - 1, tag));
            }
        }

        best.map(|(end, tag)| {
            let lexeme: String = text[start..=end].iter().collect();
            (lexeme, self.dfa.patterns()[tag].clone(), end - start + 1)
        })
    }

    /// The symbol table populated so far
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Consumes the scanner and hands over its symbol table
    pub fn into_symbol_table(self) -> SymbolTable {
        self.symbols
    }
}

/// String mode: consumes from the opening quote up to the first unescaped closing
/// quote. `None` (end of text reached first) makes the caller emit an error token
/// for the opening quote itself.
fn string_token(text: &[char], start: usize) -> Option<(String, Rc<str>, usize)> {
    let mut escaped = false;
    let mut pos = start + 1;
    while pos < text.len() {
        let c = text[pos];
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            let lexeme: String = text[start..=pos].iter().collect();
            return Some((lexeme, Rc::from(STRING_PATTERN), pos - start + 1));
        }
        pos += 1;
    }
    None
}
