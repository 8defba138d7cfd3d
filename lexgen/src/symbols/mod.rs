//! # Symbol table
//! Maps every scanned lexeme to the pattern it was first recognized as. Reserved
//! lexemes override that: they are always mapped to [RESERVED_PATTERN], no matter
//! what the automaton classified them as, which is how `if` ends up as `PR` instead
//! of `id`.
//!
//! ```
//! use lexgen::symbols::{SymbolTable, RESERVED_PATTERN};
//! use std::rc::Rc;
//!
//! let mut table = SymbolTable::new();
//! table.add_reserved("if");
//! table.add_symbol("x", Rc::from("id"));
//! table.add_symbol("if", Rc::from("id")); // reserved: stays PR
//! table.add_symbol("x", Rc::from("num")); // already present: first write wins
//!
//! assert_eq!(table.get_pattern("if").as_deref(), Some(RESERVED_PATTERN));
//! assert_eq!(table.get_pattern("x").as_deref(), Some("id"));
//! assert_eq!(table.get_pattern("y"), None);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

/// The pattern name forced onto reserved lexemes
pub const RESERVED_PATTERN: &str = "PR";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: BTreeMap<String, Rc<str>>,
    reserved_words: BTreeSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `word` as reserved and maps it to [RESERVED_PATTERN]
    pub fn add_reserved(&mut self, word: &str) {
        self.reserved_words.insert(word.to_string());
        self.symbols
            .insert(word.to_string(), Rc::from(RESERVED_PATTERN));
    }

    /// Inserts `lexeme` mapped to `pattern` if it is not present yet; for reserved
    /// lexemes the mapping is (re)asserted to [RESERVED_PATTERN] instead. Returns
    /// whether the table changed.
    pub fn add_symbol(&mut self, lexeme: &str, pattern: Rc<str>) -> bool {
        if self.reserved_words.contains(lexeme) {
            self.symbols
                .insert(lexeme.to_string(), Rc::from(RESERVED_PATTERN));
            return true;
        }
        if self.symbols.contains_key(lexeme) {
            false
        } else {
            self.symbols.insert(lexeme.to_string(), pattern);
            true
        }
    }

    /// The pattern `lexeme` is mapped to, if it has been seen
    pub fn get_pattern(&self, lexeme: &str) -> Option<Rc<str>> {
        self.symbols.get(lexeme).cloned()
    }

    /// Checks if `lexeme` is a reserved word
    pub fn is_reserved(&self, lexeme: &str) -> bool {
        self.reserved_words.contains(lexeme)
    }

    /// Iterates over `(lexeme, pattern)` entries in lexeme order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.symbols
            .iter()
            .map(|(lexeme, pattern)| (lexeme.as_str(), &**pattern))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol table:")?;
        for (lexeme, pattern) in self.iter() {
            writeln!(f, "  {lexeme}: {pattern}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SymbolTable, RESERVED_PATTERN};
    use std::rc::Rc;

    #[test]
    fn first_write_wins_for_ordinary_lexemes() {
        let mut table = SymbolTable::new();
        assert!(table.add_symbol("count", Rc::from("id")));
        assert!(!table.add_symbol("count", Rc::from("num")));
        assert_eq!(table.get_pattern("count").as_deref(), Some("id"));
    }

    #[test]
    fn reserved_overrides_before_and_after_insertion() {
        let mut table = SymbolTable::new();
        table.add_reserved("while");
        // lookup works before any scan touched the lexeme
        assert_eq!(
            table.get_pattern("while").as_deref(),
            Some(RESERVED_PATTERN)
        );
        // and an insert under another pattern cannot displace it
        assert!(table.add_symbol("while", Rc::from("id")));
        assert_eq!(
            table.get_pattern("while").as_deref(),
            Some(RESERVED_PATTERN)
        );
        assert!(table.is_reserved("while"));
    }

    #[test]
    fn patterns_only_ever_promote_to_reserved() {
        // once inserted, a lexeme's pattern either stays or becomes PR
        let mut table = SymbolTable::new();
        table.add_symbol("x", Rc::from("id"));
        table.add_symbol("x", Rc::from("num"));
        assert_eq!(table.get_pattern("x").as_deref(), Some("id"));
        table.add_reserved("x");
        assert_eq!(table.get_pattern("x").as_deref(), Some(RESERVED_PATTERN));
    }

    #[test]
    fn display_is_sorted() {
        let mut table = SymbolTable::new();
        table.add_symbol("zebra", Rc::from("id"));
        table.add_symbol("apple", Rc::from("id"));
        let listing = table.to_string();
        let apple = listing.find("apple").unwrap();
        let zebra = listing.find("zebra").unwrap();
        assert!(apple < zebra);
    }
}
