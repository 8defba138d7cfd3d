//! # Generator pipeline
//! [Lexer::generate] runs the whole construction: each pattern's regex is compiled
//! to an automaton, the per-pattern automata are unioned through a fresh ε-start
//! state, and the result is determinized into the pattern-tagged DFA the
//! [Scanner](crate::scanner::Scanner) runs on. The intermediate automata are kept
//! around so they can be printed or dumped for inspection.
//!
//! Two construction routes exist, selected with [Construction]:
//!
//! * [Construction::Thompson]: regex → ε-NFA per pattern, union, determinize;
//! * [Construction::Followpos]: regex → DFA per pattern directly, converted back
//!   to (ε-free) NFAs for the union, then determinized.
//!
//! Both produce a DFA for the same token language; the followpos route is the
//! default since its per-pattern automata are already deterministic and small.

use crate::definitions::Definitions;
use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::scanner::Scanner;

/// Which regex→automaton construction to use for the per-pattern automata
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Construction {
    /// Thompson's inductive ε-NFA construction
    Thompson,
    /// The followpos (Berry–Sethi) direct-to-DFA construction
    #[default]
    Followpos,
}

/// A per-pattern automaton, NFA- or DFA-shaped depending on the construction route
#[derive(Debug, Clone)]
pub enum PatternAutomaton {
    Nfa(Nfa),
    Dfa(Dfa),
}

impl PatternAutomaton {
    /// The name of the pattern this automaton recognizes
    pub fn pattern(&self) -> &str {
        match self {
            PatternAutomaton::Nfa(nfa) => &nfa.patterns()[0],
            PatternAutomaton::Dfa(dfa) => &dfa.patterns()[0],
        }
    }

    /// Renders the automaton as a transition table
    pub fn to_table(&self) -> String {
        match self {
            PatternAutomaton::Nfa(nfa) => nfa.to_table(),
            PatternAutomaton::Dfa(dfa) => dfa.to_table(),
        }
    }

    /// Serializes the automaton in the line-oriented dump format
    pub fn dump(&self) -> String {
        match self {
            PatternAutomaton::Nfa(nfa) => nfa.dump(),
            PatternAutomaton::Dfa(dfa) => dfa.dump(),
        }
    }

    fn to_union_nfa(&self) -> Nfa {
        match self {
            PatternAutomaton::Nfa(nfa) => nfa.clone(),
            PatternAutomaton::Dfa(dfa) => dfa.clone().to_nfa(),
        }
    }
}

/// A generated lexical analyzer: the final DFA plus everything needed to inspect
/// how it was built and to seed scanners with the reserved words.
#[derive(Debug, Clone)]
pub struct Lexer {
    per_pattern: Vec<PatternAutomaton>,
    combined: Nfa,
    dfa: Dfa,
    reserved_words: Vec<String>,
}

impl Lexer {
    /// Builds the lexer for `definitions`: per-pattern automata in declaration
    /// order, the combined ε-NFA, and the determinized pattern-tagged DFA.
    pub fn generate(definitions: &Definitions, method: Construction) -> Self {
        let per_pattern: Vec<PatternAutomaton> = definitions
            .patterns()
            .iter()
            .map(|def| match method {
                Construction::Thompson => {
                    PatternAutomaton::Nfa(def.regex().to_nfa(def.name()))
                }
                Construction::Followpos => {
                    PatternAutomaton::Dfa(def.regex().to_dfa(def.name()))
                }
            })
            .collect();

        let combined =
            Nfa::union_all(per_pattern.iter().map(PatternAutomaton::to_union_nfa).collect())
                .expect("validated definitions contain at least one pattern");
        let dfa = combined.to_dfa();

        Lexer {
            per_pattern,
            combined,
            dfa,
            reserved_words: definitions.reserved_words().to_vec(),
        }
    }

    /// A scanner over the generated DFA, with the reserved words already
    /// registered in its symbol table
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::with_reserved_words(&self.dfa, &self.reserved_words)
    }

    /// The per-pattern automata, in declaration order
    pub fn per_pattern(&self) -> &[PatternAutomaton] {
        &self.per_pattern
    }

    /// The combined ε-NFA (fresh start state with ε-edges into every pattern's
    /// automaton)
    pub fn combined(&self) -> &Nfa {
        &self.combined
    }

    /// The determinized pattern-tagged DFA the scanner runs on
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// The reserved words collected from the definitions
    pub fn reserved_words(&self) -> &[String] {
        &self.reserved_words
    }
}
