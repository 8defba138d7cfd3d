//! # Regular expressions
//! A regular expression is parsed (see [crate::parser::regex]) into a [Regex] holding a
//! syntax tree of [RegexAst] nodes. The supported operators are concatenation (by
//! juxtaposition), alternation `|`, Kleene star `*`, Kleene plus `+`, the optional
//! operator `?`, grouping with parentheses, bracket character classes with ranges
//! (desugared to alternations at parse time) and single-character backslash escapes.
//!
//! A parsed expression can be compiled to an automaton tagged with the name of the
//! pattern it defines, in two ways:
//!
//! * [Regex::to_nfa] uses the Thompson construction and yields an ε-NFA, two fresh
//!   states per operator.
//! * [Regex::to_dfa] uses the followpos (Berry–Sethi) construction over the augmented
//!   tree `(E)·#` and yields a DFA directly, no intermediate NFA.
//!
//! Both compile the same language; which one to use is a matter of which pipeline the
//! automaton is fed into (see [crate::generator]).
//!
//! ```
//! use lexgen::parser;
//!
//! let regex = parser::regex("(a|b)*abb").unwrap();
//!
//! let dfa = regex.to_dfa("tail");
//! assert_eq!(dfa.accepts("abb"), Some("tail"));
//! assert_eq!(dfa.accepts("aababb"), Some("tail"));
//! assert_eq!(dfa.accepts("ab"), None);
//!
//! let nfa = regex.to_nfa("tail");
//! assert_eq!(nfa.accepts("babb"), Some("tail"));
//! assert_eq!(nfa.accepts("abab"), None);
//! ```

use crate::dfa::Dfa;
use crate::nfa::{Nfa, NfaState};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

mod followpos;

/// A parsed regular expression. Create one with [crate::parser::regex].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pub ast: RegexAst,
}

/// A node of the regular expression syntax tree. Bracket classes do not appear here:
/// `[ac-e]` is desugared to `(((a|c)|d)|e)` by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexAst {
    Symbol(char),
    Concat(Box<RegexAst>, Box<RegexAst>),
    Alt(Box<RegexAst>, Box<RegexAst>),
    Star(Box<RegexAst>),
    Plus(Box<RegexAst>),
    Opt(Box<RegexAst>),
}

impl RegexAst {
    /// Collects every symbol occurring in the tree. Sorted, so automata built from
    /// the same expression always agree on symbol indices.
    pub(crate) fn alphabet(&self) -> BTreeSet<char> {
        fn collect(ast: &RegexAst, set: &mut BTreeSet<char>) {
            match ast {
                RegexAst::Symbol(c) => {
                    set.insert(*c);
                }
                RegexAst::Concat(l, r) | RegexAst::Alt(l, r) => {
                    collect(l, set);
                    collect(r, set);
                }
                RegexAst::Star(c) | RegexAst::Plus(c) | RegexAst::Opt(c) => collect(c, set),
            }
        }
        let mut set = BTreeSet::new();
        collect(self, &mut set);
        set
    }
}

/// Allocates NFA states during the Thompson construction. State ids are indices into
/// `states`, so ids from sibling builds never clash after [Nfa::union_all] renumbers
/// them disjointly.
struct NfaBuilder<'a> {
    states: Vec<NfaState>,
    char_idx: &'a HashMap<char, usize>,
    alphabet_len: usize,
}

impl<'a> NfaBuilder<'a> {
    fn fresh(&mut self) -> usize {
        self.states.push(NfaState {
            accepting: None,
            epsilon_transitions: vec![],
            transitions: vec![vec![]; self.alphabet_len],
        });
        self.states.len() - 1
    }

    /// Builds the fragment for `ast` and returns its (initial, accepting) state pair.
    /// Every fragment has exactly one accepting state.
    fn fragment(&mut self, ast: &RegexAst) -> (usize, usize) {
        match ast {
            RegexAst::Symbol(c) => {
                let start = self.fresh();
                let accept = self.fresh();
                self.states[start].transitions[self.char_idx[c]].push(accept);
                (start, accept)
            }
            RegexAst::Concat(l, r) => {
                let (l_start, l_accept) = self.fragment(l);
                let (r_start, r_accept) = self.fragment(r);
                self.states[l_accept].epsilon_transitions.push(r_start);
                (l_start, r_accept)
            }
            RegexAst::Alt(l, r) => {
                let start = self.fresh();
                let accept = self.fresh();
                let (l_start, l_accept) = self.fragment(l);
                let (r_start, r_accept) = self.fragment(r);
                self.states[start].epsilon_transitions.extend([l_start, r_start]);
                self.states[l_accept].epsilon_transitions.push(accept);
                self.states[r_accept].epsilon_transitions.push(accept);
                (start, accept)
            }
            RegexAst::Star(c) => {
                let start = self.fresh();
                let accept = self.fresh();
                let (c_start, c_accept) = self.fragment(c);
                self.states[start].epsilon_transitions.extend([c_start, accept]);
                self.states[c_accept].epsilon_transitions.extend([c_start, accept]);
                (start, accept)
            }
            RegexAst::Plus(c) => {
                // Star without the start→accept shortcut
                let start = self.fresh();
                let accept = self.fresh();
                let (c_start, c_accept) = self.fragment(c);
                self.states[start].epsilon_transitions.push(c_start);
                self.states[c_accept].epsilon_transitions.extend([c_start, accept]);
                (start, accept)
            }
            RegexAst::Opt(c) => {
                let start = self.fresh();
                let accept = self.fresh();
                let (c_start, c_accept) = self.fragment(c);
                self.states[start].epsilon_transitions.extend([c_start, accept]);
                self.states[c_accept].epsilon_transitions.push(accept);
                (start, accept)
            }
        }
    }
}

impl Regex {
    /// Compiles this expression to an ε-NFA with the Thompson construction. The
    /// accepting state is tagged with `pattern`.
    pub fn to_nfa(&self, pattern: impl Into<Rc<str>>) -> Nfa {
        let alphabet: Vec<char> = self.ast.alphabet().into_iter().collect();
        let char_idx: HashMap<char, usize> =
            alphabet.iter().enumerate().map(|(idx, &c)| (c, idx)).collect();

        let mut builder = NfaBuilder {
            states: vec![],
            char_idx: &char_idx,
            alphabet_len: alphabet.len(),
        };
        let (initial_state, accept) = builder.fragment(&self.ast);
        builder.states[accept].accepting = Some(0);

        Nfa {
            alphabet: alphabet.into(),
            patterns: Rc::from(vec![pattern.into()]),
            states: builder.states,
            initial_state,
        }
    }

    /// Compiles this expression directly to a DFA with the followpos construction.
    /// Accepting states are tagged with `pattern`.
    pub fn to_dfa(&self, pattern: impl Into<Rc<str>>) -> Dfa {
        followpos::build_dfa(&self.ast, pattern.into())
    }
}
