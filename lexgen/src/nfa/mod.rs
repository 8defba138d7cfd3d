//! # Nondeterministic finite automata
//! [Nfa] represents an ε-NFA whose accepting states are tagged with the name of the
//! pattern they recognize. States are integer ids (indices into the state vector);
//! per-state transitions are kept as one target-set per alphabet symbol, with
//! ε-transitions stored separately so that the alphabet itself never contains the
//! empty symbol.
//!
//! The two operations that make the scanning pipeline work live here:
//!
//! * [Nfa::union_all] combines one automaton per pattern into a single ε-NFA by
//!   adding a fresh initial state with an ε-edge to every component's initial state.
//!   State ids are renumbered disjointly and each accepting state keeps the tag of
//!   the pattern it came from.
//! * [Nfa::to_dfa] determinizes with the subset construction. A subset containing
//!   accepting states of several patterns is tagged with the pattern declared
//!   earliest, which is what makes ties like `if` (reserved word and identifier)
//!   resolve the same way every time.
//!
//! ```
//! use lexgen::nfa::Nfa;
//! use lexgen::parser;
//!
//! let ids = parser::regex("(a|b)(a|b|0|1)*").unwrap().to_nfa("id");
//! let nums = parser::regex("(0|1)+").unwrap().to_nfa("num");
//!
//! let combined = Nfa::union_all(vec![ids, nums]).unwrap();
//! assert_eq!(combined.accepts("a01"), Some("id"));
//! assert_eq!(combined.accepts("101"), Some("num"));
//! assert_eq!(combined.accepts("01a"), None);
//!
//! let dfa = combined.to_dfa();
//! assert_eq!(dfa.accepts("a01"), Some("id"));
//! assert_eq!(dfa.accepts("101"), Some("num"));
//! ```

use crate::dfa::{Dfa, DfaState};
use crate::table::{StateRow, TransitionTable};
pub use eval::NfaEvaluator;
use std::collections::{BTreeSet, HashMap};
use std::mem;
use std::rc::Rc;

pub mod eval;

/// An ε-NFA with pattern-tagged accepting states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) alphabet: Rc<[char]>,
    pub(crate) patterns: Rc<[Rc<str>]>,
    pub(crate) states: Vec<NfaState>,
    pub(crate) initial_state: usize,
}

/// A state in an NFA: an optional pattern tag (index into the automaton's pattern
/// list), ε-transitions, and one set of target states per alphabet symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NfaState {
    pub(crate) accepting: Option<usize>,
    pub(crate) epsilon_transitions: Vec<usize>,
    pub(crate) transitions: Vec<Vec<usize>>,
}

impl NfaState {
    /// Checks if this state is accepting
    pub fn is_accepting(&self) -> bool {
        self.accepting.is_some()
    }

    /// The index of the pattern this state accepts, if any
    pub fn pattern_index(&self) -> Option<usize> {
        self.accepting
    }

    /// Target-state sets for each element of the alphabet, in the alphabet's ordering
    pub fn transitions(&self) -> &[Vec<usize>] {
        self.transitions.as_slice()
    }

    /// The ε-transitions of this state
    pub fn epsilon_transitions(&self) -> &[usize] {
        self.epsilon_transitions.as_slice()
    }
}

impl Nfa {
    /// Combines per-pattern automata into one ε-NFA: a fresh initial state gets an
    /// ε-edge to each automaton's initial state, state ids are renumbered disjointly
    /// and transition tables are re-indexed against the merged alphabet. Pattern tags
    /// keep the order in which the automata are given, which [Nfa::to_dfa] relies on
    /// for priority. Returns `None` when given no automata.
    pub fn union_all(automata: Vec<Nfa>) -> Option<Nfa> {
        if automata.is_empty() {
            return None;
        }

        let alphabet: Vec<char> = automata
            .iter()
            .flat_map(|nfa| nfa.alphabet.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let char_idx: HashMap<char, usize> =
            alphabet.iter().enumerate().map(|(idx, &c)| (c, idx)).collect();
        let patterns: Vec<Rc<str>> = automata
            .iter()
            .flat_map(|nfa| nfa.patterns.iter().cloned())
            .collect();

        // State 0 is the fresh initial state; its ε-edges are patched in at the end
        // once every component's new initial id is known.
        let mut states = vec![NfaState {
            accepting: None,
            epsilon_transitions: vec![],
            transitions: vec![vec![]; alphabet.len()],
        }];
        let mut initials = Vec::with_capacity(automata.len());
        let mut pattern_offset = 0;

        for nfa in automata {
            let offset = states.len();
            initials.push(nfa.initial_state + offset);
            // translation[i] is the merged-alphabet index of the i'th element of
            // this automaton's alphabet
            let translation: Vec<usize> = nfa.alphabet.iter().map(|c| char_idx[c]).collect();

            for state in nfa.states {
                let mut transitions = vec![vec![]; alphabet.len()];
                for (elem, targets) in state.transitions.into_iter().enumerate() {
                    transitions[translation[elem]] =
                        targets.into_iter().map(|t| t + offset).collect();
                }
                states.push(NfaState {
                    accepting: state.accepting.map(|tag| tag + pattern_offset),
                    epsilon_transitions: state
                        .epsilon_transitions
                        .into_iter()
                        .map(|t| t + offset)
                        .collect(),
                    transitions,
                });
            }
            pattern_offset += nfa.patterns.len();
        }
        states[0].epsilon_transitions = initials;

        Some(Nfa {
            alphabet: alphabet.into(),
            patterns: patterns.into(),
            states,
            initial_state: 0,
        })
    }

    /// Determinizes this NFA with the subset construction. DFA states correspond to
    /// ε-closed sets of NFA states; transitions on symbols leading to the empty set
    /// are left undefined rather than routed to a dead state. A subset inheriting
    /// several pattern tags keeps the one with the lowest index, i.e. the pattern
    /// declared first. The state with id 0 is guaranteed to be the initial state.
    pub fn to_dfa(&self) -> Dfa {
        // Sequential ids for new states, keyed by the (sorted) subset
        let mut gen = 0usize..;
        let mut state_ids: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut transitions: HashMap<Vec<usize>, Vec<Option<usize>>> = HashMap::new();

        let initial: Vec<usize> = self.closure_of([self.initial_state]).into_iter().collect();
        state_ids.insert(initial.clone(), gen.next().unwrap());
        let mut to_explore = vec![initial];

        while let Some(subset) = to_explore.pop() {
            let mut row = Vec::with_capacity(self.alphabet.len());
            for elem in 0..self.alphabet.len() {
                let moved = subset
                    .iter()
                    .flat_map(|&q| self.states[q].transitions[elem].iter().copied());
                let closed = self.closure_of(moved);
                if closed.is_empty() {
                    row.push(None);
                    continue;
                }
                let key: Vec<usize> = closed.into_iter().collect();
                if !state_ids.contains_key(&key) {
                    to_explore.push(key.clone());
                }
                let id = *state_ids.entry(key).or_insert_with(|| gen.next().unwrap());
                row.push(Some(id));
            }
            transitions.insert(subset, row);
        }

        // Assemble the state vector in id order
        let mut subsets: Vec<(&Vec<usize>, usize)> =
            state_ids.iter().map(|(key, &id)| (key, id)).collect();
        subsets.sort_by_key(|&(_, id)| id);

        let states = subsets
            .into_iter()
            .map(|(subset, _)| DfaState {
                accepting: subset
                    .iter()
                    .filter_map(|&q| self.states[q].accepting)
                    .min(),
                transitions: transitions
                    .remove(subset)
                    .expect("every discovered subset has a transition row"),
            })
            .collect();

        Dfa {
            alphabet: self.alphabet.clone(),
            patterns: self.patterns.clone(),
            states,
            initial_state: 0,
        }
    }

    /// The ε-closure of a single state, or `None` if the id is out of range
    pub fn closure(&self, start: usize) -> Option<BTreeSet<usize>> {
        (start < self.states.len()).then(|| self.closure_of([start]))
    }

    /// The ε-closure of a set of states: everything reachable through zero or more
    /// ε-transitions.
    pub(crate) fn closure_of(&self, start: impl IntoIterator<Item = usize>) -> BTreeSet<usize> {
        let mut all: BTreeSet<usize> = start.into_iter().collect();
        let mut new: Vec<usize> = all.iter().copied().collect();
        while !new.is_empty() {
            for state in mem::take(&mut new) {
                for &target in &self.states[state].epsilon_transitions {
                    if all.insert(target) {
                        new.push(target);
                    }
                }
            }
        }
        all
    }

    /// Runs the automaton over `input` and returns the accepted pattern's name, or
    /// `None` if the input is rejected. Ties go to the pattern declared first.
    pub fn accepts(&self, input: &str) -> Option<&str> {
        let mut eval = self.evaluator();
        eval.step_multiple(input);
        eval.pattern()
    }

    /// Gets an evaluator for stepping this automaton symbol by symbol
    pub fn evaluator(&self) -> NfaEvaluator<'_> {
        self.into()
    }

    /// Gets the alphabet of this NFA (ε is never part of it)
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Gets the pattern names of this NFA, in declaration (priority) order
    pub fn patterns(&self) -> &[Rc<str>] {
        &self.patterns
    }

    /// Gets the states of this NFA
    pub fn states(&self) -> &[NfaState] {
        self.states.as_slice()
    }

    /// Gets the index of the initial state
    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }

    /// Renders this NFA as a transition table: one row per state with `→` marking
    /// the initial state and `*<pattern>` marking accepting states, one column per
    /// alphabet symbol plus a leading ε column.
    pub fn to_table(&self) -> String {
        self.gen_table("ε", "→")
    }

    /// Like [Nfa::to_table] but ascii-only: `eps` for ε and `->` for the arrow
    pub fn ascii_table(&self) -> String {
        self.gen_table("eps", "->")
    }

    fn gen_table(&self, eps: &str, arrow: &str) -> String {
        let mut symbols = vec![eps.to_string()];
        symbols.extend(self.alphabet.iter().map(char::to_string));
        let mut table = TransitionTable::new(symbols);

        for (idx, state) in self.states.iter().enumerate() {
            let cells = std::iter::once(&state.epsilon_transitions)
                .chain(&state.transitions)
                .map(|targets| {
                    let inner = targets
                        .iter()
                        .map(usize::to_string)
                        .collect::<Vec<_>>()
                        .join(" ");
                    format!("{{{inner}}}")
                })
                .collect();
            table.push_state(StateRow {
                marker: if idx == self.initial_state { arrow.to_string() } else { String::new() },
                tag: match state.accepting {
                    Some(tag) => format!("*{}", self.patterns[tag]),
                    None => String::new(),
                },
                id: idx.to_string(),
                cells,
            });
        }
        table.render()
    }

    /// Serializes this NFA in the line-oriented dump format: state count, initial
    /// state, sorted accepting ids, sorted alphabet, then one `src,symbol,dst` line
    /// per edge. ε-edges are not part of the format and are skipped.
    pub fn dump(&self) -> String {
        let finals: Vec<String> = self
            .states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_accepting())
            .map(|(idx, _)| idx.to_string())
            .collect();
        let alphabet: Vec<String> = self.alphabet.iter().map(char::to_string).collect();

        let mut lines = vec![
            self.states.len().to_string(),
            self.initial_state.to_string(),
            finals.join(","),
            alphabet.join(","),
        ];
        for (src, state) in self.states.iter().enumerate() {
            for (elem, targets) in state.transitions.iter().enumerate() {
                let mut targets = targets.clone();
                targets.sort_unstable();
                for dst in targets {
                    lines.push(format!("{src},{},{dst}", self.alphabet[elem]));
                }
            }
        }
        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::Nfa;
    use crate::parser;

    #[test]
    fn closure_follows_epsilon_chains() {
        // a* gives ε-chains from the fragment's start into the symbol state
        let nfa = parser::regex("a*").unwrap().to_nfa("as");
        let closure = nfa.closure(nfa.initial_state_index()).unwrap();
        assert!(closure.contains(&nfa.initial_state_index()));
        assert!(closure.len() > 1);
        assert!(nfa.closure(nfa.states().len()).is_none());
    }

    #[test]
    fn union_keeps_declaration_order_priority() {
        // "ab" matches both patterns; the first declared one must win
        let first = parser::regex("ab").unwrap().to_nfa("first");
        let second = parser::regex("a(b|c)").unwrap().to_nfa("second");
        let combined = Nfa::union_all(vec![first, second]).unwrap();
        assert_eq!(combined.accepts("ab"), Some("first"));
        assert_eq!(combined.accepts("ac"), Some("second"));

        let dfa = combined.to_dfa();
        assert_eq!(dfa.accepts("ab"), Some("first"));
        assert_eq!(dfa.accepts("ac"), Some("second"));
    }

    #[test]
    fn union_merges_disjoint_alphabets() {
        let letters = parser::regex("x+").unwrap().to_nfa("xs");
        let digits = parser::regex("7+").unwrap().to_nfa("sevens");
        let combined = Nfa::union_all(vec![letters, digits]).unwrap();
        assert_eq!(combined.alphabet(), &['7', 'x']);
        assert_eq!(combined.accepts("xxx"), Some("xs"));
        assert_eq!(combined.accepts("77"), Some("sevens"));
        assert_eq!(combined.accepts("x7"), None);
    }

    #[test]
    fn union_of_nothing_is_none() {
        assert!(Nfa::union_all(vec![]).is_none());
    }

    #[test]
    fn determinization_has_no_epsilon_and_single_targets() {
        let nfa = parser::regex("(a|b)*abb").unwrap().to_nfa("tail");
        let dfa = nfa.to_dfa();
        // one transition entry per alphabet symbol and per state, each at most one target
        for state in dfa.states() {
            assert_eq!(state.transitions().len(), dfa.alphabet().len());
        }
        assert_eq!(dfa.accepts("aabb"), Some("tail"));
        assert_eq!(dfa.accepts("aab"), None);
    }

    #[test]
    fn dump_format() {
        let nfa = parser::regex("ab").unwrap().to_nfa("ab");
        let dump = nfa.dump();
        let mut lines = dump.lines();
        assert_eq!(lines.next(), Some("4"));
        let initial: usize = lines.next().unwrap().parse().unwrap();
        assert!(initial < 4);
        let finals = lines.next().unwrap();
        assert!(!finals.is_empty());
        assert_eq!(lines.next(), Some("a,b"));
        // two symbol edges, ε-edges skipped
        assert_eq!(lines.count(), 2);
    }
}
