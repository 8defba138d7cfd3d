//! # Deterministic finite automata
//! [Dfa] is the scanner-facing automaton: at most one transition per (state, symbol)
//! pair and at most one pattern tag per accepting state. Transitions are partial; a
//! missing entry means the walk halts there. Instances come out of
//! [Regex::to_dfa](crate::regex::Regex::to_dfa) (followpos construction) or
//! [Nfa::to_dfa](crate::nfa::Nfa::to_dfa) (subset construction), and
//! [Dfa::to_nfa] converts back up when a followpos-built DFA needs to be combined
//! with its siblings through ε-transitions.

use crate::nfa::{Nfa, NfaState};
use crate::table::{StateRow, TransitionTable};
pub use eval::DfaEvaluator;
use std::rc::Rc;

pub mod eval;

/// A pattern-tagged DFA. See the [module-level documentation](crate::dfa).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: Rc<[char]>,
    pub(crate) patterns: Rc<[Rc<str>]>,
    pub(crate) states: Vec<DfaState>,
    pub(crate) initial_state: usize,
}

/// A state in a DFA: an optional pattern tag and an optional target state per
/// alphabet symbol
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    pub(crate) accepting: Option<usize>,
    pub(crate) transitions: Vec<Option<usize>>,
}

impl DfaState {
    /// Checks if this state is accepting
    pub fn is_accepting(&self) -> bool {
        self.accepting.is_some()
    }

    /// The index of the pattern this state accepts, if any
    pub fn pattern_index(&self) -> Option<usize> {
        self.accepting
    }

    /// Target states for each element of the alphabet, in the alphabet's ordering
    pub fn transitions(&self) -> &[Option<usize>] {
        self.transitions.as_slice()
    }
}

impl From<DfaState> for NfaState {
    fn from(value: DfaState) -> Self {
        let DfaState {
            accepting,
            transitions,
        } = value;
        NfaState {
            accepting,
            epsilon_transitions: vec![],
            transitions: transitions
                .into_iter()
                .map(|target| target.into_iter().collect())
                .collect(),
        }
    }
}

impl Dfa {
    /// Converts this DFA to an NFA without ε-moves. Every DFA is already an NFA, so
    /// this is cheap and exact; it is the step that lets followpos-built automata be
    /// unioned through [Nfa::union_all](crate::nfa::Nfa::union_all).
    pub fn to_nfa(self) -> Nfa {
        let Dfa {
            alphabet,
            patterns,
            states,
            initial_state,
        } = self;
        Nfa {
            alphabet,
            patterns,
            states: states.into_iter().map(NfaState::from).collect(),
            initial_state,
        }
    }

    /// Runs the automaton over `input` and returns the accepted pattern's name, or
    /// `None` if the input is rejected
    pub fn accepts(&self, input: &str) -> Option<&str> {
        let mut eval = self.evaluator();
        eval.step_multiple(input);
        eval.pattern()
    }

    /// Gets an evaluator for stepping this automaton symbol by symbol
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Gets the alphabet of this DFA (ε is never part of it)
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Gets the pattern names of this DFA, in declaration (priority) order
    pub fn patterns(&self) -> &[Rc<str>] {
        &self.patterns
    }

    /// Gets the states of this DFA
    pub fn states(&self) -> &[DfaState] {
        self.states.as_slice()
    }

    /// Gets the index of the initial state
    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }

    /// Renders this DFA as a transition table: one row per state with `→` marking
    /// the initial state and `*<pattern>` marking accepting states, one column per
    /// alphabet symbol. Missing transitions show as `-`.
    pub fn to_table(&self) -> String {
        self.gen_table("→")
    }

    /// Like [Dfa::to_table] but with an ascii `->` arrow
    pub fn ascii_table(&self) -> String {
        self.gen_table("->")
    }

    fn gen_table(&self, arrow: &str) -> String {
        let symbols = self.alphabet.iter().map(char::to_string).collect();
        let mut table = TransitionTable::new(symbols);

        for (idx, state) in self.states.iter().enumerate() {
            let cells = state
                .transitions
                .iter()
                .map(|target| match target {
                    Some(t) => t.to_string(),
                    None => "-".to_string(),
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

    /// Serializes this DFA in the line-oriented dump format: state count, initial
    /// state, sorted accepting ids, sorted alphabet, then one `src,symbol,dst` line
    /// per edge.
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
            for (elem, target) in state.transitions.iter().enumerate() {
                if let Some(dst) = target {
                    lines.push(format!("{src},{},{dst}", self.alphabet[elem]));
                }
            }
        }
        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use crate::parser;

    #[test]
    fn up_conversion_preserves_language_and_tags() {
        let regex = parser::regex("(0|1)*1").unwrap();
        let dfa = regex.to_dfa("odd");
        let roundtrip = dfa.clone().to_nfa().to_dfa();
        for input in ["1", "01", "0110negative", "0", "", "11"] {
            assert_eq!(dfa.accepts(input), roundtrip.accepts(input), "input {input:?}");
        }
    }

    #[test]
    fn dump_lists_every_edge_once() {
        let dfa = parser::regex("ab").unwrap().to_dfa("ab");
        // three states: start, after-a, after-ab
        let dump = dfa.dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "3");
        assert_eq!(lines[1], "0");
        assert_eq!(lines[2], "2");
        assert_eq!(lines[3], "a,b");
        assert_eq!(&lines[4..], &["0,a,1", "1,b,2"]);
    }

    #[test]
    fn table_marks_initial_and_accepting() {
        let dfa = parser::regex("a").unwrap().to_dfa("single");
        let table = dfa.ascii_table();
        assert!(table.contains("->"));
        assert!(table.contains("*single"));
    }
}
