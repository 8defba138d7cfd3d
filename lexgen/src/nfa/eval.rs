use crate::nfa::Nfa;
use std::collections::{BTreeSet, HashMap};

/// Keeps track of the set of states an [Nfa] is in during evaluation of an input.
/// The set is always ε-closed; stepping on a symbol outside the alphabet empties it,
/// after which the evaluator stays dead.
#[derive(Clone, Debug)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    rev_map: HashMap<char, usize>,
    current_states: BTreeSet<usize>,
}

impl<'a> NfaEvaluator<'a> {
    /// Checks if any current state is accepting
    pub fn is_accepting(&self) -> bool {
        self.pattern_index().is_some()
    }

    /// The index of the accepted pattern, resolving ties towards the pattern
    /// declared first
    pub fn pattern_index(&self) -> Option<usize> {
        self.current_states
            .iter()
            .filter_map(|&s| self.nfa.states[s].accepting)
            .min()
    }

    /// The name of the accepted pattern, if any
    pub fn pattern(&self) -> Option<&'a str> {
        self.pattern_index().map(|idx| &*self.nfa.patterns[idx])
    }

    /// The set of states the automaton is currently in
    pub fn current_states(&self) -> &BTreeSet<usize> {
        &self.current_states
    }

    /// Steps on one symbol, replacing the current set with the ε-closure of all
    /// states reachable on that symbol
    pub fn step(&mut self, symbol: char) {
        match self.rev_map.get(&symbol) {
            None => self.current_states.clear(),
            Some(&idx) => {
                let moved = self
                    .current_states
                    .iter()
                    .flat_map(|&state| self.nfa.states[state].transitions[idx].iter().copied())
                    .collect::<Vec<_>>();
                self.current_states = self.nfa.closure_of(moved);
            }
        }
    }

    /// Steps on every char of `input` in order
    pub fn step_multiple(&mut self, input: &str) {
        input.chars().for_each(|c| self.step(c));
    }
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(value: &'a Nfa) -> Self {
        let rev_map = value
            .alphabet
            .iter()
            .enumerate()
            .map(|(idx, &c)| (c, idx))
            .collect();
        Self {
            nfa: value,
            rev_map,
            current_states: value.closure_of([value.initial_state]),
        }
    }
}
