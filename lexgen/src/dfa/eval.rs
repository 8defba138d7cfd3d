use crate::dfa::{Dfa, DfaState};
use std::collections::HashMap;

/// Keeps track of the current state of a [Dfa] during evaluation of an input.
/// Stepping on a symbol with no transition (or outside the alphabet) kills the
/// evaluator: it stays dead until [DfaEvaluator::reset].
#[derive(Clone, Debug)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    rev_map: HashMap<char, usize>,
    current_state: Option<usize>,
}

impl<'a> DfaEvaluator<'a> {
    /// Checks if the current state is accepting
    pub fn is_accepting(&self) -> bool {
        self.pattern_index().is_some()
    }

    /// The index of the pattern accepted in the current state, if any
    pub fn pattern_index(&self) -> Option<usize> {
        self.current_state
            .and_then(|state| self.dfa.states[state].accepting)
    }

    /// The name of the pattern accepted in the current state, if any
    pub fn pattern(&self) -> Option<&'a str> {
        self.pattern_index().map(|idx| &*self.dfa.patterns[idx])
    }

    /// The state the automaton is currently in, unless the evaluator is dead
    pub fn current_state(&self) -> Option<&'a DfaState> {
        self.current_state.map(|state| &self.dfa.states[state])
    }

    /// The index of the current state, unless the evaluator is dead
    pub fn current_state_idx(&self) -> Option<usize> {
        self.current_state
    }

    /// Puts the evaluator back into the initial state
    pub fn reset(&mut self) {
        self.current_state = Some(self.dfa.initial_state);
    }

    /// Steps on one symbol and returns the new state, or `None` if there is no
    /// transition for it
    pub fn step(&mut self, symbol: char) -> Option<&'a DfaState> {
        let state = self.current_state?;
        self.current_state = match self.rev_map.get(&symbol) {
            None => None,
            Some(&idx) => self.dfa.states[state].transitions[idx],
        };
        self.current_state()
    }

    /// Steps on every char of `input` in order; returns the final state unless the
    /// walk died along the way
    pub fn step_multiple(&mut self, input: &str) -> Option<&'a DfaState> {
        input.chars().for_each(|c| {
            self.step(c);
        });
        self.current_state()
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        let rev_map = value
            .alphabet
            .iter()
            .enumerate()
            .map(|(idx, &c)| (c, idx))
            .collect();
        Self {
            dfa: value,
            rev_map,
            current_state: Some(value.initial_state),
        }
    }
}
