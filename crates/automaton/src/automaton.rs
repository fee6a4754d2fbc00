use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::VecDeque;
use std::fmt;
use std::mem;

use itertools::Itertools;
use log::warn;
use thiserror::Error;

use rafa_collections::VecSet;

use crate::StateName;
use crate::Symbol;

/// The transition relation of an automaton, maps a state and a symbol to the
/// set of target states. It is multi-valued since union and closure introduce
/// several epsilon transitions leaving the same state.
pub type TransitionRelation = BTreeMap<StateName, BTreeMap<Symbol, VecSet<StateName>>>;

/// Describes which invariant of an [`Automaton`] is violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAutomaton {
    #[error("The initial state {0} is not in the set of states")]
    UnknownInitialState(StateName),

    #[error("The final state {0} is not in the set of states")]
    UnknownFinalState(StateName),

    #[error("The transition source {0} is not in the set of states")]
    UnknownSource(StateName),

    #[error("The transition from {state} uses symbol '{symbol}' that is not in the alphabet")]
    UnknownSymbol { state: StateName, symbol: char },

    #[error("The target {target} of the transition from {state} with {symbol} is not in the set of states")]
    UnknownTarget {
        state: StateName,
        symbol: Symbol,
        target: StateName,
    },
}

/// The reasons why a word could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("The symbol '{0}' is not in the alphabet")]
    SymbolNotInAlphabet(char),

    #[error("There is no transition from state {state} with symbol '{symbol}'")]
    NoTransition { state: StateName, symbol: char },

    #[error("State {state} has several transitions with symbol '{symbol}'")]
    NotDeterministic { state: StateName, symbol: char },
}

/// A finite automaton with epsilon transitions, consisting of a set of
/// states, an alphabet, a transition relation, an initial state and a set of
/// final states.
///
/// The same type is used for the epsilon automata produced by the
/// [`crate::build`] function and for the deterministic automata produced by
/// [`crate::determinize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    states: BTreeSet<StateName>,
    alphabet: BTreeSet<char>,
    transitions: TransitionRelation,
    initial_state: StateName,
    final_states: BTreeSet<StateName>,
}

impl Automaton {
    /// Creates an automaton from its components, they are taken as is so the
    /// result should be checked with [`Automaton::validate`] before use.
    pub fn new<Q, F, T, S>(
        states: Q,
        alphabet: impl IntoIterator<Item = char>,
        transitions: T,
        initial_state: impl Into<StateName>,
        final_states: F,
    ) -> Automaton
    where
        Q: IntoIterator,
        Q::Item: Into<StateName>,
        F: IntoIterator,
        F::Item: Into<StateName>,
        T: IntoIterator<Item = (S, Symbol, S)>,
        S: Into<StateName>,
    {
        let mut automaton = Automaton {
            states: states.into_iter().map(Into::into).collect(),
            alphabet: alphabet.into_iter().collect(),
            transitions: TransitionRelation::new(),
            initial_state: initial_state.into(),
            final_states: final_states.into_iter().map(Into::into).collect(),
        };

        for (from, symbol, to) in transitions {
            automaton.add_transition(&from.into(), symbol, &to.into());
        }

        automaton
    }

    /// Creates an automaton consisting of only the given initial state.
    pub(crate) fn with_initial_state(initial_state: StateName) -> Automaton {
        Automaton {
            states: BTreeSet::from([initial_state.clone()]),
            alphabet: BTreeSet::new(),
            transitions: TransitionRelation::new(),
            initial_state,
            final_states: BTreeSet::new(),
        }
    }

    /// Adds a state, does nothing when it already exists.
    pub(crate) fn insert_state(&mut self, state: StateName) {
        self.states.insert(state);
    }

    /// Adds an input symbol to the alphabet.
    pub(crate) fn insert_symbol(&mut self, symbol: char) {
        self.alphabet.insert(symbol);
    }

    /// Adds a transition to the relation, keeping all existing targets.
    pub(crate) fn add_transition(&mut self, from: &str, symbol: Symbol, to: &str) {
        self.transitions
            .entry(from.to_string())
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(to.to_string());
    }

    /// Marks the given state as accepting.
    pub(crate) fn add_final_state(&mut self, state: StateName) {
        self.final_states.insert(state);
    }

    /// Removes and returns all final states.
    pub(crate) fn take_final_states(&mut self) -> BTreeSet<StateName> {
        mem::take(&mut self.final_states)
    }

    /// Replaces the final states.
    pub(crate) fn set_final_states(&mut self, final_states: BTreeSet<StateName>) {
        self.final_states = final_states;
    }

    /// Moves the states, symbols and transitions of the other automaton into
    /// this one. Returns the initial state and final states of the other
    /// automaton, which are not marked in the result.
    pub(crate) fn absorb(&mut self, other: Automaton) -> (StateName, BTreeSet<StateName>) {
        self.states.extend(other.states);
        self.alphabet.extend(other.alphabet);

        for (from, outgoing) in other.transitions {
            let entry = self.transitions.entry(from).or_default();
            for (symbol, targets) in outgoing {
                entry.entry(symbol).or_default().union_with(&targets);
            }
        }

        (other.initial_state, other.final_states)
    }

    /// Returns the set of states.
    pub fn states(&self) -> &BTreeSet<StateName> {
        &self.states
    }

    /// Returns the alphabet, which never contains epsilon.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Returns the initial state.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Returns the set of final states.
    pub fn final_states(&self) -> &BTreeSet<StateName> {
        &self.final_states
    }

    /// Returns true iff the given state is accepting.
    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.contains(state)
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of (state, symbol, target) triples in the transition relation.
    pub fn num_of_transitions(&self) -> usize {
        self.transition_table().map(|(_, _, targets)| targets.len()).sum()
    }

    /// Returns the targets of the given state and symbol, if there are any.
    pub fn targets(&self, state: &str, symbol: Symbol) -> Option<&VecSet<StateName>> {
        self.transitions.get(state)?.get(&symbol)
    }

    /// Returns every entry of the transition relation, ordered by state and then symbol.
    pub fn transition_table(&self) -> impl Iterator<Item = (&str, Symbol, &VecSet<StateName>)> + '_ {
        self.transitions.iter().flat_map(|(from, outgoing)| {
            outgoing
                .iter()
                .map(move |(symbol, targets)| (from.as_str(), *symbol, targets))
        })
    }

    /// Returns all transitions as (from, symbol, to) triples.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, Symbol, &str)> + '_ {
        self.transition_table()
            .flat_map(|(from, symbol, targets)| targets.iter().map(move |to| (from, symbol, to.as_str())))
    }

    /// Returns true iff at least one transition is labelled with epsilon.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transition_table().any(|(_, symbol, _)| symbol.is_epsilon())
    }

    /// Returns true iff there are no epsilon transitions and every state has at
    /// most one target per symbol.
    pub fn is_deterministic(&self) -> bool {
        self.transition_table()
            .all(|(_, symbol, targets)| !symbol.is_epsilon() && targets.len() <= 1)
    }

    /// Checks the invariants of the automaton, and returns the first one that is violated.
    pub fn check(&self) -> Result<(), InvalidAutomaton> {
        if !self.states.contains(&self.initial_state) {
            return Err(InvalidAutomaton::UnknownInitialState(self.initial_state.clone()));
        }

        if let Some(state) = self.final_states.iter().find(|state| !self.states.contains(*state)) {
            return Err(InvalidAutomaton::UnknownFinalState(state.clone()));
        }

        for (state, outgoing) in &self.transitions {
            if !self.states.contains(state) {
                return Err(InvalidAutomaton::UnknownSource(state.clone()));
            }

            for (symbol, targets) in outgoing {
                if let Symbol::Char(c) = symbol {
                    if !self.alphabet.contains(c) {
                        return Err(InvalidAutomaton::UnknownSymbol {
                            state: state.clone(),
                            symbol: *c,
                        });
                    }
                }

                if let Some(target) = targets.iter().find(|target| !self.states.contains(*target)) {
                    return Err(InvalidAutomaton::UnknownTarget {
                        state: state.clone(),
                        symbol: *symbol,
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns true iff all invariants hold, the violated invariant is logged otherwise.
    pub fn validate(&self) -> bool {
        match self.check() {
            Ok(()) => true,
            Err(violation) => {
                warn!("{violation}");
                false
            }
        }
    }

    /// Returns the set of states that can be reached from the given state by
    /// taking zero or more epsilon transitions.
    pub fn epsilon_closure(&self, state: &str) -> VecSet<StateName> {
        let mut closure = VecSet::singleton(state.to_string());
        let mut queue = VecDeque::from([state]);

        while let Some(current) = queue.pop_front() {
            if let Some(targets) = self.targets(current, Symbol::Epsilon) {
                for target in targets {
                    if closure.insert(target.clone()) {
                        queue.push_back(target);
                    }
                }
            }
        }

        closure
    }

    /// Runs the deterministic transition function on the given word and
    /// returns whether it ends in a final state.
    ///
    /// Should only be used on a deterministic automaton, see [`Automaton::simulate`]
    /// for the non-deterministic variant.
    pub fn accepts(&self, word: &str) -> Result<bool, EvalError> {
        let mut current: &str = &self.initial_state;

        for symbol in word.chars() {
            if !self.alphabet.contains(&symbol) {
                return Err(EvalError::SymbolNotInAlphabet(symbol));
            }

            let mut targets = self.targets(current, Symbol::Char(symbol)).into_iter().flatten();
            let next = targets.next().ok_or_else(|| EvalError::NoTransition {
                state: current.to_string(),
                symbol,
            })?;

            if targets.next().is_some() {
                return Err(EvalError::NotDeterministic {
                    state: current.to_string(),
                    symbol,
                });
            }

            current = next.as_str();
        }

        Ok(self.is_final(current))
    }

    /// Returns whether the word is accepted by keeping track of all states
    /// that can be reached, including those reached by epsilon transitions.
    ///
    /// Unlike [`Automaton::accepts`] this works for every automaton, a word
    /// for which no path exists is rejected instead of being an error.
    pub fn simulate(&self, word: &str) -> Result<bool, EvalError> {
        let mut current = self.epsilon_closure(&self.initial_state);

        for symbol in word.chars() {
            if !self.alphabet.contains(&symbol) {
                return Err(EvalError::SymbolNotInAlphabet(symbol));
            }

            let mut next = VecSet::new();
            for state in &current {
                for target in self.targets(state, Symbol::Char(symbol)).into_iter().flatten() {
                    next.union_with(&self.epsilon_closure(target));
                }
            }

            if next.is_empty() {
                return Ok(false);
            }
            current = next;
        }

        Ok(current.iter().any(|state| self.is_final(state)))
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "States (Q): {{{}}}", self.states.iter().format(", "))?;
        writeln!(f, "Alphabet (Σ): {{{}}}", self.alphabet.iter().format(", "))?;
        writeln!(f, "Transition function (δ):")?;
        for (state, symbol, targets) in self.transition_table() {
            writeln!(f, "  δ({state}, {symbol}) -> {targets}")?;
        }
        writeln!(f, "Initial state (q0): {}", self.initial_state)?;
        write!(f, "Final states (F): {{{}}}", self.final_states.iter().format(", "))
    }
}
