use log::info;
use thiserror::Error;

use crate::Automaton;
use crate::BuildError;
use crate::ConversionError;
use crate::EvalError;
use crate::FreshStateCounter;
use crate::InvalidAutomaton;
use crate::build;
use crate::convert;
use crate::determinize;

/// The errors that can occur while compiling an expression into a deterministic automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    InvalidAutomaton(#[from] InvalidAutomaton),
}

/// The result of every stage of the compilation of a single expression.
#[derive(Clone, Debug)]
pub struct Compiled {
    expression: String,
    postfix: String,
    nfa: Automaton,
    dfa: Automaton,
}

impl Compiled {
    /// Returns the expression as it was given.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the postfix form of the expression.
    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    /// Returns the epsilon automaton built from the postfix form.
    pub fn nfa(&self) -> &Automaton {
        &self.nfa
    }

    /// Returns the deterministic automaton.
    pub fn dfa(&self) -> &Automaton {
        &self.dfa
    }

    /// Evaluates the word on the deterministic automaton.
    pub fn accepts(&self, word: &str) -> Result<bool, EvalError> {
        self.dfa.accepts(word)
    }

    /// Returns the deterministic automaton, dropping the other stages.
    pub fn into_dfa(self) -> Automaton {
        self.dfa
    }
}

/// Converts the expression into postfix form, builds its epsilon automaton
/// and determinizes it. Both automata are validated before they are used.
pub fn compile(expression: &str) -> Result<Compiled, CompileError> {
    let postfix = convert(expression)?;

    // Every compilation uses its own counter.
    let mut counter = FreshStateCounter::new();
    let nfa = build(&postfix, &mut counter)?;
    let dfa = checked_determinize(&nfa)?;

    info!(
        "Compiled {expression} into a deterministic automaton with {} states",
        dfa.num_of_states()
    );

    Ok(Compiled {
        expression: expression.to_string(),
        postfix,
        nfa,
        dfa,
    })
}

/// Determinizes the automaton after checking its invariants, and checks the
/// invariants of the result as well.
pub fn checked_determinize(nfa: &Automaton) -> Result<Automaton, InvalidAutomaton> {
    nfa.check()?;

    let dfa = determinize(nfa);
    dfa.check()?;
    Ok(dfa)
}
