use std::collections::BTreeSet;

use log::debug;
use log::trace;
use thiserror::Error;

use crate::Automaton;
use crate::FreshStateCounter;
use crate::Operator;
use crate::Symbol;
use crate::is_operand;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Operator '{0}' does not have enough operands")]
    InsufficientOperands(Operator),

    #[error("The postfix expression is empty")]
    IncompleteExpression,

    #[error("The postfix expression leaves {0} operands without an operator")]
    DanglingOperands(usize),

    #[error("Invalid token '{0}' in the postfix expression")]
    InvalidToken(char),
}

/// Builds an epsilon automaton from an expression in postfix form, such as
/// the output of [`crate::convert`]. All states are named by the given
/// counter.
pub fn build(postfix: &str, counter: &mut FreshStateCounter) -> Result<Automaton, BuildError> {
    let mut builder = FragmentBuilder::new(counter);

    for token in postfix.chars() {
        if token.is_whitespace() {
            continue;
        }

        if is_operand(token) {
            builder.push_symbol(token);
        } else if let Some(op) = Operator::from_char(token) {
            builder.apply(op)?;
        } else {
            return Err(BuildError::InvalidToken(token));
        }
    }

    let automaton = builder.finish()?;
    debug!(
        "Built epsilon automaton for {postfix} with {} states and {} transitions",
        automaton.num_of_states(),
        automaton.num_of_transitions()
    );

    Ok(automaton)
}

/// Evaluates a postfix expression on a stack of automaton fragments. Every
/// fragment is moved into the result of the operator that consumes it.
struct FragmentBuilder<'a> {
    stack: Vec<Automaton>,
    counter: &'a mut FreshStateCounter,
}

impl<'a> FragmentBuilder<'a> {
    fn new(counter: &'a mut FreshStateCounter) -> Self {
        Self {
            stack: Vec::new(),
            counter,
        }
    }

    /// Pushes the fragment `start --symbol--> final`.
    fn push_symbol(&mut self, symbol: char) {
        let start = self.counter.fresh();
        let end = self.counter.fresh();
        trace!("Fragment {start} --[{symbol}]-> {end}");

        let mut fragment = Automaton::with_initial_state(start.clone());
        fragment.insert_state(end.clone());
        fragment.insert_symbol(symbol);
        fragment.add_transition(&start, Symbol::Char(symbol), &end);
        fragment.add_final_state(end);

        self.stack.push(fragment);
    }

    /// Replaces the operands of the given operator on top of the stack by their combination.
    fn apply(&mut self, op: Operator) -> Result<(), BuildError> {
        if self.stack.len() < op.arity() {
            return Err(BuildError::InsufficientOperands(op));
        }

        let result = match op {
            Operator::Union => {
                let (left, right) = self.pop_pair(op)?;
                self.union(left, right)
            }
            Operator::Concatenation => {
                let (left, right) = self.pop_pair(op)?;
                concatenate(left, right)
            }
            Operator::Closure => {
                let operand = self.stack.pop().ok_or(BuildError::InsufficientOperands(op))?;
                self.closure(operand)
            }
        };

        self.stack.push(result);
        Ok(())
    }

    /// Pops the two topmost fragments, the right operand was pushed last.
    fn pop_pair(&mut self, op: Operator) -> Result<(Automaton, Automaton), BuildError> {
        match (self.stack.pop(), self.stack.pop()) {
            (Some(right), Some(left)) => Ok((left, right)),
            _ => Err(BuildError::InsufficientOperands(op)),
        }
    }

    /// A fresh start state with epsilon transitions into both operands, and
    /// epsilon transitions from all their final states into a fresh final state.
    fn union(&mut self, left: Automaton, right: Automaton) -> Automaton {
        let start = self.counter.fresh();
        let end = self.counter.fresh();
        trace!(
            "Union of {} and {} from {start} to {end}",
            left.initial_state(),
            right.initial_state()
        );

        let mut result = Automaton::with_initial_state(start.clone());
        result.insert_state(end.clone());

        let (left_initial, left_finals) = result.absorb(left);
        let (right_initial, right_finals) = result.absorb(right);

        result.add_transition(&start, Symbol::Epsilon, &left_initial);
        result.add_transition(&start, Symbol::Epsilon, &right_initial);
        for state in left_finals.iter().chain(&right_finals) {
            result.add_transition(state, Symbol::Epsilon, &end);
        }

        result.set_final_states(BTreeSet::from([end]));
        result
    }

    /// A fresh start state that can skip the operand, or enter it and
    /// repeat it any number of times, before reaching a fresh final state.
    fn closure(&mut self, operand: Automaton) -> Automaton {
        let start = self.counter.fresh();
        let end = self.counter.fresh();
        trace!("Closure of {} from {start} to {end}", operand.initial_state());

        let mut result = Automaton::with_initial_state(start.clone());
        result.insert_state(end.clone());

        let (operand_initial, operand_finals) = result.absorb(operand);

        result.add_transition(&start, Symbol::Epsilon, &operand_initial);
        result.add_transition(&start, Symbol::Epsilon, &end);
        for state in &operand_finals {
            result.add_transition(state, Symbol::Epsilon, &operand_initial);
            result.add_transition(state, Symbol::Epsilon, &end);
        }

        result.set_final_states(BTreeSet::from([end]));
        result
    }

    /// Returns the single remaining fragment.
    fn finish(mut self) -> Result<Automaton, BuildError> {
        match self.stack.len() {
            0 => Err(BuildError::IncompleteExpression),
            1 => self.stack.pop().ok_or(BuildError::IncompleteExpression),
            n => Err(BuildError::DanglingOperands(n)),
        }
    }
}

/// Connects every final state of the left operand to the initial state of
/// the right one, the final states of the result are those of the right operand.
fn concatenate(mut left: Automaton, right: Automaton) -> Automaton {
    trace!("Concatenation of {} and {}", left.initial_state(), right.initial_state());

    let left_finals = left.take_final_states();
    let (right_initial, right_finals) = left.absorb(right);

    for state in &left_finals {
        left.add_transition(state, Symbol::Epsilon, &right_initial);
    }

    left.set_final_states(right_finals);
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use rafa_collections::vecset;

    fn build_fresh(postfix: &str) -> Result<Automaton, BuildError> {
        build(postfix, &mut FreshStateCounter::new())
    }

    #[test]
    fn test_build_symbol() {
        let automaton = build_fresh("a").unwrap();

        assert_eq!(automaton.initial_state(), "q0");
        assert_eq!(automaton.num_of_states(), 2);
        assert_eq!(automaton.targets("q0", Symbol::Char('a')), Some(&vecset!["q1".to_string()]));
        assert!(automaton.is_final("q1"));
        assert!(automaton.validate());
    }

    #[test]
    fn test_build_union_keeps_both_branches() {
        let automaton = build_fresh("ab|").unwrap();

        // The symbol fragments are q0 -> q1 and q2 -> q3, the union adds q4 and q5.
        assert_eq!(automaton.initial_state(), "q4");
        assert_eq!(
            automaton.targets("q4", Symbol::Epsilon),
            Some(&vecset!["q0".to_string(), "q2".to_string()])
        );
        assert_eq!(automaton.targets("q1", Symbol::Epsilon), Some(&vecset!["q5".to_string()]));
        assert_eq!(automaton.targets("q3", Symbol::Epsilon), Some(&vecset!["q5".to_string()]));
        assert_eq!(automaton.final_states().iter().collect::<Vec<_>>(), vec!["q5"]);
        assert_eq!(automaton.alphabet().iter().collect::<String>(), "ab");
        assert!(automaton.validate());
    }

    #[test]
    fn test_build_concatenation() {
        let automaton = build_fresh("ab.").unwrap();

        assert_eq!(automaton.initial_state(), "q0");
        assert_eq!(automaton.targets("q1", Symbol::Epsilon), Some(&vecset!["q2".to_string()]));
        assert_eq!(automaton.final_states().iter().collect::<Vec<_>>(), vec!["q3"]);
        assert_eq!(automaton.num_of_transitions(), 3);
    }

    #[test]
    fn test_build_closure() {
        let automaton = build_fresh("a*").unwrap();

        assert_eq!(automaton.initial_state(), "q2");
        assert_eq!(
            automaton.targets("q2", Symbol::Epsilon),
            Some(&vecset!["q0".to_string(), "q3".to_string()])
        );
        assert_eq!(
            automaton.targets("q1", Symbol::Epsilon),
            Some(&vecset!["q0".to_string(), "q3".to_string()])
        );
        assert_eq!(automaton.final_states().iter().collect::<Vec<_>>(), vec!["q3"]);
        assert_eq!(automaton.simulate(""), Ok(true));
        assert_eq!(automaton.simulate("aaa"), Ok(true));
    }

    #[test]
    fn test_build_failures() {
        assert_eq!(
            build_fresh("|"),
            Err(BuildError::InsufficientOperands(Operator::Union))
        );
        assert_eq!(
            build_fresh("a."),
            Err(BuildError::InsufficientOperands(Operator::Concatenation))
        );
        assert_eq!(
            build_fresh("*"),
            Err(BuildError::InsufficientOperands(Operator::Closure))
        );
        assert_eq!(build_fresh(""), Err(BuildError::IncompleteExpression));
        assert_eq!(build_fresh("ab"), Err(BuildError::DanglingOperands(2)));
        assert_eq!(build_fresh("a(|"), Err(BuildError::InvalidToken('(')));
    }

    #[test]
    fn test_shared_counter() {
        let mut counter = FreshStateCounter::new();
        let first = build("a", &mut counter).unwrap();
        let second = build("a", &mut counter).unwrap();

        // Names are never handed out twice by the same counter.
        assert!(first.states().is_disjoint(second.states()));
        assert_eq!(counter.count(), 4);
    }
}
