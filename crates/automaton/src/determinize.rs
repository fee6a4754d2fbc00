//! Subset construction algorithm for converting an epsilon automaton into a
//! deterministic automaton.

use std::collections::VecDeque;

use log::debug;
use log::trace;
use rustc_hash::FxHashMap;

use rafa_collections::VecSet;

use crate::Automaton;
use crate::StateName;
use crate::Symbol;

/// Converts the given automaton into a deterministic automaton that accepts
/// the same language.
///
/// Every state of the result is a composite state, i.e. a set of states of
/// the input, named by its sorted contents such as `{q0,q2,q5}`. Only
/// composite states that are reachable from the initial one are constructed,
/// and composite states without outgoing transitions on a symbol have no
/// transition for it, so the result can be partial.
///
/// The input should satisfy [`Automaton::validate`].
pub fn determinize(nfa: &Automaton) -> Automaton {
    let closures = EpsilonClosures::new(nfa);
    let final_states: VecSet<StateName> = nfa.final_states().iter().cloned().collect();

    // Maps every composite state that was discovered to its name.
    let mut discovered: FxHashMap<VecSet<StateName>, StateName> = FxHashMap::default();
    let mut queue: VecDeque<VecSet<StateName>> = VecDeque::new();

    let initial = closures.closure(nfa.initial_state());
    let initial_name = initial.to_string();

    let mut dfa = Automaton::with_initial_state(initial_name.clone());
    for symbol in nfa.alphabet() {
        dfa.insert_symbol(*symbol);
    }
    if initial.intersects(&final_states) {
        dfa.add_final_state(initial_name.clone());
    }

    discovered.insert(initial.clone(), initial_name);
    queue.push_back(initial);

    while let Some(current) = queue.pop_front() {
        let current_name = discovered.get(&current).cloned().unwrap_or_else(|| current.to_string());

        for &symbol in nfa.alphabet() {
            // The states reachable by the symbol, followed by any number of epsilon transitions.
            let mut next: VecSet<StateName> = VecSet::new();
            for state in &current {
                for target in nfa.targets(state, Symbol::Char(symbol)).into_iter().flatten() {
                    next.union_with(&closures.closure(target));
                }
            }

            if next.is_empty() {
                continue;
            }

            let next_name = if let Some(name) = discovered.get(&next) {
                name.clone()
            } else {
                let name = next.to_string();
                trace!("Discovered composite state {name}");

                dfa.insert_state(name.clone());
                if next.intersects(&final_states) {
                    dfa.add_final_state(name.clone());
                }

                discovered.insert(next.clone(), name.clone());
                queue.push_back(next);
                name
            };

            dfa.add_transition(&current_name, Symbol::Char(symbol), &next_name);
        }
    }

    debug!(
        "Determinized automaton with {} states into {} composite states",
        nfa.num_of_states(),
        dfa.num_of_states()
    );

    dfa
}

/// The epsilon closures of all states of an automaton, computed once.
struct EpsilonClosures<'a> {
    nfa: &'a Automaton,
    closures: FxHashMap<&'a str, VecSet<StateName>>,
}

impl<'a> EpsilonClosures<'a> {
    fn new(nfa: &'a Automaton) -> Self {
        let closures = nfa
            .states()
            .iter()
            .map(|state| (state.as_str(), nfa.epsilon_closure(state)))
            .collect();

        Self { nfa, closures }
    }

    /// Returns the epsilon closure of the given state.
    fn closure(&self, state: &str) -> VecSet<StateName> {
        match self.closures.get(state) {
            Some(closure) => closure.clone(),
            // Only happens for targets outside of the set of states, which validation rejects.
            None => self.nfa.epsilon_closure(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::FreshStateCounter;
    use crate::build;
    use crate::convert;

    fn determinize_expression(expression: &str) -> Automaton {
        let postfix = convert(expression).unwrap();
        let nfa = build(&postfix, &mut FreshStateCounter::new()).unwrap();
        determinize(&nfa)
    }

    #[test]
    fn test_subset_construction_basic() {
        // q0 -a-> q1, q0 -a-> q2, q1 -b-> q3, q2 -b-> q3 with q3 final.
        let nfa = Automaton::new(
            ["q0", "q1", "q2", "q3"],
            ['a', 'b'],
            [
                ("q0", Symbol::Char('a'), "q1"),
                ("q0", Symbol::Char('a'), "q2"),
                ("q1", Symbol::Char('b'), "q3"),
                ("q2", Symbol::Char('b'), "q3"),
            ],
            "q0",
            ["q3"],
        );

        let dfa = determinize(&nfa);

        assert_eq!(dfa.initial_state(), "{q0}");
        assert_eq!(
            dfa.states().iter().collect::<Vec<_>>(),
            vec!["{q0}", "{q1,q2}", "{q3}"]
        );
        assert_eq!(dfa.final_states().iter().collect::<Vec<_>>(), vec!["{q3}"]);
        assert!(dfa.is_deterministic());
        assert!(dfa.validate());
        assert_eq!(dfa.accepts("ab"), Ok(true));
    }

    #[test]
    fn test_subset_construction_with_epsilon() {
        // q0 -ε-> q1 -a-> q2 with q2 final.
        let nfa = Automaton::new(
            ["q0", "q1", "q2"],
            ['a'],
            [("q0", Symbol::Epsilon, "q1"), ("q1", Symbol::Char('a'), "q2")],
            "q0",
            ["q2"],
        );

        let dfa = determinize(&nfa);

        assert_eq!(dfa.initial_state(), "{q0,q1}");
        assert_eq!(dfa.targets("{q0,q1}", Symbol::Char('a')).map(|t| t.to_string()), Some("{{q2}}".to_string()));
        assert_eq!(dfa.accepts("a"), Ok(true));
        assert_eq!(dfa.accepts(""), Ok(false));
    }

    #[test]
    fn test_determinize_union() {
        let dfa = determinize_expression("a|b");

        assert!(dfa.is_deterministic());
        assert_eq!(dfa.accepts("a"), Ok(true));
        assert_eq!(dfa.accepts("b"), Ok(true));
        assert_eq!(dfa.accepts(""), Ok(false));
        assert!(dfa.accepts("ab").is_err());
    }

    #[test]
    fn test_determinize_closure() {
        let dfa = determinize_expression("a*");

        // The initial composite state is accepting since a* contains the empty word.
        assert!(dfa.is_final(dfa.initial_state()));
        assert_eq!(dfa.accepts(""), Ok(true));
        assert_eq!(dfa.accepts("aaaa"), Ok(true));
    }

    #[test]
    fn test_determinize_without_final_states() {
        let nfa = Automaton::new(["p", "q"], ['a'], [("p", Symbol::Char('a'), "q")], "p", Vec::<&str>::new());

        let dfa = determinize(&nfa);

        assert!(dfa.final_states().is_empty());
        assert_eq!(dfa.num_of_states(), 2);
        assert_eq!(dfa.accepts("a"), Ok(false));
    }
}
