use std::fmt;

use crate::Automaton;

/// Helper to render an automaton in Graphviz DOT format, final states are
/// drawn with a double circle.
pub struct AutomatonDot<'a> {
    pub automaton: &'a Automaton,
}

impl<'a> AutomatonDot<'a> {
    /// Creates a new AutomatonDot Display for the given automaton.
    pub fn new(automaton: &'a Automaton) -> Self {
        Self { automaton }
    }
}

impl fmt::Display for AutomatonDot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph automaton {{")?;
        writeln!(f, "  rankdir=LR;")?;
        writeln!(f, "  node [fontname=\"DejaVu Sans\"];")?;
        writeln!(f, "  edge [fontname=\"DejaVu Sans\"];")?;

        for state in self.automaton.states() {
            let shape = if self.automaton.is_final(state) {
                "doublecircle"
            } else {
                "circle"
            };
            writeln!(f, "  \"{}\" [shape={shape}];", escape(state))?;
        }

        for (from, symbol, to) in self.automaton.transitions() {
            writeln!(f, "  \"{}\" -> \"{}\" [label=\"{symbol}\"];", escape(from), escape(to))?;
        }

        writeln!(f, "  init [shape=point, width=0.05, label=\"\"];")?;
        writeln!(f, "  init -> \"{}\" [arrowsize=0.6];", escape(self.automaton.initial_state()))?;
        writeln!(f, "}}")
    }
}

/// Escapes the quotes in a DOT identifier.
fn escape(name: &str) -> String {
    name.replace('"', "\\\"")
}
