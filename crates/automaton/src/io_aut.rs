use std::io::BufWriter;
use std::io::Write;

use log::info;
use rustc_hash::FxHashMap;

use rafa_utilities::RafaError;

use crate::Automaton;
use crate::IOError;
use crate::Symbol;

/// Write an automaton in plain text in the Aldebaran format to the given
/// writer. Note that the writer is buffered internally using a `BufWriter`.
///
/// The format consists of a header `des (<initial>, <num_of_transitions>,
/// <num_of_states>)` followed by one `(<from>, "<label>", <to>)` line per
/// transition. States are numbered with the initial state as zero, epsilon
/// transitions get the hidden label `tau`. The format has no notion of final
/// states, so these are not written.
pub fn write_aut(writer: &mut impl Write, automaton: &Automaton) -> Result<(), RafaError> {
    info!("Writing automaton in .aut format...");

    let indices = state_indices(automaton);
    let mut writer = BufWriter::new(writer);

    writeln!(
        writer,
        "des (0, {}, {})",
        automaton.num_of_transitions(),
        automaton.num_of_states()
    )?;

    for (from, symbol, to) in automaton.transitions() {
        let from_index = indices.get(from).ok_or_else(|| IOError::UnknownState(from.to_string()))?;
        let to_index = indices.get(to).ok_or_else(|| IOError::UnknownState(to.to_string()))?;

        match symbol {
            Symbol::Epsilon => writeln!(writer, "({from_index}, \"tau\", {to_index})")?,
            Symbol::Char(c) => writeln!(writer, "({from_index}, \"{c}\", {to_index})")?,
        }
    }

    writer.flush()?;
    Ok(())
}

/// Numbers the states, the initial state is always zero and the others follow in sorted order.
fn state_indices(automaton: &Automaton) -> FxHashMap<&str, usize> {
    let mut indices: FxHashMap<&str, usize> = FxHashMap::default();
    indices.insert(automaton.initial_state(), 0);

    for state in automaton.states() {
        let next = indices.len();
        indices.entry(state.as_str()).or_insert(next);
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use test_log::test;

    use crate::compile;

    #[test]
    fn test_writing_aut() {
        let compiled = compile("ab").unwrap();

        let mut buffer: Vec<u8> = Vec::new();
        write_aut(&mut buffer, compiled.nfa()).unwrap();

        let expected = indoc! {r#"
            des (0, 3, 4)
            (0, "a", 1)
            (1, "tau", 2)
            (2, "b", 3)
        "#};
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn test_writing_aut_initial_first() {
        let compiled = compile("a*").unwrap();

        let mut buffer: Vec<u8> = Vec::new();
        write_aut(&mut buffer, compiled.nfa()).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        // The closure introduces q2 as initial state, which must become state zero.
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("des (0, 5, 4)"));
        assert_eq!(lines.filter(|line| line.starts_with("(0, \"tau\"")).count(), 2);
    }

    #[test]
    fn test_writing_aut_unknown_state() {
        let automaton = Automaton::new(["p"], ['a'], [("p", Symbol::Char('a'), "x")], "p", ["p"]);

        let mut buffer: Vec<u8> = Vec::new();
        assert!(write_aut(&mut buffer, &automaton).is_err());
    }
}
