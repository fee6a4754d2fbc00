use std::ffi::OsStr;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use log::info;
use thiserror::Error;

use rafa_utilities::RafaError;

use crate::Automaton;
use crate::AutomatonDot;
use crate::write_aut;

#[derive(Error, Debug)]
pub enum IOError {
    #[error("The input does not contain a regular expression")]
    EmptyExpression,

    #[error("State {0} is used in a transition but is not in the set of states")]
    UnknownState(String),
}

/// Explicitly specify the output format of an automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum AutomatonFormat {
    /// The human readable listing of all components.
    Text,
    /// The Aldebaran format.
    Aut,
    /// The Graphviz DOT format.
    Dot,
}

/// Guesses the output format from the file extension, unless it is given explicitly.
pub fn guess_format_from_extension(path: &Path, format: Option<AutomatonFormat>) -> AutomatonFormat {
    if let Some(format) = format {
        return format;
    }

    if path.extension() == Some(OsStr::new("aut")) {
        AutomatonFormat::Aut
    } else if path.extension() == Some(OsStr::new("dot")) {
        AutomatonFormat::Dot
    } else {
        AutomatonFormat::Text
    }
}

/// Writes the automaton in the given format.
pub fn write_automaton(
    writer: &mut impl Write,
    automaton: &Automaton,
    format: AutomatonFormat,
) -> Result<(), RafaError> {
    match format {
        AutomatonFormat::Text => writeln!(writer, "{automaton}")?,
        AutomatonFormat::Aut => write_aut(writer, automaton)?,
        AutomatonFormat::Dot => write!(writer, "{}", AutomatonDot::new(automaton))?,
    }

    Ok(())
}

/// Reads the regular expression on the first line of the given reader, the
/// line ending and surrounding whitespace are removed.
pub fn read_expression(reader: impl Read) -> Result<String, RafaError> {
    let mut line = String::new();
    BufReader::new(reader).read_line(&mut line)?;

    let expression = line.trim();
    if expression.is_empty() {
        return Err(IOError::EmptyExpression.into());
    }

    info!("Read regular expression {expression}");
    Ok(expression.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_read_expression() {
        let input = "(a|b)*c\nignored second line\n";
        assert_eq!(read_expression(input.as_bytes()).unwrap(), "(a|b)*c");

        assert!(read_expression("".as_bytes()).is_err());
        assert!(read_expression("   \n(a|b)".as_bytes()).is_err());
    }

    #[test]
    fn test_guess_format() {
        assert_eq!(guess_format_from_extension(Path::new("out.aut"), None), AutomatonFormat::Aut);
        assert_eq!(guess_format_from_extension(Path::new("out.dot"), None), AutomatonFormat::Dot);
        assert_eq!(guess_format_from_extension(Path::new("out.txt"), None), AutomatonFormat::Text);
        assert_eq!(
            guess_format_from_extension(Path::new("out.aut"), Some(AutomatonFormat::Dot)),
            AutomatonFormat::Dot
        );
    }
}
