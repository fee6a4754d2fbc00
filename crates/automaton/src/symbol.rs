use std::fmt;

/// The label of a transition, either an input symbol or the reserved epsilon
/// marker. Since the alphabet of an automaton only contains `char`s, epsilon
/// can never be part of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl Symbol {
    /// Returns true iff this is the epsilon marker.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(Symbol::Epsilon.is_epsilon());
        assert!(!Symbol::Char('a').is_epsilon());
        assert_eq!(Symbol::Char('b').to_string(), "b");
        assert_eq!(Symbol::Epsilon.to_string(), "ε");

        // Epsilon is ordered before all input symbols.
        assert!(Symbol::Epsilon < Symbol::Char('0'));
    }
}
