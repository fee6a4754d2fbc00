use std::fmt;

/// The operators of a regular expression, in infix notation `a|b`, `a.b` and
/// `a*` respectively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Union,
    Concatenation,
    Closure,
}

impl Operator {
    /// Returns the operator written as the given character.
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '|' => Some(Operator::Union),
            '.' => Some(Operator::Concatenation),
            '*' => Some(Operator::Closure),
            _ => None,
        }
    }

    /// Returns the character that denotes this operator.
    pub fn as_char(self) -> char {
        match self {
            Operator::Union => '|',
            Operator::Concatenation => '.',
            Operator::Closure => '*',
        }
    }

    /// The binding strength, a higher value binds stronger.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Union => 1,
            Operator::Concatenation => 2,
            Operator::Closure => 3,
        }
    }

    /// Returns the number of operands that the operator takes.
    pub fn arity(self) -> usize {
        match self {
            Operator::Union | Operator::Concatenation => 2,
            Operator::Closure => 1,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Returns true iff the character can be used as an input symbol of an expression.
pub fn is_operand(c: char) -> bool {
    c.is_alphanumeric()
}
