//!
//! Conversion of infix regular expressions into postfix (Polish) form.
//!

use log::debug;
use thiserror::Error;

use crate::Operator;
use crate::is_operand;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid character '{0}' in the expression")]
    InvalidCharacter(char),

    #[error("The parentheses in the expression are not balanced")]
    UnbalancedParentheses,
}

/// An entry of the operator stack used by the conversion.
#[derive(Clone, Copy, Debug)]
enum StackEntry {
    OpenParenthesis,
    Operator(Operator),
}

/// Converts an infix expression such as `(a|b)*c` into postfix form with
/// explicit concatenation, i.e. `ab|*c.`.
///
/// The operators bind as `*` > `.` > `|`, operands are alphanumeric
/// characters and whitespace is ignored.
pub fn convert(infix: &str) -> Result<String, ConversionError> {
    let explicit = insert_concatenation(infix);
    let postfix = to_postfix(&explicit)?;

    debug!("Converted {infix} into postfix form {postfix}");
    Ok(postfix)
}

/// Inserts the concatenation operator `.` between every two adjacent
/// operands, e.g. `a(b|c)*d` becomes `a.(b|c)*.d`.
///
/// An operand starts with an alphanumeric character or `(`, and the
/// previous operand ends with an alphanumeric character, `)` or `*`.
/// Whitespace between the two does not separate them.
pub fn insert_concatenation(infix: &str) -> String {
    let mut result = String::with_capacity(infix.len() * 2);
    let mut previous_ends_operand = false;

    for c in infix.chars() {
        if c.is_whitespace() {
            result.push(c);
            continue;
        }

        if previous_ends_operand && (is_operand(c) || c == '(') {
            result.push(Operator::Concatenation.as_char());
        }

        previous_ends_operand = is_operand(c) || c == ')' || c == Operator::Closure.as_char();
        result.push(c);
    }

    result
}

/// The shunting-yard pass over an expression in which all concatenations are explicit.
fn to_postfix(expression: &str) -> Result<String, ConversionError> {
    let mut postfix = String::with_capacity(expression.len());
    let mut stack: Vec<StackEntry> = Vec::new();

    for c in expression.chars() {
        if c.is_whitespace() {
            continue;
        }

        if is_operand(c) {
            postfix.push(c);
        } else if c == '(' {
            stack.push(StackEntry::OpenParenthesis);
        } else if c == ')' {
            // Emit everything up to the matching parenthesis, which is discarded.
            loop {
                match stack.pop() {
                    Some(StackEntry::OpenParenthesis) => break,
                    Some(StackEntry::Operator(op)) => postfix.push(op.as_char()),
                    None => return Err(ConversionError::UnbalancedParentheses),
                }
            }
        } else if let Some(op) = Operator::from_char(c) {
            // Only strictly stronger binding operators are emitted, equal ones stay on the stack.
            while let Some(StackEntry::Operator(top)) = stack.last().copied() {
                if top.precedence() <= op.precedence() {
                    break;
                }

                postfix.push(top.as_char());
                stack.pop();
            }

            stack.push(StackEntry::Operator(op));
        } else {
            return Err(ConversionError::InvalidCharacter(c));
        }
    }

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Operator(op) => postfix.push(op.as_char()),
            StackEntry::OpenParenthesis => return Err(ConversionError::UnbalancedParentheses),
        }
    }

    Ok(postfix)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_insert_concatenation() {
        assert_eq!(insert_concatenation("ab"), "a.b");
        assert_eq!(insert_concatenation("a(b|c)*d"), "a.(b|c)*.d");
        assert_eq!(insert_concatenation("(a)(b)"), "(a).(b)");
        assert_eq!(insert_concatenation("a|b"), "a|b");
        assert_eq!(insert_concatenation("a.b"), "a.b");
        assert_eq!(insert_concatenation("a b"), "a .b");
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert("a|b").unwrap(), "ab|");
        assert_eq!(convert("ab").unwrap(), "ab.");
        assert_eq!(convert("a*").unwrap(), "a*");
        assert_eq!(convert("(a|b)*c").unwrap(), "ab|*c.");
        assert_eq!(convert("a|bc").unwrap(), "abc.|");
        assert_eq!(convert("ab*").unwrap(), "ab*.");
        assert_eq!(convert("a*|b*").unwrap(), "a*b*|");
        assert_eq!(convert(" a | b ").unwrap(), "ab|");
        assert_eq!(convert("x1y").unwrap(), "x1y..");
        assert_eq!(convert("").unwrap(), "");
    }

    #[test]
    fn test_convert_precedence() {
        // Concatenation binds stronger than union.
        assert_eq!(convert("a.b|c").unwrap(), "ab.c|");
        assert_eq!(convert("a|b.c").unwrap(), "abc.|");

        // Closure binds stronger than concatenation.
        assert_eq!(convert("ab*c").unwrap(), "ab*c..");
        assert_eq!(convert("(ab)*").unwrap(), "ab.*");
    }

    #[test]
    fn test_convert_failures() {
        assert_eq!(convert("a+b"), Err(ConversionError::InvalidCharacter('+')));
        assert_eq!(convert("(a|b"), Err(ConversionError::UnbalancedParentheses));
        assert_eq!(convert("a|b)"), Err(ConversionError::UnbalancedParentheses));
        assert_eq!(convert(")("), Err(ConversionError::UnbalancedParentheses));
        assert_eq!(convert("a[b]"), Err(ConversionError::InvalidCharacter('[')));
    }
}
