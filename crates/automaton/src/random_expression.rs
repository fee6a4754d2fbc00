use rand::Rng;

/// Generates a random well-formed regular expression in infix notation over
/// the given alphabet, nesting parentheses at most `depth` levels deep.
///
/// The expression follows the grammar of the notation directly, so unions,
/// concatenations and closures are mixed without parentheses and rely on
/// operator precedence, e.g. `ab*|c`. Closures can be repeated as in `a**`,
/// parentheses can be redundant as in `(a)` and concatenation is written
/// either implicitly or with an explicit `.`.
///
/// # Panics
///
/// Panics when the alphabet is empty.
pub fn random_expression(rng: &mut impl Rng, depth: usize, alphabet: &[char]) -> String {
    assert!(!alphabet.is_empty(), "At least one symbol is required to generate an expression.");

    let mut expression = String::new();
    push_union(rng, depth, alphabet, &mut expression);
    expression
}

/// One or more concatenations separated by `|`.
fn push_union(rng: &mut impl Rng, depth: usize, alphabet: &[char], expression: &mut String) {
    push_concatenation(rng, depth, alphabet, expression);

    while depth > 0 && rng.random_bool(0.3) {
        expression.push('|');
        push_concatenation(rng, depth - 1, alphabet, expression);
    }
}

/// One or more factors written next to each other.
fn push_concatenation(rng: &mut impl Rng, depth: usize, alphabet: &[char], expression: &mut String) {
    push_factor(rng, depth, alphabet, expression);

    while depth > 0 && rng.random_bool(0.4) {
        if rng.random_bool(0.3) {
            expression.push('.');
        }
        push_factor(rng, depth - 1, alphabet, expression);
    }
}

/// A symbol or a parenthesized union, followed by any number of closures.
fn push_factor(rng: &mut impl Rng, depth: usize, alphabet: &[char], expression: &mut String) {
    if depth > 0 && rng.random_bool(0.3) {
        expression.push('(');
        push_union(rng, depth - 1, alphabet, expression);
        expression.push(')');
    } else {
        expression.push(alphabet[rng.random_range(0..alphabet.len())]);
    }

    while rng.random_bool(0.25) {
        expression.push('*');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use rafa_utilities::random_test;

    use crate::compile;

    #[test]
    fn test_random_expression() {
        random_test(100, |rng| {
            let expression = random_expression(rng, 4, &['a', 'b', 'c']);

            assert!(!expression.is_empty());
            assert!(
                expression
                    .chars()
                    .all(|c| matches!(c, 'a' | 'b' | 'c' | '(' | ')' | '|' | '.' | '*'))
            );
            assert!(compile(&expression).is_ok(), "{expression} should compile");
        })
    }

    #[test]
    fn test_random_expression_depth_zero() {
        random_test(10, |rng| {
            let expression = random_expression(rng, 0, &['x']);
            assert_eq!(expression.trim_end_matches('*'), "x");
        })
    }

    #[test]
    #[should_panic(expected = "At least one symbol")]
    fn test_random_expression_empty_alphabet() {
        random_test(1, |rng| {
            random_expression(rng, 2, &[]);
        })
    }

    /// Returns true iff the expression contains a `|` outside of all parentheses.
    fn has_top_level_union(expression: &str) -> bool {
        let mut nesting = 0;
        for c in expression.chars() {
            match c {
                '(' => nesting += 1,
                ')' => nesting -= 1,
                '|' if nesting == 0 => return true,
                _ => {}
            }
        }

        false
    }

    #[test]
    fn test_random_expression_uses_precedence() {
        let mut unparenthesized_union = false;
        let mut repeated_closure = false;

        random_test(500, |rng| {
            let expression = random_expression(rng, 3, &['a', 'b']);
            unparenthesized_union |= has_top_level_union(&expression);
            repeated_closure |= expression.contains("**");
        });

        assert!(unparenthesized_union);
        assert!(repeated_closure);
    }
}
