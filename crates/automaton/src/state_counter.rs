/// The name of a state, e.g. `q3` or the composite `{q0,q2}`.
pub type StateName = String;

/// Supplies unique state names `q0, q1, q2, ...` for the fragments of a single
/// build. Every build should own its own counter, it is passed explicitly so
/// that independent builds never interfere.
#[derive(Debug, Default)]
pub struct FreshStateCounter {
    next: usize,
}

impl FreshStateCounter {
    /// Creates a counter that starts at `q0`.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns a state name that has not been handed out by this counter before.
    pub fn fresh(&mut self) -> StateName {
        let name = format!("q{}", self.next);
        self.next += 1;
        name
    }

    /// Returns the number of names that have been handed out.
    pub fn count(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_names() {
        let mut counter = FreshStateCounter::new();
        assert_eq!(counter.fresh(), "q0");
        assert_eq!(counter.fresh(), "q1");
        assert_eq!(counter.count(), 2);

        // Independent counters do not share their sequence.
        let mut other = FreshStateCounter::new();
        assert_eq!(other.fresh(), "q0");
        assert_eq!(counter.fresh(), "q2");
    }
}
