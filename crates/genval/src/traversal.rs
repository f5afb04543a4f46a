//! Cycle guard for walks over nested tables.

/// Records the tables on the current walk path.
///
/// Packing and JSON rendering call [`Traversal::enter`] before descending
/// into a table and [`Traversal::leave`] after it; a table that is already
/// on the path is not entered again. Equality tracks pairs of tables under
/// comparison the same way.
#[derive(Debug, Default)]
pub(crate) struct Traversal {
    path: Vec<usize>,
    pairs: Vec<(usize, usize)>,
}

impl Traversal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns false when `id` is already on the path.
    pub(crate) fn enter(&mut self, id: usize) -> bool {
        if self.path.contains(&id) {
            return false;
        }
        self.path.push(id);
        true
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    /// Returns false when the pair is already being compared.
    pub(crate) fn enter_pair(&mut self, left: usize, right: usize) -> bool {
        if self.pairs.contains(&(left, right)) {
            return false;
        }
        self.pairs.push((left, right));
        true
    }

    pub(crate) fn leave_pair(&mut self) {
        self.pairs.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reentry_is_refused_until_leave() {
        let mut tr = Traversal::new();
        assert!(tr.enter(1));
        assert!(tr.enter(2));
        assert!(!tr.enter(1));
        tr.leave();
        tr.leave();
        assert!(tr.enter(1));
    }

    #[test]
    fn test_pairs() {
        let mut tr = Traversal::new();
        assert!(tr.enter_pair(1, 2));
        assert!(!tr.enter_pair(1, 2));
        assert!(tr.enter_pair(2, 1));
        tr.leave_pair();
        tr.leave_pair();
        assert!(tr.enter_pair(1, 2));
    }
}
