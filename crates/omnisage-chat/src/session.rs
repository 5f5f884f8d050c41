//! Session history: the ordered, append-only log of turns for one session.

use omnisage_core::types::Turn;

/// Ordered log of turns, oldest first.
///
/// Turns are only ever appended; the log is discarded as a whole by
/// [`SessionHistory::clear`].
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    turns: Vec<Turn>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a turn to the end of the log.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Discard every turn. Idempotent.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// The last `n` turns in chronological order, or all turns if fewer exist.
    pub fn snapshot(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Every turn, for rendering the transcript.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use omnisage_core::types::Role;

    fn history_of(n: usize) -> SessionHistory {
        let mut history = SessionHistory::new();
        for i in 0..n {
            if i % 2 == 0 {
                history.append(Turn::user(format!("q{}", i)));
            } else {
                history.append(Turn::assistant(format!("a{}", i)));
            }
        }
        history
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = SessionHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.snapshot(6).is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let history = history_of(3);
        let contents: Vec<&str> = history.turns().iter().map(|t| t.content()).collect();
        assert_eq!(contents, vec!["q0", "a1", "q2"]);
    }

    #[test]
    fn test_snapshot_returns_last_n_in_order() {
        let history = history_of(10);
        let snap = history.snapshot(6);
        assert_eq!(snap.len(), 6);
        let contents: Vec<&str> = snap.iter().map(|t| t.content()).collect();
        assert_eq!(contents, vec!["q4", "a5", "q6", "a7", "q8", "a9"]);
    }

    #[test]
    fn test_snapshot_fewer_than_n_returns_all() {
        let history = history_of(4);
        assert_eq!(history.snapshot(6), history.turns());
    }

    #[test]
    fn test_snapshot_for_every_length() {
        for len in 0..12 {
            let history = history_of(len);
            for n in 0..9 {
                let snap = history.snapshot(n);
                let expected = &history.turns()[len.saturating_sub(n)..];
                assert_eq!(snap, expected, "len={} n={}", len, n);
            }
        }
    }

    #[test]
    fn test_snapshot_zero_is_empty() {
        assert!(history_of(5).snapshot(0).is_empty());
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let history = history_of(8);
        let _ = history.snapshot(2);
        let _ = history.snapshot(100);
        assert_eq!(history.len(), 8);
    }

    #[test]
    fn test_clear_then_snapshot_is_empty() {
        for len in [0, 1, 6, 20] {
            let mut history = history_of(len);
            history.clear();
            assert!(history.snapshot(6).is_empty());
            assert!(history.is_empty());
        }
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut history = history_of(3);
        history.clear();
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_append_after_clear() {
        let mut history = history_of(3);
        history.clear();
        history.append(Turn::user("fresh"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.turns()[0].role(), Role::User);
        assert_eq!(history.turns()[0].content(), "fresh");
    }
}
