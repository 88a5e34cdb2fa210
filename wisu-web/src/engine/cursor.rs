//! Per-session vote cursor
//!
//! The cursor is an explicit value the client carries between calls; the
//! server never holds ambient per-visitor position state. Each request
//! recomputes the eligible-question snapshot from live vote data and the
//! cursor re-aligns itself against it, so exhausted questions drop out on
//! the next access and a fresh idea or question exits the terminal state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One question that still has at least one available pair for the visitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleQuestion {
    pub question_id: Uuid,
    pub pair_count: usize,
}

/// A visitor's position in the voting flow: which question, which pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCursor {
    pub question_index: usize,
    pub pair_index: usize,
    pub question_id: Option<Uuid>,
}

impl VoteCursor {
    /// Cursor at the first eligible question, first pair
    pub fn initial() -> Self {
        Self::default()
    }

    /// Re-align against a freshly computed snapshot.
    ///
    /// Prefers the remembered question id; a vanished question or an
    /// out-of-range index clamps to the start rather than erroring.
    /// Returns false when no question has available pairs (terminal).
    pub fn resolve(&mut self, eligible: &[EligibleQuestion]) -> bool {
        if eligible.is_empty() {
            return false;
        }

        let index = self
            .question_id
            .and_then(|id| eligible.iter().position(|q| q.question_id == id))
            .unwrap_or_else(|| {
                if self.question_index < eligible.len() {
                    self.question_index
                } else {
                    0
                }
            });

        self.question_index = index;
        self.question_id = Some(eligible[index].question_id);
        if self.pair_index >= eligible[index].pair_count {
            self.pair_index = 0;
        }
        true
    }

    /// Move to the next pair, wrapping into the next eligible question when
    /// the current question's pairs are exhausted.
    ///
    /// Returns false when nothing is left to judge (terminal state).
    pub fn advance(&mut self, eligible: &[EligibleQuestion]) -> bool {
        if !self.resolve(eligible) {
            return false;
        }

        if self.pair_index + 1 < eligible[self.question_index].pair_count {
            self.pair_index += 1;
            return true;
        }

        self.pair_index = 0;
        if self.question_index + 1 < eligible.len() {
            self.question_index += 1;
            self.question_id = Some(eligible[self.question_index].question_id);
            true
        } else {
            self.question_id = None;
            false
        }
    }

    /// Explicit user navigation to a chosen eligible question.
    ///
    /// An unknown question id clamps to the first eligible question.
    /// Returns false when no question has available pairs.
    pub fn change_question(
        &mut self,
        question_id: Uuid,
        eligible: &[EligibleQuestion],
    ) -> bool {
        if eligible.is_empty() {
            return false;
        }

        let index = eligible
            .iter()
            .position(|q| q.question_id == question_id)
            .unwrap_or(0);
        self.question_index = index;
        self.question_id = Some(eligible[index].question_id);
        self.pair_index = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eligible(counts: &[usize]) -> Vec<EligibleQuestion> {
        counts
            .iter()
            .map(|&pair_count| EligibleQuestion {
                question_id: Uuid::new_v4(),
                pair_count,
            })
            .collect()
    }

    #[test]
    fn empty_snapshot_is_terminal() {
        let mut cursor = VoteCursor::initial();
        assert!(!cursor.resolve(&[]));
        assert!(!cursor.advance(&[]));
    }

    #[test]
    fn initial_cursor_points_at_first_question() {
        let questions = eligible(&[3, 2]);
        let mut cursor = VoteCursor::initial();
        assert!(cursor.resolve(&questions));
        assert_eq!(cursor.question_index, 0);
        assert_eq!(cursor.pair_index, 0);
        assert_eq!(cursor.question_id, Some(questions[0].question_id));
    }

    #[test]
    fn advance_walks_pairs_then_questions() {
        let questions = eligible(&[2, 1]);
        let mut cursor = VoteCursor::initial();
        cursor.resolve(&questions);

        assert!(cursor.advance(&questions));
        assert_eq!((cursor.question_index, cursor.pair_index), (0, 1));

        assert!(cursor.advance(&questions));
        assert_eq!((cursor.question_index, cursor.pair_index), (1, 0));
        assert_eq!(cursor.question_id, Some(questions[1].question_id));

        // Last pair of the last question: terminal
        assert!(!cursor.advance(&questions));
        assert_eq!(cursor.question_id, None);
    }

    #[test]
    fn vanished_question_clamps_to_start() {
        let questions = eligible(&[2, 2, 2]);
        let mut cursor = VoteCursor::initial();
        cursor.change_question(questions[2].question_id, &questions);
        cursor.pair_index = 1;

        // The question the cursor sat on got exhausted and dropped out
        let shrunk = vec![questions[0].clone(), questions[1].clone()];
        assert!(cursor.resolve(&shrunk));
        assert_eq!(cursor.question_index, 0);
        assert_eq!(cursor.question_id, Some(shrunk[0].question_id));
    }

    #[test]
    fn shrunken_pair_list_resets_pair_index() {
        let questions = eligible(&[5]);
        let mut cursor = VoteCursor::initial();
        cursor.resolve(&questions);
        cursor.pair_index = 4;

        let mut shrunk = questions.clone();
        shrunk[0].pair_count = 2;
        assert!(cursor.resolve(&shrunk));
        assert_eq!(cursor.pair_index, 0);
    }

    #[test]
    fn change_question_resets_pair_index() {
        let questions = eligible(&[3, 3]);
        let mut cursor = VoteCursor::initial();
        cursor.resolve(&questions);
        cursor.advance(&questions);
        assert_eq!(cursor.pair_index, 1);

        assert!(cursor.change_question(questions[1].question_id, &questions));
        assert_eq!(cursor.question_index, 1);
        assert_eq!(cursor.pair_index, 0);
    }

    #[test]
    fn change_to_unknown_question_clamps() {
        let questions = eligible(&[1, 1]);
        let mut cursor = VoteCursor::initial();
        assert!(cursor.change_question(Uuid::new_v4(), &questions));
        assert_eq!(cursor.question_index, 0);
    }

    #[test]
    fn terminal_state_is_not_sticky() {
        let mut cursor = VoteCursor::initial();
        assert!(!cursor.resolve(&[]));

        // A new question with pairs appears; the same cursor re-enters flow
        let questions = eligible(&[1]);
        assert!(cursor.resolve(&questions));
        assert_eq!(cursor.question_index, 0);
        assert_eq!(cursor.pair_index, 0);
    }
}
