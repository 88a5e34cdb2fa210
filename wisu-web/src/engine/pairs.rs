//! Pair generation and judged-pair filtering

use std::collections::HashSet;
use uuid::Uuid;
use wisu_common::db::models::{Idea, Vote};

/// Canonical identity of an unordered idea pair.
///
/// `PairKey::new(a, b) == PairKey::new(b, a)` for all a, b; the lower uuid
/// always sits first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    lo: Uuid,
    hi: Uuid,
}

impl PairKey {
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }
}

/// All unordered 2-combinations of the given ideas, in input order.
///
/// Produces exactly n(n-1)/2 pairs; fewer than two ideas yields none.
pub fn generate_pairs(ideas: &[Idea]) -> Vec<(Idea, Idea)> {
    let mut pairs = Vec::with_capacity(ideas.len().saturating_sub(1) * ideas.len() / 2);
    for (i, a) in ideas.iter().enumerate() {
        for b in &ideas[i + 1..] {
            pairs.push((a.clone(), b.clone()));
        }
    }
    pairs
}

/// Canonical keys of every pair the visitor has already judged,
/// regardless of which idea won.
pub fn judged_keys(votes: &[Vote]) -> HashSet<PairKey> {
    votes
        .iter()
        .map(|v| PairKey::new(v.winner_idea_id, v.loser_idea_id))
        .collect()
}

/// Remove already-judged pairs, preserving input order.
///
/// Pairs involving ideas added after earlier votes are never filtered, so
/// a growing idea set keeps surfacing fresh comparisons.
pub fn available_pairs(
    all_pairs: Vec<(Idea, Idea)>,
    judged: &HashSet<PairKey>,
) -> Vec<(Idea, Idea)> {
    all_pairs
        .into_iter()
        .filter(|(a, b)| !judged.contains(&PairKey::new(a.id, b.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisu_common::db::models::Provenance;
    use wisu_common::Sentiment;

    fn idea(question_id: Uuid, text: &str) -> Idea {
        Idea::new(
            question_id,
            text.to_string(),
            Provenance::Original,
            None,
            Sentiment::neutral(),
        )
    }

    fn vote(question_id: Uuid, winner: Uuid, loser: Uuid) -> Vote {
        Vote::new("visitor-1".to_string(), question_id, winner, loser)
    }

    #[test]
    fn pair_key_is_order_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
    }

    #[test]
    fn pair_count_is_n_choose_2() {
        let q = Uuid::new_v4();
        for n in 0..8usize {
            let ideas: Vec<Idea> = (0..n).map(|i| idea(q, &format!("idea {i}"))).collect();
            let pairs = generate_pairs(&ideas);
            assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);

            // No self-pairs, no duplicates
            let keys: HashSet<PairKey> =
                pairs.iter().map(|(a, b)| PairKey::new(a.id, b.id)).collect();
            assert_eq!(keys.len(), pairs.len());
            assert!(pairs.iter().all(|(a, b)| a.id != b.id));
        }
    }

    #[test]
    fn fewer_than_two_ideas_yields_no_pairs() {
        let q = Uuid::new_v4();
        assert!(generate_pairs(&[]).is_empty());
        assert!(generate_pairs(&[idea(q, "only one")]).is_empty());
    }

    #[test]
    fn judged_pair_never_reappears() {
        let q = Uuid::new_v4();
        let ideas = vec![idea(q, "A"), idea(q, "B"), idea(q, "C")];
        let (a, b, c) = (ideas[0].id, ideas[1].id, ideas[2].id);

        let votes = vec![vote(q, a, b)];
        let judged = judged_keys(&votes);
        let remaining = available_pairs(generate_pairs(&ideas), &judged);

        assert_eq!(remaining.len(), 2);
        let keys: HashSet<PairKey> = remaining
            .iter()
            .map(|(x, y)| PairKey::new(x.id, y.id))
            .collect();
        assert!(!keys.contains(&PairKey::new(a, b)));
        assert!(keys.contains(&PairKey::new(a, c)));
        assert!(keys.contains(&PairKey::new(b, c)));

        // Reversed vote direction filters the same pair
        let judged_rev = judged_keys(&[vote(q, b, a)]);
        let remaining_rev = available_pairs(generate_pairs(&ideas), &judged_rev);
        assert_eq!(remaining_rev.len(), 2);
    }

    #[test]
    fn availability_is_monotone_in_votes() {
        let q = Uuid::new_v4();
        let ideas = vec![idea(q, "A"), idea(q, "B"), idea(q, "C"), idea(q, "D")];
        let all = generate_pairs(&ideas);

        let mut votes = Vec::new();
        let mut last_len = all.len();
        for (a, b) in all.clone() {
            votes.push(vote(q, a.id, b.id));
            let len = available_pairs(all.clone(), &judged_keys(&votes)).len();
            assert!(len <= last_len);
            last_len = len;
        }
        assert_eq!(last_len, 0);
    }

    #[test]
    fn new_idea_adds_pairs_without_filtering() {
        let q = Uuid::new_v4();
        let mut ideas = vec![idea(q, "A"), idea(q, "B")];
        let votes = vec![vote(q, ideas[0].id, ideas[1].id)];
        let judged = judged_keys(&votes);

        assert!(available_pairs(generate_pairs(&ideas), &judged).is_empty());

        ideas.push(idea(q, "C (contributed)"));
        let remaining = available_pairs(generate_pairs(&ideas), &judged);
        // Both new pairs involve C and survive the filter
        assert_eq!(remaining.len(), 2);
        assert!(remaining
            .iter()
            .all(|(a, b)| a.id == ideas[2].id || b.id == ideas[2].id));
    }
}
