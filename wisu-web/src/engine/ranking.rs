//! Win/loss ranking over the vote ledger
//!
//! Raw counts only: no Elo or Bradley-Terry model. Tie votes were recorded
//! as directional wins, so they count toward whichever idea was passed as
//! the winner.

use std::collections::HashMap;
use uuid::Uuid;
use wisu_common::db::models::{Idea, Vote};

/// Aggregated standing of one idea within its question
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IdeaRank {
    pub idea_id: Uuid,
    pub text: String,
    pub wins: i64,
    pub losses: i64,
    pub total: i64,
    /// wins / total * 100, or 0.0 when the idea has no votes
    pub score: f64,
}

/// Rank ideas by pairwise preference score.
///
/// Two passes over the ledger: tally wins in vote order, then fold in
/// losses so ideas that only ever lost still appear (with wins = 0).
/// Ideas with no votes at all are absent. Sorted descending by score;
/// equal scores keep first-appearance order.
pub fn rank_ideas(ideas: &[Idea], votes: &[Vote]) -> Vec<IdeaRank> {
    let texts: HashMap<Uuid, &str> = ideas.iter().map(|i| (i.id, i.text.as_str())).collect();

    let mut order: Vec<Uuid> = Vec::new();
    let mut tally: HashMap<Uuid, (i64, i64)> = HashMap::new();

    let touch = |id: Uuid, order: &mut Vec<Uuid>, tally: &mut HashMap<Uuid, (i64, i64)>| {
        if !tally.contains_key(&id) {
            tally.insert(id, (0, 0));
            order.push(id);
        }
    };

    for vote in votes {
        touch(vote.winner_idea_id, &mut order, &mut tally);
        if let Some(entry) = tally.get_mut(&vote.winner_idea_id) {
            entry.0 += 1;
        }
    }

    for vote in votes {
        touch(vote.loser_idea_id, &mut order, &mut tally);
        if let Some(entry) = tally.get_mut(&vote.loser_idea_id) {
            entry.1 += 1;
        }
    }

    let mut ranked: Vec<IdeaRank> = order
        .into_iter()
        .filter_map(|id| {
            let (wins, losses) = tally[&id];
            let total = wins + losses;
            let score = if total > 0 {
                100.0 * wins as f64 / total as f64
            } else {
                0.0
            };
            // A vote referencing an idea missing from the store has no text
            // to show; skip it rather than render a blank row.
            let text = texts.get(&id)?;
            Some(IdeaRank {
                idea_id: id,
                text: (*text).to_string(),
                wins,
                losses,
                total,
                score,
            })
        })
        .collect();

    // Stable sort keeps first-appearance order for equal scores
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked
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
    fn no_votes_yields_empty_ranking() {
        let q = Uuid::new_v4();
        let ideas = vec![idea(q, "A"), idea(q, "B")];
        assert!(rank_ideas(&ideas, &[]).is_empty());
    }

    #[test]
    fn three_idea_scenario() {
        let q = Uuid::new_v4();
        let ideas = vec![idea(q, "A"), idea(q, "B"), idea(q, "C")];
        let (a, b, c) = (ideas[0].id, ideas[1].id, ideas[2].id);

        // A beats B, then C beats A
        let votes = vec![vote(q, a, b), vote(q, c, a)];
        let ranked = rank_ideas(&ideas, &votes);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].text, "C");
        assert_eq!((ranked[0].wins, ranked[0].losses, ranked[0].total), (1, 0, 1));
        assert_eq!(ranked[0].score, 100.0);

        assert_eq!(ranked[1].text, "A");
        assert_eq!((ranked[1].wins, ranked[1].losses, ranked[1].total), (1, 1, 2));
        assert_eq!(ranked[1].score, 50.0);

        // B only ever lost but still appears
        assert_eq!(ranked[2].text, "B");
        assert_eq!((ranked[2].wins, ranked[2].losses, ranked[2].total), (0, 1, 1));
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn totals_and_score_bounds_hold() {
        let q = Uuid::new_v4();
        let ideas: Vec<Idea> = (0..4).map(|i| idea(q, &format!("idea {i}"))).collect();
        let votes = vec![
            vote(q, ideas[0].id, ideas[1].id),
            vote(q, ideas[0].id, ideas[2].id),
            vote(q, ideas[1].id, ideas[0].id),
            vote(q, ideas[3].id, ideas[2].id),
        ];

        for rank in rank_ideas(&ideas, &votes) {
            assert_eq!(rank.wins + rank.losses, rank.total);
            assert!(rank.total >= 1);
            assert!((0.0..=100.0).contains(&rank.score));
        }
    }

    #[test]
    fn equal_scores_keep_first_appearance_order() {
        let q = Uuid::new_v4();
        let ideas = vec![idea(q, "A"), idea(q, "B"), idea(q, "C"), idea(q, "D")];
        let votes = vec![
            vote(q, ideas[0].id, ideas[1].id),
            vote(q, ideas[2].id, ideas[3].id),
        ];

        let ranked = rank_ideas(&ideas, &votes);
        // A and C both 100.0; A tallied first
        assert_eq!(ranked[0].text, "A");
        assert_eq!(ranked[1].text, "C");
    }
}
