//! Sentiment analysis
//!
//! The service treats sentiment scoring as an injected collaborator: a pure
//! text -> (score, label) function behind the [`SentimentAnalyzer`] trait.
//! The shipped [`LexiconAnalyzer`] averages token polarity over a small
//! valence lexicon. Any failure degrades to neutral.

use serde::{Deserialize, Serialize};

/// Sentiment classification of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Positive" => Some(SentimentLabel::Positive),
            "Negative" => Some(SentimentLabel::Negative),
            "Neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

/// Sentiment valence score in [-1, 1] plus its label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f64,
    pub label: SentimentLabel,
}

impl Sentiment {
    /// Neutral fallback used whenever analysis cannot produce a score
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Neutral,
        }
    }

    /// Label a polarity score: > 0.1 positive, < -0.1 negative, else neutral
    pub fn from_score(score: f64) -> Self {
        let score = score.clamp(-1.0, 1.0);
        let label = if score > 0.1 {
            SentimentLabel::Positive
        } else if score < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Self { score, label }
    }
}

/// Injected text -> sentiment collaborator
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Sentiment;
}

/// Word-list analyzer: mean polarity of recognized tokens.
///
/// Intentionally small; the trait boundary is what matters. Unknown words
/// score 0, so short factual proposals come out neutral.
#[derive(Debug, Default, Clone)]
pub struct LexiconAnalyzer;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "best", "better", "free", "fair", "strong",
    "improve", "improved", "growth", "hope", "peace", "success", "benefit",
    "support", "opportunity", "quality", "progress", "unity", "prosperity",
    "education", "health", "clean", "safe", "secure", "sustainable",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "worse", "worst", "poor", "corruption", "corrupt", "war", "crisis",
    "failure", "fail", "problem", "poverty", "disease", "conflict", "violence",
    "waste", "unfair", "weak", "decline", "debt", "hunger", "unemployment",
];

impl SentimentAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Sentiment {
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect();

        if tokens.is_empty() {
            return Sentiment::neutral();
        }

        let mut polarity = 0.0_f64;
        let mut hits = 0u32;
        for token in &tokens {
            if POSITIVE_WORDS.contains(&token.as_str()) {
                polarity += 1.0;
                hits += 1;
            } else if NEGATIVE_WORDS.contains(&token.as_str()) {
                polarity -= 1.0;
                hits += 1;
            }
        }

        if hits == 0 {
            return Sentiment::neutral();
        }

        Sentiment::from_score(polarity / f64::from(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral() {
        let s = LexiconAnalyzer.analyze("");
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn positive_text_scores_positive() {
        let s = LexiconAnalyzer.analyze("Free quality education for all");
        assert_eq!(s.label, SentimentLabel::Positive);
        assert!(s.score > 0.1);
    }

    #[test]
    fn negative_text_scores_negative() {
        let s = LexiconAnalyzer.analyze("Corruption and poverty everywhere");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert!(s.score < -0.1);
    }

    #[test]
    fn mixed_text_is_neutral() {
        let s = LexiconAnalyzer.analyze("good war");
        assert_eq!(s.label, SentimentLabel::Neutral);
    }

    #[test]
    fn score_stays_in_range() {
        for text in ["good good good good", "war war war", "hello world"] {
            let s = LexiconAnalyzer.analyze(text);
            assert!((-1.0..=1.0).contains(&s.score));
        }
    }
}
