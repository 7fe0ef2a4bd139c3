//! Rule-based polarity scoring over a small general-purpose lexicon.

use sa_core::SentimentScorer;
use std::collections::HashMap;

const POSITIVE: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("like", 0.2),
    ("nice", 0.6),
    ("cool", 0.35),
    ("fun", 0.3),
    ("happy", 0.8),
    ("beautiful", 0.85),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("perfect", 1.0),
    ("useful", 0.3),
    ("helpful", 0.5),
    ("easy", 0.43),
    ("fast", 0.2),
    ("clean", 0.37),
    ("interesting", 0.5),
    ("impressive", 1.0),
    ("powerful", 0.3),
    ("elegant", 0.5),
    ("win", 0.8),
    ("success", 0.3),
    ("thanks", 0.2),
    ("welcome", 0.8),
    ("favorite", 0.5),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("hate", -0.8),
    ("poor", -0.4),
    ("wrong", -0.5),
    ("broken", -0.4),
    ("bug", -0.3),
    ("buggy", -0.5),
    ("slow", -0.3),
    ("ugly", -0.7),
    ("sad", -0.5),
    ("angry", -0.5),
    ("stupid", -0.8),
    ("useless", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("crash", -0.6),
    ("annoying", -0.8),
    ("confusing", -0.3),
    ("difficult", -0.5),
    ("painful", -0.7),
    ("disappointing", -0.6),
    ("problem", -0.3),
    ("error", -0.3),
    ("deprecated", -0.2),
    ("vulnerable", -0.5),
    ("dead", -0.2),
    ("boring", -1.0),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "cannot", "cant", "don't", "dont", "doesn't",
    "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt", "won't", "wont", "aren't",
    "arent", "hardly",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("super", 1.4),
    ("incredibly", 1.5),
    ("so", 1.2),
    ("totally", 1.3),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("pretty", 0.9),
];

/// Averages the polarity of lexicon words found in the text.
///
/// A negation word flips the sign of the next sentiment word and an
/// intensifier scales it. Any other unknown word cancels both modifiers.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        let words = POSITIVE
            .iter()
            .chain(NEGATIVE.iter())
            .map(|(w, s)| (w.to_string(), *s))
            .collect();
        let intensifiers = INTENSIFIERS.iter().map(|(w, m)| (w.to_string(), *m)).collect();
        Self { words, intensifiers }
    }

    /// Adds or overrides a word, clamping its score to [-1.0, 1.0].
    pub fn with_word(mut self, word: &str, score: f64) -> Self {
        self.words.insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
        self
    }

    pub fn word_score(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> f64 {
        let mut total = 0.0;
        let mut matched = 0usize;
        let mut negate = false;
        let mut intensity = 1.0;

        for word in Self::tokens(text) {
            if NEGATIONS.contains(&word.as_str()) {
                negate = true;
                continue;
            }
            if let Some(mult) = self.intensifiers.get(&word) {
                intensity *= mult;
                continue;
            }
            if let Some(score) = self.words.get(&word) {
                let mut score = score * intensity;
                if negate {
                    score = -score;
                }
                total += score.clamp(-1.0, 1.0);
                matched += 1;
            }
            negate = false;
            intensity = 1.0;
        }

        if matched == 0 {
            0.0
        } else {
            (total / matched as f64).clamp(-1.0, 1.0)
        }
    }
}
