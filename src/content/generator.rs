//! Heuristic text-to-flashcard generation.
//!
//! Best effort, bounded output: the generator owes no guarantees beyond
//! "at most `limit` drafts from this text". Providers are selected through
//! `from_provider` so a language-model-backed implementation can slot in
//! behind the same trait later.

use regex::Regex;
use std::collections::HashSet;

/// A generated card before it is attached to a subject and persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftCard {
  pub front: String,
  pub back: String,
}

pub trait CardGenerator: Send + Sync {
  fn name(&self) -> &'static str;

  /// Produce at most `limit` draft cards from free-form study notes.
  fn generate(&self, text: &str, limit: usize) -> Vec<DraftCard>;
}

/// Provider factory driven by config.toml. Unknown names fall back to the
/// heuristic generator with a warning.
pub fn from_provider(provider: &str) -> Box<dyn CardGenerator> {
  match provider {
    "heuristic" => Box::new(HeuristicGenerator::new()),
    other => {
      tracing::warn!("Unknown generator provider '{}', using heuristic", other);
      Box::new(HeuristicGenerator::new())
    }
  }
}

/// Sentence/keyword cloze generator. Splits notes into sentences, picks the
/// most distinctive term of each, and blanks it out.
pub struct HeuristicGenerator {
  sentence_re: Regex,
  word_re: Regex,
}

const MIN_SENTENCE_LEN: usize = 30;
const MIN_TERM_LEN: usize = 6;

const STOPWORDS: &[&str] = &[
  "although", "because", "between", "cannot", "common", "during", "usually",
  "patient", "patients", "should", "therefore", "through", "typically",
  "whereas", "without",
];

impl HeuristicGenerator {
  pub fn new() -> Self {
    Self {
      sentence_re: Regex::new(r"[^.!?\n]+[.!?]?").unwrap(),
      word_re: Regex::new(r"[A-Za-z][A-Za-z\-]+").unwrap(),
    }
  }

  /// Pick the term to blank out: the longest non-stopword of the sentence,
  /// with capitalized mid-sentence words (likely proper nouns such as drug
  /// or disease names) winning ties.
  fn key_term<'a>(&self, sentence: &'a str) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for (i, m) in self.word_re.find_iter(sentence).enumerate() {
      let word = m.as_str();
      if word.len() < MIN_TERM_LEN {
        continue;
      }
      if STOPWORDS.contains(&word.to_ascii_lowercase().as_str()) {
        continue;
      }
      let capitalized = i > 0 && word.chars().next().is_some_and(|c| c.is_ascii_uppercase());
      let score = word.len() + if capitalized { 10 } else { 0 };
      if best.is_none_or(|(_, s)| score > s) {
        best = Some((word, score));
      }
    }
    best.map(|(word, _)| word)
  }
}

impl Default for HeuristicGenerator {
  fn default() -> Self {
    Self::new()
  }
}

impl CardGenerator for HeuristicGenerator {
  fn name(&self) -> &'static str {
    "heuristic"
  }

  fn generate(&self, text: &str, limit: usize) -> Vec<DraftCard> {
    let mut drafts = Vec::new();
    let mut seen_terms = HashSet::new();

    for m in self.sentence_re.find_iter(text) {
      if drafts.len() >= limit {
        break;
      }
      let sentence = m.as_str().trim();
      if sentence.len() < MIN_SENTENCE_LEN {
        continue;
      }
      let Some(term) = self.key_term(sentence) else {
        continue;
      };
      if !seen_terms.insert(term.to_ascii_lowercase()) {
        continue;
      }
      drafts.push(DraftCard {
        front: sentence.replacen(term, "_____", 1),
        back: term.to_string(),
      });
    }

    drafts
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const NOTES: &str = "Metformin is the first-line drug for type 2 diabetes. \
    It works by reducing hepatic gluconeogenesis and improving insulin sensitivity. \
    Lactic acidosis is a rare but serious adverse effect. \
    Short note. \
    Sulfonylureas stimulate insulin release from pancreatic beta cells.";

  #[test]
  fn test_generates_cloze_cards() {
    let generator = HeuristicGenerator::new();
    let drafts = generator.generate(NOTES, 10);

    assert!(!drafts.is_empty());
    for draft in &drafts {
      assert!(draft.front.contains("_____"));
      assert!(!draft.back.is_empty());
      assert!(!draft.front.contains(&draft.back));
    }
  }

  #[test]
  fn test_output_bounded_by_limit() {
    let generator = HeuristicGenerator::new();
    assert!(generator.generate(NOTES, 2).len() <= 2);
    assert!(generator.generate(NOTES, 0).is_empty());
  }

  #[test]
  fn test_empty_and_short_input() {
    let generator = HeuristicGenerator::new();
    assert!(generator.generate("", 10).is_empty());
    assert!(generator.generate("Too short.", 10).is_empty());
  }

  #[test]
  fn test_terms_not_repeated() {
    let generator = HeuristicGenerator::new();
    let text = "Amoxicillin treats otitis media in children effectively. \
      Amoxicillin also covers streptococcal pharyngitis in most cases.";
    let drafts = generator.generate(text, 10);
    let backs: Vec<_> = drafts.iter().map(|d| d.back.to_ascii_lowercase()).collect();
    let unique: HashSet<_> = backs.iter().collect();
    assert_eq!(backs.len(), unique.len());
  }

  #[test]
  fn test_factory_falls_back_to_heuristic() {
    assert_eq!(from_provider("heuristic").name(), "heuristic");
    assert_eq!(from_provider("does-not-exist").name(), "heuristic");
  }
}
