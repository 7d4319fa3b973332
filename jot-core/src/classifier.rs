//! Rule-based classification of journal text.
//!
//! The text is cut into sentence-like segments; each segment is matched
//! against the cue words of every category independently, so one sentence can
//! land in several categories. People are pulled from the whole text with a
//! capitalised-word heuristic.

use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::category::{Categories, Category};
use crate::errors::Result;
use crate::lexicon::Lexicon;

static SEGMENT_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("valid boundary pattern"));

/// Letters, optionally joined by an apostrophe or hyphen (`O'Brien`, `Mary-Kate`).
static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}]+(?:['’-][\p{L}\p{M}]+)*").expect("valid word pattern")
});

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(|| {
    Classifier::new(&Lexicon::default()).expect("built-in lexicon compiles")
});

/// Classifies `text` with the built-in lexicon.
pub fn classify(text: &str) -> Categories {
    DEFAULT_CLASSIFIER.classify(text)
}

/// Splits `text` at `.`, `!` or `?` followed by whitespace.
///
/// Punctuation stays with its segment, segments are trimmed, and segments without
/// a single letter or digit are dropped. A trailing fragment without terminal
/// punctuation is kept as the last segment.
pub fn split_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for boundary in SEGMENT_BOUNDARY.find_iter(text) {
        let punctuation = boundary.as_str().trim_end().len();
        segments.push(&text[start..boundary.start() + punctuation]);
        start = boundary.end();
    }
    segments.push(&text[start..]);

    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}

/// A compiled [`Lexicon`].
#[derive(Debug, Clone)]
pub struct Classifier {
    matchers: Vec<(Category, Regex)>,
    /// Lowercased words that can never start or continue a name.
    excluded_names: HashSet<String>,
    person_cues: HashSet<String>,
}

impl Classifier {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let mut matchers = Vec::new();
        let mut excluded_names: HashSet<String> =
            lexicon.stop_words().map(str::to_string).collect();

        for category in Category::per_segment() {
            let cues = lexicon.cues(category);
            if cues.is_empty() {
                continue;
            }
            matchers.push((category, cue_matcher(&cues)?));
            excluded_names.extend(
                cues.iter()
                    .filter(|cue| !cue.contains(char::is_whitespace))
                    .map(|cue| cue.to_string()),
            );
        }

        let person_cues = lexicon
            .cues(Category::People)
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            matchers,
            excluded_names,
            person_cues,
        })
    }

    pub fn classify(&self, text: &str) -> Categories {
        let segments = split_segments(text);
        let mut categories = Categories::default();

        for segment in &segments {
            for (category, matcher) in &self.matchers {
                if matcher.is_match(segment) {
                    categories.get_mut(*category).push(segment.to_string());
                }
            }
        }
        categories.people = self.extract_people(&segments);

        debug!(
            segments = segments.len(),
            feelings = categories.feelings.len(),
            situations = categories.situations.len(),
            events = categories.events.len(),
            health = categories.health.len(),
            people = categories.people.len(),
            "classified entry"
        );
        categories
    }

    /// Names in order of first appearance, each listed once.
    ///
    /// A run of capitalised words is a name. A word opening a segment or a line
    /// only counts when the same word also appears capitalised mid-sentence, or
    /// when the run is followed by a person cue ("Sam called").
    fn extract_people(&self, segments: &[&str]) -> Vec<String> {
        let tokenized: Vec<(&str, Vec<Range<usize>>)> =
            segments.iter().map(|s| (*s, words(s))).collect();

        let mid_sentence: HashSet<&str> = tokenized
            .iter()
            .flat_map(|(segment, words)| {
                let segment: &str = segment;
                (0..words.len())
                    .filter(move |&i| !starts_line(segment, words, i))
                    .map(move |i| &segment[words[i].clone()])
            })
            .filter(|w| self.is_name_word(w))
            .collect();

        let mut people: Vec<String> = Vec::new();
        for (segment, words) in &tokenized {
            let segment: &str = segment;
            let word = move |i: usize| &segment[words[i].clone()];
            let mut i = 0;
            while i < words.len() {
                if !self.is_name_word(word(i)) {
                    i += 1;
                    continue;
                }
                let start = i;
                let mut end = i;
                while end + 1 < words.len()
                    && self.is_name_word(word(end + 1))
                    && single_space(&segment[words[end].end..words[end + 1].start])
                {
                    end += 1;
                }

                let mut first = start;
                if starts_line(segment, words, start) {
                    let followed_by_cue = (end + 1 < words.len())
                        .then(|| word(end + 1).to_lowercase())
                        .is_some_and(|w| self.person_cues.contains(&w));
                    if !followed_by_cue && !mid_sentence.contains(word(start)) {
                        first = start + 1;
                    }
                }

                if first <= end {
                    let name = &segment[words[first].start..words[end].end];
                    if !people.iter().any(|p| p == name) {
                        people.push(name.to_string());
                    }
                }
                i = end + 1;
            }
        }
        people
    }

    fn is_name_word(&self, word: &str) -> bool {
        is_capitalized(word) && !self.excluded_names.contains(&word.to_lowercase())
    }
}

/// One case-insensitive pattern for a category's cues.
///
/// Cue edges made of word characters must sit on a word boundary, so `rest`
/// does not match inside `restaurant`. Symbol edges (`:(`, `c++`) match as is.
fn cue_matcher(cues: &[&str]) -> Result<Regex> {
    let alternatives: Vec<String> = cues
        .iter()
        .map(|cue| {
            let body = regex::escape(cue).replace(' ', r"\s+");
            let open = if cue.chars().next().is_some_and(is_word_char) { r"\b" } else { "" };
            let close = if cue.chars().last().is_some_and(is_word_char) { r"\b" } else { "" };
            format!("{open}{body}{close}")
        })
        .collect();
    let pattern = format!("(?:{})", alternatives.join("|"));
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte ranges of the words in `segment`, possessive `'s` left off.
fn words(segment: &str) -> Vec<Range<usize>> {
    WORD.find_iter(segment)
        .map(|m| {
            let word = m.as_str();
            let stem = ["'s", "’s", "'S", "’S"]
                .iter()
                .find_map(|suffix| word.strip_suffix(suffix))
                .filter(|stem| !stem.is_empty())
                .unwrap_or(word);
            m.start()..m.start() + stem.len()
        })
        .collect()
}

/// The `i`th word opens the segment or follows a line break.
fn starts_line(segment: &str, words: &[Range<usize>], i: usize) -> bool {
    i == 0 || segment[words[i - 1].end..words[i].start].contains('\n')
}

/// `Alex`, `Émile`, `O'Brien`, `Mary-Kate`; not `I`, `NASA` or `alex`.
///
/// Each apostrophe or hyphen separated part may only be uppercase in its
/// first letter.
fn is_capitalized(word: &str) -> bool {
    if !word.chars().next().is_some_and(char::is_uppercase) {
        return false;
    }
    word.chars().any(char::is_lowercase)
        && word
            .split(['\'', '’', '-'])
            .all(|part| !part.chars().skip(1).any(char::is_uppercase))
}

/// One space or tab; a line break ends a name.
fn single_space(gap: &str) -> bool {
    let mut chars = gap.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_whitespace() && c != '\n' && c != '\r'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn is_substring_everywhere(text: &str, categories: &Categories) -> bool {
        categories
            .iter()
            .all(|(_, snippets)| snippets.iter().all(|s| text.contains(s.as_str())))
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let segments = split_segments("Woke up early. Went for a run! Was it worth it? Yes");
        assert_eq!(
            segments,
            vec!["Woke up early.", "Went for a run!", "Was it worth it?", "Yes"]
        );
    }

    #[test]
    fn decimals_and_abbreviations_without_space_do_not_split() {
        let segments = split_segments("Ran 3.5 km today.");
        assert_eq!(segments, vec!["Ran 3.5 km today."]);
    }

    #[test]
    fn punctuation_only_segments_are_dropped() {
        let segments = split_segments("  ... !!! Fine. ?  ");
        assert_eq!(segments, vec!["Fine."]);
    }

    #[test]
    fn fragment_without_punctuation_is_a_segment() {
        assert_eq!(split_segments("Just resting today"), vec!["Just resting today"]);
    }

    #[test]
    fn coffee_with_alex() {
        let text = "I met Alex for coffee and felt really happy.";
        let categories = classify(text);
        assert_eq!(categories.people, vec!["Alex"]);
        assert_eq!(categories.feelings, vec![text]);
        assert_eq!(categories.events, vec![text]);
    }

    #[test]
    fn doctor_visit_is_health_and_event() {
        let text = "Visited the doctor for a checkup.";
        let categories = classify(text);
        assert_eq!(categories.health, vec![text]);
        assert_eq!(categories.events, vec![text]);
        assert!(categories.people.is_empty());
    }

    #[test]
    fn trailing_fragment_is_classified() {
        let categories = classify("Just resting today");
        assert_eq!(categories.health, vec!["Just resting today"]);
        assert!(categories.people.is_empty());
    }

    #[test]
    fn snippets_keep_source_order() {
        let text = "Felt anxious before the meeting. Work has been stressful. Felt better after yoga.";
        let categories = classify(text);
        assert_eq!(
            categories.feelings,
            vec!["Felt anxious before the meeting.", "Felt better after yoga."]
        );
        assert_eq!(categories.events, vec!["Felt anxious before the meeting."]);
        assert_eq!(categories.situations, vec!["Work has been stressful."]);
        assert_eq!(categories.health, vec!["Felt better after yoga."]);
    }

    #[test]
    fn one_segment_can_be_event_and_situation() {
        let text = "We went home early because of the storm.";
        let categories = classify(text);
        assert_eq!(categories.events, vec![text]);
        assert_eq!(categories.situations, vec![text]);
    }

    #[test]
    fn matching_is_whole_word() {
        // "happened" must not count as "happy", "restaurant" not as "rest".
        let categories = classify("Nothing much happened at the restaurant.");
        assert!(categories.feelings.is_empty());
        assert!(categories.health.is_empty());
        assert_eq!(categories.events.len(), 1);
    }

    #[test]
    fn matching_ignores_case() {
        let categories = classify("HAPPY day");
        assert_eq!(categories.feelings, vec!["HAPPY day"]);
    }

    #[test]
    fn people_in_first_appearance_order_without_duplicates() {
        let text = "Had lunch with Priya and Tom. Later Tom drove me home. Priya texted.";
        let categories = classify(text);
        assert_eq!(categories.people, vec!["Priya", "Tom"]);
    }

    #[test]
    fn multi_word_names_are_kept_together() {
        let categories = classify("Dinner with Mary Jane tonight.");
        assert_eq!(categories.people, vec!["Mary Jane"]);
    }

    #[test]
    fn sentence_leading_name_needs_a_cue() {
        assert_eq!(classify("Sam called in the evening.").people, vec!["Sam"]);
        assert!(classify("Nothing special.").people.is_empty());
        assert_eq!(classify("Grace and I walked.").people, vec!["Grace"]);
    }

    #[test]
    fn sentence_leading_name_seen_elsewhere_counts() {
        let categories = classify("Lunch with Omar. Omar seems well.");
        assert_eq!(categories.people, vec!["Omar"]);
    }

    #[test]
    fn stop_words_and_cue_words_are_not_people() {
        let categories = classify("On Monday I saw The Doctor. Today Work was busy.");
        assert!(categories.people.is_empty(), "{:?}", categories.people);
    }

    #[test]
    fn non_ascii_text_does_not_panic() {
        let text = "Café con Émile — me sentí feliz. 今日は雨でした。 Ünïcödé!";
        let categories = classify(text);
        assert!(categories.people.contains(&"Émile".to_string()));
        assert!(is_substring_everywhere(text, &categories));
    }

    #[test]
    fn nothing_matched_is_all_empty_not_an_error() {
        let categories = classify("Xyzzy plugh.");
        assert!(categories.is_empty());
        assert_eq!(categories.iter().count(), 5);
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "Met Sara at the party. Felt nervous, then relaxed. Still sick with the flu";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn snippets_are_substrings_of_input() {
        let text = "  Went to the gym!!   Felt proud.\n\nMy knee pain is back?  Ana visited  ";
        let categories = classify(text);
        assert!(is_substring_everywhere(text, &categories));
        for category in Category::iter() {
            for snippet in categories.get(category) {
                assert_eq!(snippet.trim(), snippet);
            }
        }
    }

    #[test]
    fn custom_lexicon_changes_classification() {
        let mut lexicon = Lexicon::default();
        lexicon.extend(Category::Feelings, ["meh"]);
        let classifier = Classifier::new(&lexicon).unwrap();
        assert_eq!(classifier.classify("Pretty meh.").feelings, vec!["Pretty meh."]);
        assert!(classify("Pretty meh.").feelings.is_empty());
    }

    #[test]
    fn custom_stop_words_hide_names() {
        let mut lexicon = Lexicon::default();
        lexicon.extend_stop_words(["Mom"]);
        let classifier = Classifier::new(&lexicon).unwrap();
        assert!(classifier.classify("Talked to Mom.").people.is_empty());
        assert_eq!(classify("Talked to Mom.").people, vec!["Mom"]);
    }

    #[test]
    fn empty_lexicon_classifies_nothing() {
        let classifier = Classifier::new(&Lexicon::empty()).unwrap();
        let categories = classifier.classify("Felt happy at the doctor.");
        assert!(categories.feelings.is_empty());
        assert!(categories.health.is_empty());
    }

    #[test]
    fn apostrophes_and_hyphens_stay_inside_names() {
        assert_eq!(classify("O'Brien called.").people, vec!["O'Brien"]);
        assert_eq!(
            classify("Went hiking with Mary-Kate today.").people,
            vec!["Mary-Kate"]
        );
        assert_eq!(classify("Borrowed Tom's bike.").people, vec!["Tom"]);
    }

    #[test]
    fn word_after_line_break_is_sentence_leading() {
        assert!(classify("Dear diary\nNothing happened").people.is_empty());
        assert_eq!(classify("Lunch was fine\nSam called").people, vec!["Sam"]);
        assert_eq!(
            classify("Saw Nina Brown\nTomorrow maybe").people,
            vec!["Nina Brown"]
        );
    }

    #[test]
    fn symbol_cues_match() {
        let mut lexicon = Lexicon::default();
        lexicon.extend(Category::Feelings, ["😢", ":("]);
        lexicon.extend(Category::Situations, ["c++"]);
        let classifier = Classifier::new(&lexicon).unwrap();
        assert_eq!(classifier.classify("Long day 😢").feelings, vec!["Long day 😢"]);
        assert_eq!(classifier.classify("Long day :(").feelings, vec!["Long day :("]);
        assert_eq!(
            classifier.classify("Learning c++").situations,
            vec!["Learning c++"]
        );
        assert!(classifier.classify("Learning cpp").situations.is_empty());
    }

    #[test]
    fn phrase_cues_match_across_whitespace() {
        let categories = classify("Checked my blood  pressure.");
        assert_eq!(categories.health, vec!["Checked my blood  pressure."]);
    }
}
