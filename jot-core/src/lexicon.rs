use std::collections::{BTreeMap, BTreeSet};

use crate::category::Category;

const FEELING_CUES: &[&str] = &[
    "afraid", "angry", "annoyed", "anxious", "ashamed", "bored", "calm", "cheerful", "confident",
    "content", "cried", "crying", "depressed", "disappointed", "down", "emotional", "excited",
    "exhausted", "feel", "feeling", "feelings", "feels", "felt", "frustrated", "glad", "grateful",
    "guilty", "happy", "hopeful", "joy", "joyful", "laughed", "lonely", "love", "loved", "mood",
    "nervous", "overwhelmed", "peaceful", "proud", "relaxed", "relieved", "sad", "scared",
    "stressed", "thankful", "tired", "upset", "worried",
];

const HEALTH_CUES: &[&str] = &[
    "ache", "blood pressure", "check-up", "checkup", "clinic", "cold", "cough", "dentist", "diet",
    "doctor", "exercise", "fever", "flu", "gym", "headache", "hospital", "hydrated", "ill",
    "injury", "medication", "medicine", "meditation", "migraine", "nurse", "nutrition", "pain",
    "pill", "pills", "rest", "resting", "run", "running", "sick", "sleep", "slept", "stomach",
    "symptoms", "therapist", "therapy", "vitamins", "walk", "walking", "workout", "yoga",
];

const EVENT_CUES: &[&str] = &[
    "anniversary", "appointment", "arrived", "attended", "birthday", "celebrated", "celebration",
    "ceremony", "concert", "conference", "deadline", "dinner", "finished", "game", "graduation",
    "happened", "interview", "lunch", "meeting", "met", "party", "practice", "presentation",
    "started", "trip", "vacation", "visited", "wedding", "went",
];

const SITUATION_CUES: &[&str] = &[
    "been", "busy", "class", "commute", "cooking", "currently", "dealing with", "errand", "exam",
    "family", "friends", "home", "house", "job", "lately", "lesson", "living", "moving", "office",
    "project", "rain", "school", "shopping", "situation", "still", "storm", "stress", "stressful",
    "struggling", "study", "sunny", "travel", "weather", "work",
];

/// Words that follow a sentence-leading name ("Sam called", "Sam and I").
const PERSON_CUES: &[&str] = &[
    "and", "asked", "called", "came", "emailed", "helped", "invited", "laughed", "messaged", "met",
    "phoned", "said", "saw", "says", "smiled", "texted", "told", "visited", "wrote",
];

/// Capitalised words that are never names.
const STOP_WORDS: &[&str] = &[
    "a", "after", "afternoon", "also", "an", "and", "april", "august", "before", "but", "dear",
    "december", "diary", "evening", "february", "friday", "he", "her", "here", "his", "how",
    "i", "it", "its", "january", "july", "june", "just", "later", "march", "maybe", "may", "me",
    "monday", "morning", "my", "night", "no", "november", "october", "oh", "ok", "okay", "or",
    "our", "saturday", "september", "she", "so", "sunday", "that", "the", "their", "then",
    "there", "these", "they", "this", "those", "thursday", "today", "tomorrow", "tonight",
    "tuesday", "we", "wednesday", "what", "when", "where", "why", "yes", "yesterday", "you",
    "your",
];

/// The cue vocabulary consulted by the classifier.
///
/// Every word is stored lowercased. A cue may be a phrase ("blood pressure");
/// matching is whole-word and case-insensitive.
#[derive(Debug, Clone)]
pub struct Lexicon {
    cues: BTreeMap<Category, BTreeSet<String>>,
    person_cues: BTreeSet<String>,
    stop_words: BTreeSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        let mut cues = BTreeMap::new();
        cues.insert(Category::Feelings, to_set(FEELING_CUES));
        cues.insert(Category::Situations, to_set(SITUATION_CUES));
        cues.insert(Category::Events, to_set(EVENT_CUES));
        cues.insert(Category::Health, to_set(HEALTH_CUES));
        Self {
            cues,
            person_cues: to_set(PERSON_CUES),
            stop_words: to_set(STOP_WORDS),
        }
    }
}

impl Lexicon {
    /// A lexicon with no words at all. Nothing will be classified except names.
    pub fn empty() -> Self {
        Self {
            cues: BTreeMap::new(),
            person_cues: BTreeSet::new(),
            stop_words: BTreeSet::new(),
        }
    }

    /// Adds cue words for `category`. Extending [`Category::People`] adds person cues.
    pub fn extend<I, S>(&mut self, category: Category, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let target = match category {
            Category::People => &mut self.person_cues,
            other => self.cues.entry(other).or_default(),
        };
        insert_normalized(target, words);
    }

    pub fn extend_stop_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        insert_normalized(&mut self.stop_words, words);
    }

    /// Cue words for a per-segment category, or the person cues for `People`.
    pub fn cues(&self, category: Category) -> Vec<&str> {
        match category {
            Category::People => self.person_cues.iter().map(String::as_str).collect(),
            other => self
                .cues
                .get(&other)
                .map(|set| set.iter().map(String::as_str).collect())
                .unwrap_or_default(),
        }
    }

    pub fn stop_words(&self) -> impl Iterator<Item = &str> {
        self.stop_words.iter().map(String::as_str)
    }

    pub fn is_person_cue(&self, word: &str) -> bool {
        self.person_cues.contains(&word.to_lowercase())
    }
}

fn to_set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn insert_normalized<I, S>(set: &mut BTreeSet<String>, words: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for word in words {
        let word = word.as_ref().trim().to_lowercase();
        if !word.is_empty() {
            set.insert(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_every_segment_category() {
        let lexicon = Lexicon::default();
        for category in Category::per_segment() {
            assert!(!lexicon.cues(category).is_empty(), "{category} has no cues");
        }
        assert!(lexicon.cues(Category::Events).contains(&"met"));
        assert!(lexicon.cues(Category::Health).contains(&"checkup"));
    }

    #[test]
    fn extend_lowercases_and_dedups() {
        let mut lexicon = Lexicon::empty();
        lexicon.extend(Category::Feelings, ["Elated", "elated ", ""]);
        assert_eq!(lexicon.cues(Category::Feelings), vec!["elated"]);
    }

    #[test]
    fn extending_people_adds_person_cues() {
        let mut lexicon = Lexicon::empty();
        assert!(!lexicon.is_person_cue("hugged"));
        lexicon.extend(Category::People, ["hugged"]);
        assert!(lexicon.is_person_cue("Hugged"));
    }

    #[test]
    fn stop_words_extend() {
        let mut lexicon = Lexicon::default();
        lexicon.extend_stop_words(["Mom"]);
        assert!(lexicon.stop_words().any(|w| w == "mom"));
    }
}
