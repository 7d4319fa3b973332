use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The buckets an entry is sorted into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Feelings,
    Situations,
    Events,
    Health,
    People,
}

impl Category {
    /// Categories decided sentence by sentence. `People` is extracted from the whole text.
    pub fn per_segment() -> impl Iterator<Item = Category> {
        Category::iter().filter(|c| *c != Category::People)
    }
}

/// Snippets extracted from one entry, one list per [`Category`].
///
/// Every key is always present when serialized, even when its list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Categories {
    pub feelings: Vec<String>,
    pub situations: Vec<String>,
    pub events: Vec<String>,
    pub health: Vec<String>,
    pub people: Vec<String>,
}

impl Categories {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Feelings => &self.feelings,
            Category::Situations => &self.situations,
            Category::Events => &self.events,
            Category::Health => &self.health,
            Category::People => &self.people,
        }
    }

    pub(crate) fn get_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Feelings => &mut self.feelings,
            Category::Situations => &mut self.situations,
            Category::Events => &mut self.events,
            Category::Health => &mut self.health,
            Category::People => &mut self.people,
        }
    }

    /// All five categories in canonical order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::iter().map(move |c| (c, self.get(c)))
    }

    /// `true` when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, snippets)| snippets.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn names_are_lowercase() {
        let names: Vec<String> = Category::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec!["feelings", "situations", "events", "health", "people"]
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Category::from_str("Health").unwrap(), Category::Health);
        assert!(Category::from_str("moods").is_err());
    }

    #[test]
    fn per_segment_skips_people() {
        assert_eq!(Category::per_segment().count(), 4);
        assert!(Category::per_segment().all(|c| c != Category::People));
    }

    #[test]
    fn empty_categories_keep_all_keys_when_serialized() {
        let json = serde_json::to_value(Categories::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        for category in Category::iter() {
            assert_eq!(obj[category.to_string().as_str()], serde_json::json!([]));
        }
    }

    #[test]
    fn missing_key_is_rejected() {
        let json = r#"{"feelings":[],"situations":[],"events":[],"health":[]}"#;
        assert!(serde_json::from_str::<Categories>(json).is_err());
    }
}
