// Domain model for dictionary lookups.
// Defines word records and the normalization from raw API entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dictionary::{RawDefinition, RawEntry, RawMeaning};

/// A resolved dictionary entry keyed by its headword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Lowercased query, the cache key.
    pub headword: String,
    pub phonetic: Option<String>,
    pub meanings: Vec<Meaning>,
    pub origin: Option<String>,
    /// Set only on records that went through the cache store.
    #[serde(skip)]
    pub cached_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(rename = "definition")]
    pub text: String,
    #[serde(default)]
    pub example: Option<String>,
}

/// Normalize a user query into a headword.
/// Returns `None` for blank input.
pub fn normalize_headword(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

impl WordRecord {
    /// Build a record from the raw API entry fetched for `headword`.
    pub fn from_entry(headword: &str, entry: RawEntry) -> Self {
        let phonetic = entry.best_phonetic().map(str::to_string);
        Self {
            headword: headword.to_string(),
            phonetic,
            meanings: entry
                .meanings
                .unwrap_or_default()
                .into_iter()
                .map(Meaning::from)
                .collect(),
            origin: entry.origin,
            cached_at: None,
        }
    }

    /// Number of definitions across all meanings.
    pub fn definition_count(&self) -> usize {
        self.meanings.iter().map(|m| m.definitions.len()).sum()
    }
}

#[cfg(test)]
impl WordRecord {
    /// Compare everything except the cache timestamp.
    pub fn same_entry(&self, other: &WordRecord) -> bool {
        self.headword == other.headword
            && self.phonetic == other.phonetic
            && self.meanings == other.meanings
            && self.origin == other.origin
    }
}

impl From<RawMeaning> for Meaning {
    fn from(raw: RawMeaning) -> Self {
        Self {
            part_of_speech: raw.part_of_speech,
            definitions: raw.definitions.into_iter().map(Definition::from).collect(),
            synonyms: raw.synonyms.unwrap_or_default(),
            antonyms: raw.antonyms.unwrap_or_default(),
        }
    }
}

impl From<RawDefinition> for Definition {
    fn from(raw: RawDefinition) -> Self {
        Self {
            text: raw.definition,
            example: raw.example,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::RawPhonetic;

    fn raw_meaning(pos: &str, definition: &str) -> RawMeaning {
        RawMeaning {
            part_of_speech: pos.to_string(),
            definitions: vec![RawDefinition {
                definition: definition.to_string(),
                example: None,
                synonyms: None,
                antonyms: None,
            }],
            synonyms: None,
            antonyms: None,
        }
    }

    #[test]
    fn test_normalize_headword() {
        assert_eq!(normalize_headword("Hello"), Some("hello".to_string()));
        assert_eq!(normalize_headword("  WORLD \n"), Some("world".to_string()));
        assert_eq!(normalize_headword("Ice Cream"), Some("ice cream".to_string()));
        assert_eq!(normalize_headword(""), None);
        assert_eq!(normalize_headword("   \t"), None);
    }

    #[test]
    fn test_hello_entry_maps_fields() {
        let entry = RawEntry {
            word: "hello".to_string(),
            phonetic: Some("/həˈloʊ/".to_string()),
            phonetics: None,
            meanings: Some(vec![RawMeaning {
                part_of_speech: "noun".to_string(),
                definitions: vec![RawDefinition {
                    definition: "A greeting".to_string(),
                    example: Some("Hello world".to_string()),
                    synonyms: Some(vec!["hi".to_string()]),
                    antonyms: None,
                }],
                synonyms: None,
                antonyms: None,
            }]),
            origin: None,
        };

        let record = WordRecord::from_entry("hello", entry);

        assert_eq!(record.headword, "hello");
        assert_eq!(record.phonetic.as_deref(), Some("/həˈloʊ/"));
        assert_eq!(record.meanings.len(), 1);
        let meaning = &record.meanings[0];
        assert_eq!(meaning.part_of_speech, "noun");
        assert_eq!(
            meaning.definitions,
            vec![Definition {
                text: "A greeting".to_string(),
                example: Some("Hello world".to_string()),
            }]
        );
        assert!(meaning.synonyms.is_empty());
        assert!(meaning.antonyms.is_empty());
        assert!(record.origin.is_none());
        assert!(record.cached_at.is_none());
    }

    #[test]
    fn test_phonetic_falls_back_to_variants() {
        let entry = RawEntry {
            word: "test".to_string(),
            phonetic: None,
            phonetics: Some(vec![RawPhonetic {
                text: Some("/test/".to_string()),
                audio: None,
            }]),
            meanings: Some(vec![raw_meaning("noun", "A test")]),
            origin: None,
        };

        let record = WordRecord::from_entry("test", entry);
        assert_eq!(record.phonetic.as_deref(), Some("/test/"));
    }

    #[test]
    fn test_missing_lists_become_empty() {
        let entry = RawEntry {
            word: "bare".to_string(),
            phonetic: None,
            phonetics: None,
            meanings: None,
            origin: Some("Old English".to_string()),
        };

        let record = WordRecord::from_entry("bare", entry);
        assert!(record.meanings.is_empty());
        assert!(record.phonetic.is_none());
        assert_eq!(record.origin.as_deref(), Some("Old English"));
    }

    #[test]
    fn test_headword_comes_from_query_not_entry() {
        let entry = RawEntry {
            word: "Hello".to_string(),
            phonetic: None,
            phonetics: None,
            meanings: Some(vec![raw_meaning("interjection", "A greeting")]),
            origin: None,
        };

        let record = WordRecord::from_entry("hello", entry);
        assert_eq!(record.headword, "hello");
    }

    #[test]
    fn test_meanings_serialize_in_wire_shape() {
        let meaning = Meaning {
            part_of_speech: "noun".to_string(),
            definitions: vec![Definition {
                text: "A greeting".to_string(),
                example: None,
            }],
            synonyms: vec!["hi".to_string()],
            antonyms: Vec::new(),
        };

        let json = serde_json::to_value(&meaning).unwrap();
        assert_eq!(json["partOfSpeech"], "noun");
        assert_eq!(json["definitions"][0]["definition"], "A greeting");
        assert_eq!(json["synonyms"][0], "hi");
    }

    #[test]
    fn test_same_entry_ignores_cached_at() {
        let a = WordRecord {
            headword: "word".to_string(),
            phonetic: None,
            meanings: Vec::new(),
            origin: None,
            cached_at: None,
        };
        let b = WordRecord {
            cached_at: Some(Utc::now()),
            ..a.clone()
        };
        assert!(a.same_entry(&b));
        assert_ne!(a, b);
    }
}
