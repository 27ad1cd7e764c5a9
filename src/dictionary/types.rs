// Dictionary API response types.
// Mirrors the raw JSON shape returned by the free dictionary API.

use serde::{Deserialize, Serialize};

/// One entry of the API's top-level array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Option<Vec<RawPhonetic>>,
    #[serde(default)]
    pub meanings: Option<Vec<RawMeaning>>,
    #[serde(default)]
    pub origin: Option<String>,
}

/// Pronunciation variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPhonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

/// Meanings grouped under a part of speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<RawDefinition>,
    #[serde(default)]
    pub synonyms: Option<Vec<String>>,
    #[serde(default)]
    pub antonyms: Option<Vec<String>>,
}

/// A single definition with optional usage example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDefinition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Option<Vec<String>>,
    #[serde(default)]
    pub antonyms: Option<Vec<String>>,
}

impl RawEntry {
    /// Explicit phonetic, else the text of the first variant.
    pub fn best_phonetic(&self) -> Option<&str> {
        self.phonetic
            .as_deref()
            .or_else(|| self.phonetics.as_ref()?.first()?.text.as_deref())
    }
}
