//! Serializable records for extracted verse data
//!
//! Field names here are the on-disk JSON schema; do not rename without
//! migrating existing output files.

use serde::{Deserialize, Serialize};

/// Original language of a lexicon entry
///
/// Determined by the book's testament, never by inspecting the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hebrew,
    Greek,
}

impl Language {
    /// Heading text biblehub uses for this language's lexicon section
    pub fn heading_label(self) -> &'static str {
        match self {
            Language::Hebrew => "Hebrew",
            Language::Greek => "Greek",
        }
    }

    /// CSS class of original-script word spans in the lexicon region
    pub fn word_class(self) -> &'static str {
        match self {
            Language::Hebrew => "heb",
            Language::Greek => "grk",
        }
    }
}

/// One translation's rendering of the verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Version abbreviation, e.g. "ESV"
    pub version: String,

    /// The verse text in this version
    pub text: String,
}

/// One interlinear lexicon entry: an original-language token aligned to
/// an English phrase, with its Strong's number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalWord {
    /// English word or phrase this token translates to
    pub english_word: String,

    /// The word in its native script
    pub word: String,

    /// Romanized form
    pub transliteration: String,

    /// Strong's concordance number
    pub strongs_number: String,

    /// e.g. "Noun - Nominative Masculine Singular"
    pub part_of_speech: String,

    /// English definition/meaning
    pub definition: String,

    pub language: Language,
}

/// A citation of a thematically related verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    /// e.g. "John 1:1-3"
    pub reference: String,

    /// The referenced verse's text
    pub text: String,
}

/// Complete record for one verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// "Book Chapter:Verse", e.g. "Genesis 1:1"
    pub reference: String,

    /// Display book name, e.g. "1 Peter"
    pub book: String,

    pub chapter: u32,
    pub verse: u32,

    pub translations: Vec<Translation>,
    pub original_words: Vec<OriginalWord>,
    pub cross_references: Vec<CrossReference>,
}

/// All resolved verses for one book/chapter pair, the unit of output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterResult {
    /// Book slug, e.g. "1_peter"
    pub book: String,

    pub chapter: u32,

    /// Verses in ascending verse-number order
    pub verses: Vec<Verse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_verse() -> Verse {
        Verse {
            reference: "Genesis 1:1".to_string(),
            book: "Genesis".to_string(),
            chapter: 1,
            verse: 1,
            translations: vec![Translation {
                version: "ESV".to_string(),
                text: "In the beginning, God created the heavens and the earth.".to_string(),
            }],
            original_words: vec![OriginalWord {
                english_word: "In the beginning".to_string(),
                word: "בְּרֵאשִׁ֖ית".to_string(),
                transliteration: "bə·rê·šîṯ".to_string(),
                strongs_number: "7225".to_string(),
                part_of_speech: "Preposition-b | Noun - feminine singular".to_string(),
                definition: "the first, in place, time, order or rank".to_string(),
                language: Language::Hebrew,
            }],
            cross_references: vec![CrossReference {
                reference: "John 1:1-3".to_string(),
                text: "In the beginning was the Word".to_string(),
            }],
        }
    }

    #[test]
    fn test_verse_round_trip() {
        let verse = sample_verse();
        let json = serde_json::to_string(&verse).unwrap();
        let parsed: Verse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, verse);
    }

    #[test]
    fn test_language_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Language::Hebrew).unwrap(),
            "\"hebrew\""
        );
        assert_eq!(serde_json::to_string(&Language::Greek).unwrap(), "\"greek\"");
    }

    #[test]
    fn test_verse_json_field_names() {
        let value = serde_json::to_value(sample_verse()).unwrap();
        let object = value.as_object().unwrap();

        for field in [
            "reference",
            "book",
            "chapter",
            "verse",
            "translations",
            "original_words",
            "cross_references",
        ] {
            assert!(object.contains_key(field), "missing field {field}");
        }
        assert_eq!(object.len(), 7);

        let word = value["original_words"][0].as_object().unwrap();
        for field in [
            "english_word",
            "word",
            "transliteration",
            "strongs_number",
            "part_of_speech",
            "definition",
            "language",
        ] {
            assert!(word.contains_key(field), "missing field {field}");
        }
        assert_eq!(word["language"], "hebrew");
    }

    #[test]
    fn test_chapter_result_round_trip() {
        let chapter = ChapterResult {
            book: "genesis".to_string(),
            chapter: 1,
            verses: vec![sample_verse()],
        };
        let json = serde_json::to_string_pretty(&chapter).unwrap();
        let parsed: ChapterResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, chapter);
    }
}
