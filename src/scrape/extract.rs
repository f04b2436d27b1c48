//! Verse page extraction
//!
//! This module turns one fetched verse page into the three field groups:
//! - Parallel translations (NIV/NLT/ESV/NKJV)
//! - Interlinear lexicon entries with Strong's numbers
//! - Cross-references
//!
//! Each group lives in a fixed region of the page, named by the selector
//! constants below so the extractor stays data-driven. A missing region
//! yields an empty sequence; only a page with no markup at all is an error.

use crate::verse::{CrossReference, Language, OriginalWord, Translation};
use crate::ExtractionError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

/// Version-label spans inside the parallel-translations region
const TRANSLATIONS_SELECTOR: &str = "div#par span.versiontext";

/// Section headings; the lexicon section's heading names its language
const LEXICON_HEADING_SELECTOR: &str = "div.vheading";

/// English word/phrase spans inside the lexicon section
const LEXICON_WORD_SELECTOR: &str = "span.word";

/// Reference spans inside the cross-reference region
const CROSS_REFERENCES_SELECTOR: &str = "div#crf span.crossverse";

/// Any element under <body>; pages failing this have no usable markup
const BODY_CONTENT_SELECTOR: &str = "body *";

/// Strong's number embedded in lexicon link hrefs
static STRONGS_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"strongs_(\d+)").unwrap());

/// The three field groups extracted from one verse page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedVerse {
    pub translations: Vec<Translation>,
    pub original_words: Vec<OriginalWord>,
    pub cross_references: Vec<CrossReference>,
}

/// Extracts all field groups from one verse page
///
/// The language is decided by the caller from the book's testament, never
/// by inspecting the page. A document whose body holds no element nodes
/// (empty, truncated mid-tag, or a non-HTML payload) fails with
/// `ExtractionError::EmptyDocument`; a document with real markup always
/// succeeds, with absent regions producing empty sequences.
pub fn parse_verse_page(
    html: &str,
    language: Language,
) -> Result<ExtractedVerse, ExtractionError> {
    let document = Html::parse_document(html);

    let has_markup = Selector::parse(BODY_CONTENT_SELECTOR)
        .ok()
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false);

    if !has_markup {
        return Err(ExtractionError::EmptyDocument);
    }

    Ok(ExtractedVerse {
        translations: extract_translations(&document),
        original_words: extract_original_words(&document, language),
        cross_references: extract_cross_references(&document),
    })
}

/// Extracts the parallel translations, in site presentation order
///
/// Each target version appears as a `span.versiontext` holding a link with
/// the full version name; the verse text follows as sibling nodes up to
/// the next version label, a paragraph marker, or the end of the region.
pub fn extract_translations(document: &Html) -> Vec<Translation> {
    let mut translations = Vec::new();

    let version_selector = match Selector::parse(TRANSLATIONS_SELECTOR) {
        Ok(selector) => selector,
        Err(_) => return translations,
    };
    let link_selector = match Selector::parse("a") {
        Ok(selector) => selector,
        Err(_) => return translations,
    };

    for span in document.select(&version_selector) {
        let link = match span.select(&link_selector).next() {
            Some(link) => link,
            None => continue,
        };

        let version_name = link.text().collect::<String>();
        let version = match version_abbreviation(&version_name) {
            Some(version) => version,
            None => continue,
        };

        let mut parts: Vec<String> = Vec::new();

        for sibling in span.next_siblings() {
            match sibling.value() {
                Node::Element(element) => {
                    let name = element.name();
                    if name == "span"
                        && (has_class(element, "versiontext") || has_class(element, "p"))
                    {
                        break;
                    }
                    if name == "div" {
                        break;
                    }
                    if name == "br" {
                        continue;
                    }
                    if name == "i" {
                        if let Some(italic) = ElementRef::wrap(sibling) {
                            parts.push(italic.text().collect::<String>());
                        }
                    }
                }
                Node::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        parts.push(trimmed.to_string());
                    }
                }
                _ => {}
            }
        }

        let text = collapse_whitespace(&parts.join(" "));
        if !text.is_empty() {
            translations.push(Translation {
                version: version.to_string(),
                text,
            });
        }
    }

    translations
}

/// Extracts the interlinear lexicon entries, in source word order
///
/// Locates the section whose heading names the expected language, then
/// scans it in document order: each `span.word` opens an entry, and the
/// spans that follow (original script, transliteration, parse info,
/// Strong's link, definition) fill that entry's fields until the next
/// `span.word`. Entries with no original-script word are dropped, as the
/// site renders empty placeholder rows for some verses.
pub fn extract_original_words(document: &Html, language: Language) -> Vec<OriginalWord> {
    let mut words = Vec::new();

    let heading_selector = match Selector::parse(LEXICON_HEADING_SELECTOR) {
        Ok(selector) => selector,
        Err(_) => return words,
    };
    let word_selector = match Selector::parse(LEXICON_WORD_SELECTOR) {
        Ok(selector) => selector,
        Err(_) => return words,
    };
    let link_selector = match Selector::parse("a") {
        Ok(selector) => selector,
        Err(_) => return words,
    };

    // The lexicon section is the parent of the matching heading
    let mut section = None;
    for heading in document.select(&heading_selector) {
        let heading_text = heading.text().collect::<String>();
        if heading_text.contains(language.heading_label()) {
            section = heading.parent().and_then(ElementRef::wrap);
            break;
        }
    }

    let section = match section {
        Some(section) => section,
        None => return words,
    };

    if section.select(&word_selector).next().is_none() {
        return words;
    }

    let mut current: Option<PendingWord> = None;

    for node in section.descendants() {
        let element = match ElementRef::wrap(node) {
            Some(element) => element,
            None => continue,
        };
        let value = element.value();
        if value.name() != "span" {
            continue;
        }

        if has_class(value, "word") {
            if let Some(finished) = current.take() {
                if let Some(word) = finished.finish(language) {
                    words.push(word);
                }
            }
            current = Some(PendingWord {
                english_word: element_text(&element),
                ..PendingWord::default()
            });
            continue;
        }

        let entry = match current.as_mut() {
            Some(entry) => entry,
            None => continue,
        };

        if has_class(value, language.word_class()) {
            if entry.word.is_none() {
                entry.word = Some(element_text(&element));
            }
        } else if has_class(value, "translit") {
            if entry.transliteration.is_none() {
                let text = element_text(&element);
                entry.transliteration =
                    Some(text.trim_matches(|c| c == '(' || c == ')').to_string());
            }
        } else if has_class(value, "parse") {
            if entry.part_of_speech.is_none() {
                entry.part_of_speech = Some(element_text(&element));
            }
        } else if has_class(value, "str") {
            if entry.strongs_number.is_none() {
                let number = element
                    .select(&link_selector)
                    .next()
                    .and_then(|link| link.value().attr("href"))
                    .and_then(|href| STRONGS_HREF.captures(href))
                    .map(|captures| captures[1].to_string());
                entry.strongs_number = Some(number.unwrap_or_default());
            }
        } else if has_class(value, "str2") && entry.definition.is_none() {
            entry.definition = Some(element_text(&element));
        }
    }

    if let Some(finished) = current.take() {
        if let Some(word) = finished.finish(language) {
            words.push(word);
        }
    }

    words
}

/// Extracts the cross-references, in site order
///
/// Each `span.crossverse` holds a link with the reference string; the
/// referenced text follows as sibling text nodes up to the next reference
/// or a paragraph marker.
pub fn extract_cross_references(document: &Html) -> Vec<CrossReference> {
    let mut cross_references = Vec::new();

    let reference_selector = match Selector::parse(CROSS_REFERENCES_SELECTOR) {
        Ok(selector) => selector,
        Err(_) => return cross_references,
    };
    let link_selector = match Selector::parse("a") {
        Ok(selector) => selector,
        Err(_) => return cross_references,
    };

    for span in document.select(&reference_selector) {
        let link = match span.select(&link_selector).next() {
            Some(link) => link,
            None => continue,
        };

        let reference = link.text().collect::<String>().trim().to_string();
        if reference.is_empty() {
            continue;
        }

        let mut parts: Vec<String> = Vec::new();

        for sibling in span.next_siblings() {
            match sibling.value() {
                Node::Element(element) => {
                    if element.name() == "span"
                        && (has_class(element, "crossverse") || has_class(element, "p"))
                    {
                        break;
                    }
                }
                Node::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        parts.push(trimmed.to_string());
                    }
                }
                _ => {}
            }
        }

        cross_references.push(CrossReference {
            reference,
            text: parts.join(" "),
        });
    }

    cross_references
}

/// A lexicon entry under construction during the section scan
///
/// Fields are `Option` so only the first matching span after the entry's
/// `span.word` fills each one.
#[derive(Debug, Default)]
struct PendingWord {
    english_word: String,
    word: Option<String>,
    transliteration: Option<String>,
    part_of_speech: Option<String>,
    strongs_number: Option<String>,
    definition: Option<String>,
}

impl PendingWord {
    fn finish(self, language: Language) -> Option<OriginalWord> {
        let word = self.word.unwrap_or_default();
        if word.is_empty() {
            return None;
        }

        Some(OriginalWord {
            english_word: self.english_word,
            word,
            transliteration: self.transliteration.unwrap_or_default(),
            strongs_number: self.strongs_number.unwrap_or_default(),
            part_of_speech: self.part_of_speech.unwrap_or_default(),
            definition: self.definition.unwrap_or_default(),
            language,
        })
    }
}

/// Maps a full version name to its target abbreviation
fn version_abbreviation(name: &str) -> Option<&'static str> {
    if name.contains("New International Version") {
        Some("NIV")
    } else if name.contains("New Living Translation") {
        Some("NLT")
    } else if name.contains("English Standard Version") {
        Some("ESV")
    } else if name.contains("New King James Version") {
        Some("NKJV")
    } else {
        None
    }
}

fn has_class(element: &scraper::node::Element, class: &str) -> bool {
    element.classes().any(|c| c == class)
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS_1_1: &str = r#"<html><body>
<div id="par">
  <span class="versiontext"><a href="/niv/genesis/1.htm">New International Version</a></span><br>
  In the beginning God created the heavens and the earth.<br><br>
  <span class="versiontext"><a href="/esv/genesis/1.htm">English Standard Version</a></span><br>
  In the beginning, God created the heavens and the earth.<br><br>
  <span class="versiontext"><a href="/kjv/genesis/1.htm">King James Bible</a></span><br>
  In the beginning God created the heaven and the earth.<br><br>
</div>
<div class="padleft">
  <div class="vheading">Hebrew Texts</div>
  <span class="word">In the beginning</span><br>
  <span class="heb">&#x5D1;&#x5B0;&#x5BC;&#x5E8;&#x5B5;&#x5D0;&#x5E9;&#x5C1;&#x5B4;&#x596;&#x5D9;&#x5EA;</span><br>
  <span class="translit">(b&#601;&#xB7;r&#234;&#xB7;&#353;&#238;&#7791;)</span><br>
  <span class="parse">Preposition-b | Noun - feminine singular</span><br>
  <span class="str"><a href="/hebrew/strongs_7225.htm">Strong's 7225</a></span>
  <span class="str2">the first, in place, time, order or rank</span><br>
  <span class="word">God</span><br>
  <span class="heb">&#x5D0;&#x5B1;&#x5DC;&#x5B9;&#x5D4;&#x5B4;&#x591;&#x5D9;&#x5DD;</span><br>
  <span class="translit">(&#x2019;&#x115;&#xB7;l&#333;&#xB7;h&#238;m)</span><br>
  <span class="parse">Noun - masculine plural</span><br>
  <span class="str"><a href="/hebrew/strongs_430.htm">Strong's 430</a></span>
  <span class="str2">God, god</span><br>
</div>
<div id="crf">
  <span class="crossverse"><a href="/john/1-1.htm">John 1:1-3</a></span><br>
  In the beginning was the Word, and the Word was with God.<br>
  <span class="crossverse"><a href="/hebrews/11-3.htm">Hebrews 11:3</a></span><br>
  By faith we understand that the universe was formed at God's command.<br>
</div>
</body></html>"#;

    #[test]
    fn test_extract_translations() {
        let document = Html::parse_document(GENESIS_1_1);
        let translations = extract_translations(&document);

        assert_eq!(translations.len(), 2);
        assert_eq!(translations[0].version, "NIV");
        assert_eq!(
            translations[0].text,
            "In the beginning God created the heavens and the earth."
        );
        assert_eq!(translations[1].version, "ESV");
        assert_eq!(
            translations[1].text,
            "In the beginning, God created the heavens and the earth."
        );
    }

    #[test]
    fn test_untargeted_versions_are_skipped() {
        let document = Html::parse_document(GENESIS_1_1);
        let translations = extract_translations(&document);

        assert!(translations.iter().all(|t| t.version != "KJV"));
    }

    #[test]
    fn test_translation_text_stops_at_paragraph_marker() {
        let html = r#"<div id="par">
            <span class="versiontext"><a>English Standard Version</a></span><br>
            For God so loved the world,
            <span class="p"></span>
            stray text after the marker
        </div>"#;
        let document = Html::parse_document(html);
        let translations = extract_translations(&document);

        assert_eq!(translations.len(), 1);
        assert_eq!(translations[0].text, "For God so loved the world,");
    }

    #[test]
    fn test_translation_includes_italicized_words() {
        let html = r#"<div id="par">
            <span class="versiontext"><a>New King James Version</a></span><br>
            For God so loved the world that He gave His only begotten <i>Son</i>,
        </div>"#;
        let document = Html::parse_document(html);
        let translations = extract_translations(&document);

        assert_eq!(translations.len(), 1);
        assert_eq!(
            translations[0].text,
            "For God so loved the world that He gave His only begotten Son ,"
        );
    }

    #[test]
    fn test_translation_whitespace_is_collapsed() {
        let html = "<div id=\"par\">
            <span class=\"versiontext\"><a>New Living Translation</a></span><br>
            In the beginning\n\t   God created
        </div>";
        let document = Html::parse_document(html);
        let translations = extract_translations(&document);

        assert_eq!(translations[0].text, "In the beginning God created");
    }

    #[test]
    fn test_missing_translation_region_yields_empty() {
        let document = Html::parse_document("<html><body><p>hello</p></body></html>");
        assert!(extract_translations(&document).is_empty());
    }

    #[test]
    fn test_extract_original_words() {
        let document = Html::parse_document(GENESIS_1_1);
        let words = extract_original_words(&document, Language::Hebrew);

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].english_word, "In the beginning");
        assert_eq!(words[0].strongs_number, "7225");
        assert_eq!(words[0].part_of_speech, "Preposition-b | Noun - feminine singular");
        assert_eq!(words[0].definition, "the first, in place, time, order or rank");
        assert_eq!(words[0].language, Language::Hebrew);
        assert_eq!(words[1].english_word, "God");
        assert_eq!(words[1].strongs_number, "430");
    }

    #[test]
    fn test_transliteration_parentheses_are_stripped() {
        let document = Html::parse_document(GENESIS_1_1);
        let words = extract_original_words(&document, Language::Hebrew);

        assert!(!words[0].transliteration.starts_with('('));
        assert!(!words[0].transliteration.ends_with(')'));
        assert!(!words[0].transliteration.is_empty());
    }

    #[test]
    fn test_missing_lexicon_region_yields_empty() {
        let html = r#"<div id="par">
            <span class="versiontext"><a>English Standard Version</a></span><br>
            Jesus wept.
        </div>"#;
        let document = Html::parse_document(html);
        assert!(extract_original_words(&document, Language::Greek).is_empty());
    }

    #[test]
    fn test_wrong_language_heading_yields_empty() {
        // A Hebrew section must not satisfy a Greek lookup
        let document = Html::parse_document(GENESIS_1_1);
        assert!(extract_original_words(&document, Language::Greek).is_empty());
    }

    #[test]
    fn test_entry_without_original_script_is_dropped() {
        let html = r#"<div>
            <div class="vheading">Greek Texts</div>
            <span class="word">orphaned</span><br>
            <span class="word">received</span><br>
            <span class="grk">&#x3BB;&#x3CC;&#x3B3;&#x3BF;&#x3C2;</span><br>
            <span class="str"><a href="/greek/strongs_3056.htm">3056</a></span>
        </div>"#;
        let document = Html::parse_document(html);
        let words = extract_original_words(&document, Language::Greek);

        assert_eq!(words.len(), 1);
        assert_eq!(words[0].english_word, "received");
        assert_eq!(words[0].strongs_number, "3056");
    }

    #[test]
    fn test_extract_cross_references() {
        let document = Html::parse_document(GENESIS_1_1);
        let cross_references = extract_cross_references(&document);

        assert_eq!(cross_references.len(), 2);
        assert_eq!(cross_references[0].reference, "John 1:1-3");
        assert_eq!(
            cross_references[0].text,
            "In the beginning was the Word, and the Word was with God."
        );
        assert_eq!(cross_references[1].reference, "Hebrews 11:3");
    }

    #[test]
    fn test_missing_cross_reference_region_yields_empty() {
        let document = Html::parse_document("<html><body><p>hello</p></body></html>");
        assert!(extract_cross_references(&document).is_empty());
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(matches!(
            parse_verse_page("", Language::Hebrew),
            Err(ExtractionError::EmptyDocument)
        ));
    }

    #[test]
    fn test_non_html_payload_is_an_error() {
        assert!(matches!(
            parse_verse_page("503 backend unavailable", Language::Hebrew),
            Err(ExtractionError::EmptyDocument)
        ));
    }

    #[test]
    fn test_page_without_known_regions_succeeds_empty() {
        let extracted =
            parse_verse_page("<html><body><p>nothing here</p></body></html>", Language::Greek)
                .unwrap();

        assert!(extracted.translations.is_empty());
        assert!(extracted.original_words.is_empty());
        assert!(extracted.cross_references.is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let first = parse_verse_page(GENESIS_1_1, Language::Hebrew).unwrap();
        let second = parse_verse_page(GENESIS_1_1, Language::Hebrew).unwrap();
        assert_eq!(first, second);
    }
}
