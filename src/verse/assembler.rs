//! Verse record assembly
//!
//! Pure construction of a `Verse` from a reference identity plus the
//! extracted field groups. Bounds are checked against the versification
//! table before anything is built.

use crate::canon::ReferenceTable;
use crate::verse::{CrossReference, OriginalWord, Translation, Verse};
use crate::SelahError;

/// Assembles a complete `Verse` from extracted field groups
///
/// Canonicalizes the book name, validates that the chapter/verse pair is
/// within the versification table's bounds, and derives the display book
/// name and the "Book Chapter:Verse" reference string.
///
/// # Arguments
///
/// * `table` - The versification table
/// * `book` - Book name (slug, case-insensitive)
/// * `chapter` - Chapter number (1-indexed)
/// * `verse` - Verse number (1-indexed)
/// * `translations` - Extracted translations, site order
/// * `original_words` - Extracted lexicon entries, word order
/// * `cross_references` - Extracted cross-references, site order
///
/// # Returns
///
/// * `Ok(Verse)` - The assembled record
/// * `Err(SelahError::UnknownBook)` - Unrecognized book name
/// * `Err(SelahError::OutOfRange)` - Chapter or verse outside the table's bounds
pub fn assemble(
    table: &ReferenceTable,
    book: &str,
    chapter: u32,
    verse: u32,
    translations: Vec<Translation>,
    original_words: Vec<OriginalWord>,
    cross_references: Vec<CrossReference>,
) -> Result<Verse, SelahError> {
    let slug = table.canonical_slug(book)?;

    let out_of_range = || SelahError::OutOfRange {
        book: slug.to_string(),
        chapter,
        verse,
    };

    if chapter == 0 || chapter > table.chapter_count(slug)? {
        return Err(out_of_range());
    }

    if verse == 0 || verse > table.verse_count(slug, chapter)? {
        return Err(out_of_range());
    }

    let book_name = table.display_name(slug)?;
    let reference = format!("{} {}:{}", book_name, chapter, verse);

    Ok(Verse {
        reference,
        book: book_name,
        chapter,
        verse,
        translations,
        original_words,
        cross_references,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_matches_reference_identity() {
        let table = ReferenceTable::new();
        let verse = assemble(&table, "genesis", 1, 1, vec![], vec![], vec![]).unwrap();

        assert_eq!(verse.reference, "Genesis 1:1");
        assert_eq!(verse.book, "Genesis");
        assert_eq!(verse.chapter, 1);
        assert_eq!(verse.verse, 1);
        assert!(verse.translations.is_empty());
        assert!(verse.original_words.is_empty());
        assert!(verse.cross_references.is_empty());
    }

    #[test]
    fn test_assemble_multi_word_book_name() {
        let table = ReferenceTable::new();
        let verse = assemble(&table, "1_peter", 1, 1, vec![], vec![], vec![]).unwrap();

        assert_eq!(verse.reference, "1 Peter 1:1");
        assert_eq!(verse.book, "1 Peter");
    }

    #[test]
    fn test_assemble_is_case_insensitive() {
        let table = ReferenceTable::new();
        let verse = assemble(&table, "GENESIS", 1, 1, vec![], vec![], vec![]).unwrap();
        assert_eq!(verse.reference, "Genesis 1:1");
    }

    #[test]
    fn test_assemble_rejects_out_of_range_chapter() {
        let table = ReferenceTable::new();
        let err = assemble(&table, "genesis", 51, 1, vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, SelahError::OutOfRange { .. }));
    }

    #[test]
    fn test_assemble_rejects_out_of_range_verse() {
        let table = ReferenceTable::new();
        // Genesis 1 has 31 verses
        let err = assemble(&table, "genesis", 1, 32, vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, SelahError::OutOfRange { .. }));
    }

    #[test]
    fn test_assemble_rejects_zero_indices() {
        let table = ReferenceTable::new();
        assert!(assemble(&table, "genesis", 0, 1, vec![], vec![], vec![]).is_err());
        assert!(assemble(&table, "genesis", 1, 0, vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn test_assemble_rejects_unknown_book() {
        let table = ReferenceTable::new();
        let err = assemble(&table, "enoch", 1, 1, vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, SelahError::UnknownBook { .. }));
    }

    #[test]
    fn test_assemble_accepts_last_verse() {
        let table = ReferenceTable::new();
        // Revelation 22 has 21 verses
        let verse = assemble(&table, "revelation", 22, 21, vec![], vec![], vec![]).unwrap();
        assert_eq!(verse.reference, "Revelation 22:21");
    }
}
