//! A single dictionary line: a head word and its synonyms.
//!
//! [`Record::parse_line`] and the [`Display`](std::fmt::Display) impl are the
//! only places that know the on-disk shape `word | syn1, syn2`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SynonymError};

const WORD_DELIMITER: char = '|';
const SYNONYM_DELIMITER: char = ',';

/// One head word plus its ordered list of synonyms.
///
/// The head word is non-empty and never contains `|` or a line break.
/// Synonyms are trimmed, non-empty, and never contain `|`, `,` or a line break.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    word: String,
    synonyms: Vec<String>,
}

impl Record {
    /// Build a record from caller-supplied parts, trimming each of them.
    pub fn new<W, I, S>(word: W, synonyms: I) -> Result<Self>
    where
        W: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let word = validate_word(word.as_ref())?;
        let synonyms = synonyms
            .into_iter()
            .map(|s| validate_synonym(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { word, synonyms })
    }

    /// Parse one `word | syn1, syn2` line.
    pub fn parse_line(line: &str) -> Result<Self> {
        Self::parse_numbered(line, 1)
    }

    /// Same as [`parse_line`](Self::parse_line), reporting errors against `line_no`.
    pub(crate) fn parse_numbered(line: &str, line_no: usize) -> Result<Self> {
        let Some((head, rest)) = line.split_once(WORD_DELIMITER) else {
            return Err(SynonymError::parse(
                line_no,
                format!("missing '{WORD_DELIMITER}' in {line:?}"),
            ));
        };
        if rest.contains(WORD_DELIMITER) {
            return Err(SynonymError::parse(
                line_no,
                format!("more than one '{WORD_DELIMITER}' in {line:?}"),
            ));
        }
        let word = head.trim();
        if word.is_empty() {
            return Err(SynonymError::parse(line_no, format!("empty head word in {line:?}")));
        }
        let synonyms = rest
            .split(SYNONYM_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self { word: word.to_string(), synonyms })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    /// Whether this record's head word equals `word`, ignoring ASCII case.
    pub fn is_word(&self, word: &str) -> bool {
        self.word.eq_ignore_ascii_case(word.trim())
    }

    /// Index of the first synonym equal to `synonym`, ignoring ASCII case.
    pub fn synonym_index(&self, synonym: &str) -> Option<usize> {
        let synonym = synonym.trim();
        self.synonyms.iter().position(|s| s.eq_ignore_ascii_case(synonym))
    }

    pub fn has_synonym(&self, synonym: &str) -> bool {
        self.synonym_index(synonym).is_some()
    }

    pub(crate) fn push_synonym(&mut self, synonym: String) {
        self.synonyms.push(synonym);
    }

    pub(crate) fn remove_synonym_at(&mut self, index: usize) -> String {
        self.synonyms.remove(index)
    }

    /// Stable case-insensitive sort of the synonym list.
    pub fn sort_synonyms(&mut self) {
        self.synonyms.sort_by(|a, b| cmp_ignore_case(a, b));
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.synonyms.is_empty() {
            write!(f, "{} {}", self.word, WORD_DELIMITER)
        } else {
            write!(f, "{} {} {}", self.word, WORD_DELIMITER, self.synonyms.join(", "))
        }
    }
}

impl FromStr for Record {
    type Err = SynonymError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_line(s)
    }
}

/// Order two strings by ASCII case folding, then by ordinal byte value.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

fn validate_word(raw: &str) -> Result<String> {
    let word = raw.trim();
    if word.is_empty() {
        return Err(SynonymError::InvalidRecord("head word is empty".into()));
    }
    if word.contains(WORD_DELIMITER) || has_line_break(word) {
        return Err(SynonymError::InvalidRecord(format!(
            "head word {word:?} contains '{WORD_DELIMITER}' or a line break"
        )));
    }
    Ok(word.to_string())
}

pub(crate) fn validate_synonym(raw: &str) -> Result<String> {
    let synonym = raw.trim();
    if synonym.is_empty() {
        return Err(SynonymError::InvalidRecord("synonym is empty".into()));
    }
    if synonym.contains([WORD_DELIMITER, SYNONYM_DELIMITER]) || has_line_break(synonym) {
        return Err(SynonymError::InvalidRecord(format!(
            "synonym {synonym:?} contains '{WORD_DELIMITER}', '{SYNONYM_DELIMITER}' or a line break"
        )));
    }
    Ok(synonym.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn parse_trims_and_drops_empty_pieces() {
		let r = Record::parse_line("  dog |puppy ,, hound  ,").unwrap();
		assert_eq!(r.word(), "dog");
		assert_eq!(r.synonyms(), ["puppy", "hound"]);
		assert_eq!(r.to_string(), "dog | puppy, hound");
	}

	#[test]
	fn parse_rejects_malformed_lines() {
		assert!(matches!(Record::parse_line("dog puppy"), Err(SynonymError::Parse { line: 1, .. })));
		assert!(matches!(Record::parse_line("  | puppy"), Err(SynonymError::Parse { .. })));
		assert!(matches!(Record::parse_numbered("a | b | c", 7), Err(SynonymError::Parse { line: 7, .. })));
	}

	#[test]
	fn record_without_synonyms_renders_bare_delimiter() {
		let r = Record::parse_line("lonely |").unwrap();
		assert!(r.synonyms().is_empty());
		assert_eq!(r.to_string(), "lonely |");
		assert_eq!(Record::parse_line(&r.to_string()).unwrap(), r);
	}

	#[test]
	fn new_validates_parts() {
		let r = Record::new(" cat ", [" kitten", "feline "]).unwrap();
		assert_eq!(r.word(), "cat");
		assert_eq!(r.synonyms(), ["kitten", "feline"]);

		assert!(matches!(Record::new("", ["x"]), Err(SynonymError::InvalidRecord(_))));
		assert!(matches!(Record::new("a|b", ["x"]), Err(SynonymError::InvalidRecord(_))));
		assert!(matches!(Record::new("a", ["x, y"]), Err(SynonymError::InvalidRecord(_))));
		assert!(matches!(Record::new("a", ["  "]), Err(SynonymError::InvalidRecord(_))));
		assert!(matches!(Record::new("a\nb", Vec::<&str>::new()), Err(SynonymError::InvalidRecord(_))));
	}

	#[test]
	fn lookups_ignore_ascii_case() {
		let r = Record::parse_line("Dog | Puppy, hound").unwrap();
		assert!(r.is_word("dOG"));
		assert_eq!(r.synonym_index("PUPPY"), Some(0));
		assert_eq!(r.synonym_index("HOUND "), Some(1));
		assert!(!r.has_synonym("cat"));
	}

	#[test]
	fn sort_synonyms_is_stable_for_case_variants() {
		let mut r = Record::parse_line("x | b, A, a, B, c").unwrap();
		r.sort_synonyms();
		assert_eq!(r.synonyms(), ["A", "a", "b", "B", "c"]);
	}

	#[test]
	fn cmp_ignore_case_orders_by_folded_bytes() {
		assert_eq!(cmp_ignore_case("Apple", "apple"), Ordering::Equal);
		assert_eq!(cmp_ignore_case("apple", "Banana"), Ordering::Less);
		assert_eq!(cmp_ignore_case("ab", "a"), Ordering::Greater);
	}

	fn piece() -> impl Strategy<Value = String> {
		"[A-Za-z][A-Za-z0-9 '-]{0,10}[A-Za-z0-9]?"
	}

	proptest! {
		#[test]
		fn render_then_parse_is_identity(word in piece(), synonyms in prop::collection::vec(piece(), 0..6)) {
			let record = Record::new(&word, &synonyms).unwrap();
			let reparsed = Record::parse_line(&record.to_string()).unwrap();
			prop_assert_eq!(reparsed, record);
		}
	}
}
