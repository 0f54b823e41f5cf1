//! The synonym dictionary: an ordered, in-memory list of [`Record`]s backed
//! by a plain text file with one record per line.
//!
//! Every mutating operation validates first and only then touches the
//! records, so a failed call leaves the store exactly as it was.

mod record;

pub use record::{Record, cmp_ignore_case};

use std::fs;
use std::path::Path;

use crate::error::{Result, SynonymError};

/// Ordered collection of records; order is file order until [`sort`](Self::sort).
///
/// Head words are not required to be unique. Lookups scan in order and the
/// first match wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynonymStore {
    records: Vec<Record>,
}

impl SynonymStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a dictionary file. Any malformed line aborts the whole load.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| SynonymError::io(path, e))?;
        let store = Self::parse(&contents)?;
        tracing::debug!("loaded {} records from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse dictionary text; a leading byte-order mark and blank lines are skipped.
    pub fn parse(contents: &str) -> Result<Self> {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        let records = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Record::parse_numbered(line, i + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { records })
    }

    /// Write every record, one `\n`-terminated line each, replacing `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|e| SynonymError::io(path, e))?;
        tracing::debug!("saved {} records to {}", self.len(), path.display());
        Ok(())
    }

    /// The file contents [`save`](Self::save) would write.
    pub fn render(&self) -> String {
        use std::fmt::Write as _;
        let mut buf = String::new();
        for record in &self.records {
            let _ = writeln!(&mut buf, "{record}");
        }
        buf
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.records.iter().any(|r| r.is_word(word))
    }

    /// Position of the first record whose head word matches `word`, ignoring case.
    pub fn find_index(&self, word: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.is_word(word))
            .ok_or_else(|| SynonymError::NotFound(word.trim().to_string()))
    }

    pub fn get(&self, word: &str) -> Result<&Record> {
        let index = self.find_index(word)?;
        Ok(&self.records[index])
    }

    /// The rendered `word | syn, syn` line for `word`.
    pub fn get_line(&self, word: &str) -> Result<String> {
        self.get(word).map(Record::to_string)
    }

    /// Append `record` at the end. Existing records keep their order.
    pub fn add_record(&mut self, record: Record) {
        tracing::debug!("adding record for {}", record.word());
        self.records.push(record);
    }

    /// Remove and return the first record for `word`.
    pub fn remove_record(&mut self, word: &str) -> Result<Record> {
        let index = self.find_index(word)?;
        tracing::debug!("removing record for {word} at {index}");
        Ok(self.records.remove(index))
    }

    /// Append `synonym` to the record for `word`.
    ///
    /// A synonym that is already present (ignoring case) is rejected with
    /// [`SynonymError::DuplicateSynonym`].
    pub fn add_synonym(&mut self, word: &str, synonym: &str) -> Result<()> {
        let index = self.find_index(word)?;
        let synonym = record::validate_synonym(synonym)?;
        let record = &mut self.records[index];
        if record.has_synonym(&synonym) {
            return Err(SynonymError::DuplicateSynonym {
                word: record.word().to_string(),
                synonym,
            });
        }
        tracing::debug!("adding synonym {synonym} to {}", record.word());
        record.push_synonym(synonym);
        Ok(())
    }

    /// Remove the first synonym of `word` equal to `synonym`, ignoring case.
    pub fn remove_synonym(&mut self, word: &str, synonym: &str) -> Result<String> {
        let index = self.find_index(word)?;
        let record = &mut self.records[index];
        let synonym = synonym.trim();
        let Some(at) = record.synonym_index(synonym) else {
            tracing::warn!("{synonym} not listed under {}", record.word());
            return Err(SynonymError::SynonymNotFound {
                word: record.word().to_string(),
                synonym: synonym.to_string(),
            });
        };
        tracing::debug!("removing synonym {synonym} from {}", record.word());
        Ok(record.remove_synonym_at(at))
    }

    /// Sort synonyms within each record, then records by head word.
    ///
    /// Both sorts are stable: keys equal up to case keep their relative order.
    pub fn sort(&mut self) {
        for record in &mut self.records {
            record.sort_synonyms();
        }
        self.records.sort_by(|a, b| cmp_ignore_case(a.word(), b.word()));
    }
}

impl<'a> IntoIterator for &'a SynonymStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for SynonymStore {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SynonymStore {
        SynonymStore::parse("dog | puppy, hound\ncat | kitten, feline\n").unwrap()
    }

    #[test]
    fn parse_skips_blank_lines_and_reports_line_numbers() {
        let store = SynonymStore::parse("\n a | b\n   \n c | d \n").unwrap();
        assert_eq!(store.len(), 2);

        let err = SynonymStore::parse("a | b\n\nbroken line\n").unwrap_err();
        assert!(matches!(err, SynonymError::Parse { line: 3, .. }));
    }

    #[test]
    fn lookup_is_case_insensitive_and_first_match_wins() {
        let mut store = sample();
        store.add_record(Record::new("DOG", ["mutt"]).unwrap());
        assert_eq!(store.find_index("Dog").unwrap(), 0);
        assert_eq!(store.get_line("dOg").unwrap(), "dog | puppy, hound");
        assert!(matches!(store.find_index("bird"), Err(SynonymError::NotFound(w)) if w == "bird"));
    }

    #[test]
    fn add_and_remove_synonym_follow_append_order() {
        let mut store = sample();
        store.add_synonym("dog", "canine").unwrap();
        assert_eq!(store.get("dog").unwrap().synonyms(), ["puppy", "hound", "canine"]);

        assert_eq!(store.remove_synonym("dog", "HOUND").unwrap(), "hound");
        assert_eq!(store.get("dog").unwrap().synonyms(), ["puppy", "canine"]);
    }

    #[test]
    fn duplicate_synonym_is_rejected_without_change() {
        let mut store = sample();
        let before = store.clone();
        let err = store.add_synonym("dog", "Puppy").unwrap_err();
        assert!(matches!(err, SynonymError::DuplicateSynonym { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn invalid_synonym_is_rejected_without_change() {
        let mut store = sample();
        let before = store.clone();
        assert!(matches!(store.add_synonym("dog", "a, b"), Err(SynonymError::InvalidRecord(_))));
        assert!(matches!(store.add_synonym("dog", " "), Err(SynonymError::InvalidRecord(_))));
        assert_eq!(store, before);
    }

    #[test]
    fn missing_word_wins_over_invalid_synonym() {
        let mut store = sample();
        assert!(matches!(store.add_synonym("bird", ""), Err(SynonymError::NotFound(_))));
    }

    #[test]
    fn parse_strips_leading_byte_order_mark() {
        let store = SynonymStore::parse("\u{feff}dog | puppy\ncat | kitten\n").unwrap();
        assert_eq!(store.find_index("dog").unwrap(), 0);
        assert_eq!(store.render(), "dog | puppy\ncat | kitten\n");
    }

    #[test]
    fn not_found_errors_carry_trimmed_input() {
        let mut store = sample();
        assert_eq!(store.find_index(" bird ").unwrap_err().to_string(), "bird not present");
        let err = store.remove_synonym(" dog ", "  kitten ").unwrap_err();
        assert!(matches!(err, SynonymError::SynonymNotFound { ref synonym, .. } if synonym == "kitten"));
        assert_eq!(err.to_string(), "kitten is not a synonym of dog");
    }

    #[test]
    fn sort_orders_records_and_synonyms() {
        let mut store = sample();
        store.sort();
        assert_eq!(store.render(), "cat | feline, kitten\ndog | hound, puppy\n");
    }
}
