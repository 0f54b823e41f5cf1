use crate::store::{Record, SynonymStore};

/// Records whose head word or any synonym contains `query`, ignoring ASCII case.
///
/// Results keep store order. An empty (or blank) query matches every record.
pub fn search<'a>(store: &'a SynonymStore, query: &str) -> Vec<&'a Record> {
    let q = query.trim().to_ascii_lowercase();
    if q.is_empty() {
        return store.iter().collect();
    }
    store
        .iter()
        .filter(|r| {
            r.word().to_ascii_lowercase().contains(&q)
                || r.synonyms().iter().any(|s| s.to_ascii_lowercase().contains(&q))
        })
        .collect()
}
