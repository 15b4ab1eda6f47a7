//! Bundled medicine vocabulary with substring search.

use std::cmp::Ordering;

use strsim::jaro_winkler;

use super::{SuggestResult, SuggestionSource};

/// Medicine names bundled with the crate.
const BUNDLED_MEDICINES: &str = include_str!("../../data/medicines.json");

/// In-memory medicine vocabulary.
///
/// Used only to filter suggestions client-side; selecting a name outside the
/// vocabulary is still a valid edit.
#[derive(Debug, Clone)]
pub struct MedicineVocabulary {
    names: Vec<String>,
}

impl MedicineVocabulary {
    /// Load the vocabulary bundled with the crate.
    pub fn bundled() -> SuggestResult<Self> {
        Self::from_json(BUNDLED_MEDICINES)
    }

    /// Load a vocabulary from a JSON array of names.
    pub fn from_json(json: &str) -> SuggestResult<Self> {
        let names: Vec<String> = serde_json::from_str(json)?;
        Ok(Self { names })
    }

    /// Build a vocabulary from an explicit name list.
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names, in bundled order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Case-insensitive substring search.
    ///
    /// Results are ordered by match position, then Jaro-Winkler similarity
    /// to the query, then name. An empty query returns the head of the
    /// vocabulary.
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.names.iter().take(limit).cloned().collect();
        }

        let mut hits: Vec<(usize, f64, &String)> = self
            .names
            .iter()
            .filter_map(|name| {
                let haystack = name.to_lowercase();
                haystack
                    .find(&needle)
                    .map(|pos| (pos, jaro_winkler(&needle, &haystack), name))
            })
            .collect();

        hits.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
                .then_with(|| a.2.cmp(b.2))
        });

        hits.into_iter()
            .take(limit)
            .map(|(_, _, name)| name.clone())
            .collect()
    }
}

impl SuggestionSource for MedicineVocabulary {
    fn fetch(&self, query: &str, limit: usize) -> SuggestResult<Vec<String>> {
        Ok(self.search(query, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> MedicineVocabulary {
        MedicineVocabulary::from_names(vec![
            "Paracetamol".into(),
            "Pantoprazole".into(),
            "Tramadol".into(),
            "Cetirizine".into(),
            "Cefixime".into(),
        ])
    }

    #[test]
    fn test_bundled_vocabulary_loads() {
        let vocabulary = MedicineVocabulary::bundled().unwrap();
        assert!(!vocabulary.is_empty());
        assert!(vocabulary.names().iter().any(|n| n == "Paracetamol"));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let results = vocab().search("para", 10);
        assert_eq!(results, vec!["Paracetamol".to_string()]);

        let results = vocab().search("MOL", 10);
        assert!(results.contains(&"Paracetamol".to_string()));
        assert!(results.contains(&"Tramadol".to_string()));
    }

    #[test]
    fn test_prefix_matches_rank_before_interior_matches() {
        // "ce" starts Cetirizine and Cefixime but sits inside Paracetamol
        let results = vocab().search("ce", 10);
        assert_eq!(results[results.len() - 1], "Paracetamol");
    }

    #[test]
    fn test_empty_query_returns_head_of_vocabulary() {
        let results = vocab().search("", 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], "Paracetamol");
    }

    #[test]
    fn test_limit_caps_results() {
        let results = vocab().search("e", 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(vocab().search("zzz", 10).is_empty());
    }
}
