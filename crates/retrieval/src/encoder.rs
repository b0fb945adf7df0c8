//! Binary genre encoding over a frozen vocabulary.
//!
//! The vocabulary is derived once from the whole catalog and is frozen for
//! the life of the build. Labels are kept in sorted order so the encoding is
//! reproducible across runs regardless of catalog file ordering.

use catalog::Catalog;
use std::collections::{BTreeSet, HashMap};

/// Fixed genre vocabulary plus the encoder over it.
///
/// Encoding is pure: the same label list always yields the same vector, and
/// neither input order nor duplicate labels change the result. Labels absent
/// from the vocabulary are silently ignored; a user's preferred genres may
/// not intersect the catalog's vocabulary at all, which yields the all-zero
/// query vector handled by the index.
#[derive(Debug, Clone)]
pub struct GenreVocabulary {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl GenreVocabulary {
    /// Derive the vocabulary from every genre seen in the catalog
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::from_labels(
            catalog
                .movies()
                .iter()
                .flat_map(|m| m.genres.iter().cloned()),
        )
    }

    /// Build a vocabulary from an arbitrary label set (sorted, deduplicated)
    pub fn from_labels(labels: impl IntoIterator<Item = String>) -> Self {
        let distinct: BTreeSet<String> = labels.into_iter().collect();
        let labels: Vec<String> = distinct.into_iter().collect();
        let positions = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Self { labels, positions }
    }

    /// Vocabulary labels in encoding order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Coordinate of a label, if it is in the vocabulary
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Vector width
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Encode a genre list as a binary vector of vocabulary width
    pub fn encode(&self, genres: &[String]) -> Vec<f32> {
        let mut vector = vec![0.0; self.labels.len()];
        for genre in genres {
            if let Some(&i) = self.positions.get(genre.as_str()) {
                vector[i] = 1.0;
            }
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> GenreVocabulary {
        GenreVocabulary::from_labels(
            ["Drama", "Action", "Sci-Fi"].map(String::from),
        )
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vocab = vocabulary();
        assert_eq!(vocab.labels(), &["Action", "Drama", "Sci-Fi"]);
        assert_eq!(vocab.position("Drama"), Some(1));
    }

    #[test]
    fn test_encode_sets_matching_coordinates() {
        let vocab = vocabulary();
        let vector = vocab.encode(&labels(&["Action", "Sci-Fi"]));
        assert_eq!(vector, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_encode_hamming_weight_counts_known_labels() {
        let vocab = vocabulary();
        let vector = vocab.encode(&labels(&["Action", "Western", "Sci-Fi"]));
        let weight: f32 = vector.iter().sum();
        // "Western" is not in the vocabulary and is ignored, not an error
        assert_eq!(weight, 2.0);
    }

    #[test]
    fn test_encode_invariant_under_order_and_duplicates() {
        let vocab = vocabulary();
        let a = vocab.encode(&labels(&["Action", "Drama"]));
        let b = vocab.encode(&labels(&["Drama", "Action", "Action"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_all_unknown_yields_zero_vector() {
        let vocab = vocabulary();
        let vector = vocab.encode(&labels(&["Polka", "Noise"]));
        assert!(vector.iter().all(|&x| x == 0.0));
        assert_eq!(vector.len(), 3);
    }
}
