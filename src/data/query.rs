use rand::Rng;

use super::error::QueryError;
use super::model::{Dataset, Field, Record};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Caps applied to result sets shown as cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Size of the fallback sample for empty or unmatched searches.
    pub sample_size: usize,
    /// Maximum number of matches returned by a search.
    pub max_search_results: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            sample_size: 8,
            max_search_results: 8,
        }
    }
}

/// Result of a free-text search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// Records that matched the term, in dataset order.
    Matches(Vec<&'a Record>),
    /// Empty term or no hits: a random sample stands in.
    Sample(Vec<&'a Record>),
}

impl<'a> SearchOutcome<'a> {
    pub fn records(&self) -> &[&'a Record] {
        match self {
            SearchOutcome::Matches(r) | SearchOutcome::Sample(r) => r,
        }
    }

    pub fn into_records(self) -> Vec<&'a Record> {
        match self {
            SearchOutcome::Matches(r) | SearchOutcome::Sample(r) => r,
        }
    }

    pub fn is_sample(&self) -> bool {
        matches!(self, SearchOutcome::Sample(_))
    }
}

/// Whether a selected filter value means "no filter".
fn selects_all(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("all")
}

// ---------------------------------------------------------------------------
// QueryEngine
// ---------------------------------------------------------------------------

/// Filtering, search and sampling over a dataset.
pub struct QueryEngine<'a> {
    dataset: &'a Dataset,
    limits: QueryLimits,
}

impl<'a> QueryEngine<'a> {
    pub fn new(dataset: &'a Dataset, limits: QueryLimits) -> Self {
        QueryEngine { dataset, limits }
    }

    /// Exact-match filter by column name. `None`, `""` and `"All"` select
    /// every record.
    pub fn filter_by_field(
        &self,
        field: &str,
        value: Option<&str>,
    ) -> Result<Vec<&'a Record>, QueryError> {
        let field: Field = field.parse()?;
        Ok(self.filter_by(field, value))
    }

    pub fn filter_by(&self, field: Field, value: Option<&str>) -> Vec<&'a Record> {
        match value {
            Some(v) if !selects_all(v) => self
                .dataset
                .iter()
                .filter(|r| r.field_value(field) == v)
                .collect(),
            _ => self.dataset.iter().collect(),
        }
    }

    /// Case-insensitive substring search over name, location and primary
    /// specialty.
    ///
    /// Never comes back empty for a non-empty dataset: a blank term or a term
    /// with no hits yields a random sample instead.
    // TODO: surface a "no matches" state in the card grid instead of silently
    // swapping in unrelated hospitals.
    pub fn search(&self, term: &str) -> SearchOutcome<'a> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return SearchOutcome::Sample(self.sample_records(self.limits.sample_size));
        }

        let matches: Vec<&'a Record> = self
            .dataset
            .iter()
            .filter(|r| {
                r.organization.to_lowercase().contains(&needle)
                    || r.location.to_lowercase().contains(&needle)
                    || r.primary_specialty.to_lowercase().contains(&needle)
            })
            .take(self.limits.max_search_results)
            .collect();

        log::debug!("search {term:?}: {} matches", matches.len());
        if matches.is_empty() {
            SearchOutcome::Sample(self.sample_records(self.limits.sample_size))
        } else {
            SearchOutcome::Matches(matches)
        }
    }

    pub fn search_text(&self, term: &str) -> Vec<&'a Record> {
        self.search(term).into_records()
    }

    /// `k` distinct records in dataset order; the whole dataset when
    /// `k >= len`.
    pub fn sample_records(&self, k: usize) -> Vec<&'a Record> {
        self.sample_records_with(&mut rand::rng(), k)
    }

    pub fn sample_records_with<R: Rng>(&self, rng: &mut R, k: usize) -> Vec<&'a Record> {
        let records = self.dataset.records();
        if k >= records.len() {
            return records.iter().collect();
        }
        let mut picked = rand::seq::index::sample(rng, records.len(), k).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|i| &records[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::SizeCategory::{self, *};

    fn dataset(n: usize) -> Dataset {
        let sizes = [Small, Medium, Large, Unknown];
        let specialties = ["Cardiology", "Oncology, ER", "Pediatrics"];
        Dataset::new(
            (0..n)
                .map(|i| {
                    record(
                        &format!("Hospital {i}"),
                        if i % 2 == 0 { "Denver, CO" } else { "Reno, NV" },
                        sizes[i % sizes.len()],
                        Some(specialties[i % specialties.len()]),
                        Some(10 * i as u32),
                    )
                })
                .collect(),
        )
    }

    fn engine(ds: &Dataset) -> QueryEngine<'_> {
        QueryEngine::new(ds, QueryLimits::default())
    }

    #[test]
    fn test_filter_by_size_exact_and_idempotent() {
        let ds = dataset(20);
        let q = engine(&ds);
        let small = q.filter_by_field("Size Category", Some("Small")).unwrap();
        assert_eq!(small.len(), 5);
        assert!(small.iter().all(|r| r.size == SizeCategory::Small));

        let again = q.filter_by_field("Size Category", Some("Small")).unwrap();
        assert_eq!(small, again);

        assert!(q
            .filter_by_field("Size Category", Some("small"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_filter_unselected_returns_everything() {
        let ds = dataset(6);
        let q = engine(&ds);
        for value in [None, Some(""), Some("All"), Some("all")] {
            let all = q.filter_by_field("Primary Specialty", value).unwrap();
            assert_eq!(all.len(), 6);
        }
    }

    #[test]
    fn test_filter_unknown_field_fails() {
        let ds = dataset(3);
        assert_eq!(
            engine(&ds).filter_by_field("Bed Count", Some("10")),
            Err(QueryError::UnknownField("Bed Count".to_string()))
        );
    }

    #[test]
    fn test_search_matches_case_insensitively() {
        let ds = dataset(6);
        let q = engine(&ds);

        let hits = q.search("reno");
        assert!(!hits.is_sample());
        assert_eq!(hits.records().len(), 3);
        assert!(hits.records().iter().all(|r| r.location == "Reno, NV"));

        let hits = q.search_text("ONCOLOGY");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.primary_specialty == "Oncology"));

        let hits = q.search_text("hospital 4");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].organization, "Hospital 4");
    }

    #[test]
    fn test_search_caps_matches() {
        let ds = dataset(30);
        let hits = engine(&ds).search("hospital");
        assert!(!hits.is_sample());
        let names: Vec<&str> = hits
            .records()
            .iter()
            .map(|r| r.organization.as_str())
            .collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "Hospital 0");
        assert_eq!(names[7], "Hospital 7");
    }

    #[test]
    fn test_search_fallback_sample() {
        for n in [3, 20] {
            let ds = dataset(n);
            let q = engine(&ds);
            for term in ["", "   ", "zzz_no_match"] {
                let outcome = q.search(term);
                assert!(outcome.is_sample(), "term {term:?}");
                assert_eq!(outcome.records().len(), n.min(8));
            }
        }
        assert!(engine(&Dataset::default()).search_text("").is_empty());
    }

    #[test]
    fn test_sample_records_without_replacement() {
        let ds = dataset(50);
        let q = engine(&ds);
        let mut rng = StdRng::seed_from_u64(7);

        let sample = q.sample_records_with(&mut rng, 10);
        assert_eq!(sample.len(), 10);
        let distinct: HashSet<&str> = sample
            .iter()
            .map(|r| r.organization.as_str())
            .collect();
        assert_eq!(distinct.len(), 10);

        assert_eq!(q.sample_records_with(&mut rng, 50).len(), 50);
        assert_eq!(q.sample_records(500).len(), 50);
        assert!(q.sample_records(0).is_empty());
    }
}
