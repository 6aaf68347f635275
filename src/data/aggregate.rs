//! Summary statistics over the loaded [`Dataset`].
//!
//! Every function is a single pass over the records; ties in frequency
//! rankings keep the order in which values were first seen.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::error::QueryError;
use super::model::{Dataset, Field, SizeCategory};
use crate::config::DisplayConfig;

/// The N most frequent values plus a bucket for everything else.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopN {
    pub entries: Vec<(String, usize)>,
    pub remainder: usize,
}

impl TopN {
    /// Sum of the listed counts and the remainder.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum::<usize>() + self.remainder
    }
}

/// Every derived figure the dashboard pages show.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSummary {
    pub total: usize,
    pub size_counts: BTreeMap<SizeCategory, usize>,
    pub average_beds: Option<f64>,
    pub top_specialties: TopN,
    /// Mean beds per category, highest first.
    pub beds_by_size: Vec<(SizeCategory, f64)>,
    pub top_locations: Vec<(String, usize)>,
}

impl DerivedSummary {
    /// Count for one category, zero when absent.
    pub fn size_count(&self, size: SizeCategory) -> usize {
        self.size_counts.get(&size).copied().unwrap_or(0)
    }
}

/// Count occurrences, sorted by count descending, ties in first-seen order.
pub fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values {
        match slots.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(v, c)| (v.to_string(), c))
        .collect()
}

/// Read-only statistics view over a dataset.
pub struct Aggregator<'a> {
    dataset: &'a Dataset,
}

impl<'a> Aggregator<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Aggregator { dataset }
    }

    /// Categories with zero records are absent from the map.
    pub fn count_by_size_category(&self) -> BTreeMap<SizeCategory, usize> {
        let mut counts = BTreeMap::new();
        for r in self.dataset.iter() {
            *counts.entry(r.size).or_insert(0) += 1;
        }
        counts
    }

    /// Mean of the present bed counts; `None` when no record has one.
    pub fn average_beds(&self) -> Option<f64> {
        mean(self.dataset.iter().filter_map(|r| r.beds))
    }

    pub fn top_specialties(&self, n: usize) -> TopN {
        let mut counts = value_counts(self.dataset.iter().map(|r| r.primary_specialty.as_str()));
        let rest = if counts.len() > n {
            counts.split_off(n)
        } else {
            Vec::new()
        };
        TopN {
            entries: counts,
            remainder: rest.iter().map(|(_, c)| c).sum(),
        }
    }

    /// Mean beds per category, highest first. Categories without any bed
    /// counts are omitted.
    pub fn average_beds_by_size_category(&self) -> Vec<(SizeCategory, f64)> {
        let mut sums: BTreeMap<SizeCategory, (u64, usize)> = BTreeMap::new();
        for r in self.dataset.iter() {
            if let Some(beds) = r.beds {
                let slot = sums.entry(r.size).or_insert((0, 0));
                slot.0 += beds as u64;
                slot.1 += 1;
            }
        }

        let mut means: Vec<(SizeCategory, f64)> = sums
            .into_iter()
            .map(|(size, (sum, n))| (size, sum as f64 / n as f64))
            .collect();
        means.sort_by(|a, b| b.1.total_cmp(&a.1));
        means
    }

    pub fn top_locations(&self, n: usize) -> Vec<(String, usize)> {
        let mut counts = value_counts(self.dataset.iter().map(|r| r.location.as_str()));
        counts.truncate(n);
        counts
    }

    /// Sorted distinct values of a categorical column.
    pub fn unique_values(&self, field: &str) -> Result<BTreeSet<String>, QueryError> {
        let field: Field = field.parse()?;
        Ok(self.unique_values_of(field))
    }

    pub fn unique_values_of(&self, field: Field) -> BTreeSet<String> {
        self.dataset
            .iter()
            .map(|r| r.field_value(field).to_string())
            .collect()
    }

    pub fn summary(&self, display: &DisplayConfig) -> DerivedSummary {
        DerivedSummary {
            total: self.dataset.len(),
            size_counts: self.count_by_size_category(),
            average_beds: self.average_beds(),
            top_specialties: self.top_specialties(display.top_specialties),
            beds_by_size: self.average_beds_by_size_category(),
            top_locations: self.top_locations(display.top_locations),
        }
    }
}

fn mean(values: impl Iterator<Item = u32>) -> Option<f64> {
    let (sum, n) = values.fold((0u64, 0usize), |(s, n), v| (s + v as u64, n + 1));
    (n > 0).then(|| sum as f64 / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::SizeCategory::*;

    fn specialties_dataset(specialties: &[&str]) -> Dataset {
        Dataset::new(
            specialties
                .iter()
                .map(|&s| record("H", "L", Small, Some(s), None))
                .collect(),
        )
    }

    #[test]
    fn test_average_beds_and_size_counts() {
        let ds = Dataset::new(vec![
            record("A", "X", Small, None, Some(100)),
            record("B", "X", Small, None, None),
            record("C", "Y", Large, None, Some(300)),
        ]);
        let agg = Aggregator::new(&ds);

        assert_eq!(agg.average_beds(), Some(200.0));
        let counts = agg.count_by_size_category();
        assert_eq!(counts, BTreeMap::from([(Small, 2), (Large, 1)]));
        assert_eq!(counts.values().sum::<usize>(), ds.len());
    }

    #[test]
    fn test_average_beds_no_data() {
        let ds = Dataset::new(vec![record("A", "X", Small, None, None)]);
        assert_eq!(Aggregator::new(&ds).average_beds(), None);
        assert_eq!(Aggregator::new(&Dataset::default()).average_beds(), None);
    }

    #[test]
    fn test_top_specialties_with_remainder() {
        let ds = specialties_dataset(&["Cardiology", "Cardiology", "Oncology"]);
        let top = Aggregator::new(&ds).top_specialties(1);
        assert_eq!(top.entries, vec![("Cardiology".to_string(), 2)]);
        assert_eq!(top.remainder, 1);
    }

    #[test]
    fn test_top_specialties_counts_sum_to_len() {
        let ds = specialties_dataset(&["A", "B", "B", "C", "C", "C", "D", "E, F", "  "]);
        let agg = Aggregator::new(&ds);
        for n in 0..8 {
            assert_eq!(agg.top_specialties(n).total(), ds.len(), "n = {n}");
        }
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let ds = specialties_dataset(&["Oncology", "Cardiology", "Cardiology", "Oncology", "ER"]);
        let top = Aggregator::new(&ds).top_specialties(3);
        let names: Vec<&str> = top.entries.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["Oncology", "Cardiology", "ER"]);
    }

    #[test]
    fn test_average_beds_by_size_category() {
        let ds = Dataset::new(vec![
            record("A", "X", Small, None, Some(50)),
            record("B", "X", Small, None, Some(70)),
            record("C", "X", Large, None, Some(400)),
            record("D", "X", Medium, None, Some(150)),
            record("E", "X", Unknown, None, None),
        ]);
        let means = Aggregator::new(&ds).average_beds_by_size_category();
        assert_eq!(means, vec![(Large, 400.0), (Medium, 150.0), (Small, 60.0)]);
    }

    #[test]
    fn test_top_locations() {
        let ds = Dataset::new(vec![
            record("A", "Austin, TX", Small, None, None),
            record("B", "Boston, MA", Small, None, None),
            record("C", "Boston, MA", Small, None, None),
            record("D", "Chicago, IL", Small, None, None),
        ]);
        let top = Aggregator::new(&ds).top_locations(2);
        assert_eq!(
            top,
            vec![("Boston, MA".to_string(), 2), ("Austin, TX".to_string(), 1)]
        );
    }

    #[test]
    fn test_unique_values() {
        let ds = specialties_dataset(&["Oncology", "Cardiology", "Oncology", ""]);
        let agg = Aggregator::new(&ds);
        let values: Vec<String> = agg
            .unique_values("Primary Specialty")
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, vec!["Cardiology", "Oncology", "Unknown"]);

        assert_eq!(
            agg.unique_values("Size Category").unwrap(),
            BTreeSet::from(["Small".to_string()])
        );
        assert!(matches!(
            agg.unique_values("Beds"),
            Err(QueryError::UnknownField(_))
        ));
    }

    #[test]
    fn test_summary_uses_configured_top_n() {
        let ds = Dataset::new(vec![
            record("A", "Boston, MA", Small, Some("A"), Some(40)),
            record("B", "Boston, MA", Large, Some("B"), Some(500)),
            record("C", "Austin, TX", Small, Some("C"), Some(60)),
            record("D", "Denver, CO", Medium, Some("A"), None),
        ]);
        let display = DisplayConfig {
            top_specialties: 2,
            top_locations: 1,
            ..DisplayConfig::default()
        };
        let summary = Aggregator::new(&ds).summary(&display);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.size_count(Small), 2);
        assert_eq!(summary.size_count(Unknown), 0);
        assert_eq!(summary.top_specialties.entries.len(), 2);
        assert_eq!(summary.top_specialties.remainder, 1);
        assert_eq!(summary.beds_by_size, vec![(Large, 500.0), (Small, 50.0)]);
        assert_eq!(summary.top_locations, vec![("Boston, MA".to_string(), 2)]);
    }
}
