use std::cmp::Ordering;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Columns of the table view, source columns plus the derived specialty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableColumn {
    Organization,
    Location,
    SizeCategory,
    Specialties,
    PrimarySpecialty,
    EstimatedBeds,
    Latitude,
    Longitude,
}

impl TableColumn {
    pub const ALL: [TableColumn; 8] = [
        TableColumn::Organization,
        TableColumn::Location,
        TableColumn::SizeCategory,
        TableColumn::Specialties,
        TableColumn::PrimarySpecialty,
        TableColumn::EstimatedBeds,
        TableColumn::Latitude,
        TableColumn::Longitude,
    ];

    pub fn title(self) -> &'static str {
        match self {
            TableColumn::Organization => "Hospital/Organization",
            TableColumn::Location => "Location",
            TableColumn::SizeCategory => "Size Category",
            TableColumn::Specialties => "Specialties",
            TableColumn::PrimarySpecialty => "Primary Specialty",
            TableColumn::EstimatedBeds => "Estimated Beds",
            TableColumn::Latitude => "Latitude",
            TableColumn::Longitude => "Longitude",
        }
    }

    /// Cell text as displayed and exported; absent values are empty.
    pub fn display(self, r: &Record) -> String {
        match self {
            TableColumn::Organization => r.organization.clone(),
            TableColumn::Location => r.location.clone(),
            TableColumn::SizeCategory => r.size.to_string(),
            TableColumn::Specialties => r.specialties.clone().unwrap_or_default(),
            TableColumn::PrimarySpecialty => r.primary_specialty.clone(),
            TableColumn::EstimatedBeds => r.beds.map(|b| b.to_string()).unwrap_or_default(),
            TableColumn::Latitude => r.latitude.map(|v| v.to_string()).unwrap_or_default(),
            TableColumn::Longitude => r.longitude.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    fn numeric(self, r: &Record) -> Option<f64> {
        match self {
            TableColumn::EstimatedBeds => r.beds.map(f64::from),
            TableColumn::Latitude => r.latitude,
            TableColumn::Longitude => r.longitude,
            _ => None,
        }
    }

    fn is_numeric(self) -> bool {
        matches!(
            self,
            TableColumn::EstimatedBeds | TableColumn::Latitude | TableColumn::Longitude
        )
    }

    /// Ascending order; `None` means the value is absent.
    fn compare(self, a: &Record, b: &Record) -> Option<Ordering> {
        if self.is_numeric() {
            let (a, b) = (self.numeric(a)?, self.numeric(b)?);
            return Some(a.total_cmp(&b));
        }
        match self {
            TableColumn::SizeCategory => Some(a.size.cmp(&b.size)),
            TableColumn::Specialties => Some(a.specialties.as_ref()?.cmp(b.specialties.as_ref()?)),
            _ => Some(self.display(a).cmp(&self.display(b))),
        }
    }

    fn is_absent(self, r: &Record) -> bool {
        match self {
            TableColumn::Specialties => r.specialties.is_none(),
            c if c.is_numeric() => c.numeric(r).is_none(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting / filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Column filters and sort order of the table view.
#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    /// Per-column substring filters; blank entries are ignored.
    pub filters: Vec<(TableColumn, String)>,
    pub sort: Option<(TableColumn, SortDirection)>,
}

impl TableQuery {
    pub fn set_filter(&mut self, column: TableColumn, text: String) {
        match self.filters.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = text,
            None => self.filters.push((column, text)),
        }
    }

    pub fn filter_text(&self, column: TableColumn) -> &str {
        self.filters
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, t)| t.as_str())
            .unwrap_or("")
    }

    /// Click on a header: sort by it, or flip direction if already sorted.
    pub fn toggle_sort(&mut self, column: TableColumn) {
        self.sort = match self.sort {
            Some((c, dir)) if c == column => Some((c, dir.toggled())),
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    fn matches(&self, r: &Record) -> bool {
        self.filters.iter().all(|(col, text)| {
            let needle = text.trim().to_lowercase();
            needle.is_empty() || col.display(r).to_lowercase().contains(&needle)
        })
    }

    /// Filtered rows, stably sorted. Absent values sort last either way.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        let mut rows: Vec<&'a Record> = dataset
            .iter()
            .filter(|r| self.matches(r))
            .collect();

        if let Some((col, dir)) = self.sort {
            rows.sort_by(|a, b| match (col.is_absent(a), col.is_absent(b)) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ord = col.compare(a, b).unwrap_or(Ordering::Equal);
                    match dir {
                        SortDirection::Ascending => ord,
                        SortDirection::Descending => ord.reverse(),
                    }
                }
            });
        }
        rows
    }
}

/// One page of `rows` (0-based) and the page count, which is at least 1.
pub fn paginate<'r, T>(rows: &'r [T], page: usize, page_size: usize) -> (&'r [T], usize) {
    let page_size = page_size.max(1);
    let pages = rows.len().div_ceil(page_size).max(1);
    let page = page.min(pages - 1);
    let start = (page * page_size).min(rows.len());
    let end = (start + page_size).min(rows.len());
    (&rows[start..end], pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::SizeCategory::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record(
                "Mercy",
                "Sacramento, CA",
                Large,
                Some("Cardiology"),
                Some(300),
            ),
            record("Hillside", "Austin, TX", Small, None, None),
            record(
                "Bayview",
                "Tampa, FL",
                Medium,
                Some("Oncology, ER"),
                Some(120),
            ),
            record("Aurora", "Austin, TX", Small, Some("ER"), Some(40)),
        ])
    }

    fn names(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.organization.clone()).collect()
    }

    #[test]
    fn test_sort_numeric_absent_last() {
        let ds = dataset();
        let mut q = TableQuery::default();

        q.toggle_sort(TableColumn::EstimatedBeds);
        assert_eq!(
            names(&q.apply(&ds)),
            vec!["Aurora", "Bayview", "Mercy", "Hillside"]
        );

        q.toggle_sort(TableColumn::EstimatedBeds);
        assert_eq!(
            q.sort,
            Some((TableColumn::EstimatedBeds, SortDirection::Descending))
        );
        assert_eq!(
            names(&q.apply(&ds)),
            vec!["Mercy", "Bayview", "Aurora", "Hillside"]
        );
    }

    #[test]
    fn test_sort_text_and_size() {
        let ds = dataset();
        let mut q = TableQuery::default();
        q.toggle_sort(TableColumn::Organization);
        assert_eq!(
            names(&q.apply(&ds)),
            vec!["Aurora", "Bayview", "Hillside", "Mercy"]
        );

        q.toggle_sort(TableColumn::SizeCategory);
        assert_eq!(
            names(&q.apply(&ds)),
            vec!["Hillside", "Aurora", "Bayview", "Mercy"]
        );
    }

    #[test]
    fn test_column_filters() {
        let ds = dataset();
        let mut q = TableQuery::default();
        q.set_filter(TableColumn::Location, "austin".to_string());
        assert_eq!(names(&q.apply(&ds)), vec!["Hillside", "Aurora"]);

        q.set_filter(TableColumn::PrimarySpecialty, "er".to_string());
        assert_eq!(names(&q.apply(&ds)), vec!["Aurora"]);
        assert_eq!(q.filter_text(TableColumn::PrimarySpecialty), "er");

        q.set_filter(TableColumn::Location, String::new());
        assert_eq!(q.filters.len(), 2);
        assert_eq!(names(&q.apply(&ds)), vec!["Aurora"]);
    }

    #[test]
    fn test_paginate() {
        let rows: Vec<u32> = (0..45).collect();
        let (page, pages) = paginate(&rows, 0, 20);
        assert_eq!(pages, 3);
        assert_eq!(page.len(), 20);

        let (page, _) = paginate(&rows, 2, 20);
        assert_eq!(page, &rows[40..]);

        let (page, _) = paginate(&rows, 99, 20);
        assert_eq!(page, &rows[40..]);

        let empty: Vec<u32> = Vec::new();
        assert_eq!(paginate(&empty, 0, 20), (&empty[..], 1));
    }
}
