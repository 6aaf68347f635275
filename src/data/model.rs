use std::fmt;
use std::str::FromStr;

use super::error::QueryError;

/// Label used wherever a categorical value is absent.
pub const UNKNOWN: &str = "Unknown";

// ---------------------------------------------------------------------------
// SizeCategory
// ---------------------------------------------------------------------------

/// Hospital size bucket. Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
    Unknown,
}

impl SizeCategory {
    /// Fixed set shown by the summary chart, zero counts included.
    pub const DISPLAY_ORDER: [SizeCategory; 4] = [
        SizeCategory::Small,
        SizeCategory::Medium,
        SizeCategory::Large,
        SizeCategory::Unknown,
    ];

    /// Normalise a raw cell. `Err` carries the unrecognised text.
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(SizeCategory::Unknown);
        };
        match text.to_ascii_lowercase().as_str() {
            "small" => Ok(SizeCategory::Small),
            "medium" => Ok(SizeCategory::Medium),
            "large" => Ok(SizeCategory::Large),
            "unknown" | "n/a" | "na" => Ok(SizeCategory::Unknown),
            _ => Err(text.to_string()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeCategory::Small => "Small",
            SizeCategory::Medium => "Medium",
            SizeCategory::Large => "Large",
            SizeCategory::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Field – queryable categorical columns
// ---------------------------------------------------------------------------

/// Columns that support exact-match filtering and distinct-value listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Organization,
    Location,
    SizeCategory,
    PrimarySpecialty,
}

impl Field {
    pub fn header(self) -> &'static str {
        match self {
            Field::Organization => "Hospital/Organization",
            Field::Location => "Location",
            Field::SizeCategory => "Size Category",
            Field::PrimarySpecialty => "Primary Specialty",
        }
    }
}

impl FromStr for Field {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hospital/Organization" | "organization" => Ok(Field::Organization),
            "Location" | "location" => Ok(Field::Location),
            "Size Category" | "size_category" => Ok(Field::SizeCategory),
            "Primary Specialty" | "primary_specialty" => Ok(Field::PrimarySpecialty),
            other => Err(QueryError::UnknownField(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one normalised row
// ---------------------------------------------------------------------------

/// One hospital after load-time normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub organization: String,
    pub location: String,
    pub size: SizeCategory,
    /// Raw comma-separated list as it appeared in the source.
    pub specialties: Option<String>,
    /// Derived: first entry of `specialties`, or "Unknown".
    pub primary_specialty: String,
    pub beds: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Cosmetic letter for the company card avatar.
    pub initial: char,
}

impl Record {
    /// Both coordinates, or `None` if either is absent.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Trimmed, non-empty specialty entries.
    pub fn specialty_list(&self) -> impl Iterator<Item = &str> {
        self.specialties
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Text value compared by exact-match filters.
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Organization => &self.organization,
            Field::Location => &self.location,
            Field::SizeCategory => self.size.label(),
            Field::PrimarySpecialty => &self.primary_specialty,
        }
    }
}

/// Primary specialty: text before the first comma, trimmed, or "Unknown".
pub fn primary_specialty(raw: Option<&str>) -> String {
    raw.and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

// ---------------------------------------------------------------------------
// Dataset – the immutable loaded table
// ---------------------------------------------------------------------------

/// All records, fixed for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
