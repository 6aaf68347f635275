use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::DisplayConfig;
use crate::data::aggregate::{Aggregator, DerivedSummary};
use crate::data::model::{Dataset, Field, Record, SizeCategory};
use crate::data::query::QueryEngine;
use crate::data::table::TableQuery;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Summary,
    Companies,
    Map,
    Analytics,
    Table,
}

impl Page {
    pub const DASHBOARD: [Page; 4] = [
        Page::Summary,
        Page::Companies,
        Page::Map,
        Page::Analytics,
    ];
    pub const DATA: [Page; 1] = [Page::Table];

    pub fn label(self) -> &'static str {
        match self {
            Page::Summary => "Summary",
            Page::Companies => "Companies",
            Page::Map => "Map View",
            Page::Analytics => "Analytics",
            Page::Table => "Table View",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-page view data
// ---------------------------------------------------------------------------

/// A hospital card with its cosmetic details fixed at creation.
#[derive(Debug, Clone)]
pub struct CompanyCard {
    pub record: Record,
    pub description: String,
    pub founded: u16,
}

impl CompanyCard {
    fn new<R: Rng>(record: &Record, rng: &mut R) -> Self {
        let name = &record.organization;
        let specialty = &record.primary_specialty;
        let templates = [
            format!("{name} is a leading healthcare provider specializing in {specialty}."),
            format!("{name} provides exceptional care with a focus on {specialty}."),
            format!(
                "{name} is revolutionizing healthcare in {} with innovative approaches to {specialty}.",
                record.location
            ),
            format!(
                "{name} is dedicated to improving patient outcomes through advanced {specialty} treatments."
            ),
        ];
        let description = templates.choose(rng).cloned().unwrap_or_default();

        CompanyCard {
            record: record.clone(),
            description,
            founded: rng.random_range(2015..=2024),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapMode {
    #[default]
    All,
    BySize,
    BySpecialty,
}

/// Map filter controls and the points they select.
#[derive(Debug, Clone, Default)]
pub struct MapView {
    pub mode: MapMode,
    pub size: Option<String>,
    pub specialty: Option<String>,
    /// `[longitude, latitude]` per category, ready for plotting.
    pub points: Vec<(SizeCategory, Vec<[f64; 2]>)>,
    /// Selected records that have no coordinates.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never replaced.
    pub dataset: Dataset,
    pub display: DisplayConfig,

    pub page: Page,

    pub summary: DerivedSummary,

    pub search: String,
    pub cards: Vec<CompanyCard>,
    /// Whether `cards` is a stand-in sample rather than search hits.
    pub cards_are_sample: bool,

    pub map: MapView,
    pub unique_sizes: Vec<String>,
    pub unique_specialties: Vec<String>,

    pub table: TableQuery,
    pub table_page: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, display: DisplayConfig) -> Self {
        let agg = Aggregator::new(&dataset);
        let summary = agg.summary(&display);
        let unique_sizes = agg
            .unique_values_of(Field::SizeCategory)
            .into_iter()
            .collect();
        let unique_specialties = agg
            .unique_values_of(Field::PrimarySpecialty)
            .into_iter()
            .collect();

        let mut state = Self {
            dataset,
            display,
            page: Page::default(),
            summary,
            search: String::new(),
            cards: Vec::new(),
            cards_are_sample: true,
            map: MapView::default(),
            unique_sizes,
            unique_specialties,
            table: TableQuery::default(),
            table_page: 0,
            status_message: None,
        };
        state.refresh_page();
        state
    }

    /// Switch page and recompute the views it shows.
    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            log::debug!("page {:?} -> {:?}", self.page, page);
            self.page = page;
            self.refresh_page();
        }
    }

    fn refresh_page(&mut self) {
        match self.page {
            Page::Summary | Page::Analytics => {
                self.summary = Aggregator::new(&self.dataset).summary(&self.display);
            }
            Page::Companies => self.refresh_cards(),
            Page::Map => self.refresh_map(),
            Page::Table => {}
        }
    }

    /// Re-run the card search for the current `search` text.
    pub fn refresh_cards(&mut self) {
        let engine = QueryEngine::new(&self.dataset, self.display.query_limits());
        let outcome = engine.search(&self.search);
        let mut rng = rand::rng();

        self.cards_are_sample = outcome.is_sample();
        self.cards = outcome
            .records()
            .iter()
            .map(|r| CompanyCard::new(r, &mut rng))
            .collect();
    }

    pub fn set_map_mode(&mut self, mode: MapMode) {
        self.map.mode = mode;
        self.refresh_map();
    }

    /// Recompute map points from the current filter controls.
    pub fn refresh_map(&mut self) {
        let engine = QueryEngine::new(&self.dataset, self.display.query_limits());
        let selected = match self.map.mode {
            MapMode::All => engine.filter_by(Field::SizeCategory, None),
            MapMode::BySize => engine.filter_by(Field::SizeCategory, self.map.size.as_deref()),
            MapMode::BySpecialty => {
                engine.filter_by(Field::PrimarySpecialty, self.map.specialty.as_deref())
            }
        };

        let mut points: Vec<(SizeCategory, Vec<[f64; 2]>)> = SizeCategory::DISPLAY_ORDER
            .iter()
            .map(|&size| (size, Vec::new()))
            .collect();
        let mut skipped = 0;
        for r in &selected {
            match r.coordinates() {
                Some((lat, lon)) => {
                    let slot = points.iter_mut().find(|(s, _)| *s == r.size);
                    if let Some((_, series)) = slot {
                        series.push([lon, lat]);
                    }
                }
                None => skipped += 1,
            }
        }
        points.retain(|(_, series)| !series.is_empty());

        if skipped > 0 {
            log::warn!("{skipped} selected hospitals have no coordinates and are not shown");
        }
        self.map.points = points;
        self.map.skipped = skipped;
    }
}
