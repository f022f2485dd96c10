// Trek listing filters: free-text search plus a coarse difficulty filter

use crate::catalog::{Difficulty, Trek, TrekCatalog};
use tracing::debug;

pub const ALL_DIFFICULTIES: &str = "all";

// Filter buttons on the listing page, in display order
pub const DIFFICULTY_FILTER_OPTIONS: [&str; 5] = ["all", "Easy", "Moderate", "Hard", "Extreme"];

// A difficulty token matches any label that contains it, case-sensitively,
// so "Hard" also selects "Moderate-Hard" and "Easy" selects "Easy-Moderate".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Token(String),
}

impl DifficultyFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_DIFFICULTIES {
            DifficultyFilter::All
        } else {
            DifficultyFilter::Token(value.to_string())
        }
    }

    pub fn options() -> Vec<DifficultyFilter> {
        DIFFICULTY_FILTER_OPTIONS
            .iter()
            .map(|option| DifficultyFilter::parse(option))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        match self {
            DifficultyFilter::All => ALL_DIFFICULTIES,
            DifficultyFilter::Token(token) => token,
        }
    }

    pub fn matches(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Token(token) => difficulty.label().contains(token.as_str()),
        }
    }
}

impl From<Difficulty> for DifficultyFilter {
    fn from(difficulty: Difficulty) -> Self {
        DifficultyFilter::Token(difficulty.label().to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrekFilter {
    pub query: String,
    pub difficulty: DifficultyFilter,
}

impl TrekFilter {
    pub fn new(query: impl Into<String>, difficulty: DifficultyFilter) -> Self {
        Self {
            query: query.into(),
            difficulty,
        }
    }

    pub fn is_default(&self) -> bool {
        self.query.is_empty() && self.difficulty == DifficultyFilter::All
    }

    pub fn matches(&self, trek: &Trek) -> bool {
        self.difficulty.matches(trek.difficulty) && matches_query(trek, &self.query)
    }
}

// Case-insensitive substring match on name or description; empty matches everything
fn matches_query(trek: &Trek, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    trek.name.to_lowercase().contains(&needle) || trek.description.to_lowercase().contains(&needle)
}

// Both predicates are ANDed and the input order is preserved
pub fn filter_treks<'a>(
    treks: &'a [Trek],
    query: &str,
    difficulty: &DifficultyFilter,
) -> Vec<&'a Trek> {
    let mut filtered = Vec::new();

    for trek in treks {
        if !difficulty.matches(trek.difficulty) {
            continue;
        }

        if !matches_query(trek, query) {
            continue;
        }

        filtered.push(trek);
    }

    filtered
}

// One listing-page session: current filters and the treks they select
pub struct TrekSearch<'a> {
    catalog: &'a TrekCatalog,
    filter: TrekFilter,
    results: Vec<&'a Trek>,
}

impl<'a> TrekSearch<'a> {
    pub fn new(catalog: &'a TrekCatalog) -> Self {
        Self {
            catalog,
            filter: TrekFilter::default(),
            results: catalog.treks().iter().collect(),
        }
    }

    pub fn filter(&self) -> &TrekFilter {
        &self.filter
    }

    pub fn results(&self) -> &[&'a Trek] {
        &self.results
    }

    // No trek matches the current filters
    pub fn is_empty_state(&self) -> bool {
        self.results.is_empty()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.refresh();
    }

    pub fn set_difficulty(&mut self, difficulty: DifficultyFilter) {
        self.filter.difficulty = difficulty;
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.filter = TrekFilter::default();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.results = filter_treks(
            self.catalog.treks(),
            &self.filter.query,
            &self.filter.difficulty,
        );
        debug!(
            query = %self.filter.query,
            difficulty = self.filter.difficulty.as_str(),
            matches = self.results.len(),
            "trek filters applied"
        );
    }
}
