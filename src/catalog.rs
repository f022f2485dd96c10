// Trek Catalog
// The fixed list of treks we sell, embedded at build time and parsed once per process

use crate::config::SiteConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{error, info};

// Number of treks shown in the home page "featured" section
pub const FEATURED_TREKS: usize = 3;

pub const EMBEDDED_TREKS_JSON: &str = include_str!("../data/treks.json");

static CATALOG: LazyLock<TrekCatalog> = LazyLock::new(|| {
    match TrekCatalog::from_json(EMBEDDED_TREKS_JSON) {
        Ok(catalog) => {
            info!(treks = catalog.len(), "trek catalog loaded");
            catalog
        }
        Err(e) => {
            error!(error = %e, "embedded trek catalog rejected, serving an empty catalog");
            TrekCatalog::empty()
        }
    }
});

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Duplicate trek id: {0}")]
    DuplicateId(String),

    #[error("Trek id is not URL-safe: {0:?}")]
    InvalidId(String),

    #[error("Ranks must run densely from 1 to {expected}, found {found:?}")]
    RankGap { expected: usize, found: Vec<u32> },

    #[error("Itinerary of {trek_id} breaks sequence at entry {position}: day {day}")]
    ItineraryOutOfSequence {
        trek_id: String,
        position: usize,
        day: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[serde(rename = "Easy-Moderate")]
    EasyModerate,
    Moderate,
    #[serde(rename = "Moderate-Hard")]
    ModerateHard,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Easy,
        Difficulty::EasyModerate,
        Difficulty::Moderate,
        Difficulty::ModerateHard,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::EasyModerate => "Easy-Moderate",
            Difficulty::Moderate => "Moderate",
            Difficulty::ModerateHard => "Moderate-Hard",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    pub fn tier(&self) -> DifficultyTier {
        match self {
            Difficulty::Easy | Difficulty::EasyModerate => DifficultyTier::Easy,
            Difficulty::Moderate => DifficultyTier::Moderate,
            Difficulty::ModerateHard | Difficulty::Hard => DifficultyTier::Hard,
            Difficulty::Extreme => DifficultyTier::Extreme,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| format!("unknown difficulty: {}", s))
    }
}

// Coarse grouping used for badge colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyTier {
    Easy,
    Moderate,
    Hard,
    Extreme,
}

impl DifficultyTier {
    pub fn badge_class(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "badge-easy",
            DifficultyTier::Moderate => "badge-moderate",
            DifficultyTier::Hard => "badge-hard",
            DifficultyTier::Extreme => "badge-extreme",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayItinerary {
    pub day: u32,
    pub title: String,
    pub description: String,
    pub elevation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

// `duration`/`durationDays` and `maxAltitude`/`altitudeMeters` are maintained
// independently in the source data; nothing keeps them consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trek {
    pub id: String,
    pub rank: u32,
    pub name: String,
    pub short_name: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub duration_days: u32,
    pub max_altitude: String,
    pub altitude_meters: u32,
    pub description: String,
    pub short_description: String,
    #[serde(default)]
    pub image: String,
    pub price: String,
    pub best_time: Vec<String>,
    pub itinerary: Vec<DayItinerary>,
    pub included: Vec<String>,
    pub excluded: Vec<String>,
    pub highlights: Vec<String>,
    #[serde(default)]
    pub tips: String,
}

#[derive(Debug, Clone, Default)]
pub struct TrekCatalog {
    treks: Vec<Trek>,
    index: HashMap<String, usize>,
}

impl TrekCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    // Parse a JSON array of treks and check the catalog invariants
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let treks: Vec<Trek> =
            serde_json::from_str(json).map_err(|e| CatalogError::JsonParseError(e.to_string()))?;
        Self::from_treks(treks)
    }

    pub fn from_treks(mut treks: Vec<Trek>) -> Result<Self, CatalogError> {
        treks.sort_by_key(|trek| trek.rank);

        let ranks: Vec<u32> = treks.iter().map(|trek| trek.rank).collect();
        if ranks.iter().zip(1u32..).any(|(rank, expected)| *rank != expected) {
            return Err(CatalogError::RankGap {
                expected: treks.len(),
                found: ranks,
            });
        }

        let mut index = HashMap::with_capacity(treks.len());
        for (position, trek) in treks.iter().enumerate() {
            if !is_url_safe_id(&trek.id) {
                return Err(CatalogError::InvalidId(trek.id.clone()));
            }
            if index.insert(trek.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(trek.id.clone()));
            }
            if let Some((position, day)) = trek
                .itinerary
                .iter()
                .zip(1u32..)
                .position(|(entry, expected)| entry.day != expected)
                .map(|position| (position, trek.itinerary[position].day))
            {
                return Err(CatalogError::ItineraryOutOfSequence {
                    trek_id: trek.id.clone(),
                    position,
                    day,
                });
            }
        }

        Ok(Self { treks, index })
    }

    pub fn treks(&self) -> &[Trek] {
        &self.treks
    }

    pub fn len(&self) -> usize {
        self.treks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treks.is_empty()
    }

    // Absent ids are a normal outcome; callers decide where to send the user
    pub fn get_trek_by_id(&self, id: &str) -> Option<&Trek> {
        self.index.get(id).map(|&position| &self.treks[position])
    }

    // First `count` treks by rank, or the whole catalog when it is smaller
    pub fn get_top_treks(&self, count: usize) -> &[Trek] {
        &self.treks[..count.min(self.treks.len())]
    }

    // (id, name) pairs for the booking form's trek selector
    pub fn trek_options(&self) -> Vec<(&str, &str)> {
        self.treks
            .iter()
            .map(|trek| (trek.id.as_str(), trek.name.as_str()))
            .collect()
    }
}

pub fn is_url_safe_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

// Process-wide catalog
pub fn catalog() -> &'static TrekCatalog {
    &CATALOG
}

pub fn get_trek_by_id(id: &str) -> Option<&'static Trek> {
    catalog().get_trek_by_id(id)
}

pub fn get_top_treks(count: usize) -> &'static [Trek] {
    catalog().get_top_treks(count)
}

// Home page "featured" section, sized by configuration
pub fn featured_treks(config: &SiteConfig) -> &'static [Trek] {
    get_top_treks(config.featured_treks)
}
