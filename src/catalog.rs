// Destination catalog: an insertion-ordered list of destinations with a case-insensitive
// name index. Populated once at startup and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

// Errors raised while loading catalog and pricing data
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Destination name cannot be empty")]
    EmptyName,

    #[error("Duplicate destination: {0}")]
    DuplicateDestination(String),

    #[error("Invalid budget range for {name}: min {min_rate} must not exceed max {max_rate}")]
    InvalidRateRange {
        name: String,
        min_rate: f64,
        max_rate: f64,
    },

    #[error("Invalid exchange rate for {code}: {rate}")]
    InvalidExchangeRate { code: String, rate: f64 },

    #[error("Invalid price for {0}")]
    InvalidPrice(String),

    #[error("{name} needs exactly 3 itineraries, found {found}")]
    ItineraryCount { name: String, found: usize },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParseError(String),

    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[serde(alias = "national")]
    Domestic,
    International,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::Domestic => "domestic",
            TripType::International => "international",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "domestic" | "national" => Some(TripType::Domestic),
            "international" => Some(TripType::International),
            _ => None,
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripType::Domestic => f.write_str("Domestic"),
            TripType::International => f.write_str("International"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub trip_type: TripType,
    pub currency: String,
    // Per-person budget range in the home currency
    pub min_rate: f64,
    pub max_rate: f64,
    #[serde(default)]
    pub attractions: Vec<String>,
    #[serde(default)]
    pub foods: Vec<String>,
    // Three alternative day-by-day plans
    pub itineraries: [Vec<String>; 3],
    pub family_friendly: bool,
    pub couple_friendly: bool,
    #[serde(default)]
    pub weather: String,
    #[serde(default)]
    pub visa: String,
    #[serde(default)]
    pub best_season: String,
}

impl Destination {
    pub fn key(&self) -> String {
        lookup_key(&self.name)
    }
}

// Destinations, transport fares and hotels are joined on this key only
pub fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // Append a destination, rejecting anything that would break the catalog invariants
    pub fn add_destination(&mut self, destination: Destination) -> Result<(), CatalogError> {
        let key = destination.key();
        if key.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        // Written so that NaN bounds are rejected too
        if !(destination.min_rate >= 0.0 && destination.min_rate <= destination.max_rate) {
            return Err(CatalogError::InvalidRateRange {
                name: destination.name,
                min_rate: destination.min_rate,
                max_rate: destination.max_rate,
            });
        }

        if self.index.contains_key(&key) {
            return Err(CatalogError::DuplicateDestination(destination.name));
        }

        self.index.insert(key, self.destinations.len());
        self.destinations.push(destination);
        Ok(())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Destination> {
        self.index
            .get(&lookup_key(name))
            .map(|&position| &self.destinations[position])
    }

    // Everything, in insertion order
    pub fn list_all(&self) -> &[Destination] {
        &self.destinations
    }

    // Full scan, no per-type index
    pub fn of_type(&self, trip_type: TripType) -> impl Iterator<Item = &Destination> + '_ {
        self.destinations
            .iter()
            .filter(move |destination| destination.trip_type == trip_type)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_destination(
        name: &str,
        trip_type: TripType,
        min_rate: f64,
        max_rate: f64,
    ) -> Destination {
        Destination {
            name: name.to_string(),
            trip_type,
            currency: "INR".to_string(),
            min_rate,
            max_rate,
            attractions: vec!["Old Fort".to_string()],
            foods: vec!["Thali".to_string()],
            itineraries: [
                vec!["Day 1: Arrival".to_string()],
                vec!["Day 1: Relax".to_string()],
                vec!["Day 1: Food Tour".to_string()],
            ],
            family_friendly: true,
            couple_friendly: true,
            weather: "Warm".to_string(),
            visa: "Not required".to_string(),
            best_season: "Winter".to_string(),
        }
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let mut catalog = Catalog::new();
        catalog
            .add_destination(sample_destination("South Korea", TripType::International, 1.0, 2.0))
            .unwrap();

        assert!(catalog.find_by_name("south korea").is_some());
        assert!(catalog.find_by_name("  SOUTH KOREA ").is_some());
        assert!(catalog.find_by_name("North Korea").is_none());
    }

    #[test]
    fn test_list_all_preserves_insertion_order() {
        let mut catalog = Catalog::new();
        for name in ["Goa", "Bali", "Agra", "Japan"] {
            let trip_type = if name == "Bali" || name == "Japan" {
                TripType::International
            } else {
                TripType::Domestic
            };
            catalog
                .add_destination(sample_destination(name, trip_type, 100.0, 200.0))
                .unwrap();
        }

        let names: Vec<&str> = catalog.list_all().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Goa", "Bali", "Agra", "Japan"]);

        let domestic: Vec<&str> = catalog
            .of_type(TripType::Domestic)
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(domestic, vec!["Goa", "Agra"]);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut catalog = Catalog::new();
        catalog
            .add_destination(sample_destination("Goa", TripType::Domestic, 1.0, 2.0))
            .unwrap();

        let result = catalog.add_destination(sample_destination("GOA", TripType::Domestic, 3.0, 4.0));
        assert!(matches!(result, Err(CatalogError::DuplicateDestination(_))));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_inverted_rate_range_is_rejected() {
        let mut catalog = Catalog::new();
        let result =
            catalog.add_destination(sample_destination("Hampi", TripType::Domestic, 9000.0, 8000.0));
        assert!(matches!(result, Err(CatalogError::InvalidRateRange { .. })));

        let result =
            catalog.add_destination(sample_destination("Hampi", TripType::Domestic, f64::NAN, 8000.0));
        assert!(matches!(result, Err(CatalogError::InvalidRateRange { .. })));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut catalog = Catalog::new();
        let result = catalog.add_destination(sample_destination("   ", TripType::Domestic, 1.0, 2.0));
        assert!(matches!(result, Err(CatalogError::EmptyName)));
    }

    #[test]
    fn test_trip_type_keys() {
        assert_eq!(TripType::from_key("National"), Some(TripType::Domestic));
        assert_eq!(TripType::from_key("international"), Some(TripType::International));
        assert_eq!(TripType::from_key("orbital"), None);

        let parsed: TripType = serde_json::from_str("\"national\"").unwrap();
        assert_eq!(parsed, TripType::Domestic);
    }
}
