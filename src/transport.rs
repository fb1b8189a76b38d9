// Transport fares per destination, keyed by lowercase destination name

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::catalog::lookup_key;
use crate::party::{Party, CHILD_COST_FACTOR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportOption {
    pub mode: String,
    // Home currency, per adult
    pub adult_fare: f64,
}

impl TransportOption {
    // Child fares are never stored
    pub fn child_fare(&self) -> f64 {
        self.adult_fare * CHILD_COST_FACTOR
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FareRow {
    pub mode: String,
    pub adult_fare: f64,
    pub child_fare: f64,
    pub party_total: f64,
}

// Price every option for the party, keeping the table order
pub fn quote_fares(options: &[TransportOption], party: &Party) -> Vec<FareRow> {
    options
        .iter()
        .map(|option| {
            let child_fare = option.child_fare();
            FareRow {
                mode: option.mode.clone(),
                adult_fare: option.adult_fare,
                child_fare,
                party_total: party.fare_total(option.adult_fare, child_fare),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportQuote {
    Available {
        destination: String,
        rows: Vec<FareRow>,
    },
    // Not an error: the caller shows a "no transport" message and carries on
    Unavailable { destination: String },
}

impl TransportQuote {
    pub fn destination(&self) -> &str {
        match self {
            TransportQuote::Available { destination, .. } => destination,
            TransportQuote::Unavailable { destination } => destination,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, TransportQuote::Available { .. })
    }

    pub fn rows(&self) -> &[FareRow] {
        match self {
            TransportQuote::Available { rows, .. } => rows.as_slice(),
            TransportQuote::Unavailable { .. } => &[],
        }
    }

    // Case-insensitive lookup of the mode the customer picked
    pub fn find_mode(&self, mode: &str) -> Option<&FareRow> {
        let mode = mode.trim();
        self.rows()
            .iter()
            .find(|row| row.mode.eq_ignore_ascii_case(mode))
    }
}

#[derive(Debug, Default, Clone)]
pub struct TransportRegistry {
    routes: HashMap<String, Vec<TransportOption>>,
}

impl TransportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Replace the fare table for a destination
    pub fn insert(&mut self, destination: &str, options: Vec<TransportOption>) {
        self.routes.insert(lookup_key(destination), options);
    }

    pub fn options_for(&self, destination: &str) -> Option<&[TransportOption]> {
        self.routes
            .get(&lookup_key(destination))
            .map(|options| options.as_slice())
            .filter(|options| !options.is_empty())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn quote(&self, destination: &str, party: &Party) -> TransportQuote {
        match self.options_for(destination) {
            Some(options) => {
                let rows = quote_fares(options, party);
                debug!(destination, options = rows.len(), "Quoted transport");
                TransportQuote::Available {
                    destination: destination.to_string(),
                    rows,
                }
            }
            None => {
                warn!(destination, "No transport options available");
                TransportQuote::Unavailable {
                    destination: destination.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn option(mode: &str, adult_fare: f64) -> TransportOption {
        TransportOption {
            mode: mode.to_string(),
            adult_fare,
        }
    }

    fn registry() -> TransportRegistry {
        let mut registry = TransportRegistry::new();
        registry.insert(
            "Jaipur",
            vec![option("Train", 1200.0), option("Bus", 800.0), option("Flight", 4500.0)],
        );
        registry.insert("South Korea", vec![option("Flight", 45000.0)]);
        registry.insert("Atlantis", vec![]);
        registry
    }

    #[test]
    fn test_train_fare_for_two_adults_one_child() {
        let quote = registry().quote("Jaipur", &Party::new(2, 1));
        assert!(quote.is_available());

        let train = &quote.rows()[0];
        assert_eq!(train.mode, "Train");
        assert_eq!(train.adult_fare, 1200.0);
        assert_close(train.child_fare, 840.0);
        assert_close(train.party_total, 3240.0);
    }

    #[test]
    fn test_rows_keep_table_order() {
        let quote = registry().quote("jaipur", &Party::new(1, 0));
        let modes: Vec<&str> = quote.rows().iter().map(|r| r.mode.as_str()).collect();
        assert_eq!(modes, vec!["Train", "Bus", "Flight"]);
    }

    #[test_case("Narnia"; "#1 unknown destination")]
    #[test_case("Atlantis"; "#2 empty fare table")]
    fn test_unavailable(destination: &str) {
        let quote = registry().quote(destination, &Party::new(2, 0));
        assert_eq!(
            quote,
            TransportQuote::Unavailable {
                destination: destination.to_string()
            }
        );
        assert!(quote.rows().is_empty());
        assert!(quote.find_mode("flight").is_none());
    }

    #[test_case("flight", Some(45000.0); "#1 lowercase")]
    #[test_case(" FLIGHT ", Some(45000.0); "#2 padded uppercase")]
    #[test_case("Ferry", None; "#3 unknown mode")]
    fn test_find_mode(mode: &str, expected_fare: Option<f64>) {
        let quote = registry().quote("SOUTH KOREA", &Party::new(1, 0));
        assert_eq!(quote.find_mode(mode).map(|row| row.adult_fare), expected_fare);
    }

    #[test]
    fn test_children_only_pay_child_fare() {
        let rows = quote_fares(&[option("Bus", 1000.0)], &Party::new(1, 3));
        assert_close(rows[0].party_total, 1000.0 + 3.0 * 700.0);
    }
}
