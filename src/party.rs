// Travelling party composition and trip purpose

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Destination;

// Children are charged at 70% of the adult cost everywhere: budgets and fares alike
pub const CHILD_COST_FACTOR: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    pub adults: u32,
    pub children: u32,
}

impl Party {
    pub fn new(adults: u32, children: u32) -> Self {
        Self { adults, children }
    }

    // Saturates instead of wrapping for absurdly large parties
    pub fn headcount(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    // Cost of the whole party when every adult pays `per_adult` and children pay the
    // discounted share of it
    pub fn total_for(&self, per_adult: f64) -> f64 {
        per_adult * self.adults as f64 + per_adult * self.children as f64 * CHILD_COST_FACTOR
    }

    // Party total for an explicit adult/child fare pair
    pub fn fare_total(&self, adult_fare: f64, child_fare: f64) -> f64 {
        adult_fare * self.adults as f64 + child_fare * self.children as f64
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} adults, {} children", self.adults, self.children)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripPurpose {
    Family,
    Couple,
    Friends,
    Solo,
}

impl TripPurpose {
    pub const ALL: [TripPurpose; 4] = [
        TripPurpose::Family,
        TripPurpose::Couple,
        TripPurpose::Friends,
        TripPurpose::Solo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TripPurpose::Family => "family",
            TripPurpose::Couple => "couple",
            TripPurpose::Friends => "friends",
            TripPurpose::Solo => "solo",
        }
    }

    // Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|purpose| purpose.as_str().eq_ignore_ascii_case(name))
    }

    // Family and couple trips only go to destinations flagged for them;
    // friends and solo trips can go anywhere
    pub fn accepts(&self, destination: &Destination) -> bool {
        match self {
            TripPurpose::Family => destination.family_friendly,
            TripPurpose::Couple => destination.couple_friendly,
            TripPurpose::Friends | TripPurpose::Solo => true,
        }
    }
}

impl fmt::Display for TripPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
