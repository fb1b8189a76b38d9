// Budget tiers and destination matching.
// Totals depend on the live party size, so matching is recomputed for every query.

use tracing::debug;

use crate::catalog::{Catalog, Destination, TripType};
use crate::party::{Party, TripPurpose};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetTier {
    // 1-based position shown to the customer
    pub number: u8,
    pub label: &'static str,
    // Inclusive bounds in the home currency
    pub min: f64,
    pub max: f64,
}

impl BudgetTier {
    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

const DOMESTIC_TIERS: [BudgetTier; 3] = [
    BudgetTier {
        number: 1,
        label: "Budget",
        min: 15000.0,
        max: 30000.0,
    },
    BudgetTier {
        number: 2,
        label: "Mid-Range",
        min: 30000.0,
        max: 50000.0,
    },
    BudgetTier {
        number: 3,
        label: "Premium",
        min: 50000.0,
        max: 80000.0,
    },
];

const INTERNATIONAL_TIERS: [BudgetTier; 3] = [
    BudgetTier {
        number: 1,
        label: "Budget",
        min: 50000.0,
        max: 100000.0,
    },
    BudgetTier {
        number: 2,
        label: "Mid-Range",
        min: 100000.0,
        max: 200000.0,
    },
    BudgetTier {
        number: 3,
        label: "Premium",
        min: 200000.0,
        max: 500000.0,
    },
];

pub fn tiers_for(trip_type: TripType) -> &'static [BudgetTier; 3] {
    match trip_type {
        TripType::Domestic => &DOMESTIC_TIERS,
        TripType::International => &INTERNATIONAL_TIERS,
    }
}

pub fn tier(trip_type: TripType, number: u8) -> Option<BudgetTier> {
    tiers_for(trip_type)
        .iter()
        .find(|tier| tier.number == number)
        .copied()
}

// A destination that qualified for a tier, with the party totals it qualified on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestinationMatch<'a> {
    pub destination: &'a Destination,
    pub min_total: f64,
    pub max_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierListing<'a> {
    pub tier: BudgetTier,
    pub matches: Vec<DestinationMatch<'a>>,
}

impl TierListing<'_> {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

// (minTotal, maxTotal) for the whole party
pub fn party_totals(destination: &Destination, party: &Party) -> (f64, f64) {
    (
        party.total_for(destination.min_rate),
        party.total_for(destination.max_rate),
    )
}

#[derive(Debug, Clone, Copy)]
pub struct BudgetMatcher<'a> {
    catalog: &'a Catalog,
}

impl<'a> BudgetMatcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    // Destinations of `trip_type` whose min or max party total falls inside the tier and
    // that suit the trip purpose, in catalog order
    pub fn matches_in(
        &self,
        trip_type: TripType,
        purpose: TripPurpose,
        party: &Party,
        tier: &BudgetTier,
    ) -> Vec<DestinationMatch<'a>> {
        let catalog: &'a Catalog = self.catalog;
        catalog
            .of_type(trip_type)
            .filter_map(|destination| {
                let (min_total, max_total) = party_totals(destination, party);
                let in_budget = tier.contains(min_total) || tier.contains(max_total);

                if in_budget && purpose.accepts(destination) {
                    Some(DestinationMatch {
                        destination,
                        min_total,
                        max_total,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    // All three tiers for the trip type, each with its matching destinations
    pub fn bucket(
        &self,
        trip_type: TripType,
        purpose: TripPurpose,
        party: &Party,
    ) -> Vec<TierListing<'a>> {
        let listings: Vec<TierListing<'a>> = tiers_for(trip_type)
            .iter()
            .map(|tier| TierListing {
                tier: *tier,
                matches: self.matches_in(trip_type, purpose, party, tier),
            })
            .collect();

        debug!(
            %trip_type,
            %purpose,
            %party,
            matched = ?listings.iter().map(|l| l.matches.len()).collect::<Vec<_>>(),
            "Bucketed destinations into budget tiers"
        );

        listings
    }
}
