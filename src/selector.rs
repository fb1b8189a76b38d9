// Resolves a tier + 1-based index choice into a concrete destination

use thiserror::Error;

use crate::catalog::{Catalog, TripType};
use crate::matcher::{tier, BudgetMatcher, DestinationMatch};
use crate::party::{Party, TripPurpose};

// Why no destination was selected. The caller restarts the flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoSelection {
    #[error("Budget range {0} does not exist (choose 1-3)")]
    InvalidTier(u8),

    #[error("'{0}' is not a valid destination number")]
    NotANumber(String),

    #[error("Destination {choice} is out of range (1-{available})")]
    OutOfRange { choice: i64, available: usize },

    #[error("No destinations match the selected budget range")]
    EmptyMatch,
}

#[derive(Debug, Clone, Copy)]
pub struct DestinationSelector<'a> {
    matcher: BudgetMatcher<'a>,
}

impl<'a> DestinationSelector<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            matcher: BudgetMatcher::new(catalog),
        }
    }

    // Re-derive the tier bounds and re-run matching for it
    pub fn matches_for_tier(
        &self,
        trip_type: TripType,
        purpose: TripPurpose,
        party: &Party,
        tier_number: u8,
    ) -> Result<Vec<DestinationMatch<'a>>, NoSelection> {
        let tier = tier(trip_type, tier_number).ok_or(NoSelection::InvalidTier(tier_number))?;
        Ok(self.matcher.matches_in(trip_type, purpose, party, &tier))
    }

    // Resolve a raw 1-based choice against an already computed match list
    pub fn pick(
        matches: &[DestinationMatch<'a>],
        input: &str,
    ) -> Result<DestinationMatch<'a>, NoSelection> {
        if matches.is_empty() {
            return Err(NoSelection::EmptyMatch);
        }

        let trimmed = input.trim();
        let choice: i64 = trimmed
            .parse()
            .map_err(|_| NoSelection::NotANumber(trimmed.to_string()))?;

        usize::try_from(choice)
            .ok()
            .and_then(|choice| choice.checked_sub(1))
            .and_then(|position| matches.get(position))
            .copied()
            .ok_or(NoSelection::OutOfRange {
                choice,
                available: matches.len(),
            })
    }

    pub fn select(
        &self,
        trip_type: TripType,
        purpose: TripPurpose,
        party: &Party,
        tier_number: u8,
        input: &str,
    ) -> Result<DestinationMatch<'a>, NoSelection> {
        let matches = self.matches_for_tier(trip_type, purpose, party, tier_number)?;
        Self::pick(&matches, input)
    }
}
