// One customer's walk through the planner, as an explicit state machine.
// Every failure hands back a `Restart` reason and drops the session to `ProfileCollected`.

use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::accommodation::{AccommodationQuote, HotelRow};
use crate::catalog::TripType;
use crate::matcher::{DestinationMatch, TierListing};
use crate::party::{Party, TripPurpose};
use crate::planner::{DestinationDetails, Planner};
use crate::profile::{parse_nights, parse_tier, parse_trip_type, CustomerProfile, InputRejection};
use crate::selector::{DestinationSelector, NoSelection};
use crate::transport::{FareRow, TransportQuote};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionStage {
    ProfileCollected,
    TripTypeChosen,
    TiersDisplayed,
    DestinationChosen,
    TransportQuoted,
    AccommodationQuoted,
    SummaryProduced,
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStage::ProfileCollected => "profile collected",
            SessionStage::TripTypeChosen => "trip type chosen",
            SessionStage::TiersDisplayed => "tiers displayed",
            SessionStage::DestinationChosen => "destination chosen",
            SessionStage::TransportQuoted => "transport quoted",
            SessionStage::AccommodationQuoted => "accommodation quoted",
            SessionStage::SummaryProduced => "summary produced",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Restart {
    #[error("{0}")]
    Rejected(#[from] InputRejection),

    #[error("{0}")]
    NoSelection(#[from] NoSelection),

    #[error("Cannot {attempted} at stage '{stage}'")]
    OutOfOrder {
        stage: SessionStage,
        attempted: &'static str,
    },
}

// Never persisted; printed once and dropped
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary {
    pub reference: String,
    pub generated_at: DateTime<Utc>,
    pub customer: String,
    pub destination: String,
    pub trip_type: TripType,
    pub party: Party,
    pub purpose: TripPurpose,
    pub transport_choice: Option<FareRow>,
    pub hotel_choice: Option<HotelRow>,
    pub nights: u32,
}

impl TripSummary {
    // Booked transport plus booked hotel; anything not booked counts as zero
    pub fn estimated_total(&self) -> f64 {
        let transport = self
            .transport_choice
            .as_ref()
            .map_or(0.0, |row| row.party_total);
        let hotel = self.hotel_choice.as_ref().map_or(0.0, |row| row.total_price);
        transport + hotel
    }
}

fn quote_reference() -> String {
    format!("WP-{:08X}", rand::random::<u32>())
}

pub struct TripSession<'p> {
    planner: &'p Planner,
    profile: CustomerProfile,
    stage: SessionStage,
    trip_type: Option<TripType>,
    // Set once a budget range has been picked
    tier: Option<u8>,
    matches: Vec<DestinationMatch<'p>>,
    destination: Option<DestinationMatch<'p>>,
    transport: Option<TransportQuote>,
    transport_choice: Option<FareRow>,
    nights: u32,
    accommodation: Option<AccommodationQuote>,
    hotel_choice: Option<HotelRow>,
}

impl<'p> TripSession<'p> {
    pub fn new(planner: &'p Planner, profile: CustomerProfile) -> Self {
        Self {
            planner,
            profile,
            stage: SessionStage::ProfileCollected,
            trip_type: None,
            tier: None,
            matches: Vec::new(),
            destination: None,
            transport: None,
            transport_choice: None,
            nights: 0,
            accommodation: None,
            hotel_choice: None,
        }
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn profile(&self) -> &CustomerProfile {
        &self.profile
    }

    pub fn trip_type(&self) -> Option<TripType> {
        self.trip_type
    }

    pub fn destination(&self) -> Option<DestinationMatch<'p>> {
        self.destination
    }

    // Back to the start; the profile is kept, every choice is dropped
    pub fn restart(&mut self) {
        debug!(from = %self.stage, "Session restarted");
        self.stage = SessionStage::ProfileCollected;
        self.trip_type = None;
        self.tier = None;
        self.matches.clear();
        self.destination = None;
        self.transport = None;
        self.transport_choice = None;
        self.nights = 0;
        self.accommodation = None;
        self.hotel_choice = None;
    }

    fn fail<T>(&mut self, reason: impl Into<Restart>) -> Result<T, Restart> {
        let reason = reason.into();
        debug!(stage = %self.stage, %reason, "Restarting session");
        self.restart();
        Err(reason)
    }

    fn require(&mut self, allowed: &[SessionStage], attempted: &'static str) -> Result<(), Restart> {
        if allowed.contains(&self.stage) {
            return Ok(());
        }
        let stage = self.stage;
        self.fail(Restart::OutOfOrder { stage, attempted })
    }

    pub fn choose_trip_type(&mut self, input: &str) -> Result<TripType, Restart> {
        self.require(&[SessionStage::ProfileCollected], "choose a trip type")?;

        match parse_trip_type(input) {
            Ok(trip_type) => {
                self.trip_type = Some(trip_type);
                self.stage = SessionStage::TripTypeChosen;
                Ok(trip_type)
            }
            Err(rejection) => self.fail(rejection),
        }
    }

    // Bucket the catalog for this customer; may be called again to redisplay
    pub fn display_tiers(&mut self) -> Result<Vec<TierListing<'p>>, Restart> {
        self.require(
            &[SessionStage::TripTypeChosen, SessionStage::TiersDisplayed],
            "display budget ranges",
        )?;

        let Some(trip_type) = self.trip_type else {
            let stage = self.stage;
            return self.fail(Restart::OutOfOrder {
                stage,
                attempted: "display budget ranges",
            });
        };

        let planner = self.planner;
        let listings = planner.tiers(trip_type, self.profile.purpose, &self.profile.party);
        self.stage = SessionStage::TiersDisplayed;
        Ok(listings)
    }

    // Re-run matching for the chosen tier. An empty tier restarts the session.
    pub fn choose_tier(&mut self, input: &str) -> Result<Vec<DestinationMatch<'p>>, Restart> {
        self.require(&[SessionStage::TiersDisplayed], "choose a budget range")?;

        let tier_number = match parse_tier(input) {
            Ok(tier_number) => tier_number,
            Err(rejection) => return self.fail(rejection),
        };

        let Some(trip_type) = self.trip_type else {
            return self.fail(Restart::OutOfOrder {
                stage: SessionStage::TiersDisplayed,
                attempted: "choose a budget range",
            });
        };

        let planner = self.planner;
        let matches = match planner.matches_for_tier(
            trip_type,
            self.profile.purpose,
            &self.profile.party,
            tier_number,
        ) {
            Ok(matches) if matches.is_empty() => return self.fail(NoSelection::EmptyMatch),
            Ok(matches) => matches,
            Err(no_selection) => return self.fail(no_selection),
        };

        self.tier = Some(tier_number);
        self.matches = matches.clone();
        Ok(matches)
    }

    pub fn choose_destination(&mut self, input: &str) -> Result<DestinationMatch<'p>, Restart> {
        self.require(&[SessionStage::TiersDisplayed], "choose a destination")?;
        if self.tier.is_none() {
            return self.fail(Restart::OutOfOrder {
                stage: SessionStage::TiersDisplayed,
                attempted: "choose a destination",
            });
        }

        match DestinationSelector::pick(&self.matches, input) {
            Ok(chosen) => {
                debug!(destination = %chosen.destination.name, "Destination chosen");
                self.destination = Some(chosen);
                self.stage = SessionStage::DestinationChosen;
                Ok(chosen)
            }
            Err(no_selection) => self.fail(no_selection),
        }
    }

    fn chosen(&mut self, attempted: &'static str) -> Result<DestinationMatch<'p>, Restart> {
        match self.destination {
            Some(chosen) => Ok(chosen),
            None => {
                let stage = self.stage;
                self.fail(Restart::OutOfOrder { stage, attempted })
            }
        }
    }

    pub fn details(&mut self) -> Result<DestinationDetails<'p>, Restart> {
        let chosen = self.chosen("show destination details")?;
        Ok(self.planner.details(chosen.destination, &self.profile.party))
    }

    pub fn quote_transport(&mut self) -> Result<TransportQuote, Restart> {
        self.require(&[SessionStage::DestinationChosen], "quote transport")?;
        let chosen = self.chosen("quote transport")?;

        let quote = self
            .planner
            .quote_transport(&chosen.destination.name, &self.profile.party);
        self.transport = Some(quote.clone());
        self.stage = SessionStage::TransportQuoted;
        Ok(quote)
    }

    // Book one of the quoted modes. An unknown mode books nothing and keeps the session going.
    pub fn book_transport(&mut self, mode: &str) -> Result<Option<FareRow>, Restart> {
        self.require(&[SessionStage::TransportQuoted], "book transport")?;

        let row = self
            .transport
            .as_ref()
            .and_then(|quote| quote.find_mode(mode))
            .cloned();
        if row.is_some() {
            self.transport_choice = row.clone();
        }
        Ok(row)
    }

    pub fn quote_accommodation(&mut self, nights_input: &str) -> Result<AccommodationQuote, Restart> {
        self.require(&[SessionStage::TransportQuoted], "quote accommodation")?;

        let nights = match parse_nights(nights_input) {
            Ok(nights) => nights,
            Err(rejection) => return self.fail(rejection),
        };
        let chosen = self.chosen("quote accommodation")?;

        let quote = self
            .planner
            .quote_accommodation(&chosen.destination.name, &self.profile.party, nights);
        self.nights = nights;
        self.accommodation = Some(quote.clone());
        self.stage = SessionStage::AccommodationQuoted;
        Ok(quote)
    }

    // Book a hotel by its 1-based option number. Anything that does not name a direct
    // hotel row books nothing.
    pub fn book_hotel(&mut self, option_input: &str) -> Result<Option<HotelRow>, Restart> {
        self.require(&[SessionStage::AccommodationQuoted], "book a hotel")?;

        let row = option_input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|option| self.accommodation.as_ref()?.pick(option))
            .cloned();
        if row.is_some() {
            self.hotel_choice = row.clone();
        }
        Ok(row)
    }

    pub fn summarize(&mut self) -> Result<TripSummary, Restart> {
        self.require(&[SessionStage::AccommodationQuoted], "produce a summary")?;
        let chosen = self.chosen("produce a summary")?;
        let Some(trip_type) = self.trip_type else {
            return self.fail(Restart::OutOfOrder {
                stage: SessionStage::AccommodationQuoted,
                attempted: "produce a summary",
            });
        };

        let summary = TripSummary {
            reference: quote_reference(),
            generated_at: Utc::now(),
            customer: self.profile.name.clone(),
            destination: chosen.destination.name.clone(),
            trip_type,
            party: self.profile.party,
            purpose: self.profile.purpose,
            transport_choice: self.transport_choice.clone(),
            hotel_choice: self.hotel_choice.clone(),
            nights: self.nights,
        };
        self.stage = SessionStage::SummaryProduced;
        Ok(summary)
    }
}
