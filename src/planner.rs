// The pricing engine: catalog, converter and fare/hotel registries loaded once and then
// only read. A `Planner` is Send + Sync and can be shared behind an `Arc`.

use tracing::info;

use crate::accommodation::{AccommodationQuote, HotelRegistry};
use crate::catalog::{Catalog, CatalogError, Destination, TripType};
use crate::catalog_data::CatalogData;
use crate::config::PlannerConfig;
use crate::currency::CurrencyConverter;
use crate::matcher::{party_totals, BudgetMatcher, DestinationMatch, TierListing};
use crate::party::{Party, TripPurpose};
use crate::selector::{DestinationSelector, NoSelection};
use crate::transport::{TransportQuote, TransportRegistry};

#[derive(Debug, Clone)]
pub struct Planner {
    catalog: Catalog,
    converter: CurrencyConverter,
    transport: TransportRegistry,
    lodging: HotelRegistry,
}

// Everything shown about a destination once it has been picked
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationDetails<'a> {
    pub destination: &'a Destination,
    pub min_total: f64,
    pub max_total: f64,
    // Midpoint of the party totals, home currency
    pub average_cost: f64,
    pub converted_average: f64,
    // The destination currency, or the home currency when no rate is known for it
    pub converted_currency: String,
    pub show_visa: bool,
}

impl DestinationDetails<'_> {
    // True when the destination currency had no rate and the average was passed through
    pub fn is_passthrough(&self) -> bool {
        !self
            .converted_currency
            .eq_ignore_ascii_case(&self.destination.currency)
    }
}

impl Planner {
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        if data.home_currency.trim().is_empty() {
            return Err(CatalogError::InvalidValue {
                field: "home_currency".to_string(),
                value: data.home_currency,
            });
        }
        data.validate()?;

        let mut catalog = Catalog::new();
        for destination in data.destinations {
            catalog.add_destination(destination)?;
        }

        let converter = CurrencyConverter::new(&data.home_currency, data.exchange_rates);

        let mut transport = TransportRegistry::new();
        for (key, options) in data.transport {
            transport.insert(&key, options);
        }

        let mut lodging = HotelRegistry::new();
        for (key, hotels) in data.hotels {
            lodging.insert_hotels(&key, hotels);
        }
        for (key, cities) in data.nearby_cities {
            lodging.insert_nearby(&key, cities);
        }

        info!(
            destinations = catalog.len(),
            routes = transport.len(),
            hotels = lodging.hotel_count(),
            home_currency = converter.home_currency(),
            "Catalog loaded"
        );

        Ok(Self {
            catalog,
            converter,
            transport,
            lodging,
        })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_data(CatalogData::builtin()?)
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self, CatalogError> {
        Self::from_data(config.load_catalog()?)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    pub fn transport(&self) -> &TransportRegistry {
        &self.transport
    }

    pub fn lodging(&self) -> &HotelRegistry {
        &self.lodging
    }

    pub fn home_currency(&self) -> &str {
        self.converter.home_currency()
    }

    pub fn tiers(
        &self,
        trip_type: TripType,
        purpose: TripPurpose,
        party: &Party,
    ) -> Vec<TierListing<'_>> {
        BudgetMatcher::new(&self.catalog).bucket(trip_type, purpose, party)
    }

    pub fn matches_for_tier(
        &self,
        trip_type: TripType,
        purpose: TripPurpose,
        party: &Party,
        tier_number: u8,
    ) -> Result<Vec<DestinationMatch<'_>>, NoSelection> {
        DestinationSelector::new(&self.catalog).matches_for_tier(trip_type, purpose, party, tier_number)
    }

    pub fn select(
        &self,
        trip_type: TripType,
        purpose: TripPurpose,
        party: &Party,
        tier_number: u8,
        input: &str,
    ) -> Result<DestinationMatch<'_>, NoSelection> {
        DestinationSelector::new(&self.catalog).select(trip_type, purpose, party, tier_number, input)
    }

    pub fn details<'a>(&self, destination: &'a Destination, party: &Party) -> DestinationDetails<'a> {
        let (min_total, max_total) = party_totals(destination, party);
        let average_cost = (min_total + max_total) / 2.0;

        let (converted_average, converted_currency) = match self.converter.try_convert(
            average_cost,
            self.home_currency(),
            &destination.currency,
        ) {
            Some(converted) => (converted, destination.currency.clone()),
            None => (
                self.converter
                    .convert(average_cost, self.home_currency(), &destination.currency),
                self.home_currency().to_string(),
            ),
        };

        DestinationDetails {
            destination,
            min_total,
            max_total,
            average_cost,
            converted_average,
            converted_currency,
            show_visa: destination.trip_type == TripType::International,
        }
    }

    pub fn quote_transport(&self, destination: &str, party: &Party) -> TransportQuote {
        self.transport.quote(destination, party)
    }

    pub fn quote_accommodation(
        &self,
        destination: &str,
        party: &Party,
        nights: u32,
    ) -> AccommodationQuote {
        self.lodging.quote(destination, party, nights)
    }
}
