// Lodging quotes with an occupancy surcharge, falling back to nearby cities when a
// destination has no hotels of its own

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::catalog::lookup_key;
use crate::party::Party;
use crate::transport::{quote_fares, FareRow, TransportOption};

// Room prices cover two guests
pub const DOUBLE_OCCUPANCY: u32 = 2;
// Each guest beyond that adds half a nightly rate
pub const EXTRA_GUEST_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOption {
    pub name: String,
    pub city: String,
    pub area: String,
    // From the city centre
    pub distance_km: f64,
    pub price_per_night: f64,
    #[serde(default)]
    pub family_friendly: bool,
    #[serde(default)]
    pub has_pool: bool,
    #[serde(default)]
    pub has_restaurant: bool,
}

impl HotelOption {
    pub fn amenities(&self) -> Vec<&'static str> {
        let mut amenities = Vec::new();
        if self.family_friendly {
            amenities.push("Family-friendly");
        }
        if self.has_pool {
            amenities.push("Pool");
        }
        if self.has_restaurant {
            amenities.push("Restaurant");
        }
        amenities
    }

    pub fn stay_price(&self, party: &Party, nights: u32) -> f64 {
        stay_price(self.price_per_night, party, nights)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyCity {
    pub name: String,
    // From the destination it serves
    pub distance_km: f64,
    // Fares to reach this city
    #[serde(default)]
    pub transport: Vec<TransportOption>,
}

pub fn extra_guests(party: &Party) -> u32 {
    party.headcount().saturating_sub(DOUBLE_OCCUPANCY)
}

// Nightly rate times nights, plus a one-off half rate for every guest past two
pub fn stay_price(price_per_night: f64, party: &Party, nights: u32) -> f64 {
    let base = price_per_night * nights as f64;
    match extra_guests(party) {
        0 => base,
        extra => base + extra as f64 * price_per_night * EXTRA_GUEST_FACTOR,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelRow {
    pub hotel: HotelOption,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyCityQuote {
    pub city: String,
    pub distance_km: f64,
    pub transport: Vec<FareRow>,
    // Empty when the nearby city has no hotel table
    pub hotels: Vec<HotelRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccommodationQuote {
    Direct {
        destination: String,
        nights: u32,
        rows: Vec<HotelRow>,
    },
    NearbyFallback {
        destination: String,
        nights: u32,
        cities: Vec<NearbyCityQuote>,
    },
    Unavailable {
        destination: String,
    },
}

impl AccommodationQuote {
    pub fn destination(&self) -> &str {
        match self {
            AccommodationQuote::Direct { destination, .. } => destination,
            AccommodationQuote::NearbyFallback { destination, .. } => destination,
            AccommodationQuote::Unavailable { destination } => destination,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, AccommodationQuote::Unavailable { .. })
    }

    // 1-based pick among the direct hotel rows; fallback quotes are informational only
    pub fn pick(&self, option_number: usize) -> Option<&HotelRow> {
        match self {
            AccommodationQuote::Direct { rows, .. } => option_number
                .checked_sub(1)
                .and_then(|position| rows.get(position)),
            _ => None,
        }
    }
}

fn price_hotels(hotels: &[HotelOption], party: &Party, nights: u32) -> Vec<HotelRow> {
    hotels
        .iter()
        .map(|hotel| HotelRow {
            hotel: hotel.clone(),
            total_price: hotel.stay_price(party, nights),
        })
        .collect()
}

#[derive(Debug, Default, Clone)]
pub struct HotelRegistry {
    hotels: HashMap<String, Vec<HotelOption>>,
    nearby: HashMap<String, Vec<NearbyCity>>,
}

impl HotelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_hotels(&mut self, place: &str, hotels: Vec<HotelOption>) {
        self.hotels.insert(lookup_key(place), hotels);
    }

    pub fn insert_nearby(&mut self, destination: &str, cities: Vec<NearbyCity>) {
        self.nearby.insert(lookup_key(destination), cities);
    }

    pub fn hotels_in(&self, place: &str) -> Option<&[HotelOption]> {
        self.hotels
            .get(&lookup_key(place))
            .map(|hotels| hotels.as_slice())
            .filter(|hotels| !hotels.is_empty())
    }

    pub fn nearby_cities(&self, destination: &str) -> Option<&[NearbyCity]> {
        self.nearby
            .get(&lookup_key(destination))
            .map(|cities| cities.as_slice())
            .filter(|cities| !cities.is_empty())
    }

    pub fn hotel_count(&self) -> usize {
        self.hotels.values().map(Vec::len).sum()
    }

    pub fn quote(&self, destination: &str, party: &Party, nights: u32) -> AccommodationQuote {
        if let Some(hotels) = self.hotels_in(destination) {
            debug!(destination, nights, hotels = hotels.len(), "Quoted hotels");
            return AccommodationQuote::Direct {
                destination: destination.to_string(),
                nights,
                rows: price_hotels(hotels, party, nights),
            };
        }

        let Some(cities) = self.nearby_cities(destination) else {
            warn!(destination, "No hotels and no nearby cities");
            return AccommodationQuote::Unavailable {
                destination: destination.to_string(),
            };
        };

        debug!(destination, cities = cities.len(), "No hotels, quoting nearby cities");
        let cities = cities
            .iter()
            .map(|city| NearbyCityQuote {
                city: city.name.clone(),
                distance_km: city.distance_km,
                transport: quote_fares(&city.transport, party),
                hotels: self
                    .hotels_in(&city.name)
                    .map(|hotels| price_hotels(hotels, party, nights))
                    .unwrap_or_default(),
            })
            .collect();

        AccommodationQuote::NearbyFallback {
            destination: destination.to_string(),
            nights,
            cities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{parse_adults, parse_children};
    use test_case::test_case;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn hotel(name: &str, city: &str, price_per_night: f64) -> HotelOption {
        HotelOption {
            name: name.to_string(),
            city: city.to_string(),
            area: "City Center".to_string(),
            distance_km: 0.0,
            price_per_night,
            family_friendly: true,
            has_pool: false,
            has_restaurant: true,
        }
    }

    fn fare(mode: &str, adult_fare: f64) -> TransportOption {
        TransportOption {
            mode: mode.to_string(),
            adult_fare,
        }
    }

    fn registry() -> HotelRegistry {
        let mut registry = HotelRegistry::new();
        registry.insert_hotels(
            "Jaipur",
            vec![hotel("Raj Palace", "Jaipur", 4000.0), hotel("Jaipur Inn", "Jaipur", 3000.0)],
        );
        registry.insert_hotels("Ajmer", vec![hotel("Lake Lodge", "Ajmer", 2000.0)]);
        registry.insert_nearby(
            "Pushkar",
            vec![
                NearbyCity {
                    name: "Ajmer".to_string(),
                    distance_km: 130.0,
                    transport: vec![fare("Bus", 500.0), fare("Taxi", 2500.0)],
                },
                NearbyCity {
                    name: "Alwar".to_string(),
                    distance_km: 150.0,
                    transport: vec![fare("Train", 300.0)],
                },
            ],
        );
        registry
    }

    #[test]
    fn test_surcharge_scenario() {
        let total = stay_price(4000.0, &Party::new(3, 1), 3);
        assert_eq!(extra_guests(&Party::new(3, 1)), 2);
        assert_close(total, 16000.0);
    }

    #[test_case(1, 0; "#1 single adult")]
    #[test_case(2, 0; "#2 couple")]
    #[test_case(1, 1; "#3 adult and child")]
    fn test_no_surcharge_up_to_two_guests(adults: u32, children: u32) {
        let party = Party::new(adults, children);
        assert_eq!(extra_guests(&party), 0);
        for nights in [0, 1, 3, 14] {
            for price in [0.1, 2999.99, 4000.0, 12345.67] {
                assert_eq!(stay_price(price, &party, nights), price * nights as f64);
            }
        }
    }

    #[test]
    fn test_largest_parsed_party_is_still_surcharged() {
        let party = Party::new(
            parse_adults("4294967295").unwrap(),
            parse_children("1").unwrap(),
        );
        assert_eq!(extra_guests(&party), u32::MAX - 2);

        let total = stay_price(1000.0, &party, 2);
        let expected = 2000.0 + (u32::MAX - 2) as f64 * 500.0;
        assert!(total.is_finite());
        assert_close(total, expected);
    }

    #[test]
    fn test_surcharge_is_not_multiplied_by_nights() {
        let party = Party::new(3, 0);
        let one_night = stay_price(1000.0, &party, 1);
        let ten_nights = stay_price(1000.0, &party, 10);
        assert_close(ten_nights - one_night, 9000.0);
    }

    #[test]
    fn test_direct_quote_prices_every_hotel() {
        let quote = registry().quote("JAIPUR", &Party::new(2, 2), 2);

        match &quote {
            AccommodationQuote::Direct { rows, nights, .. } => {
                assert_eq!(*nights, 2);
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].hotel.name, "Raj Palace");
                assert_close(rows[0].total_price, 8000.0 + 2.0 * 4000.0 * 0.5);
                assert_close(rows[1].total_price, 6000.0 + 2.0 * 3000.0 * 0.5);
            }
            other => panic!("expected direct quote, got {:?}", other),
        }

        assert_eq!(quote.pick(2).map(|row| row.hotel.name.as_str()), Some("Jaipur Inn"));
        assert!(quote.pick(0).is_none());
        assert!(quote.pick(3).is_none());
    }

    #[test]
    fn test_nearby_fallback_when_no_hotels() {
        let quote = registry().quote("Pushkar", &Party::new(2, 1), 2);

        let AccommodationQuote::NearbyFallback { cities, .. } = &quote else {
            panic!("expected nearby fallback, got {:?}", quote);
        };
        assert_eq!(cities.len(), 2);

        let ajmer = &cities[0];
        assert_eq!(ajmer.city, "Ajmer");
        assert_eq!(ajmer.distance_km, 130.0);
        assert_eq!(ajmer.transport[0].mode, "Bus");
        assert_eq!(ajmer.transport[0].adult_fare, 500.0);
        assert_close(ajmer.transport[0].party_total, 500.0 * 2.0 + 350.0);
        assert_eq!(ajmer.hotels.len(), 1);
        assert_close(ajmer.hotels[0].total_price, 2000.0 * 2.0 + 2000.0 * 0.5);

        // Alwar has fares but no hotel table of its own
        assert_eq!(cities[1].transport.len(), 1);
        assert!(cities[1].hotels.is_empty());

        assert!(quote.is_available());
        assert!(quote.pick(1).is_none());
    }

    #[test]
    fn test_unavailable_without_hotels_or_nearby_cities() {
        let quote = registry().quote("Timbuktu", &Party::new(1, 0), 4);
        assert_eq!(
            quote,
            AccommodationQuote::Unavailable {
                destination: "Timbuktu".to_string()
            }
        );
        assert!(!quote.is_available());
    }

    #[test]
    fn test_amenities() {
        let mut option = hotel("Beach Resort", "Goa", 5500.0);
        option.has_pool = true;
        assert_eq!(option.amenities(), vec!["Family-friendly", "Pool", "Restaurant"]);
    }
}
