// Console rendering. Each view borrows what it shows and implements Display.

use std::fmt;

use crate::accommodation::{AccommodationQuote, HotelRow};
use crate::catalog::TripType;
use crate::matcher::{BudgetTier, DestinationMatch, TierListing};
use crate::party::Party;
use crate::planner::DestinationDetails;
use crate::profile::CustomerProfile;
use crate::session::TripSummary;
use crate::transport::{FareRow, TransportQuote};

// Indian digit grouping (lakh/crore): 1234567 -> 12,34,567
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, group) = head.split_at(head.len() - 2);
        groups.push(group);
        head = rest;
    }
    groups.push(head);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// Grouped amount, with paise only when there are any
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let mut formatted = group_digits(cents / 100);
    if cents % 100 != 0 {
        formatted.push_str(&format!(".{:02}", cents % 100));
    }
    if amount < 0.0 && cents != 0 {
        formatted.insert(0, '-');
    }
    formatted
}

pub fn tier_label(tier: &BudgetTier, currency: &str) -> String {
    format!(
        "{} ({}-{} {})",
        tier.label,
        format_amount(tier.min),
        format_amount(tier.max),
        currency
    )
}

pub struct ProfileView<'a>(pub &'a CustomerProfile);

impl fmt::Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.0;
        writeln!(f, "--- Customer Details ---")?;
        writeln!(f, "Name: {}", profile.name)?;
        writeln!(f, "Number: {}", profile.phone)?;
        writeln!(f, "Email: {}", profile.email)?;
        writeln!(f, "Travelers: {}", profile.party)?;
        writeln!(f, "Trip Purpose: {}", profile.purpose)
    }
}

// Only tiers with at least one match are listed; they keep their menu numbers
pub struct TierTable<'a> {
    pub trip_type: TripType,
    pub listings: &'a [TierListing<'a>],
    pub currency: &'a str,
}

impl fmt::Display for TierTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Available Budget Ranges for {} Trips ---", self.trip_type)?;

        if self.listings.iter().all(TierListing::is_empty) {
            return writeln!(f, "No destinations match your preferences in any budget range.");
        }

        for listing in self.listings.iter().filter(|listing| !listing.is_empty()) {
            writeln!(
                f,
                "\n{}. {}:",
                listing.tier.number,
                tier_label(&listing.tier, self.currency)
            )?;
            for (position, found) in listing.matches.iter().enumerate() {
                writeln!(
                    f,
                    "   {}) {} ({} - {} {})",
                    position + 1,
                    found.destination.name,
                    format_amount(found.min_total),
                    format_amount(found.max_total),
                    self.currency
                )?;
            }
        }
        Ok(())
    }
}

pub struct MatchList<'a>(pub &'a [DestinationMatch<'a>]);

impl fmt::Display for MatchList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available destinations in your selected range:")?;
        for (position, found) in self.0.iter().enumerate() {
            writeln!(f, "{}. {}", position + 1, found.destination.name)?;
        }
        Ok(())
    }
}

pub struct DetailsView<'a> {
    pub details: &'a DestinationDetails<'a>,
    pub currency: &'a str,
}

impl fmt::Display for DetailsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self.details;
        let destination = details.destination;

        writeln!(f, "--- {} Destination Details ---", destination.name)?;
        writeln!(
            f,
            "\nEstimated Total Cost: {} - {} {} ({} {})",
            format_amount(details.min_total),
            format_amount(details.max_total),
            self.currency,
            format_amount(details.converted_average),
            details.converted_currency
        )?;
        if details.is_passthrough() {
            writeln!(
                f,
                "(No exchange rate for {}, average shown in {})",
                destination.currency, details.converted_currency
            )?;
        }

        writeln!(f, "\nBest Season to Visit: {}", destination.best_season)?;
        writeln!(f, "Typical Weather: {}", destination.weather)?;
        if details.show_visa {
            writeln!(f, "Visa Information: {}", destination.visa)?;
        }

        writeln!(f, "\nTop Attractions:")?;
        for attraction in &destination.attractions {
            writeln!(f, "- {}", attraction)?;
        }

        writeln!(f, "\nMust-Try Foods:")?;
        for food in &destination.foods {
            writeln!(f, "- {}", food)?;
        }

        writeln!(f, "\nItinerary Options:")?;
        for (position, days) in destination.itineraries.iter().enumerate() {
            writeln!(f, "\nOption {}:", position + 1)?;
            for day in days {
                writeln!(f, "- {}", day)?;
            }
        }
        Ok(())
    }
}

fn write_fare(f: &mut fmt::Formatter<'_>, row: &FareRow, currency: &str) -> fmt::Result {
    writeln!(
        f,
        "- {}: {} {} per adult ({} {} per child) - Total: {} {}",
        row.mode,
        format_amount(row.adult_fare),
        currency,
        format_amount(row.child_fare),
        currency,
        format_amount(row.party_total),
        currency
    )
}

pub struct TransportTable<'a> {
    pub quote: &'a TransportQuote,
    pub party: &'a Party,
    pub currency: &'a str,
}

impl fmt::Display for TransportTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote {
            TransportQuote::Unavailable { destination } => {
                writeln!(f, "No transport options available for {}.", destination)
            }
            TransportQuote::Available { destination, rows } => {
                writeln!(
                    f,
                    "--- Transport Options for {} ({}A, {}C) ---",
                    destination, self.party.adults, self.party.children
                )?;
                for row in rows {
                    write_fare(f, row, self.currency)?;
                }
                Ok(())
            }
        }
    }
}

fn write_hotel(
    f: &mut fmt::Formatter<'_>,
    number: usize,
    row: &HotelRow,
    nights: u32,
    currency: &str,
) -> fmt::Result {
    let hotel = &row.hotel;
    writeln!(
        f,
        "{}. {} ({}, {}, {} km from centre)",
        number, hotel.name, hotel.area, hotel.city, hotel.distance_km
    )?;
    writeln!(
        f,
        "   {} {}/night, Total for {} nights: {} {}",
        format_amount(hotel.price_per_night),
        currency,
        nights,
        format_amount(row.total_price),
        currency
    )?;
    writeln!(f, "   Amenities: {}", hotel.amenities().join(", "))
}

pub struct AccommodationTable<'a> {
    pub quote: &'a AccommodationQuote,
    pub currency: &'a str,
}

impl fmt::Display for AccommodationTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote {
            AccommodationQuote::Unavailable { destination } => {
                writeln!(f, "No hotel options available in {}.", destination)
            }
            AccommodationQuote::Direct {
                destination,
                nights,
                rows,
            } => {
                writeln!(f, "--- Hotel Options in {} ---", destination)?;
                for (position, row) in rows.iter().enumerate() {
                    write_hotel(f, position + 1, row, *nights, self.currency)?;
                }
                Ok(())
            }
            AccommodationQuote::NearbyFallback {
                destination,
                nights,
                cities,
            } => {
                writeln!(
                    f,
                    "No hotels available in {}, but here are nearby options:",
                    destination
                )?;
                for city in cities {
                    writeln!(
                        f,
                        "\n--- {} ({} km from {}) ---",
                        city.city, city.distance_km, destination
                    )?;
                    writeln!(f, "Transport Options:")?;
                    for row in &city.transport {
                        write_fare(f, row, self.currency)?;
                    }
                    if !city.hotels.is_empty() {
                        writeln!(f, "\nAvailable Hotels in {}:", city.city)?;
                        for (position, row) in city.hotels.iter().enumerate() {
                            write_hotel(f, position + 1, row, *nights, self.currency)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

pub struct SummaryView<'a> {
    pub summary: &'a TripSummary,
    pub currency: &'a str,
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;
        writeln!(f, "====== TRIP SUMMARY ======")?;
        writeln!(f, "Reference: {}", summary.reference)?;
        writeln!(
            f,
            "Generated: {}",
            summary.generated_at.format("%Y-%m-%d %H:%M UTC")
        )?;
        writeln!(f, "Customer: {}", summary.customer)?;
        writeln!(f, "Destination: {} ({})", summary.destination, summary.trip_type)?;
        writeln!(f, "Travelers: {}", summary.party)?;
        writeln!(f, "Trip Purpose: {}", summary.purpose)?;

        match &summary.transport_choice {
            Some(row) => writeln!(
                f,
                "Transport: {} - {} {}",
                row.mode,
                format_amount(row.party_total),
                self.currency
            )?,
            None => writeln!(f, "Transport: not booked")?,
        }
        match &summary.hotel_choice {
            Some(row) => writeln!(
                f,
                "Hotel: {} - {} nights - {} {}",
                row.hotel.name,
                summary.nights,
                format_amount(row.total_price),
                self.currency
            )?,
            None => writeln!(f, "Hotel: not booked")?,
        }

        writeln!(
            f,
            "Estimated Total: {} {}",
            format_amount(summary.estimated_total()),
            self.currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accommodation::{HotelOption, NearbyCityQuote};
    use crate::catalog::tests::sample_destination;
    use crate::matcher::tier;
    use test_case::test_case;

    #[test_case(0.0, "0"; "#1 zero")]
    #[test_case(999.0, "999"; "#2 three digits")]
    #[test_case(15000.0, "15,000"; "#3 thousands")]
    #[test_case(100000.0, "1,00,000"; "#4 one lakh")]
    #[test_case(12345678.0, "1,23,45,678"; "#5 crore")]
    #[test_case(3240.0000000001, "3,240"; "#6 float noise")]
    #[test_case(2240.35, "2,240.35"; "#7 paise")]
    #[test_case(-1500.5, "-1,500.50"; "#8 negative")]
    fn test_format_amount(amount: f64, expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }

    #[test_case(TripType::Domestic, 1, "Budget (15,000-30,000 INR)"; "#1 domestic budget")]
    #[test_case(TripType::International, 2, "Mid-Range (1,00,000-2,00,000 INR)"; "#2 international mid-range")]
    #[test_case(TripType::International, 3, "Premium (2,00,000-5,00,000 INR)"; "#3 international premium")]
    fn test_tier_label(trip_type: TripType, number: u8, expected: &str) {
        let tier = tier(trip_type, number).unwrap();
        assert_eq!(tier_label(&tier, "INR"), expected);
    }

    #[test]
    fn test_tier_table_hides_empty_tiers() {
        let jaipur = sample_destination("Jaipur", TripType::Domestic, 5000.0, 8000.0);
        let listings = vec![
            TierListing {
                tier: tier(TripType::Domestic, 1).unwrap(),
                matches: vec![DestinationMatch {
                    destination: &jaipur,
                    min_total: 10000.0,
                    max_total: 16000.0,
                }],
            },
            TierListing {
                tier: tier(TripType::Domestic, 2).unwrap(),
                matches: vec![],
            },
        ];

        let rendered = TierTable {
            trip_type: TripType::Domestic,
            listings: &listings,
            currency: "INR",
        }
        .to_string();

        assert!(rendered.contains("--- Available Budget Ranges for Domestic Trips ---"));
        assert!(rendered.contains("1. Budget (15,000-30,000 INR):"));
        assert!(rendered.contains("   1) Jaipur (10,000 - 16,000 INR)"));
        assert!(!rendered.contains("Mid-Range"));
    }

    #[test]
    fn test_tier_table_with_nothing_to_show() {
        let listings = vec![TierListing {
            tier: tier(TripType::International, 3).unwrap(),
            matches: vec![],
        }];
        let rendered = TierTable {
            trip_type: TripType::International,
            listings: &listings,
            currency: "INR",
        }
        .to_string();
        assert!(rendered.contains("No destinations match"));
    }

    #[test]
    fn test_transport_table() {
        let quote = TransportQuote::Available {
            destination: "Jaipur".to_string(),
            rows: vec![FareRow {
                mode: "Train".to_string(),
                adult_fare: 1200.0,
                child_fare: 840.0,
                party_total: 3240.0,
            }],
        };
        let party = Party::new(2, 1);
        let rendered = TransportTable {
            quote: &quote,
            party: &party,
            currency: "INR",
        }
        .to_string();
        assert!(rendered.contains("(2A, 1C)"));
        assert!(rendered.contains("- Train: 1,200 INR per adult (840 INR per child) - Total: 3,240 INR"));

        let missing = TransportQuote::Unavailable {
            destination: "Atlantis".to_string(),
        };
        let rendered = TransportTable {
            quote: &missing,
            party: &party,
            currency: "INR",
        }
        .to_string();
        assert_eq!(rendered, "No transport options available for Atlantis.\n");
    }

    #[test]
    fn test_nearby_fallback_rendering() {
        let quote = AccommodationQuote::NearbyFallback {
            destination: "Pushkar".to_string(),
            nights: 2,
            cities: vec![NearbyCityQuote {
                city: "Ajmer".to_string(),
                distance_km: 130.0,
                transport: vec![FareRow {
                    mode: "Bus".to_string(),
                    adult_fare: 500.0,
                    child_fare: 350.0,
                    party_total: 1000.0,
                }],
                hotels: vec![HotelRow {
                    hotel: HotelOption {
                        name: "Lake Lodge".to_string(),
                        city: "Ajmer".to_string(),
                        area: "Ana Sagar".to_string(),
                        distance_km: 1.5,
                        price_per_night: 2000.0,
                        family_friendly: true,
                        has_pool: false,
                        has_restaurant: true,
                    },
                    total_price: 4000.0,
                }],
            }],
        };

        let rendered = AccommodationTable {
            quote: &quote,
            currency: "INR",
        }
        .to_string();
        assert!(rendered.contains("No hotels available in Pushkar, but here are nearby options:"));
        assert!(rendered.contains("--- Ajmer (130 km from Pushkar) ---"));
        assert!(rendered.contains("- Bus: 500 INR per adult"));
        assert!(rendered.contains("1. Lake Lodge (Ana Sagar, Ajmer, 1.5 km from centre)"));
        assert!(rendered.contains("Amenities: Family-friendly, Restaurant"));
    }
}
