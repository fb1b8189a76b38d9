// Structured catalog records: destinations, exchange rates, fares, hotels and nearby cities.
// Loaded from JSON (the built-in seed) or from an attribute-style XML document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::accommodation::{HotelOption, NearbyCity};
use crate::catalog::{CatalogError, Destination, TripType};
use crate::transport::TransportOption;

pub const BUILTIN_CATALOG_JSON: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Xml,
}

impl CatalogFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(CatalogFormat::Json),
            "xml" => Some(CatalogFormat::Xml),
            _ => None,
        }
    }

    // Inferred from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(Self::from_name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub home_currency: String,
    // Units of each currency per unit of the home currency
    pub exchange_rates: BTreeMap<String, f64>,
    pub destinations: Vec<Destination>,
    // Keyed by lowercase destination name
    pub transport: BTreeMap<String, Vec<TransportOption>>,
    // Keyed by lowercase destination or city name
    pub hotels: BTreeMap<String, Vec<HotelOption>>,
    pub nearby_cities: BTreeMap<String, Vec<NearbyCity>>,
}

fn ensure_non_negative(amount: f64, what: impl FnOnce() -> String) -> Result<(), CatalogError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidPrice(what()))
    }
}

impl CatalogData {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_xml(xml: &str) -> Result<Self, CatalogError> {
        let document: XmlCatalog =
            quick_xml::de::from_str(xml).map_err(|e| CatalogError::XmlParseError(e.to_string()))?;
        CatalogData::try_from(document)
    }

    pub fn to_xml(&self) -> Result<String, CatalogError> {
        let document = XmlCatalog::from(self);
        quick_xml::se::to_string(&document).map_err(|e| CatalogError::ConversionError(e.to_string()))
    }

    // Read a catalog file, taking the format from the argument or else the extension
    pub fn load(path: &Path, format: Option<CatalogFormat>) -> Result<Self, CatalogError> {
        let format = format
            .or_else(|| CatalogFormat::from_path(path))
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.display().to_string()))?;

        let content = std::fs::read_to_string(path)?;
        let data = match format {
            CatalogFormat::Json => Self::from_json(&content)?,
            CatalogFormat::Xml => Self::from_xml(&content)?,
        };

        info!(
            path = %path.display(),
            ?format,
            destinations = data.destinations.len(),
            "Loaded catalog file"
        );
        Ok(data)
    }

    // Rates must be positive and every fare or nightly price non-negative.
    // Destination records are checked as they enter the catalog.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (code, &rate) in &self.exchange_rates {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(CatalogError::InvalidExchangeRate {
                    code: code.clone(),
                    rate,
                });
            }
        }

        for (key, options) in &self.transport {
            for option in options {
                ensure_non_negative(option.adult_fare, || format!("{} fare to {}", option.mode, key))?;
            }
        }

        for (key, hotels) in &self.hotels {
            for hotel in hotels {
                ensure_non_negative(hotel.price_per_night, || format!("{} in {}", hotel.name, key))?;
            }
        }

        for (key, cities) in &self.nearby_cities {
            for city in cities {
                for option in &city.transport {
                    ensure_non_negative(option.adult_fare, || {
                        format!("{} fare to {} near {}", option.mode, city.name, key)
                    })?;
                }
            }
        }

        Ok(())
    }
}

// XML document layout
#[derive(Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
#[serde(rename = "Catalog")]
pub struct XmlCatalog {
    #[serde(rename = "@homeCurrency")]
    pub home_currency: String,
    pub rates: XmlRates,
    pub destinations: XmlDestinations,
    pub routes: XmlRoutes,
    pub lodging: XmlLodging,
    pub nearby_cities: XmlNearbyCities,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlRates {
    #[serde(rename = "Rate")]
    pub rates: Vec<XmlRate>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlRate {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "@units")]
    pub units: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlDestinations {
    #[serde(rename = "Destination")]
    pub destinations: Vec<XmlDestination>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlDestination {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@tripType")]
    pub trip_type: String,
    #[serde(rename = "@currency")]
    pub currency: String,
    #[serde(rename = "@minRate")]
    pub min_rate: String,
    #[serde(rename = "@maxRate")]
    pub max_rate: String,
    #[serde(rename = "@familyFriendly")]
    pub family_friendly: String,
    #[serde(rename = "@coupleFriendly")]
    pub couple_friendly: String,
    pub weather: String,
    pub visa: String,
    pub best_season: String,
    pub attractions: XmlItems,
    pub foods: XmlItems,
    pub itineraries: XmlItineraries,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlItems {
    #[serde(rename = "Item")]
    pub items: Vec<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlItineraries {
    #[serde(rename = "Itinerary")]
    pub itineraries: Vec<XmlItinerary>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlItinerary {
    #[serde(rename = "Day")]
    pub days: Vec<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlRoutes {
    #[serde(rename = "Route")]
    pub routes: Vec<XmlRoute>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlRoute {
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "Option")]
    pub options: Vec<XmlFare>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlFare {
    #[serde(rename = "@mode")]
    pub mode: String,
    #[serde(rename = "@adultFare")]
    pub adult_fare: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlLodging {
    #[serde(rename = "Stay")]
    pub stays: Vec<XmlStay>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlStay {
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "Hotel")]
    pub hotels: Vec<XmlHotel>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlHotel {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@city")]
    pub city: String,
    #[serde(rename = "@area")]
    pub area: String,
    #[serde(rename = "@distanceKm")]
    pub distance_km: String,
    #[serde(rename = "@pricePerNight")]
    pub price_per_night: String,
    #[serde(rename = "@familyFriendly")]
    pub family_friendly: String,
    #[serde(rename = "@hasPool")]
    pub has_pool: String,
    #[serde(rename = "@hasRestaurant")]
    pub has_restaurant: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlNearbyCities {
    #[serde(rename = "Nearby")]
    pub entries: Vec<XmlNearby>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlNearby {
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "City")]
    pub cities: Vec<XmlNearbyCity>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlNearbyCity {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@distanceKm")]
    pub distance_km: String,
    #[serde(rename = "Option")]
    pub options: Vec<XmlFare>,
}

fn parse_number(field: &str, value: &str) -> Result<f64, CatalogError> {
    value.trim().parse().map_err(|_| CatalogError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

// A missing flag attribute reads as false
fn parse_flag(field: &str, value: &str) -> Result<bool, CatalogError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" | "" => Ok(false),
        _ => Err(CatalogError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_fares(options: Vec<XmlFare>) -> Result<Vec<TransportOption>, CatalogError> {
    options
        .into_iter()
        .map(|option| {
            Ok(TransportOption {
                adult_fare: parse_number("adultFare", &option.adult_fare)?,
                mode: option.mode,
            })
        })
        .collect()
}

impl TryFrom<XmlDestination> for Destination {
    type Error = CatalogError;

    fn try_from(item: XmlDestination) -> Result<Self, Self::Error> {
        let trip_type = TripType::from_key(&item.trip_type).ok_or_else(|| CatalogError::InvalidValue {
            field: "tripType".to_string(),
            value: item.trip_type.clone(),
        })?;

        let itineraries: Vec<Vec<String>> = item
            .itineraries
            .itineraries
            .into_iter()
            .map(|itinerary| itinerary.days)
            .collect();
        let found = itineraries.len();
        let itineraries: [Vec<String>; 3] =
            itineraries
                .try_into()
                .map_err(|_| CatalogError::ItineraryCount {
                    name: item.name.clone(),
                    found,
                })?;

        Ok(Destination {
            min_rate: parse_number("minRate", &item.min_rate)?,
            max_rate: parse_number("maxRate", &item.max_rate)?,
            family_friendly: parse_flag("familyFriendly", &item.family_friendly)?,
            couple_friendly: parse_flag("coupleFriendly", &item.couple_friendly)?,
            name: item.name,
            trip_type,
            currency: item.currency,
            attractions: item.attractions.items,
            foods: item.foods.items,
            itineraries,
            weather: item.weather,
            visa: item.visa,
            best_season: item.best_season,
        })
    }
}

impl TryFrom<XmlHotel> for HotelOption {
    type Error = CatalogError;

    fn try_from(item: XmlHotel) -> Result<Self, Self::Error> {
        Ok(HotelOption {
            distance_km: parse_number("distanceKm", &item.distance_km)?,
            price_per_night: parse_number("pricePerNight", &item.price_per_night)?,
            family_friendly: parse_flag("familyFriendly", &item.family_friendly)?,
            has_pool: parse_flag("hasPool", &item.has_pool)?,
            has_restaurant: parse_flag("hasRestaurant", &item.has_restaurant)?,
            name: item.name,
            city: item.city,
            area: item.area,
        })
    }
}

impl TryFrom<XmlCatalog> for CatalogData {
    type Error = CatalogError;

    fn try_from(item: XmlCatalog) -> Result<Self, Self::Error> {
        let mut exchange_rates = BTreeMap::new();
        for rate in item.rates.rates {
            let units = parse_number("units", &rate.units)?;
            exchange_rates.insert(rate.code, units);
        }

        let destinations = item
            .destinations
            .destinations
            .into_iter()
            .map(Destination::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut transport = BTreeMap::new();
        for route in item.routes.routes {
            transport.insert(route.key, parse_fares(route.options)?);
        }

        let mut hotels = BTreeMap::new();
        for stay in item.lodging.stays {
            let options = stay
                .hotels
                .into_iter()
                .map(HotelOption::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            hotels.insert(stay.key, options);
        }

        let mut nearby_cities = BTreeMap::new();
        for entry in item.nearby_cities.entries {
            let cities = entry
                .cities
                .into_iter()
                .map(|city| {
                    Ok(NearbyCity {
                        distance_km: parse_number("distanceKm", &city.distance_km)?,
                        transport: parse_fares(city.options)?,
                        name: city.name,
                    })
                })
                .collect::<Result<Vec<_>, CatalogError>>()?;
            nearby_cities.insert(entry.key, cities);
        }

        Ok(CatalogData {
            home_currency: item.home_currency,
            exchange_rates,
            destinations,
            transport,
            hotels,
            nearby_cities,
        })
    }
}

fn to_xml_fares(options: &[TransportOption]) -> Vec<XmlFare> {
    options
        .iter()
        .map(|option| XmlFare {
            mode: option.mode.clone(),
            adult_fare: option.adult_fare.to_string(),
        })
        .collect()
}

impl From<&Destination> for XmlDestination {
    fn from(item: &Destination) -> Self {
        XmlDestination {
            name: item.name.clone(),
            trip_type: item.trip_type.as_str().to_string(),
            currency: item.currency.clone(),
            min_rate: item.min_rate.to_string(),
            max_rate: item.max_rate.to_string(),
            family_friendly: item.family_friendly.to_string(),
            couple_friendly: item.couple_friendly.to_string(),
            weather: item.weather.clone(),
            visa: item.visa.clone(),
            best_season: item.best_season.clone(),
            attractions: XmlItems {
                items: item.attractions.clone(),
            },
            foods: XmlItems {
                items: item.foods.clone(),
            },
            itineraries: XmlItineraries {
                itineraries: item
                    .itineraries
                    .iter()
                    .map(|days| XmlItinerary { days: days.clone() })
                    .collect(),
            },
        }
    }
}

impl From<&HotelOption> for XmlHotel {
    fn from(item: &HotelOption) -> Self {
        XmlHotel {
            name: item.name.clone(),
            city: item.city.clone(),
            area: item.area.clone(),
            distance_km: item.distance_km.to_string(),
            price_per_night: item.price_per_night.to_string(),
            family_friendly: item.family_friendly.to_string(),
            has_pool: item.has_pool.to_string(),
            has_restaurant: item.has_restaurant.to_string(),
        }
    }
}

impl From<&CatalogData> for XmlCatalog {
    fn from(item: &CatalogData) -> Self {
        XmlCatalog {
            home_currency: item.home_currency.clone(),
            rates: XmlRates {
                rates: item
                    .exchange_rates
                    .iter()
                    .map(|(code, units)| XmlRate {
                        code: code.clone(),
                        units: units.to_string(),
                    })
                    .collect(),
            },
            destinations: XmlDestinations {
                destinations: item.destinations.iter().map(XmlDestination::from).collect(),
            },
            routes: XmlRoutes {
                routes: item
                    .transport
                    .iter()
                    .map(|(key, options)| XmlRoute {
                        key: key.clone(),
                        options: to_xml_fares(options),
                    })
                    .collect(),
            },
            lodging: XmlLodging {
                stays: item
                    .hotels
                    .iter()
                    .map(|(key, hotels)| XmlStay {
                        key: key.clone(),
                        hotels: hotels.iter().map(XmlHotel::from).collect(),
                    })
                    .collect(),
            },
            nearby_cities: XmlNearbyCities {
                entries: item
                    .nearby_cities
                    .iter()
                    .map(|(key, cities)| XmlNearby {
                        key: key.clone(),
                        cities: cities
                            .iter()
                            .map(|city| XmlNearbyCity {
                                name: city.name.clone(),
                                distance_km: city.distance_km.to_string(),
                                options: to_xml_fares(&city.transport),
                            })
                            .collect(),
                    })
                    .collect(),
            },
        }
    }
}

// A small sample for inline testing
#[cfg(test)]
pub(crate) const SMALL_SAMPLE_XML: &str = r#"
<Catalog homeCurrency="INR">
  <Rates>
    <Rate code="INR" units="1"/>
    <Rate code="USD" units="0.012"/>
  </Rates>
  <Destinations>
    <Destination name="Pushkar" tripType="domestic" currency="INR" minRate="3000" maxRate="6000" familyFriendly="true" coupleFriendly="false">
      <Weather>Dry (10-35°C)</Weather>
      <Visa>Not required</Visa>
      <BestSeason>November</BestSeason>
      <Attractions>
        <Item>Brahma Temple</Item>
        <Item>Pushkar Lake</Item>
      </Attractions>
      <Foods>
        <Item>Malpua</Item>
      </Foods>
      <Itineraries>
        <Itinerary><Day>Day 1: Lake ghats</Day><Day>Day 2: Camel fair</Day></Itinerary>
        <Itinerary><Day>Day 1: Temples</Day></Itinerary>
        <Itinerary><Day>Day 1: Desert camp</Day></Itinerary>
      </Itineraries>
    </Destination>
  </Destinations>
  <Routes>
    <Route key="pushkar">
      <Option mode="Bus" adultFare="650"/>
      <Option mode="Taxi" adultFare="3200.5"/>
    </Route>
  </Routes>
  <Lodging>
    <Stay key="ajmer">
      <Hotel name="Lake Lodge" city="Ajmer" area="Ana Sagar" distanceKm="1.5" pricePerNight="2000" familyFriendly="true" hasPool="false" hasRestaurant="true"/>
    </Stay>
  </Lodging>
  <NearbyCities>
    <Nearby key="pushkar">
      <City name="Ajmer" distanceKm="15">
        <Option mode="Bus" adultFare="100"/>
      </City>
    </Nearby>
  </NearbyCities>
</Catalog>
"#;
