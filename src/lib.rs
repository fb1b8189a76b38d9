// Travel destination recommender and trip cost estimator

pub mod accommodation;
pub mod catalog;
pub mod catalog_data;
pub mod config;
pub mod console;
pub mod currency;
pub mod display;
pub mod matcher;
pub mod party;
pub mod planner;
pub mod profile;
pub mod selector;
pub mod session;
pub mod transport;

// Re-export key types for convenience
pub use accommodation::{AccommodationQuote, HotelOption, HotelRegistry, HotelRow, NearbyCity};
pub use catalog::{Catalog, CatalogError, Destination, TripType};
pub use catalog_data::{CatalogData, CatalogFormat};
pub use config::{ConfigError, PlannerConfig};
pub use console::{ConsoleSession, LineSource, ScriptedLines, StdinLines};
pub use currency::CurrencyConverter;
pub use matcher::{BudgetMatcher, BudgetTier, DestinationMatch, TierListing};
pub use party::{Party, TripPurpose};
pub use planner::{DestinationDetails, Planner};
pub use profile::{CustomerProfile, InputRejection};
pub use selector::{DestinationSelector, NoSelection};
pub use session::{Restart, SessionStage, TripSession, TripSummary};
pub use transport::{FareRow, TransportOption, TransportQuote, TransportRegistry};
