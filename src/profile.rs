// Customer profile and the parse steps behind every interactive prompt.
// Each step returns the parsed value or a typed rejection; nothing here retries or panics.

use thiserror::Error;

use crate::catalog::TripType;
use crate::party::{Party, TripPurpose};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    #[error("Input cancelled")]
    Cancelled,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Invalid number. Please enter exactly 10 digits")]
    InvalidPhone,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: i64,
        value: i64,
    },

    #[error("{field} is too large: {value}")]
    TooLarge { field: &'static str, value: i64 },

    #[error("Unknown trip purpose '{0}'. Please choose from family/couple/friends/solo")]
    UnknownPurpose(String),

    #[error("Unknown trip type '{0}'. Please choose 1 (Domestic) or 2 (International)")]
    UnknownTripType(String),

    #[error("Budget range must be between 1 and 3, got {0}")]
    TierOutOfRange(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub party: Party,
    pub purpose: TripPurpose,
}

impl CustomerProfile {
    // Validate every field in one go
    pub fn parse(
        name: &str,
        phone: &str,
        email: &str,
        adults: &str,
        children: &str,
        purpose: &str,
    ) -> Result<Self, InputRejection> {
        Ok(Self {
            name: parse_name(name)?,
            phone: parse_phone(phone)?,
            email: parse_email(email)?,
            party: Party::new(parse_adults(adults)?, parse_children(children)?),
            purpose: parse_purpose(purpose)?,
        })
    }
}

// Any answer equal to the restart keyword abandons the current flow
pub fn check_cancel<'a>(input: &'a str, restart_keyword: &str) -> Result<&'a str, InputRejection> {
    if input.trim().eq_ignore_ascii_case(restart_keyword.trim()) {
        Err(InputRejection::Cancelled)
    } else {
        Ok(input)
    }
}

pub fn parse_name(input: &str) -> Result<String, InputRejection> {
    let name = input.trim();
    if name.is_empty() {
        return Err(InputRejection::EmptyName);
    }
    Ok(name.to_string())
}

pub fn parse_phone(input: &str) -> Result<String, InputRejection> {
    let phone = input.trim();
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(phone.to_string())
    } else {
        Err(InputRejection::InvalidPhone)
    }
}

// Needs an '@' with a '.' somewhere after it
pub fn parse_email(input: &str) -> Result<String, InputRejection> {
    let email = input.trim();
    let valid = email
        .find('@')
        .map_or(false, |at| email[at + 1..].contains('.'));

    if valid {
        Ok(email.to_string())
    } else {
        Err(InputRejection::InvalidEmail)
    }
}

fn parse_count(field: &'static str, input: &str, min: i64) -> Result<u32, InputRejection> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputRejection::NotANumber(trimmed.to_string()))?;

    if value < min {
        return Err(InputRejection::BelowMinimum { field, min, value });
    }
    u32::try_from(value).map_err(|_| InputRejection::TooLarge { field, value })
}

pub fn parse_adults(input: &str) -> Result<u32, InputRejection> {
    parse_count("Adults", input, 1)
}

pub fn parse_children(input: &str) -> Result<u32, InputRejection> {
    parse_count("Children", input, 0)
}

pub fn parse_nights(input: &str) -> Result<u32, InputRejection> {
    parse_count("Nights", input, 1)
}

pub fn parse_purpose(input: &str) -> Result<TripPurpose, InputRejection> {
    TripPurpose::from_name(input).ok_or_else(|| InputRejection::UnknownPurpose(input.trim().to_string()))
}

pub fn parse_trip_type(input: &str) -> Result<TripType, InputRejection> {
    match input.trim() {
        "1" => Ok(TripType::Domestic),
        "2" => Ok(TripType::International),
        other => TripType::from_key(other)
            .ok_or_else(|| InputRejection::UnknownTripType(other.to_string())),
    }
}

pub fn parse_tier(input: &str) -> Result<u8, InputRejection> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputRejection::NotANumber(trimmed.to_string()))?;

    match u8::try_from(value) {
        Ok(tier @ 1..=3) => Ok(tier),
        _ => Err(InputRejection::TierOutOfRange(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("9876543210", true; "#1 ten digits")]
    #[test_case(" 9876543210 ", true; "#2 padded")]
    #[test_case("987654321", false; "#3 nine digits")]
    #[test_case("98765432101", false; "#4 eleven digits")]
    #[test_case("98765-4321", false; "#5 dash")]
    #[test_case("987654321٣", false; "#6 non-ascii digit")]
    fn test_parse_phone(input: &str, valid: bool) {
        assert_eq!(parse_phone(input).is_ok(), valid);
    }

    #[test_case("asha@example.com", true; "#1 plain address")]
    #[test_case("a.b@mail.co.in", true; "#2 dots before and after")]
    #[test_case("asha.example@com", false; "#3 dot only before at")]
    #[test_case("asha@example", false; "#4 no dot")]
    #[test_case("asha.example.com", false; "#5 no at")]
    fn test_parse_email(input: &str, valid: bool) {
        assert_eq!(parse_email(input).is_ok(), valid);
    }

    #[test_case("2", Ok(2); "#1 valid")]
    #[test_case("0", Err(InputRejection::BelowMinimum { field: "Adults", min: 1, value: 0 }); "#2 zero adults")]
    #[test_case("-3", Err(InputRejection::BelowMinimum { field: "Adults", min: 1, value: -3 }); "#3 negative")]
    #[test_case("two", Err(InputRejection::NotANumber("two".to_string())); "#4 words")]
    #[test_case("99999999999", Err(InputRejection::TooLarge { field: "Adults", value: 99999999999 }); "#5 overflow")]
    fn test_parse_adults(input: &str, expected: Result<u32, InputRejection>) {
        assert_eq!(parse_adults(input), expected);
    }

    #[test]
    fn test_children_may_be_zero() {
        assert_eq!(parse_children("0"), Ok(0));
        assert!(parse_children("-1").is_err());
    }

    #[test]
    fn test_nights_must_be_positive() {
        assert_eq!(parse_nights(" 3 "), Ok(3));
        assert!(matches!(
            parse_nights("0"),
            Err(InputRejection::BelowMinimum { field: "Nights", .. })
        ));
    }

    #[test_case("1", Ok(TripType::Domestic); "#1 menu number domestic")]
    #[test_case("2", Ok(TripType::International); "#2 menu number international")]
    #[test_case("National", Ok(TripType::Domestic); "#3 legacy name")]
    #[test_case("INTERNATIONAL", Ok(TripType::International); "#4 uppercase name")]
    #[test_case("3", Err(InputRejection::UnknownTripType("3".to_string())); "#5 unknown number")]
    fn test_parse_trip_type(input: &str, expected: Result<TripType, InputRejection>) {
        assert_eq!(parse_trip_type(input), expected);
    }

    #[test_case("1", Ok(1); "#1 lowest")]
    #[test_case("3", Ok(3); "#2 highest")]
    #[test_case("0", Err(InputRejection::TierOutOfRange(0)); "#3 zero")]
    #[test_case("4", Err(InputRejection::TierOutOfRange(4)); "#4 above")]
    #[test_case("300", Err(InputRejection::TierOutOfRange(300)); "#5 beyond u8")]
    #[test_case("premium", Err(InputRejection::NotANumber("premium".to_string())); "#6 label instead of number")]
    fn test_parse_tier(input: &str, expected: Result<u8, InputRejection>) {
        assert_eq!(parse_tier(input), expected);
    }

    #[test]
    fn test_check_cancel() {
        assert_eq!(check_cancel(" X ", "x"), Err(InputRejection::Cancelled));
        assert_eq!(check_cancel("Xavier", "x"), Ok("Xavier"));
    }

    #[test]
    fn test_full_profile() {
        let profile =
            CustomerProfile::parse("Asha Rao", "9876543210", "asha@example.com", "2", "1", "Family")
                .unwrap();
        assert_eq!(profile.party, Party::new(2, 1));
        assert_eq!(profile.purpose, TripPurpose::Family);

        let rejected =
            CustomerProfile::parse("Asha Rao", "12345", "asha@example.com", "2", "1", "family");
        assert_eq!(rejected, Err(InputRejection::InvalidPhone));
    }
}
