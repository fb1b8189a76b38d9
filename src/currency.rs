// Currency conversion against a fixed, static exchange-rate snapshot

use std::collections::HashMap;
use tracing::warn;

// Each rate is the number of units of that currency one unit of the home currency buys,
// so the home currency itself is always 1.0
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    home_currency: String,
    rates: HashMap<String, f64>,
}

impl CurrencyConverter {
    pub fn new<I, S>(home_currency: &str, rates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let home_currency = home_currency.trim().to_ascii_uppercase();
        let mut rates: HashMap<String, f64> = rates
            .into_iter()
            .map(|(code, rate)| (code.as_ref().trim().to_ascii_uppercase(), rate))
            .collect();
        rates.entry(home_currency.clone()).or_insert(1.0);

        Self {
            home_currency,
            rates,
        }
    }

    pub fn home_currency(&self) -> &str {
        &self.home_currency
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.trim().to_ascii_uppercase()).copied()
    }

    pub fn knows(&self, code: &str) -> bool {
        self.rate(code).is_some()
    }

    // Convert `amount` by pivoting through the home currency.
    //
    // When either code is missing from the table the amount is returned unchanged, so the
    // result is NOT denominated in `to` in that case. The round-trip law only holds for
    // known codes. Use `try_convert` to tell the two apart.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        match self.try_convert(amount, from, to) {
            Some(converted) => converted,
            None => {
                warn!(from, to, amount, "Unknown currency, passing amount through unconverted");
                amount
            }
        }
    }

    // Same as `convert` but reports an unknown code instead of passing the amount through
    pub fn try_convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        if from.trim().eq_ignore_ascii_case(to.trim()) {
            // Rates cancel; skip the float round trip so the identity is exact
            return Some(amount);
        }

        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        Some(amount / from_rate * to_rate)
    }
}
