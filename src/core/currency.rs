//! Exchange rate table anchored to the base currency

use anyhow::{Result, bail};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Currency every monetary amount is stored in.
pub const BASE_CURRENCY: &str = "INR";

const BUILTIN_RATES: &[(&str, f64)] = &[
    ("INR", 1.0),
    ("USD", 0.012),
    ("GBP", 0.0095),
    ("JPY", 1.87),
    ("EUR", 0.011),
    ("CNY", 0.087),
    ("BRL", 0.062),
    ("CAD", 0.016),
    ("AUD", 0.018),
];

static BUILTIN: LazyLock<RateTable> = LazyLock::new(RateTable::builtin);

/// A supported currency and its rate: units of `code` per one unit of the
/// base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyEntry {
    pub code: String,
    pub rate: f64,
}

/// Immutable set of supported currencies. Built once at startup.
#[derive(Debug, Clone)]
pub struct RateTable {
    entries: Vec<CurrencyEntry>,
}

impl RateTable {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_RATES
                .iter()
                .map(|(code, rate)| CurrencyEntry {
                    code: code.to_string(),
                    rate: *rate,
                })
                .collect(),
        }
    }

    /// Builds a table from explicit entries. Rates must be positive, codes
    /// unique, and the base currency present with a rate of 1.
    pub fn from_entries(entries: Vec<CurrencyEntry>) -> Result<Self> {
        let mut seen = BTreeMap::new();
        for entry in &entries {
            if !entry.rate.is_finite() || entry.rate <= 0.0 {
                bail!(
                    "Invalid rate for {}: {}, rates must be positive",
                    entry.code,
                    entry.rate
                );
            }
            if seen.insert(entry.code.as_str(), entry.rate).is_some() {
                bail!("Duplicate currency code: {}", entry.code);
            }
        }
        match seen.get(BASE_CURRENCY) {
            Some(rate) if *rate == 1.0 => {}
            Some(rate) => bail!("Base currency {BASE_CURRENCY} must have rate 1, got {rate}"),
            None => bail!("Base currency {BASE_CURRENCY} missing from rate table"),
        }

        let (mut base, rest): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|e| e.code == BASE_CURRENCY);
        base.extend(rest);
        Ok(Self { entries: base })
    }

    /// Builds a table from the built-in entries with configured rates layered
    /// on top. New codes are appended; the base currency always stays at 1.
    pub fn with_overrides(overrides: &BTreeMap<String, f64>) -> Result<Self> {
        let mut table = Self::builtin();
        for (code, rate) in overrides {
            let code = code.trim().to_uppercase();
            if !rate.is_finite() || *rate <= 0.0 {
                bail!("Invalid rate for {code}: {rate}, rates must be positive");
            }
            if code == BASE_CURRENCY {
                warn!("Ignoring rate override for base currency {}", BASE_CURRENCY);
                continue;
            }
            match table.entries.iter_mut().find(|e| e.code == code) {
                Some(entry) => entry.rate = *rate,
                None => table.entries.push(CurrencyEntry { code, rate: *rate }),
            }
        }
        debug!("Rate table built with {} currencies", table.entries.len());
        Ok(table)
    }

    /// Returns the entry for `code`, or the base currency entry when the code
    /// is not supported.
    pub fn lookup(&self, code: &str) -> &CurrencyEntry {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .unwrap_or_else(|| self.base())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|e| e.code == code)
    }

    pub fn base(&self) -> &CurrencyEntry {
        // INR is the first built-in entry and overrides never remove it
        &self.entries[0]
    }

    pub fn supported_codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.code.as_str())
    }

    pub fn entries(&self) -> &[CurrencyEntry] {
        &self.entries
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Process-wide built-in table.
pub fn rate_table() -> &'static RateTable {
    &BUILTIN
}

/// Looks up `code` in the built-in table, degrading to the base currency.
pub fn lookup_rate(code: &str) -> &'static CurrencyEntry {
    BUILTIN.lookup(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_supported_rates_positive() {
        for code in rate_table().supported_codes() {
            assert!(lookup_rate(code).rate > 0.0, "{code} has no positive rate");
            assert_eq!(lookup_rate(code).code, code);
        }
    }

    #[test]
    fn test_base_currency_rate_is_one() {
        let base = rate_table().base();
        assert_eq!(base.code, BASE_CURRENCY);
        assert_eq!(base.rate, 1.0);
    }

    #[test]
    fn test_unknown_code_falls_back_to_base() {
        let entry = lookup_rate("__unknown__");
        assert_eq!(entry.code, "INR");
        assert_eq!(entry.rate, 1.0);

        // Lookups are exact
        assert_eq!(lookup_rate("usd").code, "INR");
    }

    #[test]
    fn test_known_rates() {
        assert_eq!(lookup_rate("USD").rate, 0.012);
        assert_eq!(lookup_rate("EUR").rate, 0.011);
        assert_eq!(lookup_rate("AUD").rate, 0.018);
        assert_eq!(rate_table().supported_codes().count(), 9);
    }

    #[test]
    fn test_overrides_update_and_extend() -> Result<()> {
        let overrides = BTreeMap::from([
            ("usd".to_string(), 0.0125),
            ("SGD".to_string(), 0.016),
            ("INR".to_string(), 2.0),
        ]);
        let table = RateTable::with_overrides(&overrides)?;

        assert_eq!(table.lookup("USD").rate, 0.0125);
        assert_eq!(table.lookup("SGD").rate, 0.016);
        assert_eq!(table.lookup("INR").rate, 1.0);
        assert_eq!(table.supported_codes().last(), Some("SGD"));
        Ok(())
    }

    #[test]
    fn test_from_entries_validates_base() {
        let entry = |code: &str, rate: f64| CurrencyEntry {
            code: code.to_string(),
            rate,
        };

        let table = RateTable::from_entries(vec![entry("USD", 0.012), entry("INR", 1.0)]).unwrap();
        assert_eq!(table.base().code, "INR");
        assert_eq!(table.lookup("GBP").code, "INR");

        assert!(RateTable::from_entries(vec![entry("USD", 0.012)]).is_err());
        assert!(RateTable::from_entries(vec![entry("INR", 2.0)]).is_err());
        assert!(
            RateTable::from_entries(vec![entry("INR", 1.0), entry("USD", 0.1), entry("USD", 0.2)])
                .is_err()
        );
    }

    #[test]
    fn test_overrides_reject_non_positive_rates() {
        let overrides = BTreeMap::from([("USD".to_string(), 0.0)]);
        let err = RateTable::with_overrides(&overrides).unwrap_err();
        assert!(err.to_string().contains("must be positive"));

        let overrides = BTreeMap::from([("USD".to_string(), f64::NAN)]);
        assert!(RateTable::with_overrides(&overrides).is_err());
    }
}
