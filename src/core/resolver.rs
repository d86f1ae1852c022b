//! Display currency resolution from region signals

use crate::core::currency::{BASE_CURRENCY, RateTable};
use crate::core::environment::{EnvironmentProvider, locale_or_default};
use crate::core::locale::CurrencyFormatter;
use crate::core::region;
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

/// Symbol used when the formatter cannot produce one.
pub const DEFAULT_SYMBOL: &str = "₹";

/// Currency chosen for the current shopper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCurrency {
    pub code: String,
    pub symbol: String,
    pub rate: f64,
}

/// Which signal decided the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolutionSource {
    TimeZone,
    Locale,
    Region,
    Default,
}

impl Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResolutionSource::TimeZone => "time zone",
                ResolutionSource::Locale => "locale",
                ResolutionSource::Region => "region",
                ResolutionSource::Default => "default",
            }
        )
    }
}

/// Runs the fallback chain: timezone, exact locale, locale region suffix,
/// base currency.
pub fn select_currency_code(time_zone: &str, locale: &str) -> (&'static str, ResolutionSource) {
    if let Some(code) = region::currency_for_time_zone(time_zone) {
        return (code, ResolutionSource::TimeZone);
    }
    if let Some(code) = region::currency_for_locale(locale) {
        return (code, ResolutionSource::Locale);
    }
    if let Some(code) = region::region_suffix(locale).and_then(region::currency_for_region) {
        return (code, ResolutionSource::Region);
    }
    (BASE_CURRENCY, ResolutionSource::Default)
}

/// Resolves the display currency for explicit signals. Never fails: every
/// path ends in a usable currency.
pub fn resolve_currency(
    time_zone: &str,
    locale: &str,
    rates: &RateTable,
    formatter: &dyn CurrencyFormatter,
) -> ResolvedCurrency {
    resolve_with_source(time_zone, locale, rates, formatter).0
}

/// Like [`resolve_currency`], also reporting which step decided. A code
/// without a rate degrades to the base currency and reports `Default`.
pub fn resolve_with_source(
    time_zone: &str,
    locale: &str,
    rates: &RateTable,
    formatter: &dyn CurrencyFormatter,
) -> (ResolvedCurrency, ResolutionSource) {
    let (code, mut source) = select_currency_code(time_zone, locale);
    let entry = rates.lookup(code);
    if entry.code != code {
        debug!("Currency {} has no rate, using {}", code, entry.code);
        source = ResolutionSource::Default;
    }

    let symbol = formatter
        .extract_symbol(&entry.code, locale_or_default(locale))
        .unwrap_or_else(|e| {
            debug!("Symbol lookup failed for {}: {}", entry.code, e);
            DEFAULT_SYMBOL.to_string()
        });

    debug!(
        time_zone,
        locale,
        %source,
        code = %entry.code,
        "Resolved display currency"
    );
    let resolved = ResolvedCurrency {
        code: entry.code.clone(),
        symbol,
        rate: entry.rate,
    };
    (resolved, source)
}

/// Resolves the display currency from the host environment.
pub fn resolve_current_currency(
    env: &dyn EnvironmentProvider,
    rates: &RateTable,
    formatter: &dyn CurrencyFormatter,
) -> ResolvedCurrency {
    resolve_currency(
        &env.current_time_zone(),
        &env.current_locale(),
        rates,
        formatter,
    )
}
