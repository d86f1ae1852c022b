//! Per-run pricing context

use crate::core::currency::RateTable;
use crate::core::environment::EnvironmentProvider;
use crate::core::locale::{CurrencyFormatter, LocaleFormatter};
use crate::core::pricing::PriceFormatter;
use crate::core::resolver::{ResolutionSource, ResolvedCurrency, resolve_with_source};
use tracing::info;

/// Signals read once at startup together with the currency they resolve to.
/// Every price shown during the run goes through [`Session::prices`].
pub struct Session {
    pub time_zone: String,
    pub locale: String,
    pub source: ResolutionSource,
    rates: RateTable,
    prices: PriceFormatter<'static>,
}

impl Session {
    pub fn start(env: &dyn EnvironmentProvider, rates: RateTable) -> Self {
        Self::with_formatter(env, rates, &LocaleFormatter)
    }

    pub fn with_formatter(
        env: &dyn EnvironmentProvider,
        rates: RateTable,
        formatter: &'static dyn CurrencyFormatter,
    ) -> Self {
        let time_zone = env.current_time_zone();
        let locale = env.current_locale();
        let (currency, source) = resolve_with_source(&time_zone, &locale, &rates, formatter);
        info!(
            "Showing prices in {} ({}) for {} / {}",
            currency.code, currency.symbol, time_zone, locale
        );

        Self {
            prices: PriceFormatter::new(currency, &locale, formatter),
            time_zone,
            locale,
            source,
            rates,
        }
    }

    pub fn currency(&self) -> &ResolvedCurrency {
        self.prices.currency()
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn prices(&self) -> &PriceFormatter<'static> {
        &self.prices
    }

    pub fn format(&self, base_amount: f64) -> String {
        self.prices.format(base_amount)
    }
}
