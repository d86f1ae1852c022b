//! Conversion of base amounts into display prices

use crate::core::currency::BASE_CURRENCY;
use crate::core::environment::locale_or_default;
use crate::core::locale::CurrencyFormatter;
use crate::core::resolver::ResolvedCurrency;
use tracing::debug;

/// Fraction digits shown for a currency: none for the base currency, two
/// for everything else.
pub fn fraction_digits(currency_code: &str) -> u32 {
    if currency_code == BASE_CURRENCY { 0 } else { 2 }
}

/// Converts a base amount into the resolved currency.
pub fn convert(base_amount: f64, resolved: &ResolvedCurrency) -> f64 {
    base_amount * resolved.rate
}

/// Renders `base_amount` in the resolved currency for `locale`. A blank
/// locale formats with the default locale's rules.
pub fn format_price(
    base_amount: f64,
    resolved: &ResolvedCurrency,
    locale: &str,
    formatter: &dyn CurrencyFormatter,
) -> String {
    let local_amount = convert(base_amount, resolved);
    let digits = fraction_digits(&resolved.code);
    formatter
        .format_currency(local_amount, &resolved.code, locale_or_default(locale), digits)
        .unwrap_or_else(|e| {
            debug!("Falling back to plain price format: {}", e);
            format!(
                "{} {:.prec$}",
                resolved.code,
                local_amount,
                prec = digits as usize
            )
        })
}

/// Formats prices for one shopper session: a resolved currency, the locale
/// it was resolved for, and a formatter.
pub struct PriceFormatter<'a> {
    resolved: ResolvedCurrency,
    locale: String,
    formatter: &'a dyn CurrencyFormatter,
}

impl<'a> PriceFormatter<'a> {
    pub fn new(
        resolved: ResolvedCurrency,
        locale: &str,
        formatter: &'a dyn CurrencyFormatter,
    ) -> Self {
        Self {
            resolved,
            locale: locale.to_string(),
            formatter,
        }
    }

    pub fn format(&self, base_amount: f64) -> String {
        format_price(base_amount, &self.resolved, &self.locale, self.formatter)
    }

    pub fn currency(&self) -> &ResolvedCurrency {
        &self.resolved
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}
