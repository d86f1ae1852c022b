use super::ui;
use crate::core::Session;
use crate::core::currency::BASE_CURRENCY;
use crate::core::environment::locale_or_default;
use crate::core::locale::{CurrencyFormatter, LocaleFormatter};
use crate::core::pricing::fraction_digits;
use comfy_table::Cell;

/// Describes the resolved currency and the signals behind it.
pub fn currency_summary(session: &Session) -> String {
    let currency = session.currency();
    let mut output = format!(
        "{}\n\n",
        ui::style_text("Display currency", ui::StyleType::Heading)
    );
    output.push_str(&format!(
        "Currency: {} ({})\n",
        ui::style_text(&currency.code, ui::StyleType::Amount),
        currency.symbol
    ));
    output.push_str(&format!(
        "Rate: 1 {BASE_CURRENCY} = {} {}\n",
        currency.rate, currency.code
    ));
    output.push_str(&format!(
        "Time zone: {}\nLocale: {}\n",
        session.time_zone, session.locale
    ));
    output.push_str(&ui::style_text(
        &format!("Chosen by {}", session.source),
        ui::StyleType::Muted,
    ));
    output
}

/// Table of supported currencies with a sample amount in each.
pub fn rates_table(session: &Session, sample: f64) -> String {
    let mut table = ui::new_table();
    table.set_header(vec![
        ui::heading_cell("Code"),
        ui::heading_cell(&format!("Per 1 {BASE_CURRENCY}")),
        ui::heading_cell(&format!("{sample} {BASE_CURRENCY}")),
    ]);

    let current = &session.currency().code;
    for entry in session.rates().entries() {
        let sample_price = LocaleFormatter
            .format_currency(
                sample * entry.rate,
                &entry.code,
                locale_or_default(&session.locale),
                fraction_digits(&entry.code),
            )
            .unwrap_or_else(|_| format!("{:.2}", sample * entry.rate));
        let code = if &entry.code == current {
            ui::style_text(&entry.code, ui::StyleType::Amount)
        } else {
            entry.code.clone()
        };
        table.add_row(vec![
            Cell::new(code),
            ui::price_cell(entry.rate.to_string()),
            ui::price_cell(sample_price),
        ]);
    }
    table.to_string()
}

/// One line per amount: base price and display price.
pub fn price_lines(session: &Session, amounts: &[f64]) -> String {
    amounts
        .iter()
        .map(|amount| {
            format!(
                "{} {} → {}",
                amount,
                BASE_CURRENCY,
                session.format(*amount)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedEnvironment, RateTable};

    fn session() -> Session {
        Session::start(
            &FixedEnvironment::new("America/New_York", "en-US"),
            RateTable::builtin(),
        )
    }

    #[test]
    fn test_price_lines() {
        let lines = price_lines(&session(), &[3500.0, 850.0]);
        assert_eq!(lines, "3500 INR → $42.00\n850 INR → $10.20");
    }

    #[test]
    fn test_rates_table_lists_every_currency() {
        let table = rates_table(&session(), 1000.0);
        for code in ["INR", "USD", "GBP", "JPY", "EUR", "CNY", "BRL", "CAD", "AUD"] {
            assert!(table.contains(code), "{code} missing");
        }
        assert!(table.contains("₹1,000"));
        assert!(table.contains("$12.00"));
    }

    #[test]
    fn test_currency_summary() {
        let summary = currency_summary(&session());
        assert!(summary.contains("America/New_York"));
        assert!(summary.contains("time zone"));
        assert!(summary.contains("0.012"));
    }
}
