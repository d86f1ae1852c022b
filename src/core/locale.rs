//! Locale-aware currency formatting
//!
//! [`CurrencyFormatter`] is the seam between pricing logic and locale data.
//! [`LocaleFormatter`] is the built-in implementation backed by a small table
//! of locale conventions: separators, digit grouping, symbol placement and
//! the symbols shoppers in a locale expect to see.

use crate::core::environment::DEFAULT_LOCALE;
use anyhow::{Result, anyhow, bail};
use tracing::debug;

const NBSP: &str = "\u{a0}";
const NNBSP: &str = "\u{202f}";

/// Formats currency amounts for a locale.
pub trait CurrencyFormatter: Send + Sync {
    fn format_currency(
        &self,
        amount: f64,
        currency_code: &str,
        locale: &str,
        fraction_digits: u32,
    ) -> Result<String>;

    fn extract_symbol(&self, currency_code: &str, locale: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// 1,234,567
    Standard,
    /// 12,34,567
    Indian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Number and currency display conventions for one locale.
#[derive(Debug, Clone, Copy)]
pub struct LocaleRules {
    pub tag: &'static str,
    pub decimal: &'static str,
    pub group: &'static str,
    pub grouping: Grouping,
    pub position: SymbolPosition,
    /// Placed between symbol and number.
    pub symbol_gap: &'static str,
    /// Symbols that differ from [`default_symbol`] in this locale.
    pub symbols: &'static [(&'static str, &'static str)],
}

const LOCALE_RULES: &[LocaleRules] = &[
    LocaleRules {
        tag: "en-IN",
        decimal: ".",
        group: ",",
        grouping: Grouping::Indian,
        position: SymbolPosition::Prefix,
        symbol_gap: "",
        symbols: &[],
    },
    LocaleRules {
        tag: "hi-IN",
        decimal: ".",
        group: ",",
        grouping: Grouping::Indian,
        position: SymbolPosition::Prefix,
        symbol_gap: "",
        symbols: &[],
    },
    LocaleRules {
        tag: "en-US",
        decimal: ".",
        group: ",",
        grouping: Grouping::Standard,
        position: SymbolPosition::Prefix,
        symbol_gap: "",
        symbols: &[],
    },
    LocaleRules {
        tag: "en-GB",
        decimal: ".",
        group: ",",
        grouping: Grouping::Standard,
        position: SymbolPosition::Prefix,
        symbol_gap: "",
        symbols: &[("USD", "US$")],
    },
    LocaleRules {
        tag: "en-AU",
        decimal: ".",
        group: ",",
        grouping: Grouping::Standard,
        position: SymbolPosition::Prefix,
        symbol_gap: "",
        symbols: &[("AUD", "$"), ("USD", "USD")],
    },
    LocaleRules {
        tag: "en-CA",
        decimal: ".",
        group: ",",
        grouping: Grouping::Standard,
        position: SymbolPosition::Prefix,
        symbol_gap: "",
        symbols: &[("CAD", "$"), ("USD", "US$")],
    },
    LocaleRules {
        tag: "fr-FR",
        decimal: ",",
        group: NNBSP,
        grouping: Grouping::Standard,
        position: SymbolPosition::Suffix,
        symbol_gap: NBSP,
        symbols: &[("USD", "$US"), ("CAD", "$CA"), ("AUD", "$AU")],
    },
    LocaleRules {
        tag: "fr-CA",
        decimal: ",",
        group: NBSP,
        grouping: Grouping::Standard,
        position: SymbolPosition::Suffix,
        symbol_gap: NBSP,
        symbols: &[("CAD", "$"), ("USD", "$\u{a0}US")],
    },
    LocaleRules {
        tag: "de-DE",
        decimal: ",",
        group: ".",
        grouping: Grouping::Standard,
        position: SymbolPosition::Suffix,
        symbol_gap: NBSP,
        symbols: &[],
    },
    LocaleRules {
        tag: "ja-JP",
        decimal: ".",
        group: ",",
        grouping: Grouping::Standard,
        position: SymbolPosition::Prefix,
        symbol_gap: "",
        symbols: &[("JPY", "\u{ffe5}"), ("CNY", "元")],
    },
    LocaleRules {
        tag: "zh-CN",
        decimal: ".",
        group: ",",
        grouping: Grouping::Standard,
        position: SymbolPosition::Prefix,
        symbol_gap: "",
        symbols: &[("CNY", "¥"), ("JPY", "JP¥"), ("USD", "US$")],
    },
    LocaleRules {
        tag: "pt-BR",
        decimal: ",",
        group: ".",
        grouping: Grouping::Standard,
        position: SymbolPosition::Prefix,
        symbol_gap: NBSP,
        symbols: &[("USD", "US$")],
    },
];

/// Symbol used when a locale has no specific override.
pub fn default_symbol(currency_code: &str) -> Option<&'static str> {
    match currency_code {
        "INR" => Some("₹"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "EUR" => Some("€"),
        "JPY" => Some("¥"),
        "CNY" => Some("CN¥"),
        "BRL" => Some("R$"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        _ => None,
    }
}

/// Finds the rules for `locale`: exact tag, then first locale sharing the
/// language, then the default locale. Fails on an empty or malformed tag.
pub fn rules_for(locale: &str) -> Result<&'static LocaleRules> {
    let locale = locale.trim();
    let language = locale.split('-').next().unwrap_or_default();
    if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        bail!("Malformed locale tag: '{locale}'");
    }

    let rules = LOCALE_RULES
        .iter()
        .find(|r| r.tag.eq_ignore_ascii_case(locale))
        .or_else(|| {
            LOCALE_RULES.iter().find(|r| {
                r.tag
                    .split('-')
                    .next()
                    .is_some_and(|l| l.eq_ignore_ascii_case(language))
            })
        })
        .or_else(|| LOCALE_RULES.iter().find(|r| r.tag == DEFAULT_LOCALE))
        .ok_or_else(|| anyhow!("No locale rules available for '{locale}'"))?;
    if !rules.tag.eq_ignore_ascii_case(locale) {
        debug!("Using {} rules for locale {}", rules.tag, locale);
    }
    Ok(rules)
}

fn validate_code(currency_code: &str) -> Result<()> {
    if currency_code.len() != 3 || !currency_code.chars().all(|c| c.is_ascii_uppercase()) {
        bail!("Invalid currency code: '{currency_code}'");
    }
    Ok(())
}

/// Splits `amount` into integer and fractional digit strings after rounding
/// half away from zero at `fraction_digits`.
fn round_digits(amount: f64, fraction_digits: u32) -> Result<(String, String)> {
    if fraction_digits > 6 {
        bail!("Unsupported fraction digit count: {fraction_digits}");
    }
    let factor = 10u128.pow(fraction_digits);
    let scaled = (amount.abs() * factor as f64).round();
    if !scaled.is_finite() || scaled >= u128::MAX as f64 {
        bail!("Amount out of range: {amount}");
    }
    let scaled = scaled as u128;
    let integer = (scaled / factor).to_string();
    let fraction = if fraction_digits == 0 {
        String::new()
    } else {
        format!(
            "{:0width$}",
            scaled % factor,
            width = fraction_digits as usize
        )
    };
    Ok((integer, fraction))
}

fn group_digits(digits: &str, grouping: Grouping, separator: &str) -> String {
    let first_group = 3;
    let rest_group = match grouping {
        Grouping::Standard => 3,
        Grouping::Indian => 2,
    };
    if digits.len() <= first_group {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first_group);
    let mut groups = vec![tail];
    let mut rest = head;
    while rest.len() > rest_group {
        let (h, t) = rest.split_at(rest.len() - rest_group);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();
    groups.join(separator)
}

/// Built-in formatter driven by [`LOCALE_RULES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFormatter;

impl LocaleFormatter {
    pub fn new() -> Self {
        Self
    }

    fn symbol(rules: &LocaleRules, currency_code: &str) -> String {
        rules
            .symbols
            .iter()
            .find(|(code, _)| *code == currency_code)
            .map(|(_, symbol)| *symbol)
            .or_else(|| default_symbol(currency_code))
            .map(str::to_string)
            // Codes without a known symbol display as the code itself
            .unwrap_or_else(|| currency_code.to_string())
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format_currency(
        &self,
        amount: f64,
        currency_code: &str,
        locale: &str,
        fraction_digits: u32,
    ) -> Result<String> {
        validate_code(currency_code)?;
        if !amount.is_finite() {
            bail!("Cannot format non-finite amount: {amount}");
        }
        let rules = rules_for(locale)?;
        let symbol = Self::symbol(rules, currency_code);
        let (integer, fraction) = round_digits(amount, fraction_digits)?;

        let mut number = group_digits(&integer, rules.grouping, rules.group);
        if !fraction.is_empty() {
            number.push_str(rules.decimal);
            number.push_str(&fraction);
        }

        // Rounded zero never shows a sign
        let negative = amount < 0.0 && (integer != "0" || fraction.chars().any(|c| c != '0'));
        let sign = if negative { "-" } else { "" };
        let gap = if symbol.chars().all(|c| c.is_ascii_uppercase()) && rules.symbol_gap.is_empty() {
            NBSP
        } else {
            rules.symbol_gap
        };

        Ok(match rules.position {
            SymbolPosition::Prefix => format!("{sign}{symbol}{gap}{number}"),
            SymbolPosition::Suffix => format!("{sign}{number}{gap}{symbol}"),
        })
    }

    fn extract_symbol(&self, currency_code: &str, locale: &str) -> Result<String> {
        validate_code(currency_code)?;
        let rules = rules_for(locale)?;
        Ok(Self::symbol(rules, currency_code))
    }
}
