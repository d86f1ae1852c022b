//! Region signal to currency code tables

const TIME_ZONES: &[(&str, &str)] = &[
    ("Asia/Kolkata", "INR"),
    ("Asia/Calcutta", "INR"),
    ("Europe/London", "GBP"),
    ("Europe/Paris", "EUR"),
    ("Europe/Berlin", "EUR"),
    ("Asia/Tokyo", "JPY"),
    ("America/New_York", "USD"),
    ("America/Los_Angeles", "USD"),
    ("America/Chicago", "USD"),
    ("America/Toronto", "CAD"),
    ("Australia/Sydney", "AUD"),
    ("America/Sao_Paulo", "BRL"),
];

const LOCALES: &[(&str, &str)] = &[
    ("en-IN", "INR"),
    ("hi-IN", "INR"),
    ("en-GB", "GBP"),
    ("ja-JP", "JPY"),
    ("zh-CN", "CNY"),
    ("fr-FR", "EUR"),
    ("de-DE", "EUR"),
];

const REGIONS: &[(&str, &str)] = &[
    ("IN", "INR"),
    ("GB", "GBP"),
    ("JP", "JPY"),
    ("CN", "CNY"),
    ("FR", "EUR"),
    ("DE", "EUR"),
    ("US", "USD"),
    ("CA", "CAD"),
    ("AU", "AUD"),
    ("BR", "BRL"),
];

fn find(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, code)| *code)
}

/// Exact, case-sensitive timezone lookup.
pub fn currency_for_time_zone(tz: &str) -> Option<&'static str> {
    find(TIME_ZONES, tz)
}

/// Exact, case-sensitive locale lookup.
pub fn currency_for_locale(locale: &str) -> Option<&'static str> {
    find(LOCALES, locale)
}

/// Region code lookup. The code is uppercased first.
pub fn currency_for_region(region: &str) -> Option<&'static str> {
    find(REGIONS, &region.to_uppercase())
}

/// The segment right after the first `-` of a locale tag, if any.
pub fn region_suffix(locale: &str) -> Option<&str> {
    locale
        .split_once('-')
        .map(|(_, rest)| rest.split('-').next().unwrap_or(rest))
}

pub fn time_zones() -> &'static [(&'static str, &'static str)] {
    TIME_ZONES
}

pub fn locales() -> &'static [(&'static str, &'static str)] {
    LOCALES
}

pub fn regions() -> &'static [(&'static str, &'static str)] {
    REGIONS
}
