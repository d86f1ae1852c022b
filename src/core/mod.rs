//! Core business logic abstractions

pub mod cart;
pub mod catalog;
pub mod config;
pub mod currency;
pub mod environment;
pub mod locale;
pub mod log;
pub mod order;
pub mod payment;
pub mod pricing;
pub mod region;
pub mod resolver;
pub mod session;
pub mod shop;
pub mod storage;
pub mod suggestion;

// Re-export main types for cleaner imports
pub use currency::{BASE_CURRENCY, CurrencyEntry, RateTable, lookup_rate};
pub use environment::{EnvironmentProvider, FixedEnvironment, SystemEnvironment};
pub use locale::{CurrencyFormatter, LocaleFormatter};
pub use pricing::{PriceFormatter, format_price};
pub use resolver::{ResolvedCurrency, resolve_current_currency};
pub use session::Session;
pub use storage::LocalStore;
pub use suggestion::SuggestionProvider;
