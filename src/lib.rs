pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::catalog::{CategoryFilter, StoreItem};
use crate::core::config::AppConfig;
use crate::core::environment::{OverrideEnvironment, SystemEnvironment};
use crate::core::order::OrderStatus;
use crate::core::payment::SandboxAuthorizer;
use crate::core::shop::Shop;
use crate::core::{RateTable, Session};
use crate::providers::gemini::GeminiProvider;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Commands that run against a loaded configuration.
pub enum AppCommand {
    Currency,
    Rates { sample: f64 },
    Price { amounts: Vec<f64> },
    Catalog { filter: CategoryFilter, search: String },
    CartShow,
    CartAdd { id: String, quantity: u32 },
    CartRemove { id: String },
    CartClear,
    Checkout { customer_name: String },
    WhatsApp,
    Dashboard,
    Orders,
    ProductUpsert(StoreItem),
    ProductRemove { id: String },
    OrderStatus { id: String, status: OrderStatus },
    SetWhatsApp { number: String },
    Ideas { topic: String },
    Outline { course_name: String },
}

/// Time zone and locale given on the command line. They take precedence over
/// the config file, which takes precedence over the system.
#[derive(Debug, Default, Clone)]
pub struct SignalOverrides {
    pub timezone: Option<String>,
    pub locale: Option<String>,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Reads the signals once and resolves the display currency for this run.
pub fn start_session(config: &AppConfig, overrides: &SignalOverrides) -> Result<Session> {
    let rates = RateTable::with_overrides(&config.rates)?;
    let env = OverrideEnvironment::new(
        overrides.timezone.clone().or_else(|| config.timezone.clone()),
        overrides.locale.clone().or_else(|| config.locale.clone()),
        SystemEnvironment::new(),
    );
    Ok(Session::start(&env, rates))
}

fn gemini_provider(config: &AppConfig) -> Result<GeminiProvider> {
    let gemini = config
        .providers
        .gemini
        .as_ref()
        .context("Suggestions need a `providers.gemini` section in the config")?;
    let api_key = std::env::var(&gemini.api_key_env).ok();
    if api_key.is_none() {
        debug!("{} is not set", gemini.api_key_env);
    }
    Ok(GeminiProvider::new(&gemini.base_url, &gemini.model, api_key))
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    overrides: &SignalOverrides,
) -> Result<()> {
    info!("Tattva store starting...");

    let config = load_config(config_path)?;
    let session = start_session(&config, overrides)?;

    match command {
        AppCommand::Currency => {
            println!("{}", cli::currency::currency_summary(&session));
            Ok(())
        }
        AppCommand::Rates { sample } => {
            println!("{}", cli::currency::rates_table(&session, sample));
            Ok(())
        }
        AppCommand::Price { amounts } => {
            println!("{}", cli::currency::price_lines(&session, &amounts));
            Ok(())
        }
        AppCommand::Ideas { topic } => {
            cli::suggest::ideas(&gemini_provider(&config)?, &topic).await
        }
        AppCommand::Outline { course_name } => {
            cli::suggest::outline(&gemini_provider(&config)?, &course_name).await
        }
        command => run_store_command(command, &config, &session).await,
    }
}

async fn run_store_command(
    command: AppCommand,
    config: &AppConfig,
    session: &Session,
) -> Result<()> {
    let local_store = store::open_store(config)?;
    let shop = Shop::new(local_store.as_ref(), &config.store);

    match command {
        AppCommand::Catalog { filter, search } => {
            cli::store::catalog(&shop, session, filter, &search)
        }
        AppCommand::CartShow => cli::store::show_cart(&shop, session),
        AppCommand::CartAdd { id, quantity } => cli::store::add(&shop, session, &id, quantity),
        AppCommand::CartRemove { id } => cli::store::remove(&shop, &id),
        AppCommand::CartClear => cli::store::clear(&shop),
        AppCommand::Checkout { customer_name } => {
            cli::store::checkout(&shop, session, &customer_name, &SandboxAuthorizer).await
        }
        AppCommand::WhatsApp => cli::store::whatsapp(&shop, session),
        AppCommand::Dashboard => cli::admin::dashboard(&shop, session),
        AppCommand::Orders => cli::admin::orders(&shop, session),
        AppCommand::ProductUpsert(item) => cli::admin::upsert_product(&shop, session, item),
        AppCommand::ProductRemove { id } => cli::admin::remove_product(&shop, &id),
        AppCommand::OrderStatus { id, status } => cli::admin::set_order_status(&shop, &id, status),
        AppCommand::SetWhatsApp { number } => cli::admin::set_whatsapp_number(&shop, &number),
        AppCommand::Currency
        | AppCommand::Rates { .. }
        | AppCommand::Price { .. }
        | AppCommand::Ideas { .. }
        | AppCommand::Outline { .. } => unreachable!("handled without opening the store"),
    }
}
