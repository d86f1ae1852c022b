use anyhow::Result;
use std::fs;
use std::path::Path;
use tattva::core::config::StoreConfig;
use tattva::core::order::OrderStatus;
use tattva::core::shop::Shop;
use tattva::store::disk::DiskStore;
use tattva::{AppCommand, SignalOverrides, load_config, run_command, start_session};
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use std::path::Path;

    /// Config pinned to London so prices come out in pounds regardless of
    /// the machine running the tests.
    pub fn write_config(dir: &Path) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let config = format!(
            r#"---
timezone: "Europe/London"
locale: "en-GB"
store:
  whatsapp_number: "+91 98765 43210"
providers:
  gemini:
    base_url: "http://127.0.0.1:9"
    api_key_env: "TATTVA_TEST_UNSET_KEY"
data_path: "{}"
"#,
            dir.join("data").display()
        );
        std::fs::write(&config_path, config).expect("write config");
        config_path
    }
}

fn open_shop_store(dir: &Path) -> Result<DiskStore> {
    DiskStore::open(&dir.join("data").join("store"))
}

#[test_log::test(tokio::test)]
async fn test_cart_to_checkout_flow() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = test_utils::write_config(dir.path());
    let config_path = config_path.to_str().expect("utf-8 path");
    let overrides = SignalOverrides::default();

    run_command(
        AppCommand::CartAdd {
            id: "1".to_string(),
            quantity: 2,
        },
        Some(config_path),
        &overrides,
    )
    .await?;
    run_command(
        AppCommand::CartAdd {
            id: "4".to_string(),
            quantity: 1,
        },
        Some(config_path),
        &overrides,
    )
    .await?;
    run_command(AppCommand::CartShow, Some(config_path), &overrides).await?;
    run_command(AppCommand::WhatsApp, Some(config_path), &overrides).await?;
    run_command(
        AppCommand::Checkout {
            customer_name: "Priya Nair".to_string(),
        },
        Some(config_path),
        &overrides,
    )
    .await?;

    let store = open_shop_store(dir.path())?;
    let store_config = StoreConfig::default();
    let shop = Shop::new(&store, &store_config);

    assert!(shop.cart()?.is_empty());

    let orders = shop.orders()?;
    info!(?orders, "Orders after checkout");
    assert_eq!(orders.len(), 4);
    assert_eq!(orders[0].id, "ORD-004");
    assert_eq!(orders[0].customer_name, "Priya Nair");
    assert_eq!(orders[0].total, 7850.0);
    assert_eq!(orders[0].status, OrderStatus::Pending);

    let products = shop.products()?;
    assert_eq!(shop.product("1")?.stock, 3);
    assert_eq!(shop.product("4")?.stock, 19);
    assert_eq!(products.len(), 4);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_checkout_with_empty_cart_fails() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = test_utils::write_config(dir.path());

    let result = run_command(
        AppCommand::Checkout {
            customer_name: "Guest Customer".to_string(),
        },
        config_path.to_str(),
        &SignalOverrides::default(),
    )
    .await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Cart is empty"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_admin_changes_persist() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = test_utils::write_config(dir.path());
    let config_path = config_path.to_str().expect("utf-8 path");
    let overrides = SignalOverrides::default();

    run_command(
        AppCommand::OrderStatus {
            id: "ORD-001".to_string(),
            status: OrderStatus::Delivered,
        },
        Some(config_path),
        &overrides,
    )
    .await?;
    run_command(
        AppCommand::ProductRemove {
            id: "2".to_string(),
        },
        Some(config_path),
        &overrides,
    )
    .await?;
    run_command(
        AppCommand::SetWhatsApp {
            number: "+44 7700 900123".to_string(),
        },
        Some(config_path),
        &overrides,
    )
    .await?;
    run_command(AppCommand::Dashboard, Some(config_path), &overrides).await?;

    let store = open_shop_store(dir.path())?;
    let store_config = StoreConfig::default();
    let shop = Shop::new(&store, &store_config);

    let orders = shop.orders()?;
    let first = orders.iter().find(|o| o.id == "ORD-001").expect("ORD-001");
    assert_eq!(first.status, OrderStatus::Delivered);
    assert!(shop.product("2").is_err());
    assert_eq!(shop.whatsapp_number()?.as_deref(), Some("+44 7700 900123"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_command_line_signals_win_over_config() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = test_utils::write_config(dir.path());
    let config = load_config(config_path.to_str())?;

    let from_config = start_session(&config, &SignalOverrides::default())?;
    assert_eq!(from_config.currency().code, "GBP");
    assert_eq!(from_config.format(3500.0), "£33.25");

    let overrides = SignalOverrides {
        timezone: Some("Asia/Tokyo".to_string()),
        locale: Some("ja-JP".to_string()),
    };
    let from_flags = start_session(&config, &overrides)?;
    assert_eq!(from_flags.currency().code, "JPY");
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_suggestions_without_api_key_do_not_fail() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = test_utils::write_config(dir.path());

    run_command(
        AppCommand::Ideas {
            topic: "block printing".to_string(),
        },
        config_path.to_str(),
        &SignalOverrides::default(),
    )
    .await?;
    Ok(())
}

#[test]
fn test_setup_writes_loadable_config() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = dir.path().join("tattva").join("config.yaml");

    tattva::cli::setup::setup_at_path(&config_path)?;
    let content = fs::read_to_string(&config_path)?;
    assert!(content.contains("whatsapp_number"));

    let config = load_config(config_path.to_str())?;
    assert_eq!(config.store.merchant_name, "Ambs Tattva Store");
    Ok(())
}
