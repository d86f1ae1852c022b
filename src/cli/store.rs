use super::ui;
use crate::core::Session;
use crate::core::cart::{Cart, whatsapp_link};
use crate::core::catalog::{CategoryFilter, StoreItem, filter_items};
use crate::core::payment::PaymentAuthorizer;
use crate::core::shop::{CheckoutResult, Shop};
use anyhow::{Context, Result};
use comfy_table::Cell;
use tracing::debug;

pub fn catalog_table(items: &[&StoreItem], session: &Session) -> String {
    let mut table = ui::new_table();
    table.set_header(vec![
        ui::heading_cell("Id"),
        ui::heading_cell("Product"),
        ui::heading_cell("Category"),
        ui::heading_cell(&format!("Price ({})", session.currency().code)),
        ui::heading_cell("Stock"),
    ]);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.id),
            Cell::new(format!("{}\n{}", item.name, ui::style_text(&item.description, ui::StyleType::Muted))),
            Cell::new(item.category),
            ui::price_cell(session.format(item.price)),
            ui::stock_cell(item.stock, item.is_low_stock()),
        ]);
    }
    table.to_string()
}

pub fn cart_view(cart: &Cart, session: &Session) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut table = ui::new_table();
    table.set_header(vec![
        ui::heading_cell("Product"),
        ui::heading_cell("Qty"),
        ui::heading_cell("Price"),
        ui::heading_cell("Subtotal"),
    ]);
    for line in &cart.items {
        table.add_row(vec![
            Cell::new(&line.name),
            ui::price_cell(line.quantity.to_string()),
            ui::price_cell(session.format(line.price)),
            ui::price_cell(session.format(line.line_total())),
        ]);
    }

    format!(
        "{}\n\n{} ({} items): {}",
        table,
        ui::style_text("Total", ui::StyleType::Label),
        cart.item_count(),
        ui::style_text(&session.format(cart.total()), ui::StyleType::Amount)
    )
}

pub fn catalog(shop: &Shop, session: &Session, filter: CategoryFilter, search: &str) -> Result<()> {
    let products = shop.products()?;
    let items = filter_items(&products, filter, search);
    debug!("{} of {} products match", items.len(), products.len());
    if items.is_empty() {
        println!("No products match.");
        return Ok(());
    }
    println!(
        "{}\n",
        ui::style_text("Tattva Store", ui::StyleType::Heading)
    );
    println!("{}", catalog_table(&items, session));
    Ok(())
}

pub fn show_cart(shop: &Shop, session: &Session) -> Result<()> {
    println!("{}", cart_view(&shop.cart()?, session));
    Ok(())
}

pub fn add(shop: &Shop, session: &Session, id: &str, quantity: u32) -> Result<()> {
    let cart = shop.add_to_cart(id, quantity)?;
    println!("Added {quantity} × {id} to cart.\n");
    println!("{}", cart_view(&cart, session));
    Ok(())
}

pub fn remove(shop: &Shop, id: &str) -> Result<()> {
    if shop.remove_from_cart(id)? {
        println!("Removed {id} from cart.");
    } else {
        println!("{id} is not in the cart.");
    }
    Ok(())
}

pub fn clear(shop: &Shop) -> Result<()> {
    shop.clear_cart()?;
    println!("Cart cleared.");
    Ok(())
}

pub async fn checkout(
    shop: &Shop<'_>,
    session: &Session,
    customer_name: &str,
    authorizer: &(dyn PaymentAuthorizer + Send + Sync),
) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    match shop
        .checkout(customer_name, session.currency(), authorizer, today)
        .await?
    {
        CheckoutResult::Placed { order, request } => {
            println!(
                "{} Order {} placed, charged {} {}.",
                ui::style_text("Payment successful!", ui::StyleType::Amount),
                order.id,
                request.total_price,
                request.currency_code
            );
        }
        CheckoutResult::Declined { reason, request } => {
            println!(
                "{} {} {} was not charged: {}",
                ui::style_text("Payment declined.", ui::StyleType::Alert),
                request.total_price,
                request.currency_code,
                reason
            );
        }
    }
    Ok(())
}

/// Prints the order message and a chat link that carries it.
pub fn whatsapp(shop: &Shop, session: &Session) -> Result<()> {
    let cart = shop.cart()?;
    if cart.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }
    let number = shop
        .whatsapp_number()?
        .context("No messaging number set, use `tattva admin whatsapp <number>`")?;
    let message = cart.order_message(session.prices());
    println!("{message}\n");
    println!("{}", whatsapp_link(&number, &message)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::default_items;
    use crate::core::{FixedEnvironment, RateTable};

    fn session() -> Session {
        Session::start(
            &FixedEnvironment::new("Europe/London", "en-GB"),
            RateTable::builtin(),
        )
    }

    #[test]
    fn test_catalog_table_shows_display_prices() {
        let items = default_items();
        let refs: Vec<&StoreItem> = items.iter().collect();
        let table = catalog_table(&refs, &session());
        assert!(table.contains("Price (GBP)"));
        assert!(table.contains("£33.25"));
        assert!(table.contains("Ceramic Tea Set"));
    }

    #[test]
    fn test_cart_view() -> Result<()> {
        let items = default_items();
        let mut cart = Cart::new();
        assert_eq!(cart_view(&cart, &session()), "Your cart is empty.");

        cart.add(&items[3], 2)?;
        let view = cart_view(&cart, &session());
        assert!(view.contains("Handmade Soy Candle"));
        assert!(view.contains("£16.15"));
        assert!(view.contains("(2 items)"));
        Ok(())
    }
}
