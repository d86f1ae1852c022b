use super::ui;
use crate::core::Session;
use crate::core::catalog::StoreItem;
use crate::core::order::{InventorySummary, Order, OrderStatus, inventory_summary, revenue};
use crate::core::shop::Shop;
use anyhow::Result;
use comfy_table::Cell;

pub fn inventory_view(summary: &InventorySummary, session: &Session) -> String {
    let mut output = format!(
        "{}\n\n",
        ui::style_text("Inventory", ui::StyleType::Heading)
    );
    output.push_str(&format!(
        "Inventory value: {}\nUnits in stock: {}\n",
        ui::style_text(&session.format(summary.total_value), ui::StyleType::Amount),
        summary.total_units
    ));

    if summary.low_stock.is_empty() {
        output.push_str(&ui::style_text("No products running low.", ui::StyleType::Muted));
        return output;
    }

    let mut table = ui::new_table();
    table.set_header(vec![ui::heading_cell("Low stock"), ui::heading_cell("Left")]);
    for item in &summary.low_stock {
        table.add_row(vec![Cell::new(&item.name), ui::stock_cell(item.stock, true)]);
    }
    output.push('\n');
    output.push_str(&table.to_string());
    output
}

pub fn orders_table(orders: &[Order], session: &Session) -> String {
    let mut table = ui::new_table();
    table.set_header(vec![
        ui::heading_cell("Order"),
        ui::heading_cell("Customer"),
        ui::heading_cell("Items"),
        ui::heading_cell("Total"),
        ui::heading_cell("Status"),
        ui::heading_cell("Date"),
    ]);
    for order in orders {
        let status = match order.status {
            OrderStatus::Cancelled => ui::style_text("Cancelled", ui::StyleType::Alert),
            status => status.to_string(),
        };
        table.add_row(vec![
            Cell::new(&order.id),
            Cell::new(&order.customer_name),
            Cell::new(order.items.join(", ")),
            ui::price_cell(session.format(order.total)),
            Cell::new(status),
            Cell::new(order.date.format("%Y-%m-%d")),
        ]);
    }
    table.to_string()
}

/// Store overview: revenue, inventory and recent orders.
pub fn dashboard(shop: &Shop, session: &Session) -> Result<()> {
    let products = shop.products()?;
    let orders = shop.orders()?;

    println!(
        "Store revenue: {}\n",
        ui::style_text(&session.format(revenue(&orders)), ui::StyleType::Amount)
    );
    println!("{}", inventory_view(&inventory_summary(&products), session));
    ui::print_rule();
    println!("{}", orders_table(&orders, session));
    Ok(())
}

pub fn orders(shop: &Shop, session: &Session) -> Result<()> {
    println!("{}", orders_table(&shop.orders()?, session));
    Ok(())
}

pub fn upsert_product(shop: &Shop, session: &Session, item: StoreItem) -> Result<()> {
    let name = item.name.clone();
    let id = item.id.clone();
    let price = session.format(item.price);
    if shop.upsert_product(item)? {
        println!("Added {name} ({id}) at {price}.");
    } else {
        println!("Updated {name} ({id}), now {price}.");
    }
    Ok(())
}

pub fn remove_product(shop: &Shop, id: &str) -> Result<()> {
    if shop.remove_product(id)? {
        println!("Removed product {id}.");
    } else {
        println!("No product with id {id}.");
    }
    Ok(())
}

pub fn set_order_status(shop: &Shop, id: &str, status: OrderStatus) -> Result<()> {
    let order = shop.set_order_status(id, status)?;
    println!("Order {} is now {}.", order.id, order.status);
    Ok(())
}

pub fn set_whatsapp_number(shop: &Shop, number: &str) -> Result<()> {
    shop.set_whatsapp_number(number)?;
    println!("Messaging number saved.");
    Ok(())
}
