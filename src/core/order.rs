//! Orders and admin inventory figures

use crate::core::catalog::StoreItem;
use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OrderStatus::Pending => "Pending",
                OrderStatus::Shipped => "Shipped",
                OrderStatus::Delivered => "Delivered",
                OrderStatus::Cancelled => "Cancelled",
            }
        )
    }
}

impl FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(anyhow!("Invalid order status: {}", s)),
        }
    }
}

/// A placed order. `total` is in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub items: Vec<String>,
    pub total: f64,
    pub status: OrderStatus,
    pub date: NaiveDate,
}

/// Next id in the `ORD-NNN` sequence.
pub fn next_order_id(orders: &[Order]) -> String {
    let last = orders
        .iter()
        .filter_map(|o| o.id.strip_prefix("ORD-"))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("ORD-{:03}", last + 1)
}

/// Stock figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySummary {
    /// Σ price × stock, base currency.
    pub total_value: f64,
    pub total_units: u64,
    pub low_stock: Vec<StoreItem>,
}

pub fn inventory_summary(items: &[StoreItem]) -> InventorySummary {
    InventorySummary {
        total_value: items.iter().map(|i| i.price * i.stock as f64).sum(),
        total_units: items.iter().map(|i| u64::from(i.stock)).sum(),
        low_stock: items.iter().filter(|i| i.is_low_stock()).cloned().collect(),
    }
}

/// Revenue over orders that were not cancelled.
pub fn revenue(orders: &[Order]) -> f64 {
    orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| o.total)
        .sum()
}

/// Seed orders shown on a fresh dashboard.
pub fn sample_orders() -> Vec<Order> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        Order {
            id: "ORD-001".to_string(),
            customer_name: "John Doe".to_string(),
            items: vec!["Hand-stitched Silk Scarf".to_string()],
            total: 3500.0,
            status: OrderStatus::Delivered,
            date: date(2023, 10, 20),
        },
        Order {
            id: "ORD-002".to_string(),
            customer_name: "Alice Smith".to_string(),
            items: vec![
                "Ceramic Tea Set".to_string(),
                "Handmade Soy Candle".to_string(),
            ],
            total: 9050.0,
            status: OrderStatus::Shipped,
            date: date(2023, 10, 22),
        },
        Order {
            id: "ORD-003".to_string(),
            customer_name: "Bob Wilson".to_string(),
            items: vec!["Organic Lavender Oil".to_string()],
            total: 1200.0,
            status: OrderStatus::Pending,
            date: date(2023, 10, 25),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::default_items;

    #[test]
    fn test_inventory_summary() {
        let summary = inventory_summary(&default_items());
        assert_eq!(
            summary.total_value,
            3500.0 * 5.0 + 8200.0 * 2.0 + 1200.0 * 12.0 + 850.0 * 20.0
        );
        assert_eq!(summary.total_units, 39);
        assert_eq!(summary.low_stock.len(), 1);
        assert_eq!(summary.low_stock[0].id, "2");
    }

    #[test]
    fn test_inventory_units_do_not_overflow() {
        let mut items = default_items();
        for item in &mut items {
            item.stock = u32::MAX;
        }
        let summary = inventory_summary(&items);
        assert_eq!(summary.total_units, 4 * u64::from(u32::MAX));
        assert!(summary.low_stock.is_empty());
    }

    #[test]
    fn test_next_order_id() {
        assert_eq!(next_order_id(&[]), "ORD-001");
        assert_eq!(next_order_id(&sample_orders()), "ORD-004");
    }

    #[test]
    fn test_revenue_skips_cancelled() {
        let mut orders = sample_orders();
        assert_eq!(revenue(&orders), 13750.0);
        orders[1].status = OrderStatus::Cancelled;
        assert_eq!(revenue(&orders), 4700.0);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("SHIPPED".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!("canceled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("lost".parse::<OrderStatus>().is_err());
    }
}
